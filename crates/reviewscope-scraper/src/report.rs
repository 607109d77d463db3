//! Per-scrape issue reporting.

use crate::error::ScraperError;

/// What to do with review blocks that are missing an expected field.
///
/// Malformed blocks are always skipped; the policy only decides whether the
/// caller hears about each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Add one [`ScrapeIssue`] per skipped block to the report.
    #[default]
    Report,
    /// Skip quietly; only the `skipped_blocks` count records them.
    Skip,
}

/// A non-fatal problem met while scraping one input URL.
#[derive(Debug)]
pub struct ScrapeIssue {
    /// The input URL the problem belongs to.
    pub url: String,
    /// Page number, when the problem is tied to a single page.
    pub page: Option<u32>,
    pub error: ScraperError,
}

/// Everything that went wrong during a scrape without stopping it.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub issues: Vec<ScrapeIssue>,
    /// Review blocks dropped because a field was missing, reported or not.
    pub skipped_blocks: usize,
    /// Pages whose markup was fetched successfully.
    pub pages_fetched: usize,
}

impl ScrapeReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.skipped_blocks == 0
    }

    /// Number of input URLs skipped as unsupported.
    #[must_use]
    pub fn unsupported_urls(&self) -> usize {
        self.count(|e| matches!(e, ScraperError::UnsupportedSite { .. }))
    }

    /// Number of pages that could not be fetched.
    #[must_use]
    pub fn failed_pages(&self) -> usize {
        self.count(ScraperError::is_fetch)
    }

    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.count(|e| matches!(e, ScraperError::Cancelled { .. })) > 0
    }

    pub(crate) fn merge(&mut self, other: ScrapeReport) {
        self.issues.extend(other.issues);
        self.skipped_blocks += other.skipped_blocks;
        self.pages_fetched += other.pages_fetched;
    }

    fn count(&self, pred: impl Fn(&ScraperError) -> bool) -> usize {
        self.issues.iter().filter(|issue| pred(&issue.error)).count()
    }
}
