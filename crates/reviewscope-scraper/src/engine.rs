//! Multi-site scrape orchestration.
//!
//! For each input URL: classify the site, look up its extractor, and drive
//! pagination. Unsupported URLs, failed pages and malformed review blocks are
//! logged and reported but never abort the run; the scrape always returns
//! whatever was collected, possibly nothing.

use futures::stream::{self, StreamExt};
use reviewscope_core::AppConfig;
use tokio_util::sync::CancellationToken;

use crate::error::ScraperError;
use crate::export::{ExportBuffer, ExportSnapshot};
use crate::extract::ExtractorRegistry;
use crate::fetch::PageFetcher;
use crate::normalize::ReviewTable;
use crate::pagination::{drive, UrlBatch};
use crate::report::{MalformedPolicy, ScrapeIssue, ScrapeReport};
use crate::site::classify;

/// Tunables for one [`ReviewScraper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Pages fetched per input URL, starting at page 1.
    pub max_pages: u32,
    /// Input URLs scraped at the same time. `1` scrapes strictly in sequence.
    pub max_concurrent_urls: usize,
    pub malformed: MalformedPolicy,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            max_pages: 1,
            max_concurrent_urls: 1,
            malformed: MalformedPolicy::Report,
        }
    }
}

impl ScrapeOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            max_concurrent_urls: config.max_concurrent_urls,
            malformed: if config.report_malformed {
                MalformedPolicy::Report
            } else {
                MalformedPolicy::Skip
            },
        }
    }
}

/// The normalized table from one scrape plus everything that went wrong.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    pub table: ReviewTable,
    pub report: ScrapeReport,
}

/// Scrapes review pages from every supported site into one table.
#[derive(Debug)]
pub struct ReviewScraper {
    fetcher: PageFetcher,
    registry: ExtractorRegistry,
    options: ScrapeOptions,
}

impl ReviewScraper {
    /// Creates a scraper with the built-in extractor for every supported site.
    #[must_use]
    pub fn new(fetcher: PageFetcher, options: ScrapeOptions) -> Self {
        Self {
            fetcher,
            registry: ExtractorRegistry::builtin(),
            options,
        }
    }

    /// Builds the fetcher and options from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::ClientBuild`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let fetcher = PageFetcher::new(config.request_timeout_secs, &config.user_agent)?;
        Ok(Self::new(fetcher, ScrapeOptions::from_config(config)))
    }

    /// Replaces the extractor registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn options(&self) -> &ScrapeOptions {
        &self.options
    }

    /// Scrapes every URL and merges the results in input order.
    ///
    /// Up to `max_concurrent_urls` URLs are in flight at once; the table
    /// still lists URLs in the order given.
    pub async fn scrape<S: AsRef<str>>(
        &self,
        urls: &[S],
        cancel: &CancellationToken,
    ) -> ScrapeOutcome {
        let max_concurrent = self.options.max_concurrent_urls.max(1);

        let batches: Vec<(&str, UrlBatch)> = stream::iter(urls.iter().map(|url| url.as_ref()))
            .map(|url| async move { (url, self.scrape_url(url, cancel).await) })
            .buffered(max_concurrent)
            .collect()
            .await;

        let mut report = ScrapeReport::default();
        let mut reviews = Vec::with_capacity(batches.len());
        for (url, batch) in batches {
            report.merge(batch.report);
            reviews.push((url, batch.reviews));
        }
        let table = ReviewTable::from_batches(reviews);

        tracing::info!(
            urls = urls.len(),
            rows = table.len(),
            issues = report.issues.len(),
            skipped_blocks = report.skipped_blocks,
            "scrape finished"
        );

        ScrapeOutcome { table, report }
    }

    /// Scrapes `urls` and publishes the serialized table to `buffer`.
    ///
    /// The table is fully serialized before publishing, so the buffer is
    /// either replaced by the complete new result or left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Serialization`] if the table cannot be written
    /// as CSV; the buffer is not touched in that case.
    pub async fn scrape_into<S: AsRef<str>>(
        &self,
        urls: &[S],
        cancel: &CancellationToken,
        buffer: &ExportBuffer,
    ) -> Result<ScrapeOutcome, ScraperError> {
        let outcome = self.scrape(urls, cancel).await;
        let snapshot = ExportSnapshot::from_table(&outcome.table)?;
        buffer.publish(snapshot);
        Ok(outcome)
    }

    async fn scrape_url(&self, url: &str, cancel: &CancellationToken) -> UrlBatch {
        let Some(extractor) = classify(url).and_then(|site| self.registry.get(site)) else {
            tracing::warn!(url, "unsupported website; skipping URL");
            let mut batch = UrlBatch::default();
            batch.report.issues.push(ScrapeIssue {
                url: url.to_owned(),
                page: None,
                error: ScraperError::UnsupportedSite {
                    url: url.to_owned(),
                },
            });
            return batch;
        };

        tracing::info!(url, site = %extractor.site(), "scraping reviews");
        drive(
            &self.fetcher,
            extractor,
            url,
            self.options.max_pages,
            self.options.malformed,
            cancel,
        )
        .await
    }
}
