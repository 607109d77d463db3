use thiserror::Error;

use crate::extract::ExtractionFailure;
use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("unsupported site for URL {url}")]
    UnsupportedSite { url: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionFailure),

    #[error("failed to serialize review table: {0}")]
    Serialization(#[from] csv::Error),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("scrape cancelled before page {page}")]
    Cancelled { page: u32 },
}

impl ScraperError {
    /// Returns true for network failures and non-success HTTP statuses.
    #[must_use]
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// Returns true when a review block was skipped for a missing field.
    #[must_use]
    pub fn is_extraction(&self) -> bool {
        matches!(self, Self::Extraction(_))
    }
}
