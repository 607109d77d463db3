//! Multi-site customer-review scraping engine.
//!
//! Classifies each input URL by site, fetches its review pages, extracts
//! review records with the site's rules, and merges everything into one
//! `Name,Rating,Comments` CSV table.

pub mod engine;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod pagination;
pub mod report;
pub mod site;

pub use engine::{ReviewScraper, ScrapeOptions, ScrapeOutcome};
pub use error::ScraperError;
pub use export::{ExportBuffer, ExportSnapshot, ExportView, EXPORT_FILE_NAME};
pub use extract::{ExtractionFailure, ExtractorRegistry, Rating, RawReview, ReviewExtractor};
pub use fetch::{FetchError, PageFetcher};
pub use normalize::{parse_csv, ReviewTable};
pub use report::{MalformedPolicy, ScrapeIssue, ScrapeReport};
pub use site::{classify, Site};
pub use tokio_util::sync::CancellationToken;
