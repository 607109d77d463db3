//! Per-site review extraction strategies.
//!
//! Each supported site has one [`ReviewExtractor`] implementation that turns
//! a page's raw markup into review records using that site's CSS structure.
//! Extractors work block by block: a review block with a missing field yields
//! an [`ExtractionFailure`] for that block only, and extraction carries on
//! with the next block. Results are returned in document order.
//!
//! The engine looks extractors up by [`Site`] through an
//! [`ExtractorRegistry`], so adding a site means adding a module and a
//! `register` call.

mod amazon;
mod flipkart;
mod snapdeal;

use std::collections::HashMap;
use std::fmt;

use scraper::{ElementRef, Selector};

use crate::site::Site;

pub use amazon::AmazonExtractor;
pub use flipkart::FlipkartExtractor;
pub use snapdeal::SnapdealExtractor;

/// A review rating in the shape its source site exposes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rating {
    /// Free text taken verbatim from the page, e.g. `"4.0 out of 5 stars"`.
    Text(String),
    /// Number of highlighted star icons.
    Stars(u32),
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Text(text) => f.write_str(text),
            Rating::Stars(count) => write!(f, "{count}"),
        }
    }
}

/// One review as read from a single review block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReview {
    pub name: String,
    pub rating: Rating,
    pub comment: String,
}

/// A review block that lacked an expected element or attribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{site} review block {block} is missing its {field}")]
pub struct ExtractionFailure {
    pub site: Site,
    /// Zero-based position of the block among the page's review blocks.
    pub block: usize,
    pub field: &'static str,
}

/// Outcome of reading one review block.
pub type BlockResult = Result<RawReview, ExtractionFailure>;

/// Site-specific review extraction.
pub trait ReviewExtractor: Send + Sync {
    /// The site whose markup this extractor understands.
    fn site(&self) -> Site;

    /// Reads every review block in `markup`, in document order.
    fn extract(&self, markup: &str) -> Vec<BlockResult>;
}

/// Lookup table from [`Site`] to its extractor.
#[derive(Default)]
pub struct ExtractorRegistry {
    map: HashMap<Site, Box<dyn ReviewExtractor>>,
}

impl ExtractorRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the extractors for every supported site.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(AmazonExtractor));
        registry.register(Box::new(FlipkartExtractor));
        registry.register(Box::new(SnapdealExtractor));
        registry
    }

    /// Registers an extractor under its own site, replacing any previous one.
    pub fn register(&mut self, extractor: Box<dyn ReviewExtractor>) {
        self.map.insert(extractor.site(), extractor);
    }

    #[must_use]
    pub fn get(&self, site: Site) -> Option<&dyn ReviewExtractor> {
        self.map.get(&site).map(|extractor| &**extractor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("sites", &self.map.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Parses a selector known at compile time.
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Concatenated descendant text of an element, untouched.
fn node_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// First descendant of `block` matching `sel`, or a failure naming `field`.
fn require<'a>(
    block: ElementRef<'a>,
    sel: &Selector,
    site: Site,
    index: usize,
    field: &'static str,
) -> Result<ElementRef<'a>, ExtractionFailure> {
    block.select(sel).next().ok_or(ExtractionFailure {
        site,
        block: index,
        field,
    })
}
