//! Export buffer holding the latest serialized review table.
//!
//! The buffer is a cheap, clonable handle owned by whoever drives scrapes.
//! Writers publish a fully built [`ExportSnapshot`] that replaces the previous
//! one in a single step; readers always get a complete snapshot, never a
//! partially written one.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use reviewscope_core::ReviewRow;

use crate::error::ScraperError;
use crate::normalize::{parse_csv, ReviewTable};

/// File name offered for downloads of the current export.
pub const EXPORT_FILE_NAME: &str = "reviews.csv";

/// One completed scrape, serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSnapshot {
    csv: String,
    row_count: usize,
    created_at: DateTime<Utc>,
}

impl ExportSnapshot {
    /// Serializes `table`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Serialization`] if the table cannot be written.
    pub fn from_table(table: &ReviewTable) -> Result<Self, ScraperError> {
        Ok(Self {
            csv: table.to_csv()?,
            row_count: table.len(),
            created_at: Utc::now(),
        })
    }

    /// The CSV text, header included.
    #[must_use]
    pub fn csv(&self) -> &str {
        &self.csv
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The first `rows` rows of the table.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Serialization`] if the stored CSV cannot be
    /// read back.
    pub fn preview(&self, rows: usize) -> Result<Vec<ReviewRow>, ScraperError> {
        let mut parsed = parse_csv(&self.csv)?;
        parsed.truncate(rows);
        Ok(parsed)
    }
}

/// What the buffer currently offers to preview and download actions.
#[derive(Debug, Clone)]
pub enum ExportView {
    /// No scrape has completed yet.
    NotScraped,
    /// The latest scrape completed but found no reviews.
    Empty(Arc<ExportSnapshot>),
    /// The latest scrape produced at least one row.
    Ready(Arc<ExportSnapshot>),
}

/// Single-slot, overwrite-on-publish holder of the latest export.
#[derive(Debug, Clone, Default)]
pub struct ExportBuffer {
    latest: Arc<RwLock<Option<Arc<ExportSnapshot>>>>,
}

impl ExportBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current snapshot.
    pub fn publish(&self, snapshot: ExportSnapshot) {
        let snapshot = Arc::new(snapshot);
        let mut slot = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(snapshot);
    }

    /// The most recently published snapshot, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<ExportSnapshot>> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn view(&self) -> ExportView {
        match self.latest() {
            None => ExportView::NotScraped,
            Some(snapshot) if snapshot.is_empty() => ExportView::Empty(snapshot),
            Some(snapshot) => ExportView::Ready(snapshot),
        }
    }
}
