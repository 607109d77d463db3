//! Normalization of per-site review records into one CSV table.
//!
//! The table always has the columns `Name,Rating,Comments`, in that order,
//! whatever site a row came from. Rows keep input-URL order and, within a
//! URL, document order. Values are quoted only when they contain a comma,
//! quote or line break, and records end with `\n`.

use std::io;

use reviewscope_core::{ReviewRow, REVIEW_COLUMNS};

use crate::error::ScraperError;
use crate::extract::RawReview;

/// Converts one extracted review into a table row.
///
/// Ratings become text: free-text ratings are kept verbatim, star counts
/// are written as a decimal integer.
#[must_use]
pub fn normalize_review(review: RawReview) -> ReviewRow {
    ReviewRow {
        name: review.name,
        rating: review.rating.to_string(),
        comments: review.comment,
    }
}

/// The uniform, ordered review table produced by one scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewTable {
    rows: Vec<ReviewRow>,
}

impl ReviewTable {
    /// Flattens per-URL batches into one table, keeping batch order and
    /// the order of reviews inside each batch.
    pub fn from_batches<I, U>(batches: I) -> Self
    where
        I: IntoIterator<Item = (U, Vec<RawReview>)>,
    {
        let rows = batches
            .into_iter()
            .flat_map(|(_, reviews)| reviews)
            .map(normalize_review)
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn from_rows(rows: Vec<ReviewRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[ReviewRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializes the table as UTF-8 CSV with a header row.
    ///
    /// An empty table still produces the header.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Serialization`] if a record cannot be written.
    pub fn to_csv(&self) -> Result<String, ScraperError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(REVIEW_COLUMNS)?;
        for row in &self.rows {
            writer.write_record(row.fields())?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            ScraperError::Serialization(csv::Error::from(io::Error::new(
                io::ErrorKind::InvalidData,
                e,
            )))
        })
    }
}

/// Parses CSV produced by [`ReviewTable::to_csv`] back into rows.
///
/// # Errors
///
/// Returns [`ScraperError::Serialization`] if the text is not a valid
/// review table.
pub fn parse_csv(text: &str) -> Result<Vec<ReviewRow>, ScraperError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let rows = reader
        .deserialize::<ReviewRow>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
