//! The normalized review record shared by the engine and its callers.

use serde::{Deserialize, Serialize};

/// Column names of the exported review table, in output order.
pub const REVIEW_COLUMNS: [&str; 3] = ["Name", "Rating", "Comments"];

/// One row of the normalized review table.
///
/// Ratings are stored as text whatever the source site: free-text ratings
/// such as `"4.0 out of 5 stars"` are kept verbatim and star counts are
/// written as a decimal integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Comments")]
    pub comments: String,
}

impl ReviewRow {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        rating: impl Into<String>,
        comments: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            rating: rating.into(),
            comments: comments.into(),
        }
    }

    /// Field values in [`REVIEW_COLUMNS`] order.
    #[must_use]
    pub fn fields(&self) -> [&str; 3] {
        [&self.name, &self.rating, &self.comments]
    }
}
