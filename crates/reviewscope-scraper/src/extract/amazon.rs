//! Amazon review pages.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{node_text, require, selector, BlockResult, Rating, RawReview, ReviewExtractor};
use crate::site::Site;

static REVIEW_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| selector("div.a-section.review.aok-relative"));
static REVIEWER_NAME: LazyLock<Selector> = LazyLock::new(|| selector("span.a-profile-name"));
static STAR_RATING: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"i[data-hook="review-star-rating"]"#));
static REVIEW_BODY: LazyLock<Selector> =
    LazyLock::new(|| selector("div.a-row.a-spacing-small.review-data"));

/// Reads Amazon review blocks.
///
/// The star rating is kept as the page shows it (`"4.0 out of 5 stars"`) and
/// the review body is taken verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmazonExtractor;

impl ReviewExtractor for AmazonExtractor {
    fn site(&self) -> Site {
        Site::Amazon
    }

    fn extract(&self, markup: &str) -> Vec<BlockResult> {
        let document = Html::parse_document(markup);
        document
            .select(&REVIEW_BLOCK)
            .enumerate()
            .map(|(index, block)| -> BlockResult {
                let name = require(block, &REVIEWER_NAME, Site::Amazon, index, "reviewer name")?;
                let rating = require(block, &STAR_RATING, Site::Amazon, index, "star rating")?;
                let body = require(block, &REVIEW_BODY, Site::Amazon, index, "review body")?;
                Ok(RawReview {
                    name: node_text(name),
                    rating: Rating::Text(node_text(rating)),
                    comment: node_text(body),
                })
            })
            .collect()
    }
}
