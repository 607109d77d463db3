//! Snapdeal review pages.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{
    node_text, require, selector, BlockResult, ExtractionFailure, Rating, RawReview,
    ReviewExtractor,
};
use crate::site::Site;

/// Snapdeal renders two summary blocks with the review-block class before
/// the first real review.
const LEADING_SUMMARY_BLOCKS: usize = 2;

static REVIEW_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector("div.user-review"));
static ACTIVE_STAR: LazyLock<Selector> =
    LazyLock::new(|| selector("i.sd-icon.sd-icon-star.active"));
static REVIEWER_NAME: LazyLock<Selector> = LazyLock::new(|| selector("div._reviewUserName"));
static COMMENT: LazyLock<Selector> = LazyLock::new(|| selector("p"));

/// Reads Snapdeal review blocks.
///
/// The first two blocks on every page are skipped. The rating is the number
/// of active star icons, the reviewer name comes from the name node's `title`
/// attribute and the comment from the block's first paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapdealExtractor;

impl ReviewExtractor for SnapdealExtractor {
    fn site(&self) -> Site {
        Site::Snapdeal
    }

    fn extract(&self, markup: &str) -> Vec<BlockResult> {
        let document = Html::parse_document(markup);
        document
            .select(&REVIEW_BLOCK)
            .enumerate()
            .skip(LEADING_SUMMARY_BLOCKS)
            .map(|(index, block)| -> BlockResult {
                let stars = block.select(&ACTIVE_STAR).count();
                let name_node =
                    require(block, &REVIEWER_NAME, Site::Snapdeal, index, "reviewer name")?;
                let name = name_node.value().attr("title").ok_or(ExtractionFailure {
                    site: Site::Snapdeal,
                    block: index,
                    field: "reviewer name title",
                })?;
                let comment = require(block, &COMMENT, Site::Snapdeal, index, "comment")?;
                Ok(RawReview {
                    name: name.to_string(),
                    rating: Rating::Stars(u32::try_from(stars).unwrap_or(u32::MAX)),
                    comment: node_text(comment),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stars(active: usize) -> String {
        let mut icons = "<i class=\"sd-icon sd-icon-star active\"></i>".repeat(active);
        icons.push_str(&"<i class=\"sd-icon sd-icon-star\"></i>".repeat(5 - active));
        icons
    }

    fn review_block(name: &str, active: usize, comment: &str) -> String {
        format!(
            r#"<div class="user-review"><div class="rating">{}</div><div class="_reviewUserName" title="{name}">By {name}</div><div class="head">Title</div><p>{comment}</p><p>Second paragraph</p></div>"#,
            stars(active)
        )
    }

    fn summary_block() -> String {
        r#"<div class="user-review"><div class="rating-summary"><span>4.2</span></div></div>"#
            .to_string()
    }

    fn page(blocks: &[String]) -> String {
        format!("<html><body>{}</body></html>", blocks.concat())
    }

    #[test]
    fn skips_first_two_blocks_and_counts_stars() {
        let html = page(&[
            summary_block(),
            summary_block(),
            review_block("Priya", 4, "Good build quality."),
            review_block("Rahul", 0, "Stopped working."),
            review_block("Kiran", 5, "Loved it."),
        ]);

        let records: Vec<RawReview> = SnapdealExtractor
            .extract(&html)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Priya");
        assert_eq!(records[0].rating, Rating::Stars(4));
        assert_eq!(records[0].comment, "Good build quality.");
        assert_eq!(records[1].rating, Rating::Stars(0));
        assert_eq!(records[2].name, "Kiran");
        assert_eq!(records[2].rating, Rating::Stars(5));
    }

    #[test]
    fn real_reviews_in_the_first_two_slots_are_still_skipped() {
        let html = page(&[
            review_block("Skipped One", 5, "x"),
            review_block("Skipped Two", 5, "y"),
            review_block("Kept", 3, "z"),
        ]);
        let results = SnapdealExtractor.extract(&html);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].as_ref().unwrap().name, "Kept");
    }

    #[test]
    fn fewer_than_three_blocks_yield_nothing() {
        assert!(SnapdealExtractor.extract(&page(&[])).is_empty());
        assert!(SnapdealExtractor
            .extract(&page(&[summary_block(), summary_block()]))
            .is_empty());
    }

    #[test]
    fn name_comes_from_title_attribute_not_text() {
        let html = page(&[
            summary_block(),
            summary_block(),
            review_block("Deepa", 2, "Average."),
        ]);
        let results = SnapdealExtractor.extract(&html);
        assert_eq!(results[0].as_ref().unwrap().name, "Deepa");
    }

    #[test]
    fn block_without_title_attribute_fails_alone() {
        let untitled = r#"<div class="user-review"><div class="_reviewUserName">Anon</div><p>hi</p></div>"#;
        let html = page(&[
            summary_block(),
            summary_block(),
            untitled.to_string(),
            review_block("Kept", 1, "Poor."),
        ]);

        let results = SnapdealExtractor.extract(&html);

        assert_eq!(results.len(), 2);
        let failure = results[0].as_ref().unwrap_err();
        assert_eq!(failure.block, 2);
        assert_eq!(failure.field, "reviewer name title");
        assert_eq!(results[1].as_ref().unwrap().rating, Rating::Stars(1));
    }

    #[test]
    fn block_without_paragraph_fails_alone() {
        let no_comment = r#"<div class="user-review"><div class="_reviewUserName" title="Quiet"></div></div>"#;
        let html = page(&[summary_block(), summary_block(), no_comment.to_string()]);
        let results = SnapdealExtractor.extract(&html);
        assert_eq!(results[0].as_ref().unwrap_err().field, "comment");
    }
}
