//! Flipkart review pages.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::{node_text, require, selector, BlockResult, Rating, RawReview, ReviewExtractor};
use crate::site::Site;

static REVIEW_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector("div._27M-vq"));
static REVIEWER_NAME: LazyLock<Selector> = LazyLock::new(|| selector("p._2sc7ZR._2V5EHH"));
static RATING: LazyLock<Selector> = LazyLock::new(|| selector("div._3LWZlK"));
static COMMENT: LazyLock<Selector> = LazyLock::new(|| selector("div.t-ZTKy"));

/// The collapsed-review affordance Flipkart renders inside the comment node.
static READ_MORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*READ\s+MORE\s*").expect("valid regex"));

/// Reads Flipkart review blocks.
///
/// Comments have every `READ MORE` label (and the whitespace around it)
/// removed and are then trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipkartExtractor;

impl ReviewExtractor for FlipkartExtractor {
    fn site(&self) -> Site {
        Site::Flipkart
    }

    fn extract(&self, markup: &str) -> Vec<BlockResult> {
        let document = Html::parse_document(markup);
        document
            .select(&REVIEW_BLOCK)
            .enumerate()
            .map(|(index, block)| -> BlockResult {
                let name =
                    require(block, &REVIEWER_NAME, Site::Flipkart, index, "reviewer name")?;
                let rating = require(block, &RATING, Site::Flipkart, index, "rating")?;
                let comment = require(block, &COMMENT, Site::Flipkart, index, "comment")?;
                Ok(RawReview {
                    name: node_text(name),
                    rating: Rating::Text(node_text(rating)),
                    comment: clean_comment(&node_text(comment)),
                })
            })
            .collect()
    }
}

/// Strips `READ MORE` labels and surrounding whitespace.
fn clean_comment(raw: &str) -> String {
    READ_MORE.replace_all(raw, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_block(name: &str, rating: &str, comment: &str) -> String {
        format!(
            r#"<div class="col _2wzgFH K0kLPL"><div class="_27M-vq"><div class="row"><div class="_3LWZlK _1BLPMq">{rating}</div><p class="_2-N8zT">Terrific</p></div><div class="t-ZTKy"><div><div class="">{comment}</div><span class="_1H-bmy"><span>READ MORE</span></span></div></div><div class="row _3n8db9"><p class="_2sc7ZR _2V5EHH">{name}</p><p class="_2sc7ZR">12 days ago</p></div></div></div>"#
        )
    }

    fn page(blocks: &[String]) -> String {
        format!("<html><body>{}</body></html>", blocks.concat())
    }

    #[test]
    fn extracts_blocks_and_strips_read_more() {
        let html = page(&[
            review_block("Flipkart Customer", "5", "Camera is superb."),
            review_block("Anil Sharma", "3", "Heats up while gaming."),
        ]);

        let records: Vec<RawReview> = FlipkartExtractor
            .extract(&html)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Flipkart Customer");
        assert_eq!(records[0].rating, Rating::Text("5".to_string()));
        assert_eq!(records[0].comment, "Camera is superb.");
        assert_eq!(records[1].name, "Anil Sharma");
        assert_eq!(records[1].comment, "Heats up while gaming.");
    }

    #[test]
    fn clean_comment_removes_trailing_label_with_any_whitespace() {
        assert_eq!(clean_comment("Nice phone READ MORE"), "Nice phone");
        assert_eq!(clean_comment("Nice phone\n\t READ \n MORE \n"), "Nice phone");
        assert_eq!(clean_comment("  Nice phoneREAD MORE"), "Nice phone");
        assert_eq!(clean_comment("Nice phone"), "Nice phone");
    }

    #[test]
    fn clean_comment_removes_every_label() {
        assert_eq!(
            clean_comment("Good READ MORE value READ MORE"),
            "Goodvalue"
        );
    }

    #[test]
    fn clean_comment_is_case_sensitive() {
        assert_eq!(clean_comment("read more about it"), "read more about it");
    }

    #[test]
    fn block_missing_comment_fails_alone() {
        let broken = r#"<div class="_27M-vq"><div class="_3LWZlK">4</div><p class="_2sc7ZR _2V5EHH">Nobody</p></div>"#;
        let html = page(&[broken.to_string(), review_block("Kept", "4", "Solid.")]);

        let results = FlipkartExtractor.extract(&html);

        assert_eq!(results.len(), 2);
        let failure = results[0].as_ref().unwrap_err();
        assert_eq!(failure.site, Site::Flipkart);
        assert_eq!(failure.block, 0);
        assert_eq!(failure.field, "comment");
        assert_eq!(results[1].as_ref().unwrap().name, "Kept");
    }
}
