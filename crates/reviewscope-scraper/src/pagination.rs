//! Page-numbered pagination for review listings.
//!
//! Every supported site paginates reviews with a page-number query
//! parameter. The page URL is the input URL followed by the site's
//! [`Site::page_suffix`] and the 1-based page number:
//!
//! ```text
//! https://www.amazon.in/product-reviews/B0CHX1W1XY?th=1&pageNumber=1
//! https://www.flipkart.com/x/product-reviews/itm6?pid=MOB&page=1
//! https://www.snapdeal.com/product/x/638123/reviews?page=1
//! ```

use tokio_util::sync::CancellationToken;

use crate::error::ScraperError;
use crate::extract::{RawReview, ReviewExtractor};
use crate::fetch::PageFetcher;
use crate::report::{MalformedPolicy, ScrapeIssue, ScrapeReport};
use crate::site::Site;

/// One page of one input URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub base_url: String,
    pub site: Site,
    /// 1-based page number.
    pub page: u32,
}

impl PageRequest {
    /// The URL actually fetched for this page.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}{}", self.base_url, self.site.page_suffix(), self.page)
    }
}

/// Builds the requests for pages `1..=max_pages` of `base_url`.
///
/// A `max_pages` of zero is treated as one.
pub fn page_requests(
    base_url: &str,
    site: Site,
    max_pages: u32,
) -> impl Iterator<Item = PageRequest> + '_ {
    (1..=max_pages.max(1)).map(move |page| PageRequest {
        base_url: base_url.to_owned(),
        site,
        page,
    })
}

/// Reviews and issues collected from one input URL.
#[derive(Debug, Default)]
pub struct UrlBatch {
    pub reviews: Vec<RawReview>,
    pub report: ScrapeReport,
}

/// Fetches and extracts pages `1..=max_pages` of `base_url` in page order.
///
/// A page that cannot be fetched is reported and skipped; later pages are
/// still attempted, as are pages after one that contains no review blocks.
/// `cancel` is checked before each page; once it fires the
/// reviews collected so far are returned with a `Cancelled` issue.
pub async fn drive(
    fetcher: &PageFetcher,
    extractor: &dyn ReviewExtractor,
    base_url: &str,
    max_pages: u32,
    policy: MalformedPolicy,
    cancel: &CancellationToken,
) -> UrlBatch {
    let site = extractor.site();
    let mut batch = UrlBatch::default();

    for request in page_requests(base_url, site, max_pages) {
        let page = request.page;
        if cancel.is_cancelled() {
            tracing::info!(url = base_url, page, "scrape cancelled; stopping pagination");
            batch.report.issues.push(ScrapeIssue {
                url: base_url.to_owned(),
                page: Some(page),
                error: ScraperError::Cancelled { page },
            });
            break;
        }

        let page_url = request.url();
        let markup = match fetcher.fetch(&page_url).await {
            Ok(markup) => markup,
            Err(e) => {
                tracing::warn!(url = base_url, %site, page, error = %e, "failed to fetch review page");
                batch.report.issues.push(ScrapeIssue {
                    url: base_url.to_owned(),
                    page: Some(page),
                    error: e.into(),
                });
                continue;
            }
        };
        batch.report.pages_fetched += 1;

        let blocks = extractor.extract(&markup);
        if blocks.is_empty() {
            tracing::debug!(url = base_url, %site, page, "no review blocks on page");
            continue;
        }

        let before = batch.reviews.len();
        for result in blocks {
            match result {
                Ok(review) => batch.reviews.push(review),
                Err(failure) => {
                    batch.report.skipped_blocks += 1;
                    match policy {
                        MalformedPolicy::Report => {
                            tracing::warn!(url = base_url, page, error = %failure, "skipping malformed review block");
                            batch.report.issues.push(ScrapeIssue {
                                url: base_url.to_owned(),
                                page: Some(page),
                                error: failure.into(),
                            });
                        }
                        MalformedPolicy::Skip => {
                            tracing::debug!(url = base_url, page, error = %failure, "skipping malformed review block");
                        }
                    }
                }
            }
        }

        tracing::debug!(
            url = base_url,
            %site,
            page,
            count = batch.reviews.len() - before,
            "extracted reviews from page"
        );
    }

    batch
}
