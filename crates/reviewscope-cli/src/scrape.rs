//! `scrape` command: submit URLs, run the scrape, store and show the result.

use reviewscope_core::AppConfig;
use reviewscope_scraper::{CancellationToken, ExportBuffer, ReviewScraper, ScrapeReport};

use crate::shell::{self, DownloadOutcome};

/// Scrape `urls`, publish the table to a fresh export buffer, then preview
/// it and (when `download` is set) write it to `config.output_path`.
///
/// Ctrl-C cancels the scrape between pages; whatever was collected up to
/// that point is still exported.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the table cannot be
/// serialized, or the export file cannot be written. Per-URL and per-page
/// failures are printed and skipped, not propagated.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    urls: &[String],
    download: bool,
) -> anyhow::Result<()> {
    let scraper = ReviewScraper::from_config(config)?;

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received; finishing current page");
                cancel.cancel();
            }
        }
    });

    let buffer = ExportBuffer::new();
    let result = scraper.scrape_into(urls, &cancel, &buffer).await;
    watcher.abort();
    let outcome = result?;

    print_report(&outcome.report);
    println!("Scraped data has been updated!");
    println!();
    println!("{}", shell::render_preview(&buffer, config.preview_rows)?);

    if download {
        match shell::download(&buffer, &config.output_path)? {
            DownloadOutcome::Written { path, rows } => {
                println!("Wrote {rows} review(s) to {}", path.display());
            }
            DownloadOutcome::Unavailable(message) => println!("{message}"),
        }
    }

    Ok(())
}

fn print_report(report: &ScrapeReport) {
    for issue in &report.issues {
        match issue.page {
            Some(page) => println!("  \u{2717} {} (page {page}): {}", issue.url, issue.error),
            None => println!("  \u{2717} {}: {}", issue.url, issue.error),
        }
    }
    if report.skipped_blocks > 0 && report.issues.iter().all(|i| !i.error.is_extraction()) {
        println!(
            "  {} malformed review block(s) skipped",
            report.skipped_blocks
        );
    }
    if report.was_cancelled() {
        println!("Scrape interrupted; exporting the reviews collected so far.");
    }
}
