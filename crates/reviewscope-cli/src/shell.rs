//! Preview and download actions over the export buffer.
//!
//! Each action handles "nothing scraped yet" with a clear message instead of
//! failing, and tells it apart from a scrape that found zero reviews.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use reviewscope_core::{ReviewRow, REVIEW_COLUMNS};
use reviewscope_scraper::{parse_csv, ExportBuffer, ExportView};

pub(crate) const NO_DATA_MESSAGE: &str = "No data available. Please scrape some data first.";
pub(crate) const EMPTY_RESULT_MESSAGE: &str = "Scrape completed but no reviews were found.";
pub(crate) const NO_DOWNLOAD_MESSAGE: &str = "No data available to download.";

const NAME_WIDTH: usize = 24;
const RATING_WIDTH: usize = 20;
const COMMENT_WIDTH: usize = 60;

/// Result of a download request.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum DownloadOutcome {
    Written { path: PathBuf, rows: usize },
    Unavailable(&'static str),
}

/// Renders the first `rows` rows of the current export.
pub(crate) fn render_preview(buffer: &ExportBuffer, rows: usize) -> anyhow::Result<String> {
    match buffer.view() {
        ExportView::NotScraped => Ok(NO_DATA_MESSAGE.to_string()),
        ExportView::Empty(_) => Ok(EMPTY_RESULT_MESSAGE.to_string()),
        ExportView::Ready(snapshot) => {
            let preview = snapshot.preview(rows)?;
            Ok(render_rows(&preview, snapshot.row_count()))
        }
    }
}

/// Writes the current export to `path`.
///
/// A zero-row export is still written (header only) so downstream tools see
/// a valid, empty table.
pub(crate) fn download(buffer: &ExportBuffer, path: &Path) -> anyhow::Result<DownloadOutcome> {
    let snapshot = match buffer.view() {
        ExportView::NotScraped => return Ok(DownloadOutcome::Unavailable(NO_DOWNLOAD_MESSAGE)),
        ExportView::Empty(snapshot) | ExportView::Ready(snapshot) => snapshot,
    };

    std::fs::write(path, snapshot.csv())
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = snapshot.row_count(), "export written");

    Ok(DownloadOutcome::Written {
        path: path.to_path_buf(),
        rows: snapshot.row_count(),
    })
}

/// Renders the first `rows` rows of a CSV export on disk.
pub(crate) fn preview_file(path: &Path, rows: usize) -> anyhow::Result<String> {
    if !path.exists() {
        return Ok(NO_DATA_MESSAGE.to_string());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read export {}", path.display()))?;
    let mut parsed = parse_csv(&text)
        .with_context(|| format!("{} is not a review export", path.display()))?;
    if parsed.is_empty() {
        return Ok(EMPTY_RESULT_MESSAGE.to_string());
    }
    let total = parsed.len();
    parsed.truncate(rows);
    Ok(render_rows(&parsed, total))
}

/// Fixed-width text table of `rows`, noting how many rows were left out.
pub(crate) fn render_rows(rows: &[ReviewRow], total: usize) -> String {
    let mut out = String::new();
    let [name, rating, comments] = REVIEW_COLUMNS;
    let _ = writeln!(
        out,
        "{name:<NAME_WIDTH$}  {rating:<RATING_WIDTH$}  {comments}"
    );
    let _ = writeln!(
        out,
        "{}  {}  {}",
        "-".repeat(NAME_WIDTH),
        "-".repeat(RATING_WIDTH),
        "-".repeat(COMMENT_WIDTH)
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<NAME_WIDTH$}  {:<RATING_WIDTH$}  {}",
            clip(&row.name, NAME_WIDTH),
            clip(&row.rating, RATING_WIDTH),
            clip(&row.comments, COMMENT_WIDTH),
        );
    }
    if total > rows.len() {
        let _ = writeln!(out, "... {} more row(s)", total - rows.len());
    }
    out.trim_end().to_string()
}

/// Collapses whitespace to single spaces and cuts to `width` characters.
fn clip(text: &str, width: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
    cut.push('\u{2026}');
    cut
}
