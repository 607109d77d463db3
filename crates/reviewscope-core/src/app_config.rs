use std::path::PathBuf;

/// Desktop Edge/Chrome identity sent on every page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36 Edg/121.0.0.0";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Number of review pages fetched per input URL. Always at least 1.
    pub max_pages: u32,
    /// Number of input URLs scraped at the same time. Always at least 1.
    pub max_concurrent_urls: usize,
    /// When `true`, every review block skipped for a missing field is
    /// reported back to the caller, not only logged.
    pub report_malformed: bool,
    pub output_path: PathBuf,
    pub preview_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            request_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_pages: 1,
            max_concurrent_urls: 1,
            report_malformed: true,
            output_path: PathBuf::from("reviews.csv"),
            preview_rows: 10,
        }
    }
}
