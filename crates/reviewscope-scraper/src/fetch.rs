//! Page fetcher: one GET per review page with a fixed browser header set.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// A page that could not be fetched.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

impl FetchError {
    /// The page URL the failed request was issued for.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Http { url, .. } | Self::UnexpectedStatus { url, .. } => url,
        }
    }
}

/// HTTP client for review pages.
///
/// Issues exactly one attempt per page. Redirects and connection handling use
/// the `reqwest` defaults; only the overall request timeout is configurable.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a `PageFetcher` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::ClientBuild`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(ScraperError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    ///
    /// The client's own `User-Agent` and timeout are used as-is.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches the raw markup of one page.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`]: network, TLS, timeout or body-decoding failure.
    /// - [`FetchError::UnexpectedStatus`]: any non-2xx status.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let http_err = |source: reqwest::Error| FetchError::Http {
            url: url.to_owned(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await.map_err(http_err)?;
        tracing::debug!(url, bytes = body.len(), "fetched review page");
        Ok(body)
    }
}
