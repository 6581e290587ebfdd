//! Page fetching
//!
//! Downloads a page with a browser-like User-Agent and hands the markup to
//! [`parse_page`](crate::convert::parse_page).

use crate::convert::{decode_html, parse_page};
use crate::error::FetchError;
use crate::types::PageContent;
use crate::DEFAULT_USER_AGENT;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Fetch options set at startup
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Total request timeout; `None` waits as long as the origin does
    pub timeout: Option<Duration>,
}

/// Fetches pages and extracts their title and visible text
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    client: reqwest::Client,
}

impl ContentExtractor {
    /// Build an extractor with its own pooled HTTP client
    ///
    /// Fails with [`FetchError::InvalidUserAgent`] when the custom User-Agent
    /// cannot be sent as a header.
    pub fn new(options: FetchOptions) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let user_agent = HeaderValue::from_str(user_agent)
            .map_err(|_| FetchError::InvalidUserAgent(user_agent.to_string()))?;
        headers.insert(USER_AGENT, user_agent);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::ClientBuildError)?;

        Ok(Self { client })
    }

    /// GET `url` and extract its [`PageContent`]
    ///
    /// Non-success statuses are not errors: whatever page the origin
    /// returned is extracted.
    pub async fn extract(&self, url: &str) -> Result<PageContent, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        debug!(url = %parsed, "Fetching page");

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "Page returned non-success status");
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::BodyError(e.to_string())
            }
        })?;

        let page = parse_page(&decode_html(&bytes, content_type.as_deref()));
        debug!(
            url,
            title = %page.title,
            body_chars = page.body.len(),
            "Extracted page content"
        );

        Ok(page)
    }
}
