//! Error types for PageBrief

use thiserror::Error;

/// Message returned when a request carries neither a URL nor text
pub const MISSING_INPUT_MESSAGE: &str = "Either URL or text is required!";

/// Errors that can occur while fetching and cleaning a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed or is not http(s)
    #[error("Invalid URL '{0}': must be an absolute http:// or https:// URL")]
    InvalidUrl(String),

    /// Configured User-Agent is not a valid header value
    #[error("Invalid User-Agent {0:?}: not a valid HTTP header value")]
    InvalidUserAgent(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client: {0}")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request exceeded the configured fetch timeout
    #[error("Request timed out fetching {0}")]
    Timeout(String),

    /// Failed to connect to server
    #[error("Failed to connect to {url}: {source}")]
    ConnectError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Response body could not be read or decoded
    #[error("Failed to read response body: {0}")]
    BodyError(String),
}

impl FetchError {
    /// Create an error from a reqwest error raised while fetching `url`
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(url.to_string())
        } else if err.is_connect() {
            FetchError::ConnectError {
                url: url.to_string(),
                source: err,
            }
        } else {
            FetchError::RequestError(err.to_string())
        }
    }
}

/// Errors returned by the chat-completion service
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Failed to build HTTP client
    #[error("Failed to create completion client: {0}")]
    ClientBuildError(#[source] reqwest::Error),

    /// Transport-level failure talking to the API
    #[error("Completion request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("Completion API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// API answered 2xx with a body we could not decode
    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),

    /// API answered without any generated message
    #[error("Completion response contained no message content")]
    EmptyResponse,
}

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY not found in environment variables.")]
    MissingApiKey,
}

/// Errors produced by the summarization pipeline
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Neither `url` nor `text` was supplied
    #[error("{}", MISSING_INPUT_MESSAGE)]
    MissingInput,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl SummarizeError {
    /// HTTP status code for this error
    ///
    /// Fetch and completion failures are not distinguished for the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            SummarizeError::MissingInput => 400,
            SummarizeError::Fetch(_) | SummarizeError::Completion(_) => 500,
        }
    }
}

/// Failure constructing a summarizer at startup
#[derive(Debug, Error)]
pub enum SummarizerBuildError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}
