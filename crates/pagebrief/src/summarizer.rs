//! Summarization pipeline
//!
//! validate → fetch page (URL input only) → compose prompt → complete.

use crate::completion::{CompletionClient, CompletionConfig, CompletionProvider};
use crate::error::{SummarizeError, SummarizerBuildError};
use crate::extract::{ContentExtractor, FetchOptions};
use crate::prompt::compose;
use crate::types::{RequestInput, Source, SummarizeRequest};
use std::sync::Arc;
use tracing::debug;

/// Runs one request through extraction, composition and completion
///
/// Holds no per-request state, so one instance is shared by all requests.
#[derive(Clone)]
pub struct Summarizer {
    extractor: ContentExtractor,
    completion: Arc<dyn CompletionProvider>,
}

impl Summarizer {
    pub fn new(extractor: ContentExtractor, completion: Arc<dyn CompletionProvider>) -> Self {
        Self {
            extractor,
            completion,
        }
    }

    /// Build a summarizer backed by the hosted completion API
    pub fn from_config(
        fetch: FetchOptions,
        completion: CompletionConfig,
    ) -> Result<Self, SummarizerBuildError> {
        let extractor = ContentExtractor::new(fetch)?;
        let client = CompletionClient::new(completion)?;
        Ok(Self::new(extractor, Arc::new(client)))
    }

    /// Summarize the page or text named by `request`
    pub async fn summarize(&self, request: SummarizeRequest) -> Result<String, SummarizeError> {
        let input = request.input().ok_or(SummarizeError::MissingInput)?;
        let options = request.options();

        let source = match input {
            RequestInput::Url(url) => Source::Page(self.extractor.extract(url).await?),
            RequestInput::Text(text) => Source::Raw(text.to_string()),
        };

        let messages = compose(&source, &options);
        debug!(
            page = matches!(source, Source::Page(_)),
            length = %options.length,
            style = %options.style,
            "Composed prompt"
        );

        let summary = self.completion.complete(messages).await?;
        Ok(summary)
    }
}
