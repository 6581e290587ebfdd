//! PageBrief - web page and text summarization
//!
//! This crate turns a URL or a block of text into a short summary produced
//! by a hosted chat-completion API.
//!
//! ## Pipeline
//!
//! 1. [`ContentExtractor`] fetches the page (URL input only) and
//!    [`parse_page`] reduces it to a title and visible text
//! 2. [`compose`] builds the system and user messages
//! 3. A [`CompletionProvider`] (normally [`CompletionClient`]) generates the
//!    summary
//!
//! [`Summarizer`] runs the pipeline for one [`SummarizeRequest`], and
//! [`router`] exposes it as `POST /summarize`.

pub mod completion;
mod convert;
mod error;
pub mod extract;
pub mod prompt;
pub mod server;
mod summarizer;
mod types;

pub use completion::{
    CompletionClient, CompletionConfig, CompletionProvider, DEFAULT_API_BASE, DEFAULT_MODEL,
};
pub use convert::parse_page;
pub use error::{
    CompletionError, ConfigError, FetchError, SummarizeError, SummarizerBuildError,
    MISSING_INPUT_MESSAGE,
};
pub use extract::{ContentExtractor, FetchOptions};
pub use prompt::compose;
pub use server::{router, serve};
pub use summarizer::Summarizer;
pub use types::{
    ChatMessage, PageContent, PromptMessages, RequestInput, Role, Source, SummarizeRequest,
    SummaryOptions, SummaryResult, NO_CONTENT, NO_TITLE,
};

/// Browser User-Agent sent with page fetches
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";
