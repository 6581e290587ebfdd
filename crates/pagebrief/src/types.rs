//! Core types for PageBrief

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Title used when the page has no title element
pub const NO_TITLE: &str = "No title found";

/// Body used when the page has no visible body text
pub const NO_CONTENT: &str = "No content available.";

/// Default summary length
pub const DEFAULT_LENGTH: &str = "3";

/// Default summary style
pub const DEFAULT_STYLE: &str = "single_paragraph";

/// Title and cleaned text of a fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub title: String,
    pub body: String,
}

/// What is being summarized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A fetched web page
    Page(PageContent),
    /// Caller-supplied text
    Raw(String),
}

/// Formatting options rendered verbatim into the prompt
///
/// Values are not validated: `length` may be a number, a word, or anything
/// else the caller sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    pub length: String,
    pub style: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH.to_string(),
            style: DEFAULT_STYLE.to_string(),
        }
    }
}

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A system message followed by a user message
///
/// Serializes as a two-element JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessages([ChatMessage; 2]);

impl PromptMessages {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self([ChatMessage::system(system), ChatMessage::user(user)])
    }

    pub fn system(&self) -> &ChatMessage {
        &self.0[0]
    }

    pub fn user(&self) -> &ChatMessage {
        &self.0[1]
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.0
    }
}

/// Request body accepted by `POST /summarize`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    /// Page to fetch and summarize (takes precedence over `text`)
    #[serde(
        default,
        deserialize_with = "verbatim_input",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,

    /// Raw text to summarize
    #[serde(
        default,
        deserialize_with = "verbatim_input",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,

    /// Summary length, any JSON value
    #[serde(
        default,
        deserialize_with = "verbatim",
        skip_serializing_if = "Option::is_none"
    )]
    pub length: Option<String>,

    /// Summary style, any JSON value
    #[serde(
        default,
        alias = "style",
        deserialize_with = "verbatim",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary_style: Option<String>,
}

/// Validated input of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestInput<'a> {
    Url(&'a str),
    Text(&'a str),
}

impl SummarizeRequest {
    /// Create a request for a page
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Create a request for raw text
    pub fn for_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Set the summary length
    pub fn with_length(mut self, length: impl ToString) -> Self {
        self.length = Some(length.to_string());
        self
    }

    /// Set the summary style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.summary_style = Some(style.into());
        self
    }

    /// The input to summarize, or `None` when both fields are empty
    ///
    /// A non-empty `url` wins over `text`.
    pub fn input(&self) -> Option<RequestInput<'_>> {
        non_empty(&self.url)
            .map(RequestInput::Url)
            .or_else(|| non_empty(&self.text).map(RequestInput::Text))
    }

    /// Effective formatting options with defaults applied
    pub fn options(&self) -> SummaryOptions {
        let defaults = SummaryOptions::default();
        SummaryOptions {
            length: self.length.clone().unwrap_or(defaults.length),
            style: self.summary_style.clone().unwrap_or(defaults.style),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Render any JSON value as prompt text; strings lose their quotes, null is absent
fn verbatim<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(render))
}

/// Like [`verbatim`], but `false`, `0` and empty strings, arrays or objects
/// count as no input at all
fn verbatim_input<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .filter(|value| !is_blank(value))
        .and_then(render))
}

fn render(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Response body of `POST /summarize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryResult {
    Summary { summary: String },
    Error { error: String },
}

impl SummaryResult {
    pub fn summary(summary: impl Into<String>) -> Self {
        SummaryResult::Summary {
            summary: summary.into(),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        SummaryResult::Error {
            error: error.into(),
        }
    }
}
