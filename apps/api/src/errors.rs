use std::fmt;

use serde::{Serialize, Serializer};

use crate::llm_client::LlmError;

/// Max characters of upstream text echoed back for diagnostics.
pub const DIAGNOSTIC_EXCERPT_CHARS: usize = 500;

/// Failure taxonomy for the generation pipeline.
///
/// None of these ever reach the transport layer as an HTTP error: each one is
/// rendered as a well-formed body with a user-facing explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigurationError,
    NetworkError,
    EmptyResponseError,
    ParseError,
    UnexpectedShapeError,
    InternalError,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::ConfigurationError,
        ErrorKind::NetworkError,
        ErrorKind::EmptyResponseError,
        ErrorKind::ParseError,
        ErrorKind::UnexpectedShapeError,
        ErrorKind::InternalError,
    ];

    /// Wire name, used by both `Display` and `Serialize`.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::ConfigurationError => "ConfigurationError",
            ErrorKind::NetworkError => "NetworkError",
            ErrorKind::EmptyResponseError => "EmptyResponseError",
            ErrorKind::ParseError => "ParseError",
            ErrorKind::UnexpectedShapeError => "UnexpectedShapeError",
            ErrorKind::InternalError => "InternalError",
        }
    }

    /// Message safe to show an end user.
    pub fn explanation(&self) -> &'static str {
        match self {
            ErrorKind::ConfigurationError => {
                "The design service is not configured: no API key is set. Set LLM_API_KEY and restart."
            }
            ErrorKind::NetworkError => {
                "Could not reach the design service. Please try again in a moment."
            }
            ErrorKind::EmptyResponseError => {
                "The design service returned an empty answer. Please try again."
            }
            ErrorKind::ParseError => {
                "The design service replied, but no valid layout could be read from the reply."
            }
            ErrorKind::UnexpectedShapeError => {
                "The design service returned a response in an unexpected format."
            }
            ErrorKind::InternalError => "Something went wrong while generating your design.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A classified failure plus whatever diagnostic text was available.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    pub kind: ErrorKind,
    pub detail: String,
    /// Excerpt of the model's reply text.
    pub raw: Option<String>,
    /// Excerpt of the raw upstream HTTP body.
    pub raw_content: Option<String>,
}

impl Fault {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            raw: None,
            raw_content: None,
        }
    }

    pub fn with_raw(mut self, text: &str) -> Self {
        self.raw = Some(excerpt(text, DIAGNOSTIC_EXCERPT_CHARS));
        self
    }

    pub fn with_raw_content(mut self, body: &str) -> Self {
        self.raw_content = Some(excerpt(body, DIAGNOSTIC_EXCERPT_CHARS));
        self
    }
}

impl From<LlmError> for Fault {
    fn from(err: LlmError) -> Self {
        let detail = err.to_string();
        match err {
            LlmError::MissingApiKey => Fault::new(ErrorKind::ConfigurationError, detail),
            LlmError::Http(_) => Fault::new(ErrorKind::NetworkError, detail),
            LlmError::Api { body, .. } => {
                Fault::new(ErrorKind::NetworkError, detail).with_raw_content(&body)
            }
            LlmError::EmptyChoices => Fault::new(ErrorKind::EmptyResponseError, detail),
            LlmError::UnexpectedShape { body, .. } => {
                Fault::new(ErrorKind::UnexpectedShapeError, detail).with_raw_content(&body)
            }
        }
    }
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
