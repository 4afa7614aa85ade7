//! Core error types.

use crate::types::Role;
use thiserror::Error;

/// Result type used across bedrock-fm crates.
pub type Result<T> = std::result::Result<T, FmError>;

/// The conversation rule that a malformed turn sequence violated.
///
/// Rules are checked in declaration order and the first failure wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationRule {
    /// The conversation has no turns at all.
    Empty,
    /// A System turn appears somewhere other than index 0.
    SystemNotFirst { index: usize },
    /// More than one System turn.
    MultipleSystem,
    /// Two consecutive turns share a role.
    ConsecutiveRole { index: usize, role: Role },
    /// The last turn is not a Human turn, so there is nothing to answer.
    MustEndWithHuman,
}

impl std::fmt::Display for ConversationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "conversation must contain at least one turn"),
            Self::SystemNotFirst { index } => {
                write!(f, "system turn must be the first turn (found at {index})")
            }
            Self::MultipleSystem => write!(f, "at most one system turn is allowed"),
            Self::ConsecutiveRole { index, role } => {
                write!(f, "turns {} and {index} are both {role}", index.saturating_sub(1))
            }
            Self::MustEndWithHuman => write!(f, "the last turn must be a human turn"),
        }
    }
}

/// Unified error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FmError {
    /// The model id could not be mapped to a known family.
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// One or more `extra_args` keys are not on the family whitelist.
    #[error("Arguments [{}] are not supported by {family}", arguments.join(","))]
    UnsupportedArgument {
        family: String,
        arguments: Vec<String>,
    },

    /// The family does not implement the requested entry point.
    #[error("{operation} is not supported by {family}")]
    InvocationNotSupported { family: String, operation: String },

    /// Malformed turn sequence.
    #[error("Invalid conversation: {0}")]
    ConversationValidation(ConversationRule),

    /// A required parameter (or exactly-one-of group) was not satisfied.
    #[error("Missing required parameter: {0}")]
    MissingRequiredParameter(String),

    /// The backend cannot process this many inputs in one request.
    #[error("{family} accepts at most {max} input(s) per request, got {size}")]
    UnsupportedBatchSize {
        family: String,
        size: usize,
        max: usize,
    },

    /// A parameter value is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Network-level failure before a response was received.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Non-success response that did not map to a more specific variant.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    /// A response parsed as JSON but did not have the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl FmError {
    pub fn unsupported_argument<I, S>(family: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::UnsupportedArgument {
            family: family.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn not_supported(family: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::InvocationNotSupported {
            family: family.into(),
            operation: operation.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }

    /// Whether the error was detected locally, before any network activity.
    pub const fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedModel(_)
                | Self::UnsupportedArgument { .. }
                | Self::InvocationNotSupported { .. }
                | Self::ConversationValidation(_)
                | Self::MissingRequiredParameter(_)
                | Self::UnsupportedBatchSize { .. }
                | Self::InvalidParameter(_)
        )
    }

    /// Whether a caller-side retry might succeed. This crate never retries on its own.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimitError(_) | Self::HttpError(_) => true,
            Self::ApiError { code, .. } => *code >= 500,
            _ => false,
        }
    }
}
