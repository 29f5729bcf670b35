// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names what went wrong and where. [`AppError::kind`] folds the
//! variants into the handful of categories the CLI reacts to: configuration
//! problems stop before any request, generation failures get a retry hint,
//! storage failures are reported because they risk data loss.

use std::fmt;
use thiserror::Error;

/// Error codes reported by the chat-completions API as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamErrorCode {
    /// The API key was rejected
    InvalidApiKey,
    /// The account has no remaining quota
    InsufficientQuota,
    /// Too many requests in a short window
    RateLimited,
    /// The configured model does not exist or is not available to this key
    ModelNotFound,
    /// The prompt plus completion exceeded the model context
    ContextLengthExceeded,
    /// The request was rejected as malformed
    InvalidRequest,
    /// The provider failed internally
    ServerError,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// A code this client doesn't recognize yet
    Unknown(String),
}

impl UpstreamErrorCode {
    /// Parse an error `code` (or `type` when no code is given) into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "invalid_api_key" | "authentication_error" => Self::InvalidApiKey,
            "insufficient_quota" => Self::InsufficientQuota,
            "rate_limit_exceeded" | "rate_limit_error" => Self::RateLimited,
            "model_not_found" => Self::ModelNotFound,
            "context_length_exceeded" => Self::ContextLengthExceeded,
            "invalid_request_error" => Self::InvalidRequest,
            "server_error" | "api_error" => Self::ServerError,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether trying again later has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited | Self::ServerError => true,
            Self::HttpStatus(status) => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Whether the credential itself was refused.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::InvalidApiKey | Self::HttpStatus(401))
    }
}

impl fmt::Display for UpstreamErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidApiKey => write!(f, "invalid_api_key"),
            Self::InsufficientQuota => write!(f, "insufficient_quota"),
            Self::RateLimited => write!(f, "rate_limit_exceeded"),
            Self::ModelNotFound => write!(f, "model_not_found"),
            Self::ContextLengthExceeded => write!(f, "context_length_exceeded"),
            Self::InvalidRequest => write!(f, "invalid_request_error"),
            Self::ServerError => write!(f, "server_error"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Failures of the durable slot behind the page store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read slot '{slot}': {source}")]
    Read {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write slot '{slot}': {source}")]
    Write {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock slot '{slot}': {source}")]
    Lock {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode collection for slot '{slot}': {source}")]
    Encode {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Slot '{slot}' holds malformed data: {source}")]
    Decode {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Slot '{slot}' is unavailable: {reason}")]
    Unavailable { slot: String, reason: String },
}

impl StorageError {
    /// I/O and availability failures may clear up; encoding problems will not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Write { .. } | Self::Lock { .. } | Self::Unavailable { .. }
        )
    }

    pub fn slot(&self) -> &str {
        match self {
            Self::Read { slot, .. }
            | Self::Write { slot, .. }
            | Self::Lock { slot, .. }
            | Self::Encode { slot, .. }
            | Self::Decode { slot, .. }
            | Self::Unavailable { slot, .. } => slot,
        }
    }
}

/// Categories of failure as the user experiences them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required configuration (such as the API key) is missing or invalid
    Configuration,
    /// The content call failed or returned unusable content
    Generation,
    /// The durable slot could not be read or written
    Storage,
    /// Caller input was rejected
    Validation,
    /// Rendering or delivering an export failed
    Output,
    /// A bug or an unexpected condition
    Internal,
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("OpenAI API Error ({code}): {message}")]
    Upstream {
        code: UpstreamErrorCode,
        message: String,
        status: u16,
    },

    #[error("Failed to parse the generated content: {0}")]
    MalformedContent(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("A landing page with ID {0} is already saved")]
    DuplicateRecord(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template file not found at {path}: {source}")]
    TemplateNotFound {
        path: String,
        source: std::io::Error,
    },

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("Could not open {path} in a viewer: {message}")]
    ViewerFailed { path: String, message: String },

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingConfiguration(_) => ErrorKind::Configuration,
            Self::NetworkFailure(_) | Self::Upstream { .. } | Self::MalformedContent(_) => {
                ErrorKind::Generation
            }
            Self::Storage(_) => ErrorKind::Storage,
            Self::DuplicateRecord(_) | Self::ValidationError(_) => ErrorKind::Validation,
            Self::Io(_)
            | Self::TemplateNotFound { .. }
            | Self::TemplateRenderError { .. }
            | Self::ViewerFailed { .. }
            | Self::DeliveryFailed { .. } => ErrorKind::Output,
            Self::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Whether the user can reasonably retry the same action.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkFailure(_) | Self::MalformedContent(_) => true,
            Self::Upstream { code, .. } => code.is_transient(),
            Self::Storage(err) => err.is_transient(),
            _ => false,
        }
    }

    /// What the user can do about a generation failure. `None` for other kinds.
    pub fn next_step(&self) -> Option<&'static str> {
        if self.kind() != ErrorKind::Generation {
            return None;
        }
        let hint = match self {
            Self::Upstream { code, .. } if code.is_authentication() => {
                "Check your API key (--api-key or OPENAI_API_KEY) and try again."
            }
            Self::Upstream {
                code: UpstreamErrorCode::InsufficientQuota,
                ..
            } => "Check the plan and billing of your OpenAI account, then try again.",
            Self::Upstream {
                code: UpstreamErrorCode::ModelNotFound,
                ..
            } => "Pick another model with --model and try again.",
            _ if self.is_retryable() => "Please try again.",
            _ => "Please try again, or adjust the keywords or --model if it keeps failing.",
        };
        Some(hint)
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::InternalError {
            message: "Formatting error".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
