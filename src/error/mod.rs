//! Error types for the Asana client.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

use crate::auth::AuthError;
use crate::validator::WireRecord;

/// Primary error type for all client operations.
#[derive(Error, Debug)]
pub enum AsanaError {
    /// No token is held, or the service rejected it (401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The held token is inside its expiry margin; call `refresh_token`.
    #[error("Access token expired")]
    TokenExpired,

    #[error("Resource not found")]
    NotFound,

    /// 422 response; carries the decoded field-level errors.
    #[error("Validation failed: {0}")]
    Validation(serde_json::Value),

    /// 400 response; carries the raw body.
    #[error("Failed action: {0}")]
    FailedAction(String),

    /// Any other non-success status; carries the status code.
    #[error("Unexpected response status {0}")]
    Generic(String),

    /// A wire record is missing a required key or holds a mistyped value.
    #[error("Invalid data: {record}")]
    InvalidData { record: serde_json::Value },

    /// An id that cannot stand as a single path segment.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Authorization provider error: {0}")]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AsanaError {
    /// Structural validation failure for the given record.
    pub fn invalid_data(record: &WireRecord) -> Self {
        Self::InvalidData {
            record: serde_json::Value::Object(record.clone()),
        }
    }

    /// Map a non-success HTTP status to its error kind.
    ///
    /// `decoded` is the JSON-decoded body (or the raw body as a string when
    /// it did not decode), `raw` the untouched body text.
    pub fn from_status(status: u16, decoded: serde_json::Value, raw: &str) -> Self {
        match status {
            422 => Self::Validation(decoded),
            404 => Self::NotFound,
            401 | 403 => Self::Unauthorized(format!("service rejected the token ({status})")),
            400 => Self::FailedAction(raw.to_string()),
            _ => Self::Generic(status.to_string()),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthorized(_) => ErrorCategory::Authentication,
            Self::TokenExpired => ErrorCategory::TokenExpired,
            Self::NotFound => ErrorCategory::NotFound,
            Self::Validation(_) | Self::FailedAction(_) | Self::InvalidIdentifier(_) => {
                ErrorCategory::Request
            }
            Self::Generic(status) => match status.parse::<u16>() {
                Ok(500..=599) => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::InvalidData { .. } | Self::Serialization(_) => ErrorCategory::Data,
            Self::Auth(_) => ErrorCategory::Authentication,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Network(_) => ErrorCategory::Network,
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::TokenExpired => RecoverySuggestion::RefreshToken,
            ErrorCategory::Authentication => RecoverySuggestion::Reauthorize,
            ErrorCategory::Request | ErrorCategory::NotFound => RecoverySuggestion::FixRequest,
            ErrorCategory::Network | ErrorCategory::Server => RecoverySuggestion::TryAgainLater,
            ErrorCategory::Configuration | ErrorCategory::Io => {
                RecoverySuggestion::CheckConfiguration
            }
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AsanaError>;
