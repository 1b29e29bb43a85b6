use thiserror::Error;

/// Errors raised by an OAuth provider.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Required options not defined: {}", .0.join(", "))]
    MissingOptions(Vec<&'static str>),
    #[error("No refresh token available")]
    NoRefreshToken,
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
