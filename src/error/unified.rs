//! Error classification and recovery.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    TokenExpired,
    NotFound,
    Request,
    Server,
    Api,
    Data,
    Network,
    Configuration,
    Io,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Exchange the stored refresh token, then repeat the call.
    RefreshToken,
    /// Send the user through the authorization flow again.
    Reauthorize,
    FixRequest,
    TryAgainLater,
    CheckConfiguration,
    ContactSupport,
}
