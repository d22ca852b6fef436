use thiserror::Error;

/// Failure taxonomy for backend data fetches.
///
/// Every variant carries a user-presentable message; fetch failures are
/// converted to cleared table state plus this message, and never escape
/// into a rendering path as a panic or raw error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// No access token is available. Fails fast, no request is sent.
    #[error("Sign-in required")]
    MissingCredential,

    /// The request could not be sent, or no readable response came back.
    #[error("Network or server error: {0}")]
    Transport(String),

    /// The backend answered with a non-success application code.
    #[error("{0}")]
    Application(String),

    /// The query failed client-side validation (e.g. inverted date range).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Fallback banner text for application failures without a backend message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed. Please try again.";

/// Helper for mapping any transport-level error into `AppError::Transport`.
pub fn transport_error<E: ToString>(err: E) -> AppError {
    AppError::Transport(err.to_string())
}
