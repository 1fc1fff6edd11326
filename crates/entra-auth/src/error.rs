//! Error types for the authorization-code flow

/// Errors from authorization-code flow operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("authorization code must not be empty")]
    EmptyCode,
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;
