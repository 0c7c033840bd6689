//! Error handling for cookiebridge

use thiserror::Error;

/// Main error type for cookiebridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cookie source error: {0}")]
    CookieSource(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backend returned HTTP {status}: {body}")]
    BackendStatus { status: u16, body: String },

    #[error("Backend reported an error: {0}")]
    Backend(String),

    #[error("No cookies available")]
    NoCookies,
}

/// Result type alias for cookiebridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
