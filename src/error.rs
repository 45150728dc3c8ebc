//! Error types for ssh-key-retriever

use thiserror::Error;

/// Main error type for ssh-key-retriever
///
/// `Request` covers transport-level failures (connect, TLS, send); `Body`
/// covers a failure while reading an already-received response. The two are
/// kept apart because they map to different exit codes.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to read response body: {0}")]
    Body(reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
