//! Error types shared across the crate.

use thiserror::Error;

/// Errors produced by the memory client, tools, and model wrapper.
#[derive(Error, Debug)]
pub enum EngramError {
    /// Malformed input rejected before any network call is made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level failure talking to the memory API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the memory API.
    #[error("memory API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failure from a wrapped chat model. Never produced by the wrapper
    /// itself — it passes model errors through unchanged.
    #[error("model error: {0}")]
    Model(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngramError>;
