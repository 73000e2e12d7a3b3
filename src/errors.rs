/*!
 * Error types for the subgrab application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when fingerprinting a video file
#[derive(Error, Debug)]
pub enum FingerprintError {
    /// The file is too small to compute a hash from (two 64 KiB windows are required)
    #[error("file is too small to hash ({size} bytes, minimum is 131072)")]
    TooSmall {
        /// Size of the offending file in bytes
        size: u64,
    },

    /// Error reading the file
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when talking to the subtitle catalog API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API responded with a non-success HTTP status
    #[error("API request failed: {status_code} - {message}")]
    RequestFailed {
        /// HTTP status code
        status_code: u16,
        /// Response body or status text from the API
        message: String,
    },

    /// The API response body could not be decoded
    #[error("failed to parse API response: {0}")]
    ParseError(String),

    /// Error establishing or maintaining a connection
    #[error("connection error: {0}")]
    ConnectionError(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("file error: {0}")]
    File(String),

    /// Error from the catalog API
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Error computing a file fingerprint
    #[error("fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),

    /// Invalid configuration
    #[error("config error: {0}")]
    Config(String),

    /// Any other error
    #[error("unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
