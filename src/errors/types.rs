//! Error type definitions for the playlist player core
//!
//! Provides a small hierarchical error system: a top-level `AppError` with
//! focused sub-enums for source fetching and persisted state.

use thiserror::Error;

/// Top-level application error type
///
/// This enum represents all possible errors produced by the crate. It uses
/// `thiserror` for automatic trait implementations and proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// Source fetching errors (playlists, descriptors, stream probes)
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Persisted key-value store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Playback surface errors
    #[error("Playback error: {message}")]
    Playback { message: String },
}

/// Source fetching specific errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport-level failures (connect, DNS, timeout)
    #[error("Fetch failed: {url} - {message}")]
    Fetch { url: String, message: String },

    /// Non-success HTTP responses
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Body decoding failures
    #[error("Decode error: {message}")]
    Decode { message: String },
}

/// Persisted key-value store specific errors
///
/// Only write-side failures surface as errors; reads degrade to defaults.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem failures
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value serialization failures
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience constructors for common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a playback error
    pub fn playback<S: Into<String>>(message: S) -> Self {
        Self::Playback {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a transport-level fetch error
    pub fn fetch<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }
}
