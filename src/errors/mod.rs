//! Centralized error handling for the playlist player core
//!
//! This module unifies error types across all layers of the crate and provides
//! consistent reporting. Most runtime failures in this system are deliberately
//! soft (a failed fetch falls back to playback, a corrupt stored value
//! falls back to a default); the error types here cover the paths that do
//! propagate, such as storage writes and configuration loading.

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;

/// Convenience type alias for Storage Results
pub type StorageResult<T> = Result<T, StorageError>;
