//! Orchestration services
//!
//! The loader ties together classification, state mutation, fetching, and
//! playback dispatch for a user-initiated load action.

pub mod loader;

pub use loader::{LoadOutcome, LoadReport, Loader, Notice};
