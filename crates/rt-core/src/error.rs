//! Core error type.
//!
//! Sub-crates define their own error enums (`NetworkError`, `PlannerError`)
//! and wrap `RtError` where configuration problems can surface.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RtError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `rt-core`.
pub type RtResult<T> = Result<T, RtError>;
