//! Error types for signal and timing primitives.

use thiserror::Error;

/// Result type for control primitive operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors raised when configuring control primitives.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
