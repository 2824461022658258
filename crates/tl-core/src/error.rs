//! Core error type.

use thiserror::Error;

pub type TlResult<T> = Result<T, TlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value for {what} must be strictly positive, got {value}")]
    NotPositive { what: &'static str, value: f64 },

    #[error("Value for {what} out of range [{min}, {max}]: {value}")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
