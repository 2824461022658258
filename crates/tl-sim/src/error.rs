//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered at the simulation boundary.
///
/// The balance itself clamps every quantity and cannot fail; these errors
/// come from rejecting caller input before it reaches the model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid parameter: {0}")]
    Param(#[from] tl_core::TlError),

    #[error("Component error: {message}")]
    Component { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<tl_components::ComponentError> for SimError {
    fn from(e: tl_components::ComponentError) -> Self {
        SimError::Component {
            message: e.to_string(),
        }
    }
}

impl From<tl_controls::ControlError> for SimError {
    fn from(e: tl_controls::ControlError) -> Self {
        SimError::Component {
            message: e.to_string(),
        }
    }
}
