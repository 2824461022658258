//! Error types for component operations.

use thiserror::Error;
use tl_controls::ControlError;
use tl_core::TlError;

/// Errors raised when building or commanding a component.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Control primitive error: {message}")]
    Control { message: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ControlError> for ComponentError {
    fn from(e: ControlError) -> Self {
        ComponentError::Control {
            message: e.to_string(),
        }
    }
}

impl From<ComponentError> for TlError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => TlError::InvalidArg { what },
            ComponentError::InvalidArg { what } => TlError::InvalidArg { what },
            ComponentError::Control { message: _ } => TlError::InvalidArg {
                what: "control primitive error",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::NonPhysical {
            what: "tank capacity",
        };
        assert!(err.to_string().contains("tank capacity"));
    }

    #[test]
    fn error_conversion() {
        let comp_err = ComponentError::InvalidArg { what: "test" };
        let tl_err: TlError = comp_err.into();
        assert!(matches!(tl_err, TlError::InvalidArg { .. }));
    }

    #[test]
    fn control_error_wraps_message() {
        let err: ComponentError = ControlError::InvalidArg { what: "hold" }.into();
        assert!(err.to_string().contains("hold"));
    }
}
