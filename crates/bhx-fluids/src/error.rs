//! Fluid property errors.

use bhx_core::BhxError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Value out of valid range (e.g. antifreeze fraction above 40 vol%).
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Non-physical values (negative density, viscosity, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<FluidError> for BhxError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::OutOfRange { what } => BhxError::InvalidArg { what },
            FluidError::NonPhysical { what } => BhxError::Invariant { what },
            FluidError::InvalidArg { what } => BhxError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::OutOfRange {
            what: "antifreeze volume fraction",
        };
        assert!(err.to_string().contains("antifreeze"));
    }

    #[test]
    fn error_conversion() {
        let err = FluidError::OutOfRange { what: "test" };
        let core: BhxError = err.into();
        assert!(matches!(core, BhxError::InvalidArg { .. }));
    }
}
