//! Error types for ground response calculations.

use bhx_core::BhxError;
use thiserror::Error;

pub type GroundResult<T> = Result<T, GroundError>;

/// Errors that can occur while evaluating ground thermal response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroundError {
    /// Malformed or out-of-range input.
    #[error("Invalid ground input: {what}")]
    Validation { what: &'static str },

    /// A computed response violated a physical requirement.
    #[error("Non-physical ground response: {what}")]
    NonPhysical { what: &'static str },
}

impl From<GroundError> for BhxError {
    fn from(err: GroundError) -> Self {
        match err {
            GroundError::Validation { what } => BhxError::InvalidArg { what },
            GroundError::NonPhysical { what } => BhxError::Invariant { what },
        }
    }
}
