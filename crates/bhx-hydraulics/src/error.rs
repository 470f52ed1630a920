//! Error types for hydraulic calculations.

use bhx_core::BhxError;
use thiserror::Error;

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;

/// Errors that can occur during hydraulic solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydraulicsError {
    /// Malformed circuit or load input.
    #[error("Invalid hydraulic input: {what}")]
    Validation { what: &'static str },

    /// An intermediate value left the physical domain.
    #[error("Non-physical hydraulic value: {what}")]
    NonPhysical { what: &'static str },
}

impl From<HydraulicsError> for BhxError {
    fn from(err: HydraulicsError) -> Self {
        match err {
            HydraulicsError::Validation { what } => BhxError::InvalidArg { what },
            HydraulicsError::NonPhysical { what } => BhxError::Invariant { what },
        }
    }
}
