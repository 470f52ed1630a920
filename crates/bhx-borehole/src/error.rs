//! Error types for borehole resistance calculations.

use bhx_core::BhxError;
use thiserror::Error;

pub type BoreholeResult<T> = Result<T, BoreholeError>;

/// Errors that can occur while computing borehole thermal resistance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoreholeError {
    /// Geometry that cannot be built (pipes overlap, exceed the bore, ...).
    #[error("Invalid borehole geometry: {what}")]
    Geometry { what: &'static str },

    /// Computed resistance at or below the conductive lower bound,
    /// signalling inconsistent geometry or material data.
    #[error("Borehole resistance {computed:.4} m·K/W at or below physical bound {bound:.4} m·K/W")]
    BelowPhysicalBound { computed: f64, bound: f64 },

    /// Intermediate value left the physical domain.
    #[error("Non-physical value in resistance calculation: {what}")]
    NonPhysical { what: &'static str },
}

impl From<BoreholeError> for BhxError {
    fn from(err: BoreholeError) -> Self {
        match err {
            BoreholeError::Geometry { what } => BhxError::InvalidArg { what },
            BoreholeError::BelowPhysicalBound { .. } => BhxError::Invariant {
                what: "borehole resistance below physical bound",
            },
            BoreholeError::NonPhysical { what } => BhxError::Invariant { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_error_reports_both_values() {
        let err = BoreholeError::BelowPhysicalBound {
            computed: 0.01,
            bound: 0.05,
        };
        let msg = err.to_string();
        assert!(msg.contains("0.0100"));
        assert!(msg.contains("0.0500"));
    }
}
