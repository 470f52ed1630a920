//! Sizing error taxonomy.
//!
//! Three caller-visible classes: validation, convergence and physical
//! constraint. Every error names the sub-stage that failed and, for
//! physical constraints, a machine-readable adjustment direction. A
//! failed run never returns a partially computed depth.

use bhx_borehole::BoreholeError;
use bhx_fluids::FluidError;
use bhx_ground::GroundError;
use bhx_hydraulics::HydraulicsError;
use std::fmt;
use thiserror::Error;

pub type SizingResultExt<T> = Result<T, SizingError>;

/// Pipeline stage that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Inputs,
    Fluid,
    Ground,
    Borehole,
    FieldInteraction,
    IterativeSolver,
    NormativeSolver,
    Hydraulics,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Inputs => "input validation",
            Stage::Fluid => "fluid properties",
            Stage::Ground => "ground response",
            Stage::Borehole => "borehole resistance",
            Stage::FieldInteraction => "field interaction",
            Stage::IterativeSolver => "iterative sizing",
            Stage::NormativeSolver => "normative sizing",
            Stage::Hydraulics => "hydraulics",
        };
        f.write_str(name)
    }
}

/// Suggested direction to make an infeasible design feasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    IncreaseDepthLimit,
    AddBoreholes,
    IncreaseAntifreeze,
    ReduceLoad,
    WidenTemperatureLimits,
    ReviseGeometry,
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hint = match self {
            Adjustment::IncreaseDepthLimit => "allow deeper boreholes",
            Adjustment::AddBoreholes => "add boreholes to the field",
            Adjustment::IncreaseAntifreeze => "raise the antifreeze fraction",
            Adjustment::ReduceLoad => "reduce the connected load",
            Adjustment::WidenTemperatureLimits => "widen the fluid temperature limits",
            Adjustment::ReviseGeometry => "revise the borehole geometry",
        };
        f.write_str(hint)
    }
}

/// Caller-visible sizing failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("{stage}: invalid input: {what}")]
    Validation { stage: Stage, what: &'static str },

    #[error("{stage}: no convergence after {iterations} iterations: {what}")]
    Convergence {
        stage: Stage,
        iterations: u32,
        what: &'static str,
    },

    #[error("{stage}: physical constraint violated: {what}; suggestion: {adjustment}")]
    PhysicalConstraint {
        stage: Stage,
        what: &'static str,
        adjustment: Adjustment,
    },
}

impl From<FluidError> for SizingError {
    fn from(err: FluidError) -> Self {
        let what = match err {
            FluidError::OutOfRange { what }
            | FluidError::InvalidArg { what }
            | FluidError::NonPhysical { what } => what,
        };
        SizingError::Validation {
            stage: Stage::Fluid,
            what,
        }
    }
}

impl From<GroundError> for SizingError {
    fn from(err: GroundError) -> Self {
        match err {
            GroundError::Validation { what } => SizingError::Validation {
                stage: Stage::Ground,
                what,
            },
            GroundError::NonPhysical { what } => SizingError::PhysicalConstraint {
                stage: Stage::Ground,
                what,
                adjustment: Adjustment::ReviseGeometry,
            },
        }
    }
}

impl From<BoreholeError> for SizingError {
    fn from(err: BoreholeError) -> Self {
        match err {
            BoreholeError::Geometry { what } => SizingError::Validation {
                stage: Stage::Borehole,
                what,
            },
            BoreholeError::BelowPhysicalBound { .. } => SizingError::PhysicalConstraint {
                stage: Stage::Borehole,
                what: "borehole resistance at or below its conductive bound",
                adjustment: Adjustment::ReviseGeometry,
            },
            BoreholeError::NonPhysical { what } => SizingError::PhysicalConstraint {
                stage: Stage::Borehole,
                what,
                adjustment: Adjustment::ReviseGeometry,
            },
        }
    }
}

impl From<HydraulicsError> for SizingError {
    fn from(err: HydraulicsError) -> Self {
        let what = match err {
            HydraulicsError::Validation { what } | HydraulicsError::NonPhysical { what } => what,
        };
        SizingError::Validation {
            stage: Stage::Hydraulics,
            what,
        }
    }
}
