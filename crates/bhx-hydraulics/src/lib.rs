//! bhx-hydraulics: circuit flow, pressure drop and pump power.
//!
//! Computes the hydraulic operating point of a borehole field: required
//! volumetric flow from the design thermal load, per-circuit distribution,
//! Reynolds regime, friction factor (Colebrook-White), Darcy-Weisbach
//! distributed and minor losses, and the resulting pump shaft power.

pub mod error;
pub mod flow;
pub mod friction;
pub mod solver;

// Re-exports
pub use error::{HydraulicsError, HydraulicsResult};
pub use flow::{FlowRegime, required_flow, reynolds_number};
pub use friction::friction_factor;
pub use solver::{CircuitSpec, HydraulicSummary, solve};
