//! bhx-sizing: borehole field depth sizing.
//!
//! Ties the ground response, borehole resistance, fluid and hydraulic
//! models together behind one entry point, [`size`]. Two sizing methods
//! are available:
//!
//! - [`SizingMethod::Classical`]: iterative depth search against the
//!   fluid temperature envelope (Eskilson/Hellström style superposition)
//! - [`SizingMethod::Normative`]: VDI 4640 / Koenigsdorff closed form
//!   over three fixed timescales, with heating/cooling dominance selection
//!
//! The engine is pure: no I/O, no shared state, deterministic for equal
//! inputs.

pub mod config;
pub mod error;
pub mod iterative;
pub mod loads;
pub mod normative;
pub mod orchestrator;
pub mod result;

// Re-exports
pub use config::{SimulationSettings, SizingMethod, TemperatureLimits};
pub use error::{Adjustment, SizingError, SizingResultExt, Stage};
pub use iterative::{IterativeOutcome, SolverState};
pub use loads::{DesignMode, GroundLoads, LoadProfile, TimeScale};
pub use normative::NormativeOutcome;
pub use orchestrator::size;
pub use result::{SizingResult, TimescaleValues};
