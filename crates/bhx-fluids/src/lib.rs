//! bhx-fluids: heat-carrier fluid property model.
//!
//! Derives density, viscosity, specific heat, thermal conductivity and
//! freezing point of water/glycol brines from the antifreeze volume
//! fraction by interpolation over concentration-keyed reference rows.
//!
//! All functions are pure; properties are evaluated once per sizing call.

pub mod antifreeze;
pub mod error;

// Re-exports
pub use antifreeze::{AntifreezeKind, FluidProperties, FluidSpec, MAX_VOLUME_FRACTION};
pub use error::{FluidError, FluidResult};
