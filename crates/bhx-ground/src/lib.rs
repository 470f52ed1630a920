//! bhx-ground: ground thermal response and borehole field interaction.
//!
//! Provides:
//! - the single-borehole dimensionless step response (g-function) built
//!   from validated line-source solutions
//! - log-spaced response tables for multi-year temperature traces
//! - field layout generators (rectangle, L, U, line) and the superposed
//!   effective g-function of a multi-borehole field
//!
//! All evaluations are pure; independent time points may be computed in
//! parallel.

pub mod error;
pub mod interaction;
pub mod layout;
pub mod properties;
pub mod response;

// Re-exports
pub use error::{GroundError, GroundResult};
pub use interaction::FieldInteraction;
pub use layout::{FieldLayout, LayoutPattern};
pub use properties::GroundProperties;
pub use response::{ResponseTable, SingleBorehole, expint_e1, temperature_penalty};
