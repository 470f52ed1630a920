//! bhx-core: stable foundation for the borehole heat exchanger engine.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{BhxError, BhxResult};
pub use numeric::*;
pub use units::*;
