//! Method selection, temperature limits and solver settings.

use crate::error::{SizingError, Stage};
use bhx_core::units::{Length, TempInterval, Temperature, celsius, kelvin_interval, m, mm};
use std::time::Duration;

/// Which sizing method the orchestrator dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizingMethod {
    /// Iterative Eskilson/Hellström depth search.
    Classical,
    /// VDI 4640 / Koenigsdorff three-timescale closed form.
    Normative,
}

/// Operating envelope of the circulating fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureLimits {
    pub min_fluid: Temperature,
    pub max_fluid: Temperature,
    /// Design temperature spread across the heat pump.
    pub design_delta_t: TempInterval,
}

impl TemperatureLimits {
    pub fn validate(&self) -> Result<(), SizingError> {
        if !(self.min_fluid.value.is_finite() && self.max_fluid.value.is_finite()) {
            return Err(SizingError::Validation {
                stage: Stage::Inputs,
                what: "temperature limits must be finite",
            });
        }
        if self.min_fluid >= self.max_fluid {
            return Err(SizingError::Validation {
                stage: Stage::Inputs,
                what: "minimum fluid temperature must lie below the maximum",
            });
        }
        if self.design_delta_t.value <= 0.0 || !self.design_delta_t.value.is_finite() {
            return Err(SizingError::Validation {
                stage: Stage::Inputs,
                what: "design temperature spread must be positive",
            });
        }
        Ok(())
    }
}

impl Default for TemperatureLimits {
    fn default() -> Self {
        Self {
            min_fluid: celsius(-2.0),
            max_fluid: celsius(35.0),
            design_delta_t: kelvin_interval(3.0),
        }
    }
}

/// Solver and circuit settings with engineering defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationSettings {
    /// Simulation horizon of the classical method.
    pub years: u32,
    /// Convergence tolerance on the binding fluid temperature, in kelvin.
    pub tolerance_k: f64,
    /// Hard cap on sizing iterations.
    pub max_iterations: u32,
    /// Optional wall-clock budget for the iterative solver.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub time_budget: Option<Duration>,
    /// Depth at which the normative method evaluates its g-values.
    pub reference_depth: Length,
    /// Depth search window of the classical method.
    pub min_depth: Length,
    pub max_depth: Length,
    /// Horizontal header run per hydraulic circuit.
    pub header_length: Length,
    /// Lumped minor-loss coefficient per circuit.
    pub minor_loss_k: f64,
    pub pump_efficiency: f64,
    /// Absolute roughness of the circuit piping.
    pub pipe_roughness: Length,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            years: 25,
            tolerance_k: 0.05,
            max_iterations: 100,
            time_budget: None,
            reference_depth: m(100.0),
            min_depth: m(20.0),
            max_depth: m(400.0),
            header_length: m(50.0),
            minor_loss_k: 15.0,
            pump_efficiency: 0.5,
            pipe_roughness: mm(0.0015),
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<(), SizingError> {
        if self.years == 0 {
            return Err(SizingError::Validation {
                stage: Stage::Inputs,
                what: "simulation horizon must be at least one year",
            });
        }
        if self.tolerance_k <= 0.0 || !self.tolerance_k.is_finite() {
            return Err(SizingError::Validation {
                stage: Stage::Inputs,
                what: "convergence tolerance must be positive",
            });
        }
        if self.max_iterations == 0 {
            return Err(SizingError::Validation {
                stage: Stage::Inputs,
                what: "iteration cap must be positive",
            });
        }
        if self.min_depth.value <= 0.0 || self.min_depth >= self.max_depth {
            return Err(SizingError::Validation {
                stage: Stage::Inputs,
                what: "depth search window must be positive and ordered",
            });
        }
        if self.reference_depth.value <= 0.0 {
            return Err(SizingError::Validation {
                stage: Stage::Inputs,
                what: "reference depth must be positive",
            });
        }
        Ok(())
    }
}
