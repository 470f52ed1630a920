//! Required flow, velocity and Reynolds regime.

use crate::error::{HydraulicsError, HydraulicsResult};
use bhx_core::units::{Power, TempInterval, VolumeRate, m3ps};
use bhx_fluids::FluidProperties;

/// Laminar/turbulent thresholds for pipe flow.
pub const RE_LAMINAR_LIMIT: f64 = 2_300.0;
pub const RE_TURBULENT_LIMIT: f64 = 4_000.0;

/// Flow regime classification by Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowRegime {
    pub fn classify(reynolds: f64) -> Self {
        if reynolds < RE_LAMINAR_LIMIT {
            FlowRegime::Laminar
        } else if reynolds > RE_TURBULENT_LIMIT {
            FlowRegime::Turbulent
        } else {
            FlowRegime::Transitional
        }
    }
}

/// Total volumetric flow needed to move `load` across the heat pump at the
/// design temperature spread: V̇ = Q / (ρ·c_p·ΔT).
pub fn required_flow(
    load: Power,
    fluid: &FluidProperties,
    design_delta_t: TempInterval,
) -> HydraulicsResult<VolumeRate> {
    if !load.value.is_finite() || load.value <= 0.0 {
        return Err(HydraulicsError::Validation {
            what: "design load must be positive",
        });
    }
    if !design_delta_t.value.is_finite() || design_delta_t.value <= 0.0 {
        return Err(HydraulicsError::Validation {
            what: "design temperature spread must be positive",
        });
    }

    let mass_flow = load.value / (fluid.specific_heat.value * design_delta_t.value);
    let volume_flow = mass_flow / fluid.density.value;
    if !volume_flow.is_finite() || volume_flow <= 0.0 {
        return Err(HydraulicsError::NonPhysical {
            what: "required volumetric flow",
        });
    }
    Ok(m3ps(volume_flow))
}

/// Reynolds number for pipe flow: ρ·v·d / μ.
pub fn reynolds_number(fluid: &FluidProperties, velocity: f64, inner_diameter: f64) -> f64 {
    fluid.density.value * velocity * inner_diameter / fluid.dynamic_viscosity.value
}
