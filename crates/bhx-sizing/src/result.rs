//! Assembled sizing result.

use crate::config::SizingMethod;
use crate::loads::DesignMode;
use bhx_core::units::{Area, Length, Temperature};
use bhx_hydraulics::HydraulicSummary;

/// One value per normative horizon (10 y / 730 h / 6 h).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimescaleValues {
    pub base: f64,
    pub periodic: f64,
    pub peak: f64,
}

/// Complete outcome of one sizing run.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingResult {
    pub method: SizingMethod,
    /// Mode that governed the final depth.
    pub dominant_mode: DesignMode,
    pub depth_per_borehole: Length,
    pub borehole_count: u32,
    pub total_drilled_length: Length,
    /// Fluid temperature envelope at the design depth.
    pub min_fluid_temperature: Temperature,
    pub max_fluid_temperature: Temperature,
    /// Borehole thermal resistance, m·K/W.
    pub borehole_resistance: f64,
    /// Ground resistances per horizon, m·K/W.
    pub resistances: TimescaleValues,
    /// Field g-values per horizon.
    pub g_values: TimescaleValues,
    /// Iterations spent by the classical solver; zero for normative runs.
    pub iterations: u32,
    /// Mean fluid temperature over the first operating year, °C.
    /// Empty for normative runs.
    pub monthly_fluid_temperatures: Vec<f64>,
    pub hydraulics: HydraulicSummary,
    pub field_footprint_area: Area,
}

impl SizingResult {
    /// Specific peak extraction rate, W/m of drilled length.
    pub fn specific_extraction(&self, peak_ground_load_w: f64) -> f64 {
        if self.total_drilled_length.value <= 0.0 {
            return 0.0;
        }
        peak_ground_load_w / self.total_drilled_length.value
    }
}
