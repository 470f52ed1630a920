//! Thermal load profile and its ground-side decomposition.

use crate::error::{SizingError, Stage};
use bhx_core::units::constants::{HOURS_PER_MONTH, HOURS_PER_YEAR, SECONDS_PER_HOUR};
use bhx_core::units::{Energy, Power, Time, hours, kw, kwh};

/// Typical central-European heating distribution over the year.
pub const DEFAULT_HEATING_FACTORS: [f64; 12] = [
    0.155, 0.148, 0.125, 0.099, 0.064, 0.0, 0.0, 0.0, 0.061, 0.087, 0.117, 0.144,
];

/// Office-style cooling distribution, summer-peaked.
pub const DEFAULT_COOLING_FACTORS: [f64; 12] = [
    0.0, 0.0, 0.0, 0.05, 0.15, 0.25, 0.30, 0.25, 0.0, 0.0, 0.0, 0.0,
];

/// Operating mode governing a design case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DesignMode {
    Heating,
    Cooling,
}

/// The three normative evaluation horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeScale {
    /// Ten operating years.
    Base,
    /// One design month (730 h).
    Periodic,
    /// Six-hour peak block.
    Peak,
}

impl TimeScale {
    pub const ALL: [TimeScale; 3] = [TimeScale::Base, TimeScale::Periodic, TimeScale::Peak];

    pub fn duration(&self) -> Time {
        match self {
            TimeScale::Base => hours(10.0 * HOURS_PER_YEAR),
            TimeScale::Periodic => hours(HOURS_PER_MONTH),
            TimeScale::Peak => hours(6.0),
        }
    }
}

/// Annual building loads and heat-pump efficiencies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadProfile {
    pub annual_heating_energy: Energy,
    pub annual_cooling_energy: Energy,
    pub peak_heating_load: Power,
    pub peak_cooling_load: Power,
    /// Seasonal heating COP of the heat pump, > 1.
    pub heating_cop: f64,
    /// Cooling EER, > 0.
    pub cooling_eer: f64,
    /// Monthly share of the annual heating energy, 12 values.
    pub monthly_heating_factors: [f64; 12],
    /// Monthly share of the annual cooling energy, 12 values.
    pub monthly_cooling_factors: [f64; 12],
}

impl LoadProfile {
    /// Heating-only profile with the default monthly shape.
    pub fn heating_only(annual: Energy, peak: Power, cop: f64) -> Self {
        Self {
            annual_heating_energy: annual,
            annual_cooling_energy: kwh(0.0),
            peak_heating_load: peak,
            peak_cooling_load: kw(0.0),
            heating_cop: cop,
            cooling_eer: 4.0,
            monthly_heating_factors: DEFAULT_HEATING_FACTORS,
            monthly_cooling_factors: [0.0; 12],
        }
    }

    pub fn validate(&self) -> Result<(), SizingError> {
        let invalid = |what| SizingError::Validation {
            stage: Stage::Inputs,
            what,
        };
        if self.annual_heating_energy.value < 0.0 || self.annual_cooling_energy.value < 0.0 {
            return Err(invalid("annual energies must be non-negative"));
        }
        if self.peak_heating_load.value < 0.0 || self.peak_cooling_load.value < 0.0 {
            return Err(invalid("peak loads must be non-negative"));
        }
        if !self.heating_cop.is_finite() || self.heating_cop <= 1.0 {
            return Err(invalid("heating COP must exceed 1"));
        }
        if !self.cooling_eer.is_finite() || self.cooling_eer <= 0.0 {
            return Err(invalid("cooling EER must be positive"));
        }
        let factors_ok = |f: &[f64; 12]| f.iter().all(|x| (0.0..=1.0).contains(x));
        if !factors_ok(&self.monthly_heating_factors) || !factors_ok(&self.monthly_cooling_factors)
        {
            return Err(invalid("monthly factors must lie in [0, 1]"));
        }
        if !self.has_heating() && !self.has_cooling() {
            return Err(invalid("load profile is entirely zero"));
        }
        Ok(())
    }

    pub fn has_heating(&self) -> bool {
        self.annual_heating_energy.value > 0.0 || self.peak_heating_load.value > 0.0
    }

    pub fn has_cooling(&self) -> bool {
        self.annual_cooling_energy.value > 0.0 || self.peak_cooling_load.value > 0.0
    }

    /// Ground-side fraction of the building load.
    ///
    /// Heating extracts the building load minus the compressor work,
    /// (COP−1)/COP; cooling injects load plus compressor work, (EER+1)/EER.
    pub fn efficiency_factor(&self, mode: DesignMode) -> f64 {
        match mode {
            DesignMode::Heating => (self.heating_cop - 1.0) / self.heating_cop,
            DesignMode::Cooling => (self.cooling_eer + 1.0) / self.cooling_eer,
        }
    }

    /// Share of the annual energy falling into the critical month.
    pub fn critical_month_fraction(&self, mode: DesignMode) -> f64 {
        let factors = match mode {
            DesignMode::Heating => &self.monthly_heating_factors,
            DesignMode::Cooling => &self.monthly_cooling_factors,
        };
        factors.iter().copied().fold(0.0, f64::max)
    }

    /// Base / periodic / peak decomposition on the ground side, in watts.
    pub fn ground_loads(&self, mode: DesignMode) -> GroundLoads {
        let eff = self.efficiency_factor(mode);
        let annual_j = match mode {
            DesignMode::Heating => self.annual_heating_energy.value,
            DesignMode::Cooling => self.annual_cooling_energy.value,
        };
        let peak_w = match mode {
            DesignMode::Heating => self.peak_heating_load.value,
            DesignMode::Cooling => self.peak_cooling_load.value,
        };
        let annual_ground_j = annual_j * eff;
        let base = annual_ground_j / (HOURS_PER_YEAR * SECONDS_PER_HOUR);
        let periodic = annual_ground_j * self.critical_month_fraction(mode)
            / (HOURS_PER_MONTH * SECONDS_PER_HOUR);
        let peak = peak_w * eff;
        GroundLoads {
            base,
            periodic,
            peak,
        }
    }
}

/// Ground-side load magnitudes over the three horizons, in watts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundLoads {
    pub base: f64,
    pub periodic: f64,
    pub peak: f64,
}

impl GroundLoads {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            base: self.base * factor,
            periodic: self.periodic * factor,
            peak: self.peak * factor,
        }
    }
}
