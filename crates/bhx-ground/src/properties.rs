//! Undisturbed ground properties.

use crate::error::{GroundError, GroundResult};
use bhx_core::units::{Temperature, ThermalCond, VolHeatCapacity};

/// Homogeneous ground around the borehole field.
///
/// One soil layer, no groundwater advection; the undisturbed temperature
/// is the depth-averaged value supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundProperties {
    pub conductivity: ThermalCond,
    pub volumetric_heat_capacity: VolHeatCapacity,
    pub undisturbed_temperature: Temperature,
}

impl GroundProperties {
    pub fn new(
        conductivity: ThermalCond,
        volumetric_heat_capacity: VolHeatCapacity,
        undisturbed_temperature: Temperature,
    ) -> GroundResult<Self> {
        if !conductivity.value.is_finite() || conductivity.value <= 0.0 {
            return Err(GroundError::Validation {
                what: "ground thermal conductivity must be positive",
            });
        }
        if !volumetric_heat_capacity.value.is_finite() || volumetric_heat_capacity.value <= 0.0 {
            return Err(GroundError::Validation {
                what: "ground volumetric heat capacity must be positive",
            });
        }
        if !undisturbed_temperature.value.is_finite() {
            return Err(GroundError::Validation {
                what: "undisturbed ground temperature must be finite",
            });
        }
        Ok(Self {
            conductivity,
            volumetric_heat_capacity,
            undisturbed_temperature,
        })
    }

    /// Thermal diffusivity α = λ / c, in m²/s.
    pub fn diffusivity(&self) -> f64 {
        self.conductivity.value / self.volumetric_heat_capacity.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhx_core::units::{celsius, jpm3k, wpmk};

    #[test]
    fn diffusivity_from_conductivity_and_capacity() {
        let ground = GroundProperties::new(wpmk(1.8), jpm3k(2.4e6), celsius(10.0)).unwrap();
        assert!((ground.diffusivity() - 7.5e-7).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_conductivity() {
        let err = GroundProperties::new(wpmk(0.0), jpm3k(2.4e6), celsius(10.0)).unwrap_err();
        assert!(matches!(err, GroundError::Validation { .. }));
    }

    #[test]
    fn rejects_non_positive_heat_capacity() {
        assert!(GroundProperties::new(wpmk(2.0), jpm3k(-1.0), celsius(10.0)).is_err());
    }
}
