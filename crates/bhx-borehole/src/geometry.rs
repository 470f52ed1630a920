//! Borehole, pipe and grout specifications.

use crate::error::{BoreholeError, BoreholeResult};
use bhx_core::units::{Length, ThermalCond};

/// Pipe arrangement inside the borehole.
///
/// The pipe count and the number of independent hydraulic circuits follow
/// from the variant; there is no separate thermal model per variant beyond
/// the pipe positions it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PipeConfiguration {
    /// One U-loop, two legs.
    SingleU,
    /// Two U-loops piped in series, four legs.
    DoubleU,
    /// Two U-loops piped in parallel, four legs.
    DualCircuit,
    /// Four U-loops piped in parallel, eight legs.
    QuadCircuit,
    /// Concentric inner/outer pipe.
    Coaxial,
}

impl PipeConfiguration {
    /// Number of pipe legs in the borehole cross-section.
    pub fn pipe_count(&self) -> u32 {
        match self {
            PipeConfiguration::SingleU => 2,
            PipeConfiguration::DoubleU => 4,
            PipeConfiguration::DualCircuit => 4,
            PipeConfiguration::QuadCircuit => 8,
            PipeConfiguration::Coaxial => 2,
        }
    }

    /// Independent parallel circuits per borehole.
    pub fn circuits_per_borehole(&self) -> u32 {
        match self {
            PipeConfiguration::SingleU => 1,
            PipeConfiguration::DoubleU => 1,
            PipeConfiguration::DualCircuit => 2,
            PipeConfiguration::QuadCircuit => 4,
            PipeConfiguration::Coaxial => 1,
        }
    }
}

/// Borehole cross-section: bore diameter, pipe arrangement, shank spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoreholeGeometry {
    pub diameter: Length,
    pub pipe_config: PipeConfiguration,
    /// Center-to-center distance between opposite pipe legs.
    pub shank_spacing: Length,
}

impl BoreholeGeometry {
    pub fn new(
        diameter: Length,
        pipe_config: PipeConfiguration,
        shank_spacing: Length,
    ) -> BoreholeResult<Self> {
        if !diameter.value.is_finite() || diameter.value <= 0.0 {
            return Err(BoreholeError::Geometry {
                what: "borehole diameter must be positive",
            });
        }
        if !shank_spacing.value.is_finite() || shank_spacing.value <= 0.0 {
            return Err(BoreholeError::Geometry {
                what: "shank spacing must be positive",
            });
        }
        if shank_spacing.value >= diameter.value {
            return Err(BoreholeError::Geometry {
                what: "shank spacing must be smaller than the borehole diameter",
            });
        }
        Ok(Self {
            diameter,
            pipe_config,
            shank_spacing,
        })
    }

    pub fn radius_m(&self) -> f64 {
        self.diameter.value / 2.0
    }

    /// Check that the pipes of `pipe` physically fit this cross-section.
    pub fn validate_pipes(&self, pipe: &PipeSpec) -> BoreholeResult<()> {
        let od = pipe.outer_diameter.value;
        if self.shank_spacing.value + od >= self.diameter.value {
            return Err(BoreholeError::Geometry {
                what: "pipes exceed the borehole wall",
            });
        }
        if self.pipe_config != PipeConfiguration::Coaxial && self.shank_spacing.value < od {
            return Err(BoreholeError::Geometry {
                what: "pipes overlap each other",
            });
        }
        Ok(())
    }
}

/// Single pipe leg: outer diameter, wall thickness, wall conductivity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipeSpec {
    pub outer_diameter: Length,
    pub wall_thickness: Length,
    pub conductivity: ThermalCond,
}

impl PipeSpec {
    pub fn new(
        outer_diameter: Length,
        wall_thickness: Length,
        conductivity: ThermalCond,
    ) -> BoreholeResult<Self> {
        if !outer_diameter.value.is_finite() || outer_diameter.value <= 0.0 {
            return Err(BoreholeError::Geometry {
                what: "pipe outer diameter must be positive",
            });
        }
        if !wall_thickness.value.is_finite() || wall_thickness.value <= 0.0 {
            return Err(BoreholeError::Geometry {
                what: "pipe wall thickness must be positive",
            });
        }
        if outer_diameter.value <= 2.0 * wall_thickness.value {
            return Err(BoreholeError::Geometry {
                what: "pipe outer diameter must exceed twice the wall thickness",
            });
        }
        if !conductivity.value.is_finite() || conductivity.value <= 0.0 {
            return Err(BoreholeError::Geometry {
                what: "pipe wall conductivity must be positive",
            });
        }
        Ok(Self {
            outer_diameter,
            wall_thickness,
            conductivity,
        })
    }

    pub fn inner_diameter_m(&self) -> f64 {
        self.outer_diameter.value - 2.0 * self.wall_thickness.value
    }

    pub fn outer_radius_m(&self) -> f64 {
        self.outer_diameter.value / 2.0
    }
}

/// Grout filling the borehole annulus.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroutSpec {
    pub conductivity: ThermalCond,
}

impl GroutSpec {
    pub fn new(conductivity: ThermalCond) -> BoreholeResult<Self> {
        if !conductivity.value.is_finite() || conductivity.value <= 0.0 {
            return Err(BoreholeError::Geometry {
                what: "grout conductivity must be positive",
            });
        }
        Ok(Self { conductivity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhx_core::units::{mm, wpmk};

    fn pe32() -> PipeSpec {
        PipeSpec::new(mm(32.0), mm(2.9), wpmk(0.42)).unwrap()
    }

    #[test]
    fn pipe_counts_per_configuration() {
        assert_eq!(PipeConfiguration::SingleU.pipe_count(), 2);
        assert_eq!(PipeConfiguration::DoubleU.pipe_count(), 4);
        assert_eq!(PipeConfiguration::DualCircuit.pipe_count(), 4);
        assert_eq!(PipeConfiguration::QuadCircuit.pipe_count(), 8);
        assert_eq!(PipeConfiguration::Coaxial.pipe_count(), 2);
    }

    #[test]
    fn wall_thickness_invariant() {
        let err = PipeSpec::new(mm(32.0), mm(16.0), wpmk(0.42)).unwrap_err();
        assert!(matches!(err, BoreholeError::Geometry { .. }));
    }

    #[test]
    fn inner_diameter_subtracts_both_walls() {
        assert!((pe32().inner_diameter_m() - 0.0262).abs() < 1e-9);
    }

    #[test]
    fn tiny_bore_rejects_pipes() {
        // 10 mm borehole cannot hold 32 mm pipes
        let geom = BoreholeGeometry::new(mm(10.0), PipeConfiguration::SingleU, mm(5.0)).unwrap();
        let err = geom.validate_pipes(&pe32()).unwrap_err();
        assert!(matches!(err, BoreholeError::Geometry { .. }));
    }

    #[test]
    fn overlapping_shanks_rejected() {
        let geom = BoreholeGeometry::new(mm(152.0), PipeConfiguration::SingleU, mm(20.0)).unwrap();
        assert!(geom.validate_pipes(&pe32()).is_err());
    }

    #[test]
    fn normal_geometry_accepted() {
        let geom = BoreholeGeometry::new(mm(152.0), PipeConfiguration::SingleU, mm(52.0)).unwrap();
        assert!(geom.validate_pipes(&pe32()).is_ok());
    }

    #[test]
    fn shank_wider_than_bore_rejected() {
        assert!(BoreholeGeometry::new(mm(100.0), PipeConfiguration::SingleU, mm(120.0)).is_err());
    }
}
