//! Brine property interpolation over concentration reference rows.

use crate::error::{FluidError, FluidResult};
use bhx_core::units::{
    Density, DynVisc, SpecHeat, Temperature, ThermalCond, celsius, jpkgk, kgpm3, pa_s, wpmk,
};

/// Upper bound for the antifreeze volume fraction supported by the tables.
pub const MAX_VOLUME_FRACTION: f64 = 0.40;

/// Antifreeze additive of the heat-carrier fluid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AntifreezeKind {
    EthyleneGlycol,
    PropyleneGlycol,
}

/// Heat-carrier fluid specification: additive kind and volume fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FluidSpec {
    pub kind: AntifreezeKind,
    /// Antifreeze volume fraction, 0.0 (pure water) to 0.40.
    pub volume_fraction: f64,
}

/// Derived thermophysical properties of the circulating brine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProperties {
    pub density: Density,
    pub dynamic_viscosity: DynVisc,
    pub specific_heat: SpecHeat,
    pub thermal_conductivity: ThermalCond,
    pub freezing_point: Temperature,
}

/// One reference row: properties at a fixed volume fraction.
///
/// Density [kg/m³], viscosity [Pa·s], specific heat [J/(kg·K)],
/// conductivity [W/(m·K)], freezing point [°C].
struct PropertyRow {
    fraction: f64,
    density: f64,
    viscosity: f64,
    specific_heat: f64,
    conductivity: f64,
    freeze_c: f64,
}

/// Ethylene glycol brine. The 0 % row is pure water.
const ETHYLENE_GLYCOL: [PropertyRow; 7] = [
    PropertyRow { fraction: 0.00, density: 1000.0, viscosity: 0.0010, specific_heat: 4190.0, conductivity: 0.60, freeze_c: 0.0 },
    PropertyRow { fraction: 0.10, density: 1013.0, viscosity: 0.0012, specific_heat: 4140.0, conductivity: 0.56, freeze_c: -4.0 },
    PropertyRow { fraction: 0.20, density: 1026.0, viscosity: 0.0016, specific_heat: 4050.0, conductivity: 0.52, freeze_c: -8.0 },
    PropertyRow { fraction: 0.25, density: 1033.0, viscosity: 0.0019, specific_heat: 4000.0, conductivity: 0.50, freeze_c: -11.0 },
    PropertyRow { fraction: 0.30, density: 1039.0, viscosity: 0.0024, specific_heat: 3950.0, conductivity: 0.48, freeze_c: -15.0 },
    PropertyRow { fraction: 0.35, density: 1045.0, viscosity: 0.0030, specific_heat: 3900.0, conductivity: 0.46, freeze_c: -19.0 },
    PropertyRow { fraction: 0.40, density: 1052.0, viscosity: 0.0038, specific_heat: 3850.0, conductivity: 0.45, freeze_c: -24.0 },
];

/// Propylene glycol brine. More viscous than ethylene glycol at equal
/// concentration, weaker freezing-point depression.
const PROPYLENE_GLYCOL: [PropertyRow; 7] = [
    PropertyRow { fraction: 0.00, density: 1000.0, viscosity: 0.0010, specific_heat: 4190.0, conductivity: 0.60, freeze_c: 0.0 },
    PropertyRow { fraction: 0.10, density: 1008.0, viscosity: 0.0015, specific_heat: 4100.0, conductivity: 0.55, freeze_c: -3.0 },
    PropertyRow { fraction: 0.20, density: 1017.0, viscosity: 0.0023, specific_heat: 4000.0, conductivity: 0.51, freeze_c: -7.0 },
    PropertyRow { fraction: 0.25, density: 1021.0, viscosity: 0.0029, specific_heat: 3950.0, conductivity: 0.49, freeze_c: -10.0 },
    PropertyRow { fraction: 0.30, density: 1026.0, viscosity: 0.0037, specific_heat: 3890.0, conductivity: 0.47, freeze_c: -13.0 },
    PropertyRow { fraction: 0.35, density: 1030.0, viscosity: 0.0049, specific_heat: 3820.0, conductivity: 0.45, freeze_c: -17.0 },
    PropertyRow { fraction: 0.40, density: 1034.0, viscosity: 0.0065, specific_heat: 3750.0, conductivity: 0.43, freeze_c: -21.0 },
];

impl AntifreezeKind {
    fn table(&self) -> &'static [PropertyRow] {
        match self {
            AntifreezeKind::EthyleneGlycol => &ETHYLENE_GLYCOL,
            AntifreezeKind::PropyleneGlycol => &PROPYLENE_GLYCOL,
        }
    }
}

impl FluidSpec {
    pub fn new(kind: AntifreezeKind, volume_fraction: f64) -> FluidResult<Self> {
        if !volume_fraction.is_finite() {
            return Err(FluidError::InvalidArg {
                what: "antifreeze volume fraction must be finite",
            });
        }
        if !(0.0..=MAX_VOLUME_FRACTION).contains(&volume_fraction) {
            return Err(FluidError::OutOfRange {
                what: "antifreeze volume fraction",
            });
        }
        Ok(Self {
            kind,
            volume_fraction,
        })
    }

    /// Pure water, the x = 0 boundary of both tables.
    pub fn water() -> Self {
        Self {
            kind: AntifreezeKind::EthyleneGlycol,
            volume_fraction: 0.0,
        }
    }

    /// Interpolate brine properties at the spec's concentration.
    pub fn properties(&self) -> FluidResult<FluidProperties> {
        if !(0.0..=MAX_VOLUME_FRACTION).contains(&self.volume_fraction) {
            return Err(FluidError::OutOfRange {
                what: "antifreeze volume fraction",
            });
        }

        let table = self.kind.table();
        let x = self.volume_fraction;

        // Bracketing rows; the range check above guarantees a match.
        let hi = table
            .iter()
            .position(|row| row.fraction >= x)
            .ok_or(FluidError::OutOfRange {
                what: "antifreeze volume fraction",
            })?;

        let props = if hi == 0 {
            row_properties(&table[0], 0.0, &table[0])
        } else {
            let lo = &table[hi - 1];
            let f = (x - lo.fraction) / (table[hi].fraction - lo.fraction);
            row_properties(lo, f, &table[hi])
        };

        if props.dynamic_viscosity.value <= 0.0 || props.density.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "interpolated brine properties",
            });
        }

        Ok(props)
    }
}

fn row_properties(lo: &PropertyRow, f: f64, hi: &PropertyRow) -> FluidProperties {
    let lerp = |a: f64, b: f64| a + f * (b - a);
    FluidProperties {
        density: kgpm3(lerp(lo.density, hi.density)),
        dynamic_viscosity: pa_s(lerp(lo.viscosity, hi.viscosity)),
        specific_heat: jpkgk(lerp(lo.specific_heat, hi.specific_heat)),
        thermal_conductivity: wpmk(lerp(lo.conductivity, hi.conductivity)),
        freezing_point: celsius(lerp(lo.freeze_c, hi.freeze_c)),
    }
}
