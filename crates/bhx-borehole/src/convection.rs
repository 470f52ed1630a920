//! Convective film resistance inside a pipe leg.

use crate::error::{BoreholeError, BoreholeResult};
use crate::geometry::PipeSpec;
use bhx_core::units::VolumeRate;
use bhx_fluids::FluidProperties;
use std::f64::consts::PI;

/// Nusselt number for fully developed laminar pipe flow, constant wall
/// temperature.
const NU_LAMINAR: f64 = 3.66;

/// Film resistance of one pipe leg, in m·K/W.
///
/// Dittus-Boelter above Re = 2300, constant Nusselt number below. The flow
/// is the volumetric rate through a single leg.
pub fn film_resistance(
    pipe: &PipeSpec,
    fluid: &FluidProperties,
    flow_per_pipe: VolumeRate,
) -> BoreholeResult<f64> {
    let d_i = pipe.inner_diameter_m();
    let q = flow_per_pipe.value;
    if !q.is_finite() || q <= 0.0 {
        return Err(BoreholeError::Geometry {
            what: "flow per pipe must be positive",
        });
    }

    let rho = fluid.density.value;
    let mu = fluid.dynamic_viscosity.value;
    let cp = fluid.specific_heat.value;
    let lambda_f = fluid.thermal_conductivity.value;

    let area = PI * d_i * d_i / 4.0;
    let velocity = q / area;
    let reynolds = rho * velocity * d_i / mu;
    let prandtl = mu * cp / lambda_f;

    let nusselt = if reynolds > 2300.0 {
        0.023 * reynolds.powf(0.8) * prandtl.powf(0.4)
    } else {
        NU_LAMINAR
    };

    let h = nusselt * lambda_f / d_i;
    let r_film = 1.0 / (h * PI * d_i);
    if !r_film.is_finite() || r_film <= 0.0 {
        return Err(BoreholeError::NonPhysical {
            what: "convective film resistance",
        });
    }
    Ok(r_film)
}

/// Conductive resistance of one pipe wall, ln(d_o/d_i)/(2πλ_p), in m·K/W.
pub fn wall_resistance(pipe: &PipeSpec) -> f64 {
    (pipe.outer_diameter.value / pipe.inner_diameter_m()).ln()
        / (2.0 * PI * pipe.conductivity.value)
}
