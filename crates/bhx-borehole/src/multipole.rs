//! Borehole thermal resistance via the multipole method.
//!
//! U-tube arrangements use the symmetric line-source expression with the
//! first-order multipole correction (Claesson/Hellström family of explicit
//! formulas); the coaxial arrangement reduces to series annulus
//! resistances. All resistances are per unit borehole length, m·K/W.

use crate::convection::{film_resistance, wall_resistance};
use crate::error::{BoreholeError, BoreholeResult};
use crate::geometry::{BoreholeGeometry, GroutSpec, PipeConfiguration, PipeSpec};
use bhx_core::units::{ThermalCond, VolumeRate};
use std::f64::consts::PI;

/// Resistance breakdown of one borehole cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoreholeResistance {
    /// Fluid-to-borehole-wall resistance, including pipe wall and film.
    pub r_b: f64,
    /// Conductive resistance of one pipe wall.
    pub r_pipe_wall: f64,
    /// Convective film resistance of one pipe leg.
    pub r_film: f64,
    /// Conductive lower bound the computed value must exceed.
    pub lower_bound: f64,
}

/// Compute R_b for the given cross-section and design flow.
///
/// `flow_per_circuit` is the volumetric rate through one hydraulic
/// circuit; each leg of a circuit carries the full circuit flow.
pub fn borehole_resistance(
    geometry: &BoreholeGeometry,
    pipe: &PipeSpec,
    grout: &GroutSpec,
    ground_conductivity: ThermalCond,
    fluid: &bhx_fluids::FluidProperties,
    flow_per_circuit: VolumeRate,
) -> BoreholeResult<BoreholeResistance> {
    geometry.validate_pipes(pipe)?;

    let r_wall = wall_resistance(pipe);
    let r_film = film_resistance(pipe, fluid, flow_per_circuit)?;
    let r_pipe = r_wall + r_film;

    let r_b = match geometry.pipe_config {
        PipeConfiguration::Coaxial => coaxial_resistance(geometry, pipe, grout, r_pipe),
        _ => u_tube_resistance(geometry, pipe, grout, ground_conductivity, r_pipe)?,
    };

    if !r_b.is_finite() || r_b <= 0.0 {
        return Err(BoreholeError::NonPhysical {
            what: "borehole resistance",
        });
    }

    let bound = conductive_lower_bound(geometry, pipe, grout, r_wall);
    if r_b <= bound {
        return Err(BoreholeError::BelowPhysicalBound {
            computed: r_b,
            bound,
        });
    }

    Ok(BoreholeResistance {
        r_b,
        r_pipe_wall: r_wall,
        r_film,
        lower_bound: bound,
    })
}

/// Symmetric n-pipe multipole expression.
///
/// Zeroth order:
///   R_b0 = 1/(2πnλ_b)·[β + ln(r_b^n/(n·r_p·b^(n−1))) + σ·ln(r_b^2n/(r_b^2n − b^2n))]
/// with β = 2πλ_b·R_p, σ the grout/ground conductivity contrast and b the
/// pipe-circle radius. The first-order term corrects for the non-uniform
/// heat flux around each pipe periphery and is strictly subtractive.
fn u_tube_resistance(
    geometry: &BoreholeGeometry,
    pipe: &PipeSpec,
    grout: &GroutSpec,
    ground_conductivity: ThermalCond,
    r_pipe: f64,
) -> BoreholeResult<f64> {
    let n = geometry.pipe_config.pipe_count() as f64;
    let r_b = geometry.radius_m();
    let r_p = pipe.outer_radius_m();
    let b = geometry.shank_spacing.value / 2.0;
    let lambda_b = grout.conductivity.value;
    let lambda_s = ground_conductivity.value;

    let sigma = (lambda_b - lambda_s) / (lambda_b + lambda_s);
    let beta = 2.0 * PI * lambda_b * r_pipe;

    let rb_2n = r_b.powf(2.0 * n);
    let b_2n = b.powf(2.0 * n);
    if b_2n >= rb_2n {
        return Err(BoreholeError::Geometry {
            what: "pipe circle reaches the borehole wall",
        });
    }

    let line_source = (r_b.powf(n) / (n * r_p * b.powf(n - 1.0))).ln()
        + sigma * (rb_2n / (rb_2n - b_2n)).ln();

    let r_b0 = (beta + line_source) / (2.0 * PI * n * lambda_b);

    // First-order multipole correction. p_n collects the local field
    // strength at one pipe from the other legs; for two legs it reduces
    // to r_p/(2b).
    let s_n: f64 = (1..geometry.pipe_config.pipe_count())
        .map(|k| 1.0 / (2.0 * (PI * k as f64 / n).sin()))
        .sum();
    let p_n = r_p / b * s_n;

    let ratio = b_2n / (rb_2n - b_2n);
    let num = p_n * p_n * (1.0 - 2.0 * n * sigma * ratio).powi(2);
    let den = (1.0 + beta) / (1.0 - beta).max(1e-9)
        + p_n * p_n * (1.0 + 4.0 * n * n * sigma * ratio * rb_2n / (rb_2n - b_2n));
    let correction = if den > 0.0 { num / den } else { 0.0 };

    Ok(r_b0 - correction / (2.0 * PI * n * lambda_b))
}

/// Coaxial cross-section: film + outer pipe wall + grout annulus in series.
fn coaxial_resistance(
    geometry: &BoreholeGeometry,
    pipe: &PipeSpec,
    grout: &GroutSpec,
    r_pipe: f64,
) -> f64 {
    let r_grout =
        (geometry.radius_m() / pipe.outer_radius_m()).ln() / (2.0 * PI * grout.conductivity.value);
    r_pipe + r_grout
}

/// Conductive floor: one pipe wall shared by n legs, plus the grout
/// annulus outside the circle through the pipe outer edges (treating that
/// circle as isothermal, the best any arrangement can do).
fn conductive_lower_bound(
    geometry: &BoreholeGeometry,
    pipe: &PipeSpec,
    grout: &GroutSpec,
    r_wall: f64,
) -> f64 {
    let n = geometry.pipe_config.pipe_count() as f64;
    let outer_edge = match geometry.pipe_config {
        PipeConfiguration::Coaxial => pipe.outer_radius_m(),
        _ => geometry.shank_spacing.value / 2.0 + pipe.outer_radius_m(),
    };
    let annulus = if outer_edge < geometry.radius_m() {
        (geometry.radius_m() / outer_edge).ln() / (2.0 * PI * grout.conductivity.value)
    } else {
        0.0
    };
    r_wall / n + annulus
}
