//! Sizing orchestration: one entry point over the whole pipeline.

use crate::config::{SimulationSettings, SizingMethod, TemperatureLimits};
use crate::error::{SizingError, Stage};
use crate::iterative::IterativeSizingSolver;
use crate::loads::{DesignMode, LoadProfile};
use crate::normative::solve_normative;
use crate::result::{SizingResult, TimescaleValues};
use bhx_borehole::{BoreholeGeometry, GroutSpec, PipeSpec, borehole_resistance};
use bhx_core::units::{celsius, m, m3ps, watt};
use bhx_fluids::FluidSpec;
use bhx_ground::{FieldLayout, GroundProperties};
use bhx_hydraulics::CircuitSpec;
use tracing::{debug, info};

/// Size a borehole field.
///
/// Validates all inputs, derives fluid properties and the borehole
/// resistance, dispatches to the selected sizing method (wiring in field
/// interaction for multi-borehole layouts), then solves the hydraulic
/// operating point at the dominant peak load. Deterministic for equal
/// inputs; a failure names the offending stage and never yields a
/// partial depth.
#[allow(clippy::too_many_arguments)]
pub fn size(
    ground: &GroundProperties,
    geometry: &BoreholeGeometry,
    pipe: &PipeSpec,
    grout: &GroutSpec,
    fluid: &FluidSpec,
    loads: &LoadProfile,
    layout: &FieldLayout,
    method: SizingMethod,
    limits: &TemperatureLimits,
    settings: &SimulationSettings,
) -> Result<SizingResult, SizingError> {
    loads.validate()?;
    limits.validate()?;
    settings.validate()?;

    let fluid_props = fluid.properties()?;

    // Ground-side peaks govern both the film resistance and the pump.
    let peak_heating = loads.ground_loads(DesignMode::Heating).peak;
    let peak_cooling = loads.ground_loads(DesignMode::Cooling).peak;
    let design_peak_w = peak_heating.max(peak_cooling);
    if design_peak_w <= 0.0 {
        return Err(SizingError::Validation {
            stage: Stage::Inputs,
            what: "no peak load to size against",
        });
    }

    let borehole_count = layout.count() as u32;
    let circuits = borehole_count * geometry.pipe_config.circuits_per_borehole();

    let total_flow =
        bhx_hydraulics::required_flow(watt(design_peak_w), &fluid_props, limits.design_delta_t)?;
    let flow_per_circuit = m3ps(total_flow.value / f64::from(circuits));

    let resistance = borehole_resistance(
        geometry,
        pipe,
        grout,
        ground.conductivity,
        &fluid_props,
        flow_per_circuit,
    )?;
    debug!(
        r_b = resistance.r_b,
        r_film = resistance.r_film,
        circuits,
        "borehole resistance established"
    );

    let radius = m(geometry.radius_m());

    let (
        depth_m,
        dominant_mode,
        t_min_c,
        t_max_c,
        g_values,
        resistances,
        iterations,
        monthly_trace,
    ) = match method {
        SizingMethod::Classical => {
            let solver = IterativeSizingSolver::new(
                ground,
                layout,
                limits,
                settings,
                radius,
                resistance.r_b,
                loads,
                fluid_props.freezing_point,
            );
            let outcome = solver.solve()?;
            let lambda = 2.0 * std::f64::consts::PI * ground.conductivity.value;
            let g = TimescaleValues {
                base: outcome.g_long,
                periodic: outcome.g_periodic,
                peak: outcome.g_peak,
            };
            let r = TimescaleValues {
                base: g.base / lambda,
                periodic: g.periodic / lambda,
                peak: g.peak / lambda,
            };
            (
                outcome.depth_per_borehole,
                outcome.binding_mode,
                outcome.min_fluid_temperature,
                outcome.max_fluid_temperature,
                g,
                r,
                outcome.iterations,
                outcome.monthly_fluid_temperatures.to_vec(),
            )
        }
        SizingMethod::Normative => {
            let outcome =
                solve_normative(ground, layout, limits, settings, radius, resistance.r_b, loads)?;
            (
                outcome.depth_final,
                outcome.dominant_mode,
                outcome.outlet_heating_min,
                outcome.outlet_cooling_max,
                outcome.g_values,
                outcome.resistances,
                0,
                Vec::new(),
            )
        }
    };

    let hydraulic_spec = CircuitSpec {
        circuits,
        pipe_inner_diameter: m(pipe.inner_diameter_m()),
        roughness: settings.pipe_roughness,
        header_length: settings.header_length,
        minor_loss_k: settings.minor_loss_k,
        pump_efficiency: settings.pump_efficiency,
    };
    let hydraulics = bhx_hydraulics::solve(
        &hydraulic_spec,
        &fluid_props,
        watt(design_peak_w),
        limits.design_delta_t,
        m(depth_m),
    )?;

    let result = SizingResult {
        method,
        dominant_mode,
        depth_per_borehole: m(depth_m),
        borehole_count,
        total_drilled_length: m(depth_m * f64::from(borehole_count)),
        min_fluid_temperature: celsius(t_min_c),
        max_fluid_temperature: celsius(t_max_c),
        borehole_resistance: resistance.r_b,
        resistances,
        g_values,
        iterations,
        monthly_fluid_temperatures: monthly_trace,
        hydraulics,
        field_footprint_area: layout.footprint_area(),
    };
    info!(
        depth = depth_m,
        boreholes = borehole_count,
        ?dominant_mode,
        "sizing run complete"
    );
    Ok(result)
}
