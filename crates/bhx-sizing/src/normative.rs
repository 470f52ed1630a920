//! VDI 4640 / Koenigsdorff three-timescale sizing.
//!
//! The annual operation is collapsed into three load magnitudes per mode
//! (base, periodic, peak), each paired with a ground resistance evaluated
//! at its fixed horizon. The required depth follows in closed form:
//!
//! ```text
//! H = [Q_base·(R_base+R_b) + Q_per·(R_per+R_b) + Q_peak·(R_peak+R_b)]
//!     / (ΔT_design · N)
//! ```
//!
//! Heating and cooling are sized independently; the mode demanding the
//! larger depth is design-relevant. No iteration takes place.

use crate::config::{SimulationSettings, TemperatureLimits};
use crate::error::{SizingError, Stage};
use crate::loads::{DesignMode, GroundLoads, LoadProfile, TimeScale};
use crate::result::TimescaleValues;
use bhx_core::units::{Length, m, to_celsius};
use bhx_ground::{FieldInteraction, FieldLayout, GroundProperties, SingleBorehole};
use std::f64::consts::PI;
use tracing::debug;

/// Closed-form normative sizing with both design cases.
#[derive(Debug, Clone, PartialEq)]
pub struct NormativeOutcome {
    pub depth_heating: f64,
    pub depth_cooling: f64,
    /// The larger of the two, design-relevant.
    pub depth_final: f64,
    pub dominant_mode: DesignMode,
    /// Heat-pump outlet temperatures at the final depth, °C.
    pub outlet_heating_min: f64,
    pub outlet_cooling_max: f64,
    /// Ground resistances per horizon, m·K/W.
    pub resistances: TimescaleValues,
    /// Field g-values per horizon.
    pub g_values: TimescaleValues,
}

/// Size the field per VDI 4640.
///
/// G-values are evaluated at the reference depth from the settings; the
/// method is deliberately non-iterative.
#[allow(clippy::too_many_arguments)]
pub fn solve_normative(
    ground: &GroundProperties,
    layout: &FieldLayout,
    limits: &TemperatureLimits,
    settings: &SimulationSettings,
    borehole_radius: Length,
    r_b: f64,
    loads: &LoadProfile,
) -> Result<NormativeOutcome, SizingError> {
    let alpha = ground.diffusivity();
    let single = SingleBorehole::new(settings.reference_depth, m(borehole_radius.value), alpha)?;
    let field = FieldInteraction::new(single, alpha, layout)?;
    let n = layout.count() as f64;

    let g = TimescaleValues {
        base: field.effective_g_function(TimeScale::Base.duration()),
        periodic: field.effective_g_function(TimeScale::Periodic.duration()),
        peak: field.effective_g_function(TimeScale::Peak.duration()),
    };
    let two_pi_lambda = 2.0 * PI * ground.conductivity.value;
    let r = TimescaleValues {
        base: g.base / two_pi_lambda,
        periodic: g.periodic / two_pi_lambda,
        peak: g.peak / two_pi_lambda,
    };

    let t_g = to_celsius(ground.undisturbed_temperature);

    let depth_heating = if loads.has_heating() {
        let delta_t = t_g - to_celsius(limits.min_fluid);
        if delta_t <= 0.0 {
            return Err(SizingError::Validation {
                stage: Stage::NormativeSolver,
                what: "heating design spread is non-positive",
            });
        }
        mode_depth(&loads.ground_loads(DesignMode::Heating), &r, r_b, delta_t, n)
    } else {
        0.0
    };

    let depth_cooling = if loads.has_cooling() {
        let delta_t = to_celsius(limits.max_fluid) - t_g;
        if delta_t <= 0.0 {
            return Err(SizingError::Validation {
                stage: Stage::NormativeSolver,
                what: "cooling design spread is non-positive",
            });
        }
        mode_depth(&loads.ground_loads(DesignMode::Cooling), &r, r_b, delta_t, n)
    } else {
        0.0
    };

    // Larger depth wins; equal depths default to heating.
    let (depth_final, dominant_mode) = if depth_cooling > depth_heating {
        (depth_cooling, DesignMode::Cooling)
    } else {
        (depth_heating, DesignMode::Heating)
    };
    if depth_final <= 0.0 {
        return Err(SizingError::Validation {
            stage: Stage::NormativeSolver,
            what: "load profile produced no depth demand",
        });
    }
    debug!(
        depth_heating,
        depth_cooling,
        ?dominant_mode,
        "normative design cases evaluated"
    );

    let delta_t_fluid = limits.design_delta_t.value;
    let outlet_heating_min = outlet_temperature(
        t_g,
        &loads.ground_loads(DesignMode::Heating),
        &r,
        r_b,
        depth_final,
        n,
        delta_t_fluid,
        DesignMode::Heating,
    );
    let outlet_cooling_max = outlet_temperature(
        t_g,
        &loads.ground_loads(DesignMode::Cooling),
        &r,
        r_b,
        depth_final,
        n,
        delta_t_fluid,
        DesignMode::Cooling,
    );

    Ok(NormativeOutcome {
        depth_heating,
        depth_cooling,
        depth_final,
        dominant_mode,
        outlet_heating_min,
        outlet_cooling_max,
        resistances: r,
        g_values: g,
    })
}

fn mode_depth(loads: &GroundLoads, r: &TimescaleValues, r_b: f64, delta_t: f64, n: f64) -> f64 {
    let numerator = loads.base.abs() * (r.base + r_b)
        + loads.periodic.abs() * (r.periodic + r_b)
        + loads.peak.abs() * (r.peak + r_b);
    numerator / (delta_t * n)
}

/// Heat-pump outlet temperature reconstruction at the final depth.
///
/// T_out = T_g ∓ ΔT_base ∓ ΔT_per ∓ ΔT_peak ∓ ½·ΔT_fluid, the signs
/// flipping between extraction (−) and injection (+).
#[allow(clippy::too_many_arguments)]
fn outlet_temperature(
    t_g: f64,
    loads: &GroundLoads,
    r: &TimescaleValues,
    r_b: f64,
    depth: f64,
    n: f64,
    delta_t_fluid: f64,
    mode: DesignMode,
) -> f64 {
    let total_length = depth * n;
    if total_length <= 0.0 {
        return t_g;
    }
    let dt_base = loads.base.abs() / total_length * (r.base + r_b);
    let dt_per = loads.periodic.abs() / total_length * (r.periodic + r_b);
    let dt_peak = loads.peak.abs() / total_length * (r.peak + r_b);
    let sign = match mode {
        DesignMode::Heating => -1.0,
        DesignMode::Cooling => 1.0,
    };
    t_g + sign * (dt_base + dt_per + dt_peak + 0.5 * delta_t_fluid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhx_core::units::{celsius, jpm3k, kelvin_interval, kw, kwh, wpmk};
    use crate::loads::{DEFAULT_COOLING_FACTORS, DEFAULT_HEATING_FACTORS};

    fn ground() -> GroundProperties {
        GroundProperties::new(wpmk(2.0), jpm3k(2.3e6), celsius(10.0)).unwrap()
    }

    fn limits() -> TemperatureLimits {
        TemperatureLimits {
            min_fluid: celsius(-2.0),
            max_fluid: celsius(35.0),
            design_delta_t: kelvin_interval(3.0),
        }
    }

    fn solve(
        loads: &LoadProfile,
        layout: &FieldLayout,
        limits: &TemperatureLimits,
    ) -> NormativeOutcome {
        solve_normative(
            &ground(),
            layout,
            limits,
            &SimulationSettings::default(),
            bhx_core::units::m(0.076),
            0.1,
            loads,
        )
        .unwrap()
    }

    #[test]
    fn heating_only_profile_is_heating_dominant() {
        let loads = LoadProfile::heating_only(kwh(12_000.0), kw(6.0), 4.0);
        let outcome = solve(&loads, &FieldLayout::single(), &limits());
        assert_eq!(outcome.dominant_mode, DesignMode::Heating);
        assert_eq!(outcome.depth_cooling, 0.0);
        assert_eq!(outcome.depth_final, outcome.depth_heating);
        assert!(outcome.depth_final > 50.0 && outcome.depth_final < 400.0);
    }

    #[test]
    fn resistances_scale_with_g_over_conductivity() {
        let loads = LoadProfile::heating_only(kwh(12_000.0), kw(6.0), 4.0);
        let outcome = solve(&loads, &FieldLayout::single(), &limits());
        let two_pi_lambda = 2.0 * PI * 2.0;
        assert!((outcome.resistances.base - outcome.g_values.base / two_pi_lambda).abs() < 1e-12);
        assert!(outcome.g_values.peak < outcome.g_values.periodic);
        assert!(outcome.g_values.periodic < outcome.g_values.base);
    }

    #[test]
    fn outlet_temperatures_bracket_the_ground() {
        let loads = LoadProfile {
            annual_cooling_energy: kwh(4_000.0),
            peak_cooling_load: kw(4.0),
            monthly_cooling_factors: DEFAULT_COOLING_FACTORS,
            ..LoadProfile::heating_only(kwh(12_000.0), kw(6.0), 4.0)
        };
        let outcome = solve(&loads, &FieldLayout::single(), &limits());
        assert!(outcome.outlet_heating_min < 10.0);
        assert!(outcome.outlet_cooling_max > 10.0);
    }

    #[test]
    fn office_cooling_dominates() {
        // High cooling demand against a tight upper limit
        let loads = LoadProfile {
            annual_heating_energy: kwh(8_000.0),
            annual_cooling_energy: kwh(20_000.0),
            peak_heating_load: kw(5.0),
            peak_cooling_load: kw(15.0),
            heating_cop: 4.0,
            cooling_eer: 3.5,
            monthly_heating_factors: DEFAULT_HEATING_FACTORS,
            monthly_cooling_factors: DEFAULT_COOLING_FACTORS,
        };
        let tight = TemperatureLimits {
            min_fluid: celsius(-1.0),
            max_fluid: celsius(26.0),
            design_delta_t: kelvin_interval(3.0),
        };
        let outcome = solve(&loads, &FieldLayout::line(2, bhx_core::units::m(6.0)).unwrap(), &tight);
        assert_eq!(outcome.dominant_mode, DesignMode::Cooling);
        assert!(outcome.depth_cooling > outcome.depth_heating);
        assert_eq!(outcome.depth_final, outcome.depth_cooling);
    }

    #[test]
    fn depth_monotone_in_annual_heating_energy() {
        let small = LoadProfile::heating_only(kwh(10_000.0), kw(6.0), 4.0);
        let large = LoadProfile::heating_only(kwh(16_000.0), kw(6.0), 4.0);
        let layout = FieldLayout::single();
        let d_small = solve(&small, &layout, &limits()).depth_final;
        let d_large = solve(&large, &layout, &limits()).depth_final;
        assert!(d_large > d_small);
    }

    #[test]
    fn more_boreholes_reduce_per_borehole_depth() {
        let loads = LoadProfile::heating_only(kwh(24_000.0), kw(12.0), 4.0);
        let single = solve(&loads, &FieldLayout::single(), &limits()).depth_final;
        let pair = solve(
            &loads,
            &FieldLayout::line(2, bhx_core::units::m(8.0)).unwrap(),
            &limits(),
        )
        .depth_final;
        assert!(pair < single);
        // interference keeps the split above the naive halving
        assert!(pair > single / 2.0);
    }

    #[test]
    fn ground_warmer_than_upper_limit_rejected() {
        let loads = LoadProfile {
            annual_cooling_energy: kwh(8_000.0),
            peak_cooling_load: kw(6.0),
            monthly_cooling_factors: DEFAULT_COOLING_FACTORS,
            ..LoadProfile::heating_only(kwh(1_000.0), kw(1.0), 4.0)
        };
        let bad = TemperatureLimits {
            min_fluid: celsius(-2.0),
            max_fluid: celsius(9.0),
            design_delta_t: kelvin_interval(3.0),
        };
        let err = solve_normative(
            &ground(),
            &FieldLayout::single(),
            &bad,
            &SimulationSettings::default(),
            bhx_core::units::m(0.076),
            0.1,
            &loads,
        )
        .unwrap_err();
        assert!(matches!(err, SizingError::Validation { .. }));
    }
}
