//! End-to-end sizing scenarios through the public entry point.

use bhx_borehole::{BoreholeGeometry, GroutSpec, PipeConfiguration, PipeSpec};
use bhx_core::units::{celsius, jpm3k, kelvin_interval, kw, kwh, m, mm, to_celsius, wpmk};
use bhx_fluids::{AntifreezeKind, FluidSpec};
use bhx_ground::{FieldLayout, GroundProperties};
use bhx_hydraulics::FlowRegime;
use bhx_sizing::{
    DesignMode, LoadProfile, SimulationSettings, SizingError, SizingMethod, TemperatureLimits,
    loads::DEFAULT_COOLING_FACTORS, normative::solve_normative, size,
};

fn reference_ground() -> GroundProperties {
    GroundProperties::new(wpmk(1.8), jpm3k(2.4e6), celsius(10.0)).unwrap()
}

fn reference_geometry() -> BoreholeGeometry {
    BoreholeGeometry::new(mm(152.0), PipeConfiguration::SingleU, mm(52.0)).unwrap()
}

fn reference_pipe() -> PipeSpec {
    PipeSpec::new(mm(32.0), mm(2.9), wpmk(0.42)).unwrap()
}

fn reference_grout() -> GroutSpec {
    GroutSpec::new(wpmk(1.3)).unwrap()
}

fn reference_fluid() -> FluidSpec {
    FluidSpec::new(AntifreezeKind::EthyleneGlycol, 0.25).unwrap()
}

fn reference_limits() -> TemperatureLimits {
    TemperatureLimits {
        min_fluid: celsius(-2.0),
        max_fluid: celsius(35.0),
        design_delta_t: kelvin_interval(3.0),
    }
}

fn reference_loads() -> LoadProfile {
    LoadProfile::heating_only(kwh(12_000.0), kw(6.0), 4.0)
}

#[test]
fn scenario_a_single_borehole_classical() {
    let result = size(
        &reference_ground(),
        &reference_geometry(),
        &reference_pipe(),
        &reference_grout(),
        &reference_fluid(),
        &reference_loads(),
        &FieldLayout::single(),
        SizingMethod::Classical,
        &reference_limits(),
        &SimulationSettings::default(),
    )
    .unwrap();

    // A 12 MWh/a, 6 kW dwelling on average ground sizes to a single
    // borehole on the order of a hundred-odd meters.
    let depth = result.depth_per_borehole.value;
    assert!((100.0..220.0).contains(&depth), "depth = {depth}");
    assert_eq!(result.borehole_count, 1);
    assert!((result.total_drilled_length.value - depth).abs() < 1e-9);

    // The lower limit binds: the solver converges onto it.
    let t_min = to_celsius(result.min_fluid_temperature);
    assert!((t_min - (-2.0)).abs() < 0.1, "t_min = {t_min}");
    assert_eq!(result.dominant_mode, DesignMode::Heating);

    // Hydraulic operating point at the design flow is turbulent.
    assert_eq!(result.hydraulics.regime, FlowRegime::Turbulent);
    assert!(result.hydraulics.pump_power.value > 0.0);
    assert!(result.iterations > 0 && result.iterations <= 100);
    assert_eq!(result.monthly_fluid_temperatures.len(), 12);
}

#[test]
fn scenario_b_two_boreholes_share_the_load() {
    let single = size(
        &reference_ground(),
        &reference_geometry(),
        &reference_pipe(),
        &reference_grout(),
        &reference_fluid(),
        &reference_loads(),
        &FieldLayout::single(),
        SizingMethod::Classical,
        &reference_limits(),
        &SimulationSettings::default(),
    )
    .unwrap();

    let pair = size(
        &reference_ground(),
        &reference_geometry(),
        &reference_pipe(),
        &reference_grout(),
        &reference_fluid(),
        &reference_loads(),
        &FieldLayout::line(2, m(6.0)).unwrap(),
        SizingMethod::Classical,
        &reference_limits(),
        &SimulationSettings::default(),
    )
    .unwrap();

    assert_eq!(pair.borehole_count, 2);
    let per_borehole = pair.depth_per_borehole.value;
    assert!(
        (pair.total_drilled_length.value - 2.0 * per_borehole).abs() < 1e-9,
        "total must be twice the per-borehole depth"
    );

    // Sharing the load shortens each borehole, but thermal interference
    // keeps it above a naive halving.
    let single_depth = single.depth_per_borehole.value;
    assert!(per_borehole < single_depth);
    assert!(per_borehole > single_depth / 2.0);
}

#[test]
fn scenario_c_office_cooling_dominates_normative() {
    let ground = GroundProperties::new(wpmk(1.5), jpm3k(2.2e6), celsius(12.0)).unwrap();
    let loads = LoadProfile {
        annual_heating_energy: kwh(8_000.0),
        annual_cooling_energy: kwh(20_000.0),
        peak_heating_load: kw(5.0),
        peak_cooling_load: kw(15.0),
        heating_cop: 4.0,
        cooling_eer: 3.5,
        monthly_cooling_factors: DEFAULT_COOLING_FACTORS,
        ..reference_loads()
    };
    let limits = TemperatureLimits {
        min_fluid: celsius(-1.0),
        max_fluid: celsius(30.0),
        design_delta_t: kelvin_interval(3.0),
    };
    let layout = FieldLayout::line(2, m(6.0)).unwrap();

    let result = size(
        &ground,
        &reference_geometry(),
        &reference_pipe(),
        &reference_grout(),
        &reference_fluid(),
        &loads,
        &layout,
        SizingMethod::Normative,
        &limits,
        &SimulationSettings::default(),
    )
    .unwrap();
    assert_eq!(result.dominant_mode, DesignMode::Cooling);
    assert_eq!(result.iterations, 0);

    // The cooling case demands strictly more depth than the heating case.
    let outcome = solve_normative(
        &ground,
        &layout,
        &limits,
        &SimulationSettings::default(),
        m(0.076),
        result.borehole_resistance,
        &loads,
    )
    .unwrap();
    assert!(outcome.depth_cooling > outcome.depth_heating);
    assert!((outcome.depth_final - result.depth_per_borehole.value).abs() < 1e-9);
}

#[test]
fn required_depth_monotone_in_heating_energy_both_methods() {
    for method in [SizingMethod::Classical, SizingMethod::Normative] {
        let mut previous = 0.0;
        for annual in [8_000.0, 12_000.0, 16_000.0] {
            let result = size(
                &reference_ground(),
                &reference_geometry(),
                &reference_pipe(),
                &reference_grout(),
                &reference_fluid(),
                &LoadProfile::heating_only(kwh(annual), kw(6.0), 4.0),
                &FieldLayout::single(),
                method,
                &reference_limits(),
                &SimulationSettings::default(),
            )
            .unwrap();
            assert!(
                result.depth_per_borehole.value > previous,
                "{method:?} not monotone at {annual} kWh"
            );
            previous = result.depth_per_borehole.value;
        }
    }
}

#[test]
fn sizing_is_deterministic() {
    let run = || {
        size(
            &reference_ground(),
            &reference_geometry(),
            &reference_pipe(),
            &reference_grout(),
            &reference_fluid(),
            &reference_loads(),
            &FieldLayout::single(),
            SizingMethod::Classical,
            &reference_limits(),
            &SimulationSettings::default(),
        )
        .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn excessive_antifreeze_fraction_fails_validation() {
    let overdosed = FluidSpec {
        kind: AntifreezeKind::EthyleneGlycol,
        volume_fraction: 0.60,
    };
    let err = size(
        &reference_ground(),
        &reference_geometry(),
        &reference_pipe(),
        &reference_grout(),
        &overdosed,
        &reference_loads(),
        &FieldLayout::single(),
        SizingMethod::Classical,
        &reference_limits(),
        &SimulationSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SizingError::Validation { .. }), "{err}");
}

#[test]
fn undersized_borehole_fails_validation() {
    // 10 mm bore cannot take 32 mm pipes.
    let tiny = BoreholeGeometry::new(mm(10.0), PipeConfiguration::SingleU, mm(5.0)).unwrap();
    let err = size(
        &reference_ground(),
        &tiny,
        &reference_pipe(),
        &reference_grout(),
        &reference_fluid(),
        &reference_loads(),
        &FieldLayout::single(),
        SizingMethod::Classical,
        &reference_limits(),
        &SimulationSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SizingError::Validation { .. }), "{err}");
}

#[test]
fn empty_load_profile_fails_validation() {
    let empty = LoadProfile {
        annual_heating_energy: kwh(0.0),
        peak_heating_load: kw(0.0),
        ..reference_loads()
    };
    let err = size(
        &reference_ground(),
        &reference_geometry(),
        &reference_pipe(),
        &reference_grout(),
        &reference_fluid(),
        &empty,
        &FieldLayout::single(),
        SizingMethod::Classical,
        &reference_limits(),
        &SimulationSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SizingError::Validation { .. }));
}

#[test]
fn normative_and_classical_agree_on_dominance() {
    // Heating-only load must come out heating-dominant either way.
    for method in [SizingMethod::Classical, SizingMethod::Normative] {
        let result = size(
            &reference_ground(),
            &reference_geometry(),
            &reference_pipe(),
            &reference_grout(),
            &reference_fluid(),
            &reference_loads(),
            &FieldLayout::single(),
            method,
            &reference_limits(),
            &SimulationSettings::default(),
        )
        .unwrap();
        assert_eq!(result.dominant_mode, DesignMode::Heating);
    }
}
