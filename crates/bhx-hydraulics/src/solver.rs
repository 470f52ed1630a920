//! Hydraulic operating point of the borehole circuit.

use crate::error::{HydraulicsError, HydraulicsResult};
use crate::flow::{FlowRegime, required_flow, reynolds_number};
use crate::friction::friction_factor;
use bhx_core::units::{
    Length, Power, Pressure, TempInterval, Velocity, VolumeRate, pa, watt,
};
use bhx_fluids::FluidProperties;
use std::f64::consts::PI;
use uom::si::velocity::meter_per_second;
use uom::si::volume_rate::cubic_meter_per_second;

/// Hydraulic circuit description.
///
/// One circuit is a supply/return loop down a borehole; circuits run in
/// parallel off a shared manifold. Minor losses (manifold, fittings,
/// bends) are lumped into a K-sum referred to the circuit velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircuitSpec {
    /// Parallel circuits across the whole field.
    pub circuits: u32,
    /// Inner diameter of the circuit piping.
    pub pipe_inner_diameter: Length,
    /// Absolute pipe roughness.
    pub roughness: Length,
    /// Horizontal header run per circuit, added to the down/up legs.
    pub header_length: Length,
    /// Sum of minor-loss coefficients per circuit.
    pub minor_loss_k: f64,
    /// Pump efficiency in (0, 1].
    pub pump_efficiency: f64,
}

impl CircuitSpec {
    pub fn validate(&self) -> HydraulicsResult<()> {
        if self.circuits == 0 {
            return Err(HydraulicsError::Validation {
                what: "circuit count must be positive",
            });
        }
        if self.pipe_inner_diameter.value <= 0.0 || !self.pipe_inner_diameter.value.is_finite() {
            return Err(HydraulicsError::Validation {
                what: "pipe inner diameter must be positive",
            });
        }
        if self.roughness.value < 0.0 || !self.roughness.value.is_finite() {
            return Err(HydraulicsError::Validation {
                what: "pipe roughness must be non-negative",
            });
        }
        if self.header_length.value < 0.0 {
            return Err(HydraulicsError::Validation {
                what: "header length must be non-negative",
            });
        }
        if !(0.0..=1.0).contains(&self.pump_efficiency) || self.pump_efficiency == 0.0 {
            return Err(HydraulicsError::Validation {
                what: "pump efficiency must be in (0, 1]",
            });
        }
        if self.minor_loss_k < 0.0 || !self.minor_loss_k.is_finite() {
            return Err(HydraulicsError::Validation {
                what: "minor loss coefficient must be non-negative",
            });
        }
        Ok(())
    }
}

/// Solved hydraulic operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HydraulicSummary {
    pub total_flow: VolumeRate,
    pub flow_per_circuit: VolumeRate,
    pub velocity: Velocity,
    pub reynolds: f64,
    pub regime: FlowRegime,
    pub friction_factor: f64,
    pub distributed_loss: Pressure,
    pub minor_loss: Pressure,
    pub total_pressure_drop: Pressure,
    pub pump_power: Power,
}

/// Solve the circuit for a design load and borehole depth.
///
/// The loop length per circuit is the down and up leg (2·H) plus the
/// horizontal header run.
pub fn solve(
    spec: &CircuitSpec,
    fluid: &FluidProperties,
    design_load: Power,
    design_delta_t: TempInterval,
    borehole_depth: Length,
) -> HydraulicsResult<HydraulicSummary> {
    spec.validate()?;
    if borehole_depth.value <= 0.0 || !borehole_depth.value.is_finite() {
        return Err(HydraulicsError::Validation {
            what: "borehole depth must be positive",
        });
    }

    let total_flow = required_flow(design_load, fluid, design_delta_t)?;
    let per_circuit = total_flow.value / f64::from(spec.circuits);
    if per_circuit <= 0.0 || !per_circuit.is_finite() {
        return Err(HydraulicsError::Validation {
            what: "flow per circuit must be positive",
        });
    }

    let d_i = spec.pipe_inner_diameter.value;
    let area = PI * d_i * d_i / 4.0;
    let velocity = per_circuit / area;

    let reynolds = reynolds_number(fluid, velocity, d_i);
    let regime = FlowRegime::classify(reynolds);
    let f = friction_factor(reynolds, spec.roughness.value / d_i);

    let loop_length = 2.0 * borehole_depth.value + spec.header_length.value;
    let dynamic_pressure = 0.5 * fluid.density.value * velocity * velocity;
    let dp_distributed = f * loop_length / d_i * dynamic_pressure;
    let dp_minor = spec.minor_loss_k * dynamic_pressure;
    let dp_total = dp_distributed + dp_minor;

    if !dp_total.is_finite() {
        return Err(HydraulicsError::NonPhysical {
            what: "system pressure drop",
        });
    }

    // Parallel circuits share the manifold pressure; pump power moves the
    // full flow against the per-circuit drop.
    let hydraulic_power = total_flow.value * dp_total;
    let pump_power = hydraulic_power / spec.pump_efficiency;

    Ok(HydraulicSummary {
        total_flow,
        flow_per_circuit: VolumeRate::new::<cubic_meter_per_second>(per_circuit),
        velocity: Velocity::new::<meter_per_second>(velocity),
        reynolds,
        regime,
        friction_factor: f,
        distributed_loss: pa(dp_distributed),
        minor_loss: pa(dp_minor),
        total_pressure_drop: pa(dp_total),
        pump_power: watt(pump_power),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhx_core::units::{kelvin_interval, kw, m, mm};
    use bhx_fluids::{AntifreezeKind, FluidSpec};

    fn brine() -> FluidProperties {
        FluidSpec::new(AntifreezeKind::EthyleneGlycol, 0.25)
            .unwrap()
            .properties()
            .unwrap()
    }

    fn spec() -> CircuitSpec {
        CircuitSpec {
            circuits: 1,
            pipe_inner_diameter: mm(26.2),
            roughness: mm(0.0015),
            header_length: m(50.0),
            minor_loss_k: 5.0,
            pump_efficiency: 0.5,
        }
    }

    #[test]
    fn single_circuit_operating_point() {
        let summary = solve(&spec(), &brine(), kw(6.0), kelvin_interval(3.0), m(100.0)).unwrap();
        assert_eq!(summary.regime, FlowRegime::Turbulent);
        assert!(summary.velocity.value > 0.5 && summary.velocity.value < 2.0);
        assert!(summary.total_pressure_drop.value > 1e3);
        assert!(summary.total_pressure_drop.value < 1e6);
        assert!(summary.pump_power.value > 0.0);
        assert!(summary.pump_power.value < 1_000.0);
    }

    #[test]
    fn splitting_flow_reduces_pressure_drop() {
        let one = solve(&spec(), &brine(), kw(12.0), kelvin_interval(3.0), m(100.0)).unwrap();
        let two = solve(
            &CircuitSpec {
                circuits: 2,
                ..spec()
            },
            &brine(),
            kw(12.0),
            kelvin_interval(3.0),
            m(100.0),
        )
        .unwrap();
        assert!((two.flow_per_circuit.value - one.flow_per_circuit.value / 2.0).abs() < 1e-9);
        assert!(two.total_pressure_drop < one.total_pressure_drop);
        assert!(two.pump_power < one.pump_power);
    }

    #[test]
    fn deeper_boreholes_cost_more_head() {
        let shallow = solve(&spec(), &brine(), kw(6.0), kelvin_interval(3.0), m(80.0)).unwrap();
        let deep = solve(&spec(), &brine(), kw(6.0), kelvin_interval(3.0), m(160.0)).unwrap();
        assert!(deep.total_pressure_drop > shallow.total_pressure_drop);
    }

    #[test]
    fn zero_circuits_rejected() {
        let bad = CircuitSpec {
            circuits: 0,
            ..spec()
        };
        let err = solve(&bad, &brine(), kw(6.0), kelvin_interval(3.0), m(100.0)).unwrap_err();
        assert!(matches!(err, HydraulicsError::Validation { .. }));
    }

    #[test]
    fn invalid_pump_efficiency_rejected() {
        let bad = CircuitSpec {
            pump_efficiency: 1.5,
            ..spec()
        };
        assert!(solve(&bad, &brine(), kw(6.0), kelvin_interval(3.0), m(100.0)).is_err());
    }

    #[test]
    fn negative_load_rejected() {
        assert!(solve(&spec(), &brine(), kw(-6.0), kelvin_interval(3.0), m(100.0)).is_err());
    }
}
