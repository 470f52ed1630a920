//! Classical iterative depth sizing.
//!
//! Finds the shallowest depth at which the fluid temperature envelope
//! stays inside the operating limits over the simulation horizon. The
//! envelope superposes three ground-side load pulses (base, critical
//! month, peak) against the field response at their respective horizons,
//! plus the borehole-resistance drop at peak load.
//!
//! The search is an explicit state machine over the depth variable:
//! `Initializing → Evaluating → {Iterating, Converged, Failed}`, driven
//! by bisection on the binding temperature constraint.

use crate::config::{SimulationSettings, TemperatureLimits};
use crate::error::{Adjustment, SizingError, Stage};
use crate::loads::{DesignMode, GroundLoads, LoadProfile};
use bhx_core::units::constants::SECONDS_PER_YEAR;
use bhx_core::units::{Length, Temperature, hours, m, s, to_celsius};
use bhx_ground::{FieldInteraction, FieldLayout, GroundProperties, SingleBorehole};
use std::f64::consts::PI;
use std::time::Instant;
use tracing::debug;

/// Interval collapse below which bisection cannot make progress.
const MIN_BRACKET_M: f64 = 1e-4;

/// Phases of the depth search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Initializing,
    Evaluating,
    Iterating,
    Converged,
    Failed,
}

/// Converged classical sizing.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeOutcome {
    pub depth_per_borehole: f64,
    /// Fluid temperature envelope at the converged depth, °C.
    pub min_fluid_temperature: f64,
    pub max_fluid_temperature: f64,
    /// Which limit governed the depth.
    pub binding_mode: DesignMode,
    pub iterations: u32,
    /// Field g-values at the converged depth.
    pub g_long: f64,
    pub g_periodic: f64,
    pub g_peak: f64,
    /// Mean fluid temperature through the first operating year, °C.
    pub monthly_fluid_temperatures: [f64; 12],
}

/// Classical (Eskilson/Hellström) sizing solver.
pub struct IterativeSizingSolver<'a> {
    ground: &'a GroundProperties,
    layout: &'a FieldLayout,
    limits: &'a TemperatureLimits,
    settings: &'a SimulationSettings,
    borehole_radius_m: f64,
    r_b: f64,
    /// Ground-side loads per borehole.
    heating: GroundLoads,
    cooling: GroundLoads,
    /// Net monthly ground extraction per borehole, W.
    monthly_net_w: [f64; 12],
    freezing_point: Temperature,
}

struct Envelope {
    t_min: f64,
    t_max: f64,
    g_long: f64,
    g_periodic: f64,
    g_peak: f64,
}

impl<'a> IterativeSizingSolver<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ground: &'a GroundProperties,
        layout: &'a FieldLayout,
        limits: &'a TemperatureLimits,
        settings: &'a SimulationSettings,
        borehole_radius: Length,
        r_b: f64,
        loads: &LoadProfile,
        freezing_point: Temperature,
    ) -> Self {
        let n = layout.count() as f64;
        let heating = loads.ground_loads(DesignMode::Heating).scaled(1.0 / n);
        let cooling = loads.ground_loads(DesignMode::Cooling).scaled(1.0 / n);

        let month_seconds = SECONDS_PER_YEAR / 12.0;
        let annual_heat_j =
            loads.annual_heating_energy.value * loads.efficiency_factor(DesignMode::Heating) / n;
        let annual_cool_j =
            loads.annual_cooling_energy.value * loads.efficiency_factor(DesignMode::Cooling) / n;
        let mut monthly_net_w = [0.0; 12];
        for (i, slot) in monthly_net_w.iter_mut().enumerate() {
            let extraction = annual_heat_j * loads.monthly_heating_factors[i];
            let injection = annual_cool_j * loads.monthly_cooling_factors[i];
            *slot = (extraction - injection) / month_seconds;
        }

        Self {
            ground,
            layout,
            limits,
            settings,
            borehole_radius_m: borehole_radius.value,
            r_b,
            heating,
            cooling,
            monthly_net_w,
            freezing_point,
        }
    }

    /// Run the depth search to convergence or failure.
    pub fn solve(&self) -> Result<IterativeOutcome, SizingError> {
        let mut state = SolverState::Initializing;
        let started = Instant::now();
        debug!(?state, boreholes = self.layout.count(), "starting depth search");

        // Feasibility gates before any iteration: the envelope approaches
        // the undisturbed ground temperature as depth grows, and the brine
        // must stay liquid at the requested lower limit.
        let t_g = to_celsius(self.ground.undisturbed_temperature);
        let min_limit = to_celsius(self.limits.min_fluid);
        let max_limit = to_celsius(self.limits.max_fluid);
        if min_limit < to_celsius(self.freezing_point) {
            return Err(SizingError::PhysicalConstraint {
                stage: Stage::IterativeSolver,
                what: "lower fluid limit lies below the brine freezing point",
                adjustment: Adjustment::IncreaseAntifreeze,
            });
        }
        if self.extracts_heat() && min_limit >= t_g {
            return Err(SizingError::PhysicalConstraint {
                stage: Stage::IterativeSolver,
                what: "lower fluid limit at or above the undisturbed ground temperature",
                adjustment: Adjustment::WidenTemperatureLimits,
            });
        }
        if self.injects_heat() && max_limit <= t_g {
            return Err(SizingError::PhysicalConstraint {
                stage: Stage::IterativeSolver,
                what: "upper fluid limit at or below the undisturbed ground temperature",
                adjustment: Adjustment::WidenTemperatureLimits,
            });
        }

        let mut lo = self.settings.min_depth.value;
        let mut hi = self.settings.max_depth.value;
        let mut iterations = 0u32;

        // Constraints may already hold at the shallow end of the window.
        let env_lo = self.evaluate(lo)?;
        if self.violation(&env_lo) <= 0.0 {
            debug!(depth = lo, "temperature limits satisfied at minimum depth");
            return Ok(self.outcome(lo, env_lo, 1)?);
        }
        let env_hi = self.evaluate(hi)?;
        if self.violation(&env_hi) > self.settings.tolerance_k {
            return Err(SizingError::PhysicalConstraint {
                stage: Stage::IterativeSolver,
                what: "temperature limit still violated at the maximum depth",
                adjustment: Adjustment::AddBoreholes,
            });
        }

        // Seed from the specific-extraction heuristic, then bisect.
        let mut depth = self.seed_depth().clamp(lo, hi);
        state = SolverState::Evaluating;
        debug!(?state, seed = depth, "bracket established");

        loop {
            iterations += 1;
            if iterations > self.settings.max_iterations {
                state = SolverState::Failed;
                debug!(?state, iterations, "iteration cap exhausted");
                return Err(SizingError::Convergence {
                    stage: Stage::IterativeSolver,
                    iterations: iterations - 1,
                    what: "iteration cap reached before meeting tolerance",
                });
            }
            if let Some(budget) = self.settings.time_budget {
                // Cooperative cancellation point, once per iteration.
                if started.elapsed() > budget {
                    state = SolverState::Failed;
                    debug!(?state, iterations, "time budget exhausted");
                    return Err(SizingError::Convergence {
                        stage: Stage::IterativeSolver,
                        iterations,
                        what: "wall-clock budget exhausted",
                    });
                }
            }

            let envelope = self.evaluate(depth)?;
            let violation = self.violation(&envelope);
            debug!(
                depth,
                t_min = envelope.t_min,
                t_max = envelope.t_max,
                violation,
                "evaluated candidate depth"
            );

            if violation.abs() < self.settings.tolerance_k {
                state = SolverState::Converged;
                debug!(?state, depth, iterations, "depth search converged");
                return Ok(self.outcome(depth, envelope, iterations)?);
            }

            state = SolverState::Iterating;
            if violation > 0.0 {
                lo = depth;
            } else {
                hi = depth;
            }
            debug!(?state, lo, hi, "bracket narrowed");
            if hi - lo < MIN_BRACKET_M {
                return Err(SizingError::Convergence {
                    stage: Stage::IterativeSolver,
                    iterations,
                    what: "depth bracket collapsed without meeting tolerance",
                });
            }
            depth = 0.5 * (lo + hi);
        }
    }

    fn extracts_heat(&self) -> bool {
        self.heating.peak > 0.0 || self.heating.base > 0.0
    }

    fn injects_heat(&self) -> bool {
        self.cooling.peak > 0.0 || self.cooling.base > 0.0
    }

    /// Seed depth from the specific-extraction rule of thumb,
    /// q' ≈ 25 + 15·λ W/m at peak.
    fn seed_depth(&self) -> f64 {
        let q_spec = 25.0 + 15.0 * self.ground.conductivity.value;
        let governing = self.heating.peak.max(self.cooling.peak).max(1.0);
        governing / q_spec
    }

    /// Positive when some limit is violated at this depth.
    fn violation(&self, envelope: &Envelope) -> f64 {
        let under = to_celsius(self.limits.min_fluid) - envelope.t_min;
        let over = envelope.t_max - to_celsius(self.limits.max_fluid);
        under.max(over)
    }

    /// Fluid temperature envelope at a candidate depth.
    fn evaluate(&self, depth_m: f64) -> Result<Envelope, SizingError> {
        let alpha = self.ground.diffusivity();
        let single = SingleBorehole::new(m(depth_m), m(self.borehole_radius_m), alpha)?;
        let field = FieldInteraction::new(single, alpha, self.layout)?;

        let t_long = f64::from(self.settings.years) * SECONDS_PER_YEAR;
        let g_long = field.effective_g_function(s(t_long));
        let g_periodic = field.effective_g_function(hours(730.0));
        let g_peak = field.effective_g_function(hours(6.0));

        let lambda = self.ground.conductivity.value;
        let spread = 2.0 * PI * lambda * depth_m;
        let t_g = to_celsius(self.ground.undisturbed_temperature);

        // Heating envelope: long-term net drawdown, critical-month and
        // peak increments, and the resistance drop at peak extraction.
        let net_base_extraction = self.heating.base - self.cooling.base;
        let dt_heat = (net_base_extraction * g_long
            + (self.heating.periodic - net_base_extraction) * g_periodic
            + (self.heating.peak - self.heating.periodic) * g_peak)
            / spread
            + self.heating.peak * self.r_b / depth_m;

        // Cooling envelope, mirrored.
        let net_base_injection = self.cooling.base - self.heating.base;
        let dt_cool = (net_base_injection * g_long
            + (self.cooling.periodic - net_base_injection) * g_periodic
            + (self.cooling.peak - self.cooling.periodic) * g_peak)
            / spread
            + self.cooling.peak * self.r_b / depth_m;

        Ok(Envelope {
            t_min: t_g - dt_heat,
            t_max: t_g + dt_cool,
            g_long,
            g_periodic,
            g_peak,
        })
    }

    /// Mean fluid temperature per month of the first operating year.
    fn monthly_trace(&self, depth_m: f64) -> Result<[f64; 12], SizingError> {
        let alpha = self.ground.diffusivity();
        let single = SingleBorehole::new(m(depth_m), m(self.borehole_radius_m), alpha)?;
        let table = single.response_table(self.settings.years)?;

        let lambda = self.ground.conductivity.value;
        let t_g = to_celsius(self.ground.undisturbed_temperature);
        let month_seconds = SECONDS_PER_YEAR / 12.0;

        let mut trace = [0.0; 12];
        for (i, slot) in trace.iter_mut().enumerate() {
            let t_mid = (i as f64 + 0.5) * month_seconds;
            let g = table.interpolate(s(t_mid));
            let dt = self.monthly_net_w[i] * g / (2.0 * PI * lambda * depth_m);
            *slot = t_g - dt;
        }
        Ok(trace)
    }

    fn outcome(
        &self,
        depth_m: f64,
        envelope: Envelope,
        iterations: u32,
    ) -> Result<IterativeOutcome, SizingError> {
        let under = to_celsius(self.limits.min_fluid) - envelope.t_min;
        let over = envelope.t_max - to_celsius(self.limits.max_fluid);
        let binding_mode = if over > under {
            DesignMode::Cooling
        } else {
            DesignMode::Heating
        };
        Ok(IterativeOutcome {
            depth_per_borehole: depth_m,
            min_fluid_temperature: envelope.t_min,
            max_fluid_temperature: envelope.t_max,
            binding_mode,
            iterations,
            g_long: envelope.g_long,
            g_periodic: envelope.g_periodic,
            g_peak: envelope.g_peak,
            monthly_fluid_temperatures: self.monthly_trace(depth_m)?,
        })
    }
}

impl SolverState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SolverState::Converged | SolverState::Failed)
    }
}
