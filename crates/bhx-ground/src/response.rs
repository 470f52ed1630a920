//! Single-borehole ground step response (g-function).
//!
//! The response is a composite of two validated closed forms: the infinite
//! line source for short and medium times, capped at Eskilson's steady-state
//! finite-line value for long times. The cap is reached near the
//! characteristic time t_s = H²/(9α), which makes the composite continuous
//! and monotonically non-decreasing in elapsed time.

use crate::error::{GroundError, GroundResult};
use bhx_core::units::constants::{EULER_GAMMA, SECONDS_PER_HOUR, SECONDS_PER_YEAR};
use bhx_core::units::{Length, Time};
use rayon::prelude::*;

/// Number of log-spaced points in a generated response table.
const TABLE_POINTS: usize = 50;

/// Ground step-response model for a single vertical borehole.
#[derive(Debug, Clone, Copy)]
pub struct SingleBorehole {
    depth_m: f64,
    radius_m: f64,
    diffusivity: f64,
}

impl SingleBorehole {
    pub fn new(depth: Length, radius: Length, diffusivity: f64) -> GroundResult<Self> {
        if !(depth.value.is_finite() && depth.value > 0.0) {
            return Err(GroundError::Validation {
                what: "borehole depth must be positive",
            });
        }
        if !(radius.value.is_finite() && radius.value > 0.0) {
            return Err(GroundError::Validation {
                what: "borehole radius must be positive",
            });
        }
        if !(diffusivity.is_finite() && diffusivity > 0.0) {
            return Err(GroundError::Validation {
                what: "ground diffusivity must be positive",
            });
        }
        if depth.value <= 2.0 * radius.value {
            return Err(GroundError::Validation {
                what: "borehole depth must exceed its diameter",
            });
        }
        Ok(Self {
            depth_m: depth.value,
            radius_m: radius.value,
            diffusivity,
        })
    }

    /// Characteristic time t_s = H²/(9α), in seconds.
    pub fn characteristic_time(&self) -> f64 {
        self.depth_m * self.depth_m / (9.0 * self.diffusivity)
    }

    /// Eskilson's steady-state g-value, ln(H / 2 r_b).
    pub fn steady_state_g(&self) -> f64 {
        (self.depth_m / (2.0 * self.radius_m)).ln()
    }

    /// Dimensionless step response at the given elapsed time.
    ///
    /// Non-negative and non-decreasing in time; zero for non-positive
    /// elapsed time (no load applied yet).
    pub fn g_function(&self, elapsed: Time) -> f64 {
        self.g_at_seconds(elapsed.value)
    }

    pub(crate) fn g_at_seconds(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let ils = infinite_line_source(t, self.radius_m, self.diffusivity);
        ils.min(self.steady_state_g()).max(0.0)
    }

    /// Log-spaced response table from 1 hour to the simulation horizon.
    ///
    /// Independent time points, evaluated in parallel.
    pub fn response_table(&self, years: u32) -> GroundResult<ResponseTable> {
        if years == 0 {
            return Err(GroundError::Validation {
                what: "simulation horizon must be at least one year",
            });
        }
        let t_start = SECONDS_PER_HOUR;
        let t_end = f64::from(years) * SECONDS_PER_YEAR;
        let ts = self.characteristic_time();

        let log_start = t_start.ln();
        let log_step = (t_end.ln() - log_start) / (TABLE_POINTS - 1) as f64;

        let entries: Vec<(f64, f64)> = (0..TABLE_POINTS)
            .into_par_iter()
            .map(|i| {
                let t = (log_start + i as f64 * log_step).exp();
                ((t / ts).ln(), self.g_at_seconds(t))
            })
            .collect();

        // The composite response is monotone by construction; a violation
        // here means the model itself is broken.
        for w in entries.windows(2) {
            if w[1].1 < w[0].1 {
                return Err(GroundError::NonPhysical {
                    what: "g-function decreased with time",
                });
            }
        }

        Ok(ResponseTable { entries, ts })
    }
}

/// Infinite line source, g = ½·(ln(4αt/r²) − γ), clamped at zero.
pub(crate) fn infinite_line_source(t: f64, radius_m: f64, diffusivity: f64) -> f64 {
    let arg = 4.0 * diffusivity * t / (radius_m * radius_m);
    if arg <= 1.0 {
        return 0.0;
    }
    (0.5 * (arg.ln() - EULER_GAMMA)).max(0.0)
}

/// Tabulated g-values over ln(t/t_s), linearly interpolated per query.
#[derive(Debug, Clone)]
pub struct ResponseTable {
    entries: Vec<(f64, f64)>,
    ts: f64,
}

impl ResponseTable {
    /// Interpolated g-value at the given elapsed time.
    ///
    /// Queries outside the tabulated span clamp to the end values.
    pub fn interpolate(&self, elapsed: Time) -> f64 {
        if elapsed.value <= 0.0 {
            return 0.0;
        }
        let x = (elapsed.value / self.ts).ln();
        bhx_core::numeric::lerp_table(&self.entries, x)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Temperature change at the borehole wall for a sustained load.
///
/// ΔT = (Q/H) · g / (2πλ); positive load means injection into the ground.
pub fn temperature_penalty(load_w: f64, conductivity: f64, depth_m: f64, g_value: f64) -> f64 {
    if depth_m <= 0.0 || conductivity <= 0.0 {
        return 0.0;
    }
    let q_per_meter = load_w / depth_m;
    q_per_meter * g_value / (2.0 * std::f64::consts::PI * conductivity)
}

/// Exponential integral E₁(x) for x > 0.
///
/// Abramowitz & Stegun 5.1.53 (series branch, x ≤ 1) and 5.1.56 (rational
/// branch, x > 1); absolute error below 5·10⁻⁵ over the full range.
pub fn expint_e1(x: f64) -> f64 {
    debug_assert!(x > 0.0);
    if x <= 1.0 {
        let a = [
            -0.577_215_66,
            0.999_991_93,
            -0.249_910_55,
            0.055_199_68,
            -0.009_760_04,
            0.001_078_57,
        ];
        let poly = a[0] + x * (a[1] + x * (a[2] + x * (a[3] + x * (a[4] + x * a[5]))));
        poly - x.ln()
    } else {
        let num = x * x + 2.334_733 * x + 0.250_621;
        let den = x * x + 3.330_657 * x + 1.681_534;
        (num / den) * (-x).exp() / x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhx_core::units::{hours, m, s};

    fn borehole() -> SingleBorehole {
        // 100 m deep, 152 mm bore, λ=1.8 / c=2.4e6
        SingleBorehole::new(m(100.0), m(0.076), 7.5e-7).unwrap()
    }

    #[test]
    fn g_is_zero_before_load() {
        assert_eq!(borehole().g_function(s(0.0)), 0.0);
        assert_eq!(borehole().g_function(s(-10.0)), 0.0);
    }

    #[test]
    fn g_monotone_over_25_years() {
        let b = borehole();
        let mut prev = 0.0;
        // hourly through daily through yearly scales
        for &t in &[
            3.6e3, 2.16e4, 8.64e4, 6.05e5, 2.63e6, 3.16e7, 1.58e8, 7.88e8,
        ] {
            let g = b.g_function(s(t));
            assert!(g >= prev, "g decreased at t={t}");
            prev = g;
        }
    }

    #[test]
    fn g_saturates_at_steady_state() {
        let b = borehole();
        let g_late = b.g_function(s(1e12));
        assert!((g_late - b.steady_state_g()).abs() < 1e-12);
    }

    #[test]
    fn six_hour_g_matches_line_source() {
        let b = borehole();
        let t = 6.0 * 3600.0;
        // 4αt/r² = 11.22 → g = ½(ln 11.22 − γ) ≈ 0.921
        let g = b.g_function(s(t));
        assert!((g - 0.921).abs() < 0.01, "g(6h) = {g}");
    }

    #[test]
    fn table_interpolation_matches_direct_evaluation() {
        let b = borehole();
        let table = b.response_table(25).unwrap();
        assert_eq!(table.len(), 50);
        for &t in &[7.2e3, 8.64e4, 2.63e6, 3.16e7] {
            let direct = b.g_function(s(t));
            let interp = table.interpolate(s(t));
            assert!(
                (direct - interp).abs() < 0.05,
                "t={t}: direct={direct}, interp={interp}"
            );
        }
    }

    #[test]
    fn table_rejects_zero_horizon() {
        assert!(borehole().response_table(0).is_err());
    }

    #[test]
    fn penalty_scales_inversely_with_depth() {
        let shallow = temperature_penalty(4500.0, 1.8, 100.0, 1.0);
        let deep = temperature_penalty(4500.0, 1.8, 200.0, 1.0);
        assert!((shallow - 2.0 * deep).abs() < 1e-12);
        // 45 W/m at g=1: ΔT = 45/(2π·1.8) ≈ 3.98 K
        assert!((shallow - 3.979).abs() < 0.01);
    }

    #[test]
    fn expint_known_values() {
        // E1(1) = 0.219384, E1(0.5) = 0.559774, E1(2) = 0.048901
        assert!((expint_e1(1.0) - 0.219384).abs() < 1e-4);
        assert!((expint_e1(0.5) - 0.559774).abs() < 1e-4);
        assert!((expint_e1(2.0) - 0.048901).abs() < 1e-4);
    }

    #[test]
    fn expint_small_argument_diverges_like_log() {
        // E1(x) → −γ − ln x as x → 0
        let x = 1e-6f64;
        let expected = -EULER_GAMMA - x.ln();
        assert!((expint_e1(x) - expected).abs() < 1e-4);
    }

    #[test]
    fn rejects_degenerate_geometry() {
        assert!(SingleBorehole::new(m(0.0), m(0.076), 7.5e-7).is_err());
        assert!(SingleBorehole::new(m(100.0), m(-1.0), 7.5e-7).is_err());
        assert!(SingleBorehole::new(m(0.1), m(0.076), 7.5e-7).is_err());
    }

    #[test]
    fn hour_constructor_matches_seconds() {
        let b = borehole();
        assert_eq!(b.g_function(hours(6.0)), b.g_function(s(21_600.0)));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn g_never_decreases(t in 1e3f64..1e9, factor in 1.0f64..100.0) {
                let b = borehole();
                prop_assert!(b.g_function(s(t * factor)) >= b.g_function(s(t)));
            }

            #[test]
            fn g_bounded_by_steady_state(t in 1e3f64..1e12) {
                let b = borehole();
                let g = b.g_function(s(t));
                prop_assert!((0.0..=b.steady_state_g()).contains(&g));
            }

            #[test]
            fn expint_positive_and_decreasing(x in 1e-4f64..20.0) {
                let e = expint_e1(x);
                prop_assert!(e > 0.0);
                prop_assert!(expint_e1(x * 1.5) < e);
            }
        }
    }
}
