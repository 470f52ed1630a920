//! Darcy friction factor.

use crate::flow::RE_LAMINAR_LIMIT;

/// Fixed-point iterations for the Colebrook-White equation; the
/// Swamee-Jain seed converges in a handful of steps.
const COLEBROOK_ITERATIONS: usize = 20;
const COLEBROOK_TOL: f64 = 1e-8;

/// Darcy friction factor for pipe flow.
///
/// Laminar: 64/Re. Above the laminar limit: Colebrook-White, solved by
/// fixed-point iteration on 1/√f seeded with the Swamee-Jain explicit
/// approximation. The transitional band uses the turbulent correlation.
pub fn friction_factor(reynolds: f64, relative_roughness: f64) -> f64 {
    debug_assert!(reynolds > 0.0);
    debug_assert!(relative_roughness >= 0.0);

    if reynolds < RE_LAMINAR_LIMIT {
        return 64.0 / reynolds;
    }

    // Swamee-Jain seed
    let a = relative_roughness / 3.7;
    let b = 5.74 / reynolds.powf(0.9);
    let mut f = 0.25 / (a + b).log10().powi(2);

    // Colebrook-White: 1/√f = −2·log10(ε/(3.7·D) + 2.51/(Re·√f))
    for _ in 0..COLEBROOK_ITERATIONS {
        let inv_sqrt = -2.0 * (a + 2.51 / (reynolds * f.sqrt())).log10();
        let f_next = 1.0 / (inv_sqrt * inv_sqrt);
        if (f_next - f).abs() < COLEBROOK_TOL {
            return f_next.max(1e-4);
        }
        f = f_next;
    }

    f.max(1e-4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laminar_is_64_over_re() {
        assert!((friction_factor(1_600.0, 0.0) - 0.04).abs() < 1e-12);
    }

    #[test]
    fn smooth_pipe_turbulent_value() {
        // Smooth pipe at Re = 1e5: Colebrook gives f ≈ 0.018
        let f = friction_factor(1e5, 0.0);
        assert!((f - 0.018).abs() < 0.001, "f = {f}");
    }

    #[test]
    fn rough_pipe_has_higher_friction() {
        let smooth = friction_factor(5e4, 1e-6);
        let rough = friction_factor(5e4, 1e-3);
        assert!(rough > smooth);
    }

    #[test]
    fn friction_decreases_with_reynolds_when_smooth() {
        let f1 = friction_factor(1e4, 1e-6);
        let f2 = friction_factor(1e6, 1e-6);
        assert!(f2 < f1);
    }

    #[test]
    fn colebrook_agrees_with_swamee_jain_seed() {
        // Both correlations should land within a few percent of each other.
        let re: f64 = 23_000.0;
        let e_d = 5.7e-5;
        let a = e_d / 3.7;
        let b = 5.74 / re.powf(0.9);
        let swamee = 0.25 / (a + b).log10().powi(2);
        let colebrook = friction_factor(re, e_d);
        assert!(((colebrook - swamee) / swamee).abs() < 0.05);
    }
}
