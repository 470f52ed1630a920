//! Multi-borehole field interaction.
//!
//! The effective field response superposes, on top of the single-borehole
//! g-function, the line-source temperature response of every other
//! borehole at each borehole's location, averaged over the field. With a
//! single borehole the pair sum is empty and the field response reduces
//! exactly to the single-borehole response.

use crate::error::{GroundError, GroundResult};
use crate::layout::FieldLayout;
use crate::response::{SingleBorehole, expint_e1};
use bhx_core::units::Time;

/// Effective thermal response of a borehole field.
#[derive(Debug, Clone)]
pub struct FieldInteraction {
    single: SingleBorehole,
    diffusivity: f64,
    /// Pairwise distances d_ij for i ≠ j, each unordered pair counted twice.
    pair_distances: Vec<f64>,
    count: usize,
}

impl FieldInteraction {
    pub fn new(single: SingleBorehole, diffusivity: f64, layout: &FieldLayout) -> GroundResult<Self> {
        let coords = layout.coordinates();
        if coords.is_empty() {
            return Err(GroundError::Validation {
                what: "field layout has no boreholes",
            });
        }

        let mut pair_distances = Vec::with_capacity(coords.len() * (coords.len() - 1));
        for (i, &(xi, yi)) in coords.iter().enumerate() {
            for (j, &(xj, yj)) in coords.iter().enumerate() {
                if i == j {
                    continue;
                }
                let d = ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt();
                if d <= 0.0 {
                    return Err(GroundError::Validation {
                        what: "two boreholes share the same location",
                    });
                }
                pair_distances.push(d);
            }
        }

        Ok(Self {
            single,
            diffusivity,
            pair_distances,
            count: coords.len(),
        })
    }

    pub fn borehole_count(&self) -> usize {
        self.count
    }

    /// Effective g-function of the field at the given elapsed time.
    ///
    /// g_eff(t) = g_single(t) + (1/N) · Σ_{i≠j} ½·E₁(d_ij² / 4αt)
    pub fn effective_g_function(&self, elapsed: Time) -> f64 {
        let g_single = self.single.g_function(elapsed);
        if self.pair_distances.is_empty() || elapsed.value <= 0.0 {
            return g_single;
        }

        let four_alpha_t = 4.0 * self.diffusivity * elapsed.value;
        let interference: f64 = self
            .pair_distances
            .iter()
            .map(|d| {
                let u = d * d / four_alpha_t;
                // Distant boreholes have not been felt yet; E1 underflows
                // well before this cutoff matters physically.
                if u > 30.0 { 0.0 } else { 0.5 * expint_e1(u) }
            })
            .sum();

        g_single + interference / self.count as f64
    }
}
