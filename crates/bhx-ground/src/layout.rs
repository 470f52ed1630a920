//! Borehole field layout generators.
//!
//! Layouts are pure plan-view geometry: each pattern produces a set of
//! borehole coordinates. The interaction physics downstream is
//! pattern-agnostic and only consumes the coordinate set.

use crate::error::{GroundError, GroundResult};
use bhx_core::units::{Area, Length, m};

/// Margin added around the borehole bounding box for the footprint figure.
const FOOTPRINT_MARGIN_M: f64 = 3.0;

/// Plan-view arrangement of the borehole field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutPattern {
    /// Full `count_x` × `count_y` grid.
    Rectangle,
    /// One full row plus one full column.
    LShape,
    /// One full row plus both end columns.
    UShape,
    /// Single row of `count_x` boreholes.
    Line,
}

/// Borehole field layout.
///
/// Setback to the property boundary is carried for the footprint figure
/// only; it does not enter the thermal model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldLayout {
    pub pattern: LayoutPattern,
    pub count_x: u32,
    pub count_y: u32,
    pub spacing_x: Length,
    pub spacing_y: Length,
    pub setback: Length,
}

impl FieldLayout {
    pub fn new(
        pattern: LayoutPattern,
        count_x: u32,
        count_y: u32,
        spacing_x: Length,
        spacing_y: Length,
        setback: Length,
    ) -> GroundResult<Self> {
        if count_x == 0 || count_y == 0 {
            return Err(GroundError::Validation {
                what: "layout counts must be at least 1",
            });
        }
        if !spacing_x.value.is_finite() || !spacing_y.value.is_finite() {
            return Err(GroundError::Validation {
                what: "borehole spacing must be finite",
            });
        }
        let layout = Self {
            pattern,
            count_x,
            count_y,
            spacing_x,
            spacing_y,
            setback,
        };
        if layout.count() > 1 && (spacing_x.value <= 0.0 || spacing_y.value <= 0.0) {
            return Err(GroundError::Validation {
                what: "borehole spacing must be positive for multi-borehole fields",
            });
        }
        Ok(layout)
    }

    /// Single isolated borehole.
    pub fn single() -> Self {
        Self {
            pattern: LayoutPattern::Line,
            count_x: 1,
            count_y: 1,
            spacing_x: m(6.0),
            spacing_y: m(6.0),
            setback: m(0.0),
        }
    }

    /// Straight row of `count` boreholes at the given spacing.
    pub fn line(count: u32, spacing: Length) -> GroundResult<Self> {
        Self::new(LayoutPattern::Line, count, 1, spacing, spacing, m(0.0))
    }

    /// Number of boreholes the pattern generates.
    pub fn count(&self) -> usize {
        self.coordinates().len()
    }

    /// Plan coordinates of every borehole, in meters.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        let nx = self.count_x as usize;
        let ny = self.count_y as usize;
        let sx = self.spacing_x.value;
        let sy = self.spacing_y.value;

        match self.pattern {
            LayoutPattern::Rectangle => {
                let mut coords = Vec::with_capacity(nx * ny);
                for j in 0..ny {
                    for i in 0..nx {
                        coords.push((i as f64 * sx, j as f64 * sy));
                    }
                }
                coords
            }
            LayoutPattern::LShape => {
                let mut coords = Vec::with_capacity(nx + ny - 1);
                for i in 0..nx {
                    coords.push((i as f64 * sx, 0.0));
                }
                for j in 1..ny {
                    coords.push((0.0, j as f64 * sy));
                }
                coords
            }
            LayoutPattern::UShape => {
                let mut coords = Vec::with_capacity(nx + 2 * (ny - 1));
                for i in 0..nx {
                    coords.push((i as f64 * sx, 0.0));
                }
                for j in 1..ny {
                    coords.push((0.0, j as f64 * sy));
                    if nx > 1 {
                        coords.push(((nx - 1) as f64 * sx, j as f64 * sy));
                    }
                }
                coords
            }
            LayoutPattern::Line => (0..nx).map(|i| (i as f64 * sx, 0.0)).collect(),
        }
    }

    /// Field footprint: bounding box of all boreholes plus a fixed margin.
    pub fn footprint_area(&self) -> Area {
        let coords = self.coordinates();
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in &coords {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        let width = (max_x - min_x) + 2.0 * FOOTPRINT_MARGIN_M;
        let height = (max_y - min_y) + 2.0 * FOOTPRINT_MARGIN_M;
        m(width) * m(height)
    }
}
