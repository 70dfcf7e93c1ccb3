// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Slope field sampling for arrow glyphs

use crate::bounds::Bounds;
use crate::error::{check_sample_count, Error, Result};
use crate::polyline::GridCell;
use nalgebra::{Point2, Point3, Vector2};
use rayon::prelude::*;
use std::f64::consts::FRAC_PI_2;

/// Upper bound on the number of glyphs in one slope field
pub const MAX_FIELD_SAMPLES: usize = 250_000;

/// One glyph placement in a slope field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    pub cell: GridCell,
    /// Glyph anchor; z comes from the height function
    pub position: Point3<f64>,
    /// Raw value of the slope function
    pub slope: f64,
    /// Rotation of the unit tangent from the +x axis, in `[-π/2, π/2]`
    pub angle: f64,
    /// Unit tangent `(cos angle, sin angle)`
    pub direction: Vector2<f64>,
    /// Length of the tangent `(1, slope)`; infinite for vertical tangents
    pub magnitude: f64,
    /// False when the slope was NaN; such glyphs carry angle 0 and should not be drawn
    pub defined: bool,
}

/// Angle of the unit tangent `(1, m) / |(1, m)|` for slope `m`.
///
/// Vertical tangents (`±inf`) map to exactly `±π/2`. Returns `None` for NaN.
#[inline]
pub fn glyph_angle(slope: f64) -> Option<f64> {
    if slope.is_nan() {
        None
    } else if slope == f64::INFINITY {
        Some(FRAC_PI_2)
    } else if slope == f64::NEG_INFINITY {
        Some(-FRAC_PI_2)
    } else {
        // asin(m / sqrt(m² + 1)) == atan(m); atan avoids m² overflowing
        Some(slope.atan())
    }
}

/// Sample `slope` on the lattice of spacing `1 / density` anchored at the
/// lower-left corner of `bounds`.
///
/// Columns run `0..ceil(width / h)` and rows `0..=ceil(height / h)`. Output is
/// row-major by column index `i`, then `j`. Lattices above
/// [`MAX_FIELD_SAMPLES`] glyphs are rejected.
pub fn sample_field<F, H>(
    slope: F,
    bounds: &Bounds,
    density: f64,
    height: H,
) -> Result<Vec<FieldSample>>
where
    F: Fn(f64, f64) -> f64 + Sync,
    H: Fn(f64, f64) -> f64 + Sync,
{
    if !density.is_finite() || density <= 0.0 {
        return Err(Error::InvalidDensity(density));
    }
    bounds.validate()?;

    let spacing = 1.0 / density;
    let columns = (bounds.width() / spacing).ceil();
    let rows = (bounds.height() / spacing).ceil();
    check_sample_count("slope field", columns * (rows + 1.0), MAX_FIELD_SAMPLES)?;
    let (columns, rows) = (columns as i64, rows as i64);

    let samples: Vec<FieldSample> = (0..columns)
        .into_par_iter()
        .flat_map_iter(|i| {
            let slope = &slope;
            let height = &height;
            (0..=rows).map(move |j| {
                let x = bounds.x_min + i as f64 * spacing;
                let y = bounds.y_min + j as f64 * spacing;
                let m = slope(x, y);
                let (angle, defined) = match glyph_angle(m) {
                    Some(a) => (a, true),
                    None => (0.0, false),
                };
                FieldSample {
                    cell: GridCell {
                        i,
                        j,
                        position: Point2::new(x, y),
                    },
                    position: Point3::new(x, y, height(x, y)),
                    slope: m,
                    angle,
                    direction: Vector2::new(angle.cos(), angle.sin()),
                    magnitude: if defined { m.hypot(1.0) } else { 0.0 },
                    defined,
                }
            })
        })
        .collect();

    let undefined = samples.iter().filter(|s| !s.defined).count();
    if undefined > 0 {
        tracing::debug!(undefined, total = samples.len(), "Slope field has undefined samples");
    }

    Ok(samples)
}
