// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Function graph sampling with boundary clipping
//!
//! A graph `y = f(x)` is sampled on the lattice `x = i * step` and cut into
//! the pieces that stay inside the vertical bounds. Where a piece leaves or
//! re-enters the window, the crossing with `y_min`/`y_max` is estimated by
//! linear interpolation between the neighbouring samples, so every emitted
//! point lies inside the bounds.

use crate::bounds::Bounds;
use crate::error::{check_sample_count, check_step, Result};
use crate::polyline::{ComponentSet, PointSequence};
use nalgebra::Point2;

/// Upper bound on the number of lattice points one curve may sample
pub const MAX_CURVE_SAMPLES: usize = 1_000_000;

/// Sample `func` over `bounds` and split the graph into connected pieces.
///
/// Samples that are `NaN` or infinite count as out of range. Fails when the
/// step is not positive, the bounds are degenerate, or the lattice would
/// hold more than [`MAX_CURVE_SAMPLES`] points.
pub fn sample_curve<F>(func: F, bounds: &Bounds, step: f64) -> Result<ComponentSet>
where
    F: Fn(f64) -> f64,
{
    check_step(step)?;
    bounds.validate()?;

    let first = (bounds.x_min / step).floor();
    let last = (bounds.x_max / step).ceil();
    check_sample_count("curve", last - first + 1.0, MAX_CURVE_SAMPLES)?;
    let (first, last) = (first as i64, last as i64);

    let mut components = ComponentSet::new();
    let mut current: PointSequence = Vec::new();
    let mut last_outside: Option<Point2<f64>> = None;

    for i in first..=last {
        let x = i as f64 * step;
        let sample = Point2::new(x, func(x));

        if !bounds.contains_y(sample.y) {
            if let Some(&inside) = current.last() {
                if let Some(edge) = boundary_crossing(inside, sample, bounds) {
                    push_distinct(&mut current, edge);
                }
                components.push(std::mem::take(&mut current));
            }
            last_outside = Some(sample);
            continue;
        }

        if current.is_empty() {
            if let Some(outside) = last_outside {
                if let Some(edge) = boundary_crossing(sample, outside, bounds) {
                    current.push(edge);
                }
            }
        }
        push_distinct(&mut current, sample);
    }

    components.push(current);

    tracing::trace!(
        components = components.len(),
        points = components.point_count(),
        step,
        "Sampled function graph"
    );

    Ok(components)
}

/// Point where the segment from an in-range sample to an out-of-range one
/// crosses the horizontal edge it leaves through.
///
/// Infinite samples drop vertically onto the edge at the in-range x; `NaN`
/// samples have no crossing.
fn boundary_crossing(
    inside: Point2<f64>,
    outside: Point2<f64>,
    bounds: &Bounds,
) -> Option<Point2<f64>> {
    let edge = if outside.y > bounds.y_max {
        bounds.y_max
    } else if outside.y < bounds.y_min {
        bounds.y_min
    } else {
        return None;
    };

    if outside.y.is_infinite() {
        return Some(Point2::new(inside.x, edge));
    }

    // inside.y is within the bounds and outside.y is strictly past the edge,
    // so the denominator cannot vanish.
    let t = (edge - inside.y) / (outside.y - inside.y);
    Some(Point2::new(inside.x + t * (outside.x - inside.x), edge))
}

#[inline]
fn push_distinct(points: &mut PointSequence, p: Point2<f64>) {
    if points.last() != Some(&p) {
        points.push(p);
    }
}
