// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integral curves of `dy/dx = f(x, y)` by fixed-step RK4
//!
//! The step is fixed: halving it doubles the point count and shrinks the
//! global error by roughly 16x. The last step that would leave the bounds is
//! cut back to the boundary so the curve ends exactly on the window edge.

use crate::bounds::Bounds;
use crate::error::{check_step, Result};
use crate::polyline::PointSequence;
use nalgebra::Point2;

/// Hard cap on RK4 steps per direction
pub const MAX_TRACE_STEPS: usize = 1_000_000;

/// Which way to integrate from the initial point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum TraceDirection {
    /// Increasing x
    Forward,
    /// Decreasing x
    Backward,
    /// Both, joined at the initial point in increasing x order
    #[default]
    Both,
}

/// One classical RK4 step of size `h` (negative `h` steps backwards)
#[inline]
pub fn rk4_step<F>(slope: &F, p: Point2<f64>, h: f64) -> Point2<f64>
where
    F: Fn(f64, f64) -> f64,
{
    let half = h / 2.0;
    let k1 = slope(p.x, p.y);
    let k2 = slope(p.x + half, p.y + half * k1);
    let k3 = slope(p.x + half, p.y + half * k2);
    let k4 = slope(p.x + h, p.y + h * k3);
    Point2::new(p.x + h, p.y + h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4))
}

/// Trace the solution through `initial`.
///
/// Returns `Ok(None)` when the initial point is outside `bounds` or not
/// finite, and an error for a bad step size or degenerate bounds. Both
/// coordinates are checked, so a start above or below the window also
/// gives `None`.
pub fn try_trace_integral_curve<F>(
    slope: F,
    initial: Point2<f64>,
    bounds: &Bounds,
    step: f64,
    direction: TraceDirection,
) -> Result<Option<PointSequence>>
where
    F: Fn(f64, f64) -> f64,
{
    check_step(step)?;
    bounds.validate()?;

    if !bounds.contains(initial) {
        tracing::debug!(x = initial.x, y = initial.y, "Initial point outside bounds, no integral curve");
        return Ok(None);
    }

    let points = match direction {
        TraceDirection::Forward => {
            let mut points = vec![initial];
            points.extend(march(&slope, initial, bounds, step));
            points
        }
        TraceDirection::Backward => {
            let mut points = vec![initial];
            points.extend(march(&slope, initial, bounds, -step));
            points
        }
        TraceDirection::Both => {
            let mut points = march(&slope, initial, bounds, -step);
            points.reverse();
            points.push(initial);
            points.extend(march(&slope, initial, bounds, step));
            points
        }
    };

    Ok(Some(points))
}

/// Like [`try_trace_integral_curve`], folding invalid configuration into
/// "no result" after logging it.
pub fn trace_integral_curve<F>(
    slope: F,
    initial: Point2<f64>,
    bounds: &Bounds,
    step: f64,
    direction: TraceDirection,
) -> Option<PointSequence>
where
    F: Fn(f64, f64) -> f64,
{
    match try_trace_integral_curve(slope, initial, bounds, step, direction) {
        Ok(points) => points,
        Err(e) => {
            tracing::warn!(error = %e, "Integral curve not traced");
            None
        }
    }
}

/// Step from `start` until the curve leaves `bounds`, excluding `start`.
fn march<F>(slope: &F, start: Point2<f64>, bounds: &Bounds, h: f64) -> Vec<Point2<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    let mut points = Vec::new();
    let mut current = start;

    for n in 1..=MAX_TRACE_STEPS {
        let mut next = rk4_step(slope, current, h);
        // recompute x from the step count so long traces do not drift
        next.x = start.x + n as f64 * h;

        if !next.y.is_finite() {
            break;
        }
        if !bounds.contains(next) {
            let edge = exit_point(current, next, bounds);
            if edge != current {
                points.push(edge);
            }
            return points;
        }
        points.push(next);
        current = next;
    }

    if points.len() == MAX_TRACE_STEPS {
        tracing::warn!(steps = MAX_TRACE_STEPS, "Integral curve hit the step cap");
    }
    points
}

/// Where the segment from an inside point to an outside point first meets
/// the boundary.
fn exit_point(inside: Point2<f64>, outside: Point2<f64>, bounds: &Bounds) -> Point2<f64> {
    let axis_t = |from: f64, to: f64, min: f64, max: f64| {
        if to > max {
            (max - from) / (to - from)
        } else if to < min {
            (min - from) / (to - from)
        } else {
            1.0
        }
    };

    let t = axis_t(inside.x, outside.x, bounds.x_min, bounds.x_max)
        .min(axis_t(inside.y, outside.y, bounds.y_min, bounds.y_max))
        .clamp(0.0, 1.0);

    inside + (outside - inside) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    #[test]
    fn test_rk4_step_is_exact_for_cubic() {
        // dy/dx = 3x² integrates x³ exactly under RK4
        let p = rk4_step(&|x: f64, _y: f64| 3.0 * x * x, Point2::new(1.0, 1.0), 0.5);
        assert_relative_eq!(p.x, 1.5);
        assert_relative_eq!(p.y, 1.5f64.powi(3), epsilon = 1e-12);
    }

    #[test]
    fn test_exponential_growth_accuracy() {
        let bounds = Bounds::new(0.0, 1.0, 0.0, 10.0).unwrap();
        let pts = try_trace_integral_curve(
            |_x, y| y,
            Point2::new(0.0, 1.0),
            &bounds,
            0.01,
            TraceDirection::Forward,
        )
        .unwrap()
        .unwrap();
        let end = pts[pts.len() - 1];
        assert_relative_eq!(end.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(end.y, std::f64::consts::E, epsilon = 1e-8);
    }

    #[test]
    fn test_stops_on_y_boundary() {
        let bounds = Bounds::new(-10.0, 10.0, -2.0, 2.0).unwrap();
        let pts = trace_integral_curve(
            |_, _| 1.0,
            Point2::new(0.0, 0.0),
            &bounds,
            0.3,
            TraceDirection::Both,
        )
        .unwrap();
        let first = pts[0];
        let last = pts[pts.len() - 1];
        assert_relative_eq!(first.y, -2.0, epsilon = 1e-12);
        assert_relative_eq!(first.x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(last.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(last.x, 2.0, epsilon = 1e-12);
        assert!(pts.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn test_directions() {
        let bounds = Bounds::default();
        let start = Point2::new(1.0, 1.0);
        let forward =
            trace_integral_curve(|_, _| 0.0, start, &bounds, 1.0, TraceDirection::Forward).unwrap();
        let backward =
            trace_integral_curve(|_, _| 0.0, start, &bounds, 1.0, TraceDirection::Backward).unwrap();
        assert_eq!(forward[0], start);
        assert_eq!(backward[0], start);
        assert_relative_eq!(forward[forward.len() - 1].x, 10.0);
        assert_relative_eq!(backward[backward.len() - 1].x, -10.0);
        assert_eq!(forward.len(), 10);
        assert_eq!(backward.len(), 12);
    }

    #[test]
    fn test_initial_point_outside_is_none() {
        let bounds = Bounds::default();
        let out = try_trace_integral_curve(
            |_, _| 0.0,
            Point2::new(11.0, 0.0),
            &bounds,
            0.1,
            TraceDirection::Both,
        );
        assert_eq!(out, Ok(None));
        assert!(trace_integral_curve(
            |_, _| 0.0,
            Point2::new(f64::NAN, 0.0),
            &bounds,
            0.1,
            TraceDirection::Both
        )
        .is_none());
        // x in range, y above the window
        assert!(trace_integral_curve(
            |_, _| 0.0,
            Point2::new(0.0, 12.0),
            &bounds,
            0.1,
            TraceDirection::Forward
        )
        .is_none());
    }

    #[test]
    fn test_bad_step() {
        let bounds = Bounds::default();
        let out = try_trace_integral_curve(
            |_, _| 0.0,
            Point2::origin(),
            &bounds,
            0.0,
            TraceDirection::Both,
        );
        assert_eq!(out, Err(Error::InvalidStepSize(0.0)));
        assert!(trace_integral_curve(
            |_, _| 0.0,
            Point2::origin(),
            &bounds,
            -1.0,
            TraceDirection::Both
        )
        .is_none());
    }

    #[test]
    fn test_blow_up_stops_without_nan() {
        // y' = y² from y = 1 blows up at x = 1
        let bounds = Bounds::new(0.0, 5.0, 0.0, 1e300).unwrap();
        let pts = trace_integral_curve(
            |_, y| y * y,
            Point2::new(0.0, 1.0),
            &bounds,
            0.1,
            TraceDirection::Forward,
        )
        .unwrap();
        assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(pts[pts.len() - 1].x < 1.5);
    }
}
