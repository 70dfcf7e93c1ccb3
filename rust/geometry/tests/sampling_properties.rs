// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end properties of the samplers through the public API.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use fngraph_geometry::{
    glyph_angle, sample_curve, sample_field, tile_grid, trace_integral_curve, Bounds, Point2,
    TileKind, TraceDirection,
};
use std::f64::consts::FRAC_PI_2;

const EPS: f64 = 1e-9;

fn assert_inside(bounds: &Bounds, p: &Point2<f64>) {
    assert!(p.x >= bounds.x_min - EPS && p.x <= bounds.x_max + EPS, "x out of range: {p:?}");
    assert!(p.y >= bounds.y_min - EPS && p.y <= bounds.y_max + EPS, "y out of range: {p:?}");
}

#[test]
fn curves_never_leave_the_window() {
    let bounds = Bounds::default();
    let functions: [fn(f64) -> f64; 4] = [
        |x| x * x * x,
        |x| 1.0 / x,
        |x| x.tan(),
        |x| (x * 3.0).exp() - 5.0,
    ];
    for f in functions {
        let components = sample_curve(f, &bounds, 0.05).unwrap();
        for component in &components {
            for p in component {
                assert_inside(&bounds, p);
            }
        }
    }
}

#[test]
fn constant_curve_is_one_full_component() {
    let bounds = Bounds::default();
    let components = sample_curve(|_| 3.0, &bounds, 0.1).unwrap();
    assert_eq!(components.len(), 1);
    let c = &components[0];
    assert_relative_eq!(c[0].x, -10.0, epsilon = 1e-9);
    assert_relative_eq!(c[c.len() - 1].x, 10.0, epsilon = 1e-9);
    assert!(c.iter().all(|p| p.y == 3.0));
}

#[test]
fn hyperbola_splits_and_clips_at_the_edges() {
    let bounds = Bounds::default();
    let components = sample_curve(|x| 1.0 / x, &bounds, 0.01).unwrap();
    assert!(components.len() >= 2);

    let clipped_ends: Vec<f64> = components
        .iter()
        .flat_map(|c| [c[0].y, c[c.len() - 1].y])
        .filter(|y| y.abs() > 9.0)
        .collect();
    assert!(clipped_ends.iter().any(|&y| (y - 10.0).abs() < 1e-9));
    assert!(clipped_ends.iter().any(|&y| (y + 10.0).abs() < 1e-9));
}

#[test]
fn zero_slope_integral_is_flat_across_the_window() {
    let bounds = Bounds::default();
    let points = trace_integral_curve(
        |_, _| 0.0,
        Point2::new(0.0, 5.0),
        &bounds,
        0.01,
        TraceDirection::Both,
    )
    .unwrap();

    assert!(points.iter().all(|p| p.y == 5.0));
    assert_relative_eq!(points[0].x, -10.0, epsilon = 1e-9);
    assert_relative_eq!(points[points.len() - 1].x, 10.0, epsilon = 1e-9);
    assert!(points.windows(2).all(|w| w[0].x < w[1].x));
}

#[test]
fn integral_from_outside_is_none() {
    let bounds = Bounds::default();
    for start in [
        Point2::new(11.0, 0.0),
        Point2::new(0.0, -11.0),
        Point2::new(f64::NAN, 0.0),
    ] {
        assert!(
            trace_integral_curve(|x, y| x + y, start, &bounds, 0.01, TraceDirection::Both)
                .is_none()
        );
    }
}

#[test]
fn integral_curve_stays_inside() {
    let bounds = Bounds::new(-3.0, 3.0, -2.0, 2.0).unwrap();
    let points = trace_integral_curve(
        |x, y| x * x - y,
        Point2::new(0.0, 0.5),
        &bounds,
        0.02,
        TraceDirection::Both,
    )
    .unwrap();
    for p in &points {
        assert_inside(&bounds, p);
    }
}

#[test]
fn tiling_three_by_thirteen() {
    let tiles = tile_grid(3.0, 13.0, Point2::origin()).unwrap();
    let squares: Vec<_> = tiles.iter().filter(|t| t.is_square()).collect();
    assert_eq!(squares.len(), 4);
    assert!(squares.iter().all(|t| t.size_x == 3.0 && t.size_y == 3.0));

    let remainders: Vec<_> = tiles
        .iter()
        .filter(|t| matches!(t.kind, TileKind::Remainder(_)))
        .collect();
    assert_eq!(remainders.len(), 1);
    assert_eq!((remainders[0].size_x, remainders[0].size_y), (1.0, 3.0));
    assert_eq!(remainders[0].origin, Point2::new(12.0, 0.0));

    let area: f64 = tiles
        .iter()
        .flat_map(|t| t.squares())
        .map(|s| s.size_x * s.size_y)
        .sum();
    assert_abs_diff_eq!(area, 39.0, epsilon = 1e-9);
}

#[test]
fn vertical_slope_field_has_no_nan() {
    let bounds = Bounds::new(0.0, 2.0, 0.0, 2.0).unwrap();
    let samples = sample_field(|_, _| f64::INFINITY, &bounds, 1.0, |_, _| 0.0).unwrap();
    assert!(!samples.is_empty());
    for s in &samples {
        assert_eq!(s.angle, FRAC_PI_2);
        assert!(s.direction.x.is_finite() && s.direction.y.is_finite());
        assert!(s.defined);
    }
    assert_eq!(glyph_angle(f64::NEG_INFINITY), Some(-FRAC_PI_2));
}
