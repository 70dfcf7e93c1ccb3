// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lines in the plane: equations, intercepts and reflections

use crate::bounds::Bounds;
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::tube::build_tube;
use nalgebra::{Point2, Point3, Vector2};
use std::f64::consts::PI;

/// Coefficients of `y * Y = x * X + c`.
///
/// Non-vertical lines are normalised to `y = 1`; vertical lines are
/// `{x: 1, y: 0, c}`, i.e. `X = -c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEquation {
    pub x: f64,
    pub y: f64,
    pub c: f64,
}

/// Infinite line through two distinct points, directed from `p1` to `p2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    p1: Point2<f64>,
    p2: Point2<f64>,
}

impl Line2D {
    pub fn through(p1: Point2<f64>, p2: Point2<f64>) -> Result<Self> {
        let finite = p1.iter().chain(p2.iter()).all(|v| v.is_finite());
        if !finite || p1 == p2 {
            return Err(Error::DegenerateLine);
        }
        Ok(Self { p1, p2 })
    }

    /// Line through `p` and the origin
    pub fn through_origin(p: Point2<f64>) -> Result<Self> {
        Self::through(p, Point2::origin())
    }

    /// Line through the origin with slope `m`; infinite slopes are vertical
    pub fn through_origin_with_slope(m: f64) -> Result<Self> {
        if m.is_infinite() {
            Self::through_origin(Point2::new(0.0, 1.0))
        } else {
            Self::through_origin(Point2::new(1.0, m))
        }
    }

    pub fn points(&self) -> (Point2<f64>, Point2<f64>) {
        (self.p1, self.p2)
    }

    /// Inclination in `[0, π)`
    pub fn angle(&self) -> f64 {
        let d = self.p2 - self.p1;
        d.y.atan2(d.x).rem_euclid(PI)
    }

    /// Unit vector from `p1` to `p2`
    pub fn direction(&self) -> Vector2<f64> {
        (self.p2 - self.p1).normalize()
    }

    pub fn equation(&self) -> LineEquation {
        let a = self.p2.x - self.p1.x;
        let b = self.p2.y - self.p1.y;
        let d = self.p1.y * a - self.p1.x * b;

        if a == 0.0 {
            LineEquation { x: 1.0, y: 0.0, c: d / b }
        } else {
            LineEquation { x: b / a, y: 1.0, c: d / a }
        }
    }

    /// Slope, `inf` for vertical lines
    pub fn slope(&self) -> f64 {
        if self.is_vertical() {
            f64::INFINITY
        } else {
            (self.p1.y - self.p2.y) / (self.p1.x - self.p2.x)
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.p1.x == self.p2.x
    }

    pub fn contains_origin(&self) -> bool {
        self.equation().c.abs() < 1e-12
    }

    /// x where the line meets `y = y0`.
    ///
    /// A horizontal line never meets other heights (`None`); lying on `y0`
    /// it reports `Some(0.0)`.
    pub fn x_intercept(&self, y0: f64) -> Option<f64> {
        let eq = self.equation();
        if eq.x == 0.0 {
            return (eq.c / eq.y == y0).then_some(0.0);
        }
        Some((eq.y * y0 - eq.c) / eq.x)
    }

    /// y where the line meets `x = x0`.
    ///
    /// A vertical line never meets other verticals (`None`); lying on `x0`
    /// it reports `Some(0.0)`.
    pub fn y_intercept(&self, x0: f64) -> Option<f64> {
        let eq = self.equation();
        if eq.y == 0.0 {
            return (eq.c / eq.x == -x0).then_some(0.0);
        }
        Some((eq.x * x0 + eq.c) / eq.y)
    }

    pub fn angle_within(&self, other: &Line2D, epsilon: f64) -> bool {
        (self.angle() - other.angle()).abs() < epsilon
    }

    /// Slope comparison that treats slopes steeper than `1 / epsilon` as
    /// matching a vertical line
    pub fn slope_within(&self, other: &Line2D, epsilon: f64) -> bool {
        let (m1, m2) = (self.slope(), other.slope());
        if epsilon == 0.0 {
            m1 == m2
        } else if m1.is_infinite() {
            m2.abs() > 1.0 / epsilon
        } else if m2.is_infinite() {
            m1.abs() > 1.0 / epsilon
        } else {
            (m1 - m2).abs() < epsilon
        }
    }

    /// Segment of the line spanning `bounds`: bottom to top for vertical
    /// lines, left to right otherwise
    pub fn clip_to_bounds(&self, bounds: &Bounds) -> [Point2<f64>; 2] {
        let eq = self.equation();
        if self.is_vertical() {
            let x = -eq.c;
            [Point2::new(x, bounds.y_min), Point2::new(x, bounds.y_max)]
        } else {
            let y_at = |x: f64| eq.x * x + eq.c;
            [
                Point2::new(bounds.x_min, y_at(bounds.x_min)),
                Point2::new(bounds.x_max, y_at(bounds.x_max)),
            ]
        }
    }

    /// Tube mesh of the segment inside `bounds`
    pub fn segment_mesh(&self, bounds: &Bounds, radius: f64) -> Mesh {
        let [a, b] = self.clip_to_bounds(bounds);
        build_tube(
            &[Point3::new(a.x, a.y, 0.0), Point3::new(b.x, b.y, 0.0)],
            radius,
            4,
            false,
        )
    }

    /// Mirror image of `p` across the line
    pub fn reflect_point(&self, p: Point2<f64>) -> Point2<f64> {
        let d = self.direction();
        let foot = self.p1 + d * (p - self.p1).dot(&d);
        foot + (foot - p)
    }
}
