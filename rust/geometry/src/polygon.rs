// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Regular polygons and their lines of symmetry

use crate::error::{Error, Result};
use crate::polyline::PointSequence;
use nalgebra::Point2;
use std::f64::consts::{FRAC_PI_2, TAU};

fn check_sides(n: usize) -> Result<()> {
    if n < 3 {
        return Err(Error::InvalidPolygon(format!(
            "a polygon needs at least 3 sides, got {}",
            n
        )));
    }
    Ok(())
}

/// Vertices of a regular `n`-gon of circumradius `size`, starting straight
/// up and running counter-clockwise. The first vertex is repeated at the end
/// so the outline is closed.
pub fn regular_ngon_points(n: usize, size: f64) -> Result<PointSequence> {
    check_sides(n)?;
    Ok((0..=n)
        .map(|i| {
            let theta = TAU * i as f64 / n as f64 + FRAC_PI_2;
            Point2::new(size * theta.cos(), size * theta.sin())
        })
        .collect())
}

/// Slopes of the `n` symmetry axes of a regular `n`-gon, the vertical axis
/// first.
///
/// Odd polygons have one axis per vertex. Even polygons alternate between
/// axes through edge midpoints and axes through vertices.
pub fn regular_ngon_symmetry_slopes(n: usize) -> Result<Vec<f64>> {
    let pts = regular_ngon_points(n, 1.0)?;
    let slope = |p: Point2<f64>| p.y / p.x;

    let mut slopes = vec![f64::INFINITY; n];
    if n % 2 == 0 {
        for i in 1..=n / 2 {
            slopes[2 * i - 1] = slope(nalgebra::center(&pts[i - 1], &pts[i]));
            if i < n / 2 {
                slopes[2 * i] = slope(pts[i]);
            }
        }
    } else {
        for i in 1..n {
            slopes[i] = slope(pts[i]);
        }
    }
    Ok(slopes)
}
