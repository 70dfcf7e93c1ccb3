// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arrow glyph meshes for slope fields

use crate::field::FieldSample;
use crate::mesh::Mesh;
use crate::primitives::{cone, cylinder, sphere};
use nalgebra::{Matrix4, Point3, Vector3};
use rayon::prelude::*;
use std::f64::consts::FRAC_PI_2;

// Unscaled arrow: 1.5 of shaft plus 0.5 of tip, two units long
const SHAFT_LENGTH: f64 = 1.5;
const TIP_LENGTH: f64 = 0.5;
const RAW_LENGTH: f64 = SHAFT_LENGTH + TIP_LENGTH;
const SHAFT_RADIUS: f64 = 0.04;
const TIP_RADIUS: f64 = 0.15;
const RADIAL_SEGMENTS: usize = 8;

/// Arrow of total `length` with its base at the origin, pointing along +y.
/// `thickness` scales the shaft and tip radii.
pub fn arrow_mesh(length: f64, thickness: f64) -> Mesh {
    let mut shaft = cylinder(SHAFT_RADIUS * thickness, SHAFT_LENGTH, RADIAL_SEGMENTS);
    shaft.transform(&Matrix4::new_translation(&Vector3::new(
        0.0,
        SHAFT_LENGTH / 2.0,
        0.0,
    )));

    let mut tip = cone(TIP_RADIUS * thickness, TIP_LENGTH, RADIAL_SEGMENTS);
    tip.transform(&Matrix4::new_translation(&Vector3::new(
        0.0,
        SHAFT_LENGTH + TIP_LENGTH / 2.0,
        0.0,
    )));

    let mut arrow = Mesh::new();
    arrow.merge_all(&[shaft, tip]);
    arrow.transform(&Matrix4::new_scaling(length / RAW_LENGTH));
    arrow
}

/// One arrow per defined sample, rotated to the sample's angle and based at
/// its position, merged into a single mesh. Each arrow carries a small
/// sphere at its base.
pub fn field_mesh(samples: &[FieldSample], arrow_length: f64, thickness: f64) -> Mesh {
    let mut template = arrow_mesh(arrow_length, thickness);
    template.merge(&sphere(Point3::origin(), 0.05 * arrow_length, 12));

    let glyphs: Vec<Mesh> = samples
        .par_iter()
        .filter(|s| s.defined)
        .map(|s| {
            let placement = Matrix4::new_translation(&s.position.coords)
                * Matrix4::from_axis_angle(&Vector3::z_axis(), s.angle - FRAC_PI_2);
            let mut glyph = template.clone();
            glyph.transform(&placement);
            glyph
        })
        .collect();

    let mut mesh = Mesh::new();
    mesh.merge_all(&glyphs);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Bounds;
    use crate::field::sample_field;
    use crate::polyline::flat_height;
    use approx::assert_relative_eq;

    #[test]
    fn test_arrow_spans_length_along_y() {
        let mesh = arrow_mesh(1.0, 1.0);
        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(max.y, 1.0, epsilon = 1e-6);
        assert!(max.x < 0.1);
    }

    #[test]
    fn test_horizontal_field_points_along_x() {
        let bounds = Bounds::new(0.0, 1.0, 0.0, 1.0).unwrap();
        let samples = sample_field(|_, _| 0.0, &bounds, 1.0, flat_height).unwrap();
        let mesh = field_mesh(&samples[..1], 1.0, 1.0);
        let (min, max) = mesh.bounds();
        assert_relative_eq!(max.x, 1.0, epsilon = 1e-5);
        assert!(min.x > -0.1);
        assert!(max.y < 0.1);
    }

    #[test]
    fn test_undefined_samples_are_skipped() {
        let bounds = Bounds::new(0.0, 2.0, 0.0, 1.0).unwrap();
        let samples = sample_field(
            |x, _| if x > 0.5 { f64::NAN } else { 1.0 },
            &bounds,
            1.0,
            flat_height,
        )
        .unwrap();
        let one = field_mesh(&samples[..1], 0.5, 1.0);
        let all = field_mesh(&samples, 0.5, 1.0);
        // only column i = 0 (two rows) is defined
        assert_eq!(all.vertex_count(), 2 * one.vertex_count());
    }
}
