// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Primitive meshes used for markers and glyphs

use crate::mesh::Mesh;
use nalgebra::{Point3, Vector3};
use std::f64::consts::{PI, TAU};

/// UV sphere with `segments` slices around and `segments / 2` stacks
pub fn sphere(center: Point3<f64>, radius: f64, segments: usize) -> Mesh {
    let slices = segments.max(3);
    let stacks = (segments / 2).max(2);
    let mut mesh = Mesh::with_capacity((slices + 1) * (stacks + 1), slices * stacks * 6);

    for stack in 0..=stacks {
        let phi = PI * stack as f64 / stacks as f64;
        for slice in 0..=slices {
            let theta = TAU * slice as f64 / slices as f64;
            let normal = Vector3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.add_vertex(center + normal * radius, normal);
        }
    }

    let row = (slices + 1) as u32;
    for stack in 0..stacks as u32 {
        for slice in 0..slices as u32 {
            let a = stack * row + slice;
            let b = a + row;
            if stack != 0 {
                mesh.add_triangle(a, a + 1, b);
            }
            if stack != stacks as u32 - 1 {
                mesh.add_triangle(a + 1, b + 1, b);
            }
        }
    }

    mesh
}

/// Closed frustum along +y centred on the origin; `radius_top = 0` gives a cone
pub fn frustum(radius_top: f64, radius_bottom: f64, height: f64, radial_segments: usize) -> Mesh {
    let radial = radial_segments.max(3);
    let half = height / 2.0;
    let mut mesh = Mesh::with_capacity(2 * (radial + 1) + 2 * (radial + 1), radial * 12);

    // side slope for normals
    let slope = (radius_bottom - radius_top) / height;
    let side_base = mesh.vertex_count() as u32;
    for (y, r) in [(half, radius_top), (-half, radius_bottom)] {
        for i in 0..=radial {
            let theta = TAU * i as f64 / radial as f64;
            let (sin, cos) = theta.sin_cos();
            let normal = Vector3::new(sin, slope, cos).normalize();
            mesh.add_vertex(Point3::new(r * sin, y, r * cos), normal);
        }
    }
    let row = (radial + 1) as u32;
    for i in 0..radial as u32 {
        let top = side_base + i;
        let bottom = side_base + row + i;
        mesh.add_triangle(top, bottom, top + 1);
        mesh.add_triangle(bottom, bottom + 1, top + 1);
    }

    for (y, r, normal) in [
        (half, radius_top, Vector3::y()),
        (-half, radius_bottom, -Vector3::y()),
    ] {
        if r <= 0.0 {
            continue;
        }
        let center = mesh.add_vertex(Point3::new(0.0, y, 0.0), normal);
        let rim = mesh.vertex_count() as u32;
        for i in 0..=radial {
            let theta = TAU * i as f64 / radial as f64;
            mesh.add_vertex(Point3::new(r * theta.sin(), y, r * theta.cos()), normal);
        }
        for i in 0..radial as u32 {
            if normal.y > 0.0 {
                mesh.add_triangle(center, rim + i, rim + i + 1);
            } else {
                mesh.add_triangle(center, rim + i + 1, rim + i);
            }
        }
    }

    mesh
}

/// Closed cylinder along +y centred on the origin
pub fn cylinder(radius: f64, height: f64, radial_segments: usize) -> Mesh {
    frustum(radius, radius, height, radial_segments)
}

/// Cone along +y centred on the origin, apex at `+height / 2`
pub fn cone(radius: f64, height: f64, radial_segments: usize) -> Mesh {
    frustum(0.0, radius, height, radial_segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_vertices_on_surface() {
        let center = Point3::new(1.0, -2.0, 0.5);
        let mesh = sphere(center, 0.25, 16);
        assert!(mesh.triangle_count() > 0);
        for i in 0..mesh.vertex_count() {
            assert_relative_eq!((mesh.position(i) - center).norm(), 0.25, epsilon = 1e-6);
        }
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_cylinder_extent() {
        let mesh = cylinder(0.5, 2.0, 8);
        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.y, -1.0);
        assert_relative_eq!(max.y, 1.0);
        assert_relative_eq!(max.x, 0.5, epsilon = 1e-6);
        // side quads plus two caps
        assert_eq!(mesh.triangle_count(), 8 * 2 + 8 * 2);
    }

    #[test]
    fn test_cone_has_single_cap() {
        let mesh = cone(0.5, 1.0, 8);
        assert_eq!(mesh.triangle_count(), 8 * 2 + 8);
        let (_, max) = mesh.bounds();
        assert_relative_eq!(max.y, 0.5);
    }
}
