// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tube meshes swept along polylines

use crate::mesh::Mesh;
use crate::primitives::sphere;
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

/// Radial segments for curve tubes
pub const DEFAULT_RADIAL_SEGMENTS: usize = 8;

/// Sweep a circle of `radius` along `points`.
///
/// Open tubes get flat end caps; closed tubes join the last ring back to the
/// first. Consecutive duplicate points are skipped. Fewer than two distinct
/// points give an empty mesh.
pub fn build_tube(
    points: &[Point3<f64>],
    radius: f64,
    radial_segments: usize,
    closed: bool,
) -> Mesh {
    let mut path: Vec<Point3<f64>> = Vec::with_capacity(points.len());
    for &p in points {
        if path.last().map_or(true, |last| (p - *last).norm() > f64::EPSILON) {
            path.push(p);
        }
    }
    if closed && path.len() > 2 && (path[0] - path[path.len() - 1]).norm() <= f64::EPSILON {
        path.pop();
    }
    if path.len() < 2 {
        return Mesh::new();
    }

    let segments = radial_segments.max(3);
    let n = path.len();
    let mut mesh = Mesh::with_capacity(n * segments + 2, n * segments * 6 + segments * 6);

    // Frames are carried from ring to ring by projecting the previous normal
    // onto the new ring plane, which keeps the tube from twisting.
    let mut prev_normal: Option<Vector3<f64>> = None;
    for i in 0..n {
        let tangent = tangent_at(&path, i, closed);
        let normal = match prev_normal {
            Some(prev) => (prev - tangent * prev.dot(&tangent))
                .try_normalize(f64::EPSILON)
                .unwrap_or_else(|| any_perpendicular(&tangent)),
            None => any_perpendicular(&tangent),
        };
        let binormal = tangent.cross(&normal);
        prev_normal = Some(normal);

        for j in 0..segments {
            let angle = TAU * j as f64 / segments as f64;
            let dir = normal * angle.cos() + binormal * angle.sin();
            mesh.add_vertex(path[i] + dir * radius, dir);
        }
    }

    let ring_count = if closed { n } else { n - 1 };
    for i in 0..ring_count {
        let base = (i * segments) as u32;
        let next_base = (((i + 1) % n) * segments) as u32;
        for j in 0..segments as u32 {
            let j_next = (j + 1) % segments as u32;
            mesh.add_triangle(base + j, next_base + j, next_base + j_next);
            mesh.add_triangle(base + j, next_base + j_next, base + j_next);
        }
    }

    if !closed {
        add_cap(&mut mesh, path[0], -tangent_at(&path, 0, false), 0, segments, true);
        add_cap(
            &mut mesh,
            path[n - 1],
            tangent_at(&path, n - 1, false),
            (n - 1) * segments,
            segments,
            false,
        );
    }

    mesh
}

/// Mesh for a drawn path: nothing for no points, a sphere for one point,
/// a tube otherwise
pub fn path_mesh(points: &[Point3<f64>], radius: f64) -> Option<Mesh> {
    match points {
        [] => None,
        [p] => Some(sphere(*p, radius, 15)),
        _ => Some(build_tube(points, radius, DEFAULT_RADIAL_SEGMENTS, false)),
    }
}

/// Polygon outline: a thin tube through `points` plus a sphere of radius
/// `radius * vertex_scale` on every vertex after the first
pub fn line_path_mesh(points: &[Point3<f64>], radius: f64, vertex_scale: f64) -> Mesh {
    let mut mesh = build_tube(points, radius, 16, false);
    for p in points.iter().skip(1) {
        mesh.merge(&sphere(*p, radius * vertex_scale, 16));
    }
    mesh
}

fn tangent_at(path: &[Point3<f64>], i: usize, closed: bool) -> Vector3<f64> {
    let n = path.len();
    let (prev, next) = if closed {
        (path[(i + n - 1) % n], path[(i + 1) % n])
    } else if i == 0 {
        (path[0], path[1])
    } else if i == n - 1 {
        (path[n - 2], path[n - 1])
    } else {
        (path[i - 1], path[i + 1])
    };
    (next - prev)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::x)
}

fn any_perpendicular(tangent: &Vector3<f64>) -> Vector3<f64> {
    let up = if tangent.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    tangent.cross(&up).normalize()
}

fn add_cap(
    mesh: &mut Mesh,
    center: Point3<f64>,
    normal: Vector3<f64>,
    ring_start: usize,
    segments: usize,
    start: bool,
) {
    let center_idx = mesh.add_vertex(center, normal);
    let ring = ring_start as u32;
    for j in 0..segments as u32 {
        let j_next = (j + 1) % segments as u32;
        if start {
            mesh.add_triangle(center_idx, ring + j_next, ring + j);
        } else {
            mesh.add_triangle(center_idx, ring + j, ring + j_next);
        }
    }
}
