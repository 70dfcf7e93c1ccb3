// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graph surfaces `z = f(x, y)`

use crate::bounds::Bounds;
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

/// Triangulate the graph of `func` over `bounds` on a `mesh_size × mesh_size`
/// cell grid with smooth normals.
///
/// Cells touching a non-finite height are left out.
pub fn function_surface_mesh<F>(func: F, bounds: &Bounds, mesh_size: usize) -> Result<Mesh>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    if mesh_size == 0 {
        return Err(Error::InvalidDimensions(
            "surface mesh needs at least one cell per side".to_string(),
        ));
    }
    bounds.validate()?;

    let n = mesh_size;
    let dx = bounds.width() / n as f64;
    let dy = bounds.height() / n as f64;

    // row-major heights, v (y) outer and u (x) inner
    let heights: Vec<f64> = (0..=n)
        .into_par_iter()
        .flat_map_iter(|v| {
            let func = &func;
            let y = bounds.y_min + v as f64 * dy;
            (0..=n).map(move |u| func(bounds.x_min + u as f64 * dx, y))
        })
        .collect();

    let row = n + 1;
    let mut mesh = Mesh::with_capacity(row * row, n * n * 6);
    for v in 0..=n {
        for u in 0..=n {
            let z = heights[v * row + u];
            let z = if z.is_finite() { z } else { 0.0 };
            mesh.add_vertex(
                Point3::new(bounds.x_min + u as f64 * dx, bounds.y_min + v as f64 * dy, z),
                Vector3::zeros(),
            );
        }
    }

    let mut skipped = 0usize;
    for v in 0..n {
        for u in 0..n {
            let a = v * row + u;
            let corners = [a, a + 1, a + row, a + row + 1];
            if corners.iter().any(|&c| !heights[c].is_finite()) {
                skipped += 1;
                continue;
            }
            let [a, b, c, d] = corners.map(|c| c as u32);
            mesh.add_triangle(a, b, d);
            mesh.add_triangle(a, d, c);
        }
    }

    if mesh.triangle_count() == 0 {
        return Err(Error::EmptyMesh(
            "surface has no finite cells inside the bounds".to_string(),
        ));
    }
    if skipped > 0 {
        tracing::debug!(skipped, cells = n * n, "Surface cells with non-finite heights left out");
    }

    mesh.calculate_normals();
    Ok(mesh)
}
