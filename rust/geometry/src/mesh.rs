// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle mesh buffers handed to the renderer

use nalgebra::{Matrix4, Point3, Vector3};

/// Triangle mesh in renderer-ready flat buffers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz); may be empty until [`Mesh::calculate_normals`]
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Add a vertex with normal, returning its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions
            .extend_from_slice(&[position.x as f32, position.y as f32, position.z as f32]);
        self.normals
            .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
        index
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    /// Position of vertex `index` in f64
    #[inline]
    pub fn position(&self, index: usize) -> Point3<f64> {
        let p = &self.positions[index * 3..index * 3 + 3];
        Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)
    }

    /// Merge another mesh into this one
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    /// Merge many meshes, reserving once up front
    pub fn merge_all(&mut self, meshes: &[Mesh]) {
        let total_positions: usize = meshes.iter().map(|m| m.positions.len()).sum();
        let total_indices: usize = meshes.iter().map(|m| m.indices.len()).sum();

        self.positions.reserve(total_positions);
        self.normals.reserve(total_positions);
        self.indices.reserve(total_indices);

        for mesh in meshes {
            self.merge(mesh);
        }
    }

    /// Apply an affine transform to positions; normals use the inverse
    /// transpose and are renormalised
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for chunk in self.positions.chunks_exact_mut(3) {
            let p = matrix.transform_point(&Point3::new(
                chunk[0] as f64,
                chunk[1] as f64,
                chunk[2] as f64,
            ));
            chunk.copy_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        }

        if self.normals.is_empty() {
            return;
        }
        let Some(inverse) = matrix.try_inverse() else {
            tracing::debug!("Singular mesh transform, recomputing normals");
            self.calculate_normals();
            return;
        };
        let normal_matrix = inverse.transpose();
        for chunk in self.normals.chunks_exact_mut(3) {
            let n = normal_matrix.transform_vector(&Vector3::new(
                chunk[0] as f64,
                chunk[1] as f64,
                chunk[2] as f64,
            ));
            let n = n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
            chunk.copy_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
        }
    }

    /// Smooth per-vertex normals from area-weighted face normals.
    /// Vertices without any non-degenerate face get a zero normal.
    pub fn calculate_normals(&mut self) {
        let vertex_count = self.vertex_count();
        let mut normals = vec![Vector3::<f64>::zeros(); vertex_count];

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let v0 = self.position(i0);
            let face = (self.position(i1) - v0).cross(&(self.position(i2) - v0));
            normals[i0] += face;
            normals[i1] += face;
            normals[i2] += face;
        }

        self.normals.clear();
        self.normals.reserve(vertex_count * 3);
        for n in normals {
            let n = n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
            self.normals.extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
        }
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounds (min, max); the origin for an empty mesh
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);
        for chunk in self.positions.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(chunk[axis]);
                max[axis] = max[axis].max(chunk[axis]);
            }
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::zeros());
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::zeros());
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::zeros());
        mesh.add_triangle(a, b, c);
        mesh
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut mesh = unit_triangle();
        mesh.merge(&unit_triangle());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(&mesh.indices[3..], &[3, 4, 5]);

        let mut all = Mesh::new();
        all.merge_all(&[unit_triangle(), Mesh::new(), unit_triangle()]);
        assert_eq!(all.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_calculate_normals() {
        let mut mesh = unit_triangle();
        mesh.add_vertex(Point3::new(5.0, 5.0, 5.0), Vector3::zeros());
        mesh.calculate_normals();
        assert_eq!(&mesh.normals[..3], &[0.0, 0.0, 1.0]);
        // orphan vertex gets a zero normal, not NaN
        assert_eq!(&mesh.normals[9..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_transform_moves_positions_and_rotates_normals() {
        let mut mesh = unit_triangle();
        mesh.calculate_normals();
        let m = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::from_axis_angle(&Vector3::x_axis(), std::f64::consts::FRAC_PI_2);
        mesh.transform(&m);

        let p = mesh.position(2);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 4.0, epsilon = 1e-6);
        // +z normal rotated about x by 90 degrees points along -y
        assert_relative_eq!(mesh.normals[1], -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_bounds() {
        let (min, max) = unit_triangle().bounds();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 0.0));
    }
}
