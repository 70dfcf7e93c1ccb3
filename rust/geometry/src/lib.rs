//! fngraph Geometry
//!
//! Sampling and mesh generation for function graphs: clipped curves, slope
//! fields, RK4 integral curves, square grid tilings and graph surfaces, using
//! nalgebra for points and transforms and rayon for lattice sampling.

pub mod error;
pub mod bounds;
pub mod polyline;
pub mod curve;
pub mod field;
pub mod integral;
pub mod tiling;
pub mod mesh;
pub mod primitives;
pub mod tube;
pub mod arrow;
pub mod surface;
pub mod line;
pub mod polygon;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};

pub use error::{Error, Result};
pub use bounds::Bounds;
pub use polyline::{flat_height, lift_points, ComponentSet, GridCell, PointSequence};
pub use curve::{sample_curve, MAX_CURVE_SAMPLES};
pub use field::{glyph_angle, sample_field, FieldSample, MAX_FIELD_SAMPLES};
pub use integral::{
    rk4_step, trace_integral_curve, try_trace_integral_curve, TraceDirection, MAX_TRACE_STEPS,
};
pub use tiling::{integer_division, tile_grid, GridTile, TileKind, MAX_GRID_TILES};
pub use mesh::Mesh;
pub use primitives::{cone, cylinder, frustum, sphere};
pub use tube::{build_tube, line_path_mesh, path_mesh, DEFAULT_RADIAL_SEGMENTS};
pub use arrow::{arrow_mesh, field_mesh};
pub use surface::function_surface_mesh;
pub use line::{Line2D, LineEquation};
pub use polygon::{regular_ngon_points, regular_ngon_symmetry_slopes};
