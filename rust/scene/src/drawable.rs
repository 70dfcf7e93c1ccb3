// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plain data handed to renderers.

use std::sync::Arc;

use fngraph_geometry::{Mesh, Point3};

/// Linear RGBA, components in `[0, 1]`.
pub type Color = [f32; 4];

/// A straight segment in scene space.
pub type Segment = [Point3<f64>; 2];

/// Built geometry, shared between the cache and any drawables using it.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Triangle mesh (tubes, arrows, surfaces).
    Mesh(Mesh),
    /// Unlit line segments (grids).
    Lines(Vec<Segment>),
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Mesh(mesh) => mesh.is_empty(),
            Geometry::Lines(lines) => lines.is_empty(),
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            Geometry::Mesh(mesh) => Some(mesh),
            Geometry::Lines(_) => None,
        }
    }

    pub fn as_lines(&self) -> Option<&[Segment]> {
        match self {
            Geometry::Mesh(_) => None,
            Geometry::Lines(lines) => Some(lines),
        }
    }
}

/// Geometry plus the material a renderer needs to show it.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub geometry: Arc<Geometry>,
    pub color: Color,
    /// Name of the layer that produced it, for renderer-side grouping.
    pub layer: &'static str,
}

impl Drawable {
    pub fn new(geometry: Arc<Geometry>, color: Color, layer: &'static str) -> Self {
        Self {
            geometry,
            color,
            layer,
        }
    }

    /// Same geometry in a different color.
    pub fn recolored(&self, color: Color) -> Self {
        Self {
            geometry: Arc::clone(&self.geometry),
            color,
            layer: self.layer,
        }
    }
}
