// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use fngraph_geometry::{tile_grid, Bounds, Point2, Point3};

use super::{Layer, LayerSlot};
use crate::config::GridStyle;
use crate::drawable::{Color, Geometry, Segment};
use crate::error::Result;
use crate::fingerprint::{Fingerprint, FingerprintBuilder};

/// Square tiling of a `width × length` rectangle, drawn as grid lines.
/// The rectangle is independent of the view bounds.
pub struct GridLayer {
    length: f64,
    width: f64,
    origin: Point2<f64>,
    pub style: GridStyle,
    slot: LayerSlot,
}

impl GridLayer {
    pub fn new(length: f64, width: f64, origin: Point2<f64>, style: GridStyle) -> Self {
        Self {
            length,
            width,
            origin,
            style,
            slot: LayerSlot::default(),
        }
    }

    pub fn set_dimensions(&mut self, length: f64, width: f64) {
        self.length = length;
        self.width = width;
    }

    pub fn set_origin(&mut self, origin: Point2<f64>) {
        self.origin = origin;
    }

    pub fn dimensions(&self) -> (f64, f64) {
        (self.length, self.width)
    }
}

impl Layer for GridLayer {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn is_visible(&self) -> bool {
        self.style.visible
    }

    fn color(&self) -> Color {
        self.style.color
    }

    fn geometry_fingerprint(&self, _bounds: &Bounds) -> Fingerprint {
        FingerprintBuilder::new("grid")
            .f64(self.length)
            .f64(self.width)
            .point(self.origin)
            .f64(self.style.division)
            .finish()
    }

    fn build(&self, _bounds: &Bounds) -> Result<Option<Geometry>> {
        let tiles = tile_grid(self.length, self.width, self.origin)?;
        let segments: Vec<Segment> = tiles
            .iter()
            .flat_map(|tile| tile.lines(self.style.division))
            .map(|[a, b]| [Point3::new(a.x, a.y, 0.0), Point3::new(b.x, b.y, 0.0)])
            .collect();
        tracing::debug!(tiles = tiles.len(), segments = segments.len(), "Grid tiled");
        Ok((!segments.is_empty()).then_some(Geometry::Lines(segments)))
    }

    fn slot(&self) -> &LayerSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut LayerSlot {
        &mut self.slot
    }
}
