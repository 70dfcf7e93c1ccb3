// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use fngraph_geometry::{field_mesh, sample_field, Bounds};

use super::{non_empty_mesh, Height, Layer, LayerSlot};
use crate::config::FieldStyle;
use crate::drawable::{Color, Geometry};
use crate::error::Result;
use crate::fingerprint::{Fingerprint, FingerprintBuilder};
use crate::keys::FunctionId;

/// Arrow glyphs for the slope field of `dy/dx = f(x, y)`.
pub struct FieldLayer<F> {
    function: FunctionId,
    func: F,
    height: Height,
    pub style: FieldStyle,
    slot: LayerSlot,
}

impl<F> FieldLayer<F>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    pub fn new(function: FunctionId, func: F, style: FieldStyle) -> Self {
        Self {
            function,
            func,
            height: Height::flat(),
            style,
            slot: LayerSlot::default(),
        }
    }

    pub fn set_function(&mut self, function: FunctionId, func: F) {
        self.function = function;
        self.func = func;
    }

    /// Place arrows on `z = height(x, y)` instead of the plane.
    pub fn set_height(&mut self, height: Height) {
        self.height = height;
    }
}

impl<F> Layer for FieldLayer<F>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    fn name(&self) -> &'static str {
        "field"
    }

    fn is_visible(&self) -> bool {
        self.style.visible
    }

    fn color(&self) -> Color {
        self.style.color
    }

    fn geometry_fingerprint(&self, bounds: &Bounds) -> Fingerprint {
        FingerprintBuilder::new("field")
            .function(self.function)
            .function(self.height.id())
            .bounds(bounds)
            .f64(self.style.density)
            .f64(self.style.arrow_length)
            .f64(self.style.thickness)
            .finish()
    }

    fn build(&self, bounds: &Bounds) -> Result<Option<Geometry>> {
        let height = &self.height;
        let samples = sample_field(&self.func, bounds, self.style.density, |x, y| {
            height.eval(x, y)
        })?;
        let mesh = field_mesh(&samples, self.style.arrow_length, self.style.thickness);
        tracing::debug!(function = %self.function, arrows = samples.len(), "Slope field sampled");
        Ok(non_empty_mesh(mesh))
    }

    fn slot(&self) -> &LayerSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut LayerSlot {
        &mut self.slot
    }
}
