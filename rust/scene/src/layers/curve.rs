// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use fngraph_geometry::{flat_height, path_mesh, sample_curve, Bounds, Mesh};

use super::{non_empty_mesh, Layer, LayerSlot};
use crate::config::CurveStyle;
use crate::drawable::{Color, Geometry};
use crate::error::Result;
use crate::fingerprint::{Fingerprint, FingerprintBuilder};
use crate::keys::FunctionId;

/// Graph of `y = f(x)`, one tube per visible component.
pub struct CurveLayer<F> {
    function: FunctionId,
    func: F,
    pub style: CurveStyle,
    slot: LayerSlot,
}

impl<F> CurveLayer<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(function: FunctionId, func: F, style: CurveStyle) -> Self {
        Self {
            function,
            func,
            style,
            slot: LayerSlot::default(),
        }
    }

    pub fn set_function(&mut self, function: FunctionId, func: F) {
        self.function = function;
        self.func = func;
    }

    pub fn function(&self) -> FunctionId {
        self.function
    }
}

impl<F> Layer for CurveLayer<F>
where
    F: Fn(f64) -> f64,
{
    fn name(&self) -> &'static str {
        "curve"
    }

    fn is_visible(&self) -> bool {
        self.style.visible
    }

    fn color(&self) -> Color {
        self.style.color
    }

    fn geometry_fingerprint(&self, bounds: &Bounds) -> Fingerprint {
        FingerprintBuilder::new("curve")
            .function(self.function)
            .bounds(bounds)
            .f64(self.style.step)
            .f64(self.style.radius)
            .finish()
    }

    fn build(&self, bounds: &Bounds) -> Result<Option<Geometry>> {
        let components = sample_curve(&self.func, bounds, self.style.step)?;
        let tubes: Vec<Mesh> = components
            .lift(flat_height)
            .iter()
            .filter_map(|c| path_mesh(c, self.style.radius))
            .collect();

        let mut mesh = Mesh::new();
        mesh.merge_all(&tubes);
        tracing::debug!(
            function = %self.function,
            components = components.len(),
            points = components.point_count(),
            "Curve sampled"
        );
        Ok(non_empty_mesh(mesh))
    }

    fn slot(&self) -> &LayerSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut LayerSlot {
        &mut self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullRenderer;
    use crate::scene::Scene;

    #[test]
    fn curve_outside_window_draws_nothing() {
        let mut scene = Scene::new(NullRenderer);
        let mut layer = CurveLayer::new(FunctionId(1), |_| 50.0, CurveStyle::default());
        assert_eq!(layer.update(&mut scene, &Bounds::default()).unwrap(), None);
        assert!(scene.is_empty());
    }

    #[test]
    fn hyperbola_is_one_drawable() {
        let mut scene = Scene::new(NullRenderer);
        let style = CurveStyle {
            step: 0.1,
            ..CurveStyle::default()
        };
        let mut layer = CurveLayer::new(FunctionId(1), |x| 1.0 / x, style);
        let key = layer.update(&mut scene, &Bounds::default()).unwrap().unwrap();
        assert_eq!(scene.len(), 1);
        let mesh = scene.get(key).unwrap().geometry.as_mesh().unwrap().clone();
        assert!(mesh.triangle_count() > 0);
    }
}
