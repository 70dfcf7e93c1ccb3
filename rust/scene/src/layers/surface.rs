// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use fngraph_geometry::{function_surface_mesh, Bounds, Error as GeometryError};

use super::{Layer, LayerSlot};
use crate::config::SurfaceStyle;
use crate::drawable::{Color, Geometry};
use crate::error::Result;
use crate::fingerprint::{Fingerprint, FingerprintBuilder};
use crate::keys::FunctionId;

/// Graph surface `z = f(x, y)` over the view bounds.
pub struct SurfaceLayer<F> {
    function: FunctionId,
    func: F,
    pub style: SurfaceStyle,
    slot: LayerSlot,
}

impl<F> SurfaceLayer<F>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    pub fn new(function: FunctionId, func: F, style: SurfaceStyle) -> Self {
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
}

impl<F> Layer for SurfaceLayer<F>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    fn name(&self) -> &'static str {
        "surface"
    }

    fn is_visible(&self) -> bool {
        self.style.visible
    }

    fn color(&self) -> Color {
        self.style.color
    }

    fn geometry_fingerprint(&self, bounds: &Bounds) -> Fingerprint {
        FingerprintBuilder::new("surface")
            .function(self.function)
            .bounds(bounds)
            .usize(self.style.mesh_size)
            .finish()
    }

    fn build(&self, bounds: &Bounds) -> Result<Option<Geometry>> {
        match function_surface_mesh(&self.func, bounds, self.style.mesh_size) {
            Ok(mesh) => Ok(Some(Geometry::Mesh(mesh))),
            Err(GeometryError::EmptyMesh(reason)) => {
                tracing::debug!(function = %self.function, %reason, "Surface has nothing to draw");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
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
    use crate::error::Error;
    use crate::renderer::NullRenderer;
    use crate::scene::Scene;

    #[test]
    fn undefined_surface_draws_nothing() {
        let mut scene = Scene::new(NullRenderer);
        let mut layer = SurfaceLayer::new(FunctionId(1), |_, _| f64::NAN, SurfaceStyle::default());
        assert_eq!(layer.update(&mut scene, &Bounds::default()).unwrap(), None);
    }

    #[test]
    fn zero_mesh_size_is_an_error() {
        let mut scene = Scene::new(NullRenderer);
        let style = SurfaceStyle {
            mesh_size: 0,
            ..SurfaceStyle::default()
        };
        let mut layer = SurfaceLayer::new(FunctionId(1), |x, y| x * y, style);
        assert!(matches!(
            layer.update(&mut scene, &Bounds::default()),
            Err(Error::Geometry(GeometryError::InvalidDimensions(_)))
        ));
    }
}
