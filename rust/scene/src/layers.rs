// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Styled layers that keep one drawable in sync with their inputs.
//!
//! A layer hashes its inputs in two parts: the geometry fingerprint covers
//! everything the built geometry depends on, and the drawable fingerprint
//! adds the color. On [`Layer::update`]:
//!
//! - nothing changed: the current handle is returned untouched;
//! - only the color changed: the drawable is restyled in place;
//! - the geometry changed: it is rebuilt (or fetched from the scene cache),
//!   added under a new handle, and the old handle is released.
//!
//! Hidden layers hold no handle.

mod curve;
mod field;
mod grid;
mod integral;
mod surface;

pub use curve::CurveLayer;
pub use field::FieldLayer;
pub use grid::GridLayer;
pub use integral::IntegralLayer;
pub use surface::SurfaceLayer;

use std::sync::Arc;

use fngraph_geometry::Bounds;

use crate::drawable::{Color, Drawable, Geometry};
use crate::error::{Error, Result};
use crate::fingerprint::{Fingerprint, FingerprintBuilder};
use crate::keys::{DrawableKey, FunctionId};
use crate::renderer::Renderer;
use crate::scene::Scene;

/// What a layer last handed to the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerSlot {
    key: Option<DrawableKey>,
    drawable: Option<Fingerprint>,
    geometry: Option<Fingerprint>,
}

impl LayerSlot {
    pub fn key(&self) -> Option<DrawableKey> {
        self.key
    }
}

pub type HeightFn = dyn Fn(f64, f64) -> f64 + Send + Sync;

/// Height function lifting 2D results into 3D, with the id used to notice
/// when it changes.
#[derive(Clone)]
pub struct Height {
    id: FunctionId,
    func: Arc<HeightFn>,
}

impl Height {
    pub fn new<F>(id: FunctionId, func: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            id,
            func: Arc::new(func),
        }
    }

    /// The zero function.
    pub fn flat() -> Self {
        Self::new(FunctionId::FLAT, fngraph_geometry::flat_height)
    }

    pub fn id(&self) -> FunctionId {
        self.id
    }

    #[inline]
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        (self.func)(x, y)
    }
}

impl Default for Height {
    fn default() -> Self {
        Self::flat()
    }
}

impl std::fmt::Debug for Height {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Height").field("id", &self.id).finish_non_exhaustive()
    }
}

pub trait Layer {
    /// Short name used in logs and on drawables.
    fn name(&self) -> &'static str;

    fn is_visible(&self) -> bool;

    fn color(&self) -> Color;

    /// Digest of every input the built geometry depends on.
    fn geometry_fingerprint(&self, bounds: &Bounds) -> Fingerprint;

    /// Build the geometry. `None` means there is nothing to draw.
    fn build(&self, bounds: &Bounds) -> Result<Option<Geometry>>;

    fn slot(&self) -> &LayerSlot;

    fn slot_mut(&mut self) -> &mut LayerSlot;

    /// Handle currently shown for this layer.
    fn key(&self) -> Option<DrawableKey> {
        self.slot().key
    }

    /// Bring the scene in line with the layer's inputs and return the live
    /// handle. On error the previous drawable stays in place. A handle the
    /// scene no longer holds, e.g. after [`Scene::clear`], is forgotten and
    /// the layer is drawn again.
    fn update<R: Renderer>(
        &mut self,
        scene: &mut Scene<R>,
        bounds: &Bounds,
    ) -> Result<Option<DrawableKey>>
    where
        Self: Sized,
    {
        let name = self.name();
        if !self.is_visible() {
            self.release(scene)?;
            return Ok(None);
        }

        let color = self.color();
        let geometry_fp = self.geometry_fingerprint(bounds);
        let drawable_fp = FingerprintBuilder::new(name)
            .fingerprint(geometry_fp)
            .color(color)
            .finish();
        let mut state = *self.slot();
        if let Some(stale) = state.key.filter(|&key| !scene.contains(key)) {
            tracing::debug!(layer = name, key = ?stale, "Layer handle no longer in scene");
            state = LayerSlot::default();
            *self.slot_mut() = state;
        }

        if state.drawable == Some(drawable_fp) {
            tracing::trace!(layer = name, "Layer unchanged");
            return Ok(state.key);
        }

        if state.geometry == Some(geometry_fp) {
            if let Some(key) = state.key {
                let restyled = scene
                    .get(key)
                    .ok_or(Error::UnknownHandle(key))?
                    .recolored(color);
                scene.update(key, restyled)?;
                self.slot_mut().drawable = Some(drawable_fp);
                tracing::debug!(layer = name, "Layer restyled");
                return Ok(Some(key));
            }
        }

        let geometry = scene
            .cache_mut()
            .get_or_try_insert_with(geometry_fp, || self.build(bounds))?;

        let key = match geometry {
            Some(geometry) => {
                Some(scene.replace(state.key, Drawable::new(geometry, color, name))?)
            }
            None => {
                if let Some(old) = state.key {
                    scene.remove(old)?;
                }
                None
            }
        };

        *self.slot_mut() = LayerSlot {
            key,
            drawable: Some(drawable_fp),
            geometry: Some(geometry_fp),
        };
        tracing::debug!(layer = name, drawn = key.is_some(), "Layer rebuilt");
        Ok(key)
    }

    /// Release the layer's drawable, if any, and forget its inputs.
    fn release<R: Renderer>(&mut self, scene: &mut Scene<R>) -> Result<()>
    where
        Self: Sized,
    {
        let state = std::mem::take(self.slot_mut());
        if let Some(key) = state.key.filter(|&key| scene.contains(key)) {
            scene.remove(key)?;
        }
        Ok(())
    }

    /// Forget the current handle and inputs without touching the scene, so
    /// the next update rebuilds from scratch.
    fn detach(&mut self) {
        *self.slot_mut() = LayerSlot::default();
    }
}

/// Mesh geometry, or `None` when the mesh has no triangles.
fn non_empty_mesh(mesh: fngraph_geometry::Mesh) -> Option<Geometry> {
    (!mesh.is_empty()).then_some(Geometry::Mesh(mesh))
}
