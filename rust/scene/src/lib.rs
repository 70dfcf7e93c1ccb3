// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # fngraph Scene
//!
//! Keeps renderer-side drawables in step with sampled function graphs.
//!
//! A [`Scene`] owns every drawable handle through a [`DrawableRegistry`]
//! and forwards additions and removals to a [`Renderer`]. Layers
//! ([`CurveLayer`], [`FieldLayer`], [`IntegralLayer`], [`GridLayer`],
//! [`SurfaceLayer`]) fingerprint their inputs and only rebuild geometry when
//! something actually changed; superseded handles are released as soon as
//! their replacement is in place.
//!
//! ```
//! use fngraph_scene::{CurveLayer, CurveStyle, FunctionId, Layer, NullRenderer, Scene};
//! use fngraph_geometry::Bounds;
//!
//! let mut scene = Scene::new(NullRenderer);
//! let mut parabola = CurveLayer::new(FunctionId(1), |x: f64| x * x, CurveStyle::default());
//!
//! let bounds = Bounds::default();
//! let key = parabola.update(&mut scene, &bounds).unwrap();
//! assert!(key.is_some());
//! assert_eq!(parabola.update(&mut scene, &bounds).unwrap(), key);
//! ```

pub mod cache;
pub mod config;
pub mod drawable;
pub mod error;
pub mod fingerprint;
pub mod keys;
pub mod layers;
pub mod registry;
pub mod renderer;
pub mod scene;

pub use cache::{GeometryCache, DEFAULT_CACHE_CAPACITY};
pub use config::{
    BoundsConfig, CurveStyle, FieldStyle, GridStyle, IntegralStyle, SceneConfig, SurfaceStyle,
    TraceMode,
};
pub use drawable::{Color, Drawable, Geometry, Segment};
pub use error::{Error, Result};
pub use fingerprint::{Fingerprint, FingerprintBuilder};
pub use keys::{DrawableKey, FunctionId};
pub use layers::{
    CurveLayer, FieldLayer, GridLayer, Height, IntegralLayer, Layer, LayerSlot, SurfaceLayer,
};
pub use registry::DrawableRegistry;
pub use renderer::{NullRenderer, Renderer};
pub use scene::Scene;
