// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene: the single owner of drawable handles.
//!
//! Every drawable passes through [`Scene::add`] and leaves through
//! [`Scene::remove`], so the registry and the renderer always agree on which
//! handles are live. Dropping the scene releases whatever is left.

use crate::cache::GeometryCache;
use crate::config::SceneConfig;
use crate::drawable::Drawable;
use crate::error::{Error, Result};
use crate::keys::DrawableKey;
use crate::registry::DrawableRegistry;
use crate::renderer::Renderer;

pub struct Scene<R: Renderer> {
    registry: DrawableRegistry,
    cache: GeometryCache,
    renderer: R,
}

impl<R: Renderer> Scene<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_cache(renderer, GeometryCache::default())
    }

    /// Scene whose cache capacity comes from `config`.
    pub fn from_config(renderer: R, config: &SceneConfig) -> Self {
        Self::with_cache(renderer, GeometryCache::with_capacity(config.cache_capacity))
    }

    pub fn with_cache(renderer: R, cache: GeometryCache) -> Self {
        Self {
            registry: DrawableRegistry::new(),
            cache,
            renderer,
        }
    }

    pub fn add(&mut self, drawable: Drawable) -> DrawableKey {
        let key = self.registry.insert(drawable);
        if let Some(drawable) = self.registry.get(key) {
            self.renderer.add(key, drawable);
        }
        tracing::debug!(?key, "Drawable added");
        key
    }

    pub fn remove(&mut self, key: DrawableKey) -> Result<Drawable> {
        let drawable = self.registry.remove(key)?;
        self.renderer.remove(key);
        tracing::debug!(?key, layer = drawable.layer, "Drawable released");
        Ok(drawable)
    }

    /// Add `drawable` under a fresh key, then release `old`.
    ///
    /// `old` is checked before anything is added, so on error the scene is
    /// unchanged.
    pub fn replace(&mut self, old: Option<DrawableKey>, drawable: Drawable) -> Result<DrawableKey> {
        if let Some(old) = old {
            if !self.registry.contains(old) {
                return Err(Error::UnknownHandle(old));
            }
        }
        let key = self.add(drawable);
        if let Some(old) = old {
            self.remove(old)?;
        }
        Ok(key)
    }

    /// Swap the drawable behind `key` in place; the key stays valid.
    pub fn update(&mut self, key: DrawableKey, drawable: Drawable) -> Result<u64> {
        let generation = self.registry.replace(key, drawable)?;
        if let Some(drawable) = self.registry.get(key) {
            self.renderer.update(key, drawable);
        }
        tracing::trace!(?key, generation, "Drawable updated in place");
        Ok(generation)
    }

    /// Release every handle and drop cached geometry.
    pub fn clear(&mut self) {
        let keys = self.registry.drain();
        for &key in &keys {
            self.renderer.remove(key);
        }
        self.cache.clear();
        if !keys.is_empty() {
            tracing::debug!(released = keys.len(), "Scene cleared");
        }
    }

    pub fn get(&self, key: DrawableKey) -> Option<&Drawable> {
        self.registry.get(key)
    }

    pub fn contains(&self, key: DrawableKey) -> bool {
        self.registry.contains(key)
    }

    pub fn registry(&self) -> &DrawableRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &GeometryCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut GeometryCache {
        &mut self.cache
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl<R: Renderer> Drop for Scene<R> {
    fn drop(&mut self) {
        self.clear();
    }
}
