// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The rendering collaborator.
//!
//! A renderer owns whatever GPU or scene-graph resources it creates for a
//! drawable. The scene tells it when a handle appears and when it goes away;
//! it never has to diff anything itself.

use crate::drawable::Drawable;
use crate::keys::DrawableKey;

pub trait Renderer {
    /// Create resources for a new handle.
    fn add(&mut self, key: DrawableKey, drawable: &Drawable);

    /// Release everything held for `key`.
    fn remove(&mut self, key: DrawableKey);

    /// Swap the drawable behind an existing handle. The default removes and
    /// re-adds.
    fn update(&mut self, key: DrawableKey, drawable: &Drawable) {
        self.remove(key);
        self.add(key, drawable);
    }
}

/// Renderer that draws nothing, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn add(&mut self, _key: DrawableKey, _drawable: &Drawable) {}

    fn remove(&mut self, _key: DrawableKey) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn add(&mut self, key: DrawableKey, drawable: &Drawable) {
        (**self).add(key, drawable)
    }

    fn remove(&mut self, key: DrawableKey) {
        (**self).remove(key)
    }

    fn update(&mut self, key: DrawableKey, drawable: &Drawable) {
        (**self).update(key, drawable)
    }
}
