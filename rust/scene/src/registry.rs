// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena of live drawables.
//!
//! Every drawable a scene hands to its renderer is recorded here under a
//! [`DrawableKey`]. Each entry also counts how many times its drawable was
//! swapped in place, so a renderer or test can tell a restyle from a fresh
//! handle.

use slotmap::SlotMap;

use crate::drawable::Drawable;
use crate::error::{Error, Result};
use crate::keys::DrawableKey;

#[derive(Debug, Clone)]
struct Entry {
    drawable: Drawable,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct DrawableRegistry {
    entries: SlotMap<DrawableKey, Entry>,
}

impl DrawableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, drawable: Drawable) -> DrawableKey {
        self.entries.insert(Entry {
            drawable,
            generation: 0,
        })
    }

    pub fn get(&self, key: DrawableKey) -> Option<&Drawable> {
        self.entries.get(key).map(|e| &e.drawable)
    }

    pub fn contains(&self, key: DrawableKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Times the drawable behind `key` was replaced in place.
    pub fn generation(&self, key: DrawableKey) -> Option<u64> {
        self.entries.get(key).map(|e| e.generation)
    }

    /// Replace the drawable behind `key`, keeping the key.
    /// Returns the new generation.
    pub fn replace(&mut self, key: DrawableKey, drawable: Drawable) -> Result<u64> {
        let entry = self.entries.get_mut(key).ok_or(Error::UnknownHandle(key))?;
        entry.drawable = drawable;
        entry.generation += 1;
        Ok(entry.generation)
    }

    pub fn remove(&mut self, key: DrawableKey) -> Result<Drawable> {
        self.entries
            .remove(key)
            .map(|e| e.drawable)
            .ok_or(Error::UnknownHandle(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = DrawableKey> + '_ {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DrawableKey, &Drawable)> + '_ {
        self.entries.iter().map(|(k, e)| (k, &e.drawable))
    }

    /// Remove every entry, returning the released keys.
    pub fn drain(&mut self) -> Vec<DrawableKey> {
        self.entries.drain().map(|(k, _)| k).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
