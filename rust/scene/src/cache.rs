// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Built geometry memoised by fingerprint.
//!
//! Lookups are by fingerprint only, without comparing inputs, so two layers
//! only share an entry when every input they hash agrees. Once `capacity`
//! entries are held, the oldest insertion is evicted first.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::drawable::Geometry;
use crate::fingerprint::Fingerprint;

/// Entries kept by a scene unless configured otherwise
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct GeometryCache {
    entries: FxHashMap<Fingerprint, Arc<Geometry>>,
    order: VecDeque<Fingerprint>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for GeometryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl GeometryCache {
    /// A capacity of 0 disables caching.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            order: VecDeque::new(),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, fingerprint: Fingerprint) -> Option<Arc<Geometry>> {
        match self.entries.get(&fingerprint) {
            Some(geometry) => {
                self.hits += 1;
                Some(Arc::clone(geometry))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, fingerprint: Fingerprint, geometry: Geometry) -> Arc<Geometry> {
        let geometry = Arc::new(geometry);
        if self.capacity == 0 {
            return geometry;
        }
        if self.entries.insert(fingerprint, Arc::clone(&geometry)).is_none() {
            self.order.push_back(fingerprint);
        }
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::trace!(fingerprint = oldest.value(), "Evicted cached geometry");
        }
        geometry
    }

    /// Cached geometry for `fingerprint`, building it on a miss.
    ///
    /// A build that yields `None` is not cached.
    pub fn get_or_try_insert_with<F, E>(
        &mut self,
        fingerprint: Fingerprint,
        build: F,
    ) -> std::result::Result<Option<Arc<Geometry>>, E>
    where
        F: FnOnce() -> std::result::Result<Option<Geometry>, E>,
    {
        if let Some(hit) = self.get(fingerprint) {
            tracing::debug!(fingerprint = fingerprint.value(), "Geometry cache hit");
            return Ok(Some(hit));
        }
        Ok(build()?.map(|geometry| self.insert(fingerprint, geometry)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::FingerprintBuilder;

    fn fp(n: u64) -> Fingerprint {
        FingerprintBuilder::new("cache").u64(n).finish()
    }

    fn lines() -> Geometry {
        Geometry::Lines(Vec::new())
    }

    #[test]
    fn builds_once_per_fingerprint() {
        let mut cache = GeometryCache::default();
        let mut builds = 0;
        for _ in 0..3 {
            let g: Result<_, ()> = cache.get_or_try_insert_with(fp(1), || {
                builds += 1;
                Ok(Some(lines()))
            });
            assert!(g.unwrap().is_some());
        }
        assert_eq!(builds, 1);
        assert_eq!(cache.stats(), (2, 1));
    }

    #[test]
    fn shares_the_same_allocation() {
        let mut cache = GeometryCache::default();
        let a = cache.insert(fp(1), lines());
        let b = cache.get(fp(1)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn evicts_oldest_first() {
        let mut cache = GeometryCache::with_capacity(2);
        cache.insert(fp(1), lines());
        cache.insert(fp(2), lines());
        cache.insert(fp(3), lines());
        assert_eq!(cache.len(), 2);
        assert!(cache.get(fp(1)).is_none());
        assert!(cache.get(fp(3)).is_some());
    }

    #[test]
    fn empty_builds_and_errors_are_not_cached() {
        let mut cache = GeometryCache::default();
        let none: Result<_, ()> = cache.get_or_try_insert_with(fp(1), || Ok(None));
        assert!(none.unwrap().is_none());
        let err: Result<_, &str> = cache.get_or_try_insert_with(fp(1), || Err("bad"));
        assert_eq!(err.unwrap_err(), "bad");
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let mut cache = GeometryCache::with_capacity(0);
        cache.insert(fp(1), lines());
        assert!(cache.is_empty());
    }
}
