// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input fingerprints that decide when a layer must rebuild.
//!
//! Floats are hashed by bit pattern. `-0.0` is folded into `0.0` and every
//! NaN into one canonical NaN so equal inputs always agree.

use std::hash::{Hash, Hasher};

use fngraph_geometry::{Bounds, Point2};
use rustc_hash::FxHasher;

use crate::drawable::Color;
use crate::keys::FunctionId;

/// 64-bit digest of everything a built geometry depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Accumulates inputs into a [`Fingerprint`].
///
/// Uses FxHasher for speed; collisions across 64 bits are not a practical
/// concern for a handful of layers.
pub struct FingerprintBuilder {
    hasher: FxHasher,
}

impl FingerprintBuilder {
    /// Start a fingerprint; `tag` keeps different layer kinds apart.
    pub fn new(tag: &str) -> Self {
        let mut hasher = FxHasher::default();
        tag.hash(&mut hasher);
        Self { hasher }
    }

    pub fn f64(mut self, value: f64) -> Self {
        let bits = if value == 0.0 {
            0u64
        } else if value.is_nan() {
            f64::NAN.to_bits()
        } else {
            value.to_bits()
        };
        bits.hash(&mut self.hasher);
        self
    }

    pub fn f32(self, value: f32) -> Self {
        self.f64(value as f64)
    }

    pub fn u64(mut self, value: u64) -> Self {
        value.hash(&mut self.hasher);
        self
    }

    pub fn usize(self, value: usize) -> Self {
        self.u64(value as u64)
    }

    pub fn bool(mut self, value: bool) -> Self {
        value.hash(&mut self.hasher);
        self
    }

    pub fn point(self, p: Point2<f64>) -> Self {
        self.f64(p.x).f64(p.y)
    }

    pub fn bounds(self, bounds: &Bounds) -> Self {
        let b = self
            .f64(bounds.x_min)
            .f64(bounds.x_max)
            .f64(bounds.y_min)
            .f64(bounds.y_max);
        match bounds.z_range {
            Some((lo, hi)) => b.bool(true).f64(lo).f64(hi),
            None => b.bool(false),
        }
    }

    pub fn function(self, id: FunctionId) -> Self {
        self.u64(id.0)
    }

    pub fn color(self, color: Color) -> Self {
        color.iter().fold(self, |b, &c| b.f32(c))
    }

    pub fn fingerprint(self, fingerprint: Fingerprint) -> Self {
        self.u64(fingerprint.0)
    }

    pub fn finish(self) -> Fingerprint {
        Fingerprint(self.hasher.finish())
    }
}
