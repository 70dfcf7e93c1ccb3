// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while sampling functions or building meshes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Density must be positive and finite, got {0}")]
    InvalidDensity(f64),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Line needs two distinct points")]
    DegenerateLine,

    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("Empty mesh: {0}")]
    EmptyMesh(String),

    #[error("{what} would need {count} samples, limit is {limit}")]
    TooManySamples {
        what: &'static str,
        count: f64,
        limit: usize,
    },
}

/// Reject non-positive or non-finite step sizes.
#[inline]
pub(crate) fn check_step(step: f64) -> Result<()> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidStepSize(step))
    }
}

/// Reject lattices larger than `limit`. `count` is computed in f64 so that
/// huge lattices are caught before any integer cast saturates.
#[inline]
pub(crate) fn check_sample_count(what: &'static str, count: f64, limit: usize) -> Result<()> {
    if count.is_finite() && count <= limit as f64 {
        Ok(())
    } else {
        tracing::warn!(what, count, limit, "Refusing oversized lattice");
        Err(Error::TooManySamples { what, count, limit })
    }
}
