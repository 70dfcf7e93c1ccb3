// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rectangular sampling domains

use crate::error::{Error, Result};
use nalgebra::Point2;

/// Axis-aligned domain a function or field is sampled and drawn in.
///
/// Every axis satisfies `min < max` with finite values. Use [`Bounds::new`]
/// to get a checked value; struct literals are re-checked by every sampler
/// through [`Bounds::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Optional vertical range for 3D consumers
    pub z_range: Option<(f64, f64)>,
}

impl Bounds {
    /// Create 2D bounds, failing on degenerate or non-finite axes
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        let bounds = Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_range: None,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Symmetric square bounds `[-half, half]²`
    pub fn square(half: f64) -> Result<Self> {
        Self::new(-half, half, -half, half)
    }

    /// Attach a z range
    pub fn with_z(mut self, z_min: f64, z_max: f64) -> Result<Self> {
        self.z_range = Some((z_min, z_max));
        self.validate()?;
        Ok(self)
    }

    /// Check the `min < max` invariant on every axis
    pub fn validate(&self) -> Result<()> {
        check_axis("x", self.x_min, self.x_max)?;
        check_axis("y", self.y_min, self.y_max)?;
        if let Some((z_min, z_max)) = self.z_range {
            check_axis("z", z_min, z_max)?;
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    #[inline]
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.y_min && y <= self.y_max
    }

    /// Closed containment test; NaN coordinates are never contained
    #[inline]
    pub fn contains(&self, p: Point2<f64>) -> bool {
        self.contains_x(p.x) && self.contains_y(p.y)
    }
}

impl Default for Bounds {
    /// The `[-10, 10]²` window the widgets open with
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            y_min: -10.0,
            y_max: 10.0,
            z_range: None,
        }
    }
}

fn check_axis(axis: &str, min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(Error::InvalidBounds(format!(
            "{axis} range [{min}, {max}] is not finite"
        )));
    }
    if min >= max {
        return Err(Error::InvalidBounds(format!(
            "{axis}_min ({min}) must be less than {axis}_max ({max})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_degenerate_axes() {
        assert!(Bounds::new(0.0, 1.0, 0.0, 1.0).is_ok());
        assert!(matches!(
            Bounds::new(1.0, 1.0, 0.0, 1.0),
            Err(Error::InvalidBounds(_))
        ));
        assert!(matches!(
            Bounds::new(0.0, 1.0, 2.0, -2.0),
            Err(Error::InvalidBounds(_))
        ));
        assert!(Bounds::new(f64::NEG_INFINITY, 1.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_z_range_is_checked() {
        let b = Bounds::square(5.0).unwrap();
        assert!(b.with_z(-1.0, 1.0).is_ok());
        assert!(b.with_z(1.0, -1.0).is_err());
    }

    #[test]
    fn test_contains_is_closed() {
        let b = Bounds::default();
        assert!(b.contains(Point2::new(-10.0, 10.0)));
        assert!(!b.contains(Point2::new(10.5, 0.0)));
        assert!(!b.contains(Point2::new(f64::NAN, 0.0)));
        assert_eq!(b.width(), 20.0);
        assert_eq!(b.height(), 20.0);
    }
}
