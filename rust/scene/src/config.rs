// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layer styles and scene configuration.
//!
//! Every style has a `Default` and missing JSON fields fall back to it, so a
//! config file only needs the values it changes.

use fngraph_geometry::{Bounds, TraceDirection};
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::drawable::Color;
use crate::error::{Error, Result};

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!("{} must be positive and finite, got {}", name, value)))
    }
}

/// Function graph tube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveStyle {
    pub visible: bool,
    /// Sampling step along x.
    pub step: f64,
    /// Tube radius.
    pub radius: f64,
    pub color: Color,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self {
            visible: true,
            step: 0.01,
            radius: 0.15,
            color: [0.05, 0.25, 0.75, 1.0],
        }
    }
}

/// Slope field arrows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldStyle {
    pub visible: bool,
    /// Arrows per unit length.
    pub density: f64,
    pub arrow_length: f64,
    pub thickness: f64,
    pub color: Color,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            visible: true,
            density: 1.0,
            arrow_length: 0.75,
            thickness: 1.0,
            color: [0.2, 0.2, 0.2, 1.0],
        }
    }
}

/// Serializable form of [`TraceDirection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    Forward,
    Backward,
    #[default]
    Both,
}

impl From<TraceMode> for TraceDirection {
    fn from(mode: TraceMode) -> Self {
        match mode {
            TraceMode::Forward => TraceDirection::Forward,
            TraceMode::Backward => TraceDirection::Backward,
            TraceMode::Both => TraceDirection::Both,
        }
    }
}

/// RK4 integral curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegralStyle {
    pub visible: bool,
    pub step: f64,
    pub radius: f64,
    pub direction: TraceMode,
    pub color: Color,
}

impl Default for IntegralStyle {
    fn default() -> Self {
        Self {
            visible: true,
            step: 0.01,
            radius: 0.05,
            direction: TraceMode::Both,
            color: [0.75, 0.1, 0.1, 1.0],
        }
    }
}

/// Square grid tiling lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    pub visible: bool,
    /// Spacing of grid lines inside each square.
    pub division: f64,
    pub color: Color,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            visible: true,
            division: 1.0,
            color: [0.5, 0.5, 0.5, 1.0],
        }
    }
}

/// Graph surface `z = f(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceStyle {
    pub visible: bool,
    /// Cells per side.
    pub mesh_size: usize,
    pub color: Color,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            visible: true,
            mesh_size: 100,
            color: [0.1, 0.55, 0.35, 0.9],
        }
    }
}

/// Serializable [`Bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_range: Option<(f64, f64)>,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Bounds::default().into()
    }
}

impl From<Bounds> for BoundsConfig {
    fn from(b: Bounds) -> Self {
        Self {
            x_min: b.x_min,
            x_max: b.x_max,
            y_min: b.y_min,
            y_max: b.y_max,
            z_range: b.z_range,
        }
    }
}

impl BoundsConfig {
    pub fn to_bounds(&self) -> Result<Bounds> {
        let bounds = Bounds {
            x_min: self.x_min,
            x_max: self.x_max,
            y_min: self.y_min,
            y_max: self.y_max,
            z_range: self.z_range,
        };
        bounds.validate()?;
        Ok(bounds)
    }
}

/// Everything a scene needs besides the user functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub bounds: BoundsConfig,
    pub curve: CurveStyle,
    pub field: FieldStyle,
    pub integral: IntegralStyle,
    pub grid: GridStyle,
    pub surface: SurfaceStyle,
    /// Built geometries kept for reuse; 0 disables the cache.
    pub cache_capacity: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bounds: BoundsConfig::default(),
            curve: CurveStyle::default(),
            field: FieldStyle::default(),
            integral: IntegralStyle::default(),
            grid: GridStyle::default(),
            surface: SurfaceStyle::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values no sampler would accept.
    pub fn validate(&self) -> Result<()> {
        self.bounds.to_bounds()?;
        check_positive("curve.step", self.curve.step)?;
        check_positive("curve.radius", self.curve.radius)?;
        check_positive("field.density", self.field.density)?;
        check_positive("field.arrow_length", self.field.arrow_length)?;
        check_positive("field.thickness", self.field.thickness)?;
        check_positive("integral.step", self.integral.step)?;
        check_positive("integral.radius", self.integral.radius)?;
        check_positive("grid.division", self.grid.division)?;
        if self.surface.mesh_size == 0 {
            return Err(Error::Config("surface.mesh_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_are_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = SceneConfig::from_json(
            r#"{ "curve": { "step": 0.5 }, "integral": { "direction": "forward" } }"#,
        )
        .unwrap();
        assert_relative_eq!(config.curve.step, 0.5);
        assert_eq!(config.curve.radius, CurveStyle::default().radius);
        assert_eq!(config.integral.direction, TraceMode::Forward);
        assert_eq!(config.field, FieldStyle::default());
    }

    #[test]
    fn json_round_trip() {
        let mut config = SceneConfig::default();
        config.bounds.z_range = Some((-2.0, 2.0));
        config.surface.visible = false;
        let json = config.to_json().unwrap();
        assert_eq!(SceneConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            SceneConfig::from_json(r#"{ "field": { "density": 0 } }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{ "bounds": { "x_min": 5, "x_max": 1 } }"#),
            Err(Error::Geometry(_))
        ));
        assert!(matches!(SceneConfig::from_json("{ nope"), Err(Error::Json(_))));
    }

    #[test]
    fn trace_mode_maps_to_direction() {
        assert_eq!(TraceDirection::from(TraceMode::Backward), TraceDirection::Backward);
        assert_eq!(TraceDirection::from(TraceMode::default()), TraceDirection::Both);
    }
}
