//! Configuration snapshots for the sandbox.
//!
//! These structs are read once at construction or reset time. They can be
//! built in code or loaded from a JSON file; every field is optional in the
//! file and falls back to its default.
//!
//! # Example
//!
//! ```
//! use viz_core::EngineConfig;
//!
//! let json = r#"{ "use_trackball": true, "trackball": { "distance": 4.0 } }"#;
//! let config = EngineConfig::from_json_str(json).expect("valid config");
//! assert!(config.use_trackball);
//! assert_eq!(config.trackball.distance, 4.0);
//! assert_eq!(config.camera.fov, 75.0);
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Initial setup for the first-person camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position in world space
    pub position: Vec3,
    /// Initial view direction
    pub front: Vec3,
    /// World-up reference vector
    pub up: Vec3,
    /// Right vector used when `front` is parallel to `up`
    pub right: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Distance moved per unit step
    pub move_speed: f32,
    /// Yaw in degrees
    pub yaw: f32,
    /// Pitch in degrees
    pub pitch: f32,
    /// Degrees of rotation per pixel of pointer motion
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            fov: 75.0,
            near: 0.1,
            far: 100.0,
            move_speed: 0.25,
            yaw: -90.0,
            pitch: 0.0,
            sensitivity: 0.05,
        }
    }
}

/// Initial setup for the arcball navigation model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackballConfig {
    pub yaw: f32,
    pub roll: f32,
    pub pitch: f32,
    /// Distance from the eye to the orbit center
    pub distance: f32,
    /// Interpret yaw/roll/pitch as radians instead of degrees
    pub radians: bool,
    /// Pan offset per pixel, per unit of distance
    pub pan_sensitivity: f32,
}

impl Default for TrackballConfig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            roll: 0.0,
            pitch: 0.0,
            distance: 10.0,
            radians: false,
            pan_sensitivity: 0.001,
        }
    }
}

/// Aggregated configuration for the sandbox host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial window width in pixels
    pub width: u32,
    /// Initial window height in pixels
    pub height: u32,
    /// Use the trackball instead of the first-person camera
    pub use_trackball: bool,
    pub camera: CameraConfig,
    pub trackball: TrackballConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            use_trackball: false,
            camera: CameraConfig::default(),
            trackball: TrackballConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Reject values that would make the projection degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return Err(Error::Config(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                self.camera.near, self.camera.far
            )));
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return Err(Error::Config(format!(
                "camera fov must be in (0, 180) degrees, got {}",
                self.camera.fov
            )));
        }
        Ok(())
    }
}
