//! Light definitions for the scene.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use viz_core::Result;

use crate::shape::Light;

/// A point light (omnidirectional) with no visual marker.
///
/// The layout matches a std140 uniform block so hosts can upload it as-is.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    /// Light position in world space
    pub position: Vec3,
    /// Light intensity
    pub intensity: f32,
    /// Light color
    pub color: Vec3,
    pub _pad0: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            intensity: 1.0,
            color: Vec3::ONE,
            _pad0: 0.0,
        }
    }
}

impl PointLight {
    /// Create a unit-intensity light of the given color.
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Color pre-multiplied by intensity.
    pub fn radiance(&self) -> Vec3 {
        self.color * self.intensity
    }
}

impl Light for PointLight {
    fn transform(&mut self, _projection: Mat4, _view: Mat4, _model: Mat4) -> Result<()> {
        Ok(())
    }

    fn color(&self) -> Vec3 {
        self.radiance()
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}
