//! Stand-in meshes for the demo scenes.
//!
//! Real tessellation and GPU upload live outside the sandbox core. These
//! meshes only record what they are handed and report each draw through
//! tracing, which is enough to watch the scene graph and navigation at work.

use glam::{Mat4, Vec3};
use tracing::trace;

use viz_core::Result;
use viz_scene::Drawable;

/// Per-shape creation settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeConfig {
    /// Base color, passed explicitly to every mesh at creation
    pub color: Vec3,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            color: Vec3::new(0.8, 0.8, 0.8),
        }
    }
}

impl ShapeConfig {
    pub fn with_color(color: Vec3) -> Self {
        Self { color }
    }
}

/// A mesh that traces its placement instead of issuing GPU draws.
#[derive(Debug)]
pub struct TracedMesh {
    label: &'static str,
    color: Vec3,
    light_color: Vec3,
    mvp: Mat4,
    model: Mat4,
    draws: u64,
}

impl TracedMesh {
    pub fn new(label: &'static str, config: &ShapeConfig) -> Self {
        Self {
            label,
            color: config.color,
            light_color: Vec3::ONE,
            mvp: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            draws: 0,
        }
    }
}

impl Drawable for TracedMesh {
    fn transform(&mut self, projection: Mat4, view: Mat4, model: Mat4) -> Result<()> {
        self.model = model;
        self.mvp = projection * view * model;
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        self.draws += 1;
        let clip = self.mvp * glam::Vec4::W;
        trace!(
            target: "viz::draw",
            "{} #{}: world={:?} clip={:?} shade={:?}",
            self.label,
            self.draws,
            self.model.w_axis.truncate(),
            clip,
            self.color * self.light_color
        );
        Ok(())
    }

    fn lighting(&mut self, color: Vec3) {
        self.light_color = color;
    }
}
