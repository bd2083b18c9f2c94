//! Capabilities the scene graph consumes from shape objects.
//!
//! Meshes and light sources are owned by leaf nodes and are otherwise opaque:
//! the tree only hands them matrices and asks them to draw. Tessellation and
//! GPU resources live behind these traits.

use glam::{Mat4, Vec3};
use viz_core::Result;

/// Something that can be placed and drawn.
pub trait Drawable {
    /// Receive the matrices for the upcoming draw.
    fn transform(&mut self, projection: Mat4, view: Mat4, model: Mat4) -> Result<()>;

    /// Issue the draw.
    fn draw(&mut self) -> Result<()>;

    /// Receive the color of the active scene light.
    fn lighting(&mut self, _color: Vec3) {}
}

/// A light source placed by the scene graph.
pub trait Light {
    /// Receive the matrices for the upcoming frame.
    fn transform(&mut self, projection: Mat4, view: Mat4, model: Mat4) -> Result<()>;

    fn color(&self) -> Vec3;

    /// World position as of the latest traversal.
    fn position(&self) -> Vec3;

    fn set_position(&mut self, position: Vec3);

    /// Draw a visual marker for the light. Lights without one draw nothing.
    fn draw(&mut self) -> Result<()> {
        Ok(())
    }
}
