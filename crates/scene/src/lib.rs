//! Scene graph and navigation.
//!
//! This crate provides scene management:
//! - Local transforms and their per-frame animations
//! - The node tree and its draw traversal
//! - Shape capabilities consumed by leaf nodes
//! - First-person camera and arcball navigation models

pub mod animation;
pub mod camera;
pub mod light;
mod math;
pub mod node;
pub mod shape;
pub mod trackball;
pub mod transform;

pub use animation::{Animation, AnimationFn, Axis, OrbitPlane};
pub use camera::{Camera, CameraMovement};
pub use light::PointLight;
pub use math::safe_normalize;
pub use node::{FrameContext, Node, NodeKind, SceneItems};
pub use shape::{Drawable, Light};
pub use trackball::Trackball;
pub use transform::Transform;
