//! Frame orchestration for the visualization sandbox.
//!
//! This crate drives one frame at a time:
//! - Navigation mode selection (camera or trackball)
//! - Light-collection pre-pass
//! - Scene tree traversal

pub mod renderer;

pub use renderer::{FrameInput, FrameStats, Renderer};
