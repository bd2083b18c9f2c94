//! Platform abstraction layer for the visualization sandbox.
//!
//! This crate provides platform-specific functionality:
//! - Window management via winit
//! - Input handling (keyboard, mouse)

mod input;
mod window;

pub use input::{InputState, KeyCode, MouseButton};
pub use window::Window;

// Re-export winit types that users might need
pub use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
pub use winit::event_loop::EventLoop;
