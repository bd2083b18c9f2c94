//! Input handling for keyboard and mouse.
//!
//! Events are folded into an [`InputState`] as they arrive; the host reads
//! it once per frame and then calls [`InputState::end_frame`] to clear the
//! per-frame deltas.

use std::collections::HashSet;

pub use winit::keyboard::KeyCode;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Left,
        }
    }
}

/// Tracks the current state of keyboard and mouse input.
#[derive(Debug, Default)]
pub struct InputState {
    /// Currently pressed keys
    pressed_keys: HashSet<KeyCode>,
    /// Keys that were just pressed this frame
    just_pressed_keys: HashSet<KeyCode>,

    /// Currently pressed mouse buttons
    pressed_buttons: HashSet<MouseButton>,

    /// Cursor position at the start of the frame, once known
    frame_start_cursor: Option<(f32, f32)>,
    /// Latest cursor position, once known
    cursor: Option<(f32, f32)>,
    /// Raw device motion accumulated this frame
    motion: (f32, f32),
    /// Scroll accumulated this frame, in lines
    scroll: f32,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call after a frame has consumed the input to clear per-frame state.
    pub fn end_frame(&mut self) {
        self.just_pressed_keys.clear();
        self.frame_start_cursor = self.cursor;
        self.motion = (0.0, 0.0);
        self.scroll = 0.0;
    }

    /// Handle a key press event.
    pub fn on_key_pressed(&mut self, key: KeyCode) {
        if self.pressed_keys.insert(key) {
            self.just_pressed_keys.insert(key);
        }
    }

    /// Handle a key release event.
    pub fn on_key_released(&mut self, key: KeyCode) {
        self.pressed_keys.remove(&key);
    }

    /// Handle a mouse button press event.
    pub fn on_mouse_pressed(&mut self, button: MouseButton) {
        self.pressed_buttons.insert(button);
    }

    /// Handle a mouse button release event.
    pub fn on_mouse_released(&mut self, button: MouseButton) {
        self.pressed_buttons.remove(&button);
    }

    /// Handle cursor movement within the window.
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        if self.frame_start_cursor.is_none() {
            self.frame_start_cursor = Some((x, y));
        }
        self.cursor = Some((x, y));
    }

    /// Handle raw relative mouse motion, available even while the cursor is grabbed.
    pub fn on_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.motion.0 += dx;
        self.motion.1 += dy;
    }

    /// Handle mouse scroll.
    pub fn on_scroll(&mut self, delta: f32) {
        self.scroll += delta;
    }

    /// Check if a key is currently pressed.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Check if a key was just pressed this frame.
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    /// Check if a mouse button is currently pressed.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Cursor positions at the start and end of this frame, if it moved.
    pub fn cursor_motion(&self) -> Option<((f32, f32), (f32, f32))> {
        match (self.frame_start_cursor, self.cursor) {
            (Some(old), Some(new)) if old != new => Some((old, new)),
            _ => None,
        }
    }

    /// Get the raw mouse motion accumulated this frame.
    pub fn mouse_motion(&self) -> (f32, f32) {
        self.motion
    }

    /// Get the scroll accumulated this frame.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll
    }
}
