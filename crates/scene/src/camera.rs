//! First-person flying camera.
//!
//! The camera keeps an orthonormal basis derived from yaw and pitch. `right`
//! and `up` are re-derived from `front` and the world-up vector after every
//! change rather than being updated incrementally, so the basis cannot drift.

use glam::{Mat4, Vec2, Vec3, Vec4};
use viz_core::CameraConfig;

use crate::math::{NORM_EPSILON, safe_normalize};

/// Pitch limit in degrees. Looking straight up or down would make `front`
/// parallel to world-up and collapse the basis.
pub const PITCH_LIMIT: f32 = 89.0;

/// Keyboard-driven movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// A yaw/pitch camera for walking through a scene.
#[derive(Clone, Debug)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    /// Right vector used when `front` is parallel to `world_up`
    fallback_right: Vec3,
    /// Yaw in degrees
    yaw: f32,
    /// Pitch in degrees, within [-PITCH_LIMIT, PITCH_LIMIT]
    pitch: f32,
    fov: f32,
    near: f32,
    far: f32,
    move_speed: f32,
    sensitivity: f32,
    config: CameraConfig,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl Camera {
    /// Create a camera from a configuration snapshot.
    pub fn new(config: CameraConfig) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up: Vec3::Y,
            fallback_right: Vec3::X,
            yaw: -90.0,
            pitch: 0.0,
            fov: 75.0,
            near: 0.1,
            far: 100.0,
            move_speed: 0.25,
            sensitivity: 0.05,
            config: config.clone(),
        };
        camera.apply_config(config);
        camera
    }

    /// Reset all state from a configuration snapshot.
    ///
    /// The initial view direction is `config.front`; yaw and pitch are
    /// re-derived from it so the first [`look`](Self::look) continues from
    /// where the camera is actually facing. If `config.front` is degenerate,
    /// the direction is built from `config.yaw` and `config.pitch` instead.
    /// A `front` steeper than the pitch limit is pulled back to the limit.
    ///
    /// `config.right` is only consulted when `front` ends up parallel to
    /// world-up and no right vector can be derived.
    pub fn apply_config(&mut self, config: CameraConfig) {
        self.position = config.position;
        self.world_up = safe_normalize(config.up);
        if self.world_up == Vec3::ZERO {
            tracing::warn!("Camera world-up is degenerate, using +Y");
            self.world_up = Vec3::Y;
        }
        self.fallback_right = safe_normalize(config.right);
        if self.fallback_right == Vec3::ZERO {
            self.fallback_right = Vec3::X;
        }
        self.fov = config.fov;
        self.near = config.near;
        self.far = config.far;
        self.move_speed = config.move_speed;
        self.sensitivity = config.sensitivity;

        let front = safe_normalize(config.front);
        if front == Vec3::ZERO {
            self.yaw = config.yaw;
            self.pitch = config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            self.front = front_from_angles(self.yaw, self.pitch);
        } else {
            let pitch = front.y.clamp(-1.0, 1.0).asin().to_degrees();
            self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            self.yaw = front.z.atan2(front.x).to_degrees();
            self.front = if self.pitch == pitch {
                front
            } else {
                front_from_angles(self.yaw, self.pitch)
            };
        }
        self.recalculate_basis();
        self.config = config;

        tracing::debug!(
            "Camera reset: position={:?} yaw={:.1} pitch={:.1}",
            self.position,
            self.yaw,
            self.pitch
        );
    }

    /// Reset to the configuration the camera was last built from.
    pub fn reset(&mut self) {
        self.apply_config(self.config.clone());
    }

    /// Translate along the view basis by `step_scale * move_speed`.
    pub fn move_by(&mut self, direction: CameraMovement, step_scale: f32) {
        let velocity = step_scale * self.move_speed;
        if velocity == 0.0 {
            return;
        }
        let displacement = match direction {
            CameraMovement::Forward => self.front * velocity,
            CameraMovement::Backward => -self.front * velocity,
            CameraMovement::Left => -self.right * velocity,
            CameraMovement::Right => self.right * velocity,
        };
        self.position += displacement;
        self.recalculate_basis();
    }

    /// Turn the camera by the pointer motion from `old` to `new`, in pixels.
    pub fn look(&mut self, old: Vec2, new: Vec2) {
        let delta = new - old;
        self.yaw += -delta.x * self.sensitivity;
        self.pitch =
            (self.pitch + delta.y * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.front = front_from_angles(self.yaw, self.pitch);
        self.recalculate_basis();
    }

    fn recalculate_basis(&mut self) {
        self.front = safe_normalize(self.front);
        self.right = safe_normalize(self.front.cross(self.world_up));
        if self.right.length() < NORM_EPSILON {
            tracing::warn!(
                "Camera front is parallel to world-up, falling back to right={:?}",
                self.fallback_right
            );
            self.right = self.fallback_right;
        }
        self.up = safe_normalize(self.right.cross(self.front));
        if self.up.length() < NORM_EPSILON {
            self.up = Vec3::Y;
        }
    }

    /// Get the view matrix.
    ///
    /// Built directly from the basis: rows are `right`, `up` and `-front`,
    /// with the translation column holding each row dotted with `-position`.
    pub fn view_matrix(&self) -> Mat4 {
        let (r, u, f, p) = (self.right, self.up, self.front, self.position);
        Mat4::from_cols(
            Vec4::new(r.x, u.x, -f.x, 0.0),
            Vec4::new(r.y, u.y, -f.y, 0.0),
            Vec4::new(r.z, u.z, -f.z, 0.0),
            Vec4::new(-r.dot(p), -u.dot(p), f.dot(p), 1.0),
        )
    }

    /// Get the perspective projection matrix for the given aspect ratio.
    ///
    /// Uses the OpenGL depth range of [-1, 1]. A non-positive or non-finite
    /// aspect ratio is treated as 1.
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        let aspect = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            aspect_ratio
        } else {
            1.0
        };
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, self.near, self.far)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}

fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(
        pitch.cos() * yaw.cos(),
        pitch.sin(),
        pitch.cos() * yaw.sin(),
    )
}
