//! Per-frame scene orchestration.
//!
//! This module provides the [`Renderer`] that owns the current scene tree
//! and both navigation models, and runs one frame at a time:
//!
//! 1. Select view and projection from the camera or the trackball
//! 2. Collect lights and meshes in a pre-pass over the tree
//! 3. Apply the first light's color to every mesh
//! 4. Draw the tree from the identity matrix
//!
//! Only the first collected light is used for shading. A scene with no light
//! at all fails the frame with [`Error::MissingLight`].

use glam::{Mat4, Vec2};
use tracing::{debug, trace, warn};

use viz_core::{EngineConfig, Error, Result};
use viz_scene::{Camera, CameraMovement, FrameContext, Node, Trackball};

/// Host-provided inputs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Viewport width over height, used by the camera projection
    pub aspect_ratio: f32,
    /// Drawable area in pixels, used by the trackball
    pub window_size: Vec2,
    /// Seconds since the previous frame
    pub dt: f32,
}

impl FrameInput {
    /// Inputs for a `width` x `height` viewport.
    ///
    /// A collapsed window gets an aspect ratio of 1.
    pub fn new(width: u32, height: u32, dt: f32) -> Self {
        let aspect_ratio = if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        Self {
            aspect_ratio,
            window_size: Vec2::new(width as f32, height as f32),
            dt,
        }
    }
}

/// Counts reported by the light-collection pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub lights: usize,
    pub meshes: usize,
}

/// Owns the scene and navigation state and renders frames.
#[derive(Debug)]
pub struct Renderer {
    scene: Option<Node>,
    camera: Camera,
    trackball: Trackball,
    use_trackball: bool,
    /// Set once per scene so extra lights are reported a single time
    extra_lights_reported: bool,
    frame_count: u64,
}

impl Renderer {
    /// Create a renderer with navigation models built from `config`.
    pub fn new(config: &EngineConfig) -> Self {
        debug!(
            "Creating renderer ({} navigation)",
            if config.use_trackball { "trackball" } else { "camera" }
        );
        Self {
            scene: None,
            camera: Camera::new(config.camera.clone()),
            trackball: Trackball::new(config.trackball.clone()),
            use_trackball: config.use_trackball,
            extra_lights_reported: false,
            frame_count: 0,
        }
    }

    /// Replace the current scene, dropping the previous tree.
    ///
    /// Camera and trackball state carry over.
    pub fn set_scene(&mut self, root: Node) {
        debug!(
            "Attaching scene '{}' ({} nodes)",
            root.name(),
            root.node_count()
        );
        self.scene = Some(root);
        self.extra_lights_reported = false;
    }

    /// Detach and return the current scene.
    pub fn take_scene(&mut self) -> Option<Node> {
        self.scene.take()
    }

    pub fn scene(&self) -> Option<&Node> {
        self.scene.as_ref()
    }

    /// Choose which navigation model supplies view and projection.
    pub fn set_use_trackball(&mut self, use_trackball: bool) {
        if self.use_trackball != use_trackball {
            debug!(
                "Switching navigation to {}",
                if use_trackball { "trackball" } else { "camera" }
            );
        }
        self.use_trackball = use_trackball;
    }

    pub fn use_trackball(&self) -> bool {
        self.use_trackball
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn trackball(&self) -> &Trackball {
        &self.trackball
    }

    pub fn trackball_mut(&mut self) -> &mut Trackball {
        &mut self.trackball
    }

    /// Number of frames rendered successfully.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// View and projection from the active navigation model.
    pub fn view_projection(&self, input: &FrameInput) -> (Mat4, Mat4) {
        if self.use_trackball {
            (
                self.trackball.view_matrix(),
                self.trackball.projection_matrix(input.window_size),
            )
        } else {
            (
                self.camera.view_matrix(),
                self.camera.projection_matrix(input.aspect_ratio),
            )
        }
    }

    /// Render one frame of the current scene.
    ///
    /// With no scene attached this does nothing and reports zero counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLight`] if the scene contains no light node,
    /// and propagates the first error raised by a shape.
    pub fn render(&mut self, input: FrameInput) -> Result<FrameStats> {
        let (view, projection) = self.view_projection(&input);
        let Some(root) = self.scene.as_mut() else {
            trace!("No scene attached, skipping frame");
            return Ok(FrameStats::default());
        };

        let stats = {
            let items = root.collect();
            let stats = FrameStats {
                lights: items.lights.len(),
                meshes: items.meshes.len(),
            };
            let color = items
                .lights
                .first()
                .map(|light| light.color())
                .ok_or(Error::MissingLight)?;
            for mesh in items.meshes {
                mesh.lighting(color);
            }
            stats
        };

        if stats.lights > 1 && !self.extra_lights_reported {
            warn!(
                "Scene has {} lights; only the first is used for shading",
                stats.lights
            );
            self.extra_lights_reported = true;
        }

        let frame = FrameContext {
            view,
            projection,
            dt: input.dt,
        };
        root.draw(Mat4::IDENTITY, &frame)?;

        self.frame_count += 1;
        trace!(
            "Frame {} drawn: {} meshes, {} lights",
            self.frame_count, stats.meshes, stats.lights
        );
        Ok(stats)
    }

    /// Move the first-person camera.
    pub fn move_camera(&mut self, direction: CameraMovement, step_scale: f32) {
        self.camera.move_by(direction, step_scale);
    }

    /// Turn the first-person camera by a pointer motion.
    pub fn rotate_camera(&mut self, old: Vec2, new: Vec2) {
        self.camera.look(old, new);
    }

    /// Pan the trackball by a pointer motion.
    pub fn move_trackball(&mut self, old: Vec2, new: Vec2) {
        self.trackball.pan(old, new);
    }

    /// Rotate the trackball by a pointer drag.
    pub fn rotate_trackball(&mut self, old: Vec2, new: Vec2, window_size: Vec2) {
        self.trackball.drag(old, new, window_size);
    }

    /// Zoom the trackball by a scroll amount.
    pub fn zoom_trackball(&mut self, delta: f32, window_height: f32) {
        self.trackball.zoom(delta, window_height);
    }
}
