//! Virtual trackball (arcball) navigation.
//!
//! Pointer drags are mapped onto a virtual sphere in front of the viewer and
//! turned into a rotation quaternion that is accumulated into the current
//! orientation. The view orbits the origin at `distance`, offset in screen
//! space by a pan vector.
//!
//! Pointer positions are in pixels with the origin at the bottom-left of the
//! window; hosts whose cursor origin is top-left flip `y` before calling in.
//!
//! # Example
//!
//! ```
//! use viz_core::TrackballConfig;
//! use viz_scene::Trackball;
//! use glam::Vec2;
//!
//! let mut trackball = Trackball::new(TrackballConfig::default());
//! let window = Vec2::new(800.0, 600.0);
//! trackball.drag(Vec2::new(400.0, 300.0), Vec2::new(450.0, 300.0), window);
//! assert!((trackball.rotation().length() - 1.0).abs() < 1e-4);
//! ```

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use viz_core::TrackballConfig;

use crate::math::{NORM_EPSILON, safe_normalize};

/// Lower bound on the eye distance; keeps the scaled near plane positive.
pub const MIN_DISTANCE: f32 = 0.001;

/// Radius of the virtual sphere in normalized device coordinates.
pub const ARCBALL_RADIUS: f32 = 0.8;

/// Vertical field of view in degrees.
pub const TRACKBALL_FOV: f32 = 35.0;

/// Near and far planes as multiples of the current distance.
const NEAR_FAR_SCALE: (f32, f32) = (0.1, 100.0);

/// Scroll sensitivity relative to the window height.
const ZOOM_RATE: f32 = 50.0;

/// Arcball navigation state.
#[derive(Clone, Debug)]
pub struct Trackball {
    rotation: Quat,
    distance: f32,
    pan: Vec2,
    pan_sensitivity: f32,
    config: TrackballConfig,
}

impl Default for Trackball {
    fn default() -> Self {
        Self::new(TrackballConfig::default())
    }
}

impl Trackball {
    /// Create a trackball from a configuration snapshot.
    pub fn new(config: TrackballConfig) -> Self {
        let mut trackball = Self {
            rotation: Quat::IDENTITY,
            distance: config.distance,
            pan: Vec2::ZERO,
            pan_sensitivity: config.pan_sensitivity,
            config: config.clone(),
        };
        trackball.apply_config(config);
        trackball
    }

    /// Reset all state from a configuration snapshot.
    ///
    /// The initial orientation is yaw about Y, then pitch about X, then roll
    /// about Z, in degrees unless `config.radians` is set.
    pub fn apply_config(&mut self, config: TrackballConfig) {
        let convert = |angle: f32| {
            if config.radians {
                angle
            } else {
                angle.to_radians()
            }
        };
        self.rotation = Quat::from_euler(
            EulerRot::YXZ,
            convert(config.yaw),
            convert(config.pitch),
            convert(config.roll),
        )
        .normalize();
        self.distance = config.distance.max(MIN_DISTANCE);
        self.pan = Vec2::ZERO;
        self.pan_sensitivity = config.pan_sensitivity;
        self.config = config;

        tracing::debug!(
            "Trackball reset: distance={:.3} rotation={:?}",
            self.distance,
            self.rotation
        );
    }

    /// Reset to the configuration the trackball was last built from.
    pub fn reset(&mut self) {
        self.apply_config(self.config.clone());
    }

    /// Rotate by the pointer drag from `old` to `new` within a window of `window_size` pixels.
    pub fn drag(&mut self, old: Vec2, new: Vec2, window_size: Vec2) {
        if window_size.x <= 0.0 || window_size.y <= 0.0 {
            return;
        }
        let old = to_ndc(old, window_size);
        let new = to_ndc(new, window_size);
        let delta = arc_rotation(project_to_sphere(old), project_to_sphere(new));
        self.rotation = (delta * self.rotation).normalize();
    }

    /// Shift the view in screen space by the pointer motion from `old` to `new`.
    ///
    /// The shift scales with distance so panning feels the same at any zoom.
    pub fn pan(&mut self, old: Vec2, new: Vec2) {
        self.pan += (new - old) * self.pan_sensitivity * self.distance;
    }

    /// Zoom by a scroll amount; positive values move closer.
    pub fn zoom(&mut self, delta: f32, window_height: f32) {
        if window_height <= 0.0 {
            return;
        }
        let factor = 1.0 - ZOOM_RATE * delta / window_height;
        self.distance = (self.distance * factor).max(MIN_DISTANCE);
    }

    /// Get the view matrix: orientation first, then pan and pull-back.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.pan.x, self.pan.y, -self.distance))
            * Mat4::from_quat(self.rotation)
    }

    /// Get the projection matrix, with clip planes that follow the distance.
    pub fn projection_matrix(&self, window_size: Vec2) -> Mat4 {
        let aspect = if window_size.x > 0.0 && window_size.y > 0.0 {
            window_size.x / window_size.y
        } else {
            1.0
        };
        let (near, far) = (
            NEAR_FAR_SCALE.0 * self.distance,
            NEAR_FAR_SCALE.1 * self.distance,
        );
        Mat4::perspective_rh_gl(TRACKBALL_FOV.to_radians(), aspect, near, far)
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Accumulated screen-space pan offset.
    pub fn pan_offset(&self) -> Vec2 {
        self.pan
    }

    pub fn config(&self) -> &TrackballConfig {
        &self.config
    }
}

/// Map a pixel position into [-1, 1] on both axes.
fn to_ndc(position: Vec2, window_size: Vec2) -> Vec2 {
    (2.0 * position - window_size) / window_size
}

/// Lift a 2D point onto the virtual sphere, or onto a hyperbolic sheet
/// outside it so rotation stays continuous past the sphere's edge.
fn project_to_sphere(p: Vec2) -> Vec3 {
    let p2 = p.length_squared();
    let r2 = ARCBALL_RADIUS * ARCBALL_RADIUS;
    let z = if 2.0 * p2 < r2 {
        (r2 - p2).sqrt()
    } else {
        r2 / (2.0 * p2.sqrt())
    };
    p.extend(z)
}

/// Unit quaternion rotating `from` onto `to`.
fn arc_rotation(from: Vec3, to: Vec3) -> Quat {
    let from = safe_normalize(from);
    let to = safe_normalize(to);
    let axis = from.cross(to);
    if axis.length() < NORM_EPSILON {
        return Quat::IDENTITY;
    }
    let angle = 2.0 * from.dot(to).clamp(-1.0, 1.0).acos();
    Quat::from_axis_angle(axis.normalize(), angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;
    const WINDOW: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_default_state() {
        let trackball = Trackball::default();
        assert_eq!(trackball.rotation(), Quat::IDENTITY);
        assert_eq!(trackball.distance(), 10.0);
        assert_eq!(trackball.pan_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_ndc_mapping() {
        assert_eq!(to_ndc(Vec2::ZERO, WINDOW), Vec2::new(-1.0, -1.0));
        assert_eq!(to_ndc(WINDOW * 0.5, WINDOW), Vec2::ZERO);
        assert_eq!(to_ndc(WINDOW, WINDOW), Vec2::ONE);
    }

    #[test]
    fn test_projection_inside_sphere() {
        let p = project_to_sphere(Vec2::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, ARCBALL_RADIUS)).length() < EPSILON);
        let q = project_to_sphere(Vec2::new(0.3, 0.0));
        assert!((q.length() - ARCBALL_RADIUS).abs() < EPSILON);
    }

    #[test]
    fn test_projection_outside_sphere_is_continuous() {
        let r2 = ARCBALL_RADIUS * ARCBALL_RADIUS;
        let boundary = (r2 / 2.0).sqrt();
        let inside = project_to_sphere(Vec2::new(boundary - 1e-4, 0.0));
        let outside = project_to_sphere(Vec2::new(boundary + 1e-4, 0.0));
        assert!((inside.z - outside.z).abs() < 1e-3);
        let far = project_to_sphere(Vec2::new(10.0, 10.0));
        assert!(far.z > 0.0 && far.z.is_finite());
    }

    #[test]
    fn test_zero_drag_is_identity() {
        let mut trackball = Trackball::default();
        let p = Vec2::new(123.0, 456.0);
        trackball.drag(p, p, WINDOW);
        assert!(trackball.rotation().abs_diff_eq(Quat::IDENTITY, EPSILON));
    }

    #[test]
    fn test_horizontal_drag_rotates_about_y() {
        let mut trackball = Trackball::default();
        trackball.drag(Vec2::new(400.0, 300.0), Vec2::new(500.0, 300.0), WINDOW);
        let (axis, angle) = trackball.rotation().to_axis_angle();
        assert!(angle > 0.0);
        assert!((axis - Vec3::Y).length() < 1e-4, "axis {:?}", axis);
        // Dragging right brings the near side of the sphere to the right
        let moved = trackball.rotation() * Vec3::Z;
        assert!(moved.x > 0.0);
    }

    #[test]
    fn test_rotation_stays_unit_after_many_drags() {
        let mut trackball = Trackball::default();
        let mut last = Vec2::new(400.0, 300.0);
        for i in 0..1000 {
            let t = i as f32 * 0.1;
            let next = Vec2::new(400.0 + 390.0 * t.cos(), 300.0 + 290.0 * (1.3 * t).sin());
            trackball.drag(last, next, WINDOW);
            last = next;
        }
        assert!((trackball.rotation().length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_drag_outside_window_is_finite() {
        let mut trackball = Trackball::default();
        trackball.drag(Vec2::new(-500.0, -500.0), Vec2::new(5000.0, 4000.0), WINDOW);
        assert!(trackball.rotation().is_finite());
        assert!((trackball.rotation().length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_antipodal_drag_is_ignored() {
        let from = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(arc_rotation(from, -from), Quat::IDENTITY);
    }

    #[test]
    fn test_degenerate_window_ignored() {
        let mut trackball = Trackball::default();
        trackball.drag(Vec2::ZERO, Vec2::ONE, Vec2::ZERO);
        assert_eq!(trackball.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn test_pan_scales_with_distance() {
        let mut near = Trackball::new(TrackballConfig {
            distance: 1.0,
            ..TrackballConfig::default()
        });
        let mut far = Trackball::new(TrackballConfig {
            distance: 4.0,
            ..TrackballConfig::default()
        });
        near.pan(Vec2::ZERO, Vec2::new(100.0, 0.0));
        far.pan(Vec2::ZERO, Vec2::new(100.0, 0.0));
        assert!((near.pan_offset().x - 0.1).abs() < EPSILON);
        assert!((far.pan_offset().x - 0.4).abs() < EPSILON);
    }

    #[test]
    fn test_zoom_in_and_out() {
        let mut trackball = Trackball::default();
        trackball.zoom(1.0, 1000.0);
        assert!((trackball.distance() - 9.5).abs() < EPSILON);
        trackball.zoom(-2.0, 1000.0);
        assert!((trackball.distance() - 10.45).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_floor() {
        let mut trackball = Trackball::default();
        for _ in 0..100 {
            trackball.zoom(1000.0, 600.0);
            assert!(trackball.distance() >= MIN_DISTANCE);
        }
        assert_eq!(trackball.distance(), MIN_DISTANCE);
    }

    #[test]
    fn test_distance_floor_from_config() {
        let trackball = Trackball::new(TrackballConfig {
            distance: -3.0,
            ..TrackballConfig::default()
        });
        assert_eq!(trackball.distance(), MIN_DISTANCE);
    }

    #[test]
    fn test_view_matrix_places_origin_at_distance() {
        let mut trackball = Trackball::default();
        trackball.drag(Vec2::new(400.0, 300.0), Vec2::new(480.0, 340.0), WINDOW);
        let origin = trackball.view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.0, -10.0)).length() < EPSILON);
    }

    #[test]
    fn test_view_matrix_includes_pan() {
        let mut trackball = Trackball::default();
        trackball.pan(Vec2::ZERO, Vec2::new(100.0, -50.0));
        let origin = trackball.view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, -0.5, -10.0)).length() < EPSILON);
    }

    #[test]
    fn test_projection_planes_track_distance() {
        let mut trackball = Trackball::default();
        let expected = Mat4::perspective_rh_gl(35.0_f32.to_radians(), 800.0 / 600.0, 1.0, 1000.0);
        assert!(trackball.projection_matrix(WINDOW).abs_diff_eq(expected, 1e-4));

        trackball.zoom(10.0, 1000.0);
        let d = trackball.distance();
        let fov = 35.0_f32.to_radians();
        let expected = Mat4::perspective_rh_gl(fov, 800.0 / 600.0, 0.1 * d, 100.0 * d);
        assert!(trackball.projection_matrix(WINDOW).abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_initial_orientation_from_config() {
        let trackball = Trackball::new(TrackballConfig {
            yaw: 90.0,
            ..TrackballConfig::default()
        });
        let expected = Quat::from_rotation_y(90.0_f32.to_radians());
        assert!(trackball.rotation().abs_diff_eq(expected, EPSILON));

        let radians = Trackball::new(TrackballConfig {
            pitch: std::f32::consts::FRAC_PI_2,
            radians: true,
            ..TrackballConfig::default()
        });
        let expected = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);
        assert!(radians.rotation().abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn test_reset_restores_config() {
        let mut trackball = Trackball::default();
        trackball.drag(Vec2::new(400.0, 300.0), Vec2::new(600.0, 100.0), WINDOW);
        trackball.pan(Vec2::ZERO, Vec2::new(10.0, 10.0));
        trackball.zoom(5.0, 600.0);
        trackball.reset();
        assert_eq!(trackball.rotation(), Quat::IDENTITY);
        assert_eq!(trackball.distance(), 10.0);
        assert_eq!(trackball.pan_offset(), Vec2::ZERO);
    }
}
