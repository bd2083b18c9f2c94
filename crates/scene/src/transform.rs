//! Local transforms carried by scene nodes.
//!
//! A [`Transform`] is a small closed family of elementary transforms. Its
//! [`matrix`](Transform::matrix) is a pure function of the current field
//! values; per-frame changes come only from an
//! [`Animation`](crate::Animation) applied by the owning node.
//!
//! # Example
//!
//! ```
//! use viz_scene::Transform;
//! use glam::Vec3;
//!
//! // Rotate about Z first, then translate
//! let t = Transform::composite([
//!     Transform::translate(1.0, 0.0, 0.0),
//!     Transform::rotate_degrees(Vec3::Z, 90.0),
//! ]);
//!
//! let p = t.matrix().transform_point3(Vec3::X);
//! assert!((p - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
//! ```

use glam::{Mat4, Vec3};

use crate::math::safe_normalize;

/// An elementary or composite local transform.
#[derive(Clone, Debug, PartialEq)]
pub enum Transform {
    /// Translation by a vector
    Translate(Vec3),
    /// Per-axis scale
    Scale(Vec3),
    /// Rotation about an axis
    Rotate {
        axis: Vec3,
        /// Angle in degrees, or radians when `radians` is set
        angle: f32,
        radians: bool,
    },
    /// Members folded in list order: `m0 * m1 * ... * mn`
    Composite(Vec<Transform>),
}

impl Default for Transform {
    fn default() -> Self {
        Transform::Composite(Vec::new())
    }
}

impl Transform {
    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        Transform::Translate(Vec3::new(x, y, z))
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Transform::Scale(Vec3::new(x, y, z))
    }

    pub fn uniform_scale(factor: f32) -> Self {
        Transform::Scale(Vec3::splat(factor))
    }

    /// Rotation of `angle` degrees about `axis`.
    pub fn rotate_degrees(axis: Vec3, angle: f32) -> Self {
        Transform::Rotate {
            axis,
            angle,
            radians: false,
        }
    }

    /// Rotation of `angle` radians about `axis`.
    pub fn rotate_radians(axis: Vec3, angle: f32) -> Self {
        Transform::Rotate {
            axis,
            angle,
            radians: true,
        }
    }

    pub fn composite(members: impl IntoIterator<Item = Transform>) -> Self {
        Transform::Composite(members.into_iter().collect())
    }

    /// Get the 4x4 matrix for the current field values.
    ///
    /// A rotation about a zero-length axis and an empty composite both yield
    /// the identity matrix.
    pub fn matrix(&self) -> Mat4 {
        match self {
            Transform::Translate(offset) => Mat4::from_translation(*offset),
            Transform::Scale(factors) => Mat4::from_scale(*factors),
            Transform::Rotate {
                axis,
                angle,
                radians,
            } => {
                let axis = safe_normalize(*axis);
                if axis == Vec3::ZERO {
                    return Mat4::IDENTITY;
                }
                let angle = if *radians { *angle } else { angle.to_radians() };
                Mat4::from_axis_angle(axis, angle)
            }
            Transform::Composite(members) => members
                .iter()
                .fold(Mat4::IDENTITY, |acc, member| acc * member.matrix()),
        }
    }

    /// Rotation angle in radians, if this is a rotation.
    pub fn angle_radians(&self) -> Option<f32> {
        match self {
            Transform::Rotate { angle, radians, .. } => {
                Some(if *radians { *angle } else { angle.to_radians() })
            }
            _ => None,
        }
    }
}
