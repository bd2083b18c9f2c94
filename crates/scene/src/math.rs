//! Small numeric guards shared by the navigation models.

use glam::Vec3;

/// Norms below this are treated as zero.
pub const NORM_EPSILON: f32 = 1e-6;

/// Normalize `v`, returning the zero vector when its norm is below [`NORM_EPSILON`].
///
/// Unlike [`Vec3::normalize`], this never divides by a near-zero length, so
/// degenerate inputs cannot produce NaN.
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let norm = v.length();
    if norm < NORM_EPSILON {
        Vec3::ZERO
    } else {
        v / norm
    }
}
