//! Cone membership test.

use glam::DVec3;

/// Unsigned angle between two vectors in degrees. Returns 0 when either
/// vector is too short to have a direction.
pub fn angle_between_deg(a: DVec3, b: DVec3) -> f64 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom < 1e-15 {
        return 0.0;
    }
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Whether `to_target` lies inside a cone around `forward` with a total
/// opening of `cone_angle_deg`.
pub fn within_cone(forward: DVec3, to_target: DVec3, cone_angle_deg: f64) -> bool {
    angle_between_deg(forward, to_target) <= cone_angle_deg * 0.5
}
