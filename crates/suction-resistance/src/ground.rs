//! Ground-contact probes.
//!
//! A target is grounded if any of five short downward rays hits the ground:
//! one from the bounds center and one from each bottom corner, each corner
//! origin lifted slightly so it starts above the contact surface.

use glam::DVec3;

use suction_core::types::Shape;
use suction_geometry::shapes::aabb;

/// One downward ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    pub origin: DVec3,
    pub max_distance: f64,
}

/// Probe rays for a collider centered at `center`.
pub fn ground_probes(shape: &Shape, center: DVec3, probe_distance: f64, lift: f64) -> [GroundProbe; 5] {
    let (min, max) = aabb(shape, center);
    let half_height = center.y - min.y;
    let y = min.y + lift;
    let corner = |x: f64, z: f64| GroundProbe {
        origin: DVec3::new(x, y, z),
        max_distance: lift + probe_distance,
    };
    [
        GroundProbe {
            origin: center,
            max_distance: half_height + probe_distance,
        },
        corner(min.x, min.z),
        corner(max.x, min.z),
        corner(min.x, max.z),
        corner(max.x, max.z),
    ]
}

/// Run the probes through `cast` (origin, max distance) until one hits.
pub fn is_grounded(probes: &[GroundProbe], mut cast: impl FnMut(DVec3, f64) -> bool) -> bool {
    probes.iter().any(|p| cast(p.origin, p.max_distance))
}
