//! Ray intersection against collider shapes.

use glam::DVec3;

use suction_core::types::Shape;

/// Distance along the unit `direction` from `origin` to the first contact
/// with the shape, if it lies within `max_distance`. A ray starting inside
/// the shape hits at distance 0.
pub fn ray_shape(
    shape: &Shape,
    center: DVec3,
    origin: DVec3,
    direction: DVec3,
    max_distance: f64,
) -> Option<f64> {
    let hit = match *shape {
        Shape::Sphere { radius } => ray_sphere(center, radius, origin, direction),
        Shape::Cuboid { half_extents } => {
            let half = half_extents.abs();
            ray_aabb(center - half, center + half, origin, direction)
        }
    }?;
    (hit <= max_distance).then_some(hit)
}

fn ray_sphere(center: DVec3, radius: f64, origin: DVec3, direction: DVec3) -> Option<f64> {
    let oc = origin - center;
    let c = oc.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let b = oc.dot(direction);
    if b > 0.0 {
        return None; // Outside and pointing away
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some(-b - disc.sqrt())
}

/// Slab test.
pub fn ray_aabb(min: DVec3, max: DVec3, origin: DVec3, direction: DVec3) -> Option<f64> {
    let mut t_near = 0.0_f64;
    let mut t_far = f64::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < 1e-15 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }
    Some(t_near)
}
