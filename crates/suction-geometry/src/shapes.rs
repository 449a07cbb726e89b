//! Point queries against collider shapes.

use glam::DVec3;

use suction_core::types::Shape;

/// Axis-aligned bounds `(min, max)` of `shape` centered at `center`.
pub fn aabb(shape: &Shape, center: DVec3) -> (DVec3, DVec3) {
    let half = half_extents(shape);
    (center - half, center + half)
}

/// Half extents of the shape's bounding box.
pub fn half_extents(shape: &Shape) -> DVec3 {
    match *shape {
        Shape::Sphere { radius } => DVec3::splat(radius),
        Shape::Cuboid { half_extents } => half_extents.abs(),
    }
}

/// Closest point on or inside the shape to `point`. Points inside the shape
/// are returned unchanged.
pub fn closest_point(shape: &Shape, center: DVec3, point: DVec3) -> DVec3 {
    match *shape {
        Shape::Sphere { radius } => {
            let offset = point - center;
            let dist = offset.length();
            if dist <= radius {
                point
            } else {
                center + offset * (radius / dist)
            }
        }
        Shape::Cuboid { half_extents } => {
            let half = half_extents.abs();
            point.clamp(center - half, center + half)
        }
    }
}

/// Whether `point` lies inside or on the shape.
pub fn contains_point(shape: &Shape, center: DVec3, point: DVec3) -> bool {
    closest_point(shape, center, point).distance_squared(point) <= 1e-18
}

/// Whether the shape touches the sphere `(sphere_center, radius)`.
pub fn overlaps_sphere(shape: &Shape, center: DVec3, sphere_center: DVec3, radius: f64) -> bool {
    closest_point(shape, center, sphere_center).distance_squared(sphere_center) <= radius * radius
}
