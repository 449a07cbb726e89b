//! Rigid-body integration for hosts without a physics engine of their own.
//!
//! Semi-implicit Euler: velocity from accumulated force (and gravity), then
//! position from the new velocity. Consumes `RigidBody::force`.

use glam::DVec3;
use hecs::World;

use suction_core::components::{Inactive, RigidBody};

/// Integrate every active, non-kinematic body by `dt`. Bodies are kept at or
/// above `floor` when one is given.
pub fn run(world: &mut World, dt: f64, gravity: f64, floor: Option<f64>) {
    for (_entity, (body, inactive)) in world.query_mut::<(&mut RigidBody, Option<&Inactive>)>() {
        if inactive.is_some() || body.kinematic {
            body.force = DVec3::ZERO;
            continue;
        }
        let mut accel = if body.mass > 0.0 {
            body.force / body.mass
        } else {
            DVec3::ZERO
        };
        if body.use_gravity {
            accel.y -= gravity;
        }
        body.velocity += accel * dt;
        body.position += body.velocity * dt;
        body.force = DVec3::ZERO;

        if let Some(floor) = floor {
            if body.position.y < floor {
                body.position.y = floor;
                body.velocity.y = body.velocity.y.max(0.0);
            }
        }
    }
}
