//! Agent-to-physics handoff for bodies that normally move on their own.
//!
//! A kinematic body carrying a [`SuctionLink`] is handed to physics the first
//! tick it receives suction force, and handed back to its agent once it has
//! gone `return_after_secs` without any.

use std::collections::HashSet;

use glam::DVec3;
use hecs::{Entity, World};

use suction_core::components::{RigidBody, SuctionLink};
use suction_core::enums::BodyControl;

/// Put a linked body under physics control. No-op for unlinked bodies.
pub fn engage(world: &mut World, body: Entity) {
    let Ok((link, rb)) = world.query_one_mut::<(&mut SuctionLink, &mut RigidBody)>(body) else {
        return;
    };
    link.idle_secs = 0.0;
    if link.control == BodyControl::Agent {
        link.control = BodyControl::Physics;
        rb.kinematic = false;
        rb.use_gravity = true;
        log::debug!("suction link: {body:?} handed to physics");
    }
}

/// Advance idle timers and return released bodies to their agents.
/// `attracted` holds the bodies that received force this tick.
pub fn run(world: &mut World, dt: f64, attracted: &HashSet<Entity>) {
    for (entity, (link, rb)) in world.query_mut::<(&mut SuctionLink, &mut RigidBody)>() {
        if link.control != BodyControl::Physics || attracted.contains(&entity) {
            continue;
        }
        link.idle_secs += dt;
        if link.idle_secs < link.return_after_secs {
            continue;
        }
        link.control = BodyControl::Agent;
        link.idle_secs = 0.0;
        rb.kinematic = true;
        rb.use_gravity = false;
        rb.velocity = DVec3::ZERO;
        rb.angular_velocity = DVec3::ZERO;
        rb.force = DVec3::ZERO;
        if let Some(height) = link.pin_height {
            rb.position.y = height;
        }
        log::debug!("suction link: {entity:?} returned to agent");
    }
}
