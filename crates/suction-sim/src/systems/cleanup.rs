//! Delayed despawn of destroyed capture roots.

use hecs::{Entity, World};

use suction_core::components::{AttachedBody, Parent, PendingDespawn};

/// Despawn every capture root whose delay has elapsed, together with its
/// descendants and the colliders attached to any of them. Returns how many
/// entities were removed.
pub fn run(world: &mut World, now: f64, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, pending) in world.query_mut::<&PendingDespawn>() {
        if now >= pending.at_secs {
            despawn_buffer.push(entity);
        }
    }
    if despawn_buffer.is_empty() {
        return 0;
    }

    // Pull in descendants until the set stops growing.
    loop {
        let before = despawn_buffer.len();
        let mut found = Vec::new();
        for (entity, parent) in world.query::<&Parent>().iter() {
            if despawn_buffer.contains(&parent.0) && !despawn_buffer.contains(&entity) {
                found.push(entity);
            }
        }
        for (entity, attached) in world.query::<&AttachedBody>().iter() {
            if despawn_buffer.contains(&attached.0) && !despawn_buffer.contains(&entity) {
                found.push(entity);
            }
        }
        found.sort_by_key(|e| e.to_bits());
        found.dedup();
        despawn_buffer.extend(found);
        if despawn_buffer.len() == before {
            break;
        }
    }

    let mut removed = 0;
    for entity in despawn_buffer.drain(..) {
        if world.despawn(entity).is_ok() {
            removed += 1;
        }
    }
    removed
}
