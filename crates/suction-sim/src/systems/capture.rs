//! Capture: destroying or storing a target that reached the nozzle.

use glam::DVec3;
use hecs::{Entity, World};

use suction_core::components::{Inactive, Parent, PendingDespawn, RigidBody, StruggleState};
use suction_core::config::SuctionConfig;
use suction_core::enums::CaptureOutcome;
use suction_core::events::SuctionEvent;
use suction_core::state::TickStats;

use crate::container::Container;

/// Everything the capture step needs to know about one target.
#[derive(Debug, Clone)]
pub struct CaptureTarget {
    pub body: Entity,
    /// Entity hidden, stored or destroyed.
    pub root: Entity,
    /// Closest point on the collider, where feedback plays.
    pub point: DVec3,
    pub micro: bool,
    pub material: Option<String>,
    pub volume: f64,
}

/// Engine state the capture step writes to.
pub struct CaptureSink<'a> {
    pub container: &'a mut Container,
    pub holding_node: Entity,
    pub micro_count: &'a mut u32,
    pub carried: &'a mut u32,
    pub stats: &'a mut TickStats,
    pub events: &'a mut Vec<SuctionEvent>,
}

/// Capture one target.
pub fn capture(
    world: &mut World,
    config: &SuctionConfig,
    now: f64,
    target: &CaptureTarget,
    sink: &mut CaptureSink,
) -> CaptureOutcome {
    sink.events.push(SuctionEvent::CaptureFeedback {
        point: target.point,
        material: target.material.clone(),
        volume: target.volume,
    });

    let outcome = if config.destroy_all_on_capture || (target.micro && config.destroy_micro) {
        let _ = world.insert(
            target.root,
            (
                Inactive,
                PendingDespawn {
                    at_secs: now + config.destroy_delay_secs,
                },
            ),
        );
        *sink.micro_count += 1;
        sink.events.push(SuctionEvent::MicroCaptured {
            running_total: *sink.micro_count,
        });
        CaptureOutcome::Destroyed
    } else if sink.container.try_add(target.root) {
        if let Ok(mut rb) = world.get::<&mut RigidBody>(target.body) {
            rb.velocity = DVec3::ZERO;
            rb.angular_velocity = DVec3::ZERO;
            rb.force = DVec3::ZERO;
            rb.kinematic = true;
            rb.use_gravity = false;
        }
        let _ = world.insert(target.root, (Inactive, Parent(sink.holding_node)));
        sink.events.push(SuctionEvent::Captured {
            entity: target.root.into(),
        });
        CaptureOutcome::Stored
    } else {
        log::debug!("container full, {:?} left in place", target.root);
        sink.events.push(SuctionEvent::ContainerFull);
        return CaptureOutcome::ContainerFull;
    };

    *sink.carried += 1;
    sink.stats.captured += 1;
    if world.get::<&StruggleState>(target.body).is_ok() {
        let _ = world.insert_one(target.body, StruggleState::default());
    }
    outcome
}
