//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Nozzle pose: the reference point and axis from which range, cone and
/// capture-center offsets are measured. y is up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nozzle {
    pub position: DVec3,
    /// Unit forward axis.
    pub forward: DVec3,
}

impl Nozzle {
    /// Build a nozzle, normalizing `forward`. A degenerate axis falls back to +z.
    pub fn new(position: DVec3, forward: DVec3) -> Self {
        Self {
            position,
            forward: forward.try_normalize().unwrap_or(DVec3::Z),
        }
    }

    /// Capture center: nozzle position pushed forward by `offset` meters.
    pub fn capture_center(&self, offset: f64) -> DVec3 {
        self.position + self.forward * offset
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Collision layer bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layers(pub u32);

impl Layers {
    pub const NONE: Layers = Layers(0);
    pub const DEFAULT: Layers = Layers(1);
    /// Attractable debris.
    pub const TRASH: Layers = Layers(1 << 1);
    /// Walls and props that block line of sight.
    pub const ENVIRONMENT: Layers = Layers(1 << 2);
    /// Floors that count as ground contact for resisting targets.
    pub const GROUND: Layers = Layers(1 << 3);
    /// Trigger volumes (recharge/deposit zones).
    pub const ZONES: Layers = Layers(1 << 4);
    pub const ALL: Layers = Layers(u32::MAX);

    pub fn intersects(self, other: Layers) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: Layers) -> Layers {
        Layers(self.0 | other.0)
    }
}

/// Collision geometry, centered on the owning collider's world center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Sphere { radius: f64 },
    /// Axis-aligned box.
    Cuboid { half_extents: DVec3 },
}

/// Stable, serializable handle for an entity crossing the event boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Resolve back to a hecs entity.
    pub fn entity(self) -> Option<hecs::Entity> {
        hecs::Entity::from_bits(self.0)
    }
}

impl From<hecs::Entity> for EntityId {
    fn from(entity: hecs::Entity) -> Self {
        Self(entity.to_bits().get())
    }
}
