//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems.
//! Components that hold `hecs::Entity` are not serializable.

use glam::DVec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::enums::BodyControl;
use crate::types::{Layers, Shape};

/// Rigid body state. `position` is the body origin in world space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    pub position: DVec3,
    pub velocity: DVec3,
    pub angular_velocity: DVec3,
    /// Physical mass (kg).
    pub mass: f64,
    /// Center of mass relative to `position`.
    pub center_of_mass: DVec3,
    pub kinematic: bool,
    pub use_gravity: bool,
    /// Force accumulated this tick, consumed by integration.
    pub force: DVec3,
}

/// Collision geometry. World center is the attached body's position plus
/// `offset`, or the entity's own `Transform` for static colliders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub shape: Shape,
    pub offset: DVec3,
    pub layers: Layers,
}

/// World placement of a collider that has no body.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
}

/// Links a collider entity to the body it belongs to.
/// A collider without this component uses a `RigidBody` on its own entity.
#[derive(Debug, Clone, Copy)]
pub struct AttachedBody(pub Entity);

/// Scene-graph parent. Deactivating an ancestor hides the whole subtree.
#[derive(Debug, Clone, Copy)]
pub struct Parent(pub Entity);

/// Marks an entity (and its subtree) as inactive. Inactive colliders are
/// invisible to scene queries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Inactive;

/// Scheduled despawn of a deactivated capture root.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PendingDespawn {
    pub at_secs: f64,
}

/// Per-type trash data shared by many targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialData {
    pub id: String,
    /// Micro debris is destroyed on capture instead of stored.
    pub micro: bool,
    /// Non-capturable material is attracted but never enters the nozzle.
    pub capturable: bool,
    /// Virtual mass used for suction math. 0 means "use the body mass".
    pub virtual_mass: f64,
    /// Ease of suction (1 = normal, > 1 easier, < 1 harder).
    pub suction_multiplier: f64,
    /// Volume of the one-shot capture sound (0..1).
    pub sfx_volume: f64,
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            id: "trash".into(),
            micro: true,
            capturable: true,
            virtual_mass: 0.0,
            suction_multiplier: 1.0,
            sfx_volume: 0.8,
        }
    }
}

/// Resistance parameters a target declares to struggle against capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resistance {
    /// Progress required before capture is permitted.
    pub capacity: f64,
    /// Progress lost per second while not being struggled.
    pub regeneration_per_sec: f64,
    /// Divides the progress gain; > 1 resists harder.
    pub multiplier: f64,
    /// Only resists while touching ground.
    pub requires_ground: bool,
    /// A ground-requiring target that is lifted off may be captured at once.
    pub capture_on_liftoff: bool,
    /// Downward force scaled by remaining resistance. 0 disables adherence.
    pub adherence_force: f64,
}

/// Suction data attached to any attractable entity.
#[derive(Debug, Clone)]
pub struct TargetDescriptor {
    pub material: Option<MaterialData>,
    /// If > 0, replaces every other mass for suction math.
    pub virtual_mass_override: f64,
    /// Combined with the material multiplier; floored at 0.01.
    pub extra_suction_multiplier: f64,
    pub resistance: Option<Resistance>,
    /// Object hidden or destroyed on capture, if not the body's root.
    pub capture_root: Option<Entity>,
}

impl Default for TargetDescriptor {
    fn default() -> Self {
        Self {
            material: None,
            virtual_mass_override: 0.0,
            extra_suction_multiplier: 1.0,
            resistance: None,
            capture_root: None,
        }
    }
}

/// Live struggle state of a resisting target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StruggleState {
    /// Always within `0..=capacity`.
    pub progress: f64,
    pub active: bool,
}

/// Recharge trigger volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RechargeZone {
    /// Units per second (continuous) or units granted once on entry.
    /// Values <= 0 mean "use the ledger's base rate".
    pub rate_per_sec: f64,
    pub continuous: bool,
}

/// Deposit trigger volume: entering it empties the container.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DepositZone;

/// Hands a kinematic, agent-driven body over to physics while it is being
/// sucked, and back once suction stops for a while.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SuctionLink {
    pub return_after_secs: f64,
    pub idle_secs: f64,
    pub control: BodyControl,
    /// Height snapped to when control returns to the agent.
    pub pin_height: Option<f64>,
}

/// Marks the internal holding node that stored captures are parented under.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HoldingNode;
