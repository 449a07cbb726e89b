//! Events emitted by the engine for scoring, audio and UI collaborators.
//!
//! The engine collects these per tick; the host drains them from the
//! snapshot and dispatches them to subscribers.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SuctionEvent {
    /// A micro target (or any target under destroy-all) was destroyed.
    MicroCaptured { running_total: u32 },
    /// A target was stored in the container.
    Captured { entity: EntityId },
    /// A target reached the capture radius but the container is full.
    ContainerFull,
    /// One-shot capture effect at the closest point of the captured collider.
    CaptureFeedback {
        point: DVec3,
        material: Option<String>,
        volume: f64,
    },
    /// Energy level changed (normalized 0..1).
    EnergyChanged { fraction: f64 },
    /// The active mode profile changed.
    ModeChanged { name: String },
    /// Suction was switched on or off (including forced deactivation).
    SuctionStateChanged { active: bool },
    /// The container was emptied.
    Deposited { count: u32 },
}
