//! Commands sent from the host to the engine.
//!
//! Commands are queued and applied at the next tick boundary. The engine
//! also exposes the same operations as direct methods.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VacuumCommand {
    /// Switch suction on (ignored while energy is at or below the minimum).
    StartSuction,
    /// Switch suction off. Idempotent.
    StopSuction,
    /// Select a mode profile by name.
    SetMode { name: String },
    /// Advance to the next mode profile, wrapping around.
    CycleMode,
    /// Empty the container.
    DrainContainer,
}
