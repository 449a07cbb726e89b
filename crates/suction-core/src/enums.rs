//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// What happened to a target that reached the capture radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureOutcome {
    /// Capture root deactivated and scheduled for despawn.
    Destroyed,
    /// Capture root hidden and moved into the container.
    Stored,
    /// Container had no spare capacity; the target stays in the world.
    ContainerFull,
}

/// Who drives a body carrying a `SuctionLink`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyControl {
    /// Kinematic, moved by its own agent.
    #[default]
    Agent,
    /// Dynamic, driven by forces.
    Physics,
}

/// Interpolation rule between curve keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    #[default]
    Linear,
    /// Smoothstep between neighbouring keys (flat tangents at every key).
    Smooth,
}

/// Why a candidate was not force-applied this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    NoBody,
    Mass,
    Cone,
    LineOfSight,
}
