//! Engine snapshot: the visible state handed to the host after each tick.

use serde::{Deserialize, Serialize};

use crate::events::SuctionEvent;
use crate::types::SimTime;

/// Complete engine state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VacuumSnapshot {
    pub time: SimTime,
    pub active: bool,
    pub mode: String,
    pub energy: EnergyView,
    pub container: ContainerView,
    /// Micro targets destroyed so far.
    pub micro_captured: u32,
    /// Captures (micro and stored) since the last deposit.
    pub carried: u32,
    pub stats: TickStats,
    pub feedback: FeedbackLevels,
    pub events: Vec<SuctionEvent>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnergyView {
    pub current: f64,
    pub max: f64,
    /// `current / max`.
    pub fraction: f64,
    /// Number of recharge zones currently overlapped.
    pub zones: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ContainerView {
    pub len: usize,
    pub capacity: usize,
}

/// Per-tick counters from the suction step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickStats {
    /// Candidates returned by discovery.
    pub candidates: u32,
    /// Candidates visited under the object budget.
    pub processed: u32,
    pub force_applied: u32,
    pub captured: u32,
    pub skipped_no_body: u32,
    pub skipped_mass: u32,
    pub skipped_cone: u32,
    pub skipped_los: u32,
    pub skipped_cooldown: u32,
    pub raycasts: u32,
    pub los_cache_hits: u32,
}

/// Presentation levels derived from the suction load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackLevels {
    /// Normalized load, 0..1.
    pub load: f64,
    pub motor_pitch: f64,
    pub motor_volume: f64,
    /// Particles per second at the nozzle.
    pub particle_rate: f64,
    pub fov_kick: f64,
    pub shake_amplitude: f64,
}
