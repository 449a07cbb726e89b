//! Runtime configuration for the vacuum engine.
//!
//! [`SuctionConfig`] mirrors every tunable in [`crate::constants`]. Missing
//! JSON keys fall back to those defaults at every nesting level, so a minimal
//! file can override just the values you care about:
//!
//! ```json
//! { "container_capacity": 4, "energy": { "max": 50.0, "initial": 50.0 } }
//! ```
//!
//! Always call [`SuctionConfig::validate`] after deserializing; `load` and
//! `from_json_str` do so for you.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::Resistance;
use crate::constants::*;
use crate::curve::Curve;
use crate::error::*;
use crate::types::Layers;

/// Named parameter bundle selectable at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeProfile {
    pub name: String,
    /// Suction range (meters).
    pub range: f64,
    /// Total cone angle (degrees).
    pub cone_angle_deg: f64,
    pub base_stiffness: f64,
    /// Multiplier over critical damping.
    pub damping_factor: f64,
    pub energy_cost_per_sec: f64,
    /// Camera FOV kick at full load (degrees).
    pub fov_kick: f64,
    /// Camera shake amplitude at full load (meters).
    pub shake_amplitude: f64,
}

impl Default for ModeProfile {
    fn default() -> Self {
        Self {
            name: "standard".into(),
            range: RANGE_MAX,
            cone_angle_deg: CONE_ANGLE_DEG,
            base_stiffness: BASE_STIFFNESS,
            damping_factor: DAMPING_FACTOR,
            energy_cost_per_sec: ENERGY_COST_PER_SEC,
            fov_kick: FOV_KICK,
            shake_amplitude: SHAKE_AMPLITUDE,
        }
    }
}

impl ModeProfile {
    /// Wider, stronger and hungrier than the standard profile.
    pub fn turbo() -> Self {
        Self {
            name: "turbo".into(),
            range: 4.0,
            cone_angle_deg: 40.0,
            base_stiffness: 60.0,
            damping_factor: 1.1,
            energy_cost_per_sec: 12.0,
            fov_kick: 2.0,
            shake_amplitude: 0.025,
        }
    }

    /// Narrow, long-reaching beam for picking single items.
    pub fn precision() -> Self {
        Self {
            name: "precision".into(),
            range: 4.5,
            cone_angle_deg: 12.0,
            base_stiffness: 30.0,
            damping_factor: 1.3,
            energy_cost_per_sec: 4.0,
            fov_kick: 0.6,
            shake_amplitude: 0.008,
        }
    }
}

/// Energy ledger bounds and rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    pub max: f64,
    pub initial: f64,
    /// Suction may only run while energy is strictly above this.
    pub min_to_activate: f64,
    /// Rate used by zones that advertise no positive rate of their own.
    pub base_recharge_per_sec: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            max: ENERGY_MAX,
            initial: ENERGY_INITIAL,
            min_to_activate: ENERGY_MIN_TO_ACTIVATE,
            base_recharge_per_sec: ENERGY_BASE_RECHARGE_PER_SEC,
        }
    }
}

/// Per-tick work limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub max_objects_per_tick: usize,
    pub max_raycasts_per_tick: usize,
    pub los_cache_lifetime_secs: f64,
    pub los_distance_tolerance: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_objects_per_tick: MAX_OBJECTS_PER_TICK,
            max_raycasts_per_tick: MAX_RAYCASTS_PER_TICK,
            los_cache_lifetime_secs: LOS_CACHE_LIFETIME_SECS,
            los_distance_tolerance: LOS_CACHE_DISTANCE_TOLERANCE,
        }
    }
}

/// Struggle tuning plus the default resistance handed to new descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResistanceDefaults {
    pub capacity: f64,
    pub regeneration_per_sec: f64,
    pub multiplier: f64,
    pub requires_ground: bool,
    pub capture_on_liftoff: bool,
    pub adherence_force: f64,
    /// Progress per second at full closeness.
    pub gain_per_sec: f64,
    /// Struggling starts inside this distance (never less than the capture radius).
    pub activation_distance: f64,
    /// Gain scale over closeness (input 0 = range edge, 1 = nozzle).
    pub closeness_curve: Curve,
    pub ground_probe_distance: f64,
    pub ground_probe_lift: f64,
}

impl Default for ResistanceDefaults {
    fn default() -> Self {
        Self {
            capacity: RESISTANCE_CAPACITY,
            regeneration_per_sec: RESISTANCE_REGEN_PER_SEC,
            multiplier: RESISTANCE_MULTIPLIER,
            requires_ground: false,
            capture_on_liftoff: true,
            adherence_force: ADHERENCE_FORCE,
            gain_per_sec: STRUGGLE_GAIN_PER_SEC,
            activation_distance: STRUGGLE_ACTIVATION_DISTANCE,
            closeness_curve: Curve::linear(0.25, 1.0),
            ground_probe_distance: GROUND_PROBE_DISTANCE,
            ground_probe_lift: GROUND_PROBE_LIFT,
        }
    }
}

impl ResistanceDefaults {
    /// Resistance parameters for a descriptor that does not declare its own.
    pub fn profile(&self) -> Resistance {
        Resistance {
            capacity: self.capacity,
            regeneration_per_sec: self.regeneration_per_sec,
            multiplier: self.multiplier,
            requires_ground: self.requires_ground,
            capture_on_liftoff: self.capture_on_liftoff,
            adherence_force: self.adherence_force,
        }
    }
}

/// Near-field position assist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub distance: f64,
    /// Fraction of the capped step applied per tick, in `0..=1`.
    pub blend: f64,
    /// Maximum snap speed (m/s).
    pub speed: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            distance: SNAP_DISTANCE,
            blend: SNAP_BLEND,
            speed: SNAP_SPEED,
        }
    }
}

/// Presentation load computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Attracted-object count at which load reaches 1.
    pub saturation_count: u32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            saturation_count: FEEDBACK_SATURATION_COUNT,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuctionConfig {
    pub tick_rate_hz: f64,
    pub gravity: f64,

    // ── Capture geometry ─────────────────────────────────────────────────────
    pub capture_radius: f64,
    pub capture_offset: f64,

    // ── Spring-damper ────────────────────────────────────────────────────────
    /// Stiffness scale over normalized distance (0 = nozzle, 1 = range).
    pub stiffness_curve: Curve,
    pub stiffness_floor: f64,
    pub acceleration_limit: f64,
    pub snap: SnapConfig,

    // ── Capture ──────────────────────────────────────────────────────────────
    pub container_capacity: usize,
    pub capture_cooldown_secs: f64,
    pub mass_max_suckable: f64,
    pub requires_line_of_sight: bool,
    pub destroy_micro: bool,
    pub destroy_all_on_capture: bool,
    pub destroy_delay_secs: f64,

    // ── Layers ───────────────────────────────────────────────────────────────
    pub suckable_layers: Layers,
    pub blocking_layers: Layers,
    pub ground_layers: Layers,
    pub zone_layers: Layers,

    // ── Sections ─────────────────────────────────────────────────────────────
    pub modes: Vec<ModeProfile>,
    pub energy: EnergyConfig,
    pub budget: BudgetConfig,
    pub resistance: ResistanceDefaults,
    pub feedback: FeedbackConfig,
    pub suction_link_return_secs: f64,
}

impl Default for SuctionConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE as f64,
            gravity: GRAVITY,
            capture_radius: CAPTURE_RADIUS,
            capture_offset: CAPTURE_OFFSET,
            stiffness_curve: Curve::ease_in_out(1.0, STIFFNESS_CURVE_END),
            stiffness_floor: STIFFNESS_CURVE_FLOOR,
            acceleration_limit: ACCELERATION_LIMIT,
            snap: SnapConfig::default(),
            container_capacity: CONTAINER_CAPACITY,
            capture_cooldown_secs: CAPTURE_COOLDOWN_SECS,
            mass_max_suckable: MASS_MAX_SUCKABLE,
            requires_line_of_sight: true,
            destroy_micro: true,
            destroy_all_on_capture: false,
            destroy_delay_secs: DESTROY_DELAY_SECS,
            suckable_layers: Layers::TRASH,
            blocking_layers: Layers::ENVIRONMENT,
            ground_layers: Layers::GROUND,
            zone_layers: Layers::ZONES,
            modes: vec![
                ModeProfile::default(),
                ModeProfile::turbo(),
                ModeProfile::precision(),
            ],
            energy: EnergyConfig::default(),
            budget: BudgetConfig::default(),
            resistance: ResistanceDefaults::default(),
            feedback: FeedbackConfig::default(),
            suction_link_return_secs: SUCTION_LINK_RETURN_SECS,
        }
    }
}

impl SuctionConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: SuctionConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }

    /// Index of the mode called `name`.
    pub fn mode_index(&self, name: &str) -> ConfigResult<usize> {
        self.modes
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| ConfigError::UnknownMode(name.to_string()))
    }

    /// Check every value against its accepted range.
    pub fn validate(&self) -> ConfigResult<()> {
        require_positive("tick_rate_hz", self.tick_rate_hz)?;
        require_non_negative("gravity", self.gravity)?;
        require_positive("capture_radius", self.capture_radius)?;
        require_non_negative("capture_offset", self.capture_offset)?;
        require_positive("stiffness_floor", self.stiffness_floor)?;
        require_positive("acceleration_limit", self.acceleration_limit)?;
        require_non_negative("snap.distance", self.snap.distance)?;
        require_within("snap.blend", self.snap.blend, 0.0, 1.0, "[0, 1]")?;
        require_non_negative("snap.speed", self.snap.speed)?;
        require_positive("capture_cooldown_secs", self.capture_cooldown_secs)?;
        require_positive("mass_max_suckable", self.mass_max_suckable)?;
        require_non_negative("destroy_delay_secs", self.destroy_delay_secs)?;
        require_non_negative("suction_link_return_secs", self.suction_link_return_secs)?;

        if self.modes.is_empty() {
            return Err(ConfigError::NoModes);
        }
        let mut names = HashSet::new();
        for mode in &self.modes {
            if mode.name.is_empty() || !names.insert(mode.name.as_str()) {
                return Err(ConfigError::DuplicateMode(mode.name.clone()));
            }
            let prefix = format!("modes.{}", mode.name);
            require_positive(&format!("{prefix}.range"), mode.range)?;
            require_within(
                &format!("{prefix}.cone_angle_deg"),
                mode.cone_angle_deg,
                f64::MIN_POSITIVE,
                360.0,
                "(0, 360]",
            )?;
            require_non_negative(&format!("{prefix}.base_stiffness"), mode.base_stiffness)?;
            require_non_negative(&format!("{prefix}.damping_factor"), mode.damping_factor)?;
            require_non_negative(
                &format!("{prefix}.energy_cost_per_sec"),
                mode.energy_cost_per_sec,
            )?;
        }

        let e = &self.energy;
        require_positive("energy.max", e.max)?;
        require_within("energy.initial", e.initial, 0.0, e.max, "[0, energy.max]")?;
        require_within(
            "energy.min_to_activate",
            e.min_to_activate,
            0.0,
            e.max,
            "[0, energy.max]",
        )?;
        require_non_negative("energy.base_recharge_per_sec", e.base_recharge_per_sec)?;

        let b = &self.budget;
        require_within(
            "budget.max_objects_per_tick",
            b.max_objects_per_tick as f64,
            1.0,
            f64::MAX,
            "[1, ∞)",
        )?;
        require_non_negative("budget.los_cache_lifetime_secs", b.los_cache_lifetime_secs)?;
        require_non_negative("budget.los_distance_tolerance", b.los_distance_tolerance)?;

        let r = &self.resistance;
        require_non_negative("resistance.capacity", r.capacity)?;
        require_non_negative("resistance.regeneration_per_sec", r.regeneration_per_sec)?;
        require_positive("resistance.multiplier", r.multiplier)?;
        require_non_negative("resistance.adherence_force", r.adherence_force)?;
        require_non_negative("resistance.gain_per_sec", r.gain_per_sec)?;
        require_non_negative("resistance.activation_distance", r.activation_distance)?;
        require_non_negative("resistance.ground_probe_distance", r.ground_probe_distance)?;

        require_within(
            "feedback.saturation_count",
            self.feedback.saturation_count as f64,
            1.0,
            f64::MAX,
            "[1, ∞)",
        )?;

        Ok(())
    }
}
