//! Short-lived memo of line-of-sight raycasts.
//!
//! An entry is reused while it has not expired and the candidate has not
//! moved more than the distance tolerance since it was recorded. Callers
//! accept up to one stale decision per entry lifetime.

use std::collections::HashMap;

use hecs::Entity;

use suction_core::config::BudgetConfig;

#[derive(Debug, Clone, Copy)]
struct LosEntry {
    visible: bool,
    distance: f64,
    expires_at: f64,
}

#[derive(Debug, Clone)]
pub struct LosCache {
    entries: HashMap<Entity, LosEntry>,
    lifetime_secs: f64,
    distance_tolerance: f64,
}

impl LosCache {
    pub fn new(config: &BudgetConfig) -> Self {
        Self {
            entries: HashMap::new(),
            lifetime_secs: config.los_cache_lifetime_secs,
            distance_tolerance: config.los_distance_tolerance,
        }
    }

    /// Cached visibility for `key` at `distance`, if still usable at `now`.
    pub fn lookup(&self, key: Entity, distance: f64, now: f64) -> Option<bool> {
        let entry = self.entries.get(&key)?;
        if now >= entry.expires_at || (entry.distance - distance).abs() > self.distance_tolerance {
            return None;
        }
        Some(entry.visible)
    }

    pub fn store(&mut self, key: Entity, visible: bool, distance: f64, now: f64) {
        self.entries.insert(
            key,
            LosEntry {
                visible,
                distance,
                expires_at: now + self.lifetime_secs,
            },
        );
    }

    /// Drop expired entries so the map does not grow with every entity ever seen.
    pub fn prune(&mut self, now: f64) {
        self.entries.retain(|_, e| now < e.expires_at);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
