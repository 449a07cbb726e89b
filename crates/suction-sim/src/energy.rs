//! Energy ledger: the bounded resource that gates suction.

use suction_core::config::EnergyConfig;

/// Bounded scalar energy store with zone-driven recharge.
///
/// Every mutation clamps into `[0, max]`. Mutators return the new
/// normalized fraction only when the clamped value actually changed, so the
/// caller can emit a change event without repeating itself at the rails.
#[derive(Debug, Clone)]
pub struct EnergyLedger {
    current: f64,
    max: f64,
    min_to_activate: f64,
    base_recharge_per_sec: f64,
    /// Rates of the continuous recharge zones currently overlapped.
    zone_rates: Vec<f64>,
}

impl EnergyLedger {
    pub fn new(config: &EnergyConfig) -> Self {
        let max = config.max.max(0.0);
        Self {
            current: config.initial.clamp(0.0, max),
            max,
            min_to_activate: config.min_to_activate,
            base_recharge_per_sec: config.base_recharge_per_sec.max(0.0),
            zone_rates: Vec::new(),
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn min_to_activate(&self) -> f64 {
        self.min_to_activate
    }

    pub fn base_recharge_per_sec(&self) -> f64 {
        self.base_recharge_per_sec
    }

    /// `current / max`, or 0 for a zero-capacity ledger.
    pub fn fraction(&self) -> f64 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    /// Suction may start or continue only above the threshold.
    pub fn can_activate(&self) -> bool {
        self.current > self.min_to_activate
    }

    pub fn consume(&mut self, amount: f64) -> Option<f64> {
        self.set(self.current - amount.max(0.0))
    }

    pub fn recharge(&mut self, amount: f64) -> Option<f64> {
        self.set(self.current + amount.max(0.0))
    }

    fn set(&mut self, value: f64) -> Option<f64> {
        let clamped = value.clamp(0.0, self.max);
        if clamped == self.current {
            return None;
        }
        self.current = clamped;
        Some(self.fraction())
    }

    /// Register an overlapped continuous zone advertising `rate_per_sec`.
    pub fn enter_zone(&mut self, rate_per_sec: f64) {
        self.zone_rates.push(rate_per_sec);
    }

    /// Unregister one zone with this rate. Unknown rates are ignored.
    pub fn exit_zone(&mut self, rate_per_sec: f64) {
        if let Some(i) = self.zone_rates.iter().position(|r| *r == rate_per_sec) {
            self.zone_rates.swap_remove(i);
        }
    }

    pub fn zone_count(&self) -> usize {
        self.zone_rates.len()
    }

    /// Highest positive rate among overlapped zones, 0 when none advertises one.
    pub fn zone_rate(&self) -> f64 {
        self.zone_rates
            .iter()
            .copied()
            .filter(|r| *r > 0.0)
            .fold(0.0, f64::max)
    }

    /// Rate applied this tick: the best zone rate, the base rate inside zones
    /// that advertise nothing, or 0 outside all zones.
    pub fn effective_recharge_rate(&self) -> f64 {
        if self.zone_rates.is_empty() {
            return 0.0;
        }
        let rate = self.zone_rate();
        if rate > 0.0 {
            rate
        } else {
            self.base_recharge_per_sec
        }
    }
}
