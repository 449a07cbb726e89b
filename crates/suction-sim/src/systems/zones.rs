//! Recharge and deposit zones the nozzle can enter.
//!
//! Zones are trigger volumes: a collider on the zone layers plus a
//! [`RechargeZone`] or [`DepositZone`] component. Membership is diffed each
//! tick so enter and exit fire exactly once.

use std::collections::HashMap;

use hecs::{Entity, World};

use suction_core::components::{DepositZone, RechargeZone};
use suction_core::events::SuctionEvent;
use suction_core::types::Layers;
use suction_geometry::SceneQuery;

use crate::energy::EnergyLedger;

/// Nozzle treated as a small sphere for trigger overlap.
const NOZZLE_PROBE_RADIUS: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneKind {
    Recharge(RechargeZone),
    Deposit,
}

/// What the host loop must act on after the zone pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneOutcome {
    pub deposit_entered: bool,
}

fn zone_kind(world: &World, entity: Entity) -> Option<ZoneKind> {
    if let Ok(zone) = world.get::<&RechargeZone>(entity) {
        return Some(ZoneKind::Recharge(*zone));
    }
    world
        .get::<&DepositZone>(entity)
        .ok()
        .map(|_| ZoneKind::Deposit)
}

/// Diff zone membership at `point` and apply enter/exit effects to the ledger.
pub fn run(
    world: &World,
    query: &dyn SceneQuery,
    point: glam::DVec3,
    mask: Layers,
    inside: &mut HashMap<Entity, ZoneKind>,
    ledger: &mut EnergyLedger,
    events: &mut Vec<SuctionEvent>,
) -> ZoneOutcome {
    let mut hits = Vec::new();
    query.overlap_sphere(world, point, NOZZLE_PROBE_RADIUS, mask, &mut hits);
    let current: HashMap<Entity, ZoneKind> = hits
        .into_iter()
        .filter_map(|e| zone_kind(world, e).map(|k| (e, k)))
        .collect();

    let mut exited: Vec<(Entity, ZoneKind)> = inside
        .iter()
        .filter(|(e, _)| !current.contains_key(*e))
        .map(|(e, k)| (*e, *k))
        .collect();
    exited.sort_by_key(|(e, _)| e.to_bits());
    for (entity, kind) in exited {
        inside.remove(&entity);
        if let ZoneKind::Recharge(zone) = kind {
            if zone.continuous {
                ledger.exit_zone(zone.rate_per_sec);
            }
        }
        log::debug!("nozzle left zone {entity:?}");
    }

    let mut entered: Vec<(Entity, ZoneKind)> = current
        .into_iter()
        .filter(|(e, _)| !inside.contains_key(e))
        .collect();
    entered.sort_by_key(|(e, _)| e.to_bits());

    let mut outcome = ZoneOutcome::default();
    for (entity, kind) in entered {
        inside.insert(entity, kind);
        match kind {
            ZoneKind::Recharge(zone) if zone.continuous => {
                ledger.enter_zone(zone.rate_per_sec);
            }
            ZoneKind::Recharge(zone) => {
                let amount = if zone.rate_per_sec > 0.0 {
                    zone.rate_per_sec
                } else {
                    ledger.base_recharge_per_sec()
                };
                if let Some(fraction) = ledger.recharge(amount) {
                    events.push(SuctionEvent::EnergyChanged { fraction });
                }
            }
            ZoneKind::Deposit => outcome.deposit_entered = true,
        }
        log::debug!("nozzle entered zone {entity:?}");
    }
    outcome
}

/// Apply one tick of continuous recharge.
pub fn recharge(ledger: &mut EnergyLedger, dt: f64, events: &mut Vec<SuctionEvent>) {
    let rate = ledger.effective_recharge_rate();
    if rate <= 0.0 {
        return;
    }
    if let Some(fraction) = ledger.recharge(rate * dt) {
        events.push(SuctionEvent::EnergyChanged { fraction });
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;
    use suction_core::config::EnergyConfig;
    use suction_geometry::BruteForceQuery;

    use super::*;
    use crate::world_setup::{spawn_deposit_zone, spawn_recharge_zone};

    #[test]
    fn test_membership_records_zone_kind() {
        let mut world = World::new();
        let pad = RechargeZone {
            rate_per_sec: 3.0,
            continuous: true,
        };
        let charger = spawn_recharge_zone(&mut world, DVec3::ZERO, DVec3::splat(1.0), pad);
        let depot = spawn_deposit_zone(&mut world, DVec3::new(0.5, 0.0, 0.0), DVec3::splat(1.0));

        let mut inside = HashMap::new();
        let mut ledger = EnergyLedger::new(&EnergyConfig::default());
        let mut events = Vec::new();
        let outcome = run(
            &world,
            &BruteForceQuery,
            DVec3::new(0.2, 0.0, 0.0),
            Layers::ZONES,
            &mut inside,
            &mut ledger,
            &mut events,
        );

        assert!(outcome.deposit_entered);
        assert_eq!(inside.get(&charger), Some(&ZoneKind::Recharge(pad)));
        assert_eq!(inside.get(&depot), Some(&ZoneKind::Deposit));
        assert_eq!(ledger.zone_count(), 1);
    }
}
