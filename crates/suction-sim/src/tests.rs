//! Tests for the vacuum engine: energy gating, the suction pipeline, struggle,
//! capture, zones and determinism.

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use suction_core::commands::VacuumCommand;
use suction_core::components::*;
use suction_core::config::SuctionConfig;
use suction_core::curve::Curve;
use suction_core::enums::BodyControl;
use suction_core::events::SuctionEvent;
use suction_core::types::{Nozzle, Shape};
use suction_geometry::{BruteForceQuery, GridQuery};

use crate::engine::VacuumEngine;
use crate::systems::integrate;
use crate::world_setup::*;

fn nozzle() -> Nozzle {
    Nozzle::new(DVec3::ZERO, DVec3::Z)
}

fn engine(config: SuctionConfig) -> VacuumEngine {
    VacuumEngine::new(config, Box::new(BruteForceQuery)).unwrap()
}

fn active_engine(config: SuctionConfig) -> VacuumEngine {
    let mut e = engine(config);
    assert!(e.start_suction());
    e
}

/// Config ticking once per second.
fn one_hz() -> SuctionConfig {
    SuctionConfig {
        tick_rate_hz: 1.0,
        ..SuctionConfig::default()
    }
}

fn ball(world: &mut World, position: DVec3, descriptor: Option<TargetDescriptor>) -> Entity {
    spawn_trash(world, position, Shape::Sphere { radius: 0.1 }, 1.0, descriptor)
}

/// Non-micro, capturable target that gets stored.
fn storable() -> Option<TargetDescriptor> {
    Some(TargetDescriptor {
        material: Some(material("can")),
        ..TargetDescriptor::default()
    })
}

fn resisting(capacity: f64, requires_ground: bool, capture_on_liftoff: bool) -> Option<TargetDescriptor> {
    Some(TargetDescriptor {
        resistance: Some(Resistance {
            capacity,
            regeneration_per_sec: 1.0,
            multiplier: 1.0,
            requires_ground,
            capture_on_liftoff,
            adherence_force: 0.0,
        }),
        ..TargetDescriptor::default()
    })
}

fn count(events: &[SuctionEvent], pred: impl Fn(&SuctionEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

fn force_on(world: &World, entity: Entity) -> DVec3 {
    world.get::<&RigidBody>(entity).unwrap().force
}

// ---- Energy ----

#[test]
fn test_energy_depletes_and_deactivates_on_tick_50() {
    let mut config = one_hz();
    config.energy.max = 100.0;
    config.energy.initial = 100.0;
    config.energy.min_to_activate = 1.0;
    config.modes[0].energy_cost_per_sec = 2.0;
    let mut engine = active_engine(config);
    let mut world = World::new();

    for tick in 1..=50 {
        let snap = engine.tick(&mut world, Some(nozzle()));
        if tick < 50 {
            assert!(snap.active, "Still active on tick {tick}");
            assert!((snap.energy.current - (100.0 - 2.0 * tick as f64)).abs() < 1e-9);
            assert!(snap.feedback.motor_volume > 0.0);
        } else {
            assert!(!snap.active, "Deactivated on tick 50");
            assert_eq!(snap.energy.current, 0.0);
            assert_eq!(snap.feedback.motor_volume, 0.0, "Idle feedback once forced off");
            assert_eq!(snap.feedback.particle_rate, 0.0);
            assert!(snap
                .events
                .contains(&SuctionEvent::SuctionStateChanged { active: false }));
        }
    }
    assert!(!engine.start_suction(), "Cannot restart with an empty ledger");
}

#[test]
fn test_energy_bounds_under_mixed_ticks() {
    let mut config = SuctionConfig::default();
    config.energy.initial = 3.0;
    let mut engine = active_engine(config);
    let mut world = World::new();
    engine.enter_recharge_zone(RechargeZone {
        rate_per_sec: 500.0,
        continuous: true,
    });
    for i in 0..200 {
        if i == 100 {
            engine.exit_recharge_zone(RechargeZone {
                rate_per_sec: 500.0,
                continuous: true,
            });
            engine.start_suction();
        }
        let snap = engine.tick(&mut world, Some(nozzle()));
        assert!(snap.energy.current >= 0.0 && snap.energy.current <= snap.energy.max);
    }
}

#[test]
fn test_start_refused_at_threshold() {
    let mut config = SuctionConfig::default();
    config.energy.initial = 1.0;
    config.energy.min_to_activate = 1.0;
    let mut engine = engine(config);
    let mut world = World::new();

    engine.queue_command(VacuumCommand::StartSuction);
    let snap = engine.tick(&mut world, Some(nozzle()));
    assert!(!snap.active);
    assert!(snap.events.is_empty());
}

#[test]
fn test_stop_is_idempotent() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();

    engine.stop_suction();
    let once = engine.is_active();
    engine.stop_suction();
    assert_eq!(once, engine.is_active());

    let snap = engine.tick(&mut world, Some(nozzle()));
    let stops = count(&snap.events, |e| {
        matches!(e, SuctionEvent::SuctionStateChanged { active: false })
    });
    assert_eq!(stops, 1, "Second stop emits nothing");
    assert_eq!(snap.energy.current, snap.energy.max, "Inactive engine consumes nothing");
}

#[test]
fn test_missing_nozzle_idles() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    let target = ball(&mut world, DVec3::new(0.0, 0.0, 1.0), None);

    let snap = engine.tick(&mut world, None);
    assert!(snap.active);
    assert_eq!(snap.energy.current, snap.energy.max);
    assert_eq!(snap.stats.candidates, 0);
    assert_eq!(snap.feedback.load, 0.0);
    assert_eq!(force_on(&world, target), DVec3::ZERO);
}

// ---- Recharge zones ----

#[test]
fn test_continuous_zone_recharges_while_inside() {
    let mut config = SuctionConfig::default();
    config.energy.initial = 50.0;
    let mut engine = engine(config);
    let mut world = World::new();
    spawn_recharge_zone(
        &mut world,
        DVec3::ZERO,
        DVec3::splat(1.0),
        RechargeZone {
            rate_per_sec: 20.0,
            continuous: true,
        },
    );

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.energy.zones, 1);
    assert!((snap.energy.current - 50.4).abs() < 1e-9);

    let outside = Nozzle::new(DVec3::new(10.0, 0.0, 0.0), DVec3::Z);
    let snap = engine.tick(&mut world, Some(outside));
    assert_eq!(snap.energy.zones, 0);
    assert!((snap.energy.current - 50.4).abs() < 1e-9);
}

#[test]
fn test_one_shot_zone_grants_once() {
    let mut config = SuctionConfig::default();
    config.energy.initial = 50.0;
    config.energy.base_recharge_per_sec = 10.0;
    let mut engine = engine(config);
    let mut world = World::new();
    spawn_recharge_zone(
        &mut world,
        DVec3::ZERO,
        DVec3::splat(1.0),
        RechargeZone {
            rate_per_sec: 0.0,
            continuous: false,
        },
    );

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert!((snap.energy.current - 60.0).abs() < 1e-9, "Base rate granted on entry");
    assert_eq!(
        count(&snap.events, |e| matches!(e, SuctionEvent::EnergyChanged { .. })),
        1
    );
    let snap = engine.tick(&mut world, Some(nozzle()));
    assert!((snap.energy.current - 60.0).abs() < 1e-9, "Nothing more while staying");
}

// ---- Candidate filters ----

#[test]
fn test_cone_gates_force_until_target_enters() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    let target = ball(&mut world, DVec3::new(2.0, 0.0, 0.5), None);

    for _ in 0..3 {
        let snap = engine.tick(&mut world, Some(nozzle()));
        assert_eq!(snap.stats.skipped_cone, 1);
        assert_eq!(snap.stats.force_applied, 0);
    }
    assert_eq!(force_on(&world, target), DVec3::ZERO);

    let distance = DVec3::new(2.0, 0.0, 0.5).length();
    world.get::<&mut RigidBody>(target).unwrap().position = DVec3::new(0.0, 0.0, distance);
    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.force_applied, 1);
    assert!(force_on(&world, target).z < 0.0, "Pulled toward the nozzle");
}

#[test]
fn test_mass_ceiling_respects_virtual_mass() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    let heavy = spawn_trash(
        &mut world,
        DVec3::new(-0.2, 0.0, 2.0),
        Shape::Sphere { radius: 0.1 },
        20.0,
        None,
    );
    let light_override = spawn_trash(
        &mut world,
        DVec3::new(0.2, 0.0, 2.0),
        Shape::Sphere { radius: 0.1 },
        20.0,
        Some(TargetDescriptor {
            virtual_mass_override: 0.5,
            ..TargetDescriptor::default()
        }),
    );

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.skipped_mass, 1);
    assert_eq!(force_on(&world, heavy), DVec3::ZERO);
    assert_ne!(force_on(&world, light_override), DVec3::ZERO);
}

#[test]
fn test_kinematic_without_link_is_skipped() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    let target = ball(&mut world, DVec3::new(0.0, 0.0, 1.5), None);
    world.get::<&mut RigidBody>(target).unwrap().kinematic = true;

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.skipped_no_body, 1);
    assert_eq!(force_on(&world, target), DVec3::ZERO);
}

#[test]
fn test_applied_acceleration_never_exceeds_limit() {
    let mut config = SuctionConfig::default();
    config.modes[0].base_stiffness = 1e6;
    let limit = config.acceleration_limit;
    let mut engine = active_engine(config);
    let mut world = World::new();
    let tiny = spawn_trash(
        &mut world,
        DVec3::new(0.0, 0.0, 2.5),
        Shape::Sphere { radius: 0.1 },
        0.01,
        None,
    );

    engine.tick(&mut world, Some(nozzle()));
    let rb = world.get::<&RigidBody>(tiny).unwrap();
    assert!(rb.force.length() / rb.mass <= limit + 1e-9);
    assert!(rb.force.length() > 0.0);
}

// ---- Frame budget ----

#[test]
fn test_round_robin_visits_every_candidate() {
    let mut config = SuctionConfig::default();
    config.budget.max_objects_per_tick = 2;
    config.requires_line_of_sight = false;
    let mut engine = active_engine(config);
    let mut world = World::new();
    let targets: Vec<Entity> = (0..5)
        .map(|i| ball(&mut world, DVec3::new(-0.4 + 0.2 * i as f64, 0.0, 2.5), None))
        .collect();

    for _ in 0..3 {
        let snap = engine.tick(&mut world, Some(nozzle()));
        assert_eq!(snap.stats.candidates, 5);
        assert_eq!(snap.stats.processed, 2);
    }
    for t in &targets {
        assert_ne!(force_on(&world, *t), DVec3::ZERO, "Every candidate within ceil(5/2) ticks");
    }
    assert_eq!(engine.cursor(), 6 % 5);
}

#[test]
fn test_cursor_resets_when_candidates_vanish() {
    let mut config = SuctionConfig::default();
    config.budget.max_objects_per_tick = 3;
    config.requires_line_of_sight = false;
    let mut engine = active_engine(config);
    let mut world = World::new();
    let targets: Vec<Entity> = (0..5)
        .map(|i| ball(&mut world, DVec3::new(-0.4 + 0.2 * i as f64, 0.0, 2.5), None))
        .collect();

    engine.tick(&mut world, Some(nozzle()));
    assert_eq!(engine.cursor(), 3);

    for t in targets {
        world.despawn(t).unwrap();
    }
    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.candidates, 0);
    assert_eq!(engine.cursor(), 0);
}

#[test]
fn test_los_blocked_then_cached() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    spawn_wall(&mut world, DVec3::new(0.0, 0.0, 1.0), DVec3::new(1.0, 1.0, 0.05));
    let target = ball(&mut world, DVec3::new(0.0, 0.0, 2.0), None);

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.skipped_los, 1);
    assert_eq!(snap.stats.raycasts, 1);

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.skipped_los, 1);
    assert_eq!(snap.stats.raycasts, 0);
    assert_eq!(snap.stats.los_cache_hits, 1);
    assert_eq!(force_on(&world, target), DVec3::ZERO);
}

#[test]
fn test_raycast_budget_treats_overflow_as_blocked() {
    let mut config = SuctionConfig::default();
    config.budget.max_raycasts_per_tick = 1;
    let mut engine = active_engine(config);
    let mut world = World::new();
    ball(&mut world, DVec3::new(-0.2, 0.0, 2.0), None);
    ball(&mut world, DVec3::new(0.2, 0.0, 2.0), None);

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.raycasts, 1);
    assert_eq!(snap.stats.skipped_los, 1);
    assert_eq!(snap.stats.force_applied, 1);

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.los_cache_hits, 1);
    assert_eq!(snap.stats.raycasts, 1);
    assert_eq!(snap.stats.force_applied, 2);
}

// ---- Capture ----

#[test]
fn test_container_capacity_two_of_three() {
    let mut config = SuctionConfig::default();
    config.container_capacity = 2;
    let mut engine = active_engine(config);
    let mut world = World::new();
    for x in [-0.05, 0.0, 0.05] {
        ball(&mut world, DVec3::new(x, 0.0, 0.2), storable());
    }

    let snap = engine.tick(&mut world, Some(nozzle()));
    let captured = count(&snap.events, |e| matches!(e, SuctionEvent::Captured { .. }));
    let full = count(&snap.events, |e| matches!(e, SuctionEvent::ContainerFull));
    assert_eq!(captured, 2);
    assert_eq!(full, 1);
    assert_eq!(snap.container.len, 2);
    assert_eq!(snap.carried, 2);

    for stored in engine.container().items() {
        assert!(world.get::<&Inactive>(*stored).is_ok());
        assert!(world.get::<&Parent>(*stored).is_ok());
        let rb = world.get::<&RigidBody>(*stored).unwrap();
        assert!(rb.kinematic && !rb.use_gravity);
        assert_eq!(rb.velocity, DVec3::ZERO);
    }
}

#[test]
fn test_rejected_target_captured_after_drain() {
    let mut config = one_hz();
    config.container_capacity = 1;
    let mut engine = active_engine(config);
    let mut world = World::new();
    let a = ball(&mut world, DVec3::new(-0.05, 0.0, 0.2), storable());
    let b = ball(&mut world, DVec3::new(0.05, 0.0, 0.2), storable());

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(count(&snap.events, |e| matches!(e, SuctionEvent::ContainerFull)), 1);
    let stored = engine.container().items()[0];
    let rejected = if stored == a { b } else { a };
    assert!(world.get::<&Inactive>(rejected).is_err());

    // One second later the cooldown has lapsed; the drain runs first.
    engine.queue_command(VacuumCommand::DrainContainer);
    let snap = engine.tick(&mut world, Some(nozzle()));
    assert!(snap.events.contains(&SuctionEvent::Deposited { count: 1 }));
    assert!(snap.events.contains(&SuctionEvent::Captured {
        entity: rejected.into(),
    }));
    assert_eq!(snap.container.len, 1);
    assert_eq!(engine.container().items(), &[rejected]);
}

#[test]
fn test_micro_target_destroyed_and_counted() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    let target = ball(&mut world, DVec3::new(0.0, 0.0, 0.2), None);

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert!(snap
        .events
        .contains(&SuctionEvent::MicroCaptured { running_total: 1 }));
    assert_eq!(snap.micro_captured, 1);
    assert!(world.get::<&Inactive>(target).is_ok());

    for _ in 0..10 {
        engine.tick(&mut world, Some(nozzle()));
    }
    assert!(!world.contains(target), "Despawned after the destroy delay");
}

#[test]
fn test_destroy_all_overrides_storage() {
    let mut config = SuctionConfig::default();
    config.destroy_all_on_capture = true;
    let mut engine = active_engine(config);
    let mut world = World::new();
    ball(&mut world, DVec3::new(0.0, 0.0, 0.2), storable());

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.micro_captured, 1);
    assert_eq!(snap.container.len, 0);
}

#[test]
fn test_non_capturable_is_attracted_only() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    let brick = ball(
        &mut world,
        DVec3::new(0.0, 0.0, 0.2),
        Some(TargetDescriptor {
            material: Some(material("brick")),
            ..TargetDescriptor::default()
        }),
    );

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.force_applied, 1);
    assert_eq!(snap.stats.captured, 0);
    let capture_events = count(&snap.events, |e| {
        matches!(
            e,
            SuctionEvent::Captured { .. }
                | SuctionEvent::MicroCaptured { .. }
                | SuctionEvent::CaptureFeedback { .. }
        )
    });
    assert_eq!(capture_events, 0);
    assert!(world.get::<&Inactive>(brick).is_err());
}

#[test]
fn test_capture_root_override_is_hidden() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    let root = world.spawn((Transform::default(),));
    let target = ball(
        &mut world,
        DVec3::new(0.0, 0.0, 0.2),
        Some(TargetDescriptor {
            material: Some(material("can")),
            capture_root: Some(root),
            ..TargetDescriptor::default()
        }),
    );
    world.insert_one(target, Parent(root)).unwrap();

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert!(snap.events.contains(&SuctionEvent::Captured {
        entity: root.into()
    }));
    assert!(world.get::<&Inactive>(root).is_ok());
    assert_eq!(engine.container().items(), &[root]);
}

#[test]
fn test_capture_feedback_carries_material() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    ball(&mut world, DVec3::new(0.0, 0.0, 0.2), storable());

    let snap = engine.tick(&mut world, Some(nozzle()));
    let feedback = snap.events.iter().find_map(|e| match e {
        SuctionEvent::CaptureFeedback { material, volume, .. } => Some((material.clone(), *volume)),
        _ => None,
    });
    assert_eq!(feedback, Some((Some("can".to_string()), 0.9)));
}

// ---- Struggle ----

fn struggle_config() -> SuctionConfig {
    let mut config = one_hz();
    config.resistance.gain_per_sec = 1.0;
    config.resistance.closeness_curve = Curve::constant(1.0);
    config
}

#[test]
fn test_resistance_three_captures_on_third_tick() {
    let mut engine = active_engine(struggle_config());
    let mut world = World::new();
    let target = ball(&mut world, DVec3::new(0.0, 0.0, 0.2), resisting(3.0, false, true));

    for expected in [1.0, 2.0] {
        let snap = engine.tick(&mut world, Some(nozzle()));
        assert_eq!(snap.stats.captured, 0, "Not captured at progress {expected}");
        let progress = world.get::<&StruggleState>(target).unwrap().progress;
        assert!((progress - expected).abs() < 1e-9);
    }
    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.captured, 1);
    assert_eq!(
        world.get::<&StruggleState>(target).unwrap().progress,
        0.0,
        "Struggle resets on capture"
    );
}

#[test]
fn test_progress_stays_within_capacity() {
    let mut config = struggle_config();
    config.resistance.gain_per_sec = 7.0;
    config.container_capacity = 0;
    let mut engine = active_engine(config);
    let mut world = World::new();
    let mut descriptor = resisting(2.0, false, true).unwrap();
    descriptor.material = Some(material("can"));
    let target = ball(&mut world, DVec3::new(0.0, 0.0, 0.2), Some(descriptor));

    for _ in 0..5 {
        engine.tick(&mut world, Some(nozzle()));
        let progress = world.get::<&StruggleState>(target).unwrap().progress;
        assert!((0.0..=2.0).contains(&progress));
    }
}

#[test]
fn test_liftoff_capture_waives_resistance() {
    let mut engine = active_engine(struggle_config());
    let mut world = World::new();
    ball(&mut world, DVec3::new(0.0, 0.0, 0.2), resisting(3.0, true, true));

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.captured, 1, "No ground below: captured at once");
}

#[test]
fn test_liftoff_without_permission_holds_progress() {
    let mut engine = active_engine(struggle_config());
    let mut world = World::new();
    let target = ball(&mut world, DVec3::new(0.0, 0.0, 0.2), resisting(3.0, true, false));

    for _ in 0..4 {
        let snap = engine.tick(&mut world, Some(nozzle()));
        assert_eq!(snap.stats.captured, 0);
    }
    assert_eq!(world.get::<&StruggleState>(target).unwrap().progress, 0.0);
}

#[test]
fn test_grounded_target_struggles() {
    let mut engine = active_engine(struggle_config());
    let mut world = World::new();
    spawn_ground(&mut world, 0.0, 5.0);
    let target = ball(&mut world, DVec3::new(0.0, 0.1, 0.2), resisting(3.0, true, true));
    let raised = Nozzle::new(DVec3::new(0.0, 0.1, 0.0), DVec3::Z);

    let snap = engine.tick(&mut world, Some(raised));
    assert_eq!(snap.stats.captured, 0, "Grounded target resists");
    let state = *world.get::<&StruggleState>(target).unwrap();
    assert!(state.active);
    assert!((state.progress - 1.0).abs() < 1e-9);
}

#[test]
fn test_adherence_pulls_down_while_struggling() {
    let mut config = struggle_config();
    config.requires_line_of_sight = false;
    let mut engine = active_engine(config);
    let mut world = World::new();
    let mut descriptor = resisting(4.0, false, true).unwrap();
    if let Some(r) = descriptor.resistance.as_mut() {
        r.adherence_force = 100.0;
    }
    let target = ball(&mut world, DVec3::new(0.0, 0.0, 0.5), Some(descriptor));

    engine.tick(&mut world, Some(nozzle()));
    // Spring has no vertical component here; everything on y is adherence.
    assert!((force_on(&world, target).y + 75.0).abs() < 1e-9);
}

// ---- Suction link ----

#[test]
fn test_agent_handed_to_physics_and_back() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    let agent = spawn_agent(
        &mut world,
        DVec3::new(0.0, 0.0, 2.0),
        Shape::Sphere { radius: 0.2 },
        1.0,
        0.1,
        None,
    );

    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.stats.force_applied, 1);
    assert_eq!(world.get::<&SuctionLink>(agent).unwrap().control, BodyControl::Physics);
    assert!(!world.get::<&RigidBody>(agent).unwrap().kinematic);

    engine.stop_suction();
    world.get::<&mut RigidBody>(agent).unwrap().position.y = 0.7;
    for _ in 0..10 {
        engine.tick(&mut world, Some(nozzle()));
    }
    let link = *world.get::<&SuctionLink>(agent).unwrap();
    let rb = world.get::<&RigidBody>(agent).unwrap();
    assert_eq!(link.control, BodyControl::Agent);
    assert!(rb.kinematic);
    assert_eq!(rb.velocity, DVec3::ZERO);
    assert_eq!(rb.position.y, 0.0, "Pinned back to its walking height");
}

// ---- Container drain ----

#[test]
fn test_drain_command_despawns_stored() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    let a = ball(&mut world, DVec3::new(-0.05, 0.0, 0.2), storable());
    let b = ball(&mut world, DVec3::new(0.05, 0.0, 0.2), storable());
    engine.tick(&mut world, Some(nozzle()));
    assert_eq!(engine.container().len(), 2);

    engine.queue_command(VacuumCommand::DrainContainer);
    let snap = engine.tick(&mut world, Some(nozzle()));
    assert!(snap.events.contains(&SuctionEvent::Deposited { count: 2 }));
    assert_eq!(snap.container.len, 0);
    assert_eq!(snap.carried, 0);
    assert!(!world.contains(a) && !world.contains(b));
}

#[test]
fn test_deposit_zone_empties_container() {
    let mut engine = active_engine(SuctionConfig::default());
    let mut world = World::new();
    ball(&mut world, DVec3::new(0.0, 0.0, 0.2), storable());
    engine.tick(&mut world, Some(nozzle()));
    assert_eq!(engine.container().len(), 1);

    let depot = DVec3::new(20.0, 0.0, 0.0);
    spawn_deposit_zone(&mut world, depot, DVec3::splat(1.0));
    let snap = engine.tick(&mut world, Some(Nozzle::new(depot, DVec3::Z)));
    assert!(snap.events.contains(&SuctionEvent::Deposited { count: 1 }));
    assert_eq!(engine.drain_container(&mut world), 0);
}

// ---- Modes ----

#[test]
fn test_mode_selection_and_cycle() {
    let mut engine = engine(SuctionConfig::default());
    let mut world = World::new();

    assert!(engine.set_mode("turbo"));
    assert!(!engine.set_mode("hyperdrive"));
    assert_eq!(engine.mode().name, "turbo");

    engine.queue_commands([VacuumCommand::CycleMode, VacuumCommand::CycleMode]);
    let snap = engine.tick(&mut world, Some(nozzle()));
    assert_eq!(snap.mode, "standard");
    let names: Vec<&str> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            SuctionEvent::ModeChanged { name } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["turbo", "precision", "standard"]);
}

// ---- Determinism ----

fn run_scene(grid: bool, seed: u64) -> Vec<String> {
    let config = SuctionConfig::default();
    let query: Box<dyn suction_geometry::SceneQuery> = if grid {
        Box::new(GridQuery::default())
    } else {
        Box::new(BruteForceQuery)
    };
    let mut engine = VacuumEngine::new(config.clone(), query).unwrap();
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    spawn_ground(&mut world, 0.0, 10.0);
    scatter_trash(&mut world, &mut rng, &config, DVec3::ZERO, 3.0, 30);
    engine.start_suction();

    let nozzle = Nozzle::new(DVec3::new(0.0, 0.3, 0.0), DVec3::new(0.0, -0.1, 1.0));
    (0..150)
        .map(|_| {
            let snap = engine.tick(&mut world, Some(nozzle));
            integrate::run(&mut world, config.dt(), config.gravity, Some(0.0));
            serde_json::to_string(&snap).unwrap()
        })
        .collect()
}

#[test]
fn test_same_seed_same_run() {
    assert_eq!(run_scene(false, 99), run_scene(false, 99));
}

#[test]
fn test_grid_query_matches_brute_force() {
    assert_eq!(run_scene(true, 5), run_scene(false, 5));
}
