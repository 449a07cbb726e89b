//! The suction step.
//!
//! Per tick: discover candidates around the nozzle, pick a round-robin window
//! under the object budget, then run each candidate through the filter
//! pipeline (body, mass, cone, distance, line of sight). Survivors get the
//! spring-damper force, the near-field snap, a struggle update and finally
//! the capture decision. Filters short-circuit cheapest first.

use std::collections::{HashMap, HashSet};

use glam::DVec3;
use hecs::{Entity, World};

use suction_core::components::{
    Resistance, RigidBody, StruggleState, SuctionLink, TargetDescriptor,
};
use suction_core::config::{ModeProfile, SuctionConfig};
use suction_core::constants::MIN_SUCTION_MULTIPLIER;
use suction_core::types::{Nozzle, Shape};
use suction_geometry::query::{body_of, collider_center, root_of};
use suction_geometry::{closest_point, within_cone, SceneQuery};
use suction_resistance::fsm::{self, resists, StruggleContext};
use suction_resistance::ground::{ground_probes, is_grounded};

use crate::budget::{RaycastBudget, RoundRobin};
use crate::force::{self, SpringInput};
use crate::los_cache::LosCache;
use crate::systems::capture::{self, CaptureSink, CaptureTarget};
use crate::systems::suction_link;

/// Read-only inputs for one suction step.
#[derive(Clone, Copy)]
pub struct SuctionParams<'a> {
    pub config: &'a SuctionConfig,
    pub mode: &'a ModeProfile,
    pub nozzle: Nozzle,
    pub now: f64,
    pub dt: f64,
}

/// Engine state the suction step reads and advances.
pub struct SuctionState<'a> {
    /// Reused candidate buffer.
    pub candidates: &'a mut Vec<Entity>,
    pub round_robin: &'a mut RoundRobin,
    pub los_cache: &'a mut LosCache,
    /// Body → time at which it may be captured again.
    pub cooldowns: &'a mut HashMap<Entity, f64>,
    /// Bodies that received force this tick.
    pub attracted: &'a mut HashSet<Entity>,
}

/// Suction-relevant view of a target's descriptor.
#[derive(Debug, Clone)]
struct TargetProfile {
    effective_mass: f64,
    suction_multiplier: f64,
    capturable: bool,
    micro: bool,
    resistance: Option<Resistance>,
    capture_root: Option<Entity>,
    material: Option<String>,
    volume: f64,
}

impl TargetProfile {
    fn from_descriptor(descriptor: Option<&TargetDescriptor>, physical_mass: f64) -> Self {
        let Some(d) = descriptor else {
            return Self {
                effective_mass: physical_mass,
                suction_multiplier: 1.0,
                capturable: true,
                micro: true,
                resistance: None,
                capture_root: None,
                material: None,
                volume: 0.0,
            };
        };
        let material_mass = d.material.as_ref().map_or(0.0, |m| m.virtual_mass);
        let effective_mass = if d.virtual_mass_override > 0.0 {
            d.virtual_mass_override
        } else if material_mass > 0.0 {
            material_mass
        } else {
            physical_mass
        };
        let material_multiplier = d.material.as_ref().map_or(1.0, |m| m.suction_multiplier);
        Self {
            effective_mass,
            suction_multiplier: material_multiplier
                * d.extra_suction_multiplier.max(MIN_SUCTION_MULTIPLIER),
            capturable: d.material.as_ref().map_or(true, |m| m.capturable),
            micro: d.material.as_ref().map_or(true, |m| m.micro),
            resistance: d.resistance.filter(resists),
            capture_root: d.capture_root,
            material: d.material.as_ref().map(|m| m.id.clone()),
            volume: d.material.as_ref().map_or(0.0, |m| m.sfx_volume),
        }
    }
}

/// Descriptor on the collider itself, else on its body.
fn target_profile(world: &World, collider: Entity, body: Entity, physical_mass: f64) -> TargetProfile {
    for owner in [collider, body] {
        if let Ok(d) = world.get::<&TargetDescriptor>(owner) {
            return TargetProfile::from_descriptor(Some(&*d), physical_mass);
        }
    }
    TargetProfile::from_descriptor(None, physical_mass)
}

/// Run one suction step.
pub fn run(
    world: &mut World,
    query: &dyn SceneQuery,
    params: &SuctionParams,
    state: &mut SuctionState,
    sink: &mut CaptureSink,
) {
    let SuctionParams {
        config,
        mode,
        nozzle,
        ..
    } = *params;

    state.candidates.clear();
    query.overlap_sphere(
        world,
        nozzle.position,
        mode.range,
        config.suckable_layers,
        state.candidates,
    );
    let count = state.candidates.len();
    sink.stats.candidates = count as u32;
    if count == 0 {
        state.round_robin.advance(0, 0);
        return;
    }

    let window: Vec<usize> = state
        .round_robin
        .window(count, config.budget.max_objects_per_tick)
        .collect();
    state.round_robin.advance(window.len(), count);

    let mut raycasts = RaycastBudget::new(config.budget.max_raycasts_per_tick);
    for index in window {
        let collider = state.candidates[index];
        sink.stats.processed += 1;
        process_candidate(world, query, params, state, sink, &mut raycasts, collider);
    }
}

fn process_candidate(
    world: &mut World,
    query: &dyn SceneQuery,
    params: &SuctionParams,
    state: &mut SuctionState,
    sink: &mut CaptureSink,
    raycasts: &mut RaycastBudget,
    collider: Entity,
) {
    let SuctionParams {
        config,
        mode,
        nozzle,
        now,
        dt,
    } = *params;

    // Body
    let Some(body) = body_of(world, collider) else {
        sink.stats.skipped_no_body += 1;
        return;
    };
    let Some((shape, center)) = collider_center(world, collider).map(|(c, p)| (c.shape, p)) else {
        sink.stats.skipped_no_body += 1;
        return;
    };
    let Some(rb) = world.get::<&RigidBody>(body).ok().map(|rb| (*rb).clone()) else {
        sink.stats.skipped_no_body += 1;
        return;
    };
    let linked = world.get::<&SuctionLink>(body).is_ok();
    if rb.kinematic && !linked {
        sink.stats.skipped_no_body += 1;
        return;
    }

    // Mass
    let profile = target_profile(world, collider, body, rb.mass);
    if profile.effective_mass > config.mass_max_suckable {
        sink.stats.skipped_mass += 1;
        return;
    }

    // Cone, on the coarse bounds center
    if !within_cone(nozzle.forward, center - nozzle.position, mode.cone_angle_deg) {
        sink.stats.skipped_cone += 1;
        return;
    }

    // Authoritative distance
    let capture_center = nozzle.capture_center(config.capture_offset);
    let closest = closest_point(&shape, center, capture_center);
    let distance = closest.distance(capture_center);

    if config.requires_line_of_sight {
        let visible = line_of_sight(
            world,
            query,
            config,
            nozzle.position,
            closest,
            LosKey {
                collider,
                body,
                distance,
            },
            state.los_cache,
            raycasts,
            sink,
            now,
        );
        if !visible {
            sink.stats.skipped_los += 1;
            return;
        }
    }

    // Spring-damper
    let t = (distance / mode.range).clamp(0.0, 1.0);
    let stiffness = force::stiffness(
        mode.base_stiffness,
        &config.stiffness_curve,
        config.stiffness_floor,
        t,
        profile.suction_multiplier,
    );
    let accel = force::acceleration(&SpringInput {
        anchor: nozzle.position,
        center_of_mass: rb.position + rb.center_of_mass,
        velocity: rb.velocity,
        effective_mass: profile.effective_mass,
        stiffness,
        damping_factor: mode.damping_factor,
        acceleration_limit: config.acceleration_limit,
    });
    if linked {
        suction_link::engage(world, body);
    }

    // Snap
    let snap = if distance < config.snap.distance && config.snap.blend > 0.0 {
        force::snap_delta(rb.position, nozzle.position, config.snap.speed * dt, config.snap.blend)
    } else {
        DVec3::ZERO
    };

    if let Ok(mut body_mut) = world.get::<&mut RigidBody>(body) {
        let mass = body_mut.mass;
        body_mut.force += force::applied_force(accel, mass);
        body_mut.position += snap;
    }
    sink.stats.force_applied += 1;
    let first_visit = state.attracted.insert(body);

    // Struggle
    let mut capture_ready = true;
    if let Some(resistance) = profile.resistance {
        capture_ready = if first_visit {
            struggle(world, query, params, body, &shape, center, distance, t, &profile, resistance)
        } else {
            world
                .get::<&StruggleState>(body)
                .map(|s| s.progress >= resistance.capacity)
                .unwrap_or(false)
        };
    }

    // Capture decision
    if distance >= config.capture_radius || !capture_ready {
        return;
    }
    if state.cooldowns.get(&body).is_some_and(|ready| now < *ready) {
        sink.stats.skipped_cooldown += 1;
        return;
    }
    state
        .cooldowns
        .insert(body, now + config.capture_cooldown_secs);
    if !profile.capturable {
        return;
    }

    let root = profile.capture_root.unwrap_or_else(|| root_of(world, body));
    let target = CaptureTarget {
        body,
        root,
        point: closest,
        micro: profile.micro,
        material: profile.material,
        volume: profile.volume,
    };
    capture::capture(world, config, now, &target, sink);
}

#[derive(Clone, Copy)]
struct LosKey {
    collider: Entity,
    body: Entity,
    distance: f64,
}

/// Visibility from the nozzle to the closest point, cached per collider.
/// Over the raycast budget the candidate counts as blocked.
#[allow(clippy::too_many_arguments)]
fn line_of_sight(
    world: &World,
    query: &dyn SceneQuery,
    config: &SuctionConfig,
    origin: DVec3,
    target: DVec3,
    key: LosKey,
    cache: &mut LosCache,
    raycasts: &mut RaycastBudget,
    sink: &mut CaptureSink,
    now: f64,
) -> bool {
    if let Some(visible) = cache.lookup(key.collider, key.distance, now) {
        sink.stats.los_cache_hits += 1;
        return visible;
    }
    if !raycasts.try_take() {
        return false;
    }
    sink.stats.raycasts += 1;

    let to_target = target - origin;
    let length = to_target.length();
    let visible = if length <= f64::EPSILON {
        true
    } else {
        match query.raycast(world, origin, to_target / length, length, config.blocking_layers) {
            Some(hit) => body_of(world, hit.entity) == Some(key.body),
            None => true,
        }
    };
    cache.store(key.collider, visible, key.distance, now);
    visible
}

/// Advance the struggle of one resisting body and apply its adherence.
/// Returns whether the resistance gate allows capture.
#[allow(clippy::too_many_arguments)]
fn struggle(
    world: &mut World,
    query: &dyn SceneQuery,
    params: &SuctionParams,
    body: Entity,
    shape: &Shape,
    center: DVec3,
    distance: f64,
    t: f64,
    profile: &TargetProfile,
    resistance: Resistance,
) -> bool {
    let config = params.config;
    let tuning = &config.resistance;

    let view: &World = world;
    let grounded = resistance.requires_ground.then(|| {
        let probes = ground_probes(shape, center, tuning.ground_probe_distance, tuning.ground_probe_lift);
        is_grounded(&probes, |origin, max| {
            query
                .raycast(view, origin, DVec3::NEG_Y, max, config.ground_layers)
                .is_some()
        })
    });

    let current = world
        .get::<&StruggleState>(body)
        .map(|s| *s)
        .unwrap_or_default();
    let update = fsm::evaluate(&StruggleContext {
        state: current,
        resistance,
        distance,
        activation_distance: tuning.activation_distance.max(config.capture_radius),
        closeness: tuning.closeness_curve.evaluate(1.0 - t),
        gain_per_sec: tuning.gain_per_sec,
        suction_multiplier: profile.suction_multiplier,
        grounded,
        dt: params.dt,
    });
    if current.active != update.state.active {
        log::debug!("struggle {body:?}: {:?}", update.phase);
    }
    let _ = world.insert_one(body, update.state);

    if update.adherence > 0.0 {
        if let Ok(mut rb) = world.get::<&mut RigidBody>(body) {
            rb.force += DVec3::NEG_Y * update.adherence;
        }
    }
    update.capture_ready
}
