//! Entity spawn factories for building suction scenes.
//!
//! Creates trash bodies, static geometry, trigger zones and the internal
//! holding node with appropriate component bundles.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use suction_core::components::*;
use suction_core::config::SuctionConfig;
use suction_core::enums::BodyControl;
use suction_core::types::{Layers, Shape};

fn dynamic_body(position: DVec3, mass: f64) -> RigidBody {
    RigidBody {
        position,
        velocity: DVec3::ZERO,
        angular_velocity: DVec3::ZERO,
        mass,
        center_of_mass: DVec3::ZERO,
        kinematic: false,
        use_gravity: true,
        force: DVec3::ZERO,
    }
}

fn trigger(shape: Shape, layers: Layers) -> Collider {
    Collider {
        shape,
        offset: DVec3::ZERO,
        layers,
    }
}

/// Spawn a dynamic trash body with a single collider on the trash layer.
pub fn spawn_trash(
    world: &mut World,
    position: DVec3,
    shape: Shape,
    mass: f64,
    descriptor: Option<TargetDescriptor>,
) -> Entity {
    let entity = world.spawn((dynamic_body(position, mass), trigger(shape, Layers::TRASH)));
    if let Some(descriptor) = descriptor {
        let _ = world.insert_one(entity, descriptor);
    }
    entity
}

/// Spawn a kinematic, agent-driven body that suction can take over.
pub fn spawn_agent(
    world: &mut World,
    position: DVec3,
    shape: Shape,
    mass: f64,
    return_after_secs: f64,
    descriptor: Option<TargetDescriptor>,
) -> Entity {
    let mut body = dynamic_body(position, mass);
    body.kinematic = true;
    body.use_gravity = false;
    let link = SuctionLink {
        return_after_secs,
        idle_secs: 0.0,
        control: BodyControl::Agent,
        pin_height: Some(position.y),
    };
    let entity = world.spawn((body, trigger(shape, Layers::TRASH), link));
    if let Some(descriptor) = descriptor {
        let _ = world.insert_one(entity, descriptor);
    }
    entity
}

/// Spawn a static blocker on the environment layer.
pub fn spawn_wall(world: &mut World, position: DVec3, half_extents: DVec3) -> Entity {
    world.spawn((
        Transform { position },
        trigger(Shape::Cuboid { half_extents }, Layers::ENVIRONMENT),
    ))
}

/// Spawn a flat ground slab whose top face sits at `height`.
pub fn spawn_ground(world: &mut World, height: f64, half_size: f64) -> Entity {
    let half_extents = DVec3::new(half_size, 0.5, half_size);
    world.spawn((
        Transform {
            position: DVec3::new(0.0, height - 0.5, 0.0),
        },
        trigger(Shape::Cuboid { half_extents }, Layers::GROUND),
    ))
}

/// Spawn the node stored captures are parented under.
pub fn spawn_holding_node(world: &mut World) -> Entity {
    world.spawn((HoldingNode, Transform::default()))
}

pub fn spawn_recharge_zone(
    world: &mut World,
    position: DVec3,
    half_extents: DVec3,
    zone: RechargeZone,
) -> Entity {
    world.spawn((
        Transform { position },
        trigger(Shape::Cuboid { half_extents }, Layers::ZONES),
        zone,
    ))
}

pub fn spawn_deposit_zone(world: &mut World, position: DVec3, half_extents: DVec3) -> Entity {
    world.spawn((
        Transform { position },
        trigger(Shape::Cuboid { half_extents }, Layers::ZONES),
        DepositZone,
    ))
}

/// Built-in trash materials.
pub fn material(id: &str) -> MaterialData {
    match id {
        "can" => MaterialData {
            id: id.into(),
            micro: false,
            suction_multiplier: 0.9,
            sfx_volume: 0.9,
            ..MaterialData::default()
        },
        "bottle" => MaterialData {
            id: id.into(),
            micro: false,
            virtual_mass: 1.5,
            ..MaterialData::default()
        },
        "brick" => MaterialData {
            id: id.into(),
            micro: false,
            capturable: false,
            suction_multiplier: 0.5,
            sfx_volume: 1.0,
            ..MaterialData::default()
        },
        _ => MaterialData {
            id: id.into(),
            suction_multiplier: 1.2,
            sfx_volume: 0.6,
            ..MaterialData::default()
        },
    }
}

/// Scatter `count` pieces of trash on the ground in front of `origin`,
/// inside a half-disc of `radius` facing +Z. Roughly one in five pieces
/// resists capture with the config's default resistance.
pub fn scatter_trash(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &SuctionConfig,
    origin: DVec3,
    radius: f64,
    count: usize,
) -> Vec<Entity> {
    const MATERIALS: [&str; 4] = ["paper", "can", "bottle", "brick"];
    let mut spawned = Vec::with_capacity(count);
    for _ in 0..count {
        let angle = rng.gen_range(-std::f64::consts::FRAC_PI_2..std::f64::consts::FRAC_PI_2);
        let distance = rng.gen_range(0.3..radius.max(0.31));
        let size = rng.gen_range(0.05..0.2);
        let position = origin
            + DVec3::new(angle.sin() * distance, size, angle.cos() * distance);
        let mass = rng.gen_range(0.1..4.0);

        let material = material(MATERIALS[rng.gen_range(0..MATERIALS.len())]);
        let resistance = (rng.gen_range(0..5) == 0).then(|| config.resistance.profile());
        let descriptor = TargetDescriptor {
            material: Some(material),
            resistance,
            ..TargetDescriptor::default()
        };
        spawned.push(spawn_trash(
            world,
            position,
            Shape::Sphere { radius: size },
            mass,
            Some(descriptor),
        ));
    }
    spawned
}
