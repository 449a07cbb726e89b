//! Scene queries injected into the engine.
//!
//! The engine never walks the world's colliders itself. It asks a
//! [`SceneQuery`] for overlap and ray results so hosts can plug in their own
//! broadphase. Inactive colliders (or colliders under an inactive body or
//! ancestor) are invisible to every query.

use std::collections::{HashMap, HashSet};

use glam::DVec3;
use hecs::{Entity, World};

use suction_core::components::{AttachedBody, Collider, Inactive, Parent, RigidBody, Transform};
use suction_core::constants::GRID_CELL_SIZE;
use suction_core::types::Layers;

use crate::ray::ray_shape;
use crate::shapes::{aabb, overlaps_sphere};

/// Guard against cycles in malformed parent chains.
const MAX_HIERARCHY_DEPTH: usize = 64;

/// First contact of a ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: DVec3,
    pub distance: f64,
}

/// World-query capability handed to the engine at construction.
pub trait SceneQuery {
    /// Called once at the start of every tick, before any query.
    fn prepare(&mut self, _world: &World) {}

    /// Append every active collider on `mask` touching the sphere to `out`,
    /// in a deterministic order.
    fn overlap_sphere(
        &self,
        world: &World,
        center: DVec3,
        radius: f64,
        mask: Layers,
        out: &mut Vec<Entity>,
    );

    /// Nearest active collider on `mask` hit by the ray within `max_distance`.
    /// `direction` must be normalized.
    fn raycast(
        &self,
        world: &World,
        origin: DVec3,
        direction: DVec3,
        max_distance: f64,
        mask: Layers,
    ) -> Option<RayHit>;
}

/// Body entity a collider belongs to: its `AttachedBody`, or itself when it
/// carries a `RigidBody`.
pub fn body_of(world: &World, collider: Entity) -> Option<Entity> {
    if let Ok(attached) = world.get::<&AttachedBody>(collider) {
        return Some(attached.0);
    }
    world.get::<&RigidBody>(collider).ok().map(|_| collider)
}

/// World-space center of a collider entity.
pub fn collider_center(world: &World, entity: Entity) -> Option<(Collider, DVec3)> {
    let collider = *world.get::<&Collider>(entity).ok()?;
    let origin = match body_of(world, entity) {
        Some(body) => world.get::<&RigidBody>(body).ok()?.position,
        None => world
            .get::<&Transform>(entity)
            .map(|t| t.position)
            .unwrap_or_default(),
    };
    Some((collider, origin + collider.offset))
}

/// Walks the parent chain to the top-level entity.
pub fn root_of(world: &World, entity: Entity) -> Entity {
    let mut current = entity;
    for _ in 0..MAX_HIERARCHY_DEPTH {
        match world.get::<&Parent>(current) {
            Ok(parent) => current = parent.0,
            Err(_) => break,
        }
    }
    current
}

/// Whether `entity` is active in the hierarchy (neither it nor any ancestor
/// is `Inactive`).
pub fn is_active_in_hierarchy(world: &World, entity: Entity) -> bool {
    let mut current = entity;
    for _ in 0..MAX_HIERARCHY_DEPTH {
        if !world.contains(current) || world.get::<&Inactive>(current).is_ok() {
            return false;
        }
        match world.get::<&Parent>(current) {
            Ok(parent) => current = parent.0,
            Err(_) => return true,
        }
    }
    true
}

/// Whether a collider, and the body it belongs to, are both active.
pub fn collider_is_active(world: &World, collider: Entity) -> bool {
    if !is_active_in_hierarchy(world, collider) {
        return false;
    }
    match body_of(world, collider) {
        Some(body) if body != collider => is_active_in_hierarchy(world, body),
        _ => true,
    }
}

fn active_colliders_on(world: &World, mask: Layers) -> Vec<(Entity, Collider)> {
    let mut found: Vec<(Entity, Collider)> = world
        .query::<&Collider>()
        .iter()
        .filter(|(_, c)| c.layers.intersects(mask))
        .map(|(e, c)| (e, *c))
        .collect();
    found.retain(|(e, _)| collider_is_active(world, *e));
    found.sort_by_key(|(e, _)| e.to_bits());
    found
}

fn nearest_hit(
    world: &World,
    candidates: impl Iterator<Item = Entity>,
    origin: DVec3,
    direction: DVec3,
    max_distance: f64,
    mask: Layers,
) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for entity in candidates {
        let Some((collider, center)) = collider_center(world, entity) else {
            continue;
        };
        if !collider.layers.intersects(mask) || !collider_is_active(world, entity) {
            continue;
        }
        let limit = best.map_or(max_distance, |b| b.distance);
        if let Some(t) = ray_shape(&collider.shape, center, origin, direction, limit) {
            if best.map_or(true, |b| t < b.distance) {
                best = Some(RayHit {
                    entity,
                    point: origin + direction * t,
                    distance: t,
                });
            }
        }
    }
    best
}

/// Checks every collider in the world. Fine for small scenes and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceQuery;

impl SceneQuery for BruteForceQuery {
    fn overlap_sphere(
        &self,
        world: &World,
        center: DVec3,
        radius: f64,
        mask: Layers,
        out: &mut Vec<Entity>,
    ) {
        for (entity, _) in active_colliders_on(world, mask) {
            if let Some((collider, c)) = collider_center(world, entity) {
                if overlaps_sphere(&collider.shape, c, center, radius) {
                    out.push(entity);
                }
            }
        }
    }

    fn raycast(
        &self,
        world: &World,
        origin: DVec3,
        direction: DVec3,
        max_distance: f64,
        mask: Layers,
    ) -> Option<RayHit> {
        let entities: Vec<Entity> = active_colliders_on(world, mask)
            .into_iter()
            .map(|(e, _)| e)
            .collect();
        nearest_hit(world, entities.into_iter(), origin, direction, max_distance, mask)
    }
}

type Cell = (i32, i32, i32);

/// Uniform spatial hash over collider bounds, rebuilt every tick.
///
/// Cell size must be chosen relative to the query radius: a cell much smaller
/// than the suction range makes every overlap walk many empty cells.
#[derive(Debug, Clone)]
pub struct GridQuery {
    cell_size: f64,
    cells: HashMap<Cell, Vec<Entity>>,
}

impl Default for GridQuery {
    fn default() -> Self {
        Self::new(GRID_CELL_SIZE)
    }
}

impl GridQuery {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size: cell_size.max(1e-3),
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, p: DVec3) -> Cell {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
            (p.z / self.cell_size).floor() as i32,
        )
    }

    /// Entities whose bounds share a cell with the box `(min, max)`,
    /// deduplicated and in deterministic order.
    fn gather(&self, min: DVec3, max: DVec3) -> Vec<Entity> {
        let lo = self.cell_of(min);
        let hi = self.cell_of(max);
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for x in lo.0..=hi.0 {
            for y in lo.1..=hi.1 {
                for z in lo.2..=hi.2 {
                    if let Some(entities) = self.cells.get(&(x, y, z)) {
                        for &e in entities {
                            if seen.insert(e) {
                                found.push(e);
                            }
                        }
                    }
                }
            }
        }
        found.sort_by_key(|e| e.to_bits());
        found
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

impl SceneQuery for GridQuery {
    fn prepare(&mut self, world: &World) {
        for v in self.cells.values_mut() {
            v.clear();
        }

        let entities: Vec<Entity> = world.query::<&Collider>().iter().map(|(e, _)| e).collect();
        for entity in entities {
            let Some((collider, center)) = collider_center(world, entity) else {
                continue;
            };
            let (min, max) = aabb(&collider.shape, center);
            let lo = self.cell_of(min);
            let hi = self.cell_of(max);
            for x in lo.0..=hi.0 {
                for y in lo.1..=hi.1 {
                    for z in lo.2..=hi.2 {
                        self.cells.entry((x, y, z)).or_default().push(entity);
                    }
                }
            }
        }
        self.cells.retain(|_, v| !v.is_empty());
    }

    fn overlap_sphere(
        &self,
        world: &World,
        center: DVec3,
        radius: f64,
        mask: Layers,
        out: &mut Vec<Entity>,
    ) {
        let reach = DVec3::splat(radius);
        for entity in self.gather(center - reach, center + reach) {
            let Some((collider, c)) = collider_center(world, entity) else {
                continue;
            };
            if collider.layers.intersects(mask)
                && collider_is_active(world, entity)
                && overlaps_sphere(&collider.shape, c, center, radius)
            {
                out.push(entity);
            }
        }
    }

    fn raycast(
        &self,
        world: &World,
        origin: DVec3,
        direction: DVec3,
        max_distance: f64,
        mask: Layers,
    ) -> Option<RayHit> {
        let end = origin + direction * max_distance;
        let candidates = self.gather(origin.min(end), origin.max(end));
        nearest_hit(world, candidates.into_iter(), origin, direction, max_distance, mask)
    }
}
