//! Vacuum engine: the per-tick attraction-and-capture core.
//!
//! `VacuumEngine` owns all vacuum state (mode, energy, container, caches,
//! budgets), processes queued commands and runs the systems against a
//! host-owned `hecs::World`. Each tick returns a `VacuumSnapshot` carrying
//! the events produced during that tick. The tick path never fails:
//! degenerate situations become no-ops or events.

use std::collections::{HashMap, HashSet, VecDeque};

use hecs::{Entity, World};
use log::{debug, info, warn};

use suction_core::commands::VacuumCommand;
use suction_core::components::{PendingDespawn, RechargeZone};
use suction_core::config::{ModeProfile, SuctionConfig};
use suction_core::error::ConfigResult;
use suction_core::events::SuctionEvent;
use suction_core::state::{ContainerView, EnergyView, FeedbackLevels, TickStats, VacuumSnapshot};
use suction_core::types::{Nozzle, SimTime};
use suction_geometry::SceneQuery;

use crate::budget::RoundRobin;
use crate::container::Container;
use crate::energy::EnergyLedger;
use crate::los_cache::LosCache;
use crate::systems;
use crate::systems::capture::CaptureSink;
use crate::systems::suction::{SuctionParams, SuctionState};
use crate::systems::zones::ZoneKind;
use crate::world_setup;

/// One vacuum instance.
pub struct VacuumEngine {
    config: SuctionConfig,
    query: Box<dyn SceneQuery>,
    mode_index: usize,
    active: bool,
    time: SimTime,
    energy: EnergyLedger,
    container: Container,
    los_cache: LosCache,
    round_robin: RoundRobin,
    /// Body → earliest time it may be captured again.
    cooldowns: HashMap<Entity, f64>,
    zones_inside: HashMap<Entity, ZoneKind>,
    micro_count: u32,
    carried: u32,
    holding_node: Option<Entity>,
    command_queue: VecDeque<VacuumCommand>,
    candidates: Vec<Entity>,
    attracted: HashSet<Entity>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SuctionEvent>,
    stats: TickStats,
    feedback: FeedbackLevels,
}

impl VacuumEngine {
    /// Create an engine from a config and the scene-query capability it
    /// will use for discovery, line of sight, ground probes and zones.
    pub fn new(config: SuctionConfig, query: Box<dyn SceneQuery>) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            energy: EnergyLedger::new(&config.energy),
            container: Container::new(config.container_capacity),
            los_cache: LosCache::new(&config.budget),
            config,
            query,
            mode_index: 0,
            active: false,
            time: SimTime::default(),
            round_robin: RoundRobin::default(),
            cooldowns: HashMap::new(),
            zones_inside: HashMap::new(),
            micro_count: 0,
            carried: 0,
            holding_node: None,
            command_queue: VecDeque::new(),
            candidates: Vec::new(),
            attracted: HashSet::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            stats: TickStats::default(),
            feedback: systems::feedback::idle(),
        })
    }

    /// Queue a command for the next tick boundary.
    pub fn queue_command(&mut self, command: VacuumCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = VacuumCommand>) {
        self.command_queue.extend(commands);
    }

    /// Switch suction on. Returns whether suction is now active; refused while
    /// energy is at or below the activation threshold.
    pub fn start_suction(&mut self) -> bool {
        if self.active {
            return true;
        }
        if !self.energy.can_activate() {
            debug!(
                "start refused: energy {:.2} <= {:.2}",
                self.energy.current(),
                self.energy.min_to_activate()
            );
            return false;
        }
        self.active = true;
        self.events
            .push(SuctionEvent::SuctionStateChanged { active: true });
        debug!("suction on ({})", self.mode().name);
        true
    }

    /// Switch suction off. Calling it again changes nothing.
    pub fn stop_suction(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.events
            .push(SuctionEvent::SuctionStateChanged { active: false });
        debug!("suction off");
    }

    /// Select the mode called `name`. Unknown names are logged and ignored.
    pub fn set_mode(&mut self, name: &str) -> bool {
        match self.config.mode_index(name) {
            Ok(index) => {
                self.select_mode(index);
                true
            }
            Err(err) => {
                warn!("{err}");
                false
            }
        }
    }

    /// Advance to the next mode, wrapping around.
    pub fn cycle_mode(&mut self) {
        let next = (self.mode_index + 1) % self.config.modes.len();
        self.select_mode(next);
    }

    fn select_mode(&mut self, index: usize) {
        self.mode_index = index;
        let name = self.mode().name.clone();
        debug!("mode -> {name}");
        self.events.push(SuctionEvent::ModeChanged { name });
    }

    /// Empty the container, despawning everything it held. Resets the
    /// carried counter and returns how many stored entities were removed.
    pub fn drain_container(&mut self, world: &mut World) -> usize {
        for &entity in self.container.items() {
            let _ = world.insert_one(
                entity,
                PendingDespawn {
                    at_secs: f64::NEG_INFINITY,
                },
            );
        }
        let count = self.container.drain_all();
        systems::cleanup::run(world, self.time.elapsed_secs, &mut self.despawn_buffer);
        self.carried = 0;
        if count > 0 {
            info!("deposited {count} stored captures");
            self.events.push(SuctionEvent::Deposited {
                count: count as u32,
            });
        }
        count
    }

    /// Register a continuous recharge zone (or apply a one-shot one) without
    /// a zone entity in the world.
    pub fn enter_recharge_zone(&mut self, zone: RechargeZone) {
        if zone.continuous {
            self.energy.enter_zone(zone.rate_per_sec);
            return;
        }
        let amount = if zone.rate_per_sec > 0.0 {
            zone.rate_per_sec
        } else {
            self.energy.base_recharge_per_sec()
        };
        if let Some(fraction) = self.energy.recharge(amount) {
            self.events.push(SuctionEvent::EnergyChanged { fraction });
        }
    }

    pub fn exit_recharge_zone(&mut self, zone: RechargeZone) {
        if zone.continuous {
            self.energy.exit_zone(zone.rate_per_sec);
        }
    }

    /// Advance one fixed tick. Without a nozzle pose the suction step idles.
    pub fn tick(&mut self, world: &mut World, nozzle: Option<Nozzle>) -> VacuumSnapshot {
        let dt = self.config.dt();
        let now = self.time.elapsed_secs;
        self.stats = TickStats::default();
        self.attracted.clear();

        self.process_commands(world);
        self.query.prepare(world);

        if let Some(nozzle) = nozzle {
            let outcome = systems::zones::run(
                world,
                self.query.as_ref(),
                nozzle.position,
                self.config.zone_layers,
                &mut self.zones_inside,
                &mut self.energy,
                &mut self.events,
            );
            if outcome.deposit_entered {
                self.drain_container(world);
            }
        }
        systems::zones::recharge(&mut self.energy, dt, &mut self.events);

        self.feedback = match nozzle {
            Some(nozzle) if self.active => self.run_suction(world, nozzle, now, dt),
            _ => systems::feedback::idle(),
        };

        systems::suction_link::run(world, dt, &self.attracted);
        systems::cleanup::run(world, now, &mut self.despawn_buffer);
        self.cooldowns.retain(|_, ready| *ready > now);
        self.los_cache.prune(now);

        self.time.advance(dt);
        self.build_snapshot()
    }

    fn run_suction(&mut self, world: &mut World, nozzle: Nozzle, now: f64, dt: f64) -> FeedbackLevels {
        if !self.energy.can_activate() {
            self.deactivate();
            return systems::feedback::idle();
        }
        let cost = self.mode().energy_cost_per_sec * dt;
        if let Some(fraction) = self.energy.consume(cost) {
            self.events.push(SuctionEvent::EnergyChanged { fraction });
        }

        let holding_node = self.holding_node(world);
        let mode = &self.config.modes[self.mode_index];
        let params = SuctionParams {
            config: &self.config,
            mode,
            nozzle,
            now,
            dt,
        };
        let mut state = SuctionState {
            candidates: &mut self.candidates,
            round_robin: &mut self.round_robin,
            los_cache: &mut self.los_cache,
            cooldowns: &mut self.cooldowns,
            attracted: &mut self.attracted,
        };
        let mut sink = CaptureSink {
            container: &mut self.container,
            holding_node,
            micro_count: &mut self.micro_count,
            carried: &mut self.carried,
            stats: &mut self.stats,
            events: &mut self.events,
        };
        systems::suction::run(world, self.query.as_ref(), &params, &mut state, &mut sink);

        let levels = systems::feedback::active(
            self.stats.force_applied,
            self.config.feedback.saturation_count,
            mode,
        );

        // The tick already paid for still runs; suction stops right after it.
        if !self.energy.can_activate() {
            self.deactivate();
            return systems::feedback::idle();
        }
        levels
    }

    fn deactivate(&mut self) {
        info!(
            "energy depleted ({:.2}), suction forced off",
            self.energy.current()
        );
        self.stop_suction();
    }

    /// Node stored captures are parented under, spawned on first use.
    fn holding_node(&mut self, world: &mut World) -> Entity {
        match self.holding_node {
            Some(node) if world.contains(node) => node,
            _ => {
                let node = world_setup::spawn_holding_node(world);
                self.holding_node = Some(node);
                node
            }
        }
    }

    fn process_commands(&mut self, world: &mut World) {
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                VacuumCommand::StartSuction => {
                    self.start_suction();
                }
                VacuumCommand::StopSuction => self.stop_suction(),
                VacuumCommand::SetMode { name } => {
                    self.set_mode(&name);
                }
                VacuumCommand::CycleMode => self.cycle_mode(),
                VacuumCommand::DrainContainer => {
                    self.drain_container(world);
                }
            }
        }
    }

    fn build_snapshot(&mut self) -> VacuumSnapshot {
        VacuumSnapshot {
            time: self.time,
            active: self.active,
            mode: self.mode().name.clone(),
            energy: EnergyView {
                current: self.energy.current(),
                max: self.energy.max(),
                fraction: self.energy.fraction(),
                zones: self.energy.zone_count() as u32,
            },
            container: ContainerView {
                len: self.container.len(),
                capacity: self.container.capacity(),
            },
            micro_captured: self.micro_count,
            carried: self.carried,
            stats: self.stats,
            feedback: self.feedback,
            events: std::mem::take(&mut self.events),
        }
    }

    pub fn config(&self) -> &SuctionConfig {
        &self.config
    }

    /// The active mode profile.
    pub fn mode(&self) -> &ModeProfile {
        &self.config.modes[self.mode_index]
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn energy(&self) -> &EnergyLedger {
        &self.energy
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn micro_captured(&self) -> u32 {
        self.micro_count
    }

    pub fn carried(&self) -> u32 {
        self.carried
    }

    pub fn stats(&self) -> TickStats {
        self.stats
    }

    /// Round-robin position into the candidate list.
    pub fn cursor(&self) -> usize {
        self.round_robin.cursor()
    }

    pub fn los_cache(&self) -> &LosCache {
        &self.los_cache
    }
}
