//! suction-harness: run the vacuum engine headless over a scattered scene.
//!
//! Usage:
//!   suction-harness run --ticks 500 --trash 40 --seed 7
//!   suction-harness run --config vacuum.json --grid --log-level debug
//!   suction-harness defaults > vacuum.json

mod logger;

use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use glam::DVec3;
use hecs::World;
use log::{debug, info, LevelFilter};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use suction_core::commands::VacuumCommand;
use suction_core::config::SuctionConfig;
use suction_core::events::SuctionEvent;
use suction_core::types::Nozzle;
use suction_geometry::{BruteForceQuery, GridQuery, SceneQuery};
use suction_sim::systems::integrate;
use suction_sim::{world_setup, VacuumEngine};

use crate::logger::Logger;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "defaults" => cmd_defaults(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "suction-harness: headless vacuum suction runner\n\
         \n\
         Commands:\n\
         \n\
         run       Scatter trash, sweep the nozzle across it and report\n\
         \n\
           --config <path>     JSON config (optional, default: built-in)\n\
           --ticks <N>         Ticks to simulate (default: 500)\n\
           --trash <N>         Pieces of trash to scatter (default: 40)\n\
           --seed <N>          RNG seed (default: 42)\n\
           --grid              Use the spatial-grid scene query\n\
           --log-level <L>     off|error|warn|info|debug|trace (default: info)\n\
         \n\
         defaults  Print the default config as JSON\n"
    );
}

fn parse_value<T: FromStr>(args: &[String], flag: &str, default: T) -> T {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            match args[i + 1].parse::<T>() {
                Ok(v) => return v,
                Err(_) => {
                    eprintln!("Error: invalid value for {flag}: {}", args[i + 1]);
                    process::exit(1);
                }
            }
        }
    }
    default
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

// --- Defaults command ---

fn cmd_defaults() {
    match serde_json::to_string_pretty(&SuctionConfig::default()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

// --- Run command ---

/// Summary printed as JSON at the end of a run.
#[derive(Debug, Default, Serialize)]
struct Report {
    ticks: u64,
    seed: u64,
    trash: usize,
    stored: u32,
    micro_captured: u32,
    container_full: u32,
    deposited: u32,
    forced_off: bool,
    final_energy: f64,
    final_mode: String,
    peak_load: f64,
    raycasts: u64,
    los_cache_hits: u64,
}

fn cmd_run(args: &[String]) {
    let level = parse_value(args, "--log-level", LevelFilter::Info);
    if let Err(e) = Logger::init(level) {
        eprintln!("Error: could not install logger: {e}");
    }

    let config = match parse_path(args, "--config") {
        Some(path) => match SuctionConfig::load(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => SuctionConfig::default(),
    };
    let ticks: u64 = parse_value(args, "--ticks", 500);
    let trash: usize = parse_value(args, "--trash", 40);
    let seed: u64 = parse_value(args, "--seed", 42);

    let query: Box<dyn SceneQuery> = if has_flag(args, "--grid") {
        Box::new(GridQuery::default())
    } else {
        Box::new(BruteForceQuery)
    };
    let mut engine = match VacuumEngine::new(config.clone(), query) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    world_setup::spawn_ground(&mut world, 0.0, 20.0);
    world_setup::scatter_trash(&mut world, &mut rng, &config, DVec3::ZERO, 3.5, trash);
    info!("scene ready: {trash} pieces of trash, seed {seed}");

    engine.queue_command(VacuumCommand::StartSuction);
    let mut report = Report {
        seed,
        trash,
        ..Report::default()
    };

    let dt = config.dt();
    for tick in 0..ticks {
        // Sweep the nozzle left and right, tilted slightly toward the floor.
        let t = tick as f64 * dt;
        let yaw = (t * 0.6).sin() * 0.9;
        let forward = DVec3::new(yaw.sin(), -0.15, yaw.cos());
        let nozzle = Nozzle::new(DVec3::new(0.0, 0.35, 0.0), forward);

        let snap = engine.tick(&mut world, Some(nozzle));
        integrate::run(&mut world, dt, config.gravity, Some(0.0));

        report.peak_load = report.peak_load.max(snap.feedback.load);
        report.raycasts += snap.stats.raycasts as u64;
        report.los_cache_hits += snap.stats.los_cache_hits as u64;
        for event in &snap.events {
            debug!("tick {}: {event:?}", snap.time.tick);
            match event {
                SuctionEvent::Captured { .. } => report.stored += 1,
                SuctionEvent::MicroCaptured { running_total } => {
                    report.micro_captured = *running_total
                }
                SuctionEvent::ContainerFull => {
                    report.container_full += 1;
                    engine.queue_command(VacuumCommand::DrainContainer);
                }
                SuctionEvent::Deposited { count } => report.deposited += count,
                SuctionEvent::SuctionStateChanged { active: false } => report.forced_off = true,
                _ => {}
            }
        }
        report.ticks = snap.time.tick;
        report.final_energy = snap.energy.current;
        report.final_mode = snap.mode;
    }

    info!(
        "done: {} stored, {} micro, energy {:.1}",
        report.stored, report.micro_captured, report.final_energy
    );
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
