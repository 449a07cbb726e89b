//! Vacuum suction engine.
//!
//! Runs the fixed-tick attraction-and-capture loop against a host-owned
//! hecs world and produces `VacuumSnapshot`s for the host.

pub mod budget;
pub mod container;
pub mod energy;
pub mod engine;
pub mod force;
pub mod los_cache;
pub mod systems;
pub mod world_setup;

pub use suction_core as core;
pub use engine::VacuumEngine;

#[cfg(test)]
mod tests;
