//! Core types and definitions for the suction simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, configuration, snapshots, events, and constants.
//! It has no dependency on any host engine or runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod curve;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
