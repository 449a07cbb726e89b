//! Struggle and resistance logic for targets that fight capture.
//!
//! Pure state machine plus ground-probe sampling. The engine feeds it plain
//! data each tick and writes the result back; nothing here touches the ECS.

pub mod fsm;
pub mod ground;

pub use suction_core as core;

pub use fsm::{evaluate, StruggleContext, StrugglePhase, StruggleUpdate};
pub use ground::{ground_probes, is_grounded, GroundProbe};

#[cfg(test)]
mod tests;
