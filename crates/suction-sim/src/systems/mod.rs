//! ECS systems run by the engine each tick.
//!
//! Systems are free functions over `&mut World` plus the engine state they
//! need. They own no state of their own.

pub mod capture;
pub mod cleanup;
pub mod feedback;
pub mod integrate;
pub mod suction;
pub mod suction_link;
pub mod zones;
