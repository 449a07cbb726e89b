//! Collision geometry for the suction simulation.
//!
//! Closest-point and ray tests against collider shapes, the cone test,
//! and the injected scene-query capability used by the engine.

pub use suction_core as core;

pub mod cone;
pub mod query;
pub mod ray;
pub mod shapes;

// Re-export key types for convenience.
pub use cone::{angle_between_deg, within_cone};
pub use query::{BruteForceQuery, GridQuery, RayHit, SceneQuery};
pub use shapes::closest_point;
