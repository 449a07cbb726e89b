//! Spring-damper attraction law and the near-field snap.
//!
//! Acceleration, not force, is clamped: the result is converted back to a
//! physical force with the body's real mass, so the limit bounds what every
//! body actually experiences regardless of its mass.

use glam::DVec3;

use suction_core::constants::MASS_EPSILON;
use suction_core::curve::Curve;

/// Inputs for one attraction evaluation.
#[derive(Debug, Clone, Copy)]
pub struct SpringInput {
    /// Point the body is pulled toward.
    pub anchor: DVec3,
    /// World-space center of mass.
    pub center_of_mass: DVec3,
    pub velocity: DVec3,
    pub effective_mass: f64,
    pub stiffness: f64,
    pub damping_factor: f64,
    pub acceleration_limit: f64,
}

/// `k = base × curve(t) × multiplier`, with the curve floored so the pull
/// never vanishes at the edge of the range.
pub fn stiffness(base: f64, curve: &Curve, floor: f64, t: f64, suction_multiplier: f64) -> f64 {
    base * curve.evaluate_floored(t.clamp(0.0, 1.0), floor) * suction_multiplier
}

/// Critical damping of a spring `k` on mass `m`, scaled by `factor`.
pub fn damping(stiffness: f64, mass: f64, factor: f64) -> f64 {
    factor * 2.0 * (stiffness * mass).max(MASS_EPSILON).sqrt()
}

/// Clamped acceleration the spring-damper imparts.
pub fn acceleration(input: &SpringInput) -> DVec3 {
    let c = damping(input.stiffness, input.effective_mass, input.damping_factor);
    let force =
        input.stiffness * (input.anchor - input.center_of_mass) - c * input.velocity;
    let accel = force / input.effective_mass.max(MASS_EPSILON);
    accel.clamp_length_max(input.acceleration_limit.max(0.0))
}

/// Force to add to a body of `physical_mass` so it accelerates by `accel`.
pub fn applied_force(accel: DVec3, physical_mass: f64) -> DVec3 {
    accel * physical_mass
}

/// Position correction for a body inside the snap distance: step toward
/// `anchor` by at most `max_step`, then keep `blend` of that step.
pub fn snap_delta(position: DVec3, anchor: DVec3, max_step: f64, blend: f64) -> DVec3 {
    let to_anchor = anchor - position;
    let dist = to_anchor.length();
    let step = if dist <= max_step || dist <= f64::EPSILON {
        to_anchor
    } else {
        to_anchor / dist * max_step
    };
    step * blend.clamp(0.0, 1.0)
}
