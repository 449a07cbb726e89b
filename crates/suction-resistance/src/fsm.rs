//! Struggle state machine.
//!
//! A resisting target accumulates progress while it is close to the nozzle and
//! loses it again once it escapes. Capture is permitted only when progress has
//! reached the target's capacity. Operates on plain data.

use suction_core::components::{Resistance, StruggleState};
use suction_core::constants::MASS_EPSILON;

/// What the target did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrugglePhase {
    /// No resistance declared, or nothing accumulated and out of reach.
    Idle,
    /// Inside the activation distance, gaining progress.
    Struggling,
    /// Outside the activation distance, progress decaying.
    Recovering,
    /// Lifted off the ground with lift-off capture allowed.
    LiftedOff,
    /// Lifted off the ground without lift-off capture: frozen.
    Held,
}

/// Input to the struggle FSM for a single target.
#[derive(Debug, Clone, Copy)]
pub struct StruggleContext {
    pub state: StruggleState,
    pub resistance: Resistance,
    /// Closest-point distance to the capture center.
    pub distance: f64,
    /// Already raised to at least the capture radius.
    pub activation_distance: f64,
    /// Closeness curve sampled at `1 - distance / range`.
    pub closeness: f64,
    pub gain_per_sec: f64,
    /// Effective suction multiplier of the target.
    pub suction_multiplier: f64,
    /// `None` when ground contact was not probed.
    pub grounded: Option<bool>,
    pub dt: f64,
}

/// Output from the struggle FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StruggleUpdate {
    pub state: StruggleState,
    pub phase: StrugglePhase,
    /// Whether the resistance gate allows capture this tick.
    pub capture_ready: bool,
    /// Magnitude of the downward adherence force (0 = none).
    pub adherence: f64,
}

/// Whether a target with these parameters resists at all.
pub fn resists(resistance: &Resistance) -> bool {
    resistance.capacity > 0.0
}

/// Evaluate one tick of struggle for one target.
pub fn evaluate(ctx: &StruggleContext) -> StruggleUpdate {
    let r = &ctx.resistance;
    if !resists(r) {
        return StruggleUpdate {
            state: StruggleState::default(),
            phase: StrugglePhase::Idle,
            capture_ready: true,
            adherence: 0.0,
        };
    }
    let capacity = r.capacity;
    let mut state = ctx.state;
    state.progress = state.progress.clamp(0.0, capacity);

    let lifted = r.requires_ground && ctx.grounded == Some(false);
    if lifted {
        if !r.capture_on_liftoff {
            return StruggleUpdate {
                state,
                phase: StrugglePhase::Held,
                capture_ready: state.progress >= capacity,
                adherence: 0.0,
            };
        }
        decay(&mut state, r.regeneration_per_sec * ctx.dt);
        return StruggleUpdate {
            state,
            phase: StrugglePhase::LiftedOff,
            capture_ready: true,
            adherence: 0.0,
        };
    }

    let phase = if ctx.distance <= ctx.activation_distance {
        let gain = ctx.gain_per_sec * ctx.closeness.max(0.0) * ctx.suction_multiplier
            / r.multiplier.max(MASS_EPSILON)
            * ctx.dt;
        state.progress = (state.progress + gain).clamp(0.0, capacity);
        state.active = true;
        StrugglePhase::Struggling
    } else {
        decay(&mut state, r.regeneration_per_sec * ctx.dt);
        if state.active {
            StrugglePhase::Recovering
        } else {
            StrugglePhase::Idle
        }
    };

    let adherence = if state.active && r.adherence_force > 0.0 {
        r.adherence_force * (1.0 - state.progress / capacity)
    } else {
        0.0
    };

    StruggleUpdate {
        state,
        phase,
        capture_ready: state.progress >= capacity,
        adherence,
    }
}

fn decay(state: &mut StruggleState, amount: f64) {
    state.progress = (state.progress - amount.max(0.0)).max(0.0);
    if state.progress <= 0.0 {
        state.progress = 0.0;
        state.active = false;
    }
}
