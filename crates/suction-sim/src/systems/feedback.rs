//! Presentation levels derived from the suction load.

use suction_core::config::ModeProfile;
use suction_core::state::FeedbackLevels;

const PITCH: (f64, f64) = (1.0, 1.25);
const VOLUME: (f64, f64) = (0.4, 0.8);
const PARTICLES: (f64, f64) = (10.0, 80.0);

fn lerp((a, b): (f64, f64), t: f64) -> f64 {
    a + (b - a) * t
}

/// Normalized load from the number of bodies attracted this tick.
pub fn load(attracted: u32, saturation_count: u32) -> f64 {
    (attracted as f64 / saturation_count.max(1) as f64).clamp(0.0, 1.0)
}

/// Levels while suction runs.
pub fn active(attracted: u32, saturation_count: u32, mode: &ModeProfile) -> FeedbackLevels {
    let load = load(attracted, saturation_count);
    FeedbackLevels {
        load,
        motor_pitch: lerp(PITCH, load),
        motor_volume: lerp(VOLUME, load),
        particle_rate: lerp(PARTICLES, load),
        fov_kick: mode.fov_kick * load,
        shake_amplitude: mode.shake_amplitude * load,
    }
}

/// Levels while suction is off: motor silent, no particles, camera at rest.
pub fn idle() -> FeedbackLevels {
    FeedbackLevels {
        motor_pitch: PITCH.0,
        ..FeedbackLevels::default()
    }
}
