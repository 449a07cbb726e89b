//! Piecewise response curves.
//!
//! Keys are `(t, value)` pairs sorted by `t`. Evaluation clamps to the first
//! and last key outside their range.

use serde::{Deserialize, Serialize};

use crate::enums::Interpolation;

/// A single curve control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub t: f64,
    pub value: f64,
}

/// Piecewise curve over a set of control points.
///
/// Deserialized keys go through [`Curve::new`], so they are always sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCurve")]
pub struct Curve {
    pub keys: Vec<CurveKey>,
    pub interpolation: Interpolation,
}

#[derive(Deserialize)]
struct RawCurve {
    keys: Vec<CurveKey>,
    #[serde(default)]
    interpolation: Interpolation,
}

impl From<RawCurve> for Curve {
    fn from(raw: RawCurve) -> Self {
        Curve::new(raw.keys, raw.interpolation)
    }
}

impl Curve {
    pub fn new(mut keys: Vec<CurveKey>, interpolation: Interpolation) -> Self {
        keys.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self {
            keys,
            interpolation,
        }
    }

    /// Flat curve.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![CurveKey { t: 0.0, value }], Interpolation::Linear)
    }

    /// Straight line from `(0, start)` to `(1, end)`.
    pub fn linear(start: f64, end: f64) -> Self {
        Self::new(
            vec![
                CurveKey { t: 0.0, value: start },
                CurveKey { t: 1.0, value: end },
            ],
            Interpolation::Linear,
        )
    }

    /// Ease-in-out from `(0, start)` to `(1, end)`.
    pub fn ease_in_out(start: f64, end: f64) -> Self {
        Self::new(
            vec![
                CurveKey { t: 0.0, value: start },
                CurveKey { t: 1.0, value: end },
            ],
            Interpolation::Smooth,
        )
    }

    /// Evaluate the curve at `t`. An empty curve evaluates to 0.
    pub fn evaluate(&self, t: f64) -> f64 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return 0.0,
        };
        if t <= first.t {
            return first.value;
        }
        if t >= last.t {
            return last.value;
        }

        // First key strictly after t; t lies in [keys[i-1].t, keys[i].t).
        let i = self.keys.partition_point(|k| k.t <= t);
        let a = self.keys[i - 1];
        let b = self.keys[i];
        let span = b.t - a.t;
        if span <= f64::EPSILON {
            return b.value;
        }
        let mut u = (t - a.t) / span;
        if self.interpolation == Interpolation::Smooth {
            u = u * u * (3.0 - 2.0 * u);
        }
        a.value + (b.value - a.value) * u
    }

    /// Evaluate and raise the result to at least `floor`.
    pub fn evaluate_floored(&self, t: f64, floor: f64) -> f64 {
        self.evaluate(t).max(floor)
    }

    /// Whether every key value is strictly positive.
    pub fn is_positive(&self) -> bool {
        !self.keys.is_empty() && self.keys.iter().all(|k| k.value > 0.0)
    }
}
