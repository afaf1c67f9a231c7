//! Scalar range mapping shared by color, arrow width and arrow length.

use serde::{Deserialize, Serialize};

/// Maps a value from an input range onto an output range.
///
/// The normalized position `t = (value - in_min) / (in_max - in_min)` is
/// optionally clamped to `[0, 1]` and optionally shaped by a power curve
/// (`t^exponent`) before being scaled onto the output range. With an
/// exponent below 1 the output rises quickly for small inputs and flattens
/// towards the top, which is what makes light winds already readable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeMapper {
    pub in_min: f64,
    pub in_max: f64,
    pub out_min: f64,
    pub out_max: f64,
    #[serde(default)]
    pub exponent: Option<f64>,
    #[serde(default = "default_clamp")]
    pub clamp: bool,
}

fn default_clamp() -> bool {
    true
}

impl RangeMapper {
    /// Plain linear mapping without clamping.
    pub fn linear(in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Self {
        Self {
            in_min,
            in_max,
            out_min,
            out_max,
            exponent: None,
            clamp: false,
        }
    }

    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = Some(exponent);
        self
    }

    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    /// Map `value` onto the output range.
    pub fn map(&self, value: f64) -> f64 {
        let span = self.in_max - self.in_min;
        if span == 0.0 || value.is_nan() {
            return self.out_min;
        }

        let mut t = (value - self.in_min) / span;
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }

        if let Some(exponent) = self.exponent {
            // Keep the curve odd-symmetric so unclamped values below the
            // input range still map below out_min.
            t = t.signum() * t.abs().powf(exponent);
        }

        self.out_min + t * (self.out_max - self.out_min)
    }
}
