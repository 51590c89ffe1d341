//! Drive / Waveshaping
//!
//! The "Timbre" control. The filtered signal is pushed through a saturating
//! transfer function; the harder it is pushed, the more harmonics appear.
//!
//! # How It Works
//!
//!   gain   = 1 + drive * K          drive in [0, 1], K = drive range
//!   output = f(input * gain)
//!
//! At drive 0 the gain is 1 and small signals stay in the near-linear part
//! of f(). As drive rises, peaks are pushed into the flat shoulders of f()
//! and get rounded (or cut) off.
//!
//! # Curves
//!
//! Tanh:
//!   f(x) = tanh(x)
//!   - Smooth, symmetric, the classic "warm" saturation
//!
//! Soft:
//!   f(x) = x / (1 + |x|)
//!   - Cheaper than tanh, gentler knee, approaches ±1 more slowly
//!
//! Hard:
//!   f(x) = clamp(x, -1, 1)
//!   - Linear until it hits the rail, then flat. Buzzy odd harmonics.
//!
//! Every curve maps any finite input into [-1, 1]. That bound is what lets
//! the voice promise a full-scale output no matter how hard the filter rings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default `K` in `gain = 1 + drive * K`.
pub const DEFAULT_DRIVE_RANGE: f32 = 8.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DriveCurve {
    #[default]
    Tanh,
    Soft,
    Hard,
}

/// Hyperbolic tangent saturation.
#[inline]
pub fn tanh_clip(x: f32) -> f32 {
    x.tanh()
}

/// Soft clipping using x / (1 + |x|) transfer function.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    if x.is_infinite() {
        return x.signum();
    }
    x / (1.0 + x.abs())
}

/// Hard clipping at ±1.
#[inline]
pub fn hard_clip(x: f32) -> f32 {
    x.clamp(-1.0, 1.0)
}

/// Gain-then-saturate stage.
#[derive(Clone, Copy, Debug)]
pub struct DriveStage {
    curve: DriveCurve,
    range: f32,
}

impl DriveStage {
    pub fn new(curve: DriveCurve, range: f32) -> Self {
        Self {
            curve,
            range: range.max(0.0),
        }
    }

    /// Pre-saturation gain for a drive amount. Monotonic in `drive`.
    #[inline]
    pub fn gain(&self, drive: f32) -> f32 {
        1.0 + drive.clamp(0.0, 1.0) * self.range
    }

    #[inline]
    pub fn process(&self, input: f32, drive: f32) -> f32 {
        let x = input * self.gain(drive);
        let y = match self.curve {
            DriveCurve::Tanh => tanh_clip(x),
            DriveCurve::Soft => soft_clip(x),
            DriveCurve::Hard => hard_clip(x),
        };

        if y.is_nan() {
            0.0
        } else {
            y
        }
    }

    /// Apply the stage to a buffer at a fixed drive.
    pub fn process_buffer(&self, buffer: &mut [f32], drive: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample, drive);
        }
    }

    pub fn curve(&self) -> DriveCurve {
        self.curve
    }
}

impl Default for DriveStage {
    fn default() -> Self {
        Self::new(DriveCurve::Tanh, DEFAULT_DRIVE_RANGE)
    }
}
