//! Low-level DSP primitives the voice is built from.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside the voice. Each one owns only its own memory (a
//! phase, two integrator states, a ramp) and takes its per-sample controls
//! as arguments, so the voice decides where every value comes from.

/// Saturating waveshaper driven by the timbre control.
pub mod drive;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// Low frequency oscillator for cutoff/drive modulation.
pub mod lfo;
/// Band-limited audio-rate source oscillator.
pub mod oscillator;
/// Semitone/cent offsets to frequency.
pub mod pitch;
/// One-pole parameter smoothing.
pub mod smoother;

pub use drive::{DriveCurve, DriveStage};
pub use filter::{FilterType, SVFilter};
pub use lfo::{Lfo, LfoShape};
pub use oscillator::{OscillatorBlock, OscillatorWaveform};
pub use smoother::{SmoothedFrame, SmoothedParameters, Smoother};
