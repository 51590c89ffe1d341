//! Realtime-safe single synthesis voice.
//!
//! One melodic voice: a band-limited source oscillator through a resonant
//! state-variable filter and a drive stage, with an LFO sweeping the cutoff.
//! Control values arrive from another thread through a lock-free
//! [`ParameterStore`] and are smoothed per sample, so slider moves never
//! click.
//!
//! ```
//! use saavy_voice::{ParameterStore, VoiceConfig, VoiceEngine, VoiceParameters};
//!
//! let mut store = ParameterStore::new(VoiceParameters::default());
//! let mut voice = VoiceEngine::new(VoiceConfig::new(48_000.0), store.reader())?;
//!
//! store.set_resonance(8.0);
//! let mut block = [0.0f32; 256];
//! voice.render_block(&mut block);
//! assert!(block.iter().all(|s| s.abs() <= 1.0));
//! # Ok::<(), saavy_voice::ConfigError>(())
//! ```

pub mod dsp;
pub mod error;
pub mod params; // Control values and their thread-safe exchange
pub mod synth; // The voice engine

pub use error::ConfigError;
pub use params::{ParamId, ParameterReader, ParameterStore, VoiceParameters};
pub use synth::{ModRouting, VoiceConfig, VoiceEngine, VoiceMessage};

/// Largest block size, in frames, a host is expected to render in one call.
pub const MAX_BLOCK_SIZE: usize = 2048;
