use thiserror::Error;

/// Reasons a [`VoiceConfig`](crate::synth::config::VoiceConfig) is refused.
///
/// Only construction can fail. Once an engine exists, every input it sees
/// is clamped instead of rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("sample rate {0} Hz is outside the supported range 8000..=384000")]
    InvalidSampleRate(f32),

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
