#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{drive::DEFAULT_DRIVE_RANGE, DriveCurve, FilterType, LfoShape, OscillatorWaveform};
use crate::error::{ConfigError, Result};

/// Where the LFO output goes.
///
/// `Cutoff` is the classic wobble/auto-wah; `Drive` makes the timbre breathe
/// instead; `Both` does the two at once.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModRouting {
    #[default]
    Cutoff,
    Drive,
    Both,
}

impl ModRouting {
    pub fn targets_cutoff(self) -> bool {
        matches!(self, ModRouting::Cutoff | ModRouting::Both)
    }

    pub fn targets_drive(self) -> bool {
        matches!(self, ModRouting::Drive | ModRouting::Both)
    }
}

/// Fixed, construction-time settings of a voice.
///
/// Unlike [`VoiceParameters`](crate::params::VoiceParameters), none of these
/// change while the voice runs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceConfig {
    pub sample_rate: f32,
    /// Smoothing time constant for every control parameter.
    pub smoothing_ms: f32,
    pub waveform: OscillatorWaveform,
    pub filter_type: FilterType,
    pub lfo_shape: LfoShape,
    pub mod_routing: ModRouting,
    /// Keytracked cutoff as a multiple of the oscillator frequency.
    pub cutoff_ratio: f32,
    /// Cutoff swing, in octaves, at full mod amount.
    pub mod_depth_octaves: f32,
    /// `K` in `gain = 1 + drive * K`.
    pub drive_range: f32,
    /// Drive swing at full mod amount.
    pub drive_mod_depth: f32,
    pub drive_curve: DriveCurve,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            smoothing_ms: 10.0,
            waveform: OscillatorWaveform::Saw,
            filter_type: FilterType::LowPass,
            lfo_shape: LfoShape::Sine,
            mod_routing: ModRouting::Cutoff,
            cutoff_ratio: 4.0,
            mod_depth_octaves: 2.0,
            drive_range: DEFAULT_DRIVE_RANGE,
            drive_mod_depth: 0.5,
            drive_curve: DriveCurve::Tanh,
        }
    }
}

impl VoiceConfig {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            ..Default::default()
        }
    }

    pub fn with_smoothing_ms(mut self, smoothing_ms: f32) -> Self {
        self.smoothing_ms = smoothing_ms;
        self
    }

    pub fn with_waveform(mut self, waveform: OscillatorWaveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn with_filter_type(mut self, filter_type: FilterType) -> Self {
        self.filter_type = filter_type;
        self
    }

    pub fn with_lfo_shape(mut self, lfo_shape: LfoShape) -> Self {
        self.lfo_shape = lfo_shape;
        self
    }

    pub fn with_mod_routing(mut self, mod_routing: ModRouting) -> Self {
        self.mod_routing = mod_routing;
        self
    }

    pub fn with_cutoff_ratio(mut self, cutoff_ratio: f32) -> Self {
        self.cutoff_ratio = cutoff_ratio;
        self
    }

    pub fn with_mod_depth_octaves(mut self, octaves: f32) -> Self {
        self.mod_depth_octaves = octaves;
        self
    }

    pub fn with_drive_range(mut self, drive_range: f32) -> Self {
        self.drive_range = drive_range;
        self
    }

    pub fn with_drive_mod_depth(mut self, depth: f32) -> Self {
        self.drive_mod_depth = depth;
        self
    }

    pub fn with_drive_curve(mut self, drive_curve: DriveCurve) -> Self {
        self.drive_curve = drive_curve;
        self
    }

    /// Reject settings the voice cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || !(8_000.0..=384_000.0).contains(&self.sample_rate) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }

        check_range("smoothing_ms", self.smoothing_ms, 0.0, 500.0)?;
        check_range("cutoff_ratio", self.cutoff_ratio, 0.125, 64.0)?;
        check_range("mod_depth_octaves", self.mod_depth_octaves, 0.0, 8.0)?;
        check_range("drive_range", self.drive_range, 0.0, 100.0)?;
        check_range("drive_mod_depth", self.drive_mod_depth, 0.0, 1.0)?;

        Ok(())
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field, value });
    }
    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
