//! Control parameters shared between the control context and the voice.
//!
//! `VoiceParameters` is the plain value type: six fields, each with a closed
//! range. Any value that enters through this module is clamped into range,
//! never rejected, so the render path can trust whatever it reads.
//!
//! `store` holds the lock-free exchange that carries these values from the
//! control thread to the audio thread.

pub mod store;

pub use store::{ParameterReader, ParameterStore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| parameter       | unit      | range          | default |
| --------------- | --------- | -------------- | ------- |
| resonance (Q)   | -         | 0.1 ..= 18.0   | 0.707   |
| timbre / drive  | -         | 0.0 ..= 1.0    | 0.2     |
| mod amount      | -         | 0.0 ..= 1.0    | 0.0     |
| mod rate        | Hz        | 0.05 ..= 30.0  | 1.0     |
| tune semitones  | semitones | -24 ..= 24     | 0       |
| tune cents      | cents     | -100 ..= 100   | 0       |
*/

pub const RESONANCE_RANGE: (f32, f32) = (0.1, 18.0);
pub const DRIVE_RANGE: (f32, f32) = (0.0, 1.0);
pub const MOD_AMOUNT_RANGE: (f32, f32) = (0.0, 1.0);
pub const MOD_RATE_RANGE: (f32, f32) = (0.05, 30.0);
pub const TUNE_SEMITONES_RANGE: (i32, i32) = (-24, 24);
pub const TUNE_CENTS_RANGE: (i32, i32) = (-100, 100);

/// Identifies one of the six control parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Resonance,
    Drive,
    ModAmount,
    ModRate,
    TuneSemitones,
    TuneCents,
}

impl ParamId {
    pub const ALL: [ParamId; 6] = [
        ParamId::Resonance,
        ParamId::Drive,
        ParamId::ModAmount,
        ParamId::ModRate,
        ParamId::TuneSemitones,
        ParamId::TuneCents,
    ];

    /// Slot index inside the parameter store.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            ParamId::Resonance => 0,
            ParamId::Drive => 1,
            ParamId::ModAmount => 2,
            ParamId::ModRate => 3,
            ParamId::TuneSemitones => 4,
            ParamId::TuneCents => 5,
        }
    }

    /// Inclusive `(min, max)` range, as floats.
    pub fn range(self) -> (f32, f32) {
        match self {
            ParamId::Resonance => RESONANCE_RANGE,
            ParamId::Drive => DRIVE_RANGE,
            ParamId::ModAmount => MOD_AMOUNT_RANGE,
            ParamId::ModRate => MOD_RATE_RANGE,
            ParamId::TuneSemitones => (
                TUNE_SEMITONES_RANGE.0 as f32,
                TUNE_SEMITONES_RANGE.1 as f32,
            ),
            ParamId::TuneCents => (TUNE_CENTS_RANGE.0 as f32, TUNE_CENTS_RANGE.1 as f32),
        }
    }

    /// Tuning parameters only take whole numbers.
    pub fn is_integer(self) -> bool {
        matches!(self, ParamId::TuneSemitones | ParamId::TuneCents)
    }

    /// Human-readable label for meters and logs.
    pub fn name(self) -> &'static str {
        match self {
            ParamId::Resonance => "Resonance",
            ParamId::Drive => "Timbre (Drive)",
            ParamId::ModAmount => "Mod Amt",
            ParamId::ModRate => "Mod Rate",
            ParamId::TuneSemitones => "Tune (semi)",
            ParamId::TuneCents => "Tune (cents)",
        }
    }

    /// Bring an arbitrary value into this parameter's domain.
    ///
    /// NaN falls back to the lower bound. Integer parameters are rounded
    /// to the nearest whole number before clamping.
    pub fn clamp(self, value: f32) -> f32 {
        let (min, max) = self.range();
        if value.is_nan() {
            return min;
        }
        let value = if self.is_integer() { value.round() } else { value };
        value.clamp(min, max)
    }
}

/// The six control values of one voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceParameters {
    pub resonance_q: f32,
    pub timbre_drive: f32,
    pub mod_amount: f32,
    pub mod_rate_hz: f32,
    pub tune_semitones: i32,
    pub tune_cents: i32,
}

impl Default for VoiceParameters {
    fn default() -> Self {
        Self {
            resonance_q: 0.707,
            timbre_drive: 0.2,
            mod_amount: 0.0,
            mod_rate_hz: 1.0,
            tune_semitones: 0,
            tune_cents: 0,
        }
    }
}

impl VoiceParameters {
    /// Copy with every field forced into its range.
    pub fn clamped(self) -> Self {
        Self {
            resonance_q: ParamId::Resonance.clamp(self.resonance_q),
            timbre_drive: ParamId::Drive.clamp(self.timbre_drive),
            mod_amount: ParamId::ModAmount.clamp(self.mod_amount),
            mod_rate_hz: ParamId::ModRate.clamp(self.mod_rate_hz),
            tune_semitones: self
                .tune_semitones
                .clamp(TUNE_SEMITONES_RANGE.0, TUNE_SEMITONES_RANGE.1),
            tune_cents: self.tune_cents.clamp(TUNE_CENTS_RANGE.0, TUNE_CENTS_RANGE.1),
        }
    }

    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::Resonance => self.resonance_q,
            ParamId::Drive => self.timbre_drive,
            ParamId::ModAmount => self.mod_amount,
            ParamId::ModRate => self.mod_rate_hz,
            ParamId::TuneSemitones => self.tune_semitones as f32,
            ParamId::TuneCents => self.tune_cents as f32,
        }
    }

    /// Write one field, clamped.
    pub fn set(&mut self, id: ParamId, value: f32) {
        let value = id.clamp(value);
        match id {
            ParamId::Resonance => self.resonance_q = value,
            ParamId::Drive => self.timbre_drive = value,
            ParamId::ModAmount => self.mod_amount = value,
            ParamId::ModRate => self.mod_rate_hz = value,
            ParamId::TuneSemitones => self.tune_semitones = value as i32,
            ParamId::TuneCents => self.tune_cents = value as i32,
        }
    }

    /// Total pitch offset expressed in cents (`semitones * 100 + cents`).
    pub fn tune_offset_cents(&self) -> f32 {
        (self.tune_semitones * 100 + self.tune_cents) as f32
    }
}
