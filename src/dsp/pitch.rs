//! Pitch arithmetic.
//!
//! Equal temperament: every semitone multiplies frequency by 2^(1/12),
//! every cent by 2^(1/1200).
//!
//! ```text
//!   f = base * 2^((semitones + cents / 100) / 12)
//! ```
//!
//! Both offsets may be fractional, since the voice feeds this with smoothed
//! values that glide between whole steps.

/// Frequency of `base_hz` shifted by a (possibly fractional) offset.
#[inline]
pub fn pitch_to_frequency(base_hz: f32, semitones: f32, cents: f32) -> f32 {
    base_hz * ((semitones + cents / 100.0) / 12.0).exp2()
}

/// Same as [`pitch_to_frequency`] with the offset already combined into cents.
#[inline]
pub fn offset_cents_to_frequency(base_hz: f32, offset_cents: f32) -> f32 {
    base_hz * (offset_cents / 1200.0).exp2()
}

/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * ((note as f32 - 69.0) / 12.0).exp2()
}
