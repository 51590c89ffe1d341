//! Low Frequency Oscillator (LFO).

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running at sub-audio rates. It does not make sound;
it moves another parameter over time. In this voice the LFO output, scaled
by "Mod Amt", sweeps the filter cutoff (wobble / auto-wah) and, depending on
routing, the drive amount.

Vocabulary
----------

  control-rate    Frequencies below hearing: ~0.01 Hz to ~20 Hz.
                  "Mod Rate" goes up to 30 Hz, where wobble starts to turn
                  into audible sidebands.

  bipolar         Output swings -1.0 to +1.0. The filter sweep is bipolar
                  so cutoff moves both above and below its keytracked value.

Phase
-----

The phase accumulator lives in [0, 1). Each sample it advances by
rate / sample_rate and wraps, so it never grows and never loses precision,
no matter how long the voice runs:

    phase:  0.0 ──► 0.25 ──► 0.5 ──► 0.75 ──► 1.0 ≡ 0.0

Because rate is read per sample from the smoother, a rate change bends the
speed of the sweep without jumping its position.

Shapes
------

SINE       sin(2π·phase). Smooth, the most common choice.
TRIANGLE   Linear up/down, constant rate of change. Starts at 0 like sine.

Both are bounded in [-1, 1] and continuous, so neither can introduce a step
into the parameter it modulates.
*/

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LfoShape {
    #[default]
    Sine,
    Triangle,
}

/// Phase-accumulating LFO producing values in [-1, 1].
#[derive(Debug, Clone, Copy)]
pub struct Lfo {
    shape: LfoShape,
    phase: f32,
}

impl Lfo {
    pub fn new(shape: LfoShape) -> Self {
        Self { shape, phase: 0.0 }
    }

    pub fn sine() -> Self {
        Self::new(LfoShape::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(LfoShape::Triangle)
    }

    /// Emit the value at the current phase, then advance by
    /// `rate_hz / sample_rate`.
    #[inline]
    pub fn next(&mut self, rate_hz: f32, sample_rate: f32) -> f32 {
        let value = shape_at(self.shape, self.phase);

        let mut phase = (self.phase + rate_hz / sample_rate).rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for tiny negative inputs
        if phase >= 1.0 || !phase.is_finite() {
            phase = 0.0;
        }
        self.phase = phase;

        value
    }

    /// Restart the sequence from phase zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn shape(&self) -> LfoShape {
        self.shape
    }

    /// The LFO as a lazy, infinite sequence at a fixed rate.
    pub fn iter(&mut self, rate_hz: f32, sample_rate: f32) -> LfoIter<'_> {
        LfoIter {
            lfo: self,
            rate_hz,
            sample_rate,
        }
    }
}

#[inline]
fn shape_at(shape: LfoShape, phase: f32) -> f32 {
    match shape {
        LfoShape::Sine => (TAU * phase).sin(),
        LfoShape::Triangle => {
            if phase < 0.25 {
                4.0 * phase
            } else if phase < 0.75 {
                2.0 - 4.0 * phase
            } else {
                4.0 * phase - 4.0
            }
        }
    }
}

/// Iterator adapter returned by [`Lfo::iter`]. Never ends.
pub struct LfoIter<'a> {
    lfo: &'a mut Lfo,
    rate_hz: f32,
    sample_rate: f32,
}

impl Iterator for LfoIter<'_> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        Some(self.lfo.next(self.rate_hz, self.sample_rate))
    }
}

/// Calculate samples per LFO period.
///
/// # Example
/// ```
/// use saavy_voice::dsp::lfo::samples_per_period;
/// let samples = samples_per_period(5.0, 48000.0);
/// assert_eq!(samples, 9600.0); // 5 Hz at 48kHz = 9600 samples
/// ```
#[inline]
pub fn samples_per_period(frequency_hz: f32, sample_rate: f32) -> f32 {
    sample_rate / frequency_hz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_output_range() {
        let mut lfo = Lfo::sine();
        for sample in lfo.iter(5.0, 48_000.0).take(48_000) {
            assert!((-1.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn test_triangle_output_range() {
        let mut lfo = Lfo::triangle();
        for sample in lfo.iter(30.0, 48_000.0).take(48_000) {
            assert!((-1.0..=1.0).contains(&sample), "{}", sample);
        }
    }

    #[test]
    fn test_triangle_peaks() {
        let mut lfo = Lfo::triangle();
        // 1 Hz at 4 samples per second lands exactly on 0, 0.25, 0.5, 0.75
        let values: Vec<f32> = lfo.iter(1.0, 4.0).take(4).collect();
        assert_eq!(values, vec![0.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_phase_stays_wrapped() {
        let mut lfo = Lfo::sine();
        for _ in 0..1_000_000 {
            lfo.next(29.9, 44_100.0);
            assert!(lfo.phase() >= 0.0 && lfo.phase() < 1.0);
        }
    }

    #[test]
    fn test_completes_one_cycle_per_period() {
        let mut lfo = Lfo::sine();
        let period = samples_per_period(2.0, 48_000.0) as usize;
        lfo.iter(2.0, 48_000.0).take(period).for_each(|_| ());
        assert!(lfo.phase() < 5e-3 || lfo.phase() > 1.0 - 5e-3);
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let mut lfo = Lfo::sine();
        let first: Vec<f32> = lfo.iter(3.0, 48_000.0).take(64).collect();
        lfo.iter(3.0, 48_000.0).take(1234).for_each(|_| ());
        lfo.reset();
        let again: Vec<f32> = lfo.iter(3.0, 48_000.0).take(64).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_negative_rate_wraps_backwards() {
        let mut lfo = Lfo::sine();
        lfo.next(-1.0, 100.0);
        assert!((lfo.phase() - 0.99).abs() < 1e-6);
    }
}
