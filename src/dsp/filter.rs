use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type              | passes          | rejects      |
| ----------------- | --------------- | ------------ |
| low-pass          | below cutoff    | above cutoff |
| high-pass         | above cutoff    | below cutoff |
| band-pass         | around cutoff   | both sides   |
| notch / band-stop | outside         | at cutoff    |

Topology-preserving (trapezoidal) state-variable filter:

    g  = tan(π · fc / fs)          cutoff warp
    k  = 1 / Q                     damping
    h  = 1 / (1 + g·(g + k))

    v3 = x - ic2
    v1 = h · (ic1 + g · v3)        band-pass
    v2 = ic2 + g · v1              low-pass
    ic1 = 2·v1 - ic1
    ic2 = 2·v2 - ic2

ic1/ic2 are the two integrator memories; they are the only state that
survives between samples. Because coefficients are recomputed every sample
from whatever cutoff and Q arrive, the filter tolerates audio-rate cutoff
modulation without zipper noise.

Stability guards:
  - cutoff is clamped to [MIN_CUTOFF_HZ, MAX_CUTOFF_RATIO · fs]; tan() blows
    up at Nyquist.
  - Q is clamped to the parameter range, so k never reaches zero.
  - integrator memories are clamped to ±STATE_LIMIT; a non-finite result
    clears them. High Q near Nyquist can ring hard, and this keeps a runaway
    from ever reaching NaN/Inf.
*/

pub const MIN_CUTOFF_HZ: f32 = 20.0;
/// Highest usable cutoff as a fraction of the sample rate (kept under 0.49).
pub const MAX_CUTOFF_RATIO: f32 = 0.489;
pub const MIN_Q: f32 = 0.1;
pub const MAX_Q: f32 = 18.0;
/// Bound on integrator memory magnitude.
pub const STATE_LIMIT: f32 = 100.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    #[default]
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

/// Clamp a requested cutoff into the range the filter can realise.
#[inline]
pub fn clamp_cutoff(cutoff_hz: f32, sample_rate: f32) -> f32 {
    let max = sample_rate * MAX_CUTOFF_RATIO;
    if cutoff_hz.is_nan() {
        return MIN_CUTOFF_HZ.min(max);
    }
    cutoff_hz.clamp(MIN_CUTOFF_HZ.min(max), max)
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    sample_rate: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, sample_rate: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            sample_rate,
            filter_type,
        }
    }

    pub fn lowpass(sample_rate: f32) -> Self {
        Self::new(FilterType::LowPass, sample_rate)
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    #[inline]
    fn compute_g(&self, cutoff_hz: f32) -> f32 {
        let cutoff = clamp_cutoff(cutoff_hz, self.sample_rate);
        (PI * cutoff / self.sample_rate).tan()
    }

    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = (2.0 * v1 - self.ic1eq).clamp(-STATE_LIMIT, STATE_LIMIT);
        self.ic2eq = (2.0 * v2 - self.ic2eq).clamp(-STATE_LIMIT, STATE_LIMIT);

        if !(self.ic1eq.is_finite() && self.ic2eq.is_finite()) {
            self.reset();
        }

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    /// Filter one sample with this sample's cutoff and Q.
    #[inline]
    pub fn process(&mut self, sample: f32, cutoff_hz: f32, q: f32) -> f32 {
        let g = self.compute_g(cutoff_hz);
        let q = if q.is_nan() { MIN_Q } else { q.clamp(MIN_Q, MAX_Q) };
        let k = 1.0 / q;

        let outputs = self.next_sample(sample, k, g);
        let out = match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::BandPass => outputs.bandpass,
            FilterType::Notch => outputs.notch,
        };

        if out.is_finite() {
            out
        } else {
            0.0
        }
    }

    /// Filter a whole buffer at a fixed cutoff and Q.
    pub fn render(&mut self, buffer: &mut [f32], cutoff_hz: f32, q: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample, cutoff_hz, q);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    /// Integrator memories `(ic1, ic2)`.
    pub fn state(&self) -> (f32, f32) {
        (self.ic1eq, self.ic2eq)
    }
}
