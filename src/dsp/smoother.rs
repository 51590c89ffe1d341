//! Parameter smoothing.
//!
//! A control value that jumps between two samples is heard as a click. The
//! smoother turns every step in a target into an exponential approach:
//!
//! ```text
//!   y[n] = y[n-1] + a * (target - y[n-1])
//!   a    = 1 - e^(-1 / (tau * sample_rate))
//! ```
//!
//! After `tau` seconds the value has covered ~63% of the distance, after
//! `5 * tau` more than 99%. With tau around 10 ms, a full-range step in
//! resonance or drive is spread over a few hundred samples, which is well
//! below what the ear resolves as a discontinuity.
//!
//! The first value is never ramped in: a new smoother starts *at* its
//! target, so a freshly started voice sounds immediately at its settings.

use crate::params::VoiceParameters;

/// Values closer than this to the target snap onto it.
const SETTLE_EPSILON: f32 = 1e-6;

/// One-pole exponential smoother for a single scalar.
#[derive(Debug, Clone, Copy)]
pub struct Smoother {
    current: f32,
    target: f32,
    coefficient: f32,
}

impl Smoother {
    /// Start at `initial` with no ramp pending.
    ///
    /// A `time_ms` of zero disables smoothing (every `next` lands on the
    /// target).
    pub fn new(initial: f32, time_ms: f32, sample_rate: f32) -> Self {
        let time_samples = time_ms.max(0.0) * 0.001 * sample_rate;
        let coefficient = if time_samples > 0.0 {
            1.0 - (-1.0 / time_samples).exp()
        } else {
            1.0
        };

        Self {
            current: initial,
            target: initial,
            coefficient,
        }
    }

    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Advance one sample and return the new value.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let delta = self.target - self.current;
        let next = self.current + self.coefficient * delta;
        // A step that rounds away in f32 would leave large values stuck short
        if delta.abs() <= SETTLE_EPSILON || next == self.current {
            self.current = self.target;
        } else {
            self.current = next;
        }
        self.current
    }

    /// Jump straight to `value` (used at voice start and on reset).
    #[inline]
    pub fn snap(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

/// One sample's worth of smoothed control values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedFrame {
    pub resonance_q: f32,
    pub timbre_drive: f32,
    pub mod_amount: f32,
    pub mod_rate_hz: f32,
    /// Semitone and cent offsets combined, in cents.
    pub tune_cents: f32,
}

/// Smoothing state shadowing every [`VoiceParameters`] field.
///
/// The two integer tuning fields are folded into one continuous offset in
/// cents, so a semitone change glides instead of stepping.
#[derive(Debug, Clone, Copy)]
pub struct SmoothedParameters {
    resonance_q: Smoother,
    timbre_drive: Smoother,
    mod_amount: Smoother,
    mod_rate_hz: Smoother,
    tune_cents: Smoother,
}

impl SmoothedParameters {
    pub fn new(params: &VoiceParameters, time_ms: f32, sample_rate: f32) -> Self {
        let smoother = |value: f32| Smoother::new(value, time_ms, sample_rate);

        Self {
            resonance_q: smoother(params.resonance_q),
            timbre_drive: smoother(params.timbre_drive),
            mod_amount: smoother(params.mod_amount),
            mod_rate_hz: smoother(params.mod_rate_hz),
            tune_cents: smoother(params.tune_offset_cents()),
        }
    }

    pub fn set_targets(&mut self, params: &VoiceParameters) {
        self.resonance_q.set_target(params.resonance_q);
        self.timbre_drive.set_target(params.timbre_drive);
        self.mod_amount.set_target(params.mod_amount);
        self.mod_rate_hz.set_target(params.mod_rate_hz);
        self.tune_cents.set_target(params.tune_offset_cents());
    }

    pub fn snap(&mut self, params: &VoiceParameters) {
        self.resonance_q.snap(params.resonance_q);
        self.timbre_drive.snap(params.timbre_drive);
        self.mod_amount.snap(params.mod_amount);
        self.mod_rate_hz.snap(params.mod_rate_hz);
        self.tune_cents.snap(params.tune_offset_cents());
    }

    #[inline]
    pub fn next(&mut self) -> SmoothedFrame {
        SmoothedFrame {
            resonance_q: self.resonance_q.next(),
            timbre_drive: self.timbre_drive.next(),
            mod_amount: self.mod_amount.next(),
            mod_rate_hz: self.mod_rate_hz.next(),
            tune_cents: self.tune_cents.next(),
        }
    }

    /// Current values without advancing.
    pub fn current(&self) -> SmoothedFrame {
        SmoothedFrame {
            resonance_q: self.resonance_q.current(),
            timbre_drive: self.timbre_drive.current(),
            mod_amount: self.mod_amount.current(),
            mod_rate_hz: self.mod_rate_hz.current(),
            tune_cents: self.tune_cents.current(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.resonance_q.is_settled()
            && self.timbre_drive.is_settled()
            && self.mod_amount.is_settled()
            && self.mod_rate_hz.is_settled()
            && self.tune_cents.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_target() {
        let mut smoother = Smoother::new(0.7, 10.0, 48_000.0);
        assert!(smoother.is_settled());
        assert_eq!(smoother.next(), 0.7);
    }

    #[test]
    fn test_converges_to_target() {
        let mut smoother = Smoother::new(0.0, 10.0, 48_000.0);
        smoother.set_target(1.0);

        // 100 ms = 10 time constants
        let mut value = 0.0;
        for _ in 0..4_800 {
            value = smoother.next();
        }
        assert!((value - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_one_time_constant_covers_63_percent() {
        let mut smoother = Smoother::new(0.0, 10.0, 48_000.0);
        smoother.set_target(1.0);

        let mut value = 0.0;
        for _ in 0..480 {
            value = smoother.next();
        }
        assert!((value - 0.632).abs() < 0.01, "got {}", value);
    }

    #[test]
    fn test_never_overshoots() {
        let mut smoother = Smoother::new(18.0, 5.0, 44_100.0);
        smoother.set_target(1.0);

        let mut previous = 18.0;
        for _ in 0..10_000 {
            let value = smoother.next();
            assert!(value >= 1.0 && value <= previous);
            previous = value;
        }
    }

    #[test]
    fn test_step_is_spread_out() {
        let mut smoother = Smoother::new(1.0, 10.0, 48_000.0);
        smoother.set_target(18.0);

        let first = smoother.next();
        assert!(first - 1.0 < 0.05, "first step too large: {}", first - 1.0);
    }

    #[test]
    fn test_zero_time_jumps() {
        let mut smoother = Smoother::new(0.0, 0.0, 48_000.0);
        smoother.set_target(0.5);
        assert_eq!(smoother.next(), 0.5);
    }

    #[test]
    fn test_settles_exactly() {
        let mut smoother = Smoother::new(0.0, 1.0, 48_000.0);
        smoother.set_target(1.0);
        for _ in 0..48_000 {
            smoother.next();
        }
        assert!(smoother.is_settled());
        assert_eq!(smoother.current(), 1.0);
    }

    #[test]
    fn test_large_targets_settle_exactly() {
        // Two octaves and a semitone in cents, with the slowest allowed ramp
        let mut smoother = Smoother::new(0.0, 500.0, 48_000.0);
        smoother.set_target(2_500.0);
        assert_eq!(smoother.target(), 2_500.0);

        for _ in 0..(48_000 * 20) {
            smoother.next();
        }
        assert!(smoother.is_settled(), "stuck at {}", smoother.current());
        assert_eq!(smoother.current(), 2_500.0);
    }

    #[test]
    fn test_parameters_fold_tuning_into_cents() {
        let params = VoiceParameters {
            tune_semitones: 12,
            tune_cents: -50,
            ..Default::default()
        };
        let smoothed = SmoothedParameters::new(&params, 10.0, 48_000.0);
        assert_eq!(smoothed.current().tune_cents, 1150.0);
    }

    #[test]
    fn test_parameters_ramp_tuning_continuously() {
        let mut smoothed = SmoothedParameters::new(&VoiceParameters::default(), 10.0, 48_000.0);
        smoothed.set_targets(&VoiceParameters {
            tune_semitones: 1,
            ..Default::default()
        });

        let frame = smoothed.next();
        assert!(frame.tune_cents > 0.0 && frame.tune_cents < 100.0);
        assert!(!smoothed.is_settled());
    }

    #[test]
    fn test_snap_clears_pending_ramps() {
        let mut smoothed = SmoothedParameters::new(&VoiceParameters::default(), 10.0, 48_000.0);
        let target = VoiceParameters {
            resonance_q: 9.0,
            ..Default::default()
        };
        smoothed.set_targets(&target);
        smoothed.next();
        smoothed.snap(&target);

        assert!(smoothed.is_settled());
        assert_eq!(smoothed.current().resonance_q, 9.0);
    }
}
