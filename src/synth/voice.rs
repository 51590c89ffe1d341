use crate::{
    dsp::{
        filter::clamp_cutoff,
        pitch::offset_cents_to_frequency,
        DriveStage, Lfo, OscillatorBlock, SVFilter, SmoothedFrame, SmoothedParameters,
    },
    error::Result,
    params::ParameterReader,
    synth::{
        config::VoiceConfig,
        message::{MessageReceiver, VoiceMessage},
    },
};

/*
Per-sample signal path
======================

    ParameterReader ──(once per block)──► SmoothedParameters
                                              │ (every sample)
             ┌────────────────────────────────┼───────────────────┐
             ▼                                ▼                   ▼
      base · 2^(tune/1200)              LFO(rate) · amount       Q, drive
             │                                │
             ├──► source oscillator           │
             │         │                      │
             └──► cutoff = f · ratio · 2^(mod · depth)
                       │
                       ▼
               SVFilter(source, cutoff, Q) ──► DriveStage(drive) ──► out

Time only moves inside `render_block`: each frame advances the smoothers,
the LFO phase, the source phase and the filter memory exactly once.
*/

pub const DEFAULT_BASE_FREQUENCY: f32 = 220.0;
pub const MIN_BASE_FREQUENCY: f32 = 1.0;
pub const MAX_BASE_FREQUENCY: f32 = 20_000.0;

/// A single synthesis voice.
///
/// Owns its smoothed shadow of the control parameters and every piece of
/// signal state. The only thing it shares with the control context is the
/// [`ParameterReader`].
pub struct VoiceEngine {
    config: VoiceConfig,
    sample_rate: f32,
    params: ParameterReader,
    smoothed: SmoothedParameters,
    base_frequency: f32,
    source: OscillatorBlock,
    lfo: Lfo,
    filter: SVFilter,
    drive: DriveStage,
    cutoff_hz: f32,
}

impl VoiceEngine {
    /// Build a voice at a fixed sample rate.
    ///
    /// Smoothers start at the reader's current values, so the first block
    /// already sounds at the configured settings.
    pub fn new(config: VoiceConfig, mut params: ParameterReader) -> Result<Self> {
        if let Err(err) = config.validate() {
            log::warn!("rejected voice config: {}", err);
            return Err(err);
        }

        let sample_rate = config.sample_rate;
        let initial = params.snapshot_for_render();

        let mut engine = Self {
            config,
            sample_rate,
            params,
            smoothed: SmoothedParameters::new(&initial, config.smoothing_ms, sample_rate),
            base_frequency: DEFAULT_BASE_FREQUENCY,
            source: OscillatorBlock::new(config.waveform),
            lfo: Lfo::new(config.lfo_shape),
            filter: SVFilter::new(config.filter_type, sample_rate),
            drive: DriveStage::new(config.drive_curve, config.drive_range),
            cutoff_hz: 0.0,
        };
        engine.cutoff_hz = engine.resting_cutoff();

        log::debug!(
            "voice engine ready: {} Hz, {} ms smoothing, routing {:?}",
            sample_rate,
            config.smoothing_ms,
            config.mod_routing
        );

        Ok(engine)
    }

    /// Render one block; the frame count is `out.len()`.
    ///
    /// Parameter writes committed before this call are picked up here and
    /// become ramp targets; nothing observed mid-block.
    pub fn render_block(&mut self, out: &mut [f32]) {
        let params = self.params.snapshot_for_render();
        self.smoothed.set_targets(&params);

        for sample in out.iter_mut() {
            *sample = self.tick();
        }
    }

    /// Drain pending pitch messages, then render.
    pub fn render_block_with<R: MessageReceiver>(&mut self, out: &mut [f32], rx: &mut R) {
        while let Some(msg) = rx.pop() {
            match msg {
                VoiceMessage::BaseFrequency { hz } => self.set_base_frequency(hz),
                VoiceMessage::Reset => self.reset(),
            }
        }

        self.render_block(out);
    }

    #[inline]
    fn tick(&mut self) -> f32 {
        let frame = self.smoothed.next();
        let frequency = offset_cents_to_frequency(self.base_frequency, frame.tune_cents);
        let modulation = self.lfo.next(frame.mod_rate_hz, self.sample_rate) * frame.mod_amount;

        let routing = self.config.mod_routing;
        let mut cutoff = frequency * self.config.cutoff_ratio;
        if routing.targets_cutoff() {
            cutoff *= (modulation * self.config.mod_depth_octaves).exp2();
        }
        self.cutoff_hz = clamp_cutoff(cutoff, self.sample_rate);

        let drive = if routing.targets_drive() {
            (frame.timbre_drive + modulation * self.config.drive_mod_depth).clamp(0.0, 1.0)
        } else {
            frame.timbre_drive
        };

        let source = self.source.next_sample(frequency, self.sample_rate);
        let filtered = self.filter.process(source, self.cutoff_hz, frame.resonance_q);
        self.drive.process(filtered, drive)
    }

    /// Clear filter memory and phases and land every smoother on its
    /// current target, leaving the voice as if freshly constructed.
    pub fn reset(&mut self) {
        let params = self.params.snapshot_for_render();
        self.smoothed.snap(&params);
        self.filter.reset();
        self.lfo.reset();
        self.source.reset();
        self.cutoff_hz = self.resting_cutoff();
    }

    /// Set the pitch the tuning offsets apply to.
    ///
    /// Clamped to [`MIN_BASE_FREQUENCY`, `MAX_BASE_FREQUENCY`]; non-finite
    /// values are ignored.
    pub fn set_base_frequency(&mut self, hz: f32) {
        if hz.is_finite() {
            self.base_frequency = hz.clamp(MIN_BASE_FREQUENCY, MAX_BASE_FREQUENCY);
        }
    }

    fn resting_cutoff(&self) -> f32 {
        clamp_cutoff(self.current_frequency() * self.config.cutoff_ratio, self.sample_rate)
    }

    pub fn base_frequency(&self) -> f32 {
        self.base_frequency
    }

    /// Oscillator frequency at the current smoothed tuning.
    pub fn current_frequency(&self) -> f32 {
        offset_cents_to_frequency(self.base_frequency, self.smoothed.current().tune_cents)
    }

    /// Cutoff used for the most recent frame.
    pub fn current_cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn smoothed(&self) -> SmoothedFrame {
        self.smoothed.current()
    }

    /// True once every smoothed control has landed on its target.
    pub fn is_settled(&self) -> bool {
        self.smoothed.is_settled()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn config(&self) -> &VoiceConfig {
        &self.config
    }
}
