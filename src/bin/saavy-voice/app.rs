//! VoiceDemo - audio host builder and runner

use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use saavy_voice::{
    dsp::pitch::midi_note_to_freq, ParamId, ParameterStore, VoiceConfig, VoiceEngine,
    VoiceMessage, VoiceParameters, MAX_BLOCK_SIZE,
};

use super::automation::automation_at;

/// How often the control thread pushes new values.
const CONTROL_INTERVAL: Duration = Duration::from_millis(15);
/// Headroom applied after the voice so a full-scale voice does not clip the DAC.
const OUTPUT_GAIN: f32 = 0.5;

/// Main application builder
pub struct VoiceDemo {
    notes: Vec<u8>,
    seconds_per_note: f32,
    config: VoiceConfig,
}

impl VoiceDemo {
    pub fn new() -> Self {
        Self {
            notes: vec![57],
            seconds_per_note: 2.0,
            config: VoiceConfig::default(),
        }
    }

    /// MIDI notes to step through, one after another.
    pub fn notes(mut self, notes: &[u8]) -> Self {
        if !notes.is_empty() {
            self.notes = notes.to_vec();
        }
        self
    }

    /// Voice settings; the sample rate is taken from the output device.
    pub fn config(mut self, config: VoiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seconds_per_note(mut self, seconds: f32) -> Self {
        self.seconds_per_note = seconds.max(0.1);
        self
    }

    /// Run the demo to completion (blocks, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let total_seconds = self.seconds_per_note * self.notes.len() as f32;

        log::info!("sample rate: {} Hz, channels: {}", sample_rate, channels);
        log::info!("playing {} notes over {:.1} s", self.notes.len(), total_seconds);

        // Control side keeps the store; the audio side gets a reader
        let mut store = ParameterStore::new(automation_at(0.0, total_seconds));
        let voice_config = VoiceConfig {
            sample_rate,
            ..self.config
        };
        let mut engine = VoiceEngine::new(voice_config, store.reader())
            .wrap_err("invalid voice configuration")?;

        let (mut tx, mut rx) = RingBuffer::<VoiceMessage>::new(64);
        engine.set_base_frequency(midi_note_to_freq(self.notes[0]));

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];

                    engine.render_block_with(block, &mut rx);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s * OUTPUT_GAIN;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| log::error!("audio stream error: {}", err),
            None,
        )?;

        stream.play().wrap_err("failed to start output stream")?;

        let started = Instant::now();
        let mut current_note = 0usize;

        loop {
            let t = started.elapsed().as_secs_f32();
            if t >= total_seconds {
                break;
            }

            let note_index = ((t / self.seconds_per_note) as usize).min(self.notes.len() - 1);
            if note_index != current_note {
                current_note = note_index;
                let note = self.notes[note_index];
                if tx
                    .push(VoiceMessage::BaseFrequency {
                        hz: midi_note_to_freq(note),
                    })
                    .is_err()
                {
                    log::warn!("pitch queue full, dropped note {}", note);
                }
                log_state(note, &store.snapshot());
            }

            drag_sliders(&mut store, automation_at(t, total_seconds));
            std::thread::sleep(CONTROL_INTERVAL);
        }

        log::info!("done");
        Ok(())
    }
}

impl Default for VoiceDemo {
    fn default() -> Self {
        Self::new()
    }
}

/// Write each control separately, the way independent slider events arrive.
fn drag_sliders(store: &mut ParameterStore, target: VoiceParameters) {
    for id in ParamId::ALL {
        let value = target.get(id);
        if store.get(id) != id.clamp(value) {
            store.set(id, value);
        }
    }
}

fn log_state(note: u8, params: &VoiceParameters) {
    log::info!(
        "note {:>3} | Q {:>5.2} | drive {:.2} | mod {:.2} @ {:>5.2} Hz | tune {:+} st {:+} ct",
        note,
        params.resonance_q,
        params.timbre_drive,
        params.mod_amount,
        params.mod_rate_hz,
        params.tune_semitones,
        params.tune_cents
    );
}
