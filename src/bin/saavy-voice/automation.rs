//! Scripted parameter moves standing in for slider drags.

use saavy_voice::VoiceParameters;

/// Where every control sits `t` seconds into the demo.
///
/// The curves are deliberately continuous except tuning, which steps like a
/// detent knob; the engine's smoothing has to hide those steps.
pub fn automation_at(t: f32, total: f32) -> VoiceParameters {
    let progress = (t / total).clamp(0.0, 1.0);

    // Resonance climbs to its maximum over the first half, then falls back
    let resonance_q = 0.7 + 17.3 * triangle(progress);
    // Drive breathes slowly all the way through
    let timbre_drive = 0.5 + 0.5 * (t * 0.4).sin();
    // Modulation fades in during the second half, speeding up as it goes
    let mod_amount = ((progress - 0.5) * 2.0).clamp(0.0, 1.0);
    let mod_rate_hz = 0.5 + 7.5 * progress;
    // Octave jump for the last quarter, with a little detune
    let tune_semitones = if progress > 0.75 { 12 } else { 0 };
    let tune_cents = ((t * 0.7).sin() * 8.0).round() as i32;

    VoiceParameters {
        resonance_q,
        timbre_drive,
        mod_amount,
        mod_rate_hz,
        tune_semitones,
        tune_cents,
    }
}

fn triangle(x: f32) -> f32 {
    if x < 0.5 {
        2.0 * x
    } else {
        2.0 - 2.0 * x
    }
}
