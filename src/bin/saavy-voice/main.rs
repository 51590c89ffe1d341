//! saavy-voice - play one voice through the default output device
//!
//! A scripted control thread stands in for the panel: it drags every
//! parameter and changes notes while the audio callback renders.
//!
//! Run with: cargo run --bin saavy-voice
//! Set RUST_LOG=debug to see engine construction details.

mod app;
mod automation;

use app::VoiceDemo;
use saavy_voice::{ModRouting, VoiceConfig};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A minor arpeggio, two seconds per note
    VoiceDemo::new()
        .notes(&[45, 48, 52, 57, 52, 48, 45, 40])
        .seconds_per_note(2.0)
        .config(VoiceConfig::default().with_mod_routing(ModRouting::Both))
        .run()
}
