// Purpose: the voice itself and the plumbing that feeds it
// This layer sits above the dsp primitives and wires them into one signal path

pub mod config;
pub mod message;
pub mod voice;

pub use config::{ModRouting, VoiceConfig};
pub use message::{MessageReceiver, VoiceMessage};
pub use voice::VoiceEngine;
