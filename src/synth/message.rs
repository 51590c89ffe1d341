#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Events from the note/pitch source, consumed at the start of a block.
///
/// Unlike parameter writes these are queued, not coalesced: every message
/// pushed before a block is applied, in order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VoiceMessage {
    /// New base frequency (Hz) for the pitch converter.
    BaseFrequency { hz: f32 },
    /// Clear filter memory and phases, as on a voice-steal reattack.
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<VoiceMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<VoiceMessage> {
    fn pop(&mut self) -> Option<VoiceMessage> {
        Consumer::pop(self).ok()
    }
}

/// A receiver that never has anything to deliver.
impl MessageReceiver for () {
    fn pop(&mut self) -> Option<VoiceMessage> {
        None
    }
}
