//! Lock-free parameter exchange between the control and audio contexts.
//!
//! The control side owns the single [`ParameterStore`]; the audio side owns
//! one or more [`ParameterReader`]s. They share six atomic slots guarded by a
//! sequence counter (a seqlock):
//!
//! ```text
//!   writer:  seq += 1 (odd)  ->  store 6 slots  ->  seq += 1 (even)
//!   reader:  s1 = seq  ->  load 6 slots  ->  s2 = seq  ->  accept if s1 == s2 && even
//! ```
//!
//! All six fields therefore commit as one unit: a reader either sees the
//! whole write or none of it. A reader that catches a write in flight tries
//! again a few times and otherwise keeps its previous snapshot. Neither side
//! ever blocks, locks, or allocates after construction.
//!
//! Writes coalesce. Only the latest committed values matter; a burst of
//! slider events between two render blocks costs the audio thread a single
//! read.

use std::sync::atomic::{fence, AtomicU32, Ordering};
use std::sync::Arc;

use super::{ParamId, VoiceParameters};

/// How often a reader retries a torn read before keeping its old snapshot.
const READ_ATTEMPTS: usize = 4;

struct SharedSlots {
    seq: AtomicU32,
    slots: [AtomicU32; 6],
}

impl SharedSlots {
    fn new(params: &VoiceParameters) -> Self {
        Self {
            seq: AtomicU32::new(0),
            slots: ParamId::ALL.map(|id| AtomicU32::new(params.get(id).to_bits())),
        }
    }

    fn try_read(&self) -> Option<(u32, VoiceParameters)> {
        let before = self.seq.load(Ordering::Acquire);
        if before & 1 == 1 {
            return None;
        }

        let bits = self.slots.each_ref().map(|slot| slot.load(Ordering::Relaxed));

        fence(Ordering::Acquire);
        let after = self.seq.load(Ordering::Relaxed);
        if before != after {
            return None;
        }

        Some((before, decode(bits)))
    }
}

fn decode(bits: [u32; 6]) -> VoiceParameters {
    let value = |id: ParamId| f32::from_bits(bits[id.index()]);
    VoiceParameters {
        resonance_q: value(ParamId::Resonance),
        timbre_drive: value(ParamId::Drive),
        mod_amount: value(ParamId::ModAmount),
        mod_rate_hz: value(ParamId::ModRate),
        tune_semitones: value(ParamId::TuneSemitones) as i32,
        tune_cents: value(ParamId::TuneCents) as i32,
    }
}

/// Control-side owner of the voice parameters.
///
/// There is exactly one writer per store: setters take `&mut self` and the
/// type is not `Clone`. Hand [`ParameterStore::reader`] to the audio side.
pub struct ParameterStore {
    shared: Arc<SharedSlots>,
    values: VoiceParameters,
}

impl ParameterStore {
    pub fn new(initial: VoiceParameters) -> Self {
        let values = initial.clamped();
        log::debug!("parameter store created with {:?}", values);

        Self {
            shared: Arc::new(SharedSlots::new(&values)),
            values,
        }
    }

    /// Create a reader for the render path, primed with the current values.
    pub fn reader(&self) -> ParameterReader {
        ParameterReader {
            shared: Arc::clone(&self.shared),
            last: self.values,
            last_seq: self.shared.seq.load(Ordering::Acquire),
        }
    }

    /// Store a clamped value for one parameter.
    pub fn set(&mut self, id: ParamId, value: f32) {
        self.values.set(id, value);
        self.commit();
    }

    pub fn set_resonance(&mut self, q: f32) {
        self.set(ParamId::Resonance, q);
    }

    pub fn set_drive(&mut self, drive: f32) {
        self.set(ParamId::Drive, drive);
    }

    pub fn set_mod_amount(&mut self, amount: f32) {
        self.set(ParamId::ModAmount, amount);
    }

    pub fn set_mod_rate(&mut self, rate_hz: f32) {
        self.set(ParamId::ModRate, rate_hz);
    }

    pub fn set_tune_semitones(&mut self, semitones: i32) {
        self.values.tune_semitones = semitones;
        self.values = self.values.clamped();
        self.commit();
    }

    pub fn set_tune_cents(&mut self, cents: i32) {
        self.values.tune_cents = cents;
        self.values = self.values.clamped();
        self.commit();
    }

    /// Replace every parameter in one commit.
    ///
    /// Use this when fields are logically coupled: a reader never sees
    /// part of this write without the rest.
    pub fn set_all(&mut self, params: VoiceParameters) {
        self.values = params.clamped();
        self.commit();
    }

    /// Current committed value, for display.
    pub fn get(&self, id: ParamId) -> f32 {
        self.values.get(id)
    }

    pub fn snapshot(&self) -> VoiceParameters {
        self.values
    }

    fn commit(&mut self) {
        let seq = self.shared.seq.load(Ordering::Relaxed);
        self.shared.seq.store(seq.wrapping_add(1), Ordering::Relaxed);
        fence(Ordering::Release);

        for id in ParamId::ALL {
            self.shared.slots[id.index()].store(self.values.get(id).to_bits(), Ordering::Relaxed);
        }

        self.shared.seq.store(seq.wrapping_add(2), Ordering::Release);
    }
}

/// Audio-side view of a [`ParameterStore`].
///
/// Keeps the last consistent snapshot it saw, so a read that races a write
/// degrades to "one block late" instead of a torn parameter set.
#[derive(Clone)]
pub struct ParameterReader {
    shared: Arc<SharedSlots>,
    last: VoiceParameters,
    last_seq: u32,
}

impl ParameterReader {
    /// Latest committed parameters. Wait-free, allocation-free.
    pub fn snapshot_for_render(&mut self) -> VoiceParameters {
        if !self.has_changed() {
            return self.last;
        }

        for _ in 0..READ_ATTEMPTS {
            if let Some((seq, params)) = self.shared.try_read() {
                self.last = params;
                self.last_seq = seq;
                break;
            }
            std::hint::spin_loop();
        }

        self.last
    }

    /// True when a write has been committed (or is in flight) since the
    /// last successful snapshot.
    pub fn has_changed(&self) -> bool {
        self.shared.seq.load(Ordering::Acquire) != self.last_seq
    }
}
