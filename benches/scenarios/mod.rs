//! Complete-voice benchmarks.
//!
//! These exercise the whole render path the way a host callback drives it,
//! including the per-block parameter snapshot.

mod voice;

pub use voice::bench_voice;
