//! Benchmarks for individual DSP blocks.

mod drive;
mod filter;
mod lfo;
mod oscillator;
mod smoother;

pub use drive::bench_drive;
pub use filter::bench_filter;
pub use lfo::bench_lfo;
pub use oscillator::bench_oscillator;
pub use smoother::bench_smoother;
