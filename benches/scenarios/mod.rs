//! Benchmarks for the complete voice chain.

mod voice_chain;

pub use voice_chain::bench_voice_chain;
