//! This crate only exists to hold the benchmarks in `benches/`.
