//! Benchmark support crate for tessera.
//!
//! Provides seeded synthetic graphs and parameter types used by the
//! Criterion benchmarks for full builds and for the raw union-find
//! operations.

pub mod error;
pub mod params;
pub mod source;
