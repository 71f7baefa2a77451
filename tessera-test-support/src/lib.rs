//! Shared test utilities used across tessera crates.
//!
//! - [`tracing`] captures spans and events for instrumentation assertions.
//! - [`ci`] reads the environment overrides that tune property suites.
//! - [`graphs`] holds small reference graphs with known components.

pub mod ci;
pub mod graphs;
pub mod tracing;
