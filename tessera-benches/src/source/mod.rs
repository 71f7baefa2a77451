//! Synthetic benchmark graphs.
//!
//! Graphs are generated eagerly from a seeded RNG so every benchmark run
//! measures identical inputs.

mod errors;
mod graph;

pub use errors::SyntheticError;
pub use graph::{GraphShape, SyntheticGraph, SyntheticGraphConfig};
