//! Benchmark parameter types.
//!
//! Groups benchmark parameters so Criterion ids render consistently.

use std::fmt;

use crate::source::GraphShape;

/// Parameters for one build benchmark case.
#[derive(Clone, Copy, Debug)]
pub struct BuildBenchParams {
    /// Number of vertices in the graph.
    pub vertex_count: usize,
    /// Shape of the generated relations.
    pub shape: GraphShape,
}

impl fmt::Display for BuildBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},{}", self.vertex_count, self.shape)
    }
}
