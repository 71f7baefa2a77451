//! Error types for synthetic graph generation.

/// Errors that may occur while generating a synthetic graph.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested vertex count was zero.
    #[error("vertex count must be greater than zero")]
    ZeroVertices,
    /// A shape parameter that must be positive was zero.
    #[error("{parameter} must be greater than zero")]
    ZeroParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
    },
    /// The requested vertex count does not fit the id space.
    #[error("vertex count {vertex_count} does not fit in an i64 id")]
    Overflow {
        /// Vertex count requested.
        vertex_count: usize,
    },
}
