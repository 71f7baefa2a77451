//! Parquet sources and sinks for tessera graphs.
//!
//! Vertices are read from an `Int64` column, relations from an `Int64`
//! source column paired with a `List<Int64>` column of related ids, and
//! components are written as a single `List<Int64>` column. Record batches
//! are decoded one at a time as the build pulls items.

mod errors;
mod ingest;
mod sink;
mod source;

pub use errors::ParquetProviderError;
pub use sink::{DEFAULT_COMPONENT_COLUMN, ParquetComponentSink};
pub use source::{
    DEFAULT_ID_COLUMN, DEFAULT_RELATED_COLUMN, DEFAULT_SOURCE_COLUMN, ParquetRelationSource,
    ParquetVertexSource,
};

#[cfg(test)]
mod tests;
