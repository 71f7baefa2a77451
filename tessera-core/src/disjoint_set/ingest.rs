//! Relation ingestion.

use super::DisjointSet;
use crate::{Result, element::Relation, error::TesseraError};

/// Counters accumulated by [`DisjointSet::ingest_all`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Relation items consumed from the stream.
    pub relations: usize,
    /// Individual `(source, related)` edges applied.
    pub edges: usize,
    /// Edges that joined two previously separate components.
    pub merges: usize,
}

impl DisjointSet {
    /// Applies one relation, unioning its source with each related id in order.
    ///
    /// A relation with no related ids still requires its source to be
    /// registered.
    ///
    /// # Errors
    /// Returns [`TesseraError::UnknownElement`] when the source or any related
    /// id is not registered. Edges listed before the unknown id have already
    /// been applied.
    pub fn ingest(&mut self, relation: &Relation) -> Result<IngestStats> {
        let source = relation.source();
        if !self.contains(source) {
            return Err(TesseraError::UnknownElement { id: source });
        }

        let mut stats = IngestStats {
            relations: 1,
            ..IngestStats::default()
        };
        for (left, right) in relation.edges() {
            stats.edges += 1;
            if self.union(left, right)?.merged() {
                stats.merges += 1;
            }
        }
        Ok(stats)
    }

    /// Applies every relation yielded by `relations`, in stream order.
    ///
    /// A source id may recur across items and edges may repeat; repeated
    /// edges and self-loops leave the forest unchanged.
    /// Stream errors are wrapped as for [`Self::register_all`].
    ///
    /// # Errors
    /// Returns the first error yielded by `relations`, or the first error
    /// raised by [`Self::ingest`].
    pub fn ingest_all<I, E>(&mut self, relations: I) -> Result<IngestStats>
    where
        I: IntoIterator<Item = core::result::Result<Relation, E>>,
        TesseraError: From<E>,
    {
        let mut totals = IngestStats::default();
        for item in relations {
            let applied = self.ingest(&item?)?;
            totals.relations += applied.relations;
            totals.edges += applied.edges;
            totals.merges += applied.merges;
        }
        Ok(totals)
    }
}
