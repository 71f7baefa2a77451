//! Type definitions for component property tests.

use test_strategy::Arbitrary;

use crate::{ElementId, Relation};

/// Topology used when generating a graph fixture.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum GraphShape {
    /// Few random edges, leaving many small components.
    #[weight(3)]
    Sparse,
    /// Most vertex pairs joined, usually one component.
    #[weight(1)]
    Dense,
    /// Disjoint paths visited in random order.
    #[weight(2)]
    Chains,
    /// Hubs with random leaves.
    #[weight(2)]
    Stars,
    /// No edges at all, only empty relations.
    #[weight(1)]
    Isolated,
    /// Sparse edges repeated in both directions plus self-loops.
    #[weight(2)]
    Repeated,
}

/// A generated graph in the form the pipeline consumes.
#[derive(Clone, Debug)]
pub(super) struct GraphFixture {
    /// Distinct vertex ids in registration order.
    pub ids: Vec<ElementId>,
    /// Relations over `ids`.
    pub relations: Vec<Relation>,
    /// Shape used during generation.
    pub shape: GraphShape,
}

impl GraphFixture {
    /// Number of individual edges across all relations.
    pub(super) fn edge_count(&self) -> usize {
        self.relations.iter().map(|relation| relation.related().len()).sum()
    }
}
