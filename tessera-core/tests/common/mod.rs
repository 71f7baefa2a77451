//! Sources and sinks shared by the integration tests.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use tessera_core::{
    Component, ComponentSink, DataSourceError, ElementId, MemoryGraph, Relation, RelationSource,
    SinkError, VertexSource,
};
use tessera_test_support::graphs::ReferenceGraph;

/// Converts a reference graph into an in-memory source.
#[must_use]
pub fn memory_graph(graph: &ReferenceGraph) -> MemoryGraph {
    MemoryGraph::from_raw(
        graph.name,
        graph.vertices.iter().copied(),
        graph
            .relations
            .iter()
            .map(|(source, related)| Relation::from_raw(*source, related.iter().copied())),
    )
}

/// Renders components as raw id lists.
#[must_use]
pub fn raw_components<'a>(components: impl IntoIterator<Item = &'a Component>) -> Vec<Vec<i64>> {
    components
        .into_iter()
        .map(|component| component.members().iter().map(|id| id.get()).collect())
        .collect()
}

/// Vertex source that yields `prefix` and then fails.
#[derive(Clone, Debug)]
pub struct BrokenVertices {
    pub prefix: Vec<i64>,
    pub error: DataSourceError,
}

impl VertexSource for BrokenVertices {
    fn name(&self) -> &str {
        "broken-vertices"
    }

    fn vertices(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<ElementId, DataSourceError>>, DataSourceError> {
        let prefix = self.prefix.iter().copied().map(|raw| Ok(ElementId::new(raw)));
        Ok(prefix.chain(std::iter::once(Err(self.error.clone()))))
    }
}

/// Relation source that cannot be opened and counts attempts to open it.
#[derive(Clone, Debug, Default)]
pub struct UnopenableRelations {
    pub attempts: usize,
}

impl RelationSource for UnopenableRelations {
    fn name(&self) -> &str {
        "unopenable"
    }

    fn relations(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<Relation, DataSourceError>>, DataSourceError> {
        self.attempts += 1;
        Err::<std::iter::Empty<Result<Relation, DataSourceError>>, _>(DataSourceError::Unavailable {
            reason: Arc::from("connection refused"),
        })
    }
}

/// Sink that rejects the component at `fail_at` and records earlier writes.
#[derive(Clone, Debug, Default)]
pub struct RejectingSink {
    pub fail_at: usize,
    pub written: Vec<Vec<i64>>,
    pub finished: bool,
}

impl ComponentSink for RejectingSink {
    fn name(&self) -> &str {
        "rejecting"
    }

    fn write_component(&mut self, component: &Component) -> Result<(), SinkError> {
        if self.written.len() == self.fail_at {
            return Err(SinkError::Rejected {
                component: self.fail_at,
                reason: Arc::from("quota exceeded"),
            });
        }
        self.written
            .push(component.members().iter().map(|id| id.get()).collect());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}
