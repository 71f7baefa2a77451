//! Source abstractions for the vertex and relation streams.

use crate::{
    element::{ElementId, Relation},
    error::DataSourceError,
};

/// Stream of vertex ids that defines the element universe.
///
/// The ids are pulled one at a time; an implementation may block between
/// items while waiting on its backend. Every id should appear once.
///
/// # Examples
/// ```
/// use tessera_core::{DataSourceError, ElementId, VertexSource};
///
/// struct Range(i64);
///
/// impl VertexSource for Range {
///     fn name(&self) -> &str { "range" }
///     fn vertices(
///         &mut self,
///     ) -> Result<impl Iterator<Item = Result<ElementId, DataSourceError>>, DataSourceError> {
///         Ok((1..=self.0).map(|raw| Ok(ElementId::new(raw))))
///     }
/// }
///
/// let mut source = Range(3);
/// let ids: Vec<_> = source.vertices()?.collect::<Result<_, _>>()?;
/// assert_eq!(ids.len(), 3);
/// # Ok::<(), DataSourceError>(())
/// ```
pub trait VertexSource {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Opens the vertex stream.
    ///
    /// # Errors
    /// Returns [`DataSourceError`] when the stream cannot be opened. Failures
    /// while streaming are reported through the iterator items.
    fn vertices(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<ElementId, DataSourceError>>, DataSourceError>;
}

/// Stream of relations joining registered vertices.
///
/// A source id may recur across items, and related lists may contain repeats.
pub trait RelationSource {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Opens the relation stream.
    ///
    /// # Errors
    /// Returns [`DataSourceError`] when the stream cannot be opened. Failures
    /// while streaming are reported through the iterator items.
    fn relations(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<Relation, DataSourceError>>, DataSourceError>;
}

/// In-memory graph implementing both [`VertexSource`] and [`RelationSource`].
///
/// # Examples
/// ```
/// use tessera_core::{MemoryGraph, Relation, RelationSource, VertexSource};
///
/// let mut graph = MemoryGraph::from_raw("demo", 1..=3, [Relation::from_raw(1, [2])]);
/// assert_eq!(VertexSource::name(&graph), "demo");
/// assert_eq!(graph.vertices()?.count(), 3);
/// assert_eq!(graph.relations()?.count(), 1);
/// # Ok::<(), tessera_core::DataSourceError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryGraph {
    name: String,
    vertices: Vec<ElementId>,
    relations: Vec<Relation>,
}

impl MemoryGraph {
    /// Creates a graph from owned vertices and relations.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        vertices: impl IntoIterator<Item = ElementId>,
        relations: impl IntoIterator<Item = Relation>,
    ) -> Self {
        Self {
            name: name.into(),
            vertices: vertices.into_iter().collect(),
            relations: relations.into_iter().collect(),
        }
    }

    /// Creates a graph from raw vertex keys.
    #[must_use]
    pub fn from_raw(
        name: impl Into<String>,
        vertices: impl IntoIterator<Item = i64>,
        relations: impl IntoIterator<Item = Relation>,
    ) -> Self {
        Self::new(name, vertices.into_iter().map(ElementId::new), relations)
    }

    /// Returns the stored vertices.
    #[must_use]
    pub fn vertex_ids(&self) -> &[ElementId] {
        &self.vertices
    }

    /// Returns the stored relations.
    #[must_use]
    pub fn relation_items(&self) -> &[Relation] {
        &self.relations
    }
}

impl VertexSource for MemoryGraph {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertices(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<ElementId, DataSourceError>>, DataSourceError> {
        Ok(self.vertices.iter().copied().map(Ok))
    }
}

impl RelationSource for MemoryGraph {
    fn name(&self) -> &str {
        &self.name
    }

    fn relations(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<Relation, DataSourceError>>, DataSourceError> {
        Ok(self.relations.iter().cloned().map(Ok))
    }
}
