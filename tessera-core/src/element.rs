//! Vertex identifiers and relation records consumed by the engine.

use std::fmt;

/// Identifier for a vertex in the input graph.
///
/// Identifiers are opaque to the engine; only equality, hashing, and ordering
/// are relied upon. Ordering determines the order in which components are
/// emitted.
///
/// # Examples
/// ```
/// use tessera_core::ElementId;
///
/// let id = ElementId::new(42);
/// assert_eq!(id.get(), 42);
/// assert!(ElementId::new(1) < id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(i64);

impl ElementId {
    /// Creates an identifier from its raw key.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: i64) -> Self { Self(id) }

    /// Returns the raw key.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> i64 { self.0 }
}

impl From<i64> for ElementId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One item of the relation stream: a vertex and the vertices it is joined to.
///
/// The same `source` may appear in several relations, and `related` may repeat
/// ids or name `source` itself. Both are harmless to the engine.
///
/// # Examples
/// ```
/// use tessera_core::{ElementId, Relation};
///
/// let relation = Relation::from_raw(3, [4, 7, 1]);
/// assert_eq!(relation.source(), ElementId::new(3));
/// assert_eq!(relation.related().len(), 3);
/// assert_eq!(relation.edges().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    source: ElementId,
    related: Vec<ElementId>,
}

impl Relation {
    /// Creates a relation from `source` to each id in `related`.
    #[must_use]
    pub fn new(source: ElementId, related: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            source,
            related: related.into_iter().collect(),
        }
    }

    /// Creates a relation from raw keys.
    #[must_use]
    pub fn from_raw(source: i64, related: impl IntoIterator<Item = i64>) -> Self {
        Self::new(
            ElementId::new(source),
            related.into_iter().map(ElementId::new),
        )
    }

    /// Returns the vertex the relation originates from.
    #[must_use]
    pub fn source(&self) -> ElementId {
        self.source
    }

    /// Returns the related vertices in stream order.
    #[must_use]
    pub fn related(&self) -> &[ElementId] {
        &self.related
    }

    /// Iterates the `(source, related)` edges described by this relation.
    pub fn edges(&self) -> impl Iterator<Item = (ElementId, ElementId)> + '_ {
        self.related.iter().map(|&other| (self.source, other))
    }
}
