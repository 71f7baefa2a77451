//! Disjoint-set forest over registered vertex ids.
//!
//! Records live in a slot table in registration order, with a hash index from
//! [`ElementId`] to slot. Parent links are slot indices, so the forest needs no
//! shared ownership and extraction can recover registration order for free.
//!
//! The forest is populated by [`DisjointSet::register_all`], merged by
//! [`DisjointSet::union`] (directly or through [`DisjointSet::ingest_all`]),
//! and finally grouped by [`DisjointSet::components`].

mod extract;
mod ingest;
mod registry;
mod union_find;


use std::collections::HashMap;

use crate::{Result, element::ElementId, error::TesseraError};

pub use ingest::IngestStats;
pub use registry::{Registration, RegistrationStats};

#[derive(Clone, Debug)]
struct Slot {
    id: ElementId,
    parent: usize,
    // Only meaningful while `parent` points at the slot itself.
    size: usize,
}

/// Union-find structure keyed by [`ElementId`].
///
/// # Examples
/// ```
/// use tessera_core::{DisjointSet, DuplicatePolicy, ElementId, UnionOutcome};
///
/// let mut set = DisjointSet::new();
/// for raw in [10, 20, 30] {
///     set.register(ElementId::new(raw), DuplicatePolicy::Reject)?;
/// }
/// let outcome = set.union(ElementId::new(10), ElementId::new(20))?;
/// assert_eq!(outcome.root(), ElementId::new(10));
/// assert!(set.connected(ElementId::new(20), ElementId::new(10))?);
/// assert_eq!(set.component_count(), 2);
/// # Ok::<(), tessera_core::TesseraError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DisjointSet {
    slots: Vec<Slot>,
    index: HashMap<ElementId, usize>,
    roots: usize,
}

/// Snapshot of one element's disjoint-set record.
///
/// `size` is reported only for roots; a non-root record carries no usable size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisjointSetRecord {
    id: ElementId,
    parent: ElementId,
    size: Option<usize>,
}

impl DisjointSetRecord {
    /// Returns the element this record describes.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the element this record currently points to.
    #[must_use]
    pub fn parent(&self) -> ElementId {
        self.parent
    }

    /// Returns whether the record is the root of its component.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.id == self.parent
    }

    /// Returns the component size when the record is a root.
    #[must_use]
    pub fn size(&self) -> Option<usize> {
        self.size
    }
}

/// Result of a [`DisjointSet::union`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnionOutcome {
    /// Two components were merged.
    Merged {
        /// Root that survived the merge.
        root: ElementId,
        /// Root that was attached beneath `root`.
        absorbed: ElementId,
    },
    /// Both elements already shared a root.
    AlreadyJoined {
        /// The shared root.
        root: ElementId,
    },
}

impl UnionOutcome {
    /// Returns the root of the component holding both elements.
    #[must_use]
    pub fn root(&self) -> ElementId {
        match *self {
            Self::Merged { root, .. } | Self::AlreadyJoined { root } => root,
        }
    }

    /// Returns whether two components were merged.
    #[must_use]
    pub fn merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

impl DisjointSet {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty forest with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            roots: 0,
        }
    }

    /// Returns the number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns whether no element has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns whether `id` has been registered.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns the number of components currently in the forest.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.roots
    }

    /// Returns a snapshot of the record stored for `id`.
    ///
    /// # Errors
    /// Returns [`TesseraError::UnknownElement`] when `id` is not registered.
    pub fn record(&self, id: ElementId) -> Result<DisjointSetRecord> {
        let slot = self.slot_of(id)?;
        Ok(self.snapshot(slot))
    }

    fn slot_of(&self, id: ElementId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(TesseraError::UnknownElement { id })
    }

    fn snapshot(&self, slot: usize) -> DisjointSetRecord {
        let record = &self.slots[slot];
        let is_root = record.parent == slot;
        DisjointSetRecord {
            id: record.id,
            parent: self.slots[record.parent].id,
            size: is_root.then_some(record.size),
        }
    }
}
