//! Component extraction.
//!
//! Groups every registered element by its root. Components are emitted in
//! ascending root id order and list their members in registration order, so
//! identical input streams always produce identical output.

use std::{
    collections::{BTreeMap, btree_map},
    iter::FusedIterator,
};

use crate::element::ElementId;

/// One connected component.
///
/// # Examples
/// ```
/// use tessera_core::{DisjointSet, DuplicatePolicy, ElementId};
///
/// let mut set = DisjointSet::new();
/// for raw in [4, 2, 9] {
///     set.register(ElementId::new(raw), DuplicatePolicy::Reject)?;
/// }
/// set.union(ElementId::new(2), ElementId::new(9))?;
/// let components: Vec<_> = set.components().collect();
/// assert_eq!(components.len(), 2);
/// assert_eq!(components[0].root(), ElementId::new(2));
/// assert_eq!(components[0].members(), [ElementId::new(2), ElementId::new(9)]);
/// assert_eq!(components[1].members(), [ElementId::new(4)]);
/// # Ok::<(), tessera_core::TesseraError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    root: ElementId,
    members: Vec<ElementId>,
}

impl Component {
    /// Creates a component from its root and members.
    ///
    /// Returns `None` when `members` is empty.
    #[must_use]
    pub fn new(root: ElementId, members: Vec<ElementId>) -> Option<Self> {
        (!members.is_empty()).then_some(Self { root, members })
    }

    /// Returns the root that represents this component.
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Returns the members in registration order.
    #[must_use]
    pub fn members(&self) -> &[ElementId] {
        &self.members
    }

    /// Returns the number of members. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; components are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Consumes the component, returning its members.
    #[must_use]
    pub fn into_members(self) -> Vec<ElementId> {
        self.members
    }
}

impl From<Component> for Vec<ElementId> {
    fn from(component: Component) -> Self {
        component.members
    }
}

/// One-shot sequence of components produced by [`crate::DisjointSet::components`].
#[derive(Debug)]
pub struct Components {
    groups: btree_map::IntoIter<ElementId, Vec<ElementId>>,
    elements: usize,
}

impl Components {
    pub(crate) fn from_groups(groups: BTreeMap<ElementId, Vec<ElementId>>, elements: usize) -> Self {
        Self {
            groups: groups.into_iter(),
            elements,
        }
    }

    /// Returns the number of elements across all remaining components.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements
    }

    /// Collects the remaining components as plain id lists.
    #[must_use]
    pub fn into_id_lists(self) -> Vec<Vec<ElementId>> {
        self.map(Component::into_members).collect()
    }
}

impl Iterator for Components {
    type Item = Component;

    fn next(&mut self) -> Option<Self::Item> {
        let (root, members) = self.groups.next()?;
        self.elements -= members.len();
        Some(Component { root, members })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.groups.size_hint()
    }
}

impl ExactSizeIterator for Components {}

impl FusedIterator for Components {}
