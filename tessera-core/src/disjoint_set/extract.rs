//! Grouping of the finished forest into components.

use std::collections::BTreeMap;

use tracing::{Span, field, instrument};

use super::DisjointSet;
use crate::{components::Components, element::ElementId};

impl DisjointSet {
    /// Resolves every element's root and groups elements into components.
    ///
    /// Every registered element appears in exactly one component. Components
    /// are ordered by ascending root id and list members in registration
    /// order.
    #[instrument(
        name = "core.extract",
        skip(self),
        fields(elements = self.len(), components = field::Empty),
    )]
    pub fn components(&mut self) -> Components {
        let mut groups: BTreeMap<ElementId, Vec<ElementId>> = BTreeMap::new();
        for slot in 0..self.slots.len() {
            let root = self.find_slot(slot);
            groups
                .entry(self.slots[root].id)
                .or_default()
                .push(self.slots[slot].id);
        }
        Span::current().record("components", groups.len());
        Components::from_groups(groups, self.slots.len())
    }
}
