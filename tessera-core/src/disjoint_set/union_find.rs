//! Find with path compression and union by size.

use super::{DisjointSet, DisjointSetRecord, UnionOutcome};
use crate::{Result, element::ElementId};

impl DisjointSet {
    /// Returns the root record of the component containing `id`.
    ///
    /// Every element visited on the way to the root is re-pointed directly at
    /// the root.
    ///
    /// # Errors
    /// Returns [`crate::TesseraError::UnknownElement`] when `id` is not
    /// registered.
    pub fn find(&mut self, id: ElementId) -> Result<DisjointSetRecord> {
        let slot = self.slot_of(id)?;
        let root = self.find_slot(slot);
        Ok(self.snapshot(root))
    }

    /// Merges the components containing `x` and `y`.
    ///
    /// The root of the smaller component is attached beneath the root of the
    /// larger one. When both components have the same size, the root of `x`
    /// survives.
    ///
    /// # Errors
    /// Returns [`crate::TesseraError::UnknownElement`] when either id is not
    /// registered. The forest is left unchanged in that case.
    pub fn union(&mut self, x: ElementId, y: ElementId) -> Result<UnionOutcome> {
        let x_slot = self.slot_of(x)?;
        let y_slot = self.slot_of(y)?;
        let mut keep = self.find_slot(x_slot);
        let mut absorb = self.find_slot(y_slot);
        if keep == absorb {
            return Ok(UnionOutcome::AlreadyJoined {
                root: self.slots[keep].id,
            });
        }

        if self.slots[keep].size < self.slots[absorb].size {
            std::mem::swap(&mut keep, &mut absorb);
        }
        let absorbed_size = self.slots[absorb].size;
        self.slots[absorb].parent = keep;
        self.slots[keep].size += absorbed_size;
        self.roots -= 1;

        Ok(UnionOutcome::Merged {
            root: self.slots[keep].id,
            absorbed: self.slots[absorb].id,
        })
    }

    /// Returns whether `x` and `y` belong to the same component.
    ///
    /// # Errors
    /// Returns [`crate::TesseraError::UnknownElement`] when either id is not
    /// registered.
    pub fn connected(&mut self, x: ElementId, y: ElementId) -> Result<bool> {
        let x_slot = self.slot_of(x)?;
        let y_slot = self.slot_of(y)?;
        Ok(self.find_slot(x_slot) == self.find_slot(y_slot))
    }

    /// Returns the number of elements in the component containing `id`.
    ///
    /// # Errors
    /// Returns [`crate::TesseraError::UnknownElement`] when `id` is not
    /// registered.
    pub fn component_size(&mut self, id: ElementId) -> Result<usize> {
        let slot = self.slot_of(id)?;
        let root = self.find_slot(slot);
        Ok(self.slots[root].size)
    }

    pub(crate) fn find_slot(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.slots[root].parent != root {
            root = self.slots[root].parent;
        }

        let mut node = slot;
        while self.slots[node].parent != node {
            let parent = self.slots[node].parent;
            self.slots[node].parent = root;
            node = parent;
        }

        root
    }
}
