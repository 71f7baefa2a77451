//! Vertex registration.

use tracing::debug;

use super::{DisjointSet, Slot};
use crate::{Result, builder::DuplicatePolicy, element::ElementId, error::TesseraError};

/// Outcome of registering a single id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// The id was new and now forms a singleton component.
    Inserted,
    /// The id was already present and the existing record was kept.
    Overwritten,
}

/// Counters accumulated by [`DisjointSet::register_all`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistrationStats {
    /// Ids that created a new record.
    pub inserted: usize,
    /// Repeated ids accepted under [`DuplicatePolicy::Overwrite`].
    pub overwritten: usize,
}

impl DisjointSet {
    /// Registers `id` as a singleton component.
    ///
    /// A repeated id is rejected under [`DuplicatePolicy::Reject`]. Under
    /// [`DuplicatePolicy::Overwrite`] it is accepted and the existing record
    /// is left untouched, so the id keeps its first registration position.
    ///
    /// # Errors
    /// Returns [`TesseraError::DuplicateElement`] when `id` is already
    /// registered and `policy` is [`DuplicatePolicy::Reject`].
    pub fn register(&mut self, id: ElementId, policy: DuplicatePolicy) -> Result<Registration> {
        if self.index.contains_key(&id) {
            return match policy {
                DuplicatePolicy::Reject => Err(TesseraError::DuplicateElement { id }),
                DuplicatePolicy::Overwrite => {
                    debug!(%id, "duplicate element registration overwritten");
                    Ok(Registration::Overwritten)
                }
            };
        }

        let slot = self.slots.len();
        self.slots.push(Slot {
            id,
            parent: slot,
            size: 1,
        });
        self.index.insert(id, slot);
        self.roots += 1;
        Ok(Registration::Inserted)
    }

    /// Registers every id yielded by `ids`, stopping at the first failure.
    ///
    /// Items are pulled one at a time, so `ids` may block between items while
    /// it waits on an external source. Streams of [`crate::DataSourceError`]
    /// are wrapped with [`TesseraError::data_source`] first so the failure
    /// names its source.
    ///
    /// # Errors
    /// Returns the first error yielded by `ids`, or
    /// [`TesseraError::DuplicateElement`] as described for [`Self::register`].
    pub fn register_all<I, E>(&mut self, ids: I, policy: DuplicatePolicy) -> Result<RegistrationStats>
    where
        I: IntoIterator<Item = core::result::Result<ElementId, E>>,
        TesseraError: From<E>,
    {
        let mut stats = RegistrationStats::default();
        for item in ids {
            match self.register(item?, policy)? {
                Registration::Inserted => stats.inserted += 1,
                Registration::Overwritten => stats.overwritten += 1,
            }
        }
        Ok(stats)
    }
}
