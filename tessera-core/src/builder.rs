//! Builder utilities for configuring Tessera orchestration.
//!
//! Exposes the duplicate-registration policy and the builder used before
//! constructing [`Tessera`] instances.

use crate::{Result, tessera::Tessera};

/// How a repeated id in the vertex stream is treated.
///
/// # Examples
/// ```
/// use tessera_core::DuplicatePolicy;
///
/// assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::Reject);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail the build with [`crate::TesseraError::DuplicateElement`].
    #[default]
    Reject,
    /// Accept the repeat and keep the record from the first registration.
    Overwrite,
}

/// Configures and constructs [`Tessera`] instances.
///
/// # Examples
/// ```
/// use tessera_core::{DuplicatePolicy, TesseraBuilder};
///
/// let tessera = TesseraBuilder::new()
///     .with_duplicate_policy(DuplicatePolicy::Overwrite)
///     .with_capacity_hint(1_024)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(tessera.duplicate_policy(), DuplicatePolicy::Overwrite);
/// assert_eq!(tessera.capacity_hint(), 1_024);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TesseraBuilder {
    duplicate_policy: DuplicatePolicy,
    capacity_hint: usize,
}

impl TesseraBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use tessera_core::{DuplicatePolicy, TesseraBuilder};
    ///
    /// let builder = TesseraBuilder::new();
    /// assert_eq!(builder.duplicate_policy(), DuplicatePolicy::Reject);
    /// assert_eq!(builder.capacity_hint(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how repeated vertex ids are handled.
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Returns the configured duplicate policy.
    #[must_use]
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Pre-sizes the registry for roughly `capacity` vertices.
    ///
    /// The hint only affects allocation; any number of vertices is accepted.
    #[must_use]
    pub fn with_capacity_hint(mut self, capacity: usize) -> Self {
        self.capacity_hint = capacity;
        self
    }

    /// Returns the configured capacity hint.
    #[must_use]
    pub fn capacity_hint(&self) -> usize {
        self.capacity_hint
    }

    /// Constructs a [`Tessera`] instance.
    ///
    /// # Errors
    /// None of the options available today can be invalid, so this always
    /// returns `Ok`.
    ///
    /// # Examples
    /// ```
    /// use tessera_core::TesseraBuilder;
    ///
    /// let tessera = TesseraBuilder::new().build().expect("configuration is valid");
    /// assert_eq!(tessera.capacity_hint(), 0);
    /// ```
    pub fn build(self) -> Result<Tessera> {
        Ok(Tessera::new(self.duplicate_policy, self.capacity_hint))
    }
}
