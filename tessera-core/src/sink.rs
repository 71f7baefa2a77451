//! Component sinks and the persistence loop that feeds them.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    Result,
    components::{Component, Components},
    error::{SinkError, TesseraError},
};

/// Destination for finished components.
///
/// A sink receives components in emission order after the build has
/// completed. Writes are best-effort: a failing sink does not affect the
/// components already computed.
///
/// # Examples
/// ```
/// use tessera_core::{Component, ComponentSink, ElementId, SinkError};
///
/// #[derive(Default)]
/// struct Counter(usize);
///
/// impl ComponentSink for Counter {
///     fn name(&self) -> &str { "counter" }
///     fn write_component(&mut self, component: &Component) -> Result<(), SinkError> {
///         self.0 += component.len();
///         Ok(())
///     }
/// }
///
/// let mut sink = Counter::default();
/// let component = Component::new(ElementId::new(1), vec![ElementId::new(1)]).expect("non-empty");
/// sink.write_component(&component)?;
/// sink.finish()?;
/// assert_eq!(sink.0, 1);
/// # Ok::<(), SinkError>(())
/// ```
pub trait ComponentSink {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Persists one component.
    ///
    /// # Errors
    /// Returns [`SinkError`] when the component cannot be written.
    fn write_component(&mut self, component: &Component) -> core::result::Result<(), SinkError>;

    /// Flushes any buffered components.
    ///
    /// The default implementation does nothing.
    ///
    /// # Errors
    /// Returns [`SinkError`] when buffered output cannot be persisted.
    fn finish(&mut self) -> core::result::Result<(), SinkError> {
        Ok(())
    }
}

/// [`ComponentSink`] that keeps every component in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    components: Vec<Component>,
    finished: bool,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the components written so far.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Returns whether [`ComponentSink::finish`] has been called.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl ComponentSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn write_component(&mut self, component: &Component) -> core::result::Result<(), SinkError> {
        self.components.push(component.clone());
        Ok(())
    }

    fn finish(&mut self) -> core::result::Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}

/// Totals reported by [`persist`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PersistSummary {
    /// Components handed to the sink.
    pub components: usize,
    /// Elements across all persisted components.
    pub elements: usize,
}

/// Writes every component to `sink`, then finishes it.
///
/// # Errors
/// Returns [`TesseraError::Sink`] for the first write or flush failure.
/// Components after the failing one are not written.
#[instrument(
    name = "core.persist",
    err,
    skip(components, sink),
    fields(sink = %sink.name(), components = components.len()),
)]
pub fn persist<S: ComponentSink + ?Sized>(
    components: Components,
    sink: &mut S,
) -> Result<PersistSummary> {
    let sink_name: Arc<str> = Arc::from(sink.name());
    let wrap = |error: SinkError| TesseraError::Sink {
        sink: Arc::clone(&sink_name),
        error,
    };

    let mut summary = PersistSummary::default();
    for component in components {
        sink.write_component(&component).map_err(wrap)?;
        summary.components += 1;
        summary.elements += component.len();
    }
    sink.finish().map_err(wrap)?;

    info!(
        components = summary.components,
        elements = summary.elements,
        "components persisted"
    );
    Ok(summary)
}
