//! Component sink writing one component per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tessera_core::{Component, ComponentSink, SinkError};

use crate::errors::TextProviderError;

/// Writes each component as its member ids separated by single spaces.
///
/// # Examples
/// ```
/// use tessera_core::{Component, ComponentSink, ElementId};
/// use tessera_providers_text::TextComponentSink;
///
/// let mut sink = TextComponentSink::new("out", Vec::new());
/// let component = Component::new(ElementId::new(6), vec![ElementId::new(6), ElementId::new(8)])
///     .expect("non-empty");
/// sink.write_component(&component)?;
/// sink.finish()?;
/// assert_eq!(sink.into_inner(), b"6 8\n");
/// # Ok::<(), tessera_core::SinkError>(())
/// ```
#[derive(Debug)]
pub struct TextComponentSink<W> {
    name: String,
    writer: W,
}

impl<W: Write> TextComponentSink<W> {
    /// Wraps `writer` as a sink called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer,
        }
    }

    /// Returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, component: &Component) -> Result<(), TextProviderError> {
        let mut members = component.members().iter();
        if let Some(first) = members.next() {
            write!(self.writer, "{first}")?;
        }
        for member in members {
            write!(self.writer, " {member}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl TextComponentSink<BufWriter<File>> {
    /// Creates or truncates the file at `path`.
    ///
    /// # Errors
    /// Returns [`TextProviderError::Io`] when the file cannot be created.
    pub fn create(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, TextProviderError> {
        let file = File::create(path)?;
        Ok(Self::new(name, BufWriter::new(file)))
    }
}

impl<W: Write> ComponentSink for TextComponentSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_component(&mut self, component: &Component) -> Result<(), SinkError> {
        self.write_line(component).map_err(SinkError::from)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer
            .flush()
            .map_err(|error| SinkError::from(TextProviderError::from(error)))
    }
}
