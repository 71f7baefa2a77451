//! Component sink writing a `List<Int64>` column.
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow_array::builder::{Int64Builder, ListBuilder};
use arrow_array::{ArrayRef, RecordBatch};
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use parquet::arrow::ArrowWriter;
use tessera_core::{Component, ComponentSink, SinkError};

use crate::errors::ParquetProviderError;

/// Default column written by [`ParquetComponentSink`].
pub const DEFAULT_COMPONENT_COLUMN: &str = "object_ids";

const DEFAULT_BATCH_SIZE: usize = 1_024;

/// Writes each component as one row of member ids.
///
/// Components are buffered and written in record batches;
/// [`ComponentSink::finish`] flushes the last batch and writes the file
/// footer. The output is incomplete until `finish` succeeds.
pub struct ParquetComponentSink<W: Write + Send> {
    name: String,
    schema: SchemaRef,
    rows: ListBuilder<Int64Builder>,
    buffered: usize,
    batch_size: usize,
    writer: Option<ArrowWriter<W>>,
    output: Option<W>,
}

impl<W: Write + Send> ParquetComponentSink<W> {
    /// Creates a sink writing components to `column` of `writer`.
    ///
    /// # Errors
    /// Returns [`ParquetProviderError::Parquet`] when the writer cannot be
    /// initialised.
    pub fn try_new(
        name: impl Into<String>,
        writer: W,
        column: &str,
    ) -> Result<Self, ParquetProviderError> {
        let item = Field::new("item", DataType::Int64, true);
        let schema = Arc::new(Schema::new(vec![Field::new(
            column,
            DataType::List(Arc::new(item)),
            false,
        )]));
        let writer = ArrowWriter::try_new(writer, Arc::clone(&schema), None)?;
        Ok(Self {
            name: name.into(),
            schema,
            rows: ListBuilder::new(Int64Builder::new()),
            buffered: 0,
            batch_size: DEFAULT_BATCH_SIZE,
            writer: Some(writer),
            output: None,
        })
    }

    /// Sets how many components are buffered per record batch.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Returns the underlying writer once [`ComponentSink::finish`] has
    /// succeeded.
    #[must_use]
    pub fn into_inner(self) -> Option<W> {
        self.output
    }

    fn writer(&mut self) -> Result<&mut ArrowWriter<W>, ParquetProviderError> {
        self.writer.as_mut().ok_or_else(|| ParquetProviderError::Consumed {
            name: self.name.clone(),
        })
    }

    fn flush_rows(&mut self) -> Result<(), ParquetProviderError> {
        if self.buffered == 0 {
            return Ok(());
        }
        let array: ArrayRef = Arc::new(self.rows.finish());
        let batch = RecordBatch::try_new(Arc::clone(&self.schema), vec![array])?;
        self.buffered = 0;
        self.writer()?.write(&batch)?;
        Ok(())
    }

    fn push(&mut self, component: &Component) -> Result<(), ParquetProviderError> {
        self.writer()?;
        for member in component.members() {
            self.rows.values().append_value(member.get());
        }
        self.rows.append(true);
        self.buffered += 1;
        if self.buffered >= self.batch_size {
            self.flush_rows()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), ParquetProviderError> {
        self.flush_rows()?;
        let writer = self.writer.take().ok_or_else(|| ParquetProviderError::Consumed {
            name: self.name.clone(),
        })?;
        self.output = Some(writer.into_inner()?);
        Ok(())
    }
}

impl ParquetComponentSink<File> {
    /// Creates or truncates the Parquet file at `path`.
    ///
    /// # Errors
    /// Returns [`ParquetProviderError::Io`] when the file cannot be created.
    pub fn create(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, ParquetProviderError> {
        Self::try_new(name, File::create(path)?, column)
    }
}

impl<W: Write + Send> ComponentSink for ParquetComponentSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_component(&mut self, component: &Component) -> Result<(), SinkError> {
        self.push(component).map_err(SinkError::from)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.close().map_err(SinkError::from)
    }
}
