//! Vertex and relation sources streaming Parquet record batches.
use std::fs::File;
use std::path::Path;
use std::vec;

use arrow_array::{RecordBatch, RecordBatchReader};
use arrow_schema::Field;
use parquet::arrow::{
    ProjectionMask,
    arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder},
};
use parquet::file::reader::ChunkReader;
use tessera_core::{DataSourceError, ElementId, Relation, RelationSource, VertexSource};

use crate::errors::ParquetProviderError;
use crate::ingest::{
    DecodedBatch, RelationColumns, column_index, decode_relations, decode_vertices, validate_int64_field,
    validate_list_int64_field,
};

/// Default vertex id column.
pub const DEFAULT_ID_COLUMN: &str = "id";
/// Default relation source column.
pub const DEFAULT_SOURCE_COLUMN: &str = "object_id";
/// Default related-ids column.
pub const DEFAULT_RELATED_COLUMN: &str = "relative_ids";

type FieldCheck = fn(&Field) -> Result<(), ParquetProviderError>;

/// Opens `reader`, checks `columns` with `validate`, and projects onto them.
///
/// Returns the batch reader with the column positions in the projected
/// schema, in the order requested.
fn open_projection<R, const N: usize>(
    reader: R,
    columns: [&str; N],
    validate: [FieldCheck; N],
) -> Result<(ParquetRecordBatchReader, [usize; N]), ParquetProviderError>
where
    R: ChunkReader + 'static,
{
    let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
    let file_schema = builder.schema().clone();
    let mut roots = [0_usize; N];
    for ((root, column), check) in roots.iter_mut().zip(columns).zip(validate) {
        *root = column_index(&file_schema, column)?;
        check(file_schema.field(*root))?;
    }
    let mask = ProjectionMask::roots(builder.parquet_schema(), roots);
    let batches = builder.with_projection(mask).build()?;

    let projected = batches.schema();
    let mut indices = [0_usize; N];
    for (index, column) in indices.iter_mut().zip(columns) {
        *index = column_index(&projected, column)?;
    }
    Ok((batches, indices))
}

/// Decodes one record batch into stream items.
trait BatchDecoder {
    type Item;

    fn decode(&self, batch: &RecordBatch, start_row: usize) -> DecodedBatch<Self::Item>;
}

struct VertexDecoder {
    index: usize,
    column: String,
}

impl BatchDecoder for VertexDecoder {
    type Item = ElementId;

    fn decode(&self, batch: &RecordBatch, start_row: usize) -> DecodedBatch<ElementId> {
        decode_vertices(batch, self.index, &self.column, start_row)
    }
}

impl BatchDecoder for RelationColumns {
    type Item = Relation;

    fn decode(&self, batch: &RecordBatch, start_row: usize) -> DecodedBatch<Relation> {
        decode_relations(batch, self, start_row)
    }
}

/// Yields decoded items batch by batch and stops after the first error.
///
/// Valid rows preceding an invalid one are yielded before the error.
struct BatchStream<D: BatchDecoder> {
    batches: ParquetRecordBatchReader,
    decoder: D,
    buffered: vec::IntoIter<D::Item>,
    pending: Option<ParquetProviderError>,
    rows: usize,
    failed: bool,
}

impl<D: BatchDecoder> BatchStream<D> {
    fn new(batches: ParquetRecordBatchReader, decoder: D) -> Self {
        Self {
            batches,
            decoder,
            buffered: Vec::new().into_iter(),
            pending: None,
            rows: 0,
            failed: false,
        }
    }

    fn fail(&mut self, error: ParquetProviderError) -> Option<Result<D::Item, DataSourceError>> {
        self.failed = true;
        Some(Err(error.into()))
    }
}

impl<D: BatchDecoder> Iterator for BatchStream<D> {
    type Item = Result<D::Item, DataSourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.next() {
                return Some(Ok(item));
            }
            if let Some(error) = self.pending.take() {
                return self.fail(error);
            }
            if self.failed {
                return None;
            }
            let batch = match self.batches.next()? {
                Ok(batch) => batch,
                Err(error) => return self.fail(error.into()),
            };
            let decoded = self.decoder.decode(&batch, self.rows);
            self.rows += batch.num_rows();
            self.buffered = decoded.items.into_iter();
            self.pending = decoded.error;
        }
    }
}

fn take_reader<R>(reader: &mut Option<R>, name: &str) -> Result<R, ParquetProviderError> {
    reader.take().ok_or_else(|| ParquetProviderError::Consumed {
        name: name.to_owned(),
    })
}

/// Vertex source reading ids from an `Int64` column.
///
/// Any [`ChunkReader`] works, including [`File`] and `bytes::Bytes`. The
/// column is validated when the stream is opened, before any row is decoded.
#[derive(Debug)]
pub struct ParquetVertexSource<R> {
    name: String,
    column: String,
    reader: Option<R>,
}

impl<R> ParquetVertexSource<R>
where
    R: ChunkReader + 'static,
{
    /// Wraps `reader`, reading ids from `column`.
    #[must_use]
    pub fn new(name: impl Into<String>, reader: R, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            reader: Some(reader),
        }
    }

    /// Returns the id column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    fn open(&mut self) -> Result<BatchStream<VertexDecoder>, ParquetProviderError> {
        let reader = take_reader(&mut self.reader, &self.name)?;
        let (batches, [index]) =
            open_projection(reader, [self.column.as_str()], [validate_int64_field])?;
        let decoder = VertexDecoder {
            index,
            column: self.column.clone(),
        };
        Ok(BatchStream::new(batches, decoder))
    }
}

impl ParquetVertexSource<File> {
    /// Opens the Parquet file at `path`.
    ///
    /// # Errors
    /// Returns [`ParquetProviderError::Io`] when the file cannot be opened.
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: impl Into<String>,
    ) -> Result<Self, ParquetProviderError> {
        Ok(Self::new(name, File::open(path)?, column))
    }
}

impl<R> VertexSource for ParquetVertexSource<R>
where
    R: ChunkReader + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn vertices(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<ElementId, DataSourceError>>, DataSourceError> {
        Ok(self.open()?)
    }
}

/// Relation source reading an `Int64` source column and a `List<Int64>`
/// column of related ids.
#[derive(Debug)]
pub struct ParquetRelationSource<R> {
    name: String,
    source_column: String,
    related_column: String,
    reader: Option<R>,
}

impl<R> ParquetRelationSource<R>
where
    R: ChunkReader + 'static,
{
    /// Wraps `reader`, reading relations from the given columns.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        reader: R,
        source_column: impl Into<String>,
        related_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_column: source_column.into(),
            related_column: related_column.into(),
            reader: Some(reader),
        }
    }

    fn open(&mut self) -> Result<BatchStream<RelationColumns>, ParquetProviderError> {
        let reader = take_reader(&mut self.reader, &self.name)?;
        let (batches, [source_index, related_index]) = open_projection(
            reader,
            [self.source_column.as_str(), self.related_column.as_str()],
            [validate_int64_field, validate_list_int64_field],
        )?;
        let columns = RelationColumns {
            source_index,
            source: self.source_column.clone(),
            related_index,
            related: self.related_column.clone(),
        };
        Ok(BatchStream::new(batches, columns))
    }
}

impl ParquetRelationSource<File> {
    /// Opens the Parquet file at `path`.
    ///
    /// # Errors
    /// Returns [`ParquetProviderError::Io`] when the file cannot be opened.
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        source_column: impl Into<String>,
        related_column: impl Into<String>,
    ) -> Result<Self, ParquetProviderError> {
        Ok(Self::new(name, File::open(path)?, source_column, related_column))
    }
}

impl<R> RelationSource for ParquetRelationSource<R>
where
    R: ChunkReader + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn relations(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<Relation, DataSourceError>>, DataSourceError> {
        Ok(self.open()?)
    }
}
