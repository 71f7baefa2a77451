//! Helpers for validating columns and decoding record batches.
use arrow_array::{Array, Int64Array, ListArray, RecordBatch};
use arrow_schema::{DataType, Field, Schema};

use tessera_core::{ElementId, Relation};

use crate::errors::ParquetProviderError;

const INT64: &str = "Int64";
const LIST_INT64: &str = "List<Int64>";

pub(crate) fn column_index(schema: &Schema, column: &str) -> Result<usize, ParquetProviderError> {
    schema
        .index_of(column)
        .map_err(|_| ParquetProviderError::ColumnNotFound {
            column: column.to_owned(),
        })
}

pub(crate) fn validate_int64_field(field: &Field) -> Result<(), ParquetProviderError> {
    match field.data_type() {
        DataType::Int64 => Ok(()),
        other => Err(ParquetProviderError::InvalidColumnType {
            column: field.name().clone(),
            expected: INT64,
            actual: other.clone(),
        }),
    }
}

pub(crate) fn validate_list_int64_field(field: &Field) -> Result<(), ParquetProviderError> {
    match field.data_type() {
        DataType::List(child) if child.data_type() == &DataType::Int64 => Ok(()),
        other => Err(ParquetProviderError::InvalidColumnType {
            column: field.name().clone(),
            expected: LIST_INT64,
            actual: other.clone(),
        }),
    }
}

fn int64_column<'a>(
    batch: &'a RecordBatch,
    index: usize,
    column: &str,
) -> Result<&'a Int64Array, ParquetProviderError> {
    let array = batch.column(index);
    array
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| ParquetProviderError::InvalidColumnType {
            column: column.to_owned(),
            expected: INT64,
            actual: array.data_type().clone(),
        })
}

fn list_column<'a>(
    batch: &'a RecordBatch,
    index: usize,
    column: &str,
) -> Result<&'a ListArray, ParquetProviderError> {
    let array = batch.column(index);
    array
        .as_any()
        .downcast_ref::<ListArray>()
        .ok_or_else(|| ParquetProviderError::InvalidColumnType {
            column: column.to_owned(),
            expected: LIST_INT64,
            actual: array.data_type().clone(),
        })
}

/// Rows decoded from one batch, up to the first invalid row.
#[derive(Debug)]
pub(crate) struct DecodedBatch<T> {
    /// Valid rows preceding `error`, or every row when `error` is `None`.
    pub(crate) items: Vec<T>,
    /// Failure that stopped decoding.
    pub(crate) error: Option<ParquetProviderError>,
}

impl<T> DecodedBatch<T> {
    fn complete(items: Vec<T>) -> Self {
        Self { items, error: None }
    }

    fn stopped(items: Vec<T>, error: ParquetProviderError) -> Self {
        Self {
            items,
            error: Some(error),
        }
    }
}

/// Decodes the id column of one batch; `start_row` is the batch's first row.
pub(crate) fn decode_vertices(
    batch: &RecordBatch,
    index: usize,
    column: &str,
    start_row: usize,
) -> DecodedBatch<ElementId> {
    let values = match int64_column(batch, index, column) {
        Ok(values) => values,
        Err(error) => return DecodedBatch::stopped(Vec::new(), error),
    };
    let mut ids = Vec::with_capacity(values.len());
    for (offset, value) in values.iter().enumerate() {
        match value {
            Some(raw) => ids.push(ElementId::new(raw)),
            None => {
                let error = ParquetProviderError::NullValue {
                    column: column.to_owned(),
                    row: start_row + offset,
                };
                return DecodedBatch::stopped(ids, error);
            }
        }
    }
    DecodedBatch::complete(ids)
}

/// Column positions and names for a relation batch.
#[derive(Clone, Debug)]
pub(crate) struct RelationColumns {
    pub(crate) source_index: usize,
    pub(crate) source: String,
    pub(crate) related_index: usize,
    pub(crate) related: String,
}

/// Decodes one relation batch. A null related list reads as empty; a null
/// source or a null entry inside a list stops decoding at that row.
pub(crate) fn decode_relations(
    batch: &RecordBatch,
    columns: &RelationColumns,
    start_row: usize,
) -> DecodedBatch<Relation> {
    let sources = int64_column(batch, columns.source_index, &columns.source);
    let lists = list_column(batch, columns.related_index, &columns.related);
    let (sources, lists) = match (sources, lists) {
        (Ok(sources), Ok(lists)) => (sources, lists),
        (Err(error), _) | (_, Err(error)) => return DecodedBatch::stopped(Vec::new(), error),
    };

    let mut relations = Vec::with_capacity(sources.len());
    for offset in 0..sources.len() {
        match decode_relation(sources, lists, columns, offset, start_row + offset) {
            Ok(relation) => relations.push(relation),
            Err(error) => return DecodedBatch::stopped(relations, error),
        }
    }
    DecodedBatch::complete(relations)
}

fn decode_relation(
    sources: &Int64Array,
    lists: &ListArray,
    columns: &RelationColumns,
    offset: usize,
    row: usize,
) -> Result<Relation, ParquetProviderError> {
    if sources.is_null(offset) {
        return Err(ParquetProviderError::NullValue {
            column: columns.source.clone(),
            row,
        });
    }
    let source = ElementId::new(sources.value(offset));
    if lists.is_null(offset) {
        return Ok(Relation::new(source, []));
    }

    let list = lists.value(offset);
    let values = list.as_any().downcast_ref::<Int64Array>().ok_or_else(|| {
        ParquetProviderError::InvalidColumnType {
            column: columns.related.clone(),
            expected: LIST_INT64,
            actual: list.data_type().clone(),
        }
    })?;
    if values.null_count() > 0 {
        return Err(ParquetProviderError::NullValue {
            column: columns.related.clone(),
            row,
        });
    }
    Ok(Relation::new(
        source,
        values.values().iter().copied().map(ElementId::new),
    ))
}
