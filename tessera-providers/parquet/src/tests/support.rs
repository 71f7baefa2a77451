use std::sync::Arc;

use arrow_array::builder::{Int64Builder, ListBuilder};
use arrow_array::{Array, ArrayRef, Int64Array, ListArray, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;

use tessera_test_support::graphs::ReferenceGraph;

pub(crate) fn id_array(ids: &[Option<i64>]) -> ArrayRef {
    Arc::new(Int64Array::from(ids.to_vec()))
}

pub(crate) fn list_array(rows: &[Option<Vec<Option<i64>>>]) -> ArrayRef {
    let mut builder = ListBuilder::new(Int64Builder::new());
    for row in rows {
        match row {
            Some(values) => {
                for value in values {
                    builder.values().append_option(*value);
                }
                builder.append(true);
            }
            None => builder.append(false),
        }
    }
    Arc::new(builder.finish())
}

pub(crate) fn list_field(name: &str) -> Field {
    Field::new(
        name,
        DataType::List(Arc::new(Field::new("item", DataType::Int64, true))),
        true,
    )
}

/// Writes `columns` to an in-memory Parquet file with `rows_per_group` rows
/// in each row group.
pub(crate) fn write_parquet(columns: Vec<(Field, ArrayRef)>, rows_per_group: usize) -> Bytes {
    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns.into_iter().unzip();
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(Arc::clone(&schema), arrays).expect("batch");
    let rows_per_group = rows_per_group.max(1);
    let mut buffer = Vec::new();
    {
        let mut writer = ArrowWriter::try_new(&mut buffer, schema, None).expect("writer");
        let mut offset = 0;
        while offset < batch.num_rows() {
            let length = rows_per_group.min(batch.num_rows() - offset);
            writer.write(&batch.slice(offset, length)).expect("write");
            writer.flush().expect("flush row group");
            offset += length;
        }
        writer.close().expect("close");
    }
    Bytes::from(buffer)
}

pub(crate) fn vertex_file(ids: &[i64]) -> Bytes {
    let ids: Vec<Option<i64>> = ids.iter().copied().map(Some).collect();
    write_parquet(
        vec![(Field::new("id", DataType::Int64, false), id_array(&ids))],
        1_024,
    )
}

pub(crate) fn relation_file(rows: &[(i64, Vec<i64>)], rows_per_group: usize) -> Bytes {
    let sources: Vec<Option<i64>> = rows.iter().map(|(source, _)| Some(*source)).collect();
    let lists: Vec<Option<Vec<Option<i64>>>> = rows
        .iter()
        .map(|(_, related)| Some(related.iter().copied().map(Some).collect()))
        .collect();
    write_parquet(
        vec![
            (Field::new("object_id", DataType::Int64, false), id_array(&sources)),
            (list_field("relative_ids"), list_array(&lists)),
        ],
        rows_per_group,
    )
}

pub(crate) fn graph_files(graph: &ReferenceGraph, rows_per_group: usize) -> (Bytes, Bytes) {
    (
        vertex_file(&graph.vertices),
        relation_file(&graph.relations, rows_per_group),
    )
}

/// Reads every row of a component file back as id lists.
pub(crate) fn read_components(bytes: Bytes, column: &str) -> Vec<Vec<i64>> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(bytes)
        .expect("reader")
        .build()
        .expect("batches");
    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch.expect("batch");
        let lists = batch
            .column_by_name(column)
            .expect("component column")
            .as_any()
            .downcast_ref::<ListArray>()
            .expect("list column")
            .clone();
        for index in 0..lists.len() {
            let row = lists.value(index);
            let ids = row
                .as_any()
                .downcast_ref::<Int64Array>()
                .expect("int64 values");
            rows.push(ids.values().to_vec());
        }
    }
    rows
}
