//! Input files written from the shared reference graphs.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow_array::builder::{Int64Builder, ListBuilder};
use arrow_array::{Array, ArrayRef, Int64Array, ListArray, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use tempfile::TempDir;

use tessera_test_support::graphs::ReferenceGraph;

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Writes `graph` as `vertices.txt` and `relations.txt` under `dir`.
pub(super) fn write_text_graph(
    dir: &TempDir,
    graph: &ReferenceGraph,
) -> FixtureResult<(PathBuf, PathBuf)> {
    let mut vertices = String::new();
    for id in &graph.vertices {
        writeln!(vertices, "{id}")?;
    }
    let mut relations = String::from("# source: related\n");
    for (source, related) in &graph.relations {
        let related: Vec<String> = related.iter().map(ToString::to_string).collect();
        writeln!(relations, "{source}: {}", related.join(", "))?;
    }
    let vertex_path = dir.path().join("vertices.txt");
    let relation_path = dir.path().join("relations.txt");
    fs::write(&vertex_path, vertices)?;
    fs::write(&relation_path, relations)?;
    Ok((vertex_path, relation_path))
}

/// Writes `graph` as `vertices.parquet` (`id`) and `relations.parquet`
/// (`object_id`, `relative_ids`) under `dir`.
pub(super) fn write_parquet_graph(
    dir: &TempDir,
    graph: &ReferenceGraph,
) -> FixtureResult<(PathBuf, PathBuf)> {
    let vertex_path = dir.path().join("vertices.parquet");
    let ids: ArrayRef = Arc::new(Int64Array::from(graph.vertices.clone()));
    write_batch(&vertex_path, vec![(Field::new("id", DataType::Int64, false), ids)])?;

    let sources: ArrayRef = Arc::new(Int64Array::from_iter_values(
        graph.relations.iter().map(|(source, _)| *source),
    ));
    let mut related = ListBuilder::new(Int64Builder::new());
    for (_, ids) in &graph.relations {
        related.values().append_slice(ids);
        related.append(true);
    }
    let related: ArrayRef = Arc::new(related.finish());
    let item = Arc::new(Field::new("item", DataType::Int64, true));
    let relation_path = dir.path().join("relations.parquet");
    write_batch(
        &relation_path,
        vec![
            (Field::new("object_id", DataType::Int64, false), sources),
            (Field::new("relative_ids", DataType::List(item), true), related),
        ],
    )?;
    Ok((vertex_path, relation_path))
}

fn write_batch(path: &Path, columns: Vec<(Field, ArrayRef)>) -> FixtureResult<()> {
    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns.into_iter().unzip();
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(Arc::clone(&schema), arrays)?;
    let mut writer = ArrowWriter::try_new(File::create(path)?, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Reads back a component file written by the Parquet sink.
pub(super) fn read_parquet_components(
    path: &Path,
    column: &str,
) -> FixtureResult<Vec<Vec<i64>>> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?.build()?;
    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        let lists = batch
            .column_by_name(column)
            .and_then(|array| array.as_any().downcast_ref::<ListArray>())
            .ok_or("component column must be List<Int64>")?;
        for index in 0..lists.len() {
            let row = lists.value(index);
            let ids = row
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or("component values must be Int64")?;
            rows.push(ids.values().to_vec());
        }
    }
    Ok(rows)
}
