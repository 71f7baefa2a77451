use std::sync::Arc;

use arrow_schema::{ArrowError, DataType};
use tessera_core::{DataSourceError, SinkError};
use thiserror::Error;

/// Errors produced while reading or writing Parquet graphs.
#[derive(Debug, Error)]
pub enum ParquetProviderError {
    /// The requested column is absent from the file schema.
    #[error("column `{column}` not found in Parquet schema")]
    ColumnNotFound {
        /// Requested column name.
        column: String,
    },
    /// The column exists but holds the wrong Arrow type.
    #[error("column `{column}` must be {expected} but found {actual:?}")]
    InvalidColumnType {
        /// Requested column name.
        column: String,
        /// Description of the accepted type.
        expected: &'static str,
        /// Type found in the schema.
        actual: DataType,
    },
    /// A required value is null.
    #[error("column `{column}` is null at row {row}")]
    NullValue {
        /// Column holding the null.
        column: String,
        /// Zero-based row across all batches.
        row: usize,
    },
    /// The stream was requested a second time.
    #[error("parquet stream `{name}` has already been consumed")]
    Consumed {
        /// Name of the source.
        name: String,
    },
    /// Arrow decoding or encoding failed.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// The Parquet reader or writer failed.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    /// Opening or creating a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParquetProviderError> for DataSourceError {
    fn from(error: ParquetProviderError) -> Self {
        let reason: Arc<str> = Arc::from(error.to_string());
        match error {
            ParquetProviderError::NullValue { row, .. } => Self::Malformed {
                record: row + 1,
                reason,
            },
            _ => Self::Unavailable { reason },
        }
    }
}

impl From<ParquetProviderError> for SinkError {
    fn from(error: ParquetProviderError) -> Self {
        Self::Unavailable {
            reason: Arc::from(error.to_string()),
        }
    }
}
