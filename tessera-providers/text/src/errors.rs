//! Errors raised while reading or writing text graphs.

use std::{io, num::ParseIntError, sync::Arc};

use tessera_core::{DataSourceError, SinkError};
use thiserror::Error;

/// Errors produced by the text provider.
#[derive(Debug, Error)]
pub enum TextProviderError {
    /// A token could not be parsed as an `i64` id.
    #[error("line {line}: `{token}` is not a valid id: {source}")]
    InvalidId {
        /// Line number, starting at 1.
        line: usize,
        /// The offending token.
        token: String,
        /// Parser failure.
        #[source]
        source: ParseIntError,
    },
    /// A relation line had a separator but no source id.
    #[error("line {line}: relation has no source id")]
    MissingSource {
        /// Line number, starting at 1.
        line: usize,
    },
    /// The stream was requested a second time.
    #[error("text stream `{name}` has already been consumed")]
    Consumed {
        /// Name of the source.
        name: String,
    },
    /// Reading or writing failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl TextProviderError {
    /// Returns the line the error refers to, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidId { line, .. } | Self::MissingSource { line } => Some(*line),
            Self::Consumed { .. } | Self::Io(_) => None,
        }
    }
}

impl From<TextProviderError> for DataSourceError {
    fn from(error: TextProviderError) -> Self {
        let reason: Arc<str> = Arc::from(error.to_string());
        match error.line() {
            Some(record) => Self::Malformed { record, reason },
            None => Self::Unavailable { reason },
        }
    }
}

impl From<TextProviderError> for SinkError {
    fn from(error: TextProviderError) -> Self {
        Self::Unavailable {
            reason: Arc::from(error.to_string()),
        }
    }
}
