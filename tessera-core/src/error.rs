//! Error types for the Tessera core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{convert::Infallible, fmt, sync::Arc};

use thiserror::Error;

use crate::element::ElementId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while pulling items from a vertex or relation source.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DataSourceError {
    /// The source could not be opened or read.
    #[error("source unavailable: {reason}")]
    Unavailable {
        /// Backend-specific description of the failure.
        reason: Arc<str>,
    },
    /// A record could not be decoded.
    #[error("record {record} is malformed: {reason}")]
    Malformed {
        /// Position of the offending record, starting at 1.
        record: usize,
        /// Why the record was rejected.
        reason: Arc<str>,
    },
    /// The source was cancelled before the stream ended.
    #[error("source was cancelled mid-stream")]
    Cancelled,
}

define_error_codes! {
    /// Stable codes describing [`DataSourceError`] variants.
    enum DataSourceErrorCode for DataSourceError {
        /// The source could not be opened or read.
        Unavailable => Unavailable { .. } => "DATA_SOURCE_UNAVAILABLE",
        /// A record could not be decoded.
        Malformed => Malformed { .. } => "DATA_SOURCE_MALFORMED",
        /// The source was cancelled before the stream ended.
        Cancelled => Cancelled => "DATA_SOURCE_CANCELLED",
    }
}

/// An error produced by a [`crate::ComponentSink`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SinkError {
    /// The sink could not accept writes.
    #[error("sink unavailable: {reason}")]
    Unavailable {
        /// Backend-specific description of the failure.
        reason: Arc<str>,
    },
    /// The sink refused a component.
    #[error("component {component} was rejected: {reason}")]
    Rejected {
        /// Zero-based position of the component in the emitted sequence.
        component: usize,
        /// Why the component was rejected.
        reason: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`SinkError`] variants.
    enum SinkErrorCode for SinkError {
        /// The sink could not accept writes.
        Unavailable => Unavailable { .. } => "SINK_UNAVAILABLE",
        /// The sink refused a component.
        Rejected => Rejected { .. } => "SINK_REJECTED",
    }
}

/// Error type produced while building or persisting components.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TesseraError {
    /// An operation referenced an id that was never registered.
    #[error("element {id} is not registered")]
    UnknownElement {
        /// The unregistered id.
        id: ElementId,
    },
    /// The vertex stream yielded the same id twice.
    #[error("element {id} was registered more than once")]
    DuplicateElement {
        /// The repeated id.
        id: ElementId,
    },
    /// A vertex or relation source failed mid-stream.
    #[error("data source `{data_source}` failed: {error}")]
    DataSource {
        /// Identifier for the data source that produced the error.
        data_source: Arc<str>,
        #[source]
        /// Underlying data source error.
        error: DataSourceError,
    },
    /// A component sink failed while persisting results.
    #[error("sink `{sink}` failed: {error}")]
    Sink {
        /// Identifier for the sink that produced the error.
        sink: Arc<str>,
        #[source]
        /// Underlying sink error.
        error: SinkError,
    },
}

define_error_codes! {
    /// Stable codes describing [`TesseraError`] variants.
    enum TesseraErrorCode for TesseraError {
        /// An operation referenced an id that was never registered.
        UnknownElement => UnknownElement { .. } => "TESSERA_UNKNOWN_ELEMENT",
        /// The vertex stream yielded the same id twice.
        DuplicateElement => DuplicateElement { .. } => "TESSERA_DUPLICATE_ELEMENT",
        /// A vertex or relation source failed mid-stream.
        DataSourceFailure => DataSource { .. } => "TESSERA_DATA_SOURCE_FAILURE",
        /// A component sink failed while persisting results.
        SinkFailure => Sink { .. } => "TESSERA_SINK_FAILURE",
    }
}

impl TesseraError {
    /// Wraps a [`DataSourceError`] with the name of the source that raised it.
    #[must_use]
    pub fn data_source(data_source: &str, error: DataSourceError) -> Self {
        Self::DataSource {
            data_source: Arc::from(data_source),
            error,
        }
    }

    /// Wraps a [`SinkError`] with the name of the sink that raised it.
    #[must_use]
    pub fn sink(sink: &str, error: SinkError) -> Self {
        Self::Sink {
            sink: Arc::from(sink),
            error,
        }
    }

    /// Retrieve the inner [`DataSourceErrorCode`] when the error originated in a source.
    pub const fn data_source_code(&self) -> Option<DataSourceErrorCode> {
        match self {
            Self::DataSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`SinkErrorCode`] when the error originated in a sink.
    pub const fn sink_code(&self) -> Option<SinkErrorCode> {
        match self {
            Self::Sink { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

impl From<Infallible> for TesseraError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, TesseraError>;
