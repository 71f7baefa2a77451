//! Tessera core library.
//!
//! Computes connected components over a graph delivered as two streams: a
//! stream of vertex ids, then a stream of relations joining those vertices.
//! The vertex stream is registered in full before any relation is applied,
//! relations are merged with a size-balanced, path-compressed union-find, and
//! the finished components are emitted in ascending root id order with members
//! in registration order.
//!
//! # Metrics
//!
//! When the `metrics` feature is enabled each build emits:
//!
//! - `tessera_elements_registered` (counter)
//! - `tessera_edges_applied` (counter)
//! - `tessera_merges` (counter)
//! - `tessera_components_per_build` (histogram)
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod components;
mod datasource;
mod disjoint_set;
mod element;
mod error;
mod sink;
mod tessera;

#[cfg(test)]
mod property;
#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    builder::{DuplicatePolicy, TesseraBuilder},
    components::{Component, Components},
    datasource::{MemoryGraph, RelationSource, VertexSource},
    disjoint_set::{
        DisjointSet, DisjointSetRecord, IngestStats, Registration, RegistrationStats,
        UnionOutcome,
    },
    element::{ElementId, Relation},
    error::{
        DataSourceError, DataSourceErrorCode, Result, SinkError, SinkErrorCode, TesseraError,
        TesseraErrorCode,
    },
    sink::{ComponentSink, MemorySink, PersistSummary, persist},
    tessera::{
        BuildOutput, BuildStats, RELATION_STREAM_NAME, RunReport, Tessera, VERTEX_STREAM_NAME,
    },
};
