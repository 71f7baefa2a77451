pub(crate) use super::{
    DEFAULT_COMPONENT_COLUMN, DEFAULT_ID_COLUMN, DEFAULT_RELATED_COLUMN, DEFAULT_SOURCE_COLUMN,
    ParquetComponentSink, ParquetProviderError, ParquetRelationSource, ParquetVertexSource,
};

mod support;
