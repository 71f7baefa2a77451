//! Line-oriented text sources and sinks for tessera graphs.
//!
//! Vertex files hold one integer id per line. Relation files hold a source id
//! followed by its related ids, written either as `3 4,7,1` or `3: 4 7 1`.
//! Blank lines and lines starting with `#` are skipped in both. The component
//! sink writes one component per line with ids separated by single spaces.

mod errors;
mod parse;
mod sink;
mod source;

pub use errors::TextProviderError;
pub use parse::{parse_relation_line, parse_vertex_line};
pub use sink::TextComponentSink;
pub use source::{TextRelationSource, TextVertexSource};
