//! Streaming vertex and relation sources over buffered readers.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tessera_core::{DataSourceError, ElementId, Relation, RelationSource, VertexSource};

use crate::errors::TextProviderError;
use crate::parse::{parse_relation_line, parse_vertex_line};

type LineParser<T> = fn(&str, usize) -> Result<Option<T>, TextProviderError>;

/// Iterator that parses non-skipped lines and stops after the first error.
struct ParsedLines<R, T> {
    lines: Lines<R>,
    line: usize,
    parse: LineParser<T>,
    failed: bool,
}

impl<R: BufRead, T> ParsedLines<R, T> {
    fn new(reader: R, parse: LineParser<T>) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            parse,
            failed: false,
        }
    }
}

impl<R: BufRead, T> Iterator for ParsedLines<R, T> {
    type Item = Result<T, DataSourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for raw in self.lines.by_ref() {
            self.line += 1;
            let parsed = raw
                .map_err(TextProviderError::from)
                .and_then(|text| (self.parse)(&text, self.line));
            match parsed {
                Ok(Some(item)) => return Some(Ok(item)),
                Ok(None) => {}
                Err(error) => {
                    self.failed = true;
                    return Some(Err(error.into()));
                }
            }
        }
        None
    }
}

fn take_reader<R>(reader: &mut Option<R>, name: &str) -> Result<R, DataSourceError> {
    reader.take().ok_or_else(|| {
        TextProviderError::Consumed {
            name: name.to_owned(),
        }
        .into()
    })
}

fn open(path: &Path) -> Result<BufReader<File>, TextProviderError> {
    Ok(BufReader::new(File::open(path)?))
}

/// Vertex source reading one id per line.
///
/// The stream can be opened once; lines are read as the build pulls them.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use tessera_core::VertexSource;
/// use tessera_providers_text::TextVertexSource;
///
/// let mut source = TextVertexSource::new("ids", Cursor::new("1\n# skip\n2\n"));
/// let ids: Vec<_> = source.vertices()?.collect::<Result<_, _>>()?;
/// assert_eq!(ids.len(), 2);
/// # Ok::<(), tessera_core::DataSourceError>(())
/// ```
#[derive(Debug)]
pub struct TextVertexSource<R> {
    name: String,
    reader: Option<R>,
}

impl<R: BufRead> TextVertexSource<R> {
    /// Wraps `reader` as a vertex source called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader: Some(reader),
        }
    }
}

impl TextVertexSource<BufReader<File>> {
    /// Opens the vertex file at `path`.
    ///
    /// # Errors
    /// Returns [`TextProviderError::Io`] when the file cannot be opened.
    pub fn from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextProviderError> {
        Ok(Self::new(name, open(path.as_ref())?))
    }
}

impl<R: BufRead> VertexSource for TextVertexSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertices(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<ElementId, DataSourceError>>, DataSourceError> {
        let reader = take_reader(&mut self.reader, &self.name)?;
        Ok(ParsedLines::new(reader, parse_vertex_line))
    }
}

/// Relation source reading one source id and its related ids per line.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use tessera_core::RelationSource;
/// use tessera_providers_text::TextRelationSource;
///
/// let mut source = TextRelationSource::new("edges", Cursor::new("3: 4 7\n6 8\n"));
/// let relations: Vec<_> = source.relations()?.collect::<Result<_, _>>()?;
/// assert_eq!(relations.len(), 2);
/// # Ok::<(), tessera_core::DataSourceError>(())
/// ```
#[derive(Debug)]
pub struct TextRelationSource<R> {
    name: String,
    reader: Option<R>,
}

impl<R: BufRead> TextRelationSource<R> {
    /// Wraps `reader` as a relation source called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader: Some(reader),
        }
    }
}

impl TextRelationSource<BufReader<File>> {
    /// Opens the relation file at `path`.
    ///
    /// # Errors
    /// Returns [`TextProviderError::Io`] when the file cannot be opened.
    pub fn from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextProviderError> {
        Ok(Self::new(name, open(path.as_ref())?))
    }
}

impl<R: BufRead> RelationSource for TextRelationSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn relations(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<Relation, DataSourceError>>, DataSourceError> {
        let reader = take_reader(&mut self.reader, &self.name)?;
        Ok(ParsedLines::new(reader, parse_relation_line))
    }
}
