//! Parsers for single vertex and relation lines.

use tessera_core::{ElementId, Relation};

use crate::errors::TextProviderError;

fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

fn parse_id(token: &str, line: usize) -> Result<ElementId, TextProviderError> {
    token
        .parse::<i64>()
        .map(ElementId::new)
        .map_err(|source| TextProviderError::InvalidId {
            line,
            token: token.to_owned(),
            source,
        })
}

/// Parses one line of a vertex file.
///
/// Returns `Ok(None)` for blank and comment lines. `line` is the 1-based line
/// number used in error reports.
///
/// # Errors
/// Returns [`TextProviderError::InvalidId`] when the line is not an integer.
///
/// # Examples
/// ```
/// use tessera_core::ElementId;
/// use tessera_providers_text::parse_vertex_line;
///
/// assert_eq!(parse_vertex_line("  42 ", 1)?, Some(ElementId::new(42)));
/// assert_eq!(parse_vertex_line("# header", 2)?, None);
/// # Ok::<(), tessera_providers_text::TextProviderError>(())
/// ```
pub fn parse_vertex_line(raw: &str, line: usize) -> Result<Option<ElementId>, TextProviderError> {
    let trimmed = raw.trim();
    if is_skipped(trimmed) {
        return Ok(None);
    }
    parse_id(trimmed, line).map(Some)
}

/// Parses one line of a relation file.
///
/// The source id is separated from the related ids by a colon or by
/// whitespace. Related ids are separated by commas, whitespace, or both, and
/// may be absent.
///
/// # Errors
/// Returns [`TextProviderError::InvalidId`] for a non-integer token and
/// [`TextProviderError::MissingSource`] for a line such as `: 1 2`.
///
/// # Examples
/// ```
/// use tessera_providers_text::parse_relation_line;
///
/// let relation = parse_relation_line("3: 4, 7 1", 1)?.expect("not a comment");
/// assert_eq!(relation.source().get(), 3);
/// assert_eq!(relation.related().len(), 3);
/// # Ok::<(), tessera_providers_text::TextProviderError>(())
/// ```
pub fn parse_relation_line(raw: &str, line: usize) -> Result<Option<Relation>, TextProviderError> {
    let trimmed = raw.trim();
    if is_skipped(trimmed) {
        return Ok(None);
    }
    let (source, rest) = trimmed
        .split_once(':')
        .or_else(|| trimmed.split_once(char::is_whitespace))
        .unwrap_or((trimmed, ""));
    let source = source.trim();
    if source.is_empty() {
        return Err(TextProviderError::MissingSource { line });
    }
    let source = parse_id(source, line)?;
    let related = rest
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| parse_id(token, line))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(Relation::new(source, related)))
}
