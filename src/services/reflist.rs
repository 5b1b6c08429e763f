//! Reference list parsing
//!
//! Issue rows carry their member article ids as a single denormalized string
//! field, written by different ingestion generations as either a JSON array
//! (`["a","b"]`) or a comma-joined list (`a, b, c`). Parsing never fails:
//! a malformed JSON payload degrades to comma splitting, and anything else
//! degrades to an empty list.

use serde_json::Value;

/// Which strategy produced the parsed ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefListSource {
    /// Input was a well-formed JSON array of strings
    Json,
    /// Input was split on commas (including the JSON-failure fallback)
    CommaSeparated,
    /// Input was null, empty, or whitespace-only
    Empty,
}

/// Result of the two-stage reference list parse
///
/// The source tag exists so callers can branch on the encoding explicitly
/// instead of re-probing the raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRefList {
    /// Ordered, trimmed, non-empty member ids
    pub ids: Vec<String>,
    /// Strategy that produced them
    pub source: RefListSource,
}

/// Parse a denormalized reference list field
///
/// Stage one attempts a JSON-array parse; anything that is not an array of
/// strings falls through to stage two, comma splitting. Segments are trimmed
/// at their boundaries only and empty segments (trailing commas, doubled
/// commas) are dropped.
pub fn parse_ref_list(raw: Option<&str>) -> ParsedRefList {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => {
            return ParsedRefList {
                ids: Vec::new(),
                source: RefListSource::Empty,
            }
        }
    };

    if let Some(ids) = try_json_array(raw) {
        return ParsedRefList {
            ids,
            source: RefListSource::Json,
        };
    }

    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    ParsedRefList {
        ids,
        source: RefListSource::CommaSeparated,
    }
}

/// Convenience wrapper returning only the ordered ids
pub fn parse_ids(raw: Option<&str>) -> Vec<String> {
    parse_ref_list(raw).ids
}

/// Stage one: accept only a JSON array whose elements are all strings
fn try_json_array(raw: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(raw.trim()).ok()?;
    let items = value.as_array()?;
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        let s = item.as_str()?;
        let s = s.trim();
        if !s.is_empty() {
            ids.push(s.to_string());
        }
    }
    Some(ids)
}
