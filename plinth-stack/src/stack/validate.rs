//! Validation context and utilities for stack parsing.

use std::sync::Arc;

use indexmap::IndexMap;
use miette::SourceSpan;
use plinth_core::{LogicalId, Properties, Value, parse_value};

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the stack, making it easier to pass validation context through
/// recursive operations.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "stack.toml");
/// let id = ctx.validate_id("GlueCrawler")?;
///
/// // For nested values
/// let nested = ctx.push("GlueCrawler").push("targets");
/// assert_eq!(nested.path_string(), "GlueCrawler.targets");
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["GlueCrawler", "targets"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Validate a logical id, pointing at its declaration on failure.
    pub fn validate_id(&self, id: &str) -> Result<LogicalId> {
        LogicalId::new(id).map_err(|e| {
            self.source
                .invalid_id_error(id, e.reason, find_id_span(self.src(), id))
        })
    }

    /// Parse every property of a resource, turning `${...}` strings into
    /// references.
    ///
    /// The context path must start with the resource id.
    pub fn lower_properties(&self, properties: &IndexMap<String, toml::Value>) -> Result<Properties> {
        properties
            .iter()
            .map(|(name, value)| Ok((name.clone(), self.lower_value(name, value)?)))
            .collect()
    }

    fn lower_value(&self, property: &str, value: &toml::Value) -> Result<Value> {
        Ok(match value {
            toml::Value::String(s) => parse_value(s).map_err(|e| {
                let resource = self.path.first().copied().unwrap_or_default();
                let from = find_id_span(self.src(), resource).map_or(0, |span| span.offset());
                let span = find_string_span(self.src(), s, from)
                    .map(|start| SourceSpan::from((start + e.offset(), 2)));
                self.source.template_error(resource, property, e, span)
            })?,
            toml::Value::Integer(i) => Value::Integer(*i),
            toml::Value::Float(f) => Value::Float(*f),
            toml::Value::Boolean(b) => Value::Bool(*b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(items) => Value::List(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.lower_value(&format!("{}[{}]", property, i), item))
                    .collect::<Result<_>>()?,
            ),
            toml::Value::Table(table) => Value::Map(
                table
                    .iter()
                    .map(|(key, item)| {
                        let path = format!("{}.{}", property, key);
                        Ok((key.clone(), self.lower_value(&path, item)?))
                    })
                    .collect::<Result<_>>()?,
            ),
        })
    }
}

/// Find where a resource id is declared in the TOML source.
///
/// Searches, in order: `[resources.<id>]` headers, `[resources.<id>.`
/// sub-table headers, `id = "<id>"` in array format, and inline tables.
pub(crate) fn find_id_span(src: &str, id: &str) -> Option<SourceSpan> {
    let header_patterns = [format!("[resources.{}]", id), format!("[resources.{}.", id)];
    for pattern in &header_patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            // skip "[resources."
            let start = pos + "[resources.".len();
            return Some(SourceSpan::from((start, id.len())));
        }
    }

    if let Some(span) = find_id_assignments(src, id).into_iter().next() {
        return Some(span);
    }

    // Inline tables: resources = { <id> = { ... } }
    let inline_patterns = [
        (format!("{{ {} ", id), 2usize),
        (format!("{{{} ", id), 1usize),
        (format!(", {} ", id), 2usize),
    ];
    for (pattern, skip) in &inline_patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            return Some(SourceSpan::from((pos + skip, id.len())));
        }
    }

    None
}

/// Find every `id = "<id>"` assignment (array format), in source order.
pub(crate) fn find_id_assignments(src: &str, id: &str) -> Vec<SourceSpan> {
    let mut spans: Vec<SourceSpan> = [format!("id = \"{}\"", id), format!("id = '{}'", id)]
        .iter()
        .flat_map(|pattern| {
            src.match_indices(pattern.as_str())
                // only match a whole `id` key, not `bucket_id = ...`
                .filter(|(pos, _)| *pos == 0 || !is_key_char(src.as_bytes()[pos - 1]))
                .map(|(pos, _)| SourceSpan::from((pos + "id = \"".len(), id.len())))
                .collect::<Vec<_>>()
        })
        .collect();
    spans.sort_by_key(|span| span.offset());
    spans
}

/// Find where the content of a string literal starts in the source,
/// searching from byte offset `from`.
pub(crate) fn find_string_span(src: &str, value: &str, from: usize) -> Option<usize> {
    let rest = src.get(from..)?;
    rest.find(&format!("\"{}\"", value))
        .or_else(|| rest.find(&format!("'{}'", value)))
        .map(|pos| from + pos + 1)
}

/// Find the span of a `key = "value"` pair's value.
pub(crate) fn find_value_span(src: &str, key: &str, value: &str) -> Option<SourceSpan> {
    let pattern = format!("{} = \"{}\"", key, value);
    src.find(&pattern).map(|pos| {
        let start = pos + key.len() + " = ".len();
        SourceSpan::from((start, value.len() + 2))
    })
}

fn is_key_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_id_span_header() {
        let src = "[resources.GlueJob]\nkind = \"job\"";
        let span = find_id_span(src, "GlueJob").unwrap();
        assert_eq!(span.offset(), 11);
        assert_eq!(span.len(), 7);
    }

    #[test]
    fn test_find_id_span_subtable_header() {
        let src = "[resources.GlueJob.properties]\nname = \"x\"";
        let span = find_id_span(src, "GlueJob").unwrap();
        assert_eq!(span.offset(), 11);
    }

    #[test]
    fn test_find_id_span_does_not_match_prefix() {
        // `[resources.Glue]` must not match `[resources.GlueJob]`
        let src = "[resources.GlueJob]\nkind = \"job\"";
        assert!(find_id_span(src, "Glue").is_none());
    }

    #[test]
    fn test_find_id_span_array_format() {
        let src = "[[resources]]\nid = \"Bucket\"\nkind = \"bucket\"";
        let span = find_id_span(src, "Bucket").unwrap();
        assert_eq!(span.offset(), 20);
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn test_find_id_assignments_ignores_other_keys() {
        let src = "catalog_id = \"Bucket\"\nid = \"Bucket\"";
        let spans = find_id_assignments(src, "Bucket");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].offset(), 28);
    }

    #[test]
    fn test_find_id_assignments_multiple() {
        let src = "id = \"A\"\nkind = \"bucket\"\nid = 'A'";
        let spans = find_id_assignments(src, "A");
        assert_eq!(spans.len(), 2);
        assert!(spans[0].offset() < spans[1].offset());
    }

    #[test]
    fn test_find_string_span() {
        let src = "path = \"s3://${Bucket.name}/data/\"";
        assert_eq!(find_string_span(src, "s3://${Bucket.name}/data/", 0), Some(8));
        assert_eq!(find_string_span(src, "missing", 0), None);
    }

    #[test]
    fn test_find_string_span_from_offset() {
        let src = "a = \"x\"\nb = \"x\"";
        assert_eq!(find_string_span(src, "x", 0), Some(5));
        assert_eq!(find_string_span(src, "x", 6), Some(13));
        assert_eq!(find_string_span(src, "x", 100), None);
    }

    #[test]
    fn test_find_value_span() {
        let src = "[stack]\nname = \"\"";
        let span = find_value_span(src, "name", "").unwrap();
        assert_eq!(span.offset(), 15);
        assert_eq!(span.len(), 2);
    }

    // ========================================================================
    // ParseContext tests
    // ========================================================================

    #[test]
    fn test_parse_context_new() {
        let ctx = ParseContext::new("content", "stack.toml");
        assert_eq!(ctx.src(), "content");
        assert_eq!(ctx.filename(), "stack.toml");
        assert_eq!(ctx.path_string(), "");
    }

    #[test]
    fn test_parse_context_push() {
        let ctx = ParseContext::new("", "stack.toml");
        let nested = ctx.push("GlueCrawler").push("targets");
        assert_eq!(nested.path_string(), "GlueCrawler.targets");
    }

    #[test]
    fn test_validate_id_error_has_span() {
        let src = "[resources.9lives]\nkind = \"bucket\"";
        let ctx = ParseContext::new(src, "stack.toml");
        let err = ctx.validate_id("9lives").unwrap_err();
        assert!(err.to_string().contains("invalid logical id '9lives'"));
        match *err {
            crate::Error::InvalidLogicalId { span, .. } => {
                assert_eq!(span.map(|s| s.offset()), Some(11));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lower_properties_parses_nested_templates() {
        let table: toml::Table = toml::from_str(
            r#"
            role = "${Role.arn}"
            targets = { s3_targets = [{ path = "s3://${Bucket.name}/data/" }] }
            retries = 0
            "#,
        )
        .unwrap();
        let properties: IndexMap<String, toml::Value> = table.into_iter().collect();

        let ctx = ParseContext::new("", "stack.toml");
        let lowered = ctx.push("Crawler").lower_properties(&properties).unwrap();

        let targets: Vec<_> = lowered
            .references()
            .into_iter()
            .map(|(prop, r)| (prop, r.to_string()))
            .collect();
        assert_eq!(
            targets,
            vec![
                ("role", "Role.arn".to_string()),
                ("targets", "Bucket.name".to_string())
            ]
        );
        assert_eq!(lowered.get("retries"), Some(&Value::Integer(0)));
    }

    #[test]
    fn test_lower_properties_reports_nested_path() {
        let src = r#"targets = { s3_targets = [{ path = "s3://${Bucket}/data/" }] }"#;
        let table: toml::Table = toml::from_str(src).unwrap();
        let properties: IndexMap<String, toml::Value> = table.into_iter().collect();

        let ctx = ParseContext::new(src, "stack.toml");
        let err = ctx.push("Crawler").lower_properties(&properties).unwrap_err();

        match *err {
            crate::Error::MalformedTemplate {
                resource,
                property,
                span,
                ..
            } => {
                assert_eq!(resource, "Crawler");
                assert_eq!(property, "targets.s3_targets[0].path");
                // points at the `${` inside the string
                let offset = span.unwrap().offset();
                assert_eq!(&src[offset..offset + 2], "${");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
