//! Stack parsing from files and strings.

use std::{collections::HashSet, path::Path, str::FromStr};

use super::{
    RawStack, ResourceEntry, Stack,
    validate::{ParseContext, find_id_assignments, find_value_span},
};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Stack {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_stack(s, "stack.toml")
    }
}

impl Stack {
    /// Parse a stack.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_stack(&content, &path.display().to_string())
    }

    /// Parse a stack.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_stack(content, filename)
    }
}

/// Parse a stack from content with the given filename for error reporting.
pub fn parse_stack(content: &str, filename: &str) -> Result<Stack> {
    let source_ctx = SourceContext::new(content, filename);
    let raw: RawStack = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    lower_stack(raw, content, filename)
}

/// Validate the raw stack and parse its property strings.
fn lower_stack(raw: RawStack, src: &str, filename: &str) -> Result<Stack> {
    let ctx = ParseContext::new(src, filename);

    if raw.stack.name.trim().is_empty() {
        return Err(ctx.source_context().validation_error_at(
            "stack name cannot be empty",
            find_value_span(src, "name", &raw.stack.name),
        ));
    }

    check_duplicate_ids(&raw, &ctx)?;

    let mut resources = Vec::with_capacity(raw.resources.len());
    for resource in &raw.resources {
        let id = ctx.validate_id(&resource.id)?;
        let properties = ctx
            .push(&resource.id)
            .lower_properties(&resource.properties)?;

        resources.push(ResourceEntry {
            id,
            kind: resource.kind,
            properties,
        });
    }

    Ok(Stack {
        meta: raw.stack,
        resources,
    })
}

/// Reject ids declared twice (only possible in array format).
fn check_duplicate_ids(raw: &RawStack, ctx: &ParseContext<'_>) -> Result<()> {
    let mut seen = HashSet::new();

    for resource in &raw.resources {
        if seen.insert(resource.id.as_str()) {
            continue;
        }

        let spans = find_id_assignments(ctx.src(), &resource.id);
        return Err(match spans.as_slice() {
            [first, second, ..] => {
                ctx.source_context()
                    .duplicate_id_error(&resource.id, *first, *second)
            }
            _ => ctx.source_context().validation_error_at(
                format!("duplicate logical id '{}'", resource.id),
                spans.first().copied(),
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use plinth_core::{PseudoParameter, ResourceKind, Value};

    use super::*;

    #[test]
    fn test_parse_minimal() {
        let stack: Stack = r#"
            [stack]
            name = "GlueStack"
        "#
        .parse()
        .unwrap();

        assert_eq!(stack.meta.name, "GlueStack");
        assert!(stack.meta.description.is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_parse_resources_and_references() {
        let stack: Stack = r#"
            [stack]
            name = "GlueStack"
            description = "catalog"

            [resources.GlueDatabase]
            kind = "database"

            [resources.GlueDatabase.properties]
            catalog_id = "${aws.account_id}"
            database_name = "cbsgule"

            [resources.GlueCrawler]
            kind = "crawler"

            [resources.GlueCrawler.properties]
            database_name = "${GlueDatabase.ref}"
        "#
        .parse()
        .unwrap();

        assert_eq!(stack.len(), 2);
        assert!(stack.has_resource("GlueCrawler"));
        assert!(!stack.has_resource("GlueJob"));

        let db = stack.get("GlueDatabase").unwrap();
        assert_eq!(db.kind, ResourceKind::Database);
        assert_eq!(
            db.properties.get("catalog_id"),
            Some(&Value::Pseudo(PseudoParameter::AccountId))
        );

        let crawler = stack.get("GlueCrawler").unwrap();
        let refs = crawler.properties.references();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].1.to_string(), "GlueDatabase.ref");
    }

    #[test]
    fn test_kind_counts() {
        let stack: Stack = r#"
            [stack]
            name = "s"

            [[resources]]
            id = "A"
            kind = "stage"

            [[resources]]
            id = "B"
            kind = "action"

            [[resources]]
            id = "C"
            kind = "stage"
        "#
        .parse()
        .unwrap();

        assert_eq!(
            stack.kind_counts(),
            vec![(ResourceKind::Stage, 2), (ResourceKind::Action, 1)]
        );
    }

    #[test]
    fn test_missing_stack_table() {
        let err = Stack::from_str("[resources.A]\nkind = \"bucket\"").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_empty_stack_name() {
        let err = Stack::from_str("[stack]\nname = \"\"").unwrap_err();
        assert!(err.to_string().contains("stack name cannot be empty"));
    }

    #[test]
    fn test_unknown_kind_has_span() {
        let src = "[stack]\nname = \"s\"\n\n[resources.Queue]\nkind = \"queue\"\n";
        let err = Stack::from_str(src).unwrap_err();
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_id() {
        let err = Stack::from_str(
            r#"
            [stack]
            name = "s"

            [resources.my-bucket-]
            kind = "bucket"
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, Error::InvalidLogicalId { .. }));
    }

    #[test]
    fn test_duplicate_id_in_array_format() {
        let err = Stack::from_str(
            r#"
            [stack]
            name = "s"

            [[resources]]
            id = "Bucket"
            kind = "bucket"

            [[resources]]
            id = "Bucket"
            kind = "role"
            "#,
        )
        .unwrap_err();

        match *err {
            Error::DuplicateId {
                id,
                first_span,
                second_span,
                ..
            } => {
                assert_eq!(id, "Bucket");
                assert!(first_span.offset() < second_span.offset());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_template() {
        let err = Stack::from_str(
            r#"
            [stack]
            name = "s"

            [resources.Crawler]
            kind = "crawler"

            [resources.Crawler.properties]
            role = "${Role.arn"
            "#,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "malformed reference in 'Crawler.role'");
    }

    #[test]
    fn test_malformed_template_label_skips_earlier_text() {
        let src = r#"
[stack]
name = "s"
description = "${Role.arn"

[resources.Job]
kind = "job"
[resources.Job.properties]
# was: role = "${Role.arn"
name = "etl"

[resources.Crawler]
kind = "crawler"
[resources.Crawler.properties]
role = "${Role.arn"
"#;
        let err = Stack::from_str(src).unwrap_err();

        match *err {
            Error::MalformedTemplate { resource, span, .. } => {
                assert_eq!(resource, "Crawler");
                let offset = span.unwrap().offset();
                assert!(offset > src.find("[resources.Crawler]").unwrap());
                assert_eq!(&src[offset..offset + 2], "${");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_file_missing() {
        let err = Stack::from_file("/nonexistent/stack.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
