//! String templates with embedded references.
//!
//! Stack files write references inside strings:
//!
//! ```text
//! "${GlueServiceRole.arn}"              -> Value::Ref
//! "s3://${MyGlueBucket.name}/data/"     -> Value::Template
//! "${aws.account_id}"                   -> Value::Pseudo
//! "cost $${not_a_ref}"                  -> Value::String("cost ${not_a_ref}")
//! ```

use thiserror::Error;

use crate::{LogicalId, PSEUDO_NAMESPACE, PseudoParameter, Reference, Value};

/// One piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Ref(Reference),
    Pseudo(PseudoParameter),
}

/// A string assembled from literals and values only known at apply time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// References embedded in this template.
    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Ref(r) => Some(r),
            _ => None,
        })
    }
}

/// Error raised while parsing a template string.
///
/// `offset` is the byte offset of the offending `${` within the string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated placeholder, expected '}}'")]
    Unterminated { offset: usize },

    #[error("empty placeholder '${{}}'")]
    Empty { offset: usize },

    #[error("placeholder '{placeholder}' must have the form 'resource.attribute'")]
    MissingAttribute { offset: usize, placeholder: String },

    #[error("unknown pseudo parameter 'aws.{name}'")]
    UnknownPseudo { offset: usize, name: String },

    #[error("invalid resource id '{id}' in placeholder: {reason}")]
    InvalidTarget {
        offset: usize,
        id: String,
        reason: &'static str,
    },
}

impl TemplateError {
    pub fn offset(&self) -> usize {
        match self {
            TemplateError::Unterminated { offset }
            | TemplateError::Empty { offset }
            | TemplateError::MissingAttribute { offset, .. }
            | TemplateError::UnknownPseudo { offset, .. }
            | TemplateError::InvalidTarget { offset, .. } => *offset,
        }
    }
}

/// Parse a string that may contain `${resource.attribute}` placeholders.
///
/// A string that is exactly one placeholder becomes a bare reference (or
/// pseudo parameter). A string without placeholders stays a literal.
pub fn parse_value(input: &str) -> Result<Value, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = input;
    let mut consumed = 0;

    while let Some(pos) = rest.find('$') {
        let after = &rest[pos..];

        if after.starts_with("$${") {
            literal.push_str(&rest[..pos]);
            literal.push_str("${");
            rest = &rest[pos + 3..];
            consumed += pos + 3;
            continue;
        }

        if !after.starts_with("${") {
            literal.push_str(&rest[..=pos]);
            rest = &rest[pos + 1..];
            consumed += pos + 1;
            continue;
        }

        let offset = consumed + pos;
        let close = after
            .find('}')
            .ok_or(TemplateError::Unterminated { offset })?;
        let placeholder = after[2..close].trim();

        literal.push_str(&rest[..pos]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(parse_placeholder(placeholder, offset)?);

        rest = &after[close + 1..];
        consumed = offset + close + 1;
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(collapse(segments))
}

fn parse_placeholder(placeholder: &str, offset: usize) -> Result<Segment, TemplateError> {
    if placeholder.is_empty() {
        return Err(TemplateError::Empty { offset });
    }

    let Some((target, attribute)) = placeholder.split_once('.') else {
        return Err(TemplateError::MissingAttribute {
            offset,
            placeholder: placeholder.to_string(),
        });
    };

    if attribute.is_empty() {
        return Err(TemplateError::MissingAttribute {
            offset,
            placeholder: placeholder.to_string(),
        });
    }

    if target == PSEUDO_NAMESPACE {
        return PseudoParameter::from_name(attribute)
            .map(Segment::Pseudo)
            .ok_or_else(|| TemplateError::UnknownPseudo {
                offset,
                name: attribute.to_string(),
            });
    }

    let target = LogicalId::new(target).map_err(|e| TemplateError::InvalidTarget {
        offset,
        id: e.id,
        reason: e.reason,
    })?;

    Ok(Segment::Ref(Reference::new(target, attribute)))
}

/// Turn a segment list into the simplest equivalent value.
fn collapse(mut segments: Vec<Segment>) -> Value {
    match segments.len() {
        0 => Value::String(String::new()),
        1 => match segments.remove(0) {
            Segment::Literal(s) => Value::String(s),
            Segment::Ref(r) => Value::Ref(r),
            Segment::Pseudo(p) => Value::Pseudo(p),
        },
        _ => Value::Template(Template::new(segments)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(target: &str, attribute: &str) -> Reference {
        Reference::new(LogicalId::new(target).unwrap(), attribute)
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(
            parse_value("glue.amazonaws.com").unwrap(),
            Value::String("glue.amazonaws.com".into())
        );
        assert_eq!(parse_value("").unwrap(), Value::String(String::new()));
    }

    #[test]
    fn test_whole_string_reference() {
        assert_eq!(
            parse_value("${GlueServiceRole.arn}").unwrap(),
            Value::Ref(reference("GlueServiceRole", "arn"))
        );
    }

    #[test]
    fn test_placeholder_whitespace_is_trimmed() {
        assert_eq!(
            parse_value("${ GlueDatabase.ref }").unwrap(),
            Value::Ref(reference("GlueDatabase", "ref"))
        );
    }

    #[test]
    fn test_template() {
        let value = parse_value("s3://${MyGlueBucket.name}/data/").unwrap();
        assert_eq!(
            value,
            Value::Template(Template::new(vec![
                Segment::Literal("s3://".into()),
                Segment::Ref(reference("MyGlueBucket", "name")),
                Segment::Literal("/data/".into()),
            ]))
        );
    }

    #[test]
    fn test_adjacent_placeholders() {
        let value = parse_value("${Bucket.arn}${aws.region}").unwrap();
        assert_eq!(
            value,
            Value::Template(Template::new(vec![
                Segment::Ref(reference("Bucket", "arn")),
                Segment::Pseudo(PseudoParameter::Region),
            ]))
        );
    }

    #[test]
    fn test_pseudo_parameter() {
        assert_eq!(
            parse_value("${aws.account_id}").unwrap(),
            Value::Pseudo(PseudoParameter::AccountId)
        );
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            parse_value("cost $${not_a_ref}").unwrap(),
            Value::String("cost ${not_a_ref}".into())
        );
    }

    #[test]
    fn test_lone_dollar_is_literal() {
        assert_eq!(
            parse_value("price: $5").unwrap(),
            Value::String("price: $5".into())
        );
    }

    #[test]
    fn test_unterminated() {
        let err = parse_value("s3://${Bucket.name/data").unwrap_err();
        assert_eq!(err, TemplateError::Unterminated { offset: 5 });
    }

    #[test]
    fn test_empty_placeholder() {
        let err = parse_value("a${}").unwrap_err();
        assert_eq!(err, TemplateError::Empty { offset: 1 });
    }

    #[test]
    fn test_missing_attribute() {
        assert!(matches!(
            parse_value("${Bucket}").unwrap_err(),
            TemplateError::MissingAttribute { .. }
        ));
        assert!(matches!(
            parse_value("${Bucket.}").unwrap_err(),
            TemplateError::MissingAttribute { .. }
        ));
    }

    #[test]
    fn test_unknown_pseudo() {
        let err = parse_value("${aws.account}").unwrap_err();
        assert_eq!(err.to_string(), "unknown pseudo parameter 'aws.account'");
    }

    #[test]
    fn test_invalid_target_offset_after_escape() {
        let err = parse_value("$${x} ${9bad.arn}").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidTarget { .. }));
        assert_eq!(err.offset(), 6);
    }

    #[test]
    fn test_template_references() {
        let Value::Template(template) = parse_value("${A.arn}/${B.name}/x").unwrap() else {
            panic!("expected template");
        };
        let targets: Vec<_> = template.references().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["A", "B"]);
    }
}
