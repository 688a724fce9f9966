use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Value;

/// Whether a policy statement grants or denies its actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Effect {
    #[default]
    Allow,
    Deny,
}

impl Effect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::Allow => "Allow",
            Effect::Deny => "Deny",
        }
    }
}

/// An inline policy statement attached to a role.
///
/// Resources may reference other declarations (`bucket.arn`), so they are
/// values rather than plain strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyStatement {
    pub effect: Effect,
    pub actions: Vec<String>,
    pub resources: Vec<Value>,
}

impl PolicyStatement {
    pub fn allow() -> Self {
        Self::default()
    }

    pub fn deny() -> Self {
        Self {
            effect: Effect::Deny,
            ..Self::default()
        }
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions.extend(actions.into_iter().map(Into::into));
        self
    }

    pub fn resource(mut self, resource: impl Into<Value>) -> Self {
        self.resources.push(resource.into());
        self
    }

    /// Convert into the map shape stored under `policy_statements`.
    pub fn into_value(self) -> Value {
        let mut entries = IndexMap::new();
        entries.insert("effect".to_string(), Value::from(self.effect.as_str()));
        entries.insert("actions".to_string(), Value::from(self.actions));
        entries.insert("resources".to_string(), Value::List(self.resources));
        Value::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogicalId, Reference};

    #[test]
    fn test_into_value_shape() {
        let bucket_arn = Reference::new(LogicalId::new("Bucket").unwrap(), "arn");
        let value = PolicyStatement::allow()
            .actions(["s3:GetObject", "s3:ListBucket"])
            .resource(bucket_arn.clone())
            .into_value();

        let Value::Map(entries) = &value else {
            panic!("expected map");
        };
        assert_eq!(entries.get("effect"), Some(&Value::from("Allow")));
        assert_eq!(
            entries.keys().collect::<Vec<_>>(),
            vec!["effect", "actions", "resources"]
        );
        assert_eq!(value.references(), vec![&bucket_arn]);
    }

    #[test]
    fn test_deny() {
        let statement = PolicyStatement::deny().action("glue:*");
        assert_eq!(statement.effect, Effect::Deny);
        assert_eq!(statement.actions, vec!["glue:*".to_string()]);
    }
}
