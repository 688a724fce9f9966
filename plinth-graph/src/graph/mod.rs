//! The resource graph builder.

mod order;
mod resolve;

use std::collections::HashMap;

use plinth_core::{LogicalId, PolicyStatement, Properties, Reference, ResourceKind, Value};
use plinth_ir::{Manifest, ResolvedResource};
use tracing::{debug, trace};

use crate::{Error, Result};

/// A declared resource: kind, logical id and properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDeclaration {
    pub kind: ResourceKind,
    pub logical_id: LogicalId,
    pub properties: Properties,
}

impl ResourceDeclaration {
    /// Every reference in this declaration, with the top-level property it
    /// appears under.
    pub fn references(&self) -> Vec<(&str, &Reference)> {
        self.properties.references()
    }
}

/// Handle to a declared resource, returned by [`Graph::declare`].
///
/// Later declarations reference the resource through its handle instead
/// of looking it up by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    id: LogicalId,
    kind: ResourceKind,
}

impl ResourceHandle {
    pub fn id(&self) -> &LogicalId {
        &self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Reference one of this resource's output attributes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] if the kind does not export it.
    pub fn attr(&self, attribute: &str) -> Result<Reference> {
        check_attribute(&self.id, self.kind, attribute)?;
        Ok(Reference::new(self.id.clone(), attribute))
    }
}

/// Builder for a set of resource declarations.
///
/// Declarations are kept in the order they were made. [`Graph::build`]
/// checks every reference and emits the declarations in dependency order,
/// breaking ties by declaration order.
///
/// # Example
///
/// ```
/// use plinth_core::{Properties, ResourceKind};
/// use plinth_graph::Graph;
///
/// let mut graph = Graph::new();
/// let db = graph
///     .declare(
///         ResourceKind::Database,
///         "GlueDatabase",
///         Properties::new().with("database_name", "cbsgule"),
///     )
///     .unwrap();
/// graph
///     .declare(
///         ResourceKind::Table,
///         "GlueTable",
///         Properties::new().with("database_name", db.attr("ref").unwrap()),
///     )
///     .unwrap();
///
/// let manifest = graph.build().unwrap();
/// assert_eq!(manifest.order(), vec!["GlueDatabase", "GlueTable"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    declarations: Vec<ResourceDeclaration>,
    index: HashMap<LogicalId, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if the logical id is already used by a
    /// resource of any kind, [`Error::InvalidId`] if it is malformed, or
    /// [`Error::ReservedLiteral`] if a literal would be emitted like a
    /// placeholder.
    pub fn declare(
        &mut self,
        kind: ResourceKind,
        logical_id: impl AsRef<str>,
        properties: Properties,
    ) -> Result<ResourceHandle> {
        let id = LogicalId::new(logical_id.as_ref())?;

        if let Some(&existing) = self.index.get(&id) {
            return Err(Error::DuplicateId {
                id,
                kind,
                existing: self.declarations[existing].kind,
            });
        }

        for (property, value) in properties.iter() {
            check_literal(&id, property, value)?;
        }

        trace!(id = %id, kind = %kind, properties = properties.len(), "declared resource");

        self.index.insert(id.clone(), self.declarations.len());
        self.declarations.push(ResourceDeclaration {
            kind,
            logical_id: id.clone(),
            properties,
        });

        Ok(ResourceHandle { id, kind })
    }

    /// Reference an output attribute of a resource by logical id.
    ///
    /// The target does not need to be declared yet. If it is, the attribute
    /// is checked against its kind now; otherwise the check happens in
    /// [`Graph::build`].
    pub fn reference(&self, logical_id: impl AsRef<str>, attribute: &str) -> Result<Reference> {
        let id = LogicalId::new(logical_id.as_ref())?;

        if let Some(declaration) = self.get(id.as_str()) {
            check_attribute(&id, declaration.kind, attribute)?;
        }

        Ok(Reference::new(id, attribute))
    }

    /// Get the declaration a handle points at.
    pub fn declaration(&self, handle: &ResourceHandle) -> Result<&ResourceDeclaration> {
        self.position(handle).map(|i| &self.declarations[i])
    }

    /// Append a value to a list property of a declared resource.
    ///
    /// A missing property becomes a one-element list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAList`] if the property holds a non-list value,
    /// or [`Error::ReservedLiteral`] if the value would be emitted like a
    /// placeholder.
    pub fn append(
        &mut self,
        handle: &ResourceHandle,
        property: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let position = self.position(handle)?;
        let value = value.into();
        check_literal(&handle.id, property, &value)?;
        let declaration = &mut self.declarations[position];

        match declaration.properties.get_mut(property) {
            Some(Value::List(items)) => items.push(value),
            Some(_) => {
                return Err(Error::NotAList {
                    id: handle.id.clone(),
                    property: property.to_string(),
                });
            }
            None => {
                declaration
                    .properties
                    .insert(property, Value::List(vec![value]));
            }
        }

        trace!(id = %handle.id, property, "appended to list property");
        Ok(())
    }

    /// Attach an inline policy statement to a role.
    pub fn add_policy_statement(
        &mut self,
        role: &ResourceHandle,
        statement: PolicyStatement,
    ) -> Result<()> {
        if role.kind != ResourceKind::Role {
            return Err(Error::KindMismatch {
                id: role.id.clone(),
                expected: ResourceKind::Role,
                found: role.kind,
            });
        }
        self.append(role, "policy_statements", statement.into_value())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceDeclaration> {
        self.declarations.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ResourceDeclaration> {
        self.index.get(id).map(|&i| &self.declarations[i])
    }

    /// Logical ids a resource references, in order of first reference.
    pub fn dependencies(&self, id: &str) -> Vec<&LogicalId> {
        let mut targets: Vec<&LogicalId> = Vec::new();
        if let Some(declaration) = self.get(id) {
            for (_, reference) in declaration.references() {
                if !targets.contains(&&reference.target) {
                    targets.push(&reference.target);
                }
            }
        }
        targets
    }

    /// Logical ids of the resources that reference `id`, in declaration order.
    pub fn dependents(&self, id: &str) -> Vec<&LogicalId> {
        self.declarations
            .iter()
            .filter(|d| {
                d.references()
                    .iter()
                    .any(|(_, r)| r.target.as_str() == id)
            })
            .map(|d| &d.logical_id)
            .collect()
    }

    /// Check every reference and emit the declarations in dependency order.
    ///
    /// # Errors
    ///
    /// - [`Error::UnresolvedReference`] if a reference targets an undeclared id
    /// - [`Error::UnknownAttribute`] if the target's kind does not export the attribute
    /// - [`Error::CyclicReference`] if the references form a cycle
    pub fn build(&self) -> Result<Manifest> {
        debug!(resources = self.len(), "building manifest");

        let deps = self.edges()?;

        let order = order::topological_order(&deps).map_err(|cycle| Error::CyclicReference {
            path: cycle
                .into_iter()
                .map(|i| self.declarations[i].logical_id.clone())
                .collect(),
        })?;

        let resources = order
            .into_iter()
            .map(|i| {
                let declaration = &self.declarations[i];
                ResolvedResource {
                    kind: declaration.kind,
                    logical_id: declaration.logical_id.clone(),
                    depends_on: deps[i]
                        .iter()
                        .map(|&d| self.declarations[d].logical_id.clone())
                        .collect(),
                    properties: resolve::resolve_properties(&declaration.properties),
                }
            })
            .collect::<Vec<_>>();

        debug!(
            order = ?resources.iter().map(|r| r.logical_id.as_str()).collect::<Vec<_>>(),
            "resolved order"
        );

        Ok(Manifest::new(resources))
    }

    /// Direct dependencies of every declaration, sorted by declaration order.
    fn edges(&self) -> Result<Vec<Vec<usize>>> {
        self.declarations
            .iter()
            .map(|declaration| {
                let mut deps = Vec::new();

                for (property, reference) in declaration.references() {
                    let Some(&target) = self.index.get(&reference.target) else {
                        return Err(Error::UnresolvedReference {
                            from: declaration.logical_id.clone(),
                            property: property.to_string(),
                            target: reference.target.clone(),
                            attribute: reference.attribute.clone(),
                        });
                    };

                    check_attribute(
                        &reference.target,
                        self.declarations[target].kind,
                        &reference.attribute,
                    )?;

                    trace!(from = %declaration.logical_id, to = %reference, "edge");
                    deps.push(target);
                }

                deps.sort_unstable();
                deps.dedup();
                Ok(deps)
            })
            .collect()
    }

    fn position(&self, handle: &ResourceHandle) -> Result<usize> {
        match self.index.get(&handle.id) {
            Some(&i) if self.declarations[i].kind == handle.kind => Ok(i),
            _ => Err(Error::ForeignHandle {
                id: handle.id.clone(),
            }),
        }
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a ResourceDeclaration;
    type IntoIter = std::slice::Iter<'a, ResourceDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

fn check_attribute(id: &LogicalId, kind: ResourceKind, attribute: &str) -> Result<()> {
    let schema = kind.schema();
    if schema.exports(attribute) {
        Ok(())
    } else {
        Err(Error::UnknownAttribute {
            id: id.clone(),
            kind,
            attribute: attribute.to_string(),
            available: schema.attribute_list(),
        })
    }
}

fn check_literal(id: &LogicalId, property: &str, value: &Value) -> Result<()> {
    match resolve::placeholder_shape(value) {
        Some(shape) => Err(Error::ReservedLiteral {
            id: id.clone(),
            property: property.to_string(),
            shape,
        }),
        None => Ok(()),
    }
}
