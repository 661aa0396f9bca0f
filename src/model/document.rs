//! Assignment document types
//!
//! The serialized form of an assignment: plain serde structs, convertible to
//! and from the domain model. Conversion into the domain rebuilds the shared
//! attribute registry from the relation schema, validates dependency sides,
//! and separates orphaned dependencies (ones referencing attributes the
//! relation does not declare) from well-formed ones.

use crate::models::{
    Assignment, AttributeRegistry, AttributeSet, FDCollection, FunctionalDependency, Relation,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error converting a document into the domain model
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("assignment name must not be empty")]
    EmptyName,
    #[error("relation '{0}' declares no attributes")]
    EmptyRelation(String),
    #[error("dependency {index} has an empty {side} side")]
    EmptySide { index: usize, side: &'static str },
}

/// Serialized assignment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignmentDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub relation: RelationDocument,
    #[serde(default)]
    pub dependencies: Vec<DependencyDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Serialized relation schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationDocument {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// Serialized functional dependency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DependencyDocument {
    pub lhs: Vec<String>,
    pub rhs: Vec<String>,
}

/// Outcome of converting a document into the domain model
#[derive(Debug)]
pub struct AssignmentConversion {
    pub assignment: Assignment,
    /// Dependencies referencing attributes the relation does not declare.
    /// Reported, never silently dropped.
    pub orphaned_dependencies: Vec<DependencyDocument>,
}

impl AssignmentDocument {
    /// Parse a document from YAML text (the on-disk form)
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Render the document as YAML text
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Parse a document from JSON text (the wire form used by hosts that
    /// exchange assignments with a service)
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Render the document as JSON text
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize an assignment into its document form
    pub fn from_assignment(assignment: &Assignment) -> Self {
        Self {
            id: Some(assignment.id()),
            name: assignment.name().to_string(),
            relation: RelationDocument {
                name: assignment.relation().name().to_string(),
                attributes: assignment
                    .relation()
                    .attribute_names()
                    .map(str::to_string)
                    .collect(),
            },
            dependencies: assignment
                .dependencies()
                .entries_in_order()
                .map(|fd| DependencyDocument {
                    lhs: fd.lhs().names_in_order().map(str::to_string).collect(),
                    rhs: fd.rhs().names_in_order().map(str::to_string).collect(),
                })
                .collect(),
            modified_on: Some(assignment.modified_on()),
        }
    }

    /// Rebuild the domain model from a document.
    ///
    /// A dependency side that normalizes to nothing fails the whole
    /// conversion; a dependency referencing undeclared attributes is
    /// reported as orphaned instead.
    pub fn into_assignment(self) -> Result<AssignmentConversion, DocumentError> {
        if self.name.trim().is_empty() {
            return Err(DocumentError::EmptyName);
        }

        let registry = AttributeRegistry::new();
        let mut relation = Relation::new(registry.clone(), self.relation.name.clone());
        relation.add_attributes(&self.relation.attributes);
        if relation.attributes().is_empty() {
            return Err(DocumentError::EmptyRelation(self.relation.name));
        }

        let mut dependencies = FDCollection::new();
        let mut orphaned = Vec::new();
        for (index, doc) in self.dependencies.into_iter().enumerate() {
            let lhs = AttributeSet::from_names(&doc.lhs);
            let rhs = AttributeSet::from_names(&doc.rhs);
            if lhs.is_empty() {
                return Err(DocumentError::EmptySide { index, side: "left" });
            }
            if rhs.is_empty() {
                return Err(DocumentError::EmptySide {
                    index,
                    side: "right",
                });
            }

            if is_orphaned(&relation, &lhs) || is_orphaned(&relation, &rhs) {
                orphaned.push(doc);
                continue;
            }

            dependencies.add(FunctionalDependency::new(registry.clone(), lhs, rhs));
        }

        let mut assignment = Assignment::new(self.name, relation, dependencies);
        if let Some(modified_on) = self.modified_on {
            assignment = assignment.with_modified_on(modified_on);
        }

        Ok(AssignmentConversion {
            assignment,
            orphaned_dependencies: orphaned,
        })
    }
}

/// Whether any name of `side` is missing from the relation schema. Matching
/// goes through the registry so spelling differences do not count as
/// missing.
fn is_orphaned(relation: &Relation, side: &AttributeSet) -> bool {
    side.names_in_order().any(|name| {
        match relation.registry().lookup(name) {
            Some(canonical) => !relation.attributes().contains(&canonical),
            None => true,
        }
    })
}
