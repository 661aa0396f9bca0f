//! Assignment model
//!
//! An assignment is one exercise handed to students: a relation schema plus
//! the functional dependencies that hold on it.

use super::collection::FDCollection;
use super::relation::Relation;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Assignment {
    id: Uuid,
    name: String,
    relation: Relation,
    dependencies: FDCollection,
    modified_on: DateTime<Utc>,
}

impl Assignment {
    /// Create an assignment from its relation and given dependencies
    pub fn new(name: impl Into<String>, relation: Relation, dependencies: FDCollection) -> Self {
        let name = name.into();
        let id = Self::generate_id(&name);
        Self {
            id,
            name,
            relation,
            dependencies,
            modified_on: Utc::now(),
        }
    }

    /// Deterministic UUID v5 for an assignment name
    pub fn generate_id(name: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("assignment:{}", name).as_bytes())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn dependencies(&self) -> &FDCollection {
        &self.dependencies
    }

    pub fn modified_on(&self) -> DateTime<Utc> {
        self.modified_on
    }

    /// Replace the dependency collection (e.g. after an editing session) and
    /// refresh the modification timestamp
    pub fn set_dependencies(&mut self, dependencies: FDCollection) {
        self.dependencies = dependencies;
        self.touch();
    }

    /// Refresh the modification timestamp
    pub fn touch(&mut self) {
        self.modified_on = Utc::now();
    }

    /// Carry over a stored modification timestamp (used when rebuilding
    /// from a document)
    pub fn with_modified_on(mut self, modified_on: DateTime<Utc>) -> Self {
        self.modified_on = modified_on;
        self
    }
}
