//! Relation model

use super::attribute::AttributeRegistry;
use super::attribute_set::AttributeSet;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A relation schema: a named set of attributes in the modeled design
/// exercise.
#[derive(Debug, Clone)]
pub struct Relation {
    id: Uuid,
    name: String,
    registry: AttributeRegistry,
    attributes: AttributeSet,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Relation {
    /// Create an empty relation drawing its attribute names from `registry`
    pub fn new(registry: AttributeRegistry, name: impl Into<String>) -> Self {
        let name = name.into();
        let now = Utc::now();
        // Deterministic UUID v5 based on the relation name (no randomness
        // needed, same name yields the same id)
        let id = Self::generate_id(&name);
        Self {
            id,
            name,
            registry,
            attributes: AttributeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate the deterministic UUID v5 for a relation name
    pub fn generate_id(name: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
    }

    /// Add one attribute to the schema; idempotent.
    ///
    /// The name passes through the session registry before landing in the
    /// set. Returns `true` when the attribute was appended.
    pub fn add_attribute(&mut self, name: &str) -> bool {
        match self.registry.resolve(name) {
            Some(canonical) => {
                let added = self.attributes.add(&canonical);
                if added {
                    self.updated_at = Utc::now();
                }
                added
            }
            None => false,
        }
    }

    /// Add several attributes in order
    pub fn add_attributes<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_attribute(name.as_ref());
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Attribute names in schema order, as consumed by the editor when a
    /// whole relation is dropped onto it
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.names_in_order()
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
