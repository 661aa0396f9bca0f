//! Dependency validation functionality
//!
//! Validates a relation's dependency collection for undeclared attributes,
//! duplicate entries, and trivial dependencies. Validation only reports;
//! it never mutates the collection.

use crate::models::{FDCollection, FunctionalDependency, Relation};
use anyhow::Result;

/// Result of validating a dependency collection against its relation
#[derive(Debug)]
pub struct DependencyValidationResult {
    /// Attribute references with no counterpart in the relation schema
    pub undeclared_attributes: Vec<UndeclaredAttribute>,
    /// Structurally identical entries appearing more than once
    pub duplicates: Vec<DuplicateDependency>,
    /// Entries whose RHS is contained in their LHS
    pub trivial: Vec<TrivialDependency>,
}

impl DependencyValidationResult {
    pub fn is_clean(&self) -> bool {
        self.undeclared_attributes.is_empty()
            && self.duplicates.is_empty()
            && self.trivial.is_empty()
    }
}

/// An attribute referenced by a dependency but missing from the relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndeclaredAttribute {
    pub dependency_index: usize,
    pub attribute: String,
}

/// A dependency structurally identical to an earlier entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateDependency {
    pub first_index: usize,
    pub duplicate_index: usize,
}

/// A dependency whose RHS adds nothing over its LHS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrivialDependency {
    pub dependency_index: usize,
    pub rendered: String,
}

/// Error during dependency validation
#[derive(Debug, thiserror::Error)]
pub enum DependencyValidationError {
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Dependency validator
pub struct DependencyValidator;

impl DependencyValidator {
    /// Create a new dependency validator
    pub fn new() -> Self {
        Self
    }

    /// Run every check against the collection
    pub fn validate(
        &self,
        relation: &Relation,
        dependencies: &FDCollection,
    ) -> DependencyValidationResult {
        DependencyValidationResult {
            undeclared_attributes: self.find_undeclared_attributes(relation, dependencies),
            duplicates: self.find_duplicates(dependencies),
            trivial: self.find_trivial(dependencies),
        }
    }

    /// Find attribute references with no counterpart in the relation schema
    pub fn find_undeclared_attributes(
        &self,
        relation: &Relation,
        dependencies: &FDCollection,
    ) -> Vec<UndeclaredAttribute> {
        let mut findings = Vec::new();
        for (index, fd) in dependencies.entries_in_order().enumerate() {
            for name in fd.lhs().names_in_order().chain(fd.rhs().names_in_order()) {
                let declared = relation.attributes().contains(name);
                if !declared {
                    findings.push(UndeclaredAttribute {
                        dependency_index: index,
                        attribute: name.to_string(),
                    });
                }
            }
        }
        findings
    }

    /// Find entries structurally identical to an earlier entry.
    ///
    /// The collection permits duplicates; callers that care ask here.
    pub fn find_duplicates(&self, dependencies: &FDCollection) -> Vec<DuplicateDependency> {
        let entries: Vec<&FunctionalDependency> = dependencies.entries_in_order().collect();
        let mut findings = Vec::new();
        for (index, fd) in entries.iter().enumerate() {
            if let Some(first) = entries[..index].iter().position(|earlier| *earlier == *fd) {
                findings.push(DuplicateDependency {
                    first_index: first,
                    duplicate_index: index,
                });
            }
        }
        findings
    }

    /// Find entries whose RHS is contained in their LHS
    pub fn find_trivial(&self, dependencies: &FDCollection) -> Vec<TrivialDependency> {
        dependencies
            .entries_in_order()
            .enumerate()
            .filter(|(_, fd)| fd.is_trivial())
            .map(|(index, fd)| TrivialDependency {
                dependency_index: index,
                rendered: fd.to_string(),
            })
            .collect()
    }

    /// Check a single dependency against the relation schema
    pub fn validate_dependency(
        &self,
        relation: &Relation,
        fd: &FunctionalDependency,
    ) -> Result<(), DependencyValidationError> {
        for name in fd.lhs().names_in_order().chain(fd.rhs().names_in_order()) {
            if !relation.attributes().contains(name) {
                return Err(DependencyValidationError::ValidationError(format!(
                    "attribute '{}' is not declared by relation '{}'",
                    name,
                    relation.name()
                )));
            }
        }
        Ok(())
    }
}

impl Default for DependencyValidator {
    fn default() -> Self {
        Self::new()
    }
}
