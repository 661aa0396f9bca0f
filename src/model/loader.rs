//! Assignment loading functionality
//!
//! Loads assignment documents from a storage backend, handling YAML parsing
//! and orphan separation.

use super::document::{AssignmentDocument, DependencyDocument};
use crate::models::Assignment;
use crate::storage::{StorageBackend, StorageError};
use tracing::{info, warn};

/// Directory (relative to a workspace path) holding assignment documents
pub(crate) const ASSIGNMENTS_DIR: &str = "assignments";

/// Assignment loader that uses a storage backend
pub struct AssignmentLoader<B: StorageBackend> {
    storage: B,
}

/// Result of loading one assignment
#[derive(Debug)]
pub struct AssignmentLoadResult {
    pub assignment: Assignment,
    /// Dependencies skipped because they reference attributes the relation
    /// does not declare
    pub orphaned_dependencies: Vec<DependencyDocument>,
    /// Path of the document, relative to the workspace
    pub file_path: String,
}

impl<B: StorageBackend> AssignmentLoader<B> {
    /// Create a new assignment loader with the given storage backend
    pub fn new(storage: B) -> Self {
        Self { storage }
    }

    /// Load a single assignment document.
    ///
    /// `file_name` is resolved inside the workspace's `assignments/`
    /// directory.
    pub async fn load_assignment(
        &self,
        workspace_path: &str,
        file_name: &str,
    ) -> Result<AssignmentLoadResult, StorageError> {
        let file_path = format!("{}/{}/{}", workspace_path, ASSIGNMENTS_DIR, file_name);
        let content = self.storage.read_file(&file_path).await?;
        let yaml = String::from_utf8(content)
            .map_err(|e| StorageError::SerializationError(format!("Invalid UTF-8: {}", e)))?;

        let document = AssignmentDocument::from_yaml(&yaml).map_err(|e| {
            StorageError::SerializationError(format!("Failed to parse assignment: {}", e))
        })?;

        let conversion = document.into_assignment().map_err(|e| {
            StorageError::SerializationError(format!("Invalid assignment document: {}", e))
        })?;

        for orphan in &conversion.orphaned_dependencies {
            warn!(
                "Orphaned dependency in {}: {:?} -> {:?} references undeclared attributes",
                file_path, orphan.lhs, orphan.rhs
            );
        }

        let relative_path = format!("{}/{}", ASSIGNMENTS_DIR, file_name);
        Ok(AssignmentLoadResult {
            assignment: conversion.assignment,
            orphaned_dependencies: conversion.orphaned_dependencies,
            file_path: relative_path,
        })
    }

    /// Load every assignment document in the workspace.
    ///
    /// Documents that fail to parse are skipped with a warning so one broken
    /// file does not take the whole workspace down.
    pub async fn load_all_assignments(
        &self,
        workspace_path: &str,
    ) -> Result<Vec<AssignmentLoadResult>, StorageError> {
        let assignments_dir = format!("{}/{}", workspace_path, ASSIGNMENTS_DIR);

        if !self.storage.dir_exists(&assignments_dir).await? {
            self.storage.create_dir(&assignments_dir).await?;
        }

        let mut results = Vec::new();
        let files = self.storage.list_files(&assignments_dir).await?;
        for file_name in files {
            if file_name.ends_with(".yaml") || file_name.ends_with(".yml") {
                match self.load_assignment(workspace_path, &file_name).await {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        warn!("Failed to load assignment from {}: {}", file_name, e);
                    }
                }
            }
        }

        info!(
            "Loaded {} assignments from workspace {}",
            results.len(),
            workspace_path
        );
        Ok(results)
    }
}
