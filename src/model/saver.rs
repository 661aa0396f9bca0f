//! Assignment saving functionality
//!
//! Saves assignment documents to a storage backend, handling YAML
//! serialization.

use super::document::AssignmentDocument;
use super::loader::ASSIGNMENTS_DIR;
use crate::models::Assignment;
use crate::storage::{StorageBackend, StorageError};
use tracing::info;

/// Assignment saver that uses a storage backend
pub struct AssignmentSaver<B: StorageBackend> {
    storage: B,
}

impl<B: StorageBackend> AssignmentSaver<B> {
    /// Create a new assignment saver with the given storage backend
    pub fn new(storage: B) -> Self {
        Self { storage }
    }

    /// Save an assignment as a YAML document in the workspace's
    /// `assignments/` directory. The filename is derived from the assignment
    /// name. Returns the path written.
    pub async fn save_assignment(
        &self,
        workspace_path: &str,
        assignment: &Assignment,
    ) -> Result<String, StorageError> {
        let assignments_dir = format!("{}/{}", workspace_path, ASSIGNMENTS_DIR);

        if !self.storage.dir_exists(&assignments_dir).await? {
            self.storage.create_dir(&assignments_dir).await?;
        }

        let file_path = format!(
            "{}/{}.yaml",
            assignments_dir,
            sanitize_filename(assignment.name())
        );

        let document = AssignmentDocument::from_assignment(assignment);
        let yaml = document.to_yaml().map_err(|e| {
            StorageError::SerializationError(format!("Failed to serialize assignment: {}", e))
        })?;

        self.storage.write_file(&file_path, yaml.as_bytes()).await?;

        info!("Saved assignment '{}' to {}", assignment.name(), file_path);
        Ok(file_path)
    }

    /// Delete an assignment document by name
    pub async fn delete_assignment(
        &self,
        workspace_path: &str,
        name: &str,
    ) -> Result<(), StorageError> {
        let file_path = format!(
            "{}/{}/{}.yaml",
            workspace_path,
            ASSIGNMENTS_DIR,
            sanitize_filename(name)
        );
        self.storage.delete_file(&file_path).await?;
        info!("Deleted assignment '{}' from {}", name, file_path);
        Ok(())
    }
}

/// Sanitize a filename by replacing characters invalid on common filesystems
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
