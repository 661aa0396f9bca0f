//! Storage backend abstraction
//!
//! Defines the StorageBackend trait used by the assignment loader/saver.
//! The crate ships one implementation, FileSystemStorageBackend (feature
//! `native-fs`); hosts with other storage (browser, remote) provide their
//! own.

use async_trait::async_trait;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Trait for storage backends
///
/// Abstracts the file and directory operations the assignment loader/saver
/// need, so documents move the same way regardless of where they live.
#[async_trait(?Send)]
pub trait StorageBackend: Send + Sync {
    /// Read a file from storage
    async fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Write a file to storage
    async fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError>;

    /// List files in a directory
    async fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError>;

    /// Check if a file exists
    async fn file_exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Delete a file
    async fn delete_file(&self, path: &str) -> Result<(), StorageError>;

    /// Create a directory
    async fn create_dir(&self, path: &str) -> Result<(), StorageError>;

    /// Check if a directory exists
    async fn dir_exists(&self, path: &str) -> Result<bool, StorageError>;
}

#[cfg(feature = "native-fs")]
pub mod filesystem;
