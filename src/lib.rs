//! Normalization SDK - Shared domain core for relational-normalization teaching tools
//!
//! Provides unified, rendering-free building blocks for:
//! - Domain models (attribute registry, attribute sets, functional dependencies,
//!   relations, assignments)
//! - The FD editor staging model (drag-and-drop payload dispatch, commit/clear)
//! - Assignment document loading/saving (via storage backends)
//! - Dependency validation (undeclared attributes, duplicates, trivial FDs)
//!
//! The UI layer (widgets, drag controllers, login flow) sits on top of this
//! crate and calls its operations; nothing here touches a screen.

pub mod editor;
pub mod model;
pub mod models;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use storage::{StorageBackend, StorageError};
#[cfg(feature = "native-fs")]
pub use storage::filesystem::FileSystemStorageBackend;

pub use editor::{DropPayload, EditorSide, FDEditor, SharedCollection};
pub use model::{
    AssignmentDocument, AssignmentLoadResult, AssignmentLoader, AssignmentSaver,
    DependencyDocument, DocumentError, RelationDocument,
};
pub use models::{
    Assignment, AttributeRegistry, AttributeSet, FDCollection, FunctionalDependency,
    InvalidDependencyError, Relation,
};
pub use validation::{DependencyValidationError, DependencyValidationResult, DependencyValidator};
