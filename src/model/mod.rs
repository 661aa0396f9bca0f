//! Assignment document handling
//!
//! Serialized assignment form plus the loader/saver pair that moves
//! documents through a storage backend.

pub mod document;
pub mod loader;
pub mod saver;

pub use document::{
    AssignmentConversion, AssignmentDocument, DependencyDocument, DocumentError, RelationDocument,
};
pub use loader::{AssignmentLoadResult, AssignmentLoader};
pub use saver::AssignmentSaver;
