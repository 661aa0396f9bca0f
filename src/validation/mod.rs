//! Validation functionality
//!
//! Provides validation logic for dependency collections: undeclared
//! attributes, duplicate entries, and trivial dependencies.

pub mod dependencies;

pub use dependencies::{
    DependencyValidationError, DependencyValidationResult, DependencyValidator,
    DuplicateDependency, TrivialDependency, UndeclaredAttribute,
};
