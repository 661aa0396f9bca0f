//! Assignment document and validation tests

use async_trait::async_trait;
use normalization_sdk::model::{
    AssignmentDocument, AssignmentLoader, AssignmentSaver, DependencyDocument, DocumentError,
    RelationDocument,
};
use normalization_sdk::models::{
    AttributeRegistry, AttributeSet, FDCollection, FunctionalDependency, Relation,
};
use normalization_sdk::storage::{StorageBackend, StorageError};
use normalization_sdk::validation::DependencyValidator;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// In-memory storage backend, enough to drive the loader/saver. Clones share
/// the same store.
#[derive(Default, Clone)]
struct MemoryBackend {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    dirs: Arc<Mutex<HashSet<String>>>,
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

#[async_trait(?Send)]
impl StorageBackend for MemoryBackend {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.files
            .lock()
            .unwrap()
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| StorageError::FileNotFound(path.to_string()))
    }

    async fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        let path = normalize(path);
        if let Some(parent) = path.rsplit_once('/').map(|(dir, _)| dir) {
            self.dirs.lock().unwrap().insert(parent.to_string());
        }
        self.files.lock().unwrap().insert(path, content.to_vec());
        Ok(())
    }

    async fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        let prefix = format!("{}/", normalize(dir));
        let mut names: Vec<String> = self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter_map(|path| path.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }

    async fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        Ok(self.files.lock().unwrap().contains_key(&normalize(path)))
    }

    async fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        self.files
            .lock()
            .unwrap()
            .remove(&normalize(path))
            .map(|_| ())
            .ok_or_else(|| StorageError::FileNotFound(path.to_string()))
    }

    async fn create_dir(&self, path: &str) -> Result<(), StorageError> {
        self.dirs.lock().unwrap().insert(normalize(path));
        Ok(())
    }

    async fn dir_exists(&self, path: &str) -> Result<bool, StorageError> {
        Ok(self.dirs.lock().unwrap().contains(&normalize(path)))
    }
}

fn sample_assignment() -> normalization_sdk::models::Assignment {
    let registry = AttributeRegistry::new();
    let mut relation = Relation::new(registry.clone(), "employees");
    relation.add_attributes(["emp_id", "name", "dept", "dept_head"]);

    let mut dependencies = FDCollection::new();
    dependencies.add(FunctionalDependency::new(
        registry.clone(),
        AttributeSet::from_names(["emp_id"]),
        AttributeSet::from_names(["name", "dept"]),
    ));
    dependencies.add(FunctionalDependency::new(
        registry,
        AttributeSet::from_names(["dept"]),
        AttributeSet::from_names(["dept_head"]),
    ));

    normalization_sdk::models::Assignment::new("Employees exercise", relation, dependencies)
}

mod document_tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_structure() {
        let assignment = sample_assignment();
        let document = AssignmentDocument::from_assignment(&assignment);

        let conversion = document.into_assignment().unwrap();
        let rebuilt = conversion.assignment;

        assert_eq!(rebuilt.name(), assignment.name());
        assert_eq!(rebuilt.id(), assignment.id());
        assert_eq!(
            rebuilt.relation().attribute_names().collect::<Vec<_>>(),
            assignment.relation().attribute_names().collect::<Vec<_>>()
        );
        let sides: Vec<String> = rebuilt
            .dependencies()
            .entries_in_order()
            .map(|fd| fd.to_string())
            .collect();
        assert_eq!(sides, vec!["emp_id -> name, dept", "dept -> dept_head"]);
        assert!(conversion.orphaned_dependencies.is_empty());
    }

    #[test]
    fn test_dependency_with_empty_side_fails_conversion() {
        let document = AssignmentDocument {
            id: None,
            name: "broken".to_string(),
            relation: RelationDocument {
                name: "r".to_string(),
                attributes: vec!["A".to_string(), "B".to_string()],
            },
            dependencies: vec![DependencyDocument {
                lhs: vec!["A".to_string()],
                rhs: vec!["   ".to_string()],
            }],
            modified_on: None,
        };

        let result = document.into_assignment();
        assert!(matches!(
            result,
            Err(DocumentError::EmptySide { index: 0, side: "right" })
        ));
    }

    #[test]
    fn test_dependency_on_undeclared_attribute_loads_as_orphaned() {
        let document = AssignmentDocument {
            id: None,
            name: "orphans".to_string(),
            relation: RelationDocument {
                name: "r".to_string(),
                attributes: vec!["A".to_string(), "B".to_string()],
            },
            dependencies: vec![
                DependencyDocument {
                    lhs: vec!["A".to_string()],
                    rhs: vec!["B".to_string()],
                },
                DependencyDocument {
                    lhs: vec!["A".to_string()],
                    rhs: vec!["ghost".to_string()],
                },
            ],
            modified_on: None,
        };

        let conversion = document.into_assignment().unwrap();
        assert_eq!(conversion.assignment.dependencies().len(), 1);
        assert_eq!(conversion.orphaned_dependencies.len(), 1);
        assert_eq!(conversion.orphaned_dependencies[0].rhs, vec!["ghost"]);
    }

    #[test]
    fn test_json_wire_form_parses_into_the_domain() {
        let json = r#"{
            "name": "Employees exercise",
            "relation": {"name": "employees", "attributes": ["emp_id", "name"]},
            "dependencies": [{"lhs": ["emp_id"], "rhs": ["name"]}]
        }"#;

        let document = AssignmentDocument::from_json(json).unwrap();
        let conversion = document.into_assignment().unwrap();
        assert_eq!(conversion.assignment.dependencies().len(), 1);
        assert!(conversion.orphaned_dependencies.is_empty());
    }

    #[test]
    fn test_relation_ids_are_deterministic() {
        let a = Relation::generate_id("employees");
        let b = Relation::generate_id("employees");
        let c = Relation::generate_id("departments");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

mod persistence_tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let backend = MemoryBackend::default();
        let assignment = sample_assignment();

        let saver = AssignmentSaver::new(backend.clone());
        let path = saver.save_assignment("workspace", &assignment).await.unwrap();
        assert_eq!(path, "workspace/assignments/Employees exercise.yaml");

        let loader = AssignmentLoader::new(backend.clone());
        let results = loader.load_all_assignments("workspace").await.unwrap();
        assert_eq!(results.len(), 1);

        let loaded = &results[0].assignment;
        assert_eq!(loaded.name(), "Employees exercise");
        assert_eq!(loaded.dependencies().len(), 2);
        assert!(results[0].orphaned_dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_broken_document_is_skipped_on_bulk_load() {
        let backend = MemoryBackend::default();
        backend
            .write_file("workspace/assignments/bad.yaml", b"not: [valid")
            .await
            .unwrap();

        let saver = AssignmentSaver::new(backend.clone());
        saver
            .save_assignment("workspace", &sample_assignment())
            .await
            .unwrap();

        let loader = AssignmentLoader::new(backend.clone());
        let results = loader.load_all_assignments("workspace").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_assignment_removes_the_document() {
        let backend = MemoryBackend::default();
        let saver = AssignmentSaver::new(backend.clone());
        saver
            .save_assignment("workspace", &sample_assignment())
            .await
            .unwrap();

        saver
            .delete_assignment("workspace", "Employees exercise")
            .await
            .unwrap();
        assert!(
            !backend
                .file_exists("workspace/assignments/Employees exercise.yaml")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_loading_a_missing_assignment_is_file_not_found() {
        let backend = MemoryBackend::default();
        let loader = AssignmentLoader::new(backend.clone());
        let result = loader.load_assignment("workspace", "nope.yaml").await;
        assert!(matches!(result, Err(StorageError::FileNotFound(_))));
    }
}

mod validation_tests {
    use super::*;

    #[test]
    fn test_undeclared_attributes_are_reported() {
        let registry = AttributeRegistry::new();
        let mut relation = Relation::new(registry.clone(), "r");
        relation.add_attributes(["A", "B"]);

        let mut dependencies = FDCollection::new();
        dependencies.add(FunctionalDependency::new(
            registry,
            AttributeSet::from_names(["A"]),
            AttributeSet::from_names(["ghost"]),
        ));

        let validator = DependencyValidator::new();
        let findings = validator.find_undeclared_attributes(&relation, &dependencies);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].attribute, "ghost");
        assert_eq!(findings[0].dependency_index, 0);
    }

    #[test]
    fn test_duplicates_and_trivial_entries_are_flagged_without_mutation() {
        let registry = AttributeRegistry::new();
        let mut relation = Relation::new(registry.clone(), "r");
        relation.add_attributes(["A", "B"]);

        let mut dependencies = FDCollection::new();
        dependencies.add(FunctionalDependency::new(
            registry.clone(),
            AttributeSet::from_names(["A"]),
            AttributeSet::from_names(["B"]),
        ));
        dependencies.add(FunctionalDependency::new(
            registry.clone(),
            AttributeSet::from_names(["A"]),
            AttributeSet::from_names(["B"]),
        ));
        dependencies.add(FunctionalDependency::new(
            registry,
            AttributeSet::from_names(["A", "B"]),
            AttributeSet::from_names(["B"]),
        ));

        let validator = DependencyValidator::new();
        let result = validator.validate(&relation, &dependencies);

        assert_eq!(result.duplicates.len(), 1);
        assert_eq!(result.duplicates[0].first_index, 0);
        assert_eq!(result.duplicates[0].duplicate_index, 1);
        assert_eq!(result.trivial.len(), 1);
        assert_eq!(result.trivial[0].dependency_index, 2);
        assert!(result.undeclared_attributes.is_empty());
        assert_eq!(dependencies.len(), 3);
    }

    #[test]
    fn test_clean_collection_validates_clean() {
        let assignment = sample_assignment();
        let validator = DependencyValidator::new();
        let result = validator.validate(assignment.relation(), assignment.dependencies());
        assert!(result.is_clean());
    }
}
