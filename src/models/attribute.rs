//! Shared attribute-name registry
//!
//! All attribute names inside one editing session are drawn from a single
//! namespace so that spelling is normalized consistently across every
//! relation and functional dependency. The registry is an explicit
//! dependency handed to each constructor that needs it, never a global.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct RegistryInner {
    /// Canonical spellings in first-seen order
    canonical: Vec<String>,
    /// Case-folded name -> index into `canonical`
    lookup: HashMap<String, usize>,
}

/// Shared attribute-name namespace for one editing session.
///
/// Cloning the handle shares the underlying table; a name registered through
/// one clone is immediately visible through every other. The session is
/// single-threaded (all operations run on the UI event thread), so interior
/// mutability via `RefCell` is sufficient.
///
/// Normalization rules: names are trimmed, an empty result is rejected, and
/// case-insensitive matches fold to the first-seen spelling.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl AttributeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `raw` and return its canonical spelling, registering the
    /// name if it has not been seen before.
    ///
    /// Returns `None` when the trimmed input is empty; malformed input is
    /// never an error on this path.
    pub fn resolve(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let key = trimmed.to_lowercase();
        let mut inner = self.inner.borrow_mut();
        if let Some(&index) = inner.lookup.get(&key) {
            return Some(inner.canonical[index].clone());
        }

        let index = inner.canonical.len();
        inner.canonical.push(trimmed.to_string());
        inner.lookup.insert(key, index);
        Some(trimmed.to_string())
    }

    /// Look up the canonical spelling of `raw` without registering anything
    pub fn lookup(&self, raw: &str) -> Option<String> {
        let key = raw.trim().to_lowercase();
        let inner = self.inner.borrow();
        inner.lookup.get(&key).map(|&i| inner.canonical[i].clone())
    }

    /// Whether a name (under normalization) is already registered
    pub fn contains(&self, raw: &str) -> bool {
        self.inner.borrow().lookup.contains_key(&raw.trim().to_lowercase())
    }

    /// All canonical names in first-seen order
    pub fn names(&self) -> Vec<String> {
        self.inner.borrow().canonical.clone()
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.inner.borrow().canonical.len()
    }

    /// Whether no name has been registered yet
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().canonical.is_empty()
    }
}
