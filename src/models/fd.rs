//! Functional dependencies

use super::attribute::AttributeRegistry;
use super::attribute_set::AttributeSet;
use std::fmt;

/// Raised when a commit is attempted while either side of the staged
/// dependency is empty. Recoverable: the caller presents the message and the
/// staging areas stay intact for correction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("a functional dependency needs at least one attribute on each side")]
pub struct InvalidDependencyError;

/// A functional dependency: one attribute set (LHS) determines another (RHS).
///
/// Both sides are drawn from the shared [`AttributeRegistry`] of the editing
/// session, so spelling stays consistent across all dependencies of a
/// relation.
#[derive(Debug, Clone)]
pub struct FunctionalDependency {
    registry: AttributeRegistry,
    lhs: AttributeSet,
    rhs: AttributeSet,
}

impl FunctionalDependency {
    /// Create a dependency from initial (possibly empty) sides.
    ///
    /// Every name passes through the registry, so first-seen spellings win
    /// and unseen names are registered.
    pub fn new(registry: AttributeRegistry, lhs: AttributeSet, rhs: AttributeSet) -> Self {
        let lhs = canonicalize(&registry, &lhs);
        let rhs = canonicalize(&registry, &rhs);
        Self { registry, lhs, rhs }
    }

    /// Create a dependency with both sides empty
    pub fn empty(registry: AttributeRegistry) -> Self {
        Self {
            registry,
            lhs: AttributeSet::new(),
            rhs: AttributeSet::new(),
        }
    }

    /// Add one attribute to the left-hand side; idempotent
    pub fn add_left(&mut self, name: &str) -> bool {
        match self.registry.resolve(name) {
            Some(canonical) => self.lhs.add(&canonical),
            None => false,
        }
    }

    /// Add one attribute to the right-hand side; idempotent
    pub fn add_right(&mut self, name: &str) -> bool {
        match self.registry.resolve(name) {
            Some(canonical) => self.rhs.add(&canonical),
            None => false,
        }
    }

    pub fn lhs(&self) -> &AttributeSet {
        &self.lhs
    }

    pub fn rhs(&self) -> &AttributeSet {
        &self.rhs
    }

    /// A dependency is trivial when its RHS is contained in its LHS
    pub fn is_trivial(&self) -> bool {
        self.rhs.is_subset_of(&self.lhs)
    }
}

/// Structural identity: same attributes per side, order ignored. The
/// registry handle does not participate.
impl PartialEq for FunctionalDependency {
    fn eq(&self, other: &Self) -> bool {
        self.lhs.same_names(&other.lhs) && self.rhs.same_names(&other.rhs)
    }
}

impl fmt::Display for FunctionalDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}

fn canonicalize(registry: &AttributeRegistry, set: &AttributeSet) -> AttributeSet {
    let mut out = AttributeSet::new();
    for name in set.names_in_order() {
        if let Some(canonical) = registry.resolve(name) {
            out.add(&canonical);
        }
    }
    out
}
