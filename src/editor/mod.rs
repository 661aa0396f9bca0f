//! FD editor staging model
//!
//! The editor stages attribute tokens for the two sides of a dependency and
//! materializes a [`FunctionalDependency`] on commit. It mediates three input
//! sources uniformly: single attribute tokens, whole relations, and existing
//! dependencies pulled back for re-editing. The rendering layer calls these
//! operations and re-renders from the returned state; nothing here knows
//! about widgets.

use crate::models::{
    AttributeRegistry, AttributeSet, FDCollection, FunctionalDependency, InvalidDependencyError,
    Relation,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Collection handle shared between the editor and its holder panel. All
/// sharing happens on the single UI thread.
pub type SharedCollection = Rc<RefCell<FDCollection>>;

/// Which side of the editor a drop or append targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorSide {
    Left,
    Right,
}

/// Tagged payload delivered by a drag-and-drop source widget.
///
/// The editor dispatches on the payload kind explicitly; the concrete widget
/// type never matters.
#[derive(Debug)]
pub enum DropPayload<'a> {
    /// A single free-floating attribute token
    AttributeToken(&'a str),
    /// A whole relation; all of its attributes are loaded
    RelationRef(&'a Relation),
    /// An existing dependency opened for re-editing. When `editable`, the
    /// drop is a destructive move out of the targeted collection.
    ExistingDependencyRef {
        dependency: &'a FunctionalDependency,
        editable: bool,
    },
}

/// Staging area for composing one functional dependency.
///
/// Holds a pending attribute set and a free-text buffer per side. Commits
/// combine both, so attributes dragged in and attributes typed as text end up
/// in the same dependency.
#[derive(Debug)]
pub struct FDEditor {
    registry: AttributeRegistry,
    pending_lhs: AttributeSet,
    pending_rhs: AttributeSet,
    lhs_text: String,
    rhs_text: String,
    target: Option<SharedCollection>,
    collapsed: bool,
}

impl FDEditor {
    /// Create an expanded, empty editor over the session registry
    pub fn new(registry: AttributeRegistry) -> Self {
        Self {
            registry,
            pending_lhs: AttributeSet::new(),
            pending_rhs: AttributeSet::new(),
            lhs_text: String::new(),
            rhs_text: String::new(),
            target: None,
            collapsed: false,
        }
    }

    /// Stage one attribute on the left side; idempotent
    pub fn append_to_left(&mut self, name: &str) -> bool {
        match self.registry.resolve(name) {
            Some(canonical) => self.pending_lhs.add(&canonical),
            None => false,
        }
    }

    /// Stage one attribute on the right side; idempotent
    pub fn append_to_right(&mut self, name: &str) -> bool {
        match self.registry.resolve(name) {
            Some(canonical) => self.pending_rhs.add(&canonical),
            None => false,
        }
    }

    /// Replace the left free-text buffer (kept in sync by the text area)
    pub fn set_left_text(&mut self, raw: impl Into<String>) {
        self.lhs_text = raw.into();
    }

    /// Replace the right free-text buffer
    pub fn set_right_text(&mut self, raw: impl Into<String>) {
        self.rhs_text = raw.into();
    }

    /// Copy an existing dependency into the staging areas, additively.
    ///
    /// Every LHS name of `dependency` is appended to the pending LHS and
    /// every RHS name to the pending RHS; staged content is kept, not
    /// replaced. When the source is `editable` and a target collection is
    /// set, the source is also removed from that collection: re-opening for
    /// edit is a destructive move, not a copy.
    pub fn load_from_existing(&mut self, dependency: &FunctionalDependency, editable: bool) {
        let lhs_names: Vec<String> = dependency
            .lhs()
            .names_in_order()
            .map(str::to_string)
            .collect();
        let rhs_names: Vec<String> = dependency
            .rhs()
            .names_in_order()
            .map(str::to_string)
            .collect();
        for name in &lhs_names {
            self.append_to_left(name);
        }
        for name in &rhs_names {
            self.append_to_right(name);
        }

        if editable
            && let Some(target) = &self.target
        {
            let removed = target.borrow_mut().remove(dependency);
            debug!(%dependency, removed, "moved dependency back into the editor");
        }
    }

    /// Stage every attribute of `relation` on the left side
    pub fn load_all_attributes_of(&mut self, relation: &Relation) {
        let names: Vec<String> = relation.attribute_names().map(str::to_string).collect();
        for name in names {
            self.append_to_left(&name);
        }
    }

    /// Record which collection subsequent commits insert into.
    ///
    /// Transient UI-routing state, set by whichever holder panel last gained
    /// focus; it is never implied by anything else.
    pub fn set_target_collection(&mut self, collection: SharedCollection) {
        self.target = Some(collection);
    }

    /// Dispatch a drop onto one side of the editor
    pub fn accept_drop(&mut self, side: EditorSide, payload: DropPayload<'_>) {
        match payload {
            DropPayload::AttributeToken(name) => match side {
                EditorSide::Left => {
                    self.append_to_left(name);
                }
                EditorSide::Right => {
                    self.append_to_right(name);
                }
            },
            DropPayload::RelationRef(relation) => self.load_all_attributes_of(relation),
            DropPayload::ExistingDependencyRef {
                dependency,
                editable,
            } => self.load_from_existing(dependency, editable),
        }
    }

    /// Materialize the staged dependency.
    ///
    /// Free-text buffers are parsed and merged with the programmatically
    /// staged sets. Fails with [`InvalidDependencyError`] when either side
    /// ends up empty, leaving all staging untouched for correction. On
    /// success the dependency is appended to the target collection (if one
    /// is set), the staging areas are cleared, and the dependency is
    /// returned either way.
    pub fn commit(&mut self) -> Result<FunctionalDependency, InvalidDependencyError> {
        let lhs = self.assemble_side(&self.pending_lhs, &self.lhs_text);
        let rhs = self.assemble_side(&self.pending_rhs, &self.rhs_text);

        if lhs.is_empty() || rhs.is_empty() {
            return Err(InvalidDependencyError);
        }

        let dependency = FunctionalDependency::new(self.registry.clone(), lhs, rhs);
        debug!(%dependency, "committed dependency");

        if let Some(target) = &self.target {
            target.borrow_mut().add(dependency.clone());
        }
        self.clear();
        Ok(dependency)
    }

    /// Empty both staging areas without producing a dependency; idempotent
    pub fn clear(&mut self) {
        self.pending_lhs = AttributeSet::new();
        self.pending_rhs = AttributeSet::new();
        self.lhs_text.clear();
        self.rhs_text.clear();
    }

    /// Flip between Expanded and Collapsed, returning the new collapsed
    /// state. Pure visibility state, no domain effect.
    pub fn toggle_collapsed(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.collapsed
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn pending_left(&self) -> &AttributeSet {
        &self.pending_lhs
    }

    pub fn pending_right(&self) -> &AttributeSet {
        &self.pending_rhs
    }

    pub fn left_text(&self) -> &str {
        &self.lhs_text
    }

    pub fn right_text(&self) -> &str {
        &self.rhs_text
    }

    fn assemble_side(&self, pending: &AttributeSet, text: &str) -> AttributeSet {
        let mut side = pending.clone();
        for token in AttributeSet::parse_text(text) {
            if let Some(canonical) = self.registry.resolve(&token) {
                side.add(&canonical);
            }
        }
        side
    }
}
