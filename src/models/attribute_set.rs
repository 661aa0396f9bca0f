//! Ordered, duplicate-free attribute-name sequences

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Splits free text on commas and/or whitespace
static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,]+").expect("valid regex"));

/// An ordered collection of unique attribute names.
///
/// Adding a name that is already present is a no-op, so the sequence reflects
/// first-seen order. Sets are created empty, populated incrementally, and
/// copied (not referenced) when sealed into a committed dependency.
///
/// # Example
///
/// ```rust
/// use normalization_sdk::models::AttributeSet;
///
/// let mut set = AttributeSet::new();
/// set.add("emp_id");
/// set.add("emp_id");
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    names: Vec<String>,
}

impl AttributeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw names, applying `add` to each in order
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.add_all(names);
        set
    }

    /// Add one attribute name.
    ///
    /// Trims the input, silently rejects an empty result, ignores duplicates,
    /// and appends otherwise. Returns `true` when the name was appended.
    pub fn add(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.names.iter().any(|n| n == trimmed) {
            return false;
        }
        self.names.push(trimmed.to_string());
        true
    }

    /// Apply `add` to each element in order
    pub fn add_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add(name.as_ref());
        }
    }

    /// Iterate names in insertion order; no side effects
    pub fn names_in_order(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether `name` is present (exact match on the stored spelling)
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of attributes in the set
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set holds no attributes
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether every name of `self` also appears in `other`
    pub fn is_subset_of(&self, other: &AttributeSet) -> bool {
        self.names.iter().all(|n| other.contains(n))
    }

    /// Whether both sets hold exactly the same names, ignoring order.
    ///
    /// Insertion order is presentation state; two sides listing the same
    /// attributes denote the same dependency side.
    pub fn same_names(&self, other: &AttributeSet) -> bool {
        self.len() == other.len() && self.is_subset_of(other)
    }

    /// Split free text into attribute tokens.
    ///
    /// Splits on commas and/or whitespace, drops empty tokens, keeps the
    /// first occurrence of repeated tokens, and preserves order. Pure,
    /// mutates nothing.
    pub fn parse_text(raw: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        for token in TOKEN_SPLIT.split(raw) {
            if !token.is_empty() && !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }
        tokens
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(", "))
    }
}
