//! Fault categories.
//!
//! A [`FaultKind`] is a named category with an optional parent, so kinds form a
//! tree rooted at [`EXCEPTION`]. Matching is polymorphic: a fault of kind
//! [`INDEX_OUT_OF_BOUNDS`] is also a kind of [`RANGE_ERROR`] and of
//! [`EXCEPTION`].
//!
//! Kinds are declared as `static` items so parents can be referenced:
//!
//! ```
//! use rethrow_core::kind::{FaultKind, EXCEPTION};
//!
//! static DECODE_ERROR: FaultKind = FaultKind::child("DecodeError", &EXCEPTION);
//!
//! assert!(DECODE_ERROR.is_kind_of(&EXCEPTION));
//! assert!(!EXCEPTION.is_kind_of(&DECODE_ERROR));
//! ```

use crate::fault::Fault;
use serde::{Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// A category of [`Fault`], optionally nested under a parent category.
#[derive(Debug, Clone, Copy)]
pub struct FaultKind {
    name: &'static str,
    parent: Option<&'static FaultKind>,
}

impl FaultKind {
    /// Creates a top-level kind with no parent.
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// Creates a kind nested under `parent`.
    pub const fn child(name: &'static str, parent: &'static FaultKind) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    /// Returns the kind name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the direct parent, if any.
    pub fn parent(&self) -> Option<&'static FaultKind> {
        self.parent
    }

    /// Iterates over this kind followed by each ancestor up to the root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Number of ancestors between this kind and its root.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Returns `true` when `other` is this kind or one of its ancestors.
    pub fn is_kind_of(&self, other: &FaultKind) -> bool {
        self.ancestors().any(|kind| kind.same_path(other))
    }

    /// Returns `true` when `name` names this kind or one of its ancestors.
    pub fn is_named_kind_of(&self, name: &str) -> bool {
        self.ancestors().any(|kind| kind.name == name)
    }

    /// Renders the full path, e.g. `Exception/RangeError/IndexOutOfBounds`.
    pub fn path(&self) -> String {
        let mut names: Vec<&str> = self.ancestors().map(FaultKind::name).collect();
        names.reverse();
        names.join("/")
    }

    fn same_path(&self, other: &FaultKind) -> bool {
        let mut lhs = self.ancestors();
        let mut rhs = other.ancestors();
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.name == b.name => continue,
                _ => return false,
            }
        }
    }
}

impl PartialEq for FaultKind {
    fn eq(&self, other: &Self) -> bool {
        self.same_path(other)
    }
}

impl Eq for FaultKind {}

impl Display for FaultKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for FaultKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Iterator returned by [`FaultKind::ancestors`].
pub struct Ancestors<'a> {
    next: Option<&'a FaultKind>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a FaultKind;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.map(|parent| parent as &FaultKind);
        Some(current)
    }
}

/// Root of every built-in kind.
pub static EXCEPTION: FaultKind = FaultKind::root("Exception");

/// Unclassified failure.
pub static GENERIC_EXCEPTION: FaultKind = FaultKind::child("GenericException", &EXCEPTION);

/// A value fell outside its permitted range.
pub static RANGE_ERROR: FaultKind = FaultKind::child("RangeError", &EXCEPTION);

/// An index or offset fell outside a collection's bounds.
pub static INDEX_OUT_OF_BOUNDS: FaultKind = FaultKind::child("IndexOutOfBounds", &RANGE_ERROR);

/// A caller passed an unacceptable argument.
pub static INVALID_ARGUMENT: FaultKind = FaultKind::child("InvalidArgument", &EXCEPTION);

/// Internal state disagreed with itself, e.g. duplicate keys in a model.
pub static INTERNAL_INCONSISTENCY: FaultKind =
    FaultKind::child("InternalInconsistency", &EXCEPTION);

/// An I/O operation failed.
pub static IO_ERROR: FaultKind = FaultKind::child("IOError", &EXCEPTION);

/// A panic that did not carry a [`Fault`] payload.
pub static PANIC: FaultKind = FaultKind::child("Panic", &EXCEPTION);

/// Decides whether a fault belongs to the category a caller is interested in.
pub trait KindMatcher {
    /// Returns `true` when `fault` should be captured.
    fn matches(&self, fault: &Fault) -> bool;
}

impl KindMatcher for FaultKind {
    fn matches(&self, fault: &Fault) -> bool {
        fault.kind().is_kind_of(self)
    }
}

impl<M: KindMatcher + ?Sized> KindMatcher for &M {
    fn matches(&self, fault: &Fault) -> bool {
        (**self).matches(fault)
    }
}

impl KindMatcher for [FaultKind] {
    fn matches(&self, fault: &Fault) -> bool {
        self.iter().any(|kind| kind.matches(fault))
    }
}

/// Matches faults using a caller-supplied predicate.
#[derive(Clone, Copy)]
pub struct KindPredicate<F>(F);

impl<F> KindMatcher for KindPredicate<F>
where
    F: Fn(&Fault) -> bool,
{
    fn matches(&self, fault: &Fault) -> bool {
        (self.0)(fault)
    }
}

/// Wraps a predicate so it can be used wherever a [`KindMatcher`] is expected.
pub fn matching<F>(predicate: F) -> KindPredicate<F>
where
    F: Fn(&Fault) -> bool,
{
    KindPredicate(predicate)
}

#[cfg(test)]
mod tests {
    use super::*;

    static CUSTOM_ROOT: FaultKind = FaultKind::root("RangeError");

    #[test]
    fn test_subkind_matches_ancestors() {
        assert!(INDEX_OUT_OF_BOUNDS.is_kind_of(&INDEX_OUT_OF_BOUNDS));
        assert!(INDEX_OUT_OF_BOUNDS.is_kind_of(&RANGE_ERROR));
        assert!(INDEX_OUT_OF_BOUNDS.is_kind_of(&EXCEPTION));
        assert!(!RANGE_ERROR.is_kind_of(&INDEX_OUT_OF_BOUNDS));
        assert!(!IO_ERROR.is_kind_of(&RANGE_ERROR));
    }

    #[test]
    fn test_same_name_different_tree_is_distinct() {
        assert_ne!(CUSTOM_ROOT, RANGE_ERROR);
        assert!(!CUSTOM_ROOT.is_kind_of(&RANGE_ERROR));
        assert!(!RANGE_ERROR.is_kind_of(&CUSTOM_ROOT));
    }

    #[test]
    fn test_path_and_depth() {
        assert_eq!(
            INDEX_OUT_OF_BOUNDS.path(),
            "Exception/RangeError/IndexOutOfBounds"
        );
        assert_eq!(INDEX_OUT_OF_BOUNDS.depth(), 2);
        assert_eq!(EXCEPTION.depth(), 0);
    }

    #[test]
    fn test_named_lookup() {
        assert!(INDEX_OUT_OF_BOUNDS.is_named_kind_of("RangeError"));
        assert!(!IO_ERROR.is_named_kind_of("RangeError"));
    }

    #[test]
    fn test_matchers() {
        let fault = Fault::new(INDEX_OUT_OF_BOUNDS, "index 4 of 3");

        assert!(RANGE_ERROR.matches(&fault));
        assert!((&RANGE_ERROR).matches(&fault));
        assert!([IO_ERROR, RANGE_ERROR][..].matches(&fault));
        assert!(!IO_ERROR.matches(&fault));
        assert!(matching(|f: &Fault| f.message().contains("index")).matches(&fault));
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&RANGE_ERROR).unwrap();
        assert_eq!(json, "\"RangeError\"");
    }
}
