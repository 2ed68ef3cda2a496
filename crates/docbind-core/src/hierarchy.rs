//! Hierarchy traversal over explicit parent links. The walk starts at
//! the class itself and follows stored `Parent` entries upward, so the
//! most-derived class is always visited first. Declaration rejects
//! cyclic parents, which is what lets the iterator run unguarded.

use crate::{class::ClassId, meta::MetadataStore};

///
/// Ancestry
///
/// Iterator over a class and its ancestors, most-derived first. A class
/// with no stored parent yields just itself.
///

pub struct Ancestry<'a> {
    store: &'a MetadataStore,
    next: Option<ClassId>,
}

impl Iterator for Ancestry<'_> {
    type Item = ClassId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.store.parent(current);

        Some(current)
    }
}

/// Iterate a class and its ancestors, most-derived first.
pub fn ancestry(store: &MetadataStore, class: ClassId) -> Ancestry<'_> {
    Ancestry {
        store,
        next: Some(class),
    }
}

/// Visit a class and its ancestors, most-derived first.
pub fn walk(store: &MetadataStore, class: ClassId, mut visit: impl FnMut(ClassId)) {
    for ancestor in ancestry(store, class) {
        visit(ancestor);
    }
}

/// Whether `needle` appears in the lineage starting at `class`.
pub(crate) fn lineage_contains(store: &MetadataStore, class: ClassId, needle: ClassId) -> bool {
    ancestry(store, class).any(|ancestor| ancestor == needle)
}

///
/// TESTS
///
