//! Registry of live style appliers
//!
//! The registry is owned by a coordinator and only holds weak references: an
//! applier whose element has been destroyed simply stops upgrading and is
//! skipped by bulk dispatch. Dead entries are pruned when appliers register or
//! deregister, never while a dispatch is walking the list.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use crate::applier::StyleApplier;

/// Shared, mutable applier as stored by elements and the registry
pub type SharedApplier = Rc<RefCell<StyleApplier>>;

/// Ordered set of appliers, compared by identity
#[derive(Default)]
pub struct ApplierRegistry {
    entries: Vec<Weak<RefCell<StyleApplier>>>,
}

impl ApplierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an applier; returns `false` if it was already registered
    pub fn register(&mut self, applier: &SharedApplier) -> bool {
        self.prune();
        if self.contains(applier) {
            return false;
        }
        self.entries.push(Rc::downgrade(applier));
        true
    }

    /// Remove an applier; returns `false` if it was not registered
    pub fn deregister(&mut self, applier: &SharedApplier) -> bool {
        self.prune();
        let before = self.entries.len();
        self.entries
            .retain(|entry| !std::ptr::eq(entry.as_ptr(), Rc::as_ptr(applier)));
        self.entries.len() != before
    }

    pub fn contains(&self, applier: &SharedApplier) -> bool {
        self.entries.iter().any(|entry| {
            entry.strong_count() > 0 && std::ptr::eq(entry.as_ptr(), Rc::as_ptr(applier))
        })
    }

    /// Copy of the current entries, for dispatch that may re-enter the registry
    pub fn snapshot(&self) -> Vec<Weak<RefCell<StyleApplier>>> {
        self.entries.clone()
    }

    /// Number of entries whose applier is still alive
    pub fn live_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.strong_count() > 0)
            .count()
    }

    /// Number of entries, including ones not yet pruned
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn prune(&mut self) {
        self.entries.retain(|entry| entry.strong_count() > 0);
    }
}

impl fmt::Debug for ApplierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplierRegistry")
            .field("entries", &self.len())
            .field("live", &self.live_count())
            .finish()
    }
}
