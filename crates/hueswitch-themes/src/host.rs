//! Root-composition slot for the one coordinator of an application

use std::cell::RefCell;

use crate::coordinator::{ThemeCoordinator, WeakCoordinator};

/// Holds the canonical coordinator
///
/// The first coordinator installed stays for the life of the host. Installing
/// another one discards the newcomer and hands back the canonical instance.
#[derive(Debug, Default)]
pub struct ThemeHost {
    slot: RefCell<Option<ThemeCoordinator>>,
}

impl ThemeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `candidate` unless a coordinator is already present, and make
    /// sure the canonical coordinator has restored its theme.
    pub fn install(&self, candidate: ThemeCoordinator) -> ThemeCoordinator {
        let canonical = {
            let mut slot = self.slot.borrow_mut();
            match slot.as_ref() {
                Some(existing) => {
                    if !existing.ptr_eq(&candidate) {
                        tracing::warn!(
                            "A theme coordinator is already installed; discarding the new one"
                        );
                    }
                    existing.clone()
                }
                None => {
                    *slot = Some(candidate.clone());
                    candidate
                }
            }
        };
        canonical.initialize();
        canonical
    }

    pub fn current(&self) -> Option<ThemeCoordinator> {
        self.slot.borrow().clone()
    }

    /// Weak handle to the installed coordinator; dangling if none is installed
    pub fn weak(&self) -> WeakCoordinator {
        self.slot
            .borrow()
            .as_ref()
            .map(ThemeCoordinator::downgrade)
            .unwrap_or_default()
    }
}
