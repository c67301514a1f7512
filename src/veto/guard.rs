//! Single-flight session guard
//!
//! At most one veto session may run per process. The guard is a value built
//! in `main` and shared through the command context, so the invariant is
//! testable without process-global state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Hands out at most one [`SessionPermit`] at a time.
///
/// Clones share the same underlying slot.
#[derive(Debug, Clone, Default)]
pub struct SessionGuard {
    active: Arc<AtomicBool>,
}

/// Proof that the holder owns the running session. Dropping it frees the
/// slot, so every session exit path releases the guard.
#[derive(Debug)]
pub struct SessionPermit {
    active: Arc<AtomicBool>,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the session slot. Returns None when a session is already active.
    pub fn acquire(&self) -> Option<SessionPermit> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SessionPermit {
                active: Arc::clone(&self.active),
            })
    }

    /// Whether a session currently holds the slot.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for SessionPermit {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}
