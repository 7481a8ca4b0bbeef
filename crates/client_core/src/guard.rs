//! Reentrancy guard for user-triggered submissions.
//!
//! A guard is owned by exactly one logical action (a login button, an upload
//! widget, a delete confirmation). Clones share the same flag, so the handle
//! a completion releases is always the handle the trigger checked.
//!
//! Each hold is stamped with a fresh generation. A [`GuardPermit`] only
//! releases the hold it took, so a stale permit dropped after a manual
//! [`SubmissionGuard::release`] and a new acquisition leaves the new hold alone.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

const IDLE: u64 = 0;

#[derive(Debug, Default)]
struct GuardState {
    holder: AtomicU64,
    generation: AtomicU64,
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    state: Arc<GuardState>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` without side effects when the guard is already held.
    pub fn acquire(&self) -> bool {
        self.hold().is_some()
    }

    /// Returns `false` when the guard was not held.
    pub fn release(&self) -> bool {
        self.state.holder.swap(IDLE, Ordering::AcqRel) != IDLE
    }

    pub fn is_held(&self) -> bool {
        self.state.holder.load(Ordering::Acquire) != IDLE
    }

    /// Acquires the guard and ties the release to the returned permit.
    pub fn try_hold(&self) -> Option<GuardPermit> {
        self.hold().map(|generation| GuardPermit {
            guard: self.clone(),
            generation,
        })
    }

    /// True when both handles point at the same flag.
    pub fn same_as(&self, other: &SubmissionGuard) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    fn hold(&self) -> Option<u64> {
        let generation = self.state.generation.fetch_add(1, Ordering::Relaxed) + 1;
        self.state
            .holder
            .compare_exchange(IDLE, generation, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| generation)
    }
}

/// Releases the hold it took, at most once, when dropped.
#[derive(Debug)]
#[must_use = "dropping the permit releases the guard immediately"]
pub struct GuardPermit {
    guard: SubmissionGuard,
    generation: u64,
}

impl GuardPermit {
    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }
}

impl Drop for GuardPermit {
    fn drop(&mut self) {
        let _ = self.guard.state.holder.compare_exchange(
            self.generation,
            IDLE,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }
}

#[cfg(test)]
#[path = "tests/guard_tests.rs"]
mod tests;
