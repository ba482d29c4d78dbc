//! Last-writer-wins arbitration for overlapping refreshes.
//!
//! A focus-triggered refetch can start while a previous one is still in
//! flight, and the transport offers no cancellation primitive. Each fetch
//! takes a ticket before it starts and commits its result when it lands;
//! only the most recently issued ticket's commit is accepted, so a stale
//! response can never overwrite a newer one on the view state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues refresh tickets and decides which result is current
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    generation: AtomicU64,
}

/// Proof that a refresh was initiated; stale once any newer ticket exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh. Every ticket issued earlier becomes stale.
    pub fn begin(&self) -> RefreshTicket {
        RefreshTicket {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Accept `value` only if `ticket` still belongs to the latest refresh;
    /// stale results are discarded
    pub fn commit<T>(&self, ticket: RefreshTicket, value: T) -> Option<T> {
        if self.generation.load(Ordering::SeqCst) == ticket.generation {
            Some(value)
        } else {
            None
        }
    }

    /// Invalidate every outstanding ticket without starting a new refresh;
    /// used when navigating away from the view
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
