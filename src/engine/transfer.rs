//! Per-transfer identity and lifecycle state (§4.E).

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque id for one in-flight transfer, unique for the life of an [`super::Engine`].
pub type TransferId = u64;

/// `Pending → Registered → Running → Done → Released`, with `Cancelled`
/// reachable from `Running` when the caller drops or aborts the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    Pending,
    Registered,
    Running,
    Done,
    Cancelled,
    Released,
}

#[derive(Debug, Default)]
pub(super) struct TransferIdGenerator {
    next: AtomicU64,
}

impl TransferIdGenerator {
    pub fn next(&self) -> TransferId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
