//! Native realization of the transfer multiplexer (§4.E).
//!
//! There is no `fd`/`socket_function` pair to intercept here — tokio's
//! reactor already owns readiness for every socket `hyper`/`tokio-boring`
//! touch — but the engine keeps the shape of the original protocol: a
//! transfer-id-keyed state map, an immediate "kick" on registration (the
//! transfer is `tokio::spawn`'d as soon as it's added, not on the next idle
//! wakeup), and a periodic safeguard tick. Each `Engine` owns its own state
//! map and safeguard task, so multiple engines never share global state.

use super::transfer::{TransferId, TransferIdGenerator, TransferState};
use crate::base::neterror::NetError;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const SAFEGUARD_PERIOD: Duration = Duration::from_millis(100);

/// Owns the transfer state table and the background safeguard task for one
/// session. Dropping the engine aborts the safeguard task; in-flight
/// transfers already spawned on the runtime keep running to completion.
pub struct Engine {
    states: Arc<DashMap<TransferId, TransferState>>,
    ids: TransferIdGenerator,
    safeguard: JoinHandle<()>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        let states: Arc<DashMap<TransferId, TransferState>> = Arc::new(DashMap::new());
        let safeguard_states = states.clone();
        let safeguard = tokio::spawn(async move {
            let mut tick = tokio::time::interval(SAFEGUARD_PERIOD);
            loop {
                tick.tick().await;
                // Nothing to nudge natively — the reactor already drives
                // readiness — but released transfers are swept here so the
                // state table doesn't grow unbounded if a caller forgets to
                // await a ticket.
                safeguard_states.retain(|_, state| *state != TransferState::Released);
            }
        });

        Self {
            states,
            ids: TransferIdGenerator::default(),
            safeguard,
        }
    }

    /// Register and immediately spawn a transfer (the "kick" rule: a fresh
    /// handle begins running without waiting for an idle wakeup).
    pub fn register<F, T>(&self, fut: F) -> TransferTicket<T>
    where
        F: Future<Output = Result<T, NetError>> + Send + 'static,
        T: Send + 'static,
    {
        let id = self.ids.next();
        self.states.insert(id, TransferState::Registered);
        self.states.insert(id, TransferState::Running);
        let handle = tokio::spawn(fut);

        TransferTicket {
            id,
            handle,
            states: self.states.clone(),
        }
    }

    /// Current lifecycle state of a transfer, if it hasn't been released yet.
    pub fn state(&self, id: TransferId) -> Option<TransferState> {
        self.states.get(&id).map(|s| *s)
    }

    /// Number of transfers not yet released — an approximation of
    /// `max_clients` concurrency in use.
    pub fn active_count(&self) -> usize {
        self.states
            .iter()
            .filter(|e| !matches!(*e.value(), TransferState::Released))
            .count()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.safeguard.abort();
    }
}

/// A handle to one registered transfer. Awaiting it resolves with the
/// transfer's result and marks it released; dropping it without awaiting
/// cancels the underlying task.
pub struct TransferTicket<T> {
    id: TransferId,
    handle: JoinHandle<Result<T, NetError>>,
    states: Arc<DashMap<TransferId, TransferState>>,
}

impl<T> TransferTicket<T> {
    pub fn id(&self) -> TransferId {
        self.id
    }

    /// Abort the in-flight transfer. The engine resolves the waiter with a
    /// cancellation error; the pool's reset/close proceeds independently.
    pub fn cancel(&self) {
        self.states.insert(self.id, TransferState::Cancelled);
        self.handle.abort();
    }

    pub async fn wait(self) -> Result<T, NetError> {
        let id = self.id;
        let states = self.states;
        let result = match self.handle.await {
            Ok(result) => result,
            Err(join_err) if join_err.is_cancelled() => Err(NetError::ConnectionAborted),
            Err(_) => Err(NetError::ConnectionAborted),
        };
        states.insert(id, TransferState::Done);
        states.insert(id, TransferState::Released);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn transfer_resolves_with_its_future_result() {
        let engine = Engine::new();
        let ticket = engine.register(async { Ok::<_, NetError>(42) });
        assert_eq!(ticket.wait().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn cancelled_transfer_resolves_with_aborted_error() {
        let engine = Engine::new();
        let ticket = engine.register(async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, NetError>(())
        });
        ticket.cancel();
        assert!(matches!(
            ticket.wait().await,
            Err(NetError::ConnectionAborted)
        ));
    }

    #[tokio::test]
    async fn active_count_drops_after_release() {
        let engine = Engine::new();
        let ticket = engine.register(async { Ok::<_, NetError>(()) });
        assert_eq!(engine.active_count(), 1);
        ticket.wait().await.unwrap();
        assert_eq!(engine.active_count(), 0);
    }
}
