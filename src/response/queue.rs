//! Bounded chunk queue used to stream a response body to the caller.
//!
//! Generalizes the write-callback-feeds-a-`Queue`-with-a-`None`-sentinel pattern:
//! the write callback calls `put_nowait`, the reader calls `get` in a loop until
//! it observes the end sentinel, and `close` lets the reader abort early.

use crate::base::neterror::NetError;
use bytes::Bytes;
use tokio::sync::mpsc;

/// One item pulled from a streaming response body.
#[derive(Debug, Clone)]
pub enum Chunk {
    Data(Bytes),
    Error(NetError),
}

/// A queue a producer pushes chunks into and a consumer drains.
///
/// `put_nowait` never blocks the producer; backpressure is expressed by the
/// bounded channel's capacity causing the producer's *await* point (not
/// `put_nowait` itself) to suspend when the queue is full.
pub trait Queue: Send + Sync {
    /// Push a chunk without waiting. Returns `false` if the queue is closed.
    fn put_nowait(&self, chunk: Chunk) -> bool;

    /// Signal end-of-stream; no more chunks will be produced.
    fn close(&self);

    /// True once `close` has been called or the reader has dropped.
    fn is_closed(&self) -> bool;
}

/// The concrete `Queue` implementation: a bounded `tokio::mpsc` channel plus
/// a `Some(Chunk)`/`None` sentinel convention on the receiving side.
pub struct SinkQueue {
    tx: mpsc::Sender<Option<Chunk>>,
    closed: std::sync::atomic::AtomicBool,
}

impl SinkQueue {
    /// `capacity` bounds how many unread chunks may be buffered before the
    /// producer's `send` future suspends.
    pub fn channel(capacity: usize) -> (std::sync::Arc<Self>, mpsc::Receiver<Option<Chunk>>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            std::sync::Arc::new(Self {
                tx,
                closed: std::sync::atomic::AtomicBool::new(false),
            }),
            rx,
        )
    }

    /// Await-based push used by the write callback when the queue is full.
    pub async fn put(&self, chunk: Chunk) -> bool {
        if self.is_closed() {
            return false;
        }
        self.tx.send(Some(chunk)).await.is_ok()
    }
}

impl Queue for SinkQueue {
    fn put_nowait(&self, chunk: Chunk) -> bool {
        if self.is_closed() {
            return false;
        }
        self.tx.try_send(Some(chunk)).is_ok()
    }

    fn close(&self) {
        self.closed
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let _ = self.tx.try_send(None);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn drains_until_sentinel() {
        let (queue, mut rx) = SinkQueue::channel(4);
        queue.put_nowait(Chunk::Data(Bytes::from_static(b"a")));
        queue.put_nowait(Chunk::Data(Bytes::from_static(b"b")));
        queue.close();

        let mut seen = Vec::new();
        while let Some(item) = rx.recv().await {
            match item {
                Some(Chunk::Data(b)) => seen.push(b),
                Some(Chunk::Error(_)) => panic!("unexpected error chunk"),
                None => break,
            }
        }
        assert_eq!(seen.len(), 2);
    }

    #[tokio::test]
    async fn put_nowait_fails_after_close() {
        let (queue, _rx) = SinkQueue::channel(4);
        queue.close();
        assert!(!queue.put_nowait(Chunk::Data(Bytes::from_static(b"x"))));
    }
}
