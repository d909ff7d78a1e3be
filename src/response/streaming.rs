//! `iter_content`/`iter_lines` helpers over a streaming response body.

use super::queue::Chunk;
use crate::base::neterror::NetError;
use bytes::{Bytes, BytesMut};
use tokio::sync::mpsc::Receiver;

/// Pulls fixed-size (or queue-native) chunks from a streaming body.
pub struct ContentIter {
    rx: Receiver<Option<Chunk>>,
    done: bool,
}

impl ContentIter {
    pub fn new(rx: Receiver<Option<Chunk>>) -> Self {
        Self { rx, done: false }
    }

    /// Pull the next chunk, or `None` once the stream ends.
    pub async fn next(&mut self) -> Option<Result<Bytes, NetError>> {
        if self.done {
            return None;
        }
        match self.rx.recv().await {
            Some(Some(Chunk::Data(b))) => Some(Ok(b)),
            Some(Some(Chunk::Error(e))) => {
                self.done = true;
                Some(Err(e))
            }
            Some(None) | None => {
                self.done = true;
                None
            }
        }
    }
}

/// Splits a streaming body into lines, folding incomplete trailing data
/// across chunk boundaries until the delimiter is seen.
pub struct LineIter {
    inner: ContentIter,
    delimiter: u8,
    carry: BytesMut,
    done: bool,
}

impl LineIter {
    pub fn new(rx: Receiver<Option<Chunk>>, delimiter: u8) -> Self {
        Self {
            inner: ContentIter::new(rx),
            delimiter,
            carry: BytesMut::new(),
            done: false,
        }
    }

    pub async fn next(&mut self) -> Option<Result<Bytes, NetError>> {
        loop {
            if let Some(pos) = self.carry.iter().position(|&b| b == self.delimiter) {
                let line = self.carry.split_to(pos);
                self.carry.advance_past_delimiter();
                return Some(Ok(line.freeze()));
            }

            if self.done {
                if self.carry.is_empty() {
                    return None;
                }
                let rest = std::mem::take(&mut self.carry);
                return Some(Ok(rest.freeze()));
            }

            match self.inner.next().await {
                Some(Ok(chunk)) => self.carry.extend_from_slice(&chunk),
                Some(Err(e)) => return Some(Err(e)),
                None => self.done = true,
            }
        }
    }
}

trait AdvancePastDelimiter {
    fn advance_past_delimiter(&mut self);
}

impl AdvancePastDelimiter for BytesMut {
    fn advance_past_delimiter(&mut self) {
        if !self.is_empty() {
            let _ = self.split_to(1);
        }
    }
}

pub fn iter_content(rx: Receiver<Option<Chunk>>) -> ContentIter {
    ContentIter::new(rx)
}

pub fn iter_lines(rx: Receiver<Option<Chunk>>) -> LineIter {
    LineIter::new(rx, b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::queue::SinkQueue;

    #[tokio::test]
    async fn splits_on_newline_across_chunks() {
        let (queue, rx) = SinkQueue::channel(8);
        queue.put_nowait(Chunk::Data(Bytes::from_static(b"hello\nwo")));
        queue.put_nowait(Chunk::Data(Bytes::from_static(b"rld\n")));
        queue.close();

        let mut lines = iter_lines(rx);
        let first = lines.next().await.unwrap().unwrap();
        assert_eq!(&first[..], b"hello");
        let second = lines.next().await.unwrap().unwrap();
        assert_eq!(&second[..], b"world");
        assert!(lines.next().await.is_none());
    }

    #[tokio::test]
    async fn surfaces_error_chunk() {
        let (queue, rx) = SinkQueue::channel(8);
        queue.put_nowait(Chunk::Error(NetError::ConnectionReset));
        queue.close();

        let mut content = iter_content(rx);
        assert!(content.next().await.unwrap().is_err());
    }
}
