//! Response body: a streaming chunk queue, regardless of whether the caller
//! asked for a buffered read or incremental access — `stream=false` just
//! means the convenience methods below drain it to completion instead of
//! the caller pulling from [`super::iter_content`]/[`super::iter_lines`].

use super::queue::Chunk;
use crate::base::neterror::NetError;
use bytes::{Bytes, BytesMut};
use tokio::sync::mpsc;

pub struct ResponseBody {
    rx: mpsc::Receiver<Option<Chunk>>,
}

impl ResponseBody {
    pub fn streamed(rx: mpsc::Receiver<Option<Chunk>>) -> Self {
        ResponseBody { rx }
    }

    /// Hand back the raw receiver for `iter_content`/`iter_lines`.
    pub fn into_receiver(self) -> mpsc::Receiver<Option<Chunk>> {
        self.rx
    }

    /// Read the entire body as bytes, draining the queue.
    pub async fn bytes(mut self) -> Result<Bytes, NetError> {
        let mut buf = BytesMut::new();
        while let Some(item) = self.rx.recv().await {
            match item {
                Some(Chunk::Data(b)) => buf.extend_from_slice(&b),
                Some(Chunk::Error(err)) => return Err(err),
                None => break,
            }
        }
        Ok(buf.freeze())
    }

    pub async fn text(self) -> Result<String, NetError> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|_| NetError::InvalidUtf8)
    }

    pub async fn json<T: serde::de::DeserializeOwned>(self) -> Result<T, NetError> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|_| NetError::JsonParseError)
    }
}
