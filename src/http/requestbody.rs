//! Request body for POST/PUT operations.
//!
//! Encoding happens once, at compile time (§4.C step 2): a `Form`/`Json`
//! body is rendered to `Bytes` up front along with the `Content-Type` it
//! implies, so everything downstream of the Option Compiler only ever sees
//! `Bytes` or a caller-owned stream.

use super::multipart::Form;
use crate::base::neterror::NetError;
use bytes::Bytes;
use futures::stream::BoxStream;
use std::collections::BTreeMap;

/// Request body for HTTP methods that send data.
#[derive(Default)]
pub enum RequestBody {
    /// No body (GET, HEAD, DELETE).
    #[default]
    Empty,
    /// Body with raw bytes.
    Bytes(Bytes),
    /// Caller-supplied streaming body (not buffered, length usually unknown).
    Stream(BoxStream<'static, Result<Bytes, NetError>>),
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Empty => write!(f, "RequestBody::Empty"),
            RequestBody::Bytes(b) => f.debug_tuple("RequestBody::Bytes").field(&b.len()).finish(),
            RequestBody::Stream(_) => write!(f, "RequestBody::Stream(..)"),
        }
    }
}

impl Clone for RequestBody {
    /// Streams cannot be cloned; a redirect replay of a streaming body
    /// degrades to `Empty`, matching the "streams are single-use" rule.
    fn clone(&self) -> Self {
        match self {
            RequestBody::Empty => RequestBody::Empty,
            RequestBody::Bytes(b) => RequestBody::Bytes(b.clone()),
            RequestBody::Stream(_) => RequestBody::Empty,
        }
    }
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        RequestBody::Bytes(Bytes::from(s))
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(v: Vec<u8>) -> Self {
        RequestBody::Bytes(Bytes::from(v))
    }
}

impl From<&str> for RequestBody {
    fn from(s: &str) -> Self {
        RequestBody::Bytes(Bytes::from(s.to_owned()))
    }
}

impl From<Bytes> for RequestBody {
    fn from(b: Bytes) -> Self {
        RequestBody::Bytes(b)
    }
}

impl RequestBody {
    /// Check if the body is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }

    /// Get the length of the body in bytes, if known up front.
    pub fn len(&self) -> Option<u64> {
        match self {
            RequestBody::Empty => Some(0),
            RequestBody::Bytes(b) => Some(b.len() as u64),
            RequestBody::Stream(_) => None,
        }
    }
}

/// Unencoded body input as the caller supplies it. The Option Compiler
/// renders one of these into a `(RequestBody, content_type)` pair.
pub enum BodyInput {
    /// `data=` as a form map: percent-encoded, `application/x-www-form-urlencoded`.
    Form(BTreeMap<String, String>),
    /// `json=`: serialized, `application/json`.
    Json(serde_json::Value),
    /// `data=` as raw bytes/string: passed through unchanged, no Content-Type set.
    Raw(Bytes),
    /// `files=`/multipart form.
    Multipart(Form),
    /// A caller-owned stream; no Content-Type is inferred.
    Stream(BoxStream<'static, Result<Bytes, NetError>>),
}

/// Render a [`BodyInput`] to a `(body, content_type)` pair per §4.C step 2.
pub fn encode_body(input: BodyInput) -> (RequestBody, Option<String>) {
    match input {
        BodyInput::Form(fields) => {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(fields.iter())
                .finish();
            (
                RequestBody::Bytes(Bytes::from(encoded)),
                Some("application/x-www-form-urlencoded".to_string()),
            )
        }
        BodyInput::Json(value) => {
            let encoded = serde_json::to_vec(&value).unwrap_or_default();
            (
                RequestBody::Bytes(Bytes::from(encoded)),
                Some("application/json".to_string()),
            )
        }
        BodyInput::Raw(bytes) => (RequestBody::Bytes(bytes), None),
        BodyInput::Multipart(form) => {
            let content_type = form.content_type();
            (RequestBody::Bytes(form.into_body()), Some(content_type))
        }
        BodyInput::Stream(stream) => (RequestBody::Stream(stream), None),
    }
}
