//! User-facing error hierarchy.
//!
//! `NetError` (see [`crate::base::neterror`]) models transport-level failures with
//! stable numeric codes. `RequestError` sits above it and is what `Session`,
//! `Response`, and the WebSocket surface actually return: each variant names a
//! failure mode a caller can match on, wrapping the originating `NetError` where
//! one exists. Internal control flow (redirect loop, pool waits, retries) stays
//! on plain `Result<_, NetError>`; `RequestError` is assembled only at the
//! outermost boundary.

use crate::base::neterror::NetError;
use crate::response::HttpResponse;
use std::sync::Arc;

/// Top-level error type returned by `Session`, `AsyncSession`, and `WebSocket`.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("connection error: {0}")]
    Connection(#[source] NetError),

    #[error("TLS error: {0}")]
    Ssl(#[source] NetError),

    #[error("proxy error: {0}")]
    Proxy(#[source] NetError),

    #[error("request timed out")]
    Timeout,

    #[error("connect timed out")]
    ConnectTimeout,

    #[error("read timed out")]
    ReadTimeout,

    #[error("exceeded max_redirects ({max_redirects})")]
    TooManyRedirects {
        max_redirects: u32,
        response: Arc<HttpResponse>,
    },

    #[error("chunked encoding error: {0}")]
    ChunkedEncoding(#[source] NetError),

    #[error("partial read: expected {expected} bytes, got {got}")]
    PartialRead { expected: u64, got: u64 },

    #[error("HTTP error: {status}")]
    Http {
        status: http::StatusCode,
        response: Arc<HttpResponse>,
    },

    #[error("cookie {name} present for incompatible domains ({domain_a} vs {domain_b})")]
    CookieConflict {
        name: String,
        domain_a: String,
        domain_b: String,
    },

    #[error("session is closed")]
    SessionClosed,

    #[error("unknown impersonation target: {0}")]
    UnknownImpersonation(String),

    #[error("invalid ja3 string: {0}")]
    InvalidJa3(String),

    #[error("invalid akamai fingerprint string: {0}")]
    InvalidAkamai(String),

    #[error("websocket closed: code={code:?}")]
    WebSocketClosed { code: Option<u16> },

    #[error("websocket operation timed out")]
    WebSocketTimeout,

    #[error("websocket error: {0}")]
    WebSocketError(#[source] NetError),

    #[error(transparent)]
    Transport(#[from] NetError),
}

impl RequestError {
    /// The partial or final response captured before this error fired, if any.
    ///
    /// Populated for `TooManyRedirects` and `Http`; other variants carry no
    /// response because no bytes were necessarily seen.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            RequestError::TooManyRedirects { response, .. } => Some(response),
            RequestError::Http { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Build the `HTTPError` variant for `raise_for_status`.
    pub fn http_status(response: Arc<HttpResponse>) -> Self {
        RequestError::Http {
            status: response.status(),
            response,
        }
    }

    /// Classify a raw transport failure into the user-facing taxonomy.
    pub fn from_transport(err: NetError) -> Self {
        match err {
            NetError::ConnectionTimedOut => RequestError::Timeout,
            NetError::SslProtocolError
            | NetError::SslVersionOrCipherMismatch
            | NetError::SslHandshakeFailedWith { .. }
            | NetError::CertPinningFailed => RequestError::Ssl(err),
            NetError::ProxyConnectionFailed
            | NetError::ProxyAuthRequested
            | NetError::TunnelConnectionFailed => RequestError::Proxy(err),
            NetError::IncompleteChunkedEncoding | NetError::InvalidChunkedEncoding => {
                RequestError::ChunkedEncoding(err)
            }
            other => RequestError::Connection(other),
        }
    }
}
