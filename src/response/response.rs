//! The user-facing `Response` type.

use super::body::ResponseBody;
use crate::base::neterror::NetError;
use crate::cookie::canonical_cookie::CanonicalCookie;
use crate::http::OrderedHeaderMap;
use http::{StatusCode, Version};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A snapshot of one response's status line and headers, kept in `history`
/// for every redirect hop that was followed before the final response.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub url: Url,
    pub status: StatusCode,
    pub headers: OrderedHeaderMap,
}

/// HTTP response returned by `Session`/`AsyncSession`/`WebSocket` requests.
///
/// Body access is one-shot: `take_body` moves the body out, after which
/// `bytes`/`text`/`json` on the owned value consume it. `history` holds the
/// status/headers (not bodies) of every response that preceded this one in a
/// redirect chain.
pub struct HttpResponse {
    url: Url,
    status: StatusCode,
    version: Version,
    headers: OrderedHeaderMap,
    cookies: Vec<CanonicalCookie>,
    body: Option<ResponseBody>,
    elapsed: Duration,
    redirect_count: u32,
    redirect_url: Option<Url>,
    history: Vec<HistoryEntry>,
}

impl HttpResponse {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        url: Url,
        status: StatusCode,
        version: Version,
        headers: OrderedHeaderMap,
        cookies: Vec<CanonicalCookie>,
        body: Option<ResponseBody>,
        elapsed: Duration,
        redirect_count: u32,
        redirect_url: Option<Url>,
        history: Vec<HistoryEntry>,
    ) -> Self {
        Self {
            url,
            status,
            version,
            headers,
            cookies,
            body,
            elapsed,
            redirect_count,
            redirect_url,
            history,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &OrderedHeaderMap {
        &self.headers
    }

    pub fn cookies(&self) -> &[CanonicalCookie] {
        &self.cookies
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn redirect_count(&self) -> u32 {
        self.redirect_count
    }

    pub fn redirect_url(&self) -> Option<&Url> {
        self.redirect_url.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }

    /// `charset=` from `Content-Type`, falling back to `utf-8`.
    pub fn charset(&self) -> String {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .and_then(|ct| {
                ct.split(';').skip(1).find_map(|param| {
                    let param = param.trim();
                    param
                        .strip_prefix("charset=")
                        .map(|c| c.trim_matches('"').to_string())
                })
            })
            .unwrap_or_else(|| "utf-8".to_string())
    }

    /// Take the body for consumption. Returns `None` if already taken.
    pub fn take_body(&mut self) -> Option<ResponseBody> {
        self.body.take()
    }

    pub async fn bytes(mut self) -> Result<bytes::Bytes, NetError> {
        self.body
            .take()
            .ok_or(NetError::HttpBodyError)?
            .bytes()
            .await
    }

    pub async fn text(mut self) -> Result<String, NetError> {
        self.body
            .take()
            .ok_or(NetError::HttpBodyError)?
            .text()
            .await
    }

    pub async fn json<T: serde::de::DeserializeOwned>(mut self) -> Result<T, NetError> {
        self.body
            .take()
            .ok_or(NetError::HttpBodyError)?
            .json()
            .await
    }

    /// Convenience used by `raise_for_status`-style helpers.
    pub fn into_shared(self) -> Arc<HttpResponse> {
        Arc::new(self)
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("url", &self.url)
            .field("status", &self.status)
            .field("version", &self.version)
            .field("redirect_count", &self.redirect_count)
            .finish()
    }
}
