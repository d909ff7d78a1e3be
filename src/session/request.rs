//! The redirect-following request loop shared by `AsyncSession`/`Session`.
//!
//! One call here may run several [`HttpNetworkTransaction`]s back to back —
//! one per redirect hop — joining their responses into a single
//! [`HttpResponse`] with a `history` trail. Authorization headers and
//! userinfo credentials are stripped the moment a redirect crosses origins.

use crate::base::neterror::NetError;
use crate::cookie::{CookieJar, SiteContext};
use crate::error::RequestError;
use crate::http::h2fingerprint::H2Fingerprint;
use crate::http::requestbody::RequestBody;
use crate::http::streamfactory::HttpStreamFactory;
use crate::http::transaction::HttpNetworkTransaction;
use crate::option::{compile, CompilerInput};
use crate::response::{HistoryEntry, HttpResponse};
use http::Method;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// One request's worth of inputs, already resolved against session defaults.
pub struct RequestPlan<'a> {
    pub method: Method,
    pub url: Url,
    pub input: CompilerInput<'a>,
}

/// Compute the method to use after a redirect (RFC 7231 + historical
/// 301/302-POST-to-GET browser behavior).
fn compute_method_for_redirect(method: &Method, status_code: u16) -> Method {
    if (status_code == 303 && *method != Method::HEAD)
        || ((status_code == 301 || status_code == 302) && *method == Method::POST)
    {
        Method::GET
    } else {
        method.clone()
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn send(
    factory: &Arc<HttpStreamFactory>,
    cookie_jar: &Arc<CookieJar>,
    plan: RequestPlan<'_>,
    max_redirects: u32,
    follow_redirects: bool,
) -> Result<HttpResponse, RequestError> {
    let start = Instant::now();
    let RequestPlan {
        mut method,
        mut url,
        input,
    } = plan;

    let mut compiled = compile(input);
    // The first hop gets the real body (including a one-shot stream, if
    // any); 307/308 hops that keep the method resend a clone of it, which
    // degrades a stream body to empty (streams are single-use) but
    // preserves a buffered one exactly, per RFC 7231 7.1.1.
    let mut first_body = Some(std::mem::replace(&mut compiled.body, RequestBody::Empty));
    let mut resend_body = match first_body.as_ref().unwrap() {
        RequestBody::Bytes(b) => RequestBody::Bytes(b.clone()),
        RequestBody::Empty | RequestBody::Stream(_) => RequestBody::Empty,
    };
    let mut headers = compiled.headers.clone();
    let mut remaining = max_redirects;
    let mut visited = HashSet::new();
    visited.insert(url.to_string());
    let mut history = Vec::new();
    let mut redirect_count = 0u32;
    let mut last_redirect_url: Option<Url> = None;

    loop {
        let mut transaction = HttpNetworkTransaction::new(factory.clone(), url.clone(), cookie_jar.clone());
        transaction.set_headers(headers.clone());
        let body_to_send = first_body.take().unwrap_or_else(|| resend_body.clone());
        transaction.set_body(body_to_send);
        if let Some(proxy) = &compiled.proxy {
            transaction.set_proxy(proxy.settings.clone());
        }
        if let Some(fp) = h2_fingerprint_for(&compiled.fingerprint) {
            transaction.set_fingerprint(fp);
        }

        transaction
            .start()
            .await
            .map_err(RequestError::from_transport)?;

        let (parts, rx) = transaction
            .take_raw_response()
            .ok_or(RequestError::Transport(NetError::ConnectionClosed))?;

        let response_headers = crate::http::OrderedHeaderMap::from_header_map(&parts.headers);
        let status = parts.status;

        let location = if status.is_redirection() {
            parts
                .headers
                .get(http::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|loc| url.join(loc).ok())
        } else {
            None
        };

        if let Some(mut new_url) = location.filter(|_| follow_redirects) {
            history.push(HistoryEntry {
                url: url.clone(),
                status,
                headers: response_headers,
            });

            if remaining == 0 {
                let body = crate::response::ResponseBody::streamed(rx);
                let partial = HttpResponse::new(
                    url.clone(),
                    status,
                    parts.version,
                    crate::http::OrderedHeaderMap::from_header_map(&parts.headers),
                    cookie_jar.get_cookies_for(&url, &method, SiteContext::SameSite),
                    Some(body),
                    start.elapsed(),
                    redirect_count,
                    Some(new_url),
                    history,
                );
                return Err(RequestError::TooManyRedirects {
                    max_redirects,
                    response: Arc::new(partial),
                });
            }

            let new_method = compute_method_for_redirect(&method, status.as_u16());
            if new_method != method && new_method == Method::GET {
                resend_body = RequestBody::Empty;
            }
            method = new_method;

            if !visited.insert(new_url.to_string()) {
                return Err(RequestError::Transport(NetError::RedirectCycleDetected));
            }

            let is_cross_origin = url.origin() != new_url.origin();
            if is_cross_origin {
                headers.remove("authorization");
                let _ = new_url.set_username("");
                let _ = new_url.set_password(None);
            }

            remaining -= 1;
            redirect_count += 1;
            last_redirect_url = Some(new_url.clone());
            url = new_url;
            continue;
        }

        let body = crate::response::ResponseBody::streamed(rx);
        return Ok(HttpResponse::new(
            url.clone(),
            status,
            parts.version,
            crate::http::OrderedHeaderMap::from_header_map(&parts.headers),
            cookie_jar.get_cookies_for(&url, &method, SiteContext::SameSite),
            Some(body),
            start.elapsed(),
            redirect_count,
            last_redirect_url,
            history,
        ));
    }
}

fn h2_fingerprint_for(spec: &crate::fingerprint::FingerprintSpec) -> Option<H2Fingerprint> {
    spec.to_emulation()
        .http2_options()
        .and_then(|opts| opts.fingerprint.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_303_converts_any_method_to_get() {
        assert_eq!(
            compute_method_for_redirect(&Method::POST, 303),
            Method::GET
        );
        assert_eq!(
            compute_method_for_redirect(&Method::HEAD, 303),
            Method::HEAD
        );
    }

    #[test]
    fn redirect_307_preserves_method() {
        assert_eq!(
            compute_method_for_redirect(&Method::POST, 307),
            Method::POST
        );
    }

    #[test]
    fn redirect_301_post_becomes_get() {
        assert_eq!(
            compute_method_for_redirect(&Method::POST, 301),
            Method::GET
        );
        assert_eq!(compute_method_for_redirect(&Method::PUT, 301), Method::PUT);
    }
}
