//! Option Compiler: turns one request's scattered inputs into an ordered
//! transport program, following the ordering rules fixed at the top of this
//! module (each numbered comment below is one of those rules).

use super::auth::{self, AuthSpec, CompiledAuth};
use super::value::RawOptions;
use crate::cookie::CookieJar;
use crate::fingerprint::FingerprintSpec;
use crate::http::orderedheaders::OrderedHeaderMap;
use crate::http::requestbody::{encode_body, BodyInput, RequestBody};
use crate::socket::proxy::ProxySettings;
use http::Method;
use std::collections::BTreeMap;
use tracing::warn;
use url::Url;

/// Verification policy for the TLS peer certificate.
#[derive(Debug, Clone, Default)]
pub enum VerifyPolicy {
    #[default]
    SystemRoots,
    Disabled,
    CaFile(String),
}

/// Redirect-following policy.
#[derive(Debug, Clone, Copy)]
pub struct RedirectPolicy {
    pub follow: bool,
    pub max_redirects: u32,
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self {
            follow: true,
            max_redirects: 20,
        }
    }
}

/// Explicit HTTP version preference; `None` lets impersonation decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVersionOverride {
    Http1Only,
    Http2,
}

/// Named proxy selectors, most specific wins: per-URL, per-scheme, `all`,
/// `all://host` (§4.C step 6).
#[derive(Debug, Clone, Default)]
pub struct ProxyMap {
    per_url: BTreeMap<String, ProxySettings>,
    per_scheme: BTreeMap<String, ProxySettings>,
    all: Option<ProxySettings>,
    all_per_host: BTreeMap<String, ProxySettings>,
}

impl ProxyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_per_url(&mut self, url: String, proxy: ProxySettings) {
        self.per_url.insert(url, proxy);
    }

    pub fn set_per_scheme(&mut self, scheme: String, proxy: ProxySettings) {
        self.per_scheme.insert(scheme, proxy);
    }

    pub fn set_all(&mut self, proxy: ProxySettings) {
        self.all = Some(proxy);
    }

    pub fn set_all_per_host(&mut self, host: String, proxy: ProxySettings) {
        self.all_per_host.insert(host, proxy);
    }

    fn select(&self, target: &Url) -> Option<&ProxySettings> {
        if let Some(p) = self.per_url.get(target.as_str()) {
            return Some(p);
        }
        if let Some(p) = self.per_scheme.get(target.scheme()) {
            return Some(p);
        }
        if let Some(host) = target.host_str() {
            if let Some(p) = self.all_per_host.get(host) {
                return Some(p);
            }
        }
        self.all.as_ref()
    }
}

/// Inputs the Option Compiler draws from; callers build one of these per
/// request from session defaults merged with per-call overrides.
pub struct CompilerInput<'a> {
    pub method: Method,
    pub url: Url,
    pub headers: OrderedHeaderMap,
    pub body: Option<BodyInput>,
    pub cookies: Option<&'a CookieJar>,
    pub extra_cookies: Vec<(String, String)>,
    pub auth: Option<AuthSpec>,
    pub fingerprint: FingerprintSpec,
    pub http_version: Option<HttpVersionOverride>,
    pub extra_fingerprint: Option<FingerprintSpec>,
    pub raw_options: RawOptions,
    pub proxies: ProxyMap,
    pub verify: VerifyPolicy,
    pub stream: bool,
}

/// What CONNECT tunneling should be used for the chosen proxy, if any.
#[derive(Debug, Clone)]
pub struct CompiledProxy {
    pub settings: ProxySettings,
    pub use_connect_tunnel: bool,
}

/// The ordered transport program the engine actually executes.
pub struct CompiledRequest {
    pub method: Method,
    pub url: Url,
    pub headers: OrderedHeaderMap,
    pub body: RequestBody,
    pub auth: CompiledAuth,
    pub fingerprint: FingerprintSpec,
    pub proxy: Option<CompiledProxy>,
    pub verify: VerifyPolicy,
    pub stream: bool,
}

/// Compile one request's inputs into a [`CompiledRequest`].
pub fn compile(input: CompilerInput<'_>) -> CompiledRequest {
    let CompilerInput {
        method,
        url,
        mut headers,
        body,
        cookies,
        extra_cookies,
        auth,
        mut fingerprint,
        http_version,
        extra_fingerprint,
        raw_options,
        proxies,
        verify,
        stream,
    } = input;

    // 1. Method + URL first — nothing downstream mutates either.

    // 2. Body encoding.
    let (body, content_type) = match body {
        Some(input) => encode_body(input),
        None => (RequestBody::Empty, None),
    };
    if let Some(content_type) = content_type {
        let _ = headers.insert("content-type", &content_type);
    }
    if matches!(method, Method::POST | Method::PUT | Method::PATCH) {
        let len = body.len().unwrap_or(0);
        let _ = headers.insert("content-length", &len.to_string());
    }

    // 3. Host header suppression.
    if let Some(host_header) = headers.get("host") {
        let matches_netloc = url
            .host_str()
            .map(|h| host_header.to_str().map(|v| v.eq_ignore_ascii_case(h)).unwrap_or(false))
            .unwrap_or(false);
        if matches_netloc {
            headers.remove("host");
        }
    }

    // 4. Cookie engine: clear ("ALL") then attach this request's cookies.
    let mut cookie_pairs: Vec<(String, String)> = Vec::new();
    if let Some(jar) = cookies {
        let context = crate::cookie::SiteContext::SameSite;
        for cookie in jar.get_cookies_for(&url, &method, context) {
            cookie_pairs.push((cookie.name, cookie.value));
        }
    }
    cookie_pairs.extend(extra_cookies);
    if !cookie_pairs.is_empty() {
        let cookie_header = cookie_pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ");
        let _ = headers.insert("cookie", &cookie_header);
    }

    // 5. Impersonation application: fingerprint headers first, then the
    // explicit http_version override, then extra fingerprint fields, then
    // raw_options (each step here can override what the previous one set).
    for (name, value) in fingerprint.header_map() {
        if headers.get(&name).is_none() {
            let _ = headers.insert(&name, &value);
        }
    }
    if let Some(preference) = http_version {
        fingerprint.http_version = match preference {
            HttpVersionOverride::Http1Only => crate::fingerprint::HttpVersionPref::Http1,
            HttpVersionOverride::Http2 => crate::fingerprint::HttpVersionPref::Http2,
        };
    }
    if let Some(extra) = extra_fingerprint {
        if !extra.tls_ciphers.is_empty() {
            fingerprint.tls_ciphers = extra.tls_ciphers;
        }
        if !extra.http2_settings.is_empty() {
            fingerprint.http2_settings = extra.http2_settings;
        }
    }
    if let Some(override_header) = raw_options.get("header_override") {
        if let Some(raw) = override_header.as_text() {
            if let Ok(raw) = std::str::from_utf8(raw) {
                if let Some((name, value)) = raw.split_once(':') {
                    let _ = headers.insert(name.trim(), value.trim());
                }
            }
        }
    }

    // 6. Proxy selection: per-URL > per-scheme > all > all://host.
    let proxy = proxies.select(&url).cloned().map(|settings| {
        if url.scheme() == "https" && settings.url.scheme() == "https" {
            warn!(
                proxy_url = %settings.url,
                "https:// proxy scheme for an https:// target is unusual \
                 (the proxy leg is TLS, not the tunnel) — verify this is intended"
            );
        }
        let use_connect_tunnel = !settings.is_socks();
        CompiledProxy {
            settings,
            use_connect_tunnel,
        }
    });

    // 7. Streaming/callbacks handled by the caller via `stream` on the
    // compiled request; the engine installs the bounded-queue sink or the
    // plain buffer sink based on this flag.

    // 8. Verify: request-level verify already won by construction, since
    // callers only ever pass one resolved VerifyPolicy into this compiler.
    let compiled_auth = auth::compile(auth.as_ref());

    CompiledRequest {
        method,
        url,
        headers,
        body,
        auth: compiled_auth,
        fingerprint,
        proxy,
        verify,
        stream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::targets::native_targets;

    fn base_input() -> CompilerInput<'static> {
        CompilerInput {
            method: Method::GET,
            url: Url::parse("https://example.com/path").unwrap(),
            headers: OrderedHeaderMap::new(),
            body: None,
            cookies: None,
            extra_cookies: Vec::new(),
            auth: None,
            fingerprint: native_targets()[0].1.clone(),
            http_version: None,
            extra_fingerprint: None,
            raw_options: RawOptions::new(),
            proxies: ProxyMap::new(),
            verify: VerifyPolicy::default(),
            stream: false,
        }
    }

    #[test]
    fn host_header_matching_netloc_is_suppressed() {
        let mut input = base_input();
        input.headers.insert("host", "example.com").unwrap();
        let compiled = compile(input);
        assert!(compiled.headers.get("host").is_none());
    }

    #[test]
    fn form_body_sets_content_type_and_length() {
        let mut input = base_input();
        input.method = Method::PUT;
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("a".to_string(), "b".to_string());
        input.body = Some(BodyInput::Form(fields));
        let compiled = compile(input);
        assert_eq!(
            compiled
                .headers
                .get("content-type")
                .unwrap()
                .to_str()
                .unwrap(),
            "application/x-www-form-urlencoded"
        );
        assert!(compiled.headers.get("content-length").is_some());
    }

    #[test]
    fn post_form_body_does_not_force_content_type() {
        let mut input = base_input();
        input.method = Method::POST;
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("a".to_string(), "b".to_string());
        input.body = Some(BodyInput::Form(fields));
        let compiled = compile(input);
        assert!(compiled.headers.get("content-type").is_none());
    }

    #[test]
    fn explicit_http_version_override_wins_over_impersonation() {
        let mut input = base_input();
        input.http_version = Some(HttpVersionOverride::Http1Only);
        let compiled = compile(input);
        assert_eq!(
            compiled.fingerprint.http_version,
            crate::fingerprint::HttpVersionPref::Http1
        );
    }

    #[test]
    fn most_specific_proxy_wins() {
        let mut input = base_input();
        let mut proxies = ProxyMap::new();
        proxies.set_all(ProxySettings::new("http://all-proxy:8080").unwrap());
        proxies.set_per_scheme(
            "https".to_string(),
            ProxySettings::new("http://scheme-proxy:8080").unwrap(),
        );
        input.proxies = proxies;
        let compiled = compile(input);
        assert_eq!(
            compiled.proxy.unwrap().settings.url.host_str(),
            Some("scheme-proxy")
        );
    }
}
