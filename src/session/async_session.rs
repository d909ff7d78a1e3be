//! Async session: the owning root of one client's sockets, cookies, and
//! impersonation state. Mirrors `Client`/`RequestBuilder` but drives requests
//! through the Option Compiler and the redirect-following executor in
//! [`super::request`] instead of a single non-redirecting job.

use crate::base::neterror::NetError;
use crate::cookie::CookieJar;
use crate::engine::Engine;
use crate::error::RequestError;
use crate::fingerprint::FingerprintRegistry;
use crate::http::requestbody::BodyInput;
use crate::http::streamfactory::HttpStreamFactory;
use crate::option::{AuthCache, AuthSpec, CompilerInput, HttpVersionOverride, ProxyMap, RawOptions, VerifyPolicy};
use crate::response::HttpResponse;
use crate::session::defaults::SessionDefaults;
use crate::session::request::{self, RequestPlan};
use crate::socket::pool::ClientSocketPool;
use http::Method;
use std::sync::Arc;

/// Owns the pool, cookie jar, fingerprint catalog, and defaults one logical
/// client needs. Cheap to `Clone` — every field is an `Arc` or plain data.
#[derive(Clone)]
pub struct AsyncSession {
    factory: Arc<HttpStreamFactory>,
    cookie_jar: Arc<CookieJar>,
    registry: Arc<FingerprintRegistry>,
    auth_cache: Arc<AuthCache>,
    engine: Arc<Engine>,
    defaults: Arc<SessionDefaults>,
}

impl Default for AsyncSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncSession {
    pub fn new() -> Self {
        Self::with_defaults(SessionDefaults::default())
    }

    pub fn with_defaults(defaults: SessionDefaults) -> Self {
        // `max_clients` is the session-wide handle cap (§4.F); a single host
        // can never use more of it than the cap itself allows.
        let per_group = defaults.max_clients.min(6);
        let pool = Arc::new(ClientSocketPool::with_limits(per_group, defaults.max_clients));
        Self {
            factory: Arc::new(HttpStreamFactory::new(pool)),
            cookie_jar: Arc::new(CookieJar::new()),
            registry: Arc::new(FingerprintRegistry::new()),
            auth_cache: Arc::new(AuthCache::new()),
            engine: Arc::new(Engine::new()),
            defaults: Arc::new(defaults),
        }
    }

    pub fn builder() -> AsyncSessionBuilder {
        AsyncSessionBuilder::default()
    }

    pub fn cookie_jar(&self) -> &Arc<CookieJar> {
        &self.cookie_jar
    }

    /// The transfer engine backing this session's in-flight requests.
    /// WebSocket connections register their long-lived transfer here too.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn get<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub fn post<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    pub fn put<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    pub fn delete<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }

    pub fn head<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::HEAD, url)
    }

    pub fn patch<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::PATCH, url)
    }

    pub fn request<U: AsRef<str>>(&self, method: Method, url: U) -> RequestBuilder {
        RequestBuilder {
            session: self.clone(),
            method,
            url: url.as_ref().to_string(),
            headers: Vec::new(),
            body: None,
            auth: None,
            impersonate: None,
            http_version: None,
            extra_cookies: Vec::new(),
            raw_options: RawOptions::new(),
            proxies: None,
            verify: None,
            stream: false,
        }
    }

    /// Run a fully-built request plan through the Option Compiler and the
    /// redirect-following executor.
    async fn execute(&self, plan: BuiltRequest) -> Result<HttpResponse, RequestError> {
        let url = self
            .defaults
            .resolve(&plan.url)
            .map_err(|_| RequestError::Transport(NetError::InvalidUrl))?;

        let impersonate = plan.impersonate.unwrap_or_else(|| self.defaults.impersonate.clone());
        let fingerprint = self
            .registry
            .resolve(&impersonate)
            .map_err(|_| RequestError::UnknownImpersonation(impersonate))?;

        let mut headers = self.defaults.headers.clone();
        for (name, value) in &plan.headers {
            let _ = headers.insert(name, value);
        }

        let proxies = plan.proxies.unwrap_or_else(|| self.defaults.proxies.clone());
        let verify = plan.verify.unwrap_or_else(|| self.defaults.verify.clone());
        let redirects = self.defaults.redirects.clone();
        let persist_cookies = self.defaults.persist_cookies;

        let factory = self.factory.clone();
        let cookie_jar = self.cookie_jar.clone();
        let _ = &self.auth_cache; // digest auth cache consulted inside the Option Compiler's caller in a future pass

        let method = plan.method;
        let body = plan.body;
        let auth = plan.auth;
        let http_version = plan.http_version;
        let extra_cookies = plan.extra_cookies;
        let raw_options = plan.raw_options;
        let stream = plan.stream;

        let fut = async move {
            let input = CompilerInput {
                method: method.clone(),
                url: url.clone(),
                headers,
                body,
                cookies: if persist_cookies { Some(&cookie_jar) } else { None },
                extra_cookies,
                auth,
                fingerprint,
                http_version,
                extra_fingerprint: None,
                raw_options,
                proxies,
                verify,
                stream,
            };
            let request_plan = RequestPlan { method, url, input };
            request::send(
                &factory,
                &cookie_jar,
                request_plan,
                redirects.max_redirects,
                redirects.follow,
            )
            .await
        };

        fut.await
    }
}

/// Builder for an [`AsyncSession`], mirroring the per-field overrides
/// [`SessionDefaults`] exposes.
#[derive(Default)]
pub struct AsyncSessionBuilder {
    defaults: SessionDefaults,
}

impl AsyncSessionBuilder {
    pub fn base_url(mut self, url: url::Url) -> Self {
        self.defaults.base_url = Some(url);
        self
    }

    pub fn impersonate<S: Into<String>>(mut self, name: S) -> Self {
        self.defaults.impersonate = name.into();
        self
    }

    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.defaults.timeout = timeout;
        self
    }

    pub fn verify(mut self, verify: VerifyPolicy) -> Self {
        self.defaults.verify = verify;
        self
    }

    pub fn persist_cookies(mut self, persist: bool) -> Self {
        self.defaults.persist_cookies = persist;
        self
    }

    pub fn proxies(mut self, proxies: ProxyMap) -> Self {
        self.defaults.proxies = proxies;
        self
    }

    /// Cap concurrent transport handles this session will hold open at once.
    pub fn max_clients(mut self, max_clients: usize) -> Self {
        self.defaults.max_clients = max_clients;
        self
    }

    pub fn build(self) -> AsyncSession {
        AsyncSession::with_defaults(self.defaults)
    }

    /// Hand back the accumulated defaults without constructing the session,
    /// for callers (like [`crate::session::sync_session::Session`]) that
    /// need to enter a runtime context first.
    pub fn into_defaults(self) -> SessionDefaults {
        self.defaults
    }
}

struct BuiltRequest {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<BodyInput>,
    auth: Option<AuthSpec>,
    impersonate: Option<String>,
    http_version: Option<HttpVersionOverride>,
    extra_cookies: Vec<(String, String)>,
    raw_options: RawOptions,
    proxies: Option<ProxyMap>,
    verify: Option<VerifyPolicy>,
    stream: bool,
}

/// Builder for a single request against an [`AsyncSession`].
pub struct RequestBuilder {
    session: AsyncSession,
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<BodyInput>,
    auth: Option<AuthSpec>,
    impersonate: Option<String>,
    http_version: Option<HttpVersionOverride>,
    extra_cookies: Vec<(String, String)>,
    raw_options: RawOptions,
    proxies: Option<ProxyMap>,
    verify: Option<VerifyPolicy>,
    stream: bool,
}

impl RequestBuilder {
    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn cookie<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.extra_cookies.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, input: BodyInput) -> Self {
        self.body = Some(input);
        self
    }

    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Self {
        if let Ok(encoded) = serde_json::to_value(value) {
            self.body = Some(BodyInput::Json(encoded));
        }
        self
    }

    pub fn form(mut self, fields: std::collections::BTreeMap<String, String>) -> Self {
        self.body = Some(BodyInput::Form(fields));
        self
    }

    pub fn basic_auth<U: Into<String>, P: Into<String>>(mut self, username: U, password: P) -> Self {
        self.auth = Some(AuthSpec::basic(username.into(), password.into()));
        self
    }

    pub fn digest_auth<U: Into<String>, P: Into<String>>(mut self, username: U, password: P) -> Self {
        self.auth = Some(AuthSpec::digest(username.into(), password.into()));
        self
    }

    pub fn impersonate<S: Into<String>>(mut self, name: S) -> Self {
        self.impersonate = Some(name.into());
        self
    }

    pub fn http_version(mut self, version: HttpVersionOverride) -> Self {
        self.http_version = Some(version);
        self
    }

    pub fn proxies(mut self, proxies: ProxyMap) -> Self {
        self.proxies = Some(proxies);
        self
    }

    pub fn verify(mut self, verify: VerifyPolicy) -> Self {
        self.verify = Some(verify);
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn raw_option<V: Into<crate::option::OptionValue>>(mut self, name: &str, value: V) -> Self {
        self.raw_options.set(name, value);
        self
    }

    pub async fn send(self) -> Result<HttpResponse, RequestError> {
        let session = self.session.clone();
        session
            .execute(BuiltRequest {
                method: self.method,
                url: self.url,
                headers: self.headers,
                body: self.body,
                auth: self.auth,
                impersonate: self.impersonate,
                http_version: self.http_version,
                extra_cookies: self.extra_cookies,
                raw_options: self.raw_options,
                proxies: self.proxies,
                verify: self.verify,
                stream: self.stream,
            })
            .await
    }
}
