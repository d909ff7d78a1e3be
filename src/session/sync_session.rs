//! Blocking facade over [`AsyncSession`], for callers outside a Tokio runtime.

use crate::error::RequestError;
use crate::response::HttpResponse;
use crate::session::async_session::{AsyncSession, AsyncSessionBuilder, RequestBuilder as AsyncRequestBuilder};
use http::Method;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// A `Session` owns a single-threaded Tokio runtime and drives every request
/// to completion on it, so the rest of the crate can stay `async` throughout.
pub struct Session {
    inner: AsyncSession,
    runtime: Arc<Runtime>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_defaults(crate::session::SessionDefaults::default())
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    fn with_defaults(defaults: crate::session::SessionDefaults) -> Self {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to start session runtime");
        // `AsyncSession::new` spawns the engine's safeguard task, which
        // needs an entered runtime context to do so.
        let _guard = runtime.enter();
        let inner = AsyncSession::with_defaults(defaults);
        drop(_guard);
        Self {
            inner,
            runtime: Arc::new(runtime),
        }
    }

    pub fn get<U: AsRef<str>>(&self, url: U) -> BlockingRequestBuilder<'_> {
        self.request(Method::GET, url)
    }

    pub fn post<U: AsRef<str>>(&self, url: U) -> BlockingRequestBuilder<'_> {
        self.request(Method::POST, url)
    }

    pub fn put<U: AsRef<str>>(&self, url: U) -> BlockingRequestBuilder<'_> {
        self.request(Method::PUT, url)
    }

    pub fn delete<U: AsRef<str>>(&self, url: U) -> BlockingRequestBuilder<'_> {
        self.request(Method::DELETE, url)
    }

    pub fn head<U: AsRef<str>>(&self, url: U) -> BlockingRequestBuilder<'_> {
        self.request(Method::HEAD, url)
    }

    pub fn request<U: AsRef<str>>(&self, method: Method, url: U) -> BlockingRequestBuilder<'_> {
        BlockingRequestBuilder {
            runtime: &self.runtime,
            inner: self.inner.request(method, url),
        }
    }

    pub fn async_session(&self) -> &AsyncSession {
        &self.inner
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct SessionBuilder {
    async_builder: AsyncSessionBuilder,
}

impl SessionBuilder {
    pub fn base_url(mut self, url: url::Url) -> Self {
        self.async_builder = self.async_builder.base_url(url);
        self
    }

    pub fn impersonate<S: Into<String>>(mut self, name: S) -> Self {
        self.async_builder = self.async_builder.impersonate(name);
        self
    }

    pub fn build(self) -> Session {
        Session::with_defaults(self.async_builder.into_defaults())
    }
}

/// A request builder that blocks the calling thread on `send()`.
pub struct BlockingRequestBuilder<'a> {
    runtime: &'a Runtime,
    inner: AsyncRequestBuilder,
}

impl<'a> BlockingRequestBuilder<'a> {
    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.inner = self.inner.header(key, value);
        self
    }

    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Self {
        self.inner = self.inner.json(value);
        self
    }

    pub fn basic_auth<U: Into<String>, P: Into<String>>(mut self, username: U, password: P) -> Self {
        self.inner = self.inner.basic_auth(username, password);
        self
    }

    pub fn send(self) -> Result<HttpResponse, RequestError> {
        self.runtime.block_on(self.inner.send())
    }
}
