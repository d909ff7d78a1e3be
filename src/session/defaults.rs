//! Session-wide defaults merged with per-request overrides by the Option Compiler.

use crate::http::orderedheaders::OrderedHeaderMap;
use crate::option::{ProxyMap, RedirectPolicy, VerifyPolicy};
use std::time::Duration;
use url::Url;

/// Defaults a `Session`/`AsyncSession` applies to every request it sends,
/// unless a specific call overrides them.
pub struct SessionDefaults {
    pub base_url: Option<Url>,
    pub headers: OrderedHeaderMap,
    pub impersonate: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub proxies: ProxyMap,
    pub verify: VerifyPolicy,
    pub redirects: RedirectPolicy,
    pub persist_cookies: bool,
    pub max_clients: usize,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            base_url: None,
            headers: OrderedHeaderMap::default(),
            impersonate: "chrome".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            proxies: ProxyMap::new(),
            verify: VerifyPolicy::default(),
            redirects: RedirectPolicy::default(),
            persist_cookies: true,
            max_clients: 6,
        }
    }
}

impl SessionDefaults {
    /// Resolve a possibly-relative URL against `base_url`.
    pub fn resolve(&self, url: &str) -> Result<Url, url::ParseError> {
        match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        }
    }
}
