//! Authentication input compilation and per-host digest caching.
//!
//! `Basic` compiles to a header up front; `Digest` cannot be compiled without
//! a server challenge, so it compiles to a pending marker the session layer
//! resolves after a probe round-trip. Successful digest handlers are cached
//! per `(host, realm)` for the life of the session so later requests to the
//! same realm skip the probe.

use crate::http::digestauth::DigestAuthHandler;
use base64::{engine::general_purpose, Engine as _};
use dashmap::DashMap;
use zeroize::Zeroizing;

/// Credentials supplied for a request.
#[derive(Debug, Clone)]
pub enum AuthSpec {
    Basic {
        username: String,
        password: Zeroizing<String>,
    },
    Digest {
        username: String,
        password: Zeroizing<String>,
    },
}

impl AuthSpec {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        AuthSpec::Basic {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn digest(username: impl Into<String>, password: impl Into<String>) -> Self {
        AuthSpec::Digest {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

/// What the Option Compiler produces for an `auth` input (§4.C).
#[derive(Debug, Clone)]
pub enum CompiledAuth {
    /// No credentials.
    None,
    /// `Authorization: Basic ...` computed up front.
    Header(String),
    /// Credentials require a probe round-trip before they can be applied;
    /// the session layer retries once it sees a `WWW-Authenticate: Digest`
    /// challenge on a 401.
    PendingDigest {
        username: String,
        password: Zeroizing<String>,
    },
}

/// Compile an `AuthSpec` into what the transport can apply immediately.
pub fn compile(auth: Option<&AuthSpec>) -> CompiledAuth {
    match auth {
        None => CompiledAuth::None,
        Some(AuthSpec::Basic { username, password }) => {
            let creds = format!("{username}:{}", password.as_str());
            let encoded = general_purpose::STANDARD.encode(creds);
            CompiledAuth::Header(format!("Basic {encoded}"))
        }
        Some(AuthSpec::Digest { username, password }) => CompiledAuth::PendingDigest {
            username: username.clone(),
            password: password.clone(),
        },
    }
}

/// Per-host/realm digest handler cache, shared across requests in a session.
#[derive(Default)]
pub struct AuthCache {
    digest: DashMap<(String, String), DigestAuthHandler>,
}

impl AuthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a handler parsed from a fresh challenge, keyed by host+realm.
    pub fn remember(&self, host: &str, handler: DigestAuthHandler) {
        let realm = handler.realm().to_string();
        self.digest.insert((host.to_string(), realm), handler);
    }

    /// Generate an `Authorization: Digest ...` token for a cached realm, if
    /// this host/realm has already been challenged once this session.
    pub fn authorize(
        &self,
        host: &str,
        realm: &str,
        method: &str,
        uri: &str,
        username: &str,
        password: &str,
    ) -> Option<String> {
        let mut entry = self.digest.get_mut(&(host.to_string(), realm.to_string()))?;
        Some(entry.generate_auth_token(method, uri, username, password))
    }

    pub fn clear(&self) {
        self.digest.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_compiles_to_header_up_front() {
        let compiled = compile(Some(&AuthSpec::basic("user", "pass")));
        assert!(matches!(compiled, CompiledAuth::Header(h) if h == "Basic dXNlcjpwYXNz"));
    }

    #[test]
    fn digest_compiles_to_pending_marker() {
        let compiled = compile(Some(&AuthSpec::digest("user", "pass")));
        assert!(matches!(compiled, CompiledAuth::PendingDigest { .. }));
    }

    #[test]
    fn cached_handler_reused_for_second_request() {
        let cache = AuthCache::new();
        let handler =
            DigestAuthHandler::parse_challenge(r#"realm="r", nonce="n", qop="auth""#).unwrap();
        cache.remember("example.com", handler);

        let first = cache.authorize("example.com", "r", "GET", "/a", "u", "p");
        let second = cache.authorize("example.com", "r", "GET", "/b", "u", "p");
        assert!(first.is_some());
        assert!(second.is_some());
        assert_ne!(first, second, "nonce count must advance between calls");
    }
}
