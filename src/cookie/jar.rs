//! In-memory cookie jar (Chromium's `net::CookieMonster`).

use super::canonical_cookie::{CanonicalCookie, CookiePriority, SameSite};
use super::psl;
use dashmap::DashMap;
use http::Method;
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

const MAX_COOKIES_PER_DOMAIN: usize = 50;
const MAX_COOKIES_TOTAL: usize = 3000;

/// Raised by [`CookieJar::named`] when the same cookie name is stored for
/// two domains that cannot be resolved to a single value for the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cookie {name} present for incompatible domains ({domain_a} vs {domain_b})")]
pub struct CookieConflict {
    pub name: String,
    pub domain_a: String,
    pub domain_b: String,
}

/// Same-site context a request is being evaluated under, mirroring
/// Chromium's `CookieOptions::SameSiteCookieContext`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteContext {
    /// Same-site request (including the first request of a session).
    SameSite,
    /// Cross-site, but a top-level navigation following a redirect — eligible for `Lax`.
    CrossSiteLax,
    /// Cross-site subresource or non-navigational request.
    CrossSiteStrict,
}

pub struct CookieJar {
    store: Arc<DashMap<String, Vec<CanonicalCookie>>>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    /// Store a cookie, enforcing per-domain/global caps, PSL rejection, and
    /// the `SameSite=None` requires-`Secure` invariant. Silently drops cookies
    /// that fail validation, mirroring a browser's cookie jar rather than
    /// surfacing a hard error for malformed `Set-Cookie` lines.
    pub fn set(&self, cookie: CanonicalCookie) {
        if cookie.validate_samesite_none().is_err() {
            return;
        }
        if !cookie.host_only && psl::is_public_suffix(cookie.domain.trim_start_matches('.')) {
            return;
        }

        let mut entry = self.store.entry(cookie.domain.clone()).or_default();
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);

        while entry.len() >= MAX_COOKIES_PER_DOMAIN {
            let oldest_idx = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| c.creation_time)
                .map(|(i, _)| i);
            match oldest_idx {
                Some(idx) => {
                    entry.remove(idx);
                }
                None => break,
            }
        }

        entry.push(cookie);
        drop(entry);
        self.enforce_global_limit();
    }

    fn enforce_global_limit(&self) {
        while self.total_count() > MAX_COOKIES_TOTAL {
            let mut oldest: Option<(String, usize, OffsetDateTime)> = None;
            for entry in self.store.iter() {
                let domain = entry.key().clone();
                for (idx, cookie) in entry.value().iter().enumerate() {
                    let older = oldest
                        .as_ref()
                        .is_none_or(|(_, _, t)| cookie.creation_time < *t);
                    if older {
                        oldest = Some((domain.clone(), idx, cookie.creation_time));
                    }
                }
            }
            match oldest {
                Some((domain, idx, _)) => {
                    if let Some(mut entry) = self.store.get_mut(&domain) {
                        if idx < entry.len() {
                            entry.remove(idx);
                        }
                    }
                }
                None => break,
            }
        }
    }

    /// Clear every cookie in the jar.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Parse `Set-Cookie` lines from a response and merge them into the jar,
    /// attributing domain/host-only status against `url`.
    pub fn update_from_response(&self, url: &Url, set_cookie_lines: &[String]) {
        for line in set_cookie_lines {
            self.parse_and_save_cookie(url, line);
        }
    }

    fn parse_and_save_cookie(&self, url: &Url, cookie_line: &str) {
        let Ok(parsed) = cookie::Cookie::parse(cookie_line.to_string()) else {
            return;
        };
        let now = OffsetDateTime::now_utc();

        let (domain, host_only) = match parsed.domain() {
            Some(d) => (d.trim_start_matches('.').to_lowercase(), false),
            None => (url.host_str().unwrap_or("").to_lowercase(), true),
        };

        let path = parsed.path().unwrap_or("/").to_string();
        let expiration_time = parsed.expires().and_then(|e| e.datetime());

        let same_site = match parsed.same_site() {
            Some(cookie::SameSite::Lax) => SameSite::Lax,
            Some(cookie::SameSite::Strict) => SameSite::Strict,
            Some(cookie::SameSite::None) => SameSite::NoRestriction,
            None => SameSite::Unspecified,
        };

        let cookie = CanonicalCookie {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            path,
            creation_time: now,
            expiration_time,
            last_access_time: now,
            secure: parsed.secure().unwrap_or(false),
            http_only: parsed.http_only().unwrap_or(false),
            host_only,
            same_site,
            priority: CookiePriority::Medium,
        };

        if cookie.validate_prefix(url.scheme() == "https").is_err() {
            return;
        }

        self.set(cookie);
    }

    /// Cookies that would be attached to a request for `url` under `method`
    /// and `context`, longest-path-first then oldest-first (Chromium's
    /// historical ordering, also what `curl`'s cookie engine produces).
    pub fn get_cookies_for(
        &self,
        url: &Url,
        method: &Method,
        context: SiteContext,
    ) -> Vec<CanonicalCookie> {
        let mut result = Vec::new();
        let host = url.host_str().unwrap_or("");
        let now = OffsetDateTime::now_utc();

        for domain in Self::candidate_domains(host) {
            let Some(entry) = self.store.get(&domain) else {
                continue;
            };
            for cookie in entry.iter() {
                if !Self::domain_matches(&cookie.domain, host, cookie.host_only) {
                    continue;
                }
                if !Self::path_matches(&cookie.path, url.path()) {
                    continue;
                }
                if cookie.secure && url.scheme() != "https" {
                    continue;
                }
                if cookie.is_expired(now) {
                    continue;
                }
                if !Self::samesite_allows(cookie.same_site, method, context) {
                    continue;
                }
                result.push(cookie.clone());
            }
        }

        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
        });

        result
    }

    fn samesite_allows(same_site: SameSite, method: &Method, context: SiteContext) -> bool {
        match (same_site, context) {
            (_, SiteContext::SameSite) => true,
            (SameSite::Unspecified | SameSite::Lax, SiteContext::CrossSiteLax) => {
                matches!(*method, Method::GET | Method::HEAD)
            }
            (SameSite::NoRestriction, SiteContext::CrossSiteLax) => true,
            (_, SiteContext::CrossSiteStrict) => false,
        }
    }

    fn domain_matches(cookie_domain: &str, request_host: &str, host_only: bool) -> bool {
        if host_only {
            return cookie_domain.eq_ignore_ascii_case(request_host);
        }

        let cookie_domain = cookie_domain.trim_start_matches('.');
        if request_host.eq_ignore_ascii_case(cookie_domain) {
            return true;
        }

        if request_host.len() > cookie_domain.len() {
            let suffix = &request_host[request_host.len() - cookie_domain.len()..];
            if suffix.eq_ignore_ascii_case(cookie_domain) {
                let boundary = request_host.chars().nth(request_host.len() - cookie_domain.len() - 1);
                return boundary == Some('.');
            }
        }
        false
    }

    fn path_matches(cookie_path: &str, request_path: &str) -> bool {
        if request_path == cookie_path {
            return true;
        }
        if let Some(rest) = request_path.strip_prefix(cookie_path) {
            if cookie_path.ends_with('/') {
                return true;
            }
            return rest.starts_with('/');
        }
        false
    }

    fn candidate_domains(host: &str) -> Vec<String> {
        let mut domains = vec![host.to_string()];
        let parts: Vec<&str> = host.split('.').collect();
        for i in 1..parts.len().saturating_sub(1) {
            domains.push(parts[i..].join("."));
        }
        domains
    }

    /// Look up all stored values for `name`. Returns `Err` if the jar holds
    /// the name under two or more domains with no single resolvable value.
    pub fn named(&self, name: &str) -> Result<Option<CanonicalCookie>, CookieConflict> {
        let mut found: Option<CanonicalCookie> = None;
        for entry in self.store.iter() {
            for cookie in entry.value().iter() {
                if cookie.name != name {
                    continue;
                }
                match &found {
                    None => found = Some(cookie.clone()),
                    Some(existing) if existing.domain != cookie.domain => {
                        return Err(CookieConflict {
                            name: name.to_string(),
                            domain_a: existing.domain.clone(),
                            domain_b: cookie.domain.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(found)
    }

    pub fn total_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    pub fn iter_all(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie(name: &str, domain: &str, host_only: bool) -> CanonicalCookie {
        let now = OffsetDateTime::now_utc();
        let mut c = CanonicalCookie::new(
            name.to_string(),
            "v".to_string(),
            domain.to_string(),
            "/".to_string(),
            now,
            None,
        );
        c.host_only = host_only;
        c
    }

    #[test]
    fn domain_cookie_matches_subdomain() {
        let jar = CookieJar::new();
        jar.set(cookie("a", "example.com", false));
        let url = Url::parse("https://sub.example.com/x").unwrap();
        let got = jar.get_cookies_for(&url, &Method::GET, SiteContext::SameSite);
        assert_eq!(got.len(), 1);
    }

    #[test]
    fn host_only_cookie_does_not_match_subdomain() {
        let jar = CookieJar::new();
        jar.set(cookie("a", "example.com", true));
        let url = Url::parse("https://sub.example.com/x").unwrap();
        let got = jar.get_cookies_for(&url, &Method::GET, SiteContext::SameSite);
        assert!(got.is_empty());
    }

    #[test]
    fn rejects_public_suffix_domain_cookie() {
        let jar = CookieJar::new();
        jar.set(cookie("a", "com", false));
        assert_eq!(jar.total_count(), 0);
    }

    #[test]
    fn strict_cookie_not_sent_cross_site() {
        let jar = CookieJar::new();
        let mut c = cookie("a", "example.com", true);
        c.same_site = SameSite::Strict;
        jar.set(c);
        let url = Url::parse("https://example.com/x").unwrap();
        let got = jar.get_cookies_for(&url, &Method::GET, SiteContext::CrossSiteLax);
        assert!(got.is_empty());
    }

    #[test]
    fn lax_cookie_sent_on_top_level_get_redirect() {
        let jar = CookieJar::new();
        let mut c = cookie("a", "example.com", true);
        c.same_site = SameSite::Lax;
        jar.set(c);
        let url = Url::parse("https://example.com/x").unwrap();
        let got = jar.get_cookies_for(&url, &Method::GET, SiteContext::CrossSiteLax);
        assert_eq!(got.len(), 1);
    }

    #[test]
    fn conflict_detected_across_domains() {
        let jar = CookieJar::new();
        jar.set(cookie("a", "example.com", true));
        jar.set(cookie("a", "other.com", true));
        assert!(jar.named("a").is_err());
    }
}
