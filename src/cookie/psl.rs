//! Public Suffix List checks, used to reject supercookies at store time.

use psl::{List, Psl};

pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = domain.to_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    match List.suffix(domain_bytes) {
        Some(suffix) => suffix.as_bytes() == domain_bytes,
        None => false,
    }
}

pub fn registrable_domain(domain: &str) -> Option<String> {
    let domain_lower = domain.to_lowercase();
    psl::domain(domain_lower.as_bytes())
        .and_then(|d| std::str::from_utf8(d.as_bytes()).ok())
        .map(|s| s.to_string())
}

pub fn is_valid_cookie_domain(cookie_domain: &str, url_host: &str) -> bool {
    let cookie_domain = cookie_domain.strip_prefix('.').unwrap_or(cookie_domain);
    let cookie_domain_lower = cookie_domain.to_lowercase();
    let url_host_lower = url_host.to_lowercase();

    if is_public_suffix(&cookie_domain_lower) {
        return false;
    }

    if url_host_lower == cookie_domain_lower {
        return true;
    }

    url_host_lower.ends_with(&format!(".{}", cookie_domain_lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_suffix_rejects_bare_tld() {
        assert!(is_public_suffix("com"));
        assert!(is_public_suffix("co.uk"));
        assert!(!is_public_suffix("example.com"));
    }

    #[test]
    fn registrable_domain_strips_subdomains() {
        assert_eq!(
            registrable_domain("deep.sub.example.com"),
            Some("example.com".to_string())
        );
        assert_eq!(registrable_domain("com"), None);
    }

    #[test]
    fn rejects_cookie_domain_naming_a_public_suffix() {
        assert!(!is_valid_cookie_domain("com", "example.com"));
        assert!(!is_valid_cookie_domain(".co.uk", "example.co.uk"));
        assert!(is_valid_cookie_domain(".example.com", "sub.example.com"));
    }
}
