//! A single stored cookie (Chromium's `net::CanonicalCookie`).

use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
    pub last_access_time: OffsetDateTime,
    pub secure: bool,
    pub http_only: bool,
    pub host_only: bool,
    pub same_site: SameSite,
    pub priority: CookiePriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Unspecified,
    NoRestriction,
    Lax,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CookiePriority {
    Low,
    Medium,
    High,
}

impl CanonicalCookie {
    pub fn new(
        name: String,
        value: String,
        domain: String,
        path: String,
        creation_time: OffsetDateTime,
        expiration_time: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            name,
            value,
            domain,
            path,
            creation_time,
            expiration_time,
            last_access_time: creation_time,
            secure: false,
            http_only: false,
            host_only: true,
            same_site: SameSite::Unspecified,
            priority: CookiePriority::Medium,
        }
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        match self.expiration_time {
            Some(expiry) => expiry < current_time,
            None => false,
        }
    }

    /// Validate `__Secure-`/`__Host-` prefixes per RFC 6265bis.
    pub fn validate_prefix(
        &self,
        secure_origin: bool,
    ) -> Result<(), crate::base::neterror::NetError> {
        use crate::base::neterror::NetError;

        if self.name.starts_with("__Secure-") && (!self.secure || !secure_origin) {
            return Err(NetError::CookieInvalidPrefix);
        }

        if self.name.starts_with("__Host-")
            && (!self.secure || self.path != "/" || !self.host_only || !secure_origin)
        {
            return Err(NetError::CookieInvalidPrefix);
        }

        Ok(())
    }

    /// `SameSite=None` cookies must carry `Secure` (RFC 6265bis §5.2).
    pub fn validate_samesite_none(&self) -> Result<(), crate::base::neterror::NetError> {
        if self.same_site == SameSite::NoRestriction && !self.secure {
            return Err(crate::base::neterror::NetError::CookieInvalidData {
                reason: "SameSite=None requires Secure".to_string(),
            });
        }
        Ok(())
    }
}
