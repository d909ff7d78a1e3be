//! Cookie jar: storage, RFC 6265 matching, and Public Suffix List checks.
//!
//! | Chromium (C++) | this crate | Responsibility |
//! |----------------|------------|-----------------|
//! | `net::CookieMonster` | [`jar::CookieJar`] | Cookie jar with LRU eviction |
//! | `net::CanonicalCookie` | [`canonical_cookie::CanonicalCookie`] | Single cookie representation |

pub mod canonical_cookie;
pub mod jar;
pub mod psl;

pub use canonical_cookie::{CanonicalCookie, CookiePriority, SameSite};
pub use jar::{CookieConflict, CookieJar, SiteContext};
