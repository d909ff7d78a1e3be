//! HTTP protocol handling.
//!
//! Provides HTTP/1.1 and HTTP/2 support mirroring Chromium's `net/http/`:
//! - [`transaction`]: State machine for request/response lifecycle
//! - [`streamfactory`]: H1/H2 stream creation
//! - [`multipart`]: Multipart form data encoding
//! - [`requestbody`]: Outbound body encoding (form/json/multipart/stream)

pub mod digestauth;
pub mod h2fingerprint;
pub mod multipart;
pub mod orderedheaders;
pub mod requestbody;
pub mod retry;
pub mod streamfactory;
pub mod transaction;

// Re-exports for convenience
pub use h2fingerprint::H2Fingerprint;
pub use orderedheaders::OrderedHeaderMap;
pub use requestbody::RequestBody;
