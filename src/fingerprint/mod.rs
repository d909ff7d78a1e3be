//! Fingerprint Registry: resolves impersonation targets into the structured
//! [`FingerprintSpec`] data model, with an optional ja3/akamai overlay.
//!
//! The registry is a catalog, not a generator — each entry in
//! [`targets::native_targets`] mirrors a real, named browser release.

pub mod akamai;
mod convert;
pub mod ja3;
pub mod registry;
pub mod spec;
pub mod targets;

pub use registry::{FingerprintRegistry, RegistryError};
pub use spec::{FingerprintSpec, HttpVersionPref, SpecValidationError};
