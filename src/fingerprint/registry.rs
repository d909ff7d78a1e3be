//! Resolves impersonation target names (plus optional ja3/akamai/extra-field
//! overrides) into a concrete [`FingerprintSpec`].

use super::akamai::{self, AkamaiParseError};
use super::ja3::{self, Ja3ParseError};
use super::spec::FingerprintSpec;
use super::targets;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown impersonation target: {0}")]
    UnknownTarget(String),
    #[error("invalid ja3 string: {0}")]
    Ja3(#[from] Ja3ParseError),
    #[error("invalid akamai fingerprint string: {0}")]
    Akamai(#[from] AkamaiParseError),
    #[error("failed to read fingerprint overlay file {path}: {source}")]
    OverlayIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fingerprint overlay file {path}: {source}")]
    OverlayParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk overlay row. Only the identity + header fields are commonly
/// customized this way; unset fields fall back to the base native target.
#[derive(Debug, serde::Deserialize)]
struct OverlayRow {
    name: String,
    client: Option<String>,
    client_version: Option<String>,
    headers: Option<Vec<(String, String)>>,
}

/// The built-in catalog plus any user-supplied on-disk overlay.
pub struct FingerprintRegistry {
    targets: HashMap<String, FingerprintSpec>,
}

impl Default for FingerprintRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintRegistry {
    pub fn new() -> Self {
        Self {
            targets: targets::native_targets()
                .into_iter()
                .map(|(name, spec)| (name.to_string(), spec))
                .collect(),
        }
    }

    /// Merge in an on-disk overlay file (a JSON array of [`OverlayRow`]).
    /// Rows whose name matches an existing native target replace the
    /// client/client_version/headers fields named; unnamed targets are
    /// rejected as malformed input, not silently skipped.
    pub fn load_overlay(&mut self, path: &Path) -> Result<(), RegistryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::OverlayIo {
            path: path.display().to_string(),
            source,
        })?;
        let rows: Vec<OverlayRow> =
            serde_json::from_str(&raw).map_err(|source| RegistryError::OverlayParse {
                path: path.display().to_string(),
                source,
            })?;

        for row in rows {
            let mut spec = self
                .targets
                .get(&row.name)
                .cloned()
                .unwrap_or_else(|| targets::native_targets()[0].1.clone());
            if let Some(client) = row.client {
                spec.client = client;
            }
            if let Some(version) = row.client_version {
                spec.client_version = version;
            }
            if let Some(headers) = row.headers {
                spec.headers = headers;
            }
            self.targets.insert(row.name, spec);
        }
        Ok(())
    }

    /// All known target names, native and overlaid.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.targets.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve a target name to its spec.
    pub fn resolve(&self, name: &str) -> Result<FingerprintSpec, RegistryError> {
        self.targets
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownTarget(name.to_string()))
    }

    /// Apply optional raw ja3/akamai/extra-field overrides onto a resolved
    /// spec. A named target and a raw string that disagree at field level
    /// are permitted — the overlay wins — but a warning is emitted once.
    pub fn apply_overrides(
        &self,
        mut spec: FingerprintSpec,
        ja3: Option<&str>,
        akamai_str: Option<&str>,
        extra_fp: Option<&FingerprintSpec>,
    ) -> Result<FingerprintSpec, RegistryError> {
        if let Some(raw) = ja3 {
            let overlay = ja3::parse(raw)?;
            if overlay.tls_ciphers != spec.tls_ciphers {
                warn!(
                    target_ciphers = ?spec.tls_ciphers,
                    ja3_ciphers = ?overlay.tls_ciphers,
                    "ja3 override disagrees with named target's cipher list"
                );
            }
            spec.tls_version = overlay.tls_version;
            spec.tls_ciphers = overlay.tls_ciphers;
            spec.tls_extension_order = overlay.tls_extension_order;
            spec.tls_supported_groups = overlay.tls_supported_groups;
        }

        if let Some(raw) = akamai_str {
            let overlay = akamai::parse(raw)?;
            if overlay.http2_pseudo_headers_order != spec.http2_pseudo_headers_order {
                warn!(
                    target_order = %spec.http2_pseudo_headers_order,
                    akamai_order = %overlay.http2_pseudo_headers_order,
                    "akamai override disagrees with named target's pseudo-header order"
                );
            }
            spec.http2_settings = overlay.http2_settings;
            spec.http2_window_update = overlay.http2_window_update;
            spec.http2_pseudo_headers_order = overlay.http2_pseudo_headers_order;
        }

        if let Some(extra) = extra_fp {
            spec = merge_extra(spec, extra);
        }

        spec.validate()
            .map_err(|e| RegistryError::UnknownTarget(e.to_string()))?;
        Ok(spec)
    }
}

/// Last-wins merge of any non-default field on `extra` into `base`.
/// Used for the `extra_fp` escape hatch (§4.C step 5).
fn merge_extra(mut base: FingerprintSpec, extra: &FingerprintSpec) -> FingerprintSpec {
    if !extra.tls_version.is_empty() {
        base.tls_version = extra.tls_version.clone();
    }
    if !extra.tls_ciphers.is_empty() {
        base.tls_ciphers = extra.tls_ciphers.clone();
    }
    if !extra.http2_settings.is_empty() {
        base.http2_settings = extra.http2_settings.clone();
    }
    if !extra.headers.is_empty() {
        base.headers = extra.headers.clone();
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names_and_rejects_unknown() {
        let registry = FingerprintRegistry::new();
        assert!(registry.resolve("chrome_140").is_ok());
        assert!(matches!(
            registry.resolve("netscape_navigator"),
            Err(RegistryError::UnknownTarget(_))
        ));
    }

    #[test]
    fn unversioned_name_resolves_to_latest() {
        let registry = FingerprintRegistry::new();
        let latest = registry.resolve("chrome").unwrap();
        let pinned = registry.resolve("chrome_140").unwrap();
        assert_eq!(latest.client_version, pinned.client_version);
    }

    #[test]
    fn ja3_overlay_replaces_tls_fields() {
        let registry = FingerprintRegistry::new();
        let spec = registry.resolve("chrome_140").unwrap();
        let merged = registry
            .apply_overrides(spec, Some("771,4865-4866,0-23,29-23,0"), None, None)
            .unwrap();
        assert_eq!(merged.tls_version, "771");
        assert_eq!(merged.tls_ciphers, vec!["4865", "4866"]);
    }

    #[test]
    fn overlay_loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.json");
        std::fs::write(
            &path,
            r#"[{"name":"chrome_140","client_version":"141.0.0.0"}]"#,
        )
        .unwrap();

        let mut registry = FingerprintRegistry::new();
        registry.load_overlay(&path).unwrap();
        assert_eq!(registry.resolve("chrome_140").unwrap().client_version, "141.0.0.0");
    }
}
