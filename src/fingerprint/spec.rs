//! The structured description of one impersonation target.

use std::collections::BTreeMap;

/// HTTP protocol preference for a fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVersionPref {
    Http1,
    Http2,
    Http3,
    Http3Only,
}

/// A resolved, concrete impersonation target.
///
/// Every field here is either sourced verbatim from a native target row
/// (see [`crate::fingerprint::targets`]) or produced by [`super::registry::FingerprintRegistry::apply_overrides`].
/// Field order within each group matches the grouping in the specification
/// this module implements (identity / TLS / HTTP2 / HTTP3 / defaults).
#[derive(Debug, Clone)]
pub struct FingerprintSpec {
    // identity (display-only)
    pub client: String,
    pub client_version: String,
    pub os: String,
    pub os_version: String,

    // TLS
    pub tls_version: String,
    pub tls_ciphers: Vec<String>,
    pub tls_supported_groups: Vec<String>,
    pub tls_signature_hashes: Vec<String>,
    pub tls_cert_compression: Vec<String>,
    pub tls_alpn: bool,
    pub tls_alps: bool,
    pub tls_grease: bool,
    pub tls_session_ticket: bool,
    pub tls_extension_order: String,
    pub tls_key_shares_limit: u8,
    pub tls_delegated_credentials: Vec<String>,
    pub tls_record_size_limit: Option<u16>,
    pub tls_use_new_alps_codepoint: bool,
    pub tls_signed_cert_timestamps: bool,
    pub tls_ech: Option<String>,

    // HTTP/2
    pub http2_settings: String,
    pub http2_window_update: u32,
    pub http2_pseudo_headers_order: String,
    pub http2_stream_weight: Option<u8>,
    pub http2_stream_exclusive: Option<bool>,
    pub http2_no_priority: bool,
    pub http2_priority_exclusive: Option<bool>,

    // HTTP/3
    pub http3_settings: String,
    pub http3_pseudo_headers_order: String,
    pub http3_tls_extension_order: String,
    pub quic_transport_parameters: String,

    // defaults
    pub headers: Vec<(String, String)>,
    pub header_lang: String,
    pub http_version: HttpVersionPref,
}

/// Errors raised while validating a [`FingerprintSpec`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SpecValidationError {
    #[error("http2_pseudo_headers_order must be a permutation of m,a,s,p, got {0:?}")]
    BadPseudoHeaderOrder(String),
    #[error("tls_extension_order contains an id that is not a known extension: {0}")]
    UnknownExtensionId(String),
    #[error("http_version v3/v3only cannot be combined with HTTP/2 fingerprint fields")]
    Http3WithHttp2Fields,
}

const KNOWN_TLS_EXTENSION_IDS: &[u16] = &[
    0, 5, 10, 11, 13, 16, 17, 18, 21, 23, 27, 28, 34, 35, 41, 43, 45, 51, 65281, 65037, 17513,
    13172, 30032, 2570, 6682, 10794, 14906, 19018, 23130, 27242, 31354, 35466, 39578, 43690,
    47802, 51914, 56026, 60138, 64250,
];

impl FingerprintSpec {
    /// Check the invariants named in the data model (permutation of pseudo-headers,
    /// known extension ids, and the HTTP/3-vs-HTTP/2 exclusivity rule).
    pub fn validate(&self) -> Result<(), SpecValidationError> {
        let mut chars: Vec<char> = self.http2_pseudo_headers_order.chars().collect();
        chars.sort_unstable();
        if chars != ['a', 'm', 'p', 's'] {
            return Err(SpecValidationError::BadPseudoHeaderOrder(
                self.http2_pseudo_headers_order.clone(),
            ));
        }

        if !self.tls_extension_order.is_empty() {
            for id_str in self.tls_extension_order.split('-') {
                let id: u16 = id_str
                    .parse()
                    .map_err(|_| SpecValidationError::UnknownExtensionId(id_str.to_string()))?;
                if !KNOWN_TLS_EXTENSION_IDS.contains(&id) {
                    return Err(SpecValidationError::UnknownExtensionId(id_str.to_string()));
                }
            }
        }

        let is_h3 = matches!(
            self.http_version,
            HttpVersionPref::Http3 | HttpVersionPref::Http3Only
        );
        if is_h3 && !self.http2_settings.is_empty() {
            return Err(SpecValidationError::Http3WithHttp2Fields);
        }

        Ok(())
    }

    /// Headers as an ordered map, preserving the insertion order native targets define.
    pub fn header_map(&self) -> BTreeMap<String, String> {
        self.headers.iter().cloned().collect()
    }
}
