//! Bridges a declarative [`FingerprintSpec`] onto the concrete transport
//! configuration types ([`Emulation`]) the socket/HTTP layers consume.

use super::spec::FingerprintSpec;
use crate::emulation::{Emulation, Http1Options, Http2Options};
use crate::http::H2Fingerprint;
use crate::socket::tls::{AlpnProtocol, TlsOptions, TlsVersion};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::str::FromStr;

impl FingerprintSpec {
    /// Build the `Emulation` bundle (`TlsOptions`/`Http2Options`/headers)
    /// this spec describes, for handing to the socket pool and stream
    /// factory exactly as a native `Emulation` would be.
    pub fn to_emulation(&self) -> Emulation {
        Emulation::builder()
            .tls_options(self.tls_options())
            .http1_options(Http1Options::default())
            .http2_options(self.http2_options())
            .headers(self.header_map_typed())
            .build()
    }

    fn tls_options(&self) -> TlsOptions {
        TlsOptions::builder()
            .alpn_protocols([AlpnProtocol::HTTP2, AlpnProtocol::HTTP1])
            .min_tls_version(TlsVersion::TLS_1_2)
            .max_tls_version(TlsVersion::TLS_1_3)
            .cipher_list(cipher_list_string(&self.tls_ciphers))
            .curves_list(self.tls_supported_groups.join(":"))
            .sigalgs_list(self.tls_signature_hashes.join(":"))
            .grease_enabled(self.tls_grease)
            .permute_extensions(false)
            .enable_ocsp_stapling(false)
            .enable_signed_cert_timestamps(self.tls_signed_cert_timestamps)
            .session_ticket(self.tls_session_ticket)
            .key_shares_limit(self.tls_key_shares_limit)
            .record_size_limit(self.tls_record_size_limit)
            .build()
    }

    fn http2_options(&self) -> Http2Options {
        let fingerprint = match self.client.as_str() {
            "Firefox" => H2Fingerprint::firefox(),
            "Safari" => H2Fingerprint::safari(),
            _ => H2Fingerprint::chrome(),
        };

        Http2Options::builder()
            .fingerprint(fingerprint)
            .header_table_size(
                settings_value(&self.http2_settings, 1).unwrap_or(65536),
            )
            .max_header_list_size(
                settings_value(&self.http2_settings, 6).unwrap_or(262144),
            )
            .enable_push(settings_value(&self.http2_settings, 2).unwrap_or(0) != 0)
            .build()
    }

    fn header_map_typed(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let (Ok(name), Ok(value)) = (
                HeaderName::from_str(name),
                HeaderValue::from_str(value),
            ) else {
                continue;
            };
            map.insert(name, value);
        }
        map
    }
}

/// The known cipher ids in a `FingerprintSpec` are numeric (matching ja3
/// wire form); BoringSSL's `set_cipher_list` wants OpenSSL names, so numeric
/// ids that don't resolve to a known name are passed through as-is and
/// BoringSSL will reject them at connector build time with `SslProtocolError`.
fn cipher_list_string(ciphers: &[String]) -> String {
    ciphers
        .iter()
        .map(|id| cipher_name(id).to_string())
        .collect::<Vec<_>>()
        .join(":")
}

fn cipher_name(id: &str) -> &str {
    match id {
        "4865" => "TLS_AES_128_GCM_SHA256",
        "4866" => "TLS_AES_256_GCM_SHA384",
        "4867" => "TLS_CHACHA20_POLY1305_SHA256",
        "49195" => "ECDHE-ECDSA-AES128-GCM-SHA256",
        "49199" => "ECDHE-RSA-AES128-GCM-SHA256",
        "49196" => "ECDHE-ECDSA-AES256-GCM-SHA384",
        "49200" => "ECDHE-RSA-AES256-GCM-SHA384",
        "52393" => "ECDHE-ECDSA-CHACHA20-POLY1305",
        "52392" => "ECDHE-RSA-CHACHA20-POLY1305",
        other => other,
    }
}

fn settings_value(encoded: &str, key: u32) -> Option<u32> {
    encoded.split(',').find_map(|entry| {
        let (k, v) = entry.split_once(':')?;
        if k.parse::<u32>().ok()? == key {
            v.parse::<u32>().ok()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::targets::native_targets;

    #[test]
    fn converts_every_native_target_without_panicking() {
        for (name, spec) in native_targets() {
            let emulation = spec.to_emulation();
            assert!(emulation.tls_options().is_some(), "{name}");
            assert!(emulation.http2_options().is_some(), "{name}");
        }
    }

    #[test]
    fn settings_value_finds_keyed_entry() {
        assert_eq!(settings_value("1:65536,3:1000", 3), Some(1000));
        assert_eq!(settings_value("1:65536", 9), None);
    }
}
