//! The built-in table of native impersonation targets.
//!
//! Each entry mirrors a real, named browser release. Adding a target means
//! adding a row here — this module is a catalog, not a generator.

use super::spec::{FingerprintSpec, HttpVersionPref};

fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn chrome_spec(_name: &str, version: &str) -> FingerprintSpec {
    FingerprintSpec {
        client: "Chrome".to_string(),
        client_version: version.to_string(),
        os: "Windows".to_string(),
        os_version: "10".to_string(),

        tls_version: "772".to_string(),
        tls_ciphers: vec![
            "4865", "4866", "4867", "49195", "49199", "49196", "49200", "52393", "52392",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        tls_supported_groups: vec!["29", "23", "24"].into_iter().map(String::from).collect(),
        tls_signature_hashes: vec![
            "ecdsa_secp256r1_sha256",
            "rsa_pss_rsae_sha256",
            "rsa_pkcs1_sha256",
            "ecdsa_secp384r1_sha384",
            "rsa_pss_rsae_sha384",
            "rsa_pkcs1_sha384",
            "rsa_pss_rsae_sha512",
            "rsa_pkcs1_sha512",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        tls_cert_compression: vec!["brotli".to_string()],
        tls_alpn: true,
        tls_alps: true,
        tls_grease: true,
        tls_session_ticket: true,
        tls_extension_order: "0-23-65281-10-11-35-16-5-13-18-51-45-43-27-17513-21".to_string(),
        tls_key_shares_limit: 2,
        tls_delegated_credentials: Vec::new(),
        tls_record_size_limit: None,
        tls_use_new_alps_codepoint: true,
        tls_signed_cert_timestamps: true,
        tls_ech: None,

        http2_settings: "1:65536,2:0,3:1000,4:6291456,5:16384,6:262144".to_string(),
        http2_window_update: 15728640,
        http2_pseudo_headers_order: "masp".to_string(),
        http2_stream_weight: Some(256),
        http2_stream_exclusive: Some(true),
        http2_no_priority: false,
        http2_priority_exclusive: Some(false),

        http3_settings: String::new(),
        http3_pseudo_headers_order: "masp".to_string(),
        http3_tls_extension_order: String::new(),
        quic_transport_parameters: String::new(),

        headers: headers(&[
            ("user-agent", &format!("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{version} Safari/537.36")),
            ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8"),
            ("accept-language", "en-US,en;q=0.9"),
            ("accept-encoding", "gzip, deflate, br"),
            ("sec-fetch-site", "none"),
            ("sec-fetch-mode", "navigate"),
            ("sec-fetch-dest", "document"),
        ]),
        header_lang: "en-US".to_string(),
        http_version: HttpVersionPref::Http2,
    }

}

fn firefox_spec(_name: &str, version: &str) -> FingerprintSpec {
    FingerprintSpec {
        client: "Firefox".to_string(),
        client_version: version.to_string(),
        os: "Windows".to_string(),
        os_version: "10".to_string(),

        tls_version: "772".to_string(),
        tls_ciphers: vec![
            "4865", "4866", "4867", "49195", "49199", "52393", "49196", "49200", "52392", "49171",
            "49172", "156", "157", "47", "53",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        tls_supported_groups: vec!["29", "23", "24", "25", "256", "257"]
            .into_iter()
            .map(String::from)
            .collect(),
        tls_signature_hashes: vec![
            "ecdsa_secp256r1_sha256",
            "ecdsa_secp384r1_sha384",
            "ecdsa_secp521r1_sha512",
            "rsa_pss_rsae_sha256",
            "rsa_pss_rsae_sha384",
            "rsa_pss_rsae_sha512",
            "rsa_pkcs1_sha256",
            "rsa_pkcs1_sha384",
            "rsa_pkcs1_sha512",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        tls_cert_compression: vec!["zlib".to_string()],
        tls_alpn: true,
        tls_alps: false,
        tls_grease: false,
        tls_session_ticket: true,
        tls_extension_order: "0-23-65281-10-11-16-5-34-51-43-13-45-28-65037".to_string(),
        tls_key_shares_limit: 3,
        tls_delegated_credentials: vec!["ecdsa_secp256r1_sha256".to_string()],
        tls_record_size_limit: Some(16385),
        tls_use_new_alps_codepoint: false,
        tls_signed_cert_timestamps: false,
        tls_ech: None,

        http2_settings: "1:65536,4:131072,5:16384".to_string(),
        http2_window_update: 12582912,
        http2_pseudo_headers_order: "mpas".to_string(),
        http2_stream_weight: None,
        http2_stream_exclusive: None,
        http2_no_priority: true,
        http2_priority_exclusive: None,

        http3_settings: String::new(),
        http3_pseudo_headers_order: "mpas".to_string(),
        http3_tls_extension_order: String::new(),
        quic_transport_parameters: String::new(),

        headers: headers(&[
            ("user-agent", &format!("Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:{version}) Gecko/20100101 Firefox/{version}")),
            ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"),
            ("accept-language", "en-US,en;q=0.5"),
            ("accept-encoding", "gzip, deflate, br"),
        ]),
        header_lang: "en-US".to_string(),
        http_version: HttpVersionPref::Http2,
    }

}

fn safari_spec(_name: &str, version: &str) -> FingerprintSpec {
    FingerprintSpec {
        client: "Safari".to_string(),
        client_version: version.to_string(),
        os: "macOS".to_string(),
        os_version: "14".to_string(),

        tls_version: "772".to_string(),
        tls_ciphers: vec![
            "4865", "4866", "4867", "49196", "49195", "52393", "49200", "49199", "52392", "159",
            "158", "52394", "49188", "49187", "49162", "49161", "53", "47", "10",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        tls_supported_groups: vec!["29", "23", "24", "25"]
            .into_iter()
            .map(String::from)
            .collect(),
        tls_signature_hashes: vec![
            "ecdsa_secp256r1_sha256",
            "rsa_pss_rsae_sha256",
            "rsa_pkcs1_sha256",
            "ecdsa_secp384r1_sha384",
            "rsa_pss_rsae_sha384",
            "rsa_pkcs1_sha384",
            "rsa_pss_rsae_sha512",
            "rsa_pkcs1_sha512",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        tls_cert_compression: Vec::new(),
        tls_alpn: true,
        tls_alps: false,
        tls_grease: true,
        tls_session_ticket: true,
        tls_extension_order: "0-23-65281-10-11-16-5-13-18-51-45-43-27-21".to_string(),
        tls_key_shares_limit: 2,
        tls_delegated_credentials: Vec::new(),
        tls_record_size_limit: None,
        tls_use_new_alps_codepoint: false,
        tls_signed_cert_timestamps: false,
        tls_ech: None,

        http2_settings: "2:0,4:65535,5:16384".to_string(),
        http2_window_update: 10485760,
        http2_pseudo_headers_order: "mspa".to_string(),
        http2_stream_weight: Some(254),
        http2_stream_exclusive: Some(false),
        http2_no_priority: false,
        http2_priority_exclusive: Some(false),

        http3_settings: String::new(),
        http3_pseudo_headers_order: "mspa".to_string(),
        http3_tls_extension_order: String::new(),
        quic_transport_parameters: String::new(),

        headers: headers(&[
            ("user-agent", &format!("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/{version} Safari/605.1.15")),
            ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
            ("accept-language", "en-US,en;q=0.9"),
        ]),
        header_lang: "en-US".to_string(),
        http_version: HttpVersionPref::Http2,
    }

}

fn edge_spec(_name: &str, version: &str) -> FingerprintSpec {
    let mut spec = chrome_spec(_name, version);
    spec.client = "Edge".to_string();
    spec.headers = headers(&[
        ("user-agent", &format!("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{version} Safari/537.36 Edg/{version}")),
        ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8"),
        ("accept-language", "en-US,en;q=0.9"),
        ("accept-encoding", "gzip, deflate, br"),
    ]);
    spec
}

fn okhttp_spec(_name: &str, version: &str) -> FingerprintSpec {
    FingerprintSpec {
        client: "okhttp".to_string(),
        client_version: version.to_string(),
        os: "Android".to_string(),
        os_version: "14".to_string(),

        tls_version: "771".to_string(),
        tls_ciphers: vec![
            "4865", "4866", "4867", "49195", "49199", "49196", "49200", "52393", "52392", "49171",
            "49172", "156", "157", "47", "53",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        tls_supported_groups: vec!["29", "23", "24"].into_iter().map(String::from).collect(),
        tls_signature_hashes: vec![
            "ecdsa_secp256r1_sha256",
            "rsa_pss_rsae_sha256",
            "rsa_pkcs1_sha256",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        tls_cert_compression: Vec::new(),
        tls_alpn: true,
        tls_alps: false,
        tls_grease: false,
        tls_session_ticket: true,
        tls_extension_order: "0-23-65281-10-11-35-16-5-13-51-45-43-21".to_string(),
        tls_key_shares_limit: 1,
        tls_delegated_credentials: Vec::new(),
        tls_record_size_limit: None,
        tls_use_new_alps_codepoint: false,
        tls_signed_cert_timestamps: false,
        tls_ech: None,

        http2_settings: "4:1048576".to_string(),
        http2_window_update: 1048576,
        http2_pseudo_headers_order: "masp".to_string(),
        http2_stream_weight: None,
        http2_stream_exclusive: None,
        http2_no_priority: true,
        http2_priority_exclusive: None,

        http3_settings: String::new(),
        http3_pseudo_headers_order: "masp".to_string(),
        http3_tls_extension_order: String::new(),
        quic_transport_parameters: String::new(),

        headers: headers(&[("user-agent", &format!("okhttp/{version}"))]),
        header_lang: "en-US".to_string(),
        http_version: HttpVersionPref::Http2,
    }

}

/// `(name, spec)` rows for every native target this registry ships.
pub fn native_targets() -> Vec<(&'static str, FingerprintSpec)> {
    vec![
        ("chrome_131", chrome_spec("chrome_131", "131.0.0.0")),
        ("chrome_140", chrome_spec("chrome_140", "140.0.0.0")),
        ("chrome", chrome_spec("chrome", "140.0.0.0")),
        ("edge_131", edge_spec("edge_131", "131.0.0.0")),
        ("edge", edge_spec("edge", "131.0.0.0")),
        ("firefox_133", firefox_spec("firefox_133", "133.0")),
        ("firefox", firefox_spec("firefox", "133.0")),
        ("safari_18", safari_spec("safari_18", "18.0")),
        ("safari", safari_spec("safari", "18.0")),
        ("okhttp_4", okhttp_spec("okhttp_4", "4.12.0")),
        ("okhttp", okhttp_spec("okhttp", "4.12.0")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_native_target_validates() {
        for (name, spec) in native_targets() {
            assert!(spec.validate().is_ok(), "{name} failed validation");
        }
    }

    #[test]
    fn unversioned_names_resolve_to_latest() {
        let targets: std::collections::HashMap<_, _> = native_targets().into_iter().collect();
        assert_eq!(
            targets["chrome"].client_version,
            targets["chrome_140"].client_version
        );
    }
}
