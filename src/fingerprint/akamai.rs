//! Akamai HTTP/2 fingerprint string parsing: `settings|window_update|priority|pseudo_order`.
//!
//! `settings` is `;`-separated `k:v` pairs.

/// Fields recovered from a raw akamai string, applied as an HTTP/2-only
/// overlay onto a resolved [`super::spec::FingerprintSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AkamaiOverlay {
    pub http2_settings: String,
    pub http2_window_update: u32,
    pub priority: String,
    pub http2_pseudo_headers_order: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AkamaiParseError {
    #[error("akamai string must have 4 `|`-separated fields, got {0}")]
    WrongFieldCount(usize),
    #[error("akamai window_update is not a valid u32: {0}")]
    InvalidWindowUpdate(String),
    #[error("akamai settings entry is not `k:v`: {0}")]
    InvalidSettingsEntry(String),
    #[error("akamai pseudo_order must be a permutation of m,a,s,p, got {0}")]
    InvalidPseudoOrder(String),
}

/// Parse a raw akamai fingerprint string into its component fields.
pub fn parse(raw: &str) -> Result<AkamaiOverlay, AkamaiParseError> {
    let fields: Vec<&str> = raw.split('|').collect();
    if fields.len() != 4 {
        return Err(AkamaiParseError::WrongFieldCount(fields.len()));
    }

    if !fields[0].is_empty() {
        for entry in fields[0].split(';') {
            if !entry.contains(':') {
                return Err(AkamaiParseError::InvalidSettingsEntry(entry.to_string()));
            }
        }
    }

    let window_update = fields[1]
        .parse::<u32>()
        .map_err(|_| AkamaiParseError::InvalidWindowUpdate(fields[1].to_string()))?;

    let mut chars: Vec<char> = fields[3].chars().collect();
    chars.sort_unstable();
    if chars != ['a', 'm', 'p', 's'] {
        return Err(AkamaiParseError::InvalidPseudoOrder(fields[3].to_string()));
    }

    Ok(AkamaiOverlay {
        http2_settings: fields[0].to_string(),
        http2_window_update: window_update,
        priority: fields[2].to_string(),
        http2_pseudo_headers_order: fields[3].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_akamai_string() {
        let overlay = parse("1:65536;3:1000;4:6291456|15663105|0|masp").unwrap();
        assert_eq!(overlay.http2_window_update, 15663105);
        assert_eq!(overlay.http2_pseudo_headers_order, "masp");
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            parse("1:1|2|masp"),
            Err(AkamaiParseError::WrongFieldCount(3))
        );
    }

    #[test]
    fn rejects_non_permutation_pseudo_order() {
        assert!(matches!(
            parse("|0|0|mmmm"),
            Err(AkamaiParseError::InvalidPseudoOrder(_))
        ));
    }

    #[test]
    fn rejects_malformed_settings_entry() {
        assert!(matches!(
            parse("1-65536|0|0|masp"),
            Err(AkamaiParseError::InvalidSettingsEntry(_))
        ));
    }
}
