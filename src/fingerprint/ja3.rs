//! Ja3 string parsing: `version,ciphers,extensions,curves,ec_point_formats`.

/// Fields recovered from a raw ja3 string, applied as a TLS-only overlay
/// onto a resolved [`super::spec::FingerprintSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ja3Overlay {
    pub tls_version: String,
    pub tls_ciphers: Vec<String>,
    pub tls_extension_order: String,
    pub tls_supported_groups: Vec<String>,
    pub ec_point_formats: Vec<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Ja3ParseError {
    #[error("ja3 string must have 5 comma-separated fields, got {0}")]
    WrongFieldCount(usize),
    #[error("ja3 field {field} contains a non-numeric id: {value}")]
    NonNumericId { field: &'static str, value: String },
}

fn validate_ids(field: &'static str, raw: &str) -> Result<Vec<String>, Ja3ParseError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split('-')
        .map(|id| {
            id.parse::<u32>()
                .map(|_| id.to_string())
                .map_err(|_| Ja3ParseError::NonNumericId {
                    field,
                    value: id.to_string(),
                })
        })
        .collect()
}

/// Parse a raw ja3 string into its component fields.
pub fn parse(raw: &str) -> Result<Ja3Overlay, Ja3ParseError> {
    let fields: Vec<&str> = raw.split(',').collect();
    if fields.len() != 5 {
        return Err(Ja3ParseError::WrongFieldCount(fields.len()));
    }

    let version = fields[0]
        .parse::<u32>()
        .map(|_| fields[0].to_string())
        .map_err(|_| Ja3ParseError::NonNumericId {
            field: "version",
            value: fields[0].to_string(),
        })?;
    let ciphers = validate_ids("ciphers", fields[1])?;
    let extensions = validate_ids("extensions", fields[2])?;
    let curves = validate_ids("curves", fields[3])?;
    let ec_point_formats = validate_ids("ec_point_formats", fields[4])?;

    Ok(Ja3Overlay {
        tls_version: version,
        tls_ciphers: ciphers,
        tls_extension_order: extensions.join("-"),
        tls_supported_groups: curves,
        ec_point_formats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_ja3() {
        let overlay = parse("771,4865-4866-4867,0-23-65281,29-23-24,0").unwrap();
        assert_eq!(overlay.tls_version, "771");
        assert_eq!(overlay.tls_ciphers, vec!["4865", "4866", "4867"]);
        assert_eq!(overlay.tls_extension_order, "0-23-65281");
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(parse("771,4865"), Err(Ja3ParseError::WrongFieldCount(2)));
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(matches!(
            parse("771,abc,0,0,0"),
            Err(Ja3ParseError::NonNumericId { field: "ciphers", .. })
        ));
    }

    #[test]
    fn allows_empty_trailing_fields() {
        let overlay = parse("771,4865,0,,").unwrap();
        assert!(overlay.ec_point_formats.is_empty());
    }
}
