//! Tagged option values for the raw escape hatch (§4.C step 5).
//!
//! The transport never dispatches on an integer option id the way a
//! libcurl-style binding would; callers instead hand over a small typed bag
//! of `(name, OptionValue)` pairs that the compiler applies last and lets
//! win over anything derived from the structured inputs.

use bytes::Bytes;

/// A single raw option value, tagged by kind rather than dispatched
/// dynamically on a numeric range.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// An integer-valued option (timeouts, size limits, boolean flags).
    Long(i64),
    /// A string/byte-valued option (header lines, path strings).
    Text(Bytes),
    /// A boolean flag option.
    Flag(bool),
}

impl OptionValue {
    pub fn as_long(&self) -> Option<i64> {
        match self {
            OptionValue::Long(v) => Some(*v),
            OptionValue::Flag(b) => Some(*b as i64),
            OptionValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&[u8]> {
        match self {
            OptionValue::Text(b) => Some(b.as_ref()),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            OptionValue::Flag(b) => Some(*b),
            OptionValue::Long(v) => Some(*v != 0),
            OptionValue::Text(_) => None,
        }
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Long(v)
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Flag(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(Bytes::from(v.to_owned()))
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Text(Bytes::from(v))
    }
}

/// A named bag of raw options, applied last and winning over everything
/// the compiler derived from the structured request inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOptions {
    entries: Vec<(String, OptionValue)>,
}

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_set_wins_over_earlier() {
        let mut raw = RawOptions::new();
        raw.set("max_header_list_size", 1_i64);
        raw.set("max_header_list_size", 2_i64);
        assert_eq!(raw.get("max_header_list_size").unwrap().as_long(), Some(2));
    }

    #[test]
    fn flag_and_long_interconvert() {
        let v = OptionValue::from(true);
        assert_eq!(v.as_long(), Some(1));
        let v = OptionValue::Long(0);
        assert_eq!(v.as_flag(), Some(false));
    }
}
