use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::error::ErrorKind;

/// A single metadata value attached to a [`ValidationResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Date(NaiveDate),
}

impl MetaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetaValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            MetaValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Str(s.to_owned())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Str(s)
    }
}

impl From<i64> for MetaValue {
    fn from(i: i64) -> Self {
        MetaValue::Int(i)
    }
}

impl From<usize> for MetaValue {
    fn from(i: usize) -> Self {
        MetaValue::Int(i as i64)
    }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self {
        MetaValue::Bool(b)
    }
}

impl From<NaiveDate> for MetaValue {
    fn from(d: NaiveDate) -> Self {
        MetaValue::Date(d)
    }
}

/// Diagnostic context attached to every validation outcome.
///
/// Sorted map for deterministic serialization and test output.
pub type Metadata = BTreeMap<String, MetaValue>;

/// Build a metadata map from key/value pairs.
pub fn metadata<const N: usize>(pairs: [(&str, MetaValue); N]) -> Metadata {
    pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
}

/// Immutable outcome of a tax code or VAT number validation.
///
/// Exactly one of the two states holds: valid with a normalized value, or
/// invalid with an [`ErrorKind`] and a human-readable message. The private
/// fields plus the two constructors enforce this invariant. Metadata is
/// always present (possibly empty) and is intended for logging and
/// diagnostics, not for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    metadata: Metadata,
}

impl ValidationResult {
    /// Successful validation carrying the normalized identifier.
    pub fn valid(normalized: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            valid: true,
            normalized: Some(normalized.into()),
            error_kind: None,
            error_message: None,
            metadata,
        }
    }

    /// Failed validation with an error kind and resolved message.
    pub fn invalid(kind: ErrorKind, message: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            valid: false,
            normalized: None,
            error_kind: Some(kind),
            error_message: Some(message.into()),
            metadata,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The normalized (trimmed/uppercased) identifier, if valid.
    pub fn normalized(&self) -> Option<&str> {
        self.normalized.as_deref()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    /// The resolved user-facing error message, if invalid.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Shorthand lookup into the metadata map.
    pub fn meta(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_result_has_normalized_and_no_error() {
        let r = ValidationResult::valid("ABC123", metadata([("country", "IT".into())]));
        assert!(r.is_valid());
        assert_eq!(r.normalized(), Some("ABC123"));
        assert_eq!(r.error_kind(), None);
        assert_eq!(r.error_message(), None);
        assert_eq!(r.meta("country").and_then(MetaValue::as_str), Some("IT"));
    }

    #[test]
    fn invalid_result_has_error_and_no_normalized() {
        let r = ValidationResult::invalid(ErrorKind::Length, "too short", Metadata::new());
        assert!(!r.is_valid());
        assert_eq!(r.normalized(), None);
        assert_eq!(r.error_kind(), Some(ErrorKind::Length));
        assert_eq!(r.error_message(), Some("too short"));
        assert!(r.metadata().is_empty());
    }

    #[test]
    fn serializes_without_absent_fields() {
        let r = ValidationResult::valid("X", Metadata::new());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["normalized"], "X");
        assert!(json.get("error_kind").is_none());
        assert!(json.get("error_message").is_none());
    }

    #[test]
    fn metadata_values_serialize_untagged() {
        let m = metadata([
            ("count", 3usize.into()),
            ("flag", true.into()),
            ("when", NaiveDate::from_ymd_opt(1985, 12, 10).unwrap().into()),
        ]);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["flag"], true);
        assert_eq!(json["when"], "1985-12-10");
    }
}
