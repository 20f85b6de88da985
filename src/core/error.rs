use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a validation failure.
///
/// Kinds are reported in a fixed order of precedence: an empty input is
/// always `Required`, a wrong character count is `Length` before any charset
/// check, and checksum arithmetic only runs on structurally valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Input was empty or whitespace-only.
    Required,
    /// Character count does not match the country's expected length.
    Length,
    /// Charset or positional pattern mismatch.
    Format,
    /// Structurally well-formed, but the check digit/letter does not match.
    Checksum,
    /// Arithmetically valid, but a domain constraint is violated
    /// (future birth date, leading zero, entity-type mismatch).
    BusinessRule,
}

impl ErrorKind {
    /// Stable string code for logging and API payloads.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Required => "REQUIRED",
            ErrorKind::Length => "LENGTH",
            ErrorKind::Format => "FORMAT",
            ErrorKind::Checksum => "CHECKSUM",
            ErrorKind::BusinessRule => "BUSINESS_RULE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a country code passed to validator selection is not
/// a plausible ISO 3166-1 alpha-2 code.
///
/// This is programmer misuse, distinct from malformed *user* input: unknown
/// but well-formed codes select the generic fallback instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid country code '{code}': expected 2 ASCII letters (ISO 3166-1 alpha-2)")]
pub struct CountryCodeError {
    /// The rejected input value.
    pub code: String,
}
