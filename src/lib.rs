//! # fiscale
//!
//! Multi-country fiscal identifier validation: personal tax codes and
//! VAT/business-registration numbers for Italy, France, Germany, Spain,
//! Portugal and England, with a generic fallback for everywhere else.
//!
//! Each country implements the official checksum arithmetic (Luhn variants,
//! modulo 23, modulo 97, ISO 7064 MOD 11,10, weighted sums) purely in-process:
//! no network calls, no persisted state. Malformed user input never panics —
//! every validation returns a structured [`ValidationResult`].
//!
//! ## Quick Start
//!
//! ```rust
//! use fiscale::{Country, Validator};
//!
//! // Italian Partita IVA — 11 digits with an alternating-weight check digit
//! let italy = Validator::for_country("IT").unwrap();
//! let result = italy.validate_vat_number("12345678903");
//! assert!(result.is_valid());
//! assert_eq!(result.normalized(), Some("12345678903"));
//!
//! // French SIREN — 9 digits, standard Luhn
//! let france = Validator::new(Country::France);
//! assert!(france.validate_tax_code("732829320", None).is_valid());
//!
//! // Unknown countries fall back to format-only validation
//! let other = Validator::for_country("NO").unwrap();
//! assert_eq!(other.country_code(), "GENERIC");
//! ```
//!
//! ## Error taxonomy
//!
//! Failures carry an [`ErrorKind`] reporting *why* validation failed:
//! `Required` (empty input), `Length`, `Format` (charset/pattern),
//! `Checksum`, or `BusinessRule` (domain constraints such as a future birth
//! date or an entity-type mismatch). Structural checks always run before
//! checksum arithmetic.
//!
//! ## Localization
//!
//! Error messages and field labels resolve through an injected
//! [`MessageLookup`](messages::MessageLookup); the built-in
//! [`EnglishMessages`](messages::EnglishMessages) catalog is used by default.

pub mod checksum;
pub mod core;
pub mod countries;
pub mod messages;

// Re-export the main surface at crate root for convenience
pub use crate::core::*;
pub use crate::countries::{Country, Validator};
