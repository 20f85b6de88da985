//! Country selection and the per-country validation dispatch.
//!
//! Each supported country lives in its own module exposing the same four
//! operations (tax code, VAT number, formatting, required fields); the
//! [`Validator`] facade selects the implementation with a single `match`
//! over [`Country`]. Unknown but well-formed country codes fall back to
//! [`Country::Generic`].

mod england;
mod france;
mod generic;
mod germany;
mod italy;
mod portugal;
mod spain;

pub use england::{vat_core_number, vat_suffix};
pub use france::{nic_from_siret, siren_from_siret};
pub use germany::format_ust_idnr;
pub use portugal::{EntityType, nif_entity_type};
pub use spain::{DocumentType, detect_document_type};

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{BusinessType, CountryCodeError, FieldRequirement, ValidationResult};
use crate::messages::{EnglishMessages, MessageLookup};

/// Countries with a specific fiscal validator, plus the generic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    Italy,
    France,
    Germany,
    Spain,
    Portugal,
    England,
    Generic,
}

impl Country {
    /// Select a country from an ISO 3166-1 alpha-2 code.
    ///
    /// The code is trimmed and case-folded. Anything that is not exactly two
    /// ASCII letters is rejected as programmer misuse; well-formed but
    /// unsupported codes select [`Country::Generic`].
    pub fn from_code(code: &str) -> Result<Self, CountryCodeError> {
        let code = code.trim();
        if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(CountryCodeError { code: code.into() });
        }
        Ok(match code.to_ascii_uppercase().as_str() {
            "IT" => Country::Italy,
            "FR" => Country::France,
            "DE" => Country::Germany,
            "ES" => Country::Spain,
            "PT" => Country::Portugal,
            "EN" => Country::England,
            _ => Country::Generic,
        })
    }

    /// The country identifier carried in validation metadata.
    pub fn code(self) -> &'static str {
        match self {
            Country::Italy => "IT",
            Country::France => "FR",
            Country::Germany => "DE",
            Country::Spain => "ES",
            Country::Portugal => "PT",
            Country::England => "EN",
            Country::Generic => "GENERIC",
        }
    }

    /// Translation key for the display name.
    pub fn name_key(self) -> &'static str {
        match self {
            Country::Italy => "countries.italy",
            Country::France => "countries.france",
            Country::Germany => "countries.germany",
            Country::Spain => "countries.spain",
            Country::Portugal => "countries.portugal",
            Country::England => "countries.england",
            Country::Generic => "countries.generic",
        }
    }

    /// The countries with a specific (checksum-capable) validator.
    pub fn supported() -> &'static [Country] {
        &[
            Country::Italy,
            Country::Portugal,
            Country::France,
            Country::Spain,
            Country::England,
            Country::Germany,
        ]
    }

    /// Whether `code` maps to a specific validator rather than the fallback.
    pub fn has_specific_validator(code: &str) -> bool {
        matches!(Country::from_code(code), Ok(c) if c != Country::Generic)
    }
}

/// Stateless validator for one country's fiscal identifiers.
///
/// Holds only the country tag and a shared message lookup; safe to clone and
/// share across threads. All validation is pure — the one exception is
/// Italy's birth-date plausibility window, which consults the current date
/// unless [`validate_tax_code_at`](Validator::validate_tax_code_at) is used.
#[derive(Clone)]
pub struct Validator {
    country: Country,
    messages: Arc<dyn MessageLookup>,
}

impl Validator {
    /// Validator for `country` with the built-in English messages.
    pub fn new(country: Country) -> Self {
        Self::with_messages(country, Arc::new(EnglishMessages))
    }

    /// Validator for `country` resolving messages through `messages`.
    pub fn with_messages(country: Country, messages: Arc<dyn MessageLookup>) -> Self {
        Self { country, messages }
    }

    /// Select a validator by ISO 3166-1 alpha-2 country code.
    ///
    /// Unknown codes yield the generic fallback; malformed codes error.
    pub fn for_country(code: &str) -> Result<Self, CountryCodeError> {
        Country::from_code(code).map(Self::new)
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn country_code(&self) -> &'static str {
        self.country.code()
    }

    /// Localized display name of the country.
    pub fn country_name(&self) -> String {
        self.messages.resolve(self.country.name_key(), &[])
    }

    /// Validate a personal tax code, using today's date for Italy's
    /// birth-date plausibility window.
    pub fn validate_tax_code(
        &self,
        tax_code: &str,
        business_type: Option<BusinessType>,
    ) -> ValidationResult {
        self.validate_tax_code_at(tax_code, business_type, Local::now().date_naive())
    }

    /// Validate a personal tax code against a fixed reference date.
    ///
    /// Identical to [`validate_tax_code`](Validator::validate_tax_code) for
    /// every country except Italy, whose decoded birth date is checked
    /// against `today`. Use this variant for reproducible validation.
    pub fn validate_tax_code_at(
        &self,
        tax_code: &str,
        business_type: Option<BusinessType>,
        today: NaiveDate,
    ) -> ValidationResult {
        let msgs = self.messages.as_ref();
        match self.country {
            Country::Italy => italy::validate_tax_code(tax_code, business_type, today, msgs),
            Country::France => france::validate_tax_code(tax_code, business_type, msgs),
            Country::Germany => germany::validate_tax_code(tax_code, business_type, msgs),
            Country::Spain => spain::validate_tax_code(tax_code, business_type, msgs),
            Country::Portugal => portugal::validate_tax_code(tax_code, business_type, msgs),
            Country::England => england::validate_tax_code(tax_code, business_type, msgs),
            Country::Generic => generic::validate_tax_code(tax_code, business_type, msgs),
        }
    }

    /// Validate a VAT / business registration number.
    pub fn validate_vat_number(&self, vat_number: &str) -> ValidationResult {
        let msgs = self.messages.as_ref();
        match self.country {
            Country::Italy => italy::validate_vat_number(vat_number, msgs),
            Country::France => france::validate_vat_number(vat_number, msgs),
            Country::Germany => germany::validate_vat_number(vat_number, msgs),
            Country::Spain => spain::validate_vat_number(vat_number, msgs),
            Country::Portugal => portugal::validate_vat_number(vat_number, msgs),
            Country::England => england::validate_vat_number(vat_number, msgs),
            Country::Generic => generic::validate_vat_number(vat_number, msgs),
        }
    }

    /// Normalize a raw tax code for storage. Idempotent.
    pub fn format_tax_code(&self, raw: &str) -> String {
        match self.country {
            Country::Italy => italy::format_tax_code(raw),
            Country::France => france::format_tax_code(raw),
            Country::Germany => germany::format_tax_code(raw),
            Country::Spain => spain::format_tax_code(raw),
            Country::Portugal => portugal::format_tax_code(raw),
            Country::England => england::format_tax_code(raw),
            Country::Generic => generic::format_tax_code(raw),
        }
    }

    /// The input fields a form must render for `business_type`.
    ///
    /// Always includes the tax code and name fields; VAT number and company
    /// name are added when the business type requires VAT registration.
    pub fn required_fields(&self, business_type: BusinessType) -> Vec<FieldRequirement> {
        let msgs = self.messages.as_ref();
        match self.country {
            Country::Italy => italy::required_fields(business_type, msgs),
            Country::France => france::required_fields(business_type, msgs),
            Country::Germany => germany::required_fields(business_type, msgs),
            Country::Spain => spain::required_fields(business_type, msgs),
            Country::Portugal => portugal::required_fields(business_type, msgs),
            Country::England => england::required_fields(business_type, msgs),
            Country::Generic => generic::required_fields(business_type, msgs),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("country", &self.country)
            .finish_non_exhaustive()
    }
}
