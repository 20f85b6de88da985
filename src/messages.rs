//! Injected message-lookup capability for error messages and field labels.
//!
//! The validation core never hardcodes display strings; it resolves
//! translation keys through a [`MessageLookup`] so host applications can
//! plug in their own localization layer. [`EnglishMessages`] is the built-in
//! default catalog.

/// Resolves a translation key (plus named parameters) to a display string.
///
/// Implementations must be thread-safe; validators share the lookup across
/// concurrent validations. Unknown keys should degrade gracefully (the
/// default catalog returns the key itself).
pub trait MessageLookup: Send + Sync {
    /// Resolve `key`, substituting `{name}` placeholders from `params`.
    fn resolve(&self, key: &str, params: &[(&str, String)]) -> String;
}

/// Built-in English message catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl MessageLookup for EnglishMessages {
    fn resolve(&self, key: &str, params: &[(&str, String)]) -> String {
        let Ok(idx) = MESSAGES.binary_search_by_key(&key, |(k, _)| *k) else {
            return key.to_owned();
        };
        let mut out = MESSAGES[idx].1.to_owned();
        for (name, value) in params {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

/// Key → template table. Sorted for binary search.
static MESSAGES: &[(&str, &str)] = &[
    ("countries.england", "England"),
    ("countries.france", "France"),
    ("countries.generic", "International"),
    ("countries.germany", "Germany"),
    ("countries.italy", "Italy"),
    ("countries.portugal", "Portugal"),
    ("countries.spain", "Spain"),
    ("fields.birth_date", "Date of birth"),
    ("fields.company_name", "Company name"),
    ("fields.first_name", "First name"),
    ("fields.last_name", "Last name"),
    ("fields.tax_code", "Tax code"),
    ("fields.vat_number", "VAT number"),
    (
        "validation.tax_code_england_checksum",
        "the UTR check digit does not match",
    ),
    (
        "validation.tax_code_england_format",
        "the UTR must contain digits only",
    ),
    (
        "validation.tax_code_england_length",
        "the UTR must be exactly {required} digits",
    ),
    (
        "validation.tax_code_france_checksum",
        "the SIREN fails the Luhn check",
    ),
    (
        "validation.tax_code_france_format",
        "the SIREN must contain digits only",
    ),
    (
        "validation.tax_code_france_length",
        "the SIREN must be exactly {required} digits",
    ),
    (
        "validation.tax_code_germany_cannot_start_zero",
        "the Steuer-IdNr must not start with 0",
    ),
    (
        "validation.tax_code_germany_checksum",
        "the Steuer-IdNr check digit does not match",
    ),
    (
        "validation.tax_code_germany_format",
        "the Steuer-IdNr must contain digits only",
    ),
    (
        "validation.tax_code_germany_length",
        "the Steuer-IdNr must be exactly {required} digits",
    ),
    (
        "validation.tax_code_germany_too_many_repeated_digits",
        "the Steuer-IdNr has more than two different repeated digits",
    ),
    (
        "validation.tax_code_germany_too_many_repeats",
        "the Steuer-IdNr repeats a digit more than three times",
    ),
    (
        "validation.tax_code_invalid_format",
        "the tax code may only contain letters, digits and separators",
    ),
    (
        "validation.tax_code_italy_checksum",
        "the Codice Fiscale check letter does not match",
    ),
    (
        "validation.tax_code_italy_format",
        "the Codice Fiscale does not match the expected pattern",
    ),
    (
        "validation.tax_code_italy_future_birth",
        "the Codice Fiscale encodes a birth date in the future",
    ),
    (
        "validation.tax_code_italy_length",
        "the Codice Fiscale must be exactly {required} characters",
    ),
    (
        "validation.tax_code_italy_too_old",
        "the Codice Fiscale encodes a birth date more than 150 years ago",
    ),
    (
        "validation.tax_code_max_length",
        "the tax code must be at most {max} characters",
    ),
    (
        "validation.tax_code_min_length",
        "the tax code must be at least {min} characters",
    ),
    (
        "validation.tax_code_portugal_business_type_mismatch",
        "the NIF prefix does not match the declared business type {business_type} (detected: {detected_type})",
    ),
    (
        "validation.tax_code_portugal_checksum",
        "the NIF check digit does not match",
    ),
    (
        "validation.tax_code_portugal_format",
        "the NIF must contain digits only",
    ),
    (
        "validation.tax_code_portugal_invalid_prefix",
        "the NIF starts with an unassigned entity prefix",
    ),
    (
        "validation.tax_code_portugal_length",
        "the NIF must be exactly {required} digits",
    ),
    ("validation.tax_code_required", "a tax code is required"),
    (
        "validation.tax_code_spain_cif_checksum",
        "the CIF check character does not match",
    ),
    (
        "validation.tax_code_spain_cif_invalid_org",
        "the CIF organization letter is not recognized",
    ),
    (
        "validation.tax_code_spain_dni_checksum",
        "the DNI check letter does not match",
    ),
    (
        "validation.tax_code_spain_format",
        "the code is not a recognizable DNI, NIE or CIF",
    ),
    (
        "validation.tax_code_spain_nie_checksum",
        "the NIE check letter does not match",
    ),
    (
        "validation.vat_number_england_checksum",
        "the VAT number check digits do not match",
    ),
    (
        "validation.vat_number_england_format",
        "the VAT number must be 9 digits with an optional 2-digit suffix",
    ),
    (
        "validation.vat_number_france_checksum",
        "the SIRET fails the Luhn check",
    ),
    (
        "validation.vat_number_france_format",
        "the SIRET must contain digits only",
    ),
    (
        "validation.vat_number_france_length",
        "the SIRET must be exactly {required} digits",
    ),
    (
        "validation.vat_number_france_siren_invalid",
        "the SIREN embedded in the SIRET fails the Luhn check",
    ),
    (
        "validation.vat_number_germany_checksum",
        "the USt-IdNr check digit does not match",
    ),
    (
        "validation.vat_number_germany_format",
        "the USt-IdNr must be DE followed by 9 digits",
    ),
    (
        "validation.vat_number_invalid_format",
        "the VAT number may only contain letters and digits",
    ),
    (
        "validation.vat_number_italy_checksum",
        "the Partita IVA check digit does not match",
    ),
    (
        "validation.vat_number_italy_format",
        "the Partita IVA must contain digits only",
    ),
    (
        "validation.vat_number_italy_length",
        "the Partita IVA must be exactly {required} digits",
    ),
    (
        "validation.vat_number_max_length",
        "the VAT number must be at most {max} characters",
    ),
    (
        "validation.vat_number_min_length",
        "the VAT number must be at least {min} characters",
    ),
    ("validation.vat_number_required", "a VAT number is required"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted() {
        for window in MESSAGES.windows(2) {
            assert!(
                window[0].0 < window[1].0,
                "catalog not sorted: {} >= {}",
                window[0].0,
                window[1].0
            );
        }
    }

    #[test]
    fn resolves_known_key() {
        let msg = EnglishMessages.resolve("validation.tax_code_required", &[]);
        assert_eq!(msg, "a tax code is required");
    }

    #[test]
    fn interpolates_params() {
        let msg = EnglishMessages.resolve(
            "validation.tax_code_italy_length",
            &[("required", "16".into())],
        );
        assert_eq!(msg, "the Codice Fiscale must be exactly 16 characters");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let msg = EnglishMessages.resolve("validation.nope", &[]);
        assert_eq!(msg, "validation.nope");
    }

    #[test]
    fn custom_lookup_is_injectable() {
        struct Upper;
        impl MessageLookup for Upper {
            fn resolve(&self, key: &str, _params: &[(&str, String)]) -> String {
                key.to_uppercase()
            }
        }
        let msg = Upper.resolve("countries.italy", &[]);
        assert_eq!(msg, "COUNTRIES.ITALY");
    }
}
