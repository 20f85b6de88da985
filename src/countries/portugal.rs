//! Portuguese NIF validation.
//!
//! One nine-digit number serves as both tax code and VAT number. The check
//! digit is a mod-11 weighted sum; the first digit encodes the entity class,
//! which is compared against the declared business type after the checksum
//! passes.

use crate::checksum::weighted_sum;
use crate::core::{BusinessType, ErrorKind, FieldRequirement, ValidationResult, metadata};
use crate::core::fields::{company_name_field, name_fields};
use crate::messages::MessageLookup;

const COUNTRY: &str = "PT";
const NIF_LEN: usize = 9;
const NIF_WEIGHTS: [u32; 8] = [9, 8, 7, 6, 5, 4, 3, 2];

/// Entity class encoded in the first NIF digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    /// Digits 1–3: natural persons.
    Individual,
    /// Digits 5–9: collective persons and companies.
    Business,
    /// Digit 4: public bodies.
    Public,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Individual => "individual",
            EntityType::Business => "business",
            EntityType::Public => "public",
        }
    }
}

/// Entity class of a NIF, from its first digit. `None` for anything that is
/// not nine characters or starts with an unassigned digit.
pub fn nif_entity_type(nif: &str) -> Option<EntityType> {
    if nif.len() != NIF_LEN {
        return None;
    }
    match nif.as_bytes()[0] {
        b'1'..=b'3' => Some(EntityType::Individual),
        b'4' => Some(EntityType::Public),
        b'5'..=b'9' => Some(EntityType::Business),
        _ => None,
    }
}

/// First digits accepted for a declared business type. `None` means the type
/// has no Portuguese prefix mapping and any assigned prefix is accepted.
fn expected_prefixes(business_type: BusinessType) -> Option<&'static [u8]> {
    match business_type {
        BusinessType::Individual => Some(&[b'1', b'2', b'3']),
        BusinessType::Business => Some(&[b'5', b'6', b'7', b'8', b'9']),
        BusinessType::NonProfit => Some(&[b'6']),
        _ => None,
    }
}

pub(crate) fn validate_tax_code(
    tax_code: &str,
    business_type: Option<BusinessType>,
    msgs: &dyn MessageLookup,
) -> ValidationResult {
    let code = tax_code.trim().to_owned();

    let mut meta = metadata([("field", "tax_code".into()), ("country", COUNTRY.into())]);
    if let Some(bt) = business_type {
        meta.insert("business_type".into(), bt.as_str().into());
    }

    if code.is_empty() {
        return ValidationResult::invalid(
            ErrorKind::Required,
            msgs.resolve("validation.tax_code_required", &[]),
            meta,
        );
    }

    if code.len() != NIF_LEN {
        meta.insert("required_length".into(), NIF_LEN.into());
        meta.insert("actual_length".into(), code.len().into());
        return ValidationResult::invalid(
            ErrorKind::Length,
            msgs.resolve(
                "validation.tax_code_portugal_length",
                &[("required", NIF_LEN.to_string())],
            ),
            meta,
        );
    }

    if !code.bytes().all(|b| b.is_ascii_digit()) {
        meta.insert("expected_format".into(), "numeric_only".into());
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.tax_code_portugal_format", &[]),
            meta,
        );
    }

    let remainder = weighted_sum(&code[..8], &NIF_WEIGHTS) % 11;
    let expected = if remainder < 2 { 0 } else { 11 - remainder };
    let actual = u32::from(code.as_bytes()[8] - b'0');
    if expected != actual {
        meta.insert("validation_type".into(), "checksum".into());
        meta.insert("expected_check_digit".into(), i64::from(expected).into());
        meta.insert("provided_check_digit".into(), i64::from(actual).into());
        return ValidationResult::invalid(
            ErrorKind::Checksum,
            msgs.resolve("validation.tax_code_portugal_checksum", &[]),
            meta,
        );
    }

    let entity = nif_entity_type(&code);
    let first_digit = i64::from(code.as_bytes()[0] - b'0');
    let detected = entity.map_or("unknown", EntityType::as_str);

    match business_type {
        None => {
            if entity.is_none() {
                meta.insert("detected_entity_type".into(), detected.into());
                meta.insert("first_digit".into(), first_digit.into());
                return ValidationResult::invalid(
                    ErrorKind::BusinessRule,
                    msgs.resolve("validation.tax_code_portugal_invalid_prefix", &[]),
                    meta,
                );
            }
        }
        Some(bt) => {
            if let Some(prefixes) = expected_prefixes(bt) {
                if !prefixes.contains(&code.as_bytes()[0]) {
                    meta.insert("detected_entity_type".into(), detected.into());
                    meta.insert("first_digit".into(), first_digit.into());
                    return ValidationResult::invalid(
                        ErrorKind::BusinessRule,
                        msgs.resolve(
                            "validation.tax_code_portugal_business_type_mismatch",
                            &[
                                ("business_type", bt.as_str().to_owned()),
                                ("detected_type", detected.to_owned()),
                            ],
                        ),
                        meta,
                    );
                }
            }
        }
    }

    let mut meta = metadata([
        ("country", COUNTRY.into()),
        ("validation_level", "full_checksum".into()),
        ("entity_type", detected.into()),
        ("original_input", code.as_str().into()),
    ]);
    if let Some(bt) = business_type {
        meta.insert("business_type".into(), bt.as_str().into());
    }
    ValidationResult::valid(code, meta)
}

/// The NIF doubles as the VAT number; validated as a business NIF.
pub(crate) fn validate_vat_number(vat_number: &str, msgs: &dyn MessageLookup) -> ValidationResult {
    validate_tax_code(vat_number, Some(BusinessType::Business), msgs)
}

/// Strip everything that is not a digit. Idempotent.
pub(crate) fn format_tax_code(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

pub(crate) fn required_fields(
    business_type: BusinessType,
    msgs: &dyn MessageLookup,
) -> Vec<FieldRequirement> {
    let mut fields = vec![FieldRequirement::new(
        "tax_code",
        true,
        &["string", "size:9", "regex:/^[0-9]{9}$/"],
        msgs.resolve("fields.tax_code", &[]),
    )];
    fields.extend(name_fields(msgs));

    // The NIF doubles as the VAT number, so companies only add a name
    if business_type.requires_vat_number() {
        fields.push(company_name_field(msgs));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MetaValue;
    use crate::messages::EnglishMessages;

    #[test]
    fn valid_individual_nif() {
        let r = validate_tax_code("123456789", None, &EnglishMessages);
        assert!(r.is_valid(), "{:?}", r.error_message());
        assert_eq!(
            r.meta("entity_type").and_then(MetaValue::as_str),
            Some("individual")
        );
    }

    #[test]
    fn valid_business_nif() {
        let r = validate_tax_code(
            "504444670",
            Some(BusinessType::Business),
            &EnglishMessages,
        );
        assert!(r.is_valid(), "{:?}", r.error_message());
        assert_eq!(
            r.meta("entity_type").and_then(MetaValue::as_str),
            Some("business")
        );
    }

    #[test]
    fn bad_check_digit() {
        let r = validate_tax_code("123456780", None, &EnglishMessages);
        assert_eq!(r.error_kind(), Some(ErrorKind::Checksum));
        assert_eq!(
            r.meta("expected_check_digit").and_then(MetaValue::as_int),
            Some(9)
        );
    }

    #[test]
    fn individual_nif_for_business_is_a_mismatch() {
        let r = validate_tax_code(
            "123456789",
            Some(BusinessType::Business),
            &EnglishMessages,
        );
        assert_eq!(r.error_kind(), Some(ErrorKind::BusinessRule));
        assert_eq!(
            r.meta("detected_entity_type").and_then(MetaValue::as_str),
            Some("individual")
        );
        assert!(r.error_message().unwrap().contains("business"));
    }

    #[test]
    fn mismatch_is_reported_after_checksum() {
        // Bad check digit takes precedence over the prefix rule
        let r = validate_tax_code(
            "123456780",
            Some(BusinessType::Business),
            &EnglishMessages,
        );
        assert_eq!(r.error_kind(), Some(ErrorKind::Checksum));
    }

    #[test]
    fn unmapped_business_types_accept_any_prefix() {
        let r = validate_tax_code(
            "123456789",
            Some(BusinessType::Corporation),
            &EnglishMessages,
        );
        assert!(r.is_valid(), "{:?}", r.error_message());
    }

    #[test]
    fn wrong_length_and_format() {
        let r = validate_tax_code("12345678", None, &EnglishMessages);
        assert_eq!(r.error_kind(), Some(ErrorKind::Length));
        let r = validate_tax_code("12345678X", None, &EnglishMessages);
        assert_eq!(r.error_kind(), Some(ErrorKind::Format));
    }

    #[test]
    fn vat_number_is_validated_as_business_nif() {
        let r = validate_vat_number("504444670", &EnglishMessages);
        assert!(r.is_valid(), "{:?}", r.error_message());

        let r = validate_vat_number("123456789", &EnglishMessages);
        assert_eq!(r.error_kind(), Some(ErrorKind::BusinessRule));
    }

    #[test]
    fn entity_type_from_first_digit() {
        assert_eq!(nif_entity_type("123456789"), Some(EntityType::Individual));
        assert_eq!(nif_entity_type("404444640"), Some(EntityType::Public));
        assert_eq!(nif_entity_type("504444670"), Some(EntityType::Business));
        assert_eq!(nif_entity_type("023456789"), None);
        assert_eq!(nif_entity_type("12345"), None);
    }

    #[test]
    fn format_strips_separators() {
        assert_eq!(format_tax_code("123 456 789"), "123456789");
        let once = format_tax_code("123-456-789");
        assert_eq!(format_tax_code(&once), once);
    }

    #[test]
    fn companies_do_not_get_a_separate_vat_field() {
        let fields = required_fields(BusinessType::Business, &EnglishMessages);
        assert!(fields.iter().all(|f| f.name != "vat_number"));
        assert!(fields.iter().any(|f| f.name == "company_name"));
    }
}
