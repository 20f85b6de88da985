//! UK UTR and VAT number validation (country code `EN`).
//!
//! The UTR check digit sits last and is derived from a mod-23 weighted sum.
//! The VAT number carries two check digits in positions 8–9 (mod 97); an
//! optional two-digit suffix marks group or divisional registration.

use crate::checksum::weighted_sum;
use crate::core::{BusinessType, ErrorKind, FieldRequirement, ValidationResult, metadata};
use crate::core::fields::{company_name_field, name_fields};
use crate::messages::MessageLookup;

const COUNTRY: &str = "EN";
const UTR_LEN: usize = 10;
const VAT_CORE_LEN: usize = 9;
const UTR_WEIGHTS: [u32; 9] = [6, 7, 8, 9, 10, 5, 4, 3, 2];
const VAT_WEIGHTS: [u32; 7] = [8, 7, 6, 5, 4, 3, 2];

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

    if code.len() != UTR_LEN {
        meta.insert("required_length".into(), UTR_LEN.into());
        meta.insert("actual_length".into(), code.len().into());
        return ValidationResult::invalid(
            ErrorKind::Length,
            msgs.resolve(
                "validation.tax_code_england_length",
                &[("required", UTR_LEN.to_string())],
            ),
            meta,
        );
    }

    if !code.bytes().all(|b| b.is_ascii_digit()) {
        meta.insert("expected_format".into(), "numeric_only".into());
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.tax_code_england_format", &[]),
            meta,
        );
    }

    let remainder = weighted_sum(&code[..9], &UTR_WEIGHTS) % 23;
    let expected = if remainder <= 1 { 0 } else { 23 - remainder };
    let actual = u32::from(code.as_bytes()[9] - b'0');
    if expected != actual {
        meta.insert("validation_type".into(), "utr_checksum".into());
        meta.insert("expected_check_digit".into(), i64::from(expected).into());
        meta.insert("provided_check_digit".into(), i64::from(actual).into());
        return ValidationResult::invalid(
            ErrorKind::Checksum,
            msgs.resolve("validation.tax_code_england_checksum", &[]),
            meta,
        );
    }

    let mut meta = metadata([
        ("country", COUNTRY.into()),
        ("document_type", "UTR".into()),
        ("validation_level", "full_checksum".into()),
        ("original_input", code.as_str().into()),
    ]);
    if let Some(bt) = business_type {
        meta.insert("business_type".into(), bt.as_str().into());
    }
    ValidationResult::valid(code, meta)
}

pub(crate) fn validate_vat_number(vat_number: &str, msgs: &dyn MessageLookup) -> ValidationResult {
    let vat = vat_number.trim().to_owned();
    let mut meta = metadata([("field", "vat_number".into()), ("country", COUNTRY.into())]);

    if vat.is_empty() {
        return ValidationResult::invalid(
            ErrorKind::Required,
            msgs.resolve("validation.vat_number_required", &[]),
            meta,
        );
    }

    let digits_only = vat.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || !matches!(vat.len(), 9 | 11) {
        meta.insert("expected_format".into(), "9_digits_optional_suffix".into());
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.vat_number_england_format", &[]),
            meta,
        );
    }

    let core = &vat[..VAT_CORE_LEN];
    // Check digits are positions 8-9 of the core; the 8th digit takes part
    // in the sum with weight 1
    let sum = weighted_sum(&core[..7], &VAT_WEIGHTS) + u32::from(core.as_bytes()[7] - b'0');
    let remainder = sum % 97;
    let expected = if remainder <= 1 { remainder } else { 97 - remainder };
    let actual: u32 = core[7..9].parse().unwrap_or(0);
    if expected != actual {
        meta.insert("validation_type".into(), "vat_checksum".into());
        meta.insert("core_number".into(), core.into());
        return ValidationResult::invalid(
            ErrorKind::Checksum,
            msgs.resolve("validation.vat_number_england_checksum", &[]),
            meta,
        );
    }

    let suffix = vat_suffix(&vat).unwrap_or("");
    let meta = metadata([
        ("country", COUNTRY.into()),
        ("document_type", "VAT".into()),
        ("core_number", core.into()),
        ("suffix", suffix.into()),
        ("validation_level", "full_checksum".into()),
        ("original_input", vat.as_str().into()),
    ]);
    ValidationResult::valid(vat, meta)
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
        &["string", "size:10", "regex:/^[0-9]{10}$/"],
        format!("{} (UTR)", msgs.resolve("fields.tax_code", &[])),
    )];
    fields.extend(name_fields(msgs));

    if business_type.requires_vat_number() {
        fields.push(FieldRequirement::new(
            "vat_number",
            true,
            &["string", "regex:/^[0-9]{9}([0-9]{2})?$/"],
            format!("{} (VAT Number)", msgs.resolve("fields.vat_number", &[])),
        ));
        fields.push(company_name_field(msgs));
    }
    fields
}

/// The nine-digit core of a UK VAT number, without any registration suffix.
pub fn vat_core_number(vat_number: &str) -> Option<&str> {
    matches!(vat_number.len(), 9 | 11).then(|| &vat_number[..VAT_CORE_LEN])
}

/// The two-digit group/division suffix, when present.
pub fn vat_suffix(vat_number: &str) -> Option<&str> {
    (vat_number.len() == 11).then(|| &vat_number[VAT_CORE_LEN..])
}
