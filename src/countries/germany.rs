//! German Steuer-IdNr and USt-IdNr validation.
//!
//! The Steuer-IdNr carries an ISO 7064 MOD 11,10 check digit, but its
//! structural rules (no leading zero, bounded digit repetition) are checked
//! first so a structurally impossible number reports the business rule it
//! breaks rather than an incidental checksum mismatch.

use crate::checksum::{iso7064_mod11_10, weighted_sum};
use crate::core::{BusinessType, ErrorKind, FieldRequirement, ValidationResult, metadata};
use crate::core::fields::{company_name_field, name_fields};
use crate::messages::MessageLookup;

const COUNTRY: &str = "DE";
const STEUER_ID_LEN: usize = 11;
const UST_ID_DIGITS: usize = 9;
const UST_ID_WEIGHTS: [u32; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

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

    if code.len() != STEUER_ID_LEN {
        meta.insert("required_length".into(), STEUER_ID_LEN.into());
        meta.insert("actual_length".into(), code.len().into());
        return ValidationResult::invalid(
            ErrorKind::Length,
            msgs.resolve(
                "validation.tax_code_germany_length",
                &[("required", STEUER_ID_LEN.to_string())],
            ),
            meta,
        );
    }

    if !code.bytes().all(|b| b.is_ascii_digit()) {
        meta.insert("expected_format".into(), "numeric_only".into());
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.tax_code_germany_format", &[]),
            meta,
        );
    }

    if let Some((rule, key)) = broken_structure_rule(&code) {
        meta.insert("rule".into(), rule.into());
        return ValidationResult::invalid(ErrorKind::BusinessRule, msgs.resolve(key, &[]), meta);
    }

    let expected = iso7064_mod11_10(&code[..10]);
    let actual = u32::from(code.as_bytes()[10] - b'0');
    if expected != actual {
        meta.insert("validation_type".into(), "steuer_id_checksum".into());
        meta.insert("expected_check_digit".into(), i64::from(expected).into());
        meta.insert("provided_check_digit".into(), i64::from(actual).into());
        return ValidationResult::invalid(
            ErrorKind::Checksum,
            msgs.resolve("validation.tax_code_germany_checksum", &[]),
            meta,
        );
    }

    let mut meta = metadata([
        ("country", COUNTRY.into()),
        ("document_type", "Steuer-IdNr".into()),
        ("validation_level", "full_checksum".into()),
        ("original_input", code.as_str().into()),
    ]);
    if let Some(bt) = business_type {
        meta.insert("business_type".into(), bt.as_str().into());
    }
    ValidationResult::valid(code, meta)
}

pub(crate) fn validate_vat_number(vat_number: &str, msgs: &dyn MessageLookup) -> ValidationResult {
    let vat = vat_number.trim().to_ascii_uppercase();
    let mut meta = metadata([("field", "vat_number".into()), ("country", COUNTRY.into())]);

    if vat.is_empty() {
        return ValidationResult::invalid(
            ErrorKind::Required,
            msgs.resolve("validation.vat_number_required", &[]),
            meta,
        );
    }

    if !is_ust_idnr_shaped(&vat) {
        meta.insert("expected_format".into(), "DE + 9 digits".into());
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.vat_number_germany_format", &[]),
            meta,
        );
    }

    let numeric = &vat[2..];
    // check digit is the weighted sum of the first 8 digits mod 11; a
    // remainder of 10 never appears in issued numbers
    let check = weighted_sum(&numeric[..8], &UST_ID_WEIGHTS) % 11;
    let actual = u32::from(numeric.as_bytes()[8] - b'0');
    if check == 10 || check != actual {
        meta.insert("validation_type".into(), "ust_id_checksum".into());
        meta.insert("numeric_part".into(), numeric.into());
        return ValidationResult::invalid(
            ErrorKind::Checksum,
            msgs.resolve("validation.vat_number_germany_checksum", &[]),
            meta,
        );
    }

    let meta = metadata([
        ("country", COUNTRY.into()),
        ("document_type", "USt-IdNr".into()),
        ("numeric_part", numeric.into()),
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
        &["string", "size:11", "regex:/^[0-9]{11}$/"],
        format!("{} (Steuer-IdNr)", msgs.resolve("fields.tax_code", &[])),
    )];
    fields.extend(name_fields(msgs));

    if business_type.requires_vat_number() {
        fields.push(FieldRequirement::new(
            "vat_number",
            true,
            &["string", "regex:/^DE[0-9]{9}$/"],
            format!("{} (USt-IdNr)", msgs.resolve("fields.vat_number", &[])),
        ));
        fields.push(company_name_field(msgs));
    }
    fields
}

/// Ensure the `DE` prefix on a USt-IdNr.
///
/// A bare 9-digit number gains the prefix; anything else is returned
/// unchanged (after trim/uppercase) for the validator to reject.
pub fn format_ust_idnr(vat_number: &str) -> String {
    let vat = vat_number.trim().to_ascii_uppercase();
    if vat.len() == UST_ID_DIGITS && vat.bytes().all(|b| b.is_ascii_digit()) {
        format!("DE{vat}")
    } else {
        vat
    }
}

fn is_ust_idnr_shaped(vat: &str) -> bool {
    vat.len() == 2 + UST_ID_DIGITS
        && vat.starts_with("DE")
        && vat[2..].bytes().all(|b| b.is_ascii_digit())
}

/// Returns the first broken structural rule as `(rule_tag, message_key)`.
///
/// Rules: no leading zero, no digit occurring more than three times, and at
/// most two distinct digits occurring more than once.
fn broken_structure_rule(steuer_id: &str) -> Option<(&'static str, &'static str)> {
    if steuer_id.starts_with('0') {
        return Some((
            "no_leading_zero",
            "validation.tax_code_germany_cannot_start_zero",
        ));
    }

    let mut counts = [0u8; 10];
    for b in steuer_id.bytes() {
        counts[usize::from(b - b'0')] += 1;
    }
    if counts.iter().any(|&c| c > 3) {
        return Some((
            "max_digit_repeats",
            "validation.tax_code_germany_too_many_repeats",
        ));
    }
    if counts.iter().filter(|&&c| c > 1).count() > 2 {
        return Some((
            "max_repeated_different_digits",
            "validation.tax_code_germany_too_many_repeated_digits",
        ));
    }
    None
}
