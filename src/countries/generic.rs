//! Fallback validation for countries without a specific validator.
//!
//! Only length and character-class checks; no checksum. Successful results
//! carry `validation_level: basic_format` so callers can tell the difference
//! from a full checksum validation.

use crate::core::{BusinessType, ErrorKind, FieldRequirement, ValidationResult, metadata};
use crate::core::fields::{company_name_field, name_fields};
use crate::messages::MessageLookup;

const COUNTRY: &str = "GENERIC";
const TAX_CODE_MIN: usize = 6;
const TAX_CODE_MAX: usize = 20;
const VAT_MIN: usize = 8;
const VAT_MAX: usize = 15;

fn is_tax_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | ' ')
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

    if code.len() < TAX_CODE_MIN {
        meta.insert("min_length".into(), TAX_CODE_MIN.into());
        meta.insert("actual_length".into(), code.len().into());
        return ValidationResult::invalid(
            ErrorKind::Length,
            msgs.resolve(
                "validation.tax_code_min_length",
                &[("min", TAX_CODE_MIN.to_string())],
            ),
            meta,
        );
    }

    if code.len() > TAX_CODE_MAX {
        meta.insert("max_length".into(), TAX_CODE_MAX.into());
        meta.insert("actual_length".into(), code.len().into());
        return ValidationResult::invalid(
            ErrorKind::Length,
            msgs.resolve(
                "validation.tax_code_max_length",
                &[("max", TAX_CODE_MAX.to_string())],
            ),
            meta,
        );
    }

    if !code.chars().all(is_tax_code_char) {
        meta.insert(
            "expected_format".into(),
            "alphanumeric_with_separators".into(),
        );
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.tax_code_invalid_format", &[]),
            meta,
        );
    }

    let mut out = metadata([
        ("country", COUNTRY.into()),
        ("validation_level", "basic_format".into()),
        ("original_input", code.as_str().into()),
    ]);
    if let Some(bt) = business_type {
        out.insert("business_type".into(), bt.as_str().into());
    }
    ValidationResult::valid(format_tax_code(&code), out)
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

    if vat.len() < VAT_MIN {
        meta.insert("min_length".into(), VAT_MIN.into());
        meta.insert("actual_length".into(), vat.len().into());
        return ValidationResult::invalid(
            ErrorKind::Length,
            msgs.resolve(
                "validation.vat_number_min_length",
                &[("min", VAT_MIN.to_string())],
            ),
            meta,
        );
    }

    if vat.len() > VAT_MAX {
        meta.insert("max_length".into(), VAT_MAX.into());
        meta.insert("actual_length".into(), vat.len().into());
        return ValidationResult::invalid(
            ErrorKind::Length,
            msgs.resolve(
                "validation.vat_number_max_length",
                &[("max", VAT_MAX.to_string())],
            ),
            meta,
        );
    }

    if !vat.chars().all(|c| c.is_ascii_alphanumeric()) {
        meta.insert("expected_format".into(), "alphanumeric_only".into());
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.vat_number_invalid_format", &[]),
            meta,
        );
    }

    let normalized = vat.to_ascii_uppercase();
    let meta = metadata([
        ("country", COUNTRY.into()),
        ("validation_level", "basic_format".into()),
        ("original_input", vat.as_str().into()),
    ]);
    ValidationResult::valid(normalized, meta)
}

/// Uppercase and strip spaces, dots and hyphens. Idempotent.
pub(crate) fn format_tax_code(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub(crate) fn required_fields(
    business_type: BusinessType,
    msgs: &dyn MessageLookup,
) -> Vec<FieldRequirement> {
    let mut fields = vec![FieldRequirement::new(
        "tax_code",
        true,
        &["string", "min:6", "max:20", "regex:/^[A-Z0-9\\-\\.\\s]+$/i"],
        msgs.resolve("fields.tax_code", &[]),
    )];
    fields.extend(name_fields(msgs));

    if business_type.requires_vat_number() {
        fields.push(FieldRequirement::new(
            "vat_number",
            true,
            &["string", "min:8", "max:15", "regex:/^[A-Z0-9]+$/i"],
            msgs.resolve("fields.vat_number", &[]),
        ));
        fields.push(company_name_field(msgs));
    }
    fields
}
