//! French SIREN and SIRET validation.
//!
//! Both identifiers use the standard Luhn check. A SIRET embeds the issuing
//! company's SIREN in its first nine digits, so the SIREN part is verified
//! before the full 14-digit checksum to produce the more specific error.

use crate::checksum::luhn;
use crate::core::{BusinessType, ErrorKind, FieldRequirement, ValidationResult, metadata};
use crate::core::fields::{company_name_field, name_fields};
use crate::messages::MessageLookup;

const COUNTRY: &str = "FR";
const SIREN_LEN: usize = 9;
const SIRET_LEN: usize = 14;

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

    if code.len() != SIREN_LEN {
        meta.insert("required_length".into(), SIREN_LEN.into());
        meta.insert("actual_length".into(), code.len().into());
        return ValidationResult::invalid(
            ErrorKind::Length,
            msgs.resolve(
                "validation.tax_code_france_length",
                &[("required", SIREN_LEN.to_string())],
            ),
            meta,
        );
    }

    if !code.bytes().all(|b| b.is_ascii_digit()) {
        meta.insert("expected_format".into(), "numeric_only".into());
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.tax_code_france_format", &[]),
            meta,
        );
    }

    if !luhn(&code) {
        meta.insert("validation_type".into(), "luhn_checksum".into());
        return ValidationResult::invalid(
            ErrorKind::Checksum,
            msgs.resolve("validation.tax_code_france_checksum", &[]),
            meta,
        );
    }

    let mut meta = metadata([
        ("country", COUNTRY.into()),
        ("validation_level", "full_checksum".into()),
        ("number_type", "SIREN".into()),
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

    if vat.len() != SIRET_LEN {
        meta.insert("required_length".into(), SIRET_LEN.into());
        meta.insert("actual_length".into(), vat.len().into());
        return ValidationResult::invalid(
            ErrorKind::Length,
            msgs.resolve(
                "validation.vat_number_france_length",
                &[("required", SIRET_LEN.to_string())],
            ),
            meta,
        );
    }

    if !vat.bytes().all(|b| b.is_ascii_digit()) {
        meta.insert("expected_format".into(), "numeric_only".into());
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.vat_number_france_format", &[]),
            meta,
        );
    }

    let siren = &vat[..SIREN_LEN];
    let nic = &vat[SIREN_LEN..];

    // The embedded SIREN is checked first so its failure gets the more
    // specific message
    if !luhn(siren) {
        meta.insert("validation_type".into(), "siren_checksum".into());
        meta.insert("siren_part".into(), siren.into());
        return ValidationResult::invalid(
            ErrorKind::Checksum,
            msgs.resolve("validation.vat_number_france_siren_invalid", &[]),
            meta,
        );
    }

    if !luhn(&vat) {
        meta.insert("validation_type".into(), "siret_checksum".into());
        return ValidationResult::invalid(
            ErrorKind::Checksum,
            msgs.resolve("validation.vat_number_france_checksum", &[]),
            meta,
        );
    }

    let meta = metadata([
        ("country", COUNTRY.into()),
        ("validation_level", "full_checksum".into()),
        ("number_type", "SIRET".into()),
        ("siren_part", siren.into()),
        ("nic_part", nic.into()),
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
        &["string", "size:9", "regex:/^[0-9]{9}$/"],
        format!("{} (SIREN)", msgs.resolve("fields.tax_code", &[])),
    )];
    fields.extend(name_fields(msgs));

    if business_type.requires_vat_number() {
        fields.push(FieldRequirement::new(
            "vat_number",
            true,
            &["string", "size:14", "regex:/^[0-9]{14}$/"],
            format!("{} (SIRET)", msgs.resolve("fields.vat_number", &[])),
        ));
        fields.push(company_name_field(msgs));
    }
    fields
}

/// The company identifier embedded in a SIRET (first nine digits).
pub fn siren_from_siret(siret: &str) -> Option<&str> {
    (siret.len() == SIRET_LEN).then(|| &siret[..SIREN_LEN])
}

/// The establishment identifier embedded in a SIRET (last five digits).
pub fn nic_from_siret(siret: &str) -> Option<&str> {
    (siret.len() == SIRET_LEN).then(|| &siret[SIREN_LEN..])
}
