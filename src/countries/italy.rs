//! Italian Codice Fiscale and Partita IVA validation.
//!
//! The Codice Fiscale check letter uses the official odd/even position value
//! tables over the first 15 characters; the embedded birth date is decoded
//! and bounded to a plausible window (not in the future, not more than 150
//! years ago). The Partita IVA check digit is an alternating-weight sum over
//! the first 10 digits.

use chrono::{Datelike, Months, NaiveDate};

use crate::checksum::alternating_check_digit;
use crate::core::{
    BusinessType, ErrorKind, FieldRequirement, MetaValue, ValidationResult, metadata,
};
use crate::core::fields::{company_name_field, name_fields};
use crate::messages::MessageLookup;

const COUNTRY: &str = "IT";
const TAX_CODE_LEN: usize = 16;
const VAT_LEN: usize = 11;

/// Position values for characters at odd positions (1st, 3rd, … — even
/// 0-indexed). Digits then letters A–Z.
const ODD_DIGIT_VALUES: [u32; 10] = [1, 0, 5, 7, 9, 13, 15, 17, 19, 21];
const ODD_LETTER_VALUES: [u32; 26] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, 2, 4, 18, 20, 11, 3, 6, 8, 12, 14, 16, 10, 22, 25, 24, 23,
];

fn position_value(byte: u8, index: usize) -> u32 {
    if index % 2 == 0 {
        match byte {
            b'0'..=b'9' => ODD_DIGIT_VALUES[usize::from(byte - b'0')],
            _ => ODD_LETTER_VALUES[usize::from(byte - b'A')],
        }
    } else {
        // Even positions: digits count as themselves, letters as 0..=25
        match byte {
            b'0'..=b'9' => u32::from(byte - b'0'),
            _ => u32::from(byte - b'A'),
        }
    }
}

/// Birth month encoding (letter at position 8).
fn month_number(letter: u8) -> Option<u32> {
    Some(match letter {
        b'A' => 1,
        b'B' => 2,
        b'C' => 3,
        b'D' => 4,
        b'E' => 5,
        b'H' => 6,
        b'L' => 7,
        b'M' => 8,
        b'P' => 9,
        b'R' => 10,
        b'S' => 11,
        b'T' => 12,
        _ => return None,
    })
}

pub(crate) fn validate_tax_code(
    tax_code: &str,
    business_type: Option<BusinessType>,
    today: NaiveDate,
    msgs: &dyn MessageLookup,
) -> ValidationResult {
    let code = tax_code.trim().to_ascii_uppercase();

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

    if code.len() != TAX_CODE_LEN {
        meta.insert("required_length".into(), TAX_CODE_LEN.into());
        meta.insert("actual_length".into(), code.len().into());
        return ValidationResult::invalid(
            ErrorKind::Length,
            msgs.resolve(
                "validation.tax_code_italy_length",
                &[("required", TAX_CODE_LEN.to_string())],
            ),
            meta,
        );
    }

    if !matches_codice_fiscale_pattern(code.as_bytes()) {
        meta.insert("expected_format".into(), "AAAAAANNANNANNNA".into());
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.tax_code_italy_format", &[]),
            meta,
        );
    }

    let bytes = code.as_bytes();
    let sum: u32 = bytes[..15]
        .iter()
        .enumerate()
        .map(|(i, &b)| position_value(b, i))
        .sum();
    let expected = b'A' + (sum % 26) as u8;
    if expected != bytes[15] {
        meta.insert("validation_type".into(), "checksum".into());
        meta.insert(
            "expected_check_letter".into(),
            (expected as char).to_string().into(),
        );
        meta.insert(
            "provided_check_letter".into(),
            (bytes[15] as char).to_string().into(),
        );
        return ValidationResult::invalid(
            ErrorKind::Checksum,
            msgs.resolve("validation.tax_code_italy_checksum", &[]),
            meta,
        );
    }

    let decoded = decode_birth_date(bytes, today);
    if let Some((birth_date, _)) = decoded {
        if birth_date > today {
            meta.insert("extracted_birth_date".into(), birth_date.into());
            return ValidationResult::invalid(
                ErrorKind::BusinessRule,
                msgs.resolve("validation.tax_code_italy_future_birth", &[]),
                meta,
            );
        }
        let cutoff = today
            .checked_sub_months(Months::new(150 * 12))
            .unwrap_or(NaiveDate::MIN);
        if birth_date < cutoff {
            meta.insert("extracted_birth_date".into(), birth_date.into());
            return ValidationResult::invalid(
                ErrorKind::BusinessRule,
                msgs.resolve("validation.tax_code_italy_too_old", &[]),
                meta,
            );
        }
    }

    let mut meta = metadata([
        ("country", COUNTRY.into()),
        ("validation_level", "full_checksum".into()),
        ("original_input", code.as_str().into()),
    ]);
    if let Some(bt) = business_type {
        meta.insert("business_type".into(), bt.as_str().into());
    }
    if let Some((birth_date, gender)) = decoded {
        meta.insert("birth_date_encoded".into(), birth_date.into());
        meta.insert("gender_encoded".into(), MetaValue::Str(gender.to_string()));
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

    if vat.len() != VAT_LEN {
        meta.insert("required_length".into(), VAT_LEN.into());
        meta.insert("actual_length".into(), vat.len().into());
        return ValidationResult::invalid(
            ErrorKind::Length,
            msgs.resolve(
                "validation.vat_number_italy_length",
                &[("required", VAT_LEN.to_string())],
            ),
            meta,
        );
    }

    if !vat.bytes().all(|b| b.is_ascii_digit()) {
        meta.insert("expected_format".into(), "numeric_only".into());
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.vat_number_italy_format", &[]),
            meta,
        );
    }

    // Odd 0-indexed positions are doubled in the Partita IVA scheme
    let expected = alternating_check_digit(&vat[..10], 1);
    let actual = u32::from(vat.as_bytes()[10] - b'0');
    if expected != actual {
        meta.insert("validation_type".into(), "luhn_checksum".into());
        meta.insert("expected_check_digit".into(), i64::from(expected).into());
        meta.insert("provided_check_digit".into(), i64::from(actual).into());
        return ValidationResult::invalid(
            ErrorKind::Checksum,
            msgs.resolve("validation.vat_number_italy_checksum", &[]),
            meta,
        );
    }

    ValidationResult::valid(
        vat.clone(),
        metadata([
            ("country", COUNTRY.into()),
            ("validation_level", "full_checksum".into()),
            ("original_input", vat.as_str().into()),
        ]),
    )
}

/// Uppercase and strip spaces. Idempotent.
pub(crate) fn format_tax_code(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_whitespace())
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
        &[
            "string",
            "size:16",
            "regex:/^[A-Z]{6}[0-9]{2}[A-Z][0-9]{2}[A-Z][0-9]{3}[A-Z]$/",
        ],
        msgs.resolve("fields.tax_code", &[]),
    )];
    fields.extend(name_fields(msgs));
    fields.push(FieldRequirement::new(
        "birth_date",
        true,
        &["date", "before:today", "after:today-150years"],
        msgs.resolve("fields.birth_date", &[]),
    ));

    if business_type.requires_vat_number() {
        fields.push(FieldRequirement::new(
            "vat_number",
            true,
            &["string", "size:11", "regex:/^[0-9]{11}$/"],
            msgs.resolve("fields.vat_number", &[]),
        ));
        fields.push(company_name_field(msgs));
    }
    fields
}

fn matches_codice_fiscale_pattern(bytes: &[u8]) -> bool {
    // ^[A-Z]{6}[0-9]{2}[A-Z][0-9]{2}[A-Z][0-9]{3}[A-Z]$
    bytes.len() == TAX_CODE_LEN
        && bytes[..6].iter().all(u8::is_ascii_uppercase)
        && bytes[6..8].iter().all(u8::is_ascii_digit)
        && bytes[8].is_ascii_uppercase()
        && bytes[9..11].iter().all(u8::is_ascii_digit)
        && bytes[11].is_ascii_uppercase()
        && bytes[12..15].iter().all(u8::is_ascii_digit)
        && bytes[15].is_ascii_uppercase()
}

/// Decode the embedded birth date and gender ('M'/'F').
///
/// Century inference compares the two-digit year against the current
/// two-digit year; people born exactly 100 years apart are indistinguishable.
fn decode_birth_date(bytes: &[u8], today: NaiveDate) -> Option<(NaiveDate, char)> {
    let year = u32::from(bytes[6] - b'0') * 10 + u32::from(bytes[7] - b'0');
    let month = month_number(bytes[8])?;
    let day_gender = u32::from(bytes[9] - b'0') * 10 + u32::from(bytes[10] - b'0');

    let current_year_short = (today.year() % 100) as u32;
    let full_year = if year > current_year_short {
        1900 + year as i32
    } else {
        2000 + year as i32
    };

    let (day, gender) = if day_gender > 40 {
        (day_gender - 40, 'F')
    } else {
        (day_gender, 'M')
    };

    NaiveDate::from_ymd_opt(full_year, month, day).map(|d| (d, gender))
}
