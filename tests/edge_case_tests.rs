//! Boundary values, error precedence and normalization edge cases.

use chrono::NaiveDate;
use fiscale::{BusinessType, Country, ErrorKind, MetaValue, Validator};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Error precedence: Required > Length > Format > Checksum > BusinessRule
// ---------------------------------------------------------------------------

#[test]
fn length_beats_format() {
    // Too short AND non-numeric: length is reported
    let v = Validator::new(Country::France);
    let r = v.validate_tax_code("ABC", None);
    assert_eq!(r.error_kind(), Some(ErrorKind::Length));
}

#[test]
fn format_beats_checksum() {
    // Right length, wrong charset: format is reported, checksum never runs
    let v = Validator::new(Country::Portugal);
    let r = v.validate_tax_code("12345678X", None);
    assert_eq!(r.error_kind(), Some(ErrorKind::Format));
}

#[test]
fn italy_checksum_beats_business_rule() {
    // Future birth date but broken check letter: checksum is reported
    let v = Validator::new(Country::Italy);
    let r = v.validate_tax_code_at("RSSMRA24T10A562E", None, date(2024, 6, 15));
    assert_eq!(r.error_kind(), Some(ErrorKind::Checksum));
}

#[test]
fn germany_business_rule_beats_checksum() {
    // A leading zero is structurally impossible, reported before any
    // checksum arithmetic
    let v = Validator::new(Country::Germany);
    let r = v.validate_tax_code("00000000000", None);
    assert_eq!(r.error_kind(), Some(ErrorKind::BusinessRule));
}

// ---------------------------------------------------------------------------
// Whitespace and case normalization
// ---------------------------------------------------------------------------

#[test]
fn surrounding_whitespace_is_trimmed_everywhere() {
    let cases: &[(Country, &str)] = &[
        (Country::France, "  732829320  "),
        (Country::Germany, "\t86095742719\n"),
        (Country::Portugal, " 123456789 "),
        (Country::England, " 1234567890 "),
    ];
    for (country, input) in cases {
        let v = Validator::new(*country);
        let r = v.validate_tax_code(input, None);
        assert!(r.is_valid(), "{country:?}: {:?}", r.error_message());
        assert_eq!(r.normalized(), Some(input.trim()), "{country:?}");
    }
}

#[test]
fn interior_whitespace_is_not_tolerated_by_validation() {
    // Normalizing for storage is format_tax_code's job; validation takes the
    // input as-is after trimming
    let v = Validator::new(Country::France);
    let r = v.validate_tax_code("732 829 320", None);
    assert_eq!(r.error_kind(), Some(ErrorKind::Length));

    let formatted = v.format_tax_code("732 829 320");
    assert!(v.validate_tax_code(&formatted, None).is_valid());
}

#[test]
fn format_then_validate_pipeline() {
    let cases: &[(Country, &str, &str)] = &[
        (Country::Italy, " rss mra85t10a562s ", "RSSMRA85T10A562S"),
        (Country::Spain, "b-12.345.674", "B12345674"),
        (Country::England, "12 345 678 90", "1234567890"),
        (Country::Generic, "ab-12 345.6", "AB123456"),
    ];
    for (country, raw, expected) in cases {
        let v = Validator::new(*country);
        let formatted = v.format_tax_code(raw);
        assert_eq!(&formatted, expected, "{country:?}");
        // Idempotent
        assert_eq!(v.format_tax_code(&formatted), formatted, "{country:?}");
    }
}

// ---------------------------------------------------------------------------
// Italy birth-date decoding boundaries
// ---------------------------------------------------------------------------

#[test]
fn italy_century_pivot_follows_reference_year() {
    let v = Validator::new(Country::Italy);
    // Year digits 85 with reference 2024: 85 > 24, so 1985
    let r = v.validate_tax_code_at("RSSMRA85T10A562S", None, date(2024, 6, 15));
    assert_eq!(
        r.meta("birth_date_encoded").and_then(MetaValue::as_date),
        Some(date(1985, 12, 10))
    );
}

#[test]
fn italy_female_day_encoding() {
    let v = Validator::new(Country::Italy);
    let r = v.validate_tax_code_at("RSSMRA85T50A562W", None, date(2024, 6, 15));
    assert!(r.is_valid(), "{:?}", r.error_message());
    assert_eq!(
        r.meta("gender_encoded").and_then(MetaValue::as_str),
        Some("F")
    );
}

#[test]
fn italy_same_day_birth_is_not_future() {
    // Birth on the reference date itself passes the plausibility window
    let v = Validator::new(Country::Italy);
    let r = v.validate_tax_code_at("RSSMRA24T10A562D", None, date(2024, 12, 10));
    assert!(r.is_valid(), "{:?}", r.error_message());
}

// ---------------------------------------------------------------------------
// Metadata completeness on failures
// ---------------------------------------------------------------------------

#[test]
fn length_errors_carry_both_lengths() {
    let v = Validator::new(Country::Germany);
    let r = v.validate_tax_code("123", None);
    assert_eq!(
        r.meta("required_length").and_then(MetaValue::as_int),
        Some(11)
    );
    assert_eq!(r.meta("actual_length").and_then(MetaValue::as_int), Some(3));
    assert_eq!(r.meta("country").and_then(MetaValue::as_str), Some("DE"));
    assert_eq!(
        r.meta("field").and_then(MetaValue::as_str),
        Some("tax_code")
    );
}

#[test]
fn business_type_flows_into_metadata() {
    let v = Validator::new(Country::France);
    let r = v.validate_tax_code("732829320", Some(BusinessType::Corporation));
    assert!(r.is_valid());
    assert_eq!(
        r.meta("business_type").and_then(MetaValue::as_str),
        Some("corporation")
    );
}

#[test]
fn checksum_failures_name_the_expected_value() {
    let v = Validator::new(Country::Spain);
    let r = v.validate_tax_code("12345678A", None);
    assert_eq!(
        r.meta("expected_letter").and_then(MetaValue::as_str),
        Some("Z")
    );
    assert_eq!(
        r.meta("provided_letter").and_then(MetaValue::as_str),
        Some("A")
    );
}

// ---------------------------------------------------------------------------
// Generic fallback boundaries
// ---------------------------------------------------------------------------

#[test]
fn generic_length_boundaries() {
    let v = Validator::new(Country::Generic);
    assert!(v.validate_tax_code("A23456", None).is_valid());
    assert!(v.validate_tax_code(&"A".repeat(20), None).is_valid());
    assert_eq!(
        v.validate_tax_code("A2345", None).error_kind(),
        Some(ErrorKind::Length)
    );
    assert_eq!(
        v.validate_tax_code(&"A".repeat(21), None).error_kind(),
        Some(ErrorKind::Length)
    );

    assert!(v.validate_vat_number("12345678").is_valid());
    assert!(v.validate_vat_number(&"9".repeat(15)).is_valid());
    assert_eq!(
        v.validate_vat_number("1234567").error_kind(),
        Some(ErrorKind::Length)
    );
    assert_eq!(
        v.validate_vat_number(&"9".repeat(16)).error_kind(),
        Some(ErrorKind::Length)
    );
}

#[test]
fn generic_rejects_unicode_and_symbols() {
    let v = Validator::new(Country::Generic);
    for input in ["ABÇ12345", "ABC_1234", "ABC€1234", "АВС12345"] {
        let r = v.validate_tax_code(input, None);
        assert_eq!(r.error_kind(), Some(ErrorKind::Format), "{input}");
    }
}

// ---------------------------------------------------------------------------
// Hostile input never panics
// ---------------------------------------------------------------------------

#[test]
fn hostile_inputs_return_results() {
    let inputs = [
        "\u{0}\u{0}\u{0}",
        "éééééééééééééééé",
        "𝔄𝔅ℭ𝔇𝔈𝔉𝔊ℌℑ𝔍𝔎𝔏",
        "DE¼¾½⅓⅔⅛⅜⅝",
        "                    ",
        "-9999999999",
    ];
    for country in Country::supported().iter().chain([&Country::Generic]) {
        let v = Validator::new(*country);
        for input in inputs {
            let _ = v.validate_tax_code(input, None);
            let _ = v.validate_vat_number(input);
            let _ = v.format_tax_code(input);
        }
    }
}
