//! Spanish DNI, NIE and CIF validation.
//!
//! The tax-code entry point recognizes all three document shapes and applies
//! the matching check: DNI and NIE use the mod-23 letter table (a NIE's
//! leading X/Y/Z maps to 0/1/2 first), CIF uses an alternating digit sum
//! whose check position may hold either the digit or its letter encoding —
//! issued numbers exist in both representations, so both are accepted.

use crate::checksum::alternating_check_digit;
use crate::core::{BusinessType, ErrorKind, FieldRequirement, Metadata, ValidationResult, metadata};
use crate::core::fields::{company_name_field, name_fields};
use crate::messages::MessageLookup;

const COUNTRY: &str = "ES";

/// Check letters for DNI/NIE, indexed by the number mod 23.
const DNI_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

/// CIF check-digit to check-letter encoding.
const CIF_LETTERS: &[u8; 10] = b"JABCDEFGHI";

/// Spanish fiscal document shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    /// 8 digits + check letter (nationals).
    Dni,
    /// X/Y/Z + 7 digits + check letter (foreign residents).
    Nie,
    /// Organization letter + 7 digits + check digit or letter (entities).
    Cif,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Dni => "DNI",
            DocumentType::Nie => "NIE",
            DocumentType::Cif => "CIF",
        }
    }
}

/// Classify an already-normalized (trimmed, uppercased) document.
pub fn detect_document_type(document: &str) -> Option<DocumentType> {
    let bytes = document.as_bytes();
    if bytes.len() != 9 {
        return None;
    }
    if bytes[..8].iter().all(u8::is_ascii_digit) && bytes[8].is_ascii_uppercase() {
        return Some(DocumentType::Dni);
    }
    if matches!(bytes[0], b'X' | b'Y' | b'Z')
        && bytes[1..8].iter().all(u8::is_ascii_digit)
        && bytes[8].is_ascii_uppercase()
    {
        return Some(DocumentType::Nie);
    }
    if cif_organization_name(bytes[0]).is_some()
        && bytes[1..8].iter().all(u8::is_ascii_digit)
        && (bytes[8].is_ascii_digit() || (b'A'..=b'J').contains(&bytes[8]))
    {
        return Some(DocumentType::Cif);
    }
    None
}

fn cif_organization_name(letter: u8) -> Option<&'static str> {
    Some(match letter {
        b'A' => "Sociedad Anónima",
        b'B' => "Sociedad de Responsabilidad Limitada",
        b'C' => "Sociedad Colectiva",
        b'D' => "Sociedad Comanditaria",
        b'E' => "Comunidad de Bienes",
        b'F' => "Sociedad Cooperativa",
        b'G' => "Asociación",
        b'H' => "Comunidad de Propietarios",
        b'J' => "Sociedad Civil",
        b'N' => "Entidad Extranjera",
        b'P' => "Corporación Local",
        b'Q' => "Organismo Autónomo",
        b'R' => "Congregación o Institución Religiosa",
        b'S' => "Órgano de la Administración",
        b'U' => "Unión Temporal de Empresas",
        b'V' => "Fondo de Inversión",
        b'W' => "Establecimiento Permanente",
        _ => return None,
    })
}

pub(crate) fn validate_tax_code(
    tax_code: &str,
    business_type: Option<BusinessType>,
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

    let Some(doc_type) = detect_document_type(&code) else {
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.tax_code_spain_format", &[]),
            meta,
        );
    };
    meta.insert("document_type".into(), doc_type.as_str().into());

    match doc_type {
        DocumentType::Dni => validate_mod23(&code, &code[..8], doc_type, meta, msgs),
        DocumentType::Nie => {
            // X/Y/Z maps to a leading 0/1/2, then the DNI table applies
            let lead = match code.as_bytes()[0] {
                b'X' => '0',
                b'Y' => '1',
                _ => '2',
            };
            let converted = format!("{lead}{}", &code[1..8]);
            validate_mod23(&code, &converted, doc_type, meta, msgs)
        }
        DocumentType::Cif => validate_cif(&code, meta, msgs),
    }
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

    // Looser than detection on purpose: an unknown organization letter
    // still reaches the dedicated error below
    let bytes = vat.as_bytes();
    let cif_shaped = bytes.len() == 9
        && bytes[0].is_ascii_uppercase()
        && bytes[1..8].iter().all(u8::is_ascii_digit)
        && (bytes[8].is_ascii_digit() || (b'A'..=b'J').contains(&bytes[8]));
    if !cif_shaped {
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.tax_code_spain_format", &[]),
            meta,
        );
    }
    meta.insert("document_type".into(), "CIF".into());

    validate_cif(&vat, meta, msgs)
}

fn validate_mod23(
    code: &str,
    numbers: &str,
    doc_type: DocumentType,
    mut meta: Metadata,
    msgs: &dyn MessageLookup,
) -> ValidationResult {
    let value: u32 = numbers.parse().unwrap_or(0);
    let expected = DNI_LETTERS[(value % 23) as usize];
    let provided = code.as_bytes()[8];

    if provided != expected {
        let key = match doc_type {
            DocumentType::Dni => "validation.tax_code_spain_dni_checksum",
            _ => "validation.tax_code_spain_nie_checksum",
        };
        meta.insert(
            "expected_letter".into(),
            (expected as char).to_string().into(),
        );
        meta.insert(
            "provided_letter".into(),
            (provided as char).to_string().into(),
        );
        return ValidationResult::invalid(ErrorKind::Checksum, msgs.resolve(key, &[]), meta);
    }

    let mut out = metadata([
        ("country", COUNTRY.into()),
        ("document_type", doc_type.as_str().into()),
        ("validation_level", "full_checksum".into()),
        ("original_input", code.into()),
    ]);
    if let Some(bt) = meta.remove("business_type") {
        out.insert("business_type".into(), bt);
    }
    ValidationResult::valid(code, out)
}

fn validate_cif(cif: &str, mut meta: Metadata, msgs: &dyn MessageLookup) -> ValidationResult {
    let bytes = cif.as_bytes();
    let Some(org_name) = cif_organization_name(bytes[0]) else {
        meta.insert(
            "invalid_org_letter".into(),
            (bytes[0] as char).to_string().into(),
        );
        return ValidationResult::invalid(
            ErrorKind::Format,
            msgs.resolve("validation.tax_code_spain_cif_invalid_org", &[]),
            meta,
        );
    };

    // Even 0-indexed positions of the digit block are doubled
    let check_digit = alternating_check_digit(&cif[1..8], 0);
    let check_letter = CIF_LETTERS[check_digit as usize];
    let provided = bytes[8];

    let matches_digit = provided == b'0' + check_digit as u8;
    let matches_letter = provided == check_letter;
    if !matches_digit && !matches_letter {
        meta.insert("expected_digit".into(), i64::from(check_digit).into());
        meta.insert(
            "expected_letter".into(),
            (check_letter as char).to_string().into(),
        );
        meta.insert(
            "provided_check".into(),
            (provided as char).to_string().into(),
        );
        return ValidationResult::invalid(
            ErrorKind::Checksum,
            msgs.resolve("validation.tax_code_spain_cif_checksum", &[]),
            meta,
        );
    }

    let mut out = metadata([
        ("country", COUNTRY.into()),
        ("document_type", "CIF".into()),
        ("organization_type", org_name.into()),
        ("validation_level", "full_checksum".into()),
        ("original_input", cif.into()),
    ]);
    if let Some(bt) = meta.remove("business_type") {
        out.insert("business_type".into(), bt);
    }
    ValidationResult::valid(cif, out)
}

/// Uppercase and strip spaces, hyphens and dots. Idempotent.
pub(crate) fn format_tax_code(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.'))
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
            "regex:/^([0-9]{8}[A-Z]|[XYZ][0-9]{7}[A-Z]|[ABCDEFGHJNPQRSUVW][0-9]{7}[0-9A-J])$/",
        ],
        format!("{} (DNI/NIE/CIF)", msgs.resolve("fields.tax_code", &[])),
    )];
    fields.extend(name_fields(msgs));

    if business_type.requires_vat_number() {
        fields.push(FieldRequirement::new(
            "vat_number",
            true,
            &["string", "regex:/^[ABCDEFGHJNPQRSUVW][0-9]{7}[0-9A-J]$/"],
            format!("{} (CIF)", msgs.resolve("fields.vat_number", &[])),
        ));
        fields.push(company_name_field(msgs));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MetaValue;
    use crate::messages::EnglishMessages;

    fn validate(code: &str) -> ValidationResult {
        validate_tax_code(code, None, &EnglishMessages)
    }

    #[test]
    fn valid_dni() {
        let r = validate("12345678Z");
        assert!(r.is_valid(), "{:?}", r.error_message());
        assert_eq!(
            r.meta("document_type").and_then(MetaValue::as_str),
            Some("DNI")
        );
    }

    #[test]
    fn dni_wrong_letter() {
        let r = validate("12345678A");
        assert_eq!(r.error_kind(), Some(ErrorKind::Checksum));
        assert_eq!(
            r.meta("expected_letter").and_then(MetaValue::as_str),
            Some("Z")
        );
    }

    #[test]
    fn valid_nie() {
        let r = validate("X1234567L");
        assert!(r.is_valid(), "{:?}", r.error_message());
        assert_eq!(
            r.meta("document_type").and_then(MetaValue::as_str),
            Some("NIE")
        );
    }

    #[test]
    fn nie_wrong_letter() {
        let r = validate("X1234567T");
        assert_eq!(r.error_kind(), Some(ErrorKind::Checksum));
    }

    #[test]
    fn valid_cif_with_digit_check() {
        let r = validate("B12345674");
        assert!(r.is_valid(), "{:?}", r.error_message());
        assert_eq!(
            r.meta("organization_type").and_then(MetaValue::as_str),
            Some("Sociedad de Responsabilidad Limitada")
        );
    }

    #[test]
    fn valid_cif_with_letter_check() {
        let r = validate("B1234567E");
        assert!(r.is_valid(), "{:?}", r.error_message());
    }

    #[test]
    fn cif_wrong_check() {
        let r = validate("B1234567J");
        assert_eq!(r.error_kind(), Some(ErrorKind::Checksum));
        assert_eq!(
            r.meta("expected_digit").and_then(MetaValue::as_int),
            Some(4)
        );
        assert_eq!(
            r.meta("expected_letter").and_then(MetaValue::as_str),
            Some("E")
        );
    }

    #[test]
    fn unrecognizable_shape_is_format_error() {
        for code in ["1234", "ABCDEFGHI", "K1234567E", "1234567Z"] {
            let r = validate(code);
            assert_eq!(r.error_kind(), Some(ErrorKind::Format), "{code}");
        }
    }

    #[test]
    fn lowercase_input_is_normalized() {
        let r = validate("x1234567l");
        assert!(r.is_valid());
        assert_eq!(r.normalized(), Some("X1234567L"));
    }

    #[test]
    fn vat_number_requires_cif_shape() {
        let r = validate_vat_number("12345678Z", &EnglishMessages);
        assert_eq!(r.error_kind(), Some(ErrorKind::Format));

        let r = validate_vat_number("B12345674", &EnglishMessages);
        assert!(r.is_valid());
    }

    #[test]
    fn vat_number_with_unknown_org_letter() {
        let r = validate_vat_number("K1234567E", &EnglishMessages);
        assert_eq!(r.error_kind(), Some(ErrorKind::Format));
        assert_eq!(
            r.meta("invalid_org_letter").and_then(MetaValue::as_str),
            Some("K")
        );
    }

    #[test]
    fn detection_covers_all_shapes() {
        assert_eq!(detect_document_type("12345678Z"), Some(DocumentType::Dni));
        assert_eq!(detect_document_type("Y7654321X"), Some(DocumentType::Nie));
        assert_eq!(detect_document_type("W1234567A"), Some(DocumentType::Cif));
        assert_eq!(detect_document_type("I1234567A"), None);
        assert_eq!(detect_document_type("12345678"), None);
    }

    #[test]
    fn format_strips_separators_and_uppercases() {
        assert_eq!(format_tax_code(" b-12.345 674 "), "B12345674");
        let once = format_tax_code("b-12345674");
        assert_eq!(format_tax_code(&once), once);
    }

    #[test]
    fn business_fields_ask_for_cif() {
        let fields = required_fields(BusinessType::NonProfit, &EnglishMessages);
        let vat = fields.iter().find(|f| f.name == "vat_number").unwrap();
        assert!(vat.label.contains("CIF"));
    }
}
