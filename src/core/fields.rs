use serde::Serialize;

use crate::messages::MessageLookup;

/// Describes one input field a form must render for a given country and
/// business type.
///
/// `rules` is an ordered list of generic rule tokens (`"string"`,
/// `"size:16"`, `"min:2"`, `"regex:…"`) intended for a caller-side rules
/// engine; the crate itself does not interpret them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRequirement {
    /// Machine name of the field (e.g. `tax_code`, `vat_number`).
    pub name: &'static str,
    pub required: bool,
    /// Ordered validation rule tokens.
    pub rules: Vec<String>,
    /// Human-readable label, resolved through the message lookup.
    pub label: String,
}

impl FieldRequirement {
    pub fn new(name: &'static str, required: bool, rules: &[&str], label: String) -> Self {
        Self {
            name,
            required,
            rules: rules.iter().map(|r| (*r).to_owned()).collect(),
            label,
        }
    }
}

/// First/last name descriptors shared by every country.
pub(crate) fn name_fields(msgs: &dyn MessageLookup) -> [FieldRequirement; 2] {
    [
        FieldRequirement::new(
            "first_name",
            true,
            &["string", "min:2", "max:50"],
            msgs.resolve("fields.first_name", &[]),
        ),
        FieldRequirement::new(
            "last_name",
            true,
            &["string", "min:2", "max:50"],
            msgs.resolve("fields.last_name", &[]),
        ),
    ]
}

/// Company-name descriptor added for VAT-registered business types.
pub(crate) fn company_name_field(msgs: &dyn MessageLookup) -> FieldRequirement {
    FieldRequirement::new(
        "company_name",
        true,
        &["string", "min:2", "max:100"],
        msgs.resolve("fields.company_name", &[]),
    )
}
