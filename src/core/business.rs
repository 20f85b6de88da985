use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Business-type context supplied alongside a tax code.
///
/// Used for diagnostic metadata and for entity-type cross-checks where a
/// country encodes the entity class in the identifier itself (Portuguese NIF
/// prefixes). Also drives which fields [`required_fields`] reports.
///
/// [`required_fields`]: crate::Validator::required_fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Individual,
    SoleProprietorship,
    Business,
    Corporation,
    Partnership,
    NonProfit,
}

impl BusinessType {
    pub fn as_str(self) -> &'static str {
        match self {
            BusinessType::Individual => "individual",
            BusinessType::SoleProprietorship => "sole_proprietorship",
            BusinessType::Business => "business",
            BusinessType::Corporation => "corporation",
            BusinessType::Partnership => "partnership",
            BusinessType::NonProfit => "non_profit",
        }
    }

    /// Whether this business type must also register a VAT number.
    pub fn requires_vat_number(self) -> bool {
        matches!(
            self,
            BusinessType::Business
                | BusinessType::Corporation
                | BusinessType::Partnership
                | BusinessType::NonProfit
        )
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(BusinessType::Individual),
            "sole_proprietorship" => Ok(BusinessType::SoleProprietorship),
            "business" => Ok(BusinessType::Business),
            "corporation" => Ok(BusinessType::Corporation),
            "partnership" => Ok(BusinessType::Partnership),
            "non_profit" => Ok(BusinessType::NonProfit),
            other => Err(format!("unknown business type '{other}'")),
        }
    }
}
