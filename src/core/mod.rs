//! Core value types: validation outcomes, the error taxonomy, business-type
//! context, and field-requirement descriptors for form rendering.

mod business;
mod error;
pub(crate) mod fields;
mod result;

pub use business::BusinessType;
pub use error::{CountryCodeError, ErrorKind};
pub use fields::FieldRequirement;
pub use result::{MetaValue, Metadata, ValidationResult, metadata};
