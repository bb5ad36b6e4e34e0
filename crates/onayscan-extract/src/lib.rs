//! OnayScan Extract — numeric parsing, purchase value and decision-section
//! extraction, form field detection, file text extraction.

pub mod fields;
pub mod file;
pub mod numeric;
pub mod section;
pub mod value;

pub use fields::{contract_duration_months, management_justification, purchase_type, standard_contract};
pub use numeric::parse_locale_number;
pub use section::{SectionLocator, DECISION_NOT_FOUND};
pub use value::ValueExtractor;
