//! Validation engine for crowd-sourced vendor pricing records.
//!
//! Parses one record's raw text into a flat field mapping, enforces the
//! field schema, and cross-checks the declared percentage increase against
//! the prices embedded in freeform pricing strings.

pub mod error;
pub mod issues;
pub mod price;
pub mod reconcile;
pub mod record;
pub mod registry;
pub mod schema;
pub mod validate;

pub use error::{Error, Result};
pub use issues::{
    Category, Issue, IssueKind, Severity, ValidationReport, collect_category_tags,
};
pub use price::{extract_price, extract_unit, is_call_us, strip_footnote_refs};
pub use reconcile::{FieldPatch, reconcile_percent, suggest_percent_increase};
pub use record::{FieldValue, VendorRecord, parse_record};
pub use registry::FieldRegistry;
pub use schema::validate_schema;
pub use validate::Validator;

/// Current version of the canonical field registration.
pub const REGISTRY_VERSION: &str = "0.1";
