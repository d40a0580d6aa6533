use chrono::NaiveDate;

use crate::issues::{IssueKind, ValidationReport};
use crate::record::{FieldValue, VendorRecord};
use crate::registry::FieldRegistry;

/// Apply the field-level schema rules, accumulating diagnostics into the
/// caller's report. Rules run independently and in a deterministic order.
pub fn validate_schema(
    record: &VendorRecord,
    registry: &FieldRegistry,
    report: &mut ValidationReport,
) {
    for field in &registry.required {
        let missing = record.get(field).is_none_or(FieldValue::is_falsy);
        if missing {
            report.push_error(IssueKind::MissingRequiredField { field: field.clone() });
        }
    }

    // Typo detection. Keys come out of the map already sorted.
    let unknown: Vec<String> = record
        .keys()
        .filter(|field| !registry.is_recognized(field))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        report.push_warning(IssueKind::UnknownFields { fields: unknown });
    }

    // Deprecated fields get their registered message, never the generic
    // unknown-field warning.
    for (field, message) in &registry.deprecated {
        if record.contains_key(field) {
            report.push_warning(IssueKind::DeprecatedField {
                field: field.clone(),
                message: message.clone(),
            });
        }
    }

    if let Some(value) = record.get("updated_at") {
        if !value.is_falsy() && parse_date(value).is_none() {
            report.push_error(IssueKind::InvalidDate { value: value.render() });
        }
    }

    if let Some(value) = record.get("vendor_url") {
        if !value.is_falsy() && !value.as_str().is_some_and(is_http_url) {
            report.push_error(IssueKind::InvalidVendorUrl { value: value.render() });
        }
    }

    // pricing_source may be a single URL or a list of them; every entry
    // must look like a URL, and each offender is its own error.
    if let Some(value) = record.get("pricing_source") {
        if !value.is_falsy() {
            match value {
                FieldValue::String(url) => {
                    if !is_http_url(url) {
                        report.push_error(IssueKind::InvalidSourceUrl { value: url.clone() });
                    }
                }
                FieldValue::List(urls) => {
                    for url in urls {
                        if !is_http_url(url) {
                            report.push_error(IssueKind::InvalidSourceUrl { value: url.clone() });
                        }
                    }
                }
                other => {
                    report.push_error(IssueKind::InvalidSourceUrl { value: other.render() });
                }
            }
        }
    }
}

fn parse_date(value: &FieldValue) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.as_str()?, "%Y-%m-%d").ok()
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
