use std::collections::BTreeSet;
use std::fmt;

use crate::price::format_amount;

/// Severity of one diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Stable machine category derived from error kinds, consumed by external
/// automation (e.g. contribution labeling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    PricingError,
    SchemaError,
}

impl Category {
    /// Token of the shape `CATEGORY:<name>`.
    pub fn tag(self) -> &'static str {
        match self {
            Category::PricingError => "CATEGORY:pricing-error",
            Category::SchemaError => "CATEGORY:schema-error",
        }
    }
}

/// Everything the engine can report about a record, as data.
///
/// The rendered message and the category tag are both derived from the
/// variant, so external content can never forge a category.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    ParseFailure { detail: String },
    EmptyDocument,
    DuplicateKeys { keys: Vec<String> },
    MissingRequiredField { field: String },
    UnknownFields { fields: Vec<String> },
    DeprecatedField { field: String, message: String },
    InvalidDate { value: String },
    InvalidVendorUrl { value: String },
    InvalidSourceUrl { value: String },
    CallUsContradiction { sso: String, provided: f64 },
    UnparsablePrice { base: String, sso: String },
    ZeroBasePrice,
    UnitMismatch { base_unit: String, sso_unit: String },
    MissingPercentIncrease { expected: String },
    PercentMismatch { calculated: f64, provided: f64, base: f64, sso: f64 },
}

impl IssueKind {
    /// Category for kinds that can invalidate a record; informational kinds
    /// carry none.
    pub fn category(&self) -> Option<Category> {
        match self {
            IssueKind::ParseFailure { .. }
            | IssueKind::EmptyDocument
            | IssueKind::DuplicateKeys { .. }
            | IssueKind::MissingRequiredField { .. }
            | IssueKind::InvalidDate { .. }
            | IssueKind::InvalidVendorUrl { .. }
            | IssueKind::InvalidSourceUrl { .. } => Some(Category::SchemaError),
            IssueKind::MissingPercentIncrease { .. } | IssueKind::PercentMismatch { .. } => {
                Some(Category::PricingError)
            }
            _ => None,
        }
    }
}

// Message wording is an external contract: category automation and humans
// both read these strings, so changes here are breaking.
impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::ParseFailure { detail } => {
                write!(f, "Failed to parse record: {detail}")
            }
            IssueKind::EmptyDocument => write!(f, "Empty record."),
            IssueKind::DuplicateKeys { keys } => {
                write!(f, "Duplicate field(s): {}.", keys.join(", "))
            }
            IssueKind::MissingRequiredField { field } => {
                write!(f, "Missing required field: '{field}'.")
            }
            IssueKind::UnknownFields { fields } => {
                write!(f, "Unknown field(s): {}. Check for typos.", fields.join(", "))
            }
            IssueKind::DeprecatedField { message, .. } => f.write_str(message),
            IssueKind::InvalidDate { value } => {
                write!(f, "'updated_at' value '{value}' is not a valid YYYY-MM-DD date.")
            }
            IssueKind::InvalidVendorUrl { value } => {
                write!(f, "'vendor_url' does not look like a valid URL: '{value}'.")
            }
            IssueKind::InvalidSourceUrl { value } => {
                write!(f, "'pricing_source' entry does not look like a valid URL: '{value}'.")
            }
            IssueKind::CallUsContradiction { sso, provided } => {
                write!(
                    f,
                    "SSO pricing looks like 'Contact Us' ('{sso}'), but a numeric percentage ({}%) was provided.",
                    format_amount(*provided)
                )
            }
            IssueKind::UnparsablePrice { base, sso } => {
                write!(
                    f,
                    "Could not extract numeric price from base ('{base}') and/or sso ('{sso}'). Manual review recommended."
                )
            }
            IssueKind::ZeroBasePrice => {
                write!(f, "Base pricing is $0. Cannot calculate percentage increase.")
            }
            IssueKind::UnitMismatch { base_unit, sso_unit } => {
                write!(
                    f,
                    "Pricing units differ (base: '{base_unit}', sso: '{sso_unit}'). Confirm percent_increase is computed like for like."
                )
            }
            IssueKind::MissingPercentIncrease { expected } => {
                write!(
                    f,
                    "Missing 'percent_increase'. Expected value: {expected} (add 'percent_increase: {expected}')."
                )
            }
            IssueKind::PercentMismatch { calculated, provided, base, sso } => {
                write!(
                    f,
                    "Percentage mismatch. Calculated: {calculated:.1}%, Provided: {}%. Prices: base=${}, sso=${}.",
                    format_amount(*provided),
                    format_amount(*base),
                    format_amount(*sso)
                )
            }
        }
    }
}

/// One diagnostic with its severity and optional fix hint.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub hint: Option<String>,
}

impl Issue {
    pub fn new(severity: Severity, kind: IssueKind) -> Self {
        Self { severity, kind, hint: None }
    }

    pub fn error(kind: IssueKind) -> Self {
        Self::new(Severity::Error, kind)
    }

    pub fn warning(kind: IssueKind) -> Self {
        Self::new(Severity::Warning, kind)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Rendered message; part of the external contract.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Category tag; only error-severity issues categorize.
    pub fn category(&self) -> Option<Category> {
        match self.severity {
            Severity::Error => self.kind.category(),
            Severity::Warning => None,
        }
    }
}

/// Aggregated diagnostics for one record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ValidationReport {
    /// True iff no errors were recorded. Warnings never affect validity by
    /// themselves.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Route an issue by its severity.
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    pub fn push_error(&mut self, kind: IssueKind) {
        self.push(Issue::error(kind));
    }

    pub fn push_warning(&mut self, kind: IssueKind) {
        self.push(Issue::warning(kind));
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(Issue::message).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(Issue::message).collect()
    }

    /// Categories present among this record's errors.
    pub fn categories(&self) -> BTreeSet<Category> {
        self.errors.iter().filter_map(Issue::category).collect()
    }
}

/// Fold many reports into the sorted, de-duplicated category token list.
pub fn collect_category_tags<'a>(
    reports: impl IntoIterator<Item = &'a ValidationReport>,
) -> Vec<&'static str> {
    let categories: BTreeSet<Category> = reports
        .into_iter()
        .flat_map(ValidationReport::categories)
        .collect();

    let mut tags: Vec<&'static str> = categories.into_iter().map(Category::tag).collect();
    tags.sort_unstable();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_never_categorize() {
        let downgraded = Issue::warning(IssueKind::PercentMismatch {
            calculated: 100.0,
            provided: 50.0,
            base: 10.0,
            sso: 20.0,
        });
        assert_eq!(downgraded.category(), None);

        let hard = Issue::error(downgraded.kind.clone());
        assert_eq!(hard.category(), Some(Category::PricingError));
    }

    #[test]
    fn category_tags_are_sorted_and_deduplicated() {
        let mut first = ValidationReport::default();
        first.push_error(IssueKind::MissingRequiredField { field: "name".to_string() });
        first.push_error(IssueKind::MissingPercentIncrease { expected: "100%".to_string() });

        let mut second = ValidationReport::default();
        second.push_error(IssueKind::EmptyDocument);

        let tags = collect_category_tags([&first, &second]);
        assert_eq!(tags, vec!["CATEGORY:pricing-error", "CATEGORY:schema-error"]);
    }

    #[test]
    fn mismatch_message_names_both_values_and_prices() {
        let kind = IssueKind::PercentMismatch {
            calculated: 100.0,
            provided: 50.0,
            base: 10.0,
            sso: 20.0,
        };
        assert_eq!(
            kind.to_string(),
            "Percentage mismatch. Calculated: 100.0%, Provided: 50%. Prices: base=$10, sso=$20."
        );
    }
}
