use crate::error::Error;
use crate::issues::{IssueKind, ValidationReport};
use crate::reconcile::reconcile_percent;
use crate::record::parse_record;
use crate::registry::FieldRegistry;
use crate::schema::validate_schema;

/// Record validator with an injected field registration.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    registry: FieldRegistry,
}

impl Validator {
    pub fn new(registry: FieldRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Validate one record's raw text.
    ///
    /// A parse failure preempts the semantic checks, since no reliable
    /// record exists to check; everything else accumulates fully. Never
    /// panics and never mutates anything.
    pub fn validate(&self, text: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        let record = match parse_record(text) {
            Ok(record) => record,
            Err(err) => {
                report.push_error(parse_error_kind(err));
                return report;
            }
        };

        validate_schema(&record, &self.registry, &mut report);

        // Absent pricing fields were already reported as schema errors;
        // the percentage check has nothing to work with.
        let both_present = ["base_pricing", "sso_pricing"]
            .iter()
            .all(|field| record.get(*field).is_some_and(|value| !value.is_falsy()));
        if both_present {
            reconcile_percent(&record, &self.registry, &mut report);
        }

        report
    }
}

fn parse_error_kind(err: Error) -> IssueKind {
    match err {
        Error::Parse(detail) => IssueKind::ParseFailure { detail },
        Error::EmptyDocument => IssueKind::EmptyDocument,
        Error::DuplicateFields(keys) => IssueKind::DuplicateKeys { keys },
    }
}
