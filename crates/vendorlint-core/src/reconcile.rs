use crate::issues::{Issue, IssueKind, Severity, ValidationReport};
use crate::price::{extract_price, extract_unit, is_call_us, strip_footnote_refs};
use crate::record::{FieldValue, VendorRecord};
use crate::registry::FieldRegistry;

// Contributors round to whole percents; absorb single-decimal rounding
// such as declaring 33% for a true 33.3%.
const PERCENT_TOLERANCE: f64 = 1.5;

/// A proposed record edit, returned as a value instead of being written
/// anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPatch {
    pub field: String,
    pub value: String,
}

impl FieldPatch {
    /// The patch as the record line a contributor would add.
    pub fn render_line(&self) -> String {
        format!("{}: {}", self.field, self.value)
    }
}

/// Cross-check the declared `percent_increase` against the prices embedded
/// in the two pricing fields.
///
/// Callers run this only after schema validation found both pricing fields
/// non-empty. A unit mismatch between the two prices downgrades the
/// percentage outcome from error to warning, since the declared difference
/// may reflect a genuine pricing-model change.
pub fn reconcile_percent(
    record: &VendorRecord,
    registry: &FieldRegistry,
    report: &mut ValidationReport,
) {
    let (Some(base_value), Some(sso_value)) =
        (record.get("base_pricing"), record.get("sso_pricing"))
    else {
        return;
    };

    // Legacy footnote markup is stripped up front so those records are not
    // penalized twice: once for the deprecation warning and again for a
    // spurious pricing mismatch.
    let base_text = strip_footnote_refs(&base_value.render());
    let sso_text = strip_footnote_refs(&sso_value.render());

    let provided = parse_percent(record.get("percent_increase"));

    let negotiated = matches!(sso_value, FieldValue::String(_))
        && is_call_us(&sso_text, &registry.call_us_keywords);
    if negotiated {
        if let Some(percent) = provided {
            report.push_warning(IssueKind::CallUsContradiction {
                sso: sso_text,
                provided: percent,
            });
        }
        return;
    }

    let (Some(base_amount), Some(sso_amount)) =
        (extract_price(&base_text), extract_price(&sso_text))
    else {
        report.push_warning(IssueKind::UnparsablePrice {
            base: base_text,
            sso: sso_text,
        });
        return;
    };

    let base_unit = extract_unit(&base_text);
    let sso_unit = extract_unit(&sso_text);
    let units_match = base_unit == sso_unit;
    if !units_match {
        report.push_warning(IssueKind::UnitMismatch { base_unit, sso_unit });
    }

    if base_amount == 0.0 {
        report.push_warning(IssueKind::ZeroBasePrice);
        return;
    }

    let calculated = (sso_amount - base_amount) / base_amount * 100.0;
    let severity = if units_match {
        Severity::Error
    } else {
        Severity::Warning
    };

    match provided {
        None => {
            let expected = format!("{calculated:.0}%");
            report.push(
                Issue::new(severity, IssueKind::MissingPercentIncrease { expected: expected.clone() })
                    .with_hint(format!("percent_increase: {expected}")),
            );
        }
        Some(percent) => {
            if (calculated - percent).abs() > PERCENT_TOLERANCE {
                report.push(Issue::new(
                    severity,
                    IssueKind::PercentMismatch {
                        calculated,
                        provided: percent,
                        base: base_amount,
                        sso: sso_amount,
                    },
                ));
            }
        }
    }
}

/// The explicit suggest-fix operation: the `percent_increase` line a record
/// should carry, when the field is absent and the prices support deriving
/// one. Performs no I/O; applying the patch is the caller's decision.
pub fn suggest_percent_increase(
    record: &VendorRecord,
    registry: &FieldRegistry,
) -> Option<FieldPatch> {
    if parse_percent(record.get("percent_increase")).is_some() {
        return None;
    }

    let base_value = record.get("base_pricing")?;
    let sso_value = record.get("sso_pricing")?;
    if base_value.is_falsy() || sso_value.is_falsy() {
        return None;
    }

    let base_text = strip_footnote_refs(&base_value.render());
    let sso_text = strip_footnote_refs(&sso_value.render());

    if matches!(sso_value, FieldValue::String(_))
        && is_call_us(&sso_text, &registry.call_us_keywords)
    {
        return None;
    }

    let base_amount = extract_price(&base_text)?;
    let sso_amount = extract_price(&sso_text)?;
    if base_amount == 0.0 {
        return None;
    }

    let calculated = (sso_amount - base_amount) / base_amount * 100.0;
    Some(FieldPatch {
        field: "percent_increase".to_string(),
        value: format!("{calculated:.0}%"),
    })
}

// Numbers pass through; strings drop footnote markup and percent signs
// before parsing. Unparsable values ("N/A", "???") mean "not provided".
fn parse_percent(value: Option<&FieldValue>) -> Option<f64> {
    match value? {
        FieldValue::Number(percent) => Some(*percent),
        FieldValue::String(text) => {
            let cleaned = strip_footnote_refs(text).replace('%', "");
            cleaned.trim().parse().ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_record;

    fn reconcile(text: &str) -> ValidationReport {
        let record = parse_record(text).expect("parse record");
        let mut report = ValidationReport::default();
        reconcile_percent(&record, &FieldRegistry::default(), &mut report);
        report
    }

    #[test]
    fn parses_percent_from_strings_and_numbers() {
        assert_eq!(
            parse_percent(Some(&FieldValue::String("100%".to_string()))),
            Some(100.0)
        );
        assert_eq!(
            parse_percent(Some(&FieldValue::String(" 33.3 % ".to_string()))),
            Some(33.3)
        );
        assert_eq!(parse_percent(Some(&FieldValue::Number(40.0))), Some(40.0));
        assert_eq!(parse_percent(Some(&FieldValue::String("N/A".to_string()))), None);
        assert_eq!(parse_percent(None), None);
    }

    #[test]
    fn within_tolerance_is_silent() {
        let report = reconcile(
            "base_pricing: $10 per u/m\nsso_pricing: $13.33 per u/m\npercent_increase: 33%\n",
        );
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn outside_tolerance_is_a_mismatch_error() {
        let report = reconcile(
            "base_pricing: $10 per u/m\nsso_pricing: $13.33 per u/m\npercent_increase: 35%\n",
        );
        assert_eq!(report.errors.len(), 1);
        assert!(report.error_messages()[0].starts_with("Percentage mismatch"));
    }

    #[test]
    fn call_us_with_numeric_percent_warns() {
        let report = reconcile(
            "base_pricing: $10 per u/m\nsso_pricing: Contact sales\npercent_increase: 30%\n",
        );
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warning_messages()[0].contains("Contact Us"));
    }

    #[test]
    fn call_us_without_percent_is_silent() {
        let report = reconcile("base_pricing: $10 per u/m\nsso_pricing: Custom quote\n");
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn unparsable_price_asks_for_manual_review() {
        let report = reconcile("base_pricing: '???'\nsso_pricing: $20 per u/m\n");
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warning_messages()[0].contains("Manual review recommended"));
    }

    #[test]
    fn zero_base_price_cannot_be_compared() {
        let report = reconcile("base_pricing: $0 per u/m\nsso_pricing: $20 per u/m\npercent_increase: 100%\n");
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warning_messages()[0].contains("Cannot calculate"));
    }

    #[test]
    fn footnote_markup_does_not_fool_the_comparison() {
        let report = reconcile(
            "base_pricing: '$2,500[^note] per year'\nsso_pricing: '$5,000 per year'\npercent_increase: 100%\n",
        );
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn missing_percent_carries_the_suggested_line_as_hint() {
        let report = reconcile("base_pricing: $10 per u/m\nsso_pricing: $20 per u/m\n");
        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.errors[0].hint.as_deref(),
            Some("percent_increase: 100%")
        );
    }

    #[test]
    fn suggests_a_patch_when_percent_is_missing() {
        let record = parse_record("base_pricing: $10 per u/m\nsso_pricing: $20 per u/m\n")
            .expect("parse record");
        let patch = suggest_percent_increase(&record, &FieldRegistry::default())
            .expect("patch expected");
        assert_eq!(patch.render_line(), "percent_increase: 100%");
    }

    #[test]
    fn suggests_nothing_for_call_us_or_present_percent() {
        let registry = FieldRegistry::default();

        let negotiated = parse_record("base_pricing: $10\nsso_pricing: Call us\n").expect("parse");
        assert_eq!(suggest_percent_increase(&negotiated, &registry), None);

        let declared =
            parse_record("base_pricing: $10\nsso_pricing: $20\npercent_increase: 100%\n")
                .expect("parse");
        assert_eq!(suggest_percent_increase(&declared, &registry), None);
    }
}
