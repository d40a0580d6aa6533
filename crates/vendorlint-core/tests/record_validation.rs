use vendorlint_core::{Validator, collect_category_tags};

const CLEAN_RECORD: &str = "\
name: Acme
base_pricing: $10 per u/m
sso_pricing: $20 per u/m
percent_increase: 100%
vendor_url: https://acme.example
pricing_source: https://acme.example/pricing
updated_at: 2025-11-02
";

fn validate(text: &str) -> vendorlint_core::ValidationReport {
    Validator::default().validate(text)
}

#[test]
fn clean_record_is_valid_with_no_diagnostics() {
    let report = validate(CLEAN_RECORD);
    assert!(report.is_valid(), "errors: {:?}", report.error_messages());
    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warning_messages());
}

#[test]
fn numeric_percent_field_is_accepted() {
    let text = CLEAN_RECORD.replace("percent_increase: 100%", "percent_increase: 100");
    let report = validate(&text);
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
}

#[test]
fn wrong_percentage_is_a_mismatch_error() {
    let text = CLEAN_RECORD.replace("percent_increase: 100%", "percent_increase: 50%");
    let report = validate(&text);
    assert!(!report.is_valid());
    assert_eq!(
        report.error_messages(),
        vec!["Percentage mismatch. Calculated: 100.0%, Provided: 50%. Prices: base=$10, sso=$20.".to_string()]
    );

    let tags = collect_category_tags([&report]);
    assert_eq!(tags, vec!["CATEGORY:pricing-error"]);
}

#[test]
fn omitted_percentage_is_an_error_naming_the_expected_value() {
    let text = CLEAN_RECORD.replace("percent_increase: 100%\n", "");
    let report = validate(&text);
    assert!(!report.is_valid());
    assert_eq!(
        report.error_messages(),
        vec!["Missing 'percent_increase'. Expected value: 100% (add 'percent_increase: 100%').".to_string()]
    );
    assert_eq!(report.errors[0].hint.as_deref(), Some("percent_increase: 100%"));
}

#[test]
fn unparsable_percentage_counts_as_omitted() {
    let text = CLEAN_RECORD.replace("percent_increase: 100%", "percent_increase: N/A");
    let report = validate(&text);
    assert!(!report.is_valid());
    assert!(report.error_messages()[0].contains("Missing 'percent_increase'"));
}

#[test]
fn differing_units_downgrade_the_mismatch_to_a_warning() {
    let text = CLEAN_RECORD
        .replace("sso_pricing: $20 per u/m", "sso_pricing: $20 per month")
        .replace("percent_increase: 100%", "percent_increase: 50%");
    let report = validate(&text);
    assert!(report.is_valid(), "errors: {:?}", report.error_messages());

    let warnings = report.warning_messages();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("Pricing units differ"));
    assert!(warnings[1].contains("Percentage mismatch"));
}

#[test]
fn differing_units_downgrade_the_missing_percentage_too() {
    let text = CLEAN_RECORD
        .replace("sso_pricing: $20 per u/m", "sso_pricing: $20 per month")
        .replace("percent_increase: 100%\n", "");
    let report = validate(&text);
    assert!(report.is_valid());
    assert!(
        report
            .warning_messages()
            .iter()
            .any(|m| m.contains("Missing 'percent_increase'"))
    );
}

#[test]
fn duplicated_field_invalidates_the_record() {
    let text = format!("{CLEAN_RECORD}name: Acme Again\n");
    let report = validate(&text);
    assert!(!report.is_valid());
    assert_eq!(report.error_messages(), vec!["Duplicate field(s): name.".to_string()]);
    assert!(report.warnings.is_empty());

    let tags = collect_category_tags([&report]);
    assert_eq!(tags, vec!["CATEGORY:schema-error"]);
}

#[test]
fn parse_failure_preempts_semantic_checks() {
    let report = validate("name: [unclosed\n");
    assert!(!report.is_valid());
    assert_eq!(report.errors.len(), 1);
    assert!(report.error_messages()[0].starts_with("Failed to parse record"));
    assert!(report.warnings.is_empty());
}

#[test]
fn empty_document_is_invalid() {
    let report = validate("");
    assert_eq!(report.error_messages(), vec!["Empty record.".to_string()]);
    assert!(report.warnings.is_empty());
}

#[test]
fn legacy_fields_get_their_own_deprecation_warning() {
    let text = format!(
        "{CLEAN_RECORD}footnotes: '[^note]: Requires the Enterprise tier'\npricing_note: Quote\n"
    );
    let report = validate(&text);
    assert!(report.is_valid(), "errors: {:?}", report.error_messages());

    let warnings = report.warning_messages();
    assert!(warnings.iter().any(|m| m.contains("'footnotes' is deprecated")));
    assert!(warnings.iter().any(|m| m.contains("'pricing_note' is deprecated")));
    assert!(!warnings.iter().any(|m| m.contains("Unknown field")));
}

#[test]
fn unknown_field_warning_still_fires_alongside_deprecations() {
    let text = format!("{CLEAN_RECORD}pricing_note: Quote\nprice: $5\n");
    let report = validate(&text);
    assert!(
        report
            .warning_messages()
            .contains(&"Unknown field(s): price. Check for typos.".to_string())
    );
}

#[test]
fn missing_pricing_fields_skip_the_percentage_check() {
    let text = CLEAN_RECORD.replace("sso_pricing: $20 per u/m\n", "");
    let report = validate(&text);
    assert_eq!(
        report.error_messages(),
        vec!["Missing required field: 'sso_pricing'.".to_string()]
    );
    assert!(report.warnings.is_empty());
}

#[test]
fn diagnostics_accumulate_across_rules() {
    let text = "\
name: Acme
base_pricing: $10 per u/m
sso_pricing: $20 per u/m
vendor_url: acme.example
pricing_source: not-a-url
updated_at: yesterday
";
    let report = validate(text);
    let messages = report.error_messages();
    assert!(messages.iter().any(|m| m.contains("'updated_at'")));
    assert!(messages.iter().any(|m| m.contains("'vendor_url'")));
    assert!(messages.iter().any(|m| m.contains("'pricing_source'")));
    assert!(messages.iter().any(|m| m.contains("Missing 'percent_increase'")));

    let tags = collect_category_tags([&report]);
    assert_eq!(tags, vec!["CATEGORY:pricing-error", "CATEGORY:schema-error"]);
}

#[test]
fn validation_does_not_mutate_its_input() {
    let text = CLEAN_RECORD.replace("percent_increase: 100%\n", "");
    let before = text.clone();
    let _ = validate(&text);
    assert_eq!(text, before);
}
