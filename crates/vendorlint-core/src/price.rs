use regex::Regex;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

// First run of digits with an optional single decimal point.
const NUMERIC_RUN: &str = r"\d+(?:\.\d+)?";

/// Remove footnote-reference markup such as `[^price-note]`.
pub fn strip_footnote_refs(text: &str) -> String {
    match Regex::new(r"\[\^[^\]]+\]") {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Extract the first monetary amount from a freeform pricing string.
///
/// Thousands-separating commas are ignored, as is any leading currency
/// symbol or trailing unit text. Returns `None` when the string carries no
/// digits at all ("Call Us!", "???").
pub fn extract_price(text: &str) -> Option<f64> {
    let clean = text.replace(',', "");
    let re = Regex::new(NUMERIC_RUN).ok()?;
    let run = re.find(&clean)?;
    run.as_str().parse().ok()
}

/// Extract the unit suffix of a pricing string: whatever remains after the
/// leading currency marker and the first numeric run, lower-cased.
///
/// Only a currency symbol that precedes the number is stripped; one that
/// trails it ("4.99€ / device") stays part of the unit.
pub fn extract_unit(text: &str) -> String {
    let clean = text.replace(',', "");
    let without_currency = clean.trim().trim_start_matches(CURRENCY_SYMBOLS);

    let Ok(re) = Regex::new(NUMERIC_RUN) else {
        return String::new();
    };
    let without_number = match re.find(without_currency) {
        Some(run) => format!(
            "{}{}",
            &without_currency[..run.start()],
            &without_currency[run.end()..]
        ),
        None => without_currency.to_string(),
    };

    without_number.trim().to_lowercase()
}

/// Heuristic: does this pricing string mean "talk to sales" rather than a
/// listed price? Informational only; false positives are accepted.
pub fn is_call_us(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword.as_str()))
}

/// Render a magnitude without a trailing `.0` when it is whole.
pub(crate) fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
