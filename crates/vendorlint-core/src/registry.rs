use std::collections::{BTreeMap, BTreeSet};

/// Field registration injected into the validator at construction.
///
/// The recognized field set is closed: a new field must be registered in
/// `known` and, if legacy, in `deprecated` with its own migration message.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    /// Fields every record must carry, in reporting order.
    pub required: Vec<String>,
    /// Every currently recognized field name.
    pub known: BTreeSet<String>,
    /// Deprecated field name mapped to its migration message.
    pub deprecated: BTreeMap<String, String>,
    /// Substrings marking a price as negotiated rather than listed.
    pub call_us_keywords: Vec<String>,
}

impl FieldRegistry {
    /// True when the field is either current or deprecated-but-tolerated.
    pub fn is_recognized(&self, field: &str) -> bool {
        self.known.contains(field) || self.deprecated.contains_key(field)
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        let required = [
            "name",
            "base_pricing",
            "sso_pricing",
            "vendor_url",
            "pricing_source",
            "updated_at",
        ]
        .iter()
        .map(|field| field.to_string())
        .collect();

        let known = [
            "name",
            "base_pricing",
            "sso_pricing",
            "percent_increase",
            "vendor_url",
            "pricing_source",
            "updated_at",
            "vendor_note",
            "pricing_source_info",
        ]
        .iter()
        .map(|field| field.to_string())
        .collect();

        let deprecated = BTreeMap::from([
            (
                "footnotes".to_string(),
                "'footnotes' is deprecated. Move the note text into 'vendor_note' \
                 (for example 'vendor_note: Requires the Enterprise tier')."
                    .to_string(),
            ),
            (
                "pricing_note".to_string(),
                "'pricing_note' is deprecated. Use 'pricing_source_info' instead \
                 ('pricing_note: Quote' becomes 'pricing_source_info: Pricing comes from a quote')."
                    .to_string(),
            ),
        ]);

        let call_us_keywords = ["call", "custom", "quote", "contact"]
            .iter()
            .map(|keyword| keyword.to_string())
            .collect();

        Self {
            required,
            known,
            deprecated,
            call_us_keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deprecated_fields_are_recognized_but_not_known() {
        let registry = FieldRegistry::default();
        assert!(registry.is_recognized("footnotes"));
        assert!(registry.is_recognized("pricing_note"));
        assert!(!registry.known.contains("footnotes"));
    }

    #[test]
    fn required_fields_are_all_known() {
        let registry = FieldRegistry::default();
        for field in &registry.required {
            assert!(registry.known.contains(field), "{field} should be known");
        }
    }
}
