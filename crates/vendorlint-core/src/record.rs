use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::error::{Error, Result};
use crate::price::format_amount;

/// One vendor's record: a flat mapping of named fields.
pub type VendorRecord = BTreeMap<String, FieldValue>;

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Number(f64),
    List(Vec<String>),
    Null,
}

impl FieldValue {
    /// True for values the schema treats as absent: empty string, empty
    /// list, zero, null.
    pub fn is_falsy(&self) -> bool {
        match self {
            FieldValue::String(text) => text.is_empty(),
            FieldValue::Number(value) => *value == 0.0,
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Null => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Text rendering used in diagnostics and pricing checks.
    pub fn render(&self) -> String {
        match self {
            FieldValue::String(text) => text.clone(),
            FieldValue::Number(value) => format_amount(*value),
            FieldValue::List(items) => items.join(", "),
            FieldValue::Null => String::new(),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = FieldValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, a number, or a list of strings")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(FieldValue::String(value.to_owned()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(FieldValue::String(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(FieldValue::Number(value as f64))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Self::Value, E> {
                Ok(FieldValue::Number(value as f64))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(FieldValue::Number(value))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(FieldValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(FieldValue::Null)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element::<String>()? {
                    items.push(item);
                }
                Ok(FieldValue::List(items))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// Collects every top-level entry before any map folding, so duplicate keys
// are observable and can all be named at once.
struct RawEntries(Vec<(String, FieldValue)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping of named fields")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, FieldValue>()? {
                    entries.push(entry);
                }
                Ok(RawEntries(entries))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(RawEntries(Vec::new()))
            }
        }

        deserializer.deserialize_any(EntriesVisitor)
    }
}

/// Parse one record's raw text into a field mapping.
///
/// Fails on syntactically invalid input, on a document with no fields, and
/// on duplicated top-level field names. Duplicates are reported all
/// together, sorted, rather than silently resolved to the last occurrence.
pub fn parse_record(text: &str) -> Result<VendorRecord> {
    let entries: RawEntries =
        serde_yaml::from_str(text).map_err(|err| Error::Parse(err.to_string()))?;

    if entries.0.is_empty() {
        return Err(Error::EmptyDocument);
    }

    let mut record = VendorRecord::new();
    let mut duplicates = BTreeSet::new();
    for (key, value) in entries.0 {
        if record.insert(key.clone(), value).is_some() {
            duplicates.insert(key);
        }
    }

    if !duplicates.is_empty() {
        return Err(Error::DuplicateFields(duplicates.into_iter().collect()));
    }

    Ok(record)
}
