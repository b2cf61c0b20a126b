//! Saved form of a modifier: `{"type": ..., "values": {...}}`
//!
//! The key set per variant is fixed by [`Modifier::fields`]; loading
//! replays each known key onto a fresh instance and ignores the rest.

use super::kind::ModifierKind;
use super::params::{FieldValue, Modifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A loosely typed saved value; strings, numbers and bools all occur in the wild
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl From<RecordValue> for FieldValue {
    fn from(value: RecordValue) -> Self {
        match value {
            RecordValue::Flag(b) => FieldValue::Flag(b),
            RecordValue::Number(n) => FieldValue::Text(format_number(n)),
            RecordValue::Text(s) => FieldValue::Text(s),
        }
    }
}

impl From<FieldValue> for RecordValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Flag(b) => RecordValue::Flag(b),
            FieldValue::Text(s) => RecordValue::Text(s),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("unknown modifier type: '{0}'")]
    UnknownType(String),
}

/// Serialized modifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierRecord {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub values: BTreeMap<String, RecordValue>,
}

impl From<Modifier> for ModifierRecord {
    fn from(modifier: Modifier) -> Self {
        ModifierRecord::from(&modifier)
    }
}

impl From<&Modifier> for ModifierRecord {
    fn from(modifier: &Modifier) -> Self {
        let mut values = BTreeMap::new();
        values.insert("enabled_var".to_string(), RecordValue::Flag(modifier.enabled));
        values.insert("label_var".to_string(), RecordValue::Text(modifier.label.clone()));
        for (key, value) in modifier.fields() {
            values.insert(key.to_string(), value.into());
        }
        ModifierRecord {
            type_name: modifier.kind().type_name().to_string(),
            values,
        }
    }
}

impl TryFrom<ModifierRecord> for Modifier {
    type Error = RecordError;

    fn try_from(record: ModifierRecord) -> Result<Self, Self::Error> {
        let kind = ModifierKind::from_type_name(&record.type_name)
            .ok_or_else(|| RecordError::UnknownType(record.type_name.clone()))?;
        let mut modifier = Modifier::new(kind);
        for (key, value) in record.values {
            if !modifier.set_field(&key, value.into()) {
                tracing::debug!(modifier = %record.type_name, key = %key, "ignoring saved field");
            }
        }
        Ok(modifier)
    }
}

/// Rebuild every modifier whose type is known, skipping the rest
pub fn modifiers_from_records(records: &[ModifierRecord]) -> Vec<Modifier> {
    records
        .iter()
        .cloned()
        .filter_map(|record| match Modifier::try_from(record) {
            Ok(modifier) => Some(modifier),
            Err(err) => {
                tracing::warn!(error = %err, "skipping saved modifier");
                None
            }
        })
        .collect()
}

/// Serde adapter for saved modifier lists
///
/// Non-object entries and unknown types are dropped on load instead of
/// failing the surrounding document.
pub mod lenient {
    use super::{Modifier, ModifierRecord};
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Record(ModifierRecord),
        Other(IgnoredAny),
    }

    pub fn serialize<S: Serializer>(modifiers: &[Modifier], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(modifiers.iter().map(ModifierRecord::from))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Modifier>, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        let records: Vec<ModifierRecord> = entries
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::Record(record) => Some(record),
                Entry::Other(_) => None,
            })
            .collect();
        Ok(super::modifiers_from_records(&records))
    }
}
