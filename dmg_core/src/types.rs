//! Core types shared across the damage engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Damage channel of a spell or sheet row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DamageType {
    #[default]
    Magic,
    Physical,
    Pure,
}

impl DamageType {
    pub fn all() -> &'static [DamageType] {
        &[DamageType::Magic, DamageType::Physical, DamageType::Pure]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Magic => "Magic",
            DamageType::Physical => "Physical",
            DamageType::Pure => "Pure",
        }
    }

    /// Parse a stored type name; unknown names fall back to Magic
    pub fn parse_or_default(name: &str) -> DamageType {
        DamageType::all()
            .iter()
            .copied()
            .find(|t| t.name() == name.trim())
            .unwrap_or_default()
    }
}

/// Saved names outside the known set load as Magic
impl<'de> Deserialize<'de> for DamageType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(DamageType::parse_or_default(&name))
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hero primary attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttributeType {
    #[default]
    Strength,
    Agility,
    Intelligence,
    Universal,
}

impl AttributeType {
    pub fn all() -> &'static [AttributeType] {
        &[
            AttributeType::Strength,
            AttributeType::Agility,
            AttributeType::Intelligence,
            AttributeType::Universal,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::Strength => "Strength",
            AttributeType::Agility => "Agility",
            AttributeType::Intelligence => "Intelligence",
            AttributeType::Universal => "Universal",
        }
    }

    /// Case-insensitive parse; anything unrecognised counts as Universal
    pub fn parse_lenient(name: &str) -> AttributeType {
        match name.trim().to_lowercase().as_str() {
            "strength" => AttributeType::Strength,
            "agility" => AttributeType::Agility,
            "intelligence" => AttributeType::Intelligence,
            _ => AttributeType::Universal,
        }
    }
}

/// Identity of a modifier in the session pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierId(pub u32);

/// Identity of a target row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub u32);

/// Per-column on/off switches for a row
///
/// Columns past the stored flags count as enabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnFlags(pub Vec<bool>);

impl ColumnFlags {
    pub fn all_enabled(columns: usize) -> Self {
        ColumnFlags(vec![true; columns])
    }

    pub fn is_enabled(&self, column: usize) -> bool {
        self.0.get(column).copied().unwrap_or(true)
    }

    pub fn set(&mut self, column: usize, enabled: bool) {
        if column >= self.0.len() {
            self.0.resize(column + 1, true);
        }
        self.0[column] = enabled;
    }

    /// Drop flags beyond `columns`
    pub fn truncate(&mut self, columns: usize) {
        self.0.truncate(columns);
    }
}

/// Format a value for display, with `INF` for unbounded results
pub fn format_value(value: f64, decimals: usize) -> String {
    if value.is_infinite() {
        "INF".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_type_parse() {
        assert_eq!(DamageType::parse_or_default("Physical"), DamageType::Physical);
        assert_eq!(DamageType::parse_or_default("fire"), DamageType::Magic);
    }

    #[test]
    fn test_attribute_parse() {
        assert_eq!(AttributeType::parse_lenient(" agility "), AttributeType::Agility);
        assert_eq!(AttributeType::parse_lenient("???"), AttributeType::Universal);
    }

    #[test]
    fn test_column_flags_default_on() {
        let mut flags = ColumnFlags::default();
        assert!(flags.is_enabled(3));
        flags.set(2, false);
        assert!(flags.is_enabled(0));
        assert!(!flags.is_enabled(2));
        flags.truncate(1);
        assert!(flags.is_enabled(2));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(f64::INFINITY, 1), "INF");
        assert_eq!(format_value(2.346, 2), "2.35");
    }
}
