//! Editable modifier state: raw expression strings per variant
//!
//! Parameters stay as the text the user typed. They are evaluated against
//! the current variables on every recompute via [`Modifier::snapshot`].

use super::kind::ModifierKind;
use super::record::ModifierRecord;
use serde::{Deserialize, Serialize};

/// A single parameter value as stored or loaded
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Interpret as a flag; text accepts true/false/1/0 in any case
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" | "" => Some(false),
                _ => None,
            },
        }
    }

    /// Interpret as expression text
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Flag(b) => if *b { "1" } else { "0" }.to_string(),
        }
    }
}

/// Keys of the hero stat bonus fields, in display order
pub const STAT_BONUS_FIELDS: [&str; 13] = [
    "strength_var",
    "agility_var",
    "intelligence_var",
    "armor_var",
    "attack_speed_var",
    "movespeed_flat_var",
    "movespeed_pct_var",
    "hp_var",
    "mana_var",
    "hp_regen_var",
    "mana_regen_var",
    "magic_resistance_var",
    "bat_reduction_var",
];

/// Raw stat bonus expressions; percentages are in percent
#[derive(Debug, Clone, PartialEq)]
pub struct StatBonusParams {
    pub strength: String,
    pub agility: String,
    pub intelligence: String,
    pub armor: String,
    pub attack_speed: String,
    pub movespeed_flat: String,
    pub movespeed_pct: String,
    pub hp: String,
    pub mana: String,
    pub hp_regen: String,
    pub mana_regen: String,
    pub magic_resistance: String,
    pub bat_reduction: String,
}

impl Default for StatBonusParams {
    fn default() -> Self {
        let zero = || "0".to_string();
        StatBonusParams {
            strength: zero(),
            agility: zero(),
            intelligence: zero(),
            armor: zero(),
            attack_speed: zero(),
            movespeed_flat: zero(),
            movespeed_pct: zero(),
            hp: zero(),
            mana: zero(),
            hp_regen: zero(),
            mana_regen: zero(),
            magic_resistance: zero(),
            bat_reduction: zero(),
        }
    }
}

impl StatBonusParams {
    pub fn field(&self, key: &str) -> Option<&String> {
        Some(match key {
            "strength_var" => &self.strength,
            "agility_var" => &self.agility,
            "intelligence_var" => &self.intelligence,
            "armor_var" => &self.armor,
            "attack_speed_var" => &self.attack_speed,
            "movespeed_flat_var" => &self.movespeed_flat,
            "movespeed_pct_var" => &self.movespeed_pct,
            "hp_var" => &self.hp,
            "mana_var" => &self.mana,
            "hp_regen_var" => &self.hp_regen,
            "mana_regen_var" => &self.mana_regen,
            "magic_resistance_var" => &self.magic_resistance,
            "bat_reduction_var" => &self.bat_reduction,
            _ => return None,
        })
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        Some(match key {
            "strength_var" => &mut self.strength,
            "agility_var" => &mut self.agility,
            "intelligence_var" => &mut self.intelligence,
            "armor_var" => &mut self.armor,
            "attack_speed_var" => &mut self.attack_speed,
            "movespeed_flat_var" => &mut self.movespeed_flat,
            "movespeed_pct_var" => &mut self.movespeed_pct,
            "hp_var" => &mut self.hp,
            "mana_var" => &mut self.mana,
            "hp_regen_var" => &mut self.hp_regen,
            "mana_regen_var" => &mut self.mana_regen,
            "magic_resistance_var" => &mut self.magic_resistance,
            "bat_reduction_var" => &mut self.bat_reduction,
            _ => return None,
        })
    }
}

/// Per-variant raw parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ModifierParams {
    FurySwipes { damage: String },
    CriticalStrike { chance: String, mult: String },
    MagicOnHit { chance: String, damage: String, true_strike: bool },
    FlatDamage { value: String },
    PercentageDamage { value: String },
    TrueStrike { chance: String },
    PhantomCrit { crit_chance: String, bonus_magic: String },
    Corruption { armor: String },
    StatBonus(Box<StatBonusParams>),
}

impl ModifierParams {
    /// Parameters a new modifier of `kind` starts with
    pub fn defaults(kind: ModifierKind) -> Self {
        let s = |v: &str| v.to_string();
        match kind {
            ModifierKind::FurySwipes => ModifierParams::FurySwipes { damage: s("15") },
            ModifierKind::CriticalStrike => ModifierParams::CriticalStrike {
                chance: s("30"),
                mult: s("150"),
            },
            ModifierKind::MagicOnHit => ModifierParams::MagicOnHit {
                chance: s("65"),
                damage: s("55"),
                true_strike: true,
            },
            ModifierKind::FlatDamage => ModifierParams::FlatDamage { value: s("0") },
            ModifierKind::PercentageDamage => ModifierParams::PercentageDamage { value: s("0") },
            ModifierKind::TrueStrike => ModifierParams::TrueStrike { chance: s("100") },
            ModifierKind::PhantomCrit => ModifierParams::PhantomCrit {
                crit_chance: s("30"),
                bonus_magic: s("80"),
            },
            ModifierKind::Corruption => ModifierParams::Corruption { armor: s("6") },
            ModifierKind::StatBonus => ModifierParams::StatBonus(Box::default()),
        }
    }

    pub fn kind(&self) -> ModifierKind {
        match self {
            ModifierParams::FurySwipes { .. } => ModifierKind::FurySwipes,
            ModifierParams::CriticalStrike { .. } => ModifierKind::CriticalStrike,
            ModifierParams::MagicOnHit { .. } => ModifierKind::MagicOnHit,
            ModifierParams::FlatDamage { .. } => ModifierKind::FlatDamage,
            ModifierParams::PercentageDamage { .. } => ModifierKind::PercentageDamage,
            ModifierParams::TrueStrike { .. } => ModifierKind::TrueStrike,
            ModifierParams::PhantomCrit { .. } => ModifierKind::PhantomCrit,
            ModifierParams::Corruption { .. } => ModifierKind::Corruption,
            ModifierParams::StatBonus(_) => ModifierKind::StatBonus,
        }
    }
}

/// A user-assembled modifier
///
/// Serialized as `{"type": <registry name>, "values": {<field>_var: value}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModifierRecord", into = "ModifierRecord")]
pub struct Modifier {
    pub enabled: bool,
    pub label: String,
    pub params: ModifierParams,
}

impl Modifier {
    /// Create a modifier of `kind` with its default parameters
    pub fn new(kind: ModifierKind) -> Self {
        Modifier {
            enabled: true,
            label: kind.default_label().to_string(),
            params: ModifierParams::defaults(kind),
        }
    }

    /// Factory keyed by registry name
    pub fn create(type_name: &str) -> Option<Self> {
        ModifierKind::from_type_name(type_name).map(Modifier::new)
    }

    pub fn kind(&self) -> ModifierKind {
        self.params.kind()
    }

    /// Builder-style field assignment; unknown keys are ignored
    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_field(key, FieldValue::Text(value.into()));
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Parameter fields of this variant, excluding `enabled_var`/`label_var`
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let t = |s: &String| FieldValue::Text(s.clone());
        match &self.params {
            ModifierParams::FurySwipes { damage } => vec![("damage_var", t(damage))],
            ModifierParams::CriticalStrike { chance, mult } => {
                vec![("chance_var", t(chance)), ("mult_var", t(mult))]
            }
            ModifierParams::MagicOnHit {
                chance,
                damage,
                true_strike,
            } => vec![
                ("chance_var", t(chance)),
                ("damage_var", t(damage)),
                ("true_strike_var", FieldValue::Flag(*true_strike)),
            ],
            ModifierParams::FlatDamage { value } => vec![("value_var", t(value))],
            ModifierParams::PercentageDamage { value } => vec![("value_var", t(value))],
            ModifierParams::TrueStrike { chance } => vec![("chance_var", t(chance))],
            ModifierParams::PhantomCrit {
                crit_chance,
                bonus_magic,
            } => vec![
                ("crit_chance_var", t(crit_chance)),
                ("bonus_magic_var", t(bonus_magic)),
            ],
            ModifierParams::Corruption { armor } => vec![("armor_var", t(armor))],
            ModifierParams::StatBonus(stats) => STAT_BONUS_FIELDS
                .iter()
                .filter_map(|key| stats.field(key).map(|v| (*key, t(v))))
                .collect(),
        }
    }

    /// Assign one field by its saved key
    ///
    /// Returns false when the key does not belong to this variant or the
    /// value cannot be interpreted.
    pub fn set_field(&mut self, key: &str, value: FieldValue) -> bool {
        match key {
            "enabled_var" => {
                return match value.as_flag() {
                    Some(flag) => {
                        self.enabled = flag;
                        true
                    }
                    None => false,
                }
            }
            "label_var" => {
                self.label = value.as_text();
                return true;
            }
            _ => {}
        }

        if let ModifierParams::MagicOnHit { true_strike, .. } = &mut self.params {
            if key == "true_strike_var" {
                return match value.as_flag() {
                    Some(flag) => {
                        *true_strike = flag;
                        true
                    }
                    None => false,
                };
            }
        }

        let text = value.as_text();
        let slot: Option<&mut String> = match (&mut self.params, key) {
            (ModifierParams::FurySwipes { damage }, "damage_var") => Some(damage),
            (ModifierParams::CriticalStrike { chance, .. }, "chance_var") => Some(chance),
            (ModifierParams::CriticalStrike { mult, .. }, "mult_var") => Some(mult),
            (ModifierParams::MagicOnHit { chance, .. }, "chance_var") => Some(chance),
            (ModifierParams::MagicOnHit { damage, .. }, "damage_var") => Some(damage),
            (ModifierParams::FlatDamage { value }, "value_var") => Some(value),
            (ModifierParams::PercentageDamage { value }, "value_var") => Some(value),
            (ModifierParams::TrueStrike { chance }, "chance_var") => Some(chance),
            (ModifierParams::PhantomCrit { crit_chance, .. }, "crit_chance_var") => Some(crit_chance),
            (ModifierParams::PhantomCrit { bonus_magic, .. }, "bonus_magic_var") => Some(bonus_magic),
            (ModifierParams::Corruption { armor }, "armor_var") => Some(armor),
            (ModifierParams::StatBonus(stats), key) => stats.field_mut(key),
            _ => None,
        };

        match slot {
            Some(slot) => {
                *slot = text;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_defaults() {
        let crit = Modifier::create("Critical Strike").unwrap();
        assert!(crit.enabled);
        assert_eq!(crit.label, "Crit");
        assert_eq!(
            crit.fields(),
            vec![
                ("chance_var", FieldValue::text("30")),
                ("mult_var", FieldValue::text("150")),
            ]
        );
        assert!(Modifier::create("Unknown").is_none());
    }

    #[test]
    fn test_set_field() {
        let mut fury = Modifier::new(ModifierKind::FurySwipes);
        assert!(fury.set_field("damage_var", FieldValue::text("20")));
        assert!(!fury.set_field("chance_var", FieldValue::text("20")));
        assert!(fury.set_field("enabled_var", FieldValue::Flag(false)));
        assert!(!fury.enabled);
        assert_eq!(fury.fields(), vec![("damage_var", FieldValue::text("20"))]);
    }

    #[test]
    fn test_true_strike_flag_accepts_text() {
        let mut proc = Modifier::new(ModifierKind::MagicOnHit);
        assert!(proc.set_field("true_strike_var", FieldValue::text("False")));
        assert!(matches!(
            proc.params,
            ModifierParams::MagicOnHit { true_strike: false, .. }
        ));
        assert!(!proc.set_field("true_strike_var", FieldValue::text("maybe")));
    }

    #[test]
    fn test_stat_bonus_fields() {
        let stats = Modifier::new(ModifierKind::StatBonus).with_field("agility_var", "25");
        let fields = stats.fields();
        assert_eq!(fields.len(), STAT_BONUS_FIELDS.len());
        assert_eq!(fields[1], ("agility_var", FieldValue::text("25")));
    }
}
