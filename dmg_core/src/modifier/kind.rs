//! Modifier variants and the static type registry

use serde::{Deserialize, Serialize};

/// Every modifier variant the engine knows how to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    FurySwipes,
    CriticalStrike,
    MagicOnHit,
    FlatDamage,
    PercentageDamage,
    TrueStrike,
    PhantomCrit,
    Corruption,
    StatBonus,
}

/// Registry order, as offered when adding a modifier
pub static REGISTRY: &[ModifierKind] = &[
    ModifierKind::FurySwipes,
    ModifierKind::CriticalStrike,
    ModifierKind::MagicOnHit,
    ModifierKind::FlatDamage,
    ModifierKind::PercentageDamage,
    ModifierKind::TrueStrike,
    ModifierKind::PhantomCrit,
    ModifierKind::Corruption,
    ModifierKind::StatBonus,
];

impl ModifierKind {
    /// Registry key used in saved libraries
    pub fn type_name(&self) -> &'static str {
        match self {
            ModifierKind::FurySwipes => "Fury Swipes",
            ModifierKind::CriticalStrike => "Critical Strike",
            ModifierKind::MagicOnHit => "Magic on Hit",
            ModifierKind::FlatDamage => "Flat Damage",
            ModifierKind::PercentageDamage => "Percentage Damage",
            ModifierKind::TrueStrike => "True Strike",
            ModifierKind::PhantomCrit => "Phantom Crit",
            ModifierKind::Corruption => "Corruption",
            ModifierKind::StatBonus => "Stat Bonus",
        }
    }

    /// Look up a variant by registry key
    pub fn from_type_name(name: &str) -> Option<ModifierKind> {
        REGISTRY.iter().copied().find(|k| k.type_name() == name)
    }

    /// Label a freshly created modifier starts with
    pub fn default_label(&self) -> &'static str {
        match self {
            ModifierKind::FurySwipes => "Fury Swipes",
            ModifierKind::CriticalStrike => "Crit",
            ModifierKind::MagicOnHit => "Magic Proc",
            ModifierKind::FlatDamage => "Flat Damage",
            ModifierKind::PercentageDamage => "Percent Bonus",
            ModifierKind::TrueStrike => "True Strike",
            ModifierKind::PhantomCrit => "Phantom Crit",
            ModifierKind::Corruption => "Corruption",
            ModifierKind::StatBonus => "Stats",
        }
    }

    /// Flat and percentage damage are "simple"; everything else chains
    pub fn is_simple(&self) -> bool {
        matches!(self, ModifierKind::FlatDamage | ModifierKind::PercentageDamage)
    }
}

/// All registry keys in registry order
pub fn available_types() -> Vec<&'static str> {
    REGISTRY.iter().map(|k| k.type_name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trip() {
        for kind in REGISTRY {
            assert_eq!(ModifierKind::from_type_name(kind.type_name()), Some(*kind));
        }
        assert_eq!(ModifierKind::from_type_name("Bash"), None);
    }

    #[test]
    fn test_registry_names_unique() {
        let names = available_types();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }
}
