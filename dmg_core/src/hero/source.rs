//! StatSource - anything that adds stat bonuses to a hero

use crate::modifier::{ModifierSnapshot, StatBonuses};

/// Trait for anything that contributes stats to a hero's totals
pub trait StatSource {
    /// Name used in logs
    fn id(&self) -> &str;

    /// Add this source's bonuses to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}

/// Collects bonuses from every source before the formula chain runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatAccumulator {
    pub strength: f64,
    pub agility: f64,
    pub intelligence: f64,
    pub armor: f64,
    pub attack_speed: f64,
    pub movespeed_flat: f64,
    /// Fraction
    pub movespeed_pct: f64,
    pub hp: f64,
    pub mana: f64,
    pub hp_regen: f64,
    pub mana_regen: f64,
    /// Fraction, summed then capped by the formula chain
    pub bat_reduction: f64,
    /// Each source's magic resistance in percent; these stack multiplicatively
    pub magic_resistance: Vec<f64>,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bonuses(&mut self, bonuses: &StatBonuses) {
        self.strength += bonuses.strength;
        self.agility += bonuses.agility;
        self.intelligence += bonuses.intelligence;
        self.armor += bonuses.armor;
        self.attack_speed += bonuses.attack_speed;
        self.movespeed_flat += bonuses.movespeed_flat;
        self.movespeed_pct += bonuses.movespeed_pct;
        self.hp += bonuses.hp;
        self.mana += bonuses.mana;
        self.hp_regen += bonuses.hp_regen;
        self.mana_regen += bonuses.mana_regen;
        self.bat_reduction += bonuses.bat_reduction;
        self.magic_resistance.push(bonuses.magic_resistance);
    }

    /// Apply every source in order
    pub fn collect<'a, I>(sources: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn StatSource>,
    {
        let mut stats = StatAccumulator::new();
        for source in sources {
            tracing::trace!(source = source.id(), "applying stat source");
            source.apply(&mut stats);
        }
        stats
    }
}

/// A disabled modifier contributes nothing
impl StatSource for ModifierSnapshot {
    fn id(&self) -> &str {
        &self.label
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        if self.is_enabled() {
            stats.add_bonuses(&self.stat_bonuses());
        }
    }
}

/// The evaluated modifiers of one enabled item
pub struct ItemSource<'a> {
    pub name: &'a str,
    pub modifiers: &'a [ModifierSnapshot],
}

impl StatSource for ItemSource<'_> {
    fn id(&self) -> &str {
        self.name
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for modifier in self.modifiers {
            modifier.apply(stats);
        }
    }
}
