//! Evaluated modifier effects
//!
//! A [`ModifierSnapshot`] is the numeric view of a [`Modifier`] for one
//! recompute pass. Parameters are read once, clamped, and never touched
//! again until the next pass.

use super::chain::HitProfile;
use super::kind::ModifierKind;
use super::params::{Modifier, ModifierParams, StatBonusParams};
use super::stats::StatBonuses;
use super::HitModifier;
use crate::expr::{self, Variables};

/// Numeric parameters of an enabled modifier
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Hit `k` gains `per_stack * k`
    FurySwipes { per_stack: f64 },
    /// Expected-value crit: `1 + chance * (multiplier - 1)`
    CriticalStrike { chance: f64, multiplier: f64 },
    MagicOnHit { chance: f64, damage: f64, true_strike: bool },
    FlatDamage { value: f64 },
    PercentageDamage { fraction: f64 },
    TrueStrike { chance: f64 },
    PhantomCrit { crit_chance: f64, bonus: f64 },
    Corruption { armor: f64 },
    StatBonus(StatBonuses),
}

impl Effect {
    fn physical_multiplier(&self) -> Option<f64> {
        match self {
            Effect::CriticalStrike { chance, multiplier } => Some(1.0 + chance * (multiplier - 1.0)),
            Effect::PercentageDamage { fraction } => Some(1.0 + fraction),
            _ => None,
        }
    }
}

impl HitModifier for Effect {
    fn damage_for_hit(&self, hit: u32, base_dph: f64) -> f64 {
        match self {
            Effect::FurySwipes { per_stack } => base_dph + per_stack * hit as f64,
            Effect::FlatDamage { value } => base_dph + value,
            _ => match self.physical_multiplier() {
                Some(mult) => base_dph * mult,
                None => base_dph,
            },
        }
    }

    fn total_damage_for_hits(&self, hits: u32, base_dph: f64) -> f64 {
        let n = hits as f64;
        match self {
            // 1 + 2 + ... + n = n(n+1)/2
            Effect::FurySwipes { per_stack } => base_dph * n + per_stack * n * (n + 1.0) / 2.0,
            _ => self.damage_for_hit(1, base_dph) * n,
        }
    }

    fn transform(&self, profile: HitProfile) -> HitProfile {
        match self {
            Effect::FurySwipes { per_stack } => HitProfile {
                base: profile.base,
                per_hit: profile.per_hit + per_stack,
            },
            Effect::FlatDamage { value } => HitProfile {
                base: profile.base + value,
                per_hit: profile.per_hit,
            },
            _ => match self.physical_multiplier() {
                Some(mult) => profile.scaled(mult),
                None => profile,
            },
        }
    }

    fn magic_damage_for_hit(&self, _hit: u32, physical: f64) -> f64 {
        match self {
            Effect::MagicOnHit { chance, damage, .. } => chance * damage,
            Effect::PhantomCrit { crit_chance, bonus } => physical * crit_chance * bonus,
            _ => 0.0,
        }
    }

    fn total_magic_damage_for_hits(&self, hits: u32, total_physical: f64) -> f64 {
        match self {
            Effect::MagicOnHit { chance, damage, .. } => chance * damage * hits as f64,
            Effect::PhantomCrit { crit_chance, bonus } => total_physical * crit_chance * bonus,
            _ => 0.0,
        }
    }

    fn true_strike_chance(&self) -> f64 {
        match self {
            Effect::TrueStrike { chance } => *chance,
            Effect::MagicOnHit {
                chance,
                true_strike: true,
                ..
            } => *chance,
            _ => 0.0,
        }
    }

    fn armor_reduction(&self) -> f64 {
        match self {
            Effect::Corruption { armor } => *armor,
            _ => 0.0,
        }
    }
}

/// One modifier, evaluated for the current pass
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierSnapshot {
    pub kind: ModifierKind,
    pub label: String,
    /// `None` when the modifier is disabled
    pub effect: Option<Effect>,
    /// Keys of parameters that failed to evaluate and fell back to neutral
    pub invalid_fields: Vec<&'static str>,
}

impl ModifierSnapshot {
    pub fn is_enabled(&self) -> bool {
        self.effect.is_some()
    }

    pub fn stat_bonuses(&self) -> StatBonuses {
        match &self.effect {
            Some(Effect::StatBonus(bonuses)) => *bonuses,
            _ => StatBonuses::default(),
        }
    }
}

impl HitModifier for ModifierSnapshot {
    fn damage_for_hit(&self, hit: u32, base_dph: f64) -> f64 {
        match &self.effect {
            Some(effect) => effect.damage_for_hit(hit, base_dph),
            None => base_dph,
        }
    }

    fn total_damage_for_hits(&self, hits: u32, base_dph: f64) -> f64 {
        match &self.effect {
            Some(effect) => effect.total_damage_for_hits(hits, base_dph),
            None => base_dph * hits as f64,
        }
    }

    fn transform(&self, profile: HitProfile) -> HitProfile {
        match &self.effect {
            Some(effect) => effect.transform(profile),
            None => profile,
        }
    }

    fn magic_damage_for_hit(&self, hit: u32, physical: f64) -> f64 {
        self.effect
            .as_ref()
            .map_or(0.0, |e| e.magic_damage_for_hit(hit, physical))
    }

    fn total_magic_damage_for_hits(&self, hits: u32, total_physical: f64) -> f64 {
        self.effect
            .as_ref()
            .map_or(0.0, |e| e.total_magic_damage_for_hits(hits, total_physical))
    }

    fn true_strike_chance(&self) -> f64 {
        self.effect.as_ref().map_or(0.0, |e| e.true_strike_chance())
    }

    fn armor_reduction(&self) -> f64 {
        self.effect.as_ref().map_or(0.0, |e| e.armor_reduction())
    }
}

/// Reads parameters, recording the ones that fail
struct FieldReader<'a> {
    vars: &'a Variables,
    invalid: Vec<&'static str>,
}

impl<'a> FieldReader<'a> {
    fn read(&mut self, key: &'static str, text: &str) -> f64 {
        match expr::try_eval(text, self.vars) {
            Some(value) => value,
            None => {
                self.invalid.push(key);
                0.0
            }
        }
    }

    /// A 0..100 chance as a fraction
    fn chance(&mut self, key: &'static str, text: &str) -> f64 {
        self.read(key, text).clamp(0.0, 100.0) / 100.0
    }

    fn stats(&mut self, p: &StatBonusParams) -> StatBonuses {
        StatBonuses {
            strength: self.read("strength_var", &p.strength),
            agility: self.read("agility_var", &p.agility),
            intelligence: self.read("intelligence_var", &p.intelligence),
            armor: self.read("armor_var", &p.armor),
            attack_speed: self.read("attack_speed_var", &p.attack_speed),
            movespeed_flat: self.read("movespeed_flat_var", &p.movespeed_flat),
            movespeed_pct: self.read("movespeed_pct_var", &p.movespeed_pct) / 100.0,
            hp: self.read("hp_var", &p.hp),
            mana: self.read("mana_var", &p.mana),
            hp_regen: self.read("hp_regen_var", &p.hp_regen),
            mana_regen: self.read("mana_regen_var", &p.mana_regen),
            magic_resistance: self.read("magic_resistance_var", &p.magic_resistance),
            bat_reduction: self.read("bat_reduction_var", &p.bat_reduction) / 100.0,
        }
    }
}

impl Modifier {
    /// Evaluate every parameter against `vars`
    ///
    /// A disabled modifier is not read at all and behaves as if absent.
    pub fn snapshot(&self, vars: &Variables) -> ModifierSnapshot {
        let kind = self.kind();
        if !self.enabled {
            return ModifierSnapshot {
                kind,
                label: self.label.clone(),
                effect: None,
                invalid_fields: Vec::new(),
            };
        }

        let mut r = FieldReader {
            vars,
            invalid: Vec::new(),
        };
        let effect = match &self.params {
            ModifierParams::FurySwipes { damage } => Effect::FurySwipes {
                per_stack: r.read("damage_var", damage),
            },
            ModifierParams::CriticalStrike { chance, mult } => {
                let chance = r.chance("chance_var", chance);
                let raw_mult = r.read("mult_var", mult);
                Effect::CriticalStrike {
                    chance,
                    multiplier: raw_mult.max(100.0) / 100.0,
                }
            }
            ModifierParams::MagicOnHit {
                chance,
                damage,
                true_strike,
            } => Effect::MagicOnHit {
                chance: r.chance("chance_var", chance),
                damage: r.read("damage_var", damage),
                true_strike: *true_strike,
            },
            ModifierParams::FlatDamage { value } => Effect::FlatDamage {
                value: r.read("value_var", value),
            },
            ModifierParams::PercentageDamage { value } => Effect::PercentageDamage {
                fraction: r.read("value_var", value) / 100.0,
            },
            ModifierParams::TrueStrike { chance } => Effect::TrueStrike {
                chance: r.chance("chance_var", chance),
            },
            ModifierParams::PhantomCrit {
                crit_chance,
                bonus_magic,
            } => Effect::PhantomCrit {
                crit_chance: r.chance("crit_chance_var", crit_chance),
                bonus: r.read("bonus_magic_var", bonus_magic).max(0.0) / 100.0,
            },
            ModifierParams::Corruption { armor } => Effect::Corruption {
                armor: r.read("armor_var", armor),
            },
            ModifierParams::StatBonus(params) => Effect::StatBonus(r.stats(params)),
        };

        ModifierSnapshot {
            kind,
            label: self.label.clone(),
            effect: Some(effect),
            invalid_fields: r.invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(modifier: Modifier) -> ModifierSnapshot {
        modifier.snapshot(&Variables::new())
    }

    #[test]
    fn test_fury_per_hit() {
        let fury = snap(Modifier::new(ModifierKind::FurySwipes));
        // Hit 3 with 15 per stack: 100 + 45
        assert!((fury.damage_for_hit(3, 100.0) - 145.0).abs() < f64::EPSILON);
        // 5 hits: 500 + 15 * 15
        assert!((fury.total_damage_for_hits(5, 100.0) - 725.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_crit_expected_value() {
        let crit = snap(Modifier::new(ModifierKind::CriticalStrike));
        // 30% chance of 150%: 1 + 0.3 * 0.5 = 1.15
        assert!((crit.damage_for_hit(1, 100.0) - 115.0).abs() < 1e-9);
        assert!((crit.total_damage_for_hits(4, 100.0) - 460.0).abs() < 1e-9);
    }

    #[test]
    fn test_crit_clamps() {
        let crit = snap(
            Modifier::new(ModifierKind::CriticalStrike)
                .with_field("chance_var", "250")
                .with_field("mult_var", "50"),
        );
        // Multiplier below 100% is raised to 100%, so no change
        assert!((crit.damage_for_hit(1, 100.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_magic_on_hit() {
        let proc = snap(Modifier::new(ModifierKind::MagicOnHit));
        assert!((proc.damage_for_hit(1, 80.0) - 80.0).abs() < f64::EPSILON);
        // 65% of 55
        assert!((proc.magic_damage_for_hit(1, 80.0) - 35.75).abs() < 1e-9);
        assert!((proc.total_magic_damage_for_hits(4, 320.0) - 143.0).abs() < 1e-9);
        assert!((proc.true_strike_chance() - 0.65).abs() < 1e-9);

        let no_pierce = snap(
            Modifier::new(ModifierKind::MagicOnHit).with_field("true_strike_var", "false"),
        );
        assert!((no_pierce.true_strike_chance() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_phantom_crit_reads_physical() {
        let phantom = snap(Modifier::new(ModifierKind::PhantomCrit));
        // 200 physical * 0.3 * 0.8
        assert!((phantom.magic_damage_for_hit(1, 200.0) - 48.0).abs() < 1e-9);
        assert!((phantom.damage_for_hit(1, 200.0) - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_side_channels() {
        let corruption = snap(Modifier::new(ModifierKind::Corruption));
        assert!((corruption.armor_reduction() - 6.0).abs() < f64::EPSILON);
        let strike = snap(Modifier::new(ModifierKind::TrueStrike));
        assert!((strike.true_strike_chance() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_disabled_is_absent() {
        let fury = snap(Modifier::new(ModifierKind::FurySwipes).disabled());
        assert!(!fury.is_enabled());
        assert!((fury.damage_for_hit(7, 100.0) - 100.0).abs() < f64::EPSILON);
        assert!((fury.total_damage_for_hits(7, 100.0) - 700.0).abs() < f64::EPSILON);

        let proc = snap(Modifier::new(ModifierKind::MagicOnHit).disabled());
        assert!((proc.magic_damage_for_hit(1, 100.0) - 0.0).abs() < f64::EPSILON);
        assert!((proc.true_strike_chance() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_parameter_is_neutral() {
        let pct = snap(Modifier::new(ModifierKind::PercentageDamage).with_field("value_var", "1/0"));
        assert_eq!(pct.invalid_fields, vec!["value_var"]);
        assert!((pct.damage_for_hit(1, 100.0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parameters_use_variables() {
        let mut vars = Variables::new();
        vars.insert("stacks", 20.0);
        let fury = Modifier::new(ModifierKind::FurySwipes)
            .with_field("damage_var", "stacks * 2")
            .snapshot(&vars);
        assert!((fury.damage_for_hit(1, 0.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stat_bonus_percentages() {
        let stats = snap(
            Modifier::new(ModifierKind::StatBonus)
                .with_field("movespeed_pct_var", "10")
                .with_field("bat_reduction_var", "25")
                .with_field("magic_resistance_var", "15"),
        )
        .stat_bonuses();
        assert!((stats.movespeed_pct - 0.10).abs() < 1e-12);
        assert!((stats.bat_reduction - 0.25).abs() < 1e-12);
        assert!((stats.magic_resistance - 15.0).abs() < 1e-12);
    }
}
