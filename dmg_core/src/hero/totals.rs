//! Derived hero totals
//!
//! The formula chain runs in a fixed order:
//! attributes -> resources -> attack timing -> damage -> defenses.
//! Damage composes as base -> flat bonuses -> percentage bonuses (applied to
//! both base and auto-attack damage) -> remaining modifiers chained -> magic.

use crate::config::HeroConstants;
use crate::expr::Variables;
use crate::mitigation::{
    armor_to_reduction_percent, clamp_percent, combine_with_evasion, effective_hp,
    stack_magic_resistance,
};
use crate::modifier::{HitModifier, ModifierChain, ModifierKind, ModifierSnapshot};
use crate::types::AttributeType;

use super::row::{HeroInput, HeroValues};
use super::source::{ItemSource, StatAccumulator, StatSource};
use super::spell::HeroSpellSummary;

/// Everything the hero lab shows for one hero
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeroTotals {
    pub name: String,
    pub attribute_type: AttributeType,
    pub level: f64,

    pub strength: f64,
    pub agility: f64,
    pub intelligence: f64,

    pub hp: f64,
    pub hp_regen: f64,
    pub mana: f64,
    pub mana_regen: f64,
    pub gold: f64,

    pub attack_speed: f64,
    pub bat: f64,
    pub attacks_per_second: f64,
    /// 0 when the hero cannot attack
    pub seconds_between_attacks: f64,

    pub base_damage: f64,
    pub bonus_damage: f64,
    pub auto_attack_damage: f64,
    pub estimated_physical: f64,
    pub estimated_magic: f64,
    pub estimated_damage: f64,
    pub estimated_dps: f64,

    pub movespeed: f64,
    pub armor: f64,
    /// Percentages from here on
    pub physical_reduction: f64,
    pub magic_resistance: f64,
    pub evasion: f64,
    pub physical_and_evasion: f64,

    pub ehp_physical: f64,
    pub ehp_evasion: f64,
    pub ehp_physical_evasion: f64,
    pub ehp_magic: f64,

    pub spells: Vec<HeroSpellSummary>,
}

struct Attributes {
    strength: f64,
    agility: f64,
    intelligence: f64,
}

fn attributes(values: &HeroValues, stats: &StatAccumulator) -> Attributes {
    let level_factor = (values.level - 1.0).max(0.0);
    Attributes {
        strength: values.strength + values.strength_per_level * level_factor + stats.strength,
        agility: values.agility + values.agility_per_level * level_factor + stats.agility,
        intelligence: values.intelligence
            + values.intelligence_per_level * level_factor
            + stats.intelligence,
    }
}

fn attribute_damage(kind: AttributeType, attrs: &Attributes, constants: &HeroConstants) -> f64 {
    match kind {
        AttributeType::Strength => attrs.strength,
        AttributeType::Agility => attrs.agility,
        AttributeType::Intelligence => attrs.intelligence,
        AttributeType::Universal => {
            constants.universal_blend * (attrs.strength + attrs.agility + attrs.intelligence)
        }
    }
}

struct DamageEstimate {
    base: f64,
    bonus: f64,
    auto_attack: f64,
    physical: f64,
    magic: f64,
}

fn estimate_damage(raw: f64, modifiers: &[ModifierSnapshot]) -> DamageEstimate {
    let enabled: Vec<&ModifierSnapshot> = modifiers.iter().filter(|m| m.is_enabled()).collect();

    let bonus: f64 = enabled
        .iter()
        .filter(|m| m.kind == ModifierKind::FlatDamage)
        .map(|m| m.damage_for_hit(1, 0.0))
        .sum();

    let mut base = raw;
    let mut auto_attack = raw + bonus;
    for percent in enabled
        .iter()
        .filter(|m| m.kind == ModifierKind::PercentageDamage)
    {
        base = percent.damage_for_hit(1, base);
        auto_attack = percent.damage_for_hit(1, auto_attack);
    }

    let rest = ModifierChain::new(
        enabled
            .iter()
            .copied()
            .filter(|m| !matches!(m.kind, ModifierKind::FlatDamage | ModifierKind::PercentageDamage))
            .collect(),
    );
    let physical = rest.damage_for_hit(1, auto_attack);
    let magic: f64 = enabled
        .iter()
        .map(|m| m.magic_damage_for_hit(1, physical))
        .sum();

    DamageEstimate {
        base,
        bonus,
        auto_attack,
        physical,
        magic,
    }
}

impl HeroInput {
    pub fn totals(&self, vars: &Variables, constants: &HeroConstants) -> HeroTotals {
        let values = self.fields.evaluate(vars);

        let own: Vec<ModifierSnapshot> = self.modifiers.iter().map(|m| m.snapshot(vars)).collect();
        let items: Vec<(&str, Vec<ModifierSnapshot>)> = self
            .items
            .iter()
            .filter(|i| i.enabled)
            .map(|i| (i.item.name(), i.item.snapshots(vars)))
            .collect();

        let stats = {
            let item_sources: Vec<ItemSource<'_>> = items
                .iter()
                .map(|(name, modifiers)| ItemSource {
                    name: *name,
                    modifiers: modifiers.as_slice(),
                })
                .collect();
            StatAccumulator::collect(
                own.iter()
                    .map(|m| m as &dyn StatSource)
                    .chain(item_sources.iter().map(|s| s as &dyn StatSource)),
            )
        };

        let attrs = attributes(&values, &stats);

        // Resources
        let hp = (values.base_hp + attrs.strength * constants.hp_per_strength + stats.hp).max(0.0);
        let hp_regen =
            values.base_hp_regen + attrs.strength * constants.hp_regen_per_strength + stats.hp_regen;
        let mana = (constants.base_mana
            + attrs.intelligence * constants.mana_per_intelligence
            + stats.mana)
            .max(0.0);
        let mana_regen =
            attrs.intelligence * constants.mana_regen_per_intelligence + stats.mana_regen;
        let gold: f64 = self
            .items
            .iter()
            .filter(|i| i.enabled)
            .map(|i| i.item.gold(vars))
            .sum();

        // Attack timing
        let attack_speed = (values.attack_speed + attrs.agility + stats.attack_speed).max(0.0);
        let bat_reduction = stats.bat_reduction.clamp(0.0, constants.bat_reduction_cap);
        let bat = (values.bat * (1.0 - bat_reduction)).max(constants.min_bat);
        let attacks_per_second = attack_speed / (100.0 * bat);
        let seconds_between_attacks = if attacks_per_second > 0.0 {
            1.0 / attacks_per_second
        } else {
            0.0
        };

        // Damage
        let raw = values.base_damage + attribute_damage(values.attribute_type, &attrs, constants);
        let mut all = own;
        all.extend(items.into_iter().flat_map(|(_, m)| m));
        let damage = estimate_damage(raw, &all);
        let estimated_damage = damage.physical + damage.magic;

        // Defenses
        let movespeed = (values.movespeed + stats.movespeed_flat) * (1.0 + stats.movespeed_pct);
        let armor = values.base_armor
            + attrs.agility / constants.armor_per_agility_divisor
            + stats.armor;
        let physical_reduction = armor_to_reduction_percent(armor);
        let base_mr =
            clamp_percent(values.base_magic_resist + attrs.intelligence * constants.magic_resist_per_intelligence);
        let magic_resistance = stack_magic_resistance(base_mr, &stats.magic_resistance);
        let evasion = clamp_percent(values.evasion);
        let physical_and_evasion =
            combine_with_evasion(physical_reduction / 100.0, evasion / 100.0) * 100.0;

        let totals = HeroTotals {
            name: self.fields.name.clone(),
            attribute_type: values.attribute_type,
            level: values.level,
            strength: attrs.strength,
            agility: attrs.agility,
            intelligence: attrs.intelligence,
            hp,
            hp_regen,
            mana,
            mana_regen,
            gold,
            attack_speed,
            bat,
            attacks_per_second,
            seconds_between_attacks,
            base_damage: damage.base,
            bonus_damage: damage.bonus,
            auto_attack_damage: damage.auto_attack,
            estimated_physical: damage.physical,
            estimated_magic: damage.magic,
            estimated_damage,
            estimated_dps: estimated_damage * attacks_per_second,
            movespeed,
            armor,
            physical_reduction,
            magic_resistance,
            evasion,
            physical_and_evasion,
            ehp_physical: effective_hp(hp, physical_reduction / 100.0),
            ehp_evasion: effective_hp(hp, evasion / 100.0),
            ehp_physical_evasion: effective_hp(hp, physical_and_evasion / 100.0),
            ehp_magic: effective_hp(hp, magic_resistance / 100.0),
            spells: self.spells.iter().map(|s| s.summary(vars)).collect(),
        };

        tracing::debug!(
            hero = %totals.name,
            hp = totals.hp,
            dps = totals.estimated_dps,
            "hero totals computed"
        );
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::{AttachedItem, Item};
    use crate::modifier::Modifier;

    const EPS: f64 = 1e-9;

    fn totals(hero: &HeroInput) -> HeroTotals {
        hero.totals(&Variables::new(), &HeroConstants::default())
    }

    #[test]
    fn test_default_hero() {
        let t = totals(&HeroInput::default());

        // 200 + 20 * 22
        assert!((t.hp - 640.0).abs() < EPS);
        // 75 + 20 * 12
        assert!((t.mana - 315.0).abs() < EPS);
        assert!((t.hp_regen - 2.0).abs() < EPS);
        assert!((t.mana_regen - 1.0).abs() < EPS);

        // (100 + 20) / (100 * 1.7)
        assert!((t.attack_speed - 120.0).abs() < EPS);
        assert!((t.attacks_per_second - 120.0 / 170.0).abs() < EPS);
        assert!((t.seconds_between_attacks - 170.0 / 120.0).abs() < EPS);

        // 50 base + 20 strength
        assert!((t.base_damage - 70.0).abs() < EPS);
        assert!((t.auto_attack_damage - 70.0).abs() < EPS);
        assert!((t.estimated_damage - 70.0).abs() < EPS);

        // 20 / 6 armor
        assert!((t.armor - 20.0 / 6.0).abs() < EPS);
        // 25 + 20 * 0.1
        assert!((t.magic_resistance - 27.0).abs() < EPS);
        assert!((t.ehp_evasion - 640.0).abs() < EPS);
        assert!((t.ehp_magic - 640.0 / 0.73).abs() < 1e-6);
    }

    #[test]
    fn test_level_growth() {
        let mut hero = HeroInput::default();
        hero.fields.level = "5".to_string();
        hero.fields.strength_per_level = "3".to_string();
        let t = totals(&hero);
        // 20 + 3 * 4
        assert!((t.strength - 32.0).abs() < EPS);
    }

    #[test]
    fn test_universal_blend() {
        let mut hero = HeroInput::default();
        hero.fields.attribute_type = "Universal".to_string();
        let t = totals(&hero);
        // 50 + 0.45 * 60
        assert!((t.base_damage - 77.0).abs() < EPS);
    }

    #[test]
    fn test_damage_composition_order() {
        let mut hero = HeroInput::default();
        hero.modifiers = vec![
            Modifier::new(ModifierKind::PercentageDamage).with_field("value_var", "50"),
            Modifier::new(ModifierKind::FlatDamage).with_field("value_var", "30"),
            Modifier::new(ModifierKind::CriticalStrike)
                .with_field("chance_var", "100")
                .with_field("mult_var", "200"),
        ];
        let t = totals(&hero);

        assert!((t.bonus_damage - 30.0).abs() < EPS);
        // 70 * 1.5
        assert!((t.base_damage - 105.0).abs() < EPS);
        // (70 + 30) * 1.5
        assert!((t.auto_attack_damage - 150.0).abs() < EPS);
        assert!((t.estimated_physical - 300.0).abs() < EPS);
    }

    #[test]
    fn test_items_contribute_when_enabled() {
        let mut item = Item::new("Belt");
        item.fields.gold_amount = "1000".to_string();
        item.modifiers.push(
            Modifier::new(ModifierKind::StatBonus)
                .with_field("strength_var", "10")
                .with_field("magic_resistance_var", "50"),
        );
        let mut hero = HeroInput::default();
        hero.items.push(AttachedItem::from(item));

        let t = totals(&hero);
        assert!((t.strength - 30.0).abs() < EPS);
        assert!((t.gold - 1000.0).abs() < EPS);
        // 1 - 0.73 * 0.5
        assert!((t.magic_resistance - 63.5).abs() < 1e-9);

        hero.items[0].enabled = false;
        let t = totals(&hero);
        assert!((t.strength - 20.0).abs() < EPS);
        assert_eq!(t.gold, 0.0);
    }

    #[test]
    fn test_bat_reduction_capped() {
        let mut hero = HeroInput::default();
        hero.modifiers.push(
            Modifier::new(ModifierKind::StatBonus).with_field("bat_reduction_var", "200"),
        );
        let t = totals(&hero);
        // 1.7 * (1 - 0.95)
        assert!((t.bat - 0.085).abs() < 1e-9);
    }

    #[test]
    fn test_full_evasion_is_infinite_ehp() {
        let mut hero = HeroInput::default();
        hero.fields.evasion = "100".to_string();
        let t = totals(&hero);
        assert!(t.ehp_evasion.is_infinite());
        assert!(t.ehp_physical_evasion.is_infinite());
        assert!(t.ehp_physical.is_finite());
    }

    #[test]
    fn test_zero_attack_speed() {
        let mut hero = HeroInput::default();
        hero.fields.attack_speed = "-500".to_string();
        let t = totals(&hero);
        assert_eq!(t.attack_speed, 0.0);
        assert_eq!(t.attacks_per_second, 0.0);
        assert_eq!(t.seconds_between_attacks, 0.0);
        assert_eq!(t.estimated_dps, 0.0);
    }
}
