//! Sequential composition of selected modifiers
//!
//! Modifiers apply in selection order, each consuming the previous output
//! as its base damage. Every variant maps a per-hit profile of the form
//! `d(k) = base + per_hit·k` onto another profile of the same form, so a
//! whole chain collapses to one profile and multi-hit totals stay closed
//! form:
//!
//! ```text
//! total(n) = n·base + per_hit·n(n+1)/2
//! ```
//!
//! Magic never feeds back into the physical chain. Each modifier's magic
//! emission reads the post-chain physical damage of the same hit.

use super::HitModifier;
use crate::mitigation::combine_true_strike;

/// Affine per-hit damage: hit `k` deals `base + per_hit * k`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitProfile {
    pub base: f64,
    pub per_hit: f64,
}

impl HitProfile {
    /// Same damage on every hit
    pub fn constant(damage: f64) -> Self {
        HitProfile {
            base: damage,
            per_hit: 0.0,
        }
    }

    /// Damage of hit `hit` (1-indexed)
    pub fn at(&self, hit: u32) -> f64 {
        self.base + self.per_hit * hit as f64
    }

    /// Total over hits `1..=hits`
    pub fn total(&self, hits: u32) -> f64 {
        let n = hits as f64;
        self.base * n + self.per_hit * n * (n + 1.0) / 2.0
    }

    pub fn scaled(self, factor: f64) -> Self {
        HitProfile {
            base: self.base * factor,
            per_hit: self.per_hit * factor,
        }
    }
}

/// Totals of a chain applied over a number of hits
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChainResult {
    /// Physical damage of the first hit
    pub damage_per_hit: f64,
    /// Physical damage over all hits
    pub total_damage: f64,
    pub magic_per_hit: f64,
    pub magic_total: f64,
    /// Combined chance to pierce evasion
    pub true_strike: f64,
    /// Armor removed from the target
    pub armor_reduction: f64,
}

/// Ordered modifiers applied one after another
#[derive(Debug, Clone)]
pub struct ModifierChain<'a, M> {
    links: Vec<&'a M>,
}

impl<'a, M: HitModifier> ModifierChain<'a, M> {
    pub fn new(links: Vec<&'a M>) -> Self {
        ModifierChain { links }
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Physical damage of hit `hit`
    pub fn damage_for_hit(&self, hit: u32, base_dph: f64) -> f64 {
        self.links
            .iter()
            .fold(base_dph, |dph, m| m.damage_for_hit(hit, dph))
    }

    /// The per-hit profile after every link
    pub fn profile(&self, base_dph: f64) -> HitProfile {
        self.links
            .iter()
            .fold(HitProfile::constant(base_dph), |p, m| m.transform(p))
    }

    /// Physical damage over `hits` hits
    pub fn total_damage_for_hits(&self, hits: u32, base_dph: f64) -> f64 {
        match self.links.as_slice() {
            [] => base_dph * hits as f64,
            [only] => only.total_damage_for_hits(hits, base_dph),
            _ => self.profile(base_dph).total(hits),
        }
    }

    /// Magic emitted on hit `hit`
    pub fn magic_damage_for_hit(&self, hit: u32, base_dph: f64) -> f64 {
        let physical = self.damage_for_hit(hit, base_dph);
        self.links
            .iter()
            .map(|m| m.magic_damage_for_hit(hit, physical))
            .sum()
    }

    /// Magic emitted over `hits` hits
    pub fn total_magic_damage_for_hits(&self, hits: u32, base_dph: f64) -> f64 {
        let total_physical = self.total_damage_for_hits(hits, base_dph);
        self.links
            .iter()
            .map(|m| m.total_magic_damage_for_hits(hits, total_physical))
            .sum()
    }

    pub fn true_strike_chance(&self) -> f64 {
        combine_true_strike(self.links.iter().map(|m| m.true_strike_chance()))
    }

    pub fn armor_reduction(&self) -> f64 {
        self.links.iter().map(|m| m.armor_reduction()).sum()
    }

    /// Everything a row needs from the chain in one pass
    pub fn resolve(&self, hits: u32, base_dph: f64) -> ChainResult {
        ChainResult {
            damage_per_hit: self.damage_for_hit(1, base_dph),
            total_damage: self.total_damage_for_hits(hits, base_dph),
            magic_per_hit: self.magic_damage_for_hit(1, base_dph),
            magic_total: self.total_magic_damage_for_hits(hits, base_dph),
            true_strike: self.true_strike_chance(),
            armor_reduction: self.armor_reduction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Variables;
    use crate::modifier::{Modifier, ModifierKind, ModifierSnapshot};
    use proptest::prelude::*;

    fn snap(modifier: Modifier) -> ModifierSnapshot {
        modifier.snapshot(&Variables::new())
    }

    fn flat(v: &str) -> ModifierSnapshot {
        snap(Modifier::new(ModifierKind::FlatDamage).with_field("value_var", v))
    }

    fn pct(v: &str) -> ModifierSnapshot {
        snap(Modifier::new(ModifierKind::PercentageDamage).with_field("value_var", v))
    }

    fn fury(v: &str) -> ModifierSnapshot {
        snap(Modifier::new(ModifierKind::FurySwipes).with_field("damage_var", v))
    }

    #[test]
    fn test_sequential_order_matters() {
        let f = flat("10");
        let p = pct("50");

        let flat_first = ModifierChain::new(vec![&f, &p]);
        let pct_first = ModifierChain::new(vec![&p, &f]);

        // (100 + 10) * 1.5
        assert!((flat_first.damage_for_hit(1, 100.0) - 165.0).abs() < 1e-9);
        // 100 * 1.5 + 10
        assert!((pct_first.damage_for_hit(1, 100.0) - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_chain() {
        let chain: ModifierChain<ModifierSnapshot> = ModifierChain::new(vec![]);
        assert!(chain.is_empty());
        assert!((chain.total_damage_for_hits(4, 25.0) - 100.0).abs() < f64::EPSILON);
        assert!((chain.true_strike_chance() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fury_then_crit_scales_stacks() {
        let fu = fury("10");
        let crit = snap(Modifier::new(ModifierKind::CriticalStrike)
            .with_field("chance_var", "50")
            .with_field("mult_var", "200"));
        let chain = ModifierChain::new(vec![&fu, &crit]);

        // Crit multiplies (base + stacks): hit 2 = (100 + 20) * 1.5
        assert!((chain.damage_for_hit(2, 100.0) - 180.0).abs() < 1e-9);
        // Hits 1..3: (110 + 120 + 130) * 1.5
        assert!((chain.total_damage_for_hits(3, 100.0) - 540.0).abs() < 1e-9);
    }

    #[test]
    fn test_phantom_reads_post_chain_physical() {
        let p = pct("100");
        let phantom = snap(Modifier::new(ModifierKind::PhantomCrit)
            .with_field("crit_chance_var", "50")
            .with_field("bonus_magic_var", "100"));
        let chain = ModifierChain::new(vec![&phantom, &p]);

        // Physical doubles to 200 even though phantom is listed first
        assert!((chain.magic_damage_for_hit(1, 100.0) - 100.0).abs() < 1e-9);
        assert!((chain.total_magic_damage_for_hits(3, 100.0) - 300.0).abs() < 1e-9);
        assert!((chain.damage_for_hit(1, 100.0) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_side_channels_combine() {
        let proc = snap(Modifier::new(ModifierKind::MagicOnHit).with_field("chance_var", "50"));
        let strike = snap(Modifier::new(ModifierKind::TrueStrike).with_field("chance_var", "50"));
        let c1 = snap(Modifier::new(ModifierKind::Corruption));
        let c2 = snap(Modifier::new(ModifierKind::Corruption).with_field("armor_var", "4"));
        let chain = ModifierChain::new(vec![&proc, &strike, &c1, &c2]);

        let result = chain.resolve(1, 100.0);
        assert!((result.true_strike - 0.75).abs() < 1e-9);
        assert!((result.armor_reduction - 10.0).abs() < 1e-9);
        assert!((result.magic_per_hit - 27.5).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_fury_closed_form(n in 1u32..200, base in 0.0f64..500.0, stack in 0.0f64..100.0) {
            let fu = fury(&stack.to_string());
            let naive: f64 = (1..=n).map(|k| fu.damage_for_hit(k, base)).sum();
            let closed = fu.total_damage_for_hits(n, base);
            prop_assert!((naive - closed).abs() <= 1e-6 * naive.abs().max(1.0));
        }

        #[test]
        fn prop_chain_total_matches_hit_sum(
            n in 1u32..60,
            base in 0.0f64..300.0,
            flat_v in -50.0f64..50.0,
            pct_v in -50.0f64..200.0,
            stack in 0.0f64..40.0,
            chance in 0.0f64..100.0,
        ) {
            let f = flat(&flat_v.to_string());
            let p = pct(&pct_v.to_string());
            let fu = fury(&stack.to_string());
            let crit = snap(Modifier::new(ModifierKind::CriticalStrike)
                .with_field("chance_var", chance.to_string()));
            let chain = ModifierChain::new(vec![&fu, &f, &crit, &p]);

            let naive: f64 = (1..=n).map(|k| chain.damage_for_hit(k, base)).sum();
            let closed = chain.total_damage_for_hits(n, base);
            prop_assert!((naive - closed).abs() <= 1e-6 * naive.abs().max(1.0));
        }

        #[test]
        fn prop_disabled_modifiers_are_neutral(
            n in 1u32..50,
            base in 0.0f64..1000.0,
            idx in 0usize..9,
        ) {
            let kind = crate::modifier::REGISTRY[idx];
            let m = snap(Modifier::new(kind).disabled());
            prop_assert_eq!(m.damage_for_hit(n, base), base);
            prop_assert_eq!(m.total_damage_for_hits(n, base), base * n as f64);
            prop_assert_eq!(m.magic_damage_for_hit(n, base), 0.0);
            prop_assert_eq!(m.total_magic_damage_for_hits(n, base), 0.0);
            prop_assert_eq!(m.true_strike_chance(), 0.0);
            prop_assert_eq!(m.armor_reduction(), 0.0);
        }
    }
}
