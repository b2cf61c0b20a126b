//! Shared modifier pool and identity lookups
//!
//! Rows refer to modifiers by [`ModifierId`], so one modifier can sit in
//! several rows' selections. Resolution code only sees the pool through
//! [`ModifierLookup`].

use super::chain::ModifierChain;
use super::effect::ModifierSnapshot;
use super::params::Modifier;
use crate::expr::Variables;
use crate::types::ModifierId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves modifier identities to this pass's snapshots
pub trait ModifierLookup {
    fn lookup(&self, id: ModifierId) -> Option<&ModifierSnapshot>;

    /// Chain of the selected modifiers; unknown ids are skipped
    fn chain(&self, ids: &[ModifierId]) -> ModifierChain<'_, ModifierSnapshot> {
        ModifierChain::new(ids.iter().filter_map(|id| self.lookup(*id)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub id: ModifierId,
    pub modifier: Modifier,
}

/// Ordered modifiers owned by a section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PoolEntry>", into = "Vec<PoolEntry>")]
pub struct ModifierPool {
    entries: Vec<PoolEntry>,
    next_id: u32,
}

impl From<Vec<PoolEntry>> for ModifierPool {
    fn from(entries: Vec<PoolEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id.0 + 1).max().unwrap_or(1);
        ModifierPool { entries, next_id }
    }
}

impl From<ModifierPool> for Vec<PoolEntry> {
    fn from(pool: ModifierPool) -> Self {
        pool.entries
    }
}

impl ModifierPool {
    pub fn new() -> Self {
        ModifierPool {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a modifier and return its identity
    pub fn add(&mut self, modifier: Modifier) -> ModifierId {
        let id = ModifierId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.entries.push(PoolEntry { id, modifier });
        id
    }

    pub fn remove(&mut self, id: ModifierId) -> Option<Modifier> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx).modifier)
    }

    pub fn get(&self, id: ModifierId) -> Option<&Modifier> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.modifier)
    }

    pub fn get_mut(&mut self, id: ModifierId) -> Option<&mut Modifier> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.modifier)
    }

    pub fn contains(&self, id: ModifierId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModifierId, &Modifier)> {
        self.entries.iter().map(|e| (e.id, &e.modifier))
    }

    /// Evaluate every modifier for one pass
    pub fn snapshot(&self, vars: &Variables) -> PoolSnapshot {
        PoolSnapshot {
            snapshots: self
                .entries
                .iter()
                .map(|e| (e.id, e.modifier.snapshot(vars)))
                .collect(),
        }
    }
}

/// Snapshots of a pool for one recompute pass
#[derive(Debug, Clone, Default)]
pub struct PoolSnapshot {
    snapshots: HashMap<ModifierId, ModifierSnapshot>,
}

impl PoolSnapshot {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl ModifierLookup for PoolSnapshot {
    fn lookup(&self, id: ModifierId) -> Option<&ModifierSnapshot> {
        self.snapshots.get(&id)
    }
}
