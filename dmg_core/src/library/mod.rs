//! Named libraries of saved heroes, items and spells
//!
//! Each library is one JSON file shaped `{"version": 1, "<kind>s": [...]}`.
//! Names are matched case-insensitively after trimming.

mod policy;
mod store;

pub use policy::{append_all, append_one, replace_all, replace_one};
pub use store::Library;

use crate::hero::{HeroInput, HeroSpell, Item};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub const LIBRARY_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Failed to access library file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse library JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} must have a non-empty name")]
    EmptyName(&'static str),
    #[error("a saved {kind} named '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },
    #[error("no saved {kind} named '{name}'")]
    NotFound { kind: &'static str, name: String },
    #[error("invalid {0} library format")]
    Malformed(&'static str),
}

/// Something that can be stored in a library file
pub trait LibraryEntry: Clone + Default + Serialize + DeserializeOwned {
    /// Singular noun used in messages and default names
    const KIND: &'static str;
    /// Key of the entry list inside the file
    const KEY: &'static str;
    const FILE_NAME: &'static str;
    /// Root for version names when the entry has no name
    const DEFAULT_NAME: &'static str;

    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);

    /// Workbench identifier, for kinds that carry one
    fn id(&self) -> Option<u32> {
        None
    }

    fn set_id(&mut self, _id: u32) {}
}

impl LibraryEntry for HeroInput {
    const KIND: &'static str = "hero";
    const KEY: &'static str = "heroes";
    const FILE_NAME: &'static str = "hero_library.json";
    const DEFAULT_NAME: &'static str = "Hero";

    fn name(&self) -> &str {
        &self.fields.name
    }

    fn set_name(&mut self, name: String) {
        self.fields.name = name;
    }

    fn id(&self) -> Option<u32> {
        Some(self.hero_id)
    }

    fn set_id(&mut self, id: u32) {
        self.hero_id = id;
    }
}

impl LibraryEntry for Item {
    const KIND: &'static str = "item";
    const KEY: &'static str = "items";
    const FILE_NAME: &'static str = "item_library.json";
    const DEFAULT_NAME: &'static str = "Item";

    fn name(&self) -> &str {
        &self.fields.name
    }

    fn set_name(&mut self, name: String) {
        self.fields.name = name;
    }

    fn id(&self) -> Option<u32> {
        Some(self.item_id)
    }

    fn set_id(&mut self, id: u32) {
        self.item_id = id;
    }
}

impl LibraryEntry for HeroSpell {
    const KIND: &'static str = "spell";
    const KEY: &'static str = "spells";
    const FILE_NAME: &'static str = "spell_library.json";
    const DEFAULT_NAME: &'static str = "Spell";

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Trimmed, lowercased form used for every name comparison
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Name shown for the entry at `index`, falling back to "<Kind> N"
pub fn display_name<T: LibraryEntry>(entry: &T, index: usize) -> String {
    let name = entry.name().trim();
    if name.is_empty() {
        format!("{} {}", T::DEFAULT_NAME, index + 1)
    } else {
        name.to_string()
    }
}

/// First `"<root> vN"` (N from 2) whose normalized form is not taken
pub fn version_name(root: &str, taken: &[String]) -> String {
    let root = root.trim();
    let taken: std::collections::HashSet<String> =
        taken.iter().map(|n| normalize_name(n)).collect();
    (2u32..)
        .map(|v| format!("{} v{}", root, v))
        .find(|candidate| !taken.contains(&normalize_name(candidate)))
        .unwrap_or_else(|| format!("{} v2", root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_name("  Axe "), "axe");
        assert_eq!(normalize_name("AXE"), normalize_name("axe"));
    }

    #[test]
    fn test_version_name_skips_taken() {
        let taken = vec!["Axe".to_string(), "axe V2".to_string()];
        assert_eq!(version_name("Axe", &taken), "Axe v3");
        assert_eq!(version_name(" Lina ", &[]), "Lina v2");
    }

    #[test]
    fn test_display_name_fallback() {
        let mut hero = HeroInput::default();
        hero.fields.name = "   ".to_string();
        assert_eq!(display_name(&hero, 2), "Hero 3");
    }
}
