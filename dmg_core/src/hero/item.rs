//! Items: named bundles of modifiers with a gold cost

use crate::expr::{self, Variables};
use crate::modifier::{lenient, Modifier, ModifierSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFields {
    pub name: String,
    pub gold_amount: String,
}

impl Default for ItemFields {
    fn default() -> Self {
        ItemFields {
            name: "Item".to_string(),
            gold_amount: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub item_id: u32,
    pub fields: ItemFields,
    pub notes: String,
    #[serde(with = "lenient")]
    pub modifiers: Vec<Modifier>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Item {
            fields: ItemFields {
                name: name.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    /// Gold cost; negative or invalid amounts count as 0
    pub fn gold(&self, vars: &Variables) -> f64 {
        expr::try_eval(&self.fields.gold_amount, vars).map_or(0.0, |g| g.max(0.0))
    }

    pub fn snapshots(&self, vars: &Variables) -> Vec<ModifierSnapshot> {
        self.modifiers.iter().map(|m| m.snapshot(vars)).collect()
    }
}

fn enabled_default() -> bool {
    true
}

/// An item attached to a hero, which can be switched off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachedItem {
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    #[serde(flatten)]
    pub item: Item,
}

impl From<Item> for AttachedItem {
    fn from(item: Item) -> Self {
        AttachedItem {
            enabled: true,
            item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModifierKind;

    #[test]
    fn test_gold_is_never_negative() {
        let vars = Variables::new();
        let mut item = Item::new("Blade");
        item.fields.gold_amount = "1000 + 450".to_string();
        assert!((item.gold(&vars) - 1450.0).abs() < f64::EPSILON);

        item.fields.gold_amount = "-50".to_string();
        assert_eq!(item.gold(&vars), 0.0);
        item.fields.gold_amount = "lots".to_string();
        assert_eq!(item.gold(&vars), 0.0);
    }

    #[test]
    fn test_attached_item_json() {
        let mut item = Item::new("Desolator");
        item.item_id = 3;
        item.modifiers.push(Modifier::new(ModifierKind::Corruption));

        let attached = AttachedItem::from(item);
        let json = serde_json::to_value(&attached).unwrap();
        assert_eq!(json["enabled"], true);
        assert_eq!(json["item_id"], 3);
        assert_eq!(json["fields"]["name"], "Desolator");
        assert_eq!(json["modifiers"][0]["type"], "Corruption");

        let loaded: AttachedItem = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, attached);
    }

    #[test]
    fn test_enabled_defaults_on() {
        let json = r#"{"item_id": 1, "fields": {"name": "Boots", "gold_amount": "500"}}"#;
        let attached: AttachedItem = serde_json::from_str(json).unwrap();
        assert!(attached.enabled);
        assert_eq!(attached.item.name(), "Boots");
        assert_eq!(attached.item.notes, "");
    }
}
