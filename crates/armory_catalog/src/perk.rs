use serde::{Deserialize, Serialize};
use std::fmt;

use crate::serde_fmt;

/// Stable identifier of a power or item.
pub type PerkId = u16;

/// Capability shared by powers and items.
pub trait Perk {
    fn id(&self) -> PerkId;
    fn name(&self) -> &str;
    fn attributes(&self) -> &[Attribute];
    fn kind(&self) -> PerkKind;
}

/// The slot a perk can be picked into.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PerkKind {
    Power,
    Item,
}

impl fmt::Display for PerkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serde_fmt(self, f)
    }
}

/// Rarity tier of an item. Item lists in the catalog file are grouped by tier.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serde_fmt(self, f)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Weapon,
    Ability,
    Survival,
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serde_fmt(self, f)
    }
}

/// Value carried by an attribute: a numeric stat or a line of description.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(untagged)]
pub enum AttributeValue {
    Stat(f64),
    Description(String),
}

/// A typed stat or description entry on a perk.
///
/// Example: `{ "type": "WP", "value": 10, "unit": "%" }`
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Attribute {
    /// Attribute type key, resolved to a display name through the catalog's
    /// `attribute_types` table.
    #[serde(rename = "type")]
    pub kind: String,

    pub value: AttributeValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Attribute {
    /// The numeric value, if this is a stat attribute.
    pub fn stat(&self) -> Option<f64> {
        match self.value {
            AttributeValue::Stat(value) => Some(value),
            AttributeValue::Description(_) => None,
        }
    }

    /// The text, if this is a description attribute.
    pub fn description(&self) -> Option<&str> {
        match &self.value {
            AttributeValue::Stat(_) => None,
            AttributeValue::Description(text) => Some(text),
        }
    }
}

/// Display information for an attribute type key.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct AttributeType {
    pub name: String,
}

/// A perk that goes into a round's power slot.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Power {
    pub id: PerkId,
    pub name: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,

    /// Display order inside the hero's power list. Entries without a position
    /// are listed last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

/// A purchasable perk that goes into a round's item slots.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Item {
    pub id: PerkId,
    pub name: String,

    /// Price in credits.
    pub price: u32,

    pub category: ItemCategory,

    /// Filled in from the tier the item is listed under.
    #[serde(default)]
    pub rarity: Rarity,

    /// Whether the item may be picked more than once in a build.
    #[serde(default)]
    pub stackable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl Perk for Power {
    fn id(&self) -> PerkId {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
    fn kind(&self) -> PerkKind {
        PerkKind::Power
    }
}

impl Perk for Item {
    fn id(&self) -> PerkId {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
    fn kind(&self) -> PerkKind {
        PerkKind::Item
    }
}

/// Stable sort by display position; entries without one keep their relative
/// order at the end.
pub(crate) fn sort_by_position<T>(entries: &mut [T], position: impl Fn(&T) -> Option<u32>) {
    entries.sort_by_key(|entry| position(entry).unwrap_or(u32::MAX));
}
