//! On-disk shape of a catalog file.
//!
//! These types mirror the JSON exactly. [`Catalog::from_document`](crate::Catalog::from_document)
//! turns a document into the validated, indexed runtime catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::perk::sort_by_position;
use crate::{AttributeType, HeroId, HeroRole, Item, Power, Rarity, RoundRules};

/// Describes a catalog file
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct CatalogDocument {
    /// Version label of the game content this catalog describes.
    ///
    /// Example: `season-16.2`
    pub version: String,

    #[serde(default)]
    pub rules: RoundRules,

    /// Display names for attribute type keys
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attribute_types: BTreeMap<String, AttributeType>,

    /// Items every hero can buy
    #[serde(default)]
    pub basic_items: ItemTiers,

    pub heroes: Vec<HeroDocument>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct HeroDocument {
    pub id: HeroId,
    pub name: String,
    pub role: HeroRole,

    /// Display order among heroes of the same role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,

    #[serde(default)]
    pub powers: Vec<Power>,

    #[serde(default)]
    pub items: ItemTiers,
}

/// Item lists keyed by rarity tier.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct ItemTiers {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common: Vec<Item>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rare: Vec<Item>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub epic: Vec<Item>,
}

impl ItemTiers {
    /// Flatten the tiers into one list, tagging every item with the rarity of
    /// the tier it was listed under. Each tier is sorted by display position.
    pub fn into_items(self) -> Vec<Item> {
        let tiers = [
            (Rarity::Common, self.common),
            (Rarity::Rare, self.rare),
            (Rarity::Epic, self.epic),
        ];

        let mut items = Vec::new();
        for (rarity, mut tier) in tiers {
            sort_by_position(&mut tier, |item| item.position);
            items.extend(tier.into_iter().map(|item| Item { rarity, ..item }));
        }
        items
    }
}
