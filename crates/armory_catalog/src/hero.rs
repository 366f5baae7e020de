use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{serde_fmt, Item, Power, Rarity};

/// Stable identifier of a hero.
pub type HeroId = u16;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HeroRole {
    Tank,
    Damage,
    Support,
}

impl fmt::Display for HeroRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serde_fmt(self, f)
    }
}

/// A hero and everything that can be picked for it.
///
/// Heroes are only created by [`Catalog`](crate::Catalog) while loading, which
/// guarantees the power and item lists are sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub(crate) id: HeroId,
    pub(crate) name: String,
    pub(crate) role: HeroRole,
    pub(crate) position: Option<u32>,
    pub(crate) powers: Vec<Power>,
    pub(crate) items: Vec<Item>,
}

impl Hero {
    pub fn id(&self) -> HeroId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> HeroRole {
        self.role
    }

    pub fn position(&self) -> Option<u32> {
        self.position
    }

    /// The hero's powers in display order.
    pub fn powers(&self) -> &[Power] {
        &self.powers
    }

    /// The hero's own items, grouped by rarity then display order.
    /// Basic items shared by every hero are not included.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_of_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.rarity == rarity)
    }
}
