//! Reference catalog for the Armory build planner.
//!
//! A catalog lists every hero together with the powers and items that can be
//! picked for it, plus the [`RoundRules`] that shape a build. It is loaded once
//! from JSON and is read-only afterwards; callers pass `&Catalog` to whatever
//! needs to resolve identifiers.
//!
//! # Example
//!
//! ```no_run
//! use armory_catalog::Catalog;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::from_path("data/catalog.json")?;
//! let dva = catalog.hero(19).expect("hero exists");
//! for power in dva.powers() {
//!     println!("{}: {}", power.id, power.name);
//! }
//! # Ok(())
//! # }
//! ```

use camino::Utf8Path;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::Read;

pub mod document;
pub mod error;
mod hero;
mod perk;
mod rules;

pub use document::{CatalogDocument, HeroDocument, ItemTiers};
pub use error::{CatalogError, Result};
pub use hero::*;
pub use perk::{
    Attribute, AttributeType, AttributeValue, Item, ItemCategory, Perk, PerkId, PerkKind, Power,
    Rarity,
};
pub use rules::*;

use perk::sort_by_position;

pub(crate) fn serde_fmt<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let json = serde_json::to_string(value).map_err(|_| fmt::Error)?;
    let s: String = serde_json::from_str(&json).map_err(|_| fmt::Error)?;
    f.write_str(&s)
}

/// Where an item visible to a hero lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemSlot {
    Hero(usize),
    Basic(usize),
}

/// The validated, indexed catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    rules: RoundRules,
    attribute_types: BTreeMap<String, AttributeType>,
    basic_items: Vec<Item>,

    /// Sorted by role, then position, then id.
    heroes: Vec<Hero>,

    hero_index: HashMap<HeroId, usize>,
    power_index: HashMap<(HeroId, PerkId), usize>,
    item_index: HashMap<(HeroId, PerkId), ItemSlot>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading catalog from {}", path);

        let contents = std::fs::read_to_string(path.as_std_path())?;
        Self::from_json_str(&contents)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Validate a parsed document and build the lookup indexes.
    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        document.rules.validate()?;
        if document.heroes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let basic_items = document.basic_items.into_items();
        if let Some(item) = basic_items.iter().find(|item| item.id == 0) {
            return Err(CatalogError::ReservedId(format!(
                "basic item '{}'",
                item.name
            )));
        }

        let mut heroes = document
            .heroes
            .into_iter()
            .map(build_hero)
            .collect::<Result<Vec<_>>>()?;
        heroes.sort_by_key(|hero| (hero.role, hero.position.unwrap_or(u32::MAX), hero.id));

        let mut hero_index = HashMap::with_capacity(heroes.len());
        let mut power_index = HashMap::new();
        let mut item_index = HashMap::new();

        for (index, hero) in heroes.iter().enumerate() {
            if hero_index.insert(hero.id, index).is_some() {
                return Err(CatalogError::DuplicateHero(hero.id));
            }

            for (index, power) in hero.powers.iter().enumerate() {
                if power_index.insert((hero.id, power.id), index).is_some() {
                    return Err(CatalogError::DuplicatePower {
                        hero: hero.id,
                        power: power.id,
                    });
                }
            }

            let hero_items = hero
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| (item.id, ItemSlot::Hero(index)));
            let shared_items = basic_items
                .iter()
                .enumerate()
                .map(|(index, item)| (item.id, ItemSlot::Basic(index)));

            for (id, slot) in hero_items.chain(shared_items) {
                if item_index.insert((hero.id, id), slot).is_some() {
                    return Err(CatalogError::DuplicateItem {
                        hero: hero.id,
                        item: id,
                    });
                }
            }
        }

        tracing::info!(
            "Loaded catalog {} ({} heroes, {} basic items)",
            document.version,
            heroes.len(),
            basic_items.len()
        );

        Ok(Self {
            version: document.version,
            rules: document.rules,
            attribute_types: document.attribute_types,
            basic_items,
            heroes,
            hero_index,
            power_index,
            item_index,
        })
    }

    /// Version label of the game content.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    /// All heroes, ordered by role, then display position.
    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    /// Roles that have at least one hero, in display order.
    pub fn roles(&self) -> Vec<HeroRole> {
        let mut roles: Vec<_> = self.heroes.iter().map(|hero| hero.role).collect();
        roles.dedup();
        roles
    }

    pub fn heroes_with_role(&self, role: HeroRole) -> impl Iterator<Item = &Hero> {
        self.heroes.iter().filter(move |hero| hero.role == role)
    }

    /// Items every hero can buy.
    pub fn basic_items(&self) -> &[Item] {
        &self.basic_items
    }

    pub fn hero(&self, hero: HeroId) -> Option<&Hero> {
        self.hero_index.get(&hero).map(|&index| &self.heroes[index])
    }

    /// Resolve a power in the given hero's catalog entry.
    pub fn power(&self, hero: HeroId, power: PerkId) -> Option<&Power> {
        let index = *self.power_index.get(&(hero, power))?;
        self.hero(hero).map(|hero| &hero.powers[index])
    }

    /// Resolve an item the given hero can buy, hero-specific or basic.
    pub fn item(&self, hero: HeroId, item: PerkId) -> Option<&Item> {
        match *self.item_index.get(&(hero, item))? {
            ItemSlot::Hero(index) => self.hero(hero).map(|hero| &hero.items[index]),
            ItemSlot::Basic(index) => self.basic_items.get(index),
        }
    }

    /// Display name of an attribute type, or the key itself when unknown.
    pub fn attribute_name<'a>(&'a self, kind: &'a str) -> &'a str {
        self.attribute_types
            .get(kind)
            .map(|attribute_type| attribute_type.name.as_str())
            .unwrap_or(kind)
    }
}

fn build_hero(document: HeroDocument) -> Result<Hero> {
    if document.id == 0 {
        return Err(CatalogError::ReservedId(format!("hero '{}'", document.name)));
    }

    let mut powers = document.powers;
    sort_by_position(&mut powers, |power| power.position);
    if let Some(power) = powers.iter().find(|power| power.id == 0) {
        return Err(CatalogError::ReservedId(format!(
            "power '{}' of hero {}",
            power.name, document.id
        )));
    }

    let items = document.items.into_items();
    if let Some(item) = items.iter().find(|item| item.id == 0) {
        return Err(CatalogError::ReservedId(format!(
            "item '{}' of hero {}",
            item.name, document.id
        )));
    }

    Ok(Hero {
        id: document.id,
        name: document.name,
        role: document.role,
        position: document.position,
        powers,
        items,
    })
}
