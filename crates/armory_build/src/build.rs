use armory_catalog::{Catalog, Hero, HeroId, Item, PerkId, Power, RoundRules};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, RuleViolation, UnknownReference};

/// Selections made for a single round.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Round {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<PerkId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<PerkId>,
}

impl Round {
    pub fn is_empty(&self) -> bool {
        self.power.is_none() && self.items.is_empty()
    }
}

/// A hero plus the selections made in every round.
///
/// Rounds are stored in order; the round at index `i` has ordinal `i + 1`.
///
/// ```json
/// { "hero": 19, "rounds": [{ "power": 101, "items": [201, 202] }, {}, {}, {}, {}, {}, {}] }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Build {
    pub hero: HeroId,

    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Build {
    /// An empty build for `hero` with one round per ordinal in `rules`.
    pub fn new(hero: HeroId, rules: &RoundRules) -> Self {
        Self {
            hero,
            rounds: vec![Round::default(); rules.round_count as usize],
        }
    }

    pub fn round(&self, ordinal: u8) -> Option<&Round> {
        self.rounds.get(ordinal.checked_sub(1)? as usize)
    }

    pub fn round_mut(&mut self, ordinal: u8) -> Option<&mut Round> {
        self.rounds.get_mut(ordinal.checked_sub(1)? as usize)
    }

    /// Set the power for a round. Ordinals outside the build are ignored.
    pub fn with_power(mut self, ordinal: u8, power: PerkId) -> Self {
        if let Some(round) = self.round_mut(ordinal) {
            round.power = Some(power);
        }
        self
    }

    /// Replace the items of a round. Ordinals outside the build are ignored.
    pub fn with_items(mut self, ordinal: u8, items: impl IntoIterator<Item = PerkId>) -> Self {
        if let Some(round) = self.round_mut(ordinal) {
            round.items = items.into_iter().collect();
        }
        self
    }

    /// Rounds paired with their 1-based ordinal.
    pub fn iter_rounds(&self) -> impl Iterator<Item = (u8, &Round)> {
        (1..=u8::MAX).zip(self.rounds.iter())
    }

    /// Whether no power or item has been picked in any round.
    pub fn is_empty(&self) -> bool {
        self.rounds.iter().all(Round::is_empty)
    }

    /// Check the build against a catalog.
    ///
    /// Unknown heroes, powers and items are reported before any rule is
    /// checked, so a build that references missing content never surfaces as a
    /// rule violation.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        self.resolve(catalog)?;
        self.check_rules(catalog)
    }

    /// Look up every selection in the catalog.
    ///
    /// Only references are checked here; use [`Build::validate`] for the round
    /// rules.
    pub fn resolve<'c>(&self, catalog: &'c Catalog) -> Result<ResolvedBuild<'c>> {
        let hero = catalog
            .hero(self.hero)
            .ok_or(UnknownReference::Hero(self.hero))?;

        let mut rounds = Vec::with_capacity(self.rounds.len());
        for (ordinal, round) in self.iter_rounds() {
            let power = match round.power {
                Some(power) => Some(catalog.power(self.hero, power).ok_or(
                    UnknownReference::Power {
                        hero: self.hero,
                        power,
                    },
                )?),
                None => None,
            };

            let items = round
                .items
                .iter()
                .map(|&item| {
                    catalog.item(self.hero, item).ok_or(UnknownReference::Item {
                        hero: self.hero,
                        item,
                    })
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rounds.push(ResolvedRound {
                ordinal,
                power,
                items,
            });
        }

        Ok(ResolvedBuild { hero, rounds })
    }

    fn check_rules(&self, catalog: &Catalog) -> Result<()> {
        let rules = catalog.rules();
        if self.rounds.len() != rules.round_count as usize {
            return Err(RuleViolation::RoundCount {
                expected: rules.round_count,
                found: self.rounds.len(),
            }
            .into());
        }

        let mut powers = HashSet::new();
        let mut items = HashSet::new();
        for (ordinal, round) in self.iter_rounds() {
            if let Some(power) = round.power {
                if !rules.accepts_power(ordinal) {
                    return Err(RuleViolation::PowerNotAllowed {
                        round: ordinal,
                        power,
                    }
                    .into());
                }
                if !powers.insert(power) {
                    return Err(RuleViolation::DuplicatePower(power).into());
                }
            }

            if round.items.len() > rules.max_items_per_round as usize {
                return Err(RuleViolation::TooManyItems {
                    round: ordinal,
                    count: round.items.len(),
                    capacity: rules.max_items_per_round,
                }
                .into());
            }

            for &item in &round.items {
                let stackable = catalog
                    .item(self.hero, item)
                    .is_some_and(|item| item.stackable);
                if !items.insert(item) && !stackable {
                    return Err(RuleViolation::DuplicateItem(item).into());
                }
            }
        }

        Ok(())
    }
}

/// A build with every identifier replaced by its catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBuild<'c> {
    pub hero: &'c Hero,
    pub rounds: Vec<ResolvedRound<'c>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRound<'c> {
    pub ordinal: u8,
    pub power: Option<&'c Power>,
    pub items: Vec<&'c Item>,
}

impl ResolvedRound<'_> {
    /// Total price of the round's items, in credits.
    pub fn cost(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.price))
    }
}
