//! Per-round totals for displaying a resolved build.

use armory_catalog::Attribute;
use std::collections::BTreeMap;

use crate::{ResolvedBuild, ResolvedRound};

/// Sum of one attribute type's stat values.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTotal {
    pub value: f64,

    /// Unit of the first attribute that contributed to the total.
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub ordinal: u8,
    pub power: Option<String>,
    pub item_count: usize,

    /// Item cost in credits.
    pub cost: u32,

    /// Stat totals keyed by attribute type. Description attributes are skipped.
    pub stats: BTreeMap<String, StatTotal>,
}

impl RoundSummary {
    pub fn from_round(round: &ResolvedRound<'_>) -> Self {
        let mut stats = BTreeMap::new();
        let attributes = round
            .power
            .iter()
            .flat_map(|power| power.attributes.iter())
            .chain(round.items.iter().flat_map(|item| item.attributes.iter()));
        for attribute in attributes {
            add_stat(&mut stats, attribute);
        }

        Self {
            ordinal: round.ordinal,
            power: round.power.map(|power| power.name.clone()),
            item_count: round.items.len(),
            cost: round.cost(),
            stats,
        }
    }
}

fn add_stat(stats: &mut BTreeMap<String, StatTotal>, attribute: &Attribute) {
    let Some(value) = attribute.stat() else {
        return;
    };

    stats
        .entry(attribute.kind.clone())
        .and_modify(|total| total.value += value)
        .or_insert_with(|| StatTotal {
            value,
            unit: attribute.unit.clone(),
        });
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub hero: String,
    pub rounds: Vec<RoundSummary>,
}

impl BuildSummary {
    pub fn from_resolved(build: &ResolvedBuild<'_>) -> Self {
        Self {
            hero: build.hero.name().to_string(),
            rounds: build.rounds.iter().map(RoundSummary::from_round).collect(),
        }
    }

    /// The loadout the build ends on.
    pub fn final_round(&self) -> Option<&RoundSummary> {
        self.rounds.last()
    }

    /// The round with the highest item cost. Ties go to the earlier round;
    /// `None` when nothing was bought.
    pub fn most_expensive_round(&self) -> Option<&RoundSummary> {
        self.rounds
            .iter()
            .rev()
            .filter(|round| round.cost > 0)
            .max_by_key(|round| round.cost)
    }

    /// Sum of every round's cost.
    pub fn total_cost(&self) -> u64 {
        self.rounds.iter().map(|round| u64::from(round.cost)).sum()
    }
}
