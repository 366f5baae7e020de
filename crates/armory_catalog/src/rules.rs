use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::{CatalogError, Result};

/// Upper bound on the number of rounds a catalog may declare.
pub const MAX_ROUNDS: u8 = 32;

/// Fixed game-design constants that shape a build.
///
/// Every field has a default, so a catalog file may omit the whole `rules` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundRules {
    /// Number of rounds in a build. Ordinals run from 1 to `round_count`.
    pub round_count: u8,

    /// How many items a single round can hold.
    pub max_items_per_round: u8,

    /// Ordinals on which a power may be picked.
    ///
    /// Example: `[1, 3, 5, 7]`
    pub power_rounds: Vec<u8>,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            round_count: 7,
            max_items_per_round: 6,
            power_rounds: vec![1, 3, 5, 7],
        }
    }
}

impl RoundRules {
    /// All round ordinals, starting at 1.
    pub fn ordinals(&self) -> RangeInclusive<u8> {
        1..=self.round_count
    }

    /// Whether the round with the given ordinal accepts a power.
    pub fn accepts_power(&self, ordinal: u8) -> bool {
        self.power_rounds.contains(&ordinal)
    }

    /// Number of power picks a full build can make.
    pub fn power_slots(&self) -> usize {
        self.power_rounds
            .iter()
            .filter(|ordinal| self.ordinals().contains(ordinal))
            .count()
    }

    pub fn validate(&self) -> Result<()> {
        if self.round_count == 0 || self.round_count > MAX_ROUNDS {
            return Err(CatalogError::InvalidRules(format!(
                "round_count must be between 1 and {MAX_ROUNDS}, got {}",
                self.round_count
            )));
        }

        if self.max_items_per_round == 0 {
            return Err(CatalogError::InvalidRules(
                "max_items_per_round must be at least 1".to_string(),
            ));
        }

        if let Some(ordinal) = self
            .power_rounds
            .iter()
            .find(|ordinal| !self.ordinals().contains(ordinal))
        {
            return Err(CatalogError::InvalidRules(format!(
                "power round {ordinal} is outside rounds 1..={}",
                self.round_count
            )));
        }

        Ok(())
    }
}
