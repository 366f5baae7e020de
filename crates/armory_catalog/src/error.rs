//! Error types for catalog loading.

use thiserror::Error;

use crate::{HeroId, PerkId};

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading or validating a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid catalog JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog declares no heroes, so nothing can be decoded against it.
    #[error("Catalog contains no heroes")]
    Empty,

    /// Identifier `0` marks "no power" in build tokens and cannot name an entry.
    #[error("Identifier 0 is reserved: {0}")]
    ReservedId(String),

    #[error("Duplicate hero id: {0}")]
    DuplicateHero(HeroId),

    #[error("Duplicate power id {power} for hero {hero}")]
    DuplicatePower { hero: HeroId, power: PerkId },

    /// Two items visible to the same hero share an id (hero items and basic items
    /// share one namespace).
    #[error("Duplicate item id {item} for hero {hero}")]
    DuplicateItem { hero: HeroId, item: PerkId },

    #[error("Invalid round rules: {0}")]
    InvalidRules(String),
}
