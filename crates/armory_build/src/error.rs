//! Error types for build validation and token decoding.
//!
//! Every rejection falls in one of three categories (see [`ErrorKind`]):
//! the token itself is unreadable, it names content the catalog does not
//! have, or it is readable and resolvable but breaks the round rules.

use armory_catalog::{HeroId, PerkId};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Coarse classification of a [`CodecError`], for picking user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Malformed,
    UnknownReference,
    RuleViolation,
    Internal,
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Malformed build token: {0}")]
    Malformed(#[from] MalformedToken),

    #[error("Build uses content that is not in the catalog: {0}")]
    UnknownReference(#[from] UnknownReference),

    #[error("Build breaks the round rules: {0}")]
    RuleViolation(#[from] RuleViolation),

    /// Writing into an in-memory buffer failed.
    #[error("Failed to write build token: {0}")]
    Write(#[from] binrw::Error),
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Malformed(_) => ErrorKind::Malformed,
            CodecError::UnknownReference(_) => ErrorKind::UnknownReference,
            CodecError::RuleViolation(_) => ErrorKind::RuleViolation,
            CodecError::Write(_) => ErrorKind::Internal,
        }
    }
}

/// The token could not be parsed into a build at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedToken {
    #[error("not URL-safe base64 ({0})")]
    Encoding(String),

    #[error("only {0} bytes long")]
    TooShort(usize),

    #[error("unsupported token version {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch (expected {expected:#010x}, found {found:#010x})")]
    ChecksumMismatch { expected: u32, found: u32 },

    #[error("ends in the middle of a field")]
    Truncated,

    #[error("{0} unexpected bytes after the last round")]
    TrailingBytes(usize),

    #[error("expected {expected} rounds, found {found}")]
    RoundCount { expected: u8, found: u8 },

    #[error("{0}")]
    Body(String),
}

/// A well-formed identifier that the catalog does not know.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnknownReference {
    #[error("hero {0}")]
    Hero(HeroId),

    #[error("power {power} for hero {hero}")]
    Power { hero: HeroId, power: PerkId },

    #[error("item {item} for hero {hero}")]
    Item { hero: HeroId, item: PerkId },
}

/// Every identifier resolves, but the selections break a round rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("build has {found} rounds, expected {expected}")]
    RoundCount { expected: u8, found: usize },

    #[error("round {round} does not accept a power (got power {power})")]
    PowerNotAllowed { round: u8, power: PerkId },

    #[error("round {round} holds {count} items, the limit is {capacity}")]
    TooManyItems { round: u8, count: usize, capacity: u8 },

    #[error("power {0} is picked more than once")]
    DuplicatePower(PerkId),

    #[error("item {0} is not stackable and is picked more than once")]
    DuplicateItem(PerkId),
}
