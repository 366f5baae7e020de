//! Builds and shareable build tokens for the Armory build planner.
//!
//! A [`Build`] is a hero plus the power and items picked in every round.
//! [`BuildCodec`] turns a build into a short URL-safe token and back,
//! checking every selection against an [`armory_catalog::Catalog`].
//!
//! ```no_run
//! use armory_build::{Build, BuildCodec};
//! use armory_catalog::Catalog;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::from_path("data/catalog.json")?;
//! let codec = BuildCodec::new(&catalog);
//!
//! let build = Build::new(19, catalog.rules())
//!     .with_power(1, 101)
//!     .with_items(1, [201, 202]);
//! let token = codec.encode(&build)?;
//! assert_eq!(codec.decode(&token)?, build);
//! # Ok(())
//! # }
//! ```

use armory_catalog::Catalog;

mod build;
pub mod error;
mod link;
mod read;
pub mod stats;
mod token;
mod write;

pub use build::*;
pub use error::{CodecError, ErrorKind, MalformedToken, Result, RuleViolation, UnknownReference};
pub use link::*;
pub use token::{NO_POWER, TOKEN_VERSION};

/// Encodes and decodes build tokens against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct BuildCodec<'c> {
    pub(crate) catalog: &'c Catalog,
}

impl<'c> BuildCodec<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tests::seal;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    fn catalog() -> Catalog {
        Catalog::from_json_str(include_str!("../../armory_catalog/test-data/catalog.json"))
            .unwrap()
    }

    /// Encode hand-written token bytes, sealing them with a valid checksum.
    fn raw_token(bytes: Vec<u8>) -> String {
        URL_SAFE_NO_PAD.encode(seal(bytes))
    }

    /// Token bytes for hero 19 with seven rounds, the first one customized.
    fn first_round_bytes(hero: u16, power: u16, items: &[u16]) -> Vec<u8> {
        let mut bytes = vec![TOKEN_VERSION];
        bytes.extend_from_slice(&hero.to_le_bytes());
        bytes.push(7);
        bytes.extend_from_slice(&power.to_le_bytes());
        bytes.push(items.len() as u8);
        for item in items {
            bytes.extend_from_slice(&item.to_le_bytes());
        }
        for _ in 1..7 {
            bytes.extend_from_slice(&[0, 0, 0]);
        }
        bytes
    }

    #[test]
    fn test_encode_decode_example_build() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);
        let build = Build::new(19, catalog.rules())
            .with_power(1, 101)
            .with_items(1, [201, 202]);

        let token = codec.encode(&build).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        // 33 bytes: header, one filled round, six empty rounds and checksum
        assert_eq!(token.len(), 44);

        assert_eq!(codec.decode(&token).unwrap(), build);
        assert_eq!(token, raw_token(first_round_bytes(19, 101, &[201, 202])));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);
        let build = Build::new(22, catalog.rules())
            .with_power(3, 121)
            .with_items(3, [251, 904]);

        let token = codec.encode(&build).unwrap();
        assert_eq!(codec.encode(&build).unwrap(), token);

        let decoded = codec.decode(&token).unwrap();
        assert_eq!(codec.encode(&decoded).unwrap(), token);
    }

    #[test]
    fn test_decode_trims_whitespace() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);
        let build = Build::new(29, catalog.rules());
        let token = codec.encode(&build).unwrap();

        assert_eq!(codec.decode(&format!("  {token}\n")).unwrap(), build);
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);

        for token in ["", "   ", "not-a-valid-token", "AQ==", "!!!!"] {
            let error = codec.decode(token).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Malformed, "token {token:?}");
        }
    }

    #[test]
    fn test_decode_rejects_tampered_token() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);
        let token = codec
            .encode(&Build::new(19, catalog.rules()).with_items(2, [203]))
            .unwrap();

        let mut bytes = URL_SAFE_NO_PAD.decode(&token).unwrap();
        bytes[1] = 5;
        let tampered = URL_SAFE_NO_PAD.encode(bytes);

        assert!(matches!(
            codec.decode(&tampered),
            Err(CodecError::Malformed(MalformedToken::ChecksumMismatch { .. }))
        ));
    }

    #[test]
    fn test_decode_wrong_round_count_is_malformed() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);
        let token = raw_token(vec![TOKEN_VERSION, 19, 0, 2, 0, 0, 0, 0, 0, 0]);

        assert!(matches!(
            codec.decode(&token),
            Err(CodecError::Malformed(MalformedToken::RoundCount {
                expected: 7,
                found: 2
            }))
        ));
    }

    #[test]
    fn test_decode_unknown_hero() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);
        let token = raw_token(first_round_bytes(99, 0, &[]));

        assert!(matches!(
            codec.decode(&token),
            Err(CodecError::UnknownReference(UnknownReference::Hero(99)))
        ));
    }

    #[test]
    fn test_decode_unknown_perks() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);

        let token = raw_token(first_round_bytes(19, 131, &[]));
        assert!(matches!(
            codec.decode(&token),
            Err(CodecError::UnknownReference(UnknownReference::Power {
                hero: 19,
                power: 131
            }))
        ));

        let token = raw_token(first_round_bytes(19, 101, &[201, 4242]));
        assert!(matches!(
            codec.decode(&token),
            Err(CodecError::UnknownReference(UnknownReference::Item {
                hero: 19,
                item: 4242
            }))
        ));
    }

    #[test]
    fn test_decode_capacity_exceeded() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);
        let token = raw_token(first_round_bytes(
            19,
            101,
            &[201, 202, 203, 204, 205, 206, 207],
        ));

        assert!(matches!(
            codec.decode(&token),
            Err(CodecError::RuleViolation(RuleViolation::TooManyItems {
                round: 1,
                count: 7,
                capacity: 6
            }))
        ));
    }

    #[test]
    fn test_decode_power_in_ineligible_round() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);

        let mut bytes = vec![TOKEN_VERSION, 19, 0, 7];
        bytes.extend_from_slice(&[0, 0, 0]);
        bytes.extend_from_slice(&[102, 0, 0]);
        for _ in 2..7 {
            bytes.extend_from_slice(&[0, 0, 0]);
        }

        assert!(matches!(
            codec.decode(&raw_token(bytes)),
            Err(CodecError::RuleViolation(RuleViolation::PowerNotAllowed {
                round: 2,
                power: 102
            }))
        ));
    }

    #[test]
    fn test_decode_repeated_items() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);

        let token = raw_token(first_round_bytes(19, 0, &[201, 201]));
        assert!(matches!(
            codec.decode(&token),
            Err(CodecError::RuleViolation(RuleViolation::DuplicateItem(201)))
        ));

        let token = raw_token(first_round_bytes(19, 0, &[210, 210, 905, 905]));
        let build = codec.decode(&token).unwrap();
        assert_eq!(build.rounds[0].items, vec![210, 210, 905, 905]);
    }

    #[test]
    fn test_encode_rejects_invalid_build() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);

        let error = codec
            .encode(&Build::new(19, catalog.rules()).with_power(4, 101))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::RuleViolation);

        let error = codec
            .encode(&Build::new(1000, catalog.rules()))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnknownReference);

        let error = codec
            .encode(&Build {
                hero: 19,
                rounds: vec![],
            })
            .unwrap_err();
        assert!(matches!(
            error,
            CodecError::RuleViolation(RuleViolation::RoundCount {
                expected: 7,
                found: 0
            })
        ));
    }

    #[test]
    fn test_error_messages() {
        let catalog = catalog();
        let codec = BuildCodec::new(&catalog);

        let error = codec.decode(&raw_token(first_round_bytes(99, 0, &[]))).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Build uses content that is not in the catalog: hero 99"
        );
    }
}
