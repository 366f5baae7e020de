//! Binary layout of a build token.
//!
//! Version 1, all integers little-endian:
//!
//! | field         | type          |
//! |---------------|---------------|
//! | version       | `u8` (= 1)    |
//! | hero id       | `u16`         |
//! | round count   | `u8`          |
//! | rounds        | round records |
//! | checksum      | `u32`         |
//!
//! A round record is a `u16` power id (0 for no power), a `u8` item count and
//! that many `u16` item ids. The checksum is the low 32 bits of the xxh3 hash
//! of every byte before it. The whole buffer is then encoded as URL-safe
//! base64 without padding.

use binrw::{binrw, BinRead, BinWrite};
use byteorder::{ByteOrder, WriteBytesExt, LE};
use std::io::{Cursor, Write};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::MalformedToken;
use crate::{Build, Round};

/// Current token format version.
pub const TOKEN_VERSION: u8 = 1;

/// Power id written for a round without a power.
pub const NO_POWER: u16 = 0;

pub(crate) const CHECKSUM_SIZE: usize = 4;

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TokenBody {
    pub hero: u16,

    #[br(temp)]
    #[bw(calc = rounds.len() as u8)]
    round_count: u8,
    #[br(count = round_count)]
    pub rounds: Vec<RoundRecord>,
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoundRecord {
    pub power: u16,

    #[br(temp)]
    #[bw(calc = items.len() as u8)]
    item_count: u8,
    #[br(count = item_count)]
    pub items: Vec<u16>,
}

impl TokenBody {
    pub fn from_build(build: &Build) -> Self {
        Self {
            hero: build.hero,
            rounds: build.rounds.iter().map(RoundRecord::from_round).collect(),
        }
    }

    pub fn into_build(self) -> Build {
        Build {
            hero: self.hero,
            rounds: self.rounds.into_iter().map(RoundRecord::into_round).collect(),
        }
    }
}

impl RoundRecord {
    fn from_round(round: &Round) -> Self {
        Self {
            power: round.power.unwrap_or(NO_POWER),
            items: round.items.clone(),
        }
    }

    fn into_round(self) -> Round {
        Round {
            power: (self.power != NO_POWER).then_some(self.power),
            items: self.items,
        }
    }
}

pub(crate) fn checksum(bytes: &[u8]) -> u32 {
    xxh3_64(bytes) as u32
}

/// Serialize a build into raw token bytes, checksum included.
///
/// Counts are written as `u8`; callers validate the build first so the round
/// and item counts fit.
pub(crate) fn write_token(build: &Build) -> Result<Vec<u8>, binrw::Error> {
    let mut writer = Cursor::new(Vec::new());
    writer.write_all(&[TOKEN_VERSION])?;
    TokenBody::from_build(build).write(&mut writer)?;

    let mut bytes = writer.into_inner();
    let checksum = checksum(&bytes);
    bytes.write_u32::<LE>(checksum)?;
    Ok(bytes)
}

/// Parse raw token bytes.
pub(crate) fn read_token(bytes: &[u8]) -> Result<TokenBody, MalformedToken> {
    let Some(&version) = bytes.first() else {
        return Err(MalformedToken::TooShort(0));
    };

    match version {
        TOKEN_VERSION => read_token_v1(bytes),
        version => Err(MalformedToken::UnsupportedVersion(version)),
    }
}

fn read_token_v1(bytes: &[u8]) -> Result<TokenBody, MalformedToken> {
    if bytes.len() < 1 + CHECKSUM_SIZE {
        return Err(MalformedToken::TooShort(bytes.len()));
    }

    let (payload, trailer) = bytes.split_at(bytes.len() - CHECKSUM_SIZE);
    let expected = checksum(payload);
    let found = LE::read_u32(trailer);
    if expected != found {
        return Err(MalformedToken::ChecksumMismatch { expected, found });
    }

    let body = &payload[1..];
    let mut reader = Cursor::new(body);
    let token = TokenBody::read(&mut reader).map_err(|error| {
        if error.is_eof() {
            MalformedToken::Truncated
        } else {
            MalformedToken::Body(error.to_string())
        }
    })?;

    let trailing = body.len() - reader.position() as usize;
    if trailing > 0 {
        return Err(MalformedToken::TrailingBytes(trailing));
    }

    Ok(token)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Append a valid checksum to hand-written token bytes.
    pub(crate) fn seal(mut bytes: Vec<u8>) -> Vec<u8> {
        let checksum = checksum(&bytes);
        bytes.extend_from_slice(&checksum.to_le_bytes());
        bytes
    }

    fn sample_build() -> Build {
        Build {
            hero: 19,
            rounds: vec![
                Round {
                    power: Some(101),
                    items: vec![201, 202],
                },
                Round::default(),
            ],
        }
    }

    #[test]
    fn test_layout() {
        let bytes = write_token(&sample_build()).unwrap();

        #[rustfmt::skip]
        let expected_payload: [u8; 14] = [
            1,                    // version
            19, 0,                // hero
            2,                    // round count
            101, 0, 2, 201, 0, 202, 0,
            0, 0, 0,
        ];
        assert_eq!(&bytes[..bytes.len() - CHECKSUM_SIZE], &expected_payload);
        assert_eq!(bytes, seal(expected_payload.to_vec()));
    }

    #[test]
    fn test_read_written_token() {
        let build = sample_build();
        let bytes = write_token(&build).unwrap();

        let body = read_token(&bytes).unwrap();
        assert_eq!(body.into_build(), build);
    }

    #[test]
    fn test_no_power_marker() {
        let round = RoundRecord {
            power: NO_POWER,
            items: vec![],
        }
        .into_round();
        assert_eq!(round, Round::default());
    }

    #[test]
    fn test_too_short() {
        assert_eq!(read_token(&[]), Err(MalformedToken::TooShort(0)));
        assert_eq!(read_token(&[1, 0, 0]), Err(MalformedToken::TooShort(3)));
    }

    #[test]
    fn test_unsupported_version() {
        let bytes = seal(vec![2, 19, 0, 0]);
        assert_eq!(read_token(&bytes), Err(MalformedToken::UnsupportedVersion(2)));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut bytes = write_token(&sample_build()).unwrap();
        bytes[1] = 20;

        assert!(matches!(
            read_token(&bytes),
            Err(MalformedToken::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_truncated_body() {
        // Two rounds announced, only one present
        let bytes = seal(vec![1, 19, 0, 2, 0, 0, 0]);
        assert_eq!(read_token(&bytes), Err(MalformedToken::Truncated));

        // Item count larger than the remaining bytes
        let bytes = seal(vec![1, 19, 0, 1, 0, 0, 3, 201, 0]);
        assert_eq!(read_token(&bytes), Err(MalformedToken::Truncated));
    }

    #[test]
    fn test_trailing_bytes() {
        let bytes = seal(vec![1, 19, 0, 1, 0, 0, 0, 0xFF, 0xFF]);
        assert_eq!(read_token(&bytes), Err(MalformedToken::TrailingBytes(2)));
    }
}
