use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::error::{MalformedToken, Result};
use crate::token::read_token;
use crate::{Build, BuildCodec};

impl BuildCodec<'_> {
    /// Decode a token back into a validated build.
    ///
    /// Surrounding whitespace is ignored. Errors are reported in a fixed
    /// order: a token that cannot be parsed is malformed even if it also names
    /// unknown content, and unknown content is reported before rule
    /// violations.
    pub fn decode(&self, token: &str) -> Result<Build> {
        let result = self.decode_trimmed(token.trim());
        match &result {
            Ok(build) => tracing::debug!(hero = build.hero, "Decoded build token"),
            Err(error) => tracing::warn!("Rejected build token: {}", error),
        }
        result
    }

    fn decode_trimmed(&self, token: &str) -> Result<Build> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|error| MalformedToken::Encoding(error.to_string()))?;
        let body = read_token(&bytes)?;

        let expected = self.catalog.rules().round_count;
        if body.rounds.len() != expected as usize {
            return Err(MalformedToken::RoundCount {
                expected,
                found: body.rounds.len() as u8,
            }
            .into());
        }

        let build = body.into_build();
        build.validate(self.catalog)?;
        Ok(build)
    }
}
