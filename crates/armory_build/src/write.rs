use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::error::Result;
use crate::token::write_token;
use crate::{Build, BuildCodec};

impl BuildCodec<'_> {
    /// Encode a build into a shareable token.
    ///
    /// The build is validated against the catalog first; an invalid build
    /// fails with the same error a token holding it would produce on decode.
    pub fn encode(&self, build: &Build) -> Result<String> {
        build.validate(self.catalog)?;

        let bytes = write_token(build)?;
        let token = URL_SAFE_NO_PAD.encode(bytes);

        tracing::debug!(hero = build.hero, length = token.len(), "Encoded build token");
        Ok(token)
    }
}
