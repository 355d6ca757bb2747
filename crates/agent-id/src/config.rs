//! Configuration loading and validation for the `agent-id` CLI.

use anyhow::{Context, Result};
use common::CodecError;
use identifier_codec::IdentifierCodec;
use serde::Deserialize;

/// Validated CLI configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// AES-256 key used to decrypt identifiers; 32 bytes of UTF-8. **Required.**
    pub identifier_key: String,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pretty-print JSON output instead of one document per line.
    #[serde(default)]
    pub output_pretty: bool,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build agent-id configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise agent-id configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.identifier_key.is_empty() {
            anyhow::bail!("IDENTIFIER_KEY is required and must not be empty");
        }
        Ok(())
    }

    /// Build the codec from `IDENTIFIER_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Configuration`] unless the key is 32 UTF-8 bytes.
    pub fn codec(&self) -> Result<IdentifierCodec, CodecError> {
        IdentifierCodec::from_key_str(&self.identifier_key)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("identifier_key", &"[REDACTED]")
            .field("log_level", &self.log_level)
            .field("output_pretty", &self.output_pretty)
            .finish()
    }
}
