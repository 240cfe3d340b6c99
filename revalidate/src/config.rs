//! Revalidator configuration.
//!
//! ```yaml
//! parser:
//!   etag_suffixes: ["-gzip", "-br"]
//! response:
//!   public: true
//!   max_age: 300
//!   vary: [accept-encoding]
//! ```

use revalidate_http::{ParserConfig, ResponseDirectives};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be parsed into a [`Config`].
    #[error("invalid revalidate configuration: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conditional header parsing.
    pub parser: ParserConfig,
    /// Cache headers attached to `200` and `304` responses.
    pub response: ResponseDirectives,
}

impl Config {
    /// Parses a YAML document. Missing sections take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_saphyr::from_str(yaml)?)
    }
}
