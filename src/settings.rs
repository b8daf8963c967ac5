use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::shard::OutputFormat;

pub const DEFAULT_CHARS_PER_FILE: usize = 100_000_000;
pub const DEFAULT_PREFIX: &str = "namu";

/// Run defaults, overridable through `NAMU_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub chars_per_file: usize,
    pub prefix: String,
    pub threads: Option<usize>,
    pub format: OutputFormat,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix("NAMU").try_parsing(true))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("chars_per_file", DEFAULT_CHARS_PER_FILE as u64)?
            .set_default("prefix", DEFAULT_PREFIX)?
            .set_default("format", "text")?
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
