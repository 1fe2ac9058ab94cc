use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::logging;

/// Prefix for environment variable overrides, e.g. `INK_DATABASE__URI`.
pub const ENV_PREFIX: &str = "INK";

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// The log level to use, this is a tracing env filter
    pub level: String,

    /// What logging mode we should use
    pub mode: logging::Mode,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            mode: logging::Mode::Default,
        }
    }
}

/// Parses a config struct from an optional config file layered under
/// `INK_`-prefixed environment variables. Missing keys fall back to the
/// struct's serde defaults. Returns the config and the file that was
/// actually used, if any.
pub fn parse<C: DeserializeOwned + Default>(
    enable_env: bool,
    config_file: Option<String>,
) -> Result<(C, Option<String>)> {
    let mut builder = config::Config::builder();

    let config_file = config_file.filter(|file| config_file_exists(file));
    if let Some(file) = &config_file {
        builder = builder.add_source(config::File::with_name(file));
    }

    if enable_env {
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );
    }

    let config = builder
        .build()
        .context("failed to build config sources")?
        .try_deserialize()
        .context("failed to deserialize config")?;

    Ok((config, config_file))
}

fn config_file_exists(file: &str) -> bool {
    // `config::File::with_name` probes for any supported extension when the
    // name has none, so we have to do the same here.
    let path = Path::new(file);
    if path.extension().is_some() {
        return path.exists();
    }

    ["toml", "yaml", "yml", "json"]
        .iter()
        .any(|ext| path.with_extension(ext).exists())
}
