use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use duel_core::Config;
use tracing::info;

/// Load the match configuration, falling back to defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::new());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config =
        parse_config(&text).with_context(|| format!("invalid config {}", path.display()))?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Parse a TOML configuration; missing fields keep their defaults
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text)?;
    config.resolve()?;
    Ok(config)
}
