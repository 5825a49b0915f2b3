use crate::config::{EngineConfig, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const HEADER: &str = "# peerscore configuration\n# Every key is optional; omitted keys keep their defaults.\n\n";

/// Write the default configuration into `dir`, returning the file written.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let body = toml::to_string_pretty(&EngineConfig::default())
        .context("Failed to render default configuration")?;
    fs::write(&config_path, format!("{HEADER}{body}"))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}
