use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::EngineConfig;
use crate::core::{Error, Result, ResultExt};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = ".peerscore.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML string and replace invalid sections with defaults.
pub fn parse_and_validate_config(contents: &str) -> Result<EngineConfig> {
    let config = toml::from_str::<EngineConfig>(contents)?;
    Ok(config.sanitized())
}

/// Load an explicitly named config file. Any read or parse failure is an
/// error.
pub fn load_config_file(path: &Path) -> Result<EngineConfig> {
    let contents = read_config_file(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;
    let config = parse_and_validate_config(&contents)
        .context(format!("Failed to parse {}", path.display()))?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<EngineConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // A missing file just means keep looking
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("Invalid {}: {}. Using defaults.", config_path.display(), e);
            None
        }
    }
}

/// `start` and its ancestors, nearest first, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover `.peerscore.toml` from `start` upwards.
pub fn load_config_from(start: &Path) -> EngineConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            EngineConfig::default()
        })
}

/// Discover `.peerscore.toml` from the current directory upwards.
pub fn load_config() -> EngineConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(&dir),
        Err(e) => {
            warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            EngineConfig::default()
        }
    }
}
