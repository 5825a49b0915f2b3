//! CLI command implementations.
//!
//! - **repo**: score one local repository checkout
//! - **person**: score a portfolio of repositories and their owner
//! - **rank**: turn cohort scores into leaderboards
//! - **init**: write a default `.peerscore.toml`
//!
//! Commands return their rendered output so callers decide where it goes.

pub mod init;
pub mod person;
pub mod rank;
pub mod repo;

pub use init::init_config;
pub use person::score_person;
pub use rank::{rank_cohorts, render_table};
pub use repo::score_repository;

use crate::config::{load_config, load_config_file, EngineConfig};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Explicit config files must load; otherwise discover one or use defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    match explicit {
        Some(path) => Ok(load_config_file(path)?),
        None => Ok(load_config()),
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} {}", what, path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {} {}", what, path.display()))
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}
