use super::{read_json, to_json};
use crate::config::EngineConfig;
use crate::core::RepositoryMetadata;
use crate::io::RepositoryWalker;
use crate::scoring::{RepositoryScore, RepositoryScorer};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Load a checkout from disk and score it.
pub fn score_repository(
    root: &Path,
    metadata_path: &Path,
    reference_time: DateTime<Utc>,
    max_file_bytes: u64,
    config: &EngineConfig,
) -> Result<RepositoryScore> {
    let metadata: RepositoryMetadata = read_json(metadata_path, "metadata")?;
    let files = RepositoryWalker::new(root)
        .with_max_file_bytes(max_file_bytes)
        .walk()
        .with_context(|| format!("Failed to load repository {}", root.display()))?;

    Ok(RepositoryScorer::new(config).score(&metadata, &files, reference_time))
}

pub fn render(score: &RepositoryScore) -> Result<String> {
    to_json(score)
}
