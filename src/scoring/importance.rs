//! Repository importance from metadata alone.
//!
//! Importance decides how much a repository counts toward its owner's
//! person score. It blends four components, each on a 0–100 scale:
//!
//! - **community**: `2·stars + 5·forks + watchers` on a log scale that
//!   reaches 100 at a raw value of 100
//! - **activity**: step function of days since the last update
//! - **size**: step function of the repository size in KB
//! - **quality**: README, license, a real description and topics

use crate::config::ImportanceConfig;
use crate::core::score::{clamp_score, finalize_score};
use crate::core::RepositoryMetadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Importance tier of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Flagship,
    Significant,
    Supporting,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Flagship => write!(f, "flagship"),
            Category::Significant => write!(f, "significant"),
            Category::Supporting => write!(f, "supporting"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceScore {
    pub score: f64,
    pub category: Category,
    pub community: f64,
    pub activity: f64,
    pub size: f64,
    pub quality: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ImportanceScorer {
    config: ImportanceConfig,
}

impl ImportanceScorer {
    pub fn new(config: ImportanceConfig) -> Self {
        Self { config }
    }

    /// Score `metadata` as of `reference_time`.
    pub fn score(
        &self,
        metadata: &RepositoryMetadata,
        reference_time: DateTime<Utc>,
    ) -> ImportanceScore {
        let community = community_score(metadata);
        let activity = activity_score(metadata.updated_at, reference_time);
        let size = size_score(metadata.size_kb);
        let quality = quality_score(metadata);

        let weights = &self.config.weights;
        let score = finalize_score(
            weights.community * community
                + weights.activity * activity
                + weights.size * size
                + weights.quality * quality,
        );

        ImportanceScore {
            score,
            category: self.categorize(score),
            community: finalize_score(community),
            activity: finalize_score(activity),
            size,
            quality,
        }
    }

    /// Tier for an importance score.
    pub fn categorize(&self, score: f64) -> Category {
        if score >= self.config.flagship_threshold {
            Category::Flagship
        } else if score >= self.config.significant_threshold {
            Category::Significant
        } else {
            Category::Supporting
        }
    }
}

pub fn community_score(metadata: &RepositoryMetadata) -> f64 {
    let raw = 2.0 * metadata.stars as f64 + 5.0 * metadata.forks as f64 + metadata.watchers as f64;
    clamp_score(100.0 * (raw + 1.0).log10() / 101f64.log10())
}

pub fn activity_score(updated_at: DateTime<Utc>, reference_time: DateTime<Utc>) -> f64 {
    let days = reference_time
        .signed_duration_since(updated_at)
        .num_days()
        .max(0);

    match days {
        d if d < 30 => 100.0,
        d if d < 90 => 90.0,
        d if d < 180 => 75.0,
        d if d < 365 => 60.0,
        d => {
            let years = d as f64 / 365.0;
            (60.0 - 10.0 * (years - 1.0)).max(0.0)
        }
    }
}

pub fn size_score(size_kb: u64) -> f64 {
    match size_kb {
        s if s >= 10_000 => 100.0,
        s if s >= 5_000 => 90.0,
        s if s >= 1_000 => 80.0,
        s if s >= 500 => 70.0,
        s if s >= 100 => 60.0,
        _ => 50.0,
    }
}

pub fn quality_score(metadata: &RepositoryMetadata) -> f64 {
    let mut score = 0.0;
    if metadata.has_readme {
        score += 25.0;
    }
    if metadata.has_license() {
        score += 25.0;
    }
    let described = metadata
        .description
        .as_deref()
        .is_some_and(|d| d.trim().chars().count() > 10);
    if described {
        score += 25.0;
    }
    score += (5.0 * metadata.topics.len() as f64).min(25.0);
    score
}
