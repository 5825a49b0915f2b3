//! Portfolio scoring: fan repositories out, fan results in, then score the
//! person.
//!
//! Repositories are scored independently on a bounded rayon pool. The person
//! score is only calculated once every repository has finished, so it always
//! sees the complete set. A repository whose scoring panics is reported as
//! [`RepositoryAnalysis::Pending`] and left out of the person score.

use crate::config::{EngineConfig, ParallelConfig};
use crate::core::{RepositoryMetadata, SourceFile};
use crate::scoring::{OverallScoreCalculator, PersonScore, RepositoryAnalysis, RepositoryScorer};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{error, info, warn};

/// Rayon worker stack size for deeply nested syntax trees
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// One repository to score: its metadata and decoded file listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInput {
    pub metadata: RepositoryMetadata,
    #[serde(default, deserialize_with = "deserialize_files")]
    pub files: Vec<SourceFile>,
}

/// A person and the repositories to score for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub person_id: String,
    #[serde(default)]
    pub repositories: Vec<RepositoryInput>,
}

/// File listings may omit `language` and `size_bytes`.
fn deserialize_files<'de, D>(deserializer: D) -> Result<Vec<SourceFile>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|value| SourceFile::from_json_lenient(value).map_err(serde::de::Error::custom))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioScore {
    /// One entry per input repository, in input order
    pub analyses: Vec<RepositoryAnalysis>,
    pub person: PersonScore,
}

#[derive(Debug, Clone, Default)]
pub struct PortfolioScorer {
    repository: RepositoryScorer,
    overall: OverallScoreCalculator,
    parallel: ParallelConfig,
}

impl PortfolioScorer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            repository: RepositoryScorer::new(config),
            overall: OverallScoreCalculator::new(config.overall.clone()),
            parallel: config.parallel.clone(),
        }
    }

    fn analyze_one(&self, input: &RepositoryInput, reference_time: DateTime<Utc>) -> RepositoryAnalysis {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.repository
                .score(&input.metadata, &input.files, reference_time)
        }));
        match outcome {
            Ok(score) => RepositoryAnalysis::Analyzed(score),
            Err(_) => {
                error!(
                    repository = %input.metadata.id,
                    "repository scoring panicked; leaving it pending"
                );
                RepositoryAnalysis::Pending {
                    repository_id: input.metadata.id.clone(),
                }
            }
        }
    }

    /// Score every repository, then the person.
    pub fn score(
        &self,
        person_id: &str,
        inputs: &[RepositoryInput],
        reference_time: DateTime<Utc>,
    ) -> PortfolioScore {
        for input in inputs.iter().filter(|i| i.metadata.owner_id != person_id) {
            warn!(
                repository = %input.metadata.id,
                owner = %input.metadata.owner_id,
                person = person_id,
                "repository owner differs from the person being scored"
            );
        }

        let analyses = self.analyze_all(inputs, reference_time);
        let person = self.overall.calculate(person_id, &analyses);
        info!(
            person = person_id,
            repositories = inputs.len(),
            overall_score = person.overall_score,
            "scored portfolio"
        );
        PortfolioScore { analyses, person }
    }

    fn analyze_all(&self, inputs: &[RepositoryInput], reference_time: DateTime<Utc>) -> Vec<RepositoryAnalysis> {
        let workers = self.parallel.effective_concurrency();
        if workers <= 1 || inputs.len() <= 1 {
            return inputs
                .iter()
                .map(|input| self.analyze_one(input, reference_time))
                .collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .stack_size(WORKER_STACK_SIZE)
            .build();
        match pool {
            Ok(pool) => pool.install(|| {
                inputs
                    .par_iter()
                    .map(|input| self.analyze_one(input, reference_time))
                    .collect()
            }),
            Err(e) => {
                warn!("Failed to build scoring pool: {}. Scoring sequentially.", e);
                inputs
                    .iter()
                    .map(|input| self.analyze_one(input, reference_time))
                    .collect()
            }
        }
    }
}

/// Score a portfolio with `config`.
pub fn score_portfolio(
    person_id: &str,
    inputs: &[RepositoryInput],
    reference_time: DateTime<Utc>,
    config: &EngineConfig,
) -> PortfolioScore {
    PortfolioScorer::new(config).score(person_id, inputs, reference_time)
}
