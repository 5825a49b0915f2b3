//! Repository quality as four sub-scores.
//!
//! - **Atomicity**: small functions, low branching, modest files
//! - **Consistency**: naming, documentation density and layout
//! - **Isolation**: declared dependencies, module layout, import fan-out
//! - **Durability**: tests, README, license and maintainability
//!
//! Every sub-score is on `[0, 100]`; `overall` is their mean. All five are
//! rounded to one decimal.

pub mod atomicity;
pub mod consistency;
pub mod isolation;
pub mod durability;

use crate::complexity::{ComplexityAnalyzer, ComplexityMetrics};
use crate::config::AcidConfig;
use crate::core::score::{finalize_score, round1};
use crate::core::{RepositoryMetadata, SourceFile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcidScore {
    pub atomicity: f64,
    pub consistency: f64,
    pub isolation: f64,
    pub durability: f64,
    pub overall: f64,
}

impl AcidScore {
    fn from_components(atomicity: f64, consistency: f64, isolation: f64, durability: f64) -> Self {
        let atomicity = finalize_score(atomicity);
        let consistency = finalize_score(consistency);
        let isolation = finalize_score(isolation);
        let durability = finalize_score(durability);
        Self {
            atomicity,
            consistency,
            isolation,
            durability,
            overall: round1((atomicity + consistency + isolation + durability) / 4.0),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AcidScorer {
    config: AcidConfig,
    complexity: ComplexityAnalyzer,
}

impl AcidScorer {
    pub fn new(config: AcidConfig) -> Self {
        Self {
            config,
            complexity: ComplexityAnalyzer::new(),
        }
    }

    /// Score a repository from its files. An empty listing scores zero
    /// across the board.
    pub fn score(&self, files: &[SourceFile], metadata: &RepositoryMetadata) -> AcidScore {
        if files.is_empty() {
            return AcidScore::default();
        }
        let metrics = self.complexity.aggregate(files);
        self.score_with_metrics(files, &metrics, metadata)
    }

    /// Score with complexity metrics the caller already aggregated over
    /// `files`.
    pub fn score_with_metrics(
        &self,
        files: &[SourceFile],
        metrics: &ComplexityMetrics,
        metadata: &RepositoryMetadata,
    ) -> AcidScore {
        if files.is_empty() {
            return AcidScore::default();
        }

        // Nothing to judge structurally without source code
        let has_source = files.iter().any(SourceFile::is_source);
        let atomicity = if has_source { atomicity::score(metrics) } else { 0.0 };
        let consistency = consistency::score(files, &self.config);

        AcidScore::from_components(
            atomicity,
            consistency,
            isolation::score(files),
            durability::score(files, metadata, metrics.maintainability_index),
        )
    }
}
