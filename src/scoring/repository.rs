//! Per-repository join of complexity, quality and importance.

use super::acid::{AcidScore, AcidScorer};
use super::importance::{Category, ImportanceScore, ImportanceScorer};
use crate::complexity::{ComplexityAnalyzer, ComplexityMetrics};
use crate::config::EngineConfig;
use crate::core::{RepositoryMetadata, SourceFile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug_span;

/// Everything the engine knows about one analyzed repository.
///
/// Always recomputed as a whole from its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryScore {
    pub repository_id: String,
    pub owner_id: String,
    pub acid: AcidScore,
    pub complexity: ComplexityMetrics,
    pub importance: ImportanceScore,
    /// Quality of the repository as it counts toward its owner
    pub overall_repo_score: f64,
}

impl RepositoryScore {
    pub fn category(&self) -> Category {
        self.importance.category
    }
}

/// Analysis state of a repository in a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepositoryAnalysis {
    /// Not analyzed (yet); never counts as a zero score
    Pending { repository_id: String },
    Analyzed(RepositoryScore),
}

impl RepositoryAnalysis {
    pub fn repository_id(&self) -> &str {
        match self {
            RepositoryAnalysis::Pending { repository_id } => repository_id,
            RepositoryAnalysis::Analyzed(score) => &score.repository_id,
        }
    }

    pub fn as_analyzed(&self) -> Option<&RepositoryScore> {
        match self {
            RepositoryAnalysis::Analyzed(score) => Some(score),
            RepositoryAnalysis::Pending { .. } => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RepositoryAnalysis::Pending { .. })
    }
}

impl From<RepositoryScore> for RepositoryAnalysis {
    fn from(score: RepositoryScore) -> Self {
        RepositoryAnalysis::Analyzed(score)
    }
}

/// Scores one repository end to end.
#[derive(Debug, Clone, Default)]
pub struct RepositoryScorer {
    complexity: ComplexityAnalyzer,
    acid: AcidScorer,
    importance: ImportanceScorer,
}

impl RepositoryScorer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            complexity: ComplexityAnalyzer::new(),
            acid: AcidScorer::new(config.acid.clone()),
            importance: ImportanceScorer::new(config.importance.clone()),
        }
    }

    pub fn score(
        &self,
        metadata: &RepositoryMetadata,
        files: &[SourceFile],
        reference_time: DateTime<Utc>,
    ) -> RepositoryScore {
        let _span = debug_span!("score_repository", repository = %metadata.id).entered();

        let complexity = self.complexity.aggregate(files);
        let acid = self.acid.score_with_metrics(files, &complexity, metadata);
        let importance = self.importance.score(metadata, reference_time);

        RepositoryScore {
            repository_id: metadata.id.clone(),
            owner_id: metadata.owner_id.clone(),
            overall_repo_score: acid.overall,
            acid,
            complexity,
            importance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_repo_score_is_acid_overall() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let meta = RepositoryMetadata::new("r1", "alice", at);
        let files = vec![SourceFile::new("src/main.rs", "fn main() {\n    println!(\"hi\");\n}\n")];

        let score = RepositoryScorer::default().score(&meta, &files, at);
        assert_eq!(score.repository_id, "r1");
        assert_eq!(score.owner_id, "alice");
        assert_eq!(score.overall_repo_score, score.acid.overall);
        assert_eq!(score.complexity.function_count, 1);
    }

    #[test]
    fn test_empty_repository_scores_zero_quality() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let meta = RepositoryMetadata::new("empty", "bob", at);
        let score = RepositoryScorer::default().score(&meta, &[], at);
        assert_eq!(score.overall_repo_score, 0.0);
        assert_eq!(score.complexity.files_analyzed, 0);
    }

    #[test]
    fn test_analysis_serializes_with_status_tag() {
        let pending = RepositoryAnalysis::Pending {
            repository_id: "r9".into(),
        };
        let json = serde_json::to_value(&pending).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["repository_id"], "r9");
        assert!(pending.is_pending());
        assert_eq!(pending.repository_id(), "r9");
        assert!(pending.as_analyzed().is_none());
    }
}
