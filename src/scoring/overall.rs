//! Person-level score from a portfolio of repository scores.
//!
//! Only flagship and significant repositories count. The tier averages are
//! blended (flagship weighted higher), then scaled by a volume multiplier
//! that rewards a larger body of important work and discounts a thin one.

use super::importance::Category;
use super::repository::{RepositoryAnalysis, RepositoryScore};
use crate::config::OverallConfig;
use crate::core::score::{finalize_score, mean, round1, sanitize_score};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonScore {
    pub person_id: String,
    pub overall_score: f64,
    pub flagship_average: f64,
    pub significant_average: f64,
    pub flagship_count: usize,
    pub significant_count: usize,
    /// Tier blend before the volume multiplier
    pub base_score: f64,
    /// `2·flagship + significant`
    pub weighted_count: usize,
    pub volume_multiplier: f64,
    /// Pending analyses left out of this score
    pub excluded_pending: usize,
}

#[derive(Debug, Clone, Default)]
pub struct OverallScoreCalculator {
    config: OverallConfig,
}

impl OverallScoreCalculator {
    pub fn new(config: OverallConfig) -> Self {
        Self { config }
    }

    /// Score a person from their repository analyses. Pending entries are
    /// excluded and counted.
    pub fn calculate(&self, person_id: &str, analyses: &[RepositoryAnalysis]) -> PersonScore {
        let analyzed: Vec<&RepositoryScore> =
            analyses.iter().filter_map(RepositoryAnalysis::as_analyzed).collect();
        let excluded_pending = analyses.len() - analyzed.len();
        if excluded_pending > 0 {
            warn!(
                person = person_id,
                pending = excluded_pending,
                "excluding repositories that have not been analyzed"
            );
        }

        PersonScore {
            excluded_pending,
            ..self.calculate_from(person_id, analyzed)
        }
    }

    /// Score a person from repository scores.
    ///
    /// Callers must pass only repositories that were actually analyzed: a
    /// placeholder score for a missing analysis would be averaged in as a
    /// genuine result. Prefer [`Self::calculate`] when the portfolio may be
    /// incomplete.
    pub fn calculate_scores(&self, person_id: &str, scores: &[RepositoryScore]) -> PersonScore {
        self.calculate_from(person_id, scores.iter().collect())
    }

    fn calculate_from(&self, person_id: &str, scores: Vec<&RepositoryScore>) -> PersonScore {
        let tier_scores = |category: Category| -> Vec<f64> {
            scores
                .iter()
                .filter(|s| s.category() == category)
                .map(|s| sanitize_score(s.overall_repo_score, "overall_repo_score"))
                .collect()
        };
        let flagship = tier_scores(Category::Flagship);
        let significant = tier_scores(Category::Significant);

        let flagship_average = mean(&flagship);
        let significant_average = mean(&significant);

        let base_score = match (flagship.is_empty(), significant.is_empty()) {
            (false, false) => {
                self.config.flagship_weight * flagship_average
                    + self.config.significant_weight * significant_average
            }
            (false, true) => flagship_average,
            (true, false) => significant_average,
            (true, true) => 0.0,
        };

        let weighted_count = 2 * flagship.len() + significant.len();
        let volume_multiplier = self.config.volume_multiplier(weighted_count);
        let overall_score = if flagship.is_empty() && significant.is_empty() {
            0.0
        } else {
            finalize_score(base_score * volume_multiplier)
        };

        debug!(
            person = person_id,
            flagship = flagship.len(),
            significant = significant.len(),
            base_score,
            volume_multiplier,
            overall_score,
            "calculated person score"
        );

        PersonScore {
            person_id: person_id.to_string(),
            overall_score,
            flagship_average: round1(flagship_average),
            significant_average: round1(significant_average),
            flagship_count: flagship.len(),
            significant_count: significant.len(),
            base_score: round1(base_score),
            weighted_count,
            volume_multiplier,
            excluded_pending: 0,
        }
    }
}
