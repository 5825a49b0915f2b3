pub mod acid;
pub mod importance;
pub mod overall;
pub mod repository;

pub use acid::{AcidScore, AcidScorer};
pub use importance::{Category, ImportanceScore, ImportanceScorer};
pub use overall::{OverallScoreCalculator, PersonScore};
pub use repository::{RepositoryAnalysis, RepositoryScore, RepositoryScorer};
