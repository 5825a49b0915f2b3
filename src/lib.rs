// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod common;
pub mod complexity;
pub mod config;
pub mod core;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod ranking;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{Error, Language, RepositoryMetadata, Result, SourceFile};

pub use crate::complexity::{ComplexityAnalyzer, ComplexityMetrics, LanguageAnalyzer};

pub use crate::config::{load_config, load_config_file, EngineConfig};

pub use crate::scoring::{
    AcidScore, AcidScorer, Category, ImportanceScore, ImportanceScorer, OverallScoreCalculator,
    PersonScore, RepositoryAnalysis, RepositoryScore, RepositoryScorer,
};

pub use crate::ranking::{
    rank_all, rank_cohort, rank_cohort_checked, CohortScore, CohortStatistics, Leaderboard,
    LeaderboardRegistry, RankingEntry,
};

pub use crate::pipeline::{score_portfolio, Portfolio, PortfolioScore, RepositoryInput};
