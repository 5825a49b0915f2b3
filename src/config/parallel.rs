//! Parallelism configuration for repository and cohort fan-out.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

/// Configuration for parallel processing operations.
///
/// Controls how many repositories of a portfolio are scored at once and
/// whether cohorts are ranked concurrently.
///
/// # Example
///
/// ```rust
/// use peerscore::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     max_concurrency: Some(4),
/// };
/// assert_eq!(config.effective_concurrency(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Enable parallel processing (default: true)
    ///
    /// When disabled, repositories are scored sequentially.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Maximum concurrent operations (default: number of CPU cores)
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
        }
    }
}

impl ParallelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Worker count to use: 1 when disabled, otherwise the configured
    /// limit or the number of CPU cores. Never 0.
    pub fn effective_concurrency(&self) -> usize {
        if !self.enabled {
            return 1;
        }
        self.max_concurrency.unwrap_or_else(num_cpus::get).max(1)
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.max_concurrency {
            Some(0) => Err("max_concurrency must be at least 1".to_string()),
            _ => Ok(()),
        }
    }
}
