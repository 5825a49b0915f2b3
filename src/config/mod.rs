//! Engine configuration.
//!
//! Every section deserializes with defaults, so a `.peerscore.toml` only
//! needs the values it changes:
//!
//! ```toml
//! [importance]
//! flagship_threshold = 75.0
//!
//! [importance.weights]
//! community = 0.5
//! activity = 0.2
//! size = 0.2
//! quality = 0.1
//!
//! [parallel]
//! max_concurrency = 4
//! ```
//!
//! Config structs are immutable once loaded and are handed to the scorers at
//! construction.

mod loader;
mod parallel;
mod scoring;

pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use parallel::ParallelConfig;
pub use scoring::{
    default_volume_bands, AcidConfig, ImportanceConfig, ImportanceWeights, OverallConfig,
    VolumeBand,
};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub importance: ImportanceConfig,

    #[serde(default)]
    pub acid: AcidConfig,

    #[serde(default)]
    pub overall: OverallConfig,

    #[serde(default)]
    pub parallel: ParallelConfig,
}

impl EngineConfig {
    /// Replace every invalid section with its defaults, logging why.
    ///
    /// Importance weights that are valid but do not sum to exactly 1.0 are
    /// rescaled.
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.importance.validate() {
            warn!("Invalid [importance] config: {}. Using defaults.", e);
            self.importance = ImportanceConfig::default();
        } else {
            self.importance.weights.normalize();
        }
        if let Err(e) = self.acid.validate() {
            warn!("Invalid [acid] config: {}. Using defaults.", e);
            self.acid = AcidConfig::default();
        }
        if let Err(e) = self.overall.validate() {
            warn!("Invalid [overall] config: {}. Using defaults.", e);
            self.overall = OverallConfig::default();
        }
        if let Err(e) = self.parallel.validate() {
            warn!("Invalid [parallel] config: {}. Using defaults.", e);
            self.parallel = ParallelConfig::default();
        }
        self
    }
}
