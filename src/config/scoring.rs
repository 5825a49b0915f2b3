use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

fn is_valid_weight(weight: f64) -> bool {
    (0.0..=1.0).contains(&weight)
}

fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
    if is_valid_weight(weight) {
        Ok(())
    } else {
        Err(format!("{name} weight must be between 0.0 and 1.0"))
    }
}

fn validate_weights_sum(weights: &[f64], what: &str) -> Result<(), String> {
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(format!("{what} weights must sum to 1.0, but sum to {sum:.3}"));
    }
    Ok(())
}

/// Weights of the four importance components.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportanceWeights {
    /// Stars, forks and watchers
    #[serde(default = "default_community_weight")]
    pub community: f64,

    /// Recency of the last update
    #[serde(default = "default_activity_weight")]
    pub activity: f64,

    /// Repository size on disk
    #[serde(default = "default_size_weight")]
    pub size: f64,

    /// README, license, description and topics
    #[serde(default = "default_quality_weight")]
    pub quality: f64,
}

impl Default for ImportanceWeights {
    fn default() -> Self {
        Self {
            community: default_community_weight(),
            activity: default_activity_weight(),
            size: default_size_weight(),
            quality: default_quality_weight(),
        }
    }
}

impl ImportanceWeights {
    pub fn validate(&self) -> Result<(), String> {
        validate_weight(self.community, "Community")?;
        validate_weight(self.activity, "Activity")?;
        validate_weight(self.size, "Size")?;
        validate_weight(self.quality, "Quality")?;
        validate_weights_sum(
            &[self.community, self.activity, self.size, self.quality],
            "Importance",
        )
    }

    /// Rescale so the weights sum to exactly 1.0.
    pub fn normalize(&mut self) {
        let sum = self.community + self.activity + self.size + self.quality;
        if sum > 0.0 && (sum - 1.0).abs() > f64::EPSILON {
            self.community /= sum;
            self.activity /= sum;
            self.size /= sum;
            self.quality /= sum;
        }
    }
}

pub fn default_community_weight() -> f64 {
    0.40
}
pub fn default_activity_weight() -> f64 {
    0.30
}
pub fn default_size_weight() -> f64 {
    0.20
}
pub fn default_quality_weight() -> f64 {
    0.10
}

/// Importance weights and tier thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportanceConfig {
    #[serde(default)]
    pub weights: ImportanceWeights,

    /// Scores at or above this are flagship
    #[serde(default = "default_flagship_threshold")]
    pub flagship_threshold: f64,

    /// Scores at or above this (and below flagship) are significant
    #[serde(default = "default_significant_threshold")]
    pub significant_threshold: f64,
}

impl Default for ImportanceConfig {
    fn default() -> Self {
        Self {
            weights: ImportanceWeights::default(),
            flagship_threshold: default_flagship_threshold(),
            significant_threshold: default_significant_threshold(),
        }
    }
}

impl ImportanceConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.weights.validate()?;
        if !(0.0..=100.0).contains(&self.significant_threshold)
            || !(0.0..=100.0).contains(&self.flagship_threshold)
        {
            return Err("tier thresholds must be between 0 and 100".to_string());
        }
        if self.flagship_threshold <= self.significant_threshold {
            return Err(format!(
                "flagship_threshold ({}) must be above significant_threshold ({})",
                self.flagship_threshold, self.significant_threshold
            ));
        }
        Ok(())
    }
}

pub fn default_flagship_threshold() -> f64 {
    70.0
}
pub fn default_significant_threshold() -> f64 {
    50.0
}

/// Tunables for the consistency sub-score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcidConfig {
    /// Lines longer than this many characters count as long
    #[serde(default = "default_long_line_limit")]
    pub long_line_limit: usize,

    /// Share of single-letter identifiers above which naming is penalized
    #[serde(default = "default_single_letter_ratio")]
    pub single_letter_ratio: f64,

    /// Multiplier applied to the naming score when penalized
    #[serde(default = "default_single_letter_penalty")]
    pub single_letter_penalty: f64,
}

impl Default for AcidConfig {
    fn default() -> Self {
        Self {
            long_line_limit: default_long_line_limit(),
            single_letter_ratio: default_single_letter_ratio(),
            single_letter_penalty: default_single_letter_penalty(),
        }
    }
}

impl AcidConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.long_line_limit == 0 {
            return Err("long_line_limit must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.single_letter_ratio) {
            return Err("single_letter_ratio must be between 0.0 and 1.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.single_letter_penalty) {
            return Err("single_letter_penalty must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}

pub fn default_long_line_limit() -> usize {
    120
}
pub fn default_single_letter_ratio() -> f64 {
    0.30
}
pub fn default_single_letter_penalty() -> f64 {
    0.70
}

/// One row of the portfolio volume table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VolumeBand {
    /// Inclusive upper bound on the weighted repository count
    pub up_to: usize,
    pub multiplier: f64,
}

/// Tier weights and the volume multiplier table for person scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverallConfig {
    #[serde(default = "default_flagship_weight")]
    pub flagship_weight: f64,

    #[serde(default = "default_significant_weight")]
    pub significant_weight: f64,

    /// Bands in ascending `up_to` order
    #[serde(default = "default_volume_bands")]
    pub volume_bands: Vec<VolumeBand>,

    /// Multiplier beyond the last band
    #[serde(default = "default_beyond_multiplier")]
    pub beyond_multiplier: f64,
}

impl Default for OverallConfig {
    fn default() -> Self {
        Self {
            flagship_weight: default_flagship_weight(),
            significant_weight: default_significant_weight(),
            volume_bands: default_volume_bands(),
            beyond_multiplier: default_beyond_multiplier(),
        }
    }
}

impl OverallConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_weight(self.flagship_weight, "Flagship")?;
        validate_weight(self.significant_weight, "Significant")?;
        validate_weights_sum(&[self.flagship_weight, self.significant_weight], "Tier")?;

        if self
            .volume_bands
            .windows(2)
            .any(|pair| pair[0].up_to >= pair[1].up_to)
        {
            return Err("volume_bands must have strictly ascending up_to bounds".to_string());
        }
        let multipliers = self
            .volume_bands
            .iter()
            .map(|band| band.multiplier)
            .chain(std::iter::once(self.beyond_multiplier));
        for multiplier in multipliers {
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(format!("volume multiplier {multiplier} must be positive"));
            }
        }
        Ok(())
    }

    /// Multiplier for a weighted repository count.
    pub fn volume_multiplier(&self, weighted_count: usize) -> f64 {
        self.volume_bands
            .iter()
            .find(|band| weighted_count <= band.up_to)
            .map(|band| band.multiplier)
            .unwrap_or(self.beyond_multiplier)
    }
}

pub fn default_flagship_weight() -> f64 {
    0.60
}
pub fn default_significant_weight() -> f64 {
    0.40
}
pub fn default_volume_bands() -> Vec<VolumeBand> {
    [(2, 0.85), (5, 0.95), (10, 1.00), (20, 1.05), (30, 1.08)]
        .into_iter()
        .map(|(up_to, multiplier)| VolumeBand { up_to, multiplier })
        .collect()
}
pub fn default_beyond_multiplier() -> f64 {
    1.10
}
