//! Numeric helpers shared by every scorer.
//!
//! Every score the engine emits lives on the closed interval `[0, 100]` and is
//! rounded to one decimal place. Values arriving from upstream collaborators
//! go through [`sanitize_score`], which clamps out-of-range or non-finite
//! input and logs it instead of propagating it.

use tracing::warn;

/// Lower bound of every score.
pub const MIN_SCORE: f64 = 0.0;
/// Upper bound of every score.
pub const MAX_SCORE: f64 = 100.0;

/// Clamp to `[0, 100]`. NaN maps to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_SCORE;
    }
    value.clamp(MIN_SCORE, MAX_SCORE)
}

/// Round half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Clamp then round: the canonical form of an emitted score.
pub fn finalize_score(value: f64) -> f64 {
    round1(clamp_score(value))
}

/// Clamp an externally supplied score, logging when it had to be corrected.
pub fn sanitize_score(value: f64, what: &str) -> f64 {
    let clamped = clamp_score(value);
    if !value.is_finite() || clamped != value {
        warn!(value, clamped, "{what} outside [0, 100]; clamped");
    }
    clamped
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(150.0), 100.0);
        assert_eq!(clamp_score(42.5), 42.5);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(f64::INFINITY), 100.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(76.04), 76.0);
        assert_eq!(round1(76.06), 76.1);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_sanitize_passes_valid_values() {
        assert_eq!(sanitize_score(63.2, "score"), 63.2);
        assert_eq!(sanitize_score(-1.0, "score"), 0.0);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[10.0, 20.0]), 15.0);
    }

    proptest! {
        #[test]
        fn prop_finalize_in_range(value in proptest::num::f64::ANY) {
            let s = finalize_score(value);
            prop_assert!((0.0..=100.0).contains(&s));
        }
    }
}
