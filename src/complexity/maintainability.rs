use crate::core::score::clamp_score;

/// Maintainability index on a 0–100 scale.
///
/// `171 − 5.2·ln(V) − 0.23·C − 16.2·ln(LOC)` with the volume term
/// approximated as `V = LOC · ln(functions)`. Logarithms are floored at
/// `ln(1) = 0` so empty files score 100.
pub fn index(lines_of_code: usize, function_count: usize, cyclomatic: f64) -> f64 {
    let loc = lines_of_code as f64;
    let volume = loc * (function_count.max(1) as f64).ln();

    let raw = 171.0 - 5.2 * volume.max(1.0).ln() - 0.23 * cyclomatic - 16.2 * loc.max(1.0).ln();
    clamp_score(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_file_is_fully_maintainable() {
        assert_eq!(index(0, 0, 0.0), 100.0);
    }

    #[test]
    fn test_large_complex_file_bottoms_out() {
        assert_eq!(index(1_000_000, 5_000, 400.0), 0.0);
    }

    #[test]
    fn test_known_value() {
        // 171 - 5.2*ln(100*ln 10) - 0.23*5 - 16.2*ln(100)
        let expected = 171.0 - 5.2 * (100.0 * 10f64.ln()).ln() - 1.15 - 16.2 * 100f64.ln();
        assert!((index(100, 10, 5.0) - expected).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_non_increasing_in_loc(loc in 0usize..50_000, extra in 1usize..5_000, fns in 0usize..500, cc in 0.0f64..50.0) {
            prop_assert!(index(loc + extra, fns, cc) <= index(loc, fns, cc));
        }

        #[test]
        fn prop_non_increasing_in_cyclomatic(loc in 0usize..50_000, fns in 0usize..500, cc in 0.0f64..50.0, extra in 0.0f64..50.0) {
            prop_assert!(index(loc, fns, cc + extra) <= index(loc, fns, cc));
        }

        #[test]
        fn prop_in_range(loc in 0usize..1_000_000, fns in 0usize..10_000, cc in 0.0f64..1_000.0) {
            let mi = index(loc, fns, cc);
            prop_assert!((0.0..=100.0).contains(&mi));
        }
    }
}
