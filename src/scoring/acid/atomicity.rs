//! Atomicity: are units of code small and focused?
//!
//! Four bands of 25 points each over the aggregated complexity metrics.

use crate::complexity::ComplexityMetrics;

pub fn score(metrics: &ComplexityMetrics) -> f64 {
    function_size_points(metrics.average_function_length)
        + cyclomatic_points(metrics.cyclomatic_complexity)
        + file_size_points(average_file_loc(metrics))
        + function_class_ratio_points(metrics.function_count, metrics.class_count)
}

fn average_file_loc(metrics: &ComplexityMetrics) -> f64 {
    metrics.lines_of_code as f64 / metrics.files_analyzed.max(1) as f64
}

pub fn function_size_points(average_function_length: f64) -> f64 {
    match average_function_length {
        l if l <= 20.0 => 25.0,
        l if l <= 50.0 => 20.0,
        l if l <= 100.0 => 15.0,
        l if l <= 200.0 => 10.0,
        _ => 5.0,
    }
}

pub fn cyclomatic_points(cyclomatic: f64) -> f64 {
    match cyclomatic {
        c if c <= 5.0 => 25.0,
        c if c <= 10.0 => 20.0,
        c if c <= 15.0 => 15.0,
        c if c <= 20.0 => 10.0,
        _ => 5.0,
    }
}

pub fn file_size_points(average_file_loc: f64) -> f64 {
    match average_file_loc {
        l if l <= 200.0 => 25.0,
        l if l <= 500.0 => 20.0,
        l if l <= 1000.0 => 15.0,
        _ => 10.0,
    }
}

pub fn function_class_ratio_points(functions: usize, classes: usize) -> f64 {
    if classes == 0 {
        return 20.0;
    }
    let ratio = functions as f64 / classes as f64;
    if (2.0..=10.0).contains(&ratio) {
        25.0
    } else if (1.0..=15.0).contains(&ratio) {
        20.0
    } else {
        15.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn metrics(avg_fn: f64, cyclomatic: f64, loc: usize, files: usize, fns: usize, classes: usize) -> ComplexityMetrics {
        ComplexityMetrics {
            cyclomatic_complexity: cyclomatic,
            average_function_length: avg_fn,
            lines_of_code: loc,
            files_analyzed: files,
            function_count: fns,
            class_count: classes,
            ..ComplexityMetrics::default()
        }
    }

    #[test]
    fn test_small_focused_code_scores_full() {
        assert_eq!(score(&metrics(12.0, 2.5, 300, 3, 25, 5)), 100.0);
    }

    #[test]
    fn test_large_tangled_code_scores_low() {
        // 5 + 5 + 10 + 15
        assert_eq!(score(&metrics(400.0, 30.0, 5000, 2, 12, 40)), 35.0);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(function_size_points(20.0), 25.0);
        assert_eq!(function_size_points(20.1), 20.0);
        assert_eq!(cyclomatic_points(5.0), 25.0);
        assert_eq!(cyclomatic_points(20.0), 10.0);
        assert_eq!(cyclomatic_points(20.5), 5.0);
        assert_eq!(file_size_points(1000.0), 15.0);
        assert_eq!(file_size_points(1000.5), 10.0);
    }

    #[test]
    fn test_function_class_ratio() {
        assert_eq!(function_class_ratio_points(10, 0), 20.0);
        assert_eq!(function_class_ratio_points(10, 2), 25.0);
        assert_eq!(function_class_ratio_points(3, 2), 20.0);
        assert_eq!(function_class_ratio_points(1, 2), 15.0);
        assert_eq!(function_class_ratio_points(40, 2), 15.0);
    }

    proptest! {
        #[test]
        fn prop_higher_cyclomatic_never_raises_atomicity(cc in 0.0f64..40.0, extra in 0.0f64..40.0) {
            let low = score(&metrics(30.0, cc, 1000, 5, 20, 4));
            let high = score(&metrics(30.0, cc + extra, 1000, 5, 20, 4));
            prop_assert!(high <= low);
        }
    }
}
