//! Structural complexity metrics for source files.
//!
//! [`ComplexityAnalyzer::analyze`] measures one file and
//! [`ComplexityAnalyzer::aggregate`] folds a repository's files into a single
//! [`ComplexityMetrics`]. Structure (functions, classes, per-function
//! cyclomatic complexity) comes from a [`LanguageAnalyzer`] picked from a
//! closed lookup table; cognitive complexity, line counts and the
//! maintainability index are computed the same way for every language.
//!
//! A file whose syntax tree cannot be built is never dropped: it degrades to
//! [`GenericHeuristicAnalyzer`] and still counts toward the aggregate.

pub mod cognitive;
pub mod cyclomatic;
pub mod languages;
pub mod maintainability;
pub mod syntax_tree;

use crate::core::SourceFile;
use crate::metrics::LocCounter;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use languages::{
    analyzer_for, GenericHeuristicAnalyzer, JavaScriptAnalyzer, LanguageAnalyzer, PythonAnalyzer,
    RustAnalyzer, StructuralMetrics,
};

/// Complexity metrics for one file or an aggregate of files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    /// Mean per-function cyclomatic complexity
    pub cyclomatic_complexity: f64,
    /// Nesting-weighted decision count
    pub cognitive_complexity: f64,
    /// 0–100, higher is easier to maintain
    pub maintainability_index: f64,
    pub lines_of_code: usize,
    pub function_count: usize,
    pub class_count: usize,
    pub average_function_length: f64,
    pub max_function_complexity: u32,
    pub comment_lines: usize,
    /// Files folded into these metrics
    pub files_analyzed: usize,
    /// Files measured by the heuristic fallback rather than a syntax tree
    pub heuristic_files: usize,
}

impl Default for ComplexityMetrics {
    /// No code, nothing to penalize.
    fn default() -> Self {
        Self {
            cyclomatic_complexity: 0.0,
            cognitive_complexity: 0.0,
            maintainability_index: 100.0,
            lines_of_code: 0,
            function_count: 0,
            class_count: 0,
            average_function_length: 0.0,
            max_function_complexity: 0,
            comment_lines: 0,
            files_analyzed: 0,
            heuristic_files: 0,
        }
    }
}

/// Stateless per-file and per-repository complexity analysis.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComplexityAnalyzer;

impl ComplexityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Measure a single file.
    pub fn analyze(&self, file: &SourceFile) -> ComplexityMetrics {
        let loc = LocCounter::count(&file.content, file.language);

        let (structure, heuristic) = match analyzer_for(file.language).analyze_structure(file) {
            Ok(structure) => (structure, structure.heuristic),
            Err(err) => {
                debug!(
                    path = %file.path.display(),
                    error = %err,
                    "syntax tree unavailable, falling back to heuristic analysis"
                );
                (GenericHeuristicAnalyzer.measure(file), true)
            }
        };

        let cyclomatic = structure.cyclomatic;
        let cognitive = cognitive::estimate(&file.content, file.language) as f64;
        let maintainability = maintainability::index(
            loc.code_lines,
            structure.function_count,
            cyclomatic,
        );

        ComplexityMetrics {
            cyclomatic_complexity: cyclomatic,
            cognitive_complexity: cognitive,
            maintainability_index: maintainability,
            lines_of_code: loc.code_lines,
            function_count: structure.function_count,
            class_count: structure.class_count,
            average_function_length: loc.code_lines as f64
                / structure.function_count.max(1) as f64,
            max_function_complexity: structure.max_function_complexity,
            comment_lines: loc.comment_lines,
            files_analyzed: 1,
            heuristic_files: usize::from(heuristic),
        }
    }

    /// Measure every source file of a repository and fold the results.
    ///
    /// Non-source files (docs, data, assets) are skipped. Zero source files
    /// yield [`ComplexityMetrics::default`].
    pub fn aggregate(&self, files: &[SourceFile]) -> ComplexityMetrics {
        let per_file: Vec<ComplexityMetrics> = files
            .par_iter()
            .filter(|f| f.is_source())
            .map(|f| self.analyze(f))
            .collect();
        Self::combine(&per_file)
    }

    /// Fold already-measured files: counts sum, complexity and
    /// maintainability average.
    pub fn combine(per_file: &[ComplexityMetrics]) -> ComplexityMetrics {
        if per_file.is_empty() {
            return ComplexityMetrics::default();
        }

        let n = per_file.len() as f64;
        let lines_of_code: usize = per_file.iter().map(|m| m.lines_of_code).sum();
        let function_count: usize = per_file.iter().map(|m| m.function_count).sum();

        ComplexityMetrics {
            cyclomatic_complexity: per_file.iter().map(|m| m.cyclomatic_complexity).sum::<f64>()
                / n,
            cognitive_complexity: per_file.iter().map(|m| m.cognitive_complexity).sum::<f64>()
                / n,
            maintainability_index: per_file
                .iter()
                .map(|m| m.maintainability_index)
                .sum::<f64>()
                / n,
            lines_of_code,
            function_count,
            class_count: per_file.iter().map(|m| m.class_count).sum(),
            average_function_length: lines_of_code as f64 / function_count.max(1) as f64,
            max_function_complexity: per_file
                .iter()
                .map(|m| m.max_function_complexity)
                .max()
                .unwrap_or(0),
            comment_lines: per_file.iter().map(|m| m.comment_lines).sum(),
            files_analyzed: per_file.iter().map(|m| m.files_analyzed).sum(),
            heuristic_files: per_file.iter().map(|m| m.heuristic_files).sum(),
        }
    }
}
