//! Per-language structural analysis strategies.
//!
//! The strategy set is closed: one syntax-tree analyzer per supported
//! language family plus [`GenericHeuristicAnalyzer`] for everything else.
//! [`analyzer_for`] resolves a [`Language`] through a static table, so adding
//! a language means adding a row here and nowhere else.

pub mod heuristic;
pub mod javascript;
pub mod python;
pub mod rust;

use crate::core::{Language, Result, SourceFile};
use serde::{Deserialize, Serialize};

pub use heuristic::GenericHeuristicAnalyzer;
pub use javascript::JavaScriptAnalyzer;
pub use python::PythonAnalyzer;
pub use rust::RustAnalyzer;

/// Structure of one file as seen by a [`LanguageAnalyzer`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructuralMetrics {
    pub function_count: usize,
    pub class_count: usize,
    /// Mean per-function cyclomatic complexity (module level when the file
    /// has no functions)
    pub cyclomatic: f64,
    pub max_function_complexity: u32,
    /// Produced by text scanning rather than a syntax tree
    pub heuristic: bool,
}

impl StructuralMetrics {
    /// Summarize per-function complexities, falling back to the module-level
    /// complexity when no function was found.
    pub fn from_functions(
        function_complexities: &[u32],
        module_complexity: u32,
        class_count: usize,
        heuristic: bool,
    ) -> Self {
        if function_complexities.is_empty() {
            return Self {
                function_count: 0,
                class_count,
                cyclomatic: module_complexity as f64,
                max_function_complexity: module_complexity,
                heuristic,
            };
        }

        let total: u32 = function_complexities.iter().sum();
        Self {
            function_count: function_complexities.len(),
            class_count,
            cyclomatic: total as f64 / function_complexities.len() as f64,
            max_function_complexity: function_complexities.iter().copied().max().unwrap_or(1),
            heuristic,
        }
    }
}

/// A structural analysis strategy for one language family.
pub trait LanguageAnalyzer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Count functions/classes and compute cyclomatic complexity.
    ///
    /// Returns an error when the file cannot be parsed; the caller then
    /// falls back to [`GenericHeuristicAnalyzer`].
    fn analyze_structure(&self, file: &SourceFile) -> Result<StructuralMetrics>;
}

static PYTHON: PythonAnalyzer = PythonAnalyzer;
static JAVASCRIPT: JavaScriptAnalyzer = JavaScriptAnalyzer::javascript();
static TYPESCRIPT: JavaScriptAnalyzer = JavaScriptAnalyzer::typescript();
static RUST: RustAnalyzer = RustAnalyzer;
static HEURISTIC: GenericHeuristicAnalyzer = GenericHeuristicAnalyzer;

static ANALYZER_MAP: &[(Language, &dyn LanguageAnalyzer)] = &[
    (Language::Python, &PYTHON),
    (Language::JavaScript, &JAVASCRIPT),
    (Language::TypeScript, &TYPESCRIPT),
    (Language::Rust, &RUST),
];

/// Resolve the analysis strategy for a language.
pub fn analyzer_for(language: Language) -> &'static dyn LanguageAnalyzer {
    ANALYZER_MAP
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, analyzer)| *analyzer)
        .unwrap_or(&HEURISTIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table() {
        assert_eq!(analyzer_for(Language::Python).name(), "python");
        assert_eq!(analyzer_for(Language::JavaScript).name(), "javascript");
        assert_eq!(analyzer_for(Language::TypeScript).name(), "typescript");
        assert_eq!(analyzer_for(Language::Rust).name(), "rust");
        assert_eq!(analyzer_for(Language::Go).name(), "heuristic");
        assert_eq!(analyzer_for(Language::Other).name(), "heuristic");
    }

    #[test]
    fn test_from_functions_without_functions_uses_module() {
        let s = StructuralMetrics::from_functions(&[], 4, 0, false);
        assert_eq!(s.function_count, 0);
        assert_eq!(s.cyclomatic, 4.0);
        assert_eq!(s.max_function_complexity, 4);
    }

    #[test]
    fn test_from_functions_mean_and_max() {
        let s = StructuralMetrics::from_functions(&[1, 3, 5], 9, 2, false);
        assert_eq!(s.function_count, 3);
        assert_eq!(s.class_count, 2);
        assert_eq!(s.cyclomatic, 3.0);
        assert_eq!(s.max_function_complexity, 5);
    }
}
