//! Line-based structural estimate for languages without a syntax-tree
//! analyzer, and the fallback for files whose tree could not be built.

use super::{LanguageAnalyzer, StructuralMetrics};
use crate::common::text::{code_portion, count_keyword, first_word};
use crate::core::{Language, Result, SourceFile};
use crate::metrics::{LineKind, LocCounter};
use once_cell::sync::Lazy;
use regex::Regex;

const BASE_DECISION_KEYWORDS: &[&str] = &["if", "else", "for", "while", "case", "catch"];

/// Decision keywords recognised for `language`.
pub fn decision_keywords(language: Language) -> Vec<&'static str> {
    let extras: &[&str] = match language {
        Language::Python => &["elif", "except"],
        Language::Ruby => &["elsif", "rescue", "unless", "until", "when"],
        Language::Rust => &["match", "loop"],
        Language::Shell => &["elif", "until"],
        _ => &[],
    };
    BASE_DECISION_KEYWORDS
        .iter()
        .chain(extras.iter())
        .copied()
        .collect()
}

static DECLARATION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^\s*(?:async\s+)?def\s+\w+
        | \bfn\s+\w+
        | \bfunc\s+
        | \bfun\s+\w+
        | \bfunction\b
        | ^\s*sub\s+\w+
        ",
    )
    .expect("valid declaration regex")
});

static C_FAMILY_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[\w:<>\[\],.*&]+\s+)+[*&]*[A-Za-z_]\w*\s*\([^;]*\)\s*(?:const\s*)?(?:throws\s+[\w.,\s]+)?\{?\s*$")
        .expect("valid signature regex")
});

static SHELL_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[A-Za-z_][\w-]*\s*\(\)\s*\{?").expect("valid shell regex"));

static TYPE_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:class|struct|interface|trait|enum)\s+[A-Za-z_]\w*").expect("valid type regex")
});

const NOT_A_SIGNATURE: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "else", "new", "throw", "case",
];

fn is_c_family(language: Language) -> bool {
    matches!(
        language,
        Language::C | Language::Cpp | Language::Java | Language::CSharp
    )
}

fn is_declaration(code: &str, language: Language) -> bool {
    if DECLARATION_MARKER.is_match(code) {
        return true;
    }
    if language == Language::Shell && SHELL_FUNCTION.is_match(code) {
        return true;
    }
    is_c_family(language)
        && !NOT_A_SIGNATURE.contains(&first_word(code.trim_start()))
        && C_FAMILY_SIGNATURE.is_match(code)
}

/// Text-scanning analyzer used when no syntax tree is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericHeuristicAnalyzer;

impl GenericHeuristicAnalyzer {
    /// Estimate structure by scanning code lines. Never fails.
    ///
    /// Decisions are whole-word keyword hits on string-masked, comment-free
    /// code. Each declaration marker starts a new segment; the busiest
    /// segment gives `max_function_complexity`.
    pub fn measure(&self, file: &SourceFile) -> StructuralMetrics {
        let language = file.language;
        let keywords = decision_keywords(language);
        let kinds = LocCounter::classify(&file.content, language);

        let mut function_count = 0usize;
        let mut class_count = 0usize;
        let mut total_decisions = 0usize;
        let mut segment_decisions = 0usize;
        let mut max_segment = 0usize;

        for (line, kind) in file.content.lines().zip(kinds) {
            if kind != LineKind::Code {
                continue;
            }
            let code = code_portion(line, language);

            if is_declaration(&code, language) {
                max_segment = max_segment.max(segment_decisions);
                segment_decisions = 0;
                function_count += 1;
            }
            if TYPE_DECLARATION.is_match(&code) {
                class_count += 1;
            }

            let decisions: usize = keywords.iter().map(|kw| count_keyword(&code, kw)).sum();
            total_decisions += decisions;
            segment_decisions += decisions;
        }
        max_segment = max_segment.max(segment_decisions);

        StructuralMetrics {
            function_count,
            class_count,
            cyclomatic: 1.0 + total_decisions as f64 / function_count.max(1) as f64,
            max_function_complexity: 1 + max_segment as u32,
            heuristic: true,
        }
    }
}

impl LanguageAnalyzer for GenericHeuristicAnalyzer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn analyze_structure(&self, file: &SourceFile) -> Result<StructuralMetrics> {
        Ok(self.measure(file))
    }
}
