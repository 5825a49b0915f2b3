//! Lines of Code (LOC) counting
//!
//! Single source of truth for code/comment/blank classification. The
//! complexity analyzers, the consistency scorer and the maintainability index
//! all read line counts from here so the numbers agree with each other.
//!
//! - **Physical Lines**: Raw line count (includes all lines)
//! - **Code Lines**: Lines containing code (excludes comments and blanks)
//! - **Comment Lines**: Lines that are primarily comments
//! - **Blank Lines**: Lines containing only whitespace
//!
//! The invariant `physical_lines == code_lines + comment_lines + blank_lines`
//! always holds.
//!
//! ## Language-Aware Detection
//!
//! - C-family (Rust, JS/TS, Go, Java, ...): `//` and `/* */`; nested block
//!   comments in Rust; `#[...]` attributes are code
//! - Python: `#` comments and triple-quoted strings that stand alone
//!   (docstrings) are counted as comments
//! - Ruby/Shell: `#` comments
//!
//! ## Limitations
//!
//! - Comment markers inside string literals are not detected
//! - Raw strings with comment markers may be miscounted

use crate::core::Language;
use serde::{Deserialize, Serialize};

/// Per-line classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Code,
}

/// Individual file line count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocCount {
    /// Raw line count from file
    pub physical_lines: usize,
    /// Lines containing executable code
    pub code_lines: usize,
    /// Lines that are primarily comments
    pub comment_lines: usize,
    /// Lines containing only whitespace
    pub blank_lines: usize,
}

impl LocCount {
    /// Share of non-blank lines that are comments, in `[0, 1]`.
    pub fn comment_ratio(&self) -> f64 {
        let denominator = self.code_lines + self.comment_lines;
        if denominator == 0 {
            0.0
        } else {
            self.comment_lines as f64 / denominator as f64
        }
    }
}

/// Counts lines of code using a consistent methodology.
///
/// # Examples
///
/// ```rust
/// use peerscore::core::Language;
/// use peerscore::metrics::LocCounter;
///
/// let count = LocCounter::count("# setup\nx = 1\n\n", Language::Python);
/// assert_eq!(count.code_lines, 1);
/// assert_eq!(count.comment_lines, 1);
/// assert_eq!(count.blank_lines, 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocCounter;

impl LocCounter {
    /// Count lines in file content with language-aware comment detection.
    pub fn count(content: &str, language: Language) -> LocCount {
        let kinds = Self::classify(content, language);
        let mut count = LocCount {
            physical_lines: kinds.len(),
            ..LocCount::default()
        };
        for kind in kinds {
            match kind {
                LineKind::Blank => count.blank_lines += 1,
                LineKind::Comment => count.comment_lines += 1,
                LineKind::Code => count.code_lines += 1,
            }
        }
        count
    }

    /// Classify every line of `content`.
    pub fn classify(content: &str, language: Language) -> Vec<LineKind> {
        let mut state = CommentState::default();
        content
            .lines()
            .map(|line| classify_line(line.trim(), &mut state, language))
            .collect()
    }
}

/// State tracking for multi-line comment detection
#[derive(Clone, Debug, Default)]
struct CommentState {
    /// Whether we're inside a block comment
    in_block_comment: bool,
    /// Nesting depth for Rust's nested block comments (/* /* */ */)
    block_depth: usize,
    /// Open Python docstring delimiter, if any
    docstring: Option<&'static str>,
}

fn classify_line(trimmed: &str, state: &mut CommentState, language: Language) -> LineKind {
    if let Some(delim) = state.docstring {
        if trimmed.contains(delim) {
            state.docstring = None;
        }
        return LineKind::Comment;
    }

    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if state.in_block_comment {
        update_block_comment_state(trimmed, state, language);
        return LineKind::Comment;
    }

    if language == Language::Python {
        if let Some(kind) = classify_docstring(trimmed, state) {
            return kind;
        }
    }

    if language.uses_c_comments() {
        if let Some(start_idx) = trimmed.find("/*") {
            let before_comment = trimmed[..start_idx].trim();
            let has_code_before =
                !before_comment.is_empty() && !is_single_line_comment(before_comment, language);

            scan_block_comment(&trimmed[start_idx + 2..], 1, state, language);

            if has_code_before {
                return LineKind::Code;
            }

            if !state.in_block_comment {
                if let Some(end_idx) = trimmed.rfind("*/") {
                    if !trimmed[end_idx + 2..].trim().is_empty() {
                        return LineKind::Code;
                    }
                }
            }

            return LineKind::Comment;
        }
    }

    if is_single_line_comment(trimmed, language) {
        return LineKind::Comment;
    }

    LineKind::Code
}

/// Standalone triple-quoted strings are docstrings; count them as comments.
fn classify_docstring(trimmed: &str, state: &mut CommentState) -> Option<LineKind> {
    let body = trimmed.strip_prefix('r').unwrap_or(trimmed);
    for delim in ["\"\"\"", "'''"] {
        if let Some(rest) = body.strip_prefix(delim) {
            if !rest.contains(delim) {
                state.docstring = Some(delim);
            }
            return Some(LineKind::Comment);
        }
    }
    None
}

fn is_single_line_comment(trimmed: &str, language: Language) -> bool {
    if language.uses_c_comments() && trimmed.starts_with("//") {
        return true;
    }

    if trimmed.starts_with('#') {
        return match language {
            // Rust: #[...] and #![...] are attributes (code)
            Language::Rust => false,
            // C/C++: #include, #define are preprocessor directives
            Language::C | Language::Cpp | Language::CSharp => false,
            _ => language.uses_hash_comments(),
        };
    }

    false
}

fn update_block_comment_state(trimmed: &str, state: &mut CommentState, language: Language) {
    let depth = state.block_depth;
    scan_block_comment(trimmed, depth, state, language);
}

/// Walk `text` starting at block depth `depth`, updating the state with
/// whether the comment is still open at the end of the line.
fn scan_block_comment(text: &str, mut depth: usize, state: &mut CommentState, language: Language) {
    let bytes = text.as_bytes();
    let mut idx = 0;

    while idx + 1 < bytes.len() {
        if bytes[idx] == b'/' && bytes[idx + 1] == b'*' {
            if language == Language::Rust {
                depth += 1;
            }
            idx += 2;
            continue;
        }
        if bytes[idx] == b'*' && bytes[idx + 1] == b'/' {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                state.in_block_comment = false;
                state.block_depth = 0;
                return;
            }
            idx += 2;
            continue;
        }
        idx += 1;
    }

    state.in_block_comment = true;
    state.block_depth = depth;
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_loc_counter_consistent() {
        let content = "fn main() {\n    println!(\"Hello\");\n}\n";
        assert_eq!(
            LocCounter::count(content, Language::Rust),
            LocCounter::count(content, Language::Rust)
        );
    }

    #[test]
    fn test_count_content() {
        let content = "// Comment\nfn main() {\n\n    println!(\"Hello\");\n}\n";
        let count = LocCounter::count(content, Language::Rust);

        assert_eq!(count.physical_lines, 5);
        assert_eq!(count.comment_lines, 1);
        assert_eq!(count.blank_lines, 1);
        assert_eq!(count.code_lines, 3);
    }

    #[test]
    fn test_rust_attributes_are_code() {
        let count = LocCounter::count("#[derive(Debug)]\nstruct A;\n", Language::Rust);
        assert_eq!(count.code_lines, 2);
        assert_eq!(count.comment_lines, 0);
    }

    #[test]
    fn test_multiline_block_comment() {
        let content = indoc! {"
            /*
             * Documentation
             without a star
             */
            const x = 1; /* trailing */
        "};
        let count = LocCounter::count(content, Language::JavaScript);
        assert_eq!(count.comment_lines, 4);
        assert_eq!(count.code_lines, 1);
    }

    #[test]
    fn test_nested_rust_block_comment() {
        let content = "/* outer /* inner */ still comment\n*/\nfn a() {}\n";
        let count = LocCounter::count(content, Language::Rust);
        assert_eq!(count.comment_lines, 2);
        assert_eq!(count.code_lines, 1);
    }

    #[test]
    fn test_python_docstrings_are_comments() {
        let content = indoc! {r#"
            def add(a, b):
                """Add two numbers.

                Returns the sum.
                """
                # inline note
                return a + b
        "#};
        let count = LocCounter::count(content, Language::Python);
        assert_eq!(count.code_lines, 2);
        assert_eq!(count.comment_lines, 5);
        assert_eq!(count.blank_lines, 0);
    }

    #[test]
    fn test_c_preprocessor_is_code() {
        let count = LocCounter::count("#include <stdio.h>\n// hi\n", Language::C);
        assert_eq!(count.code_lines, 1);
        assert_eq!(count.comment_lines, 1);
    }

    #[test]
    fn test_comment_ratio() {
        let count = LocCount {
            physical_lines: 10,
            code_lines: 6,
            comment_lines: 2,
            blank_lines: 2,
        };
        assert!((count.comment_ratio() - 0.25).abs() < 1e-9);
        assert_eq!(LocCount::default().comment_ratio(), 0.0);
    }
}
