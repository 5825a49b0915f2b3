//! Consistency: naming conventions, documentation density and layout.
//!
//! Each source file gets the mean of three 0–100 sub-scores; the repository
//! score is the mean over its source files.

use crate::common::text::{code_portion, indent_width};
use crate::config::AcidConfig;
use crate::core::score::mean;
use crate::core::{Language, SourceFile};
use crate::metrics::{LineKind, LocCounter};
use once_cell::sync::Lazy;
use regex::Regex;

static FUNCTION_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:def|fn|function|fun)\s+([A-Za-z_]\w*)|\bfunc\s+(?:\([^)]*\)\s*)?([A-Za-z_]\w*)")
        .expect("valid function regex")
});

static CLASS_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:class|struct|interface|trait|enum)\s+([A-Za-z_]\w*)").expect("valid class regex")
});

static ASSIGNMENT_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z_]\w*)\s*=[^=]").expect("valid assignment regex"));

static BINDING_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:let|const|var|val)\s+(?:mut\s+)?([A-Za-z_]\w*)").expect("valid binding regex")
});

static SHORT_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z_]\w*)\s*:=").expect("valid short declaration regex"));

static TYPED_LOCAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:int|long|short|double|float|char|boolean|bool|byte|String|string|auto)\s+([A-Za-z_]\w*)\s*=[^=]")
        .expect("valid typed local regex")
});

static SNAKE_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*(?:_[a-z0-9]+)*$").expect("valid snake regex"));
static CAMEL_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("valid camel regex"));
static PASCAL_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("valid pascal regex"));
static UPPER_SNAKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*$").expect("valid constant regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdentifierKind {
    Function,
    Class,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Convention {
    Snake,
    Camel,
    /// Either snake_case or camelCase
    Mixed,
}

fn member_convention(language: Language) -> Convention {
    match language {
        Language::Python | Language::Rust | Language::Ruby => Convention::Snake,
        Language::JavaScript
        | Language::TypeScript
        | Language::Java
        | Language::Go
        | Language::Kotlin
        | Language::Swift
        | Language::CSharp => Convention::Camel,
        _ => Convention::Mixed,
    }
}

fn variable_patterns(language: Language) -> Vec<&'static Regex> {
    match language {
        Language::Python | Language::Ruby => vec![&*ASSIGNMENT_TARGET],
        Language::Go => vec![&*SHORT_DECLARATION, &*BINDING_KEYWORD],
        Language::Java | Language::CSharp | Language::C | Language::Cpp => vec![&*TYPED_LOCAL],
        _ => vec![&*BINDING_KEYWORD],
    }
}

/// Identifiers declared in a file, with leading/trailing underscores
/// stripped. Strings and comments are masked first.
fn declared_identifiers(file: &SourceFile) -> Vec<(IdentifierKind, String)> {
    let language = file.language;
    let kinds = LocCounter::classify(&file.content, language);
    let patterns = variable_patterns(language);
    let mut identifiers = Vec::new();

    let mut push = |kind: IdentifierKind, raw: &str| {
        let name = raw.trim_matches('_');
        if !name.is_empty() {
            identifiers.push((kind, name.to_string()));
        }
    };

    for (line, kind) in file.content.lines().zip(kinds) {
        if kind != LineKind::Code {
            continue;
        }
        let code = code_portion(line, language);

        for caps in FUNCTION_DECL.captures_iter(&code) {
            if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
                push(IdentifierKind::Function, name.as_str());
            }
        }
        for caps in CLASS_DECL.captures_iter(&code) {
            push(IdentifierKind::Class, &caps[1]);
        }

        for pattern in &patterns {
            for caps in pattern.captures_iter(&code) {
                push(IdentifierKind::Variable, &caps[1]);
            }
        }
    }

    identifiers
}

fn conforms(kind: IdentifierKind, name: &str, language: Language) -> bool {
    if kind == IdentifierKind::Class {
        return PASCAL_CASE.is_match(name);
    }
    if kind == IdentifierKind::Variable && UPPER_SNAKE.is_match(name) && name.len() > 1 {
        return true;
    }
    // Exported Go functions are PascalCase
    if kind == IdentifierKind::Function && language == Language::Go && PASCAL_CASE.is_match(name) {
        return true;
    }
    match member_convention(language) {
        Convention::Snake => SNAKE_CASE.is_match(name),
        Convention::Camel => CAMEL_CASE.is_match(name),
        Convention::Mixed => SNAKE_CASE.is_match(name) || CAMEL_CASE.is_match(name),
    }
}

/// Share of declared identifiers following the language's conventions.
pub fn naming_score(file: &SourceFile, config: &AcidConfig) -> f64 {
    let identifiers = declared_identifiers(file);
    if identifiers.is_empty() {
        return 100.0;
    }

    let total = identifiers.len() as f64;
    let conforming = identifiers
        .iter()
        .filter(|(kind, name)| conforms(*kind, name, file.language))
        .count() as f64;
    let single_letters = identifiers
        .iter()
        .filter(|(_, name)| name.chars().count() == 1)
        .count() as f64;

    let mut score = 100.0 * conforming / total;
    if single_letters / total > config.single_letter_ratio {
        score *= config.single_letter_penalty;
    }
    score
}

/// Comment density: 10–30% of non-blank lines is ideal.
pub fn documentation_score(file: &SourceFile) -> f64 {
    let ratio = LocCounter::count(&file.content, file.language).comment_ratio();
    documentation_points(ratio)
}

pub fn documentation_points(ratio: f64) -> f64 {
    if ratio < 0.10 {
        30.0 + 700.0 * ratio
    } else if ratio <= 0.30 {
        100.0
    } else {
        (100.0 - 200.0 * (ratio - 0.30)).max(30.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndentStyle {
    Tabs,
    Spaces(usize),
    Mixed,
}

fn indent_style(line: &str) -> Option<IndentStyle> {
    let leading: String = line.chars().take_while(|c| *c == ' ' || *c == '\t').collect();
    if leading.is_empty() || line.trim().is_empty() {
        return None;
    }
    let has_tabs = leading.contains('\t');
    let has_spaces = leading.contains(' ');
    Some(match (has_tabs, has_spaces) {
        (true, false) => IndentStyle::Tabs,
        (false, true) => IndentStyle::Spaces(indent_width(line)),
        _ => IndentStyle::Mixed,
    })
}

/// Share of indented lines that use the file's dominant indent character,
/// and for spaces, a multiple of the smallest indent seen.
pub fn indentation_score(content: &str) -> f64 {
    let styles: Vec<IndentStyle> = content.lines().filter_map(indent_style).collect();
    if styles.is_empty() {
        return 100.0;
    }

    let tab_lines = styles.iter().filter(|s| **s == IndentStyle::Tabs).count();
    let space_widths: Vec<usize> = styles
        .iter()
        .filter_map(|s| match s {
            IndentStyle::Spaces(width) => Some(*width),
            _ => None,
        })
        .collect();

    let matching = if tab_lines > space_widths.len() {
        tab_lines
    } else {
        let unit = space_widths.iter().copied().min().unwrap_or(1).clamp(1, 8);
        space_widths.iter().filter(|w| *w % unit == 0).count()
    };

    100.0 * matching as f64 / styles.len() as f64
}

/// Penalize lines over the configured limit; 20% long lines scores 0.
pub fn line_length_score(content: &str, limit: usize) -> f64 {
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return 100.0;
    }
    let long = lines.iter().filter(|l| l.chars().count() > limit).count();
    let long_ratio = long as f64 / lines.len() as f64;
    100.0 * (1.0 - (5.0 * long_ratio).min(1.0))
}

pub fn style_score(file: &SourceFile, config: &AcidConfig) -> f64 {
    0.6 * indentation_score(&file.content) + 0.4 * line_length_score(&file.content, config.long_line_limit)
}

/// Consistency of one source file.
pub fn file_score(file: &SourceFile, config: &AcidConfig) -> f64 {
    mean(&[
        naming_score(file, config),
        documentation_score(file),
        style_score(file, config),
    ])
}

/// Mean consistency over the source files; 0 when there are none.
pub fn score(files: &[SourceFile], config: &AcidConfig) -> f64 {
    let per_file: Vec<f64> = files
        .iter()
        .filter(|f| f.is_source())
        .map(|f| file_score(f, config))
        .collect();
    mean(&per_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn file(path: &str, code: &str) -> SourceFile {
        SourceFile::new(path, code)
    }

    #[test]
    fn test_python_naming_conventions() {
        let f = file(
            "m.py",
            indoc! {"
                class HttpClient:
                    def send_request(self):
                        retry_count = 3
                        MAX_SIZE = 10
                        return retry_count

                def badName():
                    pass
            "},
        );
        // HttpClient, send_request, retry_count, MAX_SIZE ok; badName not
        assert_eq!(naming_score(&f, &AcidConfig::default()), 80.0);
    }

    #[test]
    fn test_javascript_expects_camel_case() {
        let f = file(
            "a.js",
            "function loadUser() {}\nconst user_name = 1;\nlet retryCount = 2;\nclass api_client {}\n",
        );
        // loadUser, retryCount ok; user_name, api_client not
        assert_eq!(naming_score(&f, &AcidConfig::default()), 50.0);
    }

    #[test]
    fn test_dunder_and_private_names_are_stripped() {
        let f = file("m.py", "class Account:\n    def __init__(self):\n        self._x = 1\n\ndef _helper_fn():\n    pass\n");
        // Account, init, helper_fn
        assert_eq!(naming_score(&f, &AcidConfig::default()), 100.0);
    }

    #[test]
    fn test_single_letter_penalty() {
        let f = file("m.rs", "fn f() {\n    let a = 1;\n    let b = 2;\n    let total = a + b;\n}\n");
        // 4 identifiers, all snake_case, 3 single letters
        assert!((naming_score(&f, &AcidConfig::default()) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_identifiers_is_full_marks() {
        let f = file("m.py", "print('hello')\n");
        assert_eq!(naming_score(&f, &AcidConfig::default()), 100.0);
    }

    #[test]
    fn test_documentation_bands() {
        assert_eq!(documentation_points(0.0), 30.0);
        assert!((documentation_points(0.05) - 65.0).abs() < 1e-9);
        assert_eq!(documentation_points(0.10), 100.0);
        assert_eq!(documentation_points(0.30), 100.0);
        assert!((documentation_points(0.40) - 80.0).abs() < 1e-9);
        assert_eq!(documentation_points(0.90), 30.0);
    }

    #[test]
    fn test_indentation_consistency() {
        let consistent = "def f():\n    if x:\n        pass\n";
        assert_eq!(indentation_score(consistent), 100.0);

        let mixed = "def f():\n    a = 1\n\tb = 2\n    c = 3\n      d = 4\n";
        // 4 indented lines, spaces dominate with unit 4; tab and 6 miss
        assert_eq!(indentation_score(mixed), 50.0);

        assert_eq!(indentation_score("x = 1\n"), 100.0);
    }

    #[test]
    fn test_line_length() {
        let long = "x".repeat(130);
        let content = format!("{long}\nshort\nshort\nshort\nshort\nshort\nshort\nshort\nshort\nshort\n");
        // 10% long lines
        assert!((line_length_score(&content, 120) - 50.0).abs() < 1e-9);
        assert_eq!(line_length_score("", 120), 100.0);
    }

    #[test]
    fn test_repository_mean_skips_non_source() {
        let config = AcidConfig::default();
        let files = vec![
            file("README.md", "# Title\n"),
            file("a.py", "x_value = 1\n"),
        ];
        let expected = file_score(&files[1], &config);
        assert!((score(&files, &config) - expected).abs() < 1e-9);
        assert_eq!(score(&[], &config), 0.0);
    }
}
