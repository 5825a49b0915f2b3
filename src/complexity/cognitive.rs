//! Nesting-weighted cognitive complexity estimate.
//!
//! Every decision keyword adds `1 + depth`, where depth is the number of
//! enclosing control blocks at the keyword's position. Brace-scoped languages
//! track control blocks by the braces opened on decision lines;
//! indentation-scoped languages track the indents of decision lines.

use super::languages::heuristic::decision_keywords;
use crate::common::text::{code_portion, first_word, indent_width, keyword_positions};
use crate::core::Language;
use crate::metrics::{LineKind, LocCounter};

/// Cognitive complexity of a whole file.
pub fn estimate(content: &str, language: Language) -> u32 {
    let keywords = decision_keywords(language);
    let kinds = LocCounter::classify(content, language);
    let code_lines = content
        .lines()
        .zip(kinds)
        .filter(|(_, kind)| *kind == LineKind::Code)
        .map(|(line, _)| line);

    if language.is_indent_scoped() {
        estimate_by_indent(code_lines, &keywords, language)
    } else {
        estimate_by_braces(code_lines, &keywords, language)
    }
}

fn estimate_by_braces<'a>(
    lines: impl Iterator<Item = &'a str>,
    keywords: &[&str],
    language: Language,
) -> u32 {
    // One entry per open brace: whether it opened a control block
    let mut braces: Vec<bool> = Vec::new();
    let mut total = 0u32;

    for line in lines {
        let code = code_portion(line, language);
        let mut hits: Vec<usize> = keywords
            .iter()
            .flat_map(|kw| keyword_positions(&code, kw))
            .collect();
        hits.sort_unstable();
        let is_control_line = !hits.is_empty();

        let mut next_hit = hits.iter().peekable();
        for (pos, byte) in code.bytes().enumerate() {
            while next_hit.next_if(|&&hit| hit == pos).is_some() {
                total += 1 + control_depth(&braces);
            }
            match byte {
                b'{' => braces.push(is_control_line),
                b'}' => {
                    braces.pop();
                }
                _ => {}
            }
        }
    }

    total
}

fn control_depth(braces: &[bool]) -> u32 {
    braces.iter().filter(|&&control| control).count() as u32
}

fn estimate_by_indent<'a>(
    lines: impl Iterator<Item = &'a str>,
    keywords: &[&str],
    language: Language,
) -> u32 {
    // Indents of the enclosing decision lines, outermost first
    let mut blocks: Vec<usize> = Vec::new();
    let mut total = 0u32;

    for line in lines {
        let indent = indent_width(line);
        while blocks.last().is_some_and(|&open| open >= indent) {
            blocks.pop();
        }

        let code = code_portion(line, language);
        let hits: usize = keywords
            .iter()
            .map(|kw| keyword_positions(&code, kw).count())
            .sum();
        total += hits as u32 * (1 + blocks.len() as u32);

        if keywords.contains(&first_word(code.trim_start())) {
            blocks.push(indent);
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_flat_code_is_zero() {
        assert_eq!(estimate("fn main() {\n    let x = 1;\n}\n", Language::Rust), 0);
        assert_eq!(estimate("", Language::Python), 0);
    }

    #[test]
    fn test_brace_nesting() {
        let code = indoc! {"
            function f(x) {
              if (x) {
                for (;;) {
                  if (y) {}
                }
              } else {
              }
            }
        "};
        // if 1, for 2, inner if 3, else 1
        assert_eq!(estimate(code, Language::JavaScript), 7);
    }

    #[test]
    fn test_function_braces_do_not_nest() {
        let flat = estimate("fn a() {\n    if x {}\n}\n", Language::Rust);
        let wrapped = estimate("impl A {\n    fn a() {\n        if x {}\n    }\n}\n", Language::Rust);
        assert_eq!(flat, 1);
        assert_eq!(flat, wrapped);
    }

    #[test]
    fn test_indentation_nesting() {
        let code = indoc! {"
            def f(x):
                if x:
                    for i in x:
                        pass
                elif y:
                    pass
        "};
        // if 1, for 2, elif 1
        assert_eq!(estimate(code, Language::Python), 4);
    }

    #[test]
    fn test_tabs_count_as_four_columns() {
        let spaces = estimate("if a:\n    if b:\n        pass\n", Language::Python);
        let tabs = estimate("if a:\n\tif b:\n\t\tpass\n", Language::Python);
        assert_eq!(spaces, 3);
        assert_eq!(spaces, tabs);
    }

    #[test]
    fn test_keywords_in_comments_and_strings_ignored() {
        let code = "// if for while\nlet s = \"if else\";\n";
        assert_eq!(estimate(code, Language::Rust), 0);
    }

    #[test]
    fn test_deeper_nesting_costs_more() {
        let shallow = estimate("if a {}\nif b {}\n", Language::Go);
        let deep = estimate("if a {\n    if b {}\n}\n", Language::Go);
        assert!(deep > shallow);
    }
}
