//! Text scanning utilities for the line-based analyzers

use crate::core::Language;

/// Replace the contents of string and char literals with spaces, so that
/// keywords and braces inside literals are not counted. Quote characters
/// themselves are kept.
pub fn mask_strings(line: &str) -> String {
    mask_literals(line, true)
}

/// Masked, comment-free code portion of one line.
///
/// Rust single quotes only open a literal when they form a char literal, so
/// lifetimes and labels (`'a`, `'outer:`) are left alone.
pub fn code_portion(line: &str, language: Language) -> String {
    let masked = mask_literals(line, language != Language::Rust);
    strip_line_comment(&masked, language).to_string()
}

fn mask_literals(line: &str, apostrophe_strings: bool) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut result = String::with_capacity(line.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        result.push(ch);
        i += 1;

        let opens_literal = match ch {
            '"' | '`' => true,
            '\'' if apostrophe_strings => true,
            '\'' => is_char_literal(&chars[i..]),
            _ => false,
        };
        if !opens_literal {
            continue;
        }

        while i < chars.len() {
            let inner = chars[i];
            i += 1;
            if inner == '\\' {
                result.push(' ');
                if i < chars.len() {
                    result.push(' ');
                    i += 1;
                }
            } else if inner == ch {
                result.push(inner);
                break;
            } else {
                result.push(' ');
            }
        }
    }

    result
}

/// `rest` starts right after a single quote: `x'` or `\n'` style.
fn is_char_literal(rest: &[char]) -> bool {
    match rest {
        ['\\', ..] => true,
        [_, '\'', ..] => true,
        _ => false,
    }
}

/// Drop a trailing line comment from an already string-masked line.
pub fn strip_line_comment(masked: &str, language: Language) -> &str {
    let mut cut = masked.len();
    if language.uses_c_comments() {
        if let Some(pos) = masked.find("//") {
            cut = cut.min(pos);
        }
    }
    if language.uses_hash_comments() {
        if let Some(pos) = masked.find('#') {
            cut = cut.min(pos);
        }
    }
    &masked[..cut]
}

/// Count whole-word occurrences of `keyword` in `line`.
///
/// A match only counts when the characters on either side are not word
/// characters, so `notify` does not match `if`.
pub fn count_keyword(line: &str, keyword: &str) -> usize {
    keyword_positions(line, keyword).count()
}

/// Byte offsets of whole-word occurrences of `keyword` in `line`.
pub fn keyword_positions<'a>(line: &'a str, keyword: &'a str) -> impl Iterator<Item = usize> + 'a {
    let bytes = line.as_bytes();
    let kw = keyword.as_bytes();
    let mut i = 0;
    std::iter::from_fn(move || {
        while !kw.is_empty() && i + kw.len() <= bytes.len() {
            let start = i;
            if &bytes[start..start + kw.len()] == kw {
                let before_ok = start == 0 || !is_word_byte(bytes[start - 1]);
                let end = start + kw.len();
                let after_ok = end >= bytes.len() || !is_word_byte(bytes[end]);
                if before_ok && after_ok {
                    i = end;
                    return Some(start);
                }
            }
            i += 1;
        }
        None
    })
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Width of the leading whitespace, with tabs expanded to four columns.
pub fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// First whitespace-delimited word, with trailing punctuation trimmed.
pub fn first_word(trimmed: &str) -> &str {
    trimmed
        .split(|c: char| c.is_whitespace() || c == '(' || c == ':' || c == '{')
        .next()
        .unwrap_or("")
}
