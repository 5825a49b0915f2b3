//! Isolation: declared dependencies, module layout and coupling.
//!
//! - dependency manifest present: +40
//! - distinct top-level directories: ≥3 → +30, 2 → +20, otherwise +10
//! - import statements per source file, banded and averaged: up to +30

use crate::common::text::{code_portion, first_word};
use crate::core::score::mean;
use crate::core::SourceFile;
use crate::metrics::{LineKind, LocCounter};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Component, Path};

const MANIFEST_FILES: &[&str] = &[
    "Cargo.toml",
    "package.json",
    "requirements.txt",
    "pyproject.toml",
    "setup.py",
    "Pipfile",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "Gemfile",
    "composer.json",
];

static IMPORT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^\s*(?:
            import\b
          | from\s+\S+\s+import\b
          | use\s
          | using\s
          | \#\s*include\b
          | require(?:_relative|_once)?\b
          | include(?:_once)?\s
          | extern\s+crate\b
          | source\s
        )
        | \brequire\s*\(
        ",
    )
    .expect("valid import regex")
});

pub fn is_manifest(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    MANIFEST_FILES.contains(&name) || name.ends_with(".csproj")
}

fn top_level_directory(path: &Path) -> Option<String> {
    let components: Vec<&str> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    match components.as_slice() {
        [dir, _, ..] => Some(dir.to_string()),
        _ => None,
    }
}

pub fn directory_points(files: &[SourceFile]) -> f64 {
    let dirs: HashSet<String> = files
        .iter()
        .filter_map(|f| top_level_directory(&f.path))
        .collect();
    match dirs.len() {
        n if n >= 3 => 30.0,
        2 => 20.0,
        _ => 10.0,
    }
}

/// Import statements in one file. Go `import ( ... )` blocks count each
/// entry.
pub fn count_imports(file: &SourceFile) -> usize {
    let kinds = LocCounter::classify(&file.content, file.language);
    let mut count = 0;
    let mut in_import_block = false;

    for (line, kind) in file.content.lines().zip(kinds) {
        if kind != LineKind::Code {
            continue;
        }
        let code = code_portion(line, file.language);
        let trimmed = code.trim();

        if in_import_block {
            if trimmed.starts_with(')') {
                in_import_block = false;
            } else if !trimmed.is_empty() {
                count += 1;
            }
            continue;
        }
        if first_word(trimmed) == "import" && trimmed.ends_with('(') {
            in_import_block = true;
            continue;
        }
        if IMPORT_LINE.is_match(&code) {
            count += 1;
        }
    }

    count
}

pub fn import_points(imports: usize) -> f64 {
    match imports {
        0 => 10.0,
        1..=10 => 30.0,
        11..=20 => 20.0,
        21..=30 => 15.0,
        _ => 10.0,
    }
}

pub fn score(files: &[SourceFile]) -> f64 {
    let manifest = if files.iter().any(|f| is_manifest(&f.path)) {
        40.0
    } else {
        0.0
    };

    let per_file: Vec<f64> = files
        .iter()
        .filter(|f| f.is_source())
        .map(|f| import_points(count_imports(f)))
        .collect();

    manifest + directory_points(files) + mean(&per_file)
}
