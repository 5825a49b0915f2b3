//! Durability: will the code survive change?
//!
//! | component       | points |
//! |-----------------|--------|
//! | tests           | 0–40   |
//! | README          | 20     |
//! | license         | 10     |
//! | maintainability | 10–30  |

use crate::core::{RepositoryMetadata, SourceFile};
use std::path::{Component, Path};

const TEST_DIRECTORIES: &[&str] = &["test", "tests", "__tests__", "spec", "specs", "testing"];

const TEST_SUFFIXES: &[&str] = &["_test", "_tests", "_spec", ".test", ".spec"];

/// PascalCase suffixes (`UserServiceTest`, `ParserTests`)
const CLASS_TEST_SUFFIXES: &[&str] = &["Test", "Tests", "Spec"];

const LICENSE_FILES: &[&str] = &["license", "licence", "copying"];

/// Whether `path` looks like a test file by directory or file name.
pub fn is_test_file(path: &Path) -> bool {
    let in_test_dir = path.components().any(|c| match c {
        Component::Normal(part) => part
            .to_str()
            .is_some_and(|p| TEST_DIRECTORIES.contains(&p.to_ascii_lowercase().as_str())),
        _ => false,
    });
    if in_test_dir {
        return true;
    }

    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    let lower = stem.to_ascii_lowercase();
    lower.starts_with("test_")
        || TEST_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
        || CLASS_TEST_SUFFIXES
            .iter()
            .any(|suffix| stem.len() > suffix.len() && stem.ends_with(suffix))
}

/// Points for test presence, from the share of source files that are tests.
pub fn test_points(has_tests: bool, files: &[SourceFile]) -> f64 {
    if !has_tests {
        return 0.0;
    }
    let source: Vec<&SourceFile> = files.iter().filter(|f| f.is_source()).collect();
    let tests = source.iter().filter(|f| is_test_file(&f.path)).count();
    if tests == 0 {
        return 15.0;
    }

    let share = tests as f64 / source.len() as f64;
    match share {
        s if s >= 0.30 => 40.0,
        s if s >= 0.20 => 30.0,
        s if s >= 0.10 => 20.0,
        _ => 10.0,
    }
}

fn has_file_named(files: &[SourceFile], stems: &[&str]) -> bool {
    files.iter().any(|f| {
        f.path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| stems.contains(&s.to_ascii_lowercase().as_str()))
    })
}

pub fn maintainability_points(maintainability_index: f64) -> f64 {
    match maintainability_index {
        m if m >= 85.0 => 30.0,
        m if m >= 70.0 => 25.0,
        m if m >= 50.0 => 20.0,
        m if m >= 30.0 => 15.0,
        _ => 10.0,
    }
}

pub fn score(files: &[SourceFile], metadata: &RepositoryMetadata, maintainability_index: f64) -> f64 {
    let readme = metadata.has_readme || has_file_named(files, &["readme"]);
    let license = metadata.has_license() || has_file_named(files, LICENSE_FILES);

    test_points(metadata.has_tests, files)
        + if readme { 20.0 } else { 0.0 }
        + if license { 10.0 } else { 0.0 }
        + maintainability_points(maintainability_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn files(paths: &[&str]) -> Vec<SourceFile> {
        paths.iter().map(|p| SourceFile::new(*p, "")).collect()
    }

    #[test]
    fn test_is_test_file() {
        assert!(is_test_file(Path::new("tests/integration.rs")));
        assert!(is_test_file(Path::new("src/__tests__/App.jsx")));
        assert!(is_test_file(Path::new("pkg/test_utils.py")));
        assert!(is_test_file(Path::new("pkg/server_test.go")));
        assert!(is_test_file(Path::new("web/app.spec.ts")));
        assert!(is_test_file(Path::new("src/UserServiceTest.java")));
        assert!(!is_test_file(Path::new("src/contest.rs")));
        assert!(!is_test_file(Path::new("src/main.rs")));
        assert!(!is_test_file(Path::new("src/attestation.py")));
    }

    #[test]
    fn test_test_points_bands() {
        let none = files(&["src/a.py", "src/b.py"]);
        assert_eq!(test_points(false, &none), 0.0);
        assert_eq!(test_points(true, &none), 15.0);

        let mut ten: Vec<&str> = vec!["src/m.py"; 9];
        ten.push("tests/test_m.py");
        assert_eq!(test_points(true, &files(&ten)), 20.0);

        let mut many: Vec<&str> = vec!["src/m.py"; 19];
        many.push("tests/test_m.py");
        assert_eq!(test_points(true, &files(&many)), 10.0);

        assert_eq!(test_points(true, &files(&["src/a.py", "tests/test_a.py"])), 40.0);
    }

    #[test]
    fn test_maintainability_bands() {
        assert_eq!(maintainability_points(85.0), 30.0);
        assert_eq!(maintainability_points(84.9), 25.0);
        assert_eq!(maintainability_points(50.0), 20.0);
        assert_eq!(maintainability_points(30.0), 15.0);
        assert_eq!(maintainability_points(29.9), 10.0);
    }

    #[test]
    fn test_readme_and_license_from_files_or_metadata() {
        let meta = RepositoryMetadata::new("r", "o", Utc::now());
        let bare = files(&["src/a.py"]);
        assert_eq!(score(&bare, &meta, 100.0), 30.0);

        let documented = files(&["README.md", "LICENSE", "src/a.py"]);
        assert_eq!(score(&documented, &meta, 100.0), 60.0);

        let mut flagged = meta.clone();
        flagged.has_readme = true;
        flagged.license = Some("MIT".into());
        assert_eq!(score(&bare, &flagged, 100.0), 60.0);
    }
}
