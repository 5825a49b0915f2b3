pub mod errors;
pub mod score;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use errors::{Error, Result, ResultExt};

/// Source languages the engine recognizes.
///
/// The set is closed: anything not listed maps to [`Language::Other`], which
/// is treated as non-source content (docs, data, assets) by repository-level
/// aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    Php,
    Kotlin,
    Swift,
    Scala,
    Shell,
    Other,
}

impl Language {
    pub fn from_extension(ext: &str) -> Self {
        static EXTENSION_MAP: &[(&[&str], Language)] = &[
            (&["rs"], Language::Rust),
            (&["py", "pyw", "pyi"], Language::Python),
            (&["js", "jsx", "mjs", "cjs"], Language::JavaScript),
            (&["ts", "tsx", "mts", "cts"], Language::TypeScript),
            (&["go"], Language::Go),
            (&["java"], Language::Java),
            (&["c", "h"], Language::C),
            (&["cc", "cpp", "cxx", "hpp", "hh", "hxx"], Language::Cpp),
            (&["cs"], Language::CSharp),
            (&["rb"], Language::Ruby),
            (&["php"], Language::Php),
            (&["kt", "kts"], Language::Kotlin),
            (&["swift"], Language::Swift),
            (&["scala", "sc"], Language::Scala),
            (&["sh", "bash", "zsh"], Language::Shell),
        ];

        let ext = ext.to_ascii_lowercase();
        EXTENSION_MAP
            .iter()
            .find(|(exts, _)| exts.contains(&ext.as_str()))
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Other)
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Other)
    }

    /// Look up a language by a normalized name or common alias
    /// ("python", "py", "c++", "golang", ...). Case-insensitive.
    pub fn from_name(name: &str) -> Self {
        static NAME_MAP: &[(&[&str], Language)] = &[
            (&["rust", "rs"], Language::Rust),
            (&["python", "py", "python3"], Language::Python),
            (&["javascript", "js", "node", "jsx"], Language::JavaScript),
            (&["typescript", "ts", "tsx"], Language::TypeScript),
            (&["go", "golang"], Language::Go),
            (&["java"], Language::Java),
            (&["c"], Language::C),
            (&["c++", "cpp", "cxx"], Language::Cpp),
            (&["c#", "csharp", "cs"], Language::CSharp),
            (&["ruby", "rb"], Language::Ruby),
            (&["php"], Language::Php),
            (&["kotlin", "kt"], Language::Kotlin),
            (&["swift"], Language::Swift),
            (&["scala"], Language::Scala),
            (&["shell", "bash", "sh", "zsh"], Language::Shell),
        ];

        let normalized = name.trim().to_ascii_lowercase();
        NAME_MAP
            .iter()
            .find(|(names, _)| names.contains(&normalized.as_str()))
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Other)
    }

    /// Whether files in this language count as source code.
    pub fn is_source(self) -> bool {
        self != Language::Other
    }

    /// Languages whose blocks are delimited by indentation rather than braces.
    pub fn is_indent_scoped(self) -> bool {
        matches!(self, Language::Python | Language::Ruby | Language::Shell)
    }

    /// Languages that use `#` for line comments.
    pub fn uses_hash_comments(self) -> bool {
        matches!(
            self,
            Language::Python | Language::Ruby | Language::Shell | Language::Php
        )
    }

    /// Languages that use `//` and `/* */` comments.
    pub fn uses_c_comments(self) -> bool {
        !matches!(
            self,
            Language::Python | Language::Ruby | Language::Shell | Language::Other
        )
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Language, &str)] = &[
            (Language::Rust, "Rust"),
            (Language::Python, "Python"),
            (Language::JavaScript, "JavaScript"),
            (Language::TypeScript, "TypeScript"),
            (Language::Go, "Go"),
            (Language::Java, "Java"),
            (Language::C, "C"),
            (Language::Cpp, "C++"),
            (Language::CSharp, "C#"),
            (Language::Ruby, "Ruby"),
            (Language::Php, "PHP"),
            (Language::Kotlin, "Kotlin"),
            (Language::Swift, "Swift"),
            (Language::Scala, "Scala"),
            (Language::Shell, "Shell"),
            (Language::Other, "Other"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(l, _)| l == self)
            .map(|(_, s)| *s)
            .unwrap_or("Other");

        write!(f, "{display_str}")
    }
}

/// One decoded file from a repository listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub language: Language,
    pub content: String,
    pub size_bytes: u64,
}

/// Wire shape for [`SourceFile`]: `language` and `size_bytes` are optional
/// and derived from the path and content when absent.
#[derive(Deserialize)]
struct RawSourceFile {
    path: PathBuf,
    #[serde(default)]
    language: Option<String>,
    content: String,
    #[serde(default)]
    size_bytes: Option<u64>,
}

impl SourceFile {
    /// Build a file, inferring the language from the path extension.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        let content = content.into();
        Self {
            language: Language::from_path(&path),
            size_bytes: content.len() as u64,
            path,
            content,
        }
    }

    /// Override the inferred language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn is_source(&self) -> bool {
        self.language.is_source()
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// Deserialize a file listing where `language`/`size_bytes` may be omitted.
    pub fn from_json_lenient(value: serde_json::Value) -> Result<Self> {
        let raw: RawSourceFile = serde_json::from_value(value)?;
        let mut file = SourceFile::new(raw.path, raw.content);
        if let Some(name) = raw.language.as_deref() {
            let explicit = Language::from_name(name);
            if explicit.is_source() {
                file.language = explicit;
            }
        }
        if let Some(size) = raw.size_bytes {
            file.size_bytes = size;
        }
        Ok(file)
    }
}

/// Externally supplied repository metadata. Read-only to the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub watchers: u64,
    #[serde(default)]
    pub size_kb: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub has_readme: bool,
    #[serde(default)]
    pub has_tests: bool,
    #[serde(default)]
    pub has_ci: bool,
    #[serde(default)]
    pub is_fork: bool,
    #[serde(default)]
    pub is_private: bool,
}

impl RepositoryMetadata {
    /// Minimal metadata for a repository with no community signal.
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            name: String::new(),
            description: None,
            stars: 0,
            forks: 0,
            watchers: 0,
            size_kb: 0,
            created_at: at,
            updated_at: at,
            topics: Vec::new(),
            license: None,
            has_readme: false,
            has_tests: false,
            has_ci: false,
            is_fork: false,
            is_private: false,
        }
    }

    pub fn has_license(&self) -> bool {
        self.license
            .as_deref()
            .map(|l| !l.trim().is_empty())
            .unwrap_or(false)
    }
}
