use crate::core::{Error, Result, ResultExt, SourceFile};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into.
pub const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "target",
    "vendor",
    "dist",
    "build",
    "__pycache__",
    ".venv",
    "venv",
];

/// Files larger than this are left out of a repository listing.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;

/// Loads a local checkout into the file listing the scorers consume.
///
/// Hidden entries (`.git` included), dependency and build output
/// directories, binary files and oversized files are skipped. Paths in the
/// listing are relative to the root.
pub struct RepositoryWalker {
    root: PathBuf,
    max_file_bytes: u64,
}

impl RepositoryWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    /// Walk the tree, returning files sorted by path.
    pub fn walk(&self) -> Result<Vec<SourceFile>> {
        let mut files = Vec::new();
        let mut skipped = 0usize;

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!("Skipping directory entry: {}", err);
                    skipped += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match self.load(entry.path())? {
                Some(file) => files.push(file),
                None => skipped += 1,
            }
        }

        debug!(
            root = %self.root.display(),
            loaded = files.len(),
            skipped,
            "walked repository"
        );
        Ok(files)
    }

    fn load(&self, path: &Path) -> Result<Option<SourceFile>> {
        let size = fs::metadata(path)
            .map_err(Error::from)
            .context(format!("reading metadata of {}", path.display()))?
            .len();
        if size > self.max_file_bytes {
            debug!(path = %path.display(), size, "skipping oversized file");
            return Ok(None);
        }

        let bytes = fs::read(path)
            .map_err(Error::from)
            .context(format!("reading {}", path.display()))?;
        let Some(content) = decode_text(bytes) else {
            debug!(path = %path.display(), "skipping binary file");
            return Ok(None);
        };

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        Ok(Some(SourceFile::new(relative, content)))
    }
}

fn is_excluded(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && SKIPPED_DIRS.contains(&name.as_ref())
}

/// UTF-8 text without NUL bytes, or `None` for anything binary.
fn decode_text(bytes: Vec<u8>) -> Option<String> {
    if bytes.contains(&0) {
        return None;
    }
    String::from_utf8(bytes).ok()
}

pub fn load_repository(root: &Path) -> Result<Vec<SourceFile>> {
    RepositoryWalker::new(root).walk()
}
