//! Input corpus of `(identifier, text)` pairs to scan for annotation blocks.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File extensions scanned when a directory is given.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["py", "rs", "js", "ts", "php", "rb", "go", "java", "txt"];

/// One named text blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub id: String,
    pub text: String,
}

/// Ordered collection of sources, held fully in memory.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    sources: Vec<Source>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an in-memory source.
    pub fn add(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(id, text);
        self
    }

    pub fn push(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.sources.push(Source {
            id: id.into(),
            text: text.into(),
        });
    }

    /// Read every file named by `patterns`: plain files, directories
    /// (recursively, supported extensions only) or glob patterns.
    pub fn from_patterns(patterns: &[String]) -> Result<Corpus> {
        let mut corpus = Corpus::new();
        for path in expand_patterns(patterns)? {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            corpus.push(path.to_string_lossy(), text);
        }
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Source;
    type IntoIter = std::slice::Iter<'a, Source>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}

pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Expand patterns into a sorted, de-duplicated list of file paths.
fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let nested = format!("{}/**/*", glob::Pattern::escape(pattern.trim_end_matches('/')));
            files.extend(
                glob::glob(&nested)
                    .with_context(|| format!("failed to scan directory: {}", path.display()))?
                    .filter_map(|r| r.ok())
                    .filter(|p| p.is_file() && is_supported_extension(p)),
            );
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn in_memory_sources_keep_order() {
        let corpus = Corpus::new().add("b.py", "x").add("a.py", "y");
        let ids: Vec<&str> = corpus.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b.py", "a.py"]);
    }

    #[test]
    fn directory_scan_is_recursive_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("app/views")).unwrap();
        fs::write(dir.path().join("app/views/product.py"), "\"\"\"x\"\"\"").unwrap();
        fs::write(dir.path().join("app/main.py"), "").unwrap();
        fs::write(dir.path().join("app/logo.png"), "").unwrap();

        let corpus = Corpus::from_patterns(&[dir.path().to_string_lossy().to_string()]).unwrap();
        assert_eq!(corpus.len(), 2);
        assert!(corpus.iter().all(|s| s.id.ends_with(".py")));
    }

    #[test]
    fn duplicate_patterns_are_read_once() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, "").unwrap();
        let file = file.to_string_lossy().to_string();
        let glob = format!("{}/*.py", dir.path().to_string_lossy());

        let corpus = Corpus::from_patterns(&[file, glob]).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn supported_extensions() {
        assert!(is_supported_extension(Path::new("views.py")));
        assert!(!is_supported_extension(Path::new("README")));
    }
}
