// src/source.rs
//! Locating and reading submission sources.

use crate::error::{Error, Result};
use crate::parse::Lang;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

const PRUNED: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".idea",
    ".gradle",
    "target",
    "build",
    "out",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
];

fn should_prune(name: &str) -> bool {
    PRUNED.contains(&name)
}

/// Normalizes a path to use forward slashes so patterns match on any OS.
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Reads every file and joins the texts with newlines, for storage next to
/// the tree.
///
/// # Errors
/// Returns `Error::Io` naming the first unreadable file.
pub fn load_files(paths: &[PathBuf]) -> Result<String> {
    let mut texts = Vec::with_capacity(paths.len());
    for path in paths {
        texts.push(fs::read_to_string(path).map_err(|e| Error::io(e, path))?);
    }
    Ok(texts.join("\n"))
}

/// Walks `root` for source files of `lang`.
///
/// VCS and build directories are skipped, as is any path (relative to
/// `root`) matched by one of the `excludes` patterns. Output is sorted.
///
/// # Errors
/// Returns `Error::Regex` for an invalid pattern and `Error::Io` when `root`
/// cannot be read.
pub fn discover(root: &Path, lang: Lang, excludes: &[String]) -> Result<Vec<PathBuf>> {
    let patterns = excludes
        .iter()
        .map(|p| Regex::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    fs::metadata(root).map_err(|e| Error::io(e, root))?;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_prune(&e.file_name().to_string_lossy()));

    let mut paths = Vec::new();
    let mut errors = 0usize;
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(_) => {
                errors += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let matches_lang = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| lang.extensions().contains(&e));
        if !matches_lang {
            continue;
        }
        let relative = normalize_path(path.strip_prefix(root).unwrap_or(path));
        if patterns.iter().any(|re| re.is_match(&relative)) {
            continue;
        }
        paths.push(path.to_path_buf());
    }
    if errors > 0 {
        warn!(root = %root.display(), errors, "entries skipped during walk");
    }

    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str, body: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/b/Main.java", "class Main {}");
        touch(dir.path(), "src/a/Util.java", "class Util {}");
        touch(dir.path(), "src/a/notes.txt", "hi");
        touch(dir.path(), "target/Gen.java", "class Gen {}");
        touch(dir.path(), "src/test/UtilTest.java", "class UtilTest {}");

        let found = discover(dir.path(), Lang::Java, &["^src/test/".to_string()]).unwrap();
        let rel: Vec<_> = found
            .iter()
            .map(|p| normalize_path(p.strip_prefix(dir.path()).unwrap()))
            .collect();
        assert_eq!(rel, vec!["src/a/Util.java", "src/b/Main.java"]);
    }

    #[test]
    fn test_discover_rejects_bad_pattern() {
        let dir = TempDir::new().unwrap();
        let res = discover(dir.path(), Lang::Python, &["(".to_string()]);
        assert!(matches!(res, Err(Error::Regex(_))));
    }

    #[test]
    fn test_load_files_joins_with_newline() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.py", "x = 1");
        touch(dir.path(), "b.py", "y = 2");
        let paths = vec![dir.path().join("a.py"), dir.path().join("b.py")];
        assert_eq!(load_files(&paths).unwrap(), "x = 1\ny = 2");
    }

    #[test]
    fn test_load_files_names_missing_path() {
        let missing = PathBuf::from("/definitely/not/here.java");
        match load_files(&[missing.clone()]) {
            Err(Error::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
