// src/parse/mod.rs
//! Source text to [`Node`] trees, via tree-sitter.

mod cst;
mod java;
mod python;

use crate::ast::{Field, Kind, Node};
use crate::error::{Error, Result};
use crate::source;
use cst::{first_error_line, Lower};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use tree_sitter::{Language, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Java,
    Python,
}

impl Lang {
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext {
            "java" => Some(Self::Java),
            "py" | "pyi" => Some(Self::Python),
            _ => None,
        }
    }

    /// Looks up a language by its lowercase name.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedLanguage` for unknown names.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "java" => Ok(Self::Java),
            "python" | "py" => Ok(Self::Python),
            _ => Err(Error::UnsupportedLanguage(name.to_string())),
        }
    }

    /// Infers the language from a path's extension.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedLanguage` when the extension is unknown.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_ext(ext).ok_or_else(|| Error::UnsupportedLanguage(path.display().to_string()))
    }

    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Java => &["java"],
            Self::Python => &["py", "pyi"],
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Python => "python",
        }
    }

    #[must_use]
    pub fn grammar(self) -> Language {
        match self {
            Self::Java => tree_sitter_java::language(),
            Self::Python => tree_sitter_python::language(),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses one source text into a compilation unit.
///
/// `origin` names the text in error messages.
///
/// # Errors
/// Returns `Error::Parse` with the first offending line when the grammar
/// reports a syntax error.
pub fn parse_source(lang: Lang, origin: &str, text: &str) -> Result<Node> {
    let mut parser = Parser::new();
    parser
        .set_language(&lang.grammar())
        .map_err(|e| Error::Other(format!("{lang} grammar rejected: {e}")))?;
    let tree = parser
        .parse(text, None)
        .ok_or_else(|| Error::Other(format!("{origin}: parser returned no tree")))?;

    let root = tree.root_node();
    if let Some(line) = first_error_line(root) {
        return Err(Error::Parse {
            origin: origin.to_string(),
            line,
        });
    }

    let bytes = text.as_bytes();
    let node = match lang {
        Lang::Java => java::JavaLowering::new(bytes).lower(root)?,
        Lang::Python => python::PythonLowering::new(bytes).lower(root)?,
    };
    debug!(origin, %lang, nodes = node.size(), "parsed");
    Ok(node)
}

/// Parses several files into one project tree.
///
/// Every file is its own compilation unit under the project's unordered
/// `units`, so file order and file boundaries do not affect comparison.
/// A single file is wrapped too, which adds its unit to the denominator.
///
/// # Errors
/// Propagates read and parse failures of any file.
pub fn parse_files(lang: Lang, paths: &[PathBuf]) -> Result<Node> {
    let mut project = Node::new(Kind::Project);
    for path in paths {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        let unit = parse_source(lang, &path.display().to_string(), &text)?;
        project.push(Field::Units, unit)?;
    }
    Ok(project)
}

/// Discovers and parses every source file of `lang` below `root`.
///
/// # Errors
/// Propagates discovery, read and parse failures.
pub fn parse_project(lang: Lang, root: &Path, excludes: &[String]) -> Result<Node> {
    let files = source::discover(root, lang, excludes)?;
    debug!(root = %root.display(), files = files.len(), "discovered sources");
    parse_files(lang, &files)
}
