// src/config.rs
//! `plagcheck.toml` settings.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below, and command-line flags override whatever is loaded.

use crate::compare::Strategy;
use crate::error::{Error, Result};
use crate::parse::Lang;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "plagcheck.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub strategy: Strategy,
    /// Percentage at or above which `compare` reports a hit through its
    /// exit code. Unset means never.
    #[serde(default)]
    pub threshold: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Forced language; otherwise inferred from file extensions.
    #[serde(default)]
    pub lang: Option<Lang>,
    /// Regexes matched against project-relative paths.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("plagcheck.db")
}

impl Config {
    /// Parses TOML text.
    ///
    /// # Errors
    /// Returns `Error::Config` on malformed TOML or unknown sections, and
    /// `Error::Other` for a threshold above 100.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.scoring.threshold.is_some_and(|t| t > 100) {
            return Err(Error::Other(
                "scoring.threshold must be between 0 and 100".to_string(),
            ));
        }
        Ok(config)
    }

    /// Loads `path`, or `plagcheck.toml` in the current directory.
    ///
    /// An explicit path must exist; the implicit file may be absent, in which
    /// case defaults are returned.
    ///
    /// # Errors
    /// Returns `Error::Io` when an explicit file cannot be read, or any
    /// error from [`Config::parse`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE), false),
        };
        if !required && !path.exists() {
            debug!("no {CONFIG_FILE}; using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|e| Error::io(e, &path))?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
