// src/cli/handlers.rs
use super::args::{Cli, Commands, SubmissionArgs, SubmissionKey};
use crate::ast::Node;
use crate::codec;
use crate::compare::{self, Percentage, Scorer, Strategy};
use crate::config::Config;
use crate::error::Error;
use crate::exit::PlagExit;
use crate::parse::{self, Lang};
use crate::report::{self, OutputFormat};
use crate::source;
use crate::store::Store;
use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file values with command-line overrides applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub db: PathBuf,
    pub lang: Option<Lang>,
    pub strategy: Strategy,
    pub threshold: Option<u8>,
    pub exclude: Vec<String>,
}

impl Settings {
    /// # Errors
    /// Returns error if the config file cannot be loaded.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
        Ok(Self::from_config(config, cli))
    }

    #[must_use]
    pub fn from_config(config: Config, cli: &Cli) -> Self {
        Self {
            db: cli.db.clone().unwrap_or(config.store.path),
            lang: cli.lang.or(config.source.lang),
            strategy: cli.strategy.unwrap_or(config.scoring.strategy),
            threshold: config.scoring.threshold,
            exclude: config.source.exclude,
        }
    }

    fn open_store(&self) -> Result<Store> {
        Store::open(&self.db).with_context(|| format!("opening {}", self.db.display()))
    }

    /// Explicit language, else the first file's extension, else Java.
    fn lang_for(&self, first: Option<&Path>) -> Result<Lang> {
        if let Some(lang) = self.lang {
            return Ok(lang);
        }
        match first {
            Some(path) if path.is_file() => Ok(Lang::from_path(path)?),
            _ => Ok(Lang::Java),
        }
    }
}

/// Maps a failed command to its exit code.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> PlagExit {
    let cause = err.chain().find_map(|e| e.downcast_ref::<Error>());
    match cause {
        Some(Error::Parse { .. } | Error::UnsupportedLanguage(_) | Error::Duplicate { .. }) => {
            PlagExit::InvalidInput
        }
        Some(Error::NotFound { .. }) => PlagExit::NotFound,
        _ => PlagExit::Error,
    }
}

/// Runs one parsed command line.
///
/// # Errors
/// Returns error if the command fails.
pub fn dispatch(cli: &Cli, settings: &Settings) -> Result<PlagExit> {
    match &cli.command {
        Commands::Insert(args) => handle_insert(settings, args),
        Commands::Update(args) => handle_update(settings, args),
        Commands::Delete(key) => handle_delete(settings, key),
        Commands::Source(key) => handle_source(settings, key),
        Commands::Compare {
            submission,
            all,
            threshold,
            format,
        } => handle_compare(settings, submission, *all, threshold.or(settings.threshold), *format),
        Commands::Score {
            left,
            right,
            threshold,
            format,
        } => handle_score(settings, left, right, threshold.or(settings.threshold), *format),
    }
}

/// Parsed tree plus concatenated source text of a submission.
struct Submission {
    tree: Node,
    source: String,
}

fn load_submission(settings: &Settings, args: &SubmissionArgs) -> Result<Submission> {
    let files = match &args.project {
        Some(dir) => {
            let lang = settings.lang_for(None)?;
            source::discover(dir, lang, &settings.exclude)
                .with_context(|| format!("scanning {}", dir.display()))?
        }
        None => args.files.clone(),
    };
    let lang = match &args.project {
        Some(_) => settings.lang_for(None)?,
        None => settings.lang_for(files.first().map(PathBuf::as_path))?,
    };
    if files.is_empty() {
        warn!(owner = %args.key.owner, "submission has no {lang} source files");
    }
    let tree = parse::parse_files(lang, &files)?;
    let source = source::load_files(&files)?;
    debug!(owner = %args.key.owner, lab = args.key.lab, files = files.len(), "submission loaded");
    Ok(Submission { tree, source })
}

/// A path that is either one source file or a project directory.
fn load_path(settings: &Settings, path: &Path) -> Result<Node> {
    let tree = if path.is_dir() {
        parse::parse_project(settings.lang_for(None)?, path, &settings.exclude)?
    } else {
        parse::parse_files(settings.lang_for(Some(path))?, &[path.to_path_buf()])?
    };
    Ok(tree)
}

fn handle_insert(settings: &Settings, args: &SubmissionArgs) -> Result<PlagExit> {
    let sub = load_submission(settings, args)?;
    let store = settings.open_store()?;
    store.insert(&args.key.owner, args.key.lab, &codec::encode(&sub.tree)?, &sub.source)?;
    println!(
        "{} Stored {} for lab {}.",
        "OK".green().bold(),
        args.key.owner.bold(),
        args.key.lab
    );
    Ok(PlagExit::Success)
}

fn handle_update(settings: &Settings, args: &SubmissionArgs) -> Result<PlagExit> {
    let sub = load_submission(settings, args)?;
    let store = settings.open_store()?;
    store.update(&args.key.owner, args.key.lab, &codec::encode(&sub.tree)?, &sub.source)?;
    println!(
        "{} Updated {} for lab {}.",
        "OK".green().bold(),
        args.key.owner.bold(),
        args.key.lab
    );
    Ok(PlagExit::Success)
}

fn handle_delete(settings: &Settings, key: &SubmissionKey) -> Result<PlagExit> {
    settings.open_store()?.delete(&key.owner, key.lab)?;
    println!(
        "{} Deleted {} for lab {}.",
        "OK".green().bold(),
        key.owner.bold(),
        key.lab
    );
    Ok(PlagExit::Success)
}

fn handle_source(settings: &Settings, key: &SubmissionKey) -> Result<PlagExit> {
    let text = settings.open_store()?.source(&key.owner, key.lab)?;
    println!("{text}");
    Ok(PlagExit::Success)
}

fn handle_compare(
    settings: &Settings,
    args: &SubmissionArgs,
    all: bool,
    threshold: Option<u8>,
    format: OutputFormat,
) -> Result<PlagExit> {
    let current = load_submission(settings, args)?.tree;
    let store = settings.open_store()?;
    let key = &args.key;

    let mut candidates = BTreeMap::new();
    for (owner, bytes) in store.find_for_lab(key.lab, &key.owner)? {
        match codec::decode(&bytes) {
            Ok(tree) => {
                candidates.insert(owner, tree);
            }
            Err(e) => {
                warn!(owner = %owner, lab = key.lab, error = %e, "skipping unreadable submission");
            }
        }
    }

    let scorer = Scorer::new(settings.strategy);
    let ranking = compare::rank(&scorer, &current, &candidates);
    report::print_ranking(&key.owner, key.lab, ranking.as_ref(), all, format)?;

    let best = ranking.map(|r| r.best.score.percentage);
    Ok(verdict(best, threshold))
}

fn handle_score(
    settings: &Settings,
    left: &Path,
    right: &Path,
    threshold: Option<u8>,
    format: OutputFormat,
) -> Result<PlagExit> {
    let l = load_path(settings, left).with_context(|| format!("loading {}", left.display()))?;
    let r = load_path(settings, right).with_context(|| format!("loading {}", right.display()))?;
    let score = Scorer::new(settings.strategy).score(&l, &r);
    report::print_score(
        &left.display().to_string(),
        &right.display().to_string(),
        &score,
        format,
    )?;
    Ok(verdict(Some(score.percentage), threshold))
}

fn verdict(best: Option<Percentage>, threshold: Option<u8>) -> PlagExit {
    match (best, threshold) {
        (Some(p), Some(limit)) if p.value() >= limit => PlagExit::Threshold,
        _ => PlagExit::Success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict() {
        assert_eq!(verdict(None, Some(0)), PlagExit::Success);
        assert_eq!(verdict(Some(Percentage::FULL), None), PlagExit::Success);
        assert_eq!(verdict(Some(Percentage::FULL), Some(100)), PlagExit::Threshold);
        assert_eq!(verdict(Some(Percentage::ZERO), Some(1)), PlagExit::Success);
    }

    #[test]
    fn test_exit_code_follows_cause() {
        let err = anyhow::Error::new(Error::NotFound {
            owner: "ann".into(),
            lab: 1,
        })
        .context("deleting");
        assert_eq!(exit_code(&err), PlagExit::NotFound);

        let err = anyhow::Error::new(Error::Parse {
            origin: "A.java".into(),
            line: 2,
        });
        assert_eq!(exit_code(&err), PlagExit::InvalidInput);

        assert_eq!(exit_code(&anyhow::anyhow!("boom")), PlagExit::Error);
    }
}
