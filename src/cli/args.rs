// src/cli/args.rs
use crate::compare::Strategy;
use crate::parse::Lang;
use crate::report::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "plagcheck",
    version,
    about = "Structural plagiarism checker for student submissions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Submission database (overrides `[store] path`)
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,
    /// Config file (default: ./plagcheck.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Source language (default: inferred from file extensions)
    #[arg(long, global = true, value_enum)]
    pub lang: Option<Lang>,
    /// Twin search used when comparing unordered lists
    #[arg(long, global = true, value_enum)]
    pub strategy: Option<Strategy>,
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SubmissionKey {
    /// Student login or other owner id
    #[arg(long)]
    pub owner: String,
    #[arg(long)]
    pub lab: u32,
}

#[derive(Args, Debug, Clone)]
pub struct SubmissionArgs {
    #[command(flatten)]
    pub key: SubmissionKey,
    /// Project directory; every source file below it is part of the submission
    #[arg(long, value_name = "DIR", conflicts_with = "files")]
    pub project: Option<PathBuf>,
    /// Source files making up the submission
    #[arg(value_name = "FILES", required_unless_present = "project")]
    pub files: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a submission and store it
    Insert(SubmissionArgs),
    /// Replace a stored submission
    Update(SubmissionArgs),
    /// Remove a stored submission
    Delete(SubmissionKey),
    /// Rank a submission against every other stored submission of its lab
    Compare {
        #[command(flatten)]
        submission: SubmissionArgs,
        /// List every candidate, not only the closest
        #[arg(long)]
        all: bool,
        /// Exit with code 4 when the best match reaches this percentage
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
        format: OutputFormat,
    },
    /// Print the stored source of a submission
    Source(SubmissionKey),
    /// Compare two files or project directories directly, without the store
    Score {
        left: PathBuf,
        right: PathBuf,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
        format: OutputFormat,
    },
}
