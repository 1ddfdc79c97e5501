// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands, SubmissionArgs, SubmissionKey};
pub use handlers::{dispatch, exit_code, Settings};
