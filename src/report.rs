// src/report.rs
//! Console and JSON rendering of comparison results.

use crate::compare::{Candidate, Percentage, Ranking, Score};
use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// Similarity at which a result is highlighted as suspicious.
const HIGH: u8 = 80;
const MEDIUM: u8 = 50;

fn paint(p: Percentage) -> ColoredString {
    let text = p.to_string();
    match p.value() {
        v if v >= HIGH => text.red().bold(),
        v if v >= MEDIUM => text.yellow(),
        _ => text.green(),
    }
}

#[derive(Serialize)]
struct PairReport<'a> {
    left: &'a str,
    right: &'a str,
    #[serde(flatten)]
    score: &'a Score,
}

#[derive(Serialize)]
struct LabReport<'a> {
    owner: &'a str,
    lab: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    best: Option<&'a Candidate>,
    candidates: &'a [Candidate],
}

/// Prints the outcome of a direct two-file comparison.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn print_score(left: &str, right: &str, score: &Score, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&PairReport {
            left,
            right,
            score,
        }),
        OutputFormat::Terminal => {
            println!(
                "{} {} {} {}",
                paint(score.percentage),
                left.bold(),
                "vs".dimmed(),
                right.bold()
            );
            println!(
                "   {} {}/{} list elements have a twin{}",
                "=".blue(),
                score.matched,
                score.considered,
                if score.equal {
                    " (structurally equal)".cyan().to_string()
                } else {
                    String::new()
                }
            );
            Ok(())
        }
    }
}

/// Prints the best match of a submission among the stored ones.
///
/// `all` lists every candidate instead of only the best.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn print_ranking(
    owner: &str,
    lab: u32,
    ranking: Option<&Ranking>,
    all: bool,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        let candidates = match ranking {
            Some(r) if all => r.candidates.as_slice(),
            _ => &[],
        };
        return print_json(&LabReport {
            owner,
            lab,
            best: ranking.map(|r| &r.best),
            candidates,
        });
    }

    let Some(ranking) = ranking else {
        println!(
            "{} No stored submissions for lab {lab} besides {owner}.",
            "~".yellow().bold()
        );
        return Ok(());
    };

    let best = &ranking.best;
    println!(
        "{} {owner} (lab {lab}) is closest to {}",
        paint(best.score.percentage),
        best.owner.bold()
    );
    if all {
        for c in &ranking.candidates {
            println!(
                "   {} {:>5} {} {}",
                "|".blue(),
                paint(c.score.percentage),
                c.owner,
                format!("({}/{})", c.score.matched, c.score.considered).dimmed()
            );
        }
    }
    Ok(())
}

/// Prints a serializable object as JSON to stdout.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}
