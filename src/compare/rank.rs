// src/compare/rank.rs
//! Ranking one submission against many stored ones.

use super::{MatchStrategy, Score, Scorer};
use crate::ast::Node;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub owner: String,
    #[serde(flatten)]
    pub score: Score,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ranking {
    pub best: Candidate,
    /// Every candidate, best first.
    pub candidates: Vec<Candidate>,
}

/// Scores `current` against every candidate and picks the closest.
///
/// Pairs are scored in parallel, each with its own session. Highest
/// percentage wins; ties go to the lexicographically smallest owner id.
/// Returns `None` when there are no candidates.
#[must_use]
pub fn rank<S>(
    scorer: &Scorer<S>,
    current: &Node,
    candidates: &BTreeMap<String, Node>,
) -> Option<Ranking>
where
    S: MatchStrategy + Sync,
{
    let mut scored: Vec<Candidate> = candidates
        .par_iter()
        .map(|(owner, tree)| Candidate {
            owner: owner.clone(),
            score: scorer.score(current, tree),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .percentage
            .cmp(&a.score.percentage)
            .then_with(|| a.owner.cmp(&b.owner))
    });

    let best = scored.first()?.clone();
    Some(Ranking {
        best,
        candidates: scored,
    })
}
