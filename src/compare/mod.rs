// src/compare/mod.rs
//! Structural similarity scoring.
//!
//! [`Scorer::score`] compares two trees and reports the share of the left
//! tree's unordered-list elements that found a twin in the right tree.
//! Every call owns a fresh [`Session`], so independent pairs can be scored
//! concurrently. The result is directional: `score(a, b)` is "how much of
//! `a` is explained by `b`".

pub mod distance;
pub mod equality;
pub mod rank;
pub mod session;
pub mod twins;

pub use equality::Comparator;
pub use rank::{rank, Candidate, Ranking};
pub use session::{Percentage, Session};
pub use twins::{
    Equivalence, GreedyFirstMatch, MatchStrategy, MaximumMatching, Strategy, Twin, TwinMap,
};

use crate::ast::Node;
use serde::Serialize;
use tracing::{debug, warn};

/// Outcome of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub percentage: Percentage,
    /// Left-tree list elements registered in the denominator.
    pub considered: usize,
    /// Of those, the ones that found a twin.
    pub matched: usize,
    /// Whether the two roots compared equal.
    pub equal: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer<S = Strategy> {
    strategy: S,
}

impl<S: MatchStrategy> Scorer<S> {
    #[must_use]
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    #[must_use]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    #[must_use]
    pub fn score(&self, left: &Node, right: &Node) -> Score {
        let mut comparator = Comparator::new(&self.strategy);
        let equal = comparator.equal(left, right);
        let session = comparator.into_session();

        let score = Score {
            percentage: session.percentage(),
            considered: session.considered(),
            matched: session.matched(),
            equal,
        };
        if score.considered == 0 {
            warn!(
                left = ?left.kind(),
                "no list elements to compare; similarity reported as 0%"
            );
        }
        debug!(
            considered = score.considered,
            matched = score.matched,
            percentage = score.percentage.value(),
            equal,
            "scored pair"
        );
        score
    }

    /// Structural equality of two trees, ignoring the score.
    #[must_use]
    pub fn equal(&self, left: &Node, right: &Node) -> bool {
        Comparator::new(&self.strategy).equal(left, right)
    }
}

/// Similarity of `left` against `right` with the default greedy strategy.
#[must_use]
pub fn score(left: &Node, right: &Node) -> Percentage {
    Scorer::<Strategy>::default().score(left, right).percentage
}

/// Structural equality with the default greedy strategy.
#[must_use]
pub fn equal(left: &Node, right: &Node) -> bool {
    Scorer::<Strategy>::default().equal(left, right)
}
