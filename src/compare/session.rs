// src/compare/session.rs
//! Per-comparison score accumulator.
//!
//! Counts are keyed by exact structure (names, literals and comments
//! included): two identical statements in the left tree are one entry.

use crate::ast::Node;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Share of the left tree's list elements that found a twin, `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(100);

    /// `floor(100 * matched / considered)`; an empty denominator yields 0.
    #[must_use]
    pub fn of(matched: usize, considered: usize) -> Self {
        if considered == 0 {
            return Self::ZERO;
        }
        let ratio = matched.min(considered).saturating_mul(100) / considered;
        Self(u8::try_from(ratio).unwrap_or(100))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Considered/matched sets for one top-level comparison.
///
/// Both sets only grow until [`Session::reset`]; every matched node is also
/// considered.
#[derive(Default)]
pub struct Session<'t> {
    considered: HashSet<&'t Node>,
    matched: HashSet<&'t Node>,
}

impl<'t> Session<'t> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.considered.clear();
        self.matched.clear();
    }

    /// Registers `node` in the denominator. Re-adding is a no-op.
    pub fn consider(&mut self, node: &'t Node) {
        self.considered.insert(node);
    }

    /// Registers `node` as having a twin; also considers it.
    pub fn mark_matched(&mut self, node: &'t Node) {
        self.consider(node);
        self.matched.insert(node);
    }

    #[must_use]
    pub fn is_considered(&self, node: &Node) -> bool {
        self.considered.contains(node)
    }

    #[must_use]
    pub fn is_matched(&self, node: &Node) -> bool {
        self.matched.contains(node)
    }

    #[must_use]
    pub fn considered(&self) -> usize {
        self.considered.len()
    }

    #[must_use]
    pub fn matched(&self) -> usize {
        self.matched.len()
    }

    #[must_use]
    pub fn percentage(&self) -> Percentage {
        Percentage::of(self.matched(), self.considered())
    }
}

impl fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("considered", &self.considered())
            .field("matched", &self.matched())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Kind;

    #[test]
    fn test_percentage_floors() {
        assert_eq!(Percentage::of(2, 3).value(), 66);
        assert_eq!(Percentage::of(29, 100).value(), 29);
        assert_eq!(Percentage::of(5, 5), Percentage::FULL);
    }

    #[test]
    fn test_empty_denominator_is_zero() {
        assert_eq!(Percentage::of(0, 0), Percentage::ZERO);
        assert_eq!(Session::new().percentage(), Percentage::ZERO);
    }

    #[test]
    fn test_identical_nodes_count_once() {
        let a = Node::leaf(Kind::IntegerLiteral, "1");
        let b = Node::leaf(Kind::IntegerLiteral, "1");
        let c = Node::leaf(Kind::IntegerLiteral, "2");
        let mut session = Session::new();
        session.consider(&a);
        session.consider(&b);
        session.consider(&c);
        assert_eq!(session.considered(), 2);
        session.mark_matched(&b);
        assert!(session.is_matched(&a));
        assert!(!session.is_matched(&c));
    }

    #[test]
    fn test_matched_implies_considered() {
        let a = Node::new(Kind::Empty);
        let mut session = Session::new();
        session.mark_matched(&a);
        assert!(session.is_considered(&a));
        assert_eq!(session.percentage(), Percentage::FULL);
        session.reset();
        assert_eq!(session.considered(), 0);
        assert_eq!(session.matched(), 0);
    }
}
