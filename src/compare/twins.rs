// src/compare/twins.rs
//! Twin search for unordered sequences.
//!
//! A strategy only decides pairings; the comparator records the outcome in
//! the session. Two strategies are provided:
//! - [`GreedyFirstMatch`]: each left element takes the first structurally
//!   equal right element, in order. Right elements are never consumed, so
//!   several left elements may share a twin. Order-dependent by nature.
//! - [`MaximumMatching`]: one-to-one assignment maximising the number of
//!   paired elements (augmenting paths), exact edges tried before fuzzy ones.
//!
//! Both fall back to method-body edit distance when a method declaration has
//! no exact twin.

use super::distance;
use crate::ast::Node;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Structural equality oracle a strategy may call back into.
pub trait Equivalence<'t> {
    fn equal(&mut self, left: &'t Node, right: &'t Node) -> bool;
}

/// Replaceable twin search.
pub trait MatchStrategy {
    fn pair<'t, E: Equivalence<'t>>(
        &self,
        eq: &mut E,
        left: &'t [Node],
        right: &'t [Node],
    ) -> TwinMap<'t>;
}

#[derive(Debug, Clone, Copy)]
pub enum Twin<'t> {
    Exact(&'t Node),
    /// Method whose body is within edit distance `distance` of the left one.
    Approximate { node: &'t Node, distance: usize },
}

impl<'t> Twin<'t> {
    #[must_use]
    pub fn node(&self) -> &'t Node {
        match *self {
            Self::Exact(node) | Self::Approximate { node, .. } => node,
        }
    }
}

/// Left element → at most one right element, for one matcher call.
#[derive(Debug)]
pub struct TwinMap<'t> {
    left: &'t [Node],
    twins: Vec<Option<Twin<'t>>>,
}

impl<'t> TwinMap<'t> {
    #[must_use]
    pub fn new(left: &'t [Node]) -> Self {
        Self {
            left,
            twins: vec![None; left.len()],
        }
    }

    pub fn assign(&mut self, index: usize, twin: Twin<'t>) {
        if let Some(slot) = self.twins.get_mut(index) {
            *slot = Some(twin);
        }
    }

    #[must_use]
    pub fn twin(&self, index: usize) -> Option<Twin<'t>> {
        self.twins.get(index).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'t Node, Option<Twin<'t>>)> + '_ {
        self.left.iter().zip(self.twins.iter().copied())
    }

    #[must_use]
    pub fn paired(&self) -> usize {
        self.twins.iter().filter(|t| t.is_some()).count()
    }

    #[must_use]
    pub fn all_paired(&self) -> bool {
        self.twins.iter().all(Option::is_some)
    }
}

/// Edit distance between two method bodies, if small enough to pair them.
///
/// Accepts when the distance is at most half the left body's statement
/// count (floor). Methods without a body never qualify.
pub fn method_affinity<'t, E: Equivalence<'t>>(
    eq: &mut E,
    left: &'t Node,
    right: &'t Node,
) -> Option<usize> {
    let left_body = left.body_statements()?;
    let right_body = right.body_statements()?;
    let d = distance::distance(left_body, right_body, |a, b| eq.equal(a, b));
    (d <= left_body.len() / 2).then_some(d)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyFirstMatch;

impl GreedyFirstMatch {
    fn find<'t, E: Equivalence<'t>>(
        eq: &mut E,
        element: &'t Node,
        right: &'t [Node],
    ) -> Option<Twin<'t>> {
        // (distance, candidate); smallest distance wins, earliest on ties
        let mut fallback: Option<(usize, &'t Node)> = None;
        for candidate in right {
            if eq.equal(element, candidate) {
                return Some(Twin::Exact(candidate));
            }
            if let Some(d) = method_affinity(eq, element, candidate) {
                if fallback.map_or(true, |(best, _)| d < best) {
                    fallback = Some((d, candidate));
                }
            }
        }
        fallback.map(|(distance, node)| {
            trace!(distance, "method paired by body edit distance");
            Twin::Approximate { node, distance }
        })
    }
}

impl MatchStrategy for GreedyFirstMatch {
    fn pair<'t, E: Equivalence<'t>>(
        &self,
        eq: &mut E,
        left: &'t [Node],
        right: &'t [Node],
    ) -> TwinMap<'t> {
        let mut map = TwinMap::new(left);
        for (i, element) in left.iter().enumerate() {
            if let Some(twin) = Self::find(eq, element, right) {
                map.assign(i, twin);
            }
        }
        map
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaximumMatching;

/// Edge cost: 0 for an exact twin, `distance + 1` for a fuzzy one.
type Edge = (usize, usize);

impl MaximumMatching {
    fn edges<'t, E: Equivalence<'t>>(
        eq: &mut E,
        left: &'t [Node],
        right: &'t [Node],
    ) -> Vec<Vec<Edge>> {
        left.iter()
            .map(|element| {
                let mut edges: Vec<Edge> = right
                    .iter()
                    .enumerate()
                    .filter_map(|(j, candidate)| {
                        if eq.equal(element, candidate) {
                            Some((0, j))
                        } else {
                            method_affinity(eq, element, candidate).map(|d| (d + 1, j))
                        }
                    })
                    .collect();
                edges.sort_unstable();
                edges
            })
            .collect()
    }

    fn augment(
        i: usize,
        edges: &[Vec<Edge>],
        owner: &mut [Option<usize>],
        seen: &mut [bool],
    ) -> bool {
        for &(_, j) in &edges[i] {
            if seen[j] {
                continue;
            }
            seen[j] = true;
            let free = match owner[j] {
                None => true,
                Some(k) => Self::augment(k, edges, owner, seen),
            };
            if free {
                owner[j] = Some(i);
                return true;
            }
        }
        false
    }
}

impl MatchStrategy for MaximumMatching {
    fn pair<'t, E: Equivalence<'t>>(
        &self,
        eq: &mut E,
        left: &'t [Node],
        right: &'t [Node],
    ) -> TwinMap<'t> {
        let edges = Self::edges(eq, left, right);
        let mut owner: Vec<Option<usize>> = vec![None; right.len()];
        for i in 0..left.len() {
            let mut seen = vec![false; right.len()];
            Self::augment(i, &edges, &mut owner, &mut seen);
        }

        let mut map = TwinMap::new(left);
        for (j, i) in owner.iter().enumerate() {
            let Some(i) = *i else { continue };
            let Some(&(cost, _)) = edges[i].iter().find(|(_, k)| *k == j) else {
                continue;
            };
            let node = &right[j];
            let twin = if cost == 0 {
                Twin::Exact(node)
            } else {
                Twin::Approximate {
                    node,
                    distance: cost - 1,
                }
            };
            map.assign(i, twin);
        }
        map
    }
}

/// Runtime-selectable strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Greedy,
    Bipartite,
}

impl MatchStrategy for Strategy {
    fn pair<'t, E: Equivalence<'t>>(
        &self,
        eq: &mut E,
        left: &'t [Node],
        right: &'t [Node],
    ) -> TwinMap<'t> {
        match self {
            Self::Greedy => GreedyFirstMatch.pair(eq, left, right),
            Self::Bipartite => MaximumMatching.pair(eq, left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Kind;

    /// Equality by token only.
    struct ByToken;

    impl<'t> Equivalence<'t> for ByToken {
        fn equal(&mut self, left: &'t Node, right: &'t Node) -> bool {
            left.token() == right.token()
        }
    }

    fn tokens(values: &[&str]) -> Vec<Node> {
        values.iter().map(|v| Node::leaf(Kind::Opaque, *v)).collect()
    }

    #[test]
    fn test_greedy_shares_twins() {
        let left = tokens(&["a", "a"]);
        let right = tokens(&["a", "b"]);
        let map = GreedyFirstMatch.pair(&mut ByToken, &left, &right);
        assert!(map.all_paired());
        let first = map.twin(0).map(|t| t.node() as *const Node);
        let second = map.twin(1).map(|t| t.node() as *const Node);
        assert_eq!(first, second);
    }

    #[test]
    fn test_greedy_reports_missing() {
        let left = tokens(&["a", "c"]);
        let right = tokens(&["b", "a"]);
        let map = GreedyFirstMatch.pair(&mut ByToken, &left, &right);
        assert_eq!(map.paired(), 1);
        assert!(!map.all_paired());
        assert!(map.twin(1).is_none());
    }

    #[test]
    fn test_maximum_matching_is_one_to_one() {
        let left = tokens(&["a", "a"]);
        let right = tokens(&["a", "b"]);
        let map = MaximumMatching.pair(&mut ByToken, &left, &right);
        assert_eq!(map.paired(), 1);
    }

    #[test]
    fn test_empty_left_is_trivially_paired() {
        let right = tokens(&["a"]);
        let map = Strategy::Greedy.pair(&mut ByToken, &[], &right);
        assert!(map.all_paired());
        assert_eq!(map.paired(), 0);
    }
}
