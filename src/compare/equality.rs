// src/compare/equality.rs
//! Recursive structural equality between two trees.
//!
//! Same kind is required; then the kind's category decides:
//! identifiers and comments are always equal, binary expressions may match
//! with swapped operands under a commutative operator, and every other kind
//! compares its token and each declared attribute. Scalars recurse, ordered
//! sequences compare positionally, unordered sequences go through the twin
//! search, whose outcome is recorded in the session.

use super::session::Session;
use super::twins::{Equivalence, MatchStrategy};
use crate::ast::{Attr, BinaryOp, Category, Field, Node, Slot};

pub struct Comparator<'t, 's, S> {
    strategy: &'s S,
    session: Session<'t>,
}

impl<'t, 's, S: MatchStrategy> Comparator<'t, 's, S> {
    #[must_use]
    pub fn new(strategy: &'s S) -> Self {
        Self {
            strategy,
            session: Session::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session<'t> {
        &self.session
    }

    #[must_use]
    pub fn into_session(self) -> Session<'t> {
        self.session
    }

    /// Clears the session before another top-level comparison.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn equal(&mut self, left: &'t Node, right: &'t Node) -> bool {
        if left.kind() != right.kind() {
            return false;
        }
        match left.kind().category() {
            Category::Identifier | Category::Decorative => true,
            Category::Binary => self.binary_equal(left, right),
            Category::Structural => self.structural_equal(left, right),
        }
    }

    /// Both absent is equal; exactly one absent is not.
    pub fn equal_opt(&mut self, left: Option<&'t Node>, right: Option<&'t Node>) -> bool {
        match (left, right) {
            (None, None) => true,
            (Some(l), Some(r)) => self.equal(l, r),
            _ => false,
        }
    }

    /// Twin search over two unordered sequences.
    ///
    /// Every left element is considered; those that found a twin are marked
    /// matched. True iff all of them did.
    pub fn match_unordered(&mut self, left: &'t [Node], right: &'t [Node]) -> bool {
        let strategy = self.strategy;
        let twins = strategy.pair(self, left, right);
        for (node, twin) in twins.iter() {
            if twin.is_some() {
                self.session.mark_matched(node);
            } else {
                self.session.consider(node);
            }
        }
        twins.all_paired()
    }

    fn binary_equal(&mut self, left: &'t Node, right: &'t Node) -> bool {
        if left.token() != right.token() {
            return false;
        }
        let commutative = left
            .token()
            .and_then(BinaryOp::from_symbol)
            .is_some_and(BinaryOp::is_commutative);
        if commutative
            && self.equal_opt(left.child(Field::Left), right.child(Field::Right))
            && self.equal_opt(left.child(Field::Right), right.child(Field::Left))
        {
            return true;
        }
        self.structural_equal(left, right)
    }

    fn structural_equal(&mut self, left: &'t Node, right: &'t Node) -> bool {
        if left.token() != right.token() || left.attrs().len() != right.attrs().len() {
            return false;
        }
        left.attrs()
            .iter()
            .zip(right.attrs())
            .all(|(l, r)| self.attr_equal(l, r))
    }

    fn attr_equal(&mut self, left: &'t Attr, right: &'t Attr) -> bool {
        if left.field != right.field {
            return false;
        }
        match (&left.slot, &right.slot) {
            (Slot::Scalar(l), Slot::Scalar(r)) => self.equal_opt(l.as_deref(), r.as_deref()),
            (Slot::Ordered(l), Slot::Ordered(r)) => {
                l.len() == r.len() && l.iter().zip(r).all(|(a, b)| self.equal(a, b))
            }
            (Slot::Unordered(l), Slot::Unordered(r)) => self.match_unordered(l, r),
            _ => false,
        }
    }
}

impl<'t, S: MatchStrategy> Equivalence<'t> for Comparator<'t, '_, S> {
    fn equal(&mut self, left: &'t Node, right: &'t Node) -> bool {
        Comparator::equal(self, left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Kind;
    use crate::compare::twins::GreedyFirstMatch;

    fn ident(name: &str) -> Node {
        Node::leaf(Kind::Identifier, name)
    }

    fn int(value: &str) -> Node {
        Node::leaf(Kind::IntegerLiteral, value)
    }

    fn binary(op: &str, left: Node, right: Node) -> Node {
        Node::new(Kind::Binary)
            .with_token(op)
            .with(Field::Left, left)
            .unwrap()
            .with(Field::Right, right)
            .unwrap()
    }

    fn eq(left: &Node, right: &Node) -> bool {
        Comparator::new(&GreedyFirstMatch).equal(left, right)
    }

    #[test]
    fn test_absence() {
        let strategy = GreedyFirstMatch;
        let mut cmp = Comparator::new(&strategy);
        let x = ident("x");
        assert!(cmp.equal_opt(None, None));
        assert!(!cmp.equal_opt(Some(&x), None));
        assert!(!cmp.equal_opt(None, Some(&x)));
    }

    #[test]
    fn test_identifiers_ignore_text() {
        assert!(eq(&ident("total"), &ident("acc")));
        assert!(!eq(&ident("x"), &Node::leaf(Kind::QualifiedName, "x")));
    }

    #[test]
    fn test_comments_ignore_text() {
        let a = Node::leaf(Kind::LineComment, "// one");
        let b = Node::leaf(Kind::LineComment, "// two");
        assert!(eq(&a, &b));
        assert!(!eq(&a, &Node::leaf(Kind::BlockComment, "/* one */")));
    }

    #[test]
    fn test_literal_values_matter() {
        assert!(eq(&int("1"), &int("1")));
        assert!(!eq(&int("1"), &int("2")));
    }

    #[test]
    fn test_commutative_swap() {
        let ab = binary("+", ident("a"), int("1"));
        let ba = binary("+", int("1"), ident("a"));
        assert!(eq(&ab, &ba));

        let ab = binary("-", ident("a"), int("1"));
        let ba = binary("-", int("1"), ident("a"));
        assert!(!eq(&ab, &ba));
    }

    #[test]
    fn test_swap_needs_identical_operators() {
        let ab = binary("+", ident("a"), int("1"));
        let ba = binary("*", int("1"), ident("a"));
        assert!(!eq(&ab, &ba));
    }

    #[test]
    fn test_ordered_is_positional() {
        let call = |args: Vec<Node>| {
            Node::new(Kind::MethodCall)
                .with(Field::Name, ident("f"))
                .unwrap()
                .with_all(Field::Arguments, args)
                .unwrap()
        };
        assert!(eq(&call(vec![int("1"), ident("x")]), &call(vec![int("1"), ident("y")])));
        assert!(!eq(&call(vec![int("1"), ident("x")]), &call(vec![ident("x"), int("1")])));
        assert!(!eq(&call(vec![int("1")]), &call(vec![int("1"), int("2")])));
    }

    #[test]
    fn test_unordered_registers_left_elements() {
        let block = |stmts: Vec<Node>| {
            Node::new(Kind::Block)
                .with_all(Field::Statements, stmts)
                .unwrap()
        };
        let left = block(vec![Node::new(Kind::Empty), Node::new(Kind::Break)]);
        let right = block(vec![Node::new(Kind::Break)]);

        let strategy = GreedyFirstMatch;
        let mut cmp = Comparator::new(&strategy);
        assert!(!cmp.equal(&left, &right));
        let session = cmp.into_session();
        assert_eq!(session.considered(), 2);
        assert_eq!(session.matched(), 1);
    }
}
