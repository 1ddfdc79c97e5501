// src/ast/mod.rs
//! Immutable syntax-tree model consumed by the scorer.
//!
//! A [`Node`] has a [`Kind`], an optional token (operator, literal value,
//! keyword or identifier text) and one attribute per slot of the kind's
//! [`Kind::layout`]. Attributes are scalar, ordered or unordered; the
//! builder methods refuse fields the layout does not declare, so two nodes
//! of the same kind always have aligned attributes.

pub mod kind;
pub mod ops;

pub use kind::{Category, Field, Kind, Shape};
pub use ops::BinaryOp;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Children stored under one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", content = "nodes", rename_all = "snake_case")]
pub enum Slot {
    Scalar(Option<Box<Node>>),
    Ordered(Vec<Node>),
    Unordered(Vec<Node>),
}

impl Slot {
    #[must_use]
    pub fn empty(shape: Shape) -> Self {
        match shape {
            Shape::Scalar => Self::Scalar(None),
            Shape::Ordered => Self::Ordered(Vec::new()),
            Shape::Unordered => Self::Unordered(Vec::new()),
        }
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Scalar(_) => Shape::Scalar,
            Self::Ordered(_) => Shape::Ordered,
            Self::Unordered(_) => Shape::Unordered,
        }
    }

    /// Children of this slot; a scalar yields zero or one node.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        match self {
            Self::Scalar(Some(node)) => std::slice::from_ref(node.as_ref()),
            Self::Scalar(None) => &[],
            Self::Ordered(nodes) | Self::Unordered(nodes) => nodes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attr {
    pub field: Field,
    pub slot: Slot,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attrs: Vec<Attr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<Box<Node>>,
}

impl Node {
    /// Creates a node with every declared attribute empty.
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        let attrs = kind
            .layout()
            .iter()
            .map(|&(field, shape)| Attr {
                field,
                slot: Slot::empty(shape),
            })
            .collect();
        Self {
            kind,
            token: None,
            attrs,
            comment: None,
        }
    }

    /// Creates an attribute-less node carrying `token`.
    #[must_use]
    pub fn leaf(kind: Kind, token: impl Into<String>) -> Self {
        Self::new(kind).with_token(token)
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: Node) -> Self {
        self.comment = Some(Box::new(comment));
        self
    }

    pub fn set_comment(&mut self, comment: Node) {
        self.comment = Some(Box::new(comment));
    }

    /// Builder form of [`Node::set`] / [`Node::push`], chosen by the slot shape.
    ///
    /// # Errors
    /// Returns `Error::Schema` if `field` is not declared for this kind.
    pub fn with(mut self, field: Field, child: Node) -> Result<Self> {
        match self.kind.shape_of(field) {
            Some(Shape::Scalar) => self.set(field, child)?,
            Some(_) => self.push(field, child)?,
            None => return Err(self.schema_error(field)),
        }
        Ok(self)
    }

    /// Appends every child to a sequence attribute.
    ///
    /// # Errors
    /// Returns `Error::Schema` if `field` is not a sequence of this kind.
    pub fn with_all(
        mut self,
        field: Field,
        children: impl IntoIterator<Item = Node>,
    ) -> Result<Self> {
        for child in children {
            self.push(field, child)?;
        }
        Ok(self)
    }

    /// Sets a scalar attribute.
    ///
    /// # Errors
    /// Returns `Error::Schema` if `field` is not a scalar of this kind.
    pub fn set(&mut self, field: Field, child: Node) -> Result<()> {
        let err = self.schema_error(field);
        match self.slot_mut(field) {
            Some(Slot::Scalar(value)) => {
                *value = Some(Box::new(child));
                Ok(())
            }
            _ => Err(err),
        }
    }

    /// Appends to an ordered or unordered attribute.
    ///
    /// # Errors
    /// Returns `Error::Schema` if `field` is not a sequence of this kind.
    pub fn push(&mut self, field: Field, child: Node) -> Result<()> {
        let err = self.schema_error(field);
        match self.slot_mut(field) {
            Some(Slot::Ordered(nodes) | Slot::Unordered(nodes)) => {
                nodes.push(child);
                Ok(())
            }
            _ => Err(err),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    #[must_use]
    pub fn comment(&self) -> Option<&Node> {
        self.comment.as_deref()
    }

    #[must_use]
    pub fn slot(&self, field: Field) -> Option<&Slot> {
        self.attrs.iter().find(|a| a.field == field).map(|a| &a.slot)
    }

    /// The scalar child under `field`, if present.
    #[must_use]
    pub fn child(&self, field: Field) -> Option<&Node> {
        match self.slot(field)? {
            Slot::Scalar(value) => value.as_deref(),
            _ => None,
        }
    }

    /// All children under `field`; empty when absent.
    #[must_use]
    pub fn children(&self, field: Field) -> &[Node] {
        self.slot(field).map_or(&[], Slot::nodes)
    }

    /// Statements of a method body, or `None` for abstract/native signatures.
    #[must_use]
    pub fn body_statements(&self) -> Option<&[Node]> {
        if self.kind != Kind::MethodDecl {
            return None;
        }
        let body = self.child(Field::Body)?;
        (body.kind == Kind::Block).then(|| body.children(Field::Statements))
    }

    /// Number of nodes in this subtree, attached comments excluded.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self
            .attrs
            .iter()
            .flat_map(|a| a.slot.nodes())
            .map(Node::size)
            .sum::<usize>()
    }

    /// Checks that every node's attributes follow its kind's layout.
    ///
    /// # Errors
    /// Returns `Error::Schema` naming the first misplaced field.
    pub fn validate(&self) -> Result<()> {
        let layout = self.kind.layout();
        if self.attrs.len() != layout.len() {
            let field = self
                .attrs
                .iter()
                .map(|a| a.field)
                .find(|f| self.kind.shape_of(*f).is_none())
                .or_else(|| layout.iter().map(|(f, _)| *f).find(|f| self.slot(*f).is_none()))
                .unwrap_or(Field::Children);
            return Err(self.schema_error(field));
        }
        for (attr, &(field, shape)) in self.attrs.iter().zip(layout) {
            if attr.field != field || attr.slot.shape() != shape {
                return Err(self.schema_error(attr.field));
            }
            for child in attr.slot.nodes() {
                child.validate()?;
            }
        }
        match &self.comment {
            Some(comment) => comment.validate(),
            None => Ok(()),
        }
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut Slot> {
        self.attrs
            .iter_mut()
            .find(|a| a.field == field)
            .map(|a| &mut a.slot)
    }

    fn schema_error(&self, field: Field) -> Error {
        Error::Schema {
            kind: self.kind,
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Node {
        Node::leaf(Kind::Identifier, name)
    }

    #[test]
    fn test_new_fills_layout() {
        let node = Node::new(Kind::MethodDecl);
        assert_eq!(node.attrs().len(), Kind::MethodDecl.layout().len());
        assert!(node.child(Field::Body).is_none());
        assert!(node.children(Field::Parameters).is_empty());
    }

    #[test]
    fn test_with_rejects_undeclared_field() {
        let err = Node::new(Kind::Block).with(Field::Name, ident("x"));
        assert!(matches!(
            err,
            Err(Error::Schema {
                kind: Kind::Block,
                field: Field::Name
            })
        ));
    }

    #[test]
    fn test_set_rejects_sequence_field() {
        let mut block = Node::new(Kind::Block);
        assert!(block.set(Field::Statements, Node::new(Kind::Empty)).is_err());
        assert!(block.push(Field::Statements, Node::new(Kind::Empty)).is_ok());
        assert_eq!(block.children(Field::Statements).len(), 1);
    }

    #[test]
    fn test_body_statements() {
        let block = Node::new(Kind::Block)
            .with_all(Field::Statements, vec![Node::new(Kind::Empty), Node::new(Kind::Empty)])
            .unwrap();
        let method = Node::new(Kind::MethodDecl)
            .with(Field::Name, ident("run"))
            .unwrap()
            .with(Field::Body, block)
            .unwrap();
        assert_eq!(method.body_statements().map(<[Node]>::len), Some(2));
        assert_eq!(Node::new(Kind::MethodDecl).body_statements(), None);
        assert_eq!(Node::new(Kind::Block).body_statements(), None);
    }

    #[test]
    fn test_size_counts_subtree() {
        let call = Node::new(Kind::MethodCall)
            .with(Field::Name, ident("f"))
            .unwrap()
            .with_all(Field::Arguments, vec![ident("a"), ident("b")])
            .unwrap();
        assert_eq!(call.size(), 4);
    }

    #[test]
    fn test_validate_detects_reordered_attrs() {
        let mut node = Node::new(Kind::Assign);
        node.attrs.swap(0, 1);
        assert!(node.validate().is_err());
        assert!(Node::new(Kind::Assign).validate().is_ok());
    }
}
