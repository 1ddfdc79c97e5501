// src/parse/cst.rs
//! Helpers shared by the tree-sitter lowerings.

use crate::ast::{Field, Kind, Node};
use crate::error::Result;
use tree_sitter::Node as TsNode;

pub(crate) fn named<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

pub(crate) fn all<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

pub(crate) fn by_field<'t>(node: TsNode<'t>, name: &str) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(name, &mut cursor).collect()
}

/// First named child of the given grammar kind.
pub(crate) fn child_of_kind<'t>(node: TsNode<'t>, kind: &str) -> Option<TsNode<'t>> {
    named(node).into_iter().find(|c| c.kind() == kind)
}

pub(crate) fn text<'s>(node: TsNode<'_>, src: &'s [u8]) -> &'s str {
    node.utf8_text(src).unwrap_or("")
}

pub(crate) fn is_comment(kind: &str) -> bool {
    matches!(kind, "comment" | "line_comment" | "block_comment")
}

/// 1-based row of the first error or missing node, depth-first.
pub(crate) fn first_error_line(node: TsNode<'_>) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    if !node.has_error() {
        return None;
    }
    all(node).into_iter().find_map(first_error_line)
}

pub(crate) fn comment(node: TsNode<'_>, src: &[u8]) -> Node {
    let body = text(node, src);
    let kind = if body.starts_with("/**") {
        Kind::DocComment
    } else if body.starts_with("/*") {
        Kind::BlockComment
    } else {
        Kind::LineComment
    };
    Node::leaf(kind, body)
}

/// A grammar-to-model lowering.
pub(crate) trait Lower {
    fn src(&self) -> &[u8];

    fn lower(&self, node: TsNode<'_>) -> Result<Node>;

    /// Lowers a sibling run, attaching each comment to the node after it.
    fn lower_seq<'t>(&self, items: impl IntoIterator<Item = TsNode<'t>>) -> Result<Vec<Node>> {
        let mut out = Vec::new();
        let mut pending = None;
        for item in items {
            if is_comment(item.kind()) {
                pending = Some(comment(item, self.src()));
                continue;
            }
            let mut node = self.lower(item)?;
            if let Some(c) = pending.take() {
                node.set_comment(c);
            }
            out.push(node);
        }
        Ok(out)
    }

    fn set_opt(&self, node: &mut Node, field: Field, child: Option<TsNode<'_>>) -> Result<()> {
        if let Some(child) = child {
            node.set(field, self.lower(child)?)?;
        }
        Ok(())
    }

    fn push_all<'t>(
        &self,
        node: &mut Node,
        field: Field,
        items: impl IntoIterator<Item = TsNode<'t>>,
    ) -> Result<()> {
        for child in self.lower_seq(items)? {
            node.push(field, child)?;
        }
        Ok(())
    }

    /// Grammar construct without a dedicated kind.
    fn opaque(&self, node: TsNode<'_>) -> Result<Node> {
        let children = named(node);
        if children.is_empty() {
            // leaves keep their spelling
            let spelled = format!("{}:{}", node.kind(), text(node, self.src()));
            return Ok(Node::new(Kind::Opaque).with_token(spelled));
        }
        let mut out = Node::new(Kind::Opaque).with_token(node.kind());
        self.push_all(&mut out, Field::Children, children)?;
        Ok(out)
    }
}
