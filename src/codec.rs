// src/codec.rs
//! JSON persistence format for syntax trees.

use crate::ast::Node;
use crate::error::Result;

/// Serializes a tree for storage.
///
/// # Errors
/// Returns `Error::Codec` if serialization fails.
pub fn encode(node: &Node) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(node)?)
}

/// Restores a stored tree and checks it against the kind layouts.
///
/// # Errors
/// Returns `Error::Codec` on malformed JSON and `Error::Schema` when a node's
/// attributes do not follow its kind's layout.
pub fn decode(bytes: &[u8]) -> Result<Node> {
    let node: Node = serde_json::from_slice(bytes)?;
    node.validate()?;
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Field, Kind};
    use crate::error::Error;

    #[test]
    fn test_preserves_tokens_and_comments() {
        let stmt = Node::new(Kind::Return)
            .with(Field::Expression, Node::leaf(Kind::StringLiteral, "\"hi\""))
            .unwrap()
            .with_comment(Node::leaf(Kind::LineComment, "// greet"));
        let block = Node::new(Kind::Block).with(Field::Statements, stmt).unwrap();

        let restored = decode(&encode(&block).unwrap()).unwrap();
        assert_eq!(restored, block);
        let ret = &restored.children(Field::Statements)[0];
        assert_eq!(ret.comment().and_then(Node::token), Some("// greet"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(decode(b"{not json"), Err(Error::Codec(_))));
    }

    #[test]
    fn test_rejects_layout_violation() {
        let json =
            br#"{"kind":"Block","attrs":[{"field":"name","slot":{"shape":"scalar","nodes":null}}]}"#;
        assert!(matches!(decode(json), Err(Error::Schema { .. })));
    }
}
