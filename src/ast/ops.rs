// src/ast/ops.rs
use serde::{Deserialize, Serialize};

/// Binary operators, normalised across source languages.
///
/// Binary nodes carry the operator symbol as their token; adapters map
/// language spellings (`and`, `or`) onto these symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitAnd,
    Xor,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    LeftShift,
    SignedRightShift,
    UnsignedRightShift,
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
    FloorDivide,
    Power,
    MatMul,
    In,
    NotIn,
    Is,
    IsNot,
}

impl BinaryOp {
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "||" | "or" => Self::Or,
            "&&" | "and" => Self::And,
            "|" => Self::BitOr,
            "&" => Self::BitAnd,
            "^" => Self::Xor,
            "==" => Self::Equals,
            "!=" | "<>" => Self::NotEquals,
            "<" => Self::Less,
            ">" => Self::Greater,
            "<=" => Self::LessEquals,
            ">=" => Self::GreaterEquals,
            "<<" => Self::LeftShift,
            ">>" => Self::SignedRightShift,
            ">>>" => Self::UnsignedRightShift,
            "+" => Self::Plus,
            "-" => Self::Minus,
            "*" => Self::Multiply,
            "/" => Self::Divide,
            "%" => Self::Remainder,
            "//" => Self::FloorDivide,
            "**" => Self::Power,
            "@" => Self::MatMul,
            "in" => Self::In,
            "not in" => Self::NotIn,
            "is" => Self::Is,
            "is not" => Self::IsNot,
            _ => return None,
        };
        Some(op)
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::BitOr => "|",
            Self::BitAnd => "&",
            Self::Xor => "^",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEquals => "<=",
            Self::GreaterEquals => ">=",
            Self::LeftShift => "<<",
            Self::SignedRightShift => ">>",
            Self::UnsignedRightShift => ">>>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::FloorDivide => "//",
            Self::Power => "**",
            Self::MatMul => "@",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Is => "is",
            Self::IsNot => "is not",
        }
    }

    /// Operators whose operand order does not affect comparison.
    #[must_use]
    pub fn is_commutative(self) -> bool {
        matches!(
            self,
            Self::Or
                | Self::And
                | Self::BitOr
                | Self::BitAnd
                | Self::Xor
                | Self::Equals
                | Self::NotEquals
                | Self::Plus
                | Self::Multiply
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_spellings_normalise() {
        assert_eq!(BinaryOp::from_symbol("and"), Some(BinaryOp::And));
        assert_eq!(BinaryOp::from_symbol("or").map(BinaryOp::symbol), Some("||"));
        assert_eq!(BinaryOp::from_symbol("<=>"), None);
    }

    #[test]
    fn test_commutative_set() {
        assert!(BinaryOp::Plus.is_commutative());
        assert!(BinaryOp::Xor.is_commutative());
        assert!(!BinaryOp::Minus.is_commutative());
        assert!(!BinaryOp::Less.is_commutative());
        assert!(!BinaryOp::Power.is_commutative());
    }
}
