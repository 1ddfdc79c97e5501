// src/ast/kind.rs
//! The closed set of node kinds and the attribute layout each kind declares.

use serde::{Deserialize, Serialize};

/// Syntactic category of a node.
///
/// The set is language-neutral: each parser adapter lowers its grammar onto
/// these kinds. Constructs without a dedicated kind become [`Kind::Opaque`]
/// with the grammar name kept in the node token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    // Roots and declarations
    Project,
    CompilationUnit,
    PackageDecl,
    ImportDecl,
    ClassDecl,
    EnumDecl,
    EnumConstant,
    FieldDecl,
    VariableDeclarator,
    ConstructorDecl,
    MethodDecl,
    Parameter,
    Initializer,
    TypeParameter,
    Modifier,
    Annotation,
    MemberValuePair,

    // Types
    ClassType,
    PrimitiveType,
    ArrayType,
    VoidType,
    WildcardType,
    UnionType,

    // Statements
    Block,
    LocalVarDecl,
    ExpressionStmt,
    If,
    While,
    DoWhile,
    For,
    ForEach,
    Return,
    Break,
    Continue,
    Throw,
    Try,
    Catch,
    Switch,
    SwitchEntry,
    Synchronized,
    Labeled,
    Assert,
    Yield,
    Empty,
    ExplicitCtorCall,

    // Expressions
    Binary,
    Unary,
    Assign,
    Conditional,
    MethodCall,
    FieldAccess,
    ArrayAccess,
    ArrayCreation,
    ArrayInit,
    ObjectCreation,
    Cast,
    InstanceOf,
    Lambda,
    MethodRef,
    This,
    Super,
    ClassLiteral,
    Enclosed,

    // Literals
    StringLiteral,
    IntegerLiteral,
    FloatLiteral,
    CharLiteral,
    BooleanLiteral,
    NullLiteral,
    TextBlock,

    // Names
    Identifier,
    QualifiedName,

    // Comments
    LineComment,
    BlockComment,
    DocComment,

    Opaque,
}

/// How the equality engine treats a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Bare identifier or name token: equal to any node of the same kind.
    Identifier,
    /// Comments: always equal, never a reason for a mismatch.
    Decorative,
    /// Binary expression: eligible for the commutative operand swap.
    Binary,
    /// Everything else: token plus attribute-wise comparison.
    Structural,
}

/// Attribute name within a node layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Units,
    Package,
    Imports,
    Declarations,
    Name,
    Modifiers,
    TypeParameters,
    Extends,
    Implements,
    Members,
    Constants,
    Arguments,
    Type,
    Declarators,
    Initializer,
    Parameters,
    Throws,
    Body,
    Value,
    Bounds,
    Scope,
    TypeArguments,
    Element,
    Bound,
    Types,
    Statements,
    Expression,
    Condition,
    Then,
    Else,
    Init,
    Update,
    Variable,
    Iterable,
    Label,
    Resources,
    Catches,
    Finally,
    Parameter,
    Selector,
    Entries,
    Labels,
    Message,
    Left,
    Right,
    Operand,
    Target,
    Index,
    Dimensions,
    Values,
    Children,
}

/// Structural type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Single child, possibly absent.
    Scalar,
    /// Position-significant sequence.
    Ordered,
    /// Sequence whose element order carries no weight.
    Unordered,
}

pub type Slot = (Field, Shape);

impl Kind {
    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Self::Identifier | Self::QualifiedName => Category::Identifier,
            Self::LineComment | Self::BlockComment | Self::DocComment => Category::Decorative,
            Self::Binary => Category::Binary,
            Self::Project
            | Self::CompilationUnit
            | Self::PackageDecl
            | Self::ImportDecl
            | Self::ClassDecl
            | Self::EnumDecl
            | Self::EnumConstant
            | Self::FieldDecl
            | Self::VariableDeclarator
            | Self::ConstructorDecl
            | Self::MethodDecl
            | Self::Parameter
            | Self::Initializer
            | Self::TypeParameter
            | Self::Modifier
            | Self::Annotation
            | Self::MemberValuePair
            | Self::ClassType
            | Self::PrimitiveType
            | Self::ArrayType
            | Self::VoidType
            | Self::WildcardType
            | Self::UnionType
            | Self::Block
            | Self::LocalVarDecl
            | Self::ExpressionStmt
            | Self::If
            | Self::While
            | Self::DoWhile
            | Self::For
            | Self::ForEach
            | Self::Return
            | Self::Break
            | Self::Continue
            | Self::Throw
            | Self::Try
            | Self::Catch
            | Self::Switch
            | Self::SwitchEntry
            | Self::Synchronized
            | Self::Labeled
            | Self::Assert
            | Self::Yield
            | Self::Empty
            | Self::ExplicitCtorCall
            | Self::Unary
            | Self::Assign
            | Self::Conditional
            | Self::MethodCall
            | Self::FieldAccess
            | Self::ArrayAccess
            | Self::ArrayCreation
            | Self::ArrayInit
            | Self::ObjectCreation
            | Self::Cast
            | Self::InstanceOf
            | Self::Lambda
            | Self::MethodRef
            | Self::This
            | Self::Super
            | Self::ClassLiteral
            | Self::Enclosed
            | Self::StringLiteral
            | Self::IntegerLiteral
            | Self::FloatLiteral
            | Self::CharLiteral
            | Self::BooleanLiteral
            | Self::NullLiteral
            | Self::TextBlock
            | Self::Opaque => Category::Structural,
        }
    }

    #[must_use]
    pub fn is_comment(self) -> bool {
        self.category() == Category::Decorative
    }

    /// Declared attributes of this kind, in comparison order.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn layout(self) -> &'static [Slot] {
        use Field::*;
        use Shape::{Ordered, Scalar, Unordered};

        match self {
            Self::Project => &[(Units, Unordered)],
            Self::CompilationUnit => &[
                (Imports, Unordered),
                (Package, Scalar),
                (Declarations, Unordered),
            ],
            Self::PackageDecl | Self::ImportDecl => &[(Name, Scalar)],
            Self::ClassDecl => &[
                (Extends, Unordered),
                (Implements, Unordered),
                (TypeParameters, Ordered),
                (Members, Unordered),
                (Modifiers, Unordered),
                (Name, Scalar),
            ],
            Self::EnumDecl => &[
                (Constants, Unordered),
                (Implements, Unordered),
                (Members, Unordered),
                (Modifiers, Unordered),
                (Name, Scalar),
            ],
            Self::EnumConstant => &[
                (Arguments, Ordered),
                (Members, Unordered),
                (Modifiers, Unordered),
                (Name, Scalar),
            ],
            Self::FieldDecl | Self::LocalVarDecl => &[
                (Modifiers, Unordered),
                (Type, Scalar),
                (Declarators, Ordered),
            ],
            Self::VariableDeclarator => &[(Name, Scalar), (Initializer, Scalar)],
            Self::ConstructorDecl => &[
                (Body, Scalar),
                (Modifiers, Unordered),
                (Parameters, Ordered),
                (Throws, Unordered),
                (TypeParameters, Ordered),
                (Name, Scalar),
            ],
            Self::MethodDecl => &[
                (Body, Scalar),
                (Type, Scalar),
                (Modifiers, Unordered),
                (Parameters, Ordered),
                (Throws, Unordered),
                (Name, Scalar),
                (TypeParameters, Ordered),
            ],
            Self::Parameter => &[
                (Modifiers, Unordered),
                (Type, Scalar),
                (Name, Scalar),
                (Value, Scalar),
            ],
            Self::Initializer => &[(Body, Scalar)],
            Self::TypeParameter => &[(Name, Scalar), (Bounds, Unordered)],
            Self::Annotation => &[(Name, Scalar), (Arguments, Ordered)],
            Self::MemberValuePair => &[(Name, Scalar), (Value, Scalar)],
            Self::ClassType => &[(Scope, Scalar), (Name, Scalar), (TypeArguments, Ordered)],
            Self::ArrayType => &[(Element, Scalar)],
            Self::WildcardType => &[(Bound, Scalar)],
            Self::UnionType => &[(Types, Ordered)],
            Self::Block => &[(Statements, Unordered)],
            Self::ExpressionStmt
            | Self::Return
            | Self::Throw
            | Self::Yield
            | Self::Enclosed => &[(Expression, Scalar)],
            Self::If | Self::Conditional => &[(Condition, Scalar), (Then, Scalar), (Else, Scalar)],
            Self::While => &[(Condition, Scalar), (Body, Scalar), (Else, Scalar)],
            Self::DoWhile => &[(Body, Scalar), (Condition, Scalar)],
            Self::For => &[
                (Init, Ordered),
                (Condition, Scalar),
                (Update, Ordered),
                (Body, Scalar),
            ],
            Self::ForEach => &[
                (Type, Scalar),
                (Variable, Scalar),
                (Iterable, Scalar),
                (Body, Scalar),
                (Else, Scalar),
            ],
            Self::Break | Self::Continue => &[(Label, Scalar)],
            Self::Try => &[
                (Resources, Ordered),
                (Body, Scalar),
                (Catches, Unordered),
                (Else, Scalar),
                (Finally, Scalar),
            ],
            Self::Catch => &[(Parameter, Scalar), (Body, Scalar)],
            Self::Switch => &[(Selector, Scalar), (Entries, Unordered)],
            Self::SwitchEntry => &[(Labels, Ordered), (Statements, Unordered)],
            Self::Synchronized => &[(Expression, Scalar), (Body, Scalar)],
            Self::Labeled => &[(Label, Scalar), (Body, Scalar)],
            Self::Assert => &[(Condition, Scalar), (Message, Scalar)],
            Self::ExplicitCtorCall => &[(Arguments, Ordered)],
            Self::Binary => &[(Left, Scalar), (Right, Scalar)],
            Self::Unary => &[(Operand, Scalar)],
            Self::Assign => &[(Target, Scalar), (Value, Scalar)],
            Self::MethodCall => &[
                (Scope, Scalar),
                (TypeArguments, Ordered),
                (Name, Scalar),
                (Arguments, Ordered),
            ],
            Self::FieldAccess | Self::MethodRef => &[(Scope, Scalar), (Name, Scalar)],
            Self::ArrayAccess => &[(Target, Scalar), (Index, Scalar)],
            Self::ArrayCreation => &[
                (Element, Scalar),
                (Dimensions, Ordered),
                (Initializer, Scalar),
            ],
            Self::ArrayInit => &[(Values, Ordered)],
            Self::ObjectCreation => &[
                (Scope, Scalar),
                (Type, Scalar),
                (TypeArguments, Ordered),
                (Arguments, Ordered),
                (Members, Unordered),
            ],
            Self::Cast => &[(Type, Scalar), (Expression, Scalar)],
            Self::InstanceOf => &[(Expression, Scalar), (Type, Scalar)],
            Self::Lambda => &[(Parameters, Ordered), (Body, Scalar)],
            Self::This | Self::Super => &[(Scope, Scalar)],
            Self::ClassLiteral => &[(Type, Scalar)],
            Self::Opaque => &[(Children, Ordered)],
            Self::Modifier
            | Self::PrimitiveType
            | Self::VoidType
            | Self::Empty
            | Self::StringLiteral
            | Self::IntegerLiteral
            | Self::FloatLiteral
            | Self::CharLiteral
            | Self::BooleanLiteral
            | Self::NullLiteral
            | Self::TextBlock
            | Self::Identifier
            | Self::QualifiedName
            | Self::LineComment
            | Self::BlockComment
            | Self::DocComment => &[],
        }
    }

    /// Shape of `field` in this kind's layout, if declared.
    #[must_use]
    pub fn shape_of(self, field: Field) -> Option<Shape> {
        self.layout()
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, shape)| *shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_identifier_category() {
        assert_eq!(Kind::Identifier.category(), Category::Identifier);
        assert_eq!(Kind::QualifiedName.category(), Category::Identifier);
        assert_eq!(Kind::DocComment.category(), Category::Decorative);
        assert_eq!(Kind::Binary.category(), Category::Binary);
        assert_eq!(Kind::MethodCall.category(), Category::Structural);
    }

    #[test]
    fn test_block_statements_unordered() {
        assert_eq!(Kind::Block.shape_of(Field::Statements), Some(Shape::Unordered));
        assert_eq!(Kind::MethodDecl.shape_of(Field::Parameters), Some(Shape::Ordered));
        assert_eq!(Kind::MethodCall.shape_of(Field::Arguments), Some(Shape::Ordered));
        assert_eq!(Kind::Block.shape_of(Field::Body), None);
    }

    #[test]
    fn test_layouts_have_unique_fields() {
        let kinds = [
            Kind::CompilationUnit,
            Kind::ClassDecl,
            Kind::MethodDecl,
            Kind::ConstructorDecl,
            Kind::Try,
            Kind::ObjectCreation,
        ];
        for kind in kinds {
            let layout = kind.layout();
            for (i, (field, _)) in layout.iter().enumerate() {
                assert!(
                    layout[i + 1..].iter().all(|(f, _)| f != field),
                    "{kind:?} repeats {field:?}"
                );
            }
        }
    }
}
