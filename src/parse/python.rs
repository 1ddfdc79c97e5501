// src/parse/python.rs
//! Lowering of the tree-sitter Python grammar onto [`Node`].
//!
//! Python has no dedicated declaration kinds in the model, so functions
//! become method declarations, `raise` becomes a throw and `pass` an empty
//! statement. Boolean operators are normalised to their symbolic form.

use super::cst::{all, by_field, child_of_kind, named, text, Lower};
use crate::ast::{BinaryOp, Field, Kind, Node};
use crate::error::Result;
use tree_sitter::Node as TsNode;

pub(crate) struct PythonLowering<'s> {
    src: &'s [u8],
}

impl<'s> PythonLowering<'s> {
    pub(crate) fn new(src: &'s [u8]) -> Self {
        Self { src }
    }

    fn text(&self, node: TsNode<'_>) -> &'s str {
        text(node, self.src)
    }

    fn module(&self, node: TsNode<'_>) -> Result<Node> {
        let mut unit = Node::new(Kind::CompilationUnit);
        let mut rest = Vec::new();
        for child in named(node) {
            match child.kind() {
                "import_statement" | "import_from_statement" | "future_import_statement" => {
                    unit.push(Field::Imports, self.import(child)?)?;
                }
                _ => rest.push(child),
            }
        }
        self.push_all(&mut unit, Field::Declarations, rest)?;
        Ok(unit)
    }

    fn import(&self, node: TsNode<'_>) -> Result<Node> {
        let spelled: String = self.text(node).split_whitespace().collect::<Vec<_>>().join(" ");
        Node::new(Kind::ImportDecl).with(Field::Name, Node::leaf(Kind::QualifiedName, spelled))
    }

    fn function(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::MethodDecl);
        if let Some(body) = node.child_by_field_name("body") {
            out.set(Field::Body, self.block(body)?)?;
        }
        self.set_opt(&mut out, Field::Type, node.child_by_field_name("return_type"))?;
        if all(node).iter().any(|c| c.kind() == "async") {
            out.push(Field::Modifiers, Node::leaf(Kind::Modifier, "async"))?;
        }
        if let Some(params) = node.child_by_field_name("parameters") {
            for p in named(params) {
                out.push(Field::Parameters, self.parameter(p)?)?;
            }
        }
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
        Ok(out)
    }

    fn parameter(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Parameter);
        match node.kind() {
            "identifier" => out.set(Field::Name, self.lower(node)?)?,
            "typed_parameter" => {
                let name = named(node).into_iter().find(|c| c.kind() == "identifier");
                self.set_opt(&mut out, Field::Name, name)?;
                self.set_opt(&mut out, Field::Type, node.child_by_field_name("type"))?;
            }
            "default_parameter" | "typed_default_parameter" => {
                self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
                self.set_opt(&mut out, Field::Type, node.child_by_field_name("type"))?;
                self.set_opt(&mut out, Field::Value, node.child_by_field_name("value"))?;
            }
            "list_splat_pattern" | "dictionary_splat_pattern" => {
                let marker = if node.kind() == "list_splat_pattern" { "*" } else { "**" };
                out = out.with_token(marker);
                let name = named(node).into_iter().next();
                self.set_opt(&mut out, Field::Name, name)?;
            }
            _ => return self.opaque(node),
        }
        Ok(out)
    }

    fn class(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::ClassDecl).with_token("class");
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
        if let Some(bases) = node.child_by_field_name("superclasses") {
            self.push_all(&mut out, Field::Extends, named(bases))?;
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.push_all(&mut out, Field::Members, named(body))?;
        }
        Ok(out)
    }

    /// Decorators become annotations among the definition's modifiers.
    fn decorated(&self, node: TsNode<'_>) -> Result<Node> {
        let Some(definition) = node.child_by_field_name("definition") else {
            return self.opaque(node);
        };
        let mut out = self.lower(definition)?;
        for decorator in named(node).into_iter().filter(|c| c.kind() == "decorator") {
            let mut annotation = Node::new(Kind::Annotation);
            let target = named(decorator).into_iter().next();
            self.set_opt(&mut annotation, Field::Name, target)?;
            out.push(Field::Modifiers, annotation)?;
        }
        Ok(out)
    }

    fn block(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Block);
        self.push_all(&mut out, Field::Statements, named(node))?;
        Ok(out)
    }

    /// Lowers a clause body; a bare statement is wrapped into a block.
    fn body(&self, node: TsNode<'_>) -> Result<Node> {
        match node.kind() {
            "block" => self.block(node),
            _ => Node::new(Kind::Block).with(Field::Statements, self.lower(node)?),
        }
    }

    fn set_body(&self, out: &mut Node, field: Field, node: Option<TsNode<'_>>) -> Result<()> {
        if let Some(node) = node {
            out.set(field, self.body(node)?)?;
        }
        Ok(())
    }

    fn expression_stmt(&self, node: TsNode<'_>) -> Result<Node> {
        let parts = named(node);
        let mut out = Node::new(Kind::ExpressionStmt);
        match parts.as_slice() {
            [single] => out.set(Field::Expression, self.lower(*single)?)?,
            _ => {
                let mut tuple = Node::new(Kind::ArrayInit).with_token("tuple");
                self.push_all(&mut tuple, Field::Values, parts)?;
                out.set(Field::Expression, tuple)?;
            }
        }
        Ok(out)
    }

    fn assign(&self, node: TsNode<'_>) -> Result<Node> {
        let op = node
            .child_by_field_name("operator")
            .map_or("=", |o| self.text(o));
        let mut out = Node::new(Kind::Assign).with_token(op);
        self.set_opt(&mut out, Field::Target, node.child_by_field_name("left"))?;
        self.set_opt(&mut out, Field::Value, node.child_by_field_name("right"))?;
        Ok(out)
    }

    /// `if`/`elif`/`else` chains nest as else branches.
    fn if_stmt(&self, node: TsNode<'_>) -> Result<Node> {
        let mut alternatives = by_field(node, "alternative");
        let mut tail: Option<Node> = None;
        while let Some(clause) = alternatives.pop() {
            tail = Some(match clause.kind() {
                "elif_clause" => {
                    let mut branch = Node::new(Kind::If);
                    let condition = clause.child_by_field_name("condition");
                    self.set_opt(&mut branch, Field::Condition, condition)?;
                    let consequence = clause.child_by_field_name("consequence");
                    self.set_body(&mut branch, Field::Then, consequence)?;
                    if let Some(rest) = tail.take() {
                        branch.set(Field::Else, rest)?;
                    }
                    branch
                }
                _ => match clause.child_by_field_name("body") {
                    Some(body) => self.body(body)?,
                    None => self.lower(clause)?,
                },
            });
        }

        let mut out = Node::new(Kind::If);
        self.set_opt(&mut out, Field::Condition, node.child_by_field_name("condition"))?;
        self.set_body(&mut out, Field::Then, node.child_by_field_name("consequence"))?;
        if let Some(rest) = tail {
            out.set(Field::Else, rest)?;
        }
        Ok(out)
    }

    fn else_body(&self, out: &mut Node, node: TsNode<'_>) -> Result<()> {
        let body = node
            .child_by_field_name("alternative")
            .and_then(|clause| clause.child_by_field_name("body"));
        self.set_body(out, Field::Else, body)
    }

    fn for_stmt(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::ForEach);
        self.set_opt(&mut out, Field::Variable, node.child_by_field_name("left"))?;
        self.set_opt(&mut out, Field::Iterable, node.child_by_field_name("right"))?;
        self.set_body(&mut out, Field::Body, node.child_by_field_name("body"))?;
        self.else_body(&mut out, node)?;
        Ok(out)
    }

    fn while_stmt(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::While);
        self.set_opt(&mut out, Field::Condition, node.child_by_field_name("condition"))?;
        self.set_body(&mut out, Field::Body, node.child_by_field_name("body"))?;
        self.else_body(&mut out, node)?;
        Ok(out)
    }

    fn try_stmt(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Try);
        self.set_body(&mut out, Field::Body, node.child_by_field_name("body"))?;
        for clause in named(node) {
            match clause.kind() {
                "except_clause" | "except_group_clause" => {
                    out.push(Field::Catches, self.except(clause)?)?;
                }
                "else_clause" => {
                    self.set_body(&mut out, Field::Else, clause.child_by_field_name("body"))?;
                }
                "finally_clause" => {
                    self.set_body(&mut out, Field::Finally, child_of_kind(clause, "block"))?;
                }
                _ => {}
            }
        }
        Ok(out)
    }

    fn except(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Catch);
        let mut parts: Vec<_> = named(node)
            .into_iter()
            .filter(|c| !c.is_extra())
            .collect();
        let body = parts.pop().filter(|b| b.kind() == "block");
        let mut param = Node::new(Kind::Parameter);
        let mut rest = parts.into_iter();
        // `except E as e` parses as a single as_pattern in newer grammars
        match rest.next() {
            Some(pattern) if pattern.kind() == "as_pattern" => {
                let inner = named(pattern);
                self.set_opt(&mut param, Field::Type, inner.first().copied())?;
                let alias = inner
                    .get(1)
                    .map(|a| named(*a).into_iter().next().unwrap_or(*a));
                self.set_opt(&mut param, Field::Name, alias)?;
            }
            first => {
                self.set_opt(&mut param, Field::Type, first)?;
                self.set_opt(&mut param, Field::Name, rest.next())?;
            }
        }
        out.set(Field::Parameter, param)?;
        self.set_body(&mut out, Field::Body, body)?;
        Ok(out)
    }

    fn raise(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Throw);
        self.set_opt(&mut out, Field::Expression, named(node).into_iter().next())?;
        Ok(out)
    }

    fn assert(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Assert);
        let mut parts = named(node).into_iter();
        self.set_opt(&mut out, Field::Condition, parts.next())?;
        self.set_opt(&mut out, Field::Message, parts.next())?;
        Ok(out)
    }

    fn binary(&self, node: TsNode<'_>) -> Result<Node> {
        let op = node
            .child_by_field_name("operator")
            .map_or("", |o| self.text(o));
        let op = BinaryOp::from_symbol(op).map_or(op, |b| b.symbol());
        let mut out = Node::new(Kind::Binary).with_token(op);
        self.set_opt(&mut out, Field::Left, node.child_by_field_name("left"))?;
        self.set_opt(&mut out, Field::Right, node.child_by_field_name("right"))?;
        Ok(out)
    }

    /// Two-operand comparisons become binary nodes; chains stay opaque.
    fn comparison(&self, node: TsNode<'_>) -> Result<Node> {
        let operands = named(node);
        let [left, right] = operands.as_slice() else {
            return self.opaque(node);
        };
        let between = self
            .src
            .get(left.end_byte()..right.start_byte())
            .and_then(|b| std::str::from_utf8(b).ok())
            .unwrap_or("");
        let op = between.split_whitespace().collect::<Vec<_>>().join(" ");
        let op = BinaryOp::from_symbol(&op).map_or(op.clone(), |o| o.symbol().to_string());
        Node::new(Kind::Binary)
            .with_token(op)
            .with(Field::Left, self.lower(*left)?)?
            .with(Field::Right, self.lower(*right)?)
    }

    fn unary(&self, node: TsNode<'_>) -> Result<Node> {
        let op = match node.kind() {
            "not_operator" => "!",
            _ => node
                .child_by_field_name("operator")
                .map_or("", |o| self.text(o)),
        };
        let mut out = Node::new(Kind::Unary).with_token(op);
        self.set_opt(&mut out, Field::Operand, node.child_by_field_name("argument"))?;
        Ok(out)
    }

    /// `obj.m(args)` is a scoped call; any other callee is the call name.
    fn call(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::MethodCall);
        match node.child_by_field_name("function") {
            Some(callee) if callee.kind() == "attribute" => {
                self.set_opt(&mut out, Field::Scope, callee.child_by_field_name("object"))?;
                self.set_opt(&mut out, Field::Name, callee.child_by_field_name("attribute"))?;
            }
            callee => self.set_opt(&mut out, Field::Name, callee)?,
        }
        if let Some(args) = node.child_by_field_name("arguments") {
            match args.kind() {
                "argument_list" => self.push_all(&mut out, Field::Arguments, named(args))?,
                _ => out.push(Field::Arguments, self.lower(args)?)?,
            }
        }
        Ok(out)
    }

    fn keyword_argument(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::MemberValuePair);
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
        self.set_opt(&mut out, Field::Value, node.child_by_field_name("value"))?;
        Ok(out)
    }

    fn attribute(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::FieldAccess);
        self.set_opt(&mut out, Field::Scope, node.child_by_field_name("object"))?;
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("attribute"))?;
        Ok(out)
    }

    fn subscript(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::ArrayAccess);
        self.set_opt(&mut out, Field::Target, node.child_by_field_name("value"))?;
        let indices = by_field(node, "subscript");
        if indices.len() > 1 {
            let mut tuple = Node::new(Kind::ArrayInit).with_token("tuple");
            self.push_all(&mut tuple, Field::Values, indices)?;
            out.set(Field::Index, tuple)?;
        } else {
            self.set_opt(&mut out, Field::Index, indices.first().copied())?;
        }
        Ok(out)
    }

    fn collection(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::ArrayInit).with_token(node.kind());
        self.push_all(&mut out, Field::Values, named(node))?;
        Ok(out)
    }

    /// `a if cond else b`
    fn conditional(&self, node: TsNode<'_>) -> Result<Node> {
        let mut parts = named(node).into_iter().filter(|c| !c.is_extra());
        let then = parts.next();
        let condition = parts.next();
        let otherwise = parts.next();
        let mut out = Node::new(Kind::Conditional);
        self.set_opt(&mut out, Field::Condition, condition)?;
        self.set_opt(&mut out, Field::Then, then)?;
        self.set_opt(&mut out, Field::Else, otherwise)?;
        Ok(out)
    }

    fn lambda(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Lambda);
        if let Some(params) = node.child_by_field_name("parameters") {
            for p in named(params) {
                out.push(Field::Parameters, self.parameter(p)?)?;
            }
        }
        self.set_opt(&mut out, Field::Body, node.child_by_field_name("body"))?;
        Ok(out)
    }

    fn wrap(&self, kind: Kind, field: Field, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(kind);
        let inner = named(node).into_iter().find(|c| !c.is_extra());
        self.set_opt(&mut out, field, inner)?;
        Ok(out)
    }
}

impl Lower for PythonLowering<'_> {
    fn src(&self) -> &[u8] {
        self.src
    }

    fn lower(&self, node: TsNode<'_>) -> Result<Node> {
        let leaf = |kind: Kind| -> Result<Node> { Ok(Node::leaf(kind, self.text(node))) };
        match node.kind() {
            "module" => self.module(node),
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                self.import(node)
            }
            "function_definition" => self.function(node),
            "class_definition" => self.class(node),
            "decorated_definition" => self.decorated(node),

            "block" => self.block(node),
            "expression_statement" => self.expression_stmt(node),
            "assignment" | "augmented_assignment" => self.assign(node),
            "return_statement" => self.wrap(Kind::Return, Field::Expression, node),
            "pass_statement" => Ok(Node::new(Kind::Empty)),
            "break_statement" => Ok(Node::new(Kind::Break)),
            "continue_statement" => Ok(Node::new(Kind::Continue)),
            "if_statement" => self.if_stmt(node),
            "for_statement" => self.for_stmt(node),
            "while_statement" => self.while_stmt(node),
            "try_statement" => self.try_stmt(node),
            "raise_statement" => self.raise(node),
            "assert_statement" => self.assert(node),

            "binary_operator" | "boolean_operator" => self.binary(node),
            "comparison_operator" => self.comparison(node),
            "not_operator" | "unary_operator" => self.unary(node),
            "call" => self.call(node),
            "keyword_argument" => self.keyword_argument(node),
            "attribute" => self.attribute(node),
            "subscript" => self.subscript(node),
            "list" | "tuple" | "set" | "dictionary" => self.collection(node),
            "conditional_expression" => self.conditional(node),
            "lambda" => self.lambda(node),
            "parenthesized_expression" => self.wrap(Kind::Enclosed, Field::Expression, node),
            "type" => match named(node).into_iter().next() {
                Some(inner) => self.lower(inner),
                None => self.opaque(node),
            },

            "identifier" => leaf(Kind::Identifier),
            "dotted_name" => leaf(Kind::QualifiedName),
            "string" | "concatenated_string" => leaf(Kind::StringLiteral),
            "integer" => leaf(Kind::IntegerLiteral),
            "float" => leaf(Kind::FloatLiteral),
            "true" | "false" => leaf(Kind::BooleanLiteral),
            "none" => leaf(Kind::NullLiteral),
            _ => self.opaque(node),
        }
    }
}
