// src/parse/java.rs
//! Lowering of the tree-sitter Java grammar onto [`Node`].

use super::cst::{all, by_field, child_of_kind, named, text, Lower};
use crate::ast::{BinaryOp, Field, Kind, Node};
use crate::error::Result;
use tree_sitter::Node as TsNode;

fn unparen(node: TsNode<'_>) -> TsNode<'_> {
    match node.kind() {
        "parenthesized_expression" => named(node).into_iter().next().unwrap_or(node),
        _ => node,
    }
}

/// Instance initializer blocks sit directly in a class body.
fn is_member(node: TsNode<'_>) -> bool {
    node.parent()
        .is_some_and(|p| matches!(p.kind(), "class_body" | "enum_body_declarations"))
}

pub(crate) struct JavaLowering<'s> {
    src: &'s [u8],
}

impl<'s> JavaLowering<'s> {
    pub(crate) fn new(src: &'s [u8]) -> Self {
        Self { src }
    }

    fn text(&self, node: TsNode<'_>) -> &'s str {
        text(node, self.src)
    }

    fn ident(&self, node: TsNode<'_>) -> Node {
        Node::leaf(Kind::Identifier, self.text(node))
    }

    /// Keyword modifiers and annotations, in source order.
    fn modifiers(&self, out: &mut Node, node: TsNode<'_>) -> Result<()> {
        let Some(mods) = child_of_kind(node, "modifiers") else {
            return Ok(());
        };
        for m in all(mods) {
            if m.is_extra() {
                continue;
            }
            let lowered = if m.is_named() {
                self.lower(m)?
            } else {
                Node::leaf(Kind::Modifier, self.text(m))
            };
            out.push(Field::Modifiers, lowered)?;
        }
        Ok(())
    }

    /// Element types of a `type_list` wrapper such as `super_interfaces`.
    fn type_list<'t>(&self, wrapper: Option<TsNode<'t>>) -> Vec<TsNode<'t>> {
        wrapper
            .map(|w| match child_of_kind(w, "type_list") {
                Some(list) => named(list),
                None => named(w),
            })
            .unwrap_or_default()
    }

    /// Conditions are stored without their parentheses.
    fn condition(&self, out: &mut Node, node: Option<TsNode<'_>>) -> Result<()> {
        self.set_opt(out, Field::Condition, node.map(unparen))
    }

    fn program(&self, node: TsNode<'_>) -> Result<Node> {
        let mut unit = Node::new(Kind::CompilationUnit);
        let mut rest = Vec::new();
        for child in named(node) {
            match child.kind() {
                "package_declaration" => unit.set(Field::Package, self.lower(child)?)?,
                "import_declaration" => unit.push(Field::Imports, self.lower(child)?)?,
                _ => rest.push(child),
            }
        }
        self.push_all(&mut unit, Field::Declarations, rest)?;
        Ok(unit)
    }

    fn package(&self, node: TsNode<'_>) -> Result<Node> {
        let name = named(node)
            .into_iter()
            .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"));
        let mut out = Node::new(Kind::PackageDecl);
        self.set_opt(&mut out, Field::Name, name)?;
        Ok(out)
    }

    fn import(&self, node: TsNode<'_>) -> Result<Node> {
        let mut flags = Vec::new();
        let mut name = None;
        for child in all(node) {
            match child.kind() {
                "static" => flags.push("static"),
                "asterisk" => flags.push("*"),
                "identifier" | "scoped_identifier" => name = Some(child),
                _ => {}
            }
        }
        let mut out = Node::new(Kind::ImportDecl);
        if !flags.is_empty() {
            out = out.with_token(flags.join(" "));
        }
        self.set_opt(&mut out, Field::Name, name)?;
        Ok(out)
    }

    fn class_like(&self, node: TsNode<'_>) -> Result<Node> {
        let keyword = match node.kind() {
            "interface_declaration" => "interface",
            "record_declaration" => "record",
            "annotation_type_declaration" => "@interface",
            _ => "class",
        };
        let mut out = Node::new(Kind::ClassDecl).with_token(keyword);
        self.modifiers(&mut out, node)?;
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
        if let Some(params) = node.child_by_field_name("type_parameters") {
            self.push_all(&mut out, Field::TypeParameters, named(params))?;
        }

        let extends = match node.kind() {
            "interface_declaration" => self.type_list(child_of_kind(node, "extends_interfaces")),
            _ => self.type_list(node.child_by_field_name("superclass")),
        };
        self.push_all(&mut out, Field::Extends, extends)?;
        let implements = self.type_list(node.child_by_field_name("interfaces"));
        self.push_all(&mut out, Field::Implements, implements)?;

        // record components live next to the members
        if let Some(components) = node.child_by_field_name("parameters") {
            self.push_all(&mut out, Field::Members, named(components))?;
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.push_all(&mut out, Field::Members, named(body))?;
        }
        Ok(out)
    }

    fn enum_decl(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::EnumDecl);
        self.modifiers(&mut out, node)?;
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
        let implements = self.type_list(node.child_by_field_name("interfaces"));
        self.push_all(&mut out, Field::Implements, implements)?;

        let Some(body) = node.child_by_field_name("body") else {
            return Ok(out);
        };
        let mut constants = Vec::new();
        let mut members = Vec::new();
        for child in named(body) {
            match child.kind() {
                "enum_constant" => constants.push(child),
                "enum_body_declarations" => members.extend(named(child)),
                _ => members.push(child),
            }
        }
        self.push_all(&mut out, Field::Constants, constants)?;
        self.push_all(&mut out, Field::Members, members)?;
        Ok(out)
    }

    fn enum_constant(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::EnumConstant);
        self.modifiers(&mut out, node)?;
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
        if let Some(args) = node.child_by_field_name("arguments") {
            self.push_all(&mut out, Field::Arguments, named(args))?;
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.push_all(&mut out, Field::Members, named(body))?;
        }
        Ok(out)
    }

    fn variable_decl(&self, node: TsNode<'_>, kind: Kind) -> Result<Node> {
        let mut out = Node::new(kind);
        self.modifiers(&mut out, node)?;
        self.set_opt(&mut out, Field::Type, node.child_by_field_name("type"))?;
        self.push_all(&mut out, Field::Declarators, by_field(node, "declarator"))?;
        Ok(out)
    }

    fn declarator(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::VariableDeclarator);
        if let Some(dims) = node.child_by_field_name("dimensions") {
            out = out.with_token(self.text(dims).replace(char::is_whitespace, ""));
        }
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
        self.set_opt(&mut out, Field::Initializer, node.child_by_field_name("value"))?;
        Ok(out)
    }

    fn throws(&self, out: &mut Node, node: TsNode<'_>) -> Result<()> {
        if let Some(throws) = child_of_kind(node, "throws") {
            self.push_all(out, Field::Throws, named(throws))?;
        }
        Ok(())
    }

    fn method(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::MethodDecl);
        self.set_opt(&mut out, Field::Body, node.child_by_field_name("body"))?;
        self.set_opt(&mut out, Field::Type, node.child_by_field_name("type"))?;
        self.modifiers(&mut out, node)?;
        if let Some(params) = node.child_by_field_name("parameters") {
            self.push_all(&mut out, Field::Parameters, named(params))?;
        }
        self.throws(&mut out, node)?;
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
        if let Some(params) = node.child_by_field_name("type_parameters") {
            self.push_all(&mut out, Field::TypeParameters, named(params))?;
        }
        Ok(out)
    }

    fn constructor(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::ConstructorDecl);
        if node.kind() == "compact_constructor_declaration" {
            out = out.with_token("compact");
        }
        self.modifiers(&mut out, node)?;
        if let Some(params) = node.child_by_field_name("type_parameters") {
            self.push_all(&mut out, Field::TypeParameters, named(params))?;
        }
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
        if let Some(params) = node.child_by_field_name("parameters") {
            self.push_all(&mut out, Field::Parameters, named(params))?;
        }
        self.throws(&mut out, node)?;
        if let Some(body) = node.child_by_field_name("body") {
            out.set(Field::Body, self.block(body)?)?;
        }
        Ok(out)
    }

    fn parameter(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Parameter);
        self.modifiers(&mut out, node)?;
        match node.kind() {
            "spread_parameter" => {
                out = out.with_token("...");
                let parts: Vec<_> = named(node)
                    .into_iter()
                    .filter(|c| c.kind() != "modifiers")
                    .collect();
                if let Some(ty) = parts.first() {
                    out.set(Field::Type, self.lower(*ty)?)?;
                }
                let name = parts
                    .iter()
                    .find(|c| c.kind() == "variable_declarator")
                    .and_then(|d| d.child_by_field_name("name"));
                self.set_opt(&mut out, Field::Name, name)?;
            }
            _ => {
                self.set_opt(&mut out, Field::Type, node.child_by_field_name("type"))?;
                self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
            }
        }
        Ok(out)
    }

    fn type_parameter(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::TypeParameter);
        let parts = named(node);
        let name = parts.iter().find(|c| c.kind() == "type_identifier");
        if let Some(name) = name {
            out.set(Field::Name, self.ident(*name))?;
        }
        if let Some(bound) = parts.iter().find(|c| c.kind() == "type_bound") {
            self.push_all(&mut out, Field::Bounds, named(*bound))?;
        }
        Ok(out)
    }

    fn annotation(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Annotation);
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
        if let Some(args) = node.child_by_field_name("arguments") {
            self.push_all(&mut out, Field::Arguments, named(args))?;
        }
        Ok(out)
    }

    fn pair(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::MemberValuePair);
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("key"))?;
        self.set_opt(&mut out, Field::Value, node.child_by_field_name("value"))?;
        Ok(out)
    }

    fn class_type(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::ClassType);
        match node.kind() {
            "scoped_type_identifier" => {
                let parts = named(node);
                if let Some((last, rest)) = parts.split_last() {
                    if let Some(scope) = rest.first() {
                        out.set(Field::Scope, self.lower(*scope)?)?;
                    }
                    out.set(Field::Name, self.ident(*last))?;
                }
            }
            "generic_type" => {
                for part in named(node) {
                    if part.kind() == "type_arguments" {
                        self.push_all(&mut out, Field::TypeArguments, named(part))?;
                    } else {
                        let base = self.class_type(part)?;
                        if let Some(scope) = base.child(Field::Scope) {
                            out.set(Field::Scope, scope.clone())?;
                        }
                        if let Some(name) = base.child(Field::Name) {
                            out.set(Field::Name, name.clone())?;
                        }
                    }
                }
            }
            _ => out.set(Field::Name, self.ident(node))?,
        }
        Ok(out)
    }

    fn array_type(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::ArrayType);
        if let Some(dims) = node.child_by_field_name("dimensions") {
            out = out.with_token(self.text(dims).replace(char::is_whitespace, ""));
        }
        self.set_opt(&mut out, Field::Element, node.child_by_field_name("element"))?;
        Ok(out)
    }

    fn wildcard(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::WildcardType);
        let mut keyword = "?";
        for child in all(node) {
            match child.kind() {
                "extends" => keyword = "? extends",
                "super" => keyword = "? super",
                _ => {}
            }
        }
        out = out.with_token(keyword);
        let bound = named(node)
            .into_iter()
            .rfind(|c| !matches!(c.kind(), "annotation" | "marker_annotation" | "super"));
        self.set_opt(&mut out, Field::Bound, bound)?;
        Ok(out)
    }

    fn block(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Block);
        self.push_all(&mut out, Field::Statements, named(node))?;
        Ok(out)
    }

    fn initializer(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Initializer);
        let body = if node.kind() == "static_initializer" {
            out = out.with_token("static");
            child_of_kind(node, "block")
        } else {
            Some(node)
        };
        if let Some(body) = body {
            out.set(Field::Body, self.block(body)?)?;
        }
        Ok(out)
    }

    /// A node whose only attribute is its first named child.
    fn wrap(&self, kind: Kind, field: Field, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(kind);
        let inner = named(node).into_iter().find(|c| !c.is_extra());
        self.set_opt(&mut out, field, inner)?;
        Ok(out)
    }

    fn if_stmt(&self, node: TsNode<'_>, kind: Kind) -> Result<Node> {
        let mut out = Node::new(kind);
        self.condition(&mut out, node.child_by_field_name("condition"))?;
        self.set_opt(&mut out, Field::Then, node.child_by_field_name("consequence"))?;
        self.set_opt(&mut out, Field::Else, node.child_by_field_name("alternative"))?;
        Ok(out)
    }

    fn loop_stmt(&self, node: TsNode<'_>, kind: Kind) -> Result<Node> {
        let mut out = Node::new(kind);
        self.condition(&mut out, node.child_by_field_name("condition"))?;
        self.set_opt(&mut out, Field::Body, node.child_by_field_name("body"))?;
        Ok(out)
    }

    fn for_stmt(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::For);
        self.push_all(&mut out, Field::Init, by_field(node, "init"))?;
        self.set_opt(&mut out, Field::Condition, node.child_by_field_name("condition"))?;
        self.push_all(&mut out, Field::Update, by_field(node, "update"))?;
        self.set_opt(&mut out, Field::Body, node.child_by_field_name("body"))?;
        Ok(out)
    }

    fn for_each(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::ForEach);
        self.set_opt(&mut out, Field::Type, node.child_by_field_name("type"))?;
        self.set_opt(&mut out, Field::Variable, node.child_by_field_name("name"))?;
        self.set_opt(&mut out, Field::Iterable, node.child_by_field_name("value"))?;
        self.set_opt(&mut out, Field::Body, node.child_by_field_name("body"))?;
        Ok(out)
    }

    fn jump(&self, node: TsNode<'_>, kind: Kind) -> Result<Node> {
        let mut out = Node::new(kind);
        self.set_opt(&mut out, Field::Label, child_of_kind(node, "identifier"))?;
        Ok(out)
    }

    fn try_stmt(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Try);
        if let Some(resources) = node.child_by_field_name("resources") {
            self.push_all(&mut out, Field::Resources, named(resources))?;
        }
        self.set_opt(&mut out, Field::Body, node.child_by_field_name("body"))?;
        for child in named(node) {
            match child.kind() {
                "catch_clause" => out.push(Field::Catches, self.catch(child)?)?,
                "finally_clause" => {
                    let block = child_of_kind(child, "block");
                    self.set_opt(&mut out, Field::Finally, block)?;
                }
                _ => {}
            }
        }
        Ok(out)
    }

    fn catch(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Catch);
        if let Some(param) = child_of_kind(node, "catch_formal_parameter") {
            let mut p = Node::new(Kind::Parameter);
            self.modifiers(&mut p, param)?;
            if let Some(types) = child_of_kind(param, "catch_type") {
                let alternatives = named(types);
                let ty = if alternatives.len() == 1 {
                    self.lower(alternatives[0])?
                } else {
                    let mut union = Node::new(Kind::UnionType);
                    self.push_all(&mut union, Field::Types, alternatives)?;
                    union
                };
                p.set(Field::Type, ty)?;
            }
            self.set_opt(&mut p, Field::Name, param.child_by_field_name("name"))?;
            out.set(Field::Parameter, p)?;
        }
        self.set_opt(&mut out, Field::Body, node.child_by_field_name("body"))?;
        Ok(out)
    }

    fn switch(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Switch);
        let selector = node.child_by_field_name("condition").map(unparen);
        self.set_opt(&mut out, Field::Selector, selector)?;
        if let Some(body) = node.child_by_field_name("body") {
            for entry in named(body) {
                if let Some(lowered) = self.switch_entry(entry)? {
                    out.push(Field::Entries, lowered)?;
                }
            }
        }
        Ok(out)
    }

    fn switch_entry(&self, node: TsNode<'_>) -> Result<Option<Node>> {
        let arrow = match node.kind() {
            "switch_block_statement_group" => ":",
            "switch_rule" => "->",
            _ => return Ok(None),
        };
        let mut out = Node::new(Kind::SwitchEntry).with_token(arrow);
        let mut statements = Vec::new();
        for child in named(node) {
            if child.kind() != "switch_label" {
                statements.push(child);
                continue;
            }
            let values = named(child);
            if values.is_empty() {
                out.push(Field::Labels, Node::leaf(Kind::Opaque, "default"))?;
            } else {
                self.push_all(&mut out, Field::Labels, values)?;
            }
        }
        self.push_all(&mut out, Field::Statements, statements)?;
        Ok(Some(out))
    }

    fn synchronized(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Synchronized);
        let lock = child_of_kind(node, "parenthesized_expression")
            .and_then(|p| named(p).into_iter().next());
        self.set_opt(&mut out, Field::Expression, lock)?;
        self.set_opt(&mut out, Field::Body, node.child_by_field_name("body"))?;
        Ok(out)
    }

    fn labeled(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Labeled);
        let parts = named(node);
        if let Some((label, rest)) = parts.split_first() {
            out.set(Field::Label, self.ident(*label))?;
            self.set_opt(&mut out, Field::Body, rest.first().copied())?;
        }
        Ok(out)
    }

    fn assert(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Assert);
        let mut parts = named(node).into_iter();
        self.set_opt(&mut out, Field::Condition, parts.next())?;
        self.set_opt(&mut out, Field::Message, parts.next())?;
        Ok(out)
    }

    fn ctor_call(&self, node: TsNode<'_>) -> Result<Node> {
        let keyword = node
            .child_by_field_name("constructor")
            .map_or("this", |c| self.text(c));
        let mut out = Node::new(Kind::ExplicitCtorCall).with_token(keyword);
        if let Some(args) = node.child_by_field_name("arguments") {
            self.push_all(&mut out, Field::Arguments, named(args))?;
        }
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

    fn unary(&self, node: TsNode<'_>) -> Result<Node> {
        let (token, operand) = if node.kind() == "update_expression" {
            let parts = all(node);
            let operand = named(node).into_iter().next();
            let prefix = parts.first().is_some_and(|p| !p.is_named());
            let op = parts
                .iter()
                .find(|p| !p.is_named())
                .map_or("", |p| self.text(*p));
            let token = if prefix {
                format!("{op}_")
            } else {
                format!("_{op}")
            };
            (token, operand)
        } else {
            let op = node
                .child_by_field_name("operator")
                .map_or("", |o| self.text(o));
            (op.to_string(), node.child_by_field_name("operand"))
        };
        let mut out = Node::new(Kind::Unary).with_token(token);
        self.set_opt(&mut out, Field::Operand, operand)?;
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

    fn call(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::MethodCall);
        self.set_opt(&mut out, Field::Scope, node.child_by_field_name("object"))?;
        if let Some(args) = node.child_by_field_name("type_arguments") {
            self.push_all(&mut out, Field::TypeArguments, named(args))?;
        }
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("name"))?;
        if let Some(args) = node.child_by_field_name("arguments") {
            self.push_all(&mut out, Field::Arguments, named(args))?;
        }
        Ok(out)
    }

    fn field_access(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::FieldAccess);
        self.set_opt(&mut out, Field::Scope, node.child_by_field_name("object"))?;
        self.set_opt(&mut out, Field::Name, node.child_by_field_name("field"))?;
        Ok(out)
    }

    fn array_access(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::ArrayAccess);
        self.set_opt(&mut out, Field::Target, node.child_by_field_name("array"))?;
        self.set_opt(&mut out, Field::Index, node.child_by_field_name("index"))?;
        Ok(out)
    }

    fn array_creation(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::ArrayCreation);
        self.set_opt(&mut out, Field::Element, node.child_by_field_name("type"))?;
        for dim in by_field(node, "dimensions") {
            let lowered = match dim.kind() {
                "dimensions_expr" => self.wrap(Kind::Enclosed, Field::Expression, dim)?,
                _ => Node::leaf(Kind::Opaque, self.text(dim).replace(char::is_whitespace, "")),
            };
            out.push(Field::Dimensions, lowered)?;
        }
        self.set_opt(&mut out, Field::Initializer, node.child_by_field_name("value"))?;
        Ok(out)
    }

    fn object_creation(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::ObjectCreation);
        let ty = node.child_by_field_name("type");
        let parts = named(node);
        let scope = parts
            .first()
            .filter(|first| Some(**first) != ty && first.kind() != "type_arguments");
        self.set_opt(&mut out, Field::Scope, scope.copied())?;
        self.set_opt(&mut out, Field::Type, ty)?;
        if let Some(args) = node.child_by_field_name("type_arguments") {
            self.push_all(&mut out, Field::TypeArguments, named(args))?;
        }
        if let Some(args) = node.child_by_field_name("arguments") {
            self.push_all(&mut out, Field::Arguments, named(args))?;
        }
        if let Some(body) = child_of_kind(node, "class_body") {
            self.push_all(&mut out, Field::Members, named(body))?;
        }
        Ok(out)
    }

    fn cast(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Cast);
        let types = by_field(node, "type");
        let ty = if types.len() > 1 {
            let mut union = Node::new(Kind::UnionType).with_token("&");
            self.push_all(&mut union, Field::Types, types)?;
            Some(union)
        } else {
            types.first().map(|t| self.lower(*t)).transpose()?
        };
        if let Some(ty) = ty {
            out.set(Field::Type, ty)?;
        }
        self.set_opt(&mut out, Field::Expression, node.child_by_field_name("value"))?;
        Ok(out)
    }

    fn instance_of(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::InstanceOf);
        self.set_opt(&mut out, Field::Expression, node.child_by_field_name("left"))?;
        let ty = node
            .child_by_field_name("right")
            .or_else(|| node.child_by_field_name("pattern"));
        self.set_opt(&mut out, Field::Type, ty)?;
        Ok(out)
    }

    fn lambda(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::Lambda);
        if let Some(params) = node.child_by_field_name("parameters") {
            match params.kind() {
                "identifier" => out.push(Field::Parameters, self.bare_parameter(params)?)?,
                _ => {
                    for p in named(params) {
                        let lowered = match p.kind() {
                            "identifier" => self.bare_parameter(p)?,
                            _ => self.lower(p)?,
                        };
                        out.push(Field::Parameters, lowered)?;
                    }
                }
            }
        }
        self.set_opt(&mut out, Field::Body, node.child_by_field_name("body"))?;
        Ok(out)
    }

    fn bare_parameter(&self, node: TsNode<'_>) -> Result<Node> {
        Node::new(Kind::Parameter).with(Field::Name, self.ident(node))
    }

    fn method_ref(&self, node: TsNode<'_>) -> Result<Node> {
        let mut out = Node::new(Kind::MethodRef);
        let parts = all(node);
        let separator = parts.iter().position(|p| p.kind() == "::");
        let (before, after) = match separator {
            Some(i) => (&parts[..i], &parts[i + 1..]),
            None => (&parts[..], &[][..]),
        };
        self.set_opt(&mut out, Field::Scope, before.iter().find(|p| p.is_named()).copied())?;
        match after.last() {
            Some(target) if target.kind() == "new" => out = out.with_token("new"),
            Some(target) => out.set(Field::Name, self.ident(*target))?,
            None => {}
        }
        Ok(out)
    }

    fn class_literal(&self, node: TsNode<'_>) -> Result<Node> {
        self.wrap(Kind::ClassLiteral, Field::Type, node)
    }

    fn scoped(&self, node: TsNode<'_>, kind: Kind) -> Result<Node> {
        let mut out = Node::new(kind);
        let scope = named(node).into_iter().next();
        self.set_opt(&mut out, Field::Scope, scope)?;
        Ok(out)
    }
}

impl Lower for JavaLowering<'_> {
    fn src(&self) -> &[u8] {
        self.src
    }

    fn lower(&self, node: TsNode<'_>) -> Result<Node> {
        let leaf = |kind: Kind| -> Result<Node> { Ok(Node::leaf(kind, self.text(node))) };
        match node.kind() {
            "program" => self.program(node),
            "package_declaration" => self.package(node),
            "import_declaration" => self.import(node),
            "class_declaration"
            | "interface_declaration"
            | "record_declaration"
            | "annotation_type_declaration" => self.class_like(node),
            "enum_declaration" => self.enum_decl(node),
            "enum_constant" => self.enum_constant(node),
            "field_declaration" | "constant_declaration" => {
                self.variable_decl(node, Kind::FieldDecl)
            }
            "local_variable_declaration" => self.variable_decl(node, Kind::LocalVarDecl),
            "variable_declarator" => self.declarator(node),
            "method_declaration" | "annotation_type_element_declaration" => self.method(node),
            "constructor_declaration" | "compact_constructor_declaration" => {
                self.constructor(node)
            }
            "formal_parameter" | "spread_parameter" => self.parameter(node),
            "static_initializer" => self.initializer(node),
            "type_parameter" => self.type_parameter(node),
            "marker_annotation" | "annotation" => self.annotation(node),
            "element_value_pair" => self.pair(node),

            "type_identifier" | "scoped_type_identifier" | "generic_type" => {
                self.class_type(node)
            }
            "integral_type" | "floating_point_type" | "boolean_type" => {
                leaf(Kind::PrimitiveType)
            }
            "void_type" => leaf(Kind::VoidType),
            "array_type" => self.array_type(node),
            "wildcard" => self.wildcard(node),
            "annotated_type" => match named(node).into_iter().last() {
                Some(inner) => self.lower(inner),
                None => self.opaque(node),
            },

            "block" if is_member(node) => self.initializer(node),
            "block" => self.block(node),
            "expression_statement" => self.wrap(Kind::ExpressionStmt, Field::Expression, node),
            "if_statement" => self.if_stmt(node, Kind::If),
            "while_statement" => self.loop_stmt(node, Kind::While),
            "do_statement" => self.loop_stmt(node, Kind::DoWhile),
            "for_statement" => self.for_stmt(node),
            "enhanced_for_statement" => self.for_each(node),
            "return_statement" => self.wrap(Kind::Return, Field::Expression, node),
            "break_statement" => self.jump(node, Kind::Break),
            "continue_statement" => self.jump(node, Kind::Continue),
            "throw_statement" => self.wrap(Kind::Throw, Field::Expression, node),
            "yield_statement" => self.wrap(Kind::Yield, Field::Expression, node),
            "try_statement" | "try_with_resources_statement" => self.try_stmt(node),
            "switch_expression" | "switch_statement" => self.switch(node),
            "synchronized_statement" => self.synchronized(node),
            "labeled_statement" => self.labeled(node),
            "assert_statement" => self.assert(node),
            "explicit_constructor_invocation" => self.ctor_call(node),

            "binary_expression" => self.binary(node),
            "unary_expression" | "update_expression" => self.unary(node),
            "assignment_expression" => self.assign(node),
            "ternary_expression" => self.if_stmt(node, Kind::Conditional),
            "method_invocation" => self.call(node),
            "field_access" => self.field_access(node),
            "array_access" => self.array_access(node),
            "array_creation_expression" => self.array_creation(node),
            "array_initializer" => {
                let mut out = Node::new(Kind::ArrayInit);
                self.push_all(&mut out, Field::Values, named(node))?;
                Ok(out)
            }
            "object_creation_expression" => self.object_creation(node),
            "cast_expression" => self.cast(node),
            "instanceof_expression" => self.instance_of(node),
            "lambda_expression" => self.lambda(node),
            "method_reference" => self.method_ref(node),
            "class_literal" => self.class_literal(node),
            "this" => self.scoped(node, Kind::This),
            "super" => self.scoped(node, Kind::Super),
            "parenthesized_expression" => self.wrap(Kind::Enclosed, Field::Expression, node),

            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal" => leaf(Kind::IntegerLiteral),
            "decimal_floating_point_literal" | "hex_floating_point_literal" => {
                leaf(Kind::FloatLiteral)
            }
            "true" | "false" => leaf(Kind::BooleanLiteral),
            "character_literal" => leaf(Kind::CharLiteral),
            "string_literal" => leaf(Kind::StringLiteral),
            "text_block" => leaf(Kind::TextBlock),
            "null_literal" => leaf(Kind::NullLiteral),
            "identifier" => leaf(Kind::Identifier),
            "scoped_identifier" => leaf(Kind::QualifiedName),
            _ => self.opaque(node),
        }
    }
}
