use crate::{
    ast::{
        ast::{AstNode, Modifiers},
        expressions::Expression,
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    grammar::{grammar::Production, tree::ParseNode},
};

use super::builder::build;

pub fn malformed(node: &ParseNode, found: impl Into<String>, expected: impl Into<String>) -> Error {
    Error::new(
        ErrorImpl::MalformedInput {
            found: found.into(),
            expected: expected.into(),
        },
        node.span.start.clone(),
    )
}

/// Narrows a lowered node to one AST category.
///
/// # Arguments
/// * `lowered` - The node produced by the builder
/// * `expected` - Category name reported on mismatch
/// * `source` - The parse node `lowered` came from, used for the error position
/// * `into` - The narrowing conversion, e.g. [`AstNode::into_type`]
pub fn convert<T>(
    lowered: AstNode,
    expected: &str,
    source: &ParseNode,
    into: fn(AstNode) -> Option<T>,
) -> Result<T, Error> {
    let found = lowered.category();
    into(lowered).ok_or_else(|| malformed(source, found, expected))
}

/// Lowers every child of a list node into one AST category.
pub fn build_all<T>(
    node: &ParseNode,
    expected: &str,
    into: fn(AstNode) -> Option<T>,
) -> Result<Vec<T>, Error> {
    node.children
        .iter()
        .map(|child| convert(build(child)?, expected, child, into))
        .collect()
}

/// Reads the children of a sequence production by field name.
///
/// Every read checks the child against the field's grammar kind, so a wrong
/// keyword or a misplaced node surfaces as `MalformedInput`.
pub struct ChildReader<'a> {
    node: &'a ParseNode,
    production: Production,
}

impl<'a> ChildReader<'a> {
    pub fn new(node: &'a ParseNode, production: Production) -> Result<Self, Error> {
        let expected = production.fields().len();

        if node.children.len() != expected {
            return Err(malformed(
                node,
                format!("{} with {} children", production, node.children.len()),
                format!("{} children", expected),
            ));
        }

        Ok(ChildReader { node, production })
    }

    pub fn node(&self) -> &'a ParseNode {
        self.node
    }

    pub fn child(&self, name: &str) -> Result<&'a ParseNode, Error> {
        let fields = self.production.fields();
        let index = fields
            .iter()
            .position(|field| field.name == name)
            .ok_or_else(|| malformed(self.node, name, format!("a field of {}", self.production)))?;

        let child = &self.node.children[index];
        let kind = &fields[index].kind;
        if !child.matches(kind) {
            return Err(malformed(child, child.term_name(), kind.describe()));
        }

        Ok(child)
    }

    /// Token text of a leaf field.
    pub fn text(&self, name: &str) -> Result<&'a str, Error> {
        Ok(self.child(name)?.text())
    }

    /// Checks a fixed keyword slot such as `define` or `to`.
    pub fn keyword(&self, name: &str) -> Result<(), Error> {
        self.child(name).map(|_| ())
    }

    pub fn ty(&self, name: &str) -> Result<Type, Error> {
        let child = self.child(name)?;
        convert(build(child)?, "Type", child, AstNode::into_type)
    }

    pub fn expression(&self, name: &str) -> Result<Expression, Error> {
        let child = self.child(name)?;
        convert(build(child)?, "Expression", child, AstNode::into_expression)
    }

    pub fn modifiers(&self, name: &str) -> Result<Modifiers, Error> {
        let child = self.child(name)?;
        convert(build(child)?, "Modifiers", child, AstNode::into_modifiers)
    }

    /// Lowers a list field, narrowing each item to `expected`.
    pub fn items<T>(
        &self,
        name: &str,
        expected: &str,
        into: fn(AstNode) -> Option<T>,
    ) -> Result<Vec<T>, Error> {
        build_all(self.child(name)?, expected, into)
    }
}
