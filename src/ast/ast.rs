use std::fmt::Display;

use indexmap::IndexSet;
use serde::Serialize;

use super::{
    declarations::{DeclaredParameter, Declaration, DefinedParameter, Program},
    expressions::Expression,
    statements::Statement,
    types::Type,
};

/// Any value the builder can produce from a parse tree node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AstNode {
    Program(Program),
    Declaration(Declaration),
    Statement(Statement),
    Expression(Expression),
    Type(Type),
    DeclaredParameter(DeclaredParameter),
    DefinedParameter(DefinedParameter),
    Modifiers(Modifiers),
    /// A keyword leaf standing on its own, e.g. the operator of a `BINARY_TERM`.
    Keyword(String),
    List(Vec<AstNode>),
}

impl AstNode {
    /// Category name used when a node turns up where another was expected.
    pub fn category(&self) -> &'static str {
        match self {
            AstNode::Program(_) => "Program",
            AstNode::Declaration(_) => "Declaration",
            AstNode::Statement(_) => "Statement",
            AstNode::Expression(_) => "Expression",
            AstNode::Type(_) => "Type",
            AstNode::DeclaredParameter(_) => "DeclaredParameter",
            AstNode::DefinedParameter(_) => "DefinedParameter",
            AstNode::Modifiers(_) => "Modifiers",
            AstNode::Keyword(_) => "Keyword",
            AstNode::List(_) => "List",
        }
    }

    pub fn into_type(self) -> Option<Type> {
        match self {
            AstNode::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn into_expression(self) -> Option<Expression> {
        match self {
            AstNode::Expression(expression) => Some(expression),
            _ => None,
        }
    }

    /// Statements, and expressions standing as statements.
    pub fn into_statement(self) -> Option<Statement> {
        match self {
            AstNode::Statement(statement) => Some(statement),
            AstNode::Expression(expression) => Some(Statement::Expression(expression)),
            _ => None,
        }
    }

    pub fn into_declaration(self) -> Option<Declaration> {
        match self {
            AstNode::Declaration(declaration) => Some(declaration),
            _ => None,
        }
    }

    pub fn into_declared_parameter(self) -> Option<DeclaredParameter> {
        match self {
            AstNode::DeclaredParameter(parameter) => Some(parameter),
            _ => None,
        }
    }

    pub fn into_defined_parameter(self) -> Option<DefinedParameter> {
        match self {
            AstNode::DefinedParameter(parameter) => Some(parameter),
            _ => None,
        }
    }

    pub fn into_modifiers(self) -> Option<Modifiers> {
        match self {
            AstNode::Modifiers(modifiers) => Some(modifiers),
            _ => None,
        }
    }

    pub fn into_keyword(self) -> Option<String> {
        match self {
            AstNode::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    pub fn into_program(self) -> Option<Program> {
        match self {
            AstNode::Program(program) => Some(program),
            _ => None,
        }
    }
}

/// An insertion ordered set of keyword modifiers or attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Modifiers(IndexSet<String>);

impl Modifiers {
    pub fn new() -> Self {
        Modifiers(IndexSet::new())
    }

    /// Adds a modifier, returning false if it was already present.
    pub fn insert(&mut self, modifier: impl Into<String>) -> bool {
        self.0.insert(modifier.into())
    }

    pub fn contains(&self, modifier: &str) -> bool {
        self.0.contains(modifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `" a b"` for a non-empty set, empty otherwise.
    pub fn suffix(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" {}", self)
        }
    }

    /// `"a b "` for a non-empty set, empty otherwise.
    pub fn prefix(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("{} ", self)
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Modifiers {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Modifiers(iter.into_iter().map(Into::into).collect())
    }
}

impl Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let words: Vec<&str> = self.0.iter().map(String::as_str).collect();
        write!(f, "{}", words.join(" "))
    }
}

/// Strips the `@` or `%` sigil from a name.
pub fn bare_name(name: &str) -> &str {
    name.strip_prefix(['@', '%']).unwrap_or(name)
}
