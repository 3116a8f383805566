use crate::{lexer::tokens::Token, Span};

use super::grammar::{FieldKind, Production, Shape, Terminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Rule(Production),
    Terminal(Terminal),
    Keyword,
}

/// A node of the concrete parse tree.
///
/// Rule nodes own their children in source order; leaves own the token they
/// were read from. Punctuation never appears in the tree.
#[derive(Debug, Clone)]
pub struct ParseNode {
    pub term: Term,
    pub token: Option<Token>,
    pub children: Vec<ParseNode>,
    pub span: Span,
}

impl ParseNode {
    pub fn rule(production: Production, children: Vec<ParseNode>, span: Span) -> Self {
        ParseNode {
            term: Term::Rule(production),
            token: None,
            children,
            span,
        }
    }

    pub fn leaf(term: Term, token: Token) -> Self {
        ParseNode {
            term,
            span: token.span.clone(),
            token: Some(token),
            children: vec![],
        }
    }

    /// Production name, terminal name, or the keyword text itself.
    pub fn term_name(&self) -> &str {
        match self.term {
            Term::Rule(production) => production.name(),
            Term::Terminal(terminal) => terminal.name(),
            Term::Keyword => self.text(),
        }
    }

    pub fn production(&self) -> Option<Production> {
        match self.term {
            Term::Rule(production) => Some(production),
            _ => None,
        }
    }

    /// Token text of a leaf, empty for rule nodes.
    pub fn text(&self) -> &str {
        self.token.as_ref().map(|t| t.value.as_str()).unwrap_or("")
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.term == Term::Keyword && self.text() == keyword
    }

    pub fn matches(&self, kind: &FieldKind) -> bool {
        match kind {
            FieldKind::Rule(production) => self.term == Term::Rule(*production),
            FieldKind::Terminal(terminal) => self.term == Term::Terminal(*terminal),
            FieldKind::Keyword(keyword) => self.is_keyword(keyword),
            FieldKind::KeywordOf(class) => self.term == Term::Keyword && class.contains(self.text()),
            FieldKind::Choice(kinds) => kinds.iter().any(|kind| self.matches(kind)),
        }
    }
}

/// Checks a tree against the grammar's child layouts.
///
/// Returns a description of the first offending node.
pub fn validate_tree(node: &ParseNode) -> Result<(), String> {
    let production = match node.term {
        Term::Rule(production) => production,
        _ => {
            if node.token.is_none() || !node.children.is_empty() {
                return Err(format!("leaf `{}` is malformed", node.term_name()));
            }
            return Ok(());
        }
    };

    match production.shape() {
        Shape::Wrapper(alternatives) => {
            if node.children.len() != 1
                || !alternatives.iter().any(|kind| node.children[0].matches(kind))
            {
                return Err(format!(
                    "{} must wrap exactly one of {}",
                    production,
                    FieldKind::Choice(alternatives).describe()
                ));
            }
        }
        Shape::List(kind) => {
            if let Some(child) = node.children.iter().find(|child| !child.matches(&kind)) {
                return Err(format!(
                    "{} contains `{}`, expected {}",
                    production,
                    child.term_name(),
                    kind.describe()
                ));
            }
        }
        Shape::Sequence(fields) => {
            if node.children.len() != fields.len() {
                return Err(format!(
                    "{} has {} children, expected {}",
                    production,
                    node.children.len(),
                    fields.len()
                ));
            }
            for (child, field) in node.children.iter().zip(fields.iter()) {
                if !child.matches(&field.kind) {
                    return Err(format!(
                        "{}.{} holds `{}`, expected {}",
                        production,
                        field.name,
                        child.term_name(),
                        field.kind.describe()
                    ));
                }
            }
        }
    }

    node.children.iter().try_for_each(validate_tree)
}
