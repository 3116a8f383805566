use std::fmt::Display;

use serde::Serialize;

use super::expressions::Expression;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    Label(String),
    /// `None` is `ret void`.
    Return(Option<Expression>),
    /// Binary operations and calls, which bind their named result.
    Expression(Expression),
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Label(name) => write!(f, "{}:", name),
            Statement::Return(None) => write!(f, "ret void"),
            Statement::Return(Some(value)) => write!(f, "ret {}", value),
            Statement::Expression(expression) => write!(f, "{}", expression),
        }
    }
}
