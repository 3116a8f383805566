use std::fmt::Display;

use serde::Serialize;

use crate::lexer::lexer::encode_string;

use super::{ast::Modifiers, types::Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    UDiv,
    SDiv,
    URem,
    SRem,
    Shl,
    LShr,
    AShr,
    And,
    Or,
    Xor,
    FAdd,
    FSub,
    FMul,
    FDiv,
    FRem,
}

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 18] = [
        BinaryOperator::Add,
        BinaryOperator::Sub,
        BinaryOperator::Mul,
        BinaryOperator::UDiv,
        BinaryOperator::SDiv,
        BinaryOperator::URem,
        BinaryOperator::SRem,
        BinaryOperator::Shl,
        BinaryOperator::LShr,
        BinaryOperator::AShr,
        BinaryOperator::And,
        BinaryOperator::Or,
        BinaryOperator::Xor,
        BinaryOperator::FAdd,
        BinaryOperator::FSub,
        BinaryOperator::FMul,
        BinaryOperator::FDiv,
        BinaryOperator::FRem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "add",
            BinaryOperator::Sub => "sub",
            BinaryOperator::Mul => "mul",
            BinaryOperator::UDiv => "udiv",
            BinaryOperator::SDiv => "sdiv",
            BinaryOperator::URem => "urem",
            BinaryOperator::SRem => "srem",
            BinaryOperator::Shl => "shl",
            BinaryOperator::LShr => "lshr",
            BinaryOperator::AShr => "ashr",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
            BinaryOperator::Xor => "xor",
            BinaryOperator::FAdd => "fadd",
            BinaryOperator::FSub => "fsub",
            BinaryOperator::FMul => "fmul",
            BinaryOperator::FDiv => "fdiv",
            BinaryOperator::FRem => "frem",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<BinaryOperator> {
        BinaryOperator::ALL
            .iter()
            .find(|operator| operator.as_str() == keyword)
            .copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    IntegerLiteral(i32),
    /// A `%local`, an `@global`, or raw numeric text without a sigil.
    Identifier(String),
    /// A value written after its type, e.g. `i32 5`, `i32 %x` or `i1 true`.
    TypedLiteral { ty: Type, raw: String },
    /// Decoded payload of a `c"..."` initializer.
    StringLiteral(String),
    BinaryOperation {
        destination: String,
        operation: BinaryOperator,
        modifiers: Modifiers,
        ty: Type,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    FunctionCall {
        destination: String,
        modifiers: Modifiers,
        /// The type written after `call`: a return type or a function pointer type.
        return_type: Type,
        function_name: String,
        arguments: Vec<Expression>,
        attributes: Modifiers,
    },
    GetElementPtr {
        ty: Type,
        base: Box<Expression>,
        indices: Vec<Expression>,
    },
}

impl Expression {
    pub fn typed(ty: Type, raw: impl Into<String>) -> Expression {
        Expression::TypedLiteral { ty, raw: raw.into() }
    }
}

fn join(expressions: &[Expression]) -> String {
    expressions
        .iter()
        .map(|expression| expression.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::IntegerLiteral(value) => write!(f, "{}", value),
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::TypedLiteral { ty, raw } => write!(f, "{} {}", ty, raw),
            Expression::StringLiteral(value) => write!(f, "c\"{}\"", encode_string(value)),
            Expression::BinaryOperation {
                destination,
                operation,
                modifiers,
                ty,
                left,
                right,
            } => write!(
                f,
                "{} = {}{} {} {}, {}",
                destination,
                operation.as_str(),
                modifiers.suffix(),
                ty,
                left,
                right
            ),
            Expression::FunctionCall {
                destination,
                modifiers,
                return_type,
                function_name,
                arguments,
                attributes,
            } => write!(
                f,
                "{} = {}call {} {}({}){}",
                destination,
                modifiers.prefix(),
                return_type,
                function_name,
                join(arguments),
                attributes.suffix()
            ),
            Expression::GetElementPtr { ty, base, indices } => write!(
                f,
                "{} getelementptr inbounds ({}, {})",
                ty,
                base,
                join(indices)
            ),
        }
    }
}
