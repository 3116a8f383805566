use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Diagnostics attached to a syntax error; empty for every other kind.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match &self.internal_error {
            ErrorImpl::SyntaxError { diagnostics } => diagnostics,
            _ => &[],
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::SyntaxError { .. } | ErrorImpl::UnexpectedToken { .. } => {
                ErrorKind::SyntaxError
            }
            ErrorImpl::UnsupportedConstruct { .. }
            | ErrorImpl::UnsupportedOperation { .. }
            | ErrorImpl::IntraProgramCall { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorKind::UnsupportedConstruct,
            ErrorImpl::MalformedInput { .. } => ErrorKind::MalformedInput,
            ErrorImpl::DuplicateSymbol { .. } => ErrorKind::DuplicateSymbol,
            ErrorImpl::UnresolvedIdentifier { .. }
            | ErrorImpl::UnresolvedFunction { .. }
            | ErrorImpl::NoMatchingSignature { .. } => ErrorKind::UnresolvedSymbol,
            ErrorImpl::UnsupportedType { .. } => ErrorKind::UnsupportedType,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::SyntaxError { .. } => "SyntaxError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnsupportedConstruct { .. } => "UnsupportedConstruct",
            ErrorImpl::UnsupportedOperation { .. } => "UnsupportedOperation",
            ErrorImpl::IntraProgramCall { .. } => "IntraProgramCall",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::MalformedInput { .. } => "MalformedInput",
            ErrorImpl::DuplicateSymbol { .. } => "DuplicateSymbol",
            ErrorImpl::UnresolvedIdentifier { .. } => "UnresolvedIdentifier",
            ErrorImpl::UnresolvedFunction { .. } => "UnresolvedFunction",
            ErrorImpl::NoMatchingSignature { .. } => "NoMatchingSignature",
            ErrorImpl::UnsupportedType { .. } => "UnsupportedType",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::SyntaxError { diagnostics } => match diagnostics.len() {
                0 => ErrorTip::None,
                1 => ErrorTip::Suggestion(diagnostics[0].message.clone()),
                n => ErrorTip::Suggestion(format!(
                    "{} (and {} more)",
                    diagnostics[0].message,
                    n - 1
                )),
            },
            ErrorImpl::UnexpectedToken { token, expected } => {
                ErrorTip::Suggestion(format!("Unexpected token `{}`, expected {}", token, expected))
            }
            ErrorImpl::UnsupportedConstruct { construct } => ErrorTip::Suggestion(format!(
                "`{}` is recognised by the grammar but cannot be compiled",
                construct
            )),
            ErrorImpl::UnsupportedOperation { operation } => ErrorTip::Suggestion(format!(
                "Only `add` can be compiled, found `{}`",
                operation
            )),
            ErrorImpl::IntraProgramCall { function } => ErrorTip::Suggestion(format!(
                "`{}` is defined in this program; only runtime functions can be called",
                function
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::MalformedInput { found, expected } => {
                ErrorTip::Suggestion(format!("Found `{}` but expected `{}`", found, expected))
            }
            ErrorImpl::DuplicateSymbol { symbol } => {
                ErrorTip::Suggestion(format!("`{}` is already defined", symbol))
            }
            ErrorImpl::UnresolvedIdentifier { identifier } => ErrorTip::Suggestion(format!(
                "`{}` is not a local or an argument of the current function",
                identifier
            )),
            ErrorImpl::UnresolvedFunction { function } => ErrorTip::Suggestion(format!(
                "`{}` is not a known runtime function",
                function
            )),
            ErrorImpl::NoMatchingSignature { message, .. } => {
                ErrorTip::Suggestion(message.clone())
            }
            ErrorImpl::UnsupportedType { type_ } => ErrorTip::Suggestion(format!(
                "Type `{}` has no native representation",
                type_
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SyntaxError,
    UnsupportedConstruct,
    MalformedInput,
    DuplicateSymbol,
    UnresolvedSymbol,
    UnsupportedType,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// One problem found while tokenizing or parsing.
///
/// `parser_state` names the productions being parsed when the problem was
/// found, outermost first.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub position: Position,
    pub parser_state: String,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}: {}: {}",
            self.position.1, self.position.0, self.parser_state, self.message
        )
    }
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|diagnostic| diagnostic.to_string())
        .collect::<Vec<String>>()
        .join("; ")
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("syntax error: {}", summarize(.diagnostics))]
    SyntaxError { diagnostics: Vec<Diagnostic> },
    #[error("unexpected token {token:?}, expected {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("unsupported construct {construct}")]
    UnsupportedConstruct { construct: String },
    #[error("unsupported operation {operation:?}")]
    UnsupportedOperation { operation: String },
    #[error("call to {function:?} which is defined in this program")]
    IntraProgramCall { function: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("found {found:?} but expected {expected:?}")]
    MalformedInput { found: String, expected: String },
    #[error("symbol {symbol:?} already defined")]
    DuplicateSymbol { symbol: String },
    #[error("unresolved identifier {identifier:?}")]
    UnresolvedIdentifier { identifier: String },
    #[error("unresolved function {function:?}")]
    UnresolvedFunction { function: String },
    #[error("no matching signature for {function:?}: {message}")]
    NoMatchingSignature { function: String, message: String },
    #[error("unsupported type {type_}")]
    UnsupportedType { type_: String },
}
