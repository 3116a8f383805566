use std::fmt::Display;

use crate::Span;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    /// `%name` or `@name`
    Identifier,
    /// Any bare word: keywords, type names, label names.
    Word,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    Less,
    Greater,

    Assignment, // =
    Comma,
    Colon,
    Star,
    Ellipsis,
}

impl TokenKind {
    /// How the token reads in a diagnostic, e.g. "`=`" or "an identifier".
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Number => "a number",
            TokenKind::String => "a string",
            TokenKind::Identifier => "an identifier",
            TokenKind::Word => "a keyword",
            TokenKind::OpenBracket => "`[`",
            TokenKind::CloseBracket => "`]`",
            TokenKind::OpenCurly => "`{`",
            TokenKind::CloseCurly => "`}`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Less => "`<`",
            TokenKind::Greater => "`>`",
            TokenKind::Assignment => "`=`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Star => "`*`",
            TokenKind::Ellipsis => "`...`",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.value)
    }
}

impl Token {
    /// True for a bare word with exactly this text.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.value == word
    }
}
