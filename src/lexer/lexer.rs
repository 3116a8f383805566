use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Diagnostic, Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            // Patterns are fixed at compile time, a bad one is a programming error.
            regex: Regex::new(pattern).expect("invalid lexer pattern"),
            handler,
        }
    }
}

lazy_static! {
    /// Tried in order; every pattern is anchored to the current position.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new("^\\s+", skip_handler),
        RegexPattern::new("^;[^\\n]*", skip_handler),
        RegexPattern::new("^[%@][a-zA-Z$._][a-zA-Z$._0-9]*", identifier_handler),
        RegexPattern::new("^\\.\\.\\.", MK_DEFAULT_HANDLER!(TokenKind::Ellipsis, "...")),
        RegexPattern::new("^-?[0-9]+(\\.[0-9]+)?([eE][-+]?[0-9]+)?", number_handler),
        RegexPattern::new("^\"[^\"]*\"", string_handler),
        RegexPattern::new("^[a-zA-Z_][a-zA-Z0-9_.]*", word_handler),
        RegexPattern::new("^\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        RegexPattern::new("^\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        RegexPattern::new("^\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        RegexPattern::new("^\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        RegexPattern::new("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        RegexPattern::new("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        RegexPattern::new("^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        RegexPattern::new("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        RegexPattern::new("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        RegexPattern::new("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        RegexPattern::new("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        RegexPattern::new("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            diagnostics: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span of the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    fn push_matched(&mut self, kind: TokenKind, regex: &Regex) {
        let matched = self.matched(regex);
        let span = self.span_of(matched.len());
        let len = matched.len();

        self.push(MK_TOKEN!(kind, matched, span));
        self.advance_n(len);
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    lexer.push_matched(TokenKind::Number, regex);
}

fn identifier_handler(lexer: &mut Lexer, regex: &Regex) {
    lexer.push_matched(TokenKind::Identifier, regex);
}

fn word_handler(lexer: &mut Lexer, regex: &Regex) {
    lexer.push_matched(TokenKind::Word, regex);
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());
    let string_literal = decode_string(&matched[1..matched.len() - 1]);

    lexer.push(MK_TOKEN!(TokenKind::String, string_literal, span));
    lexer.advance_n(matched.len());
}

/// Decodes IR string escapes: `\\` and two-digit hex `\XX`.
///
/// A backslash that starts neither form is kept as written.
pub fn decode_string(raw: &str) -> String {
    let mut result = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        if chars.peek() == Some(&'\\') {
            chars.next();
            result.push('\\');
            continue;
        }

        let mut lookahead = chars.clone();
        let hex: String = lookahead.by_ref().take(2).collect();

        if hex.len() == 2 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                result.push(byte as char);
                chars = lookahead;
                continue;
            }
        }

        result.push(ch);
    }

    result
}

/// Encodes a string back into IR escape form, the inverse of [`decode_string`].
pub fn encode_string(value: &str) -> String {
    let mut result = String::new();

    for ch in value.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\22"),
            ' '..='~' => result.push(ch),
            _ if (ch as u32) < 0x100 => result.push_str(&format!("\\{:02X}", ch as u32)),
            _ => result.push(ch),
        }
    }

    result
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex);
                matched = true;
                break;
            }
        }

        if !matched {
            let ch = lex.remainder().chars().next().unwrap_or('\0');
            let diagnostic = Diagnostic {
                position: lex.position(),
                parser_state: String::from("lexer"),
                message: format!("unrecognised character `{}`", ch),
            };
            lex.diagnostics.push(diagnostic);
            lex.advance_n(ch.len_utf8().max(1));
        }
    }

    if !lex.diagnostics.is_empty() {
        let position = lex.diagnostics[0].position.clone();
        return Err(Error::new(
            ErrorImpl::SyntaxError {
                diagnostics: lex.diagnostics,
            },
            position,
        ));
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    Ok(lex.tokens)
}
