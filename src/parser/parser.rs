//! Parser driver producing the concrete parse tree.
//!
//! The parser is recursive descent over the productions of
//! [`crate::grammar::grammar::Production`]. Which function handles a
//! declaration, a statement or a type is decided through lookup tables
//! registered in [`super::lookups`] and [`super::types`].
//!
//! Every production being parsed is pushed on a rule stack. When a
//! declaration or a statement fails, the stack at that moment becomes the
//! diagnostic's parser state, the failure is recorded and parsing resumes at
//! the next synchronisation point. The caller receives either a tree or every
//! diagnostic collected.

use std::{collections::HashMap, rc::Rc};

use crate::{
    errors::errors::{Diagnostic, Error, ErrorImpl},
    grammar::{
        grammar::{Production, Terminal},
        keywords::KeywordClass,
        tree::{ParseNode, Term},
    },
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    decl::parse_program,
    lookups::{
        create_token_lookups, DeclarationHandler, DeclarationLookup, StatementHandler,
        StatementLookup,
    },
    stmt::parse_statement,
    types::{
        create_token_type_lookups, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler, TypeNUDLookup,
    },
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always terminated by EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// End of the last consumed token
    last_end: Position,
    /// Declaration handlers keyed by their leading keyword
    declaration_lookup: DeclarationLookup,
    /// Statement handlers keyed by the kind of their first token
    statement_lookup: StatementLookup,
    /// Type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    /// Type left denotation (postfix) handlers
    type_led_lookup: TypeLEDLookup,
    /// Productions currently being parsed, outermost first
    rule_stack: Vec<Production>,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse
    /// * `file` - Reference-counted string containing the source name
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|t| t.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span {
                    start: end.clone(),
                    end
                }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            last_end: Position(0, file),
            declaration_lookup: HashMap::new(),
            statement_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            rule_stack: vec![],
            diagnostics: vec![],
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Looks `offset` tokens ahead, saturating at EOF.
    pub fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    /// Advances to the next token and returns the consumed one.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        self.last_end = token.span.end.clone();
        token
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn at_word(&self, word: &str) -> bool {
        self.current_token().is_word(word)
    }

    pub fn at_word_of(&self, class: KeywordClass) -> bool {
        let token = self.current_token();
        token.kind == TokenKind::Word && class.contains(&token.value)
    }

    /// Builds an error for the current token.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
                expected: expected.to_string(),
            },
            token.span.start.clone(),
        )
    }

    /// Consumes a token of the expected kind.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(self.unexpected(expected_kind.describe()));
        }

        Ok(self.advance())
    }

    /// Consumes a token of the expected kind as a terminal leaf.
    pub fn expect_terminal(
        &mut self,
        expected_kind: TokenKind,
        terminal: Terminal,
    ) -> Result<ParseNode, Error> {
        let token = self.expect(expected_kind)?;
        Ok(ParseNode::leaf(Term::Terminal(terminal), token))
    }

    /// Consumes exactly `word` as a keyword leaf.
    pub fn expect_word(&mut self, word: &str) -> Result<ParseNode, Error> {
        if !self.at_word(word) {
            return Err(self.unexpected(&format!("`{}`", word)));
        }

        Ok(self.keyword_leaf())
    }

    /// Consumes any word of `class` as a keyword leaf.
    pub fn expect_keyword_of(&mut self, class: KeywordClass) -> Result<ParseNode, Error> {
        if !self.at_word_of(class) {
            return Err(self.unexpected(class.describe()));
        }

        Ok(self.keyword_leaf())
    }

    /// Consumes the current token, whatever it is, as a keyword leaf.
    pub fn keyword_leaf(&mut self) -> ParseNode {
        let token = self.advance();
        ParseNode::leaf(Term::Keyword, token)
    }

    /// Marks the start of `production` and returns where it begins.
    pub fn enter(&mut self, production: Production) -> Position {
        self.rule_stack.push(production);
        self.current_token().span.start.clone()
    }

    /// Closes the innermost production and builds its node.
    pub fn finish(
        &mut self,
        production: Production,
        children: Vec<ParseNode>,
        start: Position,
    ) -> ParseNode {
        debug_assert_eq!(self.rule_stack.last(), Some(&production));
        self.rule_stack.pop();

        let end = if self.last_end.0 < start.0 {
            start.clone()
        } else {
            self.last_end.clone()
        };

        ParseNode::rule(production, children, Span { start, end })
    }

    pub fn depth(&self) -> usize {
        self.rule_stack.len()
    }

    /// Drops productions abandoned by a failed parse.
    pub fn unwind(&mut self, depth: usize) {
        self.rule_stack.truncate(depth);
    }

    /// The rule stack rendered for diagnostics.
    pub fn state_description(&self) -> String {
        if self.rule_stack.is_empty() {
            return String::from("<root>");
        }

        self.rule_stack
            .iter()
            .map(|production| production.name())
            .collect::<Vec<&str>>()
            .join(" > ")
    }

    /// Turns a failed parse into diagnostics, using the current rule stack.
    pub fn record(&mut self, error: Error) {
        if let ErrorImpl::SyntaxError { diagnostics } = error.get_internal_error() {
            self.diagnostics.extend(diagnostics.iter().cloned());
            return;
        }

        tracing::trace!(state = %self.state_description(), "recording parse error: {}", error);
        self.diagnostics.push(Diagnostic {
            position: error.get_position().clone(),
            parser_state: self.state_description(),
            message: error.to_string(),
        });
    }

    pub fn get_declaration_lookup(&self) -> &DeclarationLookup {
        &self.declaration_lookup
    }

    pub fn get_statement_lookup(&self) -> &StatementLookup {
        &self.statement_lookup
    }

    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    pub fn get_type_led_lookup(&self) -> &TypeLEDLookup {
        &self.type_led_lookup
    }

    /// Registers a declaration handler for a leading keyword.
    pub fn declaration(&mut self, keyword: &'static str, handler: DeclarationHandler) {
        self.declaration_lookup.insert(keyword, handler);
    }

    /// Registers a statement handler for a token kind.
    pub fn statement(&mut self, kind: TokenKind, handler: StatementHandler) {
        self.statement_lookup.insert(kind, handler);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a postfix type handler.
    pub fn type_led(&mut self, kind: TokenKind, led_fn: TypeLEDHandler) {
        self.type_led_lookup.insert(kind, led_fn);
    }

    /// Returns the current position in the source.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    fn into_result(self, root: ParseNode) -> Result<ParseNode, Error> {
        if self.diagnostics.is_empty() {
            return Ok(root);
        }

        tracing::debug!(count = self.diagnostics.len(), "parse failed");
        let position = self.diagnostics[0].position.clone();
        Err(Error::new(
            ErrorImpl::SyntaxError {
                diagnostics: self.diagnostics,
            },
            position,
        ))
    }
}

fn new_parser(tokens: Vec<Token>, file: Rc<String>) -> Parser {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);
    parser
}

/// Parses a token stream into a tree rooted at `PROGRAM_DECLARATION_LIST`.
///
/// # Returns
///
/// The tree, or a syntax error carrying every diagnostic collected.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<ParseNode, Error> {
    let mut parser = new_parser(tokens, file);
    let root = parse_program(&mut parser);
    parser.into_result(root)
}

/// Parses a token stream holding exactly one statement, rooted at `STATEMENT`.
pub fn parse_single_statement(tokens: Vec<Token>, file: Rc<String>) -> Result<ParseNode, Error> {
    let mut parser = new_parser(tokens, file);
    let start = parser.get_position();

    let root = match parse_statement(&mut parser) {
        Ok(node) => {
            if parser.has_tokens() {
                let error = parser.unexpected(TokenKind::EOF.describe());
                parser.record(error);
            }
            node
        }
        Err(error) => {
            parser.record(error);
            ParseNode::rule(
                Production::Statement,
                vec![],
                Span {
                    start: start.clone(),
                    end: start,
                },
            )
        }
    };

    parser.into_result(root)
}
