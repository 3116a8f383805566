use std::collections::HashMap;

use crate::{errors::errors::Error, grammar::tree::ParseNode, lexer::tokens::TokenKind};

use super::{decl::*, parser::Parser, stmt::*};

pub type DeclarationHandler = fn(&mut Parser) -> Result<ParseNode, Error>;
pub type StatementHandler = fn(&mut Parser) -> Result<ParseNode, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Declarations
    parser.declaration("target", parse_target);
    parser.declaration("declare", parse_declare_function);
    parser.declaration("define", parse_define_function);

    // Statements
    parser.statement(TokenKind::Identifier, parse_assignment_statement);
    parser.statement(TokenKind::Word, parse_keyword_statement);
}

// Lookup tables inside parser struct, so it's easier
pub type DeclarationLookup = HashMap<&'static str, DeclarationHandler>;
pub type StatementLookup = HashMap<TokenKind, StatementHandler>;
