//! Type parsing.
//!
//! Types start with a null denotation (`i32`, `void`, `[4 x i8]`, `<2 x i32>`,
//! `{ i32, i8* }`, `...`) and are then extended by postfix left denotations:
//! `*` makes a pointer and `( ... )` makes a function type. Every type, the
//! extended ones included, is wrapped in a `TYPE` node.

use std::collections::HashMap;

use crate::{
    errors::errors::Error,
    grammar::{
        grammar::{Production, Terminal},
        keywords::KeywordClass,
        tree::ParseNode,
    },
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<ParseNode, Error>;

/// Type alias for postfix type handler functions.
pub type TypeLEDHandler = fn(&mut Parser, ParseNode) -> Result<ParseNode, Error>;

pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Word, parse_word_type);
    parser.type_nud(TokenKind::Ellipsis, parse_ellipsis_type);
    parser.type_nud(TokenKind::OpenBracket, parse_array_type);
    parser.type_nud(TokenKind::Less, parse_vector_type);
    parser.type_nud(TokenKind::OpenCurly, parse_struct_type);

    parser.type_led(TokenKind::Star, parse_pointer_type);
    parser.type_led(TokenKind::OpenParen, parse_function_type);
}

pub fn parse_word_type(parser: &mut Parser) -> Result<ParseNode, Error> {
    let production = if parser.at_word_of(KeywordClass::IntegerType) {
        Production::TypeInteger
    } else if parser.at_word_of(KeywordClass::FloatType) {
        Production::TypeFloatingPoint
    } else if parser.at_word("void") {
        Production::TypeVoid
    } else {
        return Err(parser.unexpected("a type"));
    };

    let start = parser.enter(production);
    let keyword = parser.keyword_leaf();
    Ok(parser.finish(production, vec![keyword], start))
}

pub fn parse_ellipsis_type(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::TypeEllipsis);
    let ellipsis = parser.keyword_leaf();
    Ok(parser.finish(Production::TypeEllipsis, vec![ellipsis], start))
}

fn parse_sized_type(
    parser: &mut Parser,
    production: Production,
    open: TokenKind,
    close: TokenKind,
) -> Result<ParseNode, Error> {
    let start = parser.enter(production);
    parser.expect(open)?;
    let count = parser.expect_terminal(TokenKind::Number, Terminal::Number)?;
    let x = parser.expect_word("x")?;
    let element = parse_type(parser)?;
    parser.expect(close)?;

    Ok(parser.finish(production, vec![count, x, element], start))
}

pub fn parse_array_type(parser: &mut Parser) -> Result<ParseNode, Error> {
    parse_sized_type(
        parser,
        Production::TypeArray,
        TokenKind::OpenBracket,
        TokenKind::CloseBracket,
    )
}

pub fn parse_vector_type(parser: &mut Parser) -> Result<ParseNode, Error> {
    parse_sized_type(
        parser,
        Production::TypeVector,
        TokenKind::Less,
        TokenKind::Greater,
    )
}

pub fn parse_struct_type(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::TypeStruct);
    parser.expect(TokenKind::OpenCurly)?;
    let members = parse_type_list(parser, TokenKind::CloseCurly)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(parser.finish(Production::TypeStruct, vec![members], start))
}

pub fn parse_pointer_type(parser: &mut Parser, left: ParseNode) -> Result<ParseNode, Error> {
    let start = left.span.start.clone();
    parser.enter(Production::TypePointer);
    let star = parser.keyword_leaf();

    Ok(parser.finish(Production::TypePointer, vec![left, star], start))
}

pub fn parse_function_type(parser: &mut Parser, left: ParseNode) -> Result<ParseNode, Error> {
    let start = left.span.start.clone();
    parser.enter(Production::TypeFunction);
    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_type_list(parser, TokenKind::CloseParen)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(parser.finish(Production::TypeFunction, vec![left, parameters], start))
}

/// Comma separated types up to, not including, `terminator`.
pub fn parse_type_list(parser: &mut Parser, terminator: TokenKind) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::TypeList);
    let mut types = vec![];

    if parser.current_token_kind() != terminator {
        loop {
            types.push(parse_type(parser)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    Ok(parser.finish(Production::TypeList, types, start))
}

pub fn parse_type(parser: &mut Parser) -> Result<ParseNode, Error> {
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected("a type")),
    };

    let start = parser.enter(Production::Type);
    let inner = nud(parser)?;
    let mut left = parser.finish(Production::Type, vec![inner], start.clone());

    while let Some(led) = parser
        .get_type_led_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        parser.enter(Production::Type);
        let inner = led(parser, left)?;
        left = parser.finish(Production::Type, vec![inner], start.clone());
    }

    Ok(left)
}
