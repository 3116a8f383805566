use crate::{
    errors::errors::Error,
    grammar::{
        grammar::{Production, Terminal},
        keywords::KeywordClass,
        tree::{ParseNode, Term},
    },
    lexer::tokens::TokenKind,
};

use super::{
    decl::{at_declaration_start, parse_keyword_list},
    expr::{at_value_term, parse_constant_expression, parse_constant_expression_list, parse_value_term},
    parser::Parser,
    types::parse_type,
};

/// Parses statements up to the closing `}` of a function body.
///
/// A failed statement is recorded and skipped; the list itself never fails.
/// A declaration keyword ends the list early so the caller reports the
/// missing `}`.
pub fn parse_statement_list(parser: &mut Parser) -> ParseNode {
    let start = parser.enter(Production::StatementList);
    let depth = parser.depth();
    let mut statements = vec![];

    while parser.has_tokens()
        && parser.current_token_kind() != TokenKind::CloseCurly
        && !at_declaration_start(parser)
    {
        let before = parser.pos();

        match parse_statement(parser) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                parser.record(error);
                parser.unwind(depth);
                synchronize_statement(parser, before);
            }
        }
    }

    parser.finish(Production::StatementList, statements, start)
}

fn at_statement_start(parser: &Parser) -> bool {
    let token = parser.current_token();
    let next = parser.peek(1).kind;

    match token.kind {
        TokenKind::CloseCurly => true,
        TokenKind::Identifier => next == TokenKind::Assignment,
        TokenKind::Word => token.value == "ret" || next == TokenKind::Colon,
        _ => false,
    }
}

fn synchronize_statement(parser: &mut Parser, before: usize) {
    if parser.pos() == before {
        parser.advance();
    }

    while parser.has_tokens() && !at_statement_start(parser) && !at_declaration_start(parser) {
        parser.advance();
    }
}

pub fn parse_statement(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::Statement);
    let handler = parser
        .get_statement_lookup()
        .get(&parser.current_token_kind())
        .copied();

    let statement = match handler {
        Some(handler) => handler(parser)?,
        None => return Err(parser.unexpected("a statement")),
    };

    Ok(parser.finish(Production::Statement, vec![statement], start))
}

/// `%x = <binary operator> ...` or `%x = [tail] call ...`.
pub fn parse_assignment_statement(parser: &mut Parser) -> Result<ParseNode, Error> {
    let operator = parser.peek(2);

    if operator.kind == TokenKind::Word && KeywordClass::BinaryOperator.contains(&operator.value) {
        parse_binary_op(parser)
    } else if operator.is_word("call")
        || (operator.kind == TokenKind::Word && KeywordClass::CallModifier.contains(&operator.value))
    {
        parse_call(parser)
    } else if parser.peek(1).kind != TokenKind::Assignment {
        parser.advance();
        Err(parser.unexpected(TokenKind::Assignment.describe()))
    } else {
        parser.advance();
        parser.advance();
        Err(parser.unexpected("a binary operator or `call`"))
    }
}

/// `ret ...` or `label:`.
pub fn parse_keyword_statement(parser: &mut Parser) -> Result<ParseNode, Error> {
    if parser.at_word("ret") {
        parse_return(parser)
    } else if parser.peek(1).kind == TokenKind::Colon {
        parse_label(parser)
    } else {
        Err(parser.unexpected("a statement"))
    }
}

pub fn parse_binary_op(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::BinaryOp);
    let destination = parser.expect_terminal(TokenKind::Identifier, Terminal::Identifier)?;
    parser.expect(TokenKind::Assignment)?;

    let term_start = parser.enter(Production::BinaryTerm);
    let operator = parser.expect_keyword_of(KeywordClass::BinaryOperator)?;
    let operator = parser.finish(Production::BinaryTerm, vec![operator], term_start);

    let modifiers = parse_keyword_list(
        parser,
        Production::StatementBinaryOpModifierList,
        KeywordClass::BinaryOpModifier,
    );
    let ty = parse_type(parser)?;
    let left = parse_value_term(parser)?;
    parser.expect(TokenKind::Comma)?;
    let right = parse_value_term(parser)?;

    Ok(parser.finish(
        Production::BinaryOp,
        vec![destination, operator, modifiers, ty, left, right],
        start,
    ))
}

pub fn parse_call(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::Call);
    let destination = parser.expect_terminal(TokenKind::Identifier, Terminal::Identifier)?;
    parser.expect(TokenKind::Assignment)?;
    let modifiers = parse_keyword_list(
        parser,
        Production::CallModifierList,
        KeywordClass::CallModifier,
    );
    let call = parser.expect_word("call")?;
    let ty = parse_type(parser)?;
    let function = parser.expect_terminal(TokenKind::Identifier, Terminal::Identifier)?;

    parser.expect(TokenKind::OpenParen)?;
    let arguments = parse_constant_expression_list(
        parser,
        Production::CallParameterWithTypeList,
        TokenKind::CloseParen,
    )?;
    parser.expect(TokenKind::CloseParen)?;
    let attributes = parse_keyword_list(
        parser,
        Production::FunctionAttributeList,
        KeywordClass::FunctionAttribute,
    );

    Ok(parser.finish(
        Production::Call,
        vec![destination, modifiers, call, ty, function, arguments, attributes],
        start,
    ))
}

pub fn parse_return(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::Return);
    let ret = parser.expect_word("ret")?;

    let value = if parser.at_word("void") {
        parser.keyword_leaf()
    } else if at_value_term(parser) {
        parse_value_term(parser)?
    } else {
        parse_constant_expression(parser)?
    };

    Ok(parser.finish(Production::Return, vec![ret, value], start))
}

pub fn parse_label(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::Label);
    let name = parser.expect_terminal(TokenKind::Word, Terminal::LabelName)?;
    let colon = parser.expect(TokenKind::Colon)?;

    Ok(parser.finish(
        Production::Label,
        vec![name, ParseNode::leaf(Term::Keyword, colon)],
        start,
    ))
}
