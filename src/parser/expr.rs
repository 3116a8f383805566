use crate::{
    errors::errors::Error,
    grammar::{
        grammar::{Production, Terminal},
        keywords::KeywordClass,
        tree::{ParseNode, Term},
    },
    lexer::tokens::TokenKind,
    Position,
};

use super::{parser::Parser, types::parse_type};

pub fn at_value_term(parser: &Parser) -> bool {
    matches!(
        parser.current_token_kind(),
        TokenKind::Identifier | TokenKind::Number
    ) || parser.at_word_of(KeywordClass::ValueKeyword)
}

pub fn parse_value_term(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::ValueTerm);

    let value = match parser.current_token_kind() {
        TokenKind::Identifier => ParseNode::leaf(Term::Terminal(Terminal::Identifier), parser.advance()),
        TokenKind::Number => ParseNode::leaf(Term::Terminal(Terminal::Number), parser.advance()),
        _ if parser.at_word_of(KeywordClass::ValueKeyword) => parser.keyword_leaf(),
        _ => return Err(parser.unexpected("a value")),
    };

    Ok(parser.finish(Production::ValueTerm, vec![value], start))
}

/// `TYPE value`, `TYPE cast (...)` or `TYPE getelementptr inbounds (...)`.
pub fn parse_constant_expression(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::ConstantExpression);
    let ty = parse_type(parser)?;

    let inner = if parser.current_token_kind() == TokenKind::Identifier {
        parser.enter(Production::ConstantExpressionIdentifier);
        let name = parser.expect_terminal(TokenKind::Identifier, Terminal::Identifier)?;
        parser.finish(
            Production::ConstantExpressionIdentifier,
            vec![ty, name],
            start.clone(),
        )
    } else if at_value_term(parser) {
        parser.enter(Production::ConstantExpressionNumber);
        let value = parse_value_term(parser)?;
        parser.finish(
            Production::ConstantExpressionNumber,
            vec![ty, value],
            start.clone(),
        )
    } else if parser.at_word_of(KeywordClass::CastOperator) {
        parse_cast(parser, ty, start.clone())?
    } else if parser.at_word("getelementptr") {
        parse_getelementptr(parser, ty, start.clone())?
    } else {
        return Err(parser.unexpected("a value, a cast or `getelementptr`"));
    };

    Ok(parser.finish(Production::ConstantExpression, vec![inner], start))
}

fn parse_cast(
    parser: &mut Parser,
    ty: ParseNode,
    start: Position,
) -> Result<ParseNode, Error> {
    parser.enter(Production::ConstantExpressionCstTo);
    let operator = parser.keyword_leaf();
    parser.expect(TokenKind::OpenParen)?;
    let value = parse_constant_expression(parser)?;
    let to = parser.expect_word("to")?;
    let target_type = parse_type(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(parser.finish(
        Production::ConstantExpressionCstTo,
        vec![ty, operator, value, to, target_type],
        start,
    ))
}

fn parse_getelementptr(
    parser: &mut Parser,
    ty: ParseNode,
    start: Position,
) -> Result<ParseNode, Error> {
    parser.enter(Production::ConstantExpressionGetElementPtr);
    let getelementptr = parser.keyword_leaf();
    let inbounds = parser.expect_word("inbounds")?;
    parser.expect(TokenKind::OpenParen)?;
    let base = parse_constant_expression(parser)?;
    parser.expect(TokenKind::Comma)?;
    let indices = parse_constant_expression_list(
        parser,
        Production::ConstantExpressionList,
        TokenKind::CloseParen,
    )?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(parser.finish(
        Production::ConstantExpressionGetElementPtr,
        vec![ty, getelementptr, inbounds, base, indices],
        start,
    ))
}

/// Comma separated constant expressions up to, not including, `terminator`,
/// collected under `production`.
pub fn parse_constant_expression_list(
    parser: &mut Parser,
    production: Production,
    terminator: TokenKind,
) -> Result<ParseNode, Error> {
    let start = parser.enter(production);
    let mut expressions = vec![];

    if parser.current_token_kind() != terminator {
        loop {
            expressions.push(parse_constant_expression(parser)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    Ok(parser.finish(production, expressions, start))
}
