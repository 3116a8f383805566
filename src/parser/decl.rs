use crate::{
    errors::errors::Error,
    grammar::{
        grammar::{Production, Terminal},
        keywords::KeywordClass,
        tree::ParseNode,
    },
    lexer::tokens::TokenKind,
};

use super::{parser::Parser, stmt::parse_statement_list, types::parse_type};

/// Parses declarations until EOF, recovering after each failed one.
pub fn parse_program(parser: &mut Parser) -> ParseNode {
    let start = parser.enter(Production::ProgramDeclarationList);
    let depth = parser.depth();
    let mut declarations = vec![];

    while parser.has_tokens() {
        let before = parser.pos();

        match parse_program_declaration(parser) {
            Ok(declaration) => declarations.push(declaration),
            Err(error) => {
                parser.record(error);
                parser.unwind(depth);
                synchronize_declaration(parser, before);
            }
        }
    }

    parser.finish(Production::ProgramDeclarationList, declarations, start)
}

/// True where a new top level declaration can begin.
pub fn at_declaration_start(parser: &Parser) -> bool {
    let token = parser.current_token();
    match token.kind {
        TokenKind::Word => parser.get_declaration_lookup().contains_key(token.value.as_str()),
        TokenKind::Identifier => {
            token.value.starts_with('@') && parser.peek(1).kind == TokenKind::Assignment
        }
        _ => false,
    }
}

fn synchronize_declaration(parser: &mut Parser, before: usize) {
    if parser.pos() == before {
        parser.advance();
    }

    while parser.has_tokens() && !at_declaration_start(parser) {
        parser.advance();
    }
}

pub fn parse_program_declaration(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::ProgramDeclaration);
    let token = parser.current_token();

    let handler = match token.kind {
        TokenKind::Word => parser.get_declaration_lookup().get(token.value.as_str()).copied(),
        TokenKind::Identifier => Some(parse_global as fn(&mut Parser) -> Result<ParseNode, Error>),
        _ => None,
    };

    let declaration = match handler {
        Some(handler) => handler(parser)?,
        None => return Err(parser.unexpected("`define`, `declare`, `target` or a global")),
    };

    Ok(parser.finish(Production::ProgramDeclaration, vec![declaration], start))
}

pub fn parse_target(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::Target);
    let target = parser.expect_word("target")?;
    let kind = parser.expect_keyword_of(KeywordClass::TargetKind)?;
    parser.expect(TokenKind::Assignment)?;
    let value = parser.expect_terminal(TokenKind::String, Terminal::String)?;

    Ok(parser.finish(Production::Target, vec![target, kind, value], start))
}

pub fn parse_declare_function(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::DeclareFunction);
    let declare = parser.expect_word("declare")?;
    let return_type = parse_type(parser)?;
    let name = parser.expect_terminal(TokenKind::Identifier, Terminal::Identifier)?;

    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_parameter_list(
        parser,
        Production::DeclareParameterList,
        parse_declare_parameter,
    )?;
    parser.expect(TokenKind::CloseParen)?;
    let attributes = parse_keyword_list(
        parser,
        Production::FunctionAttributeList,
        KeywordClass::FunctionAttribute,
    );

    Ok(parser.finish(
        Production::DeclareFunction,
        vec![declare, return_type, name, parameters, attributes],
        start,
    ))
}

pub fn parse_define_function(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::DefineFunction);
    let define = parser.expect_word("define")?;
    let return_type = parse_type(parser)?;
    let name = parser.expect_terminal(TokenKind::Identifier, Terminal::Identifier)?;

    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_parameter_list(
        parser,
        Production::DefineParameterList,
        parse_define_parameter,
    )?;
    parser.expect(TokenKind::CloseParen)?;
    let attributes = parse_keyword_list(
        parser,
        Production::FunctionAttributeList,
        KeywordClass::FunctionAttribute,
    );

    parser.expect(TokenKind::OpenCurly)?;
    let body = parse_statement_list(parser);
    parser.expect(TokenKind::CloseCurly)?;

    Ok(parser.finish(
        Production::DefineFunction,
        vec![define, return_type, name, parameters, attributes, body],
        start,
    ))
}

fn parse_parameter_list(
    parser: &mut Parser,
    production: Production,
    parse_parameter: fn(&mut Parser) -> Result<ParseNode, Error>,
) -> Result<ParseNode, Error> {
    let start = parser.enter(production);
    let mut parameters = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            parameters.push(parse_parameter(parser)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    Ok(parser.finish(production, parameters, start))
}

fn parse_declare_parameter(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::DeclareParameter);
    let ty = parse_type(parser)?;
    let attributes = parse_keyword_list(
        parser,
        Production::ParameterAttributeList,
        KeywordClass::ParameterAttribute,
    );

    Ok(parser.finish(Production::DeclareParameter, vec![ty, attributes], start))
}

fn parse_define_parameter(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::DefineParameter);
    let ty = parse_type(parser)?;
    let attributes = parse_keyword_list(
        parser,
        Production::ParameterAttributeList,
        KeywordClass::ParameterAttribute,
    );
    let name = parser.expect_terminal(TokenKind::Identifier, Terminal::Identifier)?;

    Ok(parser.finish(
        Production::DefineParameter,
        vec![ty, attributes, name],
        start,
    ))
}

/// Zero or more keywords of `class`, collected under `production`.
pub fn parse_keyword_list(
    parser: &mut Parser,
    production: Production,
    class: KeywordClass,
) -> ParseNode {
    let start = parser.enter(production);
    let mut keywords = vec![];

    while parser.at_word_of(class) {
        keywords.push(parser.keyword_leaf());
    }

    parser.finish(production, keywords, start)
}

pub fn parse_global(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::DeclareGlobal);
    let name = parser.expect_terminal(TokenKind::Identifier, Terminal::Identifier)?;
    parser.expect(TokenKind::Assignment)?;
    let modifiers = parse_keyword_list(
        parser,
        Production::DeclareGlobalModifiers,
        KeywordClass::GlobalModifier,
    );
    let storage = parser.expect_keyword_of(KeywordClass::GlobalStorage)?;
    let ty = parse_type(parser)?;
    let initializer = parse_literal(parser)?;
    let alignment = parse_global_alignment(parser)?;

    Ok(parser.finish(
        Production::DeclareGlobal,
        vec![name, modifiers, storage, ty, initializer, alignment],
        start,
    ))
}

fn parse_literal(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::Literal);

    let literal = if parser.at_word("c") {
        let literal_start = parser.enter(Production::LiteralString);
        let c = parser.keyword_leaf();
        let value = parser.expect_terminal(TokenKind::String, Terminal::String)?;
        parser.finish(Production::LiteralString, vec![c, value], literal_start)
    } else if parser.current_token_kind() == TokenKind::Number {
        let literal_start = parser.enter(Production::LiteralNumber);
        let value = parser.expect_terminal(TokenKind::Number, Terminal::Number)?;
        parser.finish(Production::LiteralNumber, vec![value], literal_start)
    } else {
        return Err(parser.unexpected("a string or number literal"));
    };

    Ok(parser.finish(Production::Literal, vec![literal], start))
}

fn parse_global_alignment(parser: &mut Parser) -> Result<ParseNode, Error> {
    let start = parser.enter(Production::GlobalAlignment);
    let mut alignment = vec![];

    if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        parser.expect_word("align")?;
        alignment.push(parser.expect_terminal(TokenKind::Number, Terminal::Number)?);
    }

    Ok(parser.finish(Production::GlobalAlignment, alignment, start))
}
