//! Unit tests for the lexer module.

use super::{
    lexer::{decode_string, encode_string, tokenize},
    tokens::TokenKind,
};
use crate::errors::errors::ErrorKind;

#[test]
fn test_tokenize_identifiers() {
    let source = "%a @main %x.addr @str$1 %_tmp".to_string();
    let tokens = tokenize(source, Some("test.ll".to_string())).unwrap();

    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["%a", "@main", "%x.addr", "@str$1", "%_tmp", "EOF"]);
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_words() {
    let source = "define i32 x86_fp80 nounwind entry for.body".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert!(tokens[..6].iter().all(|t| t.kind == TokenKind::Word));
    assert!(tokens[0].is_word("define"));
    assert!(tokens[2].is_word("x86_fp80"));
    assert!(tokens[5].is_word("for.body"));
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 -7 3.14 1e10 0".to_string();
    let tokens = tokenize(source, None).unwrap();

    let values: Vec<&str> = tokens[..5].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["42", "-7", "3.14", "1e10", "0"]);
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Number));
}

#[test]
fn test_tokenize_strings() {
    let source = r#"c"hello\0A\00" "a\\b" "e-m:e""#.to_string();
    let tokens = tokenize(source, None).unwrap();

    assert!(tokens[0].is_word("c"));
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "hello\n\0");
    assert_eq!(tokens[2].value, "a\\b");
    assert_eq!(tokens[3].value, "e-m:e");
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) [ ] { } < > , = * : ...".to_string();
    let tokens = tokenize(source, None).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Comma,
            TokenKind::Assignment,
            TokenKind::Star,
            TokenKind::Colon,
            TokenKind::Ellipsis,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_pointer_and_function_types() {
    let source = "i32 (i8*, ...)*".to_string();
    let tokens = tokenize(source, None).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Word,
            TokenKind::OpenParen,
            TokenKind::Word,
            TokenKind::Star,
            TokenKind::Comma,
            TokenKind::Ellipsis,
            TokenKind::CloseParen,
            TokenKind::Star,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "; ModuleID = 'x'\r\nret ; trailing\n".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens.len(), 2);
    assert!(tokens[0].is_word("ret"));
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_token_positions() {
    let source = "ret i32 %r".to_string();
    let tokens = tokenize(source, Some("pos.ll".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 3);
    assert_eq!(tokens[2].span.start.0, 8);
    assert_eq!(tokens[2].span.end.0, 10);
    assert_eq!(tokens[3].span.start.0, 10);
    assert_eq!(*tokens[0].span.start.1, "pos.ll");
}

#[test]
fn test_unrecognised_characters_collected() {
    let source = "define i32 @f() #0 {\n  ret i32 1 ! \n}".to_string();
    let error = tokenize(source, None).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::SyntaxError);
    let diagnostics = error.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].position.0, 16);
    assert!(diagnostics[0].message.contains('#'));
    assert!(diagnostics[1].message.contains('!'));
    assert_eq!(error.get_position().0, 16);
}

#[test]
fn test_string_escape_round_trip() {
    let original = "say \"hi\"\n\\";
    assert_eq!(decode_string(&encode_string(original)), original);
    assert_eq!(encode_string("a\nb"), "a\\0Ab");
    assert_eq!(decode_string("\\zz"), "\\zz");
}
