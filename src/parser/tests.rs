//! Unit tests for the parser module.

use std::rc::Rc;

use super::parser::{parse, parse_single_statement};
use crate::{
    errors::errors::{Error, ErrorKind},
    grammar::{
        grammar::Production,
        tree::{validate_tree, ParseNode, Term},
    },
    lexer::lexer::tokenize,
};

fn parse_text(source: &str) -> Result<ParseNode, Error> {
    let tokens = tokenize(source.to_string(), Some("test.ll".to_string())).unwrap();
    parse(tokens, Rc::new("test.ll".to_string()))
}

fn names(node: &ParseNode) -> Vec<&str> {
    node.children.iter().map(|child| child.term_name()).collect()
}

/// The declaration inside the n-th PROGRAM_DECLARATION wrapper.
fn declaration(root: &ParseNode, index: usize) -> &ParseNode {
    &root.children[index].children[0]
}

fn leaves<'a>(node: &'a ParseNode, out: &mut Vec<&'a str>) {
    if node.token.is_some() {
        out.push(node.text());
    }
    for child in &node.children {
        leaves(child, out);
    }
}

#[test]
fn test_parse_empty_program() {
    let root = parse_text("; nothing here\n").unwrap();

    assert_eq!(root.term, Term::Rule(Production::ProgramDeclarationList));
    assert!(root.children.is_empty());
}

#[test]
fn test_parse_declare_function() {
    let root = parse_text("declare i32 @printf(i8* nocapture, ...) nounwind").unwrap();
    validate_tree(&root).unwrap();

    let declare = declaration(&root, 0);
    assert_eq!(declare.term_name(), "DECLARE_FUNCTION");
    assert_eq!(
        names(declare),
        vec![
            "declare",
            "TYPE",
            "IDENTIFIER",
            "DECLARE_PARAMETER_LIST",
            "FUNCTION_ATTRIBUTE_LIST"
        ]
    );

    let parameters = &declare.children[3];
    assert_eq!(parameters.children.len(), 2);
    assert_eq!(names(&parameters.children[0]), vec!["TYPE", "PARAMETER_ATTRIBUTE_LIST"]);
    assert_eq!(parameters.children[0].children[1].children[0].text(), "nocapture");
    assert_eq!(parameters.children[1].children[0].children[0].term_name(), "TYPE_ELLIPSIS");
    assert_eq!(declare.children[4].children[0].text(), "nounwind");
}

#[test]
fn test_parse_define_function() {
    let source = "define i32 @sum(i32 %x, i32 %y) {\n  %r = add nsw i32 %x, %y\n  ret i32 %r\n}";
    let root = parse_text(source).unwrap();
    validate_tree(&root).unwrap();

    let define = declaration(&root, 0);
    assert_eq!(
        names(define),
        vec![
            "define",
            "TYPE",
            "IDENTIFIER",
            "DEFINE_PARAMETER_LIST",
            "FUNCTION_ATTRIBUTE_LIST",
            "STATEMENT_LIST"
        ]
    );

    let body = &define.children[5];
    assert_eq!(body.children.len(), 2);
    let binary = &body.children[0].children[0];
    assert_eq!(binary.term_name(), "BINARY_OP");
    assert_eq!(
        names(binary),
        vec![
            "IDENTIFIER",
            "BINARY_TERM",
            "STATEMENT_BINARY_OP_MODIFIER_LIST",
            "TYPE",
            "VALUE_TERM",
            "VALUE_TERM"
        ]
    );
    assert_eq!(binary.children[2].children[0].text(), "nsw");

    let ret = &body.children[1].children[0];
    assert_eq!(names(ret), vec!["ret", "CONSTANT_EXPRESSION"]);
    assert_eq!(
        ret.children[1].children[0].term_name(),
        "CONSTANT_EXPRESSION_IDENTIFIER"
    );
}

#[test]
fn test_parse_target_and_global() {
    let source = r#"
target datalayout = "e-m:e-i64:64"
target triple = "x86_64-pc-linux-gnu"
@.str = private unnamed_addr constant [4 x i8] c"%d\0A\00", align 1
@count = global i32 7
"#;
    let root = parse_text(source).unwrap();
    validate_tree(&root).unwrap();
    assert_eq!(root.children.len(), 4);

    let triple = declaration(&root, 1);
    assert_eq!(names(triple), vec!["target", "triple", "STRING"]);
    assert_eq!(triple.children[2].text(), "x86_64-pc-linux-gnu");

    let string = declaration(&root, 2);
    assert_eq!(
        names(string),
        vec![
            "IDENTIFIER",
            "DECLARE_GLOBAL_MODIFIERS",
            "constant",
            "TYPE",
            "LITERAL",
            "GLOBAL_ALIGNMENT"
        ]
    );
    assert_eq!(names(&string.children[1]), vec!["private", "unnamed_addr"]);
    assert_eq!(string.children[3].children[0].term_name(), "TYPE_ARRAY");
    assert_eq!(string.children[4].children[0].children[1].text(), "%d\n\0");
    assert_eq!(string.children[5].children[0].text(), "1");

    let count = declaration(&root, 3);
    assert_eq!(count.children[2].text(), "global");
    assert!(count.children[5].children.is_empty());
}

#[test]
fn test_parse_call_with_function_pointer_type() {
    let source = "define i32 @main() nounwind {\nentry:\n  %call = tail call i32 (i8*, ...)* @printf(i8* getelementptr inbounds ([4 x i8]* @.str, i32 0, i32 0), i32 5) nounwind\n  ret i32 0\n}";
    let root = parse_text(source).unwrap();
    validate_tree(&root).unwrap();

    let body = &declaration(&root, 0).children[5];
    assert_eq!(body.children[0].children[0].term_name(), "LABEL");

    let call = &body.children[1].children[0];
    assert_eq!(
        names(call),
        vec![
            "IDENTIFIER",
            "CALL_MODIFIER_LIST",
            "call",
            "TYPE",
            "IDENTIFIER",
            "CALL_PARAMETER_WITH_TYPE_LIST",
            "FUNCTION_ATTRIBUTE_LIST"
        ]
    );

    // i32 (i8*, ...)*  ->  TYPE(TYPE_POINTER(TYPE(TYPE_FUNCTION(..)), *))
    let pointer = &call.children[3].children[0];
    assert_eq!(pointer.term_name(), "TYPE_POINTER");
    assert_eq!(pointer.children[0].children[0].term_name(), "TYPE_FUNCTION");

    let arguments = &call.children[5];
    assert_eq!(arguments.children.len(), 2);
    assert_eq!(
        arguments.children[0].children[0].term_name(),
        "CONSTANT_EXPRESSION_GETELEMENTPTR"
    );
    assert_eq!(
        arguments.children[1].children[0].term_name(),
        "CONSTANT_EXPRESSION_NUMBER"
    );
}

#[test]
fn test_parse_cast_expression() {
    let source = "define i32 @f() {\n  %v = call i32 @g(i32* bitcast (i8* @h to i32*))\n  ret void\n}";
    let root = parse_text(source).unwrap();
    validate_tree(&root).unwrap();

    let call = &declaration(&root, 0).children[5].children[0].children[0];
    let cast = &call.children[5].children[0].children[0];
    assert_eq!(
        names(cast),
        vec!["TYPE", "bitcast", "CONSTANT_EXPRESSION", "to", "TYPE"]
    );
}

#[test]
fn test_parse_return_forms() {
    let source = "define void @f(i32 %x) {\n  ret %x\n  ret 5\n  ret i1 true\n  ret void\n}";
    let root = parse_text(source).unwrap();
    validate_tree(&root).unwrap();

    let body = &declaration(&root, 0).children[5];
    let values: Vec<&str> = body
        .children
        .iter()
        .map(|statement| statement.children[0].children[1].term_name())
        .collect();
    assert_eq!(
        values,
        vec!["VALUE_TERM", "VALUE_TERM", "CONSTANT_EXPRESSION", "void"]
    );
}

#[test]
fn test_parse_types() {
    let source = "declare <4 x i32> @f({ i32, i8* }, [2 x [3 x i16]], double, void (i32)*)";
    let root = parse_text(source).unwrap();
    validate_tree(&root).unwrap();

    let declare = declaration(&root, 0);
    assert_eq!(declare.children[1].children[0].term_name(), "TYPE_VECTOR");

    let kinds: Vec<&str> = declare.children[3]
        .children
        .iter()
        .map(|parameter| parameter.children[0].children[0].term_name())
        .collect();
    assert_eq!(
        kinds,
        vec!["TYPE_STRUCT", "TYPE_ARRAY", "TYPE_FLOATING_POINT", "TYPE_POINTER"]
    );
}

#[test]
fn test_punctuation_is_not_kept() {
    let source = "define i32 @sum(i32 %x, i32 %y) {\n  %r = add i32 %x, %y\n  ret i32 %r\n}";
    let root = parse_text(source).unwrap();

    let mut texts = vec![];
    leaves(&root, &mut texts);
    for punctuation in ["(", ")", ",", "=", "{", "}", "[", "]", "<", ">"] {
        assert!(!texts.contains(&punctuation), "found `{}`", punctuation);
    }
    assert!(texts.contains(&"define"));
    assert!(texts.contains(&"%r"));
}

#[test]
fn test_spans_cover_source() {
    let source = "declare i32 @foo(i32)";
    let root = parse_text(source).unwrap();

    let declare = declaration(&root, 0);
    assert_eq!(declare.span.start.0, 0);
    assert_eq!(declare.span.end.0, source.len() as u32);
}

#[test]
fn test_parse_reports_every_error() {
    let source = "define i32 @f(i32 %x) {
  %a = add i32 %x
  %b = frob i32 1, 2
  ret i32 %a
}
declare i32 @g(
define i32 @h() {
  ret i32 0
}";
    let error = parse_text(source).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::SyntaxError);

    let diagnostics = error.diagnostics();
    assert_eq!(diagnostics.len(), 3);

    assert!(diagnostics[0].parser_state.ends_with("STATEMENT_LIST > STATEMENT > BINARY_OP"));
    assert_eq!(diagnostics[0].position.0, source.find("%b").unwrap() as u32);

    assert!(diagnostics[1].parser_state.ends_with("STATEMENT"));
    assert!(diagnostics[1].message.contains("frob"));

    assert!(diagnostics[2].parser_state.ends_with("DECLARE_PARAMETER > TYPE"));
    assert!(diagnostics[2]
        .parser_state
        .starts_with("PROGRAM_DECLARATION_LIST > PROGRAM_DECLARATION > DECLARE_FUNCTION"));
}

#[test]
fn test_parse_missing_closing_brace() {
    let source = "define i32 @f() {\n  ret i32 0\ndefine i32 @g() {\n  ret i32 1\n}";
    let error = parse_text(source).unwrap_err();

    assert_eq!(error.diagnostics().len(), 1);
    assert!(error.diagnostics()[0].message.contains("`}`"));
}

#[test]
fn test_parse_unknown_declaration() {
    let error = parse_text("module asm \"x\"").unwrap_err();
    assert_eq!(error.diagnostics().len(), 1);
    assert_eq!(error.diagnostics()[0].parser_state, "PROGRAM_DECLARATION_LIST > PROGRAM_DECLARATION");
}

#[test]
fn test_parse_single_statement() {
    let tokens = tokenize("%a = add i32 1, 2".to_string(), None).unwrap();
    let root = parse_single_statement(tokens, Rc::new("shell".to_string())).unwrap();
    validate_tree(&root).unwrap();

    assert_eq!(root.term_name(), "STATEMENT");
    assert_eq!(root.children[0].term_name(), "BINARY_OP");

    let tokens = tokenize("%a = add i32 1, 2 ret".to_string(), None).unwrap();
    let error = parse_single_statement(tokens, Rc::new("shell".to_string())).unwrap_err();
    assert_eq!(error.diagnostics().len(), 1);
}

#[test]
fn test_validate_tree_rejects_wrong_children() {
    let source = "declare i32 @foo(i32)";
    let mut root = parse_text(source).unwrap();

    // Drop the return type of the declaration.
    root.children[0].children[0].children.remove(1);
    assert!(validate_tree(&root).is_err());
}
