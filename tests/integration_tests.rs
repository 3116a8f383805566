//! End-to-end tests: source text through parsing, lowering, analysis and
//! generation, then invocation on the machine.

use llvm_to_vm::{
    analyzer::analyzer::analyze,
    ast::{
        declarations::{Declaration, FunctionDefinition, Program},
        expressions::{BinaryOperator, Expression},
        statements::Statement,
        types::Type,
    },
    build_source, compile_source,
    compiler::compiler::{compile, ModuleOptions},
    errors::errors::{ErrorImpl, ErrorKind},
    parse_source,
    vm::{machine::Machine, value::Value},
};

const HELLO: &str = r#"; ModuleID = 'hello.c'
target datalayout = "e-m:e-i64:64-f80:128-n8:16:32:64-S128"
target triple = "x86_64-unknown-linux-gnu"

@.str = private unnamed_addr constant [4 x i8] c"%d\0A\00", align 1

declare i32 @printf(i8* nocapture, ...) nounwind

define i32 @main(i32 %argc) nounwind {
entry:
  %sum = add nsw i32 %argc, 41
  %call = tail call i32 (i8*, ...)* @printf(i8* null, i32 %sum) nounwind
  ret i32 0
}
"#;

fn only_definition(program: &Program) -> &FunctionDefinition {
    program
        .function_definitions()
        .next()
        .expect("program has a definition")
}

#[test]
fn test_sum_invocation() {
    let module = compile_source(
        "define i32 @sum(i32 %x, i32 %y) {\n  %r = add i32 %x, %y\n  ret %r\n}",
        Some("sum.ll".to_string()),
    )
    .unwrap();

    let mut machine = Machine::new();
    let result = machine
        .invoke(&module, "sum", &[Value::Int32(3), Value::Int32(4)])
        .unwrap();
    assert_eq!(result, Value::Int32(7));
}

#[test]
fn test_unused_float_declaration() {
    let source = "declare double @sqrt(double)\n\
                  define i32 @sum(i32 %x, i32 %y) {\n  %r = add i32 %x, %y\n  ret %r\n}";
    let module = compile_source(source, None).unwrap();

    let mut machine = Machine::new();
    let result = machine
        .invoke(&module, "sum", &[Value::Int32(3), Value::Int32(4)])
        .unwrap();
    assert_eq!(result, Value::Int32(7));
}

#[test]
fn test_hello_program() {
    let module = compile_source(HELLO, Some("hello.ll".to_string())).unwrap();

    let mut machine = Machine::new();
    let result = machine.invoke(&module, "main", &[Value::Int32(1)]).unwrap();
    assert_eq!(result, Value::Int32(0));
    assert_eq!(machine.output(), "0x0 42\n");
}

#[test]
fn test_binary_operation_ast() {
    let program = build_source("define void @f() {\n  %a = add i32 1, 2\n  ret void\n}", None).unwrap();

    assert_eq!(
        only_definition(&program).body[0],
        Statement::Expression(Expression::BinaryOperation {
            destination: "%a".to_string(),
            operation: BinaryOperator::Add,
            modifiers: Default::default(),
            ty: Type::Integer(32),
            left: Box::new(Expression::IntegerLiteral(1)),
            right: Box::new(Expression::IntegerLiteral(2)),
        })
    );
}

#[test]
fn test_declaration_populates_function_table() {
    let program = build_source("declare i32 @foo(i32, i8*)", None).unwrap();
    let analysis = analyze(&program).unwrap();

    assert_eq!(analysis.len(), 1);
    let foo = analysis.get_function("foo").unwrap();
    assert_eq!(
        foo.declaration.parameter_types(),
        vec![Type::Integer(32), Type::pointer_to(Type::Integer(8))]
    );
}

#[test]
fn test_duplicate_declaration() {
    let error = compile_source("declare i32 @foo(i32)\ndeclare i32 @foo(i32)", None).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DuplicateSymbol);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::DuplicateSymbol {
            symbol: "foo".to_string()
        }
    );
}

#[test]
fn test_unknown_call_target() {
    let error = compile_source(
        "define i32 @main() {\n  %v = call i32 @bar(i32 1)\n  ret i32 %v\n}",
        None,
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnresolvedSymbol);
    assert!(error.to_string().contains("bar"));
}

#[test]
fn test_syntax_error_keeps_every_diagnostic() {
    let error = build_source(
        "define i32 @f() {\n  %a = add i32 1 2\n  ret i32 %a\n}\ndeclare i32 @g(,)",
        Some("broken.ll".to_string()),
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::SyntaxError);
    assert!(!error.diagnostics().is_empty());
    for diagnostic in error.diagnostics() {
        assert_eq!(diagnostic.position.1.as_str(), "broken.ll");
        assert!(!diagnostic.message.is_empty());
    }
}

#[test]
fn test_grammar_coverage() {
    let examples = [
        "target triple = \"x86_64-pc-linux-gnu\"",
        "target datalayout = \"e-p:64:64\"",
        "declare i32 @putchar(i32)",
        "declare i32 @printf(i8*, ...)",
        "define void @f() {\n  ret void\n}",
        "@.s = private constant [2 x i8] c\"a\\00\", align 1",
        "@n = global i32 7",
        "define i32 @f(i32 %x) {\n  %y = add i32 %x, 1\n  ret i32 %y\n}",
        "define i32 @f() {\n  %c = call i32 @putchar(i32 65)\n  ret i32 %c\n}",
        "define i32 @f() {\nentry:\n  ret i32 0\n}",
    ];

    for source in examples {
        let tree = parse_source(source, None);
        assert!(tree.is_ok(), "{}: {:?}", source, tree.err());
        assert!(build_source(source, None).is_ok(), "{}", source);
    }
}

#[test]
fn test_display_round_trip() {
    let program = build_source(HELLO, None).unwrap();
    let reparsed = build_source(&program.to_string(), None).unwrap();

    assert_eq!(program, reparsed);
    assert_eq!(reparsed.declarations.len(), 5);
    assert!(matches!(reparsed.declarations[2], Declaration::Global(_)));
}

#[test]
fn test_independent_compilations() {
    let first = build_source("define i32 @f() {\n  ret i32 1\n}", None).unwrap();
    let second = build_source("define i32 @f() {\n  ret i32 2\n}", None).unwrap();

    let a = compile(&first, &ModuleOptions::default()).unwrap();
    let b = compile(
        &second,
        &ModuleOptions {
            module_name: "second".to_string(),
            type_name: "Second".to_string(),
        },
    )
    .unwrap();

    let mut machine = Machine::new();
    assert_eq!(machine.invoke(&a, "f", &[]), Ok(Value::Int32(1)));
    assert_eq!(machine.invoke(&b, "f", &[]), Ok(Value::Int32(2)));
}
