use super::analyzer::analyze;
use crate::{
    ast::types::Type,
    build_source,
    errors::errors::{ErrorImpl, ErrorKind},
    vm::instructions::NativeType,
};

#[test]
fn test_declare_registers_function() {
    let program = build_source("declare i32 @foo(i32, i8*)", None).unwrap();
    let analysis = analyze(&program).unwrap();

    let foo = analysis.get_function("foo").unwrap();
    assert_eq!(
        foo.declaration.parameter_types(),
        vec![Type::Integer(32), Type::pointer_to(Type::Integer(8))]
    );
    let signature = foo.signature().unwrap();
    assert_eq!(signature.return_type, NativeType::Int32);
    assert!(!signature.variadic);
    assert!(analysis.get_function("@foo").is_none());
}

#[test]
fn test_variadic_declaration() {
    let program = build_source("declare i32 @printf(i8* nocapture, ...) nounwind", None).unwrap();
    let analysis = analyze(&program).unwrap();

    let printf = analysis.get_function("printf").unwrap();
    let signature = printf.signature().unwrap();
    assert!(signature.variadic);
    assert_eq!(signature.to_string(), "int32 (int8*, ...)");
}

#[test]
fn test_duplicate_declaration() {
    let program = build_source("declare i32 @foo(i32)\ndeclare i32 @foo(i64)", None).unwrap();
    let error = analyze(&program).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DuplicateSymbol);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::DuplicateSymbol {
            symbol: "foo".to_string()
        }
    );
}

#[test]
fn test_definitions_and_globals_add_nothing() {
    let source = "target triple = \"x86_64\"\n@g = global i32 1\ndefine i32 @main() {\n  ret i32 0\n}";
    let program = build_source(source, None).unwrap();
    let analysis = analyze(&program).unwrap();

    assert!(analysis.is_empty());
}

#[test]
fn test_unsupported_declared_type_resolves_lazily() {
    let program = build_source("declare double @sqrt(double)", None).unwrap();
    let analysis = analyze(&program).unwrap();

    let sqrt = analysis.get_function("sqrt").unwrap();
    let error = sqrt.signature().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnsupportedType);
}

#[test]
fn test_ellipsis_must_be_last() {
    let program = build_source("declare i32 @f(..., i32)", None).unwrap();
    let analysis = analyze(&program).unwrap();
    let error = analysis.get_function("f").unwrap().signature().unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnsupportedType {
            type_: "...".to_string()
        }
    );
}
