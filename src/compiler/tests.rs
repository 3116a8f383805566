use super::{
    compiler::{compile, ModuleOptions},
    types::{resolve_parameter_types, resolve_type},
};
use crate::{
    ast::types::{FloatKind, Type},
    build_source, compile_source,
    errors::errors::{Error, ErrorImpl, ErrorKind},
    vm::{
        instructions::{Instruction, NativeType},
        machine::Machine,
        module::Module,
        runtime::RuntimeFunction,
        value::Value,
    },
};

fn compile_text(source: &str) -> Result<Module, Error> {
    compile_source(source, Some("test.ll".to_string()))
}

fn body(source: &str) -> String {
    format!("define i32 @f(i32 %x) {{\n{}\n}}", source)
}

#[test]
fn test_resolve_type() {
    assert_eq!(resolve_type(&Type::Integer(8)).unwrap(), NativeType::Int8);
    assert_eq!(resolve_type(&Type::Integer(64)).unwrap(), NativeType::Int64);
    assert_eq!(resolve_type(&Type::Void).unwrap(), NativeType::Void);
    assert_eq!(
        resolve_type(&Type::pointer_to(Type::Integer(16))).unwrap(),
        NativeType::Pointer(Box::new(NativeType::Int16))
    );
    assert_eq!(
        resolve_type(&Type::Array {
            count: "4".to_string(),
            element: Box::new(Type::Integer(8))
        })
        .unwrap(),
        NativeType::Array(Box::new(NativeType::Int8))
    );
    assert_eq!(
        resolve_type(&Type::Function {
            return_type: Box::new(Type::Integer(32)),
            parameters: vec![Type::Ellipsis],
        })
        .unwrap(),
        NativeType::Delegate
    );

    for unsupported in [
        Type::Integer(1),
        Type::Integer(128),
        Type::Float(FloatKind::Double),
        Type::Struct(vec![]),
        Type::Ellipsis,
        Type::pointer_to(Type::Float(FloatKind::Half)),
    ] {
        let error = resolve_type(&unsupported).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedType, "{}", unsupported);
    }
}

#[test]
fn test_resolve_parameter_types() {
    let (parameters, variadic) =
        resolve_parameter_types(&[Type::pointer_to(Type::Integer(8)), Type::Ellipsis]).unwrap();
    assert_eq!(parameters.len(), 1);
    assert!(variadic);

    let (parameters, variadic) = resolve_parameter_types(&[]).unwrap();
    assert!(parameters.is_empty());
    assert!(!variadic);
}

#[test]
fn test_generate_sum() {
    let module = compile_text("define i32 @sum(i32 %x, i32 %y) {\n  %r = add i32 %x, %y\n  ret %r\n}").unwrap();

    let sum = module.get_method("sum").unwrap();
    assert_eq!(sum.parameters(), &[NativeType::Int32, NativeType::Int32]);
    assert_eq!(sum.locals(), &[NativeType::Int32]);
    assert_eq!(
        sum.instructions(),
        &[
            Instruction::LoadArgument(0),
            Instruction::LoadArgument(1),
            Instruction::Add,
            Instruction::StoreLocal(0),
            Instruction::LoadLocal(0),
            Instruction::Return,
        ]
    );

    let result = Machine::new()
        .invoke(&module, "sum", &[Value::Int32(3), Value::Int32(4)])
        .unwrap();
    assert_eq!(result, Value::Int32(7));
}

#[test]
fn test_module_options() {
    let program = build_source("define void @f() {\n  ret void\n}", None).unwrap();
    let options = ModuleOptions {
        module_name: "demo".to_string(),
        type_name: "Demo".to_string(),
    };
    let module = compile(&program, &options).unwrap();

    assert_eq!(module.module_name(), "demo");
    assert_eq!(module.type_name(), "Demo");
    assert_eq!(module.get_method("f").unwrap().instructions(), &[Instruction::Return]);
}

#[test]
fn test_literals_take_operation_type() {
    let source = "define i64 @f() {\n  %a = add i64 2147483647, true\n  ret i64 %a\n}\n\
                  define i64 @g() {\n  ret i64 5000000000\n}";
    let module = compile_text(source).unwrap();

    let f = module.get_method("f").unwrap();
    assert_eq!(f.instructions()[0], Instruction::LoadConstant(Value::Int64(2_147_483_647)));
    assert_eq!(f.instructions()[1], Instruction::LoadConstant(Value::Int64(1)));

    let g = module.get_method("g").unwrap();
    assert_eq!(g.instructions()[0], Instruction::LoadConstant(Value::Int64(5_000_000_000)));

    let mut machine = Machine::new();
    assert_eq!(machine.invoke(&module, "f", &[]), Ok(Value::Int64(2_147_483_648)));
    assert_eq!(machine.invoke(&module, "g", &[]), Ok(Value::Int64(5_000_000_000)));
}

#[test]
fn test_add_wraps_at_width() {
    let module = compile_text(
        "define i8 @f(i8 %a, i8 %b) {\n  %r = add i8 %a, %b\n  ret i8 %r\n}\n\
         define i16 @g(i16 %a) {\n  %r = add i16 %a, 1\n  ret %r\n}",
    )
    .unwrap();
    let mut machine = Machine::new();

    assert_eq!(
        machine.invoke(&module, "f", &[Value::Int8(127), Value::Int8(1)]),
        Ok(Value::Int8(-128))
    );
    assert_eq!(
        machine.invoke(&module, "g", &[Value::Int16(i16::MAX)]),
        Ok(Value::Int16(i16::MIN))
    );
}

#[test]
fn test_locals_shadow_nothing() {
    let error = compile_text(&body("  %x = add i32 1, 2\n  ret i32 %x")).unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::DuplicateSymbol {
            symbol: "%x".to_string()
        }
    );

    let error = compile_text(&body("  %a = add i32 1, 2\n  %a = add i32 3, 4\n  ret i32 %a")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::DuplicateSymbol);
}

#[test]
fn test_duplicate_parameters_and_methods() {
    let error = compile_text("define i32 @f(i32 %x, i32 %x) {\n  ret i32 %x\n}").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::DuplicateSymbol);

    let error = compile_text("define void @f() {\n  ret void\n}\ndefine void @f() {\n  ret void\n}").unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::DuplicateSymbol {
            symbol: "f".to_string()
        }
    );
}

#[test]
fn test_unresolved_identifiers() {
    let error = compile_text(&body("  %a = add i32 %missing, 1\n  ret i32 %a")).unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnresolvedIdentifier {
            identifier: "%missing".to_string()
        }
    );

    let error = compile_text(&body("  ret i32 @global")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnresolvedSymbol);
}

#[test]
fn test_unsupported_operation() {
    let error = compile_text(&body("  %a = sub i32 %x, 1\n  ret i32 %a")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnsupportedConstruct);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnsupportedOperation {
            operation: "sub".to_string()
        }
    );
}

#[test]
fn test_unsupported_local_types() {
    let error = compile_text(&body("  %a = add void 1, 2\n  ret i32 0")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnsupportedType);

    let error = compile_text(&body("  %a = fadd double 1, 2\n  ret i32 0")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnsupportedType);
}

#[test]
fn test_call_unknown_function() {
    let error = compile_text(&body("  %v = call i32 @bar(i32 1)\n  ret i32 %v")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnresolvedSymbol);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnresolvedFunction {
            function: "bar".to_string()
        }
    );
}

#[test]
fn test_call_defined_function() {
    let source = "define i32 @one() {\n  ret i32 1\n}\ndefine i32 @two() {\n  %v = call i32 @one()\n  ret i32 %v\n}";
    let error = compile_text(source).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnsupportedConstruct);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::IntraProgramCall {
            function: "one".to_string()
        }
    );
}

#[test]
fn test_call_runtime_function() {
    let source = "declare i32 @putchar(i32)\ndefine i32 @main() {\nentry:\n  %c = call i32 @putchar(i32 72)\n  %d = call i32 @putchar(i32 105)\n  ret i32 %d\n}";
    let module = compile_text(source).unwrap();

    let main = module.get_method("main").unwrap();
    assert_eq!(main.labels().get("entry"), Some(&0));
    assert_eq!(
        main.instructions()[1],
        Instruction::Call {
            function: RuntimeFunction::Putchar,
            argument_count: 1
        }
    );

    let mut machine = Machine::new();
    assert_eq!(machine.invoke(&module, "main", &[]), Ok(Value::Int32(105)));
    assert_eq!(machine.output(), "Hi");
}

#[test]
fn test_call_printf_through_function_pointer_type() {
    let source = "define i32 @main(i32 %n) {\n  %call = tail call i32 (i8*, ...)* @printf(i8* null, i32 %n, i64 7) nounwind\n  ret i32 %call\n}";
    let module = compile_text(source).unwrap();

    let mut machine = Machine::new();
    let written = machine.invoke(&module, "main", &[Value::Int32(42)]).unwrap();
    assert_eq!(machine.output(), "0x0 42 7\n");
    assert_eq!(written, Value::Int32(9));
}

#[test]
fn test_call_signature_mismatch() {
    let error = compile_text(&body("  %v = call i32 @putchar(i32 1, i32 2)\n  ret i32 %v")).unwrap_err();
    assert_eq!(error.get_error_name(), "NoMatchingSignature");
    assert_eq!(error.kind(), ErrorKind::UnresolvedSymbol);

    let error = compile_text(&body("  %v = call i64 @putchar(i32 1)\n  ret i32 0")).unwrap_err();
    assert_eq!(error.get_error_name(), "NoMatchingSignature");

    let error = compile_text(&body("  %v = call i32 @putchar(i8 1)\n  ret i32 0")).unwrap_err();
    assert_eq!(error.get_error_name(), "NoMatchingSignature");

    let source = "declare i32 @putchar(i64)\ndefine i32 @f() {\n  %v = call i32 @putchar(i32 1)\n  ret i32 %v\n}";
    let error = compile_text(source).unwrap_err();
    assert_eq!(error.get_error_name(), "NoMatchingSignature");
}

#[test]
fn test_duplicate_label() {
    let error = compile_text(&body("a:\n  ret i32 0\na:\n  ret i32 1")).unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::DuplicateSymbol {
            symbol: "a".to_string()
        }
    );
}

#[test]
fn test_unsupported_operands() {
    let error = compile_text(
        "define i8* @f() {\n  ret i8* getelementptr inbounds ([1 x i8]* @s, i32 0, i32 0)\n}",
    )
    .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnsupportedConstruct);

    let error = compile_text(&body("  ret i32 null")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnsupportedConstruct);
}

#[test]
fn test_globals_and_targets_are_skipped() {
    let source = "target triple = \"x86_64\"\n@n = global i32 3\ndefine i32 @f() {\n  ret i32 0\n}";
    let module = compile_text(source).unwrap();

    assert_eq!(module.methods().count(), 1);
}

#[test]
fn test_destination_is_not_visible_in_its_operands() {
    let error = compile_text("define i32 @f() {\n  %a = add i32 %a, 1\n  ret %a\n}").unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnresolvedIdentifier {
            identifier: "%a".to_string()
        }
    );

    let error = compile_text("define i32 @f() {\n  %v = call i32 @putchar(i32 %v)\n  ret %v\n}").unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnresolvedIdentifier {
            identifier: "%v".to_string()
        }
    );
}

#[test]
fn test_unused_float_declaration_compiles() {
    let source = "declare double @sqrt(double)\n\
                  define i32 @f(i32 %x, i32 %y) {\n  %r = add i32 %x, %y\n  ret %r\n}";
    let module = compile_text(source).unwrap();

    let result = Machine::new()
        .invoke(&module, "f", &[Value::Int32(2), Value::Int32(5)])
        .unwrap();
    assert_eq!(result, Value::Int32(7));
}

#[test]
fn test_called_declaration_must_resolve() {
    let source = "declare double @putchar(double)\n\
                  define i32 @f() {\n  %c = call i32 @putchar(i32 65)\n  ret %c\n}";
    let error = compile_text(source).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnsupportedType {
            type_: "double".to_string()
        }
    );
}
