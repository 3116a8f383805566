use super::{
    ast::{bare_name, Modifiers},
    declarations::{
        DeclaredParameter, Declaration, FunctionDeclaration, GlobalDeclaration, GlobalStorage,
        Program, TargetDirective, TargetKind,
    },
    expressions::{BinaryOperator, Expression},
    statements::Statement,
    types::{FloatKind, Type},
};

fn printf_type() -> Type {
    Type::pointer_to(Type::Function {
        return_type: Box::new(Type::Integer(32)),
        parameters: vec![Type::pointer_to(Type::Integer(8)), Type::Ellipsis],
    })
}

#[test]
fn test_type_display() {
    assert_eq!(Type::Integer(32).to_string(), "i32");
    assert_eq!(Type::pointer_to(Type::Integer(8)).to_string(), "i8*");
    assert_eq!(
        Type::Array {
            count: "4".to_string(),
            element: Box::new(Type::Integer(8))
        }
        .to_string(),
        "[4 x i8]"
    );
    assert_eq!(
        Type::Vector {
            count: "2".to_string(),
            element: Box::new(Type::Float(FloatKind::Double))
        }
        .to_string(),
        "<2 x double>"
    );
    assert_eq!(Type::Struct(vec![]).to_string(), "{}");
    assert_eq!(
        Type::Struct(vec![Type::Integer(1), Type::Void]).to_string(),
        "{ i1, void }"
    );
    assert_eq!(printf_type().to_string(), "i32 (i8*, ...)*");
}

#[test]
fn test_call_result_type() {
    assert_eq!(printf_type().call_result_type(), &Type::Integer(32));
    assert_eq!(Type::Integer(64).call_result_type(), &Type::Integer(64));
    assert_eq!(
        Type::pointer_to(Type::Integer(8)).call_result_type(),
        &Type::pointer_to(Type::Integer(8))
    );
}

#[test]
fn test_binary_operator_keywords() {
    for operator in BinaryOperator::ALL {
        assert_eq!(BinaryOperator::from_keyword(operator.as_str()), Some(operator));
    }
    assert_eq!(BinaryOperator::from_keyword("icmp"), None);
}

#[test]
fn test_modifiers_keep_insertion_order() {
    let mut modifiers = Modifiers::new();
    assert!(modifiers.insert("nuw"));
    assert!(modifiers.insert("nsw"));
    assert!(!modifiers.insert("nuw"));

    assert_eq!(modifiers.len(), 2);
    assert_eq!(modifiers.to_string(), "nuw nsw");
    assert_eq!(modifiers.suffix(), " nuw nsw");
    assert_eq!(Modifiers::new().prefix(), "");
}

#[test]
fn test_bare_name() {
    assert_eq!(bare_name("@printf"), "printf");
    assert_eq!(bare_name("%x"), "x");
    assert_eq!(bare_name("42"), "42");
}

#[test]
fn test_statement_display() {
    let add = Expression::BinaryOperation {
        destination: "%r".to_string(),
        operation: BinaryOperator::Add,
        modifiers: ["nsw"].into_iter().collect(),
        ty: Type::Integer(32),
        left: Box::new(Expression::Identifier("%x".to_string())),
        right: Box::new(Expression::IntegerLiteral(-1)),
    };
    assert_eq!(
        Statement::Expression(add).to_string(),
        "%r = add nsw i32 %x, -1"
    );

    let call = Expression::FunctionCall {
        destination: "%c".to_string(),
        modifiers: ["tail"].into_iter().collect(),
        return_type: printf_type(),
        function_name: "@printf".to_string(),
        arguments: vec![Expression::typed(Type::Integer(32), "5")],
        attributes: ["nounwind"].into_iter().collect(),
    };
    assert_eq!(
        call.to_string(),
        "%c = tail call i32 (i8*, ...)* @printf(i32 5) nounwind"
    );

    assert_eq!(Statement::Return(None).to_string(), "ret void");
    assert_eq!(Statement::Label("entry".to_string()).to_string(), "entry:");
}

#[test]
fn test_declaration_display() {
    let program = Program {
        declarations: vec![
            Declaration::Target(TargetDirective {
                kind: TargetKind::Triple,
                value: "x86_64".to_string(),
            }),
            Declaration::Global(GlobalDeclaration {
                name: "@.str".to_string(),
                modifiers: ["private", "unnamed_addr"].into_iter().collect(),
                storage: GlobalStorage::Constant,
                ty: Type::Array {
                    count: "3".to_string(),
                    element: Box::new(Type::Integer(8)),
                },
                initializer: Expression::StringLiteral("%d\0".to_string()),
                alignment: Some(1),
            }),
            Declaration::FunctionDeclaration(FunctionDeclaration {
                name: "@putchar".to_string(),
                return_type: Type::Integer(32),
                parameters: vec![DeclaredParameter {
                    ty: Type::Integer(32),
                    attributes: Modifiers::new(),
                }],
                attributes: ["nounwind"].into_iter().collect(),
            }),
        ],
    };

    assert_eq!(
        program.to_string(),
        "target triple = \"x86_64\"\n\
         @.str = private unnamed_addr constant [3 x i8] c\"%d\\00\", align 1\n\
         declare i32 @putchar(i32) nounwind\n"
    );
}

#[test]
fn test_serialize_to_json() {
    let json = serde_json::to_value(Type::pointer_to(Type::Integer(8))).unwrap();
    assert_eq!(json, serde_json::json!({ "Pointer": { "Integer": 8 } }));

    let json = serde_json::to_value(Statement::Return(None)).unwrap();
    assert_eq!(json, serde_json::json!({ "Return": null }));
}
