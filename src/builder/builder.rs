use crate::{
    ast::{
        ast::{AstNode, Modifiers},
        declarations::{
            DeclaredParameter, Declaration, DefinedParameter, FunctionDeclaration,
            FunctionDefinition, GlobalDeclaration, GlobalStorage, Program, TargetDirective,
            TargetKind,
        },
        expressions::{BinaryOperator, Expression},
        statements::Statement,
        types::{FloatKind, Type},
    },
    errors::errors::{Error, ErrorImpl},
    grammar::{
        grammar::{Production, Shape, Terminal},
        tree::{ParseNode, Term},
    },
};

use super::reader::{build_all, convert, malformed, ChildReader};

/// Lowers a parse tree node into its AST form.
///
/// Wrapper productions are collapsed, list productions become lists (or
/// modifier sets for keyword lists), and sequence productions are read by
/// field name.
pub fn build(node: &ParseNode) -> Result<AstNode, Error> {
    match node.term {
        Term::Rule(production) => build_rule(production, node),
        Term::Terminal(terminal) => build_terminal(terminal, node),
        Term::Keyword => build_keyword(node),
    }
}

/// Lowers a tree rooted at `PROGRAM_DECLARATION_LIST`.
pub fn build_program(node: &ParseNode) -> Result<Program, Error> {
    convert(build(node)?, "Program", node, AstNode::into_program)
}

/// Lowers a tree rooted at `STATEMENT`.
pub fn build_statement(node: &ParseNode) -> Result<Statement, Error> {
    convert(build(node)?, "Statement", node, AstNode::into_statement)
}

fn build_terminal(terminal: Terminal, node: &ParseNode) -> Result<AstNode, Error> {
    let expression = match terminal {
        Terminal::Number => Expression::IntegerLiteral(parse_integer(node)?),
        Terminal::Identifier => Expression::Identifier(node.text().to_string()),
        Terminal::String => Expression::StringLiteral(node.text().to_string()),
        Terminal::LabelName => return Ok(AstNode::Statement(Statement::Label(node.text().to_string()))),
    };

    Ok(AstNode::Expression(expression))
}

fn build_keyword(node: &ParseNode) -> Result<AstNode, Error> {
    match node.text() {
        "true" => Ok(AstNode::Expression(Expression::IntegerLiteral(1))),
        "false" => Ok(AstNode::Expression(Expression::IntegerLiteral(0))),
        "null" => Err(Error::new(
            ErrorImpl::UnsupportedConstruct {
                construct: String::from("null"),
            },
            node.span.start.clone(),
        )),
        keyword => Ok(AstNode::Keyword(keyword.to_string())),
    }
}

pub fn parse_integer(node: &ParseNode) -> Result<i32, Error> {
    node.text().parse::<i32>().map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: node.text().to_string(),
            },
            node.span.start.clone(),
        )
    })
}

fn build_rule(production: Production, node: &ParseNode) -> Result<AstNode, Error> {
    match production.shape() {
        Shape::Wrapper(alternatives) => {
            let [child] = node.children.as_slice() else {
                return Err(malformed(
                    node,
                    format!("{} with {} children", production, node.children.len()),
                    "exactly one child",
                ));
            };
            if !alternatives.iter().any(|kind| child.matches(kind)) {
                return Err(malformed(child, child.term_name(), production.name()));
            }
            build(child)
        }
        Shape::List(kind) => {
            if let Some(child) = node.children.iter().find(|child| !child.matches(&kind)) {
                return Err(malformed(child, child.term_name(), kind.describe()));
            }
            build_list(production, node)
        }
        Shape::Sequence(_) => build_sequence(production, node),
    }
}

fn build_list(production: Production, node: &ParseNode) -> Result<AstNode, Error> {
    match production {
        Production::ProgramDeclarationList => Ok(AstNode::Program(Program {
            declarations: build_all(node, "Declaration", AstNode::into_declaration)?,
        })),
        Production::ParameterAttributeList
        | Production::FunctionAttributeList
        | Production::DeclareGlobalModifiers
        | Production::StatementBinaryOpModifierList
        | Production::CallModifierList => Ok(AstNode::Modifiers(
            node.children
                .iter()
                .map(|child| child.text())
                .collect::<Modifiers>(),
        )),
        _ => Ok(AstNode::List(
            node.children.iter().map(build).collect::<Result<_, _>>()?,
        )),
    }
}

fn build_sequence(production: Production, node: &ParseNode) -> Result<AstNode, Error> {
    let reader = ChildReader::new(node, production)?;

    match production {
        Production::Target => build_target(&reader),
        Production::DeclareFunction => build_declare_function(&reader),
        Production::DefineFunction => build_define_function(&reader),
        Production::DeclareParameter => Ok(AstNode::DeclaredParameter(DeclaredParameter {
            ty: reader.ty("type")?,
            attributes: reader.modifiers("attributes")?,
        })),
        Production::DefineParameter => Ok(AstNode::DefinedParameter(DefinedParameter {
            ty: reader.ty("type")?,
            attributes: reader.modifiers("attributes")?,
            name: reader.text("name")?.to_string(),
        })),
        Production::DeclareGlobal => build_global(&reader),
        Production::LiteralString => {
            reader.keyword("c")?;
            Ok(AstNode::Expression(Expression::StringLiteral(
                reader.text("value")?.to_string(),
            )))
        }
        Production::LiteralNumber => Ok(AstNode::Expression(Expression::IntegerLiteral(
            parse_integer(reader.child("value")?)?,
        ))),
        Production::BinaryOp => build_binary_op(&reader),
        Production::Call => build_call(&reader),
        Production::Return => build_return(&reader),
        Production::Label => {
            reader.keyword("colon")?;
            Ok(AstNode::Statement(Statement::Label(
                reader.text("name")?.to_string(),
            )))
        }
        Production::ConstantExpressionIdentifier => Ok(AstNode::Expression(Expression::typed(
            reader.ty("type")?,
            reader.text("name")?,
        ))),
        Production::ConstantExpressionNumber => build_constant_number(&reader),
        Production::ConstantExpressionCstTo => Err(Error::new(
            ErrorImpl::UnsupportedConstruct {
                construct: production.name().to_string(),
            },
            node.span.start.clone(),
        )),
        Production::ConstantExpressionGetElementPtr => {
            reader.keyword("getelementptr")?;
            reader.keyword("inbounds")?;
            Ok(AstNode::Expression(Expression::GetElementPtr {
                ty: reader.ty("type")?,
                base: Box::new(reader.expression("base")?),
                indices: reader.items("indices", "Expression", AstNode::into_expression)?,
            }))
        }
        _ => build_type(production, &reader).map(AstNode::Type),
    }
}

fn build_target(reader: &ChildReader) -> Result<AstNode, Error> {
    reader.keyword("target")?;
    let kind_node = reader.child("kind")?;
    let kind = TargetKind::from_keyword(kind_node.text())
        .ok_or_else(|| malformed(kind_node, kind_node.text(), "`datalayout` or `triple`"))?;

    Ok(AstNode::Declaration(Declaration::Target(TargetDirective {
        kind,
        value: reader.text("value")?.to_string(),
    })))
}

fn build_declare_function(reader: &ChildReader) -> Result<AstNode, Error> {
    reader.keyword("declare")?;

    Ok(AstNode::Declaration(Declaration::FunctionDeclaration(
        FunctionDeclaration {
            name: reader.text("name")?.to_string(),
            return_type: reader.ty("return_type")?,
            parameters: reader.items(
                "parameters",
                "DeclaredParameter",
                AstNode::into_declared_parameter,
            )?,
            attributes: reader.modifiers("attributes")?,
        },
    )))
}

fn build_define_function(reader: &ChildReader) -> Result<AstNode, Error> {
    reader.keyword("define")?;

    Ok(AstNode::Declaration(Declaration::FunctionDefinition(
        FunctionDefinition {
            name: reader.text("name")?.to_string(),
            return_type: reader.ty("return_type")?,
            parameters: reader.items(
                "parameters",
                "DefinedParameter",
                AstNode::into_defined_parameter,
            )?,
            attributes: reader.modifiers("attributes")?,
            body: reader.items("body", "Statement", AstNode::into_statement)?,
        },
    )))
}

fn build_global(reader: &ChildReader) -> Result<AstNode, Error> {
    let storage_node = reader.child("storage")?;
    let storage = GlobalStorage::from_keyword(storage_node.text())
        .ok_or_else(|| malformed(storage_node, storage_node.text(), "`constant` or `global`"))?;

    let alignment = match reader.child("alignment")?.children.as_slice() {
        [] => None,
        [number] => Some(number.text().parse::<u32>().map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: number.text().to_string(),
                },
                number.span.start.clone(),
            )
        })?),
        [_, extra, ..] => return Err(malformed(extra, extra.term_name(), "a single alignment")),
    };

    Ok(AstNode::Declaration(Declaration::Global(GlobalDeclaration {
        name: reader.text("name")?.to_string(),
        modifiers: reader.modifiers("modifiers")?,
        storage,
        ty: reader.ty("type")?,
        initializer: reader.expression("initializer")?,
        alignment,
    })))
}

fn build_binary_op(reader: &ChildReader) -> Result<AstNode, Error> {
    let operator_node = reader.child("operator")?;
    let keyword = convert(build(operator_node)?, "Keyword", operator_node, AstNode::into_keyword)?;
    let operation = BinaryOperator::from_keyword(&keyword)
        .ok_or_else(|| malformed(operator_node, keyword.as_str(), "a binary operator"))?;

    Ok(AstNode::Expression(Expression::BinaryOperation {
        destination: reader.text("destination")?.to_string(),
        operation,
        modifiers: reader.modifiers("modifiers")?,
        ty: reader.ty("type")?,
        left: Box::new(reader.expression("left")?),
        right: Box::new(reader.expression("right")?),
    }))
}

fn build_call(reader: &ChildReader) -> Result<AstNode, Error> {
    reader.keyword("call")?;

    Ok(AstNode::Expression(Expression::FunctionCall {
        destination: reader.text("destination")?.to_string(),
        modifiers: reader.modifiers("modifiers")?,
        return_type: reader.ty("type")?,
        function_name: reader.text("function")?.to_string(),
        arguments: reader.items("arguments", "Expression", AstNode::into_expression)?,
        attributes: reader.modifiers("attributes")?,
    }))
}

fn build_return(reader: &ChildReader) -> Result<AstNode, Error> {
    reader.keyword("ret")?;

    let value = reader.child("value")?;
    if value.is_keyword("void") {
        return Ok(AstNode::Statement(Statement::Return(None)));
    }

    Ok(AstNode::Statement(Statement::Return(Some(
        reader.expression("value")?,
    ))))
}

/// `TYPE value`: the value is kept as written so `i1 true` or `i64` constants
/// beyond `i32` survive until generation knows the expected width.
fn build_constant_number(reader: &ChildReader) -> Result<AstNode, Error> {
    let ty = reader.ty("type")?;
    let value = reader.child("value")?;

    let [leaf] = value.children.as_slice() else {
        return Err(malformed(value, value.term_name(), "a single value"));
    };

    Ok(AstNode::Expression(Expression::typed(ty, leaf.text())))
}

fn build_type(production: Production, reader: &ChildReader) -> Result<Type, Error> {
    match production {
        Production::TypeInteger => {
            let width = reader.child("width")?;
            width
                .text()
                .strip_prefix('i')
                .and_then(|bits| bits.parse::<u32>().ok())
                .map(Type::Integer)
                .ok_or_else(|| malformed(width, width.text(), "an integer type"))
        }
        Production::TypeVoid => {
            reader.keyword("void")?;
            Ok(Type::Void)
        }
        Production::TypeFloatingPoint => {
            let kind = reader.child("kind")?;
            FloatKind::from_keyword(kind.text())
                .map(Type::Float)
                .ok_or_else(|| malformed(kind, kind.text(), "a floating point type"))
        }
        Production::TypeEllipsis => {
            reader.keyword("ellipsis")?;
            Ok(Type::Ellipsis)
        }
        Production::TypePointer => {
            reader.keyword("star")?;
            Ok(Type::pointer_to(reader.ty("pointee")?))
        }
        Production::TypeVector => {
            reader.keyword("x")?;
            Ok(Type::Vector {
                count: reader.text("count")?.to_string(),
                element: Box::new(reader.ty("element")?),
            })
        }
        Production::TypeArray => {
            reader.keyword("x")?;
            Ok(Type::Array {
                count: reader.text("count")?.to_string(),
                element: Box::new(reader.ty("element")?),
            })
        }
        Production::TypeStruct => Ok(Type::Struct(reader.items(
            "members",
            "Type",
            AstNode::into_type,
        )?)),
        Production::TypeFunction => Ok(Type::Function {
            return_type: Box::new(reader.ty("return_type")?),
            parameters: reader.items("parameters", "Type", AstNode::into_type)?,
        }),
        other => Err(malformed(reader.node(), other.name(), "a type production")),
    }
}
