use crate::{
    ast::{
        ast::bare_name,
        expressions::{BinaryOperator, Expression},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    vm::{
        instructions::{Instruction, NativeType},
        runtime::RuntimeFunction,
        value::Value,
    },
    Position,
};

use super::{
    compiler::{FunctionContext, GenerateContext},
    types::resolve_type,
};

fn error(internal_error: ErrorImpl) -> Error {
    Error::new(internal_error, Position::null())
}

fn unsupported(construct: &str) -> Error {
    error(ErrorImpl::UnsupportedConstruct {
        construct: construct.to_string(),
    })
}

fn no_matching_signature(function: &str, message: String) -> Error {
    error(ErrorImpl::NoMatchingSignature {
        function: function.to_string(),
        message,
    })
}

/// Resolves the type of a statement's named result.
fn local_type(ty: &Type) -> Result<NativeType, Error> {
    match resolve_type(ty)? {
        NativeType::Void => Err(error(ErrorImpl::UnsupportedType {
            type_: ty.to_string(),
        })),
        native => Ok(native),
    }
}

/// Pushes the value of an operand.
///
/// # Arguments
///
/// * `expected` - The type untyped literals take
///
/// # Returns
///
/// The type of the pushed value.
pub fn gen_expression(
    function: &mut FunctionContext,
    expression: &Expression,
    expected: &NativeType,
) -> Result<NativeType, Error> {
    match expression {
        Expression::IntegerLiteral(value) => gen_constant(function, *value as i64, expected),
        Expression::Identifier(name) => gen_value(function, name, expected),
        Expression::TypedLiteral { ty, raw } => {
            let native = resolve_type(ty)?;
            gen_value(function, raw, &native)
        }
        Expression::GetElementPtr { .. } => Err(unsupported("getelementptr")),
        Expression::StringLiteral(_) => Err(unsupported("string literal operand")),
        Expression::BinaryOperation { destination, .. }
        | Expression::FunctionCall { destination, .. } => {
            Err(unsupported(&format!("nested statement {}", destination)))
        }
    }
}

fn gen_constant(function: &mut FunctionContext, value: i64, ty: &NativeType) -> Result<NativeType, Error> {
    let constant = Value::from_integer(ty, value).ok_or_else(|| {
        error(ErrorImpl::UnsupportedType {
            type_: ty.to_string(),
        })
    })?;

    function.emit(Instruction::LoadConstant(constant));
    Ok(ty.clone())
}

/// Pushes a value written as text: a `%name`, a keyword constant or a number.
fn gen_value(function: &mut FunctionContext, text: &str, expected: &NativeType) -> Result<NativeType, Error> {
    let unresolved = || {
        error(ErrorImpl::UnresolvedIdentifier {
            identifier: text.to_string(),
        })
    };

    if text.starts_with('%') {
        let (load, ty) = function.lookup(text).ok_or_else(unresolved)?;
        function.emit(load);
        return Ok(ty);
    }

    match text {
        _ if text.starts_with('@') => Err(unresolved()),
        "true" => gen_constant(function, 1, expected),
        "false" => gen_constant(function, 0, expected),
        "null" => match expected {
            NativeType::Pointer(_) => gen_constant(function, 0, expected),
            _ => Err(unsupported("null")),
        },
        number => {
            let value = number.parse::<i64>().map_err(|_| {
                error(ErrorImpl::NumberParseError {
                    token: number.to_string(),
                })
            })?;
            gen_constant(function, value, expected)
        }
    }
}

/// `%d = <op> <ty> <left>, <right>`
pub fn gen_binary_operation(
    function: &mut FunctionContext,
    destination: &str,
    operation: BinaryOperator,
    ty: &Type,
    left: &Expression,
    right: &Expression,
) -> Result<(), Error> {
    let native = local_type(ty)?;

    gen_expression(function, left, &native)?;
    gen_expression(function, right, &native)?;

    match operation {
        BinaryOperator::Add => {
            if !matches!(
                native,
                NativeType::Int8 | NativeType::Int16 | NativeType::Int32 | NativeType::Int64
            ) {
                return Err(error(ErrorImpl::UnsupportedType {
                    type_: ty.to_string(),
                }));
            }
            function.emit(Instruction::Add);
        }
        other => {
            return Err(error(ErrorImpl::UnsupportedOperation {
                operation: other.as_str().to_string(),
            }))
        }
    }

    // The destination is bound only after its operands, so it cannot refer
    // to itself.
    let slot = function.declare_local(destination, native)?;
    function.emit(Instruction::StoreLocal(slot));
    Ok(())
}

fn compatible(argument: &NativeType, parameter: &NativeType) -> bool {
    match (argument, parameter) {
        (NativeType::Pointer(_), NativeType::Pointer(_)) => true,
        _ => argument == parameter,
    }
}

/// `%d = call <ty> @name(<arguments>)`, resolved against the runtime
/// function table only.
pub fn gen_call(
    context: &GenerateContext,
    function: &mut FunctionContext,
    destination: &str,
    return_type: &Type,
    function_name: &str,
    arguments: &[Expression],
) -> Result<(), Error> {
    let result_type = local_type(return_type.call_result_type())?;

    let name = bare_name(function_name);
    let callee = match RuntimeFunction::lookup(name) {
        Some(callee) => callee,
        None if context.is_defined_function(name) => {
            return Err(error(ErrorImpl::IntraProgramCall {
                function: name.to_string(),
            }))
        }
        None => {
            return Err(error(ErrorImpl::UnresolvedFunction {
                function: name.to_string(),
            }))
        }
    };

    let signature = callee.signature();
    if !signature.accepts_argument_count(arguments.len()) {
        return Err(no_matching_signature(
            name,
            format!(
                "`{}` is {}, called with {} arguments",
                name,
                signature,
                arguments.len()
            ),
        ));
    }
    if result_type != signature.return_type {
        return Err(no_matching_signature(
            name,
            format!("`{}` returns {}, not {}", name, signature.return_type, result_type),
        ));
    }
    if let Some(symbol) = context.analysis().get_function(name) {
        let declared = symbol.signature()?;
        if declared != signature {
            return Err(no_matching_signature(
                name,
                format!(
                    "`{}` is declared as {} but the runtime provides {}",
                    name, declared, signature
                ),
            ));
        }
    }

    for (index, argument) in arguments.iter().enumerate() {
        let parameter = signature.parameters.get(index);
        let pushed = gen_expression(function, argument, parameter.unwrap_or(&NativeType::Int32))?;

        if let Some(parameter) = parameter {
            if !compatible(&pushed, parameter) {
                return Err(no_matching_signature(
                    name,
                    format!("argument {} of `{}` must be {}, found {}", index, name, parameter, pushed),
                ));
            }
        }
    }

    let argument_count = u16::try_from(arguments.len()).map_err(|_| unsupported("call with too many arguments"))?;
    function.emit(Instruction::Call {
        function: callee,
        argument_count,
    });

    let slot = function.declare_local(destination, result_type)?;
    function.emit(Instruction::StoreLocal(slot));
    Ok(())
}
