use crate::{
    ast::{expressions::Expression, statements::Statement},
    errors::errors::{Error, ErrorImpl},
    vm::instructions::Instruction,
    Position,
};

use super::{
    compiler::{FunctionContext, GenerateContext},
    expr::{gen_binary_operation, gen_call, gen_expression},
};

/// Generates one statement of a function body.
pub fn gen_statement(
    context: &GenerateContext,
    function: &mut FunctionContext,
    statement: &Statement,
) -> Result<(), Error> {
    match statement {
        Statement::Label(name) => function.mark_label(name),
        Statement::Return(value) => gen_return(function, value.as_ref()),
        Statement::Expression(Expression::BinaryOperation {
            destination,
            operation,
            ty,
            left,
            right,
            ..
        }) => gen_binary_operation(function, destination, *operation, ty, left, right),
        Statement::Expression(Expression::FunctionCall {
            destination,
            return_type,
            function_name,
            arguments,
            ..
        }) => gen_call(
            context,
            function,
            destination,
            return_type,
            function_name,
            arguments,
        ),
        Statement::Expression(other) => Err(Error::new(
            ErrorImpl::UnsupportedConstruct {
                construct: format!("`{}` as a statement", other),
            },
            Position::null(),
        )),
    }
}

/// `ret <value>` or `ret void`.
///
/// The operand is generated against the method's return type; whether the
/// value fits is checked when the method runs.
fn gen_return(function: &mut FunctionContext, value: Option<&Expression>) -> Result<(), Error> {
    if let Some(value) = value {
        let expected = function.return_type().clone();
        gen_expression(function, value, &expected)?;
    }

    function.emit(Instruction::Return);
    Ok(())
}
