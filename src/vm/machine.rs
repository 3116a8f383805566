use thiserror::Error;

use super::{instructions::Instruction, module::Module, value::Value};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("method {0:?} not found")]
    MethodNotFound(String),
    #[error("{method} takes {expected} arguments, got {found}")]
    ArgumentCount {
        method: String,
        expected: usize,
        found: usize,
    },
    #[error("argument {index} of {method} must be {expected}, got {found}")]
    ArgumentType {
        method: String,
        index: usize,
        expected: String,
        found: String,
    },
    #[error("stack underflow in {method} at IL_{offset:04}")]
    StackUnderflow { method: String, offset: usize },
    #[error("slot {slot} does not exist in {method} at IL_{offset:04}")]
    InvalidSlot {
        method: String,
        offset: usize,
        slot: u16,
    },
    #[error("type mismatch in {method} at IL_{offset:04}: {message}")]
    TypeMismatch {
        method: String,
        offset: usize,
        message: String,
    },
    #[error("{function}: {message}")]
    RuntimeFunction { function: String, message: String },
    #[error("{method} ran past its last instruction")]
    FellOffEnd { method: String },
}

/// Interpreter for sealed modules.
///
/// Everything runtime functions print is captured in [`Machine::output`].
#[derive(Debug, Default)]
pub struct Machine {
    output: String,
}

impl Machine {
    pub fn new() -> Self {
        Machine::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Runs `method` of `module` with `arguments`.
    ///
    /// # Returns
    ///
    /// The returned value, [`Value::Void`] for `void` methods.
    pub fn invoke(
        &mut self,
        module: &Module,
        method: &str,
        arguments: &[Value],
    ) -> Result<Value, RuntimeError> {
        let body = module
            .get_method(method)
            .ok_or_else(|| RuntimeError::MethodNotFound(method.to_string()))?;

        if arguments.len() != body.parameters().len() {
            return Err(RuntimeError::ArgumentCount {
                method: method.to_string(),
                expected: body.parameters().len(),
                found: arguments.len(),
            });
        }
        for (index, (argument, ty)) in arguments.iter().zip(body.parameters()).enumerate() {
            if !argument.fits(ty) {
                return Err(RuntimeError::ArgumentType {
                    method: method.to_string(),
                    index,
                    expected: ty.to_string(),
                    found: argument.type_name().to_string(),
                });
            }
        }

        tracing::debug!(method, ?arguments, "invoking");

        let mut locals: Vec<Value> = body.locals().iter().map(Value::zero).collect();
        let mut stack: Vec<Value> = vec![];

        let underflow = |offset| RuntimeError::StackUnderflow {
            method: method.to_string(),
            offset,
        };
        let invalid_slot = |offset, slot| RuntimeError::InvalidSlot {
            method: method.to_string(),
            offset,
            slot,
        };
        let mismatch = |offset, message: String| RuntimeError::TypeMismatch {
            method: method.to_string(),
            offset,
            message,
        };

        for (offset, instruction) in body.instructions().iter().enumerate() {
            tracing::trace!(method, offset, "{}", instruction);

            match instruction {
                Instruction::LoadConstant(value) => stack.push(*value),
                Instruction::LoadArgument(slot) => {
                    let value = arguments
                        .get(*slot as usize)
                        .ok_or_else(|| invalid_slot(offset, *slot))?;
                    stack.push(*value);
                }
                Instruction::LoadLocal(slot) => {
                    let value = locals
                        .get(*slot as usize)
                        .ok_or_else(|| invalid_slot(offset, *slot))?;
                    stack.push(*value);
                }
                Instruction::StoreLocal(slot) => {
                    let value = stack.pop().ok_or_else(|| underflow(offset))?;
                    let ty = body
                        .locals()
                        .get(*slot as usize)
                        .ok_or_else(|| invalid_slot(offset, *slot))?;
                    if !value.fits(ty) {
                        return Err(mismatch(
                            offset,
                            format!("cannot store {} in a {} local", value.type_name(), ty),
                        ));
                    }
                    locals[*slot as usize] = value;
                }
                Instruction::Add => {
                    let right = stack.pop().ok_or_else(|| underflow(offset))?;
                    let left = stack.pop().ok_or_else(|| underflow(offset))?;
                    let sum = left.wrapping_add(right).ok_or_else(|| {
                        mismatch(
                            offset,
                            format!("cannot add {} and {}", left.type_name(), right.type_name()),
                        )
                    })?;
                    stack.push(sum);
                }
                Instruction::Call {
                    function,
                    argument_count,
                } => {
                    let count = *argument_count as usize;
                    if stack.len() < count {
                        return Err(underflow(offset));
                    }
                    let call_arguments = stack.split_off(stack.len() - count);
                    let result = function.invoke(&call_arguments, &mut self.output)?;
                    stack.push(result);
                }
                Instruction::Return => {
                    let return_type = body.return_type();
                    let value = if return_type.is_void() {
                        Value::Void
                    } else {
                        stack.pop().ok_or_else(|| underflow(offset))?
                    };

                    if !value.fits(return_type) {
                        return Err(mismatch(
                            offset,
                            format!("cannot return {} from a {} method", value.type_name(), return_type),
                        ));
                    }
                    return Ok(value);
                }
            }
        }

        Err(RuntimeError::FellOffEnd {
            method: method.to_string(),
        })
    }
}
