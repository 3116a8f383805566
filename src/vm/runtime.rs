//! The closed table of runtime functions generated code may call.

use super::{
    instructions::{NativeSignature, NativeType},
    machine::RuntimeError,
    value::Value,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeFunction {
    /// `int32 printf(int8*, ...)`
    Printf,
    /// `int32 putchar(int32)`
    Putchar,
}

impl RuntimeFunction {
    pub const ALL: [RuntimeFunction; 2] = [RuntimeFunction::Printf, RuntimeFunction::Putchar];

    /// Exact, case-sensitive lookup by bare name.
    pub fn lookup(name: &str) -> Option<RuntimeFunction> {
        RuntimeFunction::ALL
            .iter()
            .find(|function| function.name() == name)
            .copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            RuntimeFunction::Printf => "printf",
            RuntimeFunction::Putchar => "putchar",
        }
    }

    pub fn signature(&self) -> NativeSignature {
        match self {
            RuntimeFunction::Printf => NativeSignature {
                return_type: NativeType::Int32,
                parameters: vec![NativeType::Pointer(Box::new(NativeType::Int8))],
                variadic: true,
            },
            RuntimeFunction::Putchar => NativeSignature {
                return_type: NativeType::Int32,
                parameters: vec![NativeType::Int32],
                variadic: false,
            },
        }
    }

    /// Runs the function, appending anything it prints to `output`.
    pub fn invoke(&self, arguments: &[Value], output: &mut String) -> Result<Value, RuntimeError> {
        let signature = self.signature();
        if !signature.accepts_argument_count(arguments.len()) {
            return Err(RuntimeError::RuntimeFunction {
                function: self.name().to_string(),
                message: format!("cannot take {} arguments", arguments.len()),
            });
        }

        for (index, (argument, ty)) in arguments.iter().zip(signature.parameters.iter()).enumerate() {
            if !argument.fits(ty) {
                return Err(RuntimeError::RuntimeFunction {
                    function: self.name().to_string(),
                    message: format!(
                        "argument {} must be {}, got {}",
                        index,
                        ty,
                        argument.type_name()
                    ),
                });
            }
        }

        match self {
            RuntimeFunction::Printf => {
                // The format pointer has nothing behind it, so every argument
                // is printed as is.
                let line = arguments
                    .iter()
                    .map(|argument| argument.to_string())
                    .collect::<Vec<String>>()
                    .join(" ");
                output.push_str(&line);
                output.push('\n');
                Ok(Value::Int32(line.len() as i32 + 1))
            }
            RuntimeFunction::Putchar => {
                let character = arguments[0].as_i64().unwrap_or_default() as u8;
                output.push(character as char);
                Ok(arguments[0])
            }
        }
    }
}
