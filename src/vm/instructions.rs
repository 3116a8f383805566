use std::fmt::Display;

use super::{runtime::RuntimeFunction, value::Value};

/// Built-in types of the machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeType {
    Void,
    Int8,
    Int16,
    Int32,
    Int64,
    Pointer(Box<NativeType>),
    Array(Box<NativeType>),
    /// Any callable.
    Delegate,
}

impl NativeType {
    pub fn is_void(&self) -> bool {
        matches!(self, NativeType::Void)
    }
}

impl Display for NativeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NativeType::Void => write!(f, "void"),
            NativeType::Int8 => write!(f, "int8"),
            NativeType::Int16 => write!(f, "int16"),
            NativeType::Int32 => write!(f, "int32"),
            NativeType::Int64 => write!(f, "int64"),
            NativeType::Pointer(element) => write!(f, "{}*", element),
            NativeType::Array(element) => write!(f, "{}[]", element),
            NativeType::Delegate => write!(f, "delegate"),
        }
    }
}

/// Resolved signature of a method or runtime function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeSignature {
    pub return_type: NativeType,
    pub parameters: Vec<NativeType>,
    /// Accepts arguments beyond `parameters`.
    pub variadic: bool,
}

impl NativeSignature {
    pub fn accepts_argument_count(&self, count: usize) -> bool {
        if self.variadic {
            count >= self.parameters.len()
        } else {
            count == self.parameters.len()
        }
    }

    /// `int8*, ...`
    pub fn parameter_list(&self) -> String {
        let mut parameters: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
        if self.variadic {
            parameters.push(String::from("..."));
        }
        parameters.join(", ")
    }
}

impl Display for NativeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.return_type, self.parameter_list())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    LoadConstant(Value),
    LoadArgument(u16),
    LoadLocal(u16),
    StoreLocal(u16),
    /// Pops two integers of one width and pushes their wrapping sum.
    Add,
    Call {
        function: RuntimeFunction,
        argument_count: u16,
    },
    Return,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::LoadConstant(value) => match value {
                Value::Int8(_) | Value::Int16(_) | Value::Int32(_) => write!(f, "ldc.i4 {}", value),
                Value::Int64(_) => write!(f, "ldc.i8 {}", value),
                Value::Pointer(_) => write!(f, "ldc.ptr {}", value),
                Value::Handle(_) | Value::Void => write!(f, "ldnull"),
            },
            Instruction::LoadArgument(slot) => write!(f, "ldarg {}", slot),
            Instruction::LoadLocal(slot) => write!(f, "ldloc {}", slot),
            Instruction::StoreLocal(slot) => write!(f, "stloc {}", slot),
            Instruction::Add => write!(f, "add"),
            Instruction::Call { function, .. } => {
                let signature = function.signature();
                write!(
                    f,
                    "call {} {}({})",
                    signature.return_type,
                    function.name(),
                    signature.parameter_list()
                )
            }
            Instruction::Return => write!(f, "ret"),
        }
    }
}
