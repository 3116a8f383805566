use std::fmt::Display;

use super::instructions::NativeType;

/// A value on the machine's operand stack or in a local slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Void,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    /// An address. There is no linear memory behind it.
    Pointer(u64),
    /// Opaque reference to an array or a delegate.
    Handle(u64),
}

impl Value {
    /// The zero value of `ty`, used to initialise locals.
    pub fn zero(ty: &NativeType) -> Value {
        match ty {
            NativeType::Void => Value::Void,
            NativeType::Int8 => Value::Int8(0),
            NativeType::Int16 => Value::Int16(0),
            NativeType::Int32 => Value::Int32(0),
            NativeType::Int64 => Value::Int64(0),
            NativeType::Pointer(_) => Value::Pointer(0),
            NativeType::Array(_) | NativeType::Delegate => Value::Handle(0),
        }
    }

    /// Builds an integer or pointer constant of type `ty`, truncating to
    /// the type's width. `None` when `ty` holds no integers.
    pub fn from_integer(ty: &NativeType, value: i64) -> Option<Value> {
        match ty {
            NativeType::Int8 => Some(Value::Int8(value as i8)),
            NativeType::Int16 => Some(Value::Int16(value as i16)),
            NativeType::Int32 => Some(Value::Int32(value as i32)),
            NativeType::Int64 => Some(Value::Int64(value)),
            NativeType::Pointer(_) => Some(Value::Pointer(value as u64)),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(value) => Some(*value as i64),
            Value::Int16(value) => Some(*value as i64),
            Value::Int32(value) => Some(*value as i64),
            Value::Int64(value) => Some(*value),
            _ => None,
        }
    }

    /// Whether this value may be stored in a slot of type `ty`.
    ///
    /// Pointers are untyped at run time, so any pointer fits any pointer type.
    pub fn fits(&self, ty: &NativeType) -> bool {
        matches!(
            (self, ty),
            (Value::Void, NativeType::Void)
                | (Value::Int8(_), NativeType::Int8)
                | (Value::Int16(_), NativeType::Int16)
                | (Value::Int32(_), NativeType::Int32)
                | (Value::Int64(_), NativeType::Int64)
                | (Value::Pointer(_), NativeType::Pointer(_))
                | (Value::Handle(_), NativeType::Array(_) | NativeType::Delegate)
        )
    }

    /// Two's complement addition of two integers of the same width.
    pub fn wrapping_add(self, other: Value) -> Option<Value> {
        match (self, other) {
            (Value::Int8(a), Value::Int8(b)) => Some(Value::Int8(a.wrapping_add(b))),
            (Value::Int16(a), Value::Int16(b)) => Some(Value::Int16(a.wrapping_add(b))),
            (Value::Int32(a), Value::Int32(b)) => Some(Value::Int32(a.wrapping_add(b))),
            (Value::Int64(a), Value::Int64(b)) => Some(Value::Int64(a.wrapping_add(b))),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Void => "void",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Pointer(_) => "pointer",
            Value::Handle(_) => "handle",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Void => write!(f, "void"),
            Value::Int8(value) => write!(f, "{}", value),
            Value::Int16(value) => write!(f, "{}", value),
            Value::Int32(value) => write!(f, "{}", value),
            Value::Int64(value) => write!(f, "{}", value),
            Value::Pointer(address) => write!(f, "0x{:x}", address),
            Value::Handle(handle) => write!(f, "handle#{}", handle),
        }
    }
}
