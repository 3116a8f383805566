//! IR types as written in the source.
//!
//! Every type the grammar accepts has a variant here, including the ones
//! that have no native representation (floats, vectors, structs, `...`).
//! Resolution to native types happens in `compiler::types`.

use std::fmt::Display;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FloatKind {
    Half,
    Float,
    Double,
    X86Fp80,
    Fp128,
    PpcFp128,
}

impl FloatKind {
    pub fn from_keyword(keyword: &str) -> Option<FloatKind> {
        match keyword {
            "half" => Some(FloatKind::Half),
            "float" => Some(FloatKind::Float),
            "double" => Some(FloatKind::Double),
            "x86_fp80" => Some(FloatKind::X86Fp80),
            "fp128" => Some(FloatKind::Fp128),
            "ppc_fp128" => Some(FloatKind::PpcFp128),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FloatKind::Half => "half",
            FloatKind::Float => "float",
            FloatKind::Double => "double",
            FloatKind::X86Fp80 => "x86_fp80",
            FloatKind::Fp128 => "fp128",
            FloatKind::PpcFp128 => "ppc_fp128",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    Void,
    /// Integer of the given bit width.
    Integer(u32),
    Float(FloatKind),
    Pointer(Box<Type>),
    Vector { count: String, element: Box<Type> },
    /// The element count is kept as written.
    Array { count: String, element: Box<Type> },
    Struct(Vec<Type>),
    Function {
        return_type: Box<Type>,
        parameters: Vec<Type>,
    },
    /// Trailing `...` of a variadic parameter list.
    Ellipsis,
}

impl Type {
    pub fn pointer_to(pointee: Type) -> Type {
        Type::Pointer(Box::new(pointee))
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, Type::Ellipsis)
    }

    /// The type of the value produced by calling something of this type.
    ///
    /// Calls may name the callee's full type, `i32 (i8*, ...)*`, instead of
    /// only its return type.
    pub fn call_result_type(&self) -> &Type {
        match self {
            Type::Function { return_type, .. } => return_type,
            Type::Pointer(pointee) => match pointee.as_ref() {
                Type::Function { return_type, .. } => return_type,
                _ => self,
            },
            _ => self,
        }
    }
}

fn join(types: &[Type]) -> String {
    types
        .iter()
        .map(|ty| ty.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Integer(width) => write!(f, "i{}", width),
            Type::Float(kind) => write!(f, "{}", kind.as_str()),
            Type::Pointer(pointee) => write!(f, "{}*", pointee),
            Type::Vector { count, element } => write!(f, "<{} x {}>", count, element),
            Type::Array { count, element } => write!(f, "[{} x {}]", count, element),
            Type::Struct(members) if members.is_empty() => write!(f, "{{}}"),
            Type::Struct(members) => write!(f, "{{ {} }}", join(members)),
            Type::Function {
                return_type,
                parameters,
            } => write!(f, "{} ({})", return_type, join(parameters)),
            Type::Ellipsis => write!(f, "..."),
        }
    }
}
