//! Mapping from IR types to native machine types.
//!
//! Declared signatures are resolved here only when a call site needs them,
//! so an unused declaration with an unsupported type is never rejected.

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    vm::instructions::{NativeSignature, NativeType},
    Position,
};

fn unsupported(ty: &Type) -> Error {
    Error::new(
        ErrorImpl::UnsupportedType {
            type_: ty.to_string(),
        },
        Position::null(),
    )
}

/// Resolves a single IR type.
///
/// `i8`, `i16`, `i32` and `i64` map to the native integers of the same width,
/// pointers and arrays to pointers and arrays of the resolved element, and
/// function types to [`NativeType::Delegate`]. Anything else is an
/// `UnsupportedType` error.
pub fn resolve_type(ty: &Type) -> Result<NativeType, Error> {
    match ty {
        Type::Void => Ok(NativeType::Void),
        Type::Integer(8) => Ok(NativeType::Int8),
        Type::Integer(16) => Ok(NativeType::Int16),
        Type::Integer(32) => Ok(NativeType::Int32),
        Type::Integer(64) => Ok(NativeType::Int64),
        Type::Pointer(pointee) => Ok(NativeType::Pointer(Box::new(resolve_type(pointee)?))),
        Type::Array { element, .. } => Ok(NativeType::Array(Box::new(resolve_type(element)?))),
        Type::Function { .. } => Ok(NativeType::Delegate),
        Type::Integer(_)
        | Type::Float(_)
        | Type::Vector { .. }
        | Type::Struct(_)
        | Type::Ellipsis => Err(unsupported(ty)),
    }
}

/// Resolves a parameter list, allowing a single trailing `...`.
///
/// # Returns
///
/// The resolved fixed parameters and whether the list was variadic.
pub fn resolve_parameter_types(types: &[Type]) -> Result<(Vec<NativeType>, bool), Error> {
    let (fixed, variadic) = match types.split_last() {
        Some((last, fixed)) if last.is_ellipsis() => (fixed, true),
        _ => (types, false),
    };

    let parameters = fixed.iter().map(resolve_type).collect::<Result<Vec<_>, _>>()?;
    Ok((parameters, variadic))
}

pub fn resolve_signature(return_type: &Type, parameters: &[Type]) -> Result<NativeSignature, Error> {
    let return_type = resolve_type(return_type)?;
    let (parameters, variadic) = resolve_parameter_types(parameters)?;

    Ok(NativeSignature {
        return_type,
        parameters,
        variadic,
    })
}
