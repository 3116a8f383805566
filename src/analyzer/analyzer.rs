use indexmap::IndexMap;

use crate::{
    ast::declarations::{Declaration, FunctionDeclaration, Program},
    compiler::types::resolve_signature,
    errors::errors::{Error, ErrorImpl},
    vm::instructions::NativeSignature,
    Position,
};

/// A declared function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSymbol {
    pub declaration: FunctionDeclaration,
}

impl FunctionSymbol {
    /// Resolves the declared signature to native types.
    ///
    /// Fails with `UnsupportedType` for declarations using floats, vectors
    /// or structs. Only call sites resolve, so such a declaration is fine as
    /// long as nothing calls it.
    pub fn signature(&self) -> Result<NativeSignature, Error> {
        resolve_signature(
            &self.declaration.return_type,
            &self.declaration.parameter_types(),
        )
    }
}

/// Symbol table built by [`analyze`].
///
/// Functions are keyed by their bare name (`printf` for `@printf`).
#[derive(Debug, Default)]
pub struct AnalyzeContext {
    functions: IndexMap<String, FunctionSymbol>,
}

impl AnalyzeContext {
    pub fn new() -> Self {
        AnalyzeContext::default()
    }

    /// Registers a `declare`d function.
    ///
    /// Fails with `DuplicateSymbol` if the name is taken.
    pub fn add_function(&mut self, declaration: &FunctionDeclaration) -> Result<(), Error> {
        let name = declaration.symbol_name();

        if self.functions.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::DuplicateSymbol {
                    symbol: name.to_string(),
                },
                Position::null(),
            ));
        }

        tracing::debug!(function = name, "declared");

        self.functions.insert(
            name.to_string(),
            FunctionSymbol {
                declaration: declaration.clone(),
            },
        );
        Ok(())
    }

    pub fn get_function(&self, name: &str) -> Option<&FunctionSymbol> {
        self.functions.get(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Builds the function table of `program`.
///
/// Only `declare`d functions are registered; definitions, globals and target
/// directives add nothing.
pub fn analyze(program: &Program) -> Result<AnalyzeContext, Error> {
    let mut context = AnalyzeContext::new();

    for declaration in &program.declarations {
        if let Declaration::FunctionDeclaration(function) = declaration {
            context.add_function(function)?;
        }
    }

    tracing::debug!(functions = context.len(), "analysis finished");
    Ok(context)
}
