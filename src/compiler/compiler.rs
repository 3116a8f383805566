//! Main compiler module.
//!
//! This module drives code generation from a built [`Program`] into a sealed
//! [`Module`]. [`GenerateContext`] owns the module under construction and
//! hands out one [`FunctionContext`] per function definition.

use indexmap::{IndexMap, IndexSet};

use crate::{
    analyzer::analyzer::{analyze, AnalyzeContext},
    ast::declarations::{Declaration, FunctionDefinition, Program},
    errors::errors::{Error, ErrorImpl},
    vm::{
        instructions::{Instruction, NativeSignature, NativeType},
        module::{MethodBody, MethodBuilder, Module, ModuleBuilder},
    },
    Position,
};

use super::{stmt::gen_statement, types::resolve_signature};

/// Names given to the generated module and its single type container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOptions {
    pub module_name: String,
    pub type_name: String,
}

impl Default for ModuleOptions {
    fn default() -> Self {
        ModuleOptions {
            module_name: String::from("llvm_module"),
            type_name: String::from("Program"),
        }
    }
}

fn duplicate(symbol: &str) -> Error {
    Error::new(
        ErrorImpl::DuplicateSymbol {
            symbol: symbol.to_string(),
        },
        Position::null(),
    )
}

/// Module level generation state.
pub struct GenerateContext<'a> {
    /// The function table from the analysis pass
    analysis: &'a AnalyzeContext,
    /// Bare names of every function defined in the program
    defined_functions: IndexSet<String>,
    /// The module being built
    module: ModuleBuilder,
}

impl<'a> GenerateContext<'a> {
    pub fn new(program: &Program, analysis: &'a AnalyzeContext, options: &ModuleOptions) -> Self {
        GenerateContext {
            analysis,
            defined_functions: program
                .function_definitions()
                .map(|function| function.symbol_name().to_string())
                .collect(),
            module: ModuleBuilder::new(&options.module_name, &options.type_name),
        }
    }

    pub fn analysis(&self) -> &AnalyzeContext {
        self.analysis
    }

    pub fn is_defined_function(&self, name: &str) -> bool {
        self.defined_functions.contains(name)
    }

    /// Opens a method for `definition` with its arguments bound to slots in
    /// declaration order.
    ///
    /// # Arguments
    ///
    /// * `definition` - The function being generated
    ///
    /// # Returns
    ///
    /// A fresh [`FunctionContext`], or `DuplicateSymbol` if the method or one
    /// of its parameter names already exists.
    pub fn begin_function(&mut self, definition: &FunctionDefinition) -> Result<FunctionContext, Error> {
        let name = definition.symbol_name();
        let signature = resolve_signature(&definition.return_type, &definition.parameter_types())?;

        tracing::debug!(function = name, %signature, "begin function");

        let method = self
            .module
            .define_method(name, signature)
            .ok_or_else(|| duplicate(name))?;

        let mut arguments = IndexMap::new();
        for (index, parameter) in definition.parameters.iter().enumerate() {
            let slot = u16::try_from(index).map_err(|_| too_many("arguments"))?;
            if arguments.insert(parameter.name.clone(), slot).is_some() {
                return Err(duplicate(&parameter.name));
            }
        }

        Ok(FunctionContext {
            method,
            locals: IndexMap::new(),
            arguments,
        })
    }

    pub fn end_function(&mut self, body: MethodBody) {
        tracing::debug!(
            function = body.name(),
            instructions = body.instructions().len(),
            "end function"
        );
        self.module.add_method(body);
    }

    /// Seals the module.
    pub fn finish(self) -> Module {
        self.module.finalize()
    }
}

fn too_many(what: &str) -> Error {
    Error::new(
        ErrorImpl::UnsupportedConstruct {
            construct: format!("more than {} {}", u16::MAX as u32 + 1, what),
        },
        Position::null(),
    )
}

/// Per-method generation state.
///
/// `%name` bindings live in two tables: locals created by statements and the
/// method's arguments. A name may be bound in only one of them.
pub struct FunctionContext {
    method: MethodBuilder,
    locals: IndexMap<String, u16>,
    arguments: IndexMap<String, u16>,
}

impl FunctionContext {
    pub fn name(&self) -> &str {
        self.method.name()
    }

    pub fn signature(&self) -> &NativeSignature {
        self.method.signature()
    }

    pub fn return_type(&self) -> &NativeType {
        &self.method.signature().return_type
    }

    /// Binds `name` to a new local of type `ty`.
    pub fn declare_local(&mut self, name: &str, ty: NativeType) -> Result<u16, Error> {
        if self.locals.contains_key(name) || self.arguments.contains_key(name) {
            return Err(duplicate(name));
        }

        let slot = self
            .method
            .declare_local(ty)
            .ok_or_else(|| too_many("locals"))?;
        self.locals.insert(name.to_string(), slot);
        Ok(slot)
    }

    /// The load instruction for `%name` and the type it pushes.
    ///
    /// Locals shadow arguments. `None` if the name is unbound.
    pub fn lookup(&self, name: &str) -> Option<(Instruction, NativeType)> {
        if let Some(slot) = self.locals.get(name) {
            let ty = self.method.local_type(*slot)?.clone();
            return Some((Instruction::LoadLocal(*slot), ty));
        }

        let slot = self.arguments.get(name)?;
        let ty = self.signature().parameters.get(*slot as usize)?.clone();
        Some((Instruction::LoadArgument(*slot), ty))
    }

    /// Records a label at the current offset; fails on a repeated label.
    pub fn mark_label(&mut self, name: &str) -> Result<(), Error> {
        if self.method.mark_label(name) {
            Ok(())
        } else {
            Err(duplicate(name))
        }
    }

    pub fn emit(&mut self, instruction: Instruction) {
        self.method.emit(instruction);
    }

    /// Closes the method. The context cannot be used afterwards.
    pub fn close(self) -> MethodBody {
        self.method.finish()
    }
}

/// Generates a module from an analysed program.
///
/// Every function definition becomes a method of the module's single type,
/// named without its `@` sigil.
pub fn generate(
    program: &Program,
    analysis: &AnalyzeContext,
    options: &ModuleOptions,
) -> Result<Module, Error> {
    let mut context = GenerateContext::new(program, analysis, options);

    for declaration in &program.declarations {
        match declaration {
            Declaration::FunctionDefinition(definition) => {
                let mut function = context.begin_function(definition)?;
                for statement in &definition.body {
                    gen_statement(&context, &mut function, statement)?;
                }
                context.end_function(function.close());
            }
            Declaration::Global(global) => {
                tracing::warn!(global = %global.name, "globals are not emitted");
            }
            Declaration::Target(target) => {
                tracing::debug!(kind = target.kind.as_str(), value = %target.value, "target directive");
            }
            Declaration::FunctionDeclaration(_) => {}
        }
    }

    Ok(context.finish())
}

/// Runs analysis then generation.
pub fn compile(program: &Program, options: &ModuleOptions) -> Result<Module, Error> {
    let analysis = analyze(program)?;
    generate(program, &analysis, options)
}
