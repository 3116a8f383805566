//! Method bodies and the module that holds them.
//!
//! A [`ModuleBuilder`] collects finished [`MethodBody`]s and is sealed into
//! an immutable [`Module`] by [`ModuleBuilder::finalize`].

use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};

use super::instructions::{Instruction, NativeSignature, NativeType};

/// A finished, invokable method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodBody {
    name: String,
    signature: NativeSignature,
    locals: Vec<NativeType>,
    /// Label name to the offset of the instruction following it.
    labels: IndexMap<String, usize>,
    instructions: Vec<Instruction>,
}

impl MethodBody {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &NativeSignature {
        &self.signature
    }

    pub fn return_type(&self) -> &NativeType {
        &self.signature.return_type
    }

    pub fn parameters(&self) -> &[NativeType] {
        &self.signature.parameters
    }

    pub fn locals(&self) -> &[NativeType] {
        &self.locals
    }

    pub fn labels(&self) -> &IndexMap<String, usize> {
        &self.labels
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

impl Display for MethodBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            ".method {} {}({})",
            self.signature.return_type,
            self.name,
            self.signature.parameter_list()
        )?;
        writeln!(f, "{{")?;

        if !self.locals.is_empty() {
            let locals: Vec<String> = self
                .locals
                .iter()
                .enumerate()
                .map(|(slot, ty)| format!("[{}] {}", slot, ty))
                .collect();
            writeln!(f, "  .locals ({})", locals.join(", "))?;
        }

        for (offset, instruction) in self.instructions.iter().enumerate() {
            for (label, _) in self.labels.iter().filter(|(_, at)| **at == offset) {
                writeln!(f, "{}:", label)?;
            }
            writeln!(f, "  IL_{:04}: {}", offset, instruction)?;
        }
        for (label, _) in self
            .labels
            .iter()
            .filter(|(_, at)| **at == self.instructions.len())
        {
            writeln!(f, "{}:", label)?;
        }

        write!(f, "}}")
    }
}

/// An open method accumulating locals, labels and instructions.
#[derive(Debug)]
pub struct MethodBuilder {
    body: MethodBody,
}

impl MethodBuilder {
    pub fn name(&self) -> &str {
        &self.body.name
    }

    pub fn signature(&self) -> &NativeSignature {
        &self.body.signature
    }

    /// Adds a local slot of type `ty` and returns its index, or `None` when
    /// the slot space is exhausted.
    pub fn declare_local(&mut self, ty: NativeType) -> Option<u16> {
        let slot = u16::try_from(self.body.locals.len()).ok()?;
        self.body.locals.push(ty);
        Some(slot)
    }

    pub fn local_type(&self, slot: u16) -> Option<&NativeType> {
        self.body.locals.get(slot as usize)
    }

    /// Records `name` at the current offset. Returns false if the label
    /// already exists.
    pub fn mark_label(&mut self, name: &str) -> bool {
        if self.body.labels.contains_key(name) {
            return false;
        }
        self.body
            .labels
            .insert(name.to_string(), self.body.instructions.len());
        true
    }

    pub fn emit(&mut self, instruction: Instruction) {
        tracing::trace!(method = %self.body.name, "{}", instruction);
        self.body.instructions.push(instruction);
    }

    pub fn offset(&self) -> usize {
        self.body.instructions.len()
    }

    pub fn finish(self) -> MethodBody {
        self.body
    }
}

/// The module under construction: one type container holding every method.
#[derive(Debug)]
pub struct ModuleBuilder {
    module_name: String,
    type_name: String,
    /// Every name handed out by `define_method`, finished or not.
    defined: IndexSet<String>,
    methods: IndexMap<String, MethodBody>,
}

impl ModuleBuilder {
    pub fn new(module_name: &str, type_name: &str) -> Self {
        ModuleBuilder {
            module_name: module_name.to_string(),
            type_name: type_name.to_string(),
            defined: IndexSet::new(),
            methods: IndexMap::new(),
        }
    }

    /// Opens a method named `name`.
    ///
    /// # Returns
    ///
    /// `None` if a method of that name was already defined.
    pub fn define_method(&mut self, name: &str, signature: NativeSignature) -> Option<MethodBuilder> {
        if !self.defined.insert(name.to_string()) {
            return None;
        }

        Some(MethodBuilder {
            body: MethodBody {
                name: name.to_string(),
                signature,
                locals: vec![],
                labels: IndexMap::new(),
                instructions: vec![],
            },
        })
    }

    pub fn add_method(&mut self, body: MethodBody) {
        self.methods.insert(body.name.clone(), body);
    }

    /// Seals the module. No methods can be added afterwards.
    pub fn finalize(self) -> Module {
        Module {
            module_name: self.module_name,
            type_name: self.type_name,
            methods: self.methods,
        }
    }
}

/// A sealed module, ready to be invoked by a [`super::machine::Machine`].
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    module_name: String,
    type_name: String,
    methods: IndexMap<String, MethodBody>,
}

impl Module {
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get_method(&self, name: &str) -> Option<&MethodBody> {
        self.methods.get(name)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodBody> {
        self.methods.values()
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, ".module {}", self.module_name)?;
        writeln!(f, ".class {}", self.type_name)?;
        for method in self.methods.values() {
            writeln!(f)?;
            writeln!(f, "{}", method)?;
        }
        Ok(())
    }
}
