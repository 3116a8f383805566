use std::fmt::Display;

use serde::Serialize;

use crate::lexer::lexer::encode_string;

use super::{
    ast::{bare_name, Modifiers},
    expressions::Expression,
    statements::Statement,
    types::Type,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetKind {
    DataLayout,
    Triple,
}

impl TargetKind {
    pub fn from_keyword(keyword: &str) -> Option<TargetKind> {
        match keyword {
            "datalayout" => Some(TargetKind::DataLayout),
            "triple" => Some(TargetKind::Triple),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::DataLayout => "datalayout",
            TargetKind::Triple => "triple",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetDirective {
    pub kind: TargetKind,
    pub value: String,
}

/// Parameter of a `declare`: a type and its attributes, no name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclaredParameter {
    pub ty: Type,
    pub attributes: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinedParameter {
    pub ty: Type,
    pub attributes: Modifiers,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<DeclaredParameter>,
    pub attributes: Modifiers,
}

impl FunctionDeclaration {
    pub fn parameter_types(&self) -> Vec<Type> {
        self.parameters.iter().map(|p| p.ty.clone()).collect()
    }

    /// The name without its `@` sigil.
    pub fn symbol_name(&self) -> &str {
        bare_name(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<DefinedParameter>,
    pub attributes: Modifiers,
    pub body: Vec<Statement>,
}

impl FunctionDefinition {
    pub fn parameter_types(&self) -> Vec<Type> {
        self.parameters.iter().map(|p| p.ty.clone()).collect()
    }

    pub fn symbol_name(&self) -> &str {
        bare_name(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GlobalStorage {
    Constant,
    Global,
}

impl GlobalStorage {
    pub fn from_keyword(keyword: &str) -> Option<GlobalStorage> {
        match keyword {
            "constant" => Some(GlobalStorage::Constant),
            "global" => Some(GlobalStorage::Global),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalStorage::Constant => "constant",
            GlobalStorage::Global => "global",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalDeclaration {
    pub name: String,
    pub modifiers: Modifiers,
    pub storage: GlobalStorage,
    pub ty: Type,
    /// An integer or string literal.
    pub initializer: Expression,
    pub alignment: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Declaration {
    Target(TargetDirective),
    FunctionDeclaration(FunctionDeclaration),
    FunctionDefinition(FunctionDefinition),
    Global(GlobalDeclaration),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn function_declarations(&self) -> impl Iterator<Item = &FunctionDeclaration> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::FunctionDeclaration(function) => Some(function),
            _ => None,
        })
    }

    pub fn function_definitions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::FunctionDefinition(function) => Some(function),
            _ => None,
        })
    }
}

impl Display for DeclaredParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.ty, self.attributes.suffix())
    }
}

impl Display for DefinedParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{} {}", self.ty, self.attributes.suffix(), self.name)
    }
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

impl Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Declaration::Target(target) => write!(
                f,
                "target {} = \"{}\"",
                target.kind.as_str(),
                encode_string(&target.value)
            ),
            Declaration::FunctionDeclaration(function) => write!(
                f,
                "declare {} {}({}){}",
                function.return_type,
                function.name,
                join(&function.parameters),
                function.attributes.suffix()
            ),
            Declaration::FunctionDefinition(function) => {
                writeln!(
                    f,
                    "define {} {}({}){} {{",
                    function.return_type,
                    function.name,
                    join(&function.parameters),
                    function.attributes.suffix()
                )?;
                for statement in &function.body {
                    match statement {
                        Statement::Label(_) => writeln!(f, "{}", statement)?,
                        _ => writeln!(f, "  {}", statement)?,
                    }
                }
                write!(f, "}}")
            }
            Declaration::Global(global) => {
                write!(
                    f,
                    "{} = {}{} {} {}",
                    global.name,
                    global.modifiers.prefix(),
                    global.storage.as_str(),
                    global.ty,
                    global.initializer
                )?;
                if let Some(alignment) = global.alignment {
                    write!(f, ", align {}", alignment)?;
                }
                Ok(())
            }
        }
    }
}

/// Canonical source text; reparses to an identical program.
impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for declaration in &self.declarations {
            writeln!(f, "{}", declaration)?;
        }
        Ok(())
    }
}
