#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    analyzer::analyzer::analyze,
    ast::declarations::Program,
    builder::builder::build_program,
    compiler::compiler::{generate, ModuleOptions},
    errors::errors::Error,
    grammar::tree::ParseNode,
    lexer::lexer::tokenize,
    parser::parser::parse,
    vm::module::Module,
};

pub mod analyzer;
pub mod ast;
pub mod builder;
pub mod compiler;
pub mod errors;
pub mod grammar;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod vm;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing a byte offset.
///
/// Returns the 1-based line number, the text of the line (including its
/// terminator) and the offset of `position` within that line, or `None` when
/// the offset lies past the end of `source`.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // The end-of-input token sits one past the last character.
    if pos == source.len() {
        let last = source.split_inclusive('\n').last().unwrap_or("");
        let line_number = line_number.saturating_sub(1).max(1);
        return Some((line_number, last.to_string(), last.len()));
    }

    None
}

/// Tokenizes and parses `source` into a concrete parse tree.
pub fn parse_source(source: &str, file: Option<String>) -> Result<ParseNode, Error> {
    let tokens = tokenize(source.to_string(), file.clone())?;
    parse(tokens, Rc::new(file.unwrap_or_else(|| String::from("shell"))))
}

/// Parses `source` and lowers it into a [`Program`].
pub fn build_source(source: &str, file: Option<String>) -> Result<Program, Error> {
    let tree = parse_source(source, file)?;
    build_program(&tree)
}

/// Runs the whole pipeline with default module options.
pub fn compile_source(source: &str, file: Option<String>) -> Result<Module, Error> {
    compile_source_with_options(source, file, &ModuleOptions::default())
}

pub fn compile_source_with_options(
    source: &str,
    file: Option<String>,
    options: &ModuleOptions,
) -> Result<Module, Error> {
    let program = build_source(source, file)?;
    let analysis = analyze(&program)?;
    generate(&program, &analysis, options)
}
