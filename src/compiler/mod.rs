//! Code generation from the AST into a VM module.
//!
//! - types: IR type to native type resolution
//! - compiler: generation contexts and the `generate` entry point
//! - expr: operands, binary operations and calls
//! - stmt: statements

pub mod compiler;
pub mod expr;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
