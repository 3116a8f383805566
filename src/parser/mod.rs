//! Parser producing the concrete parse tree of an IR program.
//!
//! This module transforms a stream of tokens into a [`ParseNode`] tree whose
//! shape follows [`crate::grammar`]. It handles:
//!
//! - Top level declarations (`target`, `declare`, `define`, globals)
//! - Statements inside function bodies (binary ops, calls, returns, labels)
//! - Constant expressions and values
//! - Types, using NUD (prefix) and LED (postfix) lookup tables
//! - Error recovery: every failing declaration or statement is reported
//!
//! [`ParseNode`]: crate::grammar::tree::ParseNode

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
