//! The IR grammar shared by the parser and the AST builder.
//!
//! - `grammar` - the closed set of productions and the child layout of each
//! - `keywords` - keyword tables for the slots that accept one of many words
//! - `tree` - the concrete parse tree and a validator for it

pub mod grammar;
pub mod keywords;
pub mod tree;
