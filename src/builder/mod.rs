//! Lowering of concrete parse trees into the typed AST.
//!
//! Sequence productions are read by field name through [`reader::ChildReader`],
//! using the same schema the parser builds against.

pub mod builder;
pub mod reader;
