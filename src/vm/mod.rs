//! The stack machine generated code runs on.
//!
//! - instructions: native types, signatures and the instruction set
//! - value: runtime values
//! - module: method bodies, the module builder and sealed modules
//! - runtime: functions provided by the machine
//! - machine: the interpreter

pub mod instructions;
pub mod machine;
pub mod module;
pub mod runtime;
pub mod value;
