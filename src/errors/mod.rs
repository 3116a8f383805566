//! Error types and error handling for the compiler.
//!
//! Every stage reports failures through [`errors::Error`], which pairs an
//! [`errors::ErrorImpl`] with the source position it was raised at. The
//! variants group into the six kinds of [`errors::ErrorKind`]; syntax errors
//! carry the full list of [`errors::Diagnostic`]s collected by the parser.

pub mod errors;
