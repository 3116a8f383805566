/// AST (Abstract Syntax Tree) module
/// Contains the typed model the builder lowers parse trees into
///
/// Submodules:
/// - ast: The `AstNode` umbrella, modifier sets and name helpers
/// - declarations: Top level declarations and the `Program`
/// - expressions: Values, binary operations and calls
/// - statements: Function body statements
/// - types: IR type representations
///
/// Every node prints as canonical IR text through `Display` and serializes
/// through serde.
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
