//! The analysis pass: collects the program's function declarations.

pub mod analyzer;

#[cfg(test)]
mod tests;
