//! Lexical analysis for textual IR.
//!
//! Converts source text into a token stream using an ordered table of
//! anchored regex patterns. Handles:
//!
//! - Sigil identifiers (`%local`, `@global`) and bare words
//! - Numbers, strings with `\XX` escapes, punctuation and `...`
//! - `;` comments and whitespace, which are skipped
//!
//! Unrecognised characters do not stop tokenization; every one of them is
//! reported in a single syntax error.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
