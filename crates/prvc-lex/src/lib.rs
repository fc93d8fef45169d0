//! prvc-lex - lexical analyzer for the Prove compiler.
//!
//! Transforms source text into a stream of tokens, tracking the
//! off-side-rule indentation (`INDENT`/`DEDENT`), newline suppression
//! inside brackets and after continuation operators, and the
//! regex-versus-division and path-versus-regex disambiguation rules.

pub mod cursor;
#[cfg(test)]
mod edge_cases;
pub mod indent;
pub mod lexer;
pub mod token;
pub mod unicode;

pub use lexer::Lexer;
pub use token::{IdentClass, Token, TokenKind};
