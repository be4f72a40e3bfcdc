/*!
# Rust Language Module

This Rust module provides lexical analysis of the RM Basic language:
tokens, the keyword table, identifier rules, error codes and
source lines split into statement segments.

*/

#[macro_use]
mod error;
mod ident;
mod lex;
mod line;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use ident::Ident;
pub use lex::lex;
pub use line::Line;

/// `None` is a direct (immediate mode) line.
pub type LineNumber = Option<u32>;

/// Highest line number a program may use.
pub const MAX_LINE_NUMBER: u32 = 65279;

#[cfg(test)]
mod tests;
