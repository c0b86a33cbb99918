pub mod ast;
pub mod errors;
pub mod lexer;
pub mod parser;

#[cfg(test)]
mod unit_tests;

pub use ast::{Command, HeapAction};
pub use errors::CommandError;
pub use parser::parse;
