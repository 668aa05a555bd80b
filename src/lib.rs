//! # Coffee Bean
//!
//! A small, dynamically typed, imperative scripting language. This crate is
//! the front end and tree-walking evaluator: [`lexer::tokenize`] turns
//! source text into tokens, [`parser::parse`] turns tokens into an
//! [`ast::Statement`] program, and [`interpreter::interpret`] executes that
//! program against a lexically scoped [`environment::Environment`].
//!
//! File I/O, argument parsing, and the REPL loop are owned by the
//! `coffee_bean` binary (`src/bin/coffee_bean`), not by this library.

pub mod ast;
pub mod callable;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod value;

pub use error::{CoffeeBeanError, LexerError, ParserError, RuntimeError};
pub use interpreter::interpret;
pub use lexer::tokenize;
pub use parser::parse;
