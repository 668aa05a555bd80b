//! Error types shared by the lexer, parser and interpreter.
//!
//! Every stage of the pipeline fails with a struct pairing a message with
//! the source line it happened on; all three render identically (see
//! `Display`) so the CLI can treat them uniformly.

use std::error::Error;
use std::fmt::{self, Display};

macro_rules! line_error {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub line: usize,
            pub message: String,
        }

        impl $name {
            pub fn new(line: usize, message: impl Into<String>) -> Self {
                Self {
                    line,
                    message: message.into(),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "Line {}\nError: {}", self.line, self.message)
            }
        }

        impl Error for $name {}
    };
}

line_error!(LexerError);
line_error!(ParserError);
line_error!(RuntimeError);

/// Unifies the three pipeline errors for callers (the CLI) that just want to
/// print whatever went wrong and stop.
#[derive(Debug, Clone)]
pub enum CoffeeBeanError {
    Lexer(LexerError),
    Parser(ParserError),
    Runtime(RuntimeError),
}

impl Display for CoffeeBeanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoffeeBeanError::Lexer(e) => Display::fmt(e, f),
            CoffeeBeanError::Parser(e) => Display::fmt(e, f),
            CoffeeBeanError::Runtime(e) => Display::fmt(e, f),
        }
    }
}

impl Error for CoffeeBeanError {}

impl From<LexerError> for CoffeeBeanError {
    fn from(value: LexerError) -> Self {
        CoffeeBeanError::Lexer(value)
    }
}

impl From<ParserError> for CoffeeBeanError {
    fn from(value: ParserError) -> Self {
        CoffeeBeanError::Parser(value)
    }
}

impl From<RuntimeError> for CoffeeBeanError {
    fn from(value: RuntimeError) -> Self {
        CoffeeBeanError::Runtime(value)
    }
}
