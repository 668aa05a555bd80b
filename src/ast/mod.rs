//! The abstract syntax tree Coffee Bean programs are parsed into: a closed
//! set of `Expression` and `Statement` variants.

mod expression;
mod statement;

pub use expression::Expression;
pub use statement::Statement;
