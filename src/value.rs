//! Runtime values and the two coercions the evaluator leans on
//! (`truthy`, `to_number`).

use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::Rc;

use crate::callable::Callable;
use crate::error::RuntimeError;

/// The dynamically typed runtime value union. Arrays share their
/// backing storage by reference: assigning an array aliases it, and
/// mutating an element through one alias is visible through every other.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Rc<RefCell<Vec<Value>>>),
    Callable(Rc<dyn Callable>),
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Callable(_) => "callable",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Callable(a), Value::Callable(b)) => Rc::ptr_eq(a, b),
            // Equality across unlike variants never raises; it is false.
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_value(self))
    }
}

/// Formats a value for `echo`. Recurses into arrays.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let items = items.borrow();
            let rendered: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Callable(c) => c.describe(),
    }
}

/// A round-trippable default float rendering: integral floats print with a
/// trailing `.0` so `10 / 4` reads as `2.5` and `4 / 2` reads as `2.0`,
/// never silently looking like an `Int`.
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Whether a value counts as true in a boolean context.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Callable(_) => true,
    }
}

/// Numeric representation used for arithmetic, keeping int/int arithmetic
/// integral for `+ - *` while division always promotes to float.
#[derive(Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

/// `Int`/`Float` pass through, anything else raises "Expected type int or float".
pub fn to_number(value: &Value, line: usize) -> Result<Number, RuntimeError> {
    match value {
        Value::Int(i) => Ok(Number::Int(*i)),
        Value::Float(f) => Ok(Number::Float(*f)),
        _ => Err(RuntimeError::new(line, "Expected type int or float")),
    }
}
