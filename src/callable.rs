//! Runtime callables.
//!
//! Two implementors: [`Clock`], the sole built-in, and [`UserFunction`], a
//! user-defined `func` closing over the environment active at its
//! declaration site.

use std::fmt;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::ast::Statement;
use crate::environment::Environment;
use crate::interpreter::{Flow, Interpreter};
use crate::lexer::Token;
use crate::value::Value;

/// A callable runtime value: fixed arity, an invocation, and a description
/// used when a callable is echoed or compared for debugging.
pub trait Callable: fmt::Debug {
    fn arity(&self) -> usize;

    fn invoke(&self, interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, Flow>;

    fn describe(&self) -> String;
}

/// `clock()` — zero arity, returns seconds since the Unix epoch as a
/// `Float`. Used only for benchmarking-style scripts; there is no
/// requirement that successive calls be monotonic.
#[derive(Debug)]
pub struct Clock;

impl Callable for Clock {
    fn arity(&self) -> usize {
        0
    }

    fn invoke(&self, _interpreter: &mut Interpreter, _args: Vec<Value>) -> Result<Value, Flow> {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        Ok(Value::Float(seconds))
    }

    fn describe(&self) -> String {
        "<builtin fn clock>".to_string()
    }
}

/// A user-defined `func`, pairing its declaration with the environment that
/// was active when it was declared.
#[derive(Debug)]
pub struct UserFunction {
    name: String,
    params: Vec<Token>,
    body: Rc<Vec<Statement>>,
    closure: Environment,
}

impl UserFunction {
    pub fn new(name: Token, params: Vec<Token>, body: Vec<Statement>, closure: Environment) -> Self {
        Self {
            name: name.lexeme,
            params,
            body: Rc::new(body),
            closure,
        }
    }
}

impl Callable for UserFunction {
    fn arity(&self) -> usize {
        self.params.len()
    }

    fn invoke(&self, interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, Flow> {
        let call_scope = Environment::new_enclosed(&self.closure);
        for (param, arg) in self.params.iter().zip(args.into_iter()) {
            call_scope.define(&param.lexeme, arg);
        }

        match interpreter.execute_block(&self.body, call_scope) {
            Ok(()) => Ok(Value::Null),
            Err(Flow::Return(value)) => Ok(value),
            Err(Flow::Error(error)) => Err(Flow::Error(error)),
        }
    }

    fn describe(&self) -> String {
        format!("<fn {}>", self.name)
    }
}
