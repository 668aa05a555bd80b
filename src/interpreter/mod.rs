//! The tree-walking evaluator: `interpret(statements, env?)`.
//!
//! A visitor over the AST: methods on an `Interpreter` that carries the
//! active [`Environment`] and a pluggable output sink, so `echo` never
//! writes to stdout directly from library code.

use std::cmp::Ordering;
use std::io::Write;
use std::rc::Rc;

use crate::ast::{Expression, Statement};
use crate::callable::{Clock, UserFunction};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::lexer::{Token, TokenKind};
use crate::value::{self, Number, Value};

/// Non-local control transfer. An ordinary `RuntimeError` and a
/// `return` unwind share one error arm so `?` propagates both uniformly;
/// only a user function's invocation (`UserFunction::invoke`) ever catches
/// `Flow::Return` and turns it back into a plain value. A `Flow::Return`
/// that escapes every enclosing call is handled by `Interpreter::interpret`
/// itself, since top-level code has no call frame to return from.
#[derive(Debug)]
pub enum Flow {
    Error(RuntimeError),
    Return(Value),
}

impl From<RuntimeError> for Flow {
    fn from(error: RuntimeError) -> Self {
        Flow::Error(error)
    }
}

/// A fresh global scope pre-populated with built-ins.
pub fn global_environment() -> Environment {
    let env = Environment::new();
    env.define("clock", Value::Callable(Rc::new(Clock)));
    env
}

/// A visitor over the AST, holding the interpreter's active environment and
/// output sink.
pub struct Interpreter {
    globals: Environment,
    env: Environment,
    output: Box<dyn Write>,
}

impl Interpreter {
    /// A fresh interpreter with its own pre-populated global scope.
    pub fn new(output: Box<dyn Write>) -> Self {
        let globals = global_environment();
        Self {
            env: globals.clone(),
            globals,
            output,
        }
    }

    /// An interpreter sharing an already-existing global scope. The REPL
    /// uses this to keep one persistent environment across independently
    /// tokenized/parsed lines.
    pub fn with_environment(globals: Environment, output: Box<dyn Write>) -> Self {
        Self {
            env: globals.clone(),
            globals,
            output,
        }
    }

    /// The global scope, for callers (the REPL) that want to reuse it.
    pub fn globals(&self) -> Environment {
        self.globals.clone()
    }

    /// Executes a whole program in order. A `return` escaping the outermost
    /// statement list is a runtime error (there is no call frame to return
    /// from; see DESIGN.md).
    pub fn interpret(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
        for statement in statements {
            if let Err(flow) = self.execute(statement) {
                return Err(match flow {
                    Flow::Error(error) => error,
                    Flow::Return(_) => {
                        RuntimeError::new(statement_line(statement), "Cannot return from top-level code")
                    }
                });
            }
        }
        Ok(())
    }

    // ---- statements ------------------------------------------------------

    fn execute(&mut self, statement: &Statement) -> Result<(), Flow> {
        match statement {
            Statement::ExprStmt(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Statement::Echo(expr) => {
                let value = self.evaluate(expr)?;
                let _ = writeln!(self.output, "{}", value::format_value(&value));
                Ok(())
            }
            Statement::Block(statements) => {
                let child = Environment::new_enclosed(&self.env);
                self.execute_block(statements, child)
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if value::truthy(&self.evaluate(condition)?) {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Statement::While { condition, body } => {
                while value::truthy(&self.evaluate(condition)?) {
                    // Each iteration gets its own block scope, observable
                    // only through closures created inside the loop body.
                    let child = Environment::new_enclosed(&self.env);
                    self.execute_block(std::slice::from_ref(body.as_ref()), child)?;
                }
                Ok(())
            }
            Statement::Function { name, params, body } => {
                let function = UserFunction::new(name.clone(), params.clone(), body.clone(), self.env.clone());
                self.env.define(&name.lexeme, Value::Callable(Rc::new(function)));
                Ok(())
            }
            Statement::Return { value, .. } => {
                let value = self.evaluate(value)?;
                Err(Flow::Return(value))
            }
        }
    }

    /// Runs `statements` inside `child`, restoring the previous environment
    /// on exit — including on error or `return`. Shared by `Block`
    /// execution and by [`UserFunction::invoke`](crate::callable::UserFunction).
    pub(crate) fn execute_block(&mut self, statements: &[Statement], child: Environment) -> Result<(), Flow> {
        let previous = std::mem::replace(&mut self.env, child);
        let mut result = Ok(());
        for statement in statements {
            if let Err(flow) = self.execute(statement) {
                result = Err(flow);
                break;
            }
        }
        self.env = previous;
        result
    }

    // ---- expressions -----------------------------------------------------

    fn evaluate(&mut self, expr: &Expression) -> Result<Value, Flow> {
        match expr {
            Expression::Literal(token) => self.evaluate_literal(token),
            Expression::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.evaluate(item)?);
                }
                Ok(Value::array(values))
            }
            Expression::Unary { op, right } => self.evaluate_unary(op, right),
            Expression::Binary { left, op, right } => self.evaluate_binary(left, op, right),
            Expression::Logical { left, op, right } => self.evaluate_logical(left, op, right),
            Expression::Grouping(inner) => self.evaluate(inner),
            Expression::Assignment { name, value } => {
                let value = self.evaluate(value)?;
                self.env.define(&name.lexeme, value.clone());
                Ok(value)
            }
            Expression::IndexAssignment { target, index, value } => {
                self.evaluate_index_assignment(target, index, value)
            }
            Expression::Index { target, index } => self.evaluate_index(target, index),
            Expression::Call {
                callee,
                closing_paren,
                args,
            } => self.evaluate_call(callee, closing_paren, args),
        }
    }

    fn evaluate_literal(&self, token: &Token) -> Result<Value, Flow> {
        match token.kind {
            TokenKind::Null => Ok(Value::Null),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Integer => token.lexeme.parse().map(Value::Int).map_err(|_| {
                Flow::Error(RuntimeError::new(
                    token.line,
                    format!("Integer literal '{}' out of range", token.lexeme),
                ))
            }),
            TokenKind::Float => Ok(Value::Float(
                token
                    .lexeme
                    .parse()
                    .expect("lexer only produces numeric lexemes for Float tokens"),
            )),
            TokenKind::String | TokenKind::Character => {
                Ok(Value::String(token.lexeme[1..token.lexeme.len() - 1].to_string()))
            }
            TokenKind::Identifier => self.env.get(&token.lexeme, token.line).map_err(Flow::Error),
            _ => unreachable!("parser only produces Literal nodes for these token kinds"),
        }
    }

    fn evaluate_unary(&mut self, op: &Token, right: &Expression) -> Result<Value, Flow> {
        let right_value = self.evaluate(right)?;
        match op.kind {
            TokenKind::Plus => Ok(match value::to_number(&right_value, op.line)? {
                Number::Int(i) => Value::Int(i),
                Number::Float(f) => Value::Float(f),
            }),
            TokenKind::Minus => Ok(match value::to_number(&right_value, op.line)? {
                Number::Int(i) => Value::Int(-i),
                Number::Float(f) => Value::Float(-f),
            }),
            TokenKind::Bang | TokenKind::Not => Ok(Value::Bool(!value::truthy(&right_value))),
            _ => unreachable!("parser only emits unary ops for +, -, !, not"),
        }
    }

    fn evaluate_binary(&mut self, left: &Expression, op: &Token, right: &Expression) -> Result<Value, Flow> {
        let left_value = self.evaluate(left)?;
        let right_value = self.evaluate(right)?;

        match op.kind {
            TokenKind::Plus | TokenKind::Minus | TokenKind::Star => {
                let l = value::to_number(&left_value, op.line)?;
                let r = value::to_number(&right_value, op.line)?;
                Ok(arithmetic(l, r, op.kind))
            }
            TokenKind::Slash => {
                let l = value::to_number(&left_value, op.line)?.as_f64();
                let r = value::to_number(&right_value, op.line)?.as_f64();
                Ok(Value::Float(l / r))
            }
            TokenKind::EqEq => Ok(Value::Bool(left_value == right_value)),
            TokenKind::BangEq => Ok(Value::Bool(left_value != right_value)),
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => {
                let ordering = compare(&left_value, &right_value, op.line)?;
                Ok(Value::Bool(match op.kind {
                    TokenKind::Lt => ordering == Ordering::Less,
                    TokenKind::LtEq => ordering != Ordering::Greater,
                    TokenKind::Gt => ordering == Ordering::Greater,
                    TokenKind::GtEq => ordering != Ordering::Less,
                    _ => unreachable!(),
                }))
            }
            _ => unreachable!("parser only emits binary ops for arithmetic/equality/comparison"),
        }
    }

    fn evaluate_logical(&mut self, left: &Expression, op: &Token, right: &Expression) -> Result<Value, Flow> {
        let left_value = self.evaluate(left)?;
        match op.kind {
            TokenKind::Or => {
                if value::truthy(&left_value) {
                    Ok(left_value)
                } else {
                    self.evaluate(right)
                }
            }
            TokenKind::And => {
                if !value::truthy(&left_value) {
                    Ok(left_value)
                } else {
                    self.evaluate(right)
                }
            }
            _ => unreachable!("parser only emits logical ops for and/or"),
        }
    }

    fn evaluate_index(&mut self, target: &Expression, index: &Expression) -> Result<Value, Flow> {
        let target_value = self.evaluate(target)?;
        let array = match &target_value {
            Value::Array(items) => items.clone(),
            _ => return Err(runtime_error(target.line(), "Can only index arrays")),
        };
        let index_value = self.evaluate(index)?;
        let idx = index_in_bounds(&index_value, array.borrow().len(), index.line())?;
        Ok(array.borrow()[idx].clone())
    }

    fn evaluate_index_assignment(
        &mut self,
        target: &Expression,
        index: &Expression,
        value: &Expression,
    ) -> Result<Value, Flow> {
        let target_value = self.evaluate(target)?;
        let array = match &target_value {
            Value::Array(items) => items.clone(),
            _ => return Err(runtime_error(target.line(), "Can only index arrays")),
        };
        let index_value = self.evaluate(index)?;
        let idx = index_in_bounds(&index_value, array.borrow().len(), index.line())?;
        let new_value = self.evaluate(value)?;
        array.borrow_mut()[idx] = new_value.clone();
        Ok(new_value)
    }

    fn evaluate_call(
        &mut self,
        callee: &Expression,
        closing_paren: &Token,
        args: &[Expression],
    ) -> Result<Value, Flow> {
        let callee_value = self.evaluate(callee)?;
        let callable = match &callee_value {
            Value::Callable(c) => c.clone(),
            _ => return Err(runtime_error(closing_paren.line, "Can only call functions")),
        };

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.evaluate(arg)?);
        }

        if arg_values.len() != callable.arity() {
            return Err(runtime_error(
                closing_paren.line,
                format!("Expected {} arguments but got {}", callable.arity(), arg_values.len()),
            ));
        }

        callable.invoke(self, arg_values)
    }
}

fn runtime_error(line: usize, message: impl Into<String>) -> Flow {
    Flow::Error(RuntimeError::new(line, message))
}

fn statement_line(statement: &Statement) -> usize {
    match statement {
        Statement::ExprStmt(expr) | Statement::Echo(expr) => expr.line(),
        Statement::Block(statements) => statements.first().map(statement_line).unwrap_or(0),
        Statement::If { condition, .. } => condition.line(),
        Statement::While { condition, .. } => condition.line(),
        Statement::Function { name, .. } => name.line,
        Statement::Return { keyword, .. } => keyword.line,
    }
}

/// Arithmetic for `+ - *`: integer/integer stays integral, any float
/// operand promotes the result to float.
fn arithmetic(left: Number, right: Number, op: TokenKind) -> Value {
    match (left, right) {
        (Number::Int(a), Number::Int(b)) => Value::Int(match op {
            TokenKind::Plus => a + b,
            TokenKind::Minus => a - b,
            TokenKind::Star => a * b,
            _ => unreachable!(),
        }),
        _ => {
            let a = left.as_f64();
            let b = right.as_f64();
            Value::Float(match op {
                TokenKind::Plus => a + b,
                TokenKind::Minus => a - b,
                TokenKind::Star => a * b,
                _ => unreachable!(),
            })
        }
    }
}

/// Ordering for `< <= > >=`: strings compare lexicographically, everything
/// else is coerced through `to_number`.
fn compare(left: &Value, right: &Value, line: usize) -> Result<Ordering, Flow> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        _ => {
            let l = value::to_number(left, line)?.as_f64();
            let r = value::to_number(right, line)?.as_f64();
            l.partial_cmp(&r)
                .ok_or_else(|| runtime_error(line, "Cannot compare values"))
        }
    }
}

fn index_in_bounds(value: &Value, len: usize, line: usize) -> Result<usize, Flow> {
    let i = match value {
        Value::Int(i) => *i,
        _ => return Err(runtime_error(line, "Array index must be an integer")),
    };
    if i < 0 || (i as usize) >= len {
        return Err(runtime_error(line, "Index out of bounds"));
    }
    Ok(i as usize)
}

/// Pure-ish entry point: tokenized/parsed statements in, interpreted
/// against an environment, out. Writes `echo` output to `output`; `env`
/// carries an existing global scope
/// forward (the REPL reuses one across independently parsed lines) or, when
/// `None`, a fresh pre-populated global scope is created. Returns that
/// global scope alongside the result so the caller can keep it for the next
/// call.
pub fn interpret(
    statements: &[Statement],
    env: Option<Environment>,
    output: Box<dyn Write>,
) -> (Environment, Result<(), RuntimeError>) {
    let mut interpreter = match env {
        Some(env) => Interpreter::with_environment(env, output),
        None => Interpreter::new(output),
    };
    let result = interpreter.interpret(statements);
    (interpreter.globals(), result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn run(source: &str) -> String {
        let tokens = tokenize(source).unwrap();
        let statements = parse(tokens).unwrap();
        let buffer = SharedBuffer::default();
        let (_, result) = interpret(&statements, None, Box::new(buffer.clone()));
        result.unwrap();
        String::from_utf8(buffer.0.borrow().clone()).unwrap()
    }

    fn run_err(source: &str) -> RuntimeError {
        let tokens = tokenize(source).unwrap();
        let statements = parse(tokens).unwrap();
        let buffer = SharedBuffer::default();
        let (_, result) = interpret(&statements, None, Box::new(buffer));
        result.unwrap_err()
    }

    #[test]
    fn arithmetic_precedence_and_division() {
        let out = run("echo 1 + 2 * 3\necho (1 + 2) * 3\necho 10 / 4");
        assert_eq!(out, "7\n9\n2.5\n");
    }

    #[test]
    fn variables_and_block_scope() {
        let out = run("x = 1\ndo\n  x = x + 1\nend\necho x");
        assert_eq!(out, "2\n");
    }

    #[test]
    fn while_loop_accumulates() {
        let out = run(
            "i = 0\ns = 0\nwhile i < 5 do\n  s = s + i\n  i = i + 1\nend\necho s",
        );
        assert_eq!(out, "10\n");
    }

    #[test]
    fn nested_function_closure() {
        let out = run(
            "func make_adder(n) do\n  func add(x) do\n    return x + n\n  end\n  return add\nend\nadd5 = make_adder(5)\necho add5(3)\necho add5(10)",
        );
        assert_eq!(out, "8\n15\n");
    }

    #[test]
    fn array_literal_and_index() {
        let out = run("a = {1, 2, 3}\necho a[0] + a[2]");
        assert_eq!(out, "4\n");
    }

    #[test]
    fn undefined_variable_error() {
        let err = run_err("echo y");
        assert_eq!(err.line, 1);
        assert_eq!(err.message, "Undefined variable 'y'.");
    }

    #[test]
    fn block_scope_does_not_leak_new_bindings() {
        let err = run_err("do\n  x = 1\nend\necho x");
        assert!(err.message.contains("Undefined variable 'x'"));
    }

    #[test]
    fn block_scope_updates_existing_outer_binding() {
        let out = run("x = 1\ndo\n  x = 2\nend\necho x");
        assert_eq!(out, "2\n");
    }

    #[test]
    fn short_circuit_or_skips_right_side() {
        // `boom()` would raise if ever called; `true or boom()` must not call it.
        let out = run(
            "func boom() do\n  return y\nend\necho true or boom()",
        );
        assert_eq!(out, "true\n");
    }

    #[test]
    fn short_circuit_and_skips_right_side() {
        let out = run(
            "func boom() do\n  return y\nend\necho false and boom()",
        );
        assert_eq!(out, "false\n");
    }

    #[test]
    fn closures_capture_defining_environment() {
        let out = run(
            "func make_counter() do\n  n = 0\n  func inc() do\n    n = n + 1\n    return n\n  end\n  return inc\nend\nc = make_counter()\necho c()\necho c()\necho c()",
        );
        assert_eq!(out, "1\n2\n3\n");
    }

    #[test]
    fn index_assignment_mutates_shared_storage() {
        let out = run("a = {1, 2, 3}\na[1] = 9\necho a[1]");
        assert_eq!(out, "9\n");
    }

    #[test]
    fn array_assignment_aliases() {
        let out = run("a = {1, 2}\nb = a\nb[0] = 9\necho a[0]");
        assert_eq!(out, "9\n");
    }

    #[test]
    fn undefined_function_reference_errors() {
        let err = run_err("func f() do\n  return g()\nend\nf()");
        assert!(err.message.contains("Undefined variable 'g'"));
    }

    #[test]
    fn top_level_return_is_a_runtime_error() {
        let err = run_err("return 1");
        assert!(err.message.contains("Cannot return from top-level code"));
    }

    #[test]
    fn calling_a_non_callable_errors() {
        let err = run_err("x = 1\nx()");
        assert!(err.message.contains("Can only call functions"));
    }

    #[test]
    fn arity_mismatch_errors() {
        let err = run_err("func f(a, b) do\n  return a + b\nend\nf(1)");
        assert!(err.message.contains("Expected 2 arguments but got 1"));
    }

    #[test]
    fn out_of_bounds_index_errors() {
        let err = run_err("a = {1}\necho a[5]");
        assert!(err.message.contains("Index out of bounds"));
    }
}
