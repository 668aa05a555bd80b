//! The lexical environment: a chain of nested scopes mapping identifier
//! lexemes to values.
//!
//! A parent-linked chain of shared, mutable frames, so a closure can
//! retain the scope active at its declaration site independent of the
//! call stack's current depth.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::value::Value;

struct Scope {
    parent: Option<Environment>,
    bindings: HashMap<String, Value>,
}

/// A handle to a scope frame. Cloning an `Environment` clones the handle,
/// not the frame — both handles observe the same bindings.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Scope>>);

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("bindings", &self.0.borrow().bindings.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Environment {
    /// Creates a fresh scope with no parent (the global scope).
    pub fn new() -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            parent: None,
            bindings: HashMap::new(),
        })))
    }

    /// Creates a child scope enclosed by `self`.
    pub fn new_enclosed(parent: &Environment) -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            parent: Some(parent.clone()),
            bindings: HashMap::new(),
        })))
    }

    /// `assignment` and variable creation share one operation: if some
    /// enclosing scope already binds `name`, update it there; otherwise
    /// create the binding in the current scope.
    pub fn define(&self, name: &str, value: Value) {
        if self.assign_existing(name, value.clone()) {
            return;
        }
        self.0.borrow_mut().bindings.insert(name.to_owned(), value);
    }

    fn assign_existing(&self, name: &str, value: Value) -> bool {
        let mut scope = self.0.borrow_mut();
        if scope.bindings.contains_key(name) {
            scope.bindings.insert(name.to_owned(), value);
            return true;
        }
        match &scope.parent {
            Some(parent) => parent.assign_existing(name, value),
            None => false,
        }
    }

    /// Walks the parent chain; first hit wins, miss raises
    /// "Undefined variable 'X'."
    pub fn get(&self, name: &str, line: usize) -> Result<Value, RuntimeError> {
        let scope = self.0.borrow();
        if let Some(value) = scope.bindings.get(name) {
            return Ok(value.clone());
        }
        match &scope.parent {
            Some(parent) => parent.get(name, line),
            None => Err(RuntimeError::new(line, format!("Undefined variable '{name}'."))),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
