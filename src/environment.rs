//! Lexical environment for the evaluator.
//!
//! An `Environment` is a flat `name -> Object` map plus an optional link
//! to an *outer* environment, forming a chain. `get` walks outward until
//! it finds a binding or runs out of frames; `set` always writes to the
//! current frame, so a `let` inside a function body can never leak into
//! the caller's frame. A [`Function`](crate::object::FunctionObj) closes
//! over the `Rc<RefCell<Environment>>` active at its definition site,
//! which is what makes nested `fn` closures see their defining scope.

use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Environment {
    store: HashMap<String, Rc<Object>>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: None,
        }))
    }

    /// Creates a child environment whose `outer` is `outer` — used once
    /// per function call, per `apply_function`.
    pub fn enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    /// Walks the chain outward; `None` if no frame binds `name`.
    pub fn get(&self, name: &str) -> Option<Rc<Object>> {
        match self.store.get(name) {
            Some(val) => Some(Rc::clone(val)),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Binds `name` in the current frame, shadowing any outer binding.
    pub fn set(&mut self, name: String, value: Rc<Object>) {
        self.store.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let env = Environment::new();
        env.borrow_mut().set("x".to_string(), Rc::new(Object::Integer(5)));
        assert!(matches!(env.borrow().get("x").as_deref(), Some(Object::Integer(5))));
    }

    #[test]
    fn get_walks_outward_through_enclosing_frames() {
        let outer = Environment::new();
        outer.borrow_mut().set("x".to_string(), Rc::new(Object::Integer(1)));
        let inner = Environment::enclosed(Rc::clone(&outer));
        assert!(matches!(inner.borrow().get("x").as_deref(), Some(Object::Integer(1))));
    }

    #[test]
    fn set_writes_only_to_the_current_frame() {
        let outer = Environment::new();
        outer.borrow_mut().set("x".to_string(), Rc::new(Object::Integer(1)));
        let inner = Environment::enclosed(Rc::clone(&outer));
        inner.borrow_mut().set("x".to_string(), Rc::new(Object::Integer(2)));

        assert!(matches!(inner.borrow().get("x").as_deref(), Some(Object::Integer(2))));
        assert!(matches!(outer.borrow().get("x").as_deref(), Some(Object::Integer(1))));
    }

    #[test]
    fn missing_name_is_none() {
        let env = Environment::new();
        assert!(env.borrow().get("missing").is_none());
    }
}
