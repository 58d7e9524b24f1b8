//! Builtin functions: `len`, `first`, `last`, `rest`, `push`, `puts`.
//!
//! Grounded in `original_source`'s `builtin.cc`, which registers its one
//! builtin (`len`) in a `BUILTINS` lookup table keyed by name; this crate
//! extends that table to the full set the distilled spec names in §4.4.
//! Every builtin takes a slice of already-evaluated arguments and returns
//! an `Object` — arity and type mismatches are reported as `Object::Error`
//! like any other runtime failure, never a panic.

use crate::object::{BuiltinFn, Object};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::OnceLock;

fn registry() -> &'static HashMap<&'static str, BuiltinFn> {
    static REGISTRY: OnceLock<HashMap<&'static str, BuiltinFn>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map: HashMap<&'static str, BuiltinFn> = HashMap::new();
        map.insert("len", len);
        map.insert("first", first);
        map.insert("last", last);
        map.insert("rest", rest);
        map.insert("push", push);
        map.insert("puts", puts);
        map
    })
}

/// Looks up a builtin by name, for the evaluator's identifier fallback.
pub fn lookup(name: &str) -> Option<BuiltinFn> {
    registry().get(name).copied()
}

fn error(message: impl Into<String>) -> Rc<Object> {
    Rc::new(Object::Error(message.into()))
}

fn arity_error(expected: usize, got: usize) -> Rc<Object> {
    error(format!(
        "wrong number of arguments. expected {}, got {}",
        expected, got
    ))
}

fn len(args: &[Rc<Object>]) -> Rc<Object> {
    if args.len() != 1 {
        return arity_error(1, args.len());
    }
    match args[0].as_ref() {
        Object::Str(s) => Rc::new(Object::Integer(s.len() as i64)),
        Object::Array(elems) => Rc::new(Object::Integer(elems.len() as i64)),
        other => error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn first(args: &[Rc<Object>]) -> Rc<Object> {
    if args.len() != 1 {
        return arity_error(1, args.len());
    }
    match args[0].as_ref() {
        Object::Array(elems) => elems.first().cloned().unwrap_or_else(|| Rc::new(Object::Null)),
        other => error(format!(
            "argument to `first` not supported, got {}",
            other.type_name()
        )),
    }
}

fn last(args: &[Rc<Object>]) -> Rc<Object> {
    if args.len() != 1 {
        return arity_error(1, args.len());
    }
    match args[0].as_ref() {
        Object::Array(elems) => elems.last().cloned().unwrap_or_else(|| Rc::new(Object::Null)),
        other => error(format!(
            "argument to `last` not supported, got {}",
            other.type_name()
        )),
    }
}

fn rest(args: &[Rc<Object>]) -> Rc<Object> {
    if args.len() != 1 {
        return arity_error(1, args.len());
    }
    match args[0].as_ref() {
        Object::Array(elems) => {
            if elems.is_empty() {
                Rc::new(Object::Null)
            } else {
                Rc::new(Object::Array(elems[1..].to_vec()))
            }
        }
        other => error(format!(
            "argument to `rest` not supported, got {}",
            other.type_name()
        )),
    }
}

fn push(args: &[Rc<Object>]) -> Rc<Object> {
    if args.len() != 2 {
        return arity_error(2, args.len());
    }
    match args[0].as_ref() {
        Object::Array(elems) => {
            let mut new_elems = elems.clone();
            new_elems.push(Rc::clone(&args[1]));
            Rc::new(Object::Array(new_elems))
        }
        other => error(format!(
            "argument to `push` not supported, got {}",
            other.type_name()
        )),
    }
}

fn puts(args: &[Rc<Object>]) -> Rc<Object> {
    for arg in args {
        println!("{}", arg.inspect());
    }
    Rc::new(Object::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_on_string_counts_bytes() {
        let result = len(&[Rc::new(Object::Str("hello".to_string()))]);
        assert!(matches!(result.as_ref(), Object::Integer(5)));
    }

    #[test]
    fn len_on_array_counts_elements() {
        let arr = Object::Array(vec![Rc::new(Object::Integer(1)), Rc::new(Object::Integer(2))]);
        let result = len(&[Rc::new(arr)]);
        assert!(matches!(result.as_ref(), Object::Integer(2)));
    }

    #[test]
    fn len_rejects_unsupported_types() {
        let result = len(&[Rc::new(Object::Integer(5))]);
        match result.as_ref() {
            Object::Error(msg) => assert_eq!(msg, "argument to `len` not supported, got INTEGER"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn first_and_last_on_empty_array_are_null() {
        let empty = Rc::new(Object::Array(vec![]));
        assert!(matches!(first(&[Rc::clone(&empty)]).as_ref(), Object::Null));
        assert!(matches!(last(&[empty]).as_ref(), Object::Null));
    }

    #[test]
    fn rest_drops_the_first_element() {
        let arr = Object::Array(vec![
            Rc::new(Object::Integer(1)),
            Rc::new(Object::Integer(2)),
            Rc::new(Object::Integer(3)),
        ]);
        let result = rest(&[Rc::new(arr)]);
        match result.as_ref() {
            Object::Array(elems) => assert_eq!(elems.len(), 2),
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn push_appends_without_mutating_the_original() {
        let original = Rc::new(Object::Array(vec![Rc::new(Object::Integer(1))]));
        let result = push(&[Rc::clone(&original), Rc::new(Object::Integer(2))]);
        match (original.as_ref(), result.as_ref()) {
            (Object::Array(orig_elems), Object::Array(new_elems)) => {
                assert_eq!(orig_elems.len(), 1);
                assert_eq!(new_elems.len(), 2);
            }
            _ => panic!("expected arrays"),
        }
    }

    #[test]
    fn lookup_finds_registered_names_only() {
        assert!(lookup("len").is_some());
        assert!(lookup("nonexistent").is_none());
    }
}
