//! Runtime value model for the Lak evaluator.
//!
//! `Object` is a closed sum type covering every value the evaluator can
//! produce — integers, strings, booleans, arrays, hashes, functions,
//! builtins, `null`, and the `Error` sentinel used for exception-free
//! failure propagation. There are no panics here: a failed operation
//! returns an `Object::Error` like any other value, and callers decide
//! whether to keep going.
//!
//! Values are shared by [`Rc`], not `Arc` — the evaluator is strictly
//! single-threaded, so atomic reference counting would only add cost.

use crate::ast::{Block, Identifier};
use crate::environment::Environment;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub type BuiltinFn = fn(&[Rc<Object>]) -> Rc<Object>;

#[derive(Debug, Clone)]
pub struct FunctionObj {
    pub params: Vec<Identifier>,
    pub body: Block,
    pub env: Rc<RefCell<Environment>>,
}

/// The subset of `Object` variants that can appear as a hash key.
///
/// Only scalar, by-value-comparable kinds are hashable; arrays, hashes,
/// functions, and builtins are not (see `Object::hash_key`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    Str(String),
}

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Str(String),
    Null,
    ReturnValue(Rc<Object>),
    Error(String),
    Function(Rc<FunctionObj>),
    Builtin(BuiltinFn),
    Array(Vec<Rc<Object>>),
    Hash(Vec<(HashKey, Rc<Object>, Rc<Object>)>),
}

impl Object {
    /// The uppercase type tag used throughout error messages
    /// (`unknown operator: -BOOLEAN`, `not a function: INTEGER`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Str(_) => "STRING",
            Object::Null => "NULL",
            Object::ReturnValue(_) => "RETURN",
            Object::Error(_) => "ERROR",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Truthiness used by `if` and `!`: `Null` and `false` are falsy,
    /// everything else — including `0` and `""` — is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    /// `None` for any non-hashable variant (caller turns that into
    /// `unusable as hash key: <TYPE>`).
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(n) => Some(HashKey::Integer(*n)),
            Object::Boolean(b) => Some(HashKey::Boolean(*b)),
            Object::Str(s) => Some(HashKey::Str(s.clone())),
            _ => None,
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(n) => n.to_string(),
            Object::Boolean(b) => b.to_string(),
            Object::Str(s) => format!("\"{}\"", s),
            Object::Null => "null".to_string(),
            Object::ReturnValue(value) => value.inspect(),
            Object::Error(message) => format!("error: {}", message),
            Object::Function(func) => {
                let params = func
                    .params
                    .iter()
                    .map(|p| p.name.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("fn({}) {}", params, func.body)
            }
            Object::Builtin(_) => "builtin function".to_string(),
            Object::Array(elements) => {
                let body = elements
                    .iter()
                    .map(|e| e.inspect())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{}]", body)
            }
            Object::Hash(pairs) => {
                let body = pairs
                    .iter()
                    .map(|(_, k, v)| format!("{}:{}", k.inspect(), v.inspect()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", body)
            }
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

/// A lookup helper for a hash's `(key, value)` pairs, keyed by
/// [`HashKey`] the way the evaluator's `IndexExpression` handling needs.
pub fn hash_lookup<'a>(pairs: &'a [(HashKey, Rc<Object>, Rc<Object>)], key: &HashKey) -> Option<&'a Rc<Object>> {
    pairs.iter().rev().find(|(k, _, _)| k == key).map(|(_, _, v)| v)
}

/// Builds the map form of a hash's pairs, later duplicates overwriting
/// earlier ones — used when constructing a `HashLiteral` value.
pub fn dedup_hash_pairs(pairs: Vec<(HashKey, Rc<Object>, Rc<Object>)>) -> Vec<(HashKey, Rc<Object>, Rc<Object>)> {
    let mut ordered: Vec<(HashKey, Rc<Object>, Rc<Object>)> = Vec::new();
    let mut index: HashMap<HashKey, usize> = HashMap::new();
    for (key, display_key, value) in pairs {
        if let Some(&pos) = index.get(&key) {
            ordered[pos] = (key, display_key, value);
        } else {
            index.insert(key.clone(), ordered.len());
            ordered.push((key, display_key, value));
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_matches_spec() {
        assert!(!Object::Null.is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
        assert!(Object::Boolean(true).is_truthy());
        assert!(Object::Integer(0).is_truthy());
        assert!(Object::Str(String::new()).is_truthy());
    }

    #[test]
    fn inspect_forms() {
        assert_eq!(Object::Integer(5).inspect(), "5");
        assert_eq!(Object::Boolean(true).inspect(), "true");
        assert_eq!(Object::Str("hi".to_string()).inspect(), "\"hi\"");
        assert_eq!(Object::Null.inspect(), "null");
        assert_eq!(Object::Error("identifier not found: x".to_string()).inspect(), "error: identifier not found: x");
    }

    #[test]
    fn only_scalars_are_hashable() {
        assert_eq!(Object::Integer(1).hash_key(), Some(HashKey::Integer(1)));
        assert_eq!(Object::Boolean(true).hash_key(), Some(HashKey::Boolean(true)));
        assert_eq!(Object::Str("a".to_string()).hash_key(), Some(HashKey::Str("a".to_string())));
        assert_eq!(Object::Array(vec![]).hash_key(), None);
    }
}
