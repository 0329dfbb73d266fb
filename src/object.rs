//! Runtime values.
//!
//! `Return` and `Error` never reach user code as ordinary values: they are
//! signals that every evaluation site hands straight back to its caller.

use crate::ast::{BlockStatement, Identifier};
use crate::evaluator::Environment;
use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::Rc;

pub type BuiltinFn = fn(Vec<Object>) -> Object;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Str(Rc<str>),
    #[default]
    Null,
    Array(Rc<Vec<Object>>),
    Hash(Rc<FxHashMap<HashKey, HashPair>>),
    Function(Rc<Function>),
    Builtin(Builtin),
    Return(Box<Object>),
    Error(String),
}

/// Builds an `Object::Error` from a format string.
#[macro_export]
macro_rules! runtime_error {
    ($($arg:tt)*) => {
        $crate::object::Object::Error(format!($($arg)*))
    };
}

impl Object {
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Str(_) => "STRING",
            Object::Null => "NULL",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Return(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
        }
    }

    /// Only `false` and `null` are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    /// True for the two variants that must short-circuit evaluation.
    #[must_use]
    pub fn is_signal(&self) -> bool {
        matches!(self, Object::Return(_) | Object::Error(_))
    }

    #[must_use]
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey::Integer(*value)),
            Object::Boolean(value) => Some(HashKey::Boolean(*value)),
            Object::Str(value) => Some(HashKey::Str(value.clone())),
            _ => None,
        }
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Object::Str(value.into())
    }
}

impl From<Vec<Object>> for Object {
    fn from(elements: Vec<Object>) -> Self {
        Object::Array(Rc::new(elements))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    Str(Rc<str>),
}

/// A hash entry keeps the original key object for display.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

#[derive(Debug)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
    pub env: Environment,
}

// Functions compare by identity; comparing captured scopes could recurse forever.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(v) => write!(f, "{v}"),
            Object::Boolean(v) => write!(f, "{v}"),
            Object::Str(v) => write!(f, "{v}"),
            Object::Null => write!(f, "null"),
            Object::Array(elements) => {
                write!(f, "[")?;
                let mut first = true;
                for el in elements.iter() {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{el}")?;
                    first = false;
                }
                write!(f, "]")
            }
            Object::Hash(pairs) => {
                write!(f, "{{")?;
                let mut first = true;
                for pair in pairs.values() {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                    first = false;
                }
                write!(f, "}}")
            }
            Object::Function(func) => {
                write!(f, "fn(")?;
                let mut first = true;
                for param in &func.parameters {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                    first = false;
                }
                write!(f, ") {{\n{}\n}}", func.body)
            }
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::Return(value) => write!(f, "{value}"),
            Object::Error(message) => write!(f, "ERROR: {message}"),
        }
    }
}
