//! Runtime values.
//!
//! Ownership follows two rules:
//! - `String` and `Array` are value types. Cloning deep-copies them, so no two
//!   holders ever alias.
//! - `Object` is a reference type. Cloning shares one backing [`Table`];
//!   every holder observes mutations, and the table is dropped with its last
//!   holder.
//!
//! Functions and builtins are immutable handles and clone cheaply.
//!
//! `PartialEq` on `Value` is structural and exists for host code and tests.
//! Script-level `==` is [`Value::equals`], which compares composites by identity.

mod format;
mod table;

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use jung_ir::FunctionDef;

use crate::builtins::Builtin;

pub use format::format_number;
pub use table::Table;

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(ObjectRef),
    Function(Rc<FunctionDef>),
    Builtin(Builtin),
}

impl Value {
    /// A fresh, empty Object.
    pub fn object() -> Self {
        Value::Object(ObjectRef::new(Table::new()))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(_) | Value::Function(_) | Value::Builtin(_) => true,
        }
    }

    /// Script-level equality.
    ///
    /// Primitives compare by value. Objects and functions compare by
    /// identity and builtins by name. Arrays are never equal to anything:
    /// every holder owns a distinct copy.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }

    /// Name reported by `type()`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) | Value::Builtin(_) => "function",
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Builtin(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// True if some object reaches itself through its own fields.
    pub fn is_cyclic(&self) -> bool {
        fn walk(value: &Value, open: &mut Vec<ObjectRef>) -> bool {
            match value {
                Value::Array(items) => items.iter().any(|item| walk(item, open)),
                Value::Object(obj) => {
                    if open.iter().any(|o| o.ptr_eq(obj)) {
                        return true;
                    }
                    open.push(obj.clone());
                    let cyclic = obj.borrow().iter().any(|(_, field)| walk(field, open));
                    open.pop();
                    cyclic
                }
                _ => false,
            }
        }
        walk(self, &mut Vec::new())
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            _ => self.equals(other),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Object(_) => write!(f, "Object({self})"),
            Value::Function(def) => write!(f, "Function({})", def.name),
            Value::Builtin(b) => write!(f, "Builtin({})", b.name),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// Shared handle to an Object's backing table.
///
/// Single-threaded: the interpreter never crosses threads.
#[repr(transparent)]
pub struct ObjectRef(Rc<RefCell<Table>>);

impl ObjectRef {
    pub fn new(table: Table) -> Self {
        ObjectRef(Rc::new(RefCell::new(table)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, Table> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Table> {
        self.0.borrow_mut()
    }

    /// True if both handles share one table.
    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles to this table.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl Clone for ObjectRef {
    #[inline]
    fn clone(&self) -> Self {
        ObjectRef(Rc::clone(&self.0))
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&*self.borrow()).finish()
    }
}
