//! Index and property reads, and writes through place expressions.
//!
//! Arrays are values: writing `a[i]` or pushing onto `o.list` updates the
//! array stored at that place. Variables are updated in place; any other
//! place is read, modified and written back up the chain. Objects are
//! shared, so writing into one updates every alias directly.

use jung_ir::{Expr, ExprKind};

use super::Interpreter;
use crate::errors::{type_mismatch, undefined_variable, EvalError, EvalResult};
use crate::value::Value;

/// Resolve a possibly negative index against `len`; `None` when out of range.
fn normalize_index(index: f64, len: usize) -> Option<usize> {
    let len = len as i64;
    let mut i = index as i64;
    if i < 0 {
        i += len;
    }
    (0..len).contains(&i).then_some(i as usize)
}

/// `container[index]`; anything unreadable is null.
pub(crate) fn index_value(container: &Value, index: &Value) -> Value {
    match (container, index) {
        (Value::Array(items), Value::Number(i)) => normalize_index(*i, items.len())
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or(Value::Null),
        (Value::String(s), Value::Number(i)) => normalize_index(*i, s.chars().count())
            .and_then(|i| s.chars().nth(i))
            .map_or(Value::Null, |c| Value::String(c.to_string())),
        (Value::Object(obj), Value::String(key)) => {
            obj.borrow().get(key).cloned().unwrap_or(Value::Null)
        }
        _ => Value::Null,
    }
}

/// `value.name`. `length` is synthesized for strings and arrays, and for
/// objects without a stored `length` key.
pub(crate) fn property(value: &Value, name: &str) -> Value {
    match value {
        Value::Object(obj) => {
            let table = obj.borrow();
            match table.get(name) {
                Some(field) => field.clone(),
                None if name == "length" => Value::Number(table.len() as f64),
                None => Value::Null,
            }
        }
        Value::String(s) if name == "length" => Value::Number(s.chars().count() as f64),
        Value::Array(items) if name == "length" => Value::Number(items.len() as f64),
        _ => Value::Null,
    }
}

/// Store `value` at `container[key]`. Out-of-range array writes are no-ops.
fn store_index(container: &mut Value, key: &Value, value: Value) -> Result<(), EvalError> {
    match (container, key) {
        (Value::Object(obj), Value::String(key)) => {
            obj.borrow_mut().insert(key.as_str(), value);
            Ok(())
        }
        (Value::Object(_), other) => Err(type_mismatch("string key", other.type_name())),
        (Value::Array(items), Value::Number(i)) => {
            if let Some(slot) = normalize_index(*i, items.len()).and_then(|i| items.get_mut(i)) {
                *slot = value;
            }
            Ok(())
        }
        (Value::Array(_), other) => Err(type_mismatch("number index", other.type_name())),
        (other, _) => Err(type_mismatch("array or object", other.type_name())),
    }
}

/// One step from a container to the value inside it.
#[derive(Debug)]
pub(crate) enum PathKey {
    /// `[key]`, already evaluated.
    Index(Value),
    /// `.name`
    Field(String),
}

#[derive(Debug)]
enum PlaceRoot {
    Var(String),
    /// A value computed once, such as a call result or `this`.
    Temp(Value),
}

/// A place expression with every sub-expression already evaluated, so it
/// can be read and then written without running side effects twice.
#[derive(Debug)]
pub(crate) struct Place {
    root: PlaceRoot,
    keys: Vec<PathKey>,
}

fn read_key(container: &Value, key: &PathKey) -> Value {
    match key {
        PathKey::Index(index) => index_value(container, index),
        PathKey::Field(name) => property(container, name),
    }
}

fn read_path(value: &Value, keys: &[PathKey]) -> Value {
    let Some((key, rest)) = keys.split_first() else {
        return value.clone();
    };
    if rest.is_empty() {
        return read_key(value, key);
    }
    match (value, key) {
        (Value::Array(items), PathKey::Index(Value::Number(i))) => {
            match normalize_index(*i, items.len()) {
                Some(i) => read_path(&items[i], rest),
                None => read_path(&Value::Null, rest),
            }
        }
        _ => read_path(&read_key(value, key), rest),
    }
}

fn store_key(container: &mut Value, key: &PathKey, value: Value) -> Result<(), EvalError> {
    match key {
        PathKey::Index(index) => store_index(container, index, value),
        PathKey::Field(name) => match container {
            Value::Object(obj) => {
                obj.borrow_mut().insert(name.as_str(), value);
                Ok(())
            }
            other => Err(type_mismatch("object", other.type_name())),
        },
    }
}

/// Write `value` at the end of `keys`, starting from `slot`.
///
/// Arrays along the way are updated in place; an array held by an object
/// field is copied out, updated and stored back.
fn write_path(slot: &mut Value, keys: &[PathKey], value: Value) -> Result<(), EvalError> {
    let Some((key, rest)) = keys.split_first() else {
        *slot = value;
        return Ok(());
    };
    if rest.is_empty() {
        return store_key(slot, key, value);
    }
    match (slot, key) {
        (Value::Array(items), PathKey::Index(Value::Number(i))) => {
            match normalize_index(*i, items.len()) {
                Some(i) => write_path(&mut items[i], rest, value),
                None => write_path(&mut Value::Null, rest, value),
            }
        }
        (Value::Object(obj), PathKey::Field(name) | PathKey::Index(Value::String(name))) => {
            let obj = obj.clone();
            let mut child = obj.borrow().get(name).cloned().unwrap_or_default();
            write_path(&mut child, rest, value)?;
            if matches!(child, Value::Array(_)) {
                obj.borrow_mut().insert(name.as_str(), child);
            }
            Ok(())
        }
        (slot, key) => write_path(&mut read_key(slot, key), rest, value),
    }
}

impl Interpreter {
    pub(super) fn eval_index(&mut self, object: &Expr, index: &Expr) -> EvalResult {
        if let ExprKind::Ident(name) = &object.kind {
            let index = self.eval(index)?;
            if let Some(value) = self.env.with_value(name, |v| index_value(v, &index)) {
                return Ok(value);
            }
            let container = self.eval(object)?;
            return Ok(index_value(&container, &index));
        }
        let container = self.eval(object)?;
        let index = self.eval(index)?;
        Ok(index_value(&container, &index))
    }

    pub(super) fn eval_property(&mut self, object: &Expr, name: &str) -> EvalResult {
        if let ExprKind::Ident(var) = &object.kind {
            if let Some(value) = self.env.with_value(var, |v| property(v, name)) {
                return Ok(value);
            }
        }
        let value = self.eval(object)?;
        Ok(property(&value, name))
    }

    /// Evaluate the keys and base of a place expression, left to right.
    /// Anything that is not a place becomes a temporary root.
    pub(crate) fn resolve_place(&mut self, expr: &Expr) -> Result<Place, EvalError> {
        match &expr.kind {
            ExprKind::Ident(name) => Ok(Place {
                root: PlaceRoot::Var(name.clone()),
                keys: Vec::new(),
            }),
            ExprKind::Index { object, index } => {
                let mut place = self.resolve_place(object)?;
                place.keys.push(PathKey::Index(self.eval(index)?));
                Ok(place)
            }
            ExprKind::Property { object, name } => {
                let mut place = self.resolve_place(object)?;
                place.keys.push(PathKey::Field(name.clone()));
                Ok(place)
            }
            _ => Ok(Place {
                root: PlaceRoot::Temp(self.eval(expr)?),
                keys: Vec::new(),
            }),
        }
    }

    pub(crate) fn read_place(&self, place: &Place) -> EvalResult {
        match &place.root {
            PlaceRoot::Var(name) if place.keys.is_empty() => self.lookup_name(name),
            PlaceRoot::Var(name) => match self.env.with_value(name, |v| read_path(v, &place.keys)) {
                Some(value) => Ok(value),
                None => Ok(read_path(&self.lookup_name(name)?, &place.keys)),
            },
            PlaceRoot::Temp(value) => Ok(read_path(value, &place.keys)),
        }
    }

    pub(crate) fn write_place(&mut self, place: Place, value: Value) -> Result<(), EvalError> {
        let Place { root, keys } = place;
        match root {
            PlaceRoot::Var(name) if keys.is_empty() => {
                self.env.assign(&name, value);
                Ok(())
            }
            PlaceRoot::Var(name) if self.env.contains(&name) => self
                .env
                .with_value_mut(&name, |slot| write_path(slot, &keys, value))
                .unwrap_or_else(|| Err(undefined_variable(&name))),
            PlaceRoot::Var(name) => write_path(&mut self.lookup_name(&name)?, &keys, value),
            PlaceRoot::Temp(_) if keys.is_empty() => {
                Err(EvalError::new("invalid assignment target"))
            }
            PlaceRoot::Temp(mut temp) => write_path(&mut temp, &keys, value),
        }
    }

    /// Write `value` to the place `target` names.
    pub(crate) fn assign_to(&mut self, target: &Expr, value: Value) -> Result<(), EvalError> {
        let place = self.resolve_place(target)?;
        self.write_place(place, value)
    }
}
