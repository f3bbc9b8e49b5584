//! JSON mapping for values, via serde.
//!
//! `null`/bool/number/string/array/object map one to one; objects keep key
//! insertion order. Integral numbers within ±1e15 are written without a
//! fraction and non-finite numbers become `null`. Functions and builtins
//! have no JSON form and are written as placeholder strings.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::errors::{EvalError, EvalResult};
use crate::value::{ObjectRef, Table, Value};

const MAX_EXACT_INTEGER: f64 = 1e15;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if !n.is_finite() {
                    serializer.serialize_unit()
                } else if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let table = obj.borrow();
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (key, value) in table.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Function(def) => serializer.serialize_str(&format!("<fn {}>", def.name)),
            Value::Builtin(_) => serializer.serialize_str("<builtin>"),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Number(n as f64))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        Ok(Value::Number(n as f64))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
        Ok(Value::Number(n))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut table = Table::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            table.insert(key, value);
        }
        Ok(Value::Object(ObjectRef::new(table)))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Compact JSON text for a value.
pub fn to_json(value: &Value) -> Result<String, EvalError> {
    if value.is_cyclic() {
        return Err(EvalError::new("cannot encode JSON: object contains itself"));
    }
    serde_json::to_string(value).map_err(|e| EvalError::new(format!("cannot encode JSON: {e}")))
}

/// Parse JSON text into a value.
pub fn from_json(text: &str) -> EvalResult {
    serde_json::from_str(text).map_err(|e| EvalError::new(format!("invalid JSON: {e}")))
}

/// `jsonParse(s)`; a non-string argument yields null.
pub(crate) fn json_parse(args: &[Value]) -> EvalResult {
    match args.first() {
        Some(Value::String(text)) => from_json(text),
        _ => Ok(Value::Null),
    }
}

/// `jsonStringify(v)`
pub(crate) fn json_stringify(args: &[Value]) -> EvalResult {
    match args.first() {
        Some(value) => Ok(Value::String(to_json(value)?)),
        None => Ok(Value::string("null")),
    }
}
