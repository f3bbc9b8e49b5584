//! File natives. Failures are reported as `null` / `false`, never errors.

use std::fs::{self, OpenOptions};
use std::io::Write;

use super::str_arg;
use crate::errors::EvalResult;
use crate::value::Value;

/// File contents, or null when the file cannot be read.
pub(super) fn read_file(args: &[Value]) -> EvalResult {
    let Some(path) = str_arg(args, 0) else {
        return Ok(Value::Null);
    };
    match fs::read(path) {
        Ok(bytes) => Ok(Value::String(String::from_utf8_lossy(&bytes).into_owned())),
        Err(err) => {
            tracing::debug!(path, %err, "readFile failed");
            Ok(Value::Null)
        }
    }
}

pub(super) fn write_file(args: &[Value]) -> EvalResult {
    let (Some(path), Some(contents)) = (str_arg(args, 0), str_arg(args, 1)) else {
        return Ok(Value::Bool(false));
    };
    Ok(Value::Bool(fs::write(path, contents).is_ok()))
}

pub(super) fn append_file(args: &[Value]) -> EvalResult {
    let (Some(path), Some(contents)) = (str_arg(args, 0), str_arg(args, 1)) else {
        return Ok(Value::Bool(false));
    };
    let written = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(contents.as_bytes()));
    Ok(Value::Bool(written.is_ok()))
}
