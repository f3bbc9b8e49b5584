//! Runtime error types.
//!
//! Every fatal condition the evaluator can hit is an [`EvalError`]. Inside a
//! `try` block the same error is caught and turned into a String value
//! ([`EvalError::catch_value`]); outside one it aborts the run.
//!
//! `EvalErrorKind` carries the structured category; factory functions fill
//! in both `kind` and `message`.

use std::fmt;

use jung_ir::BinaryOp;

use crate::value::Value;

/// Result of evaluating an expression or calling a native.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Arithmetic
    DivisionByZero,
    ModuloByZero,

    // Type/Operator
    TypeMismatch {
        expected: String,
        got: String,
    },
    BinaryTypeMismatch {
        op: BinaryOp,
        left: String,
        right: String,
    },

    // Access
    UndefinedVariable {
        name: String,
    },
    UndefinedFunction {
        name: String,
    },
    UndefinedClass {
        name: String,
    },
    UndefinedMethod {
        method: String,
        type_name: String,
    },

    // Resources
    StackOverflow {
        depth: usize,
    },
    ScopeOverflow {
        limit: usize,
    },

    // Calls
    NotCallable {
        type_name: String,
    },

    /// A `throw` that reached the top level.
    UncaughtException {
        message: String,
    },

    /// `exit(code)`: unwinds the whole run and is never caught.
    Exit {
        code: i32,
    },

    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),

            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::BinaryTypeMismatch { op, left, right } => write!(
                f,
                "unsupported operand types for '{}': {left} and {right}",
                op.as_symbol()
            ),

            Self::UndefinedVariable { name } => write!(f, "undefined variable '{name}'"),
            Self::UndefinedFunction { name } => write!(f, "undefined function '{name}'"),
            Self::UndefinedClass { name } => write!(f, "undefined class '{name}'"),
            Self::UndefinedMethod { method, type_name } => {
                write!(f, "no method '{method}' on type {type_name}")
            }

            Self::StackOverflow { depth } => {
                write!(f, "stack overflow (max {depth} call depth)")
            }
            Self::ScopeOverflow { limit } => write!(f, "scope overflow (max {limit} scopes)"),

            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),

            Self::UncaughtException { message } => write!(f, "uncaught exception: {message}"),
            Self::Exit { code } => write!(f, "exit({code})"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Source line of the statement or expression that failed.
    pub line: Option<u32>,
    /// The value of an uncaught `throw`.
    pub thrown: Option<Value>,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            line: None,
            thrown: None,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            line: None,
            thrown: None,
        }
    }

    /// A thrown value escaping every `try`.
    pub fn thrown(value: Value) -> Self {
        let mut err = Self::from_kind(EvalErrorKind::UncaughtException {
            message: value.to_string(),
        });
        err.thrown = Some(value);
        err
    }

    /// Attach a source line unless an inner frame already did.
    #[must_use]
    pub fn with_line_if_absent(mut self, line: u32) -> Self {
        if self.line.is_none() && line > 0 {
            self.line = Some(line);
        }
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// True for `exit()` requests, which `try` must not intercept.
    #[inline]
    pub fn is_exit(&self) -> bool {
        matches!(self.kind, EvalErrorKind::Exit { .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self.kind {
            EvalErrorKind::Exit { code } => Some(code),
            _ => None,
        }
    }

    /// The value a `catch` clause binds for this error.
    ///
    /// A thrown value is handed back as-is; a runtime error becomes the
    /// string `[line N] message`.
    pub fn catch_value(&self) -> Value {
        if let Some(value) = &self.thrown {
            return value.clone();
        }
        match self.line {
            Some(line) => Value::String(format!("[line {line}] {}", self.message)),
            None => Value::String(self.message.clone()),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Factory functions

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_class(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedClass {
        name: name.to_string(),
    })
}

#[cold]
pub fn no_such_method(method: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMethod {
        method: method.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn scope_overflow(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ScopeOverflow { limit })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn exit_requested(code: i32) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Exit { code })
}
