//! Tree-walking interpreter.
//!
//! Expressions evaluate to an [`EvalResult`]; statements execute to an
//! [`Outcome`] that carries `return`, `break`, `continue` and `throw` up to
//! the construct that handles them. Runtime errors travel as `Err` and are
//! turned into catchable values by `try`.

mod access;
mod builder;
mod function_call;
mod scope_guard;

use std::fs;
use std::mem;
use std::rc::Rc;
use std::time::{Duration, Instant};

use jung_ir::{BinaryOp, ClassDef, Expr, ExprKind, FunctionDef, InterpPart, Program, Stmt, StmtKind};
use jung_stack::ensure_sufficient_stack;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::builtins;
use crate::errors::{type_mismatch, undefined_variable, EvalError, EvalResult};
use crate::operators;
use crate::print_handler::SharedPrintHandler;
use crate::value::{ObjectRef, Table, Value};
use crate::Environment;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

/// Object key naming the class of an instance.
pub const CLASS_KEY: &str = "__class__";

/// Default bound on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

/// How a statement finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Normal,
    Return(Value),
    Break,
    Continue,
    Throw(Value),
}

/// Interpreter state: scopes, the function and class namespaces, the bound
/// receiver, and resource counters.
pub struct Interpreter {
    pub(crate) env: Environment,
    functions: FxHashMap<String, Rc<FunctionDef>>,
    classes: FxHashMap<String, Rc<ClassDef>>,
    /// Receiver of the innermost method or constructor frame.
    this: Option<Value>,
    call_depth: usize,
    max_call_depth: usize,
    /// Paths already imported; a second import is a no-op.
    imported: FxHashSet<String>,
    print_handler: SharedPrintHandler,
    started: Instant,
}

impl Interpreter {
    /// Interpreter printing to stdout with default limits.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Execute a whole program against this interpreter's state.
    ///
    /// A top-level `return`, `break` or `continue` stops the program
    /// quietly; a `throw` nobody caught becomes an error.
    #[tracing::instrument(level = "debug", skip_all, fields(stmts = program.stmts.len()))]
    pub fn run(&mut self, program: &Program) -> Result<(), EvalError> {
        for stmt in &program.stmts {
            match self.exec(stmt) {
                Ok(Outcome::Normal) => {}
                Ok(Outcome::Throw(value)) => {
                    tracing::debug!(line = stmt.line, "uncaught exception");
                    return Err(EvalError::thrown(value).with_line_if_absent(stmt.line));
                }
                Ok(Outcome::Return(_) | Outcome::Break | Outcome::Continue) => return Ok(()),
                Err(err) => {
                    if !err.is_exit() {
                        tracing::debug!(line = ?err.line, error = %err, "runtime error");
                    }
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Evaluate one expression against the current state.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        self.eval(expr)
    }

    /// Run the program at `path` into this interpreter's globals.
    ///
    /// Importing a path a second time does nothing.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn import(&mut self, path: &str) -> Result<(), EvalError> {
        if self.imported.contains(path) {
            tracing::debug!("already imported");
            return Ok(());
        }
        let source = fs::read_to_string(path)
            .map_err(|e| EvalError::new(format!("cannot open import file '{path}': {e}")))?;
        let program = jung_parse::parse(&source)
            .map_err(|e| EvalError::new(format!("in import '{path}': {e}")))?;
        self.imported.insert(path.to_string());

        let module_env = self.env.child();
        let saved_env = mem::replace(&mut self.env, module_env);
        let saved_this = self.this.take();
        let result = self.run(&program);
        self.this = saved_this;
        self.env = saved_env;
        result
    }

    /// Bind a global variable.
    pub fn define_global(&mut self, name: &str, value: Value) {
        self.env.define_global(name, value);
    }

    /// Look up a variable visible from the current scope.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.env.lookup(name)
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Time since this interpreter was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    // Statements

    pub(crate) fn exec(&mut self, stmt: &Stmt) -> Result<Outcome, EvalError> {
        self.exec_inner(stmt)
            .map_err(|e| e.with_line_if_absent(stmt.line))
    }

    fn exec_inner(&mut self, stmt: &Stmt) -> Result<Outcome, EvalError> {
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                let value = self.eval(value)?;
                self.env.define(name, value);
            }
            StmtKind::Assign { target, value } => {
                let value = self.eval(value)?;
                self.assign_to(target, value)?;
            }
            StmtKind::CompoundAssign { target, op, value } => {
                let place = self.resolve_place(target)?;
                let current = self.read_place(&place)?;
                let rhs = self.eval(value)?;
                let updated = match op.binary_op() {
                    BinaryOp::Div => operators::divide(&current, &rhs, value.is_float_literal())?,
                    op => operators::binary(op, &current, &rhs)?,
                };
                self.write_place(place, updated)?;
            }
            StmtKind::Expr(expr) => {
                self.eval(expr)?;
            }
            StmtKind::Print(expr) => {
                let value = self.eval(expr)?;
                self.print_handler.println(&value.to_string());
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(cond)?.is_truthy() {
                    return self.exec_block(then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.exec_block(else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                while self.eval(cond)?.is_truthy() {
                    match self.exec_block(body)? {
                        Outcome::Break => break,
                        Outcome::Normal | Outcome::Continue => {}
                        other => return Ok(other),
                    }
                }
            }
            StmtKind::For {
                var,
                iterable,
                body,
            } => return self.exec_for(var, iterable, body),
            StmtKind::Function(def) => {
                self.functions.insert(def.name.clone(), Rc::clone(def));
            }
            StmtKind::Class(class) => {
                self.classes.insert(class.name.clone(), Rc::clone(class));
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Null,
                };
                return Ok(Outcome::Return(value));
            }
            StmtKind::Break => return Ok(Outcome::Break),
            StmtKind::Continue => return Ok(Outcome::Continue),
            StmtKind::Try {
                body,
                catch_var,
                handler,
            } => return self.exec_try(body, catch_var.as_deref(), handler),
            StmtKind::Throw(expr) => {
                let value = self.eval(expr)?;
                return Ok(Outcome::Throw(Value::String(value.to_string())));
            }
            StmtKind::Import(path) => self.import(path)?,
        }
        Ok(Outcome::Normal)
    }

    /// Run statements in order, stopping at the first non-normal outcome.
    pub(crate) fn exec_stmts(&mut self, stmts: &[Stmt]) -> Result<Outcome, EvalError> {
        for stmt in stmts {
            let outcome = self.exec(stmt)?;
            if outcome != Outcome::Normal {
                return Ok(outcome);
            }
        }
        Ok(Outcome::Normal)
    }

    /// Run statements in a fresh block scope.
    pub(crate) fn exec_block(&mut self, stmts: &[Stmt]) -> Result<Outcome, EvalError> {
        self.with_env_scope(|scoped| scoped.exec_stmts(stmts))
    }

    fn exec_for(&mut self, var: &str, iterable: &Expr, body: &[Stmt]) -> Result<Outcome, EvalError> {
        let items: Vec<Value> = match self.eval(iterable)? {
            Value::Array(items) => items,
            Value::String(s) => s.chars().map(|c| Value::String(c.to_string())).collect(),
            Value::Object(obj) => obj.borrow().keys().map(Value::string).collect(),
            other => return Err(type_mismatch("array, string or object", other.type_name())),
        };
        for item in items {
            match self.with_binding(var, item, |scoped| scoped.exec_stmts(body))? {
                Outcome::Break => break,
                Outcome::Normal | Outcome::Continue => {}
                other => return Ok(other),
            }
        }
        Ok(Outcome::Normal)
    }

    /// Scopes pushed inside `body` are already unwound by their guards when
    /// the error or throw arrives here.
    fn exec_try(
        &mut self,
        body: &[Stmt],
        catch_var: Option<&str>,
        handler: &[Stmt],
    ) -> Result<Outcome, EvalError> {
        let caught = match self.exec_block(body) {
            Ok(Outcome::Throw(value)) => value,
            Ok(outcome) => return Ok(outcome),
            Err(err) if err.is_exit() => return Err(err),
            Err(err) => {
                tracing::debug!(error = %err, "caught runtime error");
                err.catch_value()
            }
        };
        self.with_env_scope(|scoped| {
            if let Some(name) = catch_var {
                scoped.env.define(name, caught);
            }
            scoped.exec_stmts(handler)
        })
    }

    // Expressions

    pub(crate) fn eval(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr))
            .map_err(|e| e.with_line_if_absent(expr.line))
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Number(n) | ExprKind::Float(n) => Ok(Value::Number(*n)),
            ExprKind::Str(s) => Ok(Value::String(s.clone())),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Null => Ok(Value::Null),
            ExprKind::Interpolation(parts) => {
                let mut out = String::new();
                for part in parts {
                    match part {
                        InterpPart::Text(text) => out.push_str(text),
                        InterpPart::Expr(expr) => out.push_str(&self.eval(expr)?.to_string()),
                    }
                }
                Ok(Value::String(out))
            }
            ExprKind::Ident(name) => self.lookup_name(name),
            ExprKind::This => Ok(self.this.clone().unwrap_or(Value::Null)),
            ExprKind::Array(items) => Ok(Value::Array(self.eval_args(items)?)),
            ExprKind::Object(entries) => {
                let mut table = Table::new();
                for (key, expr) in entries {
                    let value = self.eval(expr)?;
                    table.insert(key.as_str(), value);
                }
                Ok(Value::Object(ObjectRef::new(table)))
            }
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right),
            ExprKind::Unary { op, operand } => {
                let value = self.eval(operand)?;
                operators::unary(*op, &value)
            }
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(cond)?.is_truthy() {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }
            ExprKind::Index { object, index } => self.eval_index(object, index),
            ExprKind::Property { object, name } => self.eval_property(object, name),
            ExprKind::Call { callee, args } => self.eval_call(callee, args),
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => self.eval_method_call(receiver, method, args),
            ExprKind::New { class, args } => self.eval_new(class, args),
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult {
        match op {
            BinaryOp::And => {
                if !self.eval(left)?.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(right)?.is_truthy()))
            }
            BinaryOp::Or => {
                let left = self.eval(left)?;
                if left.is_truthy() {
                    return Ok(left);
                }
                self.eval(right)
            }
            BinaryOp::Div => {
                let real = left.is_float_literal() || right.is_float_literal();
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                operators::divide(&left, &right, real)
            }
            _ => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                operators::binary(op, &left, &right)
            }
        }
    }

    pub(crate) fn eval_args(&mut self, exprs: &[Expr]) -> Result<Vec<Value>, EvalError> {
        exprs.iter().map(|expr| self.eval(expr)).collect()
    }

    /// Variables, then named functions, then natives.
    fn lookup_name(&self, name: &str) -> EvalResult {
        if let Some(value) = self.env.lookup(name) {
            return Ok(value);
        }
        self.resolve_callable(name)
            .ok_or_else(|| undefined_variable(name))
    }

    /// A named function or native as a first-class value.
    pub(crate) fn resolve_callable(&self, name: &str) -> Option<Value> {
        if let Some(def) = self.functions.get(name) {
            return Some(Value::Function(Rc::clone(def)));
        }
        builtins::lookup(name).map(Value::Builtin)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
