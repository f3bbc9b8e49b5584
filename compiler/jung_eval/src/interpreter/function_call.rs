//! Calls: script functions, natives, class methods and constructors.

use std::mem;
use std::rc::Rc;

use jung_ir::{Expr, FunctionDef};

use super::access::Place;
use super::{Interpreter, Outcome, CLASS_KEY};
use crate::builtins::{self, Builtin, NativeFn};
use crate::errors::{
    no_such_method, not_callable, stack_overflow, undefined_class, undefined_function, EvalError,
    EvalResult,
};
use crate::value::{ObjectRef, Table, Value};

impl Interpreter {
    /// `name(args)`: a callable variable, then the function namespace, then
    /// the natives.
    pub(super) fn eval_call(&mut self, name: &str, arg_exprs: &[Expr]) -> EvalResult {
        let callee = match self.env.lookup(name) {
            Some(value) if value.is_callable() => value,
            _ => self
                .resolve_callable(name)
                .ok_or_else(|| undefined_function(name))?,
        };
        if let Value::Builtin(native) = &callee {
            if let Some((first, rest)) = arg_exprs.split_first() {
                if native.is_mutating() && first.is_place() {
                    let place = self.resolve_place(first)?;
                    let mut args = vec![self.read_place(&place)?];
                    args.extend(self.eval_args(rest)?);
                    return self.call_native(*native, args, Some(place));
                }
            }
        }
        let args = self.eval_args(arg_exprs)?;
        self.call_value(&callee, args)
    }

    /// `receiver.method(args)`: the receiver's class method, then a callable
    /// field, then the native method table.
    pub(super) fn eval_method_call(
        &mut self,
        receiver_expr: &Expr,
        method: &str,
        arg_exprs: &[Expr],
    ) -> EvalResult {
        let (receiver, place) = if receiver_expr.is_place() {
            let place = self.resolve_place(receiver_expr)?;
            (self.read_place(&place)?, Some(place))
        } else {
            (self.eval(receiver_expr)?, None)
        };
        let args = self.eval_args(arg_exprs)?;

        if let Value::Object(obj) = &receiver {
            if let Some(def) = self.class_method(obj, method) {
                return self.call_function(&def, args, Some(receiver.clone()));
            }
            let field = obj.borrow().get(method).cloned();
            if let Some(callable) = field.filter(Value::is_callable) {
                return self.call_value(&callable, args);
            }
        }

        let Some(native) = builtins::lookup_method(method) else {
            return Err(no_such_method(method, receiver.type_name()));
        };
        let mut full_args = Vec::with_capacity(args.len() + 1);
        full_args.push(receiver);
        full_args.extend(args);
        self.call_native(native, full_args, place)
    }

    /// `new Class(args)`: a fresh tagged Object, initialized by the
    /// constructor when the class has one.
    pub(super) fn eval_new(&mut self, class_name: &str, arg_exprs: &[Expr]) -> EvalResult {
        let class = self
            .classes
            .get(class_name)
            .cloned()
            .ok_or_else(|| undefined_class(class_name))?;
        let mut table = Table::new();
        table.insert(CLASS_KEY, Value::string(class_name));
        let instance = Value::Object(ObjectRef::new(table));

        let args = self.eval_args(arg_exprs)?;
        if let Some(constructor) = class.constructor() {
            self.call_function(constructor, args, Some(instance.clone()))?;
        }
        Ok(instance)
    }

    fn class_method(&self, obj: &ObjectRef, method: &str) -> Option<Rc<FunctionDef>> {
        let table = obj.borrow();
        let Some(Value::String(class_name)) = table.get(CLASS_KEY) else {
            return None;
        };
        self.classes.get(class_name)?.method(method).cloned()
    }

    /// Call a function or native value with evaluated arguments.
    pub(crate) fn call_value(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        match callee {
            Value::Function(def) => self.call_function(def, args, None),
            Value::Builtin(native) => self.call_native(*native, args, None),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// `place` is where the first argument was read from; mutating natives
    /// write their updated array back there.
    pub(crate) fn call_native(
        &mut self,
        native: Builtin,
        mut args: Vec<Value>,
        place: Option<Place>,
    ) -> EvalResult {
        match native.func {
            NativeFn::Pure(f) => f(&args),
            NativeFn::WithInterpreter(f) => f(self, &args),
            NativeFn::Mutating(f) => {
                if args.is_empty() {
                    return f(&mut Value::Null, &[]);
                }
                let mut target = args.remove(0);
                let result = f(&mut target, &args)?;
                if let Some(place) = place {
                    if matches!(target, Value::Array(_)) {
                        self.write_place(place, target)?;
                    }
                }
                Ok(result)
            }
        }
    }

    /// Invoke a script function in a fresh frame.
    ///
    /// The frame sees its parameters and the globals, never the caller's
    /// locals. `this` is bound only for methods and constructors.
    #[tracing::instrument(level = "debug", skip_all, fields(name = %def.name))]
    pub(crate) fn call_function(
        &mut self,
        def: &Rc<FunctionDef>,
        args: Vec<Value>,
        this: Option<Value>,
    ) -> EvalResult {
        self.check_recursion_limit()?;

        let frame_env = self.env.child();
        let saved_env = mem::replace(&mut self.env, frame_env);
        let saved_this = mem::replace(&mut self.this, this);
        self.call_depth += 1;

        let result = self.run_frame(def, args);

        self.call_depth -= 1;
        self.this = saved_this;
        self.env = saved_env;
        result
    }

    fn run_frame(&mut self, def: &FunctionDef, args: Vec<Value>) -> EvalResult {
        let outcome = self.with_env_scope(|scoped| {
            scoped.bind_params(def, args)?;
            scoped.exec_stmts(&def.body)
        })?;
        match outcome {
            Outcome::Return(value) => Ok(value),
            Outcome::Throw(value) => Err(EvalError::thrown(value)),
            Outcome::Normal | Outcome::Break | Outcome::Continue => Ok(Value::Null),
        }
    }

    /// Supplied arguments first, then defaults evaluated in the new scope,
    /// then null. Extra arguments are ignored.
    fn bind_params(&mut self, def: &FunctionDef, args: Vec<Value>) -> Result<(), EvalError> {
        let mut args = args.into_iter();
        for param in &def.params {
            let value = match (args.next(), &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval(default)?,
                (None, None) => Value::Null,
            };
            self.env.define(&param.name, value);
        }
        Ok(())
    }

    fn check_recursion_limit(&self) -> Result<(), EvalError> {
        if self.call_depth >= self.max_call_depth {
            tracing::warn!(limit = self.max_call_depth, "call depth limit reached");
            return Err(stack_overflow(self.max_call_depth));
        }
        Ok(())
    }
}
