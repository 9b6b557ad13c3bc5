//! Interpreter
//!
//! Owns the global scope, the core class hierarchy and the dispatch
//! configuration, and implements `Evaluator` for the expression language.
//!
//! ```
//! use multimethod_vm::{Expr, Interpreter, Value};
//!
//! let interp = Interpreter::new();
//! interp.install_builtins().unwrap();
//! interp
//!     .define_method("double", interp.parse_pattern("n Int").unwrap(),
//!         Expr::call2("+", Expr::name("n"), Expr::name("n")))
//!     .unwrap();
//! assert_eq!(interp.call("double", Value::Int(21)).unwrap(), Value::Int(42));
//! ```

mod builtins;
mod eval;

use std::sync::Arc;

use indexmap::IndexMap;
use multimethod_vm_parser::parse_pattern;
use tracing::debug;

use crate::ast::Expr;
use crate::config::DispatchConfig;
use crate::dispatch::{Method, Multimethod, NativeArgs};
use crate::error::{RuntimeError, RuntimeResult};
use crate::evaluator::Evaluator;
use crate::pattern::Pattern;
use crate::scope::{Scope, ScopeRef};
use crate::value::{ClassObj, Instance, Value};

/// Classes every interpreter defines in its global scope.
#[derive(Debug, Clone)]
pub struct CoreClasses {
    pub object: Arc<ClassObj>,
    pub nothing: Arc<ClassObj>,
    pub bool: Arc<ClassObj>,
    pub num: Arc<ClassObj>,
    pub int: Arc<ClassObj>,
    pub float: Arc<ClassObj>,
    pub string: Arc<ClassObj>,
    pub record: Arc<ClassObj>,
    pub class: Arc<ClassObj>,
    pub multimethod: Arc<ClassObj>,
    pub error: Arc<ClassObj>,
    pub no_method_error: Arc<ClassObj>,
    pub ambiguous_method_error: Arc<ClassObj>,
    pub redefinition_error: Arc<ClassObj>,
}

impl CoreClasses {
    fn new() -> Self {
        let object = ClassObj::new("Object", vec![]);
        let child = |name: &str, parent: &Arc<ClassObj>| ClassObj::new(name, vec![parent.clone()]);
        let num = child("Num", &object);
        let error = child("Error", &object);
        Self {
            nothing: child("Nothing", &object),
            bool: child("Bool", &object),
            int: child("Int", &num),
            float: child("Float", &num),
            string: child("String", &object),
            record: child("Record", &object),
            class: child("Class", &object),
            multimethod: child("Multimethod", &object),
            no_method_error: child("NoMethodError", &error),
            ambiguous_method_error: child("AmbiguousMethodError", &error),
            redefinition_error: child("RedefinitionError", &error),
            num,
            error,
            object,
        }
    }

    fn all(&self) -> [&Arc<ClassObj>; 14] {
        [
            &self.object,
            &self.nothing,
            &self.bool,
            &self.num,
            &self.int,
            &self.float,
            &self.string,
            &self.record,
            &self.class,
            &self.multimethod,
            &self.error,
            &self.no_method_error,
            &self.ambiguous_method_error,
            &self.redefinition_error,
        ]
    }
}

#[derive(Debug)]
pub struct Interpreter {
    globals: ScopeRef,
    classes: CoreClasses,
    config: DispatchConfig,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter with the default dispatch configuration.
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// Default configuration with `MULTIMETHOD_VM_*` environment overrides
    /// applied.
    pub fn from_env() -> Self {
        Self::with_config(DispatchConfig::from_env())
    }

    /// Create an interpreter whose multimethods use `config`.
    pub fn with_config(config: DispatchConfig) -> Self {
        let globals = Scope::root();
        let classes = CoreClasses::new();
        for class in classes.all() {
            globals.define(class.name(), Value::Class(class.clone()));
        }
        Self {
            globals,
            classes,
            config,
        }
    }

    /// Register the native built-ins (`+`, `-`, `*`, `<`, `==`, `!=`,
    /// `class`, `is`, `string`).
    pub fn install_builtins(&self) -> RuntimeResult<()> {
        builtins::install(self)
    }

    pub fn globals(&self) -> &ScopeRef {
        &self.globals
    }

    pub fn classes(&self) -> &CoreClasses {
        &self.classes
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Define a global class. Without parents it derives from `Object`.
    pub fn define_class(
        &self,
        name: &str,
        parents: &[Arc<ClassObj>],
    ) -> RuntimeResult<Arc<ClassObj>> {
        let parents = if parents.is_empty() {
            vec![self.classes.object.clone()]
        } else {
            parents.to_vec()
        };
        let class = ClassObj::new(name, parents);
        if !self.globals.define(name, Value::Class(class.clone())) {
            return Err(RuntimeError::redefinition(name));
        }
        Ok(class)
    }

    pub fn instantiate<I, S>(&self, class: &Arc<ClassObj>, fields: I) -> Value
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let fields: IndexMap<String, Value> =
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Object(Arc::new(Instance::new(class.clone(), fields)))
    }

    /// The global multimethod called `name`, created on first use.
    pub fn multimethod(&self, name: &str) -> RuntimeResult<Arc<Multimethod>> {
        match self.globals.lookup(name) {
            Some(Value::Multimethod(multimethod)) => Ok(multimethod),
            Some(_) => Err(RuntimeError::NotCallable(name.to_string())),
            None => {
                let multimethod = Arc::new(Multimethod::new(name, self.config.clone()));
                if !self
                    .globals
                    .define(name, Value::Multimethod(multimethod.clone()))
                {
                    // Lost a race with another definer; use theirs.
                    return self.multimethod(name);
                }
                debug!(multimethod = name, "created multimethod");
                Ok(multimethod)
            }
        }
    }

    /// Add a method to the global multimethod `name`, closing over globals.
    pub fn define_method(&self, name: &str, pattern: Pattern, body: Expr) -> RuntimeResult<()> {
        self.define_method_in(name, pattern, body, &self.globals)
    }

    /// Add a method whose pattern and body are evaluated under `closure`.
    pub fn define_method_in(
        &self,
        name: &str,
        pattern: Pattern,
        body: Expr,
        closure: &ScopeRef,
    ) -> RuntimeResult<()> {
        self.multimethod(name)?
            .add_method(Method::new(pattern, closure.clone(), body))?;
        Ok(())
    }

    /// Add a native method; `pattern` is pattern source text such as
    /// `"left Int, right Int"`.
    pub fn define_native<F>(&self, name: &str, pattern: &str, f: F) -> RuntimeResult<()>
    where
        F: Fn(&dyn Evaluator, &NativeArgs<'_>) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        let pattern = self.parse_pattern(pattern)?;
        self.multimethod(name)?
            .add_method(Method::native(pattern, self.globals.clone(), f))?;
        Ok(())
    }

    pub fn parse_pattern(&self, source: &str) -> RuntimeResult<Pattern> {
        Ok(Pattern::from_syntax(&parse_pattern(source)?))
    }

    /// Call the global multimethod `name`.
    pub fn call(&self, name: &str, argument: Value) -> RuntimeResult<Value> {
        self.lookup_multimethod(name)?.invoke(self, &argument)
    }

    pub fn call2(&self, name: &str, left: Value, right: Value) -> RuntimeResult<Value> {
        self.lookup_multimethod(name)?.invoke2(self, left, right)
    }

    /// Evaluate `expr` in the global scope.
    pub fn run(&self, expr: &Expr) -> RuntimeResult<Value> {
        self.evaluate(expr, &self.globals)
    }

    /// The language-level error object for `error`: an instance of the
    /// matching error class with a `message` field.
    pub fn error_value(&self, error: &RuntimeError) -> Value {
        let class = match error {
            RuntimeError::NoMethod { .. } => &self.classes.no_method_error,
            RuntimeError::AmbiguousMethod { .. } => &self.classes.ambiguous_method_error,
            RuntimeError::Redefinition { .. } => &self.classes.redefinition_error,
            _ => &self.classes.error,
        };
        self.instantiate(class, [("message", Value::str(&error.to_string()))])
    }

    fn lookup_multimethod(&self, name: &str) -> RuntimeResult<Arc<Multimethod>> {
        match self.globals.lookup(name) {
            Some(Value::Multimethod(multimethod)) => Ok(multimethod),
            Some(_) => Err(RuntimeError::NotCallable(name.to_string())),
            None => Err(RuntimeError::UndefinedVariable(name.to_string())),
        }
    }
}
