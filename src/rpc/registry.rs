//! Procedure registry
//!
//! Maps method names to callables. Every callable is bound with an explicit
//! arity: it takes no parameter value, or exactly one. Procedures needing
//! several arguments receive them bundled in one array or object.
//!
//! The registry is filled once at startup and then shared read-only, usually
//! behind an `Arc`.

use std::collections::HashMap;
use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::rpc::error::{ProcedureError, ProcedureResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Zero,
    One,
}

type ZeroFn = Box<dyn Fn() -> ProcedureResult + Send + Sync>;
type OneFn = Box<dyn Fn(Value) -> ProcedureResult + Send + Sync>;

/// A bound callable together with its arity.
pub enum Procedure {
    Zero(ZeroFn),
    One(OneFn),
}

impl Procedure {
    pub fn zero<F>(f: F) -> Self
    where
        F: Fn() -> ProcedureResult + Send + Sync + 'static,
    {
        Self::Zero(Box::new(f))
    }

    pub fn one<F>(f: F) -> Self
    where
        F: Fn(Value) -> ProcedureResult + Send + Sync + 'static,
    {
        Self::One(Box::new(f))
    }

    pub fn arity(&self) -> Arity {
        match self {
            Self::Zero(_) => Arity::Zero,
            Self::One(_) => Arity::One,
        }
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Procedure").field(&self.arity()).finish()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    procedures: HashMap<String, Procedure>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `procedure` under `name`, replacing any earlier binding.
    pub fn register(&mut self, name: impl Into<String>, procedure: Procedure) -> &mut Self {
        let name = name.into();
        debug!(method = %name, arity = ?procedure.arity(), "procedure registered");
        if self.procedures.insert(name.clone(), procedure).is_some() {
            debug!(method = %name, "previous binding replaced");
        }
        self
    }

    pub fn register_zero<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn() -> ProcedureResult + Send + Sync + 'static,
    {
        self.register(name, Procedure::zero(f))
    }

    pub fn register_one<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(Value) -> ProcedureResult + Send + Sync + 'static,
    {
        self.register(name, Procedure::one(f))
    }

    /// Binds a one-parameter procedure over typed input and output.
    ///
    /// A parameter value that does not deserialize into `T` is reported as
    /// invalid parameters without calling `f`.
    pub fn register_typed<T, R, F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        T: DeserializeOwned,
        R: Serialize,
        F: Fn(T) -> Result<R, ProcedureError> + Send + Sync + 'static,
    {
        self.register_one(name, move |params| {
            let input: T = serde_json::from_value(params)
                .map_err(|err| ProcedureError::invalid_params(err.to_string()))?;
            let output = f(input)?;
            serde_json::to_value(output).map_err(|err| {
                ProcedureError::internal(format!("failed to serialize result: {err}"))
            })
        })
    }

    pub fn lookup(&self, name: &str) -> Option<Arity> {
        self.procedures.get(name).map(Procedure::arity)
    }

    pub fn get(&self, name: &str) -> Option<&Procedure> {
        self.procedures.get(name)
    }

    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.procedures.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}
