//! Template function registration.
//!
//! Functions are held in an explicit [`FunctionRegistry`] owned by each
//! engine, never in process-wide state, and bound as globals into every base
//! set the engine builds. Registering a name twice replaces the earlier
//! function.
//!
//! # Built-ins
//!
//! - `map_new(k1, v1, k2, v2, ...)`: builds a map from key/value pairs, handy
//!   for passing ad-hoc arguments to an included component.

use std::collections::BTreeMap;
use std::fmt;

use minijinja::value::{FunctionArgs, FunctionResult, Rest};
use minijinja::{Environment, Error, ErrorKind, Value};

/// Named callables made available to templates.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, Value>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in functions registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert_value("map_new", Value::from_function(map_new));
        registry
    }

    /// Registers a Rust function, replacing any previous function of that name.
    pub fn insert<F, Rv, Args>(&mut self, name: impl Into<String>, f: F)
    where
        F: minijinja::functions::Function<Rv, Args> + Send + Sync + 'static,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.insert_value(name, Value::from_function(f));
    }

    /// Registers an already-built callable value.
    pub fn insert_value(&mut self, name: impl Into<String>, value: Value) {
        self.functions.insert(name.into(), value);
    }

    /// Merges `other` into this registry; `other` wins on name collisions.
    pub fn extend(&mut self, other: FunctionRegistry) {
        self.functions.extend(other.functions);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Binds every function as a global of `env`.
    pub(crate) fn bind(&self, env: &mut Environment<'static>) {
        for (name, value) in &self.functions {
            env.add_global(name.clone(), value.clone());
        }
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.functions.keys()).finish()
    }
}

fn map_new(pairs: Rest<Value>) -> Result<Value, Error> {
    if pairs.len() % 2 != 0 {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            "map_new requires pairs of arguments",
        ));
    }

    let mut map = BTreeMap::new();
    for pair in pairs.chunks(2) {
        let key = pair[0].as_str().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("map key must be string, got {}", pair[0].kind()),
            )
        })?;
        map.insert(key.to_string(), pair[1].clone());
    }

    Ok(Value::from_serialize(&map))
}
