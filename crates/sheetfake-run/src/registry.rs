//! Named operation registry.
//!
//! The server-side surface a client may call, built once and looked up by name.

use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;

use crate::value::Value;

/// A callable server-side operation.
///
/// Operations take positional arguments and may fail with any error; the boundary
/// routes failures to the caller's failure handler.
pub type Operation = Rc<dyn Fn(&[Value]) -> anyhow::Result<Value>>;

/// Map from operation name to callable.
#[derive(Clone, Default)]
pub struct OperationRegistry {
    operations: AHashMap<String, Operation>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation, replacing any previous one with the same name.
    pub fn register<S, F>(&mut self, name: S, operation: F) -> &mut Self
    where
        S: Into<String>,
        F: Fn(&[Value]) -> anyhow::Result<Value> + 'static,
    {
        self.operations.insert(name.into(), Rc::new(operation));
        self
    }

    /// Builder form of [`OperationRegistry::register`].
    pub fn with<S, F>(mut self, name: S, operation: F) -> Self
    where
        S: Into<String>,
        F: Fn(&[Value]) -> anyhow::Result<Value> + 'static,
    {
        self.register(name, operation);
        self
    }

    pub fn get(&self, name: &str) -> Option<Operation> {
        self.operations.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("operations", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_call() {
        let registry = OperationRegistry::new()
            .with("add", |args: &[Value]| {
                let sum: f64 = args.iter().filter_map(Value::as_f64).sum();
                Ok(Value::from(sum))
            })
            .with("fail", |_: &[Value]| anyhow::bail!("boom"));

        assert_eq!(registry.names(), vec!["add", "fail"]);
        assert!(registry.contains("add"));
        assert!(!registry.contains("missing"));

        let add = registry.get("add").unwrap();
        assert_eq!(add(&[Value::from(2), Value::from(3)]).unwrap(), Value::from(5.0));

        let fail = registry.get("fail").unwrap();
        assert_eq!(fail(&[]).unwrap_err().to_string(), "boom");
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = OperationRegistry::new();
        registry
            .register("v", |_: &[Value]| Ok(Value::from(1)))
            .register("v", |_: &[Value]| Ok(Value::from(2)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("v").unwrap()(&[]).unwrap(), Value::from(2));
    }
}
