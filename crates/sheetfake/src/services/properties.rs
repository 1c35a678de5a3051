//! Key/value property stores.
//!
//! Three independent scopes (script, user, document) hold string properties that
//! outlive a single invocation.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// One property scope. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn set<K: Into<String>, V: Into<String>>(&self, key: K, value: V) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    /// Remove a key; removing a missing key is not an error.
    pub fn delete(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    /// Snapshot of every entry
    pub fn all(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }

    /// Merge `props` into the store, first dropping every existing key when
    /// `delete_all_others` is set.
    pub fn set_all<I, K, V>(&self, props: I, delete_all_others: bool)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = self.entries.borrow_mut();
        if delete_all_others {
            entries.clear();
        }
        entries.extend(props.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Access point for the three property scopes.
#[derive(Debug, Clone, Default)]
pub struct PropertiesService {
    script: PropertyStore,
    user: PropertyStore,
    document: PropertyStore,
}

impl PropertiesService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_properties(&self) -> PropertyStore {
        self.script.clone()
    }

    pub fn user_properties(&self) -> PropertyStore {
        self.user.clone()
    }

    pub fn document_properties(&self) -> PropertyStore {
        self.document.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_set_delete() {
        let service = PropertiesService::new();
        let props = service.script_properties();
        assert_eq!(props.get("missing"), None);

        props.set("key", "value");
        assert_eq!(service.script_properties().get("key").as_deref(), Some("value"));

        props.delete("key");
        props.delete("key");
        assert!(props.is_empty());
    }

    #[test]
    fn test_set_all() {
        let props = PropertyStore::new();
        props.set_all([("x", "10"), ("y", "20")], false);
        props.set_all([("z", "30")], false);
        assert_eq!(props.len(), 3);

        props.set_all([("new", "value")], true);
        let expected: BTreeMap<String, String> =
            [("new".to_string(), "value".to_string())].into_iter().collect();
        assert_eq!(props.all(), expected);
    }

    #[test]
    fn test_scopes_are_independent() {
        let service = PropertiesService::new();
        service.script_properties().set("k", "script");
        service.user_properties().set("k", "user");
        assert_eq!(service.script_properties().get("k").as_deref(), Some("script"));
        assert_eq!(service.user_properties().get("k").as_deref(), Some("user"));
        assert_eq!(service.document_properties().get("k"), None);
    }
}
