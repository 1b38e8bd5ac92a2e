use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// String-valued persistent storage, shaped after `window.localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Load a JSON-encoded value; returns Ok(None) if not found.
pub fn load_json<S, T>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get_item(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Save a value as JSON.
pub fn save_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set_item(key, &json)
}

/// In-process store used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    disabled: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every call, like a browser with storage disabled.
    pub fn unavailable() -> Self {
        let store = Self::default();
        store.disabled.set(true);
        store
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.disabled.get() {
            Err(StorageError::Unavailable("storage disabled".into()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_values_roundtrip_through_store() {
        let store = MemoryStore::new();
        save_json(&store, "draft", "hello \"world\"").unwrap();
        assert_eq!(
            store.get_item("draft").unwrap().as_deref(),
            Some("\"hello \\\"world\\\"\"")
        );
        let back: Option<String> = load_json(&store, "draft").unwrap();
        assert_eq!(back.as_deref(), Some("hello \"world\""));
    }

    #[test]
    fn missing_key_loads_as_none() {
        let store = MemoryStore::new();
        let value: Option<String> = load_json(&store, "nope").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn disabled_store_reports_unavailable() {
        let store = MemoryStore::unavailable();
        assert!(matches!(
            store.set_item("k", "v"),
            Err(StorageError::Unavailable(_))
        ));
        store.set_disabled(false);
        store.set_item("k", "v").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn corrupt_json_is_an_error() {
        let store = MemoryStore::new();
        store.set_item("draft", "{not json").unwrap();
        let res: Result<Option<String>, _> = load_json(&store, "draft");
        assert!(matches!(res, Err(StorageError::Json(_))));
    }
}
