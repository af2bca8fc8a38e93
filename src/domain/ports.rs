use crate::domain::errors::StorageError;

/// String key-value persistence, the desktop analogue of browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// The document root that theme styling is written onto.
pub trait StyleTarget: Send + Sync {
    fn set_class(&self, class: &str, enabled: bool);
    fn set_property(&self, name: &str, value: &str);
}

/// Blocking user notification for failures that are not returned to callers.
pub trait AlertSink: Send + Sync {
    fn alert(&self, message: &str);
}
