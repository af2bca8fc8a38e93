use crate::domain::ports::{AlertSink, StyleTarget};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use tracing::error;

/// In-memory stand-in for the document root element: a class list plus
/// inline custom properties.
#[derive(Default)]
pub struct RootStyle {
    classes: Mutex<BTreeSet<String>>,
    properties: Mutex<BTreeMap<String, String>>,
}

impl RootStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(class)
    }

    pub fn property(&self, name: &str) -> Option<String> {
        self.properties
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    pub fn properties(&self) -> BTreeMap<String, String> {
        self.properties
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl StyleTarget for RootStyle {
    fn set_class(&self, class: &str, enabled: bool) {
        let mut classes = self.classes.lock().unwrap_or_else(|e| e.into_inner());
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn set_property(&self, name: &str, value: &str) {
        self.properties
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_string(), value.to_string());
    }
}

/// Alerts for headless runs: written to the log at error level.
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn alert(&self, message: &str) {
        error!("ALERT: {}", message);
    }
}

/// Keeps every alert; used by tests to assert what the user would have seen.
#[derive(Default)]
pub struct RecordingAlertSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl AlertSink for RecordingAlertSink {
    fn alert(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
