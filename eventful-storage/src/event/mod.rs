mod listener;
mod target;

pub use listener::*;
pub use target::*;

use std::cell::Cell;

use serde::Serialize;

use crate::value::StorageValue;

/// Name of the change notification event
pub const STORAGE_EVENT: &str = "storage";

/// Entry-level change observed through a facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    key: String,
    #[serde(skip_serializing_if = "StorageValue::is_undefined")]
    old_value: StorageValue,
    #[serde(skip_serializing_if = "StorageValue::is_undefined")]
    new_value: StorageValue,
}

impl ChangeRecord {
    pub fn new(key: impl Into<String>, old_value: StorageValue, new_value: StorageValue) -> Self {
        Self {
            key: key.into(),
            old_value,
            new_value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn old_value(&self) -> &StorageValue {
        &self.old_value
    }

    pub fn new_value(&self) -> &StorageValue {
        &self.new_value
    }
}

/// Event delivered to listeners, optionally carrying a change record as its detail.
#[derive(Debug)]
pub struct Event {
    event_type: String,
    detail: Option<ChangeRecord>,
    cancelable: bool,
    default_prevented: Cell<bool>,
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            detail: None,
            cancelable: false,
            default_prevented: Cell::new(false),
        }
    }

    /// `storage` event carrying the given record
    pub fn storage(record: ChangeRecord) -> Self {
        Self::new(STORAGE_EVENT).with_detail(record)
    }

    pub fn with_detail(mut self, detail: ChangeRecord) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn detail(&self) -> Option<&ChangeRecord> {
        self.detail.as_ref()
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Has no effect on events that are not cancelable.
    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
