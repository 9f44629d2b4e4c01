use std::fmt;

use serde::{Serialize, Serializer};

/// Snapshot of an entry as seen through one access path.
///
/// Formal reads (`getItem`) report a missing entry as [`StorageValue::Null`],
/// property reads report it as [`StorageValue::Undefined`]. The two are never
/// equal, so a change between them is a change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StorageValue {
    #[default]
    Undefined,
    Null,
    Text(String),
}

impl StorageValue {
    /// Snapshot produced by a formal `getItem` read.
    pub fn from_item(item: Option<String>) -> Self {
        item.map_or(StorageValue::Null, StorageValue::Text)
    }

    /// Snapshot produced by a property read.
    pub fn from_property(item: Option<String>) -> Self {
        item.map_or(StorageValue::Undefined, StorageValue::Text)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StorageValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, StorageValue::Undefined)
    }
}

impl From<&str> for StorageValue {
    fn from(value: &str) -> Self {
        StorageValue::Text(value.to_string())
    }
}

impl From<String> for StorageValue {
    fn from(value: String) -> Self {
        StorageValue::Text(value)
    }
}

impl fmt::Display for StorageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageValue::Undefined => write!(f, "undefined"),
            StorageValue::Null => write!(f, "null"),
            StorageValue::Text(text) => write!(f, "{}", text),
        }
    }
}

// Undefined fields are expected to be skipped by the containing struct.
impl Serialize for StorageValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StorageValue::Undefined | StorageValue::Null => serializer.serialize_none(),
            StorageValue::Text(text) => serializer.serialize_str(text),
        }
    }
}
