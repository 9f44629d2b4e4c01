use std::error::Error;
use std::fs;
use std::path::Path;

use eventful_storage::{StorageArea, StorageAreas, StorageBackend};
use serde::{Deserialize, Serialize};

/// One scripted operation against a storage area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    Set { area: StorageArea, key: String, value: String },
    Remove { area: StorageArea, key: String },
    Clear { area: StorageArea },
    /// Property write
    Assign { area: StorageArea, key: String, value: String },
    /// Property delete
    Delete { area: StorageArea, key: String },
}

impl Step {
    pub fn area(&self) -> StorageArea {
        match self {
            Step::Set { area, .. }
            | Step::Remove { area, .. }
            | Step::Clear { area }
            | Step::Assign { area, .. }
            | Step::Delete { area, .. } => *area,
        }
    }

    pub fn apply<B: StorageBackend>(&self, areas: &StorageAreas<B>) -> Result<(), B::Error> {
        let storage = areas.area(self.area());
        match self {
            Step::Set { key, value, .. } => storage.set_item(key, value),
            Step::Remove { key, .. } => storage.remove_item(key),
            Step::Clear { .. } => storage.clear(),
            Step::Assign { key, value, .. } => storage.set(key, value).map(|_| ()),
            Step::Delete { key, .. } => storage.delete(key).map(|_| ()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn builtin() -> Result<Self, toml::de::Error> {
        Self::from_toml(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/script.toml"
        )))
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies every step in order and returns how many failed.
    ///
    /// A failing step is logged and does not stop the replay.
    pub fn replay<B: StorageBackend>(&self, areas: &StorageAreas<B>) -> usize {
        let mut failures = 0;

        for (index, step) in self.steps.iter().enumerate() {
            if let Err(e) = step.apply(areas) {
                tracing::warn!(step = index, area = step.area().host_name(), "step failed: {}", e);
                failures += 1;
            }
        }

        failures
    }
}
