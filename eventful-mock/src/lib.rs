use std::cell::RefCell;
use std::error::Error;
use std::path::Path;
use std::rc::Rc;

use eventful_storage::{
    ChangeRecord, Listener, MemoryStorage, STORAGE_EVENT, StorageArea, StorageAreas,
    StorageBackend,
};

use crate::script::Script;
use crate::settings::Settings;

pub mod script;
pub mod settings;

/// Change records observed across both areas, in dispatch order.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Rc<RefCell<Vec<(StorageArea, ChangeRecord)>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a logging listener on every area of `areas`.
    pub fn attach<B: StorageBackend>(&self, areas: &StorageAreas<B>) {
        for (area, storage) in areas.iter() {
            storage.add_event_listener(STORAGE_EVENT, self.listener(area));
        }
    }

    fn listener(&self, area: StorageArea) -> Listener {
        let entries = self.entries.clone();

        Listener::new(move |event| {
            let Some(record) = event.detail() else {
                return;
            };

            match serde_json::to_string(record) {
                Ok(json) => tracing::info!(area = area.eventful_name(), "{}", json),
                Err(e) => tracing::error!("Failed to serialize change record: {}", e),
            }

            entries.borrow_mut().push((area, record.clone()));
        })
    }

    pub fn entries(&self) -> Vec<(StorageArea, ChangeRecord)> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Builds both areas from `settings`, replays the configured script and
/// returns what was observed.
pub fn run(settings: &Settings) -> Result<Journal, Box<dyn Error>> {
    let areas: StorageAreas<MemoryStorage> =
        StorageAreas::in_memory(settings.local.quota, settings.session.quota);

    let journal = Journal::new();
    journal.attach(&areas);

    let script = match &settings.replay.path {
        Some(path) => Script::load(Path::new(path))?,
        None => Script::builtin()?,
    };

    tracing::info!(steps = script.steps.len(), "replaying page session");

    let failures = script.replay(&areas);
    if failures > 0 {
        tracing::warn!(failures, "replay finished with failed steps");
    }

    for (area, storage) in areas.iter() {
        let length = storage.length()?;
        tracing::debug!(area = area.eventful_name(), length, "final state");
    }

    Ok(journal)
}
