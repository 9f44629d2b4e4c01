use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::eventful::EventfulStorage;
use crate::storage::{MemoryStorage, StorageBackend};

/// The two per-origin storage areas of a browsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageArea {
    Local,
    Session,
}

impl StorageArea {
    pub const ALL: [StorageArea; 2] = [StorageArea::Local, StorageArea::Session];

    /// Name of the host storage area
    pub fn host_name(&self) -> &'static str {
        match self {
            StorageArea::Local => "localStorage",
            StorageArea::Session => "sessionStorage",
        }
    }

    /// Well-known name of the facade over this area
    pub fn eventful_name(&self) -> &'static str {
        match self {
            StorageArea::Local => "localStorageEventful",
            StorageArea::Session => "sessionStorageEventful",
        }
    }
}

/// Facades over the local and session areas, built once by the composition root.
pub struct StorageAreas<B: StorageBackend> {
    pub local: EventfulStorage<B>,
    pub session: EventfulStorage<B>,
}

impl<B: StorageBackend> StorageAreas<B> {
    pub fn new(local: Rc<B>, session: Rc<B>) -> Self {
        Self {
            local: EventfulStorage::new(local),
            session: EventfulStorage::new(session),
        }
    }

    pub fn area(&self, area: StorageArea) -> &EventfulStorage<B> {
        match area {
            StorageArea::Local => &self.local,
            StorageArea::Session => &self.session,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StorageArea, &EventfulStorage<B>)> {
        StorageArea::ALL.into_iter().map(move |area| (area, self.area(area)))
    }
}

impl StorageAreas<MemoryStorage> {
    pub fn in_memory(local_quota: Option<usize>, session_quota: Option<usize>) -> Self {
        Self::new(
            Rc::new(MemoryStorage::with_quota(local_quota)),
            Rc::new(MemoryStorage::with_quota(session_quota)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_are_independent() {
        let areas = StorageAreas::in_memory(None, None);
        areas.local.set_item("test", "local").unwrap();

        assert_eq!(areas.local.get_item("test").unwrap().as_deref(), Some("local"));
        assert_eq!(areas.session.get_item("test").unwrap(), None);
        assert!(!Rc::ptr_eq(areas.local.backend(), areas.session.backend()));
    }

    #[test]
    fn test_area_lookup() {
        let areas = StorageAreas::in_memory(Some(10), None);
        assert_eq!(areas.area(StorageArea::Local).backend().quota(), Some(10));
        assert_eq!(areas.area(StorageArea::Session).backend().quota(), None);

        let names: Vec<&str> = areas.iter().map(|(area, _)| area.eventful_name()).collect();
        assert_eq!(names, vec!["localStorageEventful", "sessionStorageEventful"]);
        assert_eq!(StorageArea::Session.host_name(), "sessionStorage");
    }
}
