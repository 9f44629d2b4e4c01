use std::cell::RefCell;
use std::collections::BTreeMap;

use super::StorageBackend;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryStorageError {
    #[error("Quota exceeded: {required} of {quota} units")]
    QuotaExceeded { required: usize, quota: usize },
}

/// In-memory storage area.
///
/// Keys iterate in ascending order. The optional quota counts UTF-16 code
/// units over every key and value, the way browsers account storage usage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: RefCell<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: Option<usize>) -> Self {
        Self {
            data: RefCell::new(BTreeMap::new()),
            quota,
        }
    }

    pub fn quota(&self) -> Option<usize> {
        self.quota
    }

    /// Units currently in use
    pub fn usage(&self) -> usize {
        self.data
            .borrow()
            .iter()
            .map(|(key, value)| entry_size(key, value))
            .sum()
    }
}

impl StorageBackend for MemoryStorage {
    type Error = MemoryStorageError;

    fn length(&self) -> Result<usize, Self::Error> {
        Ok(self.data.borrow().len())
    }

    fn key(&self, index: usize) -> Result<Option<String>, Self::Error> {
        Ok(self.data.borrow().keys().nth(index).cloned())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        if let Some(quota) = self.quota {
            let replaced = self
                .data
                .borrow()
                .get(key)
                .map_or(0, |old| entry_size(key, old));
            let required = self.usage() - replaced + entry_size(key, value);

            if required > quota {
                tracing::warn!(key, required, quota, "write rejected: storage quota exceeded");
                return Err(MemoryStorageError::QuotaExceeded { required, quota });
            }
        }

        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), Self::Error> {
        self.data.borrow_mut().clear();
        Ok(())
    }
}

fn entry_size(key: &str, value: &str) -> usize {
    key.encode_utf16().count() + value.encode_utf16().count()
}
