use std::rc::Rc;

use eventful_storage::{StorageArea, StorageAreas, StorageBackend};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::DomException;

use crate::WebStorageError;

impl From<JsValue> for WebStorageError {
    fn from(value: JsValue) -> Self {
        match value.dyn_ref::<DomException>() {
            Some(exception) => WebStorageError::Exception {
                name: exception.name(),
                message: exception.message(),
            },
            None => WebStorageError::Exception {
                name: "Error".to_string(),
                message: value.as_string().unwrap_or_else(|| format!("{:?}", value)),
            },
        }
    }
}

/// Backend over one of the window's `Storage` objects.
pub struct WebStorage {
    inner: web_sys::Storage,
}

impl WebStorage {
    pub fn new(inner: web_sys::Storage) -> Self {
        Self { inner }
    }

    pub fn open(area: StorageArea) -> Result<Self, WebStorageError> {
        let window = web_sys::window().ok_or(WebStorageError::NoWindow)?;
        let storage = match area {
            StorageArea::Local => window.local_storage()?,
            StorageArea::Session => window.session_storage()?,
        };

        tracing::debug!(area = area.host_name(), available = storage.is_some(), "opened storage area");

        storage
            .map(Self::new)
            .ok_or(WebStorageError::Unavailable(area.host_name()))
    }
}

impl StorageBackend for WebStorage {
    type Error = WebStorageError;

    fn length(&self) -> Result<usize, Self::Error> {
        Ok(self.inner.length()? as usize)
    }

    fn key(&self, index: usize) -> Result<Option<String>, Self::Error> {
        match u32::try_from(index) {
            Ok(index) => Ok(self.inner.key(index)?),
            Err(_) => Ok(None),
        }
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.inner.get_item(key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Ok(self.inner.set_item(key, value)?)
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        Ok(self.inner.remove_item(key)?)
    }

    fn clear(&self) -> Result<(), Self::Error> {
        Ok(self.inner.clear()?)
    }
}

/// Facades over `window.localStorage` and `window.sessionStorage`.
pub fn window_storage_areas() -> Result<StorageAreas<WebStorage>, WebStorageError> {
    Ok(StorageAreas::new(
        Rc::new(WebStorage::open(StorageArea::Local)?),
        Rc::new(WebStorage::open(StorageArea::Session)?),
    ))
}
