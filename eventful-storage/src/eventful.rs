use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{ChangeRecord, Event, EventTarget, Listener};
use crate::storage::StorageBackend;
use crate::value::StorageValue;

/// Property name of the single-handler slot
pub const HANDLER_PROPERTY: &str = "onstorage";

const LENGTH_PROPERTY: &str = "length";

/// Callable members of a storage facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    Clear,
    GetItem,
    Key,
    RemoveItem,
    SetItem,
    AddEventListener,
    RemoveEventListener,
    DispatchEvent,
}

impl Member {
    pub const ALL: [Member; 8] = [
        Member::Clear,
        Member::GetItem,
        Member::Key,
        Member::RemoveItem,
        Member::SetItem,
        Member::AddEventListener,
        Member::RemoveEventListener,
        Member::DispatchEvent,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|member| member.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Member::Clear => "clear",
            Member::GetItem => "getItem",
            Member::Key => "key",
            Member::RemoveItem => "removeItem",
            Member::SetItem => "setItem",
            Member::AddEventListener => "addEventListener",
            Member::RemoveEventListener => "removeEventListener",
            Member::DispatchEvent => "dispatchEvent",
        }
    }

    /// Members served by the facade's own listener registry rather than the backend.
    ///
    /// The host object has no such members, so entries under these names can
    /// be written and deleted through property access.
    pub fn is_event_target(&self) -> bool {
        matches!(
            self,
            Member::AddEventListener | Member::RemoveEventListener | Member::DispatchEvent
        )
    }
}

/// Result of reading a property by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Method(Member),
    Length(usize),
    Handler(Option<Listener>),
    Value(StorageValue),
}

/// Observable view over a storage area.
///
/// Every value-level change made through the facade, by formal method or by
/// property access, is dispatched as a [`STORAGE_EVENT`](crate::STORAGE_EVENT)
/// to the registered listeners and then to the `onstorage` handler. Writes
/// that leave the value unchanged notify nobody. `clear` never notifies.
///
/// Listeners run synchronously inside the mutating call. A listener that
/// writes to the same facade re-enters this path; bounding that recursion is
/// up to the listener.
pub struct EventfulStorage<B: StorageBackend> {
    backend: Rc<B>,
    target: EventTarget,
    onstorage: RefCell<Option<Listener>>,
}

impl<B: StorageBackend> EventfulStorage<B> {
    pub fn new(backend: Rc<B>) -> Self {
        Self {
            backend,
            target: EventTarget::new(),
            onstorage: RefCell::new(None),
        }
    }

    /// Wrapped storage area
    pub fn backend(&self) -> &Rc<B> {
        &self.backend
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, B::Error> {
        self.backend.get_item(key)
    }

    /// Stores the string form of `value` and notifies if the stored value changed.
    pub fn set_item(&self, key: &str, value: impl ToString) -> Result<(), B::Error> {
        let value = value.to_string();
        self.track_item(key, |backend| backend.set_item(key, &value))
    }

    pub fn remove_item(&self, key: &str) -> Result<(), B::Error> {
        self.track_item(key, |backend| backend.remove_item(key))
    }

    pub fn clear(&self) -> Result<(), B::Error> {
        self.backend.clear()
    }

    pub fn length(&self) -> Result<usize, B::Error> {
        self.backend.length()
    }

    pub fn key(&self, index: usize) -> Result<Option<String>, B::Error> {
        self.backend.key(index)
    }

    pub fn add_event_listener(&self, event_type: &str, listener: Listener) {
        self.target.add_event_listener(event_type, listener)
    }

    pub fn remove_event_listener(&self, event_type: &str, listener: &Listener) {
        self.target.remove_event_listener(event_type, listener)
    }

    pub fn dispatch_event(&self, event: &Event) -> bool {
        self.target.dispatch_event(event)
    }

    pub fn onstorage(&self) -> Option<Listener> {
        self.onstorage.borrow().clone()
    }

    pub fn set_onstorage(&self, handler: Option<Listener>) {
        *self.onstorage.borrow_mut() = handler;
    }

    /// Reads a property by name.
    ///
    /// Member names and `length` shadow entries of the same name, as they do
    /// on the host object.
    pub fn get(&self, name: &str) -> Result<Property, B::Error> {
        if name == HANDLER_PROPERTY {
            return Ok(Property::Handler(self.onstorage()));
        }
        if let Some(member) = Member::from_name(name) {
            return Ok(Property::Method(member));
        }
        if name == LENGTH_PROPERTY {
            return Ok(Property::Length(self.length()?));
        }

        Ok(Property::Value(self.read_property(name)?))
    }

    /// Assigns a property by name.
    ///
    /// Assignments to backend methods and `length` are accepted and ignored. Assigning
    /// a value to `onstorage` clears the handler, since a string is not
    /// callable; use [`set_onstorage`](Self::set_onstorage) to install one.
    pub fn set(&self, name: &str, value: impl ToString) -> Result<bool, B::Error> {
        if is_backend_member(name) {
            tracing::debug!(property = name, "ignored assignment to storage member");
            return Ok(true);
        }
        if name == HANDLER_PROPERTY {
            self.set_onstorage(None);
            return Ok(true);
        }

        let value = value.to_string();
        let old_value = self.read_property(name)?;
        self.backend.set_item(name, &value)?;
        let new_value = self.read_property(name)?;
        self.notify(name, old_value, new_value);

        Ok(true)
    }

    /// Deletes a property by name. Backend methods and `length` cannot be deleted.
    pub fn delete(&self, name: &str) -> Result<bool, B::Error> {
        if is_backend_member(name) {
            return Ok(true);
        }

        let old_value = self.read_property(name)?;
        self.backend.remove_item(name)?;
        let new_value = self.read_property(name)?;
        self.notify(name, old_value, new_value);

        Ok(true)
    }

    fn read_property(&self, name: &str) -> Result<StorageValue, B::Error> {
        Ok(StorageValue::from_property(self.backend.get_item(name)?))
    }

    fn track_item<F>(&self, key: &str, operation: F) -> Result<(), B::Error>
    where
        F: FnOnce(&B) -> Result<(), B::Error>,
    {
        let old_value = StorageValue::from_item(self.backend.get_item(key)?);
        operation(&self.backend)?;
        let new_value = StorageValue::from_item(self.backend.get_item(key)?);
        self.notify(key, old_value, new_value);

        Ok(())
    }

    fn notify(&self, key: &str, old_value: StorageValue, new_value: StorageValue) {
        if old_value == new_value {
            tracing::trace!(key, "value unchanged, no notification");
            return;
        }

        tracing::debug!(key, %old_value, %new_value, "storage changed");

        let event = Event::storage(ChangeRecord::new(key, old_value, new_value));
        self.target.dispatch_event(&event);

        // Cloned out so the handler may reassign the slot.
        if let Some(handler) = self.onstorage() {
            handler.call(&event);
        }
    }
}

/// Names the host object itself defines: its methods and `length`.
fn is_backend_member(name: &str) -> bool {
    name == LENGTH_PROPERTY
        || Member::from_name(name).is_some_and(|member| !member.is_event_target())
}
