use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{Event, Listener};

struct Registration {
    event_type: String,
    listener: Listener,
    removed: Cell<bool>,
}

/// Ordered listener registry with event-target semantics.
#[derive(Default)]
pub struct EventTarget {
    registrations: RefCell<Vec<Rc<Registration>>>,
}

impl EventTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering the same listener twice for one type is a no-op.
    pub fn add_event_listener(&self, event_type: &str, listener: Listener) {
        let mut registrations = self.registrations.borrow_mut();
        if registrations
            .iter()
            .any(|r| r.event_type == event_type && r.listener == listener)
        {
            return;
        }

        registrations.push(Rc::new(Registration {
            event_type: event_type.to_string(),
            listener,
            removed: Cell::new(false),
        }));
    }

    pub fn remove_event_listener(&self, event_type: &str, listener: &Listener) {
        let mut registrations = self.registrations.borrow_mut();
        if let Some(index) = registrations
            .iter()
            .position(|r| r.event_type == event_type && r.listener == *listener)
        {
            // An in-flight dispatch may still hold this registration.
            registrations.remove(index).removed.set(true);
        }
    }

    /// Invokes listeners for the event's type in registration order.
    ///
    /// Returns `false` when a cancelable event had its default prevented.
    pub fn dispatch_event(&self, event: &Event) -> bool {
        let snapshot: Vec<Rc<Registration>> = self
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.event_type == event.event_type())
            .cloned()
            .collect();

        for registration in snapshot {
            if !registration.removed.get() {
                registration.listener.call(event);
            }
        }

        !event.default_prevented()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Listener {
        let log = log.clone();
        Listener::new(move |_| log.borrow_mut().push(name))
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let target = EventTarget::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        target.add_event_listener("test", recording(&log, "first"));
        target.add_event_listener("other", recording(&log, "other"));
        target.add_event_listener("test", recording(&log, "second"));

        assert!(target.dispatch_event(&Event::new("test")));
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let target = EventTarget::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let listener = recording(&log, "once");

        target.add_event_listener("test", listener.clone());
        target.add_event_listener("test", listener.clone());

        target.dispatch_event(&Event::new("test"));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_remove_listener() {
        let target = EventTarget::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let removed = recording(&log, "removed");

        target.add_event_listener("test", removed.clone());
        target.add_event_listener("test", recording(&log, "kept"));
        target.remove_event_listener("test", &removed);
        // Unknown pairs are ignored
        target.remove_event_listener("other", &removed);

        target.dispatch_event(&Event::new("test"));
        assert_eq!(*log.borrow(), vec!["kept"]);
    }

    #[test]
    fn test_removed_during_dispatch_not_invoked() {
        let target = Rc::new(EventTarget::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let late = recording(&log, "late");

        let remover = {
            let target = target.clone();
            let late = late.clone();
            let log = log.clone();
            Listener::new(move |event| {
                log.borrow_mut().push("remover");
                target.remove_event_listener(event.event_type(), &late);
            })
        };

        target.add_event_listener("test", remover);
        target.add_event_listener("test", late);

        target.dispatch_event(&Event::new("test"));
        assert_eq!(*log.borrow(), vec!["remover"]);
    }

    #[test]
    fn test_added_during_dispatch_waits_for_next_event() {
        let target = Rc::new(EventTarget::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let added = recording(&log, "added");

        let adder = {
            let target = target.clone();
            Listener::new(move |event| target.add_event_listener(event.event_type(), added.clone()))
        };
        target.add_event_listener("test", adder);

        target.dispatch_event(&Event::new("test"));
        assert!(log.borrow().is_empty());

        target.dispatch_event(&Event::new("test"));
        assert_eq!(*log.borrow(), vec!["added"]);
    }

    #[test]
    fn test_dispatch_reports_prevented_default() {
        let target = EventTarget::new();
        target.add_event_listener("test", Listener::new(|event| event.prevent_default()));

        assert!(!target.dispatch_event(&Event::new("test").with_cancelable(true)));
        assert!(target.dispatch_event(&Event::new("test")));
    }
}
