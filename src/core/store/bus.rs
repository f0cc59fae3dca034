//! Per-resource subscriber registry.
//!
//! Listeners are stored with a stable id so a [`Subscription`] handle can
//! remove exactly the listener it registered. Dispatch snapshots the
//! listener list first, so callbacks may subscribe or unsubscribe while
//! a notification is running.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::utils::log;

/// Callback invoked with a fresh clone of the hydrated value.
///
/// An `Err` is logged and does not stop sibling listeners.
pub type Listener = Rc<dyn Fn(Value) -> Result<(), String>>;

pub(crate) type ListenerId = u64;

#[derive(Default)]
struct BusInner {
    next_id: Cell<ListenerId>,
    listeners: RefCell<HashMap<String, Vec<(ListenerId, Listener)>>>,
}

/// Subscriber sets keyed by resource name.
#[derive(Clone, Default)]
pub struct SubscriptionBus {
    inner: Rc<BusInner>,
}

impl SubscriptionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `name`.
    pub fn add(&self, name: &str, listener: Listener) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .entry(name.to_string())
            .or_default()
            .push((id, listener));

        Subscription {
            bus: Rc::downgrade(&self.inner),
            name: name.to_string(),
            id,
        }
    }

    /// Whether the listener behind `subscription` is still registered.
    pub fn is_active(&self, subscription: &Subscription) -> bool {
        self.contains(&subscription.name, subscription.id)
    }

    pub(crate) fn contains(&self, name: &str, id: ListenerId) -> bool {
        self.inner
            .listeners
            .borrow()
            .get(name)
            .is_some_and(|group| group.iter().any(|(listener_id, _)| *listener_id == id))
    }

    /// Number of listeners registered for `name`.
    pub fn len(&self, name: &str) -> usize {
        self.inner
            .listeners
            .borrow()
            .get(name)
            .map_or(0, Vec::len)
    }

    /// Call every listener of `name` with its own clone of `snapshot`.
    pub fn notify(&self, name: &str, snapshot: &Value) {
        let listeners: Vec<Listener> = match self.inner.listeners.borrow().get(name) {
            Some(group) => group.iter().map(|(_, l)| Rc::clone(l)).collect(),
            None => return,
        };

        for listener in listeners {
            if let Err(err) = listener(snapshot.clone()) {
                log::warn(&format!(
                    "store: subscriber callback for \"{}\" failed: {}",
                    name, err
                ));
            }
        }
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle does not unsubscribe; the listener stays registered
/// until [`Subscription::unsubscribe`] is called.
#[derive(Debug)]
pub struct Subscription {
    bus: Weak<BusInner>,
    name: String,
    id: ListenerId,
}

impl Subscription {
    /// Resource name this subscription listens to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener. Empty subscriber sets are dropped.
    pub fn unsubscribe(self) {
        let Some(bus) = self.bus.upgrade() else {
            return;
        };
        let mut listeners = bus.listeners.borrow_mut();
        if let Some(group) = listeners.get_mut(&self.name) {
            group.retain(|(id, _)| *id != self.id);
            if group.is_empty() {
                listeners.remove(&self.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recorder() -> (Rc<RefCell<Vec<Value>>>, Listener) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let listener: Listener = Rc::new(move |v| {
            sink.borrow_mut().push(v);
            Ok(())
        });
        (seen, listener)
    }

    #[test]
    fn test_notify_reaches_all_listeners() {
        let bus = SubscriptionBus::new();
        let (a, la) = recorder();
        let (b, lb) = recorder();
        bus.add("clips", la);
        bus.add("clips", lb);

        bus.notify("clips", &json!([1]));
        assert_eq!(*a.borrow(), vec![json!([1])]);
        assert_eq!(*b.borrow(), vec![json!([1])]);
    }

    #[test]
    fn test_failing_listener_is_isolated() {
        let bus = SubscriptionBus::new();
        let (seen, listener) = recorder();
        bus.add("clips", Rc::new(|_| Err("boom".to_string())));
        bus.add("clips", listener);

        bus.notify("clips", &json!([]));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribe_drops_empty_group() {
        let bus = SubscriptionBus::new();
        let (seen, listener) = recorder();
        let sub = bus.add("rail", listener);
        assert_eq!(bus.len("rail"), 1);
        assert!(bus.is_active(&sub));

        sub.unsubscribe();
        assert_eq!(bus.len("rail"), 0);
        bus.notify("rail", &json!({}));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_only_removes_own_listener() {
        let bus = SubscriptionBus::new();
        let (a, la) = recorder();
        let (b, lb) = recorder();
        let sub_a = bus.add("rail", la);
        bus.add("rail", lb);

        sub_a.unsubscribe();
        bus.notify("rail", &json!(1));
        assert!(a.borrow().is_empty());
        assert_eq!(b.borrow().len(), 1);
    }

    #[test]
    fn test_listener_can_subscribe_during_notify() {
        let bus = SubscriptionBus::new();
        let inner_bus = bus.clone();
        bus.add(
            "clips",
            Rc::new(move |_| {
                inner_bus.add("clips", Rc::new(|_| Ok(())));
                Ok(())
            }),
        );

        bus.notify("clips", &json!([]));
        assert_eq!(bus.len("clips"), 2);
    }
}
