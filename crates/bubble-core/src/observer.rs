// File: crates/bubble-core/src/observer.rs
// Summary: Micro-observer; named publish/subscribe channels held by an explicit registry.
// Notes:
// - Single-threaded: channels use `RefCell` and handlers are `Rc`, so handlers may call
//   `on`/`off`/`send` on the same channel while a delivery is in progress.
// - `send` delivers to a snapshot taken before the first handler runs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use anyhow::Result;
use tracing::{debug, trace};

/// Notification handler. Identity is the `Rc` allocation, so keep a clone to unsubscribe later.
pub type Handler<T> = Rc<dyn Fn(&T) -> Result<()>>;
/// Returns `false` to keep one handler from seeing a notification.
pub type Predicate<T> = Rc<dyn Fn(&T) -> bool>;

pub fn handler<T, F>(f: F) -> Handler<T>
where
    F: Fn(&T) -> Result<()> + 'static,
{
    Rc::new(f)
}

pub fn predicate<T, F>(f: F) -> Predicate<T>
where
    F: Fn(&T) -> bool + 'static,
{
    Rc::new(f)
}

struct Subscription<T> {
    handler: Handler<T>,
    predicate: Option<Predicate<T>>,
}

impl<T> Clone for Subscription<T> {
    fn clone(&self) -> Self {
        Self { handler: Rc::clone(&self.handler), predicate: self.predicate.clone() }
    }
}

/// One independent event bus: notification name -> ordered subscriptions.
pub struct Channel<T> {
    name: String,
    notifications: RefCell<HashMap<String, Vec<Subscription<T>>>>,
}

impl<T> Channel<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), notifications: RefCell::new(HashMap::new()) }
    }

    pub fn name(&self) -> &str { &self.name }

    /// Append `handler` under `notify`. Registering the same handler twice makes it fire twice.
    pub fn on(&self, notify: &str, handler: Handler<T>) {
        self.subscribe(notify, handler, None);
    }

    /// Like [`Channel::on`], but the handler only runs when `predicate` allows the payload.
    pub fn on_filtered(&self, notify: &str, handler: Handler<T>, predicate: Predicate<T>) {
        self.subscribe(notify, handler, Some(predicate));
    }

    fn subscribe(&self, notify: &str, handler: Handler<T>, predicate: Option<Predicate<T>>) {
        let mut map = self.notifications.borrow_mut();
        let list = map.entry(notify.to_string()).or_default();
        list.push(Subscription { handler, predicate });
        trace!(channel = %self.name, notify, subscribers = list.len(), "subscribed");
    }

    /// Drop every subscription on this channel.
    pub fn off_all(&self) {
        self.notifications.borrow_mut().clear();
        debug!(channel = %self.name, "all subscriptions removed");
    }

    /// Drop every subscription under `notify`. Returns how many were removed.
    pub fn off_notification(&self, notify: &str) -> usize {
        let removed = self.notifications.borrow_mut().remove(notify).map_or(0, |list| list.len());
        debug!(channel = %self.name, notify, removed, "notification cleared");
        removed
    }

    /// Remove the first registration of `handler` under `notify`; later duplicates stay.
    /// Returns whether anything was removed.
    pub fn off(&self, notify: &str, handler: &Handler<T>) -> bool {
        let mut map = self.notifications.borrow_mut();
        let Some(list) = map.get_mut(notify) else { return false };
        match list.iter().position(|s| Rc::ptr_eq(&s.handler, handler)) {
            Some(pos) => {
                list.remove(pos);
                trace!(channel = %self.name, notify, subscribers = list.len(), "unsubscribed");
                true
            }
            None => false,
        }
    }

    /// Deliver `payload` to every subscriber of `notify`, in registration order.
    ///
    /// The first handler error stops delivery and is returned; handlers after it do not run.
    pub fn send(&self, notify: &str, payload: &T) -> Result<()> {
        let snapshot: Vec<Subscription<T>> = {
            let map = self.notifications.borrow();
            match map.get(notify) {
                Some(list) => list.clone(),
                None => return Ok(()),
            }
        };
        trace!(channel = %self.name, notify, subscribers = snapshot.len(), "send");
        for sub in &snapshot {
            let allowed = sub.predicate.as_ref().map_or(true, |p| p(payload));
            if allowed {
                (sub.handler)(payload)?;
            }
        }
        Ok(())
    }

    pub fn subscriber_count(&self, notify: &str) -> usize {
        self.notifications.borrow().get(notify).map_or(0, |list| list.len())
    }

    /// Notification names with at least one registration list (possibly emptied by `off`).
    pub fn notifications(&self) -> Vec<String> {
        let mut names: Vec<String> = self.notifications.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("notifications", &self.notifications())
            .finish()
    }
}

/// Name-keyed set of channels. Producers and consumers only share the name.
pub struct ObserverRegistry<T> {
    channels: RefCell<HashMap<String, Rc<Channel<T>>>>,
}

impl<T> ObserverRegistry<T> {
    pub fn new() -> Self {
        Self { channels: RefCell::new(HashMap::new()) }
    }

    /// Return the channel called `name`, creating it on first lookup.
    pub fn get(&self, name: &str) -> Rc<Channel<T>> {
        if let Some(channel) = self.channels.borrow().get(name) {
            return Rc::clone(channel);
        }
        self.create(name)
    }

    /// Install a fresh channel under `name`, replacing any existing one.
    ///
    /// Holders of the replaced `Rc<Channel>` keep a detached channel: its subscribers stay
    /// reachable through that handle only, and `get(name)` no longer returns it.
    pub fn create(&self, name: &str) -> Rc<Channel<T>> {
        let channel = Rc::new(Channel::new(name));
        self.channels.borrow_mut().insert(name.to_string(), Rc::clone(&channel));
        debug!(channel = name, "channel created");
        channel
    }

    pub fn contains(&self, name: &str) -> bool { self.channels.borrow().contains_key(name) }

    pub fn len(&self) -> usize { self.channels.borrow().len() }

    pub fn is_empty(&self) -> bool { self.channels.borrow().is_empty() }
}

impl<T> Default for ObserverRegistry<T> {
    fn default() -> Self { Self::new() }
}
