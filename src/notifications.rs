//! Typed publish/subscribe for host notifications.
//!
//! Delivery is synchronous, per kind, in registration order.

use std::collections::HashMap;

use crate::data_types::Event;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Zoom,
    Move,
    Select,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    /// New zoom level after an effective zoom change.
    Zoom(f64),
    /// New center time.
    Move(f64),
    /// A singleton marker was activated.
    Select(Event),
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Zoom(_) => NotificationKind::Zoom,
            Self::Move(_) => NotificationKind::Move,
            Self::Select(_) => NotificationKind::Select,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&Notification) + Send>;

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    handlers: HashMap<NotificationKind, Vec<(SubscriptionId, Handler)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: NotificationKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Removes a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(pos) = handlers.iter().position(|(h_id, _)| *h_id == id) {
                drop(handlers.remove(pos));
                return true;
            }
        }
        false
    }

    pub fn emit(&mut self, notification: &Notification) {
        if let Some(handlers) = self.handlers.get_mut(&notification.kind()) {
            for (_, handler) in handlers.iter_mut() {
                handler(notification);
            }
        }
    }

    pub fn subscriber_count(&self, kind: NotificationKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<_, _> = self
            .handlers
            .iter()
            .map(|(kind, handlers)| (*kind, handlers.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("subscribers", &counts)
            .finish()
    }
}
