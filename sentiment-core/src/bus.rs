use std::cell::RefCell;
use std::rc::Rc;

use crate::theme::Theme;

pub type SubscriptionId = u32;

type Listener<T> = Rc<dyn Fn(&T)>;

struct BusInner<T> {
    next_id: SubscriptionId,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

/// Single-threaded publish/subscribe channel. Clones share the same listener set.
pub struct EventBus<T> {
    inner: Rc<RefCell<BusInner<T>>>,
}

/// Theme change notifications: the controller publishes, renderers subscribe.
pub type ThemeBus = EventBus<Theme>;

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner {
                next_id: 1,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id = inner.next_id.wrapping_add(1);
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.listeners.iter().position(|(lid, _)| *lid == id) {
            Some(idx) => {
                inner.listeners.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Deliver `event` to the listeners registered when the publish started.
    pub fn publish(&self, event: &T) {
        let listeners: Vec<Listener<T>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn every_subscriber_sees_each_publish() {
        let bus = ThemeBus::new();
        let seen_a = Rc::new(RefCell::new(Vec::new()));
        let seen_b = Rc::new(Cell::new(0));
        {
            let seen_a = seen_a.clone();
            bus.subscribe(move |t| seen_a.borrow_mut().push(*t));
        }
        {
            let seen_b = seen_b.clone();
            bus.subscribe(move |_| seen_b.set(seen_b.get() + 1));
        }
        bus.publish(&Theme::Dark);
        bus.publish(&Theme::Light);
        assert_eq!(*seen_a.borrow(), vec![Theme::Dark, Theme::Light]);
        assert_eq!(seen_b.get(), 2);
    }

    #[test]
    fn unsubscribed_listener_is_silent() {
        let bus = ThemeBus::new();
        let hits = Rc::new(Cell::new(0));
        let id = {
            let hits = hits.clone();
            bus.subscribe(move |_| hits.set(hits.get() + 1))
        };
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&Theme::Dark);
        assert_eq!(hits.get(), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn listener_may_subscribe_during_publish() {
        let bus = ThemeBus::new();
        let late_hits = Rc::new(Cell::new(0));
        {
            let bus_inner = bus.clone();
            let late_hits = late_hits.clone();
            bus.subscribe(move |_| {
                let late_hits = late_hits.clone();
                bus_inner.subscribe(move |_| late_hits.set(late_hits.get() + 1));
            });
        }
        bus.publish(&Theme::Dark);
        assert_eq!(late_hits.get(), 0);
        bus.publish(&Theme::Light);
        assert_eq!(late_hits.get(), 1);
        assert_eq!(bus.subscriber_count(), 3);
    }
}
