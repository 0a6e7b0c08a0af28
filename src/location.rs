//! Device location observation
//!
//! [`ObservableLocation`] is the in-process [`LocationSource`]: the host
//! publishes fixes and every subscriber is called back on the same thread.
//! [`ChannelLocationFeed`] accepts fixes from another thread and republishes
//! them when the owning thread calls [`ChannelLocationFeed::pump`].

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use crossbeam_channel::{Receiver, Sender};
use fxhash::FxHashMap;

use crate::{core::geo::LatLng, macros::map_trace, traits::LocationSource};

type Callback = Rc<RefCell<Box<dyn FnMut(Option<LatLng>)>>>;

/// Handle for a registered location callback. Dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unsubscribes now instead of at drop
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[derive(Default)]
struct Registry {
    current: Option<LatLng>,
    next_id: u64,
    subscribers: FxHashMap<u64, Callback>,
}

/// Location value with push notification to subscribers
#[derive(Clone, Default)]
pub struct ObservableLocation {
    registry: Rc<RefCell<Registry>>,
}

impl ObservableLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(location: LatLng) -> Self {
        let observable = Self::new();
        observable.registry.borrow_mut().current = Some(location);
        observable
    }

    /// Stores `location` and notifies every subscriber.
    pub fn publish(&self, location: Option<LatLng>) {
        let callbacks: Vec<Callback> = {
            let mut registry = self.registry.borrow_mut();
            registry.current = location;
            registry.subscribers.values().cloned().collect()
        };
        map_trace!(
            "publishing location {:?} to {} subscribers",
            location,
            callbacks.len()
        );
        // Registry borrow is released so callbacks may subscribe or unsubscribe.
        for callback in callbacks {
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (*callback)(location);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().subscribers.len()
    }
}

impl LocationSource for ObservableLocation {
    fn current(&self) -> Option<LatLng> {
        self.registry.borrow().current
    }

    fn subscribe(&self, callback: Box<dyn FnMut(Option<LatLng>)>) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry
                .subscribers
                .insert(id, Rc::new(RefCell::new(callback)));
            id
        };

        let registry: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                if let Ok(mut registry) = registry.try_borrow_mut() {
                    registry.subscribers.remove(&id);
                }
            }
        })
    }
}

impl fmt::Debug for ObservableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("ObservableLocation")
            .field("current", &registry.current)
            .field("subscribers", &registry.subscribers.len())
            .finish()
    }
}

/// Sending half of a [`ChannelLocationFeed`]; can be moved to a location thread.
#[derive(Debug, Clone)]
pub struct LocationSender {
    tx: Sender<Option<LatLng>>,
}

impl LocationSender {
    /// Queues a fix. Returns false once the feed has been dropped.
    pub fn send(&self, location: Option<LatLng>) -> bool {
        self.tx.send(location).is_ok()
    }
}

/// Location source fed over a channel, drained on the owning thread
#[derive(Debug)]
pub struct ChannelLocationFeed {
    rx: Receiver<Option<LatLng>>,
    observable: ObservableLocation,
}

impl ChannelLocationFeed {
    pub fn new() -> (LocationSender, Self) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (
            LocationSender { tx },
            Self {
                rx,
                observable: ObservableLocation::new(),
            },
        )
    }

    /// Drains queued fixes and publishes the latest one. Returns how many
    /// fixes were drained.
    pub fn pump(&self) -> usize {
        let mut drained = 0;
        let mut latest = None;
        while let Ok(location) = self.rx.try_recv() {
            drained += 1;
            latest = Some(location);
        }
        if let Some(location) = latest {
            self.observable.publish(location);
        }
        drained
    }
}

impl LocationSource for ChannelLocationFeed {
    fn current(&self) -> Option<LatLng> {
        self.observable.current()
    }

    fn subscribe(&self, callback: Box<dyn FnMut(Option<LatLng>)>) -> Subscription {
        self.observable.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_publish_reaches_subscribers() {
        let source = ObservableLocation::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _subscription = source.subscribe(Box::new(move |location| {
            sink.borrow_mut().push(location);
        }));

        source.publish(None);
        source.publish(Some(LatLng::new(1.0, 2.0)));

        assert_eq!(*seen.borrow(), vec![None, Some(LatLng::new(1.0, 2.0))]);
        assert_eq!(source.current(), Some(LatLng::new(1.0, 2.0)));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let source = ObservableLocation::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = source.subscribe(Box::new(move |_| counter.set(counter.get() + 1)));
        assert_eq!(source.subscriber_count(), 1);

        source.publish(Some(LatLng::new(0.0, 0.0)));
        drop(subscription);
        source.publish(Some(LatLng::new(1.0, 1.0)));

        assert_eq!(calls.get(), 1);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outlives_source() {
        let source = ObservableLocation::new();
        let subscription = source.subscribe(Box::new(|_| {}));
        drop(source);
        subscription.cancel();
    }

    #[test]
    fn test_channel_feed_publishes_latest() {
        let (sender, feed) = ChannelLocationFeed::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _subscription = feed.subscribe(Box::new(move |location| {
            sink.borrow_mut().push(location);
        }));

        let worker = std::thread::spawn(move || {
            sender.send(Some(LatLng::new(1.0, 1.0)));
            sender.send(Some(LatLng::new(2.0, 2.0)));
        });
        worker.join().unwrap();

        assert_eq!(feed.pump(), 2);
        assert_eq!(*seen.borrow(), vec![Some(LatLng::new(2.0, 2.0))]);
        assert_eq!(feed.pump(), 0);
        assert_eq!(feed.current(), Some(LatLng::new(2.0, 2.0)));
    }

    #[test]
    fn test_sender_reports_dropped_feed() {
        let (sender, feed) = ChannelLocationFeed::new();
        drop(feed);
        assert!(!sender.send(None));
    }
}
