//! Push-based reactive reads.
//!
//! A [`Topic`] keeps the latest snapshot and fans it out to observers. Each
//! observer is held through a [`Subscription`]; once cancelled (explicitly or by
//! dropping the handle) the observer never sees another value, even one that was
//! already being published when the cancel happened.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) type Observer<T> = Arc<dyn Fn(T) + Send + Sync>;

pub(crate) struct Subscription {
    live: Arc<AtomicBool>,
    on_cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(live: Arc<AtomicBool>, on_cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            live,
            on_cancel: Some(Box::new(on_cancel)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.live.store(false, Ordering::SeqCst);
        if let Some(f) = self.on_cancel.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

struct TopicInner<T> {
    next_id: u64,
    latest: Option<T>,
    observers: BTreeMap<u64, Observer<T>>,
}

pub(crate) struct Topic<T> {
    inner: Arc<Mutex<TopicInner<T>>>,
}

impl<T> Clone for Topic<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Topic<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TopicInner {
                next_id: 0,
                latest: None,
                observers: BTreeMap::new(),
            })),
        }
    }
}

impl<T: Clone + Send + 'static> Topic<T> {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer`. If a snapshot was already published it is replayed
    /// immediately so late subscribers never sit in a loading state.
    pub fn subscribe(&self, observer: Observer<T>) -> Subscription {
        let live = Arc::new(AtomicBool::new(true));

        let gated: Observer<T> = {
            let live = Arc::clone(&live);
            Arc::new(move |value: T| {
                if live.load(Ordering::SeqCst) {
                    observer(value);
                }
            })
        };

        let (id, replay) = {
            let Ok(mut inner) = self.inner.lock() else {
                return Subscription::new(live, || {});
            };
            let id = inner.next_id;
            inner.next_id += 1;
            inner.observers.insert(id, Arc::clone(&gated));
            (id, inner.latest.clone())
        };

        if let Some(value) = replay {
            gated(value);
        }

        let inner = Arc::downgrade(&self.inner);
        Subscription::new(live, move || {
            if let Some(inner) = inner.upgrade() {
                if let Ok(mut inner) = inner.lock() {
                    inner.observers.remove(&id);
                }
            }
        })
    }

    /// Stores `value` as the latest snapshot and delivers it to every observer.
    /// Observers run outside the lock, so they may subscribe or cancel freely.
    pub fn publish(&self, value: T) {
        let observers: Vec<Observer<T>> = {
            let Ok(mut inner) = self.inner.lock() else {
                return;
            };
            inner.latest = Some(value.clone());
            inner.observers.values().cloned().collect()
        };

        for observer in observers {
            observer(value.clone());
        }
    }

    pub fn latest(&self) -> Option<T> {
        self.inner.lock().ok().and_then(|i| i.latest.clone())
    }

    #[cfg(test)]
    pub fn observer_count(&self) -> usize {
        self.inner.lock().map(|i| i.observers.len()).unwrap_or(0)
    }
}
