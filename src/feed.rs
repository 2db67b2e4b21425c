// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Push-style "current list" publisher with scoped subscriptions.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

type Listener<T> = Box<dyn FnMut(&[T]) + Send>;

struct Inner<T> {
    next_id: u64,
    current: Vec<T>,
    listeners: BTreeMap<u64, Listener<T>>,
}

/// Holds the latest snapshot and fans every new one out to its listeners.
///
/// Listeners run while the feed is locked, so they must not call back into it.
pub struct Feed<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

/// Keeps a listener attached. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}

fn lock<T>(m: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: Clone + Send + 'static> Feed<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_id: 0,
                current: Vec::new(),
                listeners: BTreeMap::new(),
            })),
        }
    }

    /// Registers `listener` and immediately hands it the current snapshot.
    pub fn subscribe<F>(&self, mut listener: F) -> Subscription
    where
        F: FnMut(&[T]) + Send + 'static,
    {
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        listener(&inner.current);
        inner.listeners.insert(id, Box::new(listener));

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).listeners.remove(&id);
                }
            })),
        }
    }

    pub fn publish(&self, snapshot: Vec<T>) {
        let mut inner = lock(&self.inner);
        inner.current = snapshot;
        let Inner {
            current, listeners, ..
        } = &mut *inner;
        for listener in listeners.values_mut() {
            listener(current.as_slice());
        }
    }

    pub fn current(&self) -> Vec<T> {
        lock(&self.inner).current.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }
}

impl<T: Clone + Send + 'static> Default for Feed<T> {
    fn default() -> Self {
        Self::new()
    }
}
