// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissal: outside pointer activity, Escape, and scoped listener subscriptions.
//!
//! The predicates here are pure; the controller decides what to do with a
//! `true` result (always: request close).
//!
//! Global listeners are represented by a [`Subscription`] returned from
//! [`DismissalWatcher::install`]. The controller owns it for exactly the open
//! interval and hands it back with [`Subscription::release`], so closed
//! overlays never keep document-level listeners alive.
//!
//! ## Nested overlays
//!
//! An overlay opened from inside another overlay must treat its ancestors as
//! "inside"; otherwise a click in the outer overlay would dismiss the inner
//! one and vice versa. Register ancestor roots with [`DismissalWatcher::exclude`].

use smallvec::SmallVec;

use crate::event::Key;
use crate::host::{Containment, ListenerHost, ListenerSet};

/// Outside-pointer and Escape detection for one overlay.
#[derive(Clone, Debug)]
pub struct DismissalWatcher<K> {
    overlay: K,
    trigger: K,
    excluded: SmallVec<[K; 2]>,
}

impl<K: Copy + Eq> DismissalWatcher<K> {
    /// Create a watcher for the overlay rooted at `overlay`, opened from `trigger`.
    pub fn new(overlay: K, trigger: K) -> Self {
        Self {
            overlay,
            trigger,
            excluded: SmallVec::new(),
        }
    }

    /// Treat `root` (typically an ancestor overlay) as inside.
    pub fn exclude(&mut self, root: K) {
        if !self.excluded.contains(&root) {
            self.excluded.push(root);
        }
    }

    /// Roots registered with [`exclude`](Self::exclude).
    pub fn excluded(&self) -> &[K] {
        &self.excluded
    }

    /// Whether a pointer-down on `target` happened outside the overlay, the
    /// trigger, and every excluded root.
    pub fn is_outside_pointer_down<H: Containment<K> + ?Sized>(&self, host: &H, target: K) -> bool {
        !(host.contains(self.overlay, target)
            || host.contains(self.trigger, target)
            || self.excluded.iter().any(|r| host.contains(*r, target)))
    }

    /// Whether `key` is Escape.
    pub fn is_escape(key: Key) -> bool {
        key == Key::Escape
    }

    /// Register `listeners` with the host for the open interval.
    pub fn install<H: ListenerHost + ?Sized>(
        &self,
        host: &mut H,
        listeners: ListenerSet,
    ) -> Subscription {
        if !listeners.is_empty() {
            host.subscribe(listeners);
        }
        Subscription { listeners }
    }
}

/// Listeners registered for one open interval.
///
/// Release it with [`Subscription::release`]; dropping it leaves the
/// listeners registered.
#[must_use = "listeners stay registered until the subscription is released"]
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    listeners: ListenerSet,
}

impl Subscription {
    /// The registered listeners.
    pub fn listeners(&self) -> ListenerSet {
        self.listeners
    }

    /// Unregister the listeners.
    pub fn release<H: ListenerHost + ?Sized>(self, host: &mut H) {
        if !self.listeners.is_empty() {
            host.unsubscribe(self.listeners);
        }
    }
}
