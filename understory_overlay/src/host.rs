// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities the overlay engine relies on.
//!
//! The engine never touches a document directly. Instead the embedding
//! toolkit (a DOM binding, a native widget tree, or a test fake) implements
//! these small traits over its own element handle `K`.
//!
//! - [`FocusHost`]: the focus API (active element, focus, attachment, focusable descendants).
//! - [`Containment`]: subtree membership, used for "outside" tests.
//! - [`LayoutHost`]: element bounds and viewport measurement.
//! - [`ListenerHost`]: registration of global listeners for the open interval.
//!
//! [`OverlayHost`] bundles all four and is implemented automatically.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::focus::FocusCandidate;

/// Focus API abstraction.
pub trait FocusHost<K> {
    /// The element that currently has focus, if any.
    fn active_element(&self) -> Option<K>;

    /// Whether `node` is still attached to the document.
    fn is_attached(&self, node: K) -> bool;

    /// Move focus to `node`.
    ///
    /// Implementations should ignore requests for nodes that cannot take focus.
    fn focus(&mut self, node: K);

    /// Candidate descendants of `root` in document order.
    ///
    /// The engine filters and orders these itself (see [`FocusCandidate::is_focusable`]),
    /// so hosts may return every interactive-looking element.
    fn focusable_candidates(&self, root: K) -> Vec<FocusCandidate<K>>;
}

/// Subtree membership.
pub trait Containment<K> {
    /// Whether `node` is `root` or one of its descendants.
    fn contains(&self, root: K, node: K) -> bool;
}

/// Layout measurement.
pub trait LayoutHost<K> {
    /// Bounds of `node` in viewport-relative, scroll-adjusted coordinates,
    /// or `None` when it is not laid out.
    fn bounds(&self, node: K) -> Option<Rect>;

    /// Bounds of the viewport in the same coordinate space.
    fn viewport(&self) -> Option<Rect>;
}

bitflags::bitflags! {
    /// Global listeners an open overlay needs.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ListenerSet: u8 {
        /// Pointer-down anywhere (outside-click dismissal).
        const POINTER_DOWN = 0b0000_0001;
        /// Key-down anywhere (Escape and focus trapping).
        const KEY_DOWN     = 0b0000_0010;
        /// Viewport resize (repositioning).
        const RESIZE       = 0b0000_0100;
        /// Scroll of any ancestor or the viewport (repositioning).
        const SCROLL       = 0b0000_1000;
    }
}

/// Registration of global listeners.
///
/// Every `subscribe` is matched by exactly one `unsubscribe` with the same set.
pub trait ListenerHost {
    /// Start delivering the events in `listeners` to the overlay.
    fn subscribe(&mut self, listeners: ListenerSet);

    /// Stop delivering the events in `listeners`.
    fn unsubscribe(&mut self, listeners: ListenerSet);
}

/// Everything the interaction controller needs from its host.
pub trait OverlayHost<K>: FocusHost<K> + Containment<K> + LayoutHost<K> + ListenerHost {}

impl<K, T> OverlayHost<K> for T where T: FocusHost<K> + Containment<K> + LayoutHost<K> + ListenerHost {}
