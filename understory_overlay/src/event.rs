// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events fed into an overlay and what comes back out.

/// Keys the overlay engine distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape.
    Escape,
    /// Tab (Shift+Tab is Tab with the shift modifier).
    Tab,
    /// Any other key.
    Other,
}

/// Input delivered to [`Overlay::handle`](crate::Overlay::handle).
///
/// Trigger events arrive through the handlers bound by the
/// [`Trigger`](crate::Trigger) adapter, overlay events through the handlers
/// reported by [`Overlay::overlay_handlers`](crate::Overlay::overlay_handlers);
/// global events (`PointerDown`,
/// `KeyDown`, `Resize`, `Scroll`) arrive through the listeners requested
/// via [`ListenerHost`](crate::ListenerHost).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverlayEvent<K> {
    /// The trigger was activated.
    TriggerClick,
    /// The pointer entered the trigger.
    TriggerPointerEnter,
    /// The pointer left the trigger; `related` is the element it moved onto, if known.
    TriggerPointerLeave {
        /// Element under the pointer next.
        related: Option<K>,
    },
    /// The trigger received focus.
    TriggerFocus,
    /// The trigger lost focus; `related` is the element receiving focus, if known.
    TriggerBlur {
        /// Element that gains focus next.
        related: Option<K>,
    },
    /// The pointer entered the overlay.
    OverlayPointerEnter,
    /// The pointer left the overlay; `related` is the element it moved onto, if known.
    OverlayPointerLeave {
        /// Element under the pointer next.
        related: Option<K>,
    },
    /// Focus moved from inside the overlay to `related`.
    OverlayFocusOut {
        /// Element that gains focus next.
        related: Option<K>,
    },
    /// Pointer-down anywhere in the document.
    PointerDown {
        /// Element under the pointer.
        target: K,
    },
    /// Key-down anywhere in the document.
    KeyDown {
        /// The key.
        key: Key,
        /// Whether Shift was held.
        shift: bool,
    },
    /// The viewport was resized.
    Resize,
    /// The viewport or an ancestor scrolled.
    Scroll,
}

/// A change of the externally visible open state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The overlay became open.
    Opened,
    /// The overlay became closed.
    Closed,
}

/// Result of feeding an event to an overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Response {
    /// Transition caused by the event, if any.
    pub transition: Option<Transition>,
    /// The host should suppress the event's default action.
    pub prevent_default: bool,
}

impl Response {
    /// Nothing happened.
    pub const IGNORED: Self = Self {
        transition: None,
        prevent_default: false,
    };

    pub(crate) const fn from_transition(transition: Option<Transition>) -> Self {
        Self {
            transition,
            prevent_default: false,
        }
    }
}
