// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger capability: how an overlay attaches to the element that opens it.
//!
//! Rather than grafting handlers onto an arbitrary child element, a trigger
//! adapter states which element it is and accepts the set of events the
//! controller needs. The adapter forwards those events to
//! [`Overlay::handle`](crate::Overlay::handle) as [`OverlayEvent`](crate::OverlayEvent)s.

use crate::config::TriggerMode;

bitflags::bitflags! {
    /// Trigger events a controller wants delivered.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TriggerHandlers: u8 {
        /// Activation (click, tap, Enter/Space on a button).
        const CLICK         = 0b0000_0001;
        /// Pointer entered the trigger.
        const POINTER_ENTER = 0b0000_0010;
        /// Pointer left the trigger.
        const POINTER_LEAVE = 0b0000_0100;
        /// Trigger received focus.
        const FOCUS         = 0b0000_1000;
        /// Trigger lost focus; on the overlay element, focus left its subtree.
        const BLUR          = 0b0001_0000;
    }
}

impl TriggerHandlers {
    /// The handlers a trigger mode relies on.
    ///
    /// [`TriggerMode::Manual`] needs none: the host drives the overlay itself.
    pub const fn for_mode(mode: TriggerMode) -> Self {
        match mode {
            TriggerMode::Click => Self::CLICK,
            TriggerMode::Hover => Self::POINTER_ENTER.union(Self::POINTER_LEAVE),
            TriggerMode::Focus => Self::FOCUS.union(Self::BLUR),
            TriggerMode::Manual => Self::empty(),
        }
    }

    /// The handlers a trigger mode needs on the overlay element itself.
    ///
    /// Hover mode keeps the overlay open while the pointer is over it; focus
    /// mode keeps it open while focus is inside it. The host forwards these
    /// as the `Overlay*` variants of [`OverlayEvent`](crate::OverlayEvent).
    pub const fn for_overlay(mode: TriggerMode) -> Self {
        match mode {
            TriggerMode::Hover => Self::POINTER_ENTER.union(Self::POINTER_LEAVE),
            TriggerMode::Focus => Self::BLUR,
            TriggerMode::Click | TriggerMode::Manual => Self::empty(),
        }
    }
}

/// A concrete trigger adapter.
pub trait Trigger<K> {
    /// The trigger element, used as the anchor for placement and as an
    /// "inside" root for dismissal.
    fn element(&self) -> K;

    /// Install handlers for `handlers`, replacing any previous binding.
    fn bind_handlers(&mut self, handlers: TriggerHandlers);
}
