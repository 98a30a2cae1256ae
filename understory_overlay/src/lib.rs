// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay --heading-base-level=0

//! Understory Overlay: a headless engine for floating overlays.
//!
//! Popovers, tooltips, dropdowns and drawers share the same interaction
//! model: a trigger element opens a floating element, which is positioned
//! against the trigger (or a viewport edge), grabs and returns focus, closes on
//! Escape or outside clicks, and announces itself to assistive technology.
//! This crate implements that model without rendering anything.
//!
//! ## Pieces
//!
//! - [`Overlay`]: the per-instance controller. It owns the status machine
//!   (`Closed`, `PendingOpen`, `Open`, `PendingClose`), the single delay timer, and
//!   the entry/exit effects.
//! - [`OverlayConfig`]: behavior knobs, with [`OverlayConfig::popover`],
//!   [`OverlayConfig::drawer`] and [`OverlayConfig::dropdown`] presets.
//! - [`FocusManager`]: focus snapshot, auto-focus, restoration and Tab trapping.
//! - [`DismissalWatcher`]: outside-pointer and Escape detection, plus scoped
//!   listener [`Subscription`]s.
//! - [`Announcer`]: a single-message live region.
//! - [`TriggerAria`] / [`OverlayAria`]: the ARIA attribute sets to apply.
//! - Placement comes from [`understory_placement`].
//!
//! ## Hosts
//!
//! The embedding toolkit implements [`FocusHost`], [`Containment`],
//! [`LayoutHost`] and [`ListenerHost`] over its element handle (any
//! `Copy + Eq` key), and a [`Trigger`] adapter for each trigger element. It then
//! forwards events to [`Overlay::handle`] and calls [`Overlay::advance`] when
//! [`Overlay::next_deadline`] passes. There is no global registry: every
//! overlay is independent and nothing is shared between instances.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_overlay::{
//!     Containment, FocusCandidate, FocusHost, LayoutHost, ListenerHost, ListenerSet, Overlay,
//!     OverlayConfig, OverlayEvent, Transition, Trigger, TriggerHandlers,
//! };
//!
//! // Element handles: 1 is the trigger, 2 the overlay.
//! #[derive(Default)]
//! struct Host {
//!     active: Option<u32>,
//!     listeners: ListenerSet,
//! }
//!
//! impl FocusHost<u32> for Host {
//!     fn active_element(&self) -> Option<u32> { self.active }
//!     fn is_attached(&self, _: u32) -> bool { true }
//!     fn focus(&mut self, node: u32) { self.active = Some(node); }
//!     fn focusable_candidates(&self, _: u32) -> Vec<FocusCandidate<u32>> { Vec::new() }
//! }
//! impl Containment<u32> for Host {
//!     fn contains(&self, root: u32, node: u32) -> bool { root == node }
//! }
//! impl LayoutHost<u32> for Host {
//!     fn bounds(&self, node: u32) -> Option<Rect> {
//!         match node {
//!             1 => Some(Rect::new(100.0, 100.0, 140.0, 120.0)),
//!             2 => Some(Rect::new(0.0, 0.0, 200.0, 100.0)),
//!             _ => None,
//!         }
//!     }
//!     fn viewport(&self) -> Option<Rect> { Some(Rect::new(0.0, 0.0, 800.0, 600.0)) }
//! }
//! impl ListenerHost for Host {
//!     fn subscribe(&mut self, l: ListenerSet) { self.listeners |= l; }
//!     fn unsubscribe(&mut self, l: ListenerSet) { self.listeners -= l; }
//! }
//!
//! struct Button;
//! impl Trigger<u32> for Button {
//!     fn element(&self) -> u32 { 1 }
//!     fn bind_handlers(&mut self, _: TriggerHandlers) {}
//! }
//!
//! let mut host = Host::default();
//! let mut overlay = Overlay::new(OverlayConfig::popover(), &mut Button, 2);
//!
//! let r = overlay.handle(OverlayEvent::TriggerClick, 0, &mut host);
//! assert_eq!(r.transition, Some(Transition::Opened));
//! assert_eq!(overlay.state().position.top, 128.0);
//! assert!(host.listeners.contains(ListenerSet::POINTER_DOWN));
//!
//! // A pointer-down somewhere else closes it and releases the listeners.
//! let r = overlay.handle(OverlayEvent::PointerDown { target: 99 }, 10, &mut host);
//! assert_eq!(r.transition, Some(Transition::Closed));
//! assert!(host.listeners.is_empty());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `tracing`: debug-level events for status transitions, fired timers and
//!   measurement fallbacks; warnings when a configuration is sanitized.
//! - `serde`: derives `Serialize`/`Deserialize` for [`OverlayConfig`] and its enums.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod announce;
mod aria;
mod config;
mod controller;
mod dismiss;
mod event;
mod focus;
mod host;
mod trigger;

#[cfg(test)]
mod test_host;

pub use announce::{Announcer, LiveRegion, Politeness};
pub use aria::{AttrValue, Attributes, OverlayAria, OverlayIds, OverlayRole, PopupKind, TriggerAria};
pub use config::{ConfigError, DEFAULT_OFFSET, DEFAULT_SHEET_EXTENT, OverlayConfig, TriggerMode};
pub use controller::{Overlay, OverlayState, Status};
pub use dismiss::{DismissalWatcher, Subscription};
pub use event::{Key, OverlayEvent, Response, Transition};
pub use focus::{ElementKind, FocusCandidate, FocusManager, FocusSnapshot, TrapOutcome, tab_order};
pub use host::{Containment, FocusHost, LayoutHost, ListenerHost, ListenerSet, OverlayHost};
pub use trigger::{Trigger, TriggerHandlers};

pub use understory_placement::{Align, Placement, Position, PositionStrategy, Side};
