// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction controller: one [`Overlay`] per floating element.
//!
//! ## Status machine
//!
//! ```text
//!            request_open (delay > 0)            timer
//!   Closed ───────────────────────────▶ PendingOpen ──────▶ Open
//!     ▲  ◀─────────────────────────────────┘ request_close     │
//!     │                                                         │ request_close (delay > 0)
//!     │        timer                                            ▼
//!     └──────────────────────────────────────────────── PendingClose
//!                                  request_open cancels ────────┘ (back to Open)
//! ```
//!
//! Zero delays skip the pending states. [`Overlay::open`] and
//! [`Overlay::close`] always act immediately and cancel any pending timer.
//! At most one timer exists at a time; the newest request wins.
//!
//! Entry effects run only when the overlay becomes visible (`Closed` or
//! `PendingOpen` to `Open`), and exit effects only when it stops being visible
//! (`Open` or `PendingClose` to `Closed`):
//!
//! - on open: measure and place, capture focus, optionally auto-focus, install
//!   global listeners, announce;
//! - on close: release listeners, restore focus, announce.
//!
//! ## Time
//!
//! The engine owns no clock. Every method that may start a delay takes `now`
//! in milliseconds; the host calls [`Overlay::advance`] at or after
//! [`Overlay::next_deadline`] to fire it.
//!
//! ## Controlled overlays
//!
//! A controlled overlay mirrors an externally owned `is_open` value. Trigger
//! events, Escape and outside clicks become advisory: they call the
//! open-change callback (after the configured delay) and leave the status
//! alone until the host calls [`Overlay::set_open`].

use alloc::boxed::Box;
use core::fmt;

use kurbo::Rect;
use understory_placement::{
    Measurements, Placement, PlacementResolver, Position, PositionStrategy,
};

use crate::announce::{Announcer, LiveRegion};
use crate::aria::{OverlayAria, OverlayIds, TriggerAria};
use crate::config::{OverlayConfig, TriggerMode};
use crate::dismiss::{DismissalWatcher, Subscription};
use crate::event::{Key, OverlayEvent, Response, Transition};
use crate::focus::{FocusManager, FocusSnapshot};
use crate::host::{LayoutHost, ListenerSet, OverlayHost};
use crate::trigger::{Trigger, TriggerHandlers};

/// Lifecycle status of an overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Not visible.
    #[default]
    Closed,
    /// Waiting for the open delay to elapse.
    PendingOpen,
    /// Visible.
    Open,
    /// Visible, waiting for the close delay to elapse.
    PendingClose,
}

impl Status {
    /// Whether the overlay is visible in this status.
    pub const fn is_open_class(self) -> bool {
        matches!(self, Self::Open | Self::PendingClose)
    }
}

/// Observable state of an overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayState {
    /// Lifecycle status.
    pub status: Status,
    /// Placement after flipping.
    pub placement: Placement,
    /// Top-left corner of the overlay.
    pub position: Position,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TimerKind {
    Open,
    Close,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Timer {
    kind: TimerKind,
    deadline: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Uncontrolled,
    Controlled { is_open: bool },
}

#[derive(Copy, Clone, Debug, Default)]
struct Hover {
    trigger: bool,
    overlay: bool,
}

type OpenChange = Box<dyn FnMut(bool)>;

/// Interaction controller for one overlay.
///
/// `K` is the host's element handle. The controller never stores host state;
/// every operation that needs the host takes it as a parameter.
///
/// ## Usage
///
/// - Build with [`Overlay::new`] (uncontrolled) or [`Overlay::controlled`].
/// - Call [`Overlay::mount`] once the trigger and overlay exist.
/// - Forward trigger and global events to [`Overlay::handle`].
/// - Drive delays with [`Overlay::advance`].
/// - Read [`Overlay::state`] to render, and call [`Overlay::unmount`] on teardown.
pub struct Overlay<K> {
    config: OverlayConfig,
    trigger: K,
    state: OverlayState,
    timer: Option<Timer>,
    mode: Mode,
    on_open_change: Option<OpenChange>,
    focus: FocusManager<K>,
    watcher: DismissalWatcher<K>,
    resolver: PlacementResolver,
    announcer: Announcer,
    subscription: Option<Subscription>,
    hover: Hover,
}

impl<K> fmt::Debug for Overlay<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlay")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("timer", &self.timer)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq> Overlay<K> {
    /// Create an uncontrolled overlay rooted at `root`, opened from `trigger`.
    ///
    /// The configuration is [sanitized](OverlayConfig::sanitized) and the
    /// trigger is asked to bind the handlers its mode needs.
    pub fn new<T: Trigger<K> + ?Sized>(config: OverlayConfig, trigger: &mut T, root: K) -> Self {
        let config = config.sanitized();
        trigger.bind_handlers(TriggerHandlers::for_mode(config.trigger));
        let trigger = trigger.element();
        let announcer = Announcer::new(
            config.live_region,
            config.politeness,
            config.opened_message.clone(),
            config.closed_message.clone(),
        );
        Self {
            state: OverlayState {
                status: Status::Closed,
                placement: config.placement,
                position: Position::default(),
            },
            config,
            trigger,
            timer: None,
            mode: Mode::Uncontrolled,
            on_open_change: None,
            focus: FocusManager::new(root),
            watcher: DismissalWatcher::new(root, trigger),
            resolver: PlacementResolver::new(),
            announcer,
            subscription: None,
            hover: Hover::default(),
        }
    }

    /// Create an overlay whose open state is owned by the host.
    ///
    /// `on_open_change` receives every open/close request; the host answers
    /// with [`set_open`](Self::set_open).
    pub fn controlled<T: Trigger<K> + ?Sized>(
        config: OverlayConfig,
        trigger: &mut T,
        root: K,
        is_open: bool,
        on_open_change: impl FnMut(bool) + 'static,
    ) -> Self {
        let mut overlay = Self::new(config, trigger, root);
        overlay.mode = Mode::Controlled { is_open };
        overlay.on_open_change = Some(Box::new(on_open_change));
        overlay
    }

    /// Observe open/close transitions of an uncontrolled overlay.
    pub fn with_open_change(mut self, on_open_change: impl FnMut(bool) + 'static) -> Self {
        self.on_open_change = Some(Box::new(on_open_change));
        self
    }

    /// Treat `ancestor_root` (an enclosing overlay) as inside for dismissal.
    pub fn nested_in(mut self, ancestor_root: K) -> Self {
        self.watcher.exclude(ancestor_root);
        self
    }

    /// Focus `node` instead of the first focusable descendant on open.
    pub fn with_initial_focus(mut self, node: K) -> Self {
        self.focus.set_initial_focus(Some(node));
        self
    }

    /// Return focus to `node` on close instead of the previously focused element.
    pub fn with_return_focus_to(mut self, node: K) -> Self {
        self.focus.set_return_focus_to(Some(node));
        self
    }

    /// The sanitized configuration.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// The trigger element.
    pub fn trigger(&self) -> K {
        self.trigger
    }

    /// The overlay root element.
    pub fn root(&self) -> K {
        self.focus.root()
    }

    /// Current state.
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.state.status
    }

    /// Whether the overlay is visible.
    pub fn is_open(&self) -> bool {
        self.state.status.is_open_class()
    }

    /// Whether the open state is owned by the host.
    pub fn is_controlled(&self) -> bool {
        matches!(self.mode, Mode::Controlled { .. })
    }

    /// Whether the host should lock background scrolling right now.
    pub fn is_scroll_locked(&self) -> bool {
        self.config.lock_scroll && self.is_open()
    }

    /// When [`advance`](Self::advance) next has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timer.map(|t| t.deadline)
    }

    /// Handlers the host must bind on the overlay element for this
    /// overlay's trigger mode.
    pub fn overlay_handlers(&self) -> TriggerHandlers {
        TriggerHandlers::for_overlay(self.config.trigger)
    }

    /// Global listeners currently registered with the host.
    pub fn listeners(&self) -> ListenerSet {
        self.subscription
            .as_ref()
            .map_or(ListenerSet::empty(), Subscription::listeners)
    }

    /// Focus state captured on open, while it is live.
    pub fn focus_snapshot(&self) -> Option<&FocusSnapshot<K>> {
        self.focus.captured()
    }

    /// The announcer.
    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    /// The live region to render, if announcements are enabled.
    pub fn live_region(&self) -> Option<LiveRegion<'_>> {
        self.announcer.live_region()
    }

    /// ARIA attributes for the trigger.
    pub fn trigger_aria<'a>(&self, ids: &'a OverlayIds) -> TriggerAria<'a> {
        TriggerAria::new(self.config.has_popup, self.is_open(), &ids.overlay)
    }

    /// ARIA attributes for the overlay element.
    pub fn overlay_aria<'a>(
        &self,
        ids: &'a OverlayIds,
        has_title: bool,
        has_description: bool,
    ) -> OverlayAria<'a> {
        OverlayAria::new(
            ids,
            self.config.role,
            self.config.modal,
            has_title,
            has_description,
        )
    }

    /// Arrow offset along the overlay edge facing the trigger.
    ///
    /// `None` for sheets and when the trigger or overlay cannot be measured.
    pub fn arrow_offset<H: LayoutHost<K> + ?Sized>(&self, host: &H, padding: f64) -> Option<f64> {
        if self.config.strategy != PositionStrategy::Anchored {
            return None;
        }
        let anchor = host.bounds(self.trigger)?;
        let size = host.bounds(self.focus.root())?.size();
        let Position { top, left } = self.state.position;
        let overlay = Rect::from_origin_size((left, top), size);
        Some(understory_placement::arrow_offset(
            anchor,
            overlay,
            self.state.placement.side(),
            padding,
        ))
    }

    /// Reconcile with the initial open state.
    ///
    /// Opens an uncontrolled overlay configured with `default_open`, or a
    /// controlled one whose `is_open` is already `true`. Neither calls the
    /// open-change callback.
    pub fn mount<H: OverlayHost<K> + ?Sized>(&mut self, host: &mut H) -> Option<Transition> {
        let open = match self.mode {
            Mode::Uncontrolled => self.config.default_open,
            Mode::Controlled { is_open } => is_open,
        };
        if !open || self.is_open() {
            return None;
        }
        self.transition(Status::Open, None, false, host)
    }

    /// Tear down: cancel the timer and release listeners without running
    /// close effects.
    pub fn unmount<H: OverlayHost<K> + ?Sized>(&mut self, host: &mut H) {
        self.timer = None;
        if let Some(subscription) = self.subscription.take() {
            subscription.release(host);
        }
        self.focus.discard();
        self.hover = Hover::default();
        self.state.status = Status::Closed;
    }

    /// Ask to open, honoring the open delay.
    pub fn request_open<H: OverlayHost<K> + ?Sized>(
        &mut self,
        now: u64,
        host: &mut H,
    ) -> Option<Transition> {
        if let Mode::Controlled { is_open } = self.mode {
            self.request_controlled(true, is_open, now);
            return None;
        }
        match self.state.status {
            Status::Open | Status::PendingOpen => None,
            Status::PendingClose => self.transition(Status::Open, None, true, host),
            Status::Closed if self.config.open_delay == 0 => {
                self.transition(Status::Open, None, true, host)
            }
            Status::Closed => {
                let timer = Timer {
                    kind: TimerKind::Open,
                    deadline: now.saturating_add(self.config.open_delay),
                };
                self.transition(Status::PendingOpen, Some(timer), true, host)
            }
        }
    }

    /// Ask to close, honoring the close delay.
    pub fn request_close<H: OverlayHost<K> + ?Sized>(
        &mut self,
        now: u64,
        host: &mut H,
    ) -> Option<Transition> {
        if let Mode::Controlled { is_open } = self.mode {
            self.request_controlled(false, is_open, now);
            return None;
        }
        match self.state.status {
            Status::Closed | Status::PendingClose => None,
            Status::PendingOpen => self.transition(Status::Closed, None, true, host),
            Status::Open if self.config.close_delay == 0 => {
                self.transition(Status::Closed, None, true, host)
            }
            Status::Open => {
                let timer = Timer {
                    kind: TimerKind::Close,
                    deadline: now.saturating_add(self.config.close_delay),
                };
                self.transition(Status::PendingClose, Some(timer), true, host)
            }
        }
    }

    /// Open now, cancelling any pending timer.
    pub fn open<H: OverlayHost<K> + ?Sized>(&mut self, host: &mut H) -> Option<Transition> {
        self.force(true, host)
    }

    /// Close now, cancelling any pending timer.
    pub fn close<H: OverlayHost<K> + ?Sized>(&mut self, host: &mut H) -> Option<Transition> {
        self.force(false, host)
    }

    /// Invert the most recent request: close if open or opening, open otherwise.
    pub fn toggle<H: OverlayHost<K> + ?Sized>(
        &mut self,
        now: u64,
        host: &mut H,
    ) -> Option<Transition> {
        if self.wants_open() {
            self.request_close(now, host)
        } else {
            self.request_open(now, host)
        }
    }

    /// Set the externally owned open state of a controlled overlay.
    ///
    /// Runs the matching entry or exit effects without calling the
    /// open-change callback. Has no effect on uncontrolled overlays; use
    /// [`open`](Self::open) and [`close`](Self::close) there.
    pub fn set_open<H: OverlayHost<K> + ?Sized>(
        &mut self,
        is_open: bool,
        host: &mut H,
    ) -> Option<Transition> {
        let Mode::Controlled { is_open: current } = self.mode else {
            return None;
        };
        if current == is_open {
            return None;
        }
        self.mode = Mode::Controlled { is_open };
        let to = if is_open { Status::Open } else { Status::Closed };
        self.transition(to, None, false, host)
    }

    /// Fire the pending timer if its deadline has passed.
    pub fn advance<H: OverlayHost<K> + ?Sized>(
        &mut self,
        now: u64,
        host: &mut H,
    ) -> Option<Transition> {
        let timer = self.timer.filter(|t| t.deadline <= now)?;
        self.timer = None;
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = ?timer.kind, deadline = timer.deadline, now, "overlay timer fired");

        if self.is_controlled() {
            self.notify(timer.kind == TimerKind::Open);
            return None;
        }
        match (timer.kind, self.state.status) {
            (TimerKind::Open, Status::PendingOpen) => {
                self.transition(Status::Open, None, true, host)
            }
            (TimerKind::Close, Status::PendingClose) => {
                self.transition(Status::Closed, None, true, host)
            }
            _ => None,
        }
    }

    /// Recompute placement from current measurements.
    ///
    /// Returns `false` when the measurements were unusable and the previous
    /// (or fallback) position was kept.
    pub fn reposition<H: LayoutHost<K> + ?Sized>(&mut self, host: &H) -> bool {
        let measurements = Measurements {
            anchor: host.bounds(self.trigger),
            overlay: host.bounds(self.focus.root()).map(|r| r.size()),
            viewport: host.viewport(),
        };
        let resolution = self.resolver.resolve_measured(
            measurements,
            self.config.placement,
            self.config.strategy,
            self.config.offset,
        );
        #[cfg(feature = "tracing")]
        if !resolution.measured {
            tracing::debug!(?measurements, "overlay not measurable, keeping fallback position");
        }
        self.state.placement = resolution.resolved.placement;
        self.state.position = resolution.resolved.position;
        resolution.measured
    }

    /// Feed one event.
    ///
    /// Events that do not apply to the configured trigger mode, or to the
    /// current status, are ignored.
    pub fn handle<H: OverlayHost<K> + ?Sized>(
        &mut self,
        event: OverlayEvent<K>,
        now: u64,
        host: &mut H,
    ) -> Response {
        let mode = self.config.trigger;
        match event {
            OverlayEvent::TriggerClick if mode == TriggerMode::Click => {
                Response::from_transition(self.toggle(now, host))
            }
            OverlayEvent::TriggerPointerEnter if mode == TriggerMode::Hover => {
                self.hover.trigger = true;
                Response::from_transition(self.request_open(now, host))
            }
            OverlayEvent::TriggerPointerLeave { related } if mode == TriggerMode::Hover => {
                self.hover.trigger = false;
                // Leave fires before the matching enter on the overlay.
                if related.is_some_and(|r| host.contains(self.focus.root(), r)) {
                    self.hover.overlay = true;
                }
                if self.hover.overlay {
                    return Response::IGNORED;
                }
                Response::from_transition(self.request_close(now, host))
            }
            OverlayEvent::OverlayPointerEnter if mode == TriggerMode::Hover && self.is_open() => {
                self.hover.overlay = true;
                Response::from_transition(self.request_open(now, host))
            }
            OverlayEvent::OverlayPointerLeave { related } if mode == TriggerMode::Hover => {
                self.hover.overlay = false;
                if related.is_some_and(|r| host.contains(self.trigger, r)) {
                    self.hover.trigger = true;
                }
                if self.hover.trigger {
                    return Response::IGNORED;
                }
                Response::from_transition(self.request_close(now, host))
            }
            OverlayEvent::TriggerFocus if mode == TriggerMode::Focus => {
                Response::from_transition(self.request_open(now, host))
            }
            OverlayEvent::TriggerBlur { related } if mode == TriggerMode::Focus => {
                if related.is_some_and(|r| host.contains(self.focus.root(), r)) {
                    return Response::IGNORED;
                }
                Response::from_transition(self.request_close(now, host))
            }
            OverlayEvent::OverlayFocusOut { related } if mode == TriggerMode::Focus => {
                let stays = related.is_some_and(|r| {
                    host.contains(self.focus.root(), r) || host.contains(self.trigger, r)
                });
                if stays {
                    return Response::IGNORED;
                }
                Response::from_transition(self.request_close(now, host))
            }
            OverlayEvent::PointerDown { target }
                if self.is_open()
                    && self.config.close_on_click_outside
                    && self.watcher.is_outside_pointer_down(&*host, target) =>
            {
                Response::from_transition(self.request_close(now, host))
            }
            OverlayEvent::KeyDown { key, shift } if self.is_open() => {
                if DismissalWatcher::<K>::is_escape(key) && self.config.close_on_esc {
                    return Response {
                        transition: self.request_close(now, host),
                        prevent_default: true,
                    };
                }
                if key == Key::Tab && self.config.trap_focus {
                    let outcome = self.focus.trap(host, key, shift);
                    return Response {
                        transition: None,
                        prevent_default: outcome.suppresses_default(),
                    };
                }
                Response::IGNORED
            }
            OverlayEvent::Resize | OverlayEvent::Scroll if self.is_open() => {
                self.reposition(&*host);
                Response::IGNORED
            }
            _ => Response::IGNORED,
        }
    }

    fn wants_open(&self) -> bool {
        match (self.timer, self.mode) {
            (Some(timer), _) => timer.kind == TimerKind::Open,
            (None, Mode::Controlled { is_open }) => is_open,
            (None, Mode::Uncontrolled) => self.is_open(),
        }
    }

    fn force<H: OverlayHost<K> + ?Sized>(&mut self, open: bool, host: &mut H) -> Option<Transition> {
        if let Mode::Controlled { is_open } = self.mode {
            self.timer = None;
            if is_open != open {
                self.notify(open);
            }
            return None;
        }
        let to = if open { Status::Open } else { Status::Closed };
        self.transition(to, None, true, host)
    }

    /// Advisory request on a controlled overlay: notify now or after the delay.
    fn request_controlled(&mut self, open: bool, is_open: bool, now: u64) {
        let kind = if open { TimerKind::Open } else { TimerKind::Close };
        match self.timer {
            Some(timer) if timer.kind == kind => return,
            Some(_) => {
                // The newer request cancels the pending opposite one.
                self.timer = None;
                return;
            }
            None => {}
        }
        if is_open == open {
            return;
        }
        let delay = if open {
            self.config.open_delay
        } else {
            self.config.close_delay
        };
        if delay == 0 {
            self.notify(open);
        } else {
            self.timer = Some(Timer {
                kind,
                deadline: now.saturating_add(delay),
            });
        }
    }

    /// Move to `to`, replacing the timer, and run entry or exit effects when
    /// visibility changes.
    fn transition<H: OverlayHost<K> + ?Sized>(
        &mut self,
        to: Status,
        timer: Option<Timer>,
        notify: bool,
        host: &mut H,
    ) -> Option<Transition> {
        let from = self.state.status;
        self.timer = timer;
        self.state.status = to;
        #[cfg(feature = "tracing")]
        tracing::debug!(?from, ?to, "overlay status");

        let transition = match (from.is_open_class(), to.is_open_class()) {
            (false, true) => {
                self.enter_open(host);
                Transition::Opened
            }
            (true, false) => {
                self.enter_closed(host);
                Transition::Closed
            }
            _ => return None,
        };
        self.announcer.announce(transition);
        if notify && !self.is_controlled() {
            self.notify(transition == Transition::Opened);
        }
        Some(transition)
    }

    fn enter_open<H: OverlayHost<K> + ?Sized>(&mut self, host: &mut H) {
        self.reposition(&*host);
        self.focus.snapshot(&*host);
        if self.config.auto_focus {
            self.focus.focus_first(host);
        }
        if let Some(stale) = self.subscription.take() {
            stale.release(host);
        }
        let listeners = self.required_listeners();
        self.subscription = Some(self.watcher.install(host, listeners));
    }

    fn enter_closed<H: OverlayHost<K> + ?Sized>(&mut self, host: &mut H) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release(host);
        }
        if self.config.return_focus {
            self.focus.restore(host);
        } else {
            self.focus.discard();
        }
        self.hover = Hover::default();
    }

    fn required_listeners(&self) -> ListenerSet {
        let mut listeners = ListenerSet::RESIZE;
        if self.config.strategy == PositionStrategy::Anchored {
            listeners |= ListenerSet::SCROLL;
        }
        if self.config.close_on_click_outside {
            listeners |= ListenerSet::POINTER_DOWN;
        }
        if self.config.close_on_esc || self.config.trap_focus {
            listeners |= ListenerSet::KEY_DOWN;
        }
        listeners
    }

    fn notify(&mut self, open: bool) {
        if let Some(callback) = self.on_open_change.as_mut() {
            callback(open);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::{A, B, BODY, C, FakeDom, FakeTrigger, OUTSIDE, OVERLAY, TRIGGER};
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use understory_placement::Side;

    fn overlay(config: OverlayConfig) -> (Overlay<u32>, FakeDom) {
        let mut trigger = FakeTrigger::new();
        (Overlay::new(config, &mut trigger, OVERLAY), FakeDom::fixture())
    }

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, impl FnMut(bool) + 'static) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |open| sink.borrow_mut().push(open))
    }

    fn key(key: Key) -> OverlayEvent<u32> {
        OverlayEvent::KeyDown { key, shift: false }
    }

    #[test]
    fn trigger_binds_handlers_for_mode() {
        let mut trigger = FakeTrigger::new();
        let config = OverlayConfig {
            trigger: TriggerMode::Hover,
            ..OverlayConfig::default()
        };
        let o = Overlay::new(config, &mut trigger, OVERLAY);
        assert_eq!(trigger.bound, TriggerHandlers::for_mode(TriggerMode::Hover));
        assert_eq!(o.trigger(), TRIGGER);
        assert_eq!(o.root(), OVERLAY);
    }

    #[test]
    fn close_before_open_delay_cancels_open() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            open_delay: 300,
            ..OverlayConfig::default()
        });
        assert_eq!(o.request_open(0, &mut dom), None);
        assert_eq!(o.status(), Status::PendingOpen);
        assert_eq!(o.next_deadline(), Some(300));

        assert_eq!(o.request_close(100, &mut dom), None);
        assert_eq!(o.status(), Status::Closed);
        assert_eq!(o.next_deadline(), None);

        assert_eq!(o.advance(300, &mut dom), None);
        assert_eq!(o.status(), Status::Closed);
        assert_eq!(dom.subscribe_calls, 0, "entry effects never ran");
        assert_eq!(o.announcer().message(), "");
    }

    #[test]
    fn open_delay_fires_at_deadline() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            open_delay: 300,
            ..OverlayConfig::default()
        });
        o.request_open(0, &mut dom);
        assert_eq!(o.advance(299, &mut dom), None);
        assert_eq!(o.advance(300, &mut dom), Some(Transition::Opened));
        assert_eq!(o.status(), Status::Open);
        assert_eq!(o.state().placement, Placement::Bottom);
        assert_eq!(o.state().position, Position::new(128.0, 20.0));
    }

    #[test]
    fn open_and_close_run_effects_once() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            auto_focus: true,
            ..OverlayConfig::default()
        });
        dom.active = Some(TRIGGER);

        let r = o.handle(OverlayEvent::TriggerClick, 0, &mut dom);
        assert_eq!(r.transition, Some(Transition::Opened));
        assert_eq!(dom.active, Some(A));
        assert_eq!(
            dom.subscribed,
            ListenerSet::POINTER_DOWN | ListenerSet::KEY_DOWN | ListenerSet::RESIZE | ListenerSet::SCROLL
        );
        assert_eq!(o.listeners(), dom.subscribed);
        assert_eq!(o.focus_snapshot().and_then(|s| s.previously_focused), Some(TRIGGER));
        assert_eq!(o.announcer().message(), "Overlay opened");

        assert_eq!(o.open(&mut dom), None, "already open");
        assert_eq!(dom.subscribe_calls, 1);

        let r = o.handle(OverlayEvent::TriggerClick, 10, &mut dom);
        assert_eq!(r.transition, Some(Transition::Closed));
        assert_eq!(dom.active, Some(TRIGGER));
        assert!(dom.subscribed.is_empty());
        assert_eq!(dom.unsubscribe_calls, 1);
        assert!(o.focus_snapshot().is_none());
        assert_eq!(o.announcer().message(), "Overlay closed");
    }

    #[test]
    fn escape_closes_in_every_mode() {
        for mode in [
            TriggerMode::Click,
            TriggerMode::Hover,
            TriggerMode::Focus,
            TriggerMode::Manual,
        ] {
            let (mut o, mut dom) = overlay(OverlayConfig {
                trigger: mode,
                ..OverlayConfig::default()
            });
            assert_eq!(o.open(&mut dom), Some(Transition::Opened));
            let r = o.handle(key(Key::Escape), 0, &mut dom);
            assert_eq!(
                r,
                Response {
                    transition: Some(Transition::Closed),
                    prevent_default: true,
                },
                "{mode:?}"
            );
            assert_eq!(o.status(), Status::Closed);
        }
    }

    #[test]
    fn escape_ignored_when_disabled_or_closed() {
        let (mut o, mut dom) = overlay(OverlayConfig::default());
        assert_eq!(o.handle(key(Key::Escape), 0, &mut dom), Response::IGNORED);

        let (mut o, mut dom) = overlay(OverlayConfig {
            close_on_esc: false,
            ..OverlayConfig::default()
        });
        o.open(&mut dom);
        assert_eq!(o.handle(key(Key::Escape), 0, &mut dom), Response::IGNORED);
        assert!(o.is_open());
        assert!(!o.listeners().contains(ListenerSet::KEY_DOWN));
    }

    #[test]
    fn pointer_down_outside_closes_inside_does_not() {
        let (mut o, mut dom) = overlay(OverlayConfig::default());
        o.open(&mut dom);
        for inside in [A, OVERLAY, TRIGGER] {
            let r = o.handle(OverlayEvent::PointerDown { target: inside }, 0, &mut dom);
            assert_eq!(r, Response::IGNORED);
        }
        assert!(o.is_open());
        let r = o.handle(OverlayEvent::PointerDown { target: OUTSIDE }, 0, &mut dom);
        assert_eq!(r.transition, Some(Transition::Closed));
    }

    #[test]
    fn pointer_down_ignored_when_outside_click_disabled() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            close_on_click_outside: false,
            ..OverlayConfig::default()
        });
        o.open(&mut dom);
        assert!(!dom.subscribed.contains(ListenerSet::POINTER_DOWN));
        let r = o.handle(OverlayEvent::PointerDown { target: OUTSIDE }, 0, &mut dom);
        assert_eq!(r, Response::IGNORED);
        assert!(o.is_open());
    }

    #[test]
    fn nested_overlay_treats_ancestor_as_inside() {
        let mut trigger = FakeTrigger::new();
        let mut o = Overlay::new(OverlayConfig::default(), &mut trigger, OVERLAY).nested_in(OUTSIDE);
        let mut dom = FakeDom::fixture();
        o.open(&mut dom);
        let r = o.handle(OverlayEvent::PointerDown { target: OUTSIDE }, 0, &mut dom);
        assert_eq!(r, Response::IGNORED);
        let r = o.handle(OverlayEvent::PointerDown { target: BODY }, 0, &mut dom);
        assert_eq!(r.transition, Some(Transition::Closed));
    }

    #[test]
    fn controlled_request_only_notifies() {
        let (calls, callback) = recorder();
        let mut trigger = FakeTrigger::new();
        let mut o = Overlay::controlled(OverlayConfig::default(), &mut trigger, OVERLAY, false, callback);
        let mut dom = FakeDom::fixture();
        assert_eq!(o.mount(&mut dom), None);

        assert_eq!(o.request_open(0, &mut dom), None);
        assert_eq!(*calls.borrow(), vec![true]);
        assert_eq!(o.status(), Status::Closed);
        assert_eq!(dom.subscribe_calls, 0);

        assert_eq!(o.set_open(true, &mut dom), Some(Transition::Opened));
        assert_eq!(*calls.borrow(), vec![true], "set_open does not echo");
        assert!(dom.subscribed.contains(ListenerSet::KEY_DOWN));

        let r = o.handle(key(Key::Escape), 0, &mut dom);
        assert_eq!(
            r,
            Response {
                transition: None,
                prevent_default: true,
            }
        );
        assert_eq!(*calls.borrow(), vec![true, false]);
        assert_eq!(o.status(), Status::Open);

        assert_eq!(o.set_open(false, &mut dom), Some(Transition::Closed));
        assert_eq!(o.set_open(false, &mut dom), None);
        assert!(dom.subscribed.is_empty());
    }

    #[test]
    fn controlled_requests_honor_delays() {
        let (calls, callback) = recorder();
        let mut trigger = FakeTrigger::new();
        let config = OverlayConfig {
            open_delay: 200,
            ..OverlayConfig::default()
        };
        let mut o = Overlay::controlled(config, &mut trigger, OVERLAY, false, callback);
        let mut dom = FakeDom::fixture();

        o.request_open(0, &mut dom);
        assert!(calls.borrow().is_empty());
        assert_eq!(o.next_deadline(), Some(200));
        o.request_open(50, &mut dom);
        assert_eq!(o.next_deadline(), Some(200), "no second timer");

        assert_eq!(o.advance(200, &mut dom), None);
        assert_eq!(*calls.borrow(), vec![true]);
        assert_eq!(o.status(), Status::Closed);

        o.request_open(300, &mut dom);
        o.request_close(310, &mut dom);
        assert_eq!(o.next_deadline(), None);
        assert_eq!(*calls.borrow(), vec![true]);
    }

    #[test]
    fn controlled_mount_opens_without_callback() {
        let (calls, callback) = recorder();
        let mut trigger = FakeTrigger::new();
        let mut o = Overlay::controlled(OverlayConfig::default(), &mut trigger, OVERLAY, true, callback);
        let mut dom = FakeDom::fixture();
        assert_eq!(o.mount(&mut dom), Some(Transition::Opened));
        assert!(calls.borrow().is_empty());
        assert_eq!(o.close(&mut dom), None);
        assert_eq!(*calls.borrow(), vec![false]);
        assert!(o.is_open());
    }

    #[test]
    fn reopen_during_close_delay_keeps_open() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            close_delay: 100,
            ..OverlayConfig::default()
        });
        o.open(&mut dom);
        assert_eq!(o.request_close(0, &mut dom), None);
        assert_eq!(o.status(), Status::PendingClose);
        assert!(o.is_open());

        assert_eq!(o.request_open(50, &mut dom), None);
        assert_eq!(o.status(), Status::Open);
        assert_eq!(o.next_deadline(), None);
        assert_eq!(o.advance(100, &mut dom), None);
        assert_eq!(o.status(), Status::Open);
        assert_eq!(dom.subscribe_calls, 1, "entry effects not re-run");

        o.request_close(200, &mut dom);
        assert_eq!(o.advance(300, &mut dom), Some(Transition::Closed));
    }

    #[test]
    fn hover_bridges_trigger_and_overlay() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            trigger: TriggerMode::Hover,
            ..OverlayConfig::default()
        });
        let r = o.handle(OverlayEvent::TriggerPointerEnter, 0, &mut dom);
        assert_eq!(r.transition, Some(Transition::Opened));
        assert_eq!(o.handle(OverlayEvent::OverlayPointerEnter, 1, &mut dom), Response::IGNORED);
        let r = o.handle(OverlayEvent::TriggerPointerLeave { related: None }, 2, &mut dom);
        assert_eq!(r, Response::IGNORED);
        assert!(o.is_open());
        let r = o.handle(OverlayEvent::OverlayPointerLeave { related: None }, 3, &mut dom);
        assert_eq!(r.transition, Some(Transition::Closed));
    }

    #[test]
    fn hover_leave_onto_overlay_keeps_it_open() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            trigger: TriggerMode::Hover,
            ..OverlayConfig::default()
        });
        o.handle(OverlayEvent::TriggerPointerEnter, 0, &mut dom);
        let r = o.handle(
            OverlayEvent::TriggerPointerLeave { related: Some(A) },
            1,
            &mut dom,
        );
        assert_eq!(r, Response::IGNORED);
        assert_eq!(o.handle(OverlayEvent::OverlayPointerEnter, 1, &mut dom), Response::IGNORED);
        assert_eq!(o.status(), Status::Open);

        // And back onto the trigger.
        let r = o.handle(
            OverlayEvent::OverlayPointerLeave {
                related: Some(TRIGGER),
            },
            2,
            &mut dom,
        );
        assert_eq!(r, Response::IGNORED);
        o.handle(OverlayEvent::TriggerPointerEnter, 2, &mut dom);
        assert!(o.is_open());

        let r = o.handle(
            OverlayEvent::TriggerPointerLeave {
                related: Some(OUTSIDE),
            },
            3,
            &mut dom,
        );
        assert_eq!(r.transition, Some(Transition::Closed));
    }

    #[test]
    fn overlay_handlers_cover_overlay_events() {
        let (hover, _) = overlay(OverlayConfig {
            trigger: TriggerMode::Hover,
            ..OverlayConfig::default()
        });
        assert_eq!(
            hover.overlay_handlers(),
            TriggerHandlers::POINTER_ENTER | TriggerHandlers::POINTER_LEAVE
        );
        let (focus, _) = overlay(OverlayConfig {
            trigger: TriggerMode::Focus,
            ..OverlayConfig::default()
        });
        assert_eq!(focus.overlay_handlers(), TriggerHandlers::BLUR);
        let (click, _) = overlay(OverlayConfig::default());
        assert!(click.overlay_handlers().is_empty());
    }

    #[test]
    fn hover_close_delay_bridges_the_gap() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            trigger: TriggerMode::Hover,
            close_delay: 100,
            ..OverlayConfig::default()
        });
        o.handle(OverlayEvent::TriggerPointerEnter, 0, &mut dom);
        o.handle(OverlayEvent::TriggerPointerLeave { related: None }, 10, &mut dom);
        assert_eq!(o.status(), Status::PendingClose);
        o.handle(OverlayEvent::OverlayPointerEnter, 50, &mut dom);
        assert_eq!(o.status(), Status::Open);
        assert_eq!(o.advance(110, &mut dom), None);
        assert!(o.is_open());
    }

    #[test]
    fn hover_leave_before_open_delay_aborts() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            trigger: TriggerMode::Hover,
            open_delay: 200,
            ..OverlayConfig::default()
        });
        o.handle(OverlayEvent::TriggerPointerEnter, 0, &mut dom);
        assert_eq!(o.status(), Status::PendingOpen);
        o.handle(OverlayEvent::TriggerPointerLeave { related: None }, 50, &mut dom);
        assert_eq!(o.status(), Status::Closed);
        assert_eq!(o.advance(200, &mut dom), None);
    }

    #[test]
    fn focus_mode_stays_open_while_focus_is_inside() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            trigger: TriggerMode::Focus,
            ..OverlayConfig::default()
        });
        let r = o.handle(OverlayEvent::TriggerFocus, 0, &mut dom);
        assert_eq!(r.transition, Some(Transition::Opened));

        let r = o.handle(OverlayEvent::TriggerBlur { related: Some(A) }, 1, &mut dom);
        assert_eq!(r, Response::IGNORED);
        let r = o.handle(OverlayEvent::OverlayFocusOut { related: Some(TRIGGER) }, 2, &mut dom);
        assert_eq!(r, Response::IGNORED);
        assert!(o.is_open());

        let r = o.handle(OverlayEvent::OverlayFocusOut { related: Some(OUTSIDE) }, 3, &mut dom);
        assert_eq!(r.transition, Some(Transition::Closed));

        o.handle(OverlayEvent::TriggerFocus, 4, &mut dom);
        let r = o.handle(OverlayEvent::TriggerBlur { related: None }, 5, &mut dom);
        assert_eq!(r.transition, Some(Transition::Closed));
    }

    #[test]
    fn events_for_other_modes_are_ignored() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            trigger: TriggerMode::Manual,
            ..OverlayConfig::default()
        });
        for event in [
            OverlayEvent::TriggerClick,
            OverlayEvent::TriggerPointerEnter,
            OverlayEvent::TriggerFocus,
        ] {
            assert_eq!(o.handle(event, 0, &mut dom), Response::IGNORED);
        }
        assert_eq!(o.status(), Status::Closed);
    }

    #[test]
    fn tab_is_trapped_when_enabled() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            auto_focus: true,
            trap_focus: true,
            ..OverlayConfig::default()
        });
        o.open(&mut dom);
        assert_eq!(dom.active, Some(A));

        dom.active = Some(C);
        let r = o.handle(key(Key::Tab), 0, &mut dom);
        assert_eq!(
            r,
            Response {
                transition: None,
                prevent_default: true,
            }
        );
        assert_eq!(dom.active, Some(A));

        dom.active = Some(B);
        assert_eq!(o.handle(key(Key::Tab), 0, &mut dom), Response::IGNORED);
    }

    #[test]
    fn tab_passes_through_without_trap() {
        let (mut o, mut dom) = overlay(OverlayConfig::default());
        o.open(&mut dom);
        dom.active = Some(C);
        assert_eq!(o.handle(key(Key::Tab), 0, &mut dom), Response::IGNORED);
        assert_eq!(dom.active, Some(C));
    }

    #[test]
    fn clamps_overlay_near_viewport_corner() {
        let (mut o, mut dom) = overlay(OverlayConfig::default());
        dom.set_bounds(
            TRIGGER,
            Some(Rect::from_origin_size((700.0, 10.0), (40.0, 20.0))),
        );
        o.open(&mut dom);
        assert_eq!(o.state().placement, Placement::Bottom);
        assert_eq!(o.state().position, Position::new(38.0, 600.0));
        assert_eq!(o.arrow_offset(&dom, 4.0), Some(120.0));
    }

    #[test]
    fn resize_repositions_and_unmeasurable_keeps_last_good() {
        let (mut o, mut dom) = overlay(OverlayConfig::default());
        o.open(&mut dom);
        assert_eq!(o.state().position, Position::new(128.0, 20.0));

        dom.set_bounds(
            TRIGGER,
            Some(Rect::from_origin_size((300.0, 200.0), (40.0, 20.0))),
        );
        assert_eq!(o.handle(OverlayEvent::Resize, 0, &mut dom), Response::IGNORED);
        assert_eq!(o.state().position, Position::new(228.0, 220.0));

        dom.set_bounds(TRIGGER, None);
        o.handle(OverlayEvent::Scroll, 0, &mut dom);
        assert_eq!(o.state().position, Position::new(228.0, 220.0));
        assert!(!o.reposition(&dom));
    }

    #[test]
    fn unmeasurable_first_open_uses_viewport_origin() {
        let (mut o, mut dom) = overlay(OverlayConfig::default());
        dom.set_bounds(TRIGGER, None);
        dom.viewport = Some(Rect::new(10.0, 20.0, 810.0, 620.0));
        assert_eq!(o.open(&mut dom), Some(Transition::Opened));
        assert_eq!(o.state().position, Position::new(20.0, 10.0));
        assert_eq!(o.arrow_offset(&dom, 4.0), None);
    }

    #[test]
    fn drawer_sheet_locks_scroll_while_open() {
        let (mut o, mut dom) = overlay(OverlayConfig::drawer(Side::Right, 300.0));
        assert!(!o.is_scroll_locked());
        o.open(&mut dom);
        assert!(o.is_scroll_locked());
        assert_eq!(o.state().placement, Placement::Right);
        assert_eq!(o.state().position, Position::new(0.0, 500.0));
        assert_eq!(
            dom.subscribed,
            ListenerSet::POINTER_DOWN | ListenerSet::KEY_DOWN | ListenerSet::RESIZE
        );
        assert_eq!(dom.active, Some(A));
        assert!(o.live_region().is_none());
        assert_eq!(o.arrow_offset(&dom, 4.0), None);
        o.close(&mut dom);
        assert!(!o.is_scroll_locked());
    }

    #[test]
    fn default_open_mounts_without_callback() {
        let (calls, callback) = recorder();
        let mut trigger = FakeTrigger::new();
        let config = OverlayConfig {
            default_open: true,
            ..OverlayConfig::default()
        };
        let mut o = Overlay::new(config, &mut trigger, OVERLAY).with_open_change(callback);
        let mut dom = FakeDom::fixture();
        assert_eq!(o.mount(&mut dom), Some(Transition::Opened));
        assert!(calls.borrow().is_empty());
        assert_eq!(o.mount(&mut dom), None);

        assert_eq!(o.request_close(0, &mut dom), Some(Transition::Closed));
        assert_eq!(*calls.borrow(), vec![false]);
    }

    #[test]
    fn uncontrolled_callback_reports_real_transitions() {
        let (calls, callback) = recorder();
        let mut trigger = FakeTrigger::new();
        let mut o = Overlay::new(OverlayConfig::default(), &mut trigger, OVERLAY).with_open_change(callback);
        let mut dom = FakeDom::fixture();
        o.toggle(0, &mut dom);
        o.request_open(1, &mut dom);
        o.toggle(2, &mut dom);
        assert_eq!(*calls.borrow(), vec![true, false]);
    }

    #[test]
    fn toggle_cancels_pending_open() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            open_delay: 100,
            ..OverlayConfig::default()
        });
        o.toggle(0, &mut dom);
        assert_eq!(o.status(), Status::PendingOpen);
        o.toggle(10, &mut dom);
        assert_eq!(o.status(), Status::Closed);
        assert_eq!(o.next_deadline(), None);
    }

    #[test]
    fn unmount_releases_listeners_without_moving_focus() {
        let (mut o, mut dom) = overlay(OverlayConfig::default());
        dom.active = Some(TRIGGER);
        o.open(&mut dom);
        dom.active = Some(B);
        o.unmount(&mut dom);
        assert!(dom.subscribed.is_empty());
        assert_eq!(dom.unsubscribe_calls, 1);
        assert_eq!(o.status(), Status::Closed);
        assert_eq!(dom.active, Some(B));
        assert!(o.focus_snapshot().is_none());
    }

    #[test]
    fn focus_targets_can_be_overridden() {
        let mut trigger = FakeTrigger::new();
        let config = OverlayConfig {
            auto_focus: true,
            ..OverlayConfig::default()
        };
        let mut o = Overlay::new(config, &mut trigger, OVERLAY)
            .with_initial_focus(C)
            .with_return_focus_to(OUTSIDE);
        let mut dom = FakeDom::fixture();
        dom.active = Some(TRIGGER);
        o.open(&mut dom);
        assert_eq!(dom.active, Some(C));
        o.close(&mut dom);
        assert_eq!(dom.active, Some(OUTSIDE));
    }

    #[test]
    fn return_focus_disabled_leaves_focus_in_place() {
        let (mut o, mut dom) = overlay(OverlayConfig {
            auto_focus: true,
            return_focus: false,
            ..OverlayConfig::default()
        });
        dom.active = Some(TRIGGER);
        o.open(&mut dom);
        o.close(&mut dom);
        assert_eq!(dom.active, Some(A));
        assert!(o.focus_snapshot().is_none());
    }

    #[test]
    fn aria_tracks_open_state() {
        let (mut o, mut dom) = overlay(OverlayConfig::popover());
        let ids = OverlayIds::new("pop");
        assert_eq!(o.trigger_aria(&ids).controls, None);
        o.open(&mut dom);
        let aria = o.trigger_aria(&ids);
        assert!(aria.expanded);
        assert_eq!(aria.controls, Some("pop"));
        let overlay = o.overlay_aria(&ids, true, false);
        assert_eq!(overlay.labelled_by, Some("pop-title"));
        assert!(!overlay.modal);
    }

    #[test]
    fn invalid_config_is_sanitized_on_construction() {
        let (o, _) = overlay(OverlayConfig {
            offset: f64::NAN,
            ..OverlayConfig::default()
        });
        assert_eq!(o.config().offset, crate::config::DEFAULT_OFFSET);
    }
}
