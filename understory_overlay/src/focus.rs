// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus capture, initial focus, restoration, and Tab trapping for overlays.
//!
//! ## Focusable elements
//!
//! The host reports candidate descendants as [`FocusCandidate`]s. A candidate is
//! focusable when it is enabled and either carries a non-negative explicit tab
//! index or is natively interactive ([`ElementKind::is_interactive`]). A negative
//! tab index always removes an element from sequential navigation.
//!
//! Sequential order follows the usual platform rule: positive tab indices first,
//! ascending, then everything else in document order ([`tab_order`]).
//!
//! ## Lifecycle
//!
//! - [`FocusManager::snapshot`] when the overlay opens: remembers the element
//!   that had focus and the first/last focusable descendants.
//! - [`FocusManager::focus_first`] for auto-focus.
//! - [`FocusManager::trap`] for every Tab while trapping is enabled.
//! - [`FocusManager::restore`] (or [`FocusManager::discard`]) when it closes.
//!
//! None of these fail: detached elements are skipped, and an overlay with no
//! focusable content receives focus on its root so keyboard users still land
//! inside it.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::event::Key;
use crate::host::{Containment, FocusHost};

/// Kind of element, as far as native focusability is concerned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A button.
    Button,
    /// A link; only focusable by default when it has an `href`.
    Link {
        /// Whether the link has a target.
        has_href: bool,
    },
    /// A text or other input field.
    Input,
    /// A select box.
    Select,
    /// A multi-line text area.
    TextArea,
    /// Anything else; focusable only with an explicit tab index.
    Generic,
}

impl ElementKind {
    /// Whether elements of this kind take focus without an explicit tab index.
    pub const fn is_interactive(self) -> bool {
        match self {
            Self::Button | Self::Input | Self::Select | Self::TextArea => true,
            Self::Link { has_href } => has_href,
            Self::Generic => false,
        }
    }
}

/// A possibly focusable descendant reported by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusCandidate<K> {
    /// Element handle.
    pub id: K,
    /// Element kind.
    pub kind: ElementKind,
    /// Explicit tab index, if any.
    pub tab_index: Option<i32>,
    /// Whether the element is disabled.
    pub disabled: bool,
}

impl<K> FocusCandidate<K> {
    /// An enabled candidate without an explicit tab index.
    pub const fn new(id: K, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            tab_index: None,
            disabled: false,
        }
    }

    /// Set the explicit tab index.
    pub const fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Mark the candidate disabled.
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Whether this candidate participates in sequential focus navigation.
    pub const fn is_focusable(&self) -> bool {
        if self.disabled {
            return false;
        }
        match self.tab_index {
            Some(t) => t >= 0,
            None => self.kind.is_interactive(),
        }
    }
}

/// Focusable candidates in sequential navigation order.
///
/// `candidates` must be in document order.
pub fn tab_order<K: Copy>(candidates: &[FocusCandidate<K>]) -> Vec<K> {
    let mut focusable: Vec<&FocusCandidate<K>> =
        candidates.iter().filter(|c| c.is_focusable()).collect();
    // Stable: equal keys keep document order.
    focusable.sort_by(|a, b| compare_sequential(a, b));
    focusable.into_iter().map(|c| c.id).collect()
}

fn compare_sequential<K>(a: &FocusCandidate<K>, b: &FocusCandidate<K>) -> Ordering {
    let positive = |c: &FocusCandidate<K>| c.tab_index.filter(|t| *t > 0);
    match (positive(a), positive(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Focus state captured when an overlay opens.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusSnapshot<K> {
    /// Element that had focus before the overlay opened.
    pub previously_focused: Option<K>,
    /// First focusable descendant of the overlay.
    pub first_focusable: Option<K>,
    /// Last focusable descendant of the overlay.
    pub last_focusable: Option<K>,
}

/// Result of [`FocusManager::trap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrapOutcome<K> {
    /// Let the key through.
    Allow,
    /// Focus was moved to the element; the host must suppress the default action.
    Redirect(K),
}

impl<K> TrapOutcome<K> {
    /// Whether the host must suppress the key's default action.
    pub const fn suppresses_default(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Per-overlay focus handling.
#[derive(Clone, Debug)]
pub struct FocusManager<K> {
    root: K,
    initial_focus: Option<K>,
    return_focus_to: Option<K>,
    snapshot: Option<FocusSnapshot<K>>,
}

impl<K: Copy + Eq> FocusManager<K> {
    /// Create a manager for the overlay rooted at `root`.
    pub const fn new(root: K) -> Self {
        Self {
            root,
            initial_focus: None,
            return_focus_to: None,
            snapshot: None,
        }
    }

    /// The overlay root.
    pub const fn root(&self) -> K {
        self.root
    }

    /// Prefer `node` over the first focusable descendant in [`focus_first`](Self::focus_first)
    /// (for example a drawer's close button).
    pub fn set_initial_focus(&mut self, node: Option<K>) {
        self.initial_focus = node;
    }

    /// Restore focus to `node` instead of the previously focused element.
    pub fn set_return_focus_to(&mut self, node: Option<K>) {
        self.return_focus_to = node;
    }

    /// The live snapshot, if one was captured and not yet consumed.
    pub const fn captured(&self) -> Option<&FocusSnapshot<K>> {
        self.snapshot.as_ref()
    }

    /// Record the active element and the first/last focusable descendants.
    pub fn snapshot<H: FocusHost<K> + ?Sized>(&mut self, host: &H) -> FocusSnapshot<K> {
        let order = tab_order(&host.focusable_candidates(self.root));
        let snapshot = FocusSnapshot {
            previously_focused: host.active_element(),
            first_focusable: order.first().copied(),
            last_focusable: order.last().copied(),
        };
        self.snapshot = Some(snapshot);
        snapshot
    }

    /// Move focus into the overlay and return the element that received it.
    ///
    /// Preference: the configured initial focus target (when attached), then
    /// the first focusable descendant, then the overlay root itself.
    pub fn focus_first<H: FocusHost<K> + ?Sized>(&mut self, host: &mut H) -> K {
        let first = self.first_last(&*host).0;
        let target = self
            .initial_focus
            .filter(|n| host.is_attached(*n))
            .or(first)
            .unwrap_or(self.root);
        host.focus(target);
        target
    }

    /// Return focus to where it came from and consume the snapshot.
    ///
    /// Uses the configured return target when attached, otherwise the
    /// previously focused element when still attached. Returns the element
    /// that received focus; `None` when there was nothing to restore to or it
    /// already had focus.
    pub fn restore<H: FocusHost<K> + ?Sized>(&mut self, host: &mut H) -> Option<K> {
        let snapshot = self.snapshot.take()?;
        let target = self
            .return_focus_to
            .filter(|n| host.is_attached(*n))
            .or_else(|| snapshot.previously_focused.filter(|n| host.is_attached(*n)));
        let Some(target) = target else {
            #[cfg(feature = "tracing")]
            tracing::debug!("focus restore target detached, skipping");
            return None;
        };
        if host.active_element() == Some(target) {
            return None;
        }
        host.focus(target);
        Some(target)
    }

    /// Drop the snapshot without moving focus.
    pub fn discard(&mut self) {
        self.snapshot = None;
    }

    /// Keep Tab / Shift+Tab cycling inside the overlay.
    ///
    /// - Tab on the last focusable wraps to the first.
    /// - Shift+Tab on the first focusable (or on the root) wraps to the last.
    /// - Tab from outside the overlay is pulled back in.
    /// - With no focusable descendants, the root keeps focus.
    ///
    /// Any other key, and Tab between interior elements, is allowed through.
    pub fn trap<H>(&mut self, host: &mut H, key: Key, shift: bool) -> TrapOutcome<K>
    where
        H: FocusHost<K> + Containment<K> + ?Sized,
    {
        if key != Key::Tab {
            return TrapOutcome::Allow;
        }
        let (first, last) = self.first_last(&*host);
        let (Some(first), Some(last)) = (first, last) else {
            host.focus(self.root);
            return TrapOutcome::Redirect(self.root);
        };

        let active = host.active_element();
        let inside = active.is_some_and(|a| host.contains(self.root, a));
        let target = if shift {
            (active == Some(first) || active == Some(self.root) || !inside).then_some(last)
        } else {
            (active == Some(last) || !inside).then_some(first)
        };

        match target {
            Some(t) => {
                host.focus(t);
                TrapOutcome::Redirect(t)
            }
            None => TrapOutcome::Allow,
        }
    }

    /// First and last focusable descendants, re-enumerated when the snapshot
    /// is missing or refers to detached elements.
    fn first_last<H: FocusHost<K> + ?Sized>(&mut self, host: &H) -> (Option<K>, Option<K>) {
        if let Some(s) = &self.snapshot
            && let (Some(first), Some(last)) = (s.first_focusable, s.last_focusable)
            && host.is_attached(first)
            && host.is_attached(last)
        {
            return (Some(first), Some(last));
        }
        let order = tab_order(&host.focusable_candidates(self.root));
        let (first, last) = (order.first().copied(), order.last().copied());
        if let Some(s) = &mut self.snapshot {
            s.first_focusable = first;
            s.last_focusable = last;
        }
        (first, last)
    }
}
