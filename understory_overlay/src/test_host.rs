// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host used by the unit tests.
//!
//! Fixture tree:
//!
//! ```text
//! BODY
//! ├── TRIGGER (button)
//! ├── OVERLAY
//! │   ├── A (button)
//! │   ├── B (button)
//! │   ├── DIV (generic, not focusable)
//! │   └── C (button)
//! └── OUTSIDE (button)
//! ```

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use kurbo::Rect;

use crate::focus::{ElementKind, FocusCandidate};
use crate::host::{Containment, FocusHost, LayoutHost, ListenerHost, ListenerSet};
use crate::trigger::{Trigger, TriggerHandlers};

pub(crate) const BODY: u32 = 1;
pub(crate) const TRIGGER: u32 = 10;
pub(crate) const OVERLAY: u32 = 20;
pub(crate) const A: u32 = 21;
pub(crate) const B: u32 = 22;
pub(crate) const C: u32 = 23;
pub(crate) const DIV: u32 = 24;
pub(crate) const OUTSIDE: u32 = 30;

#[derive(Debug, Default)]
pub(crate) struct FakeDom {
    parent: BTreeMap<u32, u32>,
    order: Vec<u32>,
    candidates: BTreeMap<u32, FocusCandidate<u32>>,
    detached: BTreeSet<u32>,
    bounds: BTreeMap<u32, Rect>,
    pub(crate) viewport: Option<Rect>,
    pub(crate) active: Option<u32>,
    pub(crate) subscribed: ListenerSet,
    pub(crate) subscribe_calls: usize,
    pub(crate) unsubscribe_calls: usize,
}

impl FakeDom {
    pub(crate) fn fixture() -> Self {
        let mut dom = Self::empty_overlay_fixture();
        dom.add(A, OVERLAY, Some(ElementKind::Button));
        dom.add(B, OVERLAY, Some(ElementKind::Button));
        dom.add(DIV, OVERLAY, Some(ElementKind::Generic));
        dom.add(C, OVERLAY, Some(ElementKind::Button));
        dom
    }

    /// Same tree without focusable overlay content.
    pub(crate) fn empty_overlay_fixture() -> Self {
        let mut dom = Self::default();
        dom.order.push(BODY);
        dom.add(TRIGGER, BODY, Some(ElementKind::Button));
        dom.add(OVERLAY, BODY, None);
        dom.add(OUTSIDE, BODY, Some(ElementKind::Button));
        dom.bounds
            .insert(TRIGGER, Rect::from_origin_size((100.0, 100.0), (40.0, 20.0)));
        dom.bounds
            .insert(OVERLAY, Rect::from_origin_size((0.0, 0.0), (200.0, 100.0)));
        dom.viewport = Some(Rect::new(0.0, 0.0, 800.0, 600.0));
        dom
    }

    pub(crate) fn add(&mut self, id: u32, parent: u32, kind: Option<ElementKind>) {
        self.parent.insert(id, parent);
        self.order.push(id);
        if let Some(kind) = kind {
            self.candidates.insert(id, FocusCandidate::new(id, kind));
        }
    }

    pub(crate) fn detach(&mut self, id: u32) {
        self.detached.insert(id);
    }

    pub(crate) fn set_bounds(&mut self, id: u32, rect: Option<Rect>) {
        match rect {
            Some(r) => self.bounds.insert(id, r),
            None => self.bounds.remove(&id),
        };
    }
}

impl FocusHost<u32> for FakeDom {
    fn active_element(&self) -> Option<u32> {
        self.active
    }

    fn is_attached(&self, node: u32) -> bool {
        if !self.order.contains(&node) {
            return false;
        }
        let mut cur = node;
        loop {
            if self.detached.contains(&cur) {
                return false;
            }
            match self.parent.get(&cur) {
                Some(p) => cur = *p,
                None => return true,
            }
        }
    }

    fn focus(&mut self, node: u32) {
        if self.is_attached(node) {
            self.active = Some(node);
        }
    }

    fn focusable_candidates(&self, root: u32) -> Vec<FocusCandidate<u32>> {
        self.order
            .iter()
            .filter(|n| **n != root && self.contains(root, **n) && self.is_attached(**n))
            .filter_map(|n| self.candidates.get(n).copied())
            .collect()
    }
}

impl Containment<u32> for FakeDom {
    fn contains(&self, root: u32, node: u32) -> bool {
        let mut cur = node;
        loop {
            if cur == root {
                return true;
            }
            match self.parent.get(&cur) {
                Some(p) => cur = *p,
                None => return false,
            }
        }
    }
}

impl LayoutHost<u32> for FakeDom {
    fn bounds(&self, node: u32) -> Option<Rect> {
        self.bounds.get(&node).copied()
    }

    fn viewport(&self) -> Option<Rect> {
        self.viewport
    }
}

impl ListenerHost for FakeDom {
    fn subscribe(&mut self, listeners: ListenerSet) {
        self.subscribe_calls += 1;
        self.subscribed |= listeners;
    }

    fn unsubscribe(&mut self, listeners: ListenerSet) {
        self.unsubscribe_calls += 1;
        self.subscribed -= listeners;
    }
}

#[derive(Debug)]
pub(crate) struct FakeTrigger {
    pub(crate) bound: TriggerHandlers,
}

impl FakeTrigger {
    pub(crate) fn new() -> Self {
        Self {
            bound: TriggerHandlers::empty(),
        }
    }
}

impl Trigger<u32> for FakeTrigger {
    fn element(&self) -> u32 {
        TRIGGER
    }

    fn bind_handlers(&mut self, handlers: TriggerHandlers) {
        self.bound = handlers;
    }
}
