// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny simulated document shared by the demos.
//!
//! Nodes form a tree keyed by `u32`. Each node may have bounds (viewport
//! coordinates) and a focusable element kind.

use std::collections::HashMap;

use kurbo::Rect;
use understory_overlay::{
    Containment, ElementKind, FocusCandidate, FocusHost, LayoutHost, ListenerHost, ListenerSet,
    Trigger, TriggerHandlers,
};

#[derive(Clone, Debug)]
struct Node {
    parent: Option<u32>,
    bounds: Option<Rect>,
    kind: Option<ElementKind>,
    name: &'static str,
}

/// Simulated document.
#[derive(Debug)]
pub struct SimDom {
    nodes: HashMap<u32, Node>,
    order: Vec<u32>,
    viewport: Rect,
    active: Option<u32>,
    listeners: ListenerSet,
}

impl SimDom {
    /// An empty document with the given viewport.
    pub fn new(viewport: Rect) -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            viewport,
            active: None,
            listeners: ListenerSet::empty(),
        }
    }

    /// Append a node in document order.
    pub fn insert(
        &mut self,
        id: u32,
        parent: Option<u32>,
        name: &'static str,
        bounds: Option<Rect>,
        kind: Option<ElementKind>,
    ) {
        self.nodes.insert(
            id,
            Node {
                parent,
                bounds,
                kind,
                name,
            },
        );
        self.order.push(id);
    }

    /// Detach a node (and implicitly its subtree).
    pub fn remove(&mut self, id: u32) {
        self.nodes.remove(&id);
        self.order.retain(|n| *n != id);
    }

    /// Move a node.
    pub fn set_bounds(&mut self, id: u32, bounds: Rect) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.bounds = Some(bounds);
        }
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Human-readable name of a node, for printing.
    pub fn name(&self, id: Option<u32>) -> &'static str {
        id.and_then(|id| self.nodes.get(&id))
            .map_or("<none>", |n| n.name)
    }

    /// Currently registered global listeners.
    pub fn listeners(&self) -> ListenerSet {
        self.listeners
    }
}

impl FocusHost<u32> for SimDom {
    fn active_element(&self) -> Option<u32> {
        self.active
    }

    fn is_attached(&self, node: u32) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            match self.nodes.get(&id) {
                Some(n) => cur = n.parent,
                None => return false,
            }
        }
        true
    }

    fn focus(&mut self, node: u32) {
        if self.is_attached(node) {
            self.active = Some(node);
        }
    }

    fn focusable_candidates(&self, root: u32) -> Vec<FocusCandidate<u32>> {
        self.order
            .iter()
            .filter(|id| **id != root && self.contains(root, **id) && self.is_attached(**id))
            .filter_map(|id| {
                let kind = self.nodes.get(id)?.kind?;
                Some(FocusCandidate::new(*id, kind))
            })
            .collect()
    }
}

impl Containment<u32> for SimDom {
    fn contains(&self, root: u32, node: u32) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == root {
                return true;
            }
            cur = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }
}

impl LayoutHost<u32> for SimDom {
    fn bounds(&self, node: u32) -> Option<Rect> {
        self.nodes.get(&node)?.bounds
    }

    fn viewport(&self) -> Option<Rect> {
        Some(self.viewport)
    }
}

impl ListenerHost for SimDom {
    fn subscribe(&mut self, listeners: ListenerSet) {
        println!("  [host] subscribe {listeners:?}");
        self.listeners |= listeners;
    }

    fn unsubscribe(&mut self, listeners: ListenerSet) {
        println!("  [host] unsubscribe {listeners:?}");
        self.listeners -= listeners;
    }
}

/// A trigger button that records which handlers the overlay asked for.
#[derive(Debug)]
pub struct SimButton {
    id: u32,
    handlers: TriggerHandlers,
}

impl SimButton {
    /// Wrap element `id`.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            handlers: TriggerHandlers::empty(),
        }
    }

    /// Handlers currently bound.
    pub fn handlers(&self) -> TriggerHandlers {
        self.handlers
    }
}

impl Trigger<u32> for SimButton {
    fn element(&self) -> u32 {
        self.id
    }

    fn bind_handlers(&mut self, handlers: TriggerHandlers) {
        self.handlers = handlers;
    }
}
