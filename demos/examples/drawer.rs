// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controlled drawer: the host owns `is_open`, the overlay only asks.
//!
//! Shows:
//! - the drawer preset (edge sheet, modal dialog, focus trap, scroll lock),
//! - advisory open-change requests answered with `set_open`,
//! - ARIA wiring for a titled dialog.
//!
//! Run:
//! - `cargo run -p understory_demos --example drawer`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Rect;
use understory_demos::{SimButton, SimDom};
use understory_overlay::{
    ElementKind, FocusHost, Key, Overlay, OverlayConfig, OverlayEvent, OverlayIds, Side,
};

const BODY: u32 = 1;
const MENU: u32 = 10;
const DRAWER: u32 = 20;
const CLOSE: u32 = 21;
const HOME: u32 = 22;

fn main() {
    let mut dom = SimDom::new(Rect::new(0.0, 0.0, 1024.0, 768.0));
    dom.insert(BODY, None, "body", Some(Rect::new(0.0, 0.0, 1024.0, 768.0)), None);
    dom.insert(
        MENU,
        Some(BODY),
        "menu",
        Some(Rect::from_origin_size((16.0, 16.0), (32.0, 32.0))),
        Some(ElementKind::Button),
    );
    dom.insert(DRAWER, Some(BODY), "drawer", None, None);
    dom.insert(HOME, Some(DRAWER), "home link", None, Some(ElementKind::Link { has_href: true }));
    dom.insert(CLOSE, Some(DRAWER), "close button", None, Some(ElementKind::Button));

    // The application's state; the drawer only reports requests.
    let requested: Rc<Cell<Option<bool>>> = Rc::new(Cell::new(None));
    let sink = Rc::clone(&requested);
    let mut menu = SimButton::new(MENU);
    let mut drawer = Overlay::controlled(
        OverlayConfig::drawer(Side::Left, 280.0),
        &mut menu,
        DRAWER,
        false,
        move |open| sink.set(Some(open)),
    )
    .with_initial_focus(CLOSE);
    drawer.mount(&mut dom);

    dom.focus(MENU);
    // The menu button is wired by the application itself (manual trigger).
    drawer.open(&mut dom);
    apply(&mut drawer, &mut dom, &requested);
    let s = drawer.state();
    println!(
        "open: {:?} at top={} left={}, scroll locked={}",
        s.placement,
        s.position.top,
        s.position.left,
        drawer.is_scroll_locked()
    );
    println!("focus: {}", dom.name(dom.active_element()));

    let ids = OverlayIds::new("nav-drawer");
    let aria = drawer.overlay_aria(&ids, true, true);
    for (name, value) in aria.attributes() {
        println!("  drawer {name}={value}");
    }

    let r = drawer.handle(
        OverlayEvent::KeyDown {
            key: Key::Tab,
            shift: false,
        },
        0,
        &mut dom,
    );
    println!(
        "Tab on last element wraps to: {} (prevent_default={})",
        dom.name(dom.active_element()),
        r.prevent_default
    );

    let r = drawer.handle(
        OverlayEvent::KeyDown {
            key: Key::Escape,
            shift: false,
        },
        0,
        &mut dom,
    );
    println!(
        "Escape: transition={:?}, requested={:?}",
        r.transition,
        requested.get()
    );
    apply(&mut drawer, &mut dom, &requested);
    println!(
        "after host update: {:?}, focus: {}, scroll locked={}",
        drawer.status(),
        dom.name(dom.active_element()),
        drawer.is_scroll_locked()
    );
}

/// The application honors every request.
fn apply(drawer: &mut Overlay<u32>, dom: &mut SimDom, requested: &Cell<Option<bool>>) {
    if let Some(open) = requested.take()
        && let Some(t) = drawer.set_open(open, dom)
    {
        println!("  [app] set_open({open}) -> {t:?}");
    }
}
