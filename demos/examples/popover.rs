// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click popover and hover tooltip driven against a simulated document.
//!
//! Shows:
//! - flipping and clamping near the viewport corner,
//! - focus capture, Tab trapping and focus restoration,
//! - outside-click dismissal and listener scoping,
//! - a hover tooltip whose open delay is driven by a host clock.
//!
//! Run:
//! - `cargo run -p understory_demos --example popover`

use kurbo::{Rect, Size};
use understory_demos::{SimButton, SimDom};
use understory_overlay::{
    ElementKind, FocusHost, Key, Overlay, OverlayConfig, OverlayEvent, OverlayIds, TriggerMode,
    tab_order,
};

const BODY: u32 = 1;
const BUTTON: u32 = 10;
const POPOVER: u32 = 20;
const SAVE: u32 = 21;
const CANCEL: u32 = 22;
const HELP: u32 = 30;
const TOOLTIP: u32 = 40;

fn main() {
    let mut dom = SimDom::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    dom.insert(BODY, None, "body", Some(Rect::new(0.0, 0.0, 800.0, 600.0)), None);
    dom.insert(
        BUTTON,
        Some(BODY),
        "menu button",
        Some(Rect::from_origin_size((700.0, 10.0), (40.0, 20.0))),
        Some(ElementKind::Button),
    );
    let popover_size = Size::new(200.0, 100.0);
    dom.insert(
        POPOVER,
        Some(BODY),
        "popover",
        Some(Rect::from_origin_size((0.0, 0.0), popover_size)),
        None,
    );
    dom.insert(SAVE, Some(POPOVER), "save", None, Some(ElementKind::Button));
    dom.insert(CANCEL, Some(POPOVER), "cancel", None, Some(ElementKind::Button));
    dom.insert(
        HELP,
        Some(BODY),
        "help link",
        Some(Rect::from_origin_size((20.0, 560.0), (60.0, 20.0))),
        Some(ElementKind::Link { has_href: true }),
    );
    dom.insert(
        TOOLTIP,
        Some(BODY),
        "tooltip",
        Some(Rect::from_origin_size((0.0, 0.0), (160.0, 40.0))),
        None,
    );

    println!("== click popover ==");
    let config = OverlayConfig {
        auto_focus: true,
        trap_focus: true,
        ..OverlayConfig::popover()
    };
    let mut button = SimButton::new(BUTTON);
    let mut popover = Overlay::new(config, &mut button, POPOVER);
    println!("trigger handlers: {:?}", button.handlers());

    dom.focus(BUTTON);
    let r = popover.handle(OverlayEvent::TriggerClick, 0, &mut dom);
    let state = *popover.state();
    println!(
        "{:?}: {:?} at top={} left={} (arrow at {:?})",
        r.transition,
        state.placement,
        state.position.top,
        state.position.left,
        popover.arrow_offset(&dom, 8.0),
    );
    dom.set_bounds(
        POPOVER,
        Rect::from_origin_size((state.position.left, state.position.top), popover_size),
    );
    println!("focus: {}", dom.name(dom.active_element()));

    for _ in 0..2 {
        let r = popover.handle(
            OverlayEvent::KeyDown {
                key: Key::Tab,
                shift: false,
            },
            5,
            &mut dom,
        );
        if !r.prevent_default {
            tab_forward(&mut dom, POPOVER);
        }
        println!("Tab -> focus: {} (prevent_default={})", dom.name(dom.active_element()), r.prevent_default);
    }

    let ids = OverlayIds::new("menu-popover");
    for (name, value) in popover.trigger_aria(&ids).attributes() {
        println!("  trigger {name}={value}");
    }
    if let Some(region) = popover.live_region() {
        println!("  live region ({}): {:?}", region.politeness.as_str(), region.text);
    }

    let r = popover.handle(OverlayEvent::PointerDown { target: BODY }, 10, &mut dom);
    println!(
        "outside click: {:?}, focus back on {}, listeners {:?}",
        r.transition,
        dom.name(dom.active_element()),
        dom.listeners()
    );

    println!("== hover tooltip ==");
    let config = OverlayConfig {
        trigger: TriggerMode::Hover,
        open_delay: 300,
        close_delay: 100,
        live_region: false,
        ..OverlayConfig::default()
    };
    let mut help = SimButton::new(HELP);
    let mut tooltip = Overlay::new(config, &mut help, TOOLTIP);
    println!("tooltip element handlers: {:?}", tooltip.overlay_handlers());
    tooltip.handle(OverlayEvent::TriggerPointerEnter, 1_000, &mut dom);
    let mut now = 1_000;
    while let Some(deadline) = tooltip.next_deadline() {
        now = deadline;
        if let Some(t) = tooltip.advance(now, &mut dom) {
            let s = tooltip.state();
            println!(
                "t={now}: {t:?} {:?} at top={} left={}",
                s.placement, s.position.top, s.position.left
            );
        }
    }
    tooltip.handle(
        OverlayEvent::TriggerPointerLeave {
            related: Some(BODY),
        },
        now + 50,
        &mut dom,
    );
    println!("pointer left: {:?}", tooltip.status());
    tooltip.handle(OverlayEvent::OverlayPointerEnter, now + 80, &mut dom);
    println!("pointer reached tooltip: {:?}", tooltip.status());
    tooltip.handle(
        OverlayEvent::OverlayPointerLeave {
            related: Some(BODY),
        },
        now + 200,
        &mut dom,
    );
    if let Some(deadline) = tooltip.next_deadline() {
        println!("t={deadline}: {:?}", tooltip.advance(deadline, &mut dom));
    }
}

/// Default Tab behavior, restricted to `root` for brevity.
fn tab_forward(dom: &mut SimDom, root: u32) {
    let order = tab_order(&dom.focusable_candidates(root));
    let next = match dom.active_element() {
        Some(cur) => order
            .iter()
            .position(|id| *id == cur)
            .and_then(|i| order.get(i + 1))
            .copied(),
        None => order.first().copied(),
    };
    if let Some(next) = next {
        dom.focus(next);
    }
}
