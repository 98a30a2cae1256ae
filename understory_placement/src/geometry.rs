// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure placement geometry.
//!
//! Everything here is plain arithmetic over [`Rect`] and [`Size`]: no clamping,
//! no hidden state, and the same inputs always produce the same outputs, so it
//! can be re-run on every resize or scroll without drift.

use kurbo::{Point, Rect, Size};

use crate::types::{Align, Placement, Side};

/// Compute the overlay rectangle for `placement` without any viewport awareness.
///
/// The overlay's edge facing the anchor sits `offset` units away from the
/// matching anchor edge. Along the other axis the overlay is aligned per
/// [`Placement::align`]: leading edges for [`Align::Start`], centres for
/// [`Align::Center`], trailing edges for [`Align::End`].
///
/// Overflow is the caller's business; see [`crate::resolve`].
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_placement::{Placement, candidate_rect};
///
/// let anchor = Rect::from_origin_size((700.0, 10.0), (40.0, 20.0));
/// let r = candidate_rect(anchor, Placement::Bottom, Size::new(200.0, 100.0), 8.0);
/// assert_eq!((r.x0, r.y0), (620.0, 38.0));
/// ```
pub fn candidate_rect(anchor: Rect, placement: Placement, overlay: Size, offset: f64) -> Rect {
    let side = placement.side();
    let align = placement.align();

    let (x, y) = match side {
        Side::Top => (
            cross_start(anchor.x0, anchor.width(), overlay.width, align),
            anchor.y0 - overlay.height - offset,
        ),
        Side::Bottom => (
            cross_start(anchor.x0, anchor.width(), overlay.width, align),
            anchor.y1 + offset,
        ),
        Side::Left => (
            anchor.x0 - overlay.width - offset,
            cross_start(anchor.y0, anchor.height(), overlay.height, align),
        ),
        Side::Right => (
            anchor.x1 + offset,
            cross_start(anchor.y0, anchor.height(), overlay.height, align),
        ),
    };

    Rect::from_origin_size(Point::new(x, y), overlay)
}

/// Leading coordinate of the overlay along the anchor edge.
fn cross_start(anchor_start: f64, anchor_len: f64, overlay_len: f64, align: Align) -> f64 {
    match align {
        Align::Start => anchor_start,
        Align::Center => anchor_start + (anchor_len - overlay_len) / 2.0,
        Align::End => anchor_start + anchor_len - overlay_len,
    }
}

/// Signed overflow of a rectangle past each viewport edge.
///
/// Positive values mean the rectangle extends outside the viewport on that
/// edge by that amount; zero or negative values mean it fits.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Overflow {
    /// Overflow past the top edge.
    pub top: f64,
    /// Overflow past the right edge.
    pub right: f64,
    /// Overflow past the bottom edge.
    pub bottom: f64,
    /// Overflow past the left edge.
    pub left: f64,
}

impl Overflow {
    /// Overflow on the given viewport edge.
    pub const fn on(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }
}

/// Measure how far `rect` extends past each edge of `viewport`.
pub fn overflow(rect: Rect, viewport: Rect) -> Overflow {
    Overflow {
        top: viewport.y0 - rect.y0,
        right: rect.x1 - viewport.x1,
        bottom: rect.y1 - viewport.y1,
        left: viewport.x0 - rect.x0,
    }
}

/// Offset of an arrow along the overlay edge that faces the anchor.
///
/// `side` is the side of the anchor the overlay sits on; the arrow lives on
/// the opposite overlay edge. The returned value is measured from the
/// overlay's leading edge (left for vertical sides, top for horizontal
/// sides) and points at the anchor's centre, clamped to
/// `[padding, edge_length - padding]` so the arrow never leaves the overlay
/// even after viewport clamping has shifted it.
///
/// When the edge is shorter than `2 * padding` the arrow is centred.
pub fn arrow_offset(anchor: Rect, overlay: Rect, side: Side, padding: f64) -> f64 {
    let (target, start, len) = if side.is_vertical() {
        (anchor.center().x, overlay.x0, overlay.width())
    } else {
        (anchor.center().y, overlay.y0, overlay.height())
    };
    if len <= 2.0 * padding {
        return len / 2.0;
    }
    (target - start).max(padding).min(len - padding)
}

/// Rectangle of an edge-attached sheet (for example a drawer).
///
/// The sheet spans the whole viewport along the edge named by `side` and is
/// `extent` thick, clamped to `[0, viewport dimension]`.
///
/// ```
/// use kurbo::Rect;
/// use understory_placement::{Side, sheet_rect};
///
/// let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
/// assert_eq!(sheet_rect(viewport, Side::Right, 320.0), Rect::new(480.0, 0.0, 800.0, 600.0));
/// ```
pub fn sheet_rect(viewport: Rect, side: Side, extent: f64) -> Rect {
    let thickness = |available: f64| extent.max(0.0).min(available.max(0.0));
    match side {
        Side::Top => Rect::new(
            viewport.x0,
            viewport.y0,
            viewport.x1,
            viewport.y0 + thickness(viewport.height()),
        ),
        Side::Bottom => Rect::new(
            viewport.x0,
            viewport.y1 - thickness(viewport.height()),
            viewport.x1,
            viewport.y1,
        ),
        Side::Left => Rect::new(
            viewport.x0,
            viewport.y0,
            viewport.x0 + thickness(viewport.width()),
            viewport.y1,
        ),
        Side::Right => Rect::new(
            viewport.x1 - thickness(viewport.width()),
            viewport.y0,
            viewport.x1,
            viewport.y1,
        ),
    }
}
