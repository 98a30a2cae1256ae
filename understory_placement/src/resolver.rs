// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement resolution: flip on primary-axis overflow, then clamp into the viewport.
//!
//! ## Algorithm
//!
//! 1. Compute the candidate rectangle for the preferred placement.
//! 2. If it overflows the viewport on its primary side (for example the
//!    bottom edge of a `Bottom*` placement), compute the flipped candidate.
//!    The flip is taken when the flipped candidate fits on its own primary
//!    side, or when it overflows strictly less. Exact fits and ties keep the
//!    requested placement.
//! 3. Clamp the top-left corner into
//!    `[viewport.x0, viewport.x1 - overlay.width]` ×
//!    `[viewport.y0, viewport.y1 - overlay.height]`. An overlay larger than
//!    the viewport is pinned to the viewport's leading edge.
//!
//! Clamping only moves the position; the placement (and therefore which side
//! an arrow is drawn on) is decided in step 2.
//!
//! [`resolve`] is a pure function. [`PlacementResolver`] wraps it with the
//! "last known good" memory needed when measurements are temporarily
//! unavailable (for example before the overlay has been laid out).

use kurbo::{Rect, Size};

use crate::geometry::{candidate_rect, overflow, sheet_rect};
use crate::types::{Placement, Position, PositionStrategy, Resolved};

/// Resolve the placement and clamped position of an overlay.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_placement::{Placement, Position, resolve};
///
/// let anchor = Rect::from_origin_size((700.0, 10.0), (40.0, 20.0));
/// let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
/// let r = resolve(anchor, Placement::Bottom, Size::new(200.0, 100.0), viewport, 8.0);
/// assert_eq!(r.placement, Placement::Bottom);
/// assert_eq!(r.position, Position::new(38.0, 600.0));
/// ```
pub fn resolve(
    anchor: Rect,
    preferred: Placement,
    overlay: Size,
    viewport: Rect,
    offset: f64,
) -> Resolved {
    let first = candidate_rect(anchor, preferred, overlay, offset);
    let first_over = overflow(first, viewport).on(preferred.side());

    let (placement, rect) = if first_over > 0.0 {
        let flipped = preferred.flipped();
        let alt = candidate_rect(anchor, flipped, overlay, offset);
        let alt_over = overflow(alt, viewport).on(flipped.side());
        if alt_over <= 0.0 || alt_over < first_over {
            (flipped, alt)
        } else {
            (preferred, first)
        }
    } else {
        (preferred, first)
    };

    Resolved {
        placement,
        position: Position {
            top: clamp_axis(rect.y0, viewport.y0, viewport.y1 - overlay.height),
            left: clamp_axis(rect.x0, viewport.x0, viewport.x1 - overlay.width),
        },
    }
}

/// Clamp `v` into `[min, max]`, preferring `min` when the range is empty.
fn clamp_axis(v: f64, min: f64, max: f64) -> f64 {
    v.min(max).max(min)
}

/// Host measurements fed to [`PlacementResolver::resolve_measured`].
///
/// `None` means "not measurable right now" (element detached, not yet laid
/// out, or otherwise unavailable).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Measurements {
    /// Bounds of the anchor (trigger) element.
    pub anchor: Option<Rect>,
    /// Size of the overlay content.
    pub overlay: Option<Size>,
    /// Bounds of the viewport.
    pub viewport: Option<Rect>,
}

/// Result of [`PlacementResolver::resolve_measured`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolution {
    /// The placement and position to use.
    pub resolved: Resolved,
    /// `false` when the measurements were unusable and `resolved` is a fallback.
    pub measured: bool,
}

/// Stateful placement resolver that remembers the last good result.
///
/// ## Usage
///
/// - Call [`PlacementResolver::resolve_measured`] when the overlay opens and
///   again on every resize or scroll while it stays open.
/// - When any measurement is missing, non-finite, or zero-sized, the last
///   good result is returned instead; before any good result exists the
///   overlay falls back to the viewport origin with the requested placement.
/// - Call [`PlacementResolver::reset`] when the anchor changes identity.
#[derive(Clone, Debug, Default)]
pub struct PlacementResolver {
    last_good: Option<Resolved>,
}

impl PlacementResolver {
    /// Create a resolver with no remembered result.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last result computed from usable measurements, if any.
    pub fn last_good(&self) -> Option<Resolved> {
        self.last_good
    }

    /// Forget the remembered result.
    pub fn reset(&mut self) {
        self.last_good = None;
    }

    /// Resolve using possibly-missing measurements.
    ///
    /// For [`PositionStrategy::Sheet`] only the viewport is required and the
    /// placement is always the requested one.
    pub fn resolve_measured(
        &mut self,
        measurements: Measurements,
        preferred: Placement,
        strategy: PositionStrategy,
        offset: f64,
    ) -> Resolution {
        let viewport = measurements.viewport.filter(|v| has_area(*v));
        let fresh = match strategy {
            PositionStrategy::Anchored => {
                let anchor = measurements.anchor.filter(|a| is_laid_out(*a));
                let overlay = measurements
                    .overlay
                    .filter(|s| s.is_finite() && s.width > 0.0 && s.height > 0.0);
                match (anchor, overlay, viewport) {
                    (Some(a), Some(o), Some(v)) if offset.is_finite() => {
                        Some(resolve(a, preferred, o, v, offset))
                    }
                    _ => None,
                }
            }
            PositionStrategy::Sheet { extent } if extent.is_finite() => viewport.map(|v| {
                let r = sheet_rect(v, preferred.side(), extent);
                Resolved {
                    placement: preferred,
                    position: Position::new(r.y0, r.x0),
                }
            }),
            PositionStrategy::Sheet { .. } => None,
        };

        match fresh {
            Some(resolved) => {
                self.last_good = Some(resolved);
                Resolution {
                    resolved,
                    measured: true,
                }
            }
            None => {
                let resolved = self.last_good.unwrap_or_else(|| Resolved {
                    placement: preferred,
                    position: viewport
                        .map(|v| Position::new(v.y0, v.x0))
                        .unwrap_or_default(),
                });
                Resolution {
                    resolved,
                    measured: false,
                }
            }
        }
    }
}

fn has_area(r: Rect) -> bool {
    r.is_finite() && r.width() > 0.0 && r.height() > 0.0
}

/// An anchor may be a zero-width caret or zero-height rule, but not a 0×0 box.
fn is_laid_out(r: Rect) -> bool {
    r.is_finite()
        && r.width() >= 0.0
        && r.height() >= 0.0
        && (r.width() > 0.0 || r.height() > 0.0)
}
