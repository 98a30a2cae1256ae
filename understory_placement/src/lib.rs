// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: anchor-relative placement for floating overlays.
//!
//! This crate answers one question: given an anchor rectangle, the size of an
//! overlay (popover, tooltip, dropdown), a preferred [`Placement`] and the
//! viewport, where should the overlay go?
//!
//! - [`candidate_rect`] computes the raw rectangle for a placement: the overlay
//!   edge sits `offset` units from the matching anchor edge and is aligned along
//!   the other axis per the placement's [`Align`].
//! - [`resolve`] flips to the opposite side when the preferred side overflows
//!   the viewport, then clamps the top-left corner into the viewport. Clamping
//!   never changes the placement, so arrow graphics stay on the right side.
//! - [`PlacementResolver`] remembers the last good result and falls back to it
//!   when measurements are missing (for example before layout).
//! - [`arrow_offset`] keeps an arrow pointing at the anchor after clamping, and
//!   [`sheet_rect`] places edge-attached panels such as drawers.
//!
//! All geometry is expressed with [`kurbo`] types in a single coordinate space
//! (typically viewport-relative, scroll-adjusted). Float inputs are assumed to be
//! finite unless they come through [`PlacementResolver::resolve_measured`], which
//! filters them.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_placement::{Placement, resolve};
//!
//! let anchor = Rect::from_origin_size((300.0, 550.0), (40.0, 20.0));
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//!
//! // Not enough room below the anchor, so the overlay flips above it.
//! let r = resolve(anchor, Placement::Bottom, Size::new(200.0, 100.0), viewport, 8.0);
//! assert_eq!(r.placement, Placement::Top);
//! assert_eq!(r.position.top, 442.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for the placement enums and
//!   [`PositionStrategy`] so they can live in configuration files.
//!
//! This crate is `no_std`.

#![no_std]

mod geometry;
mod resolver;
mod types;

pub use geometry::{Overflow, arrow_offset, candidate_rect, overflow, sheet_rect};
pub use resolver::{Measurements, PlacementResolver, Resolution, resolve};
pub use types::{Align, Placement, Position, PositionStrategy, Resolved, Side};
