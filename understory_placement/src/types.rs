// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: sides, alignments, placements, and resolved positions.

/// Side of the anchor an overlay is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Right of the anchor.
    Right,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor.
    Left,
}

impl Side {
    /// The opposite side (`Top` ↔ `Bottom`, `Left` ↔ `Right`).
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether this side stacks the overlay vertically relative to the anchor.
    ///
    /// For vertical sides the primary axis is `y` and the cross axis is `x`.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment of the overlay along the anchor edge it is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Align {
    /// Leading edges line up (left for vertical sides, top for horizontal sides).
    Start,
    /// Centres line up.
    Center,
    /// Trailing edges line up.
    End,
}

/// Symbolic placement of an overlay relative to its anchor.
///
/// Each value combines a [`Side`] with an [`Align`]; the bare side names
/// (`Top`, `Right`, …) are centre-aligned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Placement {
    /// Above, centred.
    Top,
    /// Above, leading edges aligned.
    TopStart,
    /// Above, trailing edges aligned.
    TopEnd,
    /// Right, centred.
    Right,
    /// Right, top edges aligned.
    RightStart,
    /// Right, bottom edges aligned.
    RightEnd,
    /// Below, centred.
    #[default]
    Bottom,
    /// Below, leading edges aligned.
    BottomStart,
    /// Below, trailing edges aligned.
    BottomEnd,
    /// Left, centred.
    Left,
    /// Left, top edges aligned.
    LeftStart,
    /// Left, bottom edges aligned.
    LeftEnd,
}

impl Placement {
    /// All twelve placements, grouped by side.
    pub const ALL: [Self; 12] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
    ];

    /// Build a placement from its side and alignment.
    pub const fn from_parts(side: Side, align: Align) -> Self {
        match (side, align) {
            (Side::Top, Align::Center) => Self::Top,
            (Side::Top, Align::Start) => Self::TopStart,
            (Side::Top, Align::End) => Self::TopEnd,
            (Side::Right, Align::Center) => Self::Right,
            (Side::Right, Align::Start) => Self::RightStart,
            (Side::Right, Align::End) => Self::RightEnd,
            (Side::Bottom, Align::Center) => Self::Bottom,
            (Side::Bottom, Align::Start) => Self::BottomStart,
            (Side::Bottom, Align::End) => Self::BottomEnd,
            (Side::Left, Align::Center) => Self::Left,
            (Side::Left, Align::Start) => Self::LeftStart,
            (Side::Left, Align::End) => Self::LeftEnd,
        }
    }

    /// The side of the anchor this placement attaches to.
    pub const fn side(self) -> Side {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Side::Top,
            Self::Right | Self::RightStart | Self::RightEnd => Side::Right,
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Side::Bottom,
            Self::Left | Self::LeftStart | Self::LeftEnd => Side::Left,
        }
    }

    /// The alignment along the attached anchor edge.
    pub const fn align(self) -> Align {
        match self {
            Self::Top | Self::Right | Self::Bottom | Self::Left => Align::Center,
            Self::TopStart | Self::RightStart | Self::BottomStart | Self::LeftStart => Align::Start,
            Self::TopEnd | Self::RightEnd | Self::BottomEnd | Self::LeftEnd => Align::End,
        }
    }

    /// The placement on the opposite side with the same alignment.
    pub const fn flipped(self) -> Self {
        Self::from_parts(self.side().opposite(), self.align())
    }

    /// Kebab-case name, matching the usual CSS/ARIA-adjacent spelling (`"bottom-start"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
        }
    }
}

/// Top-left corner of a placed overlay, in the same space as the anchor and viewport.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Position {
    /// Distance from the top of the coordinate space.
    pub top: f64,
    /// Distance from the left of the coordinate space.
    pub left: f64,
}

impl Position {
    /// Create a position from `top` and `left`.
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Outcome of placement resolution.
///
/// `placement` is the side/alignment actually used (possibly flipped);
/// `position` is the clamped top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Resolved {
    /// Placement actually used after flipping.
    pub placement: Placement,
    /// Clamped top-left corner of the overlay.
    pub position: Position,
}

/// How an overlay is positioned.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PositionStrategy {
    /// Attached to the anchor, flipped and clamped into the viewport.
    #[default]
    Anchored,
    /// Attached to the viewport edge named by the placement's side, spanning
    /// the full viewport along that edge (a drawer or sheet).
    Sheet {
        /// Thickness of the sheet perpendicular to its edge.
        extent: f64,
    },
}
