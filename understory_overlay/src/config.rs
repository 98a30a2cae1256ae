// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay configuration, presets, and validation.

use alloc::borrow::Cow;

use understory_placement::{Align, Placement, PositionStrategy, Side};

use crate::announce::Politeness;
use crate::aria::{OverlayRole, PopupKind};

/// Default distance between anchor and overlay edges.
pub const DEFAULT_OFFSET: f64 = 8.0;

/// Default drawer thickness used when a configured extent is unusable.
pub const DEFAULT_SHEET_EXTENT: f64 = 320.0;

/// Which trigger events drive an overlay open and closed.
///
/// Exactly one mode is active for the lifetime of an overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TriggerMode {
    /// Trigger activation toggles the overlay.
    #[default]
    Click,
    /// Pointer over the trigger or the overlay keeps it open.
    ///
    /// The overlay element needs pointer enter/leave handlers too; see
    /// [`TriggerHandlers::for_overlay`](crate::TriggerHandlers::for_overlay).
    Hover,
    /// Focus on the trigger (or inside the overlay) keeps it open.
    ///
    /// The overlay element needs a focus-out handler too.
    Focus,
    /// No automatic wiring; the host opens and closes the overlay.
    Manual,
}

/// Configuration for one overlay instance.
///
/// Delays are in milliseconds of the host clock passed to
/// [`Overlay`](crate::Overlay) methods.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    /// Requested placement relative to the trigger.
    pub placement: Placement,
    /// Anchored to the trigger, or attached to a viewport edge.
    pub strategy: PositionStrategy,
    /// Distance between the anchor edge and the overlay edge.
    pub offset: f64,
    /// Which trigger events open and close the overlay.
    pub trigger: TriggerMode,
    /// Delay before opening; `0` opens immediately.
    pub open_delay: u64,
    /// Delay before closing; `0` closes immediately.
    pub close_delay: u64,
    /// Close when Escape is pressed while open.
    pub close_on_esc: bool,
    /// Close on pointer-down outside the overlay and trigger.
    pub close_on_click_outside: bool,
    /// Move focus into the overlay when it opens.
    pub auto_focus: bool,
    /// Restore focus to the previously focused element when it closes.
    pub return_focus: bool,
    /// Keep Tab / Shift+Tab cycling inside the overlay.
    pub trap_focus: bool,
    /// Announce open/close transitions through a live region.
    pub live_region: bool,
    /// Politeness of the live region.
    pub politeness: Politeness,
    /// Message announced when the overlay opens.
    pub opened_message: Cow<'static, str>,
    /// Message announced when the overlay closes.
    pub closed_message: Cow<'static, str>,
    /// Start open when mounted (uncontrolled overlays only).
    pub default_open: bool,
    /// ARIA role of the overlay element.
    pub role: OverlayRole,
    /// Mark the overlay as `aria-modal`.
    pub modal: bool,
    /// `aria-haspopup` value advertised by the trigger.
    pub has_popup: PopupKind,
    /// Ask the host to lock background scrolling while open.
    pub lock_scroll: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            placement: Placement::Bottom,
            strategy: PositionStrategy::Anchored,
            offset: DEFAULT_OFFSET,
            trigger: TriggerMode::Click,
            open_delay: 0,
            close_delay: 0,
            close_on_esc: true,
            close_on_click_outside: true,
            auto_focus: false,
            return_focus: true,
            trap_focus: false,
            live_region: true,
            politeness: Politeness::Polite,
            opened_message: Cow::Borrowed("Overlay opened"),
            closed_message: Cow::Borrowed("Overlay closed"),
            default_open: false,
            role: OverlayRole::Tooltip,
            modal: false,
            has_popup: PopupKind::True,
            lock_scroll: false,
        }
    }
}

impl OverlayConfig {
    /// Contextual popover anchored below its trigger, toggled by click.
    pub fn popover() -> Self {
        Self::default()
    }

    /// Modal drawer attached to the `side` edge of the viewport.
    ///
    /// Drawers are usually controlled by the host, so the trigger mode is
    /// [`TriggerMode::Manual`]; Escape and clicks outside still close them.
    pub fn drawer(side: Side, extent: f64) -> Self {
        Self {
            placement: Placement::from_parts(side, Align::Center),
            strategy: PositionStrategy::Sheet { extent },
            offset: 0.0,
            trigger: TriggerMode::Manual,
            auto_focus: true,
            trap_focus: true,
            live_region: false,
            role: OverlayRole::Dialog,
            modal: true,
            has_popup: PopupKind::Dialog,
            lock_scroll: true,
            ..Self::default()
        }
    }

    /// Listbox dropdown under a form field, as used by a time picker.
    pub fn dropdown() -> Self {
        Self {
            placement: Placement::BottomStart,
            offset: 4.0,
            live_region: false,
            role: OverlayRole::Listbox,
            has_popup: PopupKind::Listbox,
            ..Self::default()
        }
    }

    /// Check the configuration for values the engine cannot use as given.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.offset.is_finite() {
            return Err(ConfigError::NonFiniteOffset(self.offset));
        }
        if let PositionStrategy::Sheet { extent } = self.strategy
            && !(extent.is_finite() && extent >= 0.0)
        {
            return Err(ConfigError::InvalidSheetExtent(extent));
        }
        Ok(())
    }

    /// Replace every value [`validate`](Self::validate) would reject with its default.
    ///
    /// The controller runs this on construction, so a bad configuration
    /// degrades instead of failing.
    pub fn sanitized(mut self) -> Self {
        if !self.offset.is_finite() {
            #[cfg(feature = "tracing")]
            tracing::warn!(offset = self.offset, "non-finite overlay offset, using default");
            self.offset = DEFAULT_OFFSET;
        }
        if let PositionStrategy::Sheet { extent } = self.strategy
            && !(extent.is_finite() && extent >= 0.0)
        {
            #[cfg(feature = "tracing")]
            tracing::warn!(extent, "invalid sheet extent, using default");
            self.strategy = PositionStrategy::Sheet {
                extent: DEFAULT_SHEET_EXTENT,
            };
        }
        self
    }
}

/// A configuration value the engine cannot use as given.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The anchor offset is NaN or infinite.
    #[error("overlay offset must be finite, got {0}")]
    NonFiniteOffset(f64),
    /// The sheet extent is negative, NaN, or infinite.
    #[error("sheet extent must be finite and non-negative, got {0}")]
    InvalidSheetExtent(f64),
}
