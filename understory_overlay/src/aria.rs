// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ARIA wiring for triggers and overlays.
//!
//! The engine does not render markup; it computes the attribute sets a host
//! should apply. Attribute lists are ordered and only contain attributes that
//! apply in the current state (for example `aria-controls` only while open).

use alloc::format;
use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;

/// `role` of the overlay element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OverlayRole {
    /// Non-interactive contextual content.
    #[default]
    Tooltip,
    /// Interactive panel.
    Dialog,
    /// List of options.
    Listbox,
    /// Menu of actions.
    Menu,
}

impl OverlayRole {
    /// The `role` attribute value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tooltip => "tooltip",
            Self::Dialog => "dialog",
            Self::Listbox => "listbox",
            Self::Menu => "menu",
        }
    }
}

/// `aria-haspopup` value advertised by a trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PopupKind {
    /// Generic popup (`"true"`, equivalent to a menu).
    #[default]
    True,
    /// A dialog.
    Dialog,
    /// A menu.
    Menu,
    /// A listbox.
    Listbox,
    /// A tree.
    Tree,
    /// A grid.
    Grid,
}

impl PopupKind {
    /// The `aria-haspopup` attribute value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::Dialog => "dialog",
            Self::Menu => "menu",
            Self::Listbox => "listbox",
            Self::Tree => "tree",
            Self::Grid => "grid",
        }
    }
}

/// Value of a single attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttrValue<'a> {
    /// Rendered as `"true"` / `"false"`.
    Bool(bool),
    /// Rendered verbatim.
    Str(&'a str),
}

impl fmt::Display for AttrValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Ordered `(name, value)` attribute list.
pub type Attributes<'a> = SmallVec<[(&'static str, AttrValue<'a>); 6]>;

/// Element ids derived from one base id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayIds {
    /// Id of the overlay element.
    pub overlay: String,
    /// Id of the overlay title element.
    pub title: String,
    /// Id of the visually hidden description element.
    pub description: String,
}

impl OverlayIds {
    /// Derive `base`, `base-title`, and `base-description`.
    pub fn new(base: &str) -> Self {
        Self {
            overlay: String::from(base),
            title: format!("{base}-title"),
            description: format!("{base}-description"),
        }
    }
}

/// Attributes for the trigger element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TriggerAria<'a> {
    /// `aria-haspopup`.
    pub has_popup: PopupKind,
    /// `aria-expanded`.
    pub expanded: bool,
    /// `aria-controls`, present only while expanded.
    pub controls: Option<&'a str>,
}

impl<'a> TriggerAria<'a> {
    /// Trigger attributes for an overlay with id `overlay_id`.
    pub fn new(has_popup: PopupKind, expanded: bool, overlay_id: &'a str) -> Self {
        Self {
            has_popup,
            expanded,
            controls: expanded.then_some(overlay_id),
        }
    }

    /// The attribute list.
    pub fn attributes(&self) -> Attributes<'a> {
        let mut attrs = Attributes::new();
        attrs.push(("aria-haspopup", AttrValue::Str(self.has_popup.as_str())));
        attrs.push(("aria-expanded", AttrValue::Bool(self.expanded)));
        if let Some(id) = self.controls {
            attrs.push(("aria-controls", AttrValue::Str(id)));
        }
        attrs
    }
}

/// Attributes for the overlay element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OverlayAria<'a> {
    /// `id`.
    pub id: &'a str,
    /// `role`.
    pub role: OverlayRole,
    /// `aria-modal`, emitted only when `true`.
    pub modal: bool,
    /// `aria-label`.
    pub label: Option<&'a str>,
    /// `aria-labelledby`, set when a title is rendered.
    pub labelled_by: Option<&'a str>,
    /// `aria-describedby`, set when a description is rendered.
    pub described_by: Option<&'a str>,
}

impl<'a> OverlayAria<'a> {
    /// Overlay attributes. Title and description ids are wired only when the
    /// host renders a title or description.
    pub fn new(
        ids: &'a OverlayIds,
        role: OverlayRole,
        modal: bool,
        has_title: bool,
        has_description: bool,
    ) -> Self {
        Self {
            id: &ids.overlay,
            role,
            modal,
            label: None,
            labelled_by: has_title.then_some(ids.title.as_str()),
            described_by: has_description.then_some(ids.description.as_str()),
        }
    }

    /// Set an explicit `aria-label`.
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// The attribute list.
    pub fn attributes(&self) -> Attributes<'a> {
        let mut attrs = Attributes::new();
        attrs.push(("id", AttrValue::Str(self.id)));
        attrs.push(("role", AttrValue::Str(self.role.as_str())));
        if self.modal {
            attrs.push(("aria-modal", AttrValue::Bool(true)));
        }
        if let Some(label) = self.label {
            attrs.push(("aria-label", AttrValue::Str(label)));
        }
        if let Some(id) = self.labelled_by {
            attrs.push(("aria-labelledby", AttrValue::Str(id)));
        }
        if let Some(id) = self.described_by {
            attrs.push(("aria-describedby", AttrValue::Str(id)));
        }
        attrs
    }
}
