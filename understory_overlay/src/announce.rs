// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live-region announcements for assistive technology.
//!
//! The announcer keeps exactly one message. Every transition replaces it;
//! nothing is queued, so rapid toggling may skip intermediate messages and
//! only the final state is read out.

use alloc::borrow::Cow;
use alloc::string::String;

use crate::event::Transition;

/// Urgency of a live region (`aria-live`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Politeness {
    /// Updates are not announced.
    Off,
    /// Announced when the user is idle.
    #[default]
    Polite,
    /// Announced immediately.
    Assertive,
}

impl Politeness {
    /// The `aria-live` attribute value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// Current contents and attributes of a live region.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LiveRegion<'a> {
    /// `aria-live` value.
    pub politeness: Politeness,
    /// `aria-atomic`: the whole region is read on change.
    pub atomic: bool,
    /// Text to render inside the visually hidden region.
    pub text: &'a str,
}

/// Single-message announcer driven by overlay transitions.
#[derive(Clone, Debug)]
pub struct Announcer {
    enabled: bool,
    politeness: Politeness,
    opened: Cow<'static, str>,
    closed: Cow<'static, str>,
    message: String,
}

impl Announcer {
    /// Create an announcer with the given messages.
    ///
    /// A disabled announcer never changes its (empty) message.
    pub fn new(
        enabled: bool,
        politeness: Politeness,
        opened: Cow<'static, str>,
        closed: Cow<'static, str>,
    ) -> Self {
        Self {
            enabled,
            politeness,
            opened,
            closed,
            message: String::new(),
        }
    }

    /// Whether transitions update the message.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replace the message for `transition`.
    pub fn announce(&mut self, transition: Transition) {
        if !self.enabled {
            return;
        }
        let text = match transition {
            Transition::Opened => &self.opened,
            Transition::Closed => &self.closed,
        };
        self.message.clear();
        self.message.push_str(text);
    }

    /// The current message; empty before the first announcement.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The live region to render, or `None` when announcements are disabled.
    pub fn live_region(&self) -> Option<LiveRegion<'_>> {
        self.enabled.then_some(LiveRegion {
            politeness: self.politeness,
            atomic: true,
            text: &self.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn announcer(enabled: bool) -> Announcer {
        Announcer::new(
            enabled,
            Politeness::Assertive,
            Cow::Borrowed("opened"),
            Cow::Borrowed("closed"),
        )
    }

    #[test]
    fn latest_transition_replaces_message() {
        let mut a = announcer(true);
        assert_eq!(a.message(), "");
        a.announce(Transition::Opened);
        assert_eq!(a.message(), "opened");
        a.announce(Transition::Closed);
        a.announce(Transition::Opened);
        assert_eq!(a.message(), "opened", "no queue, only the final state remains");
    }

    #[test]
    fn disabled_announcer_stays_silent() {
        let mut a = announcer(false);
        a.announce(Transition::Opened);
        assert_eq!(a.message(), "");
        assert!(a.live_region().is_none());
    }

    #[test]
    fn live_region_carries_politeness() {
        let mut a = announcer(true);
        a.announce(Transition::Closed);
        let region = a.live_region().expect("enabled announcer exposes a region");
        assert_eq!(region.politeness.as_str(), "assertive");
        assert!(region.atomic);
        assert_eq!(region.text, "closed");
    }
}
