// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time options for the touch backend.

use core::time::Duration;

use smallvec::SmallVec;

use crate::event::{EventKind, GesturePhase, Modality};

/// Options fixed when a [`TouchBackend`](crate::TouchBackend) is built.
///
/// The backend listens to the union of the enabled modalities. With both
/// enabled it answers to whichever device the user picks up.
///
/// ```
/// use core::time::Duration;
/// use understory_touch_backend::TouchBackendOptions;
/// use understory_touch_backend::event::Modality;
///
/// let opts = TouchBackendOptions::default()
///     .with_mouse_events(true)
///     .with_delay(Duration::from_millis(200))
///     .with_mouse_delay(Duration::ZERO);
///
/// assert_eq!(opts.delay_for(Modality::Touch), Duration::from_millis(200));
/// assert_eq!(opts.delay_for(Modality::Mouse), Duration::ZERO);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TouchBackendOptions {
    /// Listen to touch events. Defaults to `true`.
    pub enable_touch_events: bool,
    /// Listen to mouse events. Defaults to `false`.
    pub enable_mouse_events: bool,
    /// Long-press window before a start is recorded. Zero records it immediately.
    pub delay: Duration,
    /// Overrides [`delay`](Self::delay) for touch starts.
    pub delay_touch_start: Option<Duration>,
    /// Overrides [`delay`](Self::delay) for mouse starts.
    pub delay_mouse_start: Option<Duration>,
}

impl Default for TouchBackendOptions {
    fn default() -> Self {
        Self {
            enable_touch_events: true,
            enable_mouse_events: false,
            delay: Duration::ZERO,
            delay_touch_start: None,
            delay_mouse_start: None,
        }
    }
}

impl TouchBackendOptions {
    /// Enable or disable touch input.
    pub fn with_touch_events(mut self, enable: bool) -> Self {
        self.enable_touch_events = enable;
        self
    }

    /// Enable or disable mouse input.
    pub fn with_mouse_events(mut self, enable: bool) -> Self {
        self.enable_mouse_events = enable;
        self
    }

    /// Set the start delay for every modality without an override.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the start delay for touch input only.
    pub fn with_touch_delay(mut self, delay: Duration) -> Self {
        self.delay_touch_start = Some(delay);
        self
    }

    /// Set the start delay for mouse input only.
    pub fn with_mouse_delay(mut self, delay: Duration) -> Self {
        self.delay_mouse_start = Some(delay);
        self
    }

    /// Effective start delay for `modality`.
    pub fn delay_for(&self, modality: Modality) -> Duration {
        let over = match modality {
            Modality::Mouse => self.delay_mouse_start,
            Modality::Touch => self.delay_touch_start,
        };
        over.unwrap_or(self.delay)
    }

    /// Enabled modalities, mouse first.
    pub fn modalities(&self) -> impl Iterator<Item = Modality> {
        [
            (self.enable_mouse_events, Modality::Mouse),
            (self.enable_touch_events, Modality::Touch),
        ]
        .into_iter()
        .filter_map(|(on, m)| on.then_some(m))
    }

    /// Enabled event kinds for one gesture phase.
    pub fn kinds(&self, phase: GesturePhase) -> SmallVec<[EventKind; 4]> {
        self.modalities()
            .flat_map(|m| EventKind::kinds(m, phase).iter().copied())
            .collect()
    }

    /// Enabled start kinds.
    pub fn start_kinds(&self) -> SmallVec<[EventKind; 4]> {
        self.kinds(GesturePhase::Start)
    }

    /// Enabled move kinds.
    pub fn move_kinds(&self) -> SmallVec<[EventKind; 4]> {
        self.kinds(GesturePhase::Move)
    }

    /// Enabled end kinds.
    pub fn end_kinds(&self) -> SmallVec<[EventKind; 4]> {
        self.kinds(GesturePhase::End)
    }
}
