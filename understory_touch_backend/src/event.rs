// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-agnostic pointer events.
//!
//! Hosts translate their native mouse and touch events into [`PointerEvent`]
//! values before handing them to the backend. The event records whether a
//! handler asked to suppress the host's default action or to stop propagation;
//! the host reads those flags back after dispatch.
//!
//! ```
//! use kurbo::Point;
//! use understory_touch_backend::event::{EventKind, PointerEvent, point_from_event};
//!
//! let one = PointerEvent::touch(EventKind::TouchMove, [Point::new(3.0, 4.0)]);
//! assert_eq!(point_from_event(&one), Some(Point::new(3.0, 4.0)));
//!
//! // Two fingers down: no single point to follow.
//! let two = PointerEvent::touch(EventKind::TouchMove, [Point::ZERO, Point::new(1.0, 1.0)]);
//! assert_eq!(point_from_event(&two), None);
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// Input device family an event kind belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Mouse (or pen emulating a mouse).
    Mouse,
    /// Touch screen.
    Touch,
}

/// Where in a gesture an event kind falls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// Pointer went down.
    Start,
    /// Pointer moved.
    Move,
    /// Pointer went up or the sequence was cancelled.
    End,
}

/// Raw event kinds the backend can listen for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `mousedown`
    MouseDown,
    /// `mousemove`
    MouseMove,
    /// `mouseup`
    MouseUp,
    /// `touchstart`
    TouchStart,
    /// `touchmove`
    TouchMove,
    /// `touchend`
    TouchEnd,
    /// `touchcancel`; ends the gesture like [`EventKind::TouchEnd`].
    TouchCancel,
    /// `click`, including clicks synthesized after a touch tap.
    Click,
}

impl EventKind {
    /// Input modality of this kind; `None` for [`EventKind::Click`].
    pub fn modality(self) -> Option<Modality> {
        match self {
            Self::MouseDown | Self::MouseMove | Self::MouseUp => Some(Modality::Mouse),
            Self::TouchStart | Self::TouchMove | Self::TouchEnd | Self::TouchCancel => {
                Some(Modality::Touch)
            }
            Self::Click => None,
        }
    }

    /// Gesture phase of this kind; `None` for [`EventKind::Click`].
    pub fn phase(self) -> Option<GesturePhase> {
        match self {
            Self::MouseDown | Self::TouchStart => Some(GesturePhase::Start),
            Self::MouseMove | Self::TouchMove => Some(GesturePhase::Move),
            Self::MouseUp | Self::TouchEnd | Self::TouchCancel => Some(GesturePhase::End),
            Self::Click => None,
        }
    }

    /// Kinds of `modality` that fall in `phase`.
    pub fn kinds(modality: Modality, phase: GesturePhase) -> &'static [Self] {
        match (modality, phase) {
            (Modality::Mouse, GesturePhase::Start) => &[Self::MouseDown],
            (Modality::Mouse, GesturePhase::Move) => &[Self::MouseMove],
            (Modality::Mouse, GesturePhase::End) => &[Self::MouseUp],
            (Modality::Touch, GesturePhase::Start) => &[Self::TouchStart],
            (Modality::Touch, GesturePhase::Move) => &[Self::TouchMove],
            (Modality::Touch, GesturePhase::End) => &[Self::TouchEnd, Self::TouchCancel],
        }
    }
}

/// Pointer coordinates carried by an event, in client space.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerInput {
    /// A mouse event at a single position.
    Mouse {
        /// Pointer position.
        position: Point,
    },
    /// A touch event with every touch point still on the surface.
    Touch {
        /// Active touches.
        touches: SmallVec<[Point; 2]>,
    },
}

/// A pointer event as seen by the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Raw kind.
    pub kind: EventKind,
    /// Pointer coordinates.
    pub input: PointerInput,
    /// Whether the event target is a form control (input, select, textarea).
    ///
    /// Default actions are never suppressed for such targets so they stay usable.
    pub target_is_form_control: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    /// Build an event from its parts.
    pub fn new(kind: EventKind, input: PointerInput) -> Self {
        Self {
            kind,
            input,
            target_is_form_control: false,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// A mouse event at `position`.
    pub fn mouse(kind: EventKind, position: Point) -> Self {
        Self::new(kind, PointerInput::Mouse { position })
    }

    /// A touch event with the given active touches.
    pub fn touch(kind: EventKind, touches: impl IntoIterator<Item = Point>) -> Self {
        Self::new(
            kind,
            PointerInput::Touch {
                touches: touches.into_iter().collect(),
            },
        )
    }

    /// Mark the target as a form control.
    pub fn with_form_control_target(mut self, yes: bool) -> Self {
        self.target_is_form_control = yes;
        self
    }

    /// The single point this event resolves to, see [`point_from_event`].
    pub fn point(&self) -> Option<Point> {
        point_from_event(self)
    }

    /// Ask the host to skip its default action (text selection, native scroll).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler asked to skip the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Ask the host not to deliver this event to any further listener.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a handler stopped propagation.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Resolve an event to a single client-space point.
///
/// Mouse events resolve to their position. Touch events resolve only while
/// exactly one touch is active; with none or several there is no single
/// pointer to follow and the event is ignored for gesture purposes.
pub fn point_from_event(event: &PointerEvent) -> Option<Point> {
    match &event.input {
        PointerInput::Mouse { position } => Some(*position),
        PointerInput::Touch { touches } => match touches.as_slice() {
            [only] => Some(*only),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_resolves_only_with_one_touch() {
        let none = PointerEvent::touch(EventKind::TouchEnd, [Point::ZERO; 0]);
        assert_eq!(point_from_event(&none), None);

        let one = PointerEvent::touch(EventKind::TouchStart, [Point::new(1.0, 2.0)]);
        assert_eq!(one.point(), Some(Point::new(1.0, 2.0)));

        let many = PointerEvent::touch(
            EventKind::TouchMove,
            [Point::ZERO, Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
        );
        assert_eq!(many.point(), None);
    }

    #[test]
    fn mouse_resolves_to_position() {
        let ev = PointerEvent::mouse(EventKind::MouseMove, Point::new(-4.0, 9.5));
        assert_eq!(ev.point(), Some(Point::new(-4.0, 9.5)));
    }

    #[test]
    fn kinds_partition_by_modality_and_phase() {
        for modality in [Modality::Mouse, Modality::Touch] {
            for phase in [GesturePhase::Start, GesturePhase::Move, GesturePhase::End] {
                for kind in EventKind::kinds(modality, phase) {
                    assert_eq!(kind.modality(), Some(modality));
                    assert_eq!(kind.phase(), Some(phase));
                }
            }
        }
        assert_eq!(EventKind::TouchCancel.phase(), Some(GesturePhase::End));
        assert_eq!(EventKind::Click.phase(), None);
        assert_eq!(EventKind::Click.modality(), None);
    }

    #[test]
    fn flags_start_clear_and_latch() {
        let mut ev = PointerEvent::mouse(EventKind::MouseDown, Point::ZERO);
        assert!(!ev.default_prevented());
        assert!(!ev.propagation_stopped());
        ev.prevent_default();
        ev.stop_propagation();
        assert!(ev.default_prevented());
        assert!(ev.propagation_stopped());
    }
}
