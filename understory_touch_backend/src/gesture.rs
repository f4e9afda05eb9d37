// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture session: decide when a pointer sequence becomes a drag.
//!
//! ## Usage
//!
//! 1) On every start event, call [`GestureSession::reset_candidates`] in the capture
//!    phase, [`GestureSession::add_candidate`] for each source region the event bubbles
//!    through, then [`GestureSession::start`] once at the top level.
//! 2) On each move event, call [`GestureSession::on_move`]. The first move that leaves
//!    the tap deadzone begins the drag; later moves publish the source and hover.
//! 3) On the end event, call [`GestureSession::on_end`] to drop and end the drag.
//!
//! The session never decides on its own whether a drag is active; it asks the
//! coordinator on every move and end.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_dnd_regions::{RegionNode, RegionRegistries};
//! use understory_touch_backend::coordinator::{BeginDragOptions, DragDropActions, HoverOptions};
//! use understory_touch_backend::event::{EventKind, PointerEvent};
//! use understory_touch_backend::gesture::GestureSession;
//!
//! #[derive(Clone, Debug)]
//! struct Boxed(Rect);
//! impl RegionNode for Boxed {
//!     fn client_rect(&self) -> Option<Rect> { Some(self.0) }
//!     fn parent_node(&self) -> Option<Self> { None }
//! }
//!
//! #[derive(Default)]
//! struct Manager { dragging: bool, began: Vec<Vec<&'static str>> }
//! impl DragDropActions<&'static str> for Manager {
//!     fn begin_drag(&mut self, ids: &[&'static str], _: BeginDragOptions<'_, &'static str>) {
//!         self.dragging = true;
//!         self.began.push(ids.to_vec());
//!     }
//!     fn hover(&mut self, _: &[&'static str], _: HoverOptions) {}
//!     fn publish_drag_source(&mut self) {}
//!     fn drop(&mut self) {}
//!     fn end_drag(&mut self) { self.dragging = false; }
//!     fn is_dragging(&self) -> bool { self.dragging }
//!     fn did_drop(&self) -> bool { false }
//! }
//!
//! let mut regions: RegionRegistries<&'static str, Boxed> = RegionRegistries::new();
//! regions.sources.insert("card", Boxed(Rect::new(0.0, 0.0, 10.0, 10.0)), ());
//!
//! let mut manager = Manager::default();
//! let mut session: GestureSession<&'static str, u32> = GestureSession::new();
//!
//! let mut down = PointerEvent::touch(EventKind::TouchStart, [Point::new(5.0, 5.0)]);
//! session.reset_candidates();
//! session.add_candidate("card");
//! session.start(&mut down, &regions.sources);
//! assert!(down.default_prevented());
//!
//! // Inside the deadzone: still a tap.
//! let mut jitter = PointerEvent::touch(EventKind::TouchMove, [Point::new(6.0, 6.0)]);
//! session.on_move(&mut jitter, &regions, &mut manager);
//! assert!(manager.began.is_empty());
//!
//! let mut pull = PointerEvent::touch(EventKind::TouchMove, [Point::new(5.0, 9.0)]);
//! session.on_move(&mut pull, &regions, &mut manager);
//! assert_eq!(manager.began, vec![vec!["card"]]);
//! ```

use core::fmt;
use core::hash::Hash;

use kurbo::Point;
use log::{debug, trace};
use smallvec::SmallVec;
use understory_dnd_regions::{
    RegionNode, RegionRegistries, RegionRegistry, exceeds_drag_threshold, hit_test,
    region_offset,
};

use crate::coordinator::{BeginDragOptions, DragDropActions, HoverOptions};
use crate::event::PointerEvent;

/// What a delayed start needs once its timer fires.
///
/// Copied out of the triggering event when the timer is armed; hosts are free
/// to recycle the event object afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StartSnapshot {
    /// Resolved start point, if the event had one.
    pub point: Option<Point>,
    /// Whether the event targeted a form control.
    pub target_is_form_control: bool,
}

impl StartSnapshot {
    /// Snapshot `event`.
    pub fn of(event: &PointerEvent) -> Self {
        Self {
            point: event.point(),
            target_is_form_control: event.target_is_form_control,
        }
    }
}

/// A long-press start waiting for its timer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PendingStart<T> {
    /// Host timer that will promote the start.
    pub timer: T,
    /// Event data captured when the timer was armed.
    pub snapshot: StartSnapshot,
}

/// Per-gesture state.
#[derive(Clone)]
pub struct GestureSession<Id, T> {
    reference_offset: Option<Point>,
    candidates: SmallVec<[Id; 4]>,
    pending: Option<PendingStart<T>>,
}

impl<Id: fmt::Debug, T: fmt::Debug> fmt::Debug for GestureSession<Id, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureSession")
            .field("reference_offset", &self.reference_offset)
            .field("candidates", &self.candidates.as_slice())
            .field("pending", &self.pending)
            .finish()
    }
}

impl<Id, T> Default for GestureSession<Id, T> {
    fn default() -> Self {
        Self {
            reference_offset: None,
            candidates: SmallVec::new(),
            pending: None,
        }
    }
}

impl<Id, T> GestureSession<Id, T>
where
    Id: Clone + Eq + Hash + fmt::Debug,
    T: Copy,
{
    /// A session with no gesture in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point recorded at gesture start, until it is consumed by a drag start or end.
    pub fn reference_offset(&self) -> Option<Point> {
        self.reference_offset
    }

    /// Source ids that saw a start event, outermost first.
    ///
    /// Start events bubble from the innermost source outward, and each source
    /// is placed ahead of those already recorded. The innermost source ends up
    /// last, where coordinators look for the most specific source.
    pub fn candidates(&self) -> &[Id] {
        &self.candidates
    }

    /// The delayed start waiting on a timer, if any.
    pub fn pending(&self) -> Option<&PendingStart<T>> {
        self.pending.as_ref()
    }

    /// Forget the candidates of the previous gesture.
    pub fn reset_candidates(&mut self) {
        self.candidates.clear();
    }

    /// Record that a start event passed through source `id`.
    pub fn add_candidate(&mut self, id: Id) {
        if !self.candidates.contains(&id) {
            trace!("start passed through source {id:?}");
            self.candidates.insert(0, id);
        }
    }

    /// Whether a click on source `id` should stop propagating.
    ///
    /// Candidates survive the end of a drag and are only cleared when the next
    /// gesture starts, so the click a browser synthesizes after the drag still
    /// finds its source. A gesture that never became a drag clears them on end
    /// and its click goes through.
    pub fn suppresses_click(&self, id: &Id) -> bool {
        self.candidates.contains(id)
    }

    /// Top-level start.
    ///
    /// Records the start point if it lies over at least one source region and,
    /// unless the target is a form control, suppresses the default action.
    pub fn start<N: RegionNode>(
        &mut self,
        event: &mut PointerEvent,
        sources: &RegionRegistry<Id, N>,
    ) {
        let snapshot = StartSnapshot::of(event);
        if self.record_start(snapshot, sources) && !snapshot.target_is_form_control {
            event.prevent_default();
        }
    }

    /// Top-level start replayed from a snapshot after the long-press delay.
    pub fn start_from_snapshot<N: RegionNode>(
        &mut self,
        snapshot: StartSnapshot,
        sources: &RegionRegistry<Id, N>,
    ) {
        self.record_start(snapshot, sources);
    }

    fn record_start<N: RegionNode>(
        &mut self,
        snapshot: StartSnapshot,
        sources: &RegionRegistry<Id, N>,
    ) -> bool {
        let Some(point) = snapshot.point else {
            return false;
        };
        if hit_test(sources, point).is_empty() {
            return false;
        }
        trace!("gesture start recorded at {point:?}");
        self.reference_offset = Some(point);
        true
    }

    /// Park a delayed start, returning the one it replaces.
    pub fn arm(&mut self, pending: PendingStart<T>) -> Option<PendingStart<T>> {
        self.pending.replace(pending)
    }

    /// Remove the delayed start, if any.
    pub fn take_pending(&mut self) -> Option<PendingStart<T>> {
        self.pending.take()
    }

    /// Remove the delayed start only if it is waiting on `timer`.
    pub fn take_pending_for(&mut self, timer: T) -> Option<PendingStart<T>>
    where
        T: PartialEq,
    {
        if self.pending.is_some_and(|p| p.timer == timer) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drop the recorded start point.
    pub fn clear_reference(&mut self) {
        self.reference_offset = None;
    }

    /// Top-level move.
    ///
    /// Callers cancel any pending delayed start before calling this.
    pub fn on_move<N, P, C>(
        &mut self,
        event: &mut PointerEvent,
        regions: &RegionRegistries<Id, N, P>,
        coordinator: &mut C,
    ) where
        N: RegionNode,
        C: DragDropActions<Id>,
    {
        let Some(point) = event.point() else {
            return;
        };

        if !coordinator.is_dragging() {
            let Some(origin) = self.reference_offset else {
                return;
            };
            if self.candidates.is_empty() || !exceeds_drag_threshold(origin, point) {
                return;
            }
            debug!("begin drag of {:?} from {origin:?}", self.candidates.as_slice());
            let sources = &regions.sources;
            let source_offset = |id: &Id| sources.get(id).and_then(region_offset);
            coordinator.begin_drag(
                &self.candidates,
                BeginDragOptions {
                    client_offset: origin,
                    get_source_client_offset: &source_offset,
                    publish_source: false,
                },
            );
            self.reference_offset = None;
            return;
        }

        coordinator.publish_drag_source();
        event.prevent_default();
        let targets = hit_test(&regions.targets, point);
        trace!("hover {:?} at {point:?}", targets.as_slice());
        coordinator.hover(
            &targets,
            HoverOptions {
                client_offset: point,
            },
        );
    }

    /// Top-level end.
    pub fn on_end<C: DragDropActions<Id>>(
        &mut self,
        event: &mut PointerEvent,
        coordinator: &mut C,
    ) {
        if !coordinator.is_dragging() || coordinator.did_drop() {
            self.candidates.clear();
            return;
        }
        event.prevent_default();
        self.reference_offset = None;
        debug!("drop and end drag");
        coordinator.drop();
        coordinator.end_drag();
    }
}
