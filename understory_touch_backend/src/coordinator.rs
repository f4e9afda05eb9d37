// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag-and-drop coordinator the backend drives.
//!
//! The coordinator owns the drag transaction: which item is being dragged,
//! whether a drag is active, and whether a drop already happened. The backend
//! only interprets gestures and reports them through [`DragDropActions`]; it
//! never mutates drag state on its own and asks [`DragDropActions::is_dragging`]
//! afresh on every event.
//!
//! For a completed drag the backend calls, in order:
//!
//! 1. [`begin_drag`](DragDropActions::begin_drag) once the pointer leaves the tap deadzone,
//! 2. [`publish_drag_source`](DragDropActions::publish_drag_source) then
//!    [`hover`](DragDropActions::hover) on every later move,
//! 3. [`drop`](DragDropActions::drop) then [`end_drag`](DragDropActions::end_drag) when the pointer lifts.

use core::fmt;

use kurbo::Point;

/// Arguments for [`DragDropActions::begin_drag`].
pub struct BeginDragOptions<'a, Id> {
    /// Pointer position recorded when the gesture started.
    pub client_offset: Point,
    /// Resolves a source id to its region's current top-left client position.
    pub get_source_client_offset: &'a dyn Fn(&Id) -> Option<Point>,
    /// Whether item data should be published right away.
    ///
    /// The touch backend always passes `false` and publishes on the first
    /// move of a confirmed drag instead.
    pub publish_source: bool,
}

impl<Id> fmt::Debug for BeginDragOptions<'_, Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeginDragOptions")
            .field("client_offset", &self.client_offset)
            .field("publish_source", &self.publish_source)
            .finish_non_exhaustive()
    }
}

/// Arguments for [`DragDropActions::hover`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HoverOptions {
    /// Current pointer position.
    pub client_offset: Point,
}

/// Operations the backend invokes on the drag-and-drop coordinator.
///
/// Calls are assumed to succeed. Failure handling of the drag transaction
/// belongs to the coordinator.
pub trait DragDropActions<Id> {
    /// Start a drag carrying `source_ids`.
    fn begin_drag(&mut self, source_ids: &[Id], options: BeginDragOptions<'_, Id>);

    /// Report the drop targets currently under the pointer.
    fn hover(&mut self, target_ids: &[Id], options: HoverOptions);

    /// Publish the dragged item's data now that the drag is confirmed.
    fn publish_drag_source(&mut self);

    /// Commit the drop on the hovered targets.
    fn drop(&mut self);

    /// Tear down the drag session.
    fn end_drag(&mut self);

    /// Whether a drag is active.
    fn is_dragging(&self) -> bool;

    /// Whether the active drag has already been dropped.
    fn did_drop(&self) -> bool;
}
