// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry helpers: containment, distance, and element offsets.

use kurbo::{Point, Rect};

/// Distance a pointer must travel from the gesture start before a pending
/// gesture becomes a drag.
///
/// Movement at or below this distance is treated as tap jitter.
pub const DRAG_THRESHOLD: f64 = 2.0;

/// A handle to a node in the host's element tree.
///
/// Handles are cheap to clone. Implementations answer with *live* values:
/// nothing here is cached between calls.
pub trait RegionNode: Clone {
    /// Current client-space bounds of this node.
    ///
    /// Returns `None` when the node is not an element (for example a text node);
    /// such nodes are resolved through their nearest element ancestor.
    fn client_rect(&self) -> Option<Rect>;

    /// Parent of this node, if any.
    fn parent_node(&self) -> Option<Self>;
}

/// Returns `true` if `point` lies within `rect`, edges included.
///
/// Kurbo's [`Rect::contains`] excludes the right and bottom edges; region hit
/// testing must not.
#[inline]
pub fn contains_inclusive(rect: Rect, point: Point) -> bool {
    rect.x0 <= point.x && point.x <= rect.x1 && rect.y0 <= point.y && point.y <= rect.y1
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Returns `true` once `current` has moved strictly farther than
/// [`DRAG_THRESHOLD`] from `origin`.
#[inline]
pub fn exceeds_drag_threshold(origin: Point, current: Point) -> bool {
    distance(origin, current) > DRAG_THRESHOLD
}

/// Bounds of the nearest element at or above `node`.
pub fn nearest_element<N: RegionNode>(node: &N) -> Option<Rect> {
    if let Some(rect) = node.client_rect() {
        return Some(rect);
    }
    let mut current = node.parent_node();
    while let Some(n) = current {
        if let Some(rect) = n.client_rect() {
            return Some(rect);
        }
        current = n.parent_node();
    }
    None
}

/// Top-left client position of the nearest element at or above `node`.
///
/// Returns `None` if neither the node nor any ancestor is an element.
pub fn region_offset<N: RegionNode>(node: &N) -> Option<Point> {
    nearest_element(node).map(|rect| rect.origin())
}
