// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory DnD Regions: region bookkeeping and hit testing for drag-and-drop.
//!
//! A drag-and-drop backend needs to know which host elements act as drag
//! sources, drag previews and drop targets, and which of them lie under a
//! pointer at any moment. This crate provides those pieces without assuming
//! anything about the host surface:
//!
//! - [`geometry`]: inclusive rectangle containment, Euclidean distance, the
//!   fixed drag threshold, and the [`RegionNode`] trait through which live
//!   element bounds are queried.
//! - [`registry`]: [`RegionRegistry`], an insertion-ordered map from
//!   caller-supplied region ids to host nodes, handing out [`RegionKey`]s that
//!   remove exactly the entry they were issued for.
//! - [`hit`]: [`hit_test`], which reports every region whose *current* bounds
//!   contain a point, in registration order.
//!
//! Bounds are never cached. Layout can change between two pointer events, so
//! each hit test asks the node for its rectangle again.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_dnd_regions::{RegionNode, RegionRegistry, hit_test};
//!
//! #[derive(Clone, Debug)]
//! struct Boxed(Rect);
//!
//! impl RegionNode for Boxed {
//!     fn client_rect(&self) -> Option<Rect> {
//!         Some(self.0)
//!     }
//!     fn parent_node(&self) -> Option<Self> {
//!         None
//!     }
//! }
//!
//! let mut sources: RegionRegistry<&str, Boxed> = RegionRegistry::new();
//! let a = sources.insert("a", Boxed(Rect::new(0.0, 0.0, 10.0, 10.0)), ());
//! sources.insert("b", Boxed(Rect::new(5.0, 5.0, 15.0, 15.0)), ());
//!
//! // Edges are inclusive and overlapping regions all match.
//! assert_eq!(hit_test(&sources, Point::new(10.0, 10.0)).as_slice(), &["a", "b"]);
//!
//! // Keys remove exactly the entry they were issued for.
//! assert!(sources.remove(&a));
//! assert!(!sources.remove(&a));
//! assert_eq!(hit_test(&sources, Point::new(7.0, 7.0)).as_slice(), &["b"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable either `std` (default) or
//! `libm` so Kurbo can compute distances.

#![no_std]

extern crate alloc;

pub mod geometry;
pub mod hit;
pub mod registry;

pub use geometry::{
    DRAG_THRESHOLD, RegionNode, contains_inclusive, distance, exceeds_drag_threshold,
    nearest_element, region_offset,
};
pub use hit::hit_test;
pub use registry::{RegionKey, RegionKind, RegionRegistries, RegionRegistry};
