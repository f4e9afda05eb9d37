// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point hit testing against a region registry.

use core::hash::Hash;

use kurbo::Point;
use smallvec::SmallVec;

use crate::geometry::{RegionNode, contains_inclusive, nearest_element};
use crate::registry::RegionRegistry;

/// Ids of every region in `registry` whose live bounds contain `point`.
///
/// Bounds are queried from each node on every call and compared with
/// inclusive edges. Overlapping regions all match. Results follow the
/// registry's insertion order, so the first registered region comes first.
/// Nodes with no element at or above them never match.
pub fn hit_test<Id, N, O>(
    registry: &RegionRegistry<Id, N, O>,
    point: Point,
) -> SmallVec<[Id; 4]>
where
    Id: Clone + Eq + Hash,
    N: RegionNode,
{
    registry
        .iter()
        .filter(|(_, node)| {
            nearest_element(*node).is_some_and(|rect| contains_inclusive(rect, point))
        })
        .map(|(id, _)| id.clone())
        .collect()
}
