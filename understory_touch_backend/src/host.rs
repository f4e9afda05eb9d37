// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host surface the backend attaches to.
//!
//! ## Listeners
//!
//! The backend never hands closures to the host. It installs [`Listener`]
//! descriptors instead: where to listen, for which [`EventKind`], in which
//! [`Phase`], and which [`Handler`] to run. When a native event fires, the host
//! walks its listeners the usual way (every capture-phase listener from the
//! window inward, then bubble-phase listeners from the target outward, honoring
//! [`PointerEvent::propagation_stopped`]) and calls
//! [`TouchBackend::handle_event`](crate::TouchBackend::handle_event) for each match.
//!
//! ## Timers
//!
//! Delayed starts use [`Host::set_timeout`]. When a timer fires the host calls
//! [`TouchBackend::handle_timeout`](crate::TouchBackend::handle_timeout) with
//! the handle it returned; cleared timers must never fire.
//!
//! ## Exclusive use
//!
//! Only one backend may be set up against a host at a time. Each host owns a
//! [`HostSlot`]; setting up claims it and tearing down releases it.
//!
//! [`PointerEvent::propagation_stopped`]: crate::event::PointerEvent::propagation_stopped

use core::fmt;
use core::time::Duration;

use understory_dnd_regions::RegionNode;

use crate::event::EventKind;

/// Propagation phase a listener runs in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Window inward, before any target handler.
    Capture,
    /// Target outward.
    Bubble,
}

/// Where a listener is attached.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget<N> {
    /// The top-level window; sees every event.
    Window,
    /// A single node; sees events whose propagation path passes through it.
    Node(N),
}

/// Backend entry point a listener routes to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handler<Id> {
    /// Clear the candidate sources at the very start of a gesture.
    ResetCandidates,
    /// Record the gesture start.
    Start,
    /// Arm the long-press timer that records the gesture start later.
    DelayedStart,
    /// Follow pointer movement.
    Move,
    /// Finish the gesture.
    End,
    /// Note that a start event passed through this source region.
    SourceStart(Id),
    /// Swallow clicks synthesized on a source region touched this gesture.
    SourceClick(Id),
}

/// A listener the backend asks the host to install.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Listener<Id, N> {
    /// Attachment point.
    pub target: ListenerTarget<N>,
    /// Event kind to listen for.
    pub kind: EventKind,
    /// Propagation phase.
    pub phase: Phase,
    /// Entry point to call.
    pub handler: Handler<Id>,
}

impl<Id, N> Listener<Id, N> {
    /// A listener on the window.
    pub fn window(kind: EventKind, phase: Phase, handler: Handler<Id>) -> Self {
        Self {
            target: ListenerTarget::Window,
            kind,
            phase,
            handler,
        }
    }

    /// A listener on `node`.
    pub fn node(node: N, kind: EventKind, phase: Phase, handler: Handler<Id>) -> Self {
        Self {
            target: ListenerTarget::Node(node),
            kind,
            phase,
            handler,
        }
    }
}

/// Single-occupancy slot guarding a host against two active backends.
#[derive(Debug, Default)]
pub struct HostSlot {
    epoch: u64,
    claimed: bool,
}

/// Proof that a backend holds a [`HostSlot`]. Returned to the slot on release.
#[derive(Debug, PartialEq, Eq)]
pub struct SlotToken {
    epoch: u64,
}

impl HostSlot {
    /// An unclaimed slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a backend currently holds the slot.
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    pub(crate) fn claim(&mut self) -> Option<SlotToken> {
        if self.claimed {
            return None;
        }
        self.claimed = true;
        self.epoch += 1;
        Some(SlotToken { epoch: self.epoch })
    }

    pub(crate) fn release(&mut self, token: SlotToken) -> bool {
        if self.claimed && token.epoch == self.epoch {
            self.claimed = false;
            true
        } else {
            false
        }
    }
}

/// The environment the backend runs in.
pub trait Host<Id> {
    /// Element handle type used for regions and node listeners.
    type Node: RegionNode;
    /// Handle to a scheduled timeout.
    type Timer: Copy + Eq + fmt::Debug;

    /// Whether an interactive surface exists at all.
    ///
    /// Headless hosts return `false`; setup and teardown then do nothing.
    fn is_present(&self) -> bool {
        true
    }

    /// The host's exclusive-use slot.
    fn slot(&mut self) -> &mut HostSlot;

    /// Install a listener.
    fn listen(&mut self, listener: Listener<Id, Self::Node>);

    /// Remove one listener equal to `listener`; no-op if none is installed.
    fn unlisten(&mut self, listener: &Listener<Id, Self::Node>);

    /// Schedule a one-shot timeout.
    fn set_timeout(&mut self, delay: Duration) -> Self::Timer;

    /// Cancel a timeout that has not fired yet.
    fn clear_timeout(&mut self, timer: Self::Timer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_admits_one_holder_at_a_time() {
        let mut slot = HostSlot::new();
        let token = slot.claim().unwrap();
        assert!(slot.is_claimed());
        assert!(slot.claim().is_none());

        assert!(slot.release(token));
        assert!(!slot.is_claimed());
        assert!(slot.claim().is_some());
    }

    #[test]
    fn stale_token_does_not_release_a_newer_claim() {
        let mut slot = HostSlot::new();
        let first = slot.claim().unwrap();
        let stale = SlotToken { epoch: first.epoch };
        assert!(slot.release(first));

        let _second = slot.claim().unwrap();
        assert!(!slot.release(stale));
        assert!(slot.is_claimed());
    }
}
