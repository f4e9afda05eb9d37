// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The backend adapter: lifecycle, listener wiring, and region connections.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::mem;

use kurbo::{Point, Vec2};
use log::debug;
use smallvec::SmallVec;
use understory_dnd_regions::{RegionKey, RegionKind, RegionRegistries, region_offset};

use crate::config::TouchBackendOptions;
use crate::coordinator::DragDropActions;
use crate::error::SetupError;
use crate::event::{EventKind, PointerEvent};
use crate::gesture::{GestureSession, PendingStart, StartSnapshot};
use crate::host::{Handler, Host, Listener, Phase, SlotToken};

/// Options attached to a drag preview.
///
/// The backend stores them untouched; the coordinator reads them back through
/// [`TouchBackend::preview`] when it positions the preview.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragPreviewOptions {
    /// Fractional anchor of the preview under the pointer, `(0, 0)` top-left.
    pub anchor: Option<Point>,
    /// Fixed offset applied after anchoring.
    pub offset: Option<Vec2>,
}

/// Handle to one `connect_*` registration; pass it to [`TouchBackend::disconnect`].
#[derive(Clone, Debug)]
pub struct Connection<Id, N> {
    kind: RegionKind,
    key: RegionKey<Id>,
    listeners: SmallVec<[Listener<Id, N>; 2]>,
}

impl<Id, N> Connection<Id, N> {
    /// Kind of region this connection registered.
    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    /// Region id this connection registered.
    pub fn id(&self) -> &Id {
        self.key.id()
    }
}

struct Installed<Id, N> {
    token: SlotToken,
    listeners: Vec<Listener<Id, N>>,
}

/// Interprets touch and mouse gestures and drives a drag-and-drop coordinator.
///
/// See the [crate documentation](crate) for the overall flow.
pub struct TouchBackend<Id, H: Host<Id>, C, P = DragPreviewOptions> {
    options: TouchBackendOptions,
    coordinator: C,
    regions: RegionRegistries<Id, H::Node, P>,
    session: GestureSession<Id, H::Timer>,
    installed: Option<Installed<Id, H::Node>>,
}

impl<Id, H, C, P> fmt::Debug for TouchBackend<Id, H, C, P>
where
    Id: fmt::Debug,
    H: Host<Id>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchBackend")
            .field("options", &self.options)
            .field("set_up", &self.installed.is_some())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<Id, H, C, P> TouchBackend<Id, H, C, P>
where
    Id: Clone + Eq + Hash + fmt::Debug,
    H: Host<Id>,
    C: DragDropActions<Id>,
{
    /// Create a backend that is not yet attached to any host.
    pub fn new(options: TouchBackendOptions, coordinator: C) -> Self {
        Self {
            options,
            coordinator,
            regions: RegionRegistries::new(),
            session: GestureSession::new(),
            installed: None,
        }
    }

    /// Options the backend was built with.
    pub fn options(&self) -> &TouchBackendOptions {
        &self.options
    }

    /// The coordinator being driven.
    pub fn coordinator(&self) -> &C {
        &self.coordinator
    }

    /// Mutable access to the coordinator.
    pub fn coordinator_mut(&mut self) -> &mut C {
        &mut self.coordinator
    }

    /// Registered regions.
    pub fn regions(&self) -> &RegionRegistries<Id, H::Node, P> {
        &self.regions
    }

    /// Current gesture state.
    pub fn session(&self) -> &GestureSession<Id, H::Timer> {
        &self.session
    }

    /// Whether [`setup`](Self::setup) installed listeners that are still active.
    pub fn is_set_up(&self) -> bool {
        self.installed.is_some()
    }

    /// Attach to `host`.
    ///
    /// Does nothing on a host without an interactive surface. Otherwise installs,
    /// on the window and for every enabled event kind: the capture-phase
    /// candidate reset for start kinds, the start (or delayed start) handler,
    /// the capture-phase move handler, and the capture-phase end handler.
    ///
    /// Fails if this backend is already set up or another backend holds the host.
    pub fn setup(&mut self, host: &mut H) -> Result<(), SetupError> {
        if !host.is_present() {
            return Ok(());
        }
        if self.installed.is_some() {
            return Err(SetupError::AlreadySetUp);
        }
        let token = host.slot().claim().ok_or(SetupError::HostOccupied)?;

        let start_kinds = self.options.start_kinds();
        let mut listeners = Vec::new();
        for &kind in &start_kinds {
            listeners.push(Listener::window(kind, Phase::Capture, Handler::ResetCandidates));
        }
        for &kind in &start_kinds {
            let handler = if self.start_delay(kind).is_zero() {
                Handler::Start
            } else {
                Handler::DelayedStart
            };
            listeners.push(Listener::window(kind, Phase::Bubble, handler));
        }
        for kind in self.options.move_kinds() {
            listeners.push(Listener::window(kind, Phase::Capture, Handler::Move));
        }
        for kind in self.options.end_kinds() {
            listeners.push(Listener::window(kind, Phase::Capture, Handler::End));
        }
        for listener in &listeners {
            host.listen(listener.clone());
        }

        debug!("touch backend set up with {} listeners", listeners.len());
        self.installed = Some(Installed { token, listeners });
        Ok(())
    }

    /// Detach from `host`.
    ///
    /// Releases the host, forgets the recorded start point, cancels a pending
    /// delayed start, and removes exactly the listeners [`setup`](Self::setup)
    /// installed. Region connections are left alone.
    pub fn teardown(&mut self, host: &mut H) {
        if !host.is_present() {
            return;
        }
        let Some(installed) = self.installed.take() else {
            return;
        };
        host.slot().release(installed.token);
        self.session.clear_reference();
        if let Some(pending) = self.session.take_pending() {
            host.clear_timeout(pending.timer);
        }
        for listener in &installed.listeners {
            host.unlisten(listener);
        }
        debug!("touch backend torn down");
    }

    /// Register `node` as drag source `id`.
    ///
    /// Also listens on the node, in the bubble phase, for enabled start kinds
    /// (to collect gesture candidates) and for clicks (to swallow the click a
    /// browser synthesizes after a touch drag).
    pub fn connect_drag_source(
        &mut self,
        host: &mut H,
        id: Id,
        node: H::Node,
    ) -> Connection<Id, H::Node> {
        let key = self.regions.sources.insert(id.clone(), node.clone(), ());
        let mut listeners: SmallVec<[Listener<Id, H::Node>; 2]> = self
            .options
            .start_kinds()
            .into_iter()
            .map(|kind| {
                Listener::node(
                    node.clone(),
                    kind,
                    Phase::Bubble,
                    Handler::SourceStart(id.clone()),
                )
            })
            .collect();
        listeners.push(Listener::node(
            node,
            EventKind::Click,
            Phase::Bubble,
            Handler::SourceClick(id),
        ));
        for listener in &listeners {
            host.listen(listener.clone());
        }
        Connection {
            kind: RegionKind::Source,
            key,
            listeners,
        }
    }

    /// Register `node` as the drag preview for `id`.
    pub fn connect_drag_preview(
        &mut self,
        id: Id,
        node: H::Node,
        options: P,
    ) -> Connection<Id, H::Node> {
        Connection {
            kind: RegionKind::Preview,
            key: self.regions.previews.insert(id, node, options),
            listeners: SmallVec::new(),
        }
    }

    /// Register `node` as drop target `id`.
    pub fn connect_drop_target(&mut self, id: Id, node: H::Node) -> Connection<Id, H::Node> {
        Connection {
            kind: RegionKind::Target,
            key: self.regions.targets.insert(id, node, ()),
            listeners: SmallVec::new(),
        }
    }

    /// Undo exactly the registration `connection` was returned for.
    ///
    /// The connection's own listeners are always removed. The registry entry is
    /// removed only if no later `connect_*` call replaced it under the same id.
    /// Returns `false` if there was nothing left to undo, so calling this again
    /// with the same connection is a no-op.
    pub fn disconnect(&mut self, host: &mut H, connection: &mut Connection<Id, H::Node>) -> bool {
        let listeners = mem::take(&mut connection.listeners);
        for listener in &listeners {
            host.unlisten(listener);
        }
        let removed = self.regions.remove(connection.kind, &connection.key);
        removed || !listeners.is_empty()
    }

    /// Node and options of the preview registered for `id`.
    pub fn preview(&self, id: &Id) -> Option<(&H::Node, &P)> {
        let node = self.regions.previews.get(id)?;
        let options = self.regions.previews.options(id)?;
        Some((node, options))
    }

    /// Current top-left client position of source `id`.
    pub fn source_client_offset(&self, id: &Id) -> Option<Point> {
        self.regions.sources.get(id).and_then(region_offset)
    }

    /// Run the entry point a host listener routes to.
    pub fn handle_event(
        &mut self,
        host: &mut H,
        handler: &Handler<Id>,
        event: &mut PointerEvent,
    ) {
        match handler {
            Handler::ResetCandidates => self.session.reset_candidates(),
            Handler::SourceStart(id) => self.session.add_candidate(id.clone()),
            Handler::SourceClick(id) => {
                if self.session.suppresses_click(id) {
                    event.stop_propagation();
                }
            }
            Handler::Start => self.session.start(event, &self.regions.sources),
            Handler::DelayedStart => {
                let delay = self.start_delay(event.kind);
                let timer = host.set_timeout(delay);
                let pending = PendingStart {
                    timer,
                    snapshot: StartSnapshot::of(event),
                };
                if let Some(replaced) = self.session.arm(pending) {
                    host.clear_timeout(replaced.timer);
                }
                debug!("delayed start armed for {delay:?}");
            }
            Handler::Move => {
                if let Some(pending) = self.session.take_pending() {
                    host.clear_timeout(pending.timer);
                    debug!("movement cancelled the delayed start");
                }
                self.session.on_move(event, &self.regions, &mut self.coordinator);
            }
            Handler::End => self.session.on_end(event, &mut self.coordinator),
        }
    }

    /// Promote the delayed start waiting on `timer`; stale timers are ignored.
    pub fn handle_timeout(&mut self, timer: H::Timer) {
        if let Some(pending) = self.session.take_pending_for(timer) {
            self.session.start_from_snapshot(pending.snapshot, &self.regions.sources);
        }
    }

    fn start_delay(&self, kind: EventKind) -> core::time::Duration {
        kind.modality().map_or(self.options.delay, |m| self.options.delay_for(m))
    }
}
