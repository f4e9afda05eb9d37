// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for backend integration tests: a fake element tree, a fake
//! host that dispatches like a browser, and a coordinator that records calls.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(
    dead_code,
    reason = "Each test file uses a different subset of the helpers."
)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect};
use understory_dnd_regions::RegionNode;
use understory_touch_backend::event::{EventKind, PointerEvent};
use understory_touch_backend::host::{Handler, Host, HostSlot, Listener, ListenerTarget, Phase};
use understory_touch_backend::{BeginDragOptions, DragDropActions, HoverOptions, TouchBackend};

pub(crate) type Id = &'static str;
pub(crate) type Backend = TouchBackend<Id, FakeHost, Recorder>;

struct NodeData {
    name: &'static str,
    rect: Cell<Option<Rect>>,
    parent: Option<FakeNode>,
}

/// A node in a fake element tree. Equality is identity.
#[derive(Clone)]
pub(crate) struct FakeNode(Rc<NodeData>);

impl FakeNode {
    pub(crate) fn element(name: &'static str, rect: Rect, parent: Option<&Self>) -> Self {
        Self(Rc::new(NodeData {
            name,
            rect: Cell::new(Some(rect)),
            parent: parent.cloned(),
        }))
    }

    pub(crate) fn text(name: &'static str, parent: &Self) -> Self {
        Self(Rc::new(NodeData {
            name,
            rect: Cell::new(None),
            parent: Some(parent.clone()),
        }))
    }

    pub(crate) fn set_rect(&self, rect: Rect) {
        self.0.rect.set(Some(rect));
    }

    /// This node followed by its ancestors, innermost first.
    fn ancestry(&self) -> Vec<Self> {
        let mut out = vec![self.clone()];
        while let Some(parent) = out.last().and_then(|n| n.0.parent.clone()) {
            out.push(parent);
        }
        out
    }
}

impl PartialEq for FakeNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FakeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FakeNode({})", self.0.name)
    }
}

impl RegionNode for FakeNode {
    fn client_rect(&self) -> Option<Rect> {
        self.0.rect.get()
    }

    fn parent_node(&self) -> Option<Self> {
        self.0.parent.clone()
    }
}

/// A host that stores listeners and timers and dispatches like a browser.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    pub(crate) headless: bool,
    pub(crate) listeners: Vec<Listener<Id, FakeNode>>,
    pub(crate) timers: Vec<(u32, Duration)>,
    pub(crate) now: Duration,
    slot: HostSlot,
    next_timer: u32,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn headless() -> Self {
        Self {
            headless: true,
            ..Self::default()
        }
    }

    pub(crate) fn window_listeners(&self) -> Vec<(EventKind, Phase, Handler<Id>)> {
        self.listeners
            .iter()
            .filter(|l| l.target == ListenerTarget::Window)
            .map(|l| (l.kind, l.phase, l.handler.clone()))
            .collect()
    }

    pub(crate) fn node_listener_count(&self, node: &FakeNode) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.target == ListenerTarget::Node(node.clone()))
            .count()
    }
}

impl Host<Id> for FakeHost {
    type Node = FakeNode;
    type Timer = u32;

    fn is_present(&self) -> bool {
        !self.headless
    }

    fn slot(&mut self) -> &mut HostSlot {
        &mut self.slot
    }

    fn listen(&mut self, listener: Listener<Id, FakeNode>) {
        self.listeners.push(listener);
    }

    fn unlisten(&mut self, listener: &Listener<Id, FakeNode>) {
        if let Some(i) = self.listeners.iter().position(|l| l == listener) {
            self.listeners.remove(i);
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> u32 {
        self.next_timer += 1;
        self.timers.push((self.next_timer, self.now + delay));
        self.next_timer
    }

    fn clear_timeout(&mut self, timer: u32) {
        self.timers.retain(|&(id, _)| id != timer);
    }
}

/// Deliver `event` the way a browser would: window capture, node capture from
/// the root inward, node bubble from `target` outward, then window bubble.
///
/// Stops after the stage in which a handler stopped propagation.
pub(crate) fn dispatch<C: DragDropActions<Id>>(
    backend: &mut TouchBackend<Id, FakeHost, C>,
    host: &mut FakeHost,
    target: Option<&FakeNode>,
    event: &mut PointerEvent,
) {
    let path = target.map(FakeNode::ancestry).unwrap_or_default();
    let mut stages = vec![(ListenerTarget::Window, Phase::Capture)];
    stages.extend(
        path.iter()
            .rev()
            .map(|n| (ListenerTarget::Node(n.clone()), Phase::Capture)),
    );
    stages.extend(
        path.iter()
            .map(|n| (ListenerTarget::Node(n.clone()), Phase::Bubble)),
    );
    stages.push((ListenerTarget::Window, Phase::Bubble));

    for (at, phase) in stages {
        let handlers: Vec<Handler<Id>> = host
            .listeners
            .iter()
            .filter(|l| l.target == at && l.phase == phase && l.kind == event.kind)
            .map(|l| l.handler.clone())
            .collect();
        for handler in &handlers {
            backend.handle_event(host, handler, event);
        }
        if event.propagation_stopped() {
            return;
        }
    }
}

/// Move the clock forward, firing due timers in deadline order.
pub(crate) fn advance<C: DragDropActions<Id>>(
    backend: &mut TouchBackend<Id, FakeHost, C>,
    host: &mut FakeHost,
    by: Duration,
) {
    host.now += by;
    loop {
        let due = host
            .timers
            .iter()
            .enumerate()
            .filter(|(_, (_, at))| *at <= host.now)
            .min_by_key(|(_, (_, at))| *at)
            .map(|(i, _)| i);
        let Some(i) = due else {
            break;
        };
        let (timer, _) = host.timers.remove(i);
        backend.handle_timeout(timer);
    }
}

pub(crate) fn touch(kind: EventKind, x: f64, y: f64) -> PointerEvent {
    PointerEvent::touch(kind, [Point::new(x, y)])
}

pub(crate) fn touch_end() -> PointerEvent {
    PointerEvent::touch(EventKind::TouchEnd, [Point::ZERO; 0])
}

pub(crate) fn click(x: f64, y: f64) -> PointerEvent {
    PointerEvent::mouse(EventKind::Click, Point::new(x, y))
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Begin {
        ids: Vec<Id>,
        client_offset: Point,
        source_offsets: Vec<Option<Point>>,
        publish_source: bool,
    },
    Hover(Vec<Id>, Point),
    Publish,
    Drop,
    End,
}

/// Coordinator double: records every call and tracks drag activity.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) calls: Vec<Call>,
    pub(crate) dragging: bool,
    pub(crate) dropped: bool,
}

impl Recorder {
    pub(crate) fn begins(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Begin { .. }))
            .count()
    }
}

impl DragDropActions<Id> for Recorder {
    fn begin_drag(&mut self, source_ids: &[Id], options: BeginDragOptions<'_, Id>) {
        self.dragging = true;
        self.dropped = false;
        self.calls.push(Call::Begin {
            ids: source_ids.to_vec(),
            client_offset: options.client_offset,
            source_offsets: source_ids
                .iter()
                .map(|id| (options.get_source_client_offset)(id))
                .collect(),
            publish_source: options.publish_source,
        });
    }

    fn hover(&mut self, target_ids: &[Id], options: HoverOptions) {
        self.calls
            .push(Call::Hover(target_ids.to_vec(), options.client_offset));
    }

    fn publish_drag_source(&mut self) {
        self.calls.push(Call::Publish);
    }

    fn drop(&mut self) {
        self.dropped = true;
        self.calls.push(Call::Drop);
    }

    fn end_drag(&mut self) {
        self.dragging = false;
        self.calls.push(Call::End);
    }

    fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn did_drop(&self) -> bool {
        self.dropped
    }
}
