// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_touch_backend --heading-base-level=0

//! Understory Touch Backend: turn raw pointer events into drag-and-drop calls.
//!
//! A [`TouchBackend`] sits between a host surface and a drag-and-drop
//! coordinator. The host feeds it touch (and optionally mouse) events; the
//! backend decides whether the user is tapping or dragging and issues the
//! coordinator's lifecycle calls in a fixed order:
//!
//! - `begin_drag` once the pointer leaves a small deadzone around a source,
//! - `publish_drag_source` then `hover` on every move of a confirmed drag,
//! - `drop` then `end_drag` when the pointer lifts.
//!
//! ## Pieces
//!
//! - [`event`]: host-agnostic [`PointerEvent`](event::PointerEvent) values and
//!   single-point resolution (multi-touch events resolve to nothing).
//! - [`config`]: [`TouchBackendOptions`], which modalities to listen to and how
//!   long a press must last before it counts.
//! - [`coordinator`]: the [`DragDropActions`] trait the backend drives.
//! - [`host`]: the [`Host`](host::Host) trait, listener descriptors, and the
//!   exclusive-use slot.
//! - [`gesture`]: the [`GestureSession`](gesture::GestureSession) state machine.
//! - [`backend`]: [`TouchBackend`], which owns lifecycle, listener wiring, and
//!   region connections.
//!
//! Region bookkeeping and hit testing come from `understory_dnd_regions`.
//!
//! ## Event flow
//!
//! For a start event the host runs, in order, the capture-phase candidate reset
//! on the window, the bubble-phase source handlers of every connected source
//! the event passes through, then the bubble-phase start handler on the window.
//! Moves and ends are handled on the window in the capture phase.
//!
//! With a start delay configured, the start handler only arms a host timer; any
//! move before it fires cancels the start for good. This gives long-press to
//! drag on touch screens while leaving swipes to the native scroller.
//!
//! ## Click suppression
//!
//! Mobile browsers synthesize a click after a touch sequence. Sources that saw
//! the start of a sequence that turned into a drag stop that click from
//! propagating, so it cannot activate unrelated click handlers on the same
//! element. Plain taps clear the candidates on end and keep their click.
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with the standard library.
//! - `libm`: build Kurbo on `no_std` targets.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod gesture;
pub mod host;

pub use backend::{Connection, DragPreviewOptions, TouchBackend};
pub use config::TouchBackendOptions;
pub use coordinator::{BeginDragOptions, DragDropActions, HoverOptions};
pub use error::SetupError;
