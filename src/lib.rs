//! # Kiroku - Change Events and Undo/Redo Replay for Block Editors
//!
//! **Kiroku** is the change-tracking core of an interactive block graph editor.
//! It records what changed while a user drags, plugs, edits and deletes blocks,
//! coalesces the noisy intermediate mutations of one gesture into a minimal set
//! of deltas, and replays those deltas forward (redo) or backward (undo).
//!
//! ## Core Workflow
//!
//! The crate does not own the editor's data. It talks to it through the traits
//! in [`graph`]: a [`BlockGraph`](graph::BlockGraph) for lookups and mutation, a
//! [`SnapshotCodec`](graph::SnapshotCodec) for capturing deleted subtrees, and a
//! [`WorkspaceResolver`](graph::WorkspaceResolver) to notify listeners.
//!
//! 1.  **Record**: At each mutation site, build the matching event from the
//!     [`EventBus`](bus::EventBus). Moves are two-phase: `begin_move` before the
//!     move, `record_new` after it.
//! 2.  **Fire**: `fire` queues the event. The first event of a batch asks the
//!     scheduler for one flush on a later turn; events are dropped while the bus
//!     is disabled.
//! 3.  **Flush**: On the next turn the batch is merged (same-target moves and
//!     changes fold together), null events are removed, and survivors are handed
//!     to their workspace's listener in order.
//! 4.  **Replay**: Listeners such as an undo stack keep the events and later call
//!     [`Event::run`](event::Event::run) backward or forward. Events sharing a
//!     group id belong to one undo step.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kiroku::prelude::*;
//!
//! let mut bus = EventBus::new();
//!
//! // A user gesture that moves a block and renames one of its fields.
//! bus.set_group(true);
//! let pending = bus.begin_move(&graph, &block)?;
//! graph.plug(&block, &parent, "DO");
//! bus.fire(pending.record_new(&graph)?);
//! bus.fire(bus.change_event(&graph, &block, ChangeElement::Field, Some("NAME"), "a", "b")?);
//! bus.set_group(false);
//!
//! // At the end of the editor's turn, deliver the batch.
//! if let Some(report) = bus.end_turn(&mut graph) {
//!     println!("delivered {} events", report.delivered);
//! }
//!
//! // Later, undo the move.
//! let undone = move_event.run(false, &mut graph)?;
//! ```

pub mod bus;
pub mod control;
pub mod error;
pub mod event;
pub mod graph;
pub mod model;
pub mod prelude;
pub mod queue;
pub mod snapshot;
