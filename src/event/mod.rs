//! The four event kinds and their shared metadata.
//!
//! Each variant captures enough state at construction to be replayed in
//! either direction with [`Event::run`]. `Move` is built in two phases; see
//! [`MoveEvent::begin`].

mod change;
mod create;
mod delete;
mod movement;

pub use change::ChangeEvent;
pub use create::CreateEvent;
pub use delete::DeleteEvent;
pub use movement::{MoveEvent, PendingMove};

use crate::control::EventContext;
use crate::error::EventError;
use crate::graph::{BlockGraph, SnapshotCodec};
use crate::model::{BlockId, GroupId, WorkspaceId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Create,
    Delete,
    Change,
    Move,
}

impl EventKind {
    pub const CREATE: &'static str = "create";
    pub const DELETE: &'static str = "delete";
    pub const CHANGE: &'static str = "change";
    pub const MOVE: &'static str = "move";

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Create => Self::CREATE,
            EventKind::Delete => Self::DELETE,
            EventKind::Change => Self::CHANGE,
            EventKind::Move => Self::MOVE,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes common to every event, captured when it is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMeta {
    pub block_id: BlockId,
    pub workspace_id: WorkspaceId,
    /// `None` when the event was created outside any group.
    pub group: Option<GroupId>,
    /// The bus-wide undo flag as it was at construction.
    pub record_undo: bool,
}

impl EventMeta {
    pub(crate) fn capture<G>(
        ctx: &EventContext,
        graph: &G,
        block_id: &BlockId,
    ) -> Result<Self, EventError>
    where
        G: BlockGraph + ?Sized,
    {
        if !graph.contains_block(block_id) {
            return Err(EventError::BlockNotFound(block_id.clone()));
        }
        let workspace_id = graph
            .workspace_of(block_id)
            .ok_or_else(|| EventError::WorkspaceNotFound(block_id.clone()))?;
        Ok(Self {
            block_id: block_id.clone(),
            workspace_id,
            group: ctx.group().cloned(),
            record_undo: ctx.record_undo(),
        })
    }
}

/// Result of replaying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayOutcome {
    Applied,
    /// The target block, parent or workspace is gone; nothing was touched.
    Stale,
}

/// An atomic, replayable change to a block graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Create(CreateEvent),
    Delete(DeleteEvent),
    Change(ChangeEvent),
    Move(MoveEvent),
}

impl Event {
    pub fn meta(&self) -> &EventMeta {
        match self {
            Event::Create(e) => &e.meta,
            Event::Delete(e) => &e.meta,
            Event::Change(e) => &e.meta,
            Event::Move(e) => &e.meta,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Create(_) => EventKind::Create,
            Event::Delete(_) => EventKind::Delete,
            Event::Change(_) => EventKind::Change,
            Event::Move(_) => EventKind::Move,
        }
    }

    pub fn block_id(&self) -> &BlockId {
        &self.meta().block_id
    }

    pub fn workspace_id(&self) -> &WorkspaceId {
        &self.meta().workspace_id
    }

    pub fn group(&self) -> Option<&GroupId> {
        self.meta().group.as_ref()
    }

    pub fn record_undo(&self) -> bool {
        self.meta().record_undo
    }

    /// Does this event record no change of state at all?
    pub fn is_null(&self) -> bool {
        match self {
            Event::Create(_) | Event::Delete(_) => false,
            Event::Change(e) => e.is_null(),
            Event::Move(e) => e.is_null(),
        }
    }

    /// Replays the event: `forward` to redo, `!forward` to undo.
    pub fn run<G>(&self, forward: bool, graph: &mut G) -> Result<ReplayOutcome, EventError>
    where
        G: BlockGraph + SnapshotCodec + ?Sized,
    {
        let outcome = match self {
            Event::Create(e) => e.run(forward, graph)?,
            Event::Delete(e) => e.run(forward, graph)?,
            Event::Change(e) => e.run(forward, graph),
            Event::Move(e) => e.run(forward, graph),
        };
        if outcome == ReplayOutcome::Stale {
            log::debug!("Skipped stale replay of {} (forward: {})", self, forward);
        }
        Ok(outcome)
    }

    /// Folds `later` into `self` when both describe the same target.
    /// Returns `true` if `later` was absorbed and should be discarded.
    pub(crate) fn absorb(&mut self, later: &Event) -> bool {
        match (self, later) {
            (Event::Move(first), Event::Move(second)) if first.merges_with(second) => {
                first.absorb(second);
                true
            }
            (Event::Change(first), Event::Change(second)) if first.merges_with(second) => {
                first.absorb(second);
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} block '{}'", self.kind(), self.block_id())?;
        match self {
            Event::Change(e) => write!(f, " [{}]", e.describe())?,
            Event::Move(e) => write!(f, " [{}]", e.describe())?,
            Event::Create(_) | Event::Delete(_) => {}
        }
        if let Some(group) = self.group() {
            write!(f, " in group '{}'", group)?;
        }
        Ok(())
    }
}

impl From<CreateEvent> for Event {
    fn from(event: CreateEvent) -> Self {
        Event::Create(event)
    }
}

impl From<DeleteEvent> for Event {
    fn from(event: DeleteEvent) -> Self {
        Event::Delete(event)
    }
}

impl From<ChangeEvent> for Event {
    fn from(event: ChangeEvent) -> Self {
        Event::Change(event)
    }
}

impl From<MoveEvent> for Event {
    fn from(event: MoveEvent) -> Self {
        Event::Move(event)
    }
}
