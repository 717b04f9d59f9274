//! Deferred firing: pending batch, scheduling, merge/filter, dispatch.

pub mod dispatch;
pub mod filter;
pub mod scheduler;

pub use dispatch::{DispatchReport, dispatch};
pub use filter::{FilterReport, filter};
pub use scheduler::{CallbackScheduler, Scheduler, TurnScheduler};

use crate::event::Event;

/// What `fire` did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Events are disabled; the event was discarded.
    Dropped,
    /// First event of a new batch; a flush was scheduled.
    Scheduled,
    /// Joined a batch whose flush is already scheduled.
    Queued,
}

/// Events fired since the last flush.
///
/// Only `push` (from `fire`) and `drain` (from the flush) touch the batch.
#[derive(Debug, Default)]
pub struct FireQueue {
    pending: Vec<Event>,
}

impl FireQueue {
    /// Appends an event; returns `true` when it opened a new batch.
    pub(crate) fn push(&mut self, event: Event) -> bool {
        let opened = self.pending.is_empty();
        self.pending.push(event);
        opened
    }

    /// Takes the whole batch, leaving the queue empty.
    pub(crate) fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> &[Event] {
        &self.pending
    }
}
