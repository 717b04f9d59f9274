use crate::control::{EventContext, GroupState};
use crate::error::EventError;
use crate::event::{ChangeEvent, CreateEvent, DeleteEvent, Event, MoveEvent, PendingMove};
use crate::graph::{BlockGraph, SnapshotCodec, WorkspaceResolver};
use crate::model::{BlockId, ChangeElement, ChangeValue, GroupId};
use crate::queue::{FireOutcome, FireQueue, Scheduler, TurnScheduler, dispatch, filter};
use itertools::Itertools;
use std::ops::{Deref, DerefMut};

mod builder;
mod config;

pub use builder::EventBusBuilder;
pub use config::BusConfig;

/// Summary of one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Size of the batch before filtering.
    pub batch: usize,
    pub merged: usize,
    pub dropped_null: usize,
    pub delivered: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// The event subsystem of one editor: recording state, pending batch and
/// scheduler.
///
/// Everything runs on the editor's single thread. `fire` only queues; the
/// host flushes on a later turn when the scheduler asks it to.
pub struct EventBus<S: Scheduler = TurnScheduler> {
    pub(crate) context: EventContext,
    pub(crate) queue: FireQueue,
    pub(crate) scheduler: S,
    pub(crate) batch_warn_threshold: usize,
}

impl EventBus<TurnScheduler> {
    pub fn new() -> Self {
        EventBusBuilder::new().build()
    }

    pub fn builder() -> EventBusBuilder<TurnScheduler> {
        EventBusBuilder::new()
    }

    /// Ends the host's current turn, flushing if a flush was scheduled during it
    /// and no direct `flush` has settled it since.
    pub fn end_turn<R>(&mut self, workspaces: &mut R) -> Option<FlushReport>
    where
        R: WorkspaceResolver + ?Sized,
    {
        if self.scheduler.take() {
            Some(self.flush(workspaces))
        } else {
            None
        }
    }
}

impl Default for EventBus<TurnScheduler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scheduler> EventBus<S> {
    pub fn context(&self) -> &EventContext {
        &self.context
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Events fired since the last flush.
    pub fn pending(&self) -> &[Event] {
        self.queue.pending()
    }

    // --- Suppression ---

    /// Stops accepting events. Every call must be matched by one `enable`.
    pub fn disable(&mut self) {
        self.context.suppression.disable();
    }

    pub fn enable(&mut self) {
        self.context.suppression.enable();
    }

    pub fn is_enabled(&self) -> bool {
        self.context.is_enabled()
    }

    /// Disables events until the returned guard is dropped.
    pub fn suppressed(&mut self) -> SuppressionGuard<'_, S> {
        self.disable();
        SuppressionGuard { bus: self }
    }

    // --- Grouping ---

    pub fn group(&self) -> Option<&GroupId> {
        self.context.group()
    }

    /// `true` starts a fresh group, `false` ends it, a string joins that group.
    pub fn set_group(&mut self, state: impl Into<GroupState>) {
        self.context.groups.set(state.into());
    }

    pub fn record_undo(&self) -> bool {
        self.context.record_undo
    }

    /// Affects events constructed from now on; existing events keep their flag.
    pub fn set_record_undo(&mut self, record_undo: bool) {
        self.context.record_undo = record_undo;
    }

    // --- Constructors ---

    pub fn create_event<G>(&self, graph: &G, block_id: &BlockId) -> Result<Event, EventError>
    where
        G: BlockGraph + SnapshotCodec + ?Sized,
    {
        CreateEvent::new(&self.context, graph, block_id).map(Event::from)
    }

    pub fn delete_event<G>(&self, graph: &G, block_id: &BlockId) -> Result<Event, EventError>
    where
        G: BlockGraph + SnapshotCodec + ?Sized,
    {
        DeleteEvent::new(&self.context, graph, block_id).map(Event::from)
    }

    pub fn change_event<G>(
        &self,
        graph: &G,
        block_id: &BlockId,
        element: ChangeElement,
        name: Option<&str>,
        old_value: impl Into<ChangeValue>,
        new_value: impl Into<ChangeValue>,
    ) -> Result<Event, EventError>
    where
        G: BlockGraph + ?Sized,
    {
        ChangeEvent::new(
            &self.context,
            graph,
            block_id,
            element,
            name,
            old_value,
            new_value,
        )
        .map(Event::from)
    }

    pub fn begin_move<G>(&self, graph: &G, block_id: &BlockId) -> Result<PendingMove, EventError>
    where
        G: BlockGraph + ?Sized,
    {
        MoveEvent::begin(&self.context, graph, block_id)
    }

    // --- Firing ---

    /// Queues an event for the next flush. Dropped while events are disabled.
    pub fn fire(&mut self, event: impl Into<Event>) -> FireOutcome {
        let event = event.into();
        if !self.is_enabled() {
            log::trace!("Events disabled; dropped {}", event);
            return FireOutcome::Dropped;
        }
        log::trace!("Queued {}", event);
        if self.queue.push(event) {
            self.scheduler.schedule_flush();
            FireOutcome::Scheduled
        } else {
            FireOutcome::Queued
        }
    }

    /// Filters the pending batch and dispatches what survives.
    pub fn flush<R>(&mut self, workspaces: &mut R) -> FlushReport
    where
        R: WorkspaceResolver + ?Sized,
    {
        let batch = self.queue.drain();
        self.scheduler.flushed();
        if batch.is_empty() {
            return FlushReport::default();
        }
        let size = batch.len();
        log::trace!("Flushing batch: {}", batch.iter().join("; "));
        if size > self.batch_warn_threshold {
            log::warn!(
                "Flushing {} events (threshold {}); merging is quadratic",
                size,
                self.batch_warn_threshold
            );
        }

        let filtered = filter(batch);
        let dispatched = dispatch(&filtered.events, workspaces);
        let report = FlushReport {
            batch: size,
            merged: filtered.merged,
            dropped_null: filtered.dropped_null,
            delivered: dispatched.delivered,
            skipped: dispatched.skipped,
            failed: dispatched.failed,
        };
        log::debug!(
            "Flushed {} events: {} merged, {} null, {} delivered, {} skipped, {} failed",
            report.batch,
            report.merged,
            report.dropped_null,
            report.delivered,
            report.skipped,
            report.failed
        );
        report
    }
}

/// Keeps events disabled while alive. Derefs to the bus.
pub struct SuppressionGuard<'a, S: Scheduler> {
    bus: &'a mut EventBus<S>,
}

impl<S: Scheduler> Deref for SuppressionGuard<'_, S> {
    type Target = EventBus<S>;

    fn deref(&self) -> &Self::Target {
        self.bus
    }
}

impl<S: Scheduler> DerefMut for SuppressionGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.bus
    }
}

impl<S: Scheduler> Drop for SuppressionGuard<'_, S> {
    fn drop(&mut self) {
        self.bus.enable();
    }
}
