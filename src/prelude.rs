//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the kiroku crate.
//! Import this module to get the event bus, the event types and the collaborator
//! traits without importing each one individually.

// Bus and controls
pub use crate::bus::{BusConfig, EventBus, EventBusBuilder, FlushReport, SuppressionGuard};
pub use crate::control::{EventContext, GroupState};

// Events
pub use crate::event::{
    ChangeEvent, CreateEvent, DeleteEvent, Event, EventKind, EventMeta, MoveEvent, PendingMove,
    ReplayOutcome,
};

// Identifiers and values
pub use crate::model::{
    BlockId, BlockLocation, ChangeElement, ChangeValue, Coordinate, GroupId, WorkspaceId,
};

// External collaborators
pub use crate::graph::{
    BlockGraph, ConnectionKind, ConnectionTarget, SnapshotCodec, Workspace, WorkspaceResolver,
};
pub use crate::snapshot::Snapshot;

// Queueing
pub use crate::queue::{CallbackScheduler, FireOutcome, Scheduler, TurnScheduler};

// Error types
pub use crate::error::{ConfigError, EventError, ListenerError, SnapshotError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
