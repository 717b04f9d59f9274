use crate::model::{BlockId, WorkspaceId};
use thiserror::Error;

/// Errors raised while constructing or replaying an event.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventError {
    #[error(
        "Connected block '{block_id}' cannot be deleted; detach it from parent '{parent_id}' first"
    )]
    ConnectedBlockDelete { block_id: BlockId, parent_id: BlockId },

    #[error("Block '{0}' not found in the graph")]
    BlockNotFound(BlockId),

    #[error("Block '{0}' does not belong to any workspace")]
    WorkspaceNotFound(BlockId),

    #[error("Snapshot failure: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Errors reported by a `SnapshotCodec` or by the `Snapshot` helpers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(String),

    #[error("Failed to decode snapshot: {0}")]
    Decode(String),

    #[error("Workspace '{0}' no longer exists")]
    WorkspaceNotFound(WorkspaceId),

    #[error("Failed to restore subtree: {0}")]
    Restore(String),
}

/// Errors a workspace listener may return while handling a fired event.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ListenerError {
    #[error("Listener '{listener}' rejected the event: {reason}")]
    Rejected { listener: String, reason: String },

    #[error("Listener failed: {0}")]
    Failed(String),
}

/// Errors that can occur while loading a `BusConfig`.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Failed to parse event bus config: {0}")]
    Parse(String),
}
