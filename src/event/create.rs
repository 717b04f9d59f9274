use super::{EventMeta, ReplayOutcome};
use crate::control::EventContext;
use crate::error::{EventError, SnapshotError};
use crate::graph::{BlockGraph, SnapshotCodec};
use crate::model::BlockId;
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

/// A block (with its descendants) was added to a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEvent {
    #[serde(flatten)]
    pub meta: EventMeta,
    /// The created subtree, including its position on the surface.
    pub xml: Snapshot,
}

impl CreateEvent {
    /// Captures a freshly created block. Call after the block exists.
    pub fn new<G>(ctx: &EventContext, graph: &G, block_id: &BlockId) -> Result<Self, EventError>
    where
        G: BlockGraph + SnapshotCodec + ?Sized,
    {
        let meta = EventMeta::capture(ctx, graph, block_id)?;
        let xml = graph.capture_subtree(block_id)?;
        Ok(Self { meta, xml })
    }

    pub(crate) fn run<G>(&self, forward: bool, graph: &mut G) -> Result<ReplayOutcome, EventError>
    where
        G: BlockGraph + SnapshotCodec + ?Sized,
    {
        if forward {
            restore(&self.meta, &self.xml, graph)
        } else {
            Ok(dispose(&self.meta.block_id, graph))
        }
    }
}

/// Rebuilds a subtree from its snapshot, treating a vanished workspace as stale.
pub(super) fn restore<G>(
    meta: &EventMeta,
    snapshot: &Snapshot,
    graph: &mut G,
) -> Result<ReplayOutcome, EventError>
where
    G: BlockGraph + SnapshotCodec + ?Sized,
{
    if !graph.has_workspace(&meta.workspace_id) {
        return Ok(ReplayOutcome::Stale);
    }
    match graph.restore_subtree(&meta.workspace_id, snapshot) {
        Ok(()) => Ok(ReplayOutcome::Applied),
        Err(SnapshotError::WorkspaceNotFound(_)) => Ok(ReplayOutcome::Stale),
        Err(e) => Err(e.into()),
    }
}

/// Disposes a block for good; it is not kept around for reuse.
pub(super) fn dispose<G>(block_id: &BlockId, graph: &mut G) -> ReplayOutcome
where
    G: BlockGraph + ?Sized,
{
    if !graph.contains_block(block_id) {
        return ReplayOutcome::Stale;
    }
    graph.dispose(block_id);
    ReplayOutcome::Applied
}
