use super::create::{dispose, restore};
use super::{EventMeta, ReplayOutcome};
use crate::control::EventContext;
use crate::error::EventError;
use crate::graph::{BlockGraph, SnapshotCodec};
use crate::model::BlockId;
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

/// A top-level block (with its descendants) was removed from a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEvent {
    #[serde(flatten)]
    pub meta: EventMeta,
    /// The subtree as it was just before removal.
    pub old_xml: Snapshot,
}

impl DeleteEvent {
    /// Captures a block that is about to be deleted.
    ///
    /// The block must already be detached: a block with a parent fails with
    /// [`EventError::ConnectedBlockDelete`] before anything is captured.
    pub fn new<G>(ctx: &EventContext, graph: &G, block_id: &BlockId) -> Result<Self, EventError>
    where
        G: BlockGraph + SnapshotCodec + ?Sized,
    {
        if let Some(parent_id) = graph.parent_of(block_id) {
            return Err(EventError::ConnectedBlockDelete {
                block_id: block_id.clone(),
                parent_id,
            });
        }
        let meta = EventMeta::capture(ctx, graph, block_id)?;
        let old_xml = graph.capture_subtree(block_id)?;
        Ok(Self { meta, old_xml })
    }

    pub(crate) fn run<G>(&self, forward: bool, graph: &mut G) -> Result<ReplayOutcome, EventError>
    where
        G: BlockGraph + SnapshotCodec + ?Sized,
    {
        if forward {
            Ok(dispose(&self.meta.block_id, graph))
        } else {
            restore(&self.meta, &self.old_xml, graph)
        }
    }
}
