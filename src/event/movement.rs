use super::{EventMeta, ReplayOutcome};
use crate::control::EventContext;
use crate::error::EventError;
use crate::graph::{BlockGraph, ConnectionKind, ConnectionTarget};
use crate::model::{BlockId, BlockLocation};
use serde::{Deserialize, Serialize};

/// A block was moved: unplugged, plugged somewhere else, or dragged across
/// the surface.
///
/// Moves are recorded in two phases. [`MoveEvent::begin`] captures the old
/// location before the move; [`PendingMove::record_new`] captures the new one
/// afterwards and yields the finished event. Only finished moves convert
/// into an [`Event`](super::Event), so an unfinished one can never be fired,
/// merged or replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveEvent {
    #[serde(flatten)]
    pub meta: EventMeta,
    pub old_location: BlockLocation,
    pub new_location: BlockLocation,
}

/// A move whose new location has not been recorded yet.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a pending move must be finished with `record_new` after the move"]
pub struct PendingMove {
    meta: EventMeta,
    old_location: BlockLocation,
}

impl MoveEvent {
    /// Starts recording a move. Call before the block is touched.
    pub fn begin<G>(
        ctx: &EventContext,
        graph: &G,
        block_id: &BlockId,
    ) -> Result<PendingMove, EventError>
    where
        G: BlockGraph + ?Sized,
    {
        let meta = EventMeta::capture(ctx, graph, block_id)?;
        let old_location = current_location(graph, block_id)?;
        Ok(PendingMove { meta, old_location })
    }

    pub fn is_null(&self) -> bool {
        self.old_location == self.new_location
    }

    pub(super) fn merges_with(&self, later: &MoveEvent) -> bool {
        self.meta.block_id == later.meta.block_id
    }

    pub(super) fn absorb(&mut self, later: &MoveEvent) {
        self.new_location = later.new_location.clone();
    }

    pub(super) fn describe(&self) -> String {
        format!("{} -> {}", self.old_location, self.new_location)
    }

    pub(crate) fn run<G>(&self, forward: bool, graph: &mut G) -> ReplayOutcome
    where
        G: BlockGraph + ?Sized,
    {
        let id = &self.meta.block_id;
        if !graph.contains_block(id) {
            return ReplayOutcome::Stale;
        }
        let location = if forward {
            &self.new_location
        } else {
            &self.old_location
        };
        if let Some(parent_id) = location.parent_id() {
            if !graph.contains_block(parent_id) {
                return ReplayOutcome::Stale;
            }
        }

        if graph.parent_of(id).is_some() {
            graph.unplug(id);
        }

        match location {
            BlockLocation::Detached { coordinate } => {
                if let Some(current) = graph.relative_position(id) {
                    let (dx, dy) = current.offset_to(coordinate);
                    graph.move_by(id, dx, dy);
                }
            }
            BlockLocation::Connected {
                parent_id,
                input_name,
            } => {
                let target = match (input_name, graph.connection_kind(id)) {
                    (Some(input), _) => Some(ConnectionTarget::Input(input.clone())),
                    (None, Some(ConnectionKind::Previous)) => Some(ConnectionTarget::Next),
                    (None, _) => None,
                };
                if let Some(target) = target {
                    if !graph.connect(id, parent_id, target) {
                        log::debug!("Block '{}' could not reconnect to '{}'", id, parent_id);
                    }
                }
            }
        }
        ReplayOutcome::Applied
    }
}

impl PendingMove {
    pub fn block_id(&self) -> &BlockId {
        &self.meta.block_id
    }

    pub fn old_location(&self) -> &BlockLocation {
        &self.old_location
    }

    /// Records where the block ended up and finishes the event.
    pub fn record_new<G>(self, graph: &G) -> Result<MoveEvent, EventError>
    where
        G: BlockGraph + ?Sized,
    {
        let new_location = current_location(graph, &self.meta.block_id)?;
        Ok(MoveEvent {
            meta: self.meta,
            old_location: self.old_location,
            new_location,
        })
    }
}

/// Parent and input if the block is plugged in, otherwise its surface position.
fn current_location<G>(graph: &G, block_id: &BlockId) -> Result<BlockLocation, EventError>
where
    G: BlockGraph + ?Sized,
{
    if let Some(parent_id) = graph.parent_of(block_id) {
        let input_name = graph.input_holding(&parent_id, block_id);
        return Ok(BlockLocation::Connected {
            parent_id,
            input_name,
        });
    }
    graph
        .relative_position(block_id)
        .map(|coordinate| BlockLocation::Detached { coordinate })
        .ok_or_else(|| EventError::BlockNotFound(block_id.clone()))
}
