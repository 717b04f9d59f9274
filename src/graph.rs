//! Interfaces to the external collaborators the event core drives.
//!
//! The event core owns none of the editor's data. It reads and mutates the
//! block graph through [`BlockGraph`], captures and rebuilds subtrees through
//! [`SnapshotCodec`], and notifies workspaces through [`WorkspaceResolver`].

use crate::error::{ListenerError, SnapshotError};
use crate::event::Event;
use crate::model::{BlockId, Coordinate, WorkspaceId};
use crate::snapshot::Snapshot;

/// The connection a block uses to plug into its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// Value blocks plug into a parent's input.
    Output,
    /// Statement blocks plug into a parent's input or its next connection.
    Previous,
}

/// The parent-side connection a block is attached to during replay.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConnectionTarget {
    Input(String),
    Next,
}

/// Block lookup and the block capabilities replay needs.
///
/// Lookups are global across workspaces. Every method takes block ids rather
/// than references, so a stale id is simply an absent block.
pub trait BlockGraph {
    fn contains_block(&self, id: &BlockId) -> bool;

    /// The workspace a block belongs to.
    fn workspace_of(&self, id: &BlockId) -> Option<WorkspaceId>;

    fn has_workspace(&self, id: &WorkspaceId) -> bool;

    fn parent_of(&self, id: &BlockId) -> Option<BlockId>;

    /// Name of the input on `parent` that holds `child`, or `None` when the
    /// child is attached to the parent's next connection.
    fn input_holding(&self, parent: &BlockId, child: &BlockId) -> Option<String>;

    /// Position relative to the workspace surface.
    fn relative_position(&self, id: &BlockId) -> Option<Coordinate>;

    fn move_by(&mut self, id: &BlockId, dx: f64, dy: f64);

    /// Disconnects the block (and everything below it) from its parent.
    fn unplug(&mut self, id: &BlockId);

    /// The block's primary connection, `None` for blocks that cannot be plugged.
    fn connection_kind(&self, id: &BlockId) -> Option<ConnectionKind>;

    /// Plugs `child` into `parent`. Returns `false` if the target connection
    /// does not exist or refuses the child.
    fn connect(&mut self, child: &BlockId, parent: &BlockId, target: ConnectionTarget) -> bool;

    /// Returns `false` when the block has no field with that name.
    fn set_field_value(&mut self, id: &BlockId, field: &str, value: &str) -> bool;

    fn set_comment_text(&mut self, id: &BlockId, text: Option<&str>);

    fn set_collapsed(&mut self, id: &BlockId, collapsed: bool);

    fn set_disabled(&mut self, id: &BlockId, disabled: bool);

    fn set_inputs_inline(&mut self, id: &BlockId, inline: bool);

    /// Closes any open mutator UI for the block, then applies the mutation text.
    fn apply_mutation(&mut self, id: &BlockId, mutation: &str);

    /// Hook for editor-specific change elements. Ignored unless overridden.
    fn apply_custom_change(
        &mut self,
        _id: &BlockId,
        _element: &str,
        _name: Option<&str>,
        _value: &crate::model::ChangeValue,
    ) -> bool {
        false
    }

    /// Removes the block and its descendants for good.
    fn dispose(&mut self, id: &BlockId);
}

/// Captures and rebuilds block subtrees.
pub trait SnapshotCodec {
    /// Captures the block, its descendants and its canvas position.
    fn capture_subtree(&self, id: &BlockId) -> Result<Snapshot, SnapshotError>;

    /// Rebuilds a captured subtree inside `workspace`.
    fn restore_subtree(
        &mut self,
        workspace: &WorkspaceId,
        snapshot: &Snapshot,
    ) -> Result<(), SnapshotError>;
}

/// A graph container that receives fired events.
pub trait Workspace {
    /// The single notification hook. Fanning out to several listeners is
    /// the workspace's job.
    fn on_event_fired(&mut self, event: &Event) -> Result<(), ListenerError>;
}

/// Resolves workspace ids to live workspaces at flush time.
pub trait WorkspaceResolver {
    fn workspace_mut(&mut self, id: &WorkspaceId) -> Option<&mut dyn Workspace>;
}
