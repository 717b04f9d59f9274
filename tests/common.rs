//! Common test utilities: an in-memory block graph and recording listeners.
use ahash::AHashMap;
use kiroku::prelude::*;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

/// How a block plugs into a parent.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plug {
    Output,
    Previous,
    Unpluggable,
}

/// Which parent connection holds a child.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Input(String),
    Next,
}

/// Everything the snapshot codec captures for one block.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub id: BlockId,
    pub plug: Plug,
    pub inputs: Vec<String>,
    pub has_next: bool,
    pub parent: Option<(BlockId, Slot)>,
    pub position: Coordinate,
    pub fields: BTreeMap<String, String>,
    pub comment: Option<String>,
    pub collapsed: bool,
    pub disabled: bool,
    pub inline: bool,
    pub mutation: Option<String>,
}

struct MemoryBlock {
    record: BlockRecord,
    workspace: WorkspaceId,
}

type Listener = Box<dyn FnMut(&Event) -> std::result::Result<(), ListenerError>>;

/// A workspace that fans events out to any number of listeners.
#[derive(Default)]
pub struct MemoryWorkspace {
    listeners: Vec<Listener>,
}

impl Workspace for MemoryWorkspace {
    fn on_event_fired(&mut self, event: &Event) -> std::result::Result<(), ListenerError> {
        let mut result = Ok(());
        for listener in &mut self.listeners {
            if let Err(e) = listener(event) {
                result = Err(e);
            }
        }
        result
    }
}

/// In-memory block graph implementing every collaborator trait.
#[derive(Default)]
pub struct MemoryGraph {
    blocks: AHashMap<BlockId, MemoryBlock>,
    workspaces: AHashMap<WorkspaceId, MemoryWorkspace>,
    pub mutator_closes: usize,
    pub snapshots_taken: Cell<usize>,
}

#[allow(dead_code)]
impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_workspace(&mut self, id: &str) {
        self.workspaces
            .insert(WorkspaceId::from(id), MemoryWorkspace::default());
    }

    pub fn remove_workspace(&mut self, id: &str) {
        self.workspaces.remove(&WorkspaceId::from(id));
    }

    /// Adds a detached block at `(x, y)`.
    pub fn add_block(
        &mut self,
        workspace: &str,
        id: &str,
        plug: Plug,
        inputs: &[&str],
        x: f64,
        y: f64,
    ) -> BlockId {
        let block_id = BlockId::from(id);
        let record = BlockRecord {
            id: block_id.clone(),
            plug,
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            has_next: plug == Plug::Previous,
            parent: None,
            position: Coordinate::new(x, y),
            fields: BTreeMap::new(),
            comment: None,
            collapsed: false,
            disabled: false,
            inline: false,
            mutation: None,
        };
        self.blocks.insert(
            block_id.clone(),
            MemoryBlock {
                record,
                workspace: WorkspaceId::from(workspace),
            },
        );
        block_id
    }

    pub fn add_field(&mut self, id: &BlockId, name: &str, value: &str) {
        if let Some(block) = self.blocks.get_mut(id) {
            block
                .record
                .fields
                .insert(name.to_string(), value.to_string());
        }
    }

    pub fn block(&self, id: &BlockId) -> Option<&BlockRecord> {
        self.blocks.get(id).map(|b| &b.record)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn field(&self, id: &BlockId, name: &str) -> Option<String> {
        self.block(id).and_then(|b| b.fields.get(name).cloned())
    }

    /// Where the block is now, in the same shape a move event records.
    pub fn location(&self, id: &BlockId) -> Option<BlockLocation> {
        let record = self.block(id)?;
        Some(match &record.parent {
            Some((parent_id, Slot::Input(name))) => BlockLocation::Connected {
                parent_id: parent_id.clone(),
                input_name: Some(name.clone()),
            },
            Some((parent_id, Slot::Next)) => BlockLocation::Connected {
                parent_id: parent_id.clone(),
                input_name: None,
            },
            None => BlockLocation::Detached {
                coordinate: record.position,
            },
        })
    }

    /// Registers a listener that keeps a copy of every delivered event.
    pub fn record_events(&mut self, workspace: &str) -> Rc<RefCell<Vec<Event>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        self.add_listener(workspace, move |event| {
            sink.borrow_mut().push(event.clone());
            Ok(())
        });
        log
    }

    pub fn add_listener(
        &mut self,
        workspace: &str,
        listener: impl FnMut(&Event) -> std::result::Result<(), ListenerError> + 'static,
    ) {
        if let Some(ws) = self.workspaces.get_mut(&WorkspaceId::from(workspace)) {
            ws.listeners.push(Box::new(listener));
        }
    }

    fn occupant(&self, parent: &BlockId, slot: &Slot) -> Option<BlockId> {
        self.blocks
            .values()
            .find(|b| {
                b.record
                    .parent
                    .as_ref()
                    .is_some_and(|(p, s)| p == parent && s == slot)
            })
            .map(|b| b.record.id.clone())
    }

    /// The block followed by all its descendants, breadth first.
    fn subtree(&self, id: &BlockId) -> Vec<BlockId> {
        let mut order = Vec::new();
        let mut frontier = VecDeque::from([id.clone()]);
        while let Some(current) = frontier.pop_front() {
            let mut children: Vec<_> = self
                .blocks
                .values()
                .filter(|b| b.record.parent.as_ref().is_some_and(|(p, _)| *p == current))
                .map(|b| b.record.id.clone())
                .collect();
            children.sort();
            frontier.extend(children);
            order.push(current);
        }
        order
    }
}

impl BlockGraph for MemoryGraph {
    fn contains_block(&self, id: &BlockId) -> bool {
        self.blocks.contains_key(id)
    }

    fn workspace_of(&self, id: &BlockId) -> Option<WorkspaceId> {
        self.blocks.get(id).map(|b| b.workspace.clone())
    }

    fn has_workspace(&self, id: &WorkspaceId) -> bool {
        self.workspaces.contains_key(id)
    }

    fn parent_of(&self, id: &BlockId) -> Option<BlockId> {
        self.block(id)?.parent.as_ref().map(|(p, _)| p.clone())
    }

    fn input_holding(&self, parent: &BlockId, child: &BlockId) -> Option<String> {
        match &self.block(child)?.parent {
            Some((p, Slot::Input(name))) if p == parent => Some(name.clone()),
            _ => None,
        }
    }

    fn relative_position(&self, id: &BlockId) -> Option<Coordinate> {
        self.block(id).map(|b| b.position)
    }

    fn move_by(&mut self, id: &BlockId, dx: f64, dy: f64) {
        for member in self.subtree(id) {
            if let Some(block) = self.blocks.get_mut(&member) {
                block.record.position.x += dx;
                block.record.position.y += dy;
            }
        }
    }

    fn unplug(&mut self, id: &BlockId) {
        if let Some(block) = self.blocks.get_mut(id) {
            block.record.parent = None;
        }
    }

    fn connection_kind(&self, id: &BlockId) -> Option<ConnectionKind> {
        match self.block(id)?.plug {
            Plug::Output => Some(ConnectionKind::Output),
            Plug::Previous => Some(ConnectionKind::Previous),
            Plug::Unpluggable => None,
        }
    }

    fn connect(&mut self, child: &BlockId, parent: &BlockId, target: ConnectionTarget) -> bool {
        let (Some(child_record), Some(parent_record)) = (self.block(child), self.block(parent))
        else {
            return false;
        };
        let slot = match target {
            ConnectionTarget::Input(name) if parent_record.inputs.contains(&name) => {
                Slot::Input(name)
            }
            ConnectionTarget::Next
                if parent_record.has_next && child_record.plug == Plug::Previous =>
            {
                Slot::Next
            }
            _ => return false,
        };
        if child_record.plug == Plug::Unpluggable || self.occupant(parent, &slot).is_some() {
            return false;
        }
        let parent_position = parent_record.position;
        if let Some(block) = self.blocks.get_mut(child) {
            block.record.parent = Some((parent.clone(), slot));
            block.record.position = parent_position;
        }
        true
    }

    fn set_field_value(&mut self, id: &BlockId, field: &str, value: &str) -> bool {
        match self
            .blocks
            .get_mut(id)
            .and_then(|b| b.record.fields.get_mut(field))
        {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }

    fn set_comment_text(&mut self, id: &BlockId, text: Option<&str>) {
        if let Some(block) = self.blocks.get_mut(id) {
            block.record.comment = text.map(str::to_string);
        }
    }

    fn set_collapsed(&mut self, id: &BlockId, collapsed: bool) {
        if let Some(block) = self.blocks.get_mut(id) {
            block.record.collapsed = collapsed;
        }
    }

    fn set_disabled(&mut self, id: &BlockId, disabled: bool) {
        if let Some(block) = self.blocks.get_mut(id) {
            block.record.disabled = disabled;
        }
    }

    fn set_inputs_inline(&mut self, id: &BlockId, inline: bool) {
        if let Some(block) = self.blocks.get_mut(id) {
            block.record.inline = inline;
        }
    }

    fn apply_mutation(&mut self, id: &BlockId, mutation: &str) {
        if let Some(block) = self.blocks.get_mut(id) {
            self.mutator_closes += 1;
            block.record.mutation = Some(mutation.to_string());
        }
    }

    fn dispose(&mut self, id: &BlockId) {
        for member in self.subtree(id) {
            self.blocks.remove(&member);
        }
    }
}

impl SnapshotCodec for MemoryGraph {
    fn capture_subtree(&self, id: &BlockId) -> std::result::Result<Snapshot, SnapshotError> {
        self.snapshots_taken.set(self.snapshots_taken.get() + 1);
        let mut records: Vec<BlockRecord> = self
            .subtree(id)
            .iter()
            .filter_map(|member| self.block(member).cloned())
            .collect();
        // The root comes back as a top-level block at its captured position.
        if let Some(root) = records.first_mut() {
            root.parent = None;
        }
        Snapshot::encode(&records)
    }

    fn restore_subtree(
        &mut self,
        workspace: &WorkspaceId,
        snapshot: &Snapshot,
    ) -> std::result::Result<(), SnapshotError> {
        if !self.workspaces.contains_key(workspace) {
            return Err(SnapshotError::WorkspaceNotFound(workspace.clone()));
        }
        let records: Vec<BlockRecord> = snapshot.decode()?;
        if let Some(existing) = records.iter().find(|r| self.blocks.contains_key(&r.id)) {
            return Err(SnapshotError::Restore(format!(
                "block '{}' already exists",
                existing.id
            )));
        }
        for record in records {
            self.blocks.insert(
                record.id.clone(),
                MemoryBlock {
                    record,
                    workspace: workspace.clone(),
                },
            );
        }
        Ok(())
    }
}

impl WorkspaceResolver for MemoryGraph {
    fn workspace_mut(&mut self, id: &WorkspaceId) -> Option<&mut dyn Workspace> {
        self.workspaces
            .get_mut(id)
            .map(|ws| ws as &mut dyn Workspace)
    }
}

/// Workspace "ws" with two statement blocks and a value block:
/// `stmt_a` at (0, 0) with input `DO`, `stmt_b` at (100, 50) with input `DO`
/// and field `NAME = "x"`, `value_c` at (10, 200) with field `NUM = "1"`.
#[allow(dead_code)]
pub fn create_simple_graph() -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    graph.add_workspace("ws");
    graph.add_block("ws", "stmt_a", Plug::Previous, &["DO"], 0.0, 0.0);
    let b = graph.add_block("ws", "stmt_b", Plug::Previous, &["DO"], 100.0, 50.0);
    graph.add_field(&b, "NAME", "x");
    let c = graph.add_block("ws", "value_c", Plug::Output, &[], 10.0, 200.0);
    graph.add_field(&c, "NUM", "1");
    graph
}

#[allow(dead_code)]
pub fn id(s: &str) -> BlockId {
    BlockId::from(s)
}
