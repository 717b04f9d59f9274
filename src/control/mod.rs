//! Enable/disable and grouping controls shared by every event constructor.

pub mod group;
pub mod suppression;

pub use group::{GroupState, GroupTagger};
pub use suppression::Suppression;

use crate::model::GroupId;

/// The mutable recording state events are stamped with at construction.
///
/// Owned by an `EventBus`; there is no process-wide instance.
#[derive(Debug)]
pub struct EventContext {
    pub(crate) suppression: Suppression,
    pub(crate) groups: GroupTagger,
    pub(crate) record_undo: bool,
}

impl EventContext {
    pub fn new(record_undo: bool) -> Self {
        Self {
            suppression: Suppression::default(),
            groups: GroupTagger::default(),
            record_undo,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.suppression.is_enabled()
    }

    pub fn group(&self) -> Option<&GroupId> {
        self.groups.current()
    }

    pub fn record_undo(&self) -> bool {
        self.record_undo
    }
}

impl Default for EventContext {
    fn default() -> Self {
        Self::new(true)
    }
}
