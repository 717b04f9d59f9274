use crate::model::GroupId;
use rand::Rng;

/// Alphabet for generated group ids, 20 characters each.
const UID_SOUP: &[u8] =
    b"!#$%()*+,-./:;=?@[]^_`{|}~ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const UID_LENGTH: usize = 20;

/// Requested transition of the current group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupState {
    /// Start a new group with a freshly generated id.
    Start,
    /// End the current group.
    End,
    /// Rejoin a known group, e.g. after an asynchronous boundary.
    Join(GroupId),
}

impl From<bool> for GroupState {
    fn from(start: bool) -> Self {
        if start { GroupState::Start } else { GroupState::End }
    }
}

impl From<&str> for GroupState {
    fn from(id: &str) -> Self {
        if id.is_empty() {
            GroupState::End
        } else {
            GroupState::Join(GroupId::from(id))
        }
    }
}

impl From<String> for GroupState {
    fn from(id: String) -> Self {
        if id.is_empty() {
            GroupState::End
        } else {
            GroupState::Join(GroupId::from(id))
        }
    }
}

impl From<GroupId> for GroupState {
    fn from(id: GroupId) -> Self {
        GroupState::from(id.as_str())
    }
}

/// Tracks the group id stamped onto newly constructed events.
#[derive(Debug, Default, Clone)]
pub struct GroupTagger {
    current: Option<GroupId>,
}

impl GroupTagger {
    pub fn current(&self) -> Option<&GroupId> {
        self.current.as_ref()
    }

    pub fn set(&mut self, state: GroupState) {
        self.current = match state {
            GroupState::Start => Some(generate_uid()),
            GroupState::End => None,
            GroupState::Join(id) if id.as_str().is_empty() => None,
            GroupState::Join(id) => Some(id),
        };
        log::trace!("Event group is now {:?}", self.current);
    }
}

fn generate_uid() -> GroupId {
    let mut rng = rand::rng();
    let id: String = (0..UID_LENGTH)
        .map(|_| UID_SOUP[rng.random_range(0..UID_SOUP.len())] as char)
        .collect();
    GroupId::from(id)
}
