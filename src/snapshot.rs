use crate::error::SnapshotError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, reconstructible capture of a block subtree.
///
/// The core never looks inside a snapshot; it only hands it back to the
/// `SnapshotCodec` that produced it. `encode` and `decode` are provided for
/// graph implementations that want a ready-made binary format.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Vec<u8>);

impl Snapshot {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes any serde value into a snapshot using bincode's standard config.
    pub fn encode<T: Serialize>(value: &T) -> Result<Self, SnapshotError> {
        encode_to_vec(value, standard())
            .map(Self)
            .map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Deserializes a snapshot previously produced by [`Snapshot::encode`].
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, SnapshotError> {
        decode_from_slice(&self.0, standard())
            .map(|(value, _)| value) // bincode 2 returns (data, bytes_read)
            .map_err(|e| SnapshotError::Decode(e.to_string()))
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Snapshot({} bytes)", self.0.len())
    }
}
