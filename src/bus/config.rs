use crate::error::ConfigError;
use serde::Deserialize;

/// Tunables for an `EventBus`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BusConfig {
    /// Initial value of the bus-wide undo flag stamped onto new events.
    pub record_undo: bool,
    /// Batches larger than this are logged at `warn`; the merge pass is quadratic.
    pub batch_warn_threshold: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            record_undo: true,
            batch_warn_threshold: 64,
        }
    }
}

impl BusConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
