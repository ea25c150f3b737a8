//! Session snapshots - independent deep copies of player and story state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use story_state::{PlayerState, StoryState};

/// Errors from encoding or decoding snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("snapshot decoding failed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// A deep copy of session state.
///
/// Either half may be absent; loading a half-empty snapshot leaves the
/// other half of the live state untouched. Snapshots never alias live
/// state, so the caller is free to mutate or serialize them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StateSnapshot {
    pub player: Option<PlayerState>,
    pub story: Option<StoryState>,
}

impl StateSnapshot {
    /// Snapshot carrying both halves.
    pub fn new(player: PlayerState, story: StoryState) -> Self {
        Self {
            player: Some(player),
            story: Some(story),
        }
    }

    /// Snapshot carrying only player state.
    pub fn player_only(player: PlayerState) -> Self {
        Self {
            player: Some(player),
            story: None,
        }
    }

    /// Snapshot carrying only story state.
    pub fn story_only(story: StoryState) -> Self {
        Self {
            player: None,
            story: Some(story),
        }
    }

    /// Encode as JSON. The encoding is lossless for all state fields.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(SnapshotError::Encode)
    }

    /// Decode JSON produced by [`StateSnapshot::to_json`].
    pub fn from_json(input: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(input).map_err(SnapshotError::Decode)
    }
}
