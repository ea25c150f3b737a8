//! Choice records - the ordered log of player decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mood::Intent;

/// A single recorded player choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    /// Caller-supplied choice id. Uniqueness is not enforced.
    pub id: String,

    /// The choice text as presented to the player.
    pub text: String,

    /// Narrative intent of the choice.
    pub intent: Intent,

    /// Wall-clock time the choice was recorded.
    pub timestamp: DateTime<Utc>,
}

impl ChoiceRecord {
    /// Create a record stamped with the current time.
    pub fn new(id: impl Into<String>, text: impl Into<String>, intent: Intent) -> Self {
        Self::with_timestamp(id, text, intent, Utc::now())
    }

    /// Create a record with an explicit timestamp.
    pub fn with_timestamp(
        id: impl Into<String>,
        text: impl Into<String>,
        intent: Intent,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            intent,
            timestamp,
        }
    }
}
