//! Player state - choices, mood, trust, and holdings for one session.

mod choice;

pub use choice::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::mood::{Tone, MOOD_MAX, MOOD_MIN, TRUST_MAX, TRUST_MIN};
use crate::story::StateValue;

/// An item held by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
}

impl InventoryItem {
    /// Create an item with the given id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Accumulated player-facing state for a single session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlayerState {
    /// Every choice made this session, in order. Duplicates permitted.
    pub choices: Vec<ChoiceRecord>,

    /// Derived narrative tone, kept in sync with `mood_score`.
    pub tone: Tone,

    /// Free-form player preferences.
    pub preferences: HashMap<String, StateValue>,

    /// Free-form alliance data.
    pub alliances: HashMap<String, StateValue>,

    /// Items collected, in pickup order. Duplicates permitted.
    pub inventory: Vec<InventoryItem>,

    /// Accumulated mood, clamped to [-10, 10].
    pub mood_score: f32,

    /// Character id -> trust, each value clamped to [-10, 10].
    pub trust_levels: HashMap<String, f32>,
}

impl PlayerState {
    /// Create a fresh player state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a choice to the log.
    pub fn push_choice(&mut self, record: ChoiceRecord) {
        self.choices.push(record);
    }

    /// The most recent choice, if any.
    pub fn last_choice(&self) -> Option<&ChoiceRecord> {
        self.choices.last()
    }

    /// Apply a mood delta, clamping the score and re-deriving the tone.
    pub fn apply_mood_delta(&mut self, delta: f32) {
        self.mood_score = (self.mood_score + delta).clamp(MOOD_MIN, MOOD_MAX);
        self.tone = Tone::from_score(self.mood_score);
    }

    /// Adjust trust toward a character, initializing missing entries at zero.
    ///
    /// Fractional and negative changes are accepted; the result is clamped.
    pub fn adjust_trust(&mut self, character_id: impl Into<String>, change: f32) {
        let trust = self.trust_levels.entry(character_id.into()).or_insert(0.0);
        *trust = (*trust + change).clamp(TRUST_MIN, TRUST_MAX);
    }

    /// Current trust toward a character. Unknown characters read as zero.
    pub fn trust(&self, character_id: &str) -> f32 {
        self.trust_levels.get(character_id).copied().unwrap_or(0.0)
    }

    /// Append an item. No duplicate check.
    pub fn add_item(&mut self, item: InventoryItem) {
        self.inventory.push(item);
    }

    /// Set or overwrite a preference value.
    pub fn set_preference(&mut self, key: impl Into<String>, value: StateValue) {
        self.preferences.insert(key.into(), value);
    }

    /// Set or overwrite an alliance value.
    pub fn set_alliance(&mut self, key: impl Into<String>, value: StateValue) {
        self.alliances.insert(key.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::Intent;

    #[test]
    fn test_new_player_state() {
        let player = PlayerState::new();
        assert!(player.choices.is_empty());
        assert_eq!(player.tone, Tone::Neutral);
        assert_eq!(player.mood_score, 0.0);
    }

    #[test]
    fn test_mood_stays_clamped() {
        let mut player = PlayerState::new();

        for _ in 0..30 {
            player.apply_mood_delta(1.0);
            assert!(player.mood_score <= MOOD_MAX);
        }
        assert_eq!(player.mood_score, MOOD_MAX);

        for _ in 0..60 {
            player.apply_mood_delta(-2.0);
            assert!(player.mood_score >= MOOD_MIN);
        }
        assert_eq!(player.mood_score, MOOD_MIN);
    }

    #[test]
    fn test_tone_tracks_mood() {
        let mut player = PlayerState::new();

        player.apply_mood_delta(5.0);
        assert_eq!(player.tone, Tone::Neutral);

        player.apply_mood_delta(1.0);
        assert_eq!(player.tone, Tone::Positive);

        player.apply_mood_delta(-12.0);
        assert_eq!(player.tone, Tone::Negative);
    }

    #[test]
    fn test_trust_initializes_at_zero() {
        let mut player = PlayerState::new();
        assert_eq!(player.trust("elena"), 0.0);

        player.adjust_trust("elena", 2.5);
        assert!((player.trust("elena") - 2.5).abs() < 0.001);
    }

    #[test]
    fn test_trust_stays_clamped() {
        let mut player = PlayerState::new();

        player.adjust_trust("elena", 25.0);
        assert_eq!(player.trust("elena"), TRUST_MAX);

        player.adjust_trust("elena", -100.0);
        assert_eq!(player.trust("elena"), TRUST_MIN);
    }

    #[test]
    fn test_duplicate_choices_permitted() {
        let mut player = PlayerState::new();

        player.push_choice(ChoiceRecord::new("c1", "Run", Intent::parse("flee")));
        player.push_choice(ChoiceRecord::new("c1", "Run", Intent::parse("flee")));

        assert_eq!(player.choices.len(), 2);
        assert_eq!(player.last_choice().unwrap().id, "c1");
    }

    #[test]
    fn test_duplicate_items_permitted() {
        let mut player = PlayerState::new();

        player.add_item(InventoryItem::new("potion", "Healing Potion"));
        player.add_item(InventoryItem::new("potion", "Healing Potion"));

        assert_eq!(player.inventory.len(), 2);
    }

    #[test]
    fn test_preferences_upsert() {
        let mut player = PlayerState::new();

        player.set_preference("pace", StateValue::from("slow"));
        player.set_preference("pace", StateValue::from("fast"));

        assert_eq!(player.preferences.len(), 1);
        assert_eq!(player.preferences["pace"], StateValue::from("fast"));
    }
}
