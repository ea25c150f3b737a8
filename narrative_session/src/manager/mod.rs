//! Narrative state manager - the single-owner container for session state.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::snapshot::StateSnapshot;
use story_state::{
    ChoiceRecord, Intent, InventoryItem, MoodRules, PlayerState, StateValue, StoryState, Tone,
    MAIN_BRANCH,
};

/// Unique identifier for a narrative session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a nil/empty session ID (useful for defaults).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The session state container.
///
/// The manager exclusively owns one player state and one story state and is
/// the only mutation path for either. All operations are total: inputs are
/// accepted as-is, missing keys initialize lazily, and switching to a
/// missing branch changes nothing. The manager performs no locking - the
/// surrounding application runs one manager per chat session, accessed from
/// a single task at a time.
#[derive(Debug, Clone)]
pub struct NarrativeStateManager {
    session_id: SessionId,
    rules: MoodRules,
    player: PlayerState,
    story: StoryState,
}

impl NarrativeStateManager {
    /// Create a manager with the built-in mood tuning.
    pub fn new() -> Self {
        Self::with_rules(MoodRules::default())
    }

    /// Create a manager with a custom mood tuning table.
    pub fn with_rules(rules: MoodRules) -> Self {
        Self {
            session_id: SessionId::new(),
            rules,
            player: PlayerState::new(),
            story: StoryState::new(),
        }
    }

    /// This session's identifier.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The live player state.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The live story state.
    pub fn story(&self) -> &StoryState {
        &self.story
    }

    /// The active mood tuning table.
    pub fn rules(&self) -> &MoodRules {
        &self.rules
    }

    /// Record a player choice and apply its mood impact.
    ///
    /// The record is stamped with the current time. Choice ids are not
    /// checked for uniqueness.
    pub fn record_choice(
        &mut self,
        id: impl Into<String>,
        text: impl Into<String>,
        intent: Intent,
    ) {
        let record = ChoiceRecord::new(id, text, intent);
        debug!(
            "session {}: choice '{}' ({})",
            self.session_id, record.id, record.intent
        );
        let intent = record.intent.clone();
        self.player.push_choice(record);
        self.update_mood(&intent);
    }

    /// Apply the mood impact of an intent, clamp the score, and re-derive
    /// the tone. Intents outside the tuning table leave the mood unchanged.
    pub fn update_mood(&mut self, intent: &Intent) {
        let delta = self.rules.impact(intent);
        self.player.apply_mood_delta(delta);
    }

    /// Adjust trust toward a character, initializing a missing entry at
    /// zero. Fractional and negative changes are accepted; the result is
    /// clamped to [-10, 10].
    pub fn update_trust(&mut self, character_id: impl Into<String>, change: f32) {
        self.player.adjust_trust(character_id, change);
    }

    /// Current trust toward a character. Unknown characters read as zero.
    pub fn trust(&self, character_id: &str) -> f32 {
        self.player.trust(character_id)
    }

    /// Add an item to the player's inventory. No duplicate check.
    pub fn add_to_inventory(&mut self, item_id: impl Into<String>, item_name: impl Into<String>) {
        self.player.add_item(InventoryItem::new(item_id, item_name));
    }

    /// Set or overwrite a player preference.
    pub fn update_preference(&mut self, key: impl Into<String>, value: StateValue) {
        self.player.set_preference(key, value);
    }

    /// Set or overwrite an alliance value.
    pub fn update_alliance(&mut self, key: impl Into<String>, value: StateValue) {
        self.player.set_alliance(key, value);
    }

    /// Set or overwrite a world state value.
    pub fn update_world_state(&mut self, key: impl Into<String>, value: StateValue) {
        self.story.set_world_value(key, value);
    }

    /// Set or overwrite a per-character state value, initializing the
    /// character's map if absent.
    pub fn update_character_state(
        &mut self,
        character_id: impl Into<String>,
        key: impl Into<String>,
        value: StateValue,
    ) {
        self.story.set_character_value(character_id, key, value);
    }

    /// Append an event id to the triggered-event log. Duplicates are
    /// allowed.
    pub fn record_triggered_event(&mut self, event_id: impl Into<String>) {
        self.story.record_event(event_id);
    }

    /// Whether an event id appears in the triggered-event log.
    pub fn has_triggered(&self, event_id: &str) -> bool {
        self.story.has_triggered(event_id)
    }

    /// Fork the current story state into a branch rooted at main.
    pub fn create_branch(&mut self, branch_id: impl Into<String>) {
        self.create_branch_from(branch_id, MAIN_BRANCH);
    }

    /// Fork the current story state, recording `from_branch` as the parent.
    ///
    /// Only story state is snapshotted - player state stays live across
    /// branches. An existing branch with the same id is silently
    /// overwritten.
    pub fn create_branch_from(
        &mut self,
        branch_id: impl Into<String>,
        from_branch: impl Into<String>,
    ) {
        let branch_id = branch_id.into();
        let from_branch = from_branch.into();
        debug!(
            "session {}: branch '{}' forked from '{}'",
            self.session_id, branch_id, from_branch
        );
        self.story.fork(branch_id, from_branch);
    }

    /// Switch to a stored branch, restoring a copy of its snapshot and
    /// updating the current branch id.
    ///
    /// Returns `false` and changes nothing when the branch does not exist.
    pub fn switch_branch(&mut self, branch_id: &str) -> bool {
        let switched = self.story.switch_to(branch_id);
        if switched {
            debug!("session {}: switched to branch '{}'", self.session_id, branch_id);
        } else {
            warn!(
                "session {}: branch '{}' does not exist, state unchanged",
                self.session_id, branch_id
            );
        }
        switched
    }

    /// Id of the branch the session is currently on.
    pub fn current_branch(&self) -> &str {
        &self.story.current_branch
    }

    /// Ids of all stored branches.
    pub fn branch_ids(&self) -> impl Iterator<Item = &str> {
        self.story.branch_ids()
    }

    /// Current mood score.
    pub fn mood_score(&self) -> f32 {
        self.player.mood_score
    }

    /// Current derived tone.
    pub fn tone(&self) -> Tone {
        self.player.tone
    }

    /// Number of choices recorded this session.
    pub fn choice_count(&self) -> usize {
        self.player.choices.len()
    }

    /// The most recent choice, if any.
    pub fn last_choice(&self) -> Option<&ChoiceRecord> {
        self.player.last_choice()
    }

    /// Take a deep copy of both states, safe for external mutation.
    pub fn state_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(self.player.clone(), self.story.clone())
    }

    /// Restore state from a snapshot.
    ///
    /// Each half applies independently: a snapshot holding only player
    /// state leaves the live story state untouched, and vice versa.
    pub fn load_snapshot(&mut self, snapshot: StateSnapshot) {
        if let Some(player) = snapshot.player {
            self.player = player;
        }
        if let Some(story) = snapshot.story {
            self.story = story;
        }
    }
}

impl Default for NarrativeStateManager {
    fn default() -> Self {
        Self::new()
    }
}
