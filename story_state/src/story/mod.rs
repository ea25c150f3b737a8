//! Story state - the branching world and character state for one session.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Branch id every session starts on.
pub const MAIN_BRANCH: &str = "main";

/// Value type for the free-form state maps.
///
/// Values are type-erased JSON so callers can store whatever shape the
/// surrounding application needs.
pub type StateValue = serde_json::Value;

/// A named fork point: the parent branch id plus a full copy of the story
/// state taken when the fork was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchPoint {
    /// Branch this fork was taken from.
    pub from: String,

    /// Story state at fork time. Independent of the live state.
    pub state: StoryState,
}

/// The branching story state for a single session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryState {
    /// Id of the branch the session is currently on.
    pub current_branch: String,

    /// Saved fork points by branch id.
    pub branches: HashMap<String, BranchPoint>,

    /// Free-form world flags and variables.
    pub world_state: HashMap<String, StateValue>,

    /// Character id -> free-form per-character state.
    pub character_states: HashMap<String, HashMap<String, StateValue>>,

    /// Every triggered event id, in order. Duplicates permitted.
    pub triggered_events: Vec<String>,
}

impl Default for StoryState {
    fn default() -> Self {
        Self {
            current_branch: MAIN_BRANCH.to_string(),
            branches: HashMap::new(),
            world_state: HashMap::new(),
            character_states: HashMap::new(),
            triggered_events: Vec::new(),
        }
    }
}

impl StoryState {
    /// Create a fresh story state on the main branch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite a world state value.
    pub fn set_world_value(&mut self, key: impl Into<String>, value: StateValue) {
        self.world_state.insert(key.into(), value);
    }

    /// Read a world state value.
    pub fn world_value(&self, key: &str) -> Option<&StateValue> {
        self.world_state.get(key)
    }

    /// Set or overwrite a per-character value, initializing the character's
    /// map if absent.
    pub fn set_character_value(
        &mut self,
        character_id: impl Into<String>,
        key: impl Into<String>,
        value: StateValue,
    ) {
        self.character_states
            .entry(character_id.into())
            .or_default()
            .insert(key.into(), value);
    }

    /// Read a per-character value.
    pub fn character_value(&self, character_id: &str, key: &str) -> Option<&StateValue> {
        self.character_states
            .get(character_id)
            .and_then(|state| state.get(key))
    }

    /// Append an event id to the log. Duplicates are allowed.
    pub fn record_event(&mut self, event_id: impl Into<String>) {
        self.triggered_events.push(event_id.into());
    }

    /// Whether an event id appears anywhere in the log.
    pub fn has_triggered(&self, event_id: &str) -> bool {
        self.triggered_events.iter().any(|id| id == event_id)
    }

    /// Snapshot the current state under `branch_id`.
    ///
    /// The stored copy is fully independent of the live state; later
    /// mutations on either side do not affect the other. An existing branch
    /// with the same id is silently overwritten. `from` records the parent
    /// branch id only - the copy is always taken from the current state.
    pub fn fork(&mut self, branch_id: impl Into<String>, from: impl Into<String>) {
        let point = BranchPoint {
            from: from.into(),
            state: self.clone(),
        };
        self.branches.insert(branch_id.into(), point);
    }

    /// Switch to a stored branch, restoring a copy of its snapshot and
    /// updating `current_branch`.
    ///
    /// Returns `false` and leaves the state untouched when the branch does
    /// not exist.
    pub fn switch_to(&mut self, branch_id: &str) -> bool {
        match self.branches.get(branch_id) {
            Some(point) => {
                let mut restored = point.state.clone();
                restored.current_branch = branch_id.to_string();
                *self = restored;
                true
            }
            None => false,
        }
    }

    /// Ids of all stored branches.
    pub fn branch_ids(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(String::as_str)
    }

    /// Number of stored branches.
    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_story_state() {
        let story = StoryState::new();
        assert_eq!(story.current_branch, MAIN_BRANCH);
        assert_eq!(story.branch_count(), 0);
        assert!(story.triggered_events.is_empty());
    }

    #[test]
    fn test_world_state_upsert() {
        let mut story = StoryState::new();

        story.set_world_value("gate_open", StateValue::Bool(false));
        story.set_world_value("gate_open", StateValue::Bool(true));

        assert_eq!(story.world_state.len(), 1);
        assert_eq!(story.world_value("gate_open"), Some(&StateValue::Bool(true)));
    }

    #[test]
    fn test_character_state_lazily_initialized() {
        let mut story = StoryState::new();
        assert_eq!(story.character_value("elena", "location"), None);

        story.set_character_value("elena", "location", StateValue::from("tavern"));

        assert_eq!(
            story.character_value("elena", "location"),
            Some(&StateValue::from("tavern"))
        );
    }

    #[test]
    fn test_duplicate_events_permitted() {
        let mut story = StoryState::new();

        story.record_event("bridge_collapsed");
        story.record_event("bridge_collapsed");

        assert_eq!(story.triggered_events.len(), 2);
        assert!(story.has_triggered("bridge_collapsed"));
        assert!(!story.has_triggered("dragon_slain"));
    }

    #[test]
    fn test_fork_snapshot_is_independent() {
        let mut story = StoryState::new();
        story.set_world_value("season", StateValue::from("winter"));

        story.fork("alt", MAIN_BRANCH);

        // Mutating live state must not leak into the stored snapshot
        story.set_world_value("season", StateValue::from("summer"));
        story.record_event("thaw");

        let stored = &story.branches["alt"].state;
        assert_eq!(stored.world_value("season"), Some(&StateValue::from("winter")));
        assert!(!stored.has_triggered("thaw"));
    }

    #[test]
    fn test_fork_overwrites_existing_branch() {
        let mut story = StoryState::new();

        story.set_world_value("ally", StateValue::from("elena"));
        story.fork("alt", MAIN_BRANCH);

        story.set_world_value("ally", StateValue::from("marcus"));
        story.fork("alt", MAIN_BRANCH);

        assert_eq!(story.branch_count(), 1);
        assert_eq!(
            story.branches["alt"].state.world_value("ally"),
            Some(&StateValue::from("marcus"))
        );
    }

    #[test]
    fn test_switch_to_restores_snapshot() {
        let mut story = StoryState::new();
        story.set_world_value("gate_open", StateValue::Bool(false));
        story.fork("before_gate", MAIN_BRANCH);
        let expected = story.branches["before_gate"].state.clone();

        story.set_world_value("gate_open", StateValue::Bool(true));
        story.record_event("gate_opened");

        assert!(story.switch_to("before_gate"));
        assert_eq!(story.current_branch, "before_gate");
        assert_eq!(story.world_value("gate_open"), Some(&StateValue::Bool(false)));
        assert!(!story.has_triggered("gate_opened"));

        // Everything except the branch id matches the fork-time snapshot
        let mut restored = story.clone();
        restored.current_branch = expected.current_branch.clone();
        assert_eq!(restored, expected);
    }

    #[test]
    fn test_switch_to_missing_branch_is_noop() {
        let mut story = StoryState::new();
        story.set_world_value("season", StateValue::from("winter"));
        let before = story.clone();

        assert!(!story.switch_to("nonexistent"));
        assert_eq!(story, before);
        assert_eq!(story.current_branch, MAIN_BRANCH);
    }

    #[test]
    fn test_fork_carries_earlier_branches() {
        let mut story = StoryState::new();

        story.fork("first", MAIN_BRANCH);
        story.fork("second", MAIN_BRANCH);

        // The later snapshot saw "first" but not itself
        let second = &story.branches["second"].state;
        assert!(second.branches.contains_key("first"));
        assert!(!second.branches.contains_key("second"));
    }
}
