//! Mood mechanics: choice intents, tone derivation, and tuning rules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Lower bound for the accumulated mood score.
pub const MOOD_MIN: f32 = -10.0;
/// Upper bound for the accumulated mood score.
pub const MOOD_MAX: f32 = 10.0;
/// Lower bound for per-character trust.
pub const TRUST_MIN: f32 = -10.0;
/// Upper bound for per-character trust.
pub const TRUST_MAX: f32 = 10.0;

/// Scores strictly above this read as a positive tone.
const POSITIVE_THRESHOLD: f32 = 5.0;
/// Scores strictly below this read as a negative tone.
const NEGATIVE_THRESHOLD: f32 = -5.0;

/// The narrative effect of a player choice.
///
/// Unrecognized keywords are carried through as [`Intent::Other`] rather
/// than rejected; under the default rules they have no mood impact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Intent {
    Help,
    Attack,
    Explore,
    Defend,
    Negotiate,
    /// Free-form intent outside the known vocabulary.
    Other(String),
}

impl Intent {
    /// Parse an intent keyword.
    pub fn parse(keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        match keyword.as_str() {
            "help" => Intent::Help,
            "attack" => Intent::Attack,
            "explore" => Intent::Explore,
            "defend" => Intent::Defend,
            "negotiate" => Intent::Negotiate,
            _ => Intent::Other(keyword),
        }
    }

    /// The keyword form used in serialized state and rule tables.
    pub fn keyword(&self) -> &str {
        match self {
            Intent::Help => "help",
            Intent::Attack => "attack",
            Intent::Explore => "explore",
            Intent::Defend => "defend",
            Intent::Negotiate => "negotiate",
            Intent::Other(keyword) => keyword,
        }
    }
}

impl From<String> for Intent {
    fn from(keyword: String) -> Self {
        Intent::parse(keyword)
    }
}

impl From<Intent> for String {
    fn from(intent: Intent) -> Self {
        intent.keyword().to_string()
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Derived overall narrative mood classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Tone {
    /// Derive the tone for an accumulated mood score.
    ///
    /// Boundary scores of exactly 5 or -5 stay neutral.
    pub fn from_score(score: f32) -> Self {
        if score > POSITIVE_THRESHOLD {
            Tone::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

/// Errors from loading mood tuning data.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid tuning data: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Per-intent mood impact table.
///
/// The default table is the built-in narrative tuning. Alternative tunings
/// can be loaded from TOML; keywords in the file override the defaults, so
/// a tuning file only needs to list the intents it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRules {
    /// Intent keyword -> mood delta.
    impacts: HashMap<String, f32>,
}

impl Default for MoodRules {
    fn default() -> Self {
        let mut impacts = HashMap::new();
        impacts.insert("help".to_string(), 1.0);
        impacts.insert("attack".to_string(), -2.0);
        impacts.insert("explore".to_string(), 0.5);
        impacts.insert("defend".to_string(), -1.0);
        impacts.insert("negotiate".to_string(), 0.5);
        Self { impacts }
    }
}

/// On-disk shape of a tuning file.
#[derive(Deserialize)]
struct RulesFile {
    #[serde(default)]
    impacts: HashMap<String, f32>,
}

impl MoodRules {
    /// Create the built-in tuning table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mood delta for an intent. Intents outside the table score zero.
    pub fn impact(&self, intent: &Intent) -> f32 {
        self.impacts.get(intent.keyword()).copied().unwrap_or(0.0)
    }

    /// Override or add the impact for an intent keyword.
    pub fn set_impact(&mut self, keyword: impl Into<String>, delta: f32) {
        self.impacts.insert(keyword.into(), delta);
    }

    /// Load a tuning table from TOML, layered over the defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, RulesError> {
        let file: RulesFile = toml::from_str(input)?;
        let mut rules = Self::default();
        rules.impacts.extend(file.impacts);
        Ok(rules)
    }
}
