use serde::{Deserialize, Serialize};

use crate::dataset::CharacterEntry;
use crate::error::QuizError;

/// Direction of the quiz.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// prompt with the kana, answer with its romanization
    #[default]
    #[strum(serialize = "kana → romaji")]
    SymbolToRomanized,
    /// prompt with the romanization, answer with the kana
    #[strum(serialize = "romaji → kana")]
    RomanizedToSymbol,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::SymbolToRomanized => Mode::RomanizedToSymbol,
            Mode::RomanizedToSymbol => Mode::SymbolToRomanized,
        }
    }

    /// What the user is shown for `entry` in this mode.
    pub fn prompt_for(self, entry: &CharacterEntry) -> &str {
        match self {
            Mode::SymbolToRomanized => &entry.symbol,
            Mode::RomanizedToSymbol => &entry.romanized,
        }
    }

    /// What the user must type for `entry` in this mode.
    pub fn expected_for(self, entry: &CharacterEntry) -> &str {
        match self {
            Mode::SymbolToRomanized => &entry.romanized,
            Mode::RomanizedToSymbol => &entry.symbol,
        }
    }
}

/// Per-question time limit. Only the listed durations are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeLimit {
    Five,
    #[default]
    Ten,
    Fifteen,
    Thirty,
    Sixty,
}

impl TimeLimit {
    pub const ALL: [TimeLimit; 5] = [
        TimeLimit::Five,
        TimeLimit::Ten,
        TimeLimit::Fifteen,
        TimeLimit::Thirty,
        TimeLimit::Sixty,
    ];

    pub fn secs(self) -> u32 {
        match self {
            TimeLimit::Five => 5,
            TimeLimit::Ten => 10,
            TimeLimit::Fifteen => 15,
            TimeLimit::Thirty => 30,
            TimeLimit::Sixty => 60,
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Next longer limit, saturating at the longest.
    pub fn longer(self) -> Self {
        Self::ALL[(self.position() + 1).min(Self::ALL.len() - 1)]
    }

    /// Next shorter limit, saturating at the shortest.
    pub fn shorter(self) -> Self {
        Self::ALL[self.position().saturating_sub(1)]
    }
}

impl TryFrom<u32> for TimeLimit {
    type Error = QuizError;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|t| t.secs() == secs)
            .ok_or(QuizError::UnsupportedTimeLimit(secs))
    }
}

impl From<TimeLimit> for u32 {
    fn from(t: TimeLimit) -> Self {
        t.secs()
    }
}

impl std::fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeLimit::Sixty => write!(f, "1 minute"),
            other => write!(f, "{} seconds", other.secs()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub time_limit: TimeLimit,
    pub mode: Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    NotStarted,
    AwaitingAnswer,
    Cooldown,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Incorrect(String),
    TimedOut(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReason {
    UserInitiated,
    Timeout,
}

/// Mutable state of one quiz session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub status: Status,
    pub remaining_pool: Vec<CharacterEntry>,
    pub presented_count: usize,
    pub current: Option<CharacterEntry>,
    pub user_input: String,
    pub score: usize,
    pub streak: usize,
    pub best_streak: usize,
    pub time_left: u32,
    pub last_feedback: Feedback,
    // Set for the hold that follows every draw after an answer
    pub input_locked: bool,
    pub input_is_japanese: bool,
    pub final_score: Option<usize>,
}

impl SessionState {
    /// Whether `update_input` and `submit` currently have any effect.
    pub fn accepts_input(&self) -> bool {
        self.status == Status::AwaitingAnswer && !self.input_locked
    }
}

/// Read-only view of the session handed to a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub revision: u64,
    pub config: SessionConfig,
    pub status: Status,
    pub prompt: Option<String>,
    pub current: Option<CharacterEntry>,
    pub user_input: String,
    pub input_is_japanese: bool,
    pub accepts_input: bool,
    pub score: usize,
    pub streak: usize,
    pub best_streak: usize,
    pub presented_count: usize,
    pub remaining: usize,
    pub total: usize,
    pub time_left: u32,
    pub last_feedback: Feedback,
    pub final_score: Option<usize>,
}

impl SessionSnapshot {
    /// Fraction of the question's time still left, for gauges.
    pub fn time_ratio(&self) -> f64 {
        let limit = self.config.time_limit.secs();
        if limit == 0 {
            return 0.0;
        }
        (self.time_left as f64 / limit as f64).clamp(0.0, 1.0)
    }
}
