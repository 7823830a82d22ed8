use serde::Serialize;

/// How a finished session is judged, by share of correct answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum Verdict {
    #[strum(serialize = "Perfect score! You're a hiragana master!")]
    Perfect,
    #[strum(serialize = "Excellent work! You're doing great!")]
    Excellent,
    #[strum(serialize = "Good job! Keep practicing!")]
    Good,
    #[strum(serialize = "Nice try! Practice makes perfect!")]
    KeepPracticing,
}

impl Verdict {
    pub fn for_score(score: usize, total: usize) -> Self {
        let score = score as f64;
        let total = total as f64;
        if score >= total {
            Verdict::Perfect
        } else if score >= total * 0.8 {
            Verdict::Excellent
        } else if score >= total * 0.6 {
            Verdict::Good
        } else {
            Verdict::KeepPracticing
        }
    }
}

/// End-of-game figures shown once every character has been asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub score: usize,
    pub presented: usize,
    pub total: usize,
    /// whole percent, rounded
    pub accuracy: u32,
    pub best_streak: usize,
    pub verdict: Verdict,
}

impl SessionSummary {
    pub fn new(score: usize, presented: usize, total: usize, best_streak: usize) -> Self {
        Self {
            score,
            presented,
            total,
            accuracy: accuracy_percent(score, presented),
            best_streak,
            verdict: Verdict::for_score(score, total),
        }
    }
}

pub fn accuracy_percent(score: usize, presented: usize) -> u32 {
    if presented == 0 {
        return 0;
    }
    ((score as f64 / presented as f64) * 100.0).round() as u32
}
