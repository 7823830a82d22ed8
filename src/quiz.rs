use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::answer;
use crate::dataset::Dataset;
use crate::error::{QuizError, Result};
use crate::session::{
    Feedback, Mode, SessionConfig, SessionSnapshot, SessionState, Status, SubmitReason, TimeLimit,
};
use crate::summary::SessionSummary;
use crate::timers::{Deferred, Timers};

/// How long the verdict on an answer stays up before the next question.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1500);
/// Input stays locked this long after a new question appears.
pub const INPUT_HOLD: Duration = Duration::from_millis(1000);
pub const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

/// The quiz session engine.
///
/// Owns the session state and a deferred-action queue. All intents are plain
/// method calls; time only moves when the caller invokes [`Quiz::advance`]
/// (or drives the countdown directly through [`Quiz::tick`]).
#[derive(Debug)]
pub struct Quiz {
    dataset: Arc<Dataset>,
    config: SessionConfig,
    state: SessionState,
    timers: Timers,
    rng: StdRng,
    revision: u64,
}

impl Quiz {
    pub fn new(dataset: Arc<Dataset>, config: SessionConfig) -> Self {
        Self::with_rng(dataset, config, StdRng::from_entropy())
    }

    /// Engine with a reproducible question order.
    pub fn with_seed(dataset: Arc<Dataset>, config: SessionConfig, seed: u64) -> Self {
        Self::with_rng(dataset, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(dataset: Arc<Dataset>, config: SessionConfig, rng: StdRng) -> Self {
        Self {
            dataset,
            config,
            state: SessionState::default(),
            timers: Timers::new(),
            rng,
            revision: 0,
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    /// Bumped on every observable change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.state.status {
            Status::NotStarted => Ok(()),
            status => Err(QuizError::InvalidState { status }),
        }
    }

    pub fn set_time_limit(&mut self, time_limit: TimeLimit) -> Result<()> {
        self.ensure_idle()?;
        self.config.time_limit = time_limit;
        self.touch();
        Ok(())
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.ensure_idle()?;
        self.config.mode = mode;
        self.touch();
        Ok(())
    }

    /// Begins a fresh session, discarding whatever the previous one left.
    pub fn start(&mut self) {
        self.timers.cancel_all();
        self.state = SessionState {
            remaining_pool: self.dataset.all().to_vec(),
            ..SessionState::default()
        };
        info!(
            mode = %self.config.mode,
            time_limit = self.config.time_limit.secs(),
            characters = self.dataset.size(),
            "quiz started"
        );

        self.draw_next();
        if self.state.status == Status::AwaitingAnswer {
            self.timers.schedule(COUNTDOWN_STEP, Deferred::CountdownTick);
        }
        self.touch();
    }

    pub fn stop(&mut self) {
        self.timers.cancel_all();
        let state = &mut self.state;
        state.status = Status::NotStarted;
        state.current = None;
        state.last_feedback = Feedback::None;
        state.remaining_pool.clear();
        state.presented_count = 0;
        state.user_input.clear();
        state.input_locked = false;
        state.input_is_japanese = false;
        state.time_left = 0;
        state.final_score = None;
        info!(score = state.score, "quiz stopped");
        self.touch();
    }

    pub fn update_input(&mut self, text: impl Into<String>) {
        if !self.state.accepts_input() {
            return;
        }
        self.state.user_input = text.into();
        self.state.input_is_japanese = match self.config.mode {
            Mode::RomanizedToSymbol => answer::contains_japanese(&self.state.user_input),
            Mode::SymbolToRomanized => false,
        };
        self.touch();
    }

    pub fn submit(&mut self, reason: SubmitReason) {
        if !self.state.accepts_input() {
            return;
        }
        let Some(current) = self.state.current.as_ref() else {
            return;
        };
        if reason == SubmitReason::UserInitiated && self.state.user_input.trim().is_empty() {
            return;
        }

        let mode = self.config.mode;
        let expected = mode.expected_for(current).to_string();
        let correct = match reason {
            SubmitReason::Timeout => false,
            SubmitReason::UserInitiated => {
                answer::is_correct(mode, &expected, &self.state.user_input)
            }
        };

        let state = &mut self.state;
        state.last_feedback = match (reason, correct) {
            (_, true) => Feedback::Correct,
            (SubmitReason::Timeout, false) => Feedback::TimedOut(expected),
            (SubmitReason::UserInitiated, false) => Feedback::Incorrect(expected),
        };
        if correct {
            state.score += 1;
            state.streak += 1;
        } else {
            state.streak = 0;
        }
        state.best_streak = state.best_streak.max(state.streak);
        state.status = Status::Cooldown;

        debug!(
            ?reason,
            feedback = ?state.last_feedback,
            score = state.score,
            streak = state.streak,
            "answer submitted"
        );

        self.timers.cancel(Deferred::CountdownTick);
        self.timers.schedule(FEEDBACK_DELAY, Deferred::DrawNext);
        self.touch();
    }

    /// One second of the countdown. Reaching zero submits a timeout.
    pub fn tick(&mut self) {
        if !self.state.accepts_input() {
            return;
        }
        self.state.time_left = self.state.time_left.saturating_sub(1);
        self.touch();
        if self.state.time_left == 0 {
            self.submit(SubmitReason::Timeout);
        }
    }

    /// Moves the engine's clock forward, firing every deferred action that
    /// falls due on the way, in due order.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(action) = self.timers.pop_due(until) {
            self.fire(action);
        }
        self.timers.settle(until);
    }

    fn fire(&mut self, action: Deferred) {
        match action {
            Deferred::CountdownTick => {
                self.tick();
                if self.state.accepts_input() {
                    self.timers.schedule(COUNTDOWN_STEP, Deferred::CountdownTick);
                }
            }
            Deferred::DrawNext => {
                if self.state.status != Status::Cooldown {
                    return;
                }
                self.draw_next();
                if self.state.status == Status::AwaitingAnswer {
                    self.state.input_locked = true;
                    self.timers.schedule(INPUT_HOLD, Deferred::ReleaseInput);
                }
                self.touch();
            }
            Deferred::ReleaseInput => {
                if self.state.status == Status::AwaitingAnswer && self.state.input_locked {
                    self.state.input_locked = false;
                    self.timers.schedule(COUNTDOWN_STEP, Deferred::CountdownTick);
                    self.touch();
                }
            }
        }
    }

    fn draw_next(&mut self) {
        let state = &mut self.state;
        if state.remaining_pool.is_empty() {
            state.status = Status::Completed;
            state.final_score = Some(state.score);
            state.current = None;
            state.user_input.clear();
            self.timers.cancel(Deferred::CountdownTick);
            info!(
                score = state.score,
                presented = state.presented_count,
                best_streak = state.best_streak,
                "quiz completed"
            );
            return;
        }

        let idx = self.rng.gen_range(0..state.remaining_pool.len());
        let entry = state.remaining_pool.swap_remove(idx);
        state.presented_count += 1;
        state.current = Some(entry);
        state.user_input.clear();
        state.input_is_japanese = false;
        state.last_feedback = Feedback::None;
        state.time_left = self.config.time_limit.secs();
        state.status = Status::AwaitingAnswer;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = &self.state;
        SessionSnapshot {
            revision: self.revision,
            config: self.config,
            status: state.status,
            prompt: state
                .current
                .as_ref()
                .map(|c| self.config.mode.prompt_for(c).to_string()),
            current: state.current.clone(),
            user_input: state.user_input.clone(),
            input_is_japanese: state.input_is_japanese,
            accepts_input: state.accepts_input(),
            score: state.score,
            streak: state.streak,
            best_streak: state.best_streak,
            presented_count: state.presented_count,
            remaining: state.remaining_pool.len(),
            total: self.dataset.size(),
            time_left: state.time_left,
            last_feedback: state.last_feedback.clone(),
            final_score: state.final_score,
        }
    }

    /// Final figures, available once the session has completed.
    pub fn summary(&self) -> Option<SessionSummary> {
        let final_score = self.state.final_score?;
        Some(SessionSummary::new(
            final_score,
            self.state.presented_count,
            self.dataset.size(),
            self.state.best_streak,
        ))
    }
}
