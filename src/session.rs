use std::time::Duration;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::{
    challenge::{ChallengeConfig, Direction, Dojo, Mode, Status},
    distractor,
    error::ConfigError,
    judge::Verdict,
};

/// Where a session is in the question lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum Phase {
    /// built but not started
    Idle,
    /// question shown, answer awaited
    Presenting,
    /// verdict computed, feedback shown
    Evaluated,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum FinishReason {
    Stopped,
    TimeExpired,
    Cancelled,
    PoolExhausted,
}

#[derive(Debug, Clone)]
pub struct SessionState<Q> {
    pub phase: Phase,
    pub current_question: Option<Q>,
    /// Direction captured when the current question was presented
    pub question_direction: Direction,
    pub mode: Mode,
    pub direction: Direction,
    pub options: Vec<String>,
    pub score: usize,
    pub attempts: usize,
    pub streak: usize,
    pub best_streak: usize,
    pub questions_asked: usize,
    pub remaining: Option<Duration>,
    pub elapsed: Duration,
    pub presented_at: Duration,
    pub response_times: Vec<Duration>,
    pub last_verdict: Option<Verdict>,
    pub finish_reason: Option<FinishReason>,
}

impl<Q> SessionState<Q> {
    pub fn new(mode: Mode, direction: Direction, time_limit: Option<Duration>) -> Self {
        Self {
            phase: Phase::Idle,
            current_question: None,
            question_direction: direction,
            mode,
            direction,
            options: Vec::new(),
            score: 0,
            attempts: 0,
            streak: 0,
            best_streak: 0,
            questions_asked: 0,
            remaining: time_limit,
            elapsed: Duration::ZERO,
            presented_at: Duration::ZERO,
            response_times: Vec::new(),
            last_verdict: None,
            finish_reason: None,
        }
    }

    pub fn status(&self) -> Status {
        if self.phase == Phase::Finished {
            Status::Finished
        } else {
            Status::Active
        }
    }

    fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Presenting | Phase::Evaluated)
    }

    /// Toggles are only accepted between questions.
    fn between_questions(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Evaluated)
    }
}

/// The question lifecycle state machine.
///
/// Every transition is driven by a discrete event from the host. Events that
/// do not apply to the current phase (a second submit, a toggle while a
/// question is open, anything but `start`/`reset` after the end) are ignored
/// so that duplicate UI events can never corrupt the score.
pub struct Session<D: Dojo> {
    config: ChallengeConfig<D>,
    state: SessionState<D::Question>,
    rng: StdRng,
}

impl<D: Dojo> Session<D> {
    pub fn new(config: ChallengeConfig<D>, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = SessionState::new(
            config.initial_mode,
            config.initial_direction,
            config.time_limit,
        );
        Ok(Self { config, state, rng })
    }

    pub fn state(&self) -> &SessionState<D::Question> {
        &self.state
    }

    pub fn config(&self) -> &ChallengeConfig<D> {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    pub fn start(&mut self) {
        match self.state.phase {
            Phase::Idle => {}
            Phase::Finished => {
                self.state = self.fresh_state();
            }
            Phase::Presenting | Phase::Evaluated => {
                trace!(phase = %self.state.phase, "start ignored, session already running");
                return;
            }
        }
        debug!(
            dojo = %self.config.dojo_label,
            mode = %self.state.mode,
            direction = %self.state.direction,
            "session started"
        );
        self.present_next();
    }

    /// Judge a free-text answer against the open question.
    pub fn submit_answer(&mut self, answer: &str) -> Option<&Verdict> {
        if self.state.phase != Phase::Presenting {
            trace!(phase = %self.state.phase, "submit ignored");
            return None;
        }
        let direction = self.state.question_direction;
        let (correct, expected) = {
            let question = self.state.current_question.as_ref()?;
            (
                self.config.dojo.check_answer(question, answer, direction),
                self.config.dojo.correct_answer(question, direction),
            )
        };
        self.record_verdict(answer.to_string(), expected, correct);
        self.state.last_verdict.as_ref()
    }

    /// Submit one of the presented options by index.
    ///
    /// A pick is right when it is the dojo's correct option for the question.
    pub fn submit_option(&mut self, index: usize) -> Option<&Verdict> {
        if self.state.phase != Phase::Presenting || self.state.mode != Mode::Pick {
            trace!(phase = %self.state.phase, mode = %self.state.mode, "pick ignored");
            return None;
        }
        let picked = self.state.options.get(index)?.clone();
        let direction = self.state.question_direction;
        let (correct, expected) = {
            let question = self.state.current_question.as_ref()?;
            let correct_option = self.config.dojo.correct_option(question, direction);
            (picked == correct_option, correct_option)
        };
        self.record_verdict(picked, expected, correct);
        self.state.last_verdict.as_ref()
    }

    pub fn advance(&mut self) {
        if self.state.phase != Phase::Evaluated {
            trace!(phase = %self.state.phase, "advance ignored");
            return;
        }
        self.present_next();
    }

    /// Flip Forward/Reverse. Returns whether the direction changed.
    pub fn toggle_direction(&mut self) -> bool {
        if !self.config.supports_reverse_mode || !self.state.between_questions() {
            trace!(phase = %self.state.phase, "direction toggle ignored");
            return false;
        }
        self.state.direction = self.state.direction.toggled();
        debug!(direction = %self.state.direction, "direction toggled");
        true
    }

    /// Flip Pick/Type. Returns whether the mode changed.
    pub fn toggle_mode(&mut self) -> bool {
        if !self.state.between_questions() {
            trace!(phase = %self.state.phase, "mode toggle ignored");
            return false;
        }
        self.state.mode = self.state.mode.toggled();
        if self.state.mode == Mode::Type {
            self.state.options.clear();
        }
        debug!(mode = %self.state.mode, "mode toggled");
        true
    }

    /// Throw the current state away and present a fresh first question.
    pub fn reset(&mut self) {
        self.state = self.fresh_state();
        debug!("session reset");
        self.present_next();
    }

    pub fn stop(&mut self) {
        if self.state.phase == Phase::Finished {
            return;
        }
        self.finish(FinishReason::Stopped);
    }

    pub fn cancel(&mut self) {
        if self.state.phase == Phase::Finished {
            return;
        }
        self.finish(FinishReason::Cancelled);
    }

    /// Advance the session clock by `dt`.
    ///
    /// A timed session that runs out finishes immediately, whatever the
    /// phase. An unanswered question is dropped without counting as an
    /// attempt.
    pub fn tick(&mut self, dt: Duration) {
        if !self.state.is_running() {
            return;
        }
        self.state.elapsed += dt;

        if let Some(remaining) = self.state.remaining.as_mut() {
            *remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                self.finish(FinishReason::TimeExpired);
            }
        }
    }

    fn fresh_state(&self) -> SessionState<D::Question> {
        // mode and direction carry over, counters and clock do not
        SessionState::new(
            self.state.mode,
            self.state.direction,
            self.config.time_limit,
        )
    }

    fn present_next(&mut self) {
        if let Some(max) = self.config.max_questions {
            if self.state.questions_asked >= max {
                self.finish(FinishReason::PoolExhausted);
                return;
            }
        }

        let direction = self.state.direction;
        let Some(question) = self
            .config
            .dojo
            .generate_question(&self.config.items, &mut self.rng)
        else {
            self.finish(FinishReason::PoolExhausted);
            return;
        };

        self.state.options = match self.state.mode {
            Mode::Pick => {
                let mut options = self.config.dojo.generate_options(
                    &question,
                    &self.config.items,
                    self.config.option_count,
                    direction,
                    &mut self.rng,
                );
                distractor::shuffle_for_display(&mut options, &mut self.rng);
                options
            }
            Mode::Type => Vec::new(),
        };

        self.state.current_question = Some(question);
        self.state.question_direction = direction;
        self.state.last_verdict = None;
        self.state.presented_at = self.state.elapsed;
        self.state.questions_asked += 1;
        self.state.phase = Phase::Presenting;
    }

    fn record_verdict(&mut self, answer: String, expected: String, correct: bool) {
        let state = &mut self.state;

        state.attempts += 1;
        if correct {
            state.score += 1;
            state.streak += 1;
            state.best_streak = state.best_streak.max(state.streak);
        } else {
            state.streak = 0;
        }
        state
            .response_times
            .push(state.elapsed.saturating_sub(state.presented_at));

        debug!(
            correct,
            score = state.score,
            attempts = state.attempts,
            "answer judged"
        );
        state.last_verdict = Some(Verdict {
            answer,
            expected,
            correct,
            direction: state.question_direction,
        });
        state.phase = Phase::Evaluated;
    }

    fn finish(&mut self, reason: FinishReason) {
        let state = &mut self.state;

        if state.phase == Phase::Presenting {
            trace!("discarding unanswered question");
        }
        state.current_question = None;
        state.options.clear();
        state.phase = Phase::Finished;
        state.finish_reason = Some(reason);

        info!(
            %reason,
            score = state.score,
            attempts = state.attempts,
            elapsed_ms = state.elapsed.as_millis() as u64,
            "session finished"
        );
    }
}
