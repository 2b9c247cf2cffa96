//! Composition root binding a dojo configuration to a session.
//!
//! Hosts talk to a running challenge through [`Engine`] (typed by its dojo)
//! or through the object-safe [`Challenge`] trait when they need to hold any
//! of the dojos behind one pointer.

use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    challenge::{ChallengeConfig, Direction, Dojo, Mode, Status},
    distractor,
    error::ConfigError,
    judge::Verdict,
    session::{FinishReason, Phase, Session},
    util,
};

/// Snapshot of what the host needs to draw the current screen
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeView {
    pub phase: Phase,
    pub status: Status,
    pub prompt: Option<String>,
    pub options: Vec<String>,
    /// index of the correct option, only once the question is evaluated
    pub highlight: Option<usize>,
    pub mode: Mode,
    pub direction: Direction,
    pub supports_reverse_mode: bool,
    pub score: usize,
    pub attempts: usize,
    pub streak: usize,
    pub remaining: Option<Duration>,
    pub elapsed: Duration,
    pub last_verdict: Option<Verdict>,
    pub dojo_label: String,
    pub selected_sets: Vec<String>,
}

/// Result of a session, handed back to the host for display or storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub dojo_label: String,
    pub selected_sets: Vec<String>,
    pub mode: Mode,
    pub direction: Direction,
    pub timed: bool,
    pub score: usize,
    pub attempts: usize,
    pub accuracy: f64,
    pub best_streak: usize,
    pub elapsed_secs: f64,
    pub mean_response_secs: Option<f64>,
    pub response_std_dev: Option<f64>,
    pub finish_reason: Option<FinishReason>,
}

type CancelHook = Box<dyn FnMut(&SessionSummary)>;

pub struct Engine<D: Dojo> {
    session: Session<D>,
    on_cancel: Option<CancelHook>,
}

impl<D: Dojo> std::fmt::Debug for Engine<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

impl<D: Dojo> Engine<D> {
    pub fn new(config: ChallengeConfig<D>) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic engine for tests and replays.
    pub fn with_seed(config: ChallengeConfig<D>, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: ChallengeConfig<D>, rng: StdRng) -> Result<Self, ConfigError> {
        Ok(Self {
            session: Session::new(config, rng)?,
            on_cancel: None,
        })
    }

    /// Register a hook invoked with the final summary when the session is
    /// cancelled by the host.
    pub fn on_cancel(mut self, hook: impl FnMut(&SessionSummary) + 'static) -> Self {
        self.on_cancel = Some(Box::new(hook));
        self
    }

    pub fn session(&self) -> &Session<D> {
        &self.session
    }

    pub fn current_question(&self) -> Option<&D::Question> {
        self.session.state().current_question.as_ref()
    }

    pub fn view(&self) -> ChallengeView {
        let state = self.session.state();
        let config = self.session.config();
        let direction = state.question_direction;

        let prompt = state
            .current_question
            .as_ref()
            .map(|q| config.dojo.render_question(q, direction));

        let highlight = match (state.phase, state.current_question.as_ref()) {
            (Phase::Evaluated, Some(q)) => {
                distractor::position_of(&state.options, &config.dojo.correct_option(q, direction))
            }
            _ => None,
        };

        ChallengeView {
            phase: state.phase,
            status: state.status(),
            prompt,
            options: state.options.clone(),
            highlight,
            mode: state.mode,
            direction: state.direction,
            supports_reverse_mode: config.supports_reverse_mode,
            score: state.score,
            attempts: state.attempts,
            streak: state.streak,
            remaining: state.remaining,
            elapsed: state.elapsed,
            last_verdict: state.last_verdict.clone(),
            dojo_label: config.dojo_label.clone(),
            selected_sets: config.selected_sets.clone(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        let state = self.session.state();
        let config = self.session.config();

        let accuracy = if state.attempts == 0 {
            0.0
        } else {
            ((state.score as f64 / state.attempts as f64) * 100.0).round()
        };
        let response_secs: Vec<f64> = state
            .response_times
            .iter()
            .map(Duration::as_secs_f64)
            .collect();

        SessionSummary {
            dojo_label: config.dojo_label.clone(),
            selected_sets: config.selected_sets.clone(),
            mode: state.mode,
            direction: state.direction,
            timed: config.is_timed(),
            score: state.score,
            attempts: state.attempts,
            accuracy,
            best_streak: state.best_streak,
            elapsed_secs: state.elapsed.as_secs_f64(),
            mean_response_secs: util::mean(&response_secs),
            response_std_dev: util::std_dev(&response_secs),
            finish_reason: state.finish_reason,
        }
    }
}

/// Object-safe driver surface shared by every dojo's engine.
pub trait Challenge {
    fn start(&mut self);
    fn submit_answer(&mut self, answer: &str) -> Option<Verdict>;
    fn submit_option(&mut self, index: usize) -> Option<Verdict>;
    fn advance(&mut self);
    fn toggle_direction(&mut self) -> bool;
    fn toggle_mode(&mut self) -> bool;
    fn reset(&mut self);
    fn stop(&mut self);
    /// Hard stop requested by the host; fires the cancel hook once.
    fn cancel(&mut self);
    fn tick(&mut self, dt: Duration);
    fn view(&self) -> ChallengeView;
    fn summary(&self) -> SessionSummary;

    fn status(&self) -> Status {
        self.view().status
    }
}

impl<D: Dojo> Challenge for Engine<D> {
    fn start(&mut self) {
        self.session.start();
    }

    fn submit_answer(&mut self, answer: &str) -> Option<Verdict> {
        self.session.submit_answer(answer).cloned()
    }

    fn submit_option(&mut self, index: usize) -> Option<Verdict> {
        self.session.submit_option(index).cloned()
    }

    fn advance(&mut self) {
        self.session.advance();
    }

    fn toggle_direction(&mut self) -> bool {
        self.session.toggle_direction()
    }

    fn toggle_mode(&mut self) -> bool {
        self.session.toggle_mode()
    }

    fn reset(&mut self) {
        self.session.reset();
    }

    fn stop(&mut self) {
        self.session.stop();
    }

    fn cancel(&mut self) {
        if self.session.status() == Status::Finished {
            return;
        }
        self.session.cancel();
        let summary = Engine::summary(self);
        if let Some(hook) = self.on_cancel.as_mut() {
            hook(&summary);
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.session.tick(dt);
    }

    fn view(&self) -> ChallengeView {
        Engine::view(self)
    }

    fn summary(&self) -> SessionSummary {
        Engine::summary(self)
    }

    fn status(&self) -> Status {
        self.session.status()
    }
}
