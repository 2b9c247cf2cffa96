//! The contract every study domain plugs into.
//!
//! A domain ("dojo") is a value implementing [`Dojo`]: a fixed set of named
//! capability functions over its own item and question types. A
//! [`ChallengeConfig`] binds one dojo to the item pool and flags of a single
//! session.

use std::time::Duration;

use clap::ValueEnum;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{distractor, error::ConfigError};

pub const DEFAULT_OPTION_COUNT: usize = 4;
pub const MIN_OPTION_COUNT: usize = 2;
/// Options are picked with the digit keys 1-9.
pub const MAX_OPTION_COUNT: usize = 9;

/// Interaction style for answering a question
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// multiple choice
    #[default]
    Pick,
    /// free text
    Type,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Pick => Mode::Type,
            Mode::Type => Mode::Pick,
        }
    }
}

/// Which side of a question is shown as the prompt.
///
/// `Forward` shows the native form (glyph, word) and expects the target
/// language answer (romanization, meaning). `Reverse` swaps the two sides.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    pub fn is_reverse(self) -> bool {
        self == Direction::Reverse
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum Status {
    Active,
    Finished,
}

/// Domain-specific behaviour injected into the engine.
///
/// Implementations must be total and free of side effects: the engine calls
/// them synchronously and never recovers from a panic inside one.
pub trait Dojo {
    type Item;
    type Question: Clone;

    /// Build the next question from the pool. `None` means the pool cannot
    /// produce another question and ends the session.
    fn generate_question(
        &self,
        items: &[Self::Item],
        rng: &mut dyn RngCore,
    ) -> Option<Self::Question>;

    fn render_question(&self, question: &Self::Question, direction: Direction) -> String;

    fn check_answer(&self, question: &Self::Question, answer: &str, direction: Direction) -> bool;

    /// Canonical answer shown as feedback after a verdict.
    fn correct_answer(&self, question: &Self::Question, direction: Direction) -> String;

    /// Canonical option text of a pool item, used for distractors.
    fn option_value(&self, item: &Self::Item, direction: Direction) -> String;

    /// Option text that counts as the right pick among the options.
    fn correct_option(&self, question: &Self::Question, direction: Direction) -> String {
        self.correct_answer(question, direction)
    }

    /// Candidate answers for multiple choice, correct option first.
    fn generate_options(
        &self,
        question: &Self::Question,
        items: &[Self::Item],
        count: usize,
        direction: Direction,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        let correct = self.correct_option(question, direction);
        distractor::generate_options(
            &correct,
            items,
            count,
            |item| self.option_value(item, direction),
            rng,
        )
    }
}

/// Everything one session needs, supplied by the host page.
pub struct ChallengeConfig<D: Dojo> {
    pub dojo: D,
    pub items: Vec<D::Item>,
    pub initial_mode: Mode,
    pub initial_direction: Direction,
    pub supports_reverse_mode: bool,
    pub option_count: usize,
    /// `Some` turns the session into a timed blitz
    pub time_limit: Option<Duration>,
    pub max_questions: Option<usize>,
    // display only
    pub dojo_label: String,
    pub selected_sets: Vec<String>,
}

impl<D: Dojo> ChallengeConfig<D> {
    pub fn new(dojo: D, items: Vec<D::Item>) -> Self {
        Self {
            dojo,
            items,
            initial_mode: Mode::Pick,
            initial_direction: Direction::Forward,
            supports_reverse_mode: true,
            option_count: DEFAULT_OPTION_COUNT,
            time_limit: None,
            max_questions: None,
            dojo_label: String::new(),
            selected_sets: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.initial_direction = direction;
        self
    }

    pub fn with_reverse_mode(mut self, supported: bool) -> Self {
        self.supports_reverse_mode = supported;
        self
    }

    pub fn with_option_count(mut self, count: usize) -> Self {
        self.option_count = count;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_max_questions(mut self, max: usize) -> Self {
        self.max_questions = Some(max);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>, selected_sets: Vec<String>) -> Self {
        self.dojo_label = label.into();
        self.selected_sets = selected_sets;
        self
    }

    pub fn is_timed(&self) -> bool {
        self.time_limit.is_some()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        if self.option_count < MIN_OPTION_COUNT {
            return Err(ConfigError::TooFewOptions {
                got: self.option_count,
                min: MIN_OPTION_COUNT,
            });
        }
        if self.option_count > MAX_OPTION_COUNT {
            return Err(ConfigError::TooManyOptions {
                got: self.option_count,
                max: MAX_OPTION_COUNT,
            });
        }
        if self.time_limit.is_some_and(|limit| limit.is_zero()) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if self.max_questions == Some(0) {
            return Err(ConfigError::ZeroQuestionLimit);
        }
        if self.initial_direction.is_reverse() && !self.supports_reverse_mode {
            return Err(ConfigError::ReverseUnsupported);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Clone, Copy)]
    struct Echo;

    impl Dojo for Echo {
        type Item = String;
        type Question = String;

        fn generate_question(&self, items: &[String], _rng: &mut dyn RngCore) -> Option<String> {
            items.first().cloned()
        }

        fn render_question(&self, question: &String, _direction: Direction) -> String {
            question.clone()
        }

        fn check_answer(&self, question: &String, answer: &str, _direction: Direction) -> bool {
            question == answer
        }

        fn correct_answer(&self, question: &String, _direction: Direction) -> String {
            question.clone()
        }

        fn option_value(&self, item: &String, _direction: Direction) -> String {
            item.clone()
        }
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::Pick.toggled(), Mode::Type);
        assert_eq!(Mode::Type.toggled(), Mode::Pick);
        assert_eq!(Mode::default(), Mode::Pick);
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(Direction::Forward.toggled(), Direction::Reverse);
        assert_eq!(Direction::Reverse.toggled(), Direction::Forward);
        assert!(Direction::Reverse.is_reverse());
        assert!(!Direction::Forward.is_reverse());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Mode::Pick.to_string(), "Pick");
        assert_eq!(Direction::Reverse.to_string(), "Reverse");
        assert_eq!(Status::Finished.to_string(), "Finished");
    }

    #[test]
    fn test_config_defaults() {
        let config = ChallengeConfig::new(Echo, vec!["a".to_string()]);

        assert_eq!(config.initial_mode, Mode::Pick);
        assert_eq!(config.initial_direction, Direction::Forward);
        assert_eq!(config.option_count, DEFAULT_OPTION_COUNT);
        assert!(config.supports_reverse_mode);
        assert!(!config.is_timed());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        let config = ChallengeConfig::new(Echo, vec![]);
        assert_eq!(config.validate(), Err(ConfigError::EmptyPool));
    }

    #[test]
    fn test_option_count_below_two_is_rejected() {
        let config = ChallengeConfig::new(Echo, vec!["a".to_string()]).with_option_count(1);
        assert_matches!(
            config.validate(),
            Err(ConfigError::TooFewOptions { got: 1, min: 2 })
        );
    }

    #[test]
    fn test_option_count_above_digit_keys_is_rejected() {
        let config = ChallengeConfig::new(Echo, vec!["a".to_string()]).with_option_count(10);
        assert_matches!(
            config.validate(),
            Err(ConfigError::TooManyOptions { got: 10, max: 9 })
        );

        let config = ChallengeConfig::new(Echo, vec!["a".to_string()])
            .with_option_count(MAX_OPTION_COUNT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reverse_start_requires_reverse_support() {
        let config = ChallengeConfig::new(Echo, vec!["a".to_string()])
            .with_direction(Direction::Reverse)
            .with_reverse_mode(false);
        assert_eq!(config.validate(), Err(ConfigError::ReverseUnsupported));

        let forward_only = ChallengeConfig::new(Echo, vec!["a".to_string()]).with_reverse_mode(false);
        assert!(forward_only.validate().is_ok());
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let timed = ChallengeConfig::new(Echo, vec!["a".to_string()])
            .with_time_limit(Duration::ZERO);
        assert_eq!(timed.validate(), Err(ConfigError::ZeroTimeLimit));

        let capped = ChallengeConfig::new(Echo, vec!["a".to_string()]).with_max_questions(0);
        assert_eq!(capped.validate(), Err(ConfigError::ZeroQuestionLimit));
    }

    #[test]
    fn test_default_options_put_correct_first() {
        let items: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut rng = rand::thread_rng();
        let options = Echo.generate_options(&"b".to_string(), &items, 3, Direction::Forward, &mut rng);

        assert_eq!(options.len(), 3);
        assert_eq!(options[0], "b");
        assert!(options.contains(&"a".to_string()));
        assert!(options.contains(&"c".to_string()));
    }
}
