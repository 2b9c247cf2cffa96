//! Answer comparison shared by every dojo.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::challenge::Direction;

/// How a typed answer is compared to an expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchRule {
    /// Glyph answers (kana, kanji, Japanese words).
    Exact,
    /// Romanized or translated answers.
    CaseInsensitive,
}

/// The outcome of one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub answer: String,
    pub expected: String,
    pub correct: bool,
    pub direction: Direction,
}

/// Trim and collapse inner whitespace.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().join(" ")
}

pub fn matches(rule: MatchRule, answer: &str, expected: &str) -> bool {
    let answer = normalize(answer);
    let expected = normalize(expected);

    match rule {
        MatchRule::Exact => answer == expected,
        MatchRule::CaseInsensitive => answer.to_lowercase() == expected.to_lowercase(),
    }
}

/// True if the answer matches any of the accepted values.
pub fn matches_any<S: AsRef<str>>(rule: MatchRule, answer: &str, accepted: &[S]) -> bool {
    accepted
        .iter()
        .any(|expected| matches(rule, answer, expected.as_ref()))
}
