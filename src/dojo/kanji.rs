//! Kanji: a character with one or more English meanings.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{
    challenge::{Direction, Dojo},
    distractor,
    judge::{self, MatchRule},
    selector,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiEntry {
    pub kanji: String,
    pub meanings: Vec<String>,
    #[serde(default)]
    pub onyomi: Vec<String>,
    #[serde(default)]
    pub kunyomi: Vec<String>,
    pub jlpt: u32,
}

/// One presented kanji with every meaning accepted for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanjiQuestion {
    pub kanji: String,
    pub accepted: Vec<String>,
    /// on and kun readings joined for display under the glyph
    pub readings: String,
}

impl KanjiQuestion {
    pub fn primary_meaning(&self) -> &str {
        self.accepted.first().map(String::as_str).unwrap_or_default()
    }
}

impl From<&KanjiEntry> for KanjiQuestion {
    fn from(entry: &KanjiEntry) -> Self {
        let readings = entry
            .onyomi
            .iter()
            .chain(&entry.kunyomi)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" / ");
        Self {
            kanji: entry.kanji.clone(),
            accepted: entry.meanings.clone(),
            readings,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KanjiDojo;

impl Dojo for KanjiDojo {
    type Item = KanjiEntry;
    type Question = KanjiQuestion;

    fn generate_question(
        &self,
        items: &[KanjiEntry],
        rng: &mut dyn RngCore,
    ) -> Option<KanjiQuestion> {
        selector::pick_uniform(items, rng).map(KanjiQuestion::from)
    }

    fn render_question(&self, question: &KanjiQuestion, direction: Direction) -> String {
        match direction {
            Direction::Forward => question.kanji.clone(),
            Direction::Reverse => question.primary_meaning().to_string(),
        }
    }

    fn check_answer(&self, question: &KanjiQuestion, answer: &str, direction: Direction) -> bool {
        match direction {
            Direction::Forward => {
                judge::matches_any(MatchRule::CaseInsensitive, answer, &question.accepted)
            }
            Direction::Reverse => judge::matches(MatchRule::Exact, answer, &question.kanji),
        }
    }

    fn correct_answer(&self, question: &KanjiQuestion, direction: Direction) -> String {
        match direction {
            Direction::Forward => question.primary_meaning().to_string(),
            Direction::Reverse => question.kanji.clone(),
        }
    }

    fn option_value(&self, item: &KanjiEntry, direction: Direction) -> String {
        match direction {
            Direction::Forward => item.meanings.first().cloned().unwrap_or_default(),
            Direction::Reverse => item.kanji.clone(),
        }
    }

    /// Forward distractors skip meanings the question also accepts.
    fn generate_options(
        &self,
        question: &KanjiQuestion,
        items: &[KanjiEntry],
        count: usize,
        direction: Direction,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        let pool: Vec<&KanjiEntry> = items
            .iter()
            .filter(|item| item.kanji != question.kanji)
            .filter(|item| {
                direction.is_reverse()
                    || !judge::matches_any(
                        MatchRule::CaseInsensitive,
                        &self.option_value(item, direction),
                        &question.accepted,
                    )
            })
            .collect();
        distractor::generate_options(
            &self.correct_option(question, direction),
            &pool,
            count,
            |item| self.option_value(item, direction),
            rng,
        )
    }
}

/// "JLPT N5", "JLPT N4", ... for the selected levels, easiest first.
pub fn level_labels(levels: &[u32]) -> Vec<String> {
    let mut levels = levels.to_vec();
    levels.sort_unstable_by(|a, b| b.cmp(a));
    levels.dedup();
    levels.into_iter().map(|n| format!("JLPT N{n}")).collect()
}
