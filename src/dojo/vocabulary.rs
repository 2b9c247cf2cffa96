//! Vocabulary: Japanese words with a reading and English meanings.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{
    challenge::{Direction, Dojo},
    distractor,
    judge::{self, MatchRule},
    selector, util,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: String,
    pub reading: String,
    pub meanings: Vec<String>,
    pub level: u32,
}

impl VocabEntry {
    pub fn primary_meaning(&self) -> &str {
        self.meanings.first().map(String::as_str).unwrap_or_default()
    }
}

/// Forward shows the word with its reading and accepts any meaning; reverse
/// shows the first meaning and expects the word itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct VocabDojo;

impl Dojo for VocabDojo {
    type Item = VocabEntry;
    type Question = VocabEntry;

    fn generate_question(&self, items: &[VocabEntry], rng: &mut dyn RngCore) -> Option<VocabEntry> {
        selector::pick_uniform(items, rng).cloned()
    }

    fn render_question(&self, question: &VocabEntry, direction: Direction) -> String {
        match direction {
            Direction::Forward if question.reading.is_empty() || question.reading == question.word => {
                question.word.clone()
            }
            Direction::Forward => format!("{} ({})", question.word, question.reading),
            Direction::Reverse => question.primary_meaning().to_string(),
        }
    }

    fn check_answer(&self, question: &VocabEntry, answer: &str, direction: Direction) -> bool {
        match direction {
            Direction::Forward => {
                judge::matches_any(MatchRule::CaseInsensitive, answer, &question.meanings)
            }
            Direction::Reverse => judge::matches(MatchRule::Exact, answer, &question.word),
        }
    }

    fn correct_answer(&self, question: &VocabEntry, direction: Direction) -> String {
        self.option_value(question, direction)
    }

    fn option_value(&self, item: &VocabEntry, direction: Direction) -> String {
        match direction {
            Direction::Forward => item.primary_meaning().to_string(),
            Direction::Reverse => item.word.clone(),
        }
    }
    /// Distractors never come from entries for the same word, nor from
    /// meanings the question would accept when typed.
    fn generate_options(
        &self,
        question: &VocabEntry,
        items: &[VocabEntry],
        count: usize,
        direction: Direction,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        let pool: Vec<&VocabEntry> = items
            .iter()
            .filter(|item| item.word != question.word)
            .filter(|item| {
                direction.is_reverse()
                    || !judge::matches_any(
                        MatchRule::CaseInsensitive,
                        item.primary_meaning(),
                        &question.meanings,
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

/// "Level 1", "Levels 3-5" for the selected vocabulary sets.
pub fn level_labels(levels: &[u32]) -> Vec<String> {
    if levels.is_empty() {
        return Vec::new();
    }
    util::format_levels_as_ranges(levels)
        .split(", ")
        .map(|range| {
            if range.contains('-') {
                format!("Levels {range}")
            } else {
                format!("Level {range}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn entry(word: &str, reading: &str, meanings: &[&str]) -> VocabEntry {
        VocabEntry {
            word: word.to_string(),
            reading: reading.to_string(),
            meanings: meanings.iter().map(|m| m.to_string()).collect(),
            level: 1,
        }
    }

    fn dog() -> VocabEntry {
        entry("犬", "いぬ", &["dog", "canine"])
    }

    #[test]
    fn test_forward_accepts_every_meaning_case_insensitively() {
        let q = dog();
        assert!(VocabDojo.check_answer(&q, "Dog", Direction::Forward));
        assert!(VocabDojo.check_answer(&q, "canine", Direction::Forward));
        assert!(!VocabDojo.check_answer(&q, "puppy", Direction::Forward));
    }

    #[test]
    fn test_reverse_expects_word() {
        let q = dog();
        assert_eq!(VocabDojo.render_question(&q, Direction::Reverse), "dog");
        assert!(VocabDojo.check_answer(&q, " 犬 ", Direction::Reverse));
        assert!(!VocabDojo.check_answer(&q, "いぬ", Direction::Reverse));
        assert_eq!(VocabDojo.correct_answer(&q, Direction::Reverse), "犬");
    }

    #[test]
    fn test_forward_render_includes_reading() {
        assert_eq!(VocabDojo.render_question(&dog(), Direction::Forward), "犬 (いぬ)");

        let kana_only = entry("これ", "これ", &["this"]);
        assert_eq!(VocabDojo.render_question(&kana_only, Direction::Forward), "これ");
    }

    #[test]
    fn test_options_use_first_meaning() {
        let items = vec![
            dog(),
            entry("猫", "ねこ", &["cat"]),
            entry("鳥", "とり", &["bird"]),
        ];
        let mut rng = StdRng::seed_from_u64(8);

        let options = VocabDojo.generate_options(&items[0], &items, 4, Direction::Forward, &mut rng);

        assert_eq!(options.len(), 3);
        assert_eq!(options[0], "dog");
        assert!(!options.contains(&"canine".to_string()));
    }

    #[test]
    fn test_options_skip_entries_for_the_same_word() {
        let items = vec![
            dog(),
            entry("犬", "いぬ", &["hound"]),
            entry("猫", "ねこ", &["cat"]),
        ];
        let mut rng = StdRng::seed_from_u64(3);

        let forward = VocabDojo.generate_options(&items[0], &items, 4, Direction::Forward, &mut rng);
        assert_eq!(forward, vec!["dog".to_string(), "cat".to_string()]);

        let reverse = VocabDojo.generate_options(&items[0], &items, 4, Direction::Reverse, &mut rng);
        assert_eq!(reverse, vec!["犬".to_string(), "猫".to_string()]);
    }

    #[test]
    fn test_options_skip_other_accepted_meanings() {
        let items = vec![
            dog(),
            entry("狗", "いぬ", &["Canine"]),
            entry("猫", "ねこ", &["cat"]),
        ];
        let mut rng = StdRng::seed_from_u64(4);

        let options = VocabDojo.generate_options(&items[0], &items, 4, Direction::Forward, &mut rng);

        assert_eq!(options, vec!["dog".to_string(), "cat".to_string()]);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(level_labels(&[1]), vec!["Level 1"]);
        assert_eq!(level_labels(&[1, 2, 3, 6]), vec!["Levels 1-3", "Level 6"]);
        assert!(level_labels(&[]).is_empty());
    }
}
