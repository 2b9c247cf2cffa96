//! Kana: single glyphs paired with their romanization.

use std::collections::BTreeSet;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::KanaCatalog,
    challenge::{Direction, Dojo},
    judge::{self, MatchRule},
    selector,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KanaCharacter {
    pub kana: String,
    pub romaji: String,
}

impl KanaCharacter {
    pub fn new(kana: impl Into<String>, romaji: impl Into<String>) -> Self {
        Self {
            kana: kana.into(),
            romaji: romaji.into(),
        }
    }
}

/// Forward shows the glyph and expects romaji (case-insensitive); reverse
/// shows romaji and expects the glyph exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct KanaDojo;

impl Dojo for KanaDojo {
    type Item = KanaCharacter;
    type Question = KanaCharacter;

    fn generate_question(
        &self,
        items: &[KanaCharacter],
        rng: &mut dyn RngCore,
    ) -> Option<KanaCharacter> {
        selector::pick_uniform(items, rng).cloned()
    }

    fn render_question(&self, question: &KanaCharacter, direction: Direction) -> String {
        match direction {
            Direction::Forward => question.kana.clone(),
            Direction::Reverse => question.romaji.clone(),
        }
    }

    fn check_answer(&self, question: &KanaCharacter, answer: &str, direction: Direction) -> bool {
        match direction {
            Direction::Forward => judge::matches(MatchRule::CaseInsensitive, answer, &question.romaji),
            Direction::Reverse => judge::matches(MatchRule::Exact, answer, &question.kana),
        }
    }

    fn correct_answer(&self, question: &KanaCharacter, direction: Direction) -> String {
        self.option_value(question, direction)
    }

    fn option_value(&self, item: &KanaCharacter, direction: Direction) -> String {
        match direction {
            Direction::Forward => item.romaji.clone(),
            Direction::Reverse => item.kana.clone(),
        }
    }
}

/// Human readable summary of the selected kana groups.
///
/// Whole sections collapse into their label ("All Hiragana", "Hiragana
/// Base"); a full selection of every non-challenge group becomes
/// "all kana". Leftover groups are named after their first glyph.
pub fn selection_labels(catalog: &KanaCatalog, selected: &[usize]) -> Vec<String> {
    let selected: BTreeSet<usize> = selected.iter().copied().collect();
    let mut covered: BTreeSet<usize> = BTreeSet::new();
    let mut labels = Vec::new();

    let regular: Vec<usize> = catalog
        .groups
        .iter()
        .enumerate()
        .filter(|(_, group)| !group.is_challenge())
        .map(|(i, _)| i)
        .collect();
    let all_regular = !regular.is_empty() && regular.iter().all(|i| selected.contains(i));

    if all_regular {
        labels.push("all kana".to_string());
        covered.extend(regular.iter().copied());
    }

    let parents = catalog.sections.iter().filter(|s| s.parent);
    let subgroups = catalog.sections.iter().filter(|s| !s.parent);

    for section in parents.chain(subgroups) {
        if section.parent && all_regular && !section.challenge {
            continue;
        }
        let range = section.start..section.end;
        if range.clone().all(|i| covered.contains(&i)) {
            continue;
        }
        if !range.clone().all(|i| selected.contains(&i)) {
            continue;
        }
        labels.push(section.label.clone());
        covered.extend(range);
    }

    for i in selected {
        if covered.contains(&i) {
            continue;
        }
        match catalog.groups.get(i) {
            Some(group) => {
                let first = group.kana.first().map(String::as_str).unwrap_or("?");
                if group.is_challenge() {
                    labels.push(format!("{first}-group (challenge)"));
                } else {
                    labels.push(format!("{first}-group"));
                }
            }
            None => labels.push(format!("Group {}", i + 1)),
        }
    }

    labels
}
