pub mod kana;
pub mod kanji;
pub mod vocabulary;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use kana::{KanaCharacter, KanaDojo};
pub use kanji::{KanjiDojo, KanjiEntry, KanjiQuestion};
pub use vocabulary::{VocabDojo, VocabEntry};

/// The study domains shipped with the crate
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
pub enum DojoKind {
    #[default]
    Kana,
    Kanji,
    Vocabulary,
}

impl DojoKind {
    pub fn label(&self) -> &'static str {
        match self {
            DojoKind::Kana => "Kana",
            DojoKind::Kanji => "Kanji",
            DojoKind::Vocabulary => "Vocabulary",
        }
    }
}
