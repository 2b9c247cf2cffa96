//! Embedded study catalogs.
//!
//! The JSON files under `src/catalog` are compiled into the binary; hosts pick
//! a selection out of them and hand the resulting items to a
//! [`ChallengeConfig`](crate::challenge::ChallengeConfig).

use include_dir::{include_dir, Dir};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    dojo::{KanaCharacter, KanjiEntry, VocabEntry},
    error::CatalogError,
};

static CATALOG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/catalog");

const CHALLENGE_PREFIX: &str = "challenge.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanaGroup {
    pub group_name: String,
    pub kana: Vec<String>,
    pub romaji: Vec<String>,
}

impl KanaGroup {
    pub fn is_challenge(&self) -> bool {
        self.group_name.starts_with(CHALLENGE_PREFIX)
    }

    pub fn characters(&self) -> impl Iterator<Item = KanaCharacter> + '_ {
        self.kana
            .iter()
            .zip(&self.romaji)
            .map(|(kana, romaji)| KanaCharacter::new(kana.as_str(), romaji.as_str()))
    }
}

/// A named, contiguous range of group indices (`start..end`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanaSection {
    pub label: String,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub parent: bool,
    #[serde(default)]
    pub challenge: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanaCatalog {
    pub groups: Vec<KanaGroup>,
    pub sections: Vec<KanaSection>,
}

impl KanaCatalog {
    pub fn load() -> Result<Self, CatalogError> {
        read_catalog("kana.json")
    }

    /// Every character of the selected groups, in group order.
    pub fn flatten(&self, indices: &[usize]) -> Result<Vec<KanaCharacter>, CatalogError> {
        let mut characters = Vec::new();
        for &index in indices {
            let group = self
                .groups
                .get(index)
                .ok_or(CatalogError::UnknownGroup(index))?;
            characters.extend(group.characters());
        }
        Ok(characters)
    }

    /// Indices of every non-challenge group.
    pub fn regular_groups(&self) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, group)| !group.is_challenge())
            .map(|(i, _)| i)
            .collect()
    }
}

pub fn load_kanji() -> Result<Vec<KanjiEntry>, CatalogError> {
    read_catalog("kanji.json")
}

pub fn load_vocabulary() -> Result<Vec<VocabEntry>, CatalogError> {
    read_catalog("vocabulary.json")
}

/// Kanji whose JLPT level is in `levels` (all of them when `levels` is empty).
pub fn kanji_for_levels(
    entries: Vec<KanjiEntry>,
    levels: &[u32],
) -> Result<Vec<KanjiEntry>, CatalogError> {
    let selected: Vec<KanjiEntry> = entries
        .into_iter()
        .filter(|entry| levels.is_empty() || levels.contains(&entry.jlpt))
        .collect();
    if selected.is_empty() {
        return Err(CatalogError::EmptySelection("kanji"));
    }
    Ok(selected)
}

/// Vocabulary entries whose set level is in `levels` (all when empty).
pub fn vocabulary_for_levels(
    entries: Vec<VocabEntry>,
    levels: &[u32],
) -> Result<Vec<VocabEntry>, CatalogError> {
    let selected: Vec<VocabEntry> = entries
        .into_iter()
        .filter(|entry| levels.is_empty() || levels.contains(&entry.level))
        .collect();
    if selected.is_empty() {
        return Err(CatalogError::EmptySelection("vocabulary"));
    }
    Ok(selected)
}

fn read_catalog<T: DeserializeOwned>(file_name: &str) -> Result<T, CatalogError> {
    let file = CATALOG_DIR
        .get_file(file_name)
        .ok_or_else(|| CatalogError::MissingFile(file_name.to_string()))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| CatalogError::NotUtf8(file_name.to_string()))?;

    serde_json::from_str(contents).map_err(|source| CatalogError::Malformed {
        name: file_name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_kana_catalog_loads() {
        let catalog = KanaCatalog::load().unwrap();

        assert!(!catalog.groups.is_empty());
        assert!(!catalog.sections.is_empty());
        for group in &catalog.groups {
            assert_eq!(
                group.kana.len(),
                group.romaji.len(),
                "group {} is unbalanced",
                group.group_name
            );
        }
        for section in &catalog.sections {
            assert!(section.start < section.end);
            assert!(section.end <= catalog.groups.len(), "{}", section.label);
        }
    }

    #[test]
    fn test_kana_flatten_first_group() {
        let catalog = KanaCatalog::load().unwrap();
        let characters = catalog.flatten(&[0]).unwrap();

        assert_eq!(characters.len(), 5);
        assert_eq!(characters[0], KanaCharacter::new("あ", "a"));
        assert_eq!(characters[4], KanaCharacter::new("お", "o"));
    }

    #[test]
    fn test_kana_flatten_unknown_group() {
        let catalog = KanaCatalog::load().unwrap();
        assert_matches!(
            catalog.flatten(&[0, 10_000]),
            Err(CatalogError::UnknownGroup(10_000))
        );
    }

    #[test]
    fn test_regular_groups_exclude_challenge() {
        let catalog = KanaCatalog::load().unwrap();
        let regular = catalog.regular_groups();

        assert!(!regular.is_empty());
        assert!(regular.len() < catalog.groups.len());
        assert!(regular.iter().all(|&i| !catalog.groups[i].is_challenge()));
    }

    #[test]
    fn test_kanji_catalog_loads_and_filters() {
        let all = load_kanji().unwrap();
        assert!(all.iter().all(|k| !k.meanings.is_empty()));

        let n5 = kanji_for_levels(all.clone(), &[5]).unwrap();
        assert!(!n5.is_empty());
        assert!(n5.iter().all(|k| k.jlpt == 5));

        let everything = kanji_for_levels(all.clone(), &[]).unwrap();
        assert_eq!(everything.len(), all.len());
    }

    #[test]
    fn test_kanji_empty_selection() {
        let all = load_kanji().unwrap();
        assert_matches!(
            kanji_for_levels(all, &[99]),
            Err(CatalogError::EmptySelection("kanji"))
        );
    }

    #[test]
    fn test_vocabulary_catalog_loads_and_filters() {
        let all = load_vocabulary().unwrap();
        assert!(all.iter().all(|v| !v.meanings.is_empty()));

        let level_one = vocabulary_for_levels(all, &[1]).unwrap();
        assert!(level_one.iter().all(|v| v.level == 1));
    }

    #[test]
    fn test_missing_catalog_file() {
        assert_matches!(
            read_catalog::<KanaCatalog>("nonexistent.json"),
            Err(CatalogError::MissingFile(_))
        );
    }

    #[test]
    fn test_malformed_catalog_message() {
        let err = serde_json::from_str::<KanaCatalog>("{\"groups\": 3}").unwrap_err();
        let wrapped = CatalogError::Malformed {
            name: "kana.json".to_string(),
            source: err,
        };
        assert!(wrapped.to_string().starts_with("malformed catalog kana.json"));
    }
}
