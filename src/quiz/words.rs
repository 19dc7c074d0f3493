use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordPackAssets;

/// A question needs one correct answer plus three distractors.
pub const MIN_WORDS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordItem {
    #[serde(default)]
    pub hanzi: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub korean: String,
}

impl WordItem {
    fn is_usable(&self) -> bool {
        !self.hanzi.trim().is_empty()
            && !self.pinyin.trim().is_empty()
            && !self.korean.trim().is_empty()
    }
}

#[derive(Debug, Error)]
pub enum WordStoreError {
    #[error("failed to read word file: {0}")]
    Io(#[from] std::io::Error),
    #[error("word data must be a JSON array of {{hanzi, pinyin, korean}} objects: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no bundled word pack named '{0}'")]
    UnknownPack(String),
    #[error("need at least {MIN_WORDS} usable words to build a question, found {found}")]
    NotEnoughWords { found: usize },
    #[error("need at least {MIN_WORDS} distinct translations, found {found}")]
    NotEnoughTranslations { found: usize },
}

/// Validated, read-only word list. Built once at startup; sampling only
/// ever borrows it.
#[derive(Debug)]
pub struct WordStore {
    words: Vec<WordItem>,
}

impl WordStore {
    pub fn load_bundled(pack: &str) -> Result<Self, WordStoreError> {
        let filename = format!("{pack}.json");
        let file = WordPackAssets::get(&filename)
            .ok_or_else(|| WordStoreError::UnknownPack(pack.to_string()))?;
        Self::from_json(&String::from_utf8_lossy(file.data.as_ref()))
    }

    pub fn load_file(path: &Path) -> Result<Self, WordStoreError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, WordStoreError> {
        let raw: Vec<WordItem> = serde_json::from_str(json)?;
        Self::from_items(raw)
    }

    /// Entries with a missing or blank field are dropped silently; the
    /// count checks below are what turn a thin list into a startup error.
    pub fn from_items(items: Vec<WordItem>) -> Result<Self, WordStoreError> {
        let words: Vec<WordItem> = items.into_iter().filter(WordItem::is_usable).collect();

        if words.len() < MIN_WORDS {
            return Err(WordStoreError::NotEnoughWords { found: words.len() });
        }

        // Duplicate translations are allowed in the data, but the sampler
        // excludes same-translation items from the distractor pool, so it
        // needs at least MIN_WORDS distinct translations to draw from.
        let distinct: HashSet<&str> = words.iter().map(|w| w.korean.as_str()).collect();
        if distinct.len() < MIN_WORDS {
            return Err(WordStoreError::NotEnoughTranslations {
                found: distinct.len(),
            });
        }

        Ok(Self { words })
    }

    pub fn available_packs() -> Vec<String> {
        WordPackAssets::iter()
            .filter_map(|f| f.strip_suffix(".json").map(|n| n.to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, idx: usize) -> &WordItem {
        &self.words[idx]
    }
}
