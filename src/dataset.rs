use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::from_str;

use crate::error::{QuizError, Result};

static DATA_DIR: Dir = include_dir!("src/data");

/// A single flashcard: one kana symbol and its romanization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub symbol: String,
    pub romanized: String,
}

impl CharacterEntry {
    pub fn new(symbol: impl Into<String>, romanized: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            romanized: romanized.into(),
        }
    }
}

#[derive(Deserialize)]
struct DatasetFile {
    #[allow(dead_code)]
    name: String,
    size: usize,
    entries: Vec<CharacterEntry>,
}

/// Fixed, ordered character table. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    entries: Vec<CharacterEntry>,
}

impl Dataset {
    /// The 46 basic hiragana bundled with the binary.
    pub fn hiragana() -> Result<Self> {
        read_dataset_from_file("hiragana.json")
    }

    /// Builds a dataset from arbitrary entries, rejecting empty tables and
    /// repeated symbols.
    pub fn from_entries(entries: Vec<CharacterEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(QuizError::EmptyDataset);
        }
        if let Some(dup) = entries.iter().map(|e| &e.symbol).duplicates().next() {
            return Err(QuizError::DuplicateSymbol(dup.clone()));
        }
        Ok(Self { entries })
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn all(&self) -> &[CharacterEntry] {
        &self.entries
    }

    pub fn get(&self, symbol: &str) -> Option<&CharacterEntry> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    pub fn romanized_for(&self, symbol: &str) -> Option<&str> {
        self.get(symbol).map(|e| e.romanized.as_str())
    }

    /// First `n` entries in table order, used for the welcome screen.
    pub fn preview(&self, n: usize) -> &[CharacterEntry] {
        &self.entries[..n.min(self.entries.len())]
    }
}

fn read_dataset_from_file(file_name: &str) -> Result<Dataset> {
    let file = DATA_DIR
        .get_file(file_name)
        .ok_or_else(|| QuizError::DatasetMissing(file_name.to_string()))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| QuizError::DatasetMissing(file_name.to_string()))?;

    let parsed: DatasetFile = from_str(contents)?;
    if parsed.size != parsed.entries.len() {
        tracing::warn!(
            declared = parsed.size,
            actual = parsed.entries.len(),
            "dataset size header does not match entry count"
        );
    }

    Dataset::from_entries(parsed.entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_hiragana_has_46_entries() {
        let ds = Dataset::hiragana().unwrap();
        assert_eq!(ds.size(), 46);
        assert_eq!(ds.all().len(), 46);
    }

    #[test]
    fn test_hiragana_order_and_lookup() {
        let ds = Dataset::hiragana().unwrap();
        assert_eq!(ds.all()[0], CharacterEntry::new("あ", "a"));
        assert_eq!(ds.all()[45], CharacterEntry::new("ん", "n"));
        assert_eq!(ds.romanized_for("か"), Some("ka"));
        assert_eq!(ds.romanized_for("し"), Some("shi"));
        assert_eq!(ds.romanized_for("x"), None);
    }

    #[test]
    fn test_preview_clamps_to_size() {
        let ds = Dataset::from_entries(vec![CharacterEntry::new("か", "ka")]).unwrap();
        assert_eq!(ds.preview(8).len(), 1);

        let full = Dataset::hiragana().unwrap();
        let preview: Vec<&str> = full.preview(8).iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(preview, ["あ", "い", "う", "え", "お", "か", "き", "く"]);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert_matches!(Dataset::from_entries(vec![]), Err(QuizError::EmptyDataset));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let result = Dataset::from_entries(vec![
            CharacterEntry::new("か", "ka"),
            CharacterEntry::new("き", "ki"),
            CharacterEntry::new("か", "ga"),
        ]);
        assert_matches!(result, Err(QuizError::DuplicateSymbol(s)) if s == "か");
    }

    #[test]
    fn test_missing_file() {
        assert_matches!(
            read_dataset_from_file("katakana.json"),
            Err(QuizError::DatasetMissing(_))
        );
    }

    #[test]
    fn test_dataset_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 2,
            "entries": [
                { "symbol": "あ", "romanized": "a" },
                { "symbol": "い", "romanized": "i" }
            ]
        }
        "#;

        let file: DatasetFile = from_str(json_data).expect("Failed to deserialize test dataset");
        assert_eq!(file.size, 2);
        assert_eq!(file.entries[1].romanized, "i");
    }
}
