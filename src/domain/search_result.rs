//! Search result entities and their launcher-ready projection

use serde::{Deserialize, Serialize};
use std::iter;

use crate::utils::flatten;

/// Separator between the language label and the definitions in a subtitle
pub const SUBTITLE_SEPARATOR: &str = " | ";

/// One matched word with its link and definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub word: String,
    /// Absolute URL of the word's definition page
    pub link: String,
    pub definitions: Vec<String>,
}

impl Entry {
    pub fn new(word: impl Into<String>, link: impl Into<String>, definitions: Vec<String>) -> Self {
        Self {
            word: word.into(),
            link: link.into(),
            definitions,
        }
    }

    /// Definitions of this entry only, space-joined
    pub fn definition_text(&self) -> String {
        self.definitions.join(" ")
    }
}

/// One language section of a search results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultGroup {
    pub language: String,
    pub entries: Vec<Entry>,
}

impl ResultGroup {
    pub fn new(language: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            language: language.into(),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Flattened display record: `title` = word, `subtitle` = language and
/// definitions, `arg` = link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    pub subtitle: String,
    pub arg: String,
}

impl ResultItem {
    pub fn new(word: &str, language: &str, definitions: &str, link: &str) -> Self {
        Self {
            title: word.to_string(),
            subtitle: format!("{language}{SUBTITLE_SEPARATOR}{definitions}"),
            arg: link.to_string(),
        }
    }
}

/// Project groups into items in document order.
///
/// Each group's language label is repeated once per entry, then words, links,
/// definition strings and labels are flattened across groups into four
/// parallel sequences and zipped back together.
pub fn into_items(groups: &[ResultGroup]) -> Vec<ResultItem> {
    let languages = flatten(
        groups
            .iter()
            .map(|g| iter::repeat_n(g.language.as_str(), g.len())),
    );
    let words = flatten(
        groups
            .iter()
            .map(|g| g.entries.iter().map(|e| e.word.as_str())),
    );
    let links = flatten(
        groups
            .iter()
            .map(|g| g.entries.iter().map(|e| e.link.as_str())),
    );
    let definitions = flatten(
        groups
            .iter()
            .map(|g| g.entries.iter().map(Entry::definition_text)),
    );

    words
        .into_iter()
        .zip(links)
        .zip(definitions)
        .zip(languages)
        .map(|(((word, link), definition), language)| {
            ResultItem::new(word, language, &definition, link)
        })
        .collect()
}
