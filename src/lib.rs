pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod document;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod parser;
pub mod session;
pub mod traversal;

#[cfg(test)]
pub(crate) mod testing;

pub use checker::{DictionaryChecker, TextChecker, TextChunk};
pub use config::{Config, ScanOptions};
pub use document::{Document, MemoryDocument, Position, StablePosition};
pub use error::{Error, Result};
pub use ignore::{IgnoreSet, IgnoredWord, WordList};
pub use session::{FindResult, ReplaceOutcome, Session, SessionState};
pub use traversal::Traversal;

use serde::{Deserialize, Serialize};

/// A single spelling problem reported by a checker.
///
/// `end` is the offset of the last character of the word, not one past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub word: String,
    #[serde(rename = "startOffset")]
    pub start: usize,
    #[serde(rename = "endOffset")]
    pub end: usize,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl Problem {
    pub fn new(word: impl Into<String>, start: usize, language: impl Into<String>) -> Self {
        let word = word.into();
        let end = start + word.chars().count().saturating_sub(1);
        Self {
            word,
            start,
            end,
            language: language.into(),
            suggestions: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    /// One past the last character of the word.
    pub fn end_exclusive(&self) -> usize {
        self.end + 1
    }
}
