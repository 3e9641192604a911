//! Words the user asked the session to skip.
//!
//! Two lists are consulted for every candidate problem:
//!
//! - [`WordList`]: plain words per language, ignored anywhere in the document.
//!   It comes from the caller with each request and has no positions.
//! - [`IgnoreSet`]: single occurrences dismissed during the session, tracked
//!   through stable positions and kept sorted by start offset.

use crate::document::{check_range, Document, Position};
use crate::{Error, Problem, Result};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// The canonical form of a language tag: its first two characters.
///
/// `"en_US"` and `"en_GB"` both become `"en"`. Tags shorter than two
/// characters are their own canonical form.
pub fn canonical_language(tag: &str) -> &str {
    match tag.char_indices().nth(2) {
        Some((byte, _)) => &tag[..byte],
        None => tag,
    }
}

/// Words ignored everywhere, keyed by canonical language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashMap<String, HashSet<String>>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: &str, word: impl Into<String>) {
        self.words
            .entry(canonical_language(language).to_string())
            .or_default()
            .insert(word.into());
    }

    /// Build a list from the `ignoredWords` request argument.
    ///
    /// The argument must be an object mapping language tags to arrays of
    /// words; `null` is an empty list.
    pub fn from_argument(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::new());
        }
        let entries: BTreeMap<String, Vec<String>> = serde_json::from_value(value.clone())
            .map_err(|e| Error::invalid_argument("ignoredWords", e.to_string()))?;
        Ok(Self::from(&entries))
    }

    pub fn contains(&self, problem: &Problem) -> bool {
        self.words
            .get(canonical_language(&problem.language))
            .is_some_and(|words| words.contains(&problem.word))
    }

    pub fn is_empty(&self) -> bool {
        self.words.values().all(HashSet::is_empty)
    }
}

impl From<&BTreeMap<String, Vec<String>>> for WordList {
    fn from(entries: &BTreeMap<String, Vec<String>>) -> Self {
        let mut list = Self::new();
        for (language, words) in entries {
            for word in words {
                list.insert(language, word.clone());
            }
        }
        list
    }
}

/// A word occurrence pinned to the document through stable positions.
#[derive(Debug, Clone)]
pub struct IgnoredWord {
    start: Position,
    end: Position,
    word: String,
    language: String,
}

impl IgnoredWord {
    /// Pin `problem` to the current document.
    pub fn from_problem(doc: &dyn Document, problem: &Problem) -> Result<Self> {
        Ok(Self {
            start: doc.create_position(problem.start)?,
            end: doc.create_position(problem.end)?,
            word: problem.word.clone(),
            language: problem.language.clone(),
        })
    }

    pub fn start(&self) -> usize {
        self.start.offset()
    }

    /// Offset of the last character, as currently resolved.
    pub fn end(&self) -> usize {
        self.end.offset()
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Same word in the same language as `problem`.
    pub fn same_word(&self, problem: &Problem) -> bool {
        self.word == problem.word && self.language == problem.language
    }

    /// Same offsets, word and language as `problem`.
    pub fn probably_same(&self, problem: &Problem) -> bool {
        self.start() == problem.start
            && self.end() == problem.end
            && self.word == problem.word
            && self.language == problem.language
    }
}

/// Occurrences ignored during the session, sorted by current start offset.
#[derive(Debug, Default)]
pub struct IgnoreSet {
    words: Vec<IgnoredWord>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an occurrence, replacing any record at the same start offset.
    pub fn ignore(&mut self, record: IgnoredWord) {
        match self.search(record.start()) {
            Ok(index) => self.words[index] = record,
            Err(index) => self.words.insert(index, record),
        }
    }

    /// Whether `problem` is an occurrence the user ignored.
    ///
    /// A record found at the same offset with a different word or language
    /// is left over from text that has since been edited; it is dropped.
    pub fn is_ignored(&mut self, doc: &dyn Document, problem: &Problem) -> Result<bool> {
        if self.words.is_empty() {
            return Ok(false);
        }

        check_range(problem.start, problem.end, doc.len())?;
        let Ok(index) = self.search(problem.start) else {
            return Ok(false);
        };

        if self.words[index].same_word(problem) {
            return Ok(true);
        }

        let stale = self.words.remove(index);
        debug!(
            offset = problem.start,
            stale = stale.word(),
            found = %problem.word,
            "evicting stale ignored word"
        );
        Ok(false)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &IgnoredWord> {
        self.words.iter()
    }

    fn search(&self, offset: usize) -> std::result::Result<usize, usize> {
        self.words.binary_search_by_key(&offset, IgnoredWord::start)
    }
}
