pub mod dictionary;
pub mod suggestions;
pub mod tokenizer;

use crate::document::{check_range, Document};
use crate::parser::{self, Format};
use crate::{Config, Problem};
use anyhow::Context;
use dictionary::Dictionary;
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// A piece of document text the checker can analyze on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Document offset of the first character of `text`.
    pub start: usize,
    pub text: String,
}

impl TextChunk {
    pub fn new(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }
}

/// The spelling capability a session scans with.
pub trait TextChecker {
    /// Checkable chunks covering `[start, end)`, in document order.
    fn checkable_chunks(
        &self,
        doc: &dyn Document,
        start: usize,
        end: usize,
    ) -> crate::Result<Vec<TextChunk>>;

    /// Problems in a chunk, with document offsets.
    ///
    /// `Ok(None)` means the checker has nothing to say about the chunk.
    fn check(&self, chunk: &TextChunk) -> crate::Result<Option<Vec<Problem>>>;

    /// Suggestions for the word starting at `offset`.
    fn suggestions(&self, doc: &dyn Document, offset: usize) -> crate::Result<Vec<String>>;
}

/// Longest word `suggestions` reads from the document.
const MAX_WORD_CHARS: usize = 64;

/// Chunks of the whole document, kept until its text changes.
#[derive(Debug, Default)]
struct Segmented {
    text: String,
    chunks: Vec<TextChunk>,
}

/// A `TextChecker` backed by an FST dictionary and a personal word list.
pub struct DictionaryChecker {
    dictionary: Dictionary,
    personal_words: HashSet<String>,
    ignore_patterns: Vec<Regex>,
    language: String,
    format: Format,
    max_suggestions: usize,
    case_sensitive: bool,
    embed_suggestions: bool,
    segmented: RefCell<Option<Segmented>>,
}

impl DictionaryChecker {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let dictionary = match &config.dictionary {
            Some(path) => Dictionary::from_word_list(path)?,
            None => Dictionary::load(&config.language)?,
        };

        let personal_words = match &config.personal_dictionary {
            Some(path) if path.exists() => load_personal_words(path)?,
            _ => HashSet::new(),
        };

        let mut ignore_patterns = Vec::new();
        for pattern in &config.ignore_patterns {
            match Regex::new(pattern) {
                Ok(re) => ignore_patterns.push(re),
                Err(e) => warn!(%pattern, error = %e, "dropping invalid ignore pattern"),
            }
        }

        Ok(Self {
            dictionary,
            personal_words,
            ignore_patterns,
            language: config.language.clone(),
            format: Format::PlainText,
            max_suggestions: config.max_suggestions,
            case_sensitive: config.case_sensitive,
            embed_suggestions: false,
            segmented: RefCell::new(None),
        })
    }

    /// A checker with only a dictionary and default settings.
    pub fn with_dictionary(dictionary: Dictionary, language: impl Into<String>) -> Self {
        Self {
            dictionary,
            personal_words: HashSet::new(),
            ignore_patterns: Vec::new(),
            language: language.into(),
            format: Format::PlainText,
            max_suggestions: 5,
            case_sensitive: false,
            embed_suggestions: false,
            segmented: RefCell::new(None),
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Attach suggestions to every reported problem.
    pub fn with_embedded_suggestions(mut self, embed: bool) -> Self {
        self.embed_suggestions = embed;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn is_known(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        if self.personal_words.contains(&lower) {
            return true;
        }
        if self.case_sensitive {
            self.dictionary.contains(word)
        } else {
            self.dictionary.contains(&lower)
        }
    }

    /// Markdown chunks of the whole document inside `[start, end)`.
    ///
    /// Block structure depends on everything before a range, so the full text
    /// is parsed and the result clipped.
    fn markdown_chunks(
        &self,
        doc: &dyn Document,
        start: usize,
        end: usize,
    ) -> crate::Result<Vec<TextChunk>> {
        check_range(start, end, doc.len())?;
        let text = doc.text(0, doc.len())?;

        let mut segmented = self.segmented.borrow_mut();
        let cached = match segmented.take() {
            Some(cached) if cached.text == text => cached,
            _ => {
                trace!(chars = doc.len(), "segmenting markdown document");
                let chunks = parser::segment(&text, 0, Format::Markdown);
                Segmented { text, chunks }
            }
        };
        let clipped = parser::clip(&cached.chunks, start, end);
        *segmented = Some(cached);
        Ok(clipped)
    }

    fn should_ignore(&self, word: &str) -> bool {
        if word.chars().count() <= 1 {
            return true;
        }

        self.ignore_patterns.iter().any(|pattern| pattern.is_match(word))
    }
}

impl TextChecker for DictionaryChecker {
    fn checkable_chunks(
        &self,
        doc: &dyn Document,
        start: usize,
        end: usize,
    ) -> crate::Result<Vec<TextChunk>> {
        match self.format {
            Format::Markdown => self.markdown_chunks(doc, start, end),
            Format::PlainText => {
                let text = doc.text(start, end)?;
                Ok(parser::segment(&text, start, Format::PlainText))
            }
        }
    }

    fn check(&self, chunk: &TextChunk) -> crate::Result<Option<Vec<Problem>>> {
        let tokens = tokenizer::tokenize(&chunk.text);
        if tokens.is_empty() {
            return Ok(None);
        }

        let problems = tokens
            .into_iter()
            .filter(|token| !self.should_ignore(token.text) && !self.is_known(token.text))
            .map(|token| {
                let problem = Problem::new(token.text, chunk.start + token.offset, &self.language);
                if self.embed_suggestions {
                    let found =
                        suggestions::generate(token.text, &self.dictionary, self.max_suggestions);
                    problem.with_suggestions(found)
                } else {
                    problem
                }
            })
            .collect();

        Ok(Some(problems))
    }

    fn suggestions(&self, doc: &dyn Document, offset: usize) -> crate::Result<Vec<String>> {
        let end = doc.len().min(offset.saturating_add(MAX_WORD_CHARS));
        let text = doc.text(offset, end)?;
        let found = tokenizer::tokenize(&text)
            .first()
            .filter(|token| token.offset == 0)
            .map(|token| suggestions::generate(token.text, &self.dictionary, self.max_suggestions))
            .unwrap_or_default();
        Ok(found)
    }
}

/// Read a personal dictionary: one word per line, `#` starts a comment line.
pub fn load_personal_words(path: &Path) -> anyhow::Result<HashSet<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read personal dictionary: {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|word| !word.is_empty() && !word.starts_with('#'))
        .map(str::to_lowercase)
        .collect())
}
