//! Test doubles shared by the unit tests.

use crate::checker::tokenizer;
use crate::document::Document;
use crate::{Error, Problem, Result, TextChecker, TextChunk};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// Flags a fixed set of words and records every chunk request.
pub(crate) struct MarkedChecker {
    misspelled: HashSet<String>,
    language: String,
    requests: RefCell<Vec<(usize, usize)>>,
    checks: Cell<usize>,
    lookups: Cell<usize>,
    embedded: Option<Vec<String>>,
    fail: bool,
}

impl MarkedChecker {
    pub(crate) fn new(words: &[&str]) -> Self {
        Self {
            misspelled: words.iter().map(|w| w.to_string()).collect(),
            language: "en_US".to_string(),
            requests: RefCell::new(Vec::new()),
            checks: Cell::new(0),
            lookups: Cell::new(0),
            embedded: None,
            fail: false,
        }
    }

    pub(crate) fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Attach `suggestions` to every reported problem.
    pub(crate) fn with_embedded(mut self, suggestions: &[&str]) -> Self {
        self.embedded = Some(suggestions.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Every `check` call fails.
    pub(crate) fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub(crate) fn requests(&self) -> Vec<(usize, usize)> {
        self.requests.borrow().clone()
    }

    pub(crate) fn checks(&self) -> usize {
        self.checks.get()
    }

    /// Number of `suggestions` calls.
    pub(crate) fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl TextChecker for MarkedChecker {
    fn checkable_chunks(
        &self,
        doc: &dyn Document,
        start: usize,
        end: usize,
    ) -> Result<Vec<TextChunk>> {
        self.requests.borrow_mut().push((start, end));
        Ok(vec![TextChunk::new(start, doc.text(start, end)?)])
    }

    fn check(&self, chunk: &TextChunk) -> Result<Option<Vec<Problem>>> {
        self.checks.set(self.checks.get() + 1);
        if self.fail {
            return Err(Error::checker("speller service unavailable"));
        }

        let problems: Vec<Problem> = tokenizer::tokenize(&chunk.text)
            .into_iter()
            .filter(|token| self.misspelled.contains(token.text))
            .map(|token| {
                let problem = Problem::new(token.text, chunk.start + token.offset, &self.language);
                match &self.embedded {
                    Some(suggestions) => problem.with_suggestions(suggestions.clone()),
                    None => problem,
                }
            })
            .collect();

        Ok((!problems.is_empty()).then_some(problems))
    }

    fn suggestions(&self, doc: &dyn Document, offset: usize) -> Result<Vec<String>> {
        self.lookups.set(self.lookups.get() + 1);
        let text = doc.text(offset, doc.len())?;
        Ok(tokenizer::tokenize(&text)
            .first()
            .map(|token| vec![token.text.to_uppercase()])
            .unwrap_or_default())
    }
}

/// `len` dots with `words` written over them at the given offsets.
pub(crate) fn dotted(len: usize, words: &[(usize, &str)]) -> String {
    let mut chars = vec!['.'; len];
    for &(offset, word) in words {
        for (i, ch) in word.chars().enumerate() {
            chars[offset + i] = ch;
        }
    }
    chars.into_iter().collect()
}
