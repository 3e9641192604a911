//! The operations a host calls during a manual spellcheck.
//!
//! A [`Session`] owns the resume state and the occurrences the user ignored.
//! The document, the checker and the static word list are passed in with
//! every call, so the host stays free to edit the document between calls.

pub mod state;

pub use state::{Phase, SessionState};

use crate::checker::TextChecker;
use crate::config::ScanOptions;
use crate::document::Document;
use crate::ignore::{IgnoreSet, WordList};
use crate::traversal::Traversal;
use crate::{Error, Problem, Result};
use serde::Serialize;
use tracing::{debug, info};

/// A problem as handed to the host, with suggestions resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindResult {
    pub word: String,
    pub language: String,
    pub start_offset: usize,
    /// Offset of the last character of the word.
    pub end_offset: usize,
    pub suggestions: Vec<String>,
}

impl FindResult {
    fn new(problem: Problem, suggestions: Vec<String>) -> Self {
        Self {
            word: problem.word,
            language: problem.language,
            start_offset: problem.start,
            end_offset: problem.end,
            suggestions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The edit was made; this is the next problem after it.
    Next(Option<FindResult>),
    /// The text at the current match no longer reads as the matched word.
    /// The document was not touched.
    WordChanged,
    /// The document refused the edit.
    Rejected { reason: String },
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    ignored: IgnoreSet,
    options: ScanOptions,
}

impl Session {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            state: SessionState::new(),
            ignored: IgnoreSet::new(),
            options,
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn ignored(&self) -> &IgnoreSet {
        &self.ignored
    }

    /// Start a manual spellcheck from the top of the document.
    pub fn begin(&mut self) {
        self.state.begin();
    }

    /// The next unresolved problem, or `None` once the session is done.
    ///
    /// Suggestions carried by the problem itself win. Otherwise they are
    /// looked up from the checker when `lookup_suggestions` is set, and left
    /// empty when it is not.
    pub fn find_next(
        &mut self,
        doc: &dyn Document,
        checker: &dyn TextChecker,
        words: &WordList,
    ) -> Result<Option<FindResult>> {
        let mut traversal = Traversal::new(checker, &mut self.ignored, words, &self.options);
        let Some(mut problem) = self
            .state
            .find_next(doc, &mut traversal, self.options.detect_wrap)?
        else {
            return Ok(None);
        };

        let suggestions = match problem.suggestions.take() {
            Some(embedded) => embedded,
            None if self.options.lookup_suggestions => checker.suggestions(doc, problem.start)?,
            None => Vec::new(),
        };

        Ok(Some(FindResult::new(problem, suggestions)))
    }

    /// Ignore the current occurrence for the rest of the session and move on.
    pub fn ignore_current_and_find_next(
        &mut self,
        doc: &dyn Document,
        checker: &dyn TextChecker,
        words: &WordList,
    ) -> Result<Option<FindResult>> {
        let record = self.state.current().ok_or(Error::NoCurrentWord)?.clone();
        debug!(word = record.word(), start = record.start(), "ignoring occurrence");
        self.ignored.ignore(record);

        self.find_next(doc, checker, words)
    }

    /// Replace the current word, or every whole-word occurrence of it, and
    /// move on to the next problem after the edit.
    pub fn replace_and_find_next(
        &mut self,
        doc: &mut dyn Document,
        checker: &dyn TextChecker,
        words: &WordList,
        new_word: &str,
        replace_all: bool,
    ) -> Result<ReplaceOutcome> {
        let current = self.state.current().ok_or(Error::NoCurrentWord)?;
        let word = current.word().to_string();
        let start = current.start();
        let end = current.end() + 1;

        let edit = if replace_all {
            doc.replace_all(&word, new_word).map(|count| {
                info!(%word, replacement = new_word, count, "replaced all occurrences");
            })
        } else {
            if end > doc.len() || doc.text(start, end)? != word {
                debug!(%word, start, "word changed since it was found");
                return Ok(ReplaceOutcome::WordChanged);
            }
            doc.replace(start, end, new_word)
        };

        match edit {
            Ok(()) => {}
            Err(Error::OperationRejected { reason }) => {
                debug!(%reason, "document rejected the replacement");
                return Ok(ReplaceOutcome::Rejected { reason });
            }
            Err(e) => return Err(e),
        }

        Ok(ReplaceOutcome::Next(self.find_next(doc, checker, words)?))
    }

    /// Drop the session state and every ignored occurrence.
    pub fn clear(&mut self) {
        self.state.clear();
        self.ignored.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ignore::IgnoredWord;
    use crate::testing::{dotted, MarkedChecker};
    use crate::MemoryDocument;

    fn starts(result: Option<FindResult>) -> Option<usize> {
        result.map(|found| found.start_offset)
    }

    #[test]
    fn test_find_next_result_shape() {
        let doc = MemoryDocument::new("the zzz end");
        let checker = MarkedChecker::new(&["zzz"]).with_language("en_GB");
        let mut session = Session::default();

        let found = session
            .find_next(&doc, &checker, &WordList::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            found,
            FindResult {
                word: "zzz".to_string(),
                language: "en_GB".to_string(),
                start_offset: 4,
                end_offset: 6,
                suggestions: vec!["ZZZ".to_string()],
            }
        );

        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["startOffset"], 4);
        assert_eq!(json["endOffset"], 6);
    }

    #[test]
    fn test_embedded_suggestions_win() {
        let doc = MemoryDocument::new("the zzz end");
        let checker = MarkedChecker::new(&["zzz"]).with_embedded(&["zap"]);
        let mut session = Session::default();

        let found = session
            .find_next(&doc, &checker, &WordList::new())
            .unwrap()
            .unwrap();
        assert_eq!(found.suggestions, vec!["zap"]);
        assert_eq!(checker.lookups(), 0);
    }

    #[test]
    fn test_lookup_can_be_disabled() {
        let doc = MemoryDocument::new("the zzz end");
        let checker = MarkedChecker::new(&["zzz"]);
        let mut session = Session::new(ScanOptions {
            lookup_suggestions: false,
            ..ScanOptions::default()
        });

        let found = session
            .find_next(&doc, &checker, &WordList::new())
            .unwrap()
            .unwrap();
        assert!(found.suggestions.is_empty());
        assert_eq!(checker.lookups(), 0);
    }

    #[test]
    fn test_ignore_current_skips_occurrence_only() {
        let doc = MemoryDocument::new(&dotted(60, &[(2, "zzz"), (20, "zzz"), (40, "yyy")]));
        let checker = MarkedChecker::new(&["zzz", "yyy"]);
        let words = WordList::new();
        let mut session = Session::default();

        assert_eq!(starts(session.find_next(&doc, &checker, &words).unwrap()), Some(2));
        let next = session
            .ignore_current_and_find_next(&doc, &checker, &words)
            .unwrap();
        assert_eq!(starts(next), Some(20));
        assert_eq!(session.ignored().len(), 1);

        let next = session
            .ignore_current_and_find_next(&doc, &checker, &words)
            .unwrap();
        assert_eq!(starts(next), Some(40));
        let next = session
            .ignore_current_and_find_next(&doc, &checker, &words)
            .unwrap();
        assert_eq!(next, None);
        assert_eq!(session.state().phase(), Phase::Done);

        // Ignored occurrences outlive the session that recorded them.
        assert_eq!(session.find_next(&doc, &checker, &words).unwrap(), None);

        session.clear();
        assert!(session.ignored().is_empty());
        assert_eq!(starts(session.find_next(&doc, &checker, &words).unwrap()), Some(2));
    }

    #[test]
    fn test_static_word_list_applies_per_call() {
        let doc = MemoryDocument::new(&dotted(40, &[(2, "zzz"), (20, "yyy")]));
        let checker = MarkedChecker::new(&["zzz", "yyy"]);
        let mut words = WordList::new();
        words.insert("en_GB", "zzz");
        let mut session = Session::default();

        assert_eq!(starts(session.find_next(&doc, &checker, &words).unwrap()), Some(20));
    }

    #[test]
    fn test_operations_need_a_current_word() {
        let mut doc = MemoryDocument::new("zzz");
        let checker = MarkedChecker::new(&["zzz"]);
        let mut session = Session::default();

        let err = session
            .ignore_current_and_find_next(&doc, &checker, &WordList::new())
            .unwrap_err();
        assert!(matches!(err, Error::NoCurrentWord));

        let err = session
            .replace_and_find_next(&mut doc, &checker, &WordList::new(), "ok", false)
            .unwrap_err();
        assert!(matches!(err, Error::NoCurrentWord));
    }

    #[test]
    fn test_replace_resumes_after_replacement() {
        let mut doc = MemoryDocument::new("the zzz and zzz end");
        let checker = MarkedChecker::new(&["zzz", "fine"]);
        let words = WordList::new();
        let mut session = Session::default();

        assert_eq!(starts(session.find_next(&doc, &checker, &words).unwrap()), Some(4));

        let outcome = session
            .replace_and_find_next(&mut doc, &checker, &words, "fine", false)
            .unwrap();
        assert_eq!(doc.to_string(), "the fine and zzz end");
        match outcome {
            ReplaceOutcome::Next(Some(found)) => assert_eq!(found.start_offset, 13),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_replace_all_occurrences() {
        let mut doc = MemoryDocument::new("zzz a zzz b zzzz");
        let checker = MarkedChecker::new(&["zzz"]);
        let words = WordList::new();
        let mut session = Session::default();

        session.find_next(&doc, &checker, &words).unwrap();
        let outcome = session
            .replace_and_find_next(&mut doc, &checker, &words, "ok", true)
            .unwrap();
        assert_eq!(doc.to_string(), "ok a ok b zzzz");
        assert_eq!(outcome, ReplaceOutcome::Next(None));
    }

    #[test]
    fn test_changed_word_is_not_replaced() {
        let mut doc = MemoryDocument::new("the zzz end");
        let checker = MarkedChecker::new(&["zzz"]);
        let words = WordList::new();
        let mut session = Session::default();

        session.find_next(&doc, &checker, &words).unwrap();
        doc.insert(5, "x").unwrap();

        let outcome = session
            .replace_and_find_next(&mut doc, &checker, &words, "fine", false)
            .unwrap();
        assert_eq!(outcome, ReplaceOutcome::WordChanged);
        assert_eq!(doc.to_string(), "the zxzz end");
    }

    #[test]
    fn test_read_only_document_rejects_replace() {
        let mut doc = MemoryDocument::new("the zzz end");
        let checker = MarkedChecker::new(&["zzz"]);
        let words = WordList::new();
        let mut session = Session::default();

        session.find_next(&doc, &checker, &words).unwrap();
        doc.set_read_only(true);

        for replace_all in [false, true] {
            let outcome = session
                .replace_and_find_next(&mut doc, &checker, &words, "fine", replace_all)
                .unwrap();
            assert!(matches!(outcome, ReplaceOutcome::Rejected { .. }));
        }
        assert_eq!(doc.to_string(), "the zzz end");
        assert_eq!(session.state().current().map(IgnoredWord::start), Some(4));
    }

    #[test]
    fn test_checker_failure_is_propagated() {
        let doc = MemoryDocument::new("the zzz end");
        let checker = MarkedChecker::new(&["zzz"]).failing();
        let mut session = Session::default();

        let err = session
            .find_next(&doc, &checker, &WordList::new())
            .unwrap_err();
        assert!(matches!(err, Error::Checker { .. }));
    }
}
